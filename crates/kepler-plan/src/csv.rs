//! Tolerant CSV ingestion
//!
//! One contact per row:
//!
//! ```text
//! id,from,to,t_start,t_end,owlt,rate_bps,setup_s,residual_bytes
//! ```
//!
//! Comment lines (`#`), blank lines and malformed rows are skipped:
//! plans exported from scheduling tools routinely carry headers and
//! partial rows, and ingestion must not fail wholesale because of them.
//! Whitespace around fields is tolerated, and rows carrying more than
//! nine fields are truncated to the first nine.

use std::fs;
use std::path::Path;

use kepler_core::Contact;
use tracing::{debug, warn};

use crate::error::{PlanSourceError, SourceResult};

/// Parse contacts out of CSV text. Unparseable rows are dropped silently;
/// the caller learns the usable count from the returned length.
pub fn parse_contacts(text: &str) -> Vec<Contact> {
    let mut contacts = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_row(line) {
            Some(contact) => contacts.push(contact),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, loaded = contacts.len(), "dropped malformed rows");
    }
    contacts
}

/// Load a contact plan from a local CSV file.
///
/// Errors only when the file itself cannot be read or yields zero usable
/// rows.
pub fn load_contacts_csv(path: impl AsRef<Path>) -> SourceResult<Vec<Contact>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let contacts = parse_contacts(&text);

    if contacts.is_empty() {
        warn!(path = %path.display(), "no usable contacts in file");
        return Err(PlanSourceError::EmptyPlan {
            source_name: path.display().to_string(),
        });
    }

    debug!(path = %path.display(), count = contacts.len(), "loaded contact plan");
    Ok(contacts)
}

fn parse_row(line: &str) -> Option<Contact> {
    let mut fields = line.split(',').map(str::trim);

    // Nine leading fields make a contact; anything after them is ignored
    Some(Contact {
        id: fields.next()?.parse().ok()?,
        from: fields.next()?.parse().ok()?,
        to: fields.next()?.parse().ok()?,
        t_start: fields.next()?.parse().ok()?,
        t_end: fields.next()?.parse().ok()?,
        owlt: fields.next()?.parse().ok()?,
        rate_bps: fields.next()?.parse().ok()?,
        setup_s: fields.next()?.parse().ok()?,
        residual_bytes: fields.next()?.parse().ok()?,
    })
}
