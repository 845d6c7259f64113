//! EWMA first-hop wait penalty
//!
//! Optional learning applied between planning cycles. When several
//! candidate routes have nearly equal arrival times and compete for the
//! same first hop, the raw search can oscillate between them cycle to
//! cycle. Smoothing the observed wait at the chosen first hop and feeding
//! it back as extra setup time on a *planning copy* damps that
//! oscillation without ever touching the true plan or the feasibility
//! arithmetic.
//!
//! Key parameters:
//! - **alpha**: smoothing factor in `[0, 1]`; higher weighs recent waits
//!   more.
//! - **lambda**: influence in `>= 0`; scales the penalty added to
//!   `setup_s` on the copy.
//!
//! The penalty is a hint, not a contract: a zero `lambda` restores exact
//! base behavior.

use kepler_core::Contact;
use tracing::debug;

/// Smoothing configuration for the wait penalty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenaltyConfig {
    /// EWMA smoothing factor, in `[0, 1]`
    pub alpha: f64,
    /// Penalty weight applied to `setup_s`, `>= 0`
    pub lambda: f64,
}

impl Default for PenaltyConfig {
    fn default() -> Self {
        Self {
            alpha: 0.2,
            lambda: 1.0,
        }
    }
}

impl PenaltyConfig {
    /// Validate configuration ranges. An empty list means the
    /// configuration is sound.
    pub fn validate(&self) -> Vec<PenaltyWarning> {
        let mut warnings = Vec::new();
        if !(0.0..=1.0).contains(&self.alpha) {
            warnings.push(PenaltyWarning::AlphaOutOfRange);
        }
        if self.lambda < 0.0 {
            warnings.push(PenaltyWarning::NegativeLambda);
        }
        warnings
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Configuration problems reported by [`PenaltyConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenaltyWarning {
    /// `alpha` outside `[0, 1]`
    AlphaOutOfRange,
    /// `lambda` below zero
    NegativeLambda,
}

impl std::fmt::Display for PenaltyWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PenaltyWarning::AlphaOutOfRange => write!(f, "alpha must be within [0, 1]"),
            PenaltyWarning::NegativeLambda => write!(f, "lambda must be >= 0"),
        }
    }
}

/// Per-contact exponentially smoothed wait, indexed by position in the
/// base plan.
#[derive(Debug, Clone)]
pub struct WaitPenalty {
    penalties: Vec<f64>,
    config: PenaltyConfig,
}

impl WaitPenalty {
    /// Create zeroed penalty state for a plan of `contact_count` contacts.
    pub fn new(contact_count: usize, config: PenaltyConfig) -> Self {
        Self {
            penalties: vec![0.0; contact_count],
            config,
        }
    }

    pub fn with_defaults(contact_count: usize) -> Self {
        Self::new(contact_count, PenaltyConfig::default())
    }

    pub fn config(&self) -> &PenaltyConfig {
        &self.config
    }

    /// Current smoothed wait for the contact at `index`, in seconds.
    pub fn penalty(&self, index: usize) -> f64 {
        self.penalties.get(index).copied().unwrap_or(0.0)
    }

    /// Fold an observed first-hop wait into the state:
    /// `penalty <- (1 - alpha) * penalty + alpha * wait`.
    pub fn observe(&mut self, index: usize, wait_s: f64) {
        if let Some(p) = self.penalties.get_mut(index) {
            *p = (1.0 - self.config.alpha) * *p + self.config.alpha * wait_s;
            debug!(contact = index, penalty = *p, wait = wait_s, "wait penalty updated");
        }
    }

    /// A planning copy of `plan` with each contact's setup time augmented
    /// by `lambda * penalty`. The input plan is untouched.
    pub fn apply(&self, plan: &[Contact]) -> Vec<Contact> {
        plan.iter()
            .enumerate()
            .map(|(i, c)| {
                let mut c = *c;
                c.setup_s += self.config.lambda * self.penalty(i);
                c
            })
            .collect()
    }

    /// Resize the state after the plan membership changed. Existing
    /// entries are kept where indices still overlap.
    pub fn resize(&mut self, contact_count: usize) {
        self.penalties.resize(contact_count, 0.0);
    }
}
