//! Planning result reports
//!
//! Serializable views of routing results for downstream consumers, plus
//! human-readable text rendering. JSON is the default interchange shape:
//!
//! ```json
//! {"found":true,"eta":10.34,"latency":10.34,"hops":2,"contacts":[0,1]}
//! ```

use kepler_core::Route;
use serde::Serialize;

/// One route, with latency resolved against the dispatch time.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hops: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contacts: Option<Vec<u32>>,
}

impl RouteReport {
    pub fn new(route: &Route, t0: f64) -> Self {
        if route.found {
            Self {
                found: true,
                eta: Some(route.eta),
                latency: Some(route.latency(t0)),
                hops: Some(route.hops()),
                contacts: Some(route.contact_ids.clone()),
            }
        } else {
            Self {
                found: false,
                eta: None,
                latency: None,
                hops: None,
                contacts: None,
            }
        }
    }
}

/// A multi-route result.
#[derive(Debug, Clone, Serialize)]
pub struct MultiRouteReport {
    pub found: bool,
    pub routes: Vec<RouteReport>,
}

impl MultiRouteReport {
    pub fn new(routes: &[Route], t0: f64) -> Self {
        Self {
            found: !routes.is_empty(),
            routes: routes.iter().map(|r| RouteReport::new(r, t0)).collect(),
        }
    }
}

/// Render a value as JSON, pretty or compact.
pub fn to_json<T: Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

fn arrow_path(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(" -> ")
}

/// Human-readable rendering of a single-route result.
pub fn render_text_single(route: &Route, t0: f64) -> String {
    if !route.found {
        return "No route found.\n".to_string();
    }
    format!(
        "Best route\n  eta:     {:.3} s\n  latency: {:.3} s\n  hops:    {}\n  path:    {}\n",
        route.eta,
        route.latency(t0),
        route.hops(),
        arrow_path(&route.contact_ids)
    )
}

/// Human-readable rendering of a multi-route result, with aggregate
/// statistics across the set.
pub fn render_text_multi(routes: &[Route], t0: f64, title: &str) -> String {
    if routes.is_empty() {
        return "No routes found.\n".to_string();
    }

    let etas: Vec<f64> = routes.iter().map(|r| r.eta).collect();
    let min_eta = etas.iter().copied().fold(f64::INFINITY, f64::min);
    let max_eta = etas.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean_eta = etas.iter().sum::<f64>() / etas.len() as f64;
    let min_hops = routes.iter().map(Route::hops).min().unwrap_or(0);
    let max_hops = routes.iter().map(Route::hops).max().unwrap_or(0);

    let mut out = String::new();
    out.push_str(&format!("{title} ({} routes)\n", routes.len()));
    out.push_str(&format!(
        "  eta min/mean/max: {min_eta:.3} / {mean_eta:.3} / {max_eta:.3} s\n"
    ));
    out.push_str(&format!(
        "  eta spread:       {:.3} s\n  hops:             {min_hops}..{max_hops}\n\n",
        max_eta - min_eta
    ));

    for (rank, route) in routes.iter().enumerate() {
        let overhead = 100.0 * (route.eta - min_eta) / (min_eta + 1e-9);
        out.push_str(&format!(
            "  #{rank} eta={:.3} s  latency={:.3} s  hops={}  (+{overhead:.1}% vs best)\n",
            route.eta,
            route.latency(t0),
            route.hops(),
            rank = rank + 1,
        ));
        out.push_str(&format!("     path: {}\n", arrow_path(&route.contact_ids)));
    }
    out
}
