//! LEO link-type heuristics
//!
//! Display-level metrics for LEO constellations. Node labeling convention:
//! multiples of 100 in `[100, 1000)` are ground stations, everything else
//! is a satellite. None of this feeds the feasibility arithmetic; the
//! router only ever sees window times, rates and residual capacity.

use serde::{Deserialize, Serialize};

use crate::Contact;

/// Link classification in a LEO constellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkType {
    /// Satellite to satellite
    Isl,
    /// Ground station to satellite
    Uplink,
    /// Satellite to ground station
    Downlink,
}

impl LinkType {
    /// Preference penalty in seconds, favoring inter-satellite links.
    pub fn penalty(&self) -> f64 {
        match self {
            LinkType::Isl => 0.0,
            LinkType::Downlink => 0.5,
            LinkType::Uplink => 1.0,
        }
    }
}

impl std::fmt::Display for LinkType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkType::Isl => write!(f, "ISL"),
            LinkType::Uplink => write!(f, "uplink"),
            LinkType::Downlink => write!(f, "downlink"),
        }
    }
}

fn is_ground_station(node: u32) -> bool {
    node % 100 == 0 && (100..1000).contains(&node)
}

/// Classify the link a contact rides on from its endpoint node labels.
pub fn classify_link(from: u32, to: u32) -> LinkType {
    match (is_ground_station(from), is_ground_station(to)) {
        (false, false) => LinkType::Isl,
        (true, false) => LinkType::Uplink,
        (false, true) => LinkType::Downlink,
        // GS-to-GS does not occur in practice; treat as ISL
        (true, true) => LinkType::Isl,
    }
}

/// Extended per-contact metrics for LEO links.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeoMetrics {
    pub link_type: LinkType,
    /// Estimated transmitter power draw (watts)
    pub power_w: f64,
    /// Doppler shift at Ka-band for typical LEO orbital velocity (hertz)
    pub doppler_hz: f64,
    /// Estimated signal-to-noise ratio (decibels)
    pub snr_db: f64,
    /// Elevation angle for ground-station links, 0 for ISLs (degrees)
    pub elevation_deg: f64,
}

const SPEED_OF_LIGHT_M_S: f64 = 299_792_458.0;
const LEO_VELOCITY_M_S: f64 = 7_500.0;
const KA_BAND_HZ: f64 = 32.0e9;
const EARTH_RADIUS_KM: f64 = 6_371.0;
const LEO_ALTITUDE_KM: f64 = 550.0;

/// Compute display metrics for a contact.
pub fn compute_metrics(contact: &Contact) -> LeoMetrics {
    let link_type = classify_link(contact.from, contact.to);
    let rate_mbps = contact.rate_bps / 1e6;

    // ISLs run colder than ground links
    let power_w = match link_type {
        LinkType::Isl => 5.0 + rate_mbps * 0.5,
        LinkType::Uplink => 50.0 + rate_mbps * 2.0,
        LinkType::Downlink => 20.0 + rate_mbps * 1.0,
    };

    let doppler_hz = (LEO_VELOCITY_M_S / SPEED_OF_LIGHT_M_S) * KA_BAND_HZ;

    let snr_db = match link_type {
        LinkType::Isl => 25.0 - contact.owlt * 100.0,
        _ => 20.0 - contact.owlt * 150.0,
    };

    let elevation_deg = if link_type == LinkType::Isl {
        0.0
    } else {
        (EARTH_RADIUS_KM / (EARTH_RADIUS_KM + LEO_ALTITUDE_KM))
            .asin()
            .to_degrees()
    };

    LeoMetrics {
        link_type,
        power_w,
        doppler_hz,
        snr_db,
        elevation_deg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(from: u32, to: u32) -> Contact {
        Contact {
            id: 0,
            from,
            to,
            t_start: 0.0,
            t_end: 60.0,
            owlt: 0.02,
            rate_bps: 8e6,
            setup_s: 0.1,
            residual_bytes: 1e8,
        }
    }

    #[test]
    fn test_classify_link() {
        assert_eq!(classify_link(1, 2), LinkType::Isl);
        assert_eq!(classify_link(100, 3), LinkType::Uplink);
        assert_eq!(classify_link(7, 200), LinkType::Downlink);
        // Node 1000 and above are satellites under the convention
        assert_eq!(classify_link(1000, 1100), LinkType::Isl);
    }

    #[test]
    fn test_isl_preferred_by_penalty() {
        assert!(LinkType::Isl.penalty() < LinkType::Downlink.penalty());
        assert!(LinkType::Downlink.penalty() < LinkType::Uplink.penalty());
    }

    #[test]
    fn test_isl_draws_less_power() {
        let isl = compute_metrics(&contact(1, 2));
        let uplink = compute_metrics(&contact(100, 2));
        assert!(isl.power_w < uplink.power_w);
        assert_eq!(isl.elevation_deg, 0.0);
        assert!(uplink.elevation_deg > 0.0);
    }
}
