//! Live loop configuration

use std::time::Duration;

use kepler_cgr::PenaltyConfig;

/// Knobs for a live re-planning run. All defaults are sane for the
/// synthetic demo constellation.
#[derive(Debug, Clone)]
pub struct LiveConfig {
    /// Source node
    pub src: u32,
    /// Destination node
    pub dst: u32,
    /// Bundle size per cycle (bytes)
    pub bundle_bytes: f64,
    /// Simulated clock start (seconds)
    pub t0: f64,
    /// Simulated clock step per cycle (seconds)
    pub tick_s: f64,
    /// Orbital period for plan periodization; 0 disables it
    pub period_s: f64,
    /// Diversified alternatives per cycle (0 disables)
    pub k_alt: usize,
    /// Stop after this many cycles; `None` runs until interrupted
    pub cycles: Option<u64>,
    /// Consume capacity along each cycle's best route
    pub consume: bool,
    /// Learn EWMA first-hop wait penalties between cycles
    pub learn_ewma: bool,
    /// Penalty smoothing parameters
    pub penalty: PenaltyConfig,
    /// Wall-clock pause between cycles
    pub cycle_delay: Duration,
}

impl Default for LiveConfig {
    fn default() -> Self {
        Self {
            src: 100,
            dst: 200,
            bundle_bytes: 5e7,
            t0: 0.0,
            tick_s: 10.0,
            period_s: 0.0,
            k_alt: 3,
            cycles: None,
            consume: false,
            learn_ewma: false,
            penalty: PenaltyConfig::default(),
            cycle_delay: Duration::from_millis(200),
        }
    }
}

impl LiveConfig {
    /// Validate configuration invariants. Empty list means valid.
    pub fn validate(&self) -> Vec<LiveConfigWarning> {
        let mut warnings = Vec::new();
        if self.tick_s <= 0.0 {
            warnings.push(LiveConfigWarning::NonPositiveTick);
        }
        if self.bundle_bytes <= 0.0 {
            warnings.push(LiveConfigWarning::NonPositiveBundle);
        }
        if self.learn_ewma && !self.penalty.is_valid() {
            warnings.push(LiveConfigWarning::InvalidPenalty);
        }
        warnings
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

/// Configuration problems reported by [`LiveConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveConfigWarning {
    /// Clock step must be positive
    NonPositiveTick,
    /// Bundle size must be positive
    NonPositiveBundle,
    /// EWMA enabled with out-of-range smoothing parameters
    InvalidPenalty,
}

impl std::fmt::Display for LiveConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiveConfigWarning::NonPositiveTick => write!(f, "tick must be > 0"),
            LiveConfigWarning::NonPositiveBundle => write!(f, "bundle size must be > 0"),
            LiveConfigWarning::InvalidPenalty => write!(f, "penalty parameters out of range"),
        }
    }
}
