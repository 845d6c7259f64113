//! The live re-planning driver
//!
//! Owns the base plan and all cross-cycle state (clock, cycle counter,
//! EWMA penalties). Each [`LiveDriver::step`] is a complete, synchronous
//! planning cycle; [`LiveDriver::run`] wraps stepping with the cadence
//! and interrupt handling of a long-lived simulation.

use chrono::Utc;
use kepler_cgr::{
    best_route, feasibility, k_routes_by_diversification, NeighborIndex, PlanResult, WaitPenalty,
};
use kepler_core::{Contact, RouteRequest};
use kepler_plan::periodize;
use tracing::{debug, info, warn};

use crate::config::LiveConfig;
use crate::snapshot::CycleSnapshot;

/// Cyclic planner over a simulated clock.
pub struct LiveDriver {
    base_plan: Vec<Contact>,
    config: LiveConfig,
    penalty: WaitPenalty,
    sim_time: f64,
    cycle: u64,
}

impl LiveDriver {
    /// Create a driver owning `base_plan`.
    pub fn new(base_plan: Vec<Contact>, config: LiveConfig) -> Self {
        for warning in config.validate() {
            warn!(%warning, "live configuration warning");
        }
        let penalty = WaitPenalty::new(base_plan.len(), config.penalty);
        let sim_time = config.t0;
        Self {
            base_plan,
            config,
            penalty,
            sim_time,
            cycle: 0,
        }
    }

    /// Simulated clock value for the next cycle.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Cycles completed so far.
    pub fn cycles_done(&self) -> u64 {
        self.cycle
    }

    /// The driver-owned plan (mutated only by consumption).
    pub fn plan(&self) -> &[Contact] {
        &self.base_plan
    }

    /// Run one complete planning cycle and advance the clock.
    pub fn step(&mut self) -> PlanResult<CycleSnapshot> {
        self.cycle += 1;
        let now = self.sim_time;

        // Penalties shift setup times on a copy; the base plan stays true
        let planning_plan = if self.config.learn_ewma {
            self.penalty.apply(&self.base_plan)
        } else {
            self.base_plan.clone()
        };
        let working = periodize(&planning_plan, now, self.config.period_s);
        let index = NeighborIndex::build(&working);

        let active_contacts = working.iter().filter(|c| c.is_active_at(now)).count();
        let orbital_phase = if self.config.period_s > 0.0 {
            Some((now % self.config.period_s) / self.config.period_s)
        } else {
            None
        };

        let request = RouteRequest::new(
            self.config.src,
            self.config.dst,
            now,
            self.config.bundle_bytes,
        );
        let best = best_route(&working, &index, &request)?;

        let first_hop_wait = best
            .contact_ids
            .first()
            .and_then(|&id| working.iter().find(|c| c.id == id))
            .map(|c| (feasibility::start_tx(c, now) - now).max(0.0));

        let alternatives = if self.config.k_alt > 0 {
            k_routes_by_diversification(&working, &index, &request, self.config.k_alt)?
        } else {
            Vec::new()
        };

        if best.found {
            debug!(
                cycle = self.cycle,
                eta = best.eta,
                hops = best.hops(),
                wait = first_hop_wait,
                "route planned"
            );
            if self.config.consume {
                self.consume_along(&best);
            }
            if self.config.learn_ewma {
                if let (Some(&first_id), Some(wait)) = (best.contact_ids.first(), first_hop_wait) {
                    if let Some(base_idx) = self.base_plan.iter().position(|c| c.id == first_id) {
                        self.penalty.observe(base_idx, wait);
                    }
                }
            }
        } else {
            debug!(cycle = self.cycle, sim_time = now, "no route this cycle");
        }

        let snapshot = CycleSnapshot {
            cycle: self.cycle,
            sim_time: now,
            taken_at: Utc::now(),
            active_contacts,
            orbital_phase,
            best,
            first_hop_wait,
            alternatives,
        };

        self.sim_time += self.config.tick_s;
        Ok(snapshot)
    }

    /// Step until the cycle bound is reached or Ctrl-C arrives, invoking
    /// `on_cycle` with every snapshot. Returns the number of completed
    /// cycles.
    pub async fn run<F>(&mut self, mut on_cycle: F) -> PlanResult<u64>
    where
        F: FnMut(&CycleSnapshot),
    {
        info!(
            src = self.config.src,
            dst = self.config.dst,
            tick = self.config.tick_s,
            period = self.config.period_s,
            "live loop starting"
        );

        loop {
            if let Some(limit) = self.config.cycles {
                if self.cycle >= limit {
                    break;
                }
            }

            let snapshot = self.step()?;
            on_cycle(&snapshot);

            if let Some(limit) = self.config.cycles {
                if self.cycle >= limit {
                    break;
                }
            }

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupt received, stopping after current cycle");
                    break;
                }
                _ = tokio::time::sleep(self.config.cycle_delay) => {}
            }
        }

        info!(cycles = self.cycle, "live loop finished");
        Ok(self.cycle)
    }

    /// Subtract one bundle from every contact the route used, saturating
    /// at zero. Consumption outlives the cycle: the driver's plan is the
    /// authoritative capacity ledger across the whole run.
    fn consume_along(&mut self, route: &kepler_core::Route) {
        for &id in &route.contact_ids {
            if let Some(contact) = self.base_plan.iter_mut().find(|c| c.id == id) {
                let before = contact.residual_bytes;
                contact.residual_bytes = (before - self.config.bundle_bytes).max(0.0);
                debug!(
                    contact = id,
                    before,
                    after = contact.residual_bytes,
                    "capacity consumed"
                );
            }
        }
    }
}
