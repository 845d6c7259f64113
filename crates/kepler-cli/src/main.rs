//! Kepler: Contact Graph Routing for dynamic space networks
//!
//! Two entry points: `route` plans a single bundle against a contact plan
//! and prints the result; `live` drives the cyclic re-planning loop over
//! a simulated clock, optionally consuming capacity and learning
//! first-hop wait penalties between cycles.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use kepler_cgr::{
    best_route, k_routes_by_consumption, k_routes_by_diversification, NeighborIndex,
    PenaltyConfig,
};
use kepler_core::RouteRequest;
use kepler_live::{CycleSnapshot, LiveConfig, LiveDriver};
use kepler_plan::{auto_period, fetch_contacts, load_contacts_csv, FetchConfig, SynthConfig};

mod report;

#[derive(Parser)]
#[command(
    name = "kepler",
    about = "Contact Graph Routing engine for dynamic space networks",
    version
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlanSource {
    /// Local CSV file
    Local,
    /// Remote SODA-style CSV dataset, falling back to the local CSV
    Remote,
    /// Seeded synthetic constellation
    Synth,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one bundle against a contact plan
    Route {
        /// Contact plan CSV
        #[arg(long)]
        contacts: PathBuf,

        /// Source node
        #[arg(long)]
        src: u32,

        /// Destination node
        #[arg(long)]
        dst: u32,

        /// Dispatch time in seconds
        #[arg(long, default_value = "0")]
        t0: f64,

        /// Bundle size in bytes
        #[arg(long)]
        bytes: f64,

        /// Relative time-to-live in seconds (0 = none)
        #[arg(long, default_value = "0")]
        expiry: f64,

        /// K routes by capacity consumption
        #[arg(long, default_value = "1")]
        k: usize,

        /// K routes by Yen-style diversification (takes precedence over --k)
        #[arg(long, default_value = "0")]
        k_yen: usize,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Indented JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Run the live re-planning loop on a simulated clock
    Live {
        /// Where the contact plan comes from
        #[arg(long, value_enum, default_value = "local")]
        source: PlanSource,

        /// Contact plan CSV (local source and remote fallback)
        #[arg(long, default_value = "data/contacts_demo.csv")]
        contacts: PathBuf,

        /// Remote dataset identifier
        #[arg(long)]
        dataset: Option<String>,

        /// Application token for the remote endpoint
        #[arg(long)]
        app_token: Option<String>,

        /// Source node
        #[arg(long, default_value = "100")]
        src: u32,

        /// Destination node
        #[arg(long, default_value = "200")]
        dst: u32,

        /// Bundle size in bytes
        #[arg(long, default_value = "5e7")]
        bytes: f64,

        /// Simulated clock step per cycle in seconds
        #[arg(long, default_value = "10")]
        tick: f64,

        /// Orbital period in seconds (0 = none)
        #[arg(long, default_value = "0")]
        period: f64,

        /// Infer the period from the plan's time span
        #[arg(long)]
        auto_period: bool,

        /// Diversified alternatives per cycle
        #[arg(long, default_value = "3")]
        k: usize,

        /// Stop after this many cycles (runs until Ctrl-C if omitted)
        #[arg(long)]
        cycles: Option<u64>,

        /// Consume capacity along each cycle's best route
        #[arg(long)]
        consume: bool,

        /// Learn EWMA first-hop wait penalties
        #[arg(long)]
        learn_ewma: bool,

        /// EWMA smoothing factor
        #[arg(long, default_value = "0.2")]
        alpha: f64,

        /// Penalty weight on setup time
        #[arg(long, default_value = "1.0")]
        lambda: f64,

        /// Relay satellites in the synthetic constellation
        #[arg(long, default_value = "8")]
        synth_n: u32,

        /// Synthetic generator seed (0 = random)
        #[arg(long, default_value = "0")]
        seed: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();

    match cli.command {
        Commands::Route {
            contacts,
            src,
            dst,
            t0,
            bytes,
            expiry,
            k,
            k_yen,
            format,
            pretty,
        } => run_route(contacts, src, dst, t0, bytes, expiry, k, k_yen, format, pretty),
        Commands::Live {
            source,
            contacts,
            dataset,
            app_token,
            src,
            dst,
            bytes,
            tick,
            period,
            auto_period,
            k,
            cycles,
            consume,
            learn_ewma,
            alpha,
            lambda,
            synth_n,
            seed,
        } => {
            run_live(LiveArgs {
                source,
                contacts,
                dataset,
                app_token,
                src,
                dst,
                bytes,
                tick,
                period,
                auto_period,
                k,
                cycles,
                consume,
                learn_ewma,
                alpha,
                lambda,
                synth_n,
                seed,
            })
            .await
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_route(
    contacts: PathBuf,
    src: u32,
    dst: u32,
    t0: f64,
    bytes: f64,
    expiry: f64,
    k: usize,
    k_yen: usize,
    format: OutputFormat,
    pretty: bool,
) -> anyhow::Result<()> {
    if bytes <= 0.0 {
        bail!("--bytes must be > 0 (got {bytes})");
    }

    let plan = load_contacts_csv(&contacts)
        .with_context(|| format!("loading {}", contacts.display()))?;
    let index = NeighborIndex::build(&plan);
    let request = RouteRequest::new(src, dst, t0, bytes).with_expiry(expiry);

    // Diversification wins when both K flavors are requested
    if k_yen > 0 {
        let routes = k_routes_by_diversification(&plan, &index, &request, k_yen)?;
        match format {
            OutputFormat::Json => {
                let rep = report::MultiRouteReport::new(&routes, t0);
                println!("{}", report::to_json(&rep, pretty)?);
            }
            OutputFormat::Text => print!(
                "{}",
                report::render_text_multi(&routes, t0, "Diversified routes")
            ),
        }
        return Ok(());
    }

    if k > 1 {
        let routes = k_routes_by_consumption(&plan, &index, &request, k)?;
        match format {
            OutputFormat::Json => {
                let rep = report::MultiRouteReport::new(&routes, t0);
                println!("{}", report::to_json(&rep, pretty)?);
            }
            OutputFormat::Text => print!(
                "{}",
                report::render_text_multi(&routes, t0, "Capacity-consumption routes")
            ),
        }
        return Ok(());
    }

    let route = best_route(&plan, &index, &request)?;
    match format {
        OutputFormat::Json => {
            let rep = report::RouteReport::new(&route, t0);
            println!("{}", report::to_json(&rep, pretty)?);
        }
        OutputFormat::Text => print!("{}", report::render_text_single(&route, t0)),
    }
    Ok(())
}

struct LiveArgs {
    source: PlanSource,
    contacts: PathBuf,
    dataset: Option<String>,
    app_token: Option<String>,
    src: u32,
    dst: u32,
    bytes: f64,
    tick: f64,
    period: f64,
    auto_period: bool,
    k: usize,
    cycles: Option<u64>,
    consume: bool,
    learn_ewma: bool,
    alpha: f64,
    lambda: f64,
    synth_n: u32,
    seed: u64,
}

async fn run_live(mut args: LiveArgs) -> anyhow::Result<()> {
    // Resolve the base plan
    let plan = match args.source {
        PlanSource::Local => load_contacts_csv(&args.contacts)
            .with_context(|| format!("loading {}", args.contacts.display()))?,
        PlanSource::Remote => {
            let dataset = args
                .dataset
                .clone()
                .context("--dataset is required with --source remote")?;
            let mut config = FetchConfig::for_dataset(dataset);
            if let Some(token) = args.app_token.clone() {
                config = config.with_app_token(token);
            }
            match fetch_contacts(&config).await {
                Ok(plan) => plan,
                Err(err) => {
                    tracing::warn!(%err, fallback = %args.contacts.display(), "remote fetch failed");
                    load_contacts_csv(&args.contacts)
                        .with_context(|| format!("fallback {}", args.contacts.display()))?
                }
            }
        }
        PlanSource::Synth => {
            let generated = kepler_plan::generate(&SynthConfig {
                sats: args.synth_n,
                seed: args.seed,
            });
            // Generated endpoints win unless overridden away from defaults
            if args.src == 100 && args.dst == 200 {
                args.src = generated.src;
                args.dst = generated.dst;
            }
            if args.period <= 0.0 {
                args.period = generated.period_s;
            }
            println!(
                "Generated {} synthetic contacts (period {:.1} s)",
                generated.contacts.len(),
                generated.period_s
            );
            generated.contacts
        }
    };

    if args.auto_period && args.period <= 0.0 {
        if let Some(span) = auto_period(&plan) {
            println!("Auto-period: {span:.3} s (plan time span)");
            args.period = span;
        }
    }

    let config = LiveConfig {
        src: args.src,
        dst: args.dst,
        bundle_bytes: args.bytes,
        t0: 0.0,
        tick_s: args.tick,
        period_s: args.period,
        k_alt: args.k,
        cycles: args.cycles,
        consume: args.consume,
        learn_ewma: args.learn_ewma,
        penalty: PenaltyConfig {
            alpha: args.alpha,
            lambda: args.lambda,
        },
        cycle_delay: Duration::from_millis(1000),
    };
    if let Some(warning) = config.validate().first() {
        bail!("invalid live configuration: {warning}");
    }

    println!("Loaded {} contacts; starting live loop (Ctrl-C stops)\n", plan.len());

    let mut driver = LiveDriver::new(plan, config);
    let cycles = driver.run(print_cycle).await?;
    println!("Finished after {cycles} cycles");
    Ok(())
}

fn print_cycle(snapshot: &CycleSnapshot) {
    println!(
        "-- cycle {} | t = {:.1} s | {} active contact(s) --",
        snapshot.cycle, snapshot.sim_time, snapshot.active_contacts
    );

    if snapshot.best.found {
        let wait = snapshot.first_hop_wait.unwrap_or(0.0);
        println!(
            "  best: eta {:.3} s, latency {:.3} s (first-hop wait {:.3} s), {} hops",
            snapshot.best.eta,
            snapshot.latency().unwrap_or(0.0),
            wait,
            snapshot.best.hops()
        );
        let path: Vec<String> = snapshot
            .best
            .contact_ids
            .iter()
            .map(|id| id.to_string())
            .collect();
        println!("  path: {}", path.join(" -> "));
    } else {
        println!("  no route available");
    }

    if !snapshot.alternatives.is_empty() {
        println!("  alternatives ({}):", snapshot.alternatives.len());
        for (rank, route) in snapshot.alternatives.iter().enumerate() {
            println!(
                "    #{}: eta {:.3} s, {} hops",
                rank + 1,
                route.eta,
                route.hops()
            );
        }
    }

    if let Some(phase) = snapshot.orbital_phase {
        let width = 30usize;
        let filled = (phase * width as f64) as usize;
        let bar: String = (0..width).map(|i| if i < filled { '#' } else { '.' }).collect();
        println!("  orbit: [{bar}] {:.1}%", phase * 100.0);
    }
    println!();
}
