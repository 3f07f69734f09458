//! Cluster-pay batch simulator
//!
//! Usage:
//!   rf-cluster-sim --spins 1000000 --bet 1.0 --seed 42
//!   rf-cluster-sim --config game.yaml --threads 8 --play-features
//!   rf-cluster-sim --dump --seed 7

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use rayon::prelude::*;

use rf_cluster_lab::{ClusterPayEngine, EngineConfig, SessionStats};

#[derive(Parser)]
#[command(name = "rf-cluster-sim", about = "Cluster-pay tumble engine simulator")]
struct Cli {
    /// Total number of paid spins
    #[arg(short, long, default_value_t = 100_000)]
    spins: u64,

    /// Bet per spin
    #[arg(short, long, default_value_t = 1.0)]
    bet: f64,

    /// Base seed (worker i uses seed + i)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Worker threads (defaults to one per core)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Engine config (.json / .yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Spin with the free spin multiplier policy
    #[arg(long)]
    free_spins: bool,

    /// Print a single spin as JSON and exit
    #[arg(long)]
    dump: bool,

    /// Play awarded free spin rounds
    #[arg(long)]
    play_features: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if cli.dump {
        return dump_spin(config, &cli);
    }

    if cli.spins == 0 {
        bail!("--spins must be at least 1");
    }

    let workers = cli
        .threads
        .unwrap_or_else(rayon::current_num_threads)
        .max(1);

    log::info!(
        "Simulating {} spins of '{}' on {} worker(s)",
        cli.spins,
        config.name,
        workers
    );

    let stats = simulate(&config, &cli, workers)?;
    print!("{}", format_report(&config, &cli, &stats));
    Ok(())
}

fn dump_spin(config: EngineConfig, cli: &Cli) -> Result<()> {
    let mut engine = ClusterPayEngine::seeded(config, cli.seed)?;
    let result = engine.spin(cli.bet, cli.free_spins)?;
    let json = serde_json::to_string_pretty(&result).context("Failed to serialize spin")?;
    println!("{json}");
    Ok(())
}

/// Dedicated pool so `--threads` bounds the cores actually used
fn build_pool(workers: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("cluster-sim-{i}"))
        .build()
        .context("Failed to build worker pool")
}

/// Split spins across workers, one engine per worker
fn simulate(config: &EngineConfig, cli: &Cli, workers: usize) -> Result<SessionStats> {
    let pool = build_pool(workers)?;
    let workers = workers as u64;
    let per_worker = cli.spins / workers;
    let remainder = cli.spins % workers;

    let partials: Vec<SessionStats> = pool.install(|| {
        (0..workers)
            .into_par_iter()
            .map(|worker| {
                let spins = per_worker + u64::from(worker < remainder);
                run_worker(config.clone(), cli, cli.seed.wrapping_add(worker), spins)
            })
            .collect::<Result<_>>()
    })?;

    let mut stats = SessionStats::default();
    for partial in &partials {
        stats.merge(partial);
    }
    Ok(stats)
}

fn run_worker(config: EngineConfig, cli: &Cli, seed: u64, spins: u64) -> Result<SessionStats> {
    let mut engine = ClusterPayEngine::seeded(config, seed)?;

    for _ in 0..spins {
        let result = engine.spin(cli.bet, cli.free_spins)?;
        if cli.play_features && result.free_spins_awarded > 0 {
            let summary = engine.play_free_spins(cli.bet, result.free_spins_awarded)?;
            log::debug!(
                "Worker seed {seed}: feature paid {} over {} spins",
                summary.total_win,
                summary.spins_played
            );
        }
    }

    Ok(engine.stats().clone())
}

fn format_report(config: &EngineConfig, cli: &Cli, stats: &SessionStats) -> String {
    let paid = stats.total_spins - stats.free_spins_played;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(out, "=== {} ===", config.name);
    let _ = writeln!(out, "Paid spins:        {paid}");
    let _ = writeln!(out, "Free spins played: {}", stats.free_spins_played);
    let _ = writeln!(out, "Bet per spin:      {:.2}", cli.bet);
    let _ = writeln!(out, "Total bet:         {:.2}", stats.total_bet);
    let _ = writeln!(out, "Total win:         {:.2}", stats.total_win);
    if stats.total_bet > 0.0 {
        let _ = writeln!(out, "RTP:               {:.4}%", stats.rtp());
    } else {
        // Free spins stake nothing, so RTP is undefined
        let _ = writeln!(out, "RTP:               n/a (no stake in free spin mode)");
    }
    let _ = writeln!(out, "Hit rate:          {:.4}%", stats.hit_rate());
    if stats.total_spins > 0 {
        let avg_win = stats.total_win / stats.total_spins as f64;
        let _ = writeln!(out, "Avg win per spin:  {avg_win:.4}");
        let _ = writeln!(out, "Avg win / bet:     {:.4}x", avg_win / cli.bet);
    }
    let _ = writeln!(out, "Avg tumbles:       {:.3}", stats.avg_tumbles());
    let _ = writeln!(out, "Big wins:          {}", stats.big_wins);
    let _ = writeln!(out, "Mega wins:         {}", stats.mega_wins);
    let _ = writeln!(out, "Feature triggers:  {}", stats.free_spin_triggers);
    let _ = writeln!(out, "Tumble limit hits: {}", stats.tumble_limit_hits);
    let _ = writeln!(out, "Max win:           {:.2}x", stats.max_win_ratio);
    out
}
