//! lanegrid: generate a lane grid, fill it with commuters and run it.
//!
//! ```text
//! cargo run -p lanegrid -- --seed 7 --ticks 2000 --map
//! cargo run -p lanegrid -- --config run.json --output output/lanegrid
//! ```
//!
//! Set `RUST_LOG=debug` to see generation statistics and congestion blocks.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lg_core::{SimConfig, Tick};
use lg_gen::{generate_with_retry, GenConfig};
use lg_network::{Graph, NoopObserver, SimObserver, TickReport};
use lg_output::{CsvWriter, OutputWriter, SimOutputObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "lanegrid")]
#[command(about = "Procedural road grid with congestion-aware commuters")]
struct Args {
    /// JSON file with `gen` and `sim` sections; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for generation and simulation
    #[arg(long)]
    seed: Option<u64>,

    /// Coarse grid width in cells
    #[arg(long)]
    width: Option<u32>,

    /// Coarse grid height in cells
    #[arg(long)]
    height: Option<u32>,

    /// Fraction of coarse cells to pave
    #[arg(long)]
    coverage: Option<f64>,

    /// Chance that a slot beside a road becomes a house
    #[arg(long)]
    houses: Option<f64>,

    /// Number of ticks to simulate
    #[arg(long)]
    ticks: Option<u64>,

    /// Per-house chance of volunteering for a trip each tick
    #[arg(long)]
    spawn_probability: Option<f64>,

    /// Chance that a refused move blocks the node
    #[arg(long)]
    block_probability: Option<f64>,

    /// Interval between agent snapshots (in ticks, 0 = never)
    #[arg(long)]
    snapshot_interval: Option<u64>,

    /// Write CSV telemetry into this directory
    #[arg(long)]
    output: Option<PathBuf>,

    /// Print the lane grid before and after the run
    #[arg(long)]
    map: bool,
}

/// On-disk run description.  Missing sections fall back to defaults.
#[derive(Deserialize, Default)]
#[serde(default)]
struct RunFile {
    #[serde(rename = "gen")]
    generator: GenConfig,
    sim:       SimConfig,
}

fn load_run_file(path: &Path) -> Result<RunFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
}

impl Args {
    fn configs(&self) -> Result<(GenConfig, SimConfig)> {
        let RunFile { generator: mut gen_cfg, mut sim } = match &self.config {
            Some(path) => load_run_file(path)?,
            None => RunFile::default(),
        };

        if let Some(v) = self.seed              { sim.seed = v; }
        if let Some(v) = self.width             { gen_cfg.width = v; }
        if let Some(v) = self.height            { gen_cfg.height = v; }
        if let Some(v) = self.coverage          { gen_cfg.coverage_goal = v; }
        if let Some(v) = self.houses            { gen_cfg.house_probability = v; }
        if let Some(v) = self.ticks             { sim.total_ticks = v; }
        if let Some(v) = self.spawn_probability { sim.spawn_probability = v; }
        if let Some(v) = self.block_probability { sim.block_probability = v; }
        if let Some(v) = self.snapshot_interval { sim.snapshot_interval_ticks = v; }

        Ok((gen_cfg, sim))
    }
}

// ── Observer wrapper to accumulate totals ─────────────────────────────────────

#[derive(Default)]
struct Totals {
    spawned:  usize,
    finished: usize,
    dropped:  usize,
    moved:    usize,
    stalled:  usize,
    blocks:   usize,
    peak:     usize,
}

struct TotalsObserver<O: SimObserver> {
    inner:  O,
    totals: Totals,
}

impl<O: SimObserver> TotalsObserver<O> {
    fn new(inner: O) -> Self {
        Self { inner, totals: Totals::default() }
    }
}

impl<O: SimObserver> SimObserver for TotalsObserver<O> {
    fn on_tick_end(&mut self, tick: Tick, report: &TickReport) {
        let t = &mut self.totals;
        t.spawned  += report.spawned;
        t.finished += report.finished;
        t.dropped  += report.dropped;
        t.moved    += report.moved;
        t.stalled  += report.stalled;
        t.blocks   += report.blocks_started;
        t.peak      = t.peak.max(report.in_flight);
        self.inner.on_tick_end(tick, report);
    }

    fn on_snapshot(&mut self, tick: Tick, graph: &Graph) {
        self.inner.on_snapshot(tick, graph);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

/// Surface a write error the observer stored during the run.
fn check_output<W: OutputWriter>(obs: &mut SimOutputObserver<W>, dir: &Path) -> Result<()> {
    match obs.take_error() {
        Some(e) => Err(e).with_context(|| format!("writing telemetry to {}", dir.display())),
        None => Ok(()),
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let (gen_cfg, sim) = args.configs()?;

    println!("=== lanegrid ===");
    println!(
        "Grid: {}x{} coarse ({}x{} lanes)  |  Coverage goal: {:.2}  |  Seed: {}",
        gen_cfg.width,
        gen_cfg.height,
        gen_cfg.fine_width(),
        gen_cfg.fine_height(),
        gen_cfg.coverage_goal,
        sim.seed,
    );

    // 1. Generate the map.
    let t0 = Instant::now();
    let generated = generate_with_retry(&gen_cfg, &sim).context("map generation failed")?;
    let stats = generated.stats;
    println!(
        "Map: {} nodes, {} edges, {} houses, {} junctions, coverage {:.3} ({} legs, {} restarts) in {:.3} s",
        stats.nodes,
        stats.edges,
        stats.houses,
        stats.junctions,
        stats.coverage,
        stats.legs,
        stats.restarts,
        t0.elapsed().as_secs_f64(),
    );
    let mut network = generated.network;

    if args.map {
        println!();
        println!("{}", network.graph().render_ascii());
        println!();
    }

    // 2. Run.
    println!("Sim: {} ticks, spawn p={}, block p={}", sim.total_ticks, sim.spawn_probability, sim.block_probability);
    let t0 = Instant::now();
    let totals = match &args.output {
        Some(dir) => {
            std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
            let writer = CsvWriter::new(dir)?;
            let mut obs = TotalsObserver::new(SimOutputObserver::new(writer));
            network.run(&mut obs);
            check_output(&mut obs.inner, dir)?;
            println!(
                "  {} snapshot rows written to {}",
                obs.inner.snapshot_rows(),
                dir.display()
            );
            obs.totals
        }
        None => {
            let mut obs = TotalsObserver::new(NoopObserver);
            network.run(&mut obs);
            obs.totals
        }
    };
    let elapsed = t0.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "simulation complete");

    // 3. Summary.
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  spawned  : {}", totals.spawned);
    println!("  finished : {}", totals.finished);
    println!("  dropped  : {}", totals.dropped);
    println!("  moved    : {}", totals.moved);
    println!("  stalled  : {}", totals.stalled);
    println!("  blocks   : {}", totals.blocks);
    println!("  peak     : {}", totals.peak);
    println!("  in flight: {}", network.agent_count());

    if args.map {
        println!();
        println!("{}", network.graph().render_ascii());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use lg_core::Tick;
    use lg_network::{SimObserver, TickReport};
    use lg_output::{AgentSnapshotRow, OutputError, OutputResult, OutputWriter, SimOutputObserver, TickSummaryRow};

    use super::check_output;

    struct FullDisk;

    impl OutputWriter for FullDisk {
        fn write_snapshots(&mut self, _rows: &[AgentSnapshotRow]) -> OutputResult<()> {
            Ok(())
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }
        fn finish(&mut self) -> OutputResult<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_fail_the_run() {
        let mut obs = SimOutputObserver::new(FullDisk);
        obs.on_tick_end(Tick(0), &TickReport::default());
        let err = check_output(&mut obs, Path::new("out")).unwrap_err();
        assert!(format!("{err:#}").contains("disk full"), "{err:#}");
    }

    #[test]
    fn clean_runs_pass() {
        let mut obs = SimOutputObserver::new(FullDisk);
        check_output(&mut obs, Path::new("out")).unwrap();
    }
}
