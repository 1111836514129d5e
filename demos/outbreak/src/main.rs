//! outbreak: headless run of the epigrid epidemic model.
//!
//! Defaults reproduce the reference scenario: a 100×100 population, a 50×50
//! central block where each individual starts infected with probability
//! 0.75, 1000 steps, vaccine available from step 200.  Per-step counts go to
//! `<output-dir>/state_counts.csv`.
//!
//! ```text
//! outbreak --side 60 --ticks 300 --seed 7 --output-dir output/run7 --preview
//! RUST_LOG=debug outbreak --config scenario.json
//! ```

mod preview;

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use epi_core::Tick;
use epi_grid::{PopulationGrid, StepReport};
use epi_output::{CountsObserver, CsvWriter, OutputWriter};
use epi_sim::{Seeding, SimBuilder, SimConfig, SimObserver};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(version, about = "Stochastic SIRV epidemic on a 2-D grid")]
struct Args {
    /// JSON file with a full or partial run configuration.  Flags below
    /// override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Grid side length.
    #[arg(long)]
    side: Option<usize>,

    /// Number of steps to run.
    #[arg(long)]
    ticks: Option<u64>,

    /// Master RNG seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Start from this many randomly scattered infections instead of the
    /// configured pattern.
    #[arg(long)]
    scatter: Option<usize>,

    /// Stop as soon as nobody is infected.
    #[arg(long)]
    stop_on_extinction: bool,

    /// Directory for `state_counts.csv`.
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Print the final grid to the terminal.
    #[arg(long)]
    preview: bool,

    /// Largest preview side; bigger grids are cropped.
    #[arg(long, default_value_t = 80)]
    preview_side: usize,
}

impl Args {
    fn sim_config(&self) -> Result<SimConfig> {
        match &self.config {
            Some(path) => {
                let json = fs::read_to_string(path)
                    .with_context(|| format!("opening config {}", path.display()))?;
                self.resolve(Some(json.as_str()))
                    .with_context(|| format!("parsing config {}", path.display()))
            }
            None => self.resolve(None),
        }
    }

    /// Merge the optional JSON config with the command-line overrides.
    ///
    /// Unless the JSON names a `seeding` pattern (or `--scatter` is given),
    /// the reference block is re-centred on the final grid side.
    fn resolve(&self, json: Option<&str>) -> Result<SimConfig> {
        let (mut config, explicit_seeding) = match json {
            Some(text) => {
                let value: serde_json::Value = serde_json::from_str(text)?;
                let explicit = value.get("seeding").is_some();
                (serde_json::from_value::<SimConfig>(value)?, explicit)
            }
            None => (SimConfig::default(), false),
        };

        if let Some(side) = self.side {
            config.side = side;
        }
        if let Some(ticks) = self.ticks {
            config.total_ticks = ticks;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(count) = self.scatter {
            config.seeding = Seeding::Scattered { count };
        } else if !explicit_seeding {
            config.seeding = centred_block(config.side);
        }
        config.stop_on_extinction |= self.stop_on_extinction;
        Ok(config)
    }
}

/// Middle half of the grid on each axis, infected with probability 0.75.
fn centred_block(side: usize) -> Seeding {
    Seeding::Block {
        rows:        side / 4..side * 3 / 4,
        cols:        side / 4..side * 3 / 4,
        probability: 0.75,
    }
}

// ── Observer wrapper to track the peak ───────────────────────────────────────

struct PeakObserver<W: OutputWriter> {
    inner:     CountsObserver<W>,
    peak:      usize,
    peak_tick: Tick,
}

impl<W: OutputWriter> PeakObserver<W> {
    fn new(inner: CountsObserver<W>) -> Self {
        Self { inner, peak: 0, peak_tick: Tick::ZERO }
    }

    fn track(&mut self, grid: &PopulationGrid) {
        let infected = grid.count_states().infected;
        if infected > self.peak {
            self.peak = infected;
            self.peak_tick = grid.tick();
        }
    }
}

impl<W: OutputWriter> SimObserver for PeakObserver<W> {
    fn on_start(&mut self, grid: &PopulationGrid) {
        self.track(grid);
        self.inner.on_start(grid);
    }

    fn on_tick_end(&mut self, report: &StepReport, grid: &PopulationGrid) {
        self.track(grid);
        self.inner.on_tick_end(report, grid);
    }

    fn on_sim_end(&mut self, final_tick: Tick, grid: &PopulationGrid) {
        self.inner.on_sim_end(final_tick, grid);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let args = Args::parse();
    let config = args.sim_config()?;
    info!(
        side         = config.side,
        total_ticks  = config.total_ticks,
        seed         = config.seed,
        vaccine_tick = config.params.vaccine_tick.0,
        "configuration loaded"
    );

    // 1. Build and seed.
    let mut sim = SimBuilder::new(config).build()?;

    // 2. Output.
    let writer = CsvWriter::new(&args.output_dir)?;
    let csv_path = writer.path().to_path_buf();
    let mut obs = PeakObserver::new(CountsObserver::new(writer));

    // 3. Run.
    let t0 = Instant::now();
    let end = sim.run(&mut obs);
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        return Err(e).context("writing state counts");
    }

    // 4. Summary.
    let counts = sim.grid().count_states();
    info!(
        final_tick  = end.0,
        elapsed_ms  = elapsed.as_millis() as u64,
        rows        = obs.inner.rows_written(),
        csv         = %csv_path.display(),
        "simulation complete"
    );
    info!(
        peak_infected = obs.peak,
        peak_tick     = obs.peak_tick.0,
        susceptible   = counts.susceptible,
        infected      = counts.infected,
        recovered     = counts.recovered,
        vaccinated    = counts.vaccinated,
        "final state"
    );

    if args.preview {
        print!("{}", preview::render(sim.grid(), args.preview_side));
    }

    Ok(())
}
