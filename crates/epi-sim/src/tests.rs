//! Tests for the run driver and seeding patterns.

use epi_core::{EpidemicParams, SimRng, State, Tick};
use epi_grid::{Counts, GridBuilder, PopulationGrid, StepReport};

use crate::{NoopObserver, Seeding, SimBuilder, SimConfig, SimObserver};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn test_config(total_ticks: u64) -> SimConfig {
    SimConfig {
        side: 12,
        total_ticks,
        seed: 42,
        params: EpidemicParams {
            infection_rate:    0.3,
            recovery_rate:     0.1,
            relapse_rate:      0.02,
            vaccination_rate:  0.01,
            vaccine_hesitancy: 0.2,
            vaccine_tick:      Tick(5),
        },
        seeding: Seeding::Block { rows: 4..8, cols: 4..8, probability: 0.75 },
        stop_on_extinction: false,
        progress_interval_ticks: 0,
    }
}

/// Records every callback in order.
#[derive(Default)]
struct Recorder {
    start:   Option<Counts>,
    ticks:   Vec<Tick>,
    counts:  Vec<Counts>,
    reports: Vec<StepReport>,
    ended:   Option<Tick>,
}

impl SimObserver for Recorder {
    fn on_start(&mut self, grid: &PopulationGrid) {
        assert!(self.start.is_none(), "on_start fired twice");
        self.start = Some(grid.count_states());
    }

    fn on_tick_end(&mut self, report: &StepReport, grid: &PopulationGrid) {
        self.ticks.push(grid.tick());
        self.counts.push(grid.count_states());
        self.reports.push(*report);
    }

    fn on_sim_end(&mut self, final_tick: Tick, _grid: &PopulationGrid) {
        self.ended = Some(final_tick);
    }
}

// ── Seeding ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod seeding_tests {
    use epi_core::EpiError;

    use super::*;

    fn blank(side: usize) -> PopulationGrid {
        GridBuilder::new(side).build().unwrap()
    }

    #[test]
    fn none_leaves_grid_untouched() {
        let mut g = blank(4);
        let n = Seeding::None.apply(&mut g, &mut SimRng::new(1)).unwrap();
        assert_eq!(n, 0);
        assert_eq!(g.count_states().susceptible, 16);
    }

    #[test]
    fn explicit_cells() {
        let mut g = blank(5);
        let seeding = Seeding::Cells { cells: vec![(0, 0), (2, 3), (2, 3)] };
        let n = seeding.apply(&mut g, &mut SimRng::new(1)).unwrap();
        assert_eq!(n, 2, "duplicate cell counted once");
        assert_eq!(g.get_state(2, 3).unwrap(), State::Infected);
        assert_eq!(g.count_states().infected, 2);
    }

    #[test]
    fn out_of_bounds_cell_leaves_grid_unchanged() {
        let mut g = blank(5);
        let seeding = Seeding::Cells { cells: vec![(0, 0), (5, 1)] };
        let err = seeding.apply(&mut g, &mut SimRng::new(1)).unwrap_err();
        assert!(matches!(err, EpiError::IndexOutOfBounds { row: 5, col: 1, size: 5 }));
        assert_eq!(g.count_states().infected, 0);
    }

    #[test]
    fn full_probability_block_fills_block() {
        let mut g = blank(10);
        let seeding = Seeding::Block { rows: 2..5, cols: 3..7, probability: 1.0 };
        let n = seeding.apply(&mut g, &mut SimRng::new(1)).unwrap();
        assert_eq!(n, 12);
        for (r, c, s) in g.cells() {
            let inside = (2..5).contains(&r) && (3..7).contains(&c);
            assert_eq!(s == State::Infected, inside, "cell ({r}, {c})");
        }
    }

    #[test]
    fn zero_probability_block_infects_nobody() {
        let mut g = blank(10);
        let seeding = Seeding::Block { rows: 0..10, cols: 0..10, probability: 0.0 };
        assert_eq!(seeding.apply(&mut g, &mut SimRng::new(1)).unwrap(), 0);
    }

    #[test]
    fn partial_block_is_reproducible() {
        let seeding = Seeding::Block { rows: 0..20, cols: 0..20, probability: 0.5 };
        let mut a = blank(20);
        let mut b = blank(20);
        let na = seeding.apply(&mut a, &mut SimRng::new(9)).unwrap();
        let nb = seeding.apply(&mut b, &mut SimRng::new(9)).unwrap();
        assert_eq!(na, nb);
        assert!(a.cells().eq(b.cells()));
        assert!(na > 100 && na < 300, "got {na}");
    }

    #[test]
    fn block_past_edge_rejected() {
        let mut g = blank(10);
        let seeding = Seeding::Block { rows: 5..11, cols: 0..3, probability: 1.0 };
        assert!(seeding.apply(&mut g, &mut SimRng::new(1)).is_err());
        assert_eq!(g.count_states().infected, 0);
    }

    #[test]
    fn block_bad_probability_rejected() {
        let mut g = blank(10);
        let seeding = Seeding::Block { rows: 0..3, cols: 0..3, probability: 1.5 };
        assert!(matches!(
            seeding.apply(&mut g, &mut SimRng::new(1)),
            Err(EpiError::InvalidRate { .. })
        ));
    }

    #[test]
    fn scattered_infects_exact_count() {
        let mut g = blank(10);
        let n = Seeding::Scattered { count: 7 }.apply(&mut g, &mut SimRng::new(3)).unwrap();
        assert_eq!(n, 7);
        assert_eq!(g.count_states().infected, 7);
    }

    #[test]
    fn scattered_more_than_population_rejected() {
        let mut g = blank(3);
        assert!(Seeding::Scattered { count: 10 }.apply(&mut g, &mut SimRng::new(3)).is_err());
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use crate::SimError;

    use super::*;

    #[test]
    fn builds_and_seeds() {
        let sim = SimBuilder::new(test_config(10)).build().unwrap();
        assert_eq!(sim.grid().size(), 12);
        assert_eq!(sim.grid().tick(), Tick::ZERO);
        assert!(sim.infected() > 0);
        assert_eq!(sim.infected(), sim.grid().count_states().infected);
    }

    #[test]
    fn zero_side_is_model_error() {
        let config = SimConfig { side: 0, ..test_config(10) };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Model(_))));
    }

    #[test]
    fn invalid_params_rejected() {
        let mut config = test_config(10);
        config.params.recovery_rate = 2.0;
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn seeding_outside_grid_rejected() {
        let config = SimConfig {
            seeding: Seeding::Cells { cells: vec![(12, 0)] },
            ..test_config(10)
        };
        assert!(SimBuilder::new(config).build().is_err());
    }

    #[test]
    fn supplied_grid_is_driven_as_is() {
        let mut grid = GridBuilder::new(5)
            .params(EpidemicParams { infection_rate: 1.0, ..EpidemicParams::frozen() })
            .build()
            .unwrap();
        grid.set_state(2, 2, State::Infected).unwrap();

        let config = SimConfig { total_ticks: 1, ..test_config(1) };
        let mut sim = SimBuilder::new(config).grid(grid).build().unwrap();
        assert_eq!(sim.infected(), 1);
        sim.run(&mut NoopObserver);
        assert_eq!(sim.grid().count_states().infected, 5);
    }

    #[test]
    fn supplied_grid_past_end_rejected() {
        let mut grid = GridBuilder::new(3).build().unwrap();
        grid.step_n(5);
        let result = SimBuilder::new(test_config(2)).grid(grid).build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Run loop ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod run_tests {
    use super::*;

    #[test]
    fn runs_to_total_ticks() {
        let mut sim = SimBuilder::new(test_config(25)).build().unwrap();
        let mut rec = Recorder::default();
        let end = sim.run(&mut rec);

        assert_eq!(end, Tick(25));
        assert_eq!(rec.ended, Some(Tick(25)));
        let expected: Vec<Tick> = (1..=25).map(Tick).collect();
        assert_eq!(rec.ticks, expected);
    }

    #[test]
    fn start_reports_seeded_tick_zero() {
        let mut sim = SimBuilder::new(test_config(3)).build().unwrap();
        let seeded = sim.grid().count_states();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(rec.start, Some(seeded));
        assert!(seeded.infected > 0);
    }

    #[test]
    fn every_tick_conserves_population() {
        let mut sim = SimBuilder::new(test_config(80)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert!(rec.counts.iter().all(|c| c.total() == 144));
    }

    #[test]
    fn tracked_infected_matches_grid() {
        let mut sim = SimBuilder::new(test_config(40)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run(&mut rec);
        assert_eq!(sim.infected(), sim.grid().count_states().infected);
    }

    #[test]
    fn run_ticks_is_incremental() {
        let mut sim = SimBuilder::new(test_config(100)).build().unwrap();
        let mut rec = Recorder::default();
        sim.run_ticks(3, &mut rec);
        sim.run_ticks(2, &mut rec);
        assert_eq!(sim.grid().tick(), Tick(5));
        assert_eq!(rec.ticks.len(), 5);
        assert_eq!(rec.ended, None);
    }

    #[test]
    fn stops_on_extinction() {
        let config = SimConfig {
            params: EpidemicParams { recovery_rate: 1.0, ..EpidemicParams::frozen() },
            seeding: Seeding::Cells { cells: vec![(0, 0)] },
            stop_on_extinction: true,
            ..test_config(50)
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let end = sim.run(&mut NoopObserver);
        assert_eq!(end, Tick(1));
        assert!(sim.is_extinct());
    }

    #[test]
    fn case_injected_between_ticks_is_tracked() {
        let config = SimConfig {
            params: EpidemicParams { recovery_rate: 1.0, ..EpidemicParams::frozen() },
            seeding: Seeding::None,
            stop_on_extinction: true,
            ..test_config(50)
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        assert!(sim.is_extinct());

        sim.set_state(2, 2, State::Infected).unwrap();
        assert_eq!(sim.infected(), 1);
        assert!(!sim.is_extinct());

        // the injected case recovers on the first step, then the run stops
        let end = sim.run(&mut NoopObserver);
        assert_eq!(end, Tick(1));
        assert_eq!(sim.grid().get_state(2, 2).unwrap(), State::Recovered);
        assert!(sim.is_extinct());
    }

    #[test]
    fn overwriting_cells_keeps_infected_count_exact() {
        let config = SimConfig { seeding: Seeding::None, ..test_config(20) };
        let mut sim = SimBuilder::new(config).build().unwrap();

        sim.set_state(0, 0, State::Infected).unwrap();
        sim.set_state(0, 0, State::Infected).unwrap();
        sim.set_state(5, 5, State::Infected).unwrap();
        assert_eq!(sim.infected(), 2);

        sim.set_state(0, 0, State::Vaccinated).unwrap();
        assert_eq!(sim.infected(), 1);
        assert!(sim.set_state(12, 0, State::Infected).is_err());
        assert_eq!(sim.infected(), 1);

        sim.run_ticks(5, &mut NoopObserver);
        sim.set_state(11, 11, State::Infected).unwrap();
        sim.run_ticks(5, &mut NoopObserver);
        assert_eq!(sim.infected(), sim.grid().count_states().infected);
    }

    #[test]
    fn unseeded_run_with_extinction_stop_never_steps() {
        let config = SimConfig {
            seeding: Seeding::None,
            stop_on_extinction: true,
            ..test_config(50)
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        assert_eq!(sim.run(&mut NoopObserver), Tick::ZERO);
    }

    #[test]
    fn same_seed_replays_exactly() {
        let mut a = SimBuilder::new(test_config(60)).build().unwrap();
        let mut b = SimBuilder::new(test_config(60)).build().unwrap();
        let mut ra = Recorder::default();
        let mut rb = Recorder::default();
        a.run(&mut ra);
        b.run(&mut rb);
        assert_eq!(ra.counts, rb.counts);
        assert_eq!(ra.reports, rb.reports);
        assert!(a.grid().cells().eq(b.grid().cells()));
    }

    #[test]
    fn different_seed_diverges() {
        let mut a = SimBuilder::new(test_config(30)).build().unwrap();
        let mut b = SimBuilder::new(SimConfig { seed: 7, ..test_config(30) }).build().unwrap();
        a.run(&mut NoopObserver);
        b.run(&mut NoopObserver);
        assert!(!a.grid().cells().eq(b.grid().cells()));
    }

    #[test]
    fn default_config_matches_reference_run() {
        let config = SimConfig::default();
        assert_eq!(config.side, 100);
        assert_eq!(config.total_ticks, 1_000);
        assert_eq!(
            config.seeding,
            Seeding::Block { rows: 25..75, cols: 25..75, probability: 0.75 }
        );
    }
}
