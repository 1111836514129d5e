//! Terminal preview of the grid: one glyph per cell plus a legend.

use std::fmt::Write;

use epi_core::State;
use epi_grid::PopulationGrid;

/// Render at most `max_side` rows and columns of `grid`.
pub fn render(grid: &PopulationGrid, max_side: usize) -> String {
    let shown = grid.size().min(max_side);
    let mut out = String::with_capacity(shown * (shown + 1) + 128);

    for row in 0..shown {
        // `row < size`, so this cannot fail.
        if let Ok(cells) = grid.row(row) {
            out.extend(cells[..shown].iter().map(|p| p.state().glyph()));
        }
        out.push('\n');
    }
    if shown < grid.size() {
        let _ = writeln!(out, "({shown}x{shown} of {0}x{0} shown)", grid.size());
    }

    out.push_str(&legend(grid));
    out
}

/// `# infected : 120` style lines, one per state, then the step.
pub fn legend(grid: &PopulationGrid) -> String {
    let counts = grid.count_states();
    let mut out = String::new();
    for state in State::ALL {
        let _ = writeln!(out, "{} {:<12}: {}", state.glyph(), state.label(), counts.get(state));
    }
    let _ = writeln!(out, "step {}", grid.tick().0);
    out
}
