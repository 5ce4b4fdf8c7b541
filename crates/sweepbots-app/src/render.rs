//! Observers that turn model frames into terminal output.

use sweepbots_core::{ModelObserver, ModelSnapshot, ObserverFrame};
use tracing::info;

const GLYPH_EMPTY: char = '.';
const GLYPH_DIRT: char = '*';
const GLYPH_CLEANER: char = 'C';
/// Cleaner and dirt sharing a cell, still unswept this frame.
const GLYPH_BOTH: char = '@';

/// Draws the grid as rows of glyphs and logs per-tick statistics.
pub struct TerminalObserver {
    width: u32,
    height: u32,
}

impl TerminalObserver {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl ModelObserver for TerminalObserver {
    fn on_tick(&mut self, frame: &ObserverFrame) {
        println!("tick {}", frame.result.tick.0);
        for row in render_rows(self.width, self.height, &frame.snapshot) {
            println!("{row}");
        }
        println!();
        log_result(frame);
    }
}

/// Logs per-tick statistics without drawing the grid.
pub struct StatsObserver;

impl ModelObserver for StatsObserver {
    fn on_tick(&mut self, frame: &ObserverFrame) {
        log_result(frame);
    }
}

fn log_result(frame: &ObserverFrame) {
    let result = &frame.result;
    info!(
        tick = result.tick.0,
        remaining_dirt = result.remaining_dirt,
        clean_percentage = result.clean_percentage,
        total_movements = result.total_movements,
        halted = result.halted,
        "tick complete",
    );
}

/// Rasterize a snapshot into one string per grid row, top row first.
fn render_rows(width: u32, height: u32, snapshot: &ModelSnapshot) -> Vec<String> {
    let mut cells = vec![GLYPH_EMPTY; (width as usize) * (height as usize)];
    let offset = |x: u32, y: u32| (y as usize) * (width as usize) + (x as usize);

    for pos in &snapshot.dirt_positions {
        cells[offset(pos.x, pos.y)] = GLYPH_DIRT;
    }
    for pos in &snapshot.cleaner_positions {
        let cell = &mut cells[offset(pos.x, pos.y)];
        *cell = if *cell == GLYPH_DIRT {
            GLYPH_BOTH
        } else {
            GLYPH_CLEANER
        };
    }

    (0..height)
        .map(|y| {
            (0..width)
                .map(|x| cells[offset(x, y)])
                .collect::<String>()
        })
        .collect()
}
