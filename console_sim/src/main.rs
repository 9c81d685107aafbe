use std::env;
use std::io;
use std::thread::sleep;
use std::time::Duration;

use crossterm::event::{poll, read, Event as CEvent, KeyCode};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use tui::backend::CrosstermBackend;
use tui::Terminal;

use thermal_control::config::SimConfig;
use thermal_control::simulation::{Simulation, TraceRow};

use crate::chart::draw_tui;

mod chart;

/// Pacing only, to make the run watchable; the simulation itself is
/// time-independent.
const TICK_PACE: Duration = Duration::from_millis(10);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SimConfig::default();
    let simulation = Simulation::new(&config)?;

    if env::args().any(|arg| arg == "--plain") {
        for row in simulation {
            print_row(&row);
        }
        return Ok(());
    }

    enable_raw_mode().expect("can run in raw mode");
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut trace: Vec<TraceRow> = Vec::with_capacity(config.max_ticks as usize);
    let mut dismissed = false;
    for row in simulation {
        trace.push(row);
        draw_tui(&mut terminal, &config, &trace)?;
        if quit_requested(Duration::from_millis(0))? {
            dismissed = true;
            break;
        }
        sleep(TICK_PACE);
    }

    // leave the finished chart up until the user dismisses it
    while !dismissed {
        dismissed = quit_requested(Duration::from_millis(250))?;
    }

    disable_raw_mode().expect("can go back to normal");
    Ok(())
}

fn print_row(row: &TraceRow) {
    println!(
        "T={}: {}/{}, Temit={}, Tdrv={}",
        row.tick,
        row.actual_level,
        row.target_level,
        row.emitter_temp as i64,
        row.sensor_temp as i64
    );
}

fn quit_requested(wait: Duration) -> crossterm::Result<bool> {
    if poll(wait)? {
        if let CEvent::Key(key) = read()? {
            return Ok(matches!(key.code, KeyCode::Esc | KeyCode::Char('q')));
        }
    }
    Ok(false)
}
