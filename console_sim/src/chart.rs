use std::io;
use std::io::Stdout;

use tui::backend::CrosstermBackend;
use tui::layout::{Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::symbols::Marker;
use tui::text::{Span, Spans};
use tui::widgets::{Axis, Block, BorderType, Borders, Chart, Dataset, GraphType, Paragraph};
use tui::Terminal;

use thermal_control::config::SimConfig;
use thermal_control::simulation::TraceRow;

/// Renders the four recorded series plus the temperature band, the way the
/// firmware bench plots a regulation run.
pub fn draw_tui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    config: &SimConfig,
    trace: &[TraceRow],
) -> io::Result<()> {
    let emitter: Vec<(f64, f64)> = trace
        .iter()
        .map(|row| (row.tick as f64, row.emitter_temp))
        .collect();
    let sensor: Vec<(f64, f64)> = trace
        .iter()
        .map(|row| (row.tick as f64, row.sensor_temp))
        .collect();
    let actual: Vec<(f64, f64)> = trace
        .iter()
        .map(|row| (row.tick as f64, row.actual_level as f64))
        .collect();
    let target: Vec<(f64, f64)> = trace
        .iter()
        .map(|row| (row.tick as f64, row.target_level as f64))
        .collect();

    let horizon = config.max_ticks as f64;
    let band_floor = [(0.0, config.min_temp), (horizon, config.min_temp)];
    let band_ceiling = [(0.0, config.max_temp), (horizon, config.max_temp)];

    let datasets = vec![
        band_line(&band_floor),
        band_line(&band_ceiling),
        series("Temit", Color::Red, &emitter),
        series("Tdrv", Color::Yellow, &sensor),
        series("actual PWM", Color::Cyan, &actual),
        series("target PWM", Color::Blue, &target),
    ];

    let title = format!(
        "Mass: {}, Lag: {}",
        config.thermal_mass, config.lag_buffer_length
    );

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .title(Span::raw(title))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .x_axis(
            Axis::default()
                .title("Seconds")
                .bounds([0.0, horizon])
                .labels(axis_labels(&["0", "300", "600"])),
        )
        .y_axis(
            Axis::default()
                .title("Temp, PWM")
                .bounds([0.0, 200.0])
                .labels(axis_labels(&["0", "100", "200"])),
        );

    let status = match trace.last() {
        Some(row) => format!(
            "T={}: {}/{}, Temit={}, Tdrv={}",
            row.tick,
            row.actual_level,
            row.target_level,
            row.emitter_temp as i64,
            row.sensor_temp as i64
        ),
        None => String::new(),
    };

    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([Constraint::Min(10), Constraint::Length(1)].as_ref())
            .split(size);

        rect.render_widget(chart, vertical_layout[0]);
        rect.render_widget(
            Paragraph::new(Spans::from(Span::raw(status))),
            vertical_layout[1],
        );
    })?;
    Ok(())
}

fn series<'a>(name: &'a str, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn band_line<'a>(data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(data)
}

fn axis_labels(labels: &[&'static str]) -> Vec<Span<'static>> {
    labels.iter().map(|label| Span::raw(*label)).collect()
}
