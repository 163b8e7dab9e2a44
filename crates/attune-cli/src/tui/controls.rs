use attune_core::Parameter;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, LineGauge};

use super::App;

/// Render one slider per tunable parameter.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Filters");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(Parameter::ALL.map(|_| Constraint::Length(2)))
        .split(inner);

    for (i, (parameter, row)) in Parameter::ALL.into_iter().zip(rows.iter()).enumerate() {
        let focused = i == app.selected;
        let value = app.params.get(parameter);
        let control = parameter.control();

        let label_style = if focused {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let gauge = LineGauge::default()
            .filled_style(Style::default().fg(if focused { Color::Cyan } else { Color::Blue }))
            .unfilled_style(Style::default().fg(Color::DarkGray))
            .label(Span::styled(
                format!("{:<22}{:>6}", parameter.label(), format_value(parameter, value)),
                label_style,
            ))
            .ratio(control.ratio(value));
        frame.render_widget(gauge, *row);
    }
}

/// Whole-number parameters show no decimals; the rest show two.
pub fn format_value(parameter: Parameter, value: f64) -> String {
    match parameter {
        Parameter::Tempo | Parameter::TempoTolerance => format!("{:.0}", value),
        _ => format!("{:.2}", value),
    }
}
