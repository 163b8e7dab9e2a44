use attune_core::{Dimension, Record};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Row, Table};

use super::App;

/// Render the qualifying set as a table, in catalog order.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    // area.height - 2 for borders - 1 for header
    let viewport_height = usize::from(area.height.saturating_sub(3)).max(1);
    app.result_viewport = viewport_height;

    let matches = app.cache.filter(&app.records, &app.params);
    let total = matches.len();
    let visible_start = app.result_offset.min(total.saturating_sub(1));
    let visible_end = (visible_start + viewport_height).min(total);

    let header = Row::new(vec![
        Cell::from("Name").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Artist"),
        Cell::from("BPM"),
        Cell::from("Artwork").style(Style::default().fg(Color::DarkGray)),
    ])
    .height(1);

    let rows: Vec<Row> = matches
        .iter()
        .skip(visible_start)
        .take(viewport_height)
        .copied()
        .map(row)
        .collect();

    let title = if total > viewport_height {
        format!(
            "Matching songs: {} [{}-{}]",
            total,
            visible_start + 1,
            visible_end
        )
    } else {
        format!("Matching songs: {}", total)
    };

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(35),
            Constraint::Percentage(25),
            Constraint::Length(7),
            Constraint::Min(10),
        ],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(table, area);
}

fn row(record: &Record) -> Row<'static> {
    let tempo = record
        .number(Dimension::Tempo)
        .map(|t| format!("{:.1}", t))
        .unwrap_or_default();
    Row::new(vec![
        Cell::from(record.name.clone()),
        Cell::from(record.artist.clone()),
        Cell::from(tempo),
        Cell::from(record.album_art_url.clone().unwrap_or_default())
            .style(Style::default().fg(Color::DarkGray)),
    ])
}
