// ============================================================================
// Ranking - Tableau du classement complet
// ============================================================================
// Toutes les années candidates classées par distance croissante.
// L'année la plus similaire et l'année de comparaison sont colorées comme
// dans les graphiques.
// ============================================================================

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};

use crate::app::App;
use crate::ui::chart::{COMPARISON_COLOR, MOST_SIMILAR_COLOR};

/// Dessine le tableau de classement
pub fn render_ranking(frame: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Rang", "Année", "Distance"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .ranking
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let style = if entry.year == app.most_similar_year {
                Style::default().fg(MOST_SIMILAR_COLOR)
            } else if entry.year == app.comparison_year {
                Style::default().fg(COMPARISON_COLOR)
            } else {
                Style::default()
            };

            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(entry.year.to_string()),
                Cell::from(format!("{:.2}", entry.distance)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(12),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(
                " Classement des années les plus similaires à {} ",
                app.reference_year
            )),
    );

    frame.render_widget(table, area);
}
