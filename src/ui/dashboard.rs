// ============================================================================
// Dashboard - Rendu de l'écran principal
// ============================================================================
// Onglets des vues en haut, vue courante au centre, aide clavier en bas.
//
// CONCEPTS RATATUI :
// 1. Layout : découpage vertical de l'écran
// 2. Tabs : onglet actif mis en évidence
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::ui::chart::render_line_chart;
use crate::ui::ranking::render_ranking;

/// Dessine l'interface complète
///
/// CONCEPT RUST : Routing avec match sur enum
/// - Le compilateur garantit que toutes les vues sont gérées
pub fn render(frame: &mut Frame, app: &App) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Onglets
            Constraint::Min(0),    // Vue
            Constraint::Length(1), // Aide
        ])
        .split(size);

    render_tabs(frame, app, chunks[0]);

    match app.current_view {
        View::Ranking => render_ranking(frame, app, chunks[1]),
        _ => {
            if let Some(chart) = app.current_chart() {
                render_line_chart(frame, chart, chunks[1]);
            }
        }
    }

    render_footer(frame, chunks[2]);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = View::all()
        .iter()
        .map(|v| Line::from(v.label()))
        .collect();

    let selected = View::all()
        .iter()
        .position(|v| *v == app.current_view)
        .unwrap_or_default();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" 📈 yearmatch - {} ", app.reference_year)),
        )
        .select(selected)
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_widget(tabs, area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let help = Line::from(vec![
        Span::styled("[Tab/→]", Style::default().fg(Color::Yellow)),
        Span::raw(" Vue suivante  "),
        Span::styled("[Shift-Tab/←]", Style::default().fg(Color::Yellow)),
        Span::raw(" Vue précédente  "),
        Span::styled("[q/Échap]", Style::default().fg(Color::Yellow)),
        Span::raw(" Quitter"),
    ]);

    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::sample_app;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_render_every_view() {
        let mut app = sample_app();
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();

        for _ in View::all() {
            terminal.draw(|frame| render(frame, &app)).unwrap();
            app.next_view();
        }
    }
}
