// ============================================================================
// Chart - Graphiques de comparaison des trajectoires
// ============================================================================
// Deux étapes séparées :
// 1. Construction : LineChart décrit titre, axes et séries nommées
//    (fonctions pures, testables sans terminal)
// 2. Rendu : render_line_chart dessine un LineChart avec le widget Chart
//
// Une série peut avoir des trous (jours absents de l'alignement calendaire) :
// elle est alors découpée en segments contigus, jamais reliée par-dessus
// un trou.
//
// CONCEPTS RATATUI :
// 1. Chart widget : graphique ligne
// 2. Dataset : série de points (x, y) empruntés
// 3. Axis : bornes et labels des axes X et Y
// ============================================================================

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::analysis::Analysis;
use crate::config::AnalysisConfig;
use crate::engine::CalendarTable;
use crate::models::{NormalizedSeries, YearSet};

/// Couleur de l'année de comparaison
pub const COMPARISON_COLOR: Color = Color::Blue;
/// Couleur de l'année la plus similaire
pub const MOST_SIMILAR_COLOR: Color = Color::Green;
/// Couleur de l'année de référence
pub const REFERENCE_COLOR: Color = Color::Red;

/// Nombre de labels affichés sur l'axe X
const X_LABEL_COUNT: usize = 5;

const TRADING_DAYS_TITLE: &str = "Jours de trading séquentiels";
const CALENDAR_DAYS_TITLE: &str = "Jour (format: Mois-Jour)";
const NORMALIZED_TITLE: &str = "Indice normalisé (base 100)";

// ============================================================================
// Modèle du graphique
// ============================================================================

/// Une série nommée ; `None` marque un trou
#[derive(Debug, Clone, PartialEq)]
pub struct LineSeries {
    pub name: String,
    pub color: Color,
    /// Trait renforcé (année de référence)
    pub emphasized: bool,
    pub points: Vec<Option<(f64, f64)>>,
}

impl LineSeries {
    /// Découpe la série en segments sans trou
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current = Vec::new();
        for point in &self.points {
            match point {
                Some(p) => current.push(*p),
                None if !current.is_empty() => segments.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

/// Description complète d'un graphique ligne
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: String,
    pub x_title: String,
    pub y_title: String,
    pub x_bounds: [f64; 2],
    pub x_labels: Vec<String>,
    pub series: Vec<LineSeries>,
}

impl LineChart {
    /// Bornes Y sur tous les points présents, avec 5% de marge
    ///
    /// None si aucune série n'a de point.
    pub fn y_bounds(&self) -> Option<[f64; 2]> {
        let (min, max) = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().flatten())
            .fold((f64::MAX, f64::MIN), |(min, max), &(_x, y)| (min.min(y), max.max(y)));

        if min > max {
            return None;
        }

        // Série plate : on garde une hauteur non nulle
        let margin = ((max - min) * 0.05).max(1.0);
        Some([min - margin, max + margin])
    }
}

// ============================================================================
// Construction des graphiques
// ============================================================================

/// Comparaison alignée par jour de trading (1er jour vs 1er jour)
pub fn trading_day_chart(config: &AnalysisConfig, analysis: &Analysis, years: &YearSet) -> LineChart {
    let series = comparison_series(config, analysis, years, |s| {
        s.values()
            .iter()
            .enumerate()
            .map(|(i, &v)| Some((i as f64, v)))
            .collect()
    });

    let max_len = longest(years, &series_years(analysis));
    let x_max = max_len.saturating_sub(1) as f64;

    LineChart {
        title: format!(
            "Comparaison du {}: {} vs {} et année la plus similaire",
            config.index_name, analysis.reference_year, analysis.comparison_year
        ),
        x_title: TRADING_DAYS_TITLE.to_string(),
        y_title: NORMALIZED_TITLE.to_string(),
        x_bounds: [0.0, x_max.max(1.0)],
        x_labels: index_labels(x_max.max(1.0)),
        series,
    }
}

/// Comparaison détaillée, limitée à la fenêtre effectivement comparée
/// (les premiers jours de trading de l'année de référence)
pub fn detail_chart(config: &AnalysisConfig, analysis: &Analysis, years: &YearSet) -> LineChart {
    let window = years
        .normalized(analysis.reference_year)
        .map(NormalizedSeries::len)
        .unwrap_or_default();

    let series = comparison_series(config, analysis, years, |s| {
        s.values()
            .iter()
            .take(window)
            .enumerate()
            .map(|(i, &v)| Some((i as f64, v)))
            .collect()
    });

    let x_max = (window.saturating_sub(1) as f64).max(1.0);

    LineChart {
        title: format!(
            "{}: Comparaison détaillée {} vs {} et année la plus similaire",
            config.index_name, analysis.reference_year, analysis.comparison_year
        ),
        x_title: TRADING_DAYS_TITLE.to_string(),
        y_title: NORMALIZED_TITLE.to_string(),
        x_bounds: [0.0, x_max],
        x_labels: index_labels(x_max),
        series,
    }
}

/// Comparaison alignée par jour calendaire (label mois-jour)
///
/// L'axe X est le rang du label dans la table ; une année sans donnée pour
/// un label a un trou à cet endroit.
pub fn calendar_chart(config: &AnalysisConfig, analysis: &Analysis) -> LineChart {
    let table = &analysis.calendar;

    let series = named_years(config, analysis)
        .into_iter()
        .filter_map(|(year, name, color, emphasized)| {
            let column = table.column(year)?;
            Some(LineSeries {
                name,
                color,
                emphasized,
                points: column
                    .iter()
                    .enumerate()
                    .map(|(row, cell)| cell.map(|v| (row as f64, v)))
                    .collect(),
            })
        })
        .collect();

    let x_max = (table.len().saturating_sub(1) as f64).max(1.0);

    LineChart {
        title: format!(
            "Comparaison du {} par jour calendaire: {} vs {} et année la plus similaire",
            config.index_name, analysis.reference_year, analysis.comparison_year
        ),
        x_title: CALENDAR_DAYS_TITLE.to_string(),
        y_title: NORMALIZED_TITLE.to_string(),
        x_bounds: [0.0, x_max],
        x_labels: calendar_labels(table),
        series,
    }
}

/// Années tracées, dans l'ordre de dessin : comparaison, plus similaire,
/// référence (dessinée en dernier, au-dessus)
fn named_years(config: &AnalysisConfig, analysis: &Analysis) -> Vec<(i32, String, Color, bool)> {
    vec![
        (
            analysis.comparison_year,
            analysis.comparison_year.to_string(),
            COMPARISON_COLOR,
            false,
        ),
        (
            analysis.most_similar.year,
            format!("Plus similaire ({})", analysis.most_similar.year),
            MOST_SIMILAR_COLOR,
            false,
        ),
        (
            analysis.reference_year,
            format!(
                "{} (avant le {})",
                analysis.reference_year,
                config.reference_end.format("%d/%m")
            ),
            REFERENCE_COLOR,
            true,
        ),
    ]
}

fn series_years(analysis: &Analysis) -> [i32; 3] {
    [
        analysis.comparison_year,
        analysis.most_similar.year,
        analysis.reference_year,
    ]
}

fn comparison_series<F>(
    config: &AnalysisConfig,
    analysis: &Analysis,
    years: &YearSet,
    to_points: F,
) -> Vec<LineSeries>
where
    F: Fn(&NormalizedSeries) -> Vec<Option<(f64, f64)>>,
{
    named_years(config, analysis)
        .into_iter()
        .filter_map(|(year, name, color, emphasized)| {
            let normalized = years.normalized(year)?;
            Some(LineSeries {
                name,
                color,
                emphasized,
                points: to_points(normalized),
            })
        })
        .collect()
}

fn longest(years: &YearSet, selected: &[i32]) -> usize {
    selected
        .iter()
        .filter_map(|&y| years.normalized(y))
        .map(NormalizedSeries::len)
        .max()
        .unwrap_or_default()
}

/// Labels numériques régulièrement espacés sur [0, x_max]
fn index_labels(x_max: f64) -> Vec<String> {
    (0..X_LABEL_COUNT)
        .map(|i| {
            let x = x_max * i as f64 / (X_LABEL_COUNT - 1) as f64;
            format!("{:.0}", x)
        })
        .collect()
}

/// Labels mois-jour régulièrement espacés sur les lignes de la table
fn calendar_labels(table: &CalendarTable) -> Vec<String> {
    let labels = table.labels();
    if labels.is_empty() {
        return Vec::new();
    }
    let last = labels.len() - 1;
    (0..X_LABEL_COUNT)
        .map(|i| labels[last * i / (X_LABEL_COUNT - 1)].clone())
        .collect()
}

// ============================================================================
// Rendu
// ============================================================================

/// Dessine un LineChart dans la zone donnée
///
/// CONCEPT RUST : Durée de vie des données
/// - Dataset emprunte ses points (&[(f64, f64)])
/// - Les segments doivent donc vivre jusqu'au render_widget
pub fn render_line_chart(frame: &mut Frame, chart: &LineChart, area: Rect) {
    let [y_min, y_max] = match chart.y_bounds() {
        Some(bounds) => bounds,
        None => {
            render_no_data(frame, area, "Pas de données à afficher");
            return;
        }
    };

    // (index de la série, segment)
    let segments: Vec<(usize, Vec<(f64, f64)>)> = chart
        .series
        .iter()
        .enumerate()
        .flat_map(|(i, s)| s.segments().into_iter().map(move |seg| (i, seg)))
        .collect();

    let mut named = vec![false; chart.series.len()];
    let datasets: Vec<Dataset> = segments
        .iter()
        .map(|(i, points)| {
            let series = &chart.series[*i];
            let mut style = Style::default().fg(series.color);
            if series.emphasized {
                style = style.add_modifier(Modifier::BOLD);
            }

            let dataset = Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(points);

            // Un seul nom par série pour la légende
            if named[*i] {
                dataset
            } else {
                named[*i] = true;
                dataset.name(series.name.clone())
            }
        })
        .collect();

    let x_axis = Axis::default()
        .title(chart.x_title.clone())
        .style(Style::default().fg(Color::Gray))
        .bounds(chart.x_bounds)
        .labels(chart.x_labels.iter().cloned().map(Span::raw).collect());

    let y_axis = Axis::default()
        .title(chart.y_title.clone())
        .style(Style::default().fg(Color::Gray))
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format!("{:.0}", y_min)),
            Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let widget = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" {} ", chart.title)),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(widget, area);
}

/// Affiche un message quand il n'y a pas de données à afficher
fn render_no_data(frame: &mut Frame, area: Rect, message: &str) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(" ⚠ Erreur ");

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(Color::Red))),
    ];

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricePoint, YearSeries};
    use chrono::NaiveDate;
    use ratatui::{backend::TestBackend, Terminal};

    fn series(year: i32, days: &[(u32, u32, f64)]) -> YearSeries {
        let points = days
            .iter()
            .map(|&(m, d, c)| PricePoint::new(NaiveDate::from_ymd_opt(year, m, d).unwrap(), c))
            .collect();
        YearSeries::new(year, points).unwrap()
    }

    fn fixture() -> (AnalysisConfig, Analysis, YearSet) {
        let config = AnalysisConfig {
            reference_year: 2004,
            reference_end: NaiveDate::from_ymd_opt(2004, 3, 2).unwrap(),
            comparison_year: 2001,
            candidate_years: 2001..=2003,
            ..AnalysisConfig::default()
        };

        let mut years = YearSet::new();
        years
            .insert(series(2001, &[(2, 27, 40.0), (2, 28, 50.0), (3, 1, 60.0), (3, 2, 70.0)]))
            .unwrap();
        years
            .insert(series(2002, &[(2, 27, 40.0), (2, 28, 40.0), (3, 1, 30.0)]))
            .unwrap();
        years
            .insert(series(2003, &[(2, 27, 80.0), (2, 28, 100.0), (3, 3, 90.0)]))
            .unwrap();
        years
            .insert(series(2004, &[(2, 27, 40.0), (2, 29, 50.0), (3, 1, 45.0)]))
            .unwrap();

        let analysis = Analysis::run(&config, &years).unwrap();
        (config, analysis, years)
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let line = LineSeries {
            name: "2003".to_string(),
            color: Color::Blue,
            emphasized: false,
            points: vec![None, Some((0.0, 1.0)), Some((1.0, 2.0)), None, None, Some((4.0, 3.0))],
        };
        assert_eq!(
            line.segments(),
            vec![vec![(0.0, 1.0), (1.0, 2.0)], vec![(4.0, 3.0)]]
        );
    }

    #[test]
    fn test_y_bounds_empty_chart() {
        let chart = LineChart {
            title: String::new(),
            x_title: String::new(),
            y_title: String::new(),
            x_bounds: [0.0, 1.0],
            x_labels: Vec::new(),
            series: Vec::new(),
        };
        assert_eq!(chart.y_bounds(), None);
    }

    #[test]
    fn test_trading_day_chart_series() {
        let (config, analysis, years) = fixture();
        let chart = trading_day_chart(&config, &analysis, &years);

        assert_eq!(chart.series.len(), 3);
        assert_eq!(chart.series[0].color, COMPARISON_COLOR);
        assert_eq!(chart.series[2].color, REFERENCE_COLOR);
        assert!(chart.series[2].emphasized);
        assert_eq!(chart.series[0].points.len(), 4);
        assert_eq!(chart.series[2].name, "2004 (avant le 02/03)");
        assert_eq!(chart.x_bounds, [0.0, 3.0]);
    }

    #[test]
    fn test_detail_chart_limited_to_reference_window() {
        let (config, analysis, years) = fixture();
        let chart = detail_chart(&config, &analysis, &years);

        assert!(chart.series.iter().all(|s| s.points.len() <= 3));
        assert_eq!(chart.x_bounds, [0.0, 2.0]);
    }

    #[test]
    fn test_calendar_chart_has_gaps() {
        let (config, analysis, _) = fixture();
        let chart = calendar_chart(&config, &analysis);

        // 2001 n'a pas de 29 février (3e ligne)
        let comparison = &chart.series[0];
        assert_eq!(comparison.points[2], None);
        let reference = &chart.series[2];
        assert_eq!(reference.points[2], Some((2.0, 125.0)));
        assert_eq!(chart.x_labels.first().map(String::as_str), Some("02-27"));
    }

    #[test]
    fn test_render_with_gaps_does_not_panic() {
        let (config, analysis, years) = fixture();
        let charts = [
            trading_day_chart(&config, &analysis, &years),
            calendar_chart(&config, &analysis),
            detail_chart(&config, &analysis, &years),
        ];

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        for chart in &charts {
            terminal
                .draw(|frame| {
                    let area = frame.size();
                    render_line_chart(frame, chart, area);
                })
                .unwrap();
        }
    }
}
