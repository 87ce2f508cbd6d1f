// ============================================================================
// Rapport console
// ============================================================================
// Construit les lignes du résumé texte ; main() se charge de les afficher.
// Les distances sont formatées à deux décimales.
// ============================================================================

use chrono::NaiveDate;

use crate::analysis::Analysis;

/// Ligne de progression après le téléchargement d'une année
///
/// `cutoff` est la date de fin (exclue) pour une année partielle.
pub fn fetch_line(year: i32, trading_days: usize, cutoff: Option<NaiveDate>) -> String {
    match cutoff {
        Some(end) => format!(
            "Année {} (avant le {}): {} jours de trading téléchargés",
            year,
            end.format("%d/%m"),
            trading_days
        ),
        None => format!("Année {}: {} jours de trading téléchargés", year, trading_days),
    }
}

/// Distance formatée, ou mention explicite si indisponible
pub fn format_distance(distance: Option<f64>) -> String {
    match distance {
        Some(d) => format!("{:.2}", d),
        None => "indisponible (année trop courte)".to_string(),
    }
}

/// Résumé complet : distance de comparaison, meilleure année, top N
pub fn summary_lines(analysis: &Analysis, top_n: usize) -> Vec<String> {
    let mut lines = vec![
        format!(
            "Distance entre {} et {}: {}",
            analysis.reference_year,
            analysis.comparison_year,
            format_distance(analysis.comparison_distance)
        ),
        String::new(),
        "Résultats de similarité:".to_string(),
        format!(
            "1. Année la plus similaire à {}: {}",
            analysis.reference_year, analysis.most_similar.year
        ),
        format!("   Distance: {:.2}", analysis.most_similar.distance),
        format!("2. {} (comparaison spécifique)", analysis.comparison_year),
        format!("   Distance: {}", format_distance(analysis.comparison_distance)),
        String::new(),
        format!("Top {} des années les plus similaires:", top_n),
    ];

    lines.extend(
        analysis
            .top(top_n)
            .iter()
            .enumerate()
            .map(|(i, r)| format!("   {}. {} (distance: {:.2})", i + 1, r.year, r.distance)),
    );

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{CalendarTable, YearDistance};

    fn analysis() -> Analysis {
        let ranking = vec![
            YearDistance { year: 2003, distance: 12.5 },
            YearDistance { year: 2001, distance: 20.0 },
            YearDistance { year: 1999, distance: 31.5 },
            YearDistance { year: 2005, distance: 40.0 },
        ];
        Analysis {
            reference_year: 2008,
            comparison_year: 2001,
            comparison_distance: Some(20.0),
            most_similar: ranking[0],
            ranking,
            calendar: CalendarTable::default(),
        }
    }

    #[test]
    fn test_fetch_line() {
        assert_eq!(
            fetch_line(2001, 254, None),
            "Année 2001: 254 jours de trading téléchargés"
        );
        let end = NaiveDate::from_ymd_opt(2008, 8, 30).unwrap();
        assert_eq!(
            fetch_line(2008, 167, Some(end)),
            "Année 2008 (avant le 30/08): 167 jours de trading téléchargés"
        );
    }

    #[test]
    fn test_summary_top_three() {
        let lines = summary_lines(&analysis(), 3);

        assert_eq!(lines[0], "Distance entre 2008 et 2001: 20.00");
        assert!(lines.contains(&"1. Année la plus similaire à 2008: 2003".to_string()));
        assert!(lines.contains(&"   Distance: 12.50".to_string()));

        let top: Vec<&String> = lines.iter().filter(|l| l.contains("(distance:")).collect();
        assert_eq!(top.len(), 3);
        assert_eq!(top[2], "   3. 1999 (distance: 31.50)");
    }

    #[test]
    fn test_unavailable_comparison() {
        let mut a = analysis();
        a.comparison_distance = None;
        let lines = summary_lines(&a, 3);
        assert!(lines[0].ends_with("indisponible (année trop courte)"));
    }
}
