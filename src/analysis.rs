// ============================================================================
// Analyse : assemblage des résultats du moteur
// ============================================================================
// Enchaîne les étapes pures du moteur sur un YearSet chargé :
// distance de l'année de comparaison, classement des candidates,
// meilleure année, table calendaire.
//
// Aucune E/S ici : l'affichage console et les graphiques restent chez
// l'appelant.
// ============================================================================

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::config::AnalysisConfig;
use crate::engine::{calendar_align, compare_years, rank_years, CalendarTable, YearDistance};
use crate::models::{NormalizedSeries, YearSet};

/// Résultat complet d'une analyse de similarité
#[derive(Debug, Clone)]
pub struct Analysis {
    pub reference_year: i32,
    pub comparison_year: i32,

    /// Distance référence ↔ année de comparaison
    /// (None si l'année de comparaison est plus courte que la référence)
    pub comparison_distance: Option<f64>,

    /// Toutes les candidates classées, distance croissante
    pub ranking: Vec<YearDistance>,

    /// Tête du classement
    pub most_similar: YearDistance,

    /// Alignement calendaire de toutes les années chargées
    pub calendar: CalendarTable,
}

impl Analysis {
    /// Lance l'analyse sur les années chargées
    ///
    /// # Erreurs
    /// * une année requise (référence, comparaison, candidate) est absente
    /// * aucune candidate n'est assez longue pour être classée
    #[instrument(skip_all, fields(reference = config.reference_year))]
    pub fn run(config: &AnalysisConfig, years: &YearSet) -> Result<Self> {
        let reference = require(years, config.reference_year)?;
        let comparison = require(years, config.comparison_year)?;

        let candidates = config
            .candidate_years
            .clone()
            .map(|year| require(years, year))
            .collect::<Result<Vec<_>>>()?;

        let comparison_distance = compare_years(reference, comparison);
        let ranking = rank_years(reference, candidates);

        let most_similar = *ranking.first().with_context(|| {
            format!(
                "Aucune année candidate n'a au moins {} jours de trading",
                reference.len()
            )
        })?;

        let calendar = calendar_align(years.iter_normalized());

        info!(
            most_similar = most_similar.year,
            distance = most_similar.distance,
            ranked = ranking.len(),
            "Similarity analysis done"
        );

        Ok(Self {
            reference_year: config.reference_year,
            comparison_year: config.comparison_year,
            comparison_distance,
            ranking,
            most_similar,
            calendar,
        })
    }

    /// Les `n` premières années du classement
    pub fn top(&self, n: usize) -> &[YearDistance] {
        &self.ranking[..n.min(self.ranking.len())]
    }
}

fn require(years: &YearSet, year: i32) -> Result<&NormalizedSeries> {
    years
        .normalized(year)
        .with_context(|| format!("Données manquantes pour l'année {}", year))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PricePoint, YearSeries};
    use chrono::{Duration, NaiveDate};

    fn series(year: i32, closes: &[f64]) -> YearSeries {
        let start = NaiveDate::from_ymd_opt(year, 1, 2).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + Duration::days(i as i64), c))
            .collect();
        YearSeries::new(year, points).unwrap()
    }

    fn config() -> AnalysisConfig {
        AnalysisConfig {
            reference_year: 2008,
            reference_end: NaiveDate::from_ymd_opt(2008, 1, 10).unwrap(),
            comparison_year: 2001,
            candidate_years: 2000..=2002,
            ..AnalysisConfig::default()
        }
    }

    fn year_set() -> YearSet {
        let mut set = YearSet::new();
        set.insert(series(2000, &[100.0])).unwrap(); // trop courte
        set.insert(series(2001, &[100.0, 75.0, 50.0, 25.0])).unwrap();
        set.insert(series(2002, &[100.0, 125.0, 150.0])).unwrap();
        set.insert(series(2008, &[100.0, 125.0, 125.0])).unwrap();
        set
    }

    #[test]
    fn test_run_analysis() {
        let analysis = Analysis::run(&config(), &year_set()).unwrap();

        assert_eq!(analysis.most_similar, YearDistance { year: 2002, distance: 25.0 });
        assert_eq!(analysis.ranking.len(), 2);
        assert_eq!(analysis.ranking[1].year, 2001);

        // 2001 comparée sur ses 3 premiers jours : sqrt(0² + 50² + 75²)
        let comparison = analysis.comparison_distance.unwrap();
        assert!((comparison - 8125f64.sqrt()).abs() < 1e-9);
        assert_eq!(analysis.calendar.years().count(), 4);
    }

    #[test]
    fn test_top_is_bounded() {
        let analysis = Analysis::run(&config(), &year_set()).unwrap();
        assert_eq!(analysis.top(3).len(), 2);
        assert_eq!(analysis.top(1)[0].year, 2002);
    }

    #[test]
    fn test_missing_year_names_it() {
        let mut set = YearSet::new();
        set.insert(series(2000, &[100.0])).unwrap();
        set.insert(series(2001, &[100.0, 75.0, 50.0])).unwrap();
        set.insert(series(2008, &[100.0, 125.0, 125.0])).unwrap();

        let err = Analysis::run(&config(), &set).unwrap_err();
        assert!(err.to_string().contains("2002"));
    }

    #[test]
    fn test_nothing_rankable() {
        let mut set = YearSet::new();
        set.insert(series(2000, &[100.0])).unwrap();
        set.insert(series(2001, &[100.0])).unwrap();
        set.insert(series(2002, &[100.0])).unwrap();
        set.insert(series(2008, &[100.0, 101.0])).unwrap();

        assert!(Analysis::run(&config(), &set).is_err());
    }
}
