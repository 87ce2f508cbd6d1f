// ============================================================================
// Structures : PricePoint, YearSeries, NormalizedSeries
// ============================================================================
// Une année de clôtures journalières d'un indice, et sa version normalisée
// en base 100.
//
// CONCEPTS RUST :
// 1. NaiveDate : date sans timezone (un jour de trading)
// 2. Constructeur validant : les invariants sont garantis à la création
// 3. Immutabilité : champs privés, accès en lecture seule
// ============================================================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::SimilarityError;

/// Format des labels calendaires (mois-jour, sans l'année)
pub const MONTH_DAY_FORMAT: &str = "%m-%d";

/// Un jour de trading : date et prix de clôture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// Clôtures journalières d'une année calendaire
///
/// Invariants (garantis par `new`) :
/// - au moins un point
/// - triés par date croissante, sans doublon
/// - toutes les dates appartiennent à `year`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearSeries {
    year: i32,
    points: Vec<PricePoint>,
}

impl YearSeries {
    /// Crée une série annuelle en validant ses invariants
    ///
    /// Les points sont triés par date ; l'ordre d'entrée n'a pas d'importance.
    pub fn new(year: i32, mut points: Vec<PricePoint>) -> Result<Self, SimilarityError> {
        if points.is_empty() {
            return Err(SimilarityError::EmptySeries { year });
        }

        if let Some(p) = points.iter().find(|p| p.date.year() != year) {
            return Err(SimilarityError::DateOutsideYear { year, date: p.date });
        }

        points.sort_by_key(|p| p.date);

        // CONCEPT RUST : windows(2) parcourt les paires adjacentes
        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(SimilarityError::DuplicateDate {
                year,
                date: pair[0].date,
            });
        }

        Ok(Self { year, points })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Nombre de jours de trading
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Toujours faux pour une série construite via `new`
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> &PricePoint {
        // Non vide par construction
        &self.points[0]
    }

    pub fn last(&self) -> &PricePoint {
        &self.points[self.points.len() - 1]
    }
}

/// Trajectoire d'une année rebasée à 100 sur son premier jour de trading
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSeries {
    year: i32,
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
}

impl NormalizedSeries {
    /// Assemble une série normalisée ; réservé au moteur qui garantit
    /// `dates.len() == values.len()` et `values[0] == 100`.
    pub(crate) fn from_parts(year: i32, dates: Vec<NaiveDate>, values: Vec<f64>) -> Self {
        debug_assert_eq!(dates.len(), values.len());
        Self { year, dates, values }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Points (date, valeur normalisée) dans l'ordre chronologique
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }

    /// Points (label "MM-DD", valeur normalisée) pour l'alignement calendaire
    pub fn month_day_values(&self) -> impl Iterator<Item = (String, f64)> + '_ {
        self.iter()
            .map(|(date, value)| (date.format(MONTH_DAY_FORMAT).to_string(), value))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_year_series_sorts_points() {
        let series = YearSeries::new(
            2001,
            vec![
                PricePoint::new(date(2001, 1, 3), 102.0),
                PricePoint::new(date(2001, 1, 2), 100.0),
            ],
        )
        .unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.first().date, date(2001, 1, 2));
        assert_eq!(series.last().close, 102.0);
    }

    #[test]
    fn test_year_series_rejects_empty() {
        let err = YearSeries::new(2001, Vec::new()).unwrap_err();
        assert_eq!(err, SimilarityError::EmptySeries { year: 2001 });
    }

    #[test]
    fn test_year_series_rejects_foreign_date() {
        let err = YearSeries::new(2001, vec![PricePoint::new(date(2002, 1, 2), 100.0)])
            .unwrap_err();
        assert!(matches!(err, SimilarityError::DateOutsideYear { year: 2001, .. }));
    }

    #[test]
    fn test_year_series_rejects_duplicate_date() {
        let err = YearSeries::new(
            2001,
            vec![
                PricePoint::new(date(2001, 1, 2), 100.0),
                PricePoint::new(date(2001, 1, 2), 101.0),
            ],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SimilarityError::DuplicateDate {
                year: 2001,
                date: date(2001, 1, 2)
            }
        );
    }

    #[test]
    fn test_month_day_labels() {
        let series = NormalizedSeries::from_parts(
            2004,
            vec![date(2004, 2, 29), date(2004, 3, 1)],
            vec![100.0, 99.5],
        );
        let labels: Vec<String> = series.month_day_values().map(|(l, _)| l).collect();
        assert_eq!(labels, vec!["02-29", "03-01"]);
    }
}
