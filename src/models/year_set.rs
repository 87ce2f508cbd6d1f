// ============================================================================
// Structure : YearSet
// ============================================================================
// Collection explicite année → (série brute, série normalisée).
// La normalisation est calculée une seule fois, à l'insertion.
//
// CONCEPT RUST : BTreeMap
// - Map triée par clé : l'itération se fait par année croissante
// - L'ordre est donc déterministe pour le classement
// ============================================================================

use std::collections::BTreeMap;

use crate::engine::normalize;
use crate::error::SimilarityError;
use crate::models::{NormalizedSeries, YearSeries};

/// Une année chargée et sa trajectoire normalisée
#[derive(Debug, Clone)]
pub struct YearEntry {
    pub series: YearSeries,
    pub normalized: NormalizedSeries,
}

/// Ensemble ordonné des années chargées
#[derive(Debug, Clone, Default)]
pub struct YearSet {
    entries: BTreeMap<i32, YearEntry>,
}

impl YearSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ajoute (ou remplace) une année et met en cache sa normalisation
    ///
    /// Échoue si la série ne peut pas être normalisée ; l'année est alors
    /// rejetée et l'ensemble n'est pas modifié.
    pub fn insert(&mut self, series: YearSeries) -> Result<(), SimilarityError> {
        let normalized = normalize(&series)?;
        self.entries
            .insert(series.year(), YearEntry { series, normalized });
        Ok(())
    }

    pub fn normalized(&self, year: i32) -> Option<&NormalizedSeries> {
        self.entries.get(&year).map(|e| &e.normalized)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Années présentes, par ordre croissant
    pub fn years(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    /// Toutes les séries normalisées, par année croissante
    pub fn iter_normalized(&self) -> impl Iterator<Item = &NormalizedSeries> {
        self.entries.values().map(|e| &e.normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PricePoint;
    use chrono::NaiveDate;

    fn series(year: i32, closes: &[f64]) -> YearSeries {
        let start = NaiveDate::from_ymd_opt(year, 1, 2).unwrap();
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PricePoint::new(start + chrono::Duration::days(i as i64), c))
            .collect();
        YearSeries::new(year, points).unwrap()
    }

    #[test]
    fn test_insert_caches_normalized_series() {
        let mut set = YearSet::new();
        set.insert(series(2003, &[40.0, 50.0])).unwrap();

        let normalized = set.normalized(2003).unwrap();
        assert_eq!(normalized.values(), &[100.0, 125.0]);

        set.insert(series(2004, &[50.0, 55.0])).unwrap();
        let values = set.normalized(2004).unwrap().values();
        assert_eq!(values[0], 100.0);
        assert!((values[1] - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_years_are_ordered() {
        let mut set = YearSet::new();
        set.insert(series(2005, &[1.0])).unwrap();
        set.insert(series(1999, &[1.0])).unwrap();
        set.insert(series(2001, &[1.0])).unwrap();

        assert_eq!(set.years().collect::<Vec<_>>(), vec![1999, 2001, 2005]);
    }

    #[test]
    fn test_insert_rejects_zero_base_price() {
        let mut set = YearSet::new();
        assert!(set.insert(series(2002, &[0.0, 10.0])).is_err());
        assert!(set.normalized(2002).is_none());
        assert!(set.is_empty());
    }
}
