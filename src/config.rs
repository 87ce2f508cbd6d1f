// ============================================================================
// Configuration de l'analyse
// ============================================================================
// Paramètres fixes de la comparaison : indice, année de référence et sa date
// de coupure, année de comparaison, plage d'années candidates.
//
// CONCEPT RUST : RangeInclusive<i32>
// - 1999..=2007 : plage d'années bornes incluses
// - Copiable via .clone(), itérable
// ============================================================================

use std::ops::RangeInclusive;

use anyhow::{bail, Result};
use chrono::{Datelike, NaiveDate};
use tracing::warn;

/// Paramètres de l'analyse de similarité
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Symbole Yahoo Finance de l'indice (ex: "^FCHI" pour le CAC 40)
    pub symbol: String,

    /// Nom lisible de l'indice, pour les titres
    pub index_name: String,

    /// Année dont on cherche le "sosie" historique
    pub reference_year: i32,

    /// Fin (exclue) des données de l'année de référence
    pub reference_end: NaiveDate,

    /// Année comparée systématiquement, en plus de la meilleure
    pub comparison_year: i32,

    /// Années candidates, chargées en entier
    pub candidate_years: RangeInclusive<i32>,

    /// Nombre d'années affichées dans le classement console
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    /// CAC 40 : 2008 jusqu'à fin août, comparé à 1999-2007
    fn default() -> Self {
        Self {
            symbol: "^FCHI".to_string(),
            index_name: "CAC 40".to_string(),
            reference_year: 2008,
            // 2008-08-30 est une date valide : pas de panic possible
            reference_end: NaiveDate::from_ymd_opt(2008, 8, 30).unwrap_or_default(),
            comparison_year: 2001,
            candidate_years: 1999..=2007,
            top_n: 3,
        }
    }
}

impl AnalysisConfig {
    /// Vérifie la cohérence des paramètres
    ///
    /// Une référence présente parmi les candidates n'est pas une erreur,
    /// mais elle se classera forcément première (distance 0) : on prévient.
    pub fn validate(&self) -> Result<()> {
        if self.candidate_years.is_empty() {
            bail!("La plage d'années candidates est vide");
        }

        // La coupure doit tomber dans l'année de référence, ou au 1er janvier
        // suivant (année complète)
        let end = self.reference_end;
        let full_year_end = end.year() == self.reference_year + 1 && end.ordinal() == 1;
        if end.year() != self.reference_year && !full_year_end {
            bail!(
                "La date de fin {} ne correspond pas à l'année de référence {}",
                end,
                self.reference_year
            );
        }
        if end.ordinal() == 1 && end.year() == self.reference_year {
            bail!("La date de fin {} exclut toute l'année de référence", end);
        }

        if !self.candidate_years.contains(&self.comparison_year) {
            bail!(
                "L'année de comparaison {} n'est pas dans la plage {:?}",
                self.comparison_year,
                self.candidate_years
            );
        }

        if self.top_n == 0 {
            bail!("top_n doit être au moins 1");
        }

        if self.candidate_years.contains(&self.reference_year) {
            warn!(
                reference_year = self.reference_year,
                "Reference year is among candidates and will rank first with distance 0"
            );
        }

        Ok(())
    }

    /// Intervalle [début, fin) de téléchargement d'une année candidate
    pub fn candidate_range(&self, year: i32) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year + 1, 1, 1)?;
        Some((start, end))
    }

    /// Intervalle [début, fin) de téléchargement de l'année de référence
    pub fn reference_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::from_ymd_opt(self.reference_year, 1, 1)?;
        Some((start, self.reference_end))
    }

    /// Toutes les années chargées : candidates puis référence
    pub fn all_years(&self) -> Vec<i32> {
        let mut years: Vec<i32> = self.candidate_years.clone().collect();
        if !years.contains(&self.reference_year) {
            years.push(self.reference_year);
        }
        years
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.symbol, "^FCHI");
        assert_eq!(config.reference_end, NaiveDate::from_ymd_opt(2008, 8, 30).unwrap());
    }

    #[test]
    fn test_comparison_year_must_be_candidate() {
        let config = AnalysisConfig {
            comparison_year: 1995,
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_reference_end_outside_year() {
        let config = AnalysisConfig {
            reference_end: NaiveDate::from_ymd_opt(2010, 3, 1).unwrap(),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_full_reference_year_is_valid() {
        let config = AnalysisConfig {
            reference_end: NaiveDate::from_ymd_opt(2009, 1, 1).unwrap(),
            ..AnalysisConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_ranges() {
        let config = AnalysisConfig::default();
        let (start, end) = config.candidate_range(2001).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2001, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2002, 1, 1).unwrap());

        let (start, end) = config.reference_range().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2008, 1, 1).unwrap());
        assert_eq!(end, config.reference_end);
    }

    #[test]
    fn test_all_years_includes_reference_once() {
        let config = AnalysisConfig::default();
        let years = config.all_years();
        assert_eq!(years.first(), Some(&1999));
        assert_eq!(years.last(), Some(&2008));
        assert_eq!(years.len(), 10);
    }
}
