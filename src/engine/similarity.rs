// ============================================================================
// Moteur de similarité de trajectoires
// ============================================================================
// Normalise les années en base 100, tronque à une longueur commune,
// mesure la distance euclidienne et classe les années candidates.
//
// Toutes les fonctions sont pures : aucune sortie console, aucun état global.
//
// CONCEPTS RUST :
// 1. Slices (&[f64]) : vues empruntées sur les valeurs, sans copie
// 2. Iterator chaining : zip + map + sum pour la distance
// 3. sort_by stable : les égalités gardent l'ordre d'entrée (année croissante)
// ============================================================================

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::SimilarityError;
use crate::models::{NormalizedSeries, YearSeries};

/// Base de la normalisation : le premier jour vaut toujours 100
pub const NORMALIZATION_BASE: f64 = 100.0;

/// Distance entre une année candidate et l'année de référence
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearDistance {
    pub year: i32,
    /// Distance euclidienne (>= 0, plus petite = plus similaire)
    pub distance: f64,
}

/// Rebase une année sur son premier prix de clôture (premier jour = 100)
///
/// # Erreurs
/// * `EmptySeries` si la série n'a aucun point
/// * `InvalidBasePrice` si le premier prix n'est pas fini et strictement positif
pub fn normalize(series: &YearSeries) -> Result<NormalizedSeries, SimilarityError> {
    let year = series.year();
    let base = series
        .points()
        .first()
        .ok_or(SimilarityError::EmptySeries { year })?
        .close;

    if !base.is_finite() || base <= 0.0 {
        return Err(SimilarityError::InvalidBasePrice { year, price: base });
    }

    let (dates, values) = series
        .points()
        .iter()
        .map(|p| (p.date, p.close / base * NORMALIZATION_BASE))
        .unzip();

    Ok(NormalizedSeries::from_parts(year, dates, values))
}

/// Retourne les `n` premières valeurs normalisées
///
/// `None` si la série a moins de `n` points : l'année doit alors être
/// ignorée, jamais complétée ni extrapolée.
pub fn truncate_to_length(series: &NormalizedSeries, n: usize) -> Option<&[f64]> {
    series.values().get(..n)
}

/// Distance euclidienne entre deux séquences de même longueur
///
/// `sqrt(sum((a_i - b_i)^2))`
pub fn distance(a: &[f64], b: &[f64]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(euclidean(a, b))
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f64>()
        .sqrt()
}

/// Distance entre la référence et une autre année, alignées par jour de trading
///
/// `None` si l'autre année est plus courte que la référence.
pub fn compare_years(reference: &NormalizedSeries, other: &NormalizedSeries) -> Option<f64> {
    let values = truncate_to_length(other, reference.len())?;
    distance(reference.values(), values).ok()
}

/// Classe les années candidates par distance croissante à la référence
///
/// Chaque candidate est tronquée à la longueur de la référence ; celles qui
/// sont plus courtes sont ignorées. La référence n'est pas exclue si elle
/// figure parmi les candidates (elle se classe alors à distance 0).
///
/// Les égalités de distance conservent l'ordre d'entrée.
pub fn rank_years<'a, I>(reference: &NormalizedSeries, candidates: I) -> Vec<YearDistance>
where
    I: IntoIterator<Item = &'a NormalizedSeries>,
{
    let ref_len = reference.len();

    let mut ranked: Vec<YearDistance> = candidates
        .into_iter()
        .filter_map(|candidate| match compare_years(reference, candidate) {
            Some(distance) => {
                trace!(year = candidate.year(), distance, "Scored candidate year");
                Some(YearDistance {
                    year: candidate.year(),
                    distance,
                })
            }
            None => {
                debug!(
                    year = candidate.year(),
                    len = candidate.len(),
                    ref_len,
                    "Skipping candidate shorter than reference"
                );
                None
            }
        })
        .collect();

    // CONCEPT RUST : total_cmp
    // - Ordre total sur f64 (pas de unwrap sur partial_cmp)
    ranked.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    ranked
}

// ============================================================================
// Tests unitaires
// ============================================================================
