// ============================================================================
// Erreurs du moteur de similarité
// ============================================================================
// Erreurs typées pour les données annuelles et les calculs de distance.
// Les couches applicatives (fetch, main) les enveloppent dans anyhow avec
// du contexte.
//
// CONCEPT RUST : thiserror
// - #[derive(Error)] implémente std::error::Error
// - #[error("...")] génère l'implémentation de Display
// ============================================================================

use chrono::NaiveDate;
use thiserror::Error;

/// Erreurs produites par les modèles et le moteur de similarité
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimilarityError {
    /// Une année sans aucun point ne peut pas être normalisée
    #[error("Série vide pour l'année {year}")]
    EmptySeries { year: i32 },

    /// Le premier prix sert de base 100 : il doit être fini et > 0
    #[error("Prix de base invalide pour l'année {year}: {price}")]
    InvalidBasePrice { year: i32, price: f64 },

    #[error("La date {date} n'appartient pas à l'année {year}")]
    DateOutsideYear { year: i32, date: NaiveDate },

    #[error("Date en double {date} dans l'année {year}")]
    DuplicateDate { year: i32, date: NaiveDate },

    /// La distance n'est définie que pour deux séquences de même longueur
    #[error("Longueurs différentes : {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}
