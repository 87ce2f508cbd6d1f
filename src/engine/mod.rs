// ============================================================================
// Module : engine
// ============================================================================
// Moteur de similarité : normalisation, troncature, distance, classement
// et alignement calendaire. Aucun effet de bord.
// ============================================================================

pub mod calendar;   // Alignement par label mois-jour
pub mod similarity; // Normalisation, distance euclidienne, classement

pub use calendar::{calendar_align, CalendarTable};
pub use similarity::{
    compare_years, distance, normalize, rank_years, truncate_to_length, YearDistance,
    NORMALIZATION_BASE,
};
