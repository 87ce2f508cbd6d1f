// ============================================================================
// Module : models
// ============================================================================
// Structures de données : séries annuelles brutes, normalisées, et leur
// collection ordonnée par année.
// ============================================================================

pub mod year_series; // PricePoint, YearSeries, NormalizedSeries
pub mod year_set;    // YearSet (cache année → séries)

// Re-export des structures principales pour simplifier les imports
pub use year_series::{NormalizedSeries, PricePoint, YearSeries, MONTH_DAY_FORMAT};
pub use year_set::{YearEntry, YearSet};
