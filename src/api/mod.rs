// ============================================================================
// Module : api
// ============================================================================
// Source de données : clôtures journalières depuis Yahoo Finance
// ============================================================================

pub mod yahoo; // Client API Yahoo Finance

pub use yahoo::fetch_daily_closes;
