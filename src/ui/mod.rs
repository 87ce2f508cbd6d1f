// ============================================================================
// Module : ui
// ============================================================================
// Interface terminal : graphiques de comparaison et classement
// ============================================================================

pub mod chart;     // Construction et rendu des graphiques ligne
pub mod dashboard; // Écran principal (onglets + vue courante)
pub mod events;    // Gestion des événements clavier
pub mod ranking;   // Tableau de classement

// Re-exports pour simplifier les imports
pub use dashboard::render;
pub use events::{Event, EventHandler};
