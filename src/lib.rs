// ============================================================================
// yearmatch - Library
// ============================================================================
// Recherche l'année historique dont la trajectoire d'un indice ressemble le
// plus à celle d'une année de référence.
// ============================================================================

pub mod analysis; // Assemblage des résultats
pub mod api;      // API Yahoo Finance
pub mod app;      // État de l'interface
pub mod config;   // Paramètres de l'analyse
pub mod engine;   // Moteur de similarité
pub mod error;    // Erreurs typées du moteur
pub mod models;   // Structures de données
pub mod report;   // Résumé console
pub mod ui;       // Interface utilisateur
