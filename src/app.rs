// ============================================================================
// Structure : App
// ============================================================================
// État de l'interface : vue affichée, graphiques déjà construits,
// classement. Tout est calculé une fois à la création ; la boucle
// d'affichage ne fait que lire.
//
// PATTERN : "Application State"
// - Tous les composants de l'UI lisent depuis App
// - Toutes les modifications passent par les méthodes de App
// ============================================================================

use crate::analysis::Analysis;
use crate::config::AnalysisConfig;
use crate::engine::YearDistance;
use crate::models::YearSet;
use crate::ui::chart::{calendar_chart, detail_chart, trading_day_chart, LineChart};

// ============================================================================
// Enum : View
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Une seule vue active à la fois
// - next()/previous() cyclent comme un carrousel
// ============================================================================

/// Vues de l'application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Alignement par jour de trading
    TradingDays,
    /// Alignement par jour calendaire
    Calendar,
    /// Fenêtre comparée uniquement
    Detail,
    /// Tableau de classement
    Ranking,
}

impl View {
    pub fn all() -> [View; 4] {
        [View::TradingDays, View::Calendar, View::Detail, View::Ranking]
    }

    /// Label court pour les onglets
    pub fn label(&self) -> &'static str {
        match self {
            View::TradingDays => "Jours de trading",
            View::Calendar => "Calendrier",
            View::Detail => "Détail",
            View::Ranking => "Classement",
        }
    }

    pub fn next(&self) -> View {
        match self {
            View::TradingDays => View::Calendar,
            View::Calendar => View::Detail,
            View::Detail => View::Ranking,
            View::Ranking => View::TradingDays,
        }
    }

    pub fn previous(&self) -> View {
        match self {
            View::TradingDays => View::Ranking,
            View::Calendar => View::TradingDays,
            View::Detail => View::Calendar,
            View::Ranking => View::Detail,
        }
    }
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    pub current_view: View,

    pub reference_year: i32,
    pub comparison_year: i32,
    pub most_similar_year: i32,

    pub trading_chart: LineChart,
    pub calendar_chart: LineChart,
    pub detail_chart: LineChart,

    /// Classement complet, distance croissante
    pub ranking: Vec<YearDistance>,
}

impl App {
    /// Construit tous les graphiques à partir de l'analyse
    pub fn new(config: &AnalysisConfig, analysis: &Analysis, years: &YearSet) -> Self {
        Self {
            running: true,
            current_view: View::TradingDays,
            reference_year: analysis.reference_year,
            comparison_year: analysis.comparison_year,
            most_similar_year: analysis.most_similar.year,
            trading_chart: trading_day_chart(config, analysis, years),
            calendar_chart: calendar_chart(config, analysis),
            detail_chart: detail_chart(config, analysis, years),
            ranking: analysis.ranking.clone(),
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    pub fn previous_view(&mut self) {
        self.current_view = self.current_view.previous();
    }

    /// Graphique de la vue courante (None pour le classement)
    pub fn current_chart(&self) -> Option<&LineChart> {
        match self.current_view {
            View::TradingDays => Some(&self.trading_chart),
            View::Calendar => Some(&self.calendar_chart),
            View::Detail => Some(&self.detail_chart),
            View::Ranking => None,
        }
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================
