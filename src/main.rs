// ============================================================================
// yearmatch - Point d'entrée
// ============================================================================
// 1. Télécharge les clôtures journalières de chaque année (Yahoo Finance)
// 2. Classe les années selon leur ressemblance avec l'année de référence
// 3. Affiche le résumé console puis les graphiques dans le terminal
//
// CONCEPTS RUST CLÉS :
// 1. Async dans sync : tokio::runtime::Runtime pour les appels API
// 2. Event loop : boucle de rendu et d'événements clavier
// 3. Restauration du terminal même en cas d'erreur
// ============================================================================

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use yearmatch::analysis::Analysis;
use yearmatch::api::fetch_daily_closes;
use yearmatch::app::App;
use yearmatch::config::AnalysisConfig;
use yearmatch::models::YearSet;
use yearmatch::report;
use yearmatch::ui::{
    events::{is_next_view_event, is_previous_view_event, is_quit_event},
    render, Event, EventHandler,
};

// ============================================================================
// Initialisation du logging
// ============================================================================
// Stdout est réservé au résumé console puis au TUI : les logs vont dans un
// fichier à rotation quotidienne.
// ============================================================================

/// Répertoire des logs
///
/// - Linux/WSL : ~/.local/share/yearmatch/logs
/// - macOS : ~/Library/Application Support/yearmatch/logs
/// - Sinon : ./logs
fn log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("yearmatch").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// # Contrôler le niveau de log
/// ```bash
/// RUST_LOG=debug cargo run
/// RUST_LOG=yearmatch=trace cargo run
/// ```
fn init_logging() -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let log_dir = log_dir();
    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "yearmatch.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // Par défaut : debug pour yearmatch, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yearmatch=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

fn main() -> Result<()> {
    init_logging().unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {}", e);
        eprintln!("   Continuing without logging...");
    });

    let config = AnalysisConfig::default();
    config.validate()?;
    info!(?config, "yearmatch starting up");

    let runtime = tokio::runtime::Runtime::new()?;
    let years = runtime.block_on(load_years(&config))?;

    let analysis = Analysis::run(&config, &years)?;

    println!();
    for line in report::summary_lines(&analysis, config.top_n) {
        println!("{}", line);
    }

    // Pas de terminal interactif (pipe, CI) : le résumé suffit
    if !io::stdout().is_terminal() {
        info!("Stdout is not a terminal, skipping charts");
        return Ok(());
    }

    let mut app = App::new(&config, &analysis, &years);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app, &EventHandler::new());

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Chargement des données
// ============================================================================

/// Télécharge séquentiellement les années candidates puis la référence
///
/// Le premier échec interrompt tout : l'erreur nomme l'année concernée.
async fn load_years(config: &AnalysisConfig) -> Result<YearSet> {
    let years = config.all_years();
    println!("Téléchargement des données pour les années {:?}...", years);

    let mut set = YearSet::new();
    for (i, &year) in years.iter().enumerate() {
        let is_reference = year == config.reference_year;
        let range = if is_reference {
            config.reference_range()
        } else {
            config.candidate_range(year)
        };
        let (start, end) = range.with_context(|| format!("Année {} hors calendrier", year))?;

        debug!(year, progress = i + 1, total = years.len(), "Fetching year");
        let series = fetch_daily_closes(&config.symbol, year, start, end)
            .await
            .with_context(|| format!("Échec du téléchargement de l'année {}", year))?;

        let cutoff = is_reference.then_some(config.reference_end);
        println!("{}", report::fetch_line(year, series.len(), cutoff));

        set.insert(series)
            .with_context(|| format!("Données inutilisables pour l'année {}", year))?;

        // Petit délai entre les requêtes (rate limiting)
        if i + 1 < years.len() {
            tokio::time::sleep(tokio::time::Duration::from_millis(500)).await;
        }
    }

    info!(years = set.len(), "All years loaded");
    Ok(set)
}

// ============================================================================
// Event loop
// ============================================================================

/// Boucle principale : Render → Input → Update
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;
        handle_event(app, events.next()?);
    }
    Ok(())
}

fn handle_event(app: &mut App, event: Event) {
    if is_quit_event(&event) {
        info!("Quit requested");
        app.quit();
    } else if is_next_view_event(&event) {
        app.next_view();
        debug!(view = ?app.current_view, "Switched view");
    } else if is_previous_view_event(&event) {
        app.previous_view();
        debug!(view = ?app.current_view, "Switched view");
    }
}

/// Configure le terminal en mode TUI (raw mode + écran alternatif)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
