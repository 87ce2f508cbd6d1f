// ============================================================================
// API Client : Yahoo Finance
// ============================================================================
// Récupère les clôtures journalières d'un indice sur une plage de dates
// et les convertit en YearSeries.
//
// CONCEPTS RUST AVANCÉS :
// 1. async/await : l'appel HTTP est asynchrone (runtime tokio)
// 2. Result<T, E> : gestion d'erreurs avec contexte (anyhow)
// 3. Serde : désérialisation JSON automatique
// ============================================================================

use anyhow::{Context, Result};
use chrono::{DateTime, Datelike, NaiveDate};
use serde::Deserialize;
use tracing::{debug, error, info, instrument, warn};

use crate::models::{PricePoint, YearSeries};

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

// ============================================================================
// Structures pour parser la réponse JSON de Yahoo Finance
// ============================================================================
// Seuls les champs utiles sont déclarés : serde ignore le reste.
// ============================================================================

/// Réponse complète de l'API Yahoo Finance
#[derive(Debug, Deserialize)]
struct YahooResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Meta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

/// Métadonnées du symbole
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Meta {
    symbol: String,
    /// Décalage de la place de cotation par rapport à UTC, en secondes
    /// (ex: 3600 pour Paris en hiver)
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

/// Seule la clôture nous intéresse
#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

// ============================================================================
// Fonctions publiques de l'API
// ============================================================================

/// Récupère les clôtures journalières de `symbol` pour l'année `year`,
/// entre `start` (inclus) et `end` (exclu)
///
/// # Arguments
/// * `symbol` - Symbole Yahoo (ex: "^FCHI")
/// * `year` - Année calendaire de la série produite
/// * `start` / `end` - Bornes de la plage ; les jours hors de `year` sont ignorés
///
/// # Exemple
/// let (start, end) = config.candidate_range(2001).unwrap();
/// let series = fetch_daily_closes("^FCHI", 2001, start, end).await?;
#[instrument(skip(start, end), fields(start = %start, end = %end))]
pub async fn fetch_daily_closes(
    symbol: &str,
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<YearSeries> {
    let url = build_yahoo_url(symbol, start, end);
    debug!(url = %url, "Built Yahoo Finance API URL");

    // User-Agent de navigateur : Yahoo bloque les clients sans User-Agent
    let client = reqwest::Client::builder()
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()
        .context("Échec de la création du client HTTP")?;

    debug!("Sending HTTP request to Yahoo Finance");
    let response = client
        .get(&url)
        .send()
        .await
        .context("Échec de la requête HTTP vers Yahoo Finance")?;

    let status = response.status();
    debug!(status = %status, "Received HTTP response");

    if !status.is_success() {
        error!(status = %status, "Yahoo Finance returned error status");
        anyhow::bail!("Yahoo Finance a retourné une erreur : HTTP {}", status);
    }

    let yahoo_response: YahooResponse = response
        .json()
        .await
        .context("Échec du parsing JSON de la réponse Yahoo")?;

    let series = parse_yahoo_response(yahoo_response, symbol, year, start, end)?;

    info!(days = series.len(), "Successfully fetched daily closes");
    Ok(series)
}

/// Construit l'URL de l'API chart, intervalle journalier
///
/// Les bornes sont converties en timestamps Unix à minuit UTC.
fn build_yahoo_url(symbol: &str, start: NaiveDate, end: NaiveDate) -> String {
    let period1 = midnight_timestamp(start);
    let period2 = midnight_timestamp(end);

    format!(
        "{}/{}?interval=1d&period1={}&period2={}",
        YAHOO_CHART_URL,
        encode_symbol(symbol),
        period1,
        period2
    )
}

/// Encode le '^' des indices (ex: ^FCHI → %5EFCHI)
fn encode_symbol(symbol: &str) -> String {
    symbol.replace('^', "%5E")
}

fn midnight_timestamp(date: NaiveDate) -> i64 {
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or_default()
}

/// Convertit la réponse Yahoo en YearSeries
///
/// - les jours sans clôture (null) sont ignorés
/// - les dates sont celles de la place de cotation (timestamp + gmtoffset)
/// - les jours hors de [start, end) ou hors de `year` sont ignorés
/// - un doublon de date garde la première valeur
fn parse_yahoo_response(
    yahoo_response: YahooResponse,
    symbol: &str,
    year: i32,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<YearSeries> {
    if let Some(err) = yahoo_response.chart.error {
        error!(error = %err, "Yahoo Finance returned an API error");
        anyhow::bail!("Erreur Yahoo Finance pour {} : {}", symbol, err);
    }

    let result = yahoo_response
        .chart
        .result
        .unwrap_or_default()
        .into_iter()
        .next()
        .context("Aucune donnée retournée par Yahoo Finance")?;

    debug!(symbol = %result.meta.symbol, "Parsing chart result");
    let offset = result.meta.gmtoffset.unwrap_or(0);

    let timestamps = result.timestamp.unwrap_or_default();
    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .context("Pas de cotations dans la réponse")?
        .close
        .unwrap_or_default();

    let mut points = Vec::with_capacity(timestamps.len());
    let mut skipped_count = 0;
    for (i, &timestamp) in timestamps.iter().enumerate() {
        let close = match closes.get(i).and_then(|&v| v) {
            Some(v) => v,
            None => {
                skipped_count += 1;
                continue;
            }
        };

        let date = DateTime::from_timestamp(timestamp + offset, 0)
            .context("Timestamp invalide")?
            .date_naive();

        if date < start || date >= end || date.year() != year {
            debug!(%date, "Ignoring day outside requested range");
            continue;
        }

        points.push(PricePoint::new(date, close));
    }

    if skipped_count > 0 {
        warn!(
            skipped = skipped_count,
            total = timestamps.len(),
            "Skipped days with missing close"
        );
    }

    // CONCEPT RUST : dedup_by_key
    // - Supprime les doublons consécutifs (d'où le tri préalable)
    // - sort_by_key est stable : le premier doublon est conservé
    points.sort_by_key(|p| p.date);
    let before = points.len();
    points.dedup_by_key(|p| p.date);
    if points.len() != before {
        warn!(duplicates = before - points.len(), "Dropped duplicate trading days");
    }

    if points.is_empty() {
        error!("No valid close found");
        anyhow::bail!("Aucune clôture valide pour {} en {}", symbol, year);
    }

    YearSeries::new(year, points)
        .with_context(|| format!("Série invalide pour {} en {}", symbol, year))
}

// ============================================================================
// Tests unitaires
// ============================================================================
