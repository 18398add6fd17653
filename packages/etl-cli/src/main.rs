//! Batch runner for the region enrichment step.
//!
//! Reads a JSON array of provider records, applies the Mongo-backed region
//! lookup when `USE_MONGO_FOR_REGION=1`, and writes the enriched records
//! back out along with a run report on stderr via tracing.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use enrichment::{
    BatchReport, EnrichmentConfig, MongoRegionSource, ProviderRecord, RegionEnricher,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "enrich-regions")]
#[command(about = "Region enrichment step for the insurance data mart ETL")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a batch of provider records
    Run {
        /// Path to a JSON array of provider records
        #[arg(long)]
        input: PathBuf,

        /// Where to write the enriched records (stdout when omitted)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Validate the enrichment environment without connecting
    CheckConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,enrichment=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Run { input, output } => run(&input, output.as_deref()).await,
        Commands::CheckConfig => check_config(),
    }
}

async fn run(input: &Path, output: Option<&Path>) -> Result<()> {
    // Fatal before any record is touched; soft failures never reach here.
    let config =
        EnrichmentConfig::from_env().context("Failed to load enrichment configuration")?;

    let mut records = read_records(input)?;
    tracing::info!(count = records.len(), "Loaded provider records");

    let report = enrich(&config, &mut records).await?;
    let stats = report.stats;
    tracing::info!(
        hits = stats.hits,
        misses = stats.misses,
        failures = stats.failures,
        skipped = stats.skipped,
        "Enrichment complete"
    );
    if stats.failures > 0 {
        tracing::warn!(
            failures = stats.failures,
            "Some lookups failed; affected records kept their existing region"
        );
    }

    write_records(&records, output)?;
    Ok(())
}

async fn enrich(config: &EnrichmentConfig, records: &mut [ProviderRecord]) -> Result<BatchReport> {
    match (&config.target, config.enabled) {
        (Some(target), true) => {
            let source = MongoRegionSource::connect(target, config.lookup_timeout())
                .await
                .context("Failed to build Mongo region source")?;
            let enricher = RegionEnricher::new(config.clone(), source);
            Ok(enricher.enrich_batch(records).await)
        }
        _ => {
            tracing::info!("Region enrichment disabled, records pass through unchanged");
            let enricher = RegionEnricher::<MongoRegionSource>::disabled(config.clone());
            Ok(enricher.enrich_batch(records).await)
        }
    }
}

fn check_config() -> Result<()> {
    let config =
        EnrichmentConfig::from_env().context("Enrichment configuration is invalid")?;

    let summary = serde_json::json!({
        "enabled": config.enabled,
        "database": config.target.as_ref().map(|t| &t.database),
        "collection": config.target.as_ref().map(|t| &t.collection),
        "lookup_timeout_ms": config.lookup_timeout_ms,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn read_records(input: &Path) -> Result<Vec<ProviderRecord>> {
    let raw = std::fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    serde_json::from_str(&raw).context("Input is not a JSON array of provider records")
}

fn write_records(records: &[ProviderRecord], output: Option<&Path>) -> Result<()> {
    let rendered = serde_json::to_string_pretty(records)?;
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => println!("{rendered}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_records_accepts_missing_region() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(
            &path,
            r#"[{"provider_id":"P1","network_tier":"gold"},
               {"provider_id":"P2","network_tier":"silver","region":"eu-west"}]"#,
        )
        .unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].region, "");
        assert_eq!(records[1].region, "eu-west");
    }

    #[test]
    fn read_records_rejects_non_array_input() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.json");
        std::fs::write(&path, r#"{"provider_id":"P1"}"#).unwrap();

        assert!(read_records(&path).is_err());
    }

    #[test]
    fn write_records_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let records = vec![ProviderRecord::new("P1", "gold", "us-east")];

        write_records(&records, Some(&path)).unwrap();
        let reread = read_records(&path).unwrap();
        assert_eq!(reread, records);
    }

    #[tokio::test]
    async fn disabled_config_passes_records_through() {
        let config = EnrichmentConfig::disabled();
        let mut records = vec![ProviderRecord::new("P1", "gold", "eu-west")];

        let report = enrich(&config, &mut records).await.unwrap();
        assert_eq!(report.stats.skipped, 1);
        assert_eq!(records[0].region, "eu-west");
    }
}
