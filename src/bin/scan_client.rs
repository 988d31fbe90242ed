//! Command-line client for the recycle scan service.
//!
//! Picks images from disk, runs them through analysis, uploads them and
//! records scan history.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use recycle_scan_core::client::{AnalysisClient, ClientConfig, ScanHistoryClient, UploadClient};
use recycle_scan_core::features::scan_results::dtos::CreateScanResultDto;
use serde_json::{json, Value};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "scan-client")]
#[command(about = "Analyze, upload and record scans against the recycle scan service")]
#[command(version)]
struct Cli {
    /// Base URL serving uploads and scan history
    #[arg(long, global = true, env = "SCAN_API_BASE_URL")]
    api_url: Option<String>,

    /// Base URL serving the analysis endpoint; defaults to the scan API URL
    #[arg(long, global = true, env = "ANALYSIS_API_BASE_URL")]
    analysis_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze an image and print the analysis text
    Analyze {
        /// Image path or file:// URI
        image: String,
    },

    /// Upload an image with its recyclable classification
    Upload {
        /// Image path or file:// URI
        image: String,

        /// Whether the pictured item is recyclable
        #[arg(long, action = clap::ArgAction::Set)]
        recyclable: bool,
    },

    /// Analyze an image and record the result in the scan history
    Scan {
        /// Image path or file:// URI
        image: String,

        /// Item description; defaults to the analysis main category
        #[arg(short, long)]
        description: Option<String>,

        /// Also upload the image and reference it from the scan result
        #[arg(long)]
        upload: bool,

        /// Recyclable classification used with --upload
        #[arg(long, action = clap::ArgAction::Set)]
        recyclable: Option<bool>,

        /// Extra metadata as a JSON object
        #[arg(long)]
        metadata: Option<String>,
    },

    /// Print the scan history as JSON
    History,
}

fn client_config(cli: &Cli) -> ClientConfig {
    let mut config = ClientConfig::default();
    if let Some(url) = &cli.api_url {
        config.scan_api_base_url = url.clone();
        config.analysis_api_base_url = url.clone();
    }
    if let Some(url) = &cli.analysis_url {
        config.analysis_api_base_url = url.clone();
    }
    config
}

fn parse_metadata(raw: Option<&str>) -> Result<Option<Value>> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let value: Value = serde_json::from_str(raw).context("--metadata is not valid JSON")?;
    if !value.is_object() {
        bail!("--metadata must be a JSON object");
    }
    Ok(Some(value))
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = client_config(&cli);

    match cli.command {
        Commands::Analyze { image } => {
            let client = AnalysisClient::new(&config.analysis_api_base_url);
            let analysis = client.analyze(&image).await?;
            println!("{}", analysis);
        }
        Commands::Upload { image, recyclable } => {
            let client = UploadClient::new(&config.scan_api_base_url);
            let metadata = client.upload(&image, recyclable).await?;
            println!("{}", serde_json::to_string_pretty(&metadata)?);
        }
        Commands::Scan {
            image,
            description,
            upload,
            recyclable,
            metadata,
        } => {
            let metadata = parse_metadata(metadata.as_deref())?;
            if upload && recyclable.is_none() {
                bail!("--upload requires --recyclable <true|false>");
            }

            let analysis = AnalysisClient::new(&config.analysis_api_base_url)
                .analyze(&image)
                .await?;
            let ai_response: Value = serde_json::from_str(&analysis)
                .unwrap_or_else(|_| json!({ "analysis": analysis }));

            let item_description = description
                .or_else(|| {
                    ai_response
                        .get("mainCategory")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or_else(|| "Unknown item".to_string());

            let image_reference = match recyclable.filter(|_| upload) {
                Some(is_recyclable) => {
                    let stored = UploadClient::new(&config.scan_api_base_url)
                        .upload(&image, is_recyclable)
                        .await?;
                    Some(stored.filename)
                }
                None => None,
            };

            let scan = CreateScanResultDto {
                timestamp: None,
                item_description,
                ai_response,
                image_reference,
                metadata,
            };
            let saved = ScanHistoryClient::new(&config.scan_api_base_url)
                .submit(&scan)
                .await?;
            println!("{}", serde_json::to_string_pretty(&saved)?);
        }
        Commands::History => {
            let history = ScanHistoryClient::new(&config.scan_api_base_url)
                .fetch_history()
                .await?;
            println!("{}", serde_json::to_string_pretty(&history)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_scan() {
        let cli = Cli::parse_from([
            "scan-client",
            "--api-url",
            "http://scan:8080",
            "scan",
            "photo.jpg",
            "--upload",
            "--recyclable",
            "true",
        ]);

        let config = client_config(&cli);
        assert_eq!(config.scan_api_base_url, "http://scan:8080");
        assert_eq!(config.analysis_api_base_url, "http://scan:8080");
        match cli.command {
            Commands::Scan {
                upload, recyclable, ..
            } => {
                assert!(upload);
                assert_eq!(recyclable, Some(true));
            }
            _ => panic!("expected scan command"),
        }
    }

    #[test]
    fn test_analysis_url_overrides_scan_url() {
        let cli = Cli::parse_from([
            "scan-client",
            "--api-url",
            "http://scan:8080",
            "--analysis-url",
            "http://gpu:9000",
            "history",
        ]);

        let config = client_config(&cli);
        assert_eq!(config.scan_api_base_url, "http://scan:8080");
        assert_eq!(config.analysis_api_base_url, "http://gpu:9000");
    }

    #[test]
    fn test_parse_metadata_requires_object() {
        assert_eq!(parse_metadata(None).unwrap(), None);
        assert!(parse_metadata(Some("[1, 2]")).is_err());
        assert_eq!(
            parse_metadata(Some(r#"{"bin": "blue"}"#)).unwrap(),
            Some(json!({"bin": "blue"}))
        );
    }
}
