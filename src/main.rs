//! Downloads the attachments referenced by a chat export.
//!
//! Reads `configure.yml` from beside the executable, picks the attachments whose
//! extension is allowed, names them after message time and author, and fetches
//! them with a bounded number of parallel downloads.

mod api;
mod application;
mod config;
mod domain;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use tracing::{error, info};

use crate::api::{read_export, DownloadClient};
use crate::application::{extract_items, log_report, DownloadCoordinator, HttpDownloader};
use crate::utils::logging::{self, LogOptions};

#[derive(Debug, Parser)]
#[command(name = "chat-attachment-downloader")]
#[command(about = "Download the attachments of a DiscordChatExporter JSON export")]
#[command(version)]
struct Cli {
    /// DiscordChatExporter JSON file
    input: PathBuf,

    /// Use this configure file instead of the one next to the executable
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory the downloaded files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Enable debug log output
    #[arg(long, default_value_t = false)]
    debug: bool,

    /// Disable colored log output
    #[arg(long, default_value_t = false)]
    no_color: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let options = LogOptions {
        debug: cli.debug,
        use_color: !cli.no_color,
    };
    if let Err(err) = logging::init(options) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config_path = match cli.config {
        Some(path) => path,
        None => config::default_path()?,
    };
    let config = config::load(&config_path)?;

    info!("Read JSON...");
    let export = read_export(&cli.input)?;

    let items = extract_items(&export.messages, &config.extension_filter(), &Local);
    info!("Download {} file(s)...", items.len());

    let client = DownloadClient::new().context("failed to build HTTP client")?;
    let coordinator = DownloadCoordinator::new(
        HttpDownloader::new(client, cli.output_dir),
        config.parallel_download,
    );

    let result = coordinator.run(items).await;
    log_report(&result);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_exactly_one_input_is_required() {
        assert!(Cli::try_parse_from(["prog"]).is_err());
        assert!(Cli::try_parse_from(["prog", "a.json", "b.json"]).is_err());

        let cli = Cli::try_parse_from(["prog", "a.json"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("a.json"));
        assert_eq!(cli.output_dir, PathBuf::from("."));
        assert!(cli.config.is_none());
        assert!(!cli.debug);
    }

    #[tokio::test]
    async fn test_run_downloads_matching_attachments() {
        let mut server = mockito::Server::new_async().await;
        let _photo = server
            .mock("GET", "/photo.jpg")
            .with_status(200)
            .with_body("jpeg")
            .create_async()
            .await;
        let _gone = server
            .mock("GET", "/gone.jpg")
            .with_status(404)
            .create_async()
            .await;

        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(config::FILE_NAME);
        std::fs::write(&config_path, "parallelDownload: 2\ndownloadExtension: [jpg]\n").unwrap();

        let export = serde_json::json!({
            "messages": [{
                "timestamp": "2020-04-01T22:54:21Z",
                "author": { "id": "42", "isBot": false },
                "attachments": [
                    { "fileName": "photo.jpg", "url": format!("{}/photo.jpg", server.url()) },
                    { "fileName": "gone.jpg", "url": format!("{}/gone.jpg", server.url()) },
                    { "fileName": "notes.txt", "url": format!("{}/notes.txt", server.url()) }
                ]
            }]
        });
        let input = dir.path().join("export.json");
        std::fs::write(&input, export.to_string()).unwrap();

        let out = dir.path().join("out");
        std::fs::create_dir(&out).unwrap();

        let cli = Cli::try_parse_from([
            "prog".into(),
            input.into_os_string(),
            "--config".into(),
            config_path.into_os_string(),
            "--output-dir".into(),
            out.clone().into_os_string(),
        ])
        .unwrap();

        run(cli).await.unwrap();

        let written: Vec<String> = std::fs::read_dir(&out)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(written.len(), 1);
        assert!(written[0].starts_with("discord_"));
        assert!(written[0].ends_with("_42_photo.jpg"));
    }

    #[tokio::test]
    async fn test_run_stops_on_bad_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join(config::FILE_NAME);
        std::fs::write(&config_path, "parallelDownload: 0\n").unwrap();

        let cli = Cli::try_parse_from([
            "prog".into(),
            dir.path().join("export.json").into_os_string(),
            "--config".into(),
            config_path.into_os_string(),
        ])
        .unwrap();

        let err = run(cli).await.unwrap_err();
        assert!(err.downcast_ref::<config::ConfigError>().is_some());
    }
}
