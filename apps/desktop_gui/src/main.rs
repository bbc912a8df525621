use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::Context as _;
use clap::Parser;
use client_core::{ClientConfig, RecruitForm};
use crossbeam_channel::bounded;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{commands::BackendCommand, runtime};
use crate::controller::events::UiEvent;
use crate::ui::{app::APP_TITLE, fonts, RecruitApp};

const COMMAND_QUEUE_CAPACITY: usize = 256;
const EVENT_QUEUE_CAPACITY: usize = 2048;
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Parser)]
#[command(name = "recruit-desktop", about = "Recruitment application form")]
struct Args {
    /// Backend base URL, overriding the config file and environment.
    #[arg(long)]
    base_url: Option<String>,
    /// TOML config file; defaults to ./recruit.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// tracing filter directive; falls back to RUST_LOG, then "info".
    #[arg(long)]
    log_filter: Option<String>,
    /// Font file with CJK glyphs, tried before the system fonts.
    #[arg(long)]
    cjk_font: Option<PathBuf>,
}

fn log_filter(explicit: Option<&str>) -> EnvFilter {
    match explicit {
        Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|err| {
            eprintln!("invalid --log-filter {directive:?}: {err}; using {DEFAULT_LOG_FILTER}");
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    }
}

fn resolve_config(args: &Args) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::load(args.config.as_deref())?;
    if let Some(base_url) = &args.base_url {
        config
            .set_base_url(base_url)
            .context("invalid --base-url")?;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(args.log_filter.as_deref()))
        .init();

    let config = resolve_config(&args)?;
    tracing::info!(
        base_url = config.base_url(),
        stale_majors = ?config.stale_majors,
        "client configuration resolved"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    runtime::launch(cmd_rx, ui_tx, &config).context("failed to spawn backend worker thread")?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([560.0, 820.0])
            .with_min_inner_size([400.0, 560.0]),
        ..Default::default()
    };
    let cjk_font = args.cjk_font.clone();
    let form = RecruitForm::new(config.stale_majors);
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| {
            fonts::install_cjk_font(&cc.egui_ctx, cjk_font.as_deref());
            Ok(Box::new(RecruitApp::new(cmd_tx, ui_rx, form)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("desktop window failed: {err}"))
}

#[cfg(test)]
mod tests {
    use client_core::StaleMajorPolicy;

    use super::*;

    #[test]
    fn parses_all_flags() {
        let args = Args::try_parse_from([
            "recruit-desktop",
            "--base-url",
            "http://localhost:8080/interfaces/main",
            "--config",
            "custom.toml",
            "--log-filter",
            "debug",
            "--cjk-font",
            "/tmp/font.ttc",
        ])
        .expect("valid args");
        assert_eq!(
            args.base_url.as_deref(),
            Some("http://localhost:8080/interfaces/main")
        );
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
        assert_eq!(args.log_filter.as_deref(), Some("debug"));
        assert_eq!(args.cjk_font, Some(PathBuf::from("/tmp/font.ttc")));
    }

    #[test]
    fn base_url_flag_overrides_config_file() {
        let dir = std::env::temp_dir().join(format!("recruit-gui-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("recruit.toml");
        std::fs::write(
            &path,
            "base_url = \"http://file.example/api\"\nstale_majors = \"last-arrival-wins\"\n",
        )
        .expect("write config");

        let args = Args::try_parse_from([
            "recruit-desktop",
            "--config",
            path.to_str().expect("utf-8 path"),
            "--base-url",
            "https://flag.example/interfaces/main/",
        ])
        .expect("valid args");
        let config = resolve_config(&args).expect("config");
        assert_eq!(config.base_url(), "https://flag.example/interfaces/main");
        assert_eq!(config.stale_majors, StaleMajorPolicy::LastArrivalWins);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn rejects_invalid_base_url_flag() {
        let args = Args::try_parse_from(["recruit-desktop", "--base-url", "not a url"])
            .expect("valid args");
        assert!(resolve_config(&args).is_err());
    }
}
