//! CLI runner - executes commands

use crate::auth::BearerTokenAuthenticator;
use crate::cli::commands::{Cli, Mode, OutputFormat, CONFIG_FROM_ENV};
use crate::config::TapConfig;
use crate::engine::{SyncConfig, SyncEngine};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::output::MessageWriter;
use crate::streams::{
    builtin_streams, discover_openapi, load_openapi, select_by_name, Catalog, StreamDescriptor,
};
use serde_json::{json, Value};
use std::io::{self, BufWriter, Write};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;
use url::Url;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command against stdout
    pub async fn run(&self) -> Result<()> {
        self.run_to(BufWriter::new(io::stdout())).await
    }

    /// Run the CLI command, writing its output to `out`
    pub async fn run_to<W: Write>(&self, mut out: W) -> Result<()> {
        match self.cli.mode() {
            Mode::About => self.about(&mut out),
            Mode::Discover => self.discover(&mut out),
            Mode::Sync => self.sync(out).await,
        }
    }

    /// Load settings from `--config`
    fn load_config(&self) -> Result<TapConfig> {
        let path = self
            .cli
            .config
            .as_ref()
            .ok_or_else(|| Error::config("Config file not specified (use --config)"))?;

        if path.as_os_str() == CONFIG_FROM_ENV {
            TapConfig::from_env()
        } else {
            TapConfig::from_file(path)
        }
    }

    /// Streams the tap can serve
    fn available_streams(&self) -> Result<Vec<StreamDescriptor>> {
        match &self.cli.openapi {
            Some(path) => {
                let doc = load_openapi(path)?;
                let streams = discover_openapi(&doc)?;
                info!(
                    "Discovered {} streams from {}",
                    streams.len(),
                    path.display()
                );
                Ok(streams)
            }
            None => builtin_streams(),
        }
    }

    /// Streams to sync after catalog and name filters
    fn selected_streams(&self) -> Result<Vec<StreamDescriptor>> {
        let mut streams = self.available_streams()?;

        if let Some(path) = &self.cli.catalog {
            streams = Catalog::from_file(path)?.resolve(&streams)?;
        }
        if !self.cli.streams.is_empty() {
            streams = select_by_name(&streams, &self.cli.streams)?;
        }

        Ok(streams)
    }

    /// Print tap metadata
    fn about<W: Write>(&self, out: &mut W) -> Result<()> {
        let streams: Vec<String> = self
            .available_streams()?
            .into_iter()
            .map(|s| s.name)
            .collect();

        let about = json!({
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "capabilities": ["about", "catalog", "discover"],
            "settings": TapConfig::json_schema(),
            "streams": streams,
        });
        self.output_message(out, &about)
    }

    /// Print the catalog
    fn discover<W: Write>(&self, out: &mut W) -> Result<()> {
        let catalog = Catalog::from_streams(&self.available_streams()?);
        self.output_message(out, &catalog.to_json())
    }

    /// Sync the selected streams one after another
    async fn sync<W: Write>(&self, out: W) -> Result<()> {
        let sync_start = Instant::now();
        let config = self.load_config()?;
        let streams = self.selected_streams()?;

        let authenticator = BearerTokenAuthenticator::from_config(&config);
        let client = HttpClient::with_auth(
            HttpClientConfig::from_tap_config(&config),
            Arc::new(authenticator),
        )?;

        let mut sync_config = SyncConfig::from_env()?;
        if let Some(max) = self.cli.max_records {
            sync_config = sync_config.with_max_records(max);
        }
        if let Some(url) = &self.cli.base_url {
            Url::parse(url)?;
            sync_config = sync_config.with_base_url(url);
        }

        let mut engine = SyncEngine::new(client, &config.subdomain).with_config(sync_config);
        let mut writer = MessageWriter::new(out);

        for stream in &streams {
            engine.sync_stream(stream, &mut writer).await?;
        }

        let stats = engine.stats();
        info!(
            "Sync complete: {} streams, {} records, {} pages in {:.1}s",
            stats.streams_synced,
            stats.records_synced,
            stats.pages_fetched,
            sync_start.elapsed().as_secs_f64()
        );

        Ok(())
    }

    /// Output a message
    fn output_message<W: Write>(&self, out: &mut W, msg: &Value) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => serde_json::to_writer(&mut *out, msg)?,
            OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, msg)?,
        }
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}
