use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use chrono_tz::Tz;
use clap::{Args, Parser, Subcommand};
use engine::Granularity;
use serde::Deserialize;

use crate::{
    error::{DashboardError, Result},
    view::{DEFAULT_PAGE_SIZE, PAGE_SIZES},
};

const DEFAULT_CONFIG_PATH: &str = "config/dashboard.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub base_url: String,
    pub timezone: String,
    pub page_size: usize,
    pub level: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            timezone: "Europe/Rome".to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            level: "info".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| DashboardError::Validation(format!("unknown timezone {:?}", self.timezone)))
    }

    /// Current calendar date in the configured timezone.
    pub fn today(&self) -> Result<NaiveDate> {
        Ok(Utc::now().with_timezone(&self.timezone()?).date_naive())
    }

    fn validate(&self) -> Result<()> {
        if !PAGE_SIZES.contains(&self.page_size) {
            return Err(DashboardError::Validation(format!(
                "page_size must be one of {PAGE_SIZES:?}"
            )));
        }
        self.timezone()?;
        Ok(())
    }
}

#[derive(Debug, Parser)]
#[command(name = "bursar_dashboard", disable_version_flag = true)]
pub struct Cli {
    /// Optional config file path (TOML).
    #[arg(long)]
    pub config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:3000).
    #[arg(long)]
    pub base_url: Option<String>,
    /// Override timezone (IANA name).
    #[arg(long)]
    pub timezone: Option<String>,
    /// Override rows per page.
    #[arg(long)]
    pub page_size: Option<usize>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print overall totals, the period breakdown and the period cards.
    Summary(Window),
    /// Write CSV tables and the print document to a directory.
    Export {
        #[command(flatten)]
        window: Window,
        #[arg(long)]
        dir: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
pub struct Window {
    /// First day included (YYYY-MM-DD).
    #[arg(long)]
    pub from: Option<NaiveDate>,
    /// Last day included (YYYY-MM-DD).
    #[arg(long)]
    pub to: Option<NaiveDate>,
    /// `month` or `year`.
    #[arg(long, default_value = "month")]
    pub granularity: Granularity,
}

pub fn load(cli: &Cli) -> Result<DashboardConfig> {
    let config_path = cli.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("BURSAR_DASHBOARD"));
    let mut settings: DashboardConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(timezone) = &cli.timezone {
        settings.timezone = timezone.clone();
    }
    if let Some(page_size) = cli.page_size {
        settings.page_size = page_size;
    }

    settings.validate()?;
    Ok(settings)
}
