//! Configuration file handling for the vehicle ledger.
//!
//! The configuration file is stored at `$VLEDGER_HOME/config.json`. It holds the display locale,
//! paging sizes, the base currency and exchange-rate overrides. The records themselves live next
//! to it in `ledger.json`.

use crate::currency::{ExchangeRates, BASE_CURRENCY};
use crate::i18n::Locale;
use crate::model::Ledger;
use crate::{utils, Result};
use anyhow::{bail, ensure, Context};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

const APP_NAME: &str = "vehicle-ledger";
const CONFIG_VERSION: u8 = 1;
const CONFIG_JSON: &str = "config.json";
const LEDGER_JSON: &str = "ledger.json";
const EXPORTS: &str = "exports";
const PAGE_SIZE: usize = 20;
const FETCH_SIZE: usize = 50;

/// The `Config` object represents the configuration of the app. You instantiate it by providing
/// the path to `$VLEDGER_HOME` and from there it loads `$VLEDGER_HOME/config.json`. It provides
/// paths to the ledger file and the export directory.
#[derive(Debug, Clone)]
pub struct Config {
    root: PathBuf,
    config_path: PathBuf,
    ledger_path: PathBuf,
    export_dir: PathBuf,
    config_file: ConfigFile,
}

impl Config {
    /// Creates the home directory with a default `config.json`, an empty `ledger.json` and the
    /// export directory. An existing ledger is left alone.
    ///
    /// # Errors
    /// - Returns an error if any file operations fail.
    pub async fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = dir.into();
        utils::make_dir(&maybe_relative)
            .await
            .context("Unable to create the vehicle ledger home directory")?;
        let root = utils::canonicalize(&maybe_relative).await?;

        let config_path = root.join(CONFIG_JSON);
        let config_file = ConfigFile::default();
        config_file.save(&config_path).await?;

        let ledger_path = root.join(LEDGER_JSON);
        if ledger_path.is_file() {
            debug!("Keeping the existing ledger at {}", ledger_path.display());
        } else {
            utils::serialize(&ledger_path, &Ledger::default())
                .await
                .context("Unable to create the ledger file")?;
        }

        let export_dir = config_file.export_dir(&root);
        utils::make_dir(&export_dir).await?;

        Ok(Self {
            root,
            config_path,
            ledger_path,
            export_dir,
            config_file,
        })
    }

    /// This will
    /// - validate that the home directory and the config file exist
    /// - load and validate the config file
    /// - return the loaded configuration object
    pub async fn load(home: impl Into<PathBuf>) -> Result<Self> {
        let maybe_relative = home.into();
        let root = utils::canonicalize(&maybe_relative)
            .await
            .context("The vehicle ledger home is missing, run 'vledger init' first")?;
        let _ = utils::read_dir(&root).await?;

        let config_path = root.join(CONFIG_JSON);
        if !config_path.is_file() {
            bail!("The config file is missing '{}'", config_path.display())
        }
        let config_file = ConfigFile::load(&config_path).await?;
        let export_dir = config_file.export_dir(&root);

        Ok(Self {
            ledger_path: root.join(LEDGER_JSON),
            root,
            config_path,
            export_dir,
            config_file,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn ledger_path(&self) -> &Path {
        &self.ledger_path
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn locale(&self) -> Locale {
        self.config_file.locale
    }

    pub fn page_size(&self) -> usize {
        self.config_file.page_size
    }

    pub fn fetch_size(&self) -> usize {
        self.config_file.fetch_size
    }

    /// The default exchange rates with the overrides from the config file applied.
    pub fn exchange_rates(&self) -> ExchangeRates {
        ExchangeRates::new(
            &self.config_file.base_currency,
            &self.config_file.exchange_rates,
        )
    }

    /// Reads the records from `ledger.json`.
    pub async fn load_ledger(&self) -> Result<Ledger> {
        if !self.ledger_path.is_file() {
            bail!("The ledger file is missing '{}'", self.ledger_path.display())
        }
        let ledger: Ledger = utils::deserialize(&self.ledger_path).await?;
        debug!(
            "Loaded {} vehicles, {} fuel entries, {} expenses and {} incomes",
            ledger.vehicles().len(),
            ledger.fuel().len(),
            ledger.expenses().len(),
            ledger.incomes().len()
        );
        Ok(ledger)
    }

    /// Replaces the contents of `ledger.json`.
    pub async fn save_ledger(&self, ledger: &Ledger) -> Result<()> {
        utils::serialize(&self.ledger_path, ledger)
            .await
            .context("Unable to save the ledger")
    }
}

/// Represents the serialization and deserialization format of the configuration file.
///
/// Example configuration:
/// ```json
/// {
///   "app_name": "vehicle-ledger",
///   "config_version": 1,
///   "locale": "zh",
///   "page_size": 20,
///   "fetch_size": 50,
///   "base_currency": "USD",
///   "exchange_rates": { "EUR": "0.91" },
///   "export_dir": "exports"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
struct ConfigFile {
    /// Application name, should always be "vehicle-ledger"
    app_name: String,

    /// Configuration file version
    config_version: u8,

    /// Language for column headers and labels
    #[serde(default)]
    locale: Locale,

    /// Records revealed per load-more step
    #[serde(default = "default_page_size")]
    page_size: usize,

    /// Records delivered per fetch from the record source
    #[serde(default = "default_fetch_size")]
    fetch_size: usize,

    /// The currency that cross-currency totals are reported in
    #[serde(default = "default_base_currency")]
    base_currency: String,

    /// Units per USD, replacing the built-in rate for each listed code
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    exchange_rates: BTreeMap<String, Decimal>,

    /// Where CSV exports are written (optional, relative to the home directory or absolute).
    /// Defaults to $VLEDGER_HOME/exports if not specified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    export_dir: Option<PathBuf>,
}

fn default_page_size() -> usize {
    PAGE_SIZE
}

fn default_fetch_size() -> usize {
    FETCH_SIZE
}

fn default_base_currency() -> String {
    BASE_CURRENCY.to_string()
}

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            app_name: APP_NAME.to_string(),
            config_version: CONFIG_VERSION,
            locale: Locale::default(),
            page_size: PAGE_SIZE,
            fetch_size: FETCH_SIZE,
            base_currency: default_base_currency(),
            exchange_rates: BTreeMap::new(),
            export_dir: None,
        }
    }
}

impl ConfigFile {
    /// Loads a ConfigFile asynchronously from the specified path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if it fails validation
    async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: ConfigFile = utils::deserialize(path)
            .await
            .with_context(|| format!("Failed to load config file at {}", path.display()))?;

        ensure!(
            config.app_name == APP_NAME,
            "Invalid app_name in config file: expected '{}', got '{}'",
            APP_NAME,
            config.app_name
        );
        ensure!(config.page_size > 0, "page_size must be greater than zero");
        ensure!(config.fetch_size > 0, "fetch_size must be greater than zero");

        Ok(config)
    }

    /// Saves the ConfigFile to the specified path.
    async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        utils::serialize(path.as_ref(), self)
            .await
            .context("Unable to write config file")
    }

    /// Resolves the export directory against `root` when it is relative.
    fn export_dir(&self, root: &Path) -> PathBuf {
        match &self.export_dir {
            Some(p) if p.is_absolute() => p.clone(),
            Some(p) => root.join(p),
            None => root.join(EXPORTS),
        }
    }
}
