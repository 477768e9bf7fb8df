//! Global configuration parsing and validation.

use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;

use crate::{AppError, Result};

fn default_slot_prefix() -> String {
    "TweetStickers".into()
}

fn default_timezone() -> String {
    "Europe/Berlin".into()
}

fn default_db_path() -> PathBuf {
    PathBuf::from("data/tweetpress.db")
}

/// Locations of the fixed render inputs: band templates, fonts, and the
/// pictures used when a user has no reachable profile photo.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct AssetConfig {
    /// Directory containing `header.png`, `body.png`, `footer.png`, and
    /// `verified.png`.
    pub templates_dir: PathBuf,
    /// Heavy-weight font used for the display name.
    pub font_heavy: PathBuf,
    /// Semi-bold font used for body text, handle, and footer.
    pub font_semi_bold: PathBuf,
    /// Picture substituted when the user has no profile photo.
    pub fallback_picture: PathBuf,
    /// Image uploaded to seed a slot that does not exist yet.
    pub seed_picture: PathBuf,
}

impl AssetConfig {
    /// Path of the header band template.
    #[must_use]
    pub fn header_template(&self) -> PathBuf {
        self.templates_dir.join("header.png")
    }

    /// Path of the body band template.
    #[must_use]
    pub fn body_template(&self) -> PathBuf {
        self.templates_dir.join("body.png")
    }

    /// Path of the footer band template.
    #[must_use]
    pub fn footer_template(&self) -> PathBuf {
        self.templates_dir.join("footer.png")
    }

    /// Path of the verified-badge overlay.
    #[must_use]
    pub fn verified_template(&self) -> PathBuf {
        self.templates_dir.join("verified.png")
    }
}

/// Sticker publication settings.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct StickerConfig {
    /// Prefix for per-owner slot identifiers.
    #[serde(default = "default_slot_prefix")]
    pub slot_prefix: String,
    /// IANA timezone applied to footer timestamps when the request does not
    /// carry one.
    #[serde(default = "default_timezone")]
    pub default_timezone: String,
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Location of the `SQLite` database file.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    /// Render asset locations.
    pub assets: AssetConfig,
    /// Publication settings.
    #[serde(default)]
    pub sticker: StickerConfig,
}

impl Default for StickerConfig {
    fn default() -> Self {
        Self {
            slot_prefix: default_slot_prefix(),
            default_timezone: default_timezone(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// The default footer timezone.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the configured name is not a valid IANA
    /// timezone; `validate` rejects such configs up front, so this only fails
    /// on a hand-built config struct.
    pub fn timezone(&self) -> Result<Tz> {
        self.sticker
            .default_timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Config(format!("invalid timezone: {err}")))
    }

    /// Slot identifier for one owner.
    #[must_use]
    pub fn slot_for(&self, owner_user_id: &str) -> String {
        format!("{}_{owner_user_id}", self.sticker.slot_prefix)
    }

    fn validate(&self) -> Result<()> {
        if self.sticker.slot_prefix.is_empty() {
            return Err(AppError::Config("slot_prefix must not be empty".into()));
        }
        self.sticker
            .default_timezone
            .parse::<Tz>()
            .map_err(|err| AppError::Config(format!("invalid default_timezone: {err}")))?;
        Ok(())
    }
}
