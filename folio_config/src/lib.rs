use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{
    format::{Item, StrftimeItems},
    FixedOffset, Offset, Utc,
};
use config::{File, FileFormat};
use serde::Deserialize;

pub use duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Loads the configuration from the given TOML files. Values in later files
/// override values in earlier ones.
pub fn load(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Like [`load`], but additionally applies the given TOML snippets on top of
/// the files, e.g. `contact.delivery_delay = "0s"`.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, snippet| {
            builder.add_source(File::from_str(snippet, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub archive_key: String,
    pub delivery_delay: Duration,
    pub notice_ttl: Duration,
    pub timestamp_format: TimestampFormat,
    #[serde(default)]
    pub timezone: Timezone,
    pub export_prefix: String,
}

/// A chrono strftime format string that is known to render without errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFormat(pub String);

impl<'de> Deserialize<'de> for TimestampFormat {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.trim().is_empty() {
            return Err(serde::de::Error::custom("Timestamp format must not be empty"));
        }
        if StrftimeItems::new(&s).any(|item| item == Item::Error) {
            return Err(serde::de::Error::custom(format!(
                "Invalid timestamp format: {s:?}"
            )));
        }
        Ok(Self(s))
    }
}

/// Timezone of rendered message timestamps: `"local"`, `"utc"` or a fixed
/// offset such as `"+02:00"`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Timezone {
    #[default]
    Local,
    Fixed(FixedOffset),
}

impl Timezone {
    /// The fixed offset, `None` for the local timezone of the host.
    pub fn offset(self) -> Option<FixedOffset> {
        match self {
            Self::Local => None,
            Self::Fixed(offset) => Some(offset),
        }
    }
}

impl<'de> Deserialize<'de> for Timezone {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.trim() {
            s if s.eq_ignore_ascii_case("local") => Ok(Self::Local),
            s if s.eq_ignore_ascii_case("utc") => Ok(Self::Fixed(Utc.fix())),
            s => s
                .parse()
                .map(Self::Fixed)
                .map_err(|_| serde::de::Error::custom(format!("Invalid timezone: {s:?}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_config() {
        let config = load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();

        assert_eq!(config.contact.archive_key, "portfolioMessages");
        assert_eq!(*config.contact.delivery_delay, std::time::Duration::from_secs(2));
        assert_eq!(*config.contact.notice_ttl, std::time::Duration::from_secs(5));
        assert_eq!(config.contact.export_prefix, "portfolio_messages");
    }

    #[test]
    fn override_values() {
        let config = load_with_override(
            &[Path::new(DEFAULT_CONFIG_PATH)],
            &[
                "contact.delivery_delay = \"0s\"",
                "storage.path = \"/tmp/folio.json\"",
            ],
        )
        .unwrap();

        assert_eq!(*config.contact.delivery_delay, std::time::Duration::ZERO);
        assert_eq!(config.storage.path, Path::new("/tmp/folio.json"));
    }

    #[test]
    fn missing_file() {
        let err = load(&[Path::new("/this/config/does/not/exist.toml")]).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn timezone() {
        for (input, expected) in [
            ("local", Some(Timezone::Local)),
            ("UTC", Some(Timezone::Fixed(Utc.fix()))),
            ("+02:00", Some(Timezone::Fixed(FixedOffset::east_opt(2 * 3600).unwrap()))),
            ("-04:00", Some(Timezone::Fixed(FixedOffset::west_opt(4 * 3600).unwrap()))),
            ("Mars/Olympus", None),
            ("", None),
        ] {
            let input = serde_json::Value::String(input.into());
            assert_eq!(serde_json::from_value::<Timezone>(input).ok(), expected);
        }

        let config = load(&[Path::new(DEFAULT_CONFIG_PATH)]).unwrap();
        assert_eq!(config.contact.timezone, Timezone::Local);
    }

    #[test]
    fn timestamp_format() {
        for (input, ok) in [
            ("%Y-%m-%d %H:%M:%S", true),
            ("%-m/%-d/%Y, %-I:%M:%S %p", true),
            ("", false),
            ("  ", false),
            ("%Q", false),
        ] {
            let input = serde_json::Value::String(input.into());
            assert_eq!(
                serde_json::from_value::<TimestampFormat>(input).is_ok(),
                ok
            );
        }
    }
}
