mod closing_date;
mod schema;
mod validation;

pub use closing_date::ClosingDate;
pub use schema::{Config, EventConfig, PublisherConfig};
pub use validation::validate_config;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Get the config directory path (~/.config/maprun-league/)
pub fn get_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".config").join("maprun-league"))
}

/// Resolve which config file to read when none is given explicitly.
///
/// `./config.yaml` wins over `~/.config/maprun-league/config.yaml`.
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    get_config_dir()
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .filter(|p| p.exists())
        .unwrap_or(local)
}

/// Load configuration from a YAML file
///
/// # Errors
///
/// Returns an error if:
/// - The config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = path.unwrap_or_else(default_config_path);

    if !config_path.exists() {
        anyhow::bail!(
            "Config file not found at {}. Run `maprun-league init` to create one",
            config_path.display()
        );
    }

    let config_content = std::fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content).with_context(|| {
        format!("Failed to parse config: invalid YAML in {}", config_path.display())
    })?;

    Ok(config)
}

/// Starter configuration written by `maprun-league init`.
pub fn starter_config() -> Config {
    use chrono::NaiveDate;

    let event = |name: &str, y: i32, m: u32, d: u32| EventConfig {
        name: name.to_string(),
        closing_date: ClosingDate::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
        ),
    };

    Config {
        scoring: crate::league::ScoringConfig::default(),
        events: vec![
            event("Example Event 1", 2025, 1, 31),
            event("Example Event 2", 2025, 2, 28),
        ],
        publisher: PublisherConfig {
            enabled: false,
            url: "https://example.org/node/1".to_string(),
            username: "editor".to_string(),
            password: None,
        },
    }
}

/// Write the starter configuration to `path`, refusing to clobber an
/// existing file.
pub fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Refusing to overwrite existing config at {}", path.display());
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory at {}", parent.display()))?;
    }

    let yaml = serde_saphyr::to_string(&starter_config())
        .context("Failed to serialize starter config")?;

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(yaml.as_bytes())
        .context("Failed to write starter config")?;
    file.commit().context("Failed to save starter config")?;

    Ok(())
}
