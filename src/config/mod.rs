mod server;

pub use server::{Config, Flavor, ServerSettings};

use crate::error::{ClientError, Result};
use crate::form::FormState;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.customers/)
pub fn config_dir() -> Result<PathBuf> {
    // First try XDG-style directories
    if let Some(proj_dirs) = ProjectDirs::from("", "", "customers") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    // Fallback to ~/.customers/
    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        ClientError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".customers"))
}

/// Load config.toml (defaults if missing)
pub fn load_config(config_dir: &Path) -> Result<Config> {
    let path = config_dir.join("config.toml");
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ClientError::ConfigParse { path, source: e })
}

/// Load form.toml (empty form if missing)
pub fn load_form(config_dir: &Path) -> Result<FormState> {
    let path = config_dir.join("form.toml");
    if !path.exists() {
        return Ok(FormState::default());
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| ClientError::FormParse { path, source: e })
}

/// Save form.toml, creating the config directory on first use
pub fn save_form(config_dir: &Path, form: &FormState) -> Result<()> {
    fs::create_dir_all(config_dir)?;
    let content = toml::to_string_pretty(form)?;
    fs::write(config_dir.join("form.toml"), content)?;
    Ok(())
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[server]
url = "http://localhost:8000"
flavor = "current"   # "legacy" talks to /customers and never sends passwords
# timeout_secs = 30  # optional, no timeout by default
"#;
