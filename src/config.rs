//! Loading of `moonlight-launcher.toml`.
//!
//! The file lives in the per-user configuration directory
//! (`%APPDATA%\Moonlight-Launcher\` on Windows). When it does not exist yet a
//! default one with three presets and a `CMD` launcher is written first.
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::LauncherConfig;

pub const APP_NAME: &str = "Moonlight-Launcher";
pub const CONFIG_FILE_NAME: &str = "moonlight-launcher.toml";

pub const DEFAULT_CONFIG: &str = r#"[[resolutions]]
name = "HD"
freq = 60
scale = 1.5
width = 1920
height = 1080

[[resolutions]]
name = "2K"
freq = 60
scale = 1.5
width = 2560
height = 1440

[[resolutions]]
name = "4K"
freq = 60
scale = 1.5
width = 3840
height = 2160

[[apps]]
name = "CMD"
elevated = false
commands = """
start "" "cmd.exe"
"""
"#;

/// Get the application's configuration directory, creating it if needed.
pub fn get_config_directory() -> Result<PathBuf, ConfigError> {
    let project_dirs = ProjectDirs::from("", "", APP_NAME).ok_or(ConfigError::NoConfigDir)?;
    let config_dir = project_dirs.config_dir();

    fs::create_dir_all(config_dir).map_err(|source| ConfigError::Io {
        path: config_dir.to_path_buf(),
        source,
    })?;

    Ok(config_dir.to_path_buf())
}

/// Load the configuration from `dir`, writing the default file first when
/// there is none.
pub fn load_or_create(dir: &Path) -> Result<LauncherConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);
    tracing::info!("Loading configuration file at: {}", path.display());

    if !path.exists() {
        tracing::info!("Config file does not exist, creating default config file");
        fs::write(&path, DEFAULT_CONFIG).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
    }

    load_from_file(&path)
}

pub fn load_from_file(path: &Path) -> Result<LauncherConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&contents, path)
}

/// Parse and validate. `origin` is only used in error messages.
pub fn parse(contents: &str, origin: &Path) -> Result<LauncherConfig, ConfigError> {
    let config: LauncherConfig = toml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    tracing::info!(
        "Loaded {} resolution presets and {} apps",
        config.resolutions.len(),
        config.apps.len()
    );
    Ok(config)
}

fn validate(config: &LauncherConfig) -> Result<(), ConfigError> {
    let invalid = |section, message: String| Err(ConfigError::Invalid { section, message });

    for mode in &config.resolutions {
        if !mode.scale.is_finite() || mode.scale < 1.0 {
            return invalid("resolutions", format!("expect scale >= 1.0 for {mode}"));
        }
        if mode.width == 0 || mode.height == 0 {
            return invalid("resolutions", format!("expect width/height > 0 for {mode}"));
        }
        if mode.frequency == 0 {
            return invalid("resolutions", format!("expect frequency > 0 for {mode}"));
        }
    }

    for app in &config.apps {
        if app.name.trim().is_empty() {
            return invalid("apps", "expect non-empty name".into());
        }
        if app.commands.trim().is_empty() {
            return invalid("apps", format!("expect non-empty commands for {}", app.name));
        }
    }

    Ok(())
}

/// Client resolution requested by the Sunshine host, when it set both
/// `SUNSHINE_CLIENT_WIDTH` and `SUNSHINE_CLIENT_HEIGHT`.
pub fn requested_client_extent() -> Option<(u32, u32)> {
    parse_client_extent(
        std::env::var("SUNSHINE_CLIENT_WIDTH").ok().as_deref(),
        std::env::var("SUNSHINE_CLIENT_HEIGHT").ok().as_deref(),
    )
}

fn parse_client_extent(width: Option<&str>, height: Option<&str>) -> Option<(u32, u32)> {
    let width: u32 = width?.trim().parse().ok()?;
    let height: u32 = height?.trim().parse().ok()?;
    (width > 0 && height > 0).then_some((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DisplayMode;

    fn parse_str(contents: &str) -> Result<LauncherConfig, ConfigError> {
        parse(contents, Path::new("test.toml"))
    }

    #[test]
    fn default_config_parses() {
        let config = parse_str(DEFAULT_CONFIG).unwrap();
        let names: Vec<_> = config.resolutions.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["HD", "2K", "4K"]);
        assert_eq!(
            config.resolutions[2],
            DisplayMode::named("4K", 3840, 2160, 60, 1.5)
        );
        assert_eq!(config.apps.len(), 1);
        assert_eq!(config.apps[0].name, "CMD");
        assert!(!config.apps[0].elevated);
        assert_eq!(config.apps[0].commands, "start \"\" \"cmd.exe\"\n");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = parse_str("[[resolutions]]\nwidth = 1280\nheight = 800\n").unwrap();
        assert_eq!(config.resolutions, vec![DisplayMode::new(1280, 800, 60)]);
        assert!(config.apps.is_empty());
    }

    #[test]
    fn empty_file_is_an_empty_config() {
        assert_eq!(parse_str("").unwrap(), LauncherConfig::default());
    }

    #[test]
    fn rejects_scale_below_one() {
        let err = parse_str("[[resolutions]]\nwidth = 1\nheight = 1\nscale = 0.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "resolutions", .. }));
    }

    #[test]
    fn rejects_missing_dimensions() {
        let err = parse_str("[[resolutions]]\nname = \"broken\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "resolutions", .. }));
    }

    #[test]
    fn rejects_zero_frequency() {
        let err = parse_str("[[resolutions]]\nwidth = 1\nheight = 1\nfreq = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { section: "resolutions", .. }));
    }

    #[test]
    fn rejects_app_without_commands() {
        let err = parse_str("[[apps]]\nname = \"Steam\"\n").unwrap_err();
        assert!(err.to_string().contains("Steam"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = parse_str("[[resolutions]\nwidth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn client_extent_needs_both_values() {
        assert_eq!(parse_client_extent(Some("2560"), Some("1440")), Some((2560, 1440)));
        assert_eq!(parse_client_extent(Some(" 1920 "), Some("1080\n")), Some((1920, 1080)));
        assert_eq!(parse_client_extent(Some("2560"), None), None);
        assert_eq!(parse_client_extent(Some("wide"), Some("1440")), None);
        assert_eq!(parse_client_extent(Some("0"), Some("1440")), None);
    }

    #[test]
    fn creates_default_file_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_or_create(dir.path()).unwrap();

        let written = fs::read_to_string(dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(written, DEFAULT_CONFIG);
        assert_eq!(config.resolutions.len(), 3);
    }

    #[test]
    fn existing_file_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[[resolutions]]\nwidth = 800\nheight = 600\n").unwrap();

        let config = load_or_create(dir.path()).unwrap();
        assert_eq!(config.resolutions, vec![DisplayMode::new(800, 600, 60)]);
    }
}
