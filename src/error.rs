use std::path::PathBuf;

use thiserror::Error;

/// Failures of the display query / apply path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisplayError {
    #[error("display mode enumeration failed: {0}")]
    PlatformQuery(String),
    #[error("invalid display mode {width}x{height} (scale {scale_percent} %)")]
    InvalidMode {
        width: u32,
        height: u32,
        scale_percent: u32,
    },
    #[error("display resolution change to {width}x{height} failed: {reason}")]
    ResolutionChangeFailed {
        width: u32,
        height: u32,
        reason: String,
    },
    #[error("display scale change to {percent} % failed: {reason}")]
    ScaleChangeFailed { percent: u32, reason: String },
    #[error("no display device available")]
    NoDisplayDeviceAvailable,
    #[error("no display mode selected")]
    NoDisplaySelected,
}

/// Outcome of a failed [`crate::applier::DisplayApplier::apply`].
///
/// Both halves of an apply are reported so a caller can retry only the one
/// that failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "{kind}{} (resolution changed: {resolution_changed}, scale changed: {scale_changed})",
    .scale_error.as_ref().map(|e| format!("; {e}")).unwrap_or_default()
)]
pub struct ApplyError {
    /// First failure, in apply order.
    pub kind: DisplayError,
    pub resolution_changed: bool,
    pub scale_changed: bool,
    /// Failure of the scale step when the resolution step failed as well.
    pub scale_error: Option<DisplayError>,
}

/// A failure that happened before either half was attempted.
impl From<DisplayError> for ApplyError {
    fn from(kind: DisplayError) -> Self {
        ApplyError {
            kind,
            resolution_changed: false,
            scale_changed: false,
            scale_error: None,
        }
    }
}

impl ApplyError {
    pub fn is_partial(&self) -> bool {
        self.resolution_changed || self.scale_changed
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration directory is not available")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("[{section}] {message}")]
    Invalid {
        section: &'static str,
        message: String,
    },
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("failed to write script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to execute {script} (code {code})")]
    Execute { script: PathBuf, code: isize },
}
