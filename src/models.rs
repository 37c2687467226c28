use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Data Models ─────────────────────────────────────────────────────────────

/// One selectable display configuration.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DisplayMode {
    /// Optional label from the configuration file, e.g. "4K".
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(rename = "freq", default = "default_frequency")]
    pub frequency: u32,
    /// DPI scale factor, 1.0 == 100 %.
    #[serde(default = "default_scale")]
    pub scale: f32,
}

fn default_frequency() -> u32 {
    60
}

fn default_scale() -> f32 {
    1.0
}

impl DisplayMode {
    pub fn new(width: u32, height: u32, frequency: u32) -> Self {
        Self {
            name: String::new(),
            width,
            height,
            frequency,
            scale: default_scale(),
        }
    }

    pub fn named(name: impl Into<String>, width: u32, height: u32, frequency: u32, scale: f32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            frequency,
            scale,
        }
    }

    /// Two modes are the same entry when their resolutions match.
    pub fn same_resolution(&self, other: &DisplayMode) -> bool {
        self.width == other.width && self.height == other.height
    }

    /// Scale as the integer percentage the OS works with (1.5 -> 150).
    pub fn scale_percent(&self) -> u32 {
        (self.scale * 100.0).round() as u32
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}@{} Hz", self.width, self.height, self.frequency)?;
        if !self.name.is_empty() {
            write!(f, " ({})", self.name)?;
        }
        Ok(())
    }
}

/// An application or script the launcher page can start.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LaunchEntry {
    #[serde(default)]
    pub name: String,
    /// Run through the `runas` verb (UAC prompt) instead of `open`.
    #[serde(default)]
    pub elevated: bool,
    /// Batch file body written to the script before it is executed.
    #[serde(default)]
    pub commands: String,
}

impl LaunchEntry {
    /// File name of the batch script, e.g. "Steam Big Picture" -> "Steam_Big_Picture.bat".
    pub fn script_file_name(&self) -> String {
        format!("{}.bat", self.name.replace(' ', "_"))
    }
}

/// Contents of `moonlight-launcher.toml`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct LauncherConfig {
    #[serde(default)]
    pub resolutions: Vec<DisplayMode>,
    #[serde(default)]
    pub apps: Vec<LaunchEntry>,
}

// ─── Runtime State ───────────────────────────────────────────────────────────

/// Pages of the launcher, in tab order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Page {
    Presets,
    Supported,
    Launcher,
    Help,
    Logs,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Presets,
        Page::Supported,
        Page::Launcher,
        Page::Help,
        Page::Logs,
    ];

    pub fn from_index(index: usize) -> Option<Page> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Presets => "Presets",
            Page::Supported => "Supported",
            Page::Launcher => "Launcher",
            Page::Help => "Help",
            Page::Logs => "Logs",
        }
    }
}
