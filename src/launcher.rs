//! Starting configured applications.
//!
//! Each [`LaunchEntry`] is materialized as a batch script in the configuration
//! directory and handed to the shell, elevated through UAC when requested.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LaunchError;
use crate::models::LaunchEntry;

/// Runs a prepared script.
pub trait ProcessLauncher {
    fn execute(&self, script: &Path, elevated: bool) -> Result<(), LaunchError>;
}

/// Write the entry's commands to its script file inside `dir`.
pub fn prepare(entry: &LaunchEntry, dir: &Path) -> Result<PathBuf, LaunchError> {
    let script = dir.join(entry.script_file_name());
    tracing::info!("Writing script {}", script.display());
    fs::write(&script, &entry.commands).map_err(|source| LaunchError::Io {
        path: script.clone(),
        source,
    })?;
    Ok(script)
}

/// Prepare and run `entry`.
pub fn launch<L: ProcessLauncher + ?Sized>(
    launcher: &L,
    entry: &LaunchEntry,
    dir: &Path,
) -> Result<(), LaunchError> {
    tracing::info!("Launch {}", entry.name);
    let script = prepare(entry, dir)?;
    launcher.execute(&script, entry.elevated)?;
    tracing::info!("Command executed successfully!");
    Ok(())
}

/// Hands scripts to the Windows shell (`ShellExecuteW`), or to `sh` elsewhere.
pub struct ShellLauncher;

#[cfg(windows)]
impl ProcessLauncher for ShellLauncher {
    fn execute(&self, script: &Path, elevated: bool) -> Result<(), LaunchError> {
        use windows::Win32::UI::Shell::ShellExecuteW;
        use windows::Win32::UI::WindowsAndMessaging::SW_SHOWNORMAL;
        use windows::core::{PCWSTR, w};

        let file: Vec<u16> = script
            .as_os_str()
            .to_string_lossy()
            .encode_utf16()
            .chain(Some(0))
            .collect();
        let verb = if elevated { w!("runas") } else { w!("open") };

        let result = unsafe {
            ShellExecuteW(
                None,
                verb,
                PCWSTR(file.as_ptr()),
                PCWSTR::null(),
                PCWSTR::null(),
                SW_SHOWNORMAL,
            )
        };
        // Values up to 32 are error codes.
        let code = result.0 as isize;
        if code <= 32 {
            tracing::error!("Failed to execute {}: {code}", script.display());
            return Err(LaunchError::Execute {
                script: script.to_path_buf(),
                code,
            });
        }
        Ok(())
    }
}

#[cfg(not(windows))]
impl ProcessLauncher for ShellLauncher {
    fn execute(&self, script: &Path, elevated: bool) -> Result<(), LaunchError> {
        if elevated {
            tracing::warn!("Elevation is not supported here, running {} as is", script.display());
        }
        std::process::Command::new("sh")
            .arg(script)
            .spawn()
            .map(|_| ())
            .map_err(|source| LaunchError::Io {
                path: script.to_path_buf(),
                source,
            })
    }
}
