//! Win32 display backend.

use std::mem;

use windows::Win32::Devices::Display::{
    DISPLAYCONFIG_DEVICE_INFO_HEADER, DISPLAYCONFIG_DEVICE_INFO_TYPE, DISPLAYCONFIG_MODE_INFO,
    DISPLAYCONFIG_PATH_INFO, DisplayConfigGetDeviceInfo, DisplayConfigSetDeviceInfo,
    GetDisplayConfigBufferSizes, QDC_ONLY_ACTIVE_PATHS, QueryDisplayConfig,
};
use windows::Win32::Foundation::{ERROR_SUCCESS, LUID};
use windows::Win32::Graphics::Gdi::{
    CDS_GLOBAL, CDS_UPDATEREGISTRY, ChangeDisplaySettingsW, DEVMODEW, DISP_CHANGE_SUCCESSFUL,
    DM_PELSHEIGHT, DM_PELSWIDTH, ENUM_CURRENT_SETTINGS, ENUM_DISPLAY_SETTINGS_MODE,
    EnumDisplaySettingsW,
};
use windows::core::PCWSTR;

use crate::backend::{DisplayBackend, ModeIter};
use crate::dpi::{ScaleInfo, ScaleStep, relative_step};
use crate::error::DisplayError;
use crate::models::DisplayMode;

// Undocumented packet types used by the Settings app for per-source DPI scale.
const GET_SOURCE_DPI_SCALE: DISPLAYCONFIG_DEVICE_INFO_TYPE = DISPLAYCONFIG_DEVICE_INFO_TYPE(-3);
const SET_SOURCE_DPI_SCALE: DISPLAYCONFIG_DEVICE_INFO_TYPE = DISPLAYCONFIG_DEVICE_INFO_TYPE(-4);

#[repr(C)]
struct SourceDpiScaleGet {
    header: DISPLAYCONFIG_DEVICE_INFO_HEADER,
    min_scale_rel: i32,
    cur_scale_rel: i32,
    max_scale_rel: i32,
}

#[repr(C)]
struct SourceDpiScaleSet {
    header: DISPLAYCONFIG_DEVICE_INFO_HEADER,
    scale_rel: i32,
}

/// Adapter/source pair of an active display path.
#[derive(Clone, Copy)]
struct DisplaySource {
    adapter_id: LUID,
    source_id: u32,
}

pub struct Win32Backend;

fn blank_devmode() -> DEVMODEW {
    let mut dev_mode = unsafe { mem::zeroed::<DEVMODEW>() };
    dev_mode.dmSize = mem::size_of::<DEVMODEW>() as u16;
    dev_mode
}

/// Walks `EnumDisplaySettingsW` one mode index per `next()` until the OS
/// reports the end of the list.
struct Win32ModeIter {
    index: u32,
    done: bool,
}

impl Iterator for Win32ModeIter {
    type Item = DisplayMode;

    fn next(&mut self) -> Option<DisplayMode> {
        if self.done {
            return None;
        }
        let mut dev_mode = blank_devmode();
        let found = unsafe {
            EnumDisplaySettingsW(
                PCWSTR::null(),
                ENUM_DISPLAY_SETTINGS_MODE(self.index),
                &mut dev_mode,
            )
        }
        .as_bool();
        if !found {
            self.done = true;
            return None;
        }
        self.index += 1;
        Some(DisplayMode::new(
            dev_mode.dmPelsWidth,
            dev_mode.dmPelsHeight,
            dev_mode.dmDisplayFrequency,
        ))
    }
}

fn current_devmode() -> Option<DEVMODEW> {
    let mut dev_mode = blank_devmode();
    unsafe { EnumDisplaySettingsW(PCWSTR::null(), ENUM_CURRENT_SETTINGS, &mut dev_mode) }
        .as_bool()
        .then_some(dev_mode)
}

fn path_query_failed(percent: u32, what: &str, code: u32) -> DisplayError {
    DisplayError::ScaleChangeFailed {
        percent,
        reason: format!("{what} failed with code {code}"),
    }
}

/// Sources of all active display paths, in the order the OS reports them.
/// `percent` is only used to label a failure.
fn active_sources(percent: u32) -> Result<Vec<DisplaySource>, DisplayError> {
    let mut path_count = 0u32;
    let mut mode_count = 0u32;
    let status = unsafe {
        GetDisplayConfigBufferSizes(QDC_ONLY_ACTIVE_PATHS, &mut path_count, &mut mode_count)
    };
    if status != ERROR_SUCCESS {
        tracing::error!("GetDisplayConfigBufferSizes() failed: {}", status.0);
        return Err(path_query_failed(percent, "GetDisplayConfigBufferSizes", status.0));
    }

    let mut paths = vec![unsafe { mem::zeroed::<DISPLAYCONFIG_PATH_INFO>() }; path_count as usize];
    let mut modes = vec![unsafe { mem::zeroed::<DISPLAYCONFIG_MODE_INFO>() }; mode_count as usize];
    let status = unsafe {
        QueryDisplayConfig(
            QDC_ONLY_ACTIVE_PATHS,
            &mut path_count,
            paths.as_mut_ptr(),
            &mut mode_count,
            modes.as_mut_ptr(),
            None,
        )
    };
    if status != ERROR_SUCCESS {
        tracing::error!("QueryDisplayConfig() failed: {}", status.0);
        return Err(path_query_failed(percent, "QueryDisplayConfig", status.0));
    }
    paths.truncate(path_count as usize);

    Ok(paths
        .iter()
        .map(|path| DisplaySource {
            adapter_id: path.sourceInfo.adapterId,
            source_id: path.sourceInfo.id,
        })
        .collect())
}

fn read_scale_info(source: DisplaySource, percent: u32) -> Result<ScaleInfo, DisplayError> {
    let mut packet = SourceDpiScaleGet {
        header: DISPLAYCONFIG_DEVICE_INFO_HEADER {
            r#type: GET_SOURCE_DPI_SCALE,
            size: mem::size_of::<SourceDpiScaleGet>() as u32,
            adapterId: source.adapter_id,
            id: source.source_id,
        },
        min_scale_rel: 0,
        cur_scale_rel: 0,
        max_scale_rel: 0,
    };
    let status = unsafe { DisplayConfigGetDeviceInfo(&mut packet.header) };
    if status != ERROR_SUCCESS.0 as i32 {
        tracing::error!("DisplayConfigGetDeviceInfo() failed: {status}");
        return Err(DisplayError::ScaleChangeFailed {
            percent,
            reason: format!("reading the current scale failed with code {status}"),
        });
    }

    ScaleInfo::from_relative(packet.min_scale_rel, packet.cur_scale_rel, packet.max_scale_rel)
        .ok_or_else(|| DisplayError::ScaleChangeFailed {
            percent,
            reason: format!(
                "unexpected scale range ({}, {}, {})",
                packet.min_scale_rel, packet.cur_scale_rel, packet.max_scale_rel
            ),
        })
}

impl DisplayBackend for Win32Backend {
    fn current_mode(&self) -> Result<DisplayMode, DisplayError> {
        let dev_mode = current_devmode().ok_or_else(|| {
            DisplayError::PlatformQuery("could not read the current display settings".into())
        })?;
        Ok(DisplayMode::new(
            dev_mode.dmPelsWidth,
            dev_mode.dmPelsHeight,
            dev_mode.dmDisplayFrequency,
        ))
    }

    fn modes(&self) -> Result<ModeIter<'_>, DisplayError> {
        // A display we cannot read the current mode of has no usable mode list.
        if current_devmode().is_none() {
            tracing::error!("EnumDisplaySettingsW() failed for the current mode");
            return Err(DisplayError::PlatformQuery(
                "could not read the current display settings".into(),
            ));
        }
        Ok(Box::new(Win32ModeIter {
            index: 0,
            done: false,
        }))
    }

    fn set_resolution(&self, width: u32, height: u32) -> Result<(), DisplayError> {
        let Some(mut dev_mode) = current_devmode() else {
            tracing::error!("Could not get current display settings!");
            return Err(DisplayError::ResolutionChangeFailed {
                width,
                height,
                reason: "could not read the current display settings".into(),
            });
        };

        dev_mode.dmPelsWidth = width;
        dev_mode.dmPelsHeight = height;
        dev_mode.dmFields = DM_PELSWIDTH | DM_PELSHEIGHT;

        let result = unsafe {
            ChangeDisplaySettingsW(
                Some(&dev_mode as *const DEVMODEW),
                CDS_UPDATEREGISTRY | CDS_GLOBAL,
            )
        };
        if result != DISP_CHANGE_SUCCESSFUL {
            tracing::error!("Display resolution change failed: {}", result.0);
            return Err(DisplayError::ResolutionChangeFailed {
                width,
                height,
                reason: format!("ChangeDisplaySettingsW returned {}", result.0),
            });
        }

        tracing::info!("Display resolution changed to {width}x{height}.");
        Ok(())
    }

    fn set_scale(&self, percent: u32) -> Result<(), DisplayError> {
        let sources = active_sources(percent)?;
        let Some(&source) = sources.first() else {
            tracing::error!("No active display path to change the scale of");
            return Err(DisplayError::NoDisplayDeviceAvailable);
        };

        let info = read_scale_info(source, percent)?;
        let scale_rel = match relative_step(&info, percent)? {
            ScaleStep::Unchanged => {
                tracing::info!("Display scale already at {percent} %.");
                return Ok(());
            }
            ScaleStep::Relative(step) => step,
        };

        let packet = SourceDpiScaleSet {
            header: DISPLAYCONFIG_DEVICE_INFO_HEADER {
                r#type: SET_SOURCE_DPI_SCALE,
                size: mem::size_of::<SourceDpiScaleSet>() as u32,
                adapterId: source.adapter_id,
                id: source.source_id,
            },
            scale_rel,
        };
        let status = unsafe { DisplayConfigSetDeviceInfo(&packet.header) };
        if status != ERROR_SUCCESS.0 as i32 {
            tracing::error!("DisplayConfigSetDeviceInfo() failed: {status}");
            return Err(DisplayError::ScaleChangeFailed {
                percent,
                reason: format!("DisplayConfigSetDeviceInfo returned {status}"),
            });
        }

        tracing::info!("Display scale changed to {percent} %.");
        Ok(())
    }
}
