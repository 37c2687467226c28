use crate::error::DisplayError;
use crate::models::DisplayMode;

/// Raw, unmerged modes as the OS reports them. Each call to
/// [`DisplayBackend::modes`] hands out a fresh, single-pass iterator.
pub type ModeIter<'a> = Box<dyn Iterator<Item = DisplayMode> + 'a>;

/// The OS display-configuration surface used by the catalog and the applier.
pub trait DisplayBackend {
    /// Mode the primary display is currently running.
    fn current_mode(&self) -> Result<DisplayMode, DisplayError>;

    /// Enumerate every mode the primary display supports.
    fn modes(&self) -> Result<ModeIter<'_>, DisplayError>;

    fn set_resolution(&self, width: u32, height: u32) -> Result<(), DisplayError>;

    /// Set the DPI scale of the primary display, in percent (150 == 1.5x).
    fn set_scale(&self, percent: u32) -> Result<(), DisplayError>;
}

impl<B: DisplayBackend + ?Sized> DisplayBackend for Box<B> {
    fn current_mode(&self) -> Result<DisplayMode, DisplayError> {
        (**self).current_mode()
    }

    fn modes(&self) -> Result<ModeIter<'_>, DisplayError> {
        (**self).modes()
    }

    fn set_resolution(&self, width: u32, height: u32) -> Result<(), DisplayError> {
        (**self).set_resolution(width, height)
    }

    fn set_scale(&self, percent: u32) -> Result<(), DisplayError> {
        (**self).set_scale(percent)
    }
}

/// Backend for the platform this binary was built for.
pub fn platform_backend() -> Box<dyn DisplayBackend> {
    #[cfg(windows)]
    {
        Box::new(crate::monitor::Win32Backend)
    }
    #[cfg(not(windows))]
    {
        Box::new(UnsupportedBackend)
    }
}

/// Used where there is no display-configuration API to talk to. Every
/// query fails so the UI comes up with empty lists and an error to show.
#[cfg(not(windows))]
pub struct UnsupportedBackend;

#[cfg(not(windows))]
impl DisplayBackend for UnsupportedBackend {
    fn current_mode(&self) -> Result<DisplayMode, DisplayError> {
        Err(DisplayError::PlatformQuery(
            "display configuration is only supported on Windows".into(),
        ))
    }

    fn modes(&self) -> Result<ModeIter<'_>, DisplayError> {
        Err(DisplayError::PlatformQuery(
            "display configuration is only supported on Windows".into(),
        ))
    }

    fn set_resolution(&self, width: u32, height: u32) -> Result<(), DisplayError> {
        Err(DisplayError::ResolutionChangeFailed {
            width,
            height,
            reason: "unsupported platform".into(),
        })
    }

    fn set_scale(&self, _percent: u32) -> Result<(), DisplayError> {
        Err(DisplayError::NoDisplayDeviceAvailable)
    }
}
