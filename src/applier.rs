use crate::backend::DisplayBackend;
use crate::error::{ApplyError, DisplayError};
use crate::models::DisplayMode;

/// Applies a chosen [`DisplayMode`] to the primary display.
pub struct DisplayApplier<'a, B: DisplayBackend + ?Sized> {
    backend: &'a B,
}

impl<'a, B: DisplayBackend + ?Sized> DisplayApplier<'a, B> {
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Change resolution, then DPI scale.
    ///
    /// Each step is attempted exactly once and neither is rolled back when the
    /// other fails; the returned error says which halves took effect.
    pub fn apply(&self, mode: &DisplayMode) -> Result<(), ApplyError> {
        validate(mode).map_err(ApplyError::from)?;

        tracing::info!("Applying display mode {mode} at {} %", mode.scale_percent());

        let resolution = self.backend.set_resolution(mode.width, mode.height);
        let scale = self.backend.set_scale(mode.scale_percent());

        let err = match (resolution, scale) {
            (Ok(()), Ok(())) => return Ok(()),
            (Err(kind), Ok(())) => ApplyError {
                kind,
                resolution_changed: false,
                scale_changed: true,
                scale_error: None,
            },
            (Ok(()), Err(kind)) => ApplyError {
                kind,
                resolution_changed: true,
                scale_changed: false,
                scale_error: None,
            },
            (Err(kind), Err(scale_error)) => ApplyError {
                kind,
                resolution_changed: false,
                scale_changed: false,
                scale_error: Some(scale_error),
            },
        };
        tracing::error!("Applying {mode} failed: {err}");
        Err(err)
    }
}

fn validate(mode: &DisplayMode) -> Result<(), DisplayError> {
    if mode.width == 0 || mode.height == 0 || !mode.scale.is_finite() || mode.scale < 1.0 {
        return Err(DisplayError::InvalidMode {
            width: mode.width,
            height: mode.height,
            scale_percent: if mode.scale.is_finite() && mode.scale > 0.0 {
                mode.scale_percent()
            } else {
                0
            },
        });
    }
    Ok(())
}
