use crate::backend::DisplayBackend;
use crate::catalog::DisplayCatalog;
use crate::error::DisplayError;
use crate::models::DisplayMode;

/// Configured presets plus the OS-supported catalog.
#[derive(Debug, Default)]
pub struct DisplaySettingsStore {
    presets: Vec<DisplayMode>,
    supported: DisplayCatalog,
}

impl DisplaySettingsStore {
    /// Presets keep the order they were configured in.
    pub fn new(presets: Vec<DisplayMode>) -> Self {
        Self {
            presets,
            supported: DisplayCatalog::default(),
        }
    }

    pub fn presets(&self) -> &[DisplayMode] {
        &self.presets
    }

    pub fn supported(&self) -> &[DisplayMode] {
        self.supported.modes()
    }

    /// Re-query the OS. On failure the supported list is left empty.
    pub fn refresh_supported<B: DisplayBackend + ?Sized>(
        &mut self,
        backend: &B,
    ) -> Result<usize, DisplayError> {
        match DisplayCatalog::query(backend) {
            Ok(catalog) => {
                self.supported = catalog;
                Ok(self.supported.len())
            }
            Err(err) => {
                tracing::error!("Failed to list supported display modes: {err}");
                self.supported = DisplayCatalog::default();
                Err(err)
            }
        }
    }

    /// First mode with the given resolution, looking at presets before the
    /// OS-supported list.
    pub fn find(&self, width: u32, height: u32) -> Option<&DisplayMode> {
        self.presets
            .iter()
            .chain(self.supported.modes())
            .find(|m| m.width == width && m.height == height)
    }
}
