use crate::backend::DisplayBackend;
use crate::error::DisplayError;
use crate::models::DisplayMode;

/// Snapshot of the display modes the OS reports, one entry per resolution,
/// ordered widest first (then tallest first).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayCatalog {
    modes: Vec<DisplayMode>,
}

impl DisplayCatalog {
    /// Query the backend afresh and build a catalog from what it reports.
    pub fn query<B: DisplayBackend + ?Sized>(backend: &B) -> Result<DisplayCatalog, DisplayError> {
        let catalog = Self::from_modes(backend.modes()?);
        tracing::debug!("Display catalog holds {} modes", catalog.len());
        Ok(catalog)
    }

    /// Merge raw modes on resolution, keeping the highest refresh rate, then sort.
    pub fn from_modes(raw: impl IntoIterator<Item = DisplayMode>) -> DisplayCatalog {
        let mut modes: Vec<DisplayMode> = Vec::new();
        for mode in raw {
            match modes.iter_mut().find(|m| m.same_resolution(&mode)) {
                Some(existing) => existing.frequency = existing.frequency.max(mode.frequency),
                None => modes.push(mode),
            }
        }
        modes.sort_by(|a, b| b.width.cmp(&a.width).then(b.height.cmp(&a.height)));
        DisplayCatalog { modes }
    }

    pub fn modes(&self) -> &[DisplayMode] {
        &self.modes
    }

    pub fn get(&self, index: usize) -> Option<&DisplayMode> {
        self.modes.get(index)
    }

    pub fn len(&self) -> usize {
        self.modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modes.is_empty()
    }
}
