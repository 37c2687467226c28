//! Per-tick input processing: routes navigation events to the tab and cursor
//! controllers and turns commits into display changes or launch requests.

use crate::applier::DisplayApplier;
use crate::backend::DisplayBackend;
use crate::error::{ApplyError, DisplayError};
use crate::models::{DisplayMode, LaunchEntry, LauncherConfig, Page};
use crate::navigation::{NavDirection, SelectionController, SelectionCursor, TabController};
use crate::store::DisplaySettingsStore;

/// Discrete input, whether it came from keyboard, gamepad or pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Up,
    Down,
    Confirm,
    NextTab,
    PrevTab,
    SelectTab(usize),
    Exit,
    /// Pointer is over row `i`: preview only.
    Hover(usize),
    /// Row `i` was clicked: select and commit.
    Click(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Idle,
    Applied(DisplayMode),
    Failed(ApplyError),
    Launch(LaunchEntry),
    Exit,
}

pub struct Session<B: DisplayBackend> {
    backend: B,
    store: DisplaySettingsStore,
    apps: Vec<LaunchEntry>,
    tabs: TabController,
    selection: SelectionController,
    last_error: Option<ApplyError>,
}

impl<B: DisplayBackend> Session<B> {
    /// Start on the first page with a freshly queried catalog.
    pub fn new(backend: B, config: LauncherConfig) -> Self {
        let mut session = Self {
            backend,
            store: DisplaySettingsStore::new(config.resolutions),
            apps: config.apps,
            tabs: TabController::new(Page::ALL.len()),
            selection: SelectionController::default(),
            last_error: None,
        };
        session.refresh_supported();
        session.selection.on_list_changed(session.list_len(session.active_page()));
        session
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn active_page(&self) -> Page {
        Page::from_index(self.tabs.active_index()).unwrap_or(Page::Presets)
    }

    pub fn cursor(&self) -> SelectionCursor {
        self.selection.cursor()
    }

    pub fn presets(&self) -> &[DisplayMode] {
        self.store.presets()
    }

    pub fn supported(&self) -> &[DisplayMode] {
        self.store.supported()
    }

    pub fn apps(&self) -> &[LaunchEntry] {
        &self.apps
    }

    /// Error of the last commit or catalog query, until the next success.
    pub fn last_error(&self) -> Option<&ApplyError> {
        self.last_error.as_ref()
    }

    pub fn handle(&mut self, event: InputEvent) -> Outcome {
        match event {
            InputEvent::Up => self.selection.on_navigate(NavDirection::Up),
            InputEvent::Down => self.selection.on_navigate(NavDirection::Down),
            InputEvent::NextTab => self.switch_tab(TabController::on_next),
            InputEvent::PrevTab => self.switch_tab(TabController::on_prev),
            InputEvent::SelectTab(index) => {
                if index >= self.tabs.tab_count() {
                    tracing::warn!("Ignoring selection of unknown tab {index}");
                } else {
                    self.switch_tab(|tabs| {
                        tabs.on_select(index);
                    });
                }
            }
            InputEvent::Hover(index) => {
                self.selection.on_hover(index);
            }
            InputEvent::Click(index) => {
                if self.selection.on_hover(index) {
                    return self.commit();
                }
            }
            InputEvent::Confirm => return self.commit(),
            InputEvent::Exit => return Outcome::Exit,
        }
        Outcome::Idle
    }

    /// Apply the mode matching the requested client resolution, if one is
    /// known. Presets win over OS-supported modes.
    pub fn fit(&mut self, width: u32, height: u32) -> Outcome {
        let Some(mode) = self.store.find(width, height).cloned() else {
            tracing::info!("No display mode matches {width}x{height}");
            return Outcome::Idle;
        };
        self.apply(mode)
    }

    fn switch_tab(&mut self, step: impl FnOnce(&mut TabController)) {
        step(&mut self.tabs);
        let page = self.active_page();
        if page == Page::Supported {
            self.refresh_supported();
        }
        self.selection.on_list_changed(self.list_len(page));
    }

    fn refresh_supported(&mut self) {
        if let Err(err) = self.store.refresh_supported(&self.backend) {
            self.last_error = Some(err.into());
        }
    }

    fn list_len(&self, page: Page) -> usize {
        match page {
            Page::Presets => self.store.presets().len(),
            Page::Supported => self.store.supported().len(),
            Page::Launcher => self.apps.len(),
            Page::Help | Page::Logs => 0,
        }
    }

    fn commit(&mut self) -> Outcome {
        let modes = match self.active_page() {
            Page::Presets => self.store.presets(),
            Page::Supported => self.store.supported(),
            Page::Launcher => {
                return match self.selection.index().and_then(|i| self.apps.get(i)) {
                    Some(entry) => Outcome::Launch(entry.clone()),
                    None => Outcome::Idle,
                };
            }
            Page::Help | Page::Logs => return Outcome::Idle,
        };

        let selected = self
            .selection
            .on_commit()
            .and_then(|i| modes.get(i).cloned().ok_or(DisplayError::NoDisplaySelected));
        match selected {
            Ok(mode) => self.apply(mode),
            Err(kind) => {
                tracing::warn!("Commit ignored: {kind}");
                let err = ApplyError::from(kind);
                self.last_error = Some(err.clone());
                Outcome::Failed(err)
            }
        }
    }

    fn apply(&mut self, mode: DisplayMode) -> Outcome {
        match DisplayApplier::new(&self.backend).apply(&mode) {
            Ok(()) => {
                self.last_error = None;
                Outcome::Applied(mode)
            }
            Err(err) => {
                self.last_error = Some(err.clone());
                Outcome::Failed(err)
            }
        }
    }
}
