use std::path::PathBuf;

use crate::backend::DisplayBackend;
use crate::gamepad::GamepadInput;
use crate::launcher::{self, ProcessLauncher};
use crate::logs::LogBuffer;
use crate::session::{InputEvent, Outcome, Session};

// ─── Application State ───────────────────────────────────────────────────────

pub struct LauncherApp {
    pub session: Session<Box<dyn DisplayBackend>>,
    pub logs: LogBuffer,
    /// Where launcher scripts are written; `None` when no config dir exists.
    pub script_dir: Option<PathBuf>,
    pub process_launcher: Box<dyn ProcessLauncher>,
    pub gamepad: GamepadInput,
    pub status_message: String,
    /// Set when the cursor moved by keyboard this frame, so the list scrolls
    /// the highlighted row into view.
    pub keyboard_moved: bool,
}

impl LauncherApp {
    pub fn new(
        session: Session<Box<dyn DisplayBackend>>,
        logs: LogBuffer,
        script_dir: Option<PathBuf>,
        process_launcher: Box<dyn ProcessLauncher>,
    ) -> Self {
        Self {
            session,
            logs,
            script_dir,
            process_launcher,
            gamepad: GamepadInput::disabled(),
            status_message: String::from("Ready."),
            keyboard_moved: false,
        }
    }

    pub fn with_gamepad(mut self, gamepad: GamepadInput) -> Self {
        self.gamepad = gamepad;
        self
    }

    /// Match the host display to the client's resolution.
    pub fn fit(&mut self, width: u32, height: u32) {
        let outcome = self.session.fit(width, height);
        self.report(&outcome);
    }

    /// Feed this frame's input to the session. Returns `true` when the window
    /// should close.
    pub fn process(&mut self, events: &[InputEvent]) -> bool {
        self.keyboard_moved = events
            .iter()
            .any(|e| matches!(e, InputEvent::Up | InputEvent::Down));

        for &event in events {
            let outcome = self.session.handle(event);
            match outcome {
                Outcome::Exit => return true,
                Outcome::Launch(entry) => {
                    let Some(dir) = self.script_dir.as_deref() else {
                        tracing::error!("No configuration directory to write {} into", entry.name);
                        self.status_message = "❌ Configuration directory is not available.".into();
                        continue;
                    };
                    match launcher::launch(&*self.process_launcher, &entry, dir) {
                        Ok(()) => return true,
                        Err(err) => {
                            tracing::error!("{err}");
                            self.status_message = format!("❌ {err}");
                        }
                    }
                }
                other => self.report(&other),
            }
        }
        false
    }

    fn report(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Applied(mode) => self.status_message = format!("✅ Applied {mode}."),
            Outcome::Failed(err) if err.is_partial() => {
                self.status_message = format!("⚠️ {err}");
            }
            Outcome::Failed(err) => self.status_message = format!("❌ {err}"),
            Outcome::Idle | Outcome::Launch(_) | Outcome::Exit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::Path;
    use std::rc::Rc;

    use super::*;
    use crate::backend::fake::FakeBackend;
    use crate::error::LaunchError;
    use crate::models::{LaunchEntry, LauncherConfig, Page};

    struct SharedLauncher(Rc<RefCell<Vec<PathBuf>>>);

    impl ProcessLauncher for SharedLauncher {
        fn execute(&self, script: &Path, _elevated: bool) -> Result<(), LaunchError> {
            self.0.borrow_mut().push(script.to_path_buf());
            Ok(())
        }
    }

    fn app(script_dir: Option<PathBuf>, runs: Rc<RefCell<Vec<PathBuf>>>) -> LauncherApp {
        let config = LauncherConfig {
            resolutions: vec![crate::models::DisplayMode::named("HD", 1920, 1080, 60, 1.5)],
            apps: vec![LaunchEntry {
                name: "CMD".into(),
                elevated: false,
                commands: "start cmd.exe".into(),
            }],
        };
        let backend: Box<dyn DisplayBackend> = Box::new(FakeBackend::with_modes(&[]));
        LauncherApp::new(
            Session::new(backend, config),
            LogBuffer::new(8),
            script_dir,
            Box::new(SharedLauncher(runs)),
        )
    }

    #[test]
    fn applied_mode_is_reported() {
        let mut app = app(None, Rc::default());
        assert!(!app.process(&[InputEvent::Confirm]));
        assert_eq!(app.status_message, "✅ Applied 1920x1080@60 Hz (HD).");
    }

    #[test]
    fn keyboard_navigation_is_flagged_for_scrolling() {
        let mut app = app(None, Rc::default());
        app.process(&[InputEvent::Down]);
        assert!(app.keyboard_moved);
        app.process(&[InputEvent::Hover(0)]);
        assert!(!app.keyboard_moved);
    }

    #[test]
    fn successful_launch_closes_window() {
        let dir = tempfile::tempdir().unwrap();
        let runs = Rc::new(RefCell::new(Vec::new()));
        let mut app = app(Some(dir.path().to_path_buf()), runs.clone());

        let close = app.process(&[
            InputEvent::SelectTab(Page::Launcher.index()),
            InputEvent::Confirm,
        ]);
        assert!(close);
        assert_eq!(*runs.borrow(), vec![dir.path().join("CMD.bat")]);
    }

    #[test]
    fn launch_without_script_dir_keeps_window_open() {
        let runs = Rc::new(RefCell::new(Vec::new()));
        let mut app = app(None, runs.clone());

        let close = app.process(&[
            InputEvent::SelectTab(Page::Launcher.index()),
            InputEvent::Click(0),
        ]);
        assert!(!close);
        assert!(runs.borrow().is_empty());
        assert!(app.status_message.starts_with('❌'));
    }

    #[test]
    fn exit_closes_window() {
        let mut app = app(None, Rc::default());
        assert!(app.process(&[InputEvent::Exit]));
    }
}
