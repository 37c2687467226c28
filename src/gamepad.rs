//! Gamepad navigation.
//!
//! A streaming client presents its controller to the host as a virtual XInput
//! pad, so it is read through `gilrs` and mapped onto the same
//! [`InputEvent`]s as the keyboard.

use crate::session::InputEvent;

/// The buttons the launcher reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadButton {
    DPadUp,
    DPadDown,
    /// A on Xbox pads, Cross on PlayStation pads.
    South,
    LeftBumper,
    RightBumper,
    Start,
    Back,
}

/// Turns button presses into navigation events. Exit needs Start and Back
/// held together.
#[derive(Debug, Default)]
pub struct PadMapper {
    start_held: bool,
    back_held: bool,
}

impl PadMapper {
    pub fn on_press(&mut self, button: PadButton) -> Option<InputEvent> {
        match button {
            PadButton::DPadUp => Some(InputEvent::Up),
            PadButton::DPadDown => Some(InputEvent::Down),
            PadButton::South => Some(InputEvent::Confirm),
            PadButton::RightBumper => Some(InputEvent::NextTab),
            PadButton::LeftBumper => Some(InputEvent::PrevTab),
            PadButton::Start => {
                self.start_held = true;
                self.exit_chord()
            }
            PadButton::Back => {
                self.back_held = true;
                self.exit_chord()
            }
        }
    }

    pub fn on_release(&mut self, button: PadButton) {
        match button {
            PadButton::Start => self.start_held = false,
            PadButton::Back => self.back_held = false,
            _ => {}
        }
    }

    fn exit_chord(&self) -> Option<InputEvent> {
        (self.start_held && self.back_held).then_some(InputEvent::Exit)
    }
}

#[cfg(windows)]
fn pad_button(button: gilrs::Button) -> Option<PadButton> {
    use gilrs::Button;
    match button {
        Button::DPadUp => Some(PadButton::DPadUp),
        Button::DPadDown => Some(PadButton::DPadDown),
        Button::South => Some(PadButton::South),
        Button::LeftTrigger => Some(PadButton::LeftBumper),
        Button::RightTrigger => Some(PadButton::RightBumper),
        Button::Start => Some(PadButton::Start),
        Button::Select => Some(PadButton::Back),
        _ => None,
    }
}

/// Source of gamepad events, polled once per frame.
#[derive(Default)]
pub struct GamepadInput {
    #[cfg(windows)]
    gilrs: Option<gilrs::Gilrs>,
    mapper: PadMapper,
}

impl GamepadInput {
    /// Open the platform gamepad backend. Without one the source stays silent.
    #[cfg(windows)]
    pub fn new() -> Self {
        let gilrs = match gilrs::Gilrs::new() {
            Ok(gilrs) => {
                for (_, pad) in gilrs.gamepads() {
                    tracing::info!("Gamepad connected: {}", pad.name());
                }
                Some(gilrs)
            }
            Err(err) => {
                tracing::warn!("Gamepad input unavailable: {err}");
                None
            }
        };
        Self {
            gilrs,
            mapper: PadMapper::default(),
        }
    }

    #[cfg(not(windows))]
    pub fn new() -> Self {
        tracing::info!("Gamepad input is only read on Windows");
        Self::default()
    }

    /// A source that never yields events.
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Whether frames have to be scheduled to keep polling.
    pub fn is_active(&self) -> bool {
        #[cfg(windows)]
        {
            self.gilrs.is_some()
        }
        #[cfg(not(windows))]
        {
            false
        }
    }

    /// Drain the events queued since the last call.
    #[cfg(windows)]
    pub fn poll(&mut self) -> Vec<InputEvent> {
        use gilrs::EventType;

        let Some(gilrs) = self.gilrs.as_mut() else {
            return Vec::new();
        };
        let mut events = Vec::new();
        while let Some(event) = gilrs.next_event() {
            match event.event {
                EventType::ButtonPressed(button, _) => {
                    if let Some(button) = pad_button(button) {
                        events.extend(self.mapper.on_press(button));
                    }
                }
                EventType::ButtonReleased(button, _) => {
                    if let Some(button) = pad_button(button) {
                        self.mapper.on_release(button);
                    }
                }
                EventType::Connected => tracing::info!("Gamepad connected"),
                EventType::Disconnected => {
                    tracing::info!("Gamepad disconnected");
                    self.mapper = PadMapper::default();
                }
                _ => {}
            }
        }
        events
    }

    #[cfg(not(windows))]
    pub fn poll(&mut self) -> Vec<InputEvent> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buttons_map_to_navigation() {
        let mut mapper = PadMapper::default();
        assert_eq!(mapper.on_press(PadButton::DPadUp), Some(InputEvent::Up));
        assert_eq!(mapper.on_press(PadButton::DPadDown), Some(InputEvent::Down));
        assert_eq!(mapper.on_press(PadButton::South), Some(InputEvent::Confirm));
        assert_eq!(mapper.on_press(PadButton::RightBumper), Some(InputEvent::NextTab));
        assert_eq!(mapper.on_press(PadButton::LeftBumper), Some(InputEvent::PrevTab));
    }

    #[test]
    fn exit_needs_start_and_back_together() {
        let mut mapper = PadMapper::default();
        assert_eq!(mapper.on_press(PadButton::Start), None);
        mapper.on_release(PadButton::Start);
        assert_eq!(mapper.on_press(PadButton::Back), None);

        assert_eq!(mapper.on_press(PadButton::Start), Some(InputEvent::Exit));
    }

    #[test]
    fn either_order_of_the_exit_chord_works() {
        let mut mapper = PadMapper::default();
        assert_eq!(mapper.on_press(PadButton::Back), None);
        assert_eq!(mapper.on_press(PadButton::Start), Some(InputEvent::Exit));
    }

    #[test]
    fn disabled_source_yields_nothing() {
        let mut gamepad = GamepadInput::disabled();
        assert!(!gamepad.is_active());
        assert!(gamepad.poll().is_empty());
    }
}
