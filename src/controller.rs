//! Controller state machine and the API shared by every panel driver
//!
//! ```text
//! Uninitialized -> Resetting -> Initializing -> Idle <-> Transferring <-> Refreshing
//!                                                 |
//!                                                 v
//!                                             DeepSleep -- configure --> Resetting
//! ```
//!
//! A transfer or refresh that fails part way leaves the controller in the
//! state it failed in; only `configure` brings it back.
use crate::color::Color;
use crate::config::Config;
use crate::error::{Error, GeometryError};
use crate::framebuffer::{DisplayRotation, Framebuffer};
use crate::lut::RefreshMode;

/// Where the panel controller is in its lifecycle
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ControllerState {
    /// Bus and pins bound, nothing sent
    #[default]
    Uninitialized,
    /// Hardware reset in progress
    Resetting,
    /// Register programming in progress
    Initializing,
    /// Ready for commands
    Idle,
    /// Framebuffer is being written to panel RAM
    Transferring,
    /// Panel is redrawing
    Refreshing,
    /// Powered down, needs `configure`
    DeepSleep,
}

impl ControllerState {
    /// Move to `next`, logging the edge
    pub(crate) fn advance(&mut self, next: ControllerState) {
        if *self != next {
            log::debug!("Controller {:?} -> {:?}", self, next);
            *self = next;
        }
    }

    /// Fail with [`Error::NotReady`] unless idle
    pub(crate) fn ensure_idle<SpiE, PinE>(self) -> Result<(), Error<SpiE, PinE>> {
        match self {
            ControllerState::Idle => Ok(()),
            other => Err(Error::NotReady(other)),
        }
    }
}

/// A monochrome e-paper panel with its framebuffer
pub trait Panel {
    /// Error of bus, pin and state failures
    type Error;

    /// Allocate the framebuffer (cleared to white), reset and initialize the
    /// controller. Also the only way out of deep sleep.
    fn configure(&mut self, config: Config) -> Result<(), Self::Error>;

    /// Set one pixel in rotated coordinates, out of range writes are ignored
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Fill a rectangle in native (un-rotated) coordinates, all or nothing
    fn fill_rectangle(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        color: Color,
    ) -> Result<(), GeometryError>;

    /// Write the framebuffer to panel RAM and refresh, blocking until done
    fn display(&mut self) -> Result<(), Self::Error>;

    /// Clear framebuffer and panel RAM to white and refresh
    fn clear_display(&mut self) -> Result<(), Self::Error>;

    /// Fill the framebuffer only, nothing is sent
    fn clear_buffer(&mut self, color: Color);

    /// Power the controller down, `configure` is needed afterwards
    fn deep_sleep(&mut self) -> Result<(), Self::Error>;

    /// Select the waveform for the next `display`.
    ///
    /// `Partial` holds for one refresh only, after that the panel is back on `Full`.
    fn set_lut(&mut self, mode: RefreshMode) -> Result<(), Self::Error>;

    /// Size as seen by the caller, swapped for 90 and 270 degrees
    fn size(&self) -> (u16, u16);

    /// Rotation for later pixel writes
    fn set_rotation(&mut self, rotation: DisplayRotation);

    /// Single read of the busy line
    fn is_busy(&mut self) -> Result<bool, Self::Error>;

    /// Current lifecycle state
    fn state(&self) -> ControllerState;

    /// The framebuffer
    fn framebuffer(&self) -> &Framebuffer;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_idle_is_ready() {
        assert!(ControllerState::Idle.ensure_idle::<(), ()>().is_ok());
        for state in [
            ControllerState::Uninitialized,
            ControllerState::Resetting,
            ControllerState::Initializing,
            ControllerState::Transferring,
            ControllerState::Refreshing,
            ControllerState::DeepSleep,
        ] {
            assert!(matches!(
                state.ensure_idle::<(), ()>(),
                Err(Error::NotReady(s)) if s == state
            ));
        }
    }

    #[test]
    fn advance_moves_state() {
        let mut state = ControllerState::default();
        state.advance(ControllerState::Resetting);
        assert_eq!(state, ControllerState::Resetting);
    }
}
