//! Pointer and wheel interaction.
//!
//! The controller turns raw input into pan/zoom [`Command`]s. It never
//! touches axis state or draws; the chart queues the commands and applies
//! them at the start of its next tick.

use crate::rect::Rect;
use glam::Vec2;

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
    Other(u16),
}

/// Host input, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Wheel scroll; positive `delta_y` scrolls down (zooms out).
    Wheel { delta_y: f32 },
    PointerPressed {
        position: Vec2,
        button: PointerButton,
    },
    PointerMoved {
        position: Vec2,
    },
    PointerReleased {
        button: PointerButton,
    },
    /// Restore the unzoomed view following the newest tick.
    ResetView,
}

/// A view change waiting to be applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Add to the zoom.
    Zoom(f64),
    /// Add to the pan accumulator, in domain units.
    Pan(f64),
    ResetView,
}

/// Gesture state machine for one surface.
#[derive(Debug, Clone)]
pub struct InteractionController {
    /// Surface bounds; presses outside are ignored.
    bounds: Rect,
    /// Wheel delta divisor.
    zoom_sensitivity: f32,
    /// Domain units per dragged pixel.
    pan_sensitivity: f32,
    /// Last drag position for calculating delta.
    last_drag_pos: Option<Vec2>,
    detached: bool,
}

impl InteractionController {
    pub fn new(zoom_sensitivity: f32, pan_sensitivity: f32) -> Self {
        Self {
            bounds: Rect::default(),
            zoom_sensitivity,
            pan_sensitivity,
            last_drag_pos: None,
            detached: false,
        }
    }

    /// Set the surface bounds.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Check if a drag is in progress.
    pub fn is_grabbing(&self) -> bool {
        self.last_drag_pos.is_some()
    }

    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// End any drag and ignore all further input.
    pub fn detach(&mut self) {
        self.detached = true;
        self.last_drag_pos = None;
    }

    /// Feed one event, returning the command it produces, if any.
    pub fn handle(&mut self, event: InputEvent) -> Option<Command> {
        if self.detached {
            return None;
        }

        match event {
            InputEvent::Wheel { delta_y } => {
                Some(Command::Zoom((delta_y / self.zoom_sensitivity) as f64))
            }
            InputEvent::PointerPressed {
                position,
                button: PointerButton::Primary,
            } if self.bounds.contains(position) => {
                self.last_drag_pos = Some(position);
                None
            }
            InputEvent::PointerPressed { .. } => None,
            InputEvent::PointerMoved { position } => {
                let last = self.last_drag_pos?;
                self.last_drag_pos = Some(position);
                let dx = position.x - last.x;
                (dx != 0.0).then(|| Command::Pan((-dx * self.pan_sensitivity) as f64))
            }
            InputEvent::PointerReleased { .. } => {
                self.last_drag_pos = None;
                None
            }
            InputEvent::ResetView => Some(Command::ResetView),
        }
    }
}

/// Converts winit window events into [`InputEvent`]s.
///
/// winit reports button presses without a position, so the adapter
/// remembers the last cursor position.
#[cfg(feature = "winit")]
#[derive(Debug, Clone, Default)]
pub struct WinitInputAdapter {
    cursor: Vec2,
}

#[cfg(feature = "winit")]
impl WinitInputAdapter {
    /// Pixels scrolled per wheel line.
    pub const LINE_HEIGHT: f32 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn convert(&mut self, event: &winit::event::WindowEvent) -> Option<InputEvent> {
        use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};

        match event {
            WindowEvent::MouseWheel { delta, .. } => {
                let delta_y = match delta {
                    MouseScrollDelta::LineDelta(_, y) => -y * Self::LINE_HEIGHT,
                    MouseScrollDelta::PixelDelta(pos) => -pos.y as f32,
                };
                Some(InputEvent::Wheel { delta_y })
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Vec2::new(position.x as f32, position.y as f32);
                Some(InputEvent::PointerMoved {
                    position: self.cursor,
                })
            }
            WindowEvent::MouseInput { state, button, .. } => {
                let button = match button {
                    MouseButton::Left => PointerButton::Primary,
                    MouseButton::Right => PointerButton::Secondary,
                    MouseButton::Middle => PointerButton::Middle,
                    MouseButton::Back => PointerButton::Other(3),
                    MouseButton::Forward => PointerButton::Other(4),
                    MouseButton::Other(id) => PointerButton::Other(*id),
                };
                Some(match state {
                    ElementState::Pressed => InputEvent::PointerPressed {
                        position: self.cursor,
                        button,
                    },
                    ElementState::Released => InputEvent::PointerReleased { button },
                })
            }
            _ => None,
        }
    }
}
