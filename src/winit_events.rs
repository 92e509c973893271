use glam::{UVec2, Vec2, vec2};
use winit::event::{ElementState, TouchPhase, WindowEvent};

use crate::*;

/// Turns `winit` window events into [`InputEvent`]s.
///
/// Mouse buttons carry no position in `winit`, so the last cursor position is remembered and attached to them.
#[derive(Debug, Default)]
pub struct EventTranslator {
    cursor_position: Vec2,
}

impl EventTranslator {
    pub fn cursor_position(&self) -> Vec2 {
        return self.cursor_position;
    }

    /// Returns `None` for the events nothing in the crate cares about.
    pub fn translate(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::CloseRequested => return Some(InputEvent::Quit),
            WindowEvent::Resized(size) => {
                return Some(InputEvent::Resized { size: UVec2::new(size.width, size.height) });
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_position = vec2(position.x as f32, position.y as f32);
                return Some(InputEvent::PointerMoved { position: self.cursor_position });
            }
            WindowEvent::MouseInput { button, state, .. } => {
                let position = self.cursor_position;
                match state {
                    ElementState::Pressed => return Some(InputEvent::PointerPressed { position, button: *button }),
                    ElementState::Released => return Some(InputEvent::PointerReleased { position, button: *button }),
                }
            }
            WindowEvent::Touch(touch) => {
                let id = touch.id;
                let position = vec2(touch.location.x as f32, touch.location.y as f32);
                match touch.phase {
                    TouchPhase::Started => return Some(InputEvent::TouchPressed { id, position }),
                    TouchPhase::Moved => return Some(InputEvent::TouchMoved { id, position }),
                    TouchPhase::Ended => return Some(InputEvent::TouchReleased { id, position }),
                    TouchPhase::Cancelled => return Some(InputEvent::TouchCancelled { id }),
                }
            }
            WindowEvent::KeyboardInput { event, is_synthetic, .. } => {
                if *is_synthetic {
                    return None;
                }
                let key = event.logical_key.clone();
                match event.state {
                    ElementState::Pressed => {
                        let text = event.text.as_ref().map(|t| t.to_string());
                        return Some(InputEvent::KeyPressed { key, text });
                    }
                    ElementState::Released => return Some(InputEvent::KeyReleased { key }),
                }
            }
            _ => return None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::{PhysicalPosition, PhysicalSize};
    use winit::event::{DeviceId, MouseButton, Touch};

    fn device() -> DeviceId {
        // SAFETY: only used as an opaque value in events that never reach winit.
        return unsafe { DeviceId::dummy() };
    }

    #[test]
    fn test_mouse_buttons_use_last_cursor_position() {
        let mut translator = EventTranslator::default();

        let moved = WindowEvent::CursorMoved { device_id: device(), position: PhysicalPosition::new(12.0, 34.0) };
        assert_eq!(translator.translate(&moved), Some(InputEvent::PointerMoved { position: vec2(12.0, 34.0) }));

        let pressed = WindowEvent::MouseInput { device_id: device(), state: ElementState::Pressed, button: MouseButton::Left };
        assert_eq!(
            translator.translate(&pressed),
            Some(InputEvent::PointerPressed { position: vec2(12.0, 34.0), button: MouseButton::Left })
        );
    }

    #[test]
    fn test_touch() {
        let mut translator = EventTranslator::default();
        let touch = |phase| {
            WindowEvent::Touch(Touch {
                device_id: device(),
                phase,
                location: PhysicalPosition::new(5.0, 6.0),
                force: None,
                id: 7,
            })
        };

        assert_eq!(
            translator.translate(&touch(TouchPhase::Started)),
            Some(InputEvent::TouchPressed { id: 7, position: vec2(5.0, 6.0) })
        );
        assert_eq!(
            translator.translate(&touch(TouchPhase::Ended)),
            Some(InputEvent::TouchReleased { id: 7, position: vec2(5.0, 6.0) })
        );
        assert_eq!(translator.translate(&touch(TouchPhase::Cancelled)), Some(InputEvent::TouchCancelled { id: 7 }));
        // touches don't move the mouse cursor
        assert_eq!(translator.cursor_position(), Vec2::ZERO);
    }

    #[test]
    fn test_window_events() {
        let mut translator = EventTranslator::default();
        assert_eq!(translator.translate(&WindowEvent::CloseRequested), Some(InputEvent::Quit));
        assert_eq!(
            translator.translate(&WindowEvent::Resized(PhysicalSize::new(800, 480))),
            Some(InputEvent::Resized { size: UVec2::new(800, 480) })
        );
        assert_eq!(translator.translate(&WindowEvent::Focused(true)), None);
    }
}
