use ahash::AHashMap;
use glam::{UVec2, Vec2};
use winit::event::MouseButton;
use winit::keyboard::Key;

/// One input event, translated from the platform's event stream.
///
/// Positions are in surface pixels.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    PointerMoved { position: Vec2 },
    PointerPressed { position: Vec2, button: MouseButton },
    PointerReleased { position: Vec2, button: MouseButton },
    TouchPressed { id: u64, position: Vec2 },
    TouchMoved { id: u64, position: Vec2 },
    TouchReleased { id: u64, position: Vec2 },
    TouchCancelled { id: u64 },
    KeyPressed { key: Key, text: Option<String> },
    KeyReleased { key: Key },
    Resized { size: UVec2 },
    /// The platform asked the application to close.
    Quit,
}

/// The part of an event that matters for clicking, with mouse and touch unified.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Press {
    Down(Vec2),
    Up(Vec2),
    Cancel,
}

/// Which finger or mouse an event comes from. Each one presses and releases on its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerId {
    Mouse,
    Touch(u64),
}

impl InputEvent {
    pub fn is_quit(&self) -> bool {
        return matches!(self, InputEvent::Quit);
    }

    /// Primary-button and touch presses/releases. Other buttons don't click.
    pub fn press(&self) -> Option<Press> {
        match self {
            InputEvent::PointerPressed { position, button: MouseButton::Left } => return Some(Press::Down(*position)),
            InputEvent::PointerReleased { position, button: MouseButton::Left } => return Some(Press::Up(*position)),
            InputEvent::TouchPressed { position, .. } => return Some(Press::Down(*position)),
            InputEvent::TouchReleased { position, .. } => return Some(Press::Up(*position)),
            InputEvent::TouchCancelled { .. } => return Some(Press::Cancel),
            _ => return None,
        }
    }

    pub fn pointer(&self) -> Option<PointerId> {
        match self {
            InputEvent::PointerMoved { .. }
            | InputEvent::PointerPressed { .. }
            | InputEvent::PointerReleased { .. } => return Some(PointerId::Mouse),
            InputEvent::TouchPressed { id, .. }
            | InputEvent::TouchMoved { id, .. }
            | InputEvent::TouchReleased { id, .. }
            | InputEvent::TouchCancelled { id } => return Some(PointerId::Touch(*id)),
            _ => return None,
        }
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            InputEvent::PointerMoved { position }
            | InputEvent::PointerPressed { position, .. }
            | InputEvent::PointerReleased { position, .. }
            | InputEvent::TouchPressed { position, .. }
            | InputEvent::TouchMoved { position, .. }
            | InputEvent::TouchReleased { position, .. } => return Some(*position),
            _ => return None,
        }
    }
}

/// Everything a widget gets to see during one frame's `feed`.
///
/// Every widget in a window receives the same `FrameInput`.
#[derive(Clone, Copy, Debug)]
pub struct FrameInput<'a> {
    pub events: &'a [InputEvent],
    /// The last known pointer position, after this frame's events.
    pub pointer: Option<Vec2>,
    /// The size of the destination surface the widgets are drawn on.
    pub surface_size: UVec2,
}

impl<'a> FrameInput<'a> {
    pub fn new(events: &'a [InputEvent], pointer: Option<Vec2>, surface_size: UVec2) -> Self {
        return Self { events, pointer, surface_size };
    }
}

/// Matches presses with releases so that a widget only counts a click when both ends land on it.
///
/// Presses are tracked per pointer: a second finger landing elsewhere doesn't spoil the first finger's click.
#[derive(Clone, Debug, Default)]
pub(crate) struct ClickTracker {
    pressed_inside: AHashMap<PointerId, bool>,
}

impl ClickTracker {
    /// Returns `true` if this batch completed at least one click on the region described by `hit`.
    ///
    /// Several clicks in the same batch still count once.
    pub fn update(&mut self, events: &[InputEvent], hit: impl Fn(Vec2) -> bool) -> bool {
        let mut clicked = false;
        for event in events {
            let (Some(press), Some(pointer)) = (event.press(), event.pointer()) else {
                continue;
            };
            match press {
                Press::Down(position) => {
                    self.pressed_inside.insert(pointer, hit(position));
                }
                Press::Up(position) => {
                    if self.pressed_inside.remove(&pointer) == Some(true) && hit(position) {
                        clicked = true;
                    }
                }
                Press::Cancel => {
                    self.pressed_inside.remove(&pointer);
                }
            }
        }
        return clicked;
    }

    pub fn reset(&mut self) {
        self.pressed_inside.clear();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use glam::vec2;

    pub fn click_at(x: f32, y: f32) -> Vec<InputEvent> {
        return vec![
            InputEvent::PointerPressed { position: vec2(x, y), button: MouseButton::Left },
            InputEvent::PointerReleased { position: vec2(x, y), button: MouseButton::Left },
        ];
    }

    pub fn tap_at(x: f32, y: f32) -> Vec<InputEvent> {
        return vec![
            InputEvent::TouchPressed { id: 0, position: vec2(x, y) },
            InputEvent::TouchReleased { id: 0, position: vec2(x, y) },
        ];
    }

    #[test]
    fn test_click_needs_press_and_release_inside() {
        let inside = |p: Vec2| p.x < 10.0;
        let mut tracker = ClickTracker::default();

        assert!(tracker.update(&click_at(5.0, 5.0), inside));
        assert!(tracker.update(&tap_at(5.0, 5.0), inside));
        assert!(tracker.update(&click_at(50.0, 5.0), inside) == false);

        // press inside, release outside
        let drag_out = [
            InputEvent::PointerPressed { position: vec2(5.0, 5.0), button: MouseButton::Left },
            InputEvent::PointerReleased { position: vec2(50.0, 5.0), button: MouseButton::Left },
        ];
        assert!(tracker.update(&drag_out, inside) == false);

        // a release without a press
        let release = [InputEvent::PointerReleased { position: vec2(5.0, 5.0), button: MouseButton::Left }];
        assert!(tracker.update(&release, inside) == false);
    }

    #[test]
    fn test_click_spans_frames() {
        let inside = |_: Vec2| true;
        let mut tracker = ClickTracker::default();

        let press = [InputEvent::TouchPressed { id: 3, position: vec2(1.0, 1.0) }];
        let release = [InputEvent::TouchReleased { id: 3, position: vec2(1.0, 1.0) }];

        assert!(tracker.update(&press, inside) == false);
        assert!(tracker.update(&[], inside) == false);
        assert!(tracker.update(&release, inside));

        assert!(tracker.update(&press, inside) == false);
        assert!(tracker.update(&[InputEvent::TouchCancelled { id: 3 }], inside) == false);
        assert!(tracker.update(&release, inside) == false);
    }

    #[test]
    fn test_fingers_are_tracked_separately() {
        let inside = |p: Vec2| p.x < 100.0 && p.y < 100.0;
        let mut tracker = ClickTracker::default();

        // a palm lands and lifts outside while the first finger taps the button
        let events = [
            InputEvent::TouchPressed { id: 1, position: vec2(10.0, 10.0) },
            InputEvent::TouchPressed { id: 2, position: vec2(150.0, 150.0) },
            InputEvent::TouchReleased { id: 2, position: vec2(150.0, 150.0) },
            InputEvent::TouchReleased { id: 1, position: vec2(10.0, 10.0) },
        ];
        assert!(tracker.update(&events, inside));

        // a finger pressed outside can't be completed by another finger's release inside
        let events = [
            InputEvent::TouchPressed { id: 4, position: vec2(150.0, 150.0) },
            InputEvent::TouchPressed { id: 5, position: vec2(10.0, 10.0) },
            InputEvent::TouchReleased { id: 4, position: vec2(10.0, 10.0) },
        ];
        assert!(tracker.update(&events, inside) == false);
        assert!(tracker.update(&[InputEvent::TouchReleased { id: 5, position: vec2(12.0, 10.0) }], inside));

        // the mouse and a finger don't share a press either
        let events = [
            InputEvent::PointerPressed { position: vec2(10.0, 10.0), button: MouseButton::Left },
            InputEvent::TouchPressed { id: 7, position: vec2(150.0, 150.0) },
            InputEvent::PointerReleased { position: vec2(10.0, 10.0), button: MouseButton::Left },
        ];
        assert!(tracker.update(&events, inside));
    }

    #[test]
    fn test_right_button_does_not_click() {
        let mut tracker = ClickTracker::default();
        let events = [
            InputEvent::PointerPressed { position: vec2(1.0, 1.0), button: MouseButton::Right },
            InputEvent::PointerReleased { position: vec2(1.0, 1.0), button: MouseButton::Right },
        ];
        assert!(tracker.update(&events, |_| true) == false);
    }
}
