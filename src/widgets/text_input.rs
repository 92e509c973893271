use winit::keyboard::{Key, NamedKey};

use crate::input::Press;
use crate::string_edit::StringEdit;
use crate::widgets::label::TextBox;
use crate::*;

/// A one-line text field. Focused by clicking it, edited with the on-screen keyboard or a physical one.
#[derive(Clone)]
pub struct TextInput {
    pub(crate) text_box: TextBox,
    active: bool,
    keyboard: VirtualKeyboard,
}

impl TextInput {
    pub const NAME: &'static str = "TextInput";
    pub const ATTRS: Attrs = TextBox::ATTRS;

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        let text_box = TextBox::new(Self::NAME, &params)?;
        let keyboard = VirtualKeyboard::new(text_box.font.clone(), text_box.text_size);
        return Ok(TextInput { text_box, active: false, keyboard });
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;
        let restyle = params.font.is_some() || params.text_size.is_some();
        self.text_box.apply(&params)?;
        if restyle {
            self.keyboard.set_font(self.text_box.font.clone(), self.text_box.text_size);
        }
        return Ok(());
    }

    pub fn draw(&self, surface: &mut Surface) {
        self.text_box.draw(surface);
        if self.active {
            self.keyboard.draw(surface);
        }
    }

    pub fn feed(&mut self, input: &FrameInput) -> Feedback {
        let rect = self.text_box.rect();
        let keyboard_area = VirtualKeyboard::area(input.surface_size);
        let mut edited = false;

        for event in input.events {
            if let Some(Press::Up(position)) = event.press() {
                if rect.contains(position) {
                    self.active = true;
                } else if self.active {
                    if keyboard_area.contains(position) {
                        if let Some(action) = VirtualKeyboard::key_at(input.surface_size, position) {
                            edited |= self.apply_key(action);
                        }
                    } else {
                        self.active = false;
                    }
                }
                continue;
            }

            if let InputEvent::KeyPressed { key, text } = event {
                if self.active {
                    edited |= self.apply_physical_key(key, text.as_deref());
                }
            }
        }

        if edited {
            // Rendering only fails on geometry, which was validated when the size was set.
            if let Err(err) = self.text_box.render() {
                log::warn!("Couldn't re-render {}: {}", Self::NAME, err);
            }
        }

        let hovered = input.pointer.is_some_and(|p| rect.contains(p) || (self.active && keyboard_area.contains(p)));
        return Feedback { fired: None, hovered };
    }

    fn apply_key(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::Insert(c) => {
                self.text_box.text.push(c);
                return true;
            }
            KeyAction::Space => {
                self.text_box.text.push(' ');
                return true;
            }
            KeyAction::Backspace => return self.text_box.text.pop_grapheme(),
            KeyAction::Done => {
                self.active = false;
                return false;
            }
        }
    }

    fn apply_physical_key(&mut self, key: &Key, text: Option<&str>) -> bool {
        match key {
            Key::Named(NamedKey::Backspace) => return self.text_box.text.pop_grapheme(),
            Key::Named(NamedKey::Enter) | Key::Named(NamedKey::Escape) => {
                self.active = false;
                return false;
            }
            _ => {
                let Some(text) = text else { return false };
                return self.text_box.text.insert_typed(text);
            }
        }
    }

    pub fn is_active(&self) -> bool {
        return self.active;
    }

    pub fn text(&self) -> &str {
        return &self.text_box.text;
    }

    pub fn rect(&self) -> PixelRect {
        return self.text_box.rect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::tests::{click_at, tap_at};
    use glam::{UVec2, vec2};

    const SCREEN: UVec2 = UVec2::new(1000, 500);

    fn text_input() -> TextInput {
        return TextInput::new(Params::new().position(10, 10).size(200, 40)).unwrap();
    }

    fn feed(input: &mut TextInput, events: &[InputEvent]) -> Feedback {
        let pointer = events.last().and_then(|e| e.position());
        return input.feed(&FrameInput::new(events, pointer, SCREEN));
    }

    fn typed(s: &str) -> InputEvent {
        return InputEvent::KeyPressed { key: Key::Character(s.into()), text: Some(s.to_string()) };
    }

    #[test]
    fn test_focus() {
        let mut input = text_input();
        assert!(input.is_active() == false);

        feed(&mut input, &click_at(20.0, 20.0));
        assert!(input.is_active());

        // taps on the keyboard keep the focus
        feed(&mut input, &tap_at(50.0, 360.0));
        assert!(input.is_active());

        // anywhere else drops it
        feed(&mut input, &click_at(500.0, 200.0));
        assert!(input.is_active() == false);
    }

    #[test]
    fn test_virtual_keys() {
        let mut input = text_input();
        feed(&mut input, &click_at(20.0, 20.0));

        feed(&mut input, &tap_at(50.0, 360.0)); // a
        feed(&mut input, &tap_at(150.0, 310.0)); // 2
        feed(&mut input, &tap_at(500.0, 480.0)); // space
        feed(&mut input, &tap_at(250.0, 400.0)); // d
        assert_eq!(input.text(), "a2 d");

        feed(&mut input, &tap_at(50.0, 480.0)); // backspace
        assert_eq!(input.text(), "a2 ");

        feed(&mut input, &tap_at(950.0, 480.0)); // done
        assert!(input.is_active() == false);
    }

    #[test]
    fn test_physical_keys() {
        let mut input = text_input();
        feed(&mut input, &click_at(20.0, 20.0));

        feed(&mut input, &[typed("h"), typed("é"), typed("y")]);
        assert_eq!(input.text(), "héy");

        let backspace = InputEvent::KeyPressed { key: Key::Named(NamedKey::Backspace), text: None };
        feed(&mut input, &[backspace.clone(), backspace]);
        assert_eq!(input.text(), "h");

        let enter = InputEvent::KeyPressed { key: Key::Named(NamedKey::Enter), text: Some("\r".to_string()) };
        feed(&mut input, &[enter]);
        assert!(input.is_active() == false);
        assert_eq!(input.text(), "h");
    }

    #[test]
    fn test_unfocused_ignores_input() {
        let mut input = text_input();
        feed(&mut input, &[typed("x")]);
        feed(&mut input, &tap_at(50.0, 360.0));
        assert_eq!(input.text(), "");
        assert!(input.is_active() == false);
    }

    #[test]
    fn test_keyboard_drawn_only_when_active() {
        let mut input = text_input();
        let mut surface = surface::new_surface(SCREEN, "test").unwrap();
        input.draw(&mut surface);
        assert_eq!(surface.pixel(500, 450).unwrap().alpha(), 0);

        feed(&mut input, &click_at(20.0, 20.0));
        input.draw(&mut surface);
        assert_eq!(surface.pixel(500, 450).unwrap().alpha(), 255);
    }

    #[test]
    fn test_press_on_field_then_release_elsewhere() {
        let mut input = text_input();
        let events = [
            InputEvent::TouchPressed { id: 0, position: vec2(20.0, 20.0) },
            InputEvent::TouchReleased { id: 0, position: vec2(600.0, 20.0) },
        ];
        feed(&mut input, &events);
        assert!(input.is_active() == false);
    }
}
