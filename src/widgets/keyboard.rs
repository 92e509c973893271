use glam::{IVec2, UVec2, Vec2};

use crate::*;

const ROWS: [&str; 4] = ["1234567890", "azertyuiop", "qsdfghjklm", "wxcvbn,.'-"];
const COLUMNS: u32 = 10;
const ROW_COUNT: u32 = ROWS.len() as u32 + 1;
const INSET: i32 = 2;

const BACKGROUND: Color = Color::rgb(0x20, 0x20, 0x20);
const KEY: Color = Color::rgb(0x45, 0x45, 0x45);

/// What tapping a virtual key does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Insert(char),
    Backspace,
    Space,
    /// Closes the keyboard.
    Done,
}

impl KeyAction {
    fn label(self) -> String {
        match self {
            KeyAction::Insert(c) => return c.to_string(),
            KeyAction::Backspace => return "<-".to_string(),
            KeyAction::Space => return "space".to_string(),
            KeyAction::Done => return "OK".to_string(),
        }
    }
}

// (action, first column, width in columns)
const BOTTOM_ROW: [(KeyAction, u32, u32); 3] = [
    (KeyAction::Backspace, 0, 3),
    (KeyAction::Space, 3, 4),
    (KeyAction::Done, 7, 3),
];

/// An on-screen AZERTY keyboard docked along the bottom of the destination surface.
///
/// The layout is a pure function of the surface size: the keyboard is 40% of the surface high and spans its whole width.
#[derive(Clone)]
pub struct VirtualKeyboard {
    font: Option<Font>,
    text_size: f32,
    labels: Vec<(KeyAction, Option<Surface>)>,
}

impl VirtualKeyboard {
    pub fn new(font: Option<Font>, text_size: f32) -> Self {
        let mut keyboard = VirtualKeyboard { font, text_size, labels: Vec::new() };
        keyboard.render_labels();
        return keyboard;
    }

    pub fn set_font(&mut self, font: Option<Font>, text_size: f32) {
        self.font = font;
        self.text_size = text_size;
        self.render_labels();
    }

    fn render_labels(&mut self) {
        self.labels = Self::actions()
            .map(|action| {
                let label = text::render_text(self.font.as_ref(), &action.label(), self.text_size, Color::WHITE);
                (action, label)
            })
            .collect();
    }

    fn actions() -> impl Iterator<Item = KeyAction> {
        let letters = ROWS.iter().flat_map(|row| row.chars().map(KeyAction::Insert));
        return letters.chain(BOTTOM_ROW.iter().map(|(action, _, _)| *action));
    }

    /// The region the keyboard covers on a surface of `surface_size`.
    pub fn area(surface_size: UVec2) -> PixelRect {
        let height = surface_size.y * 2 / 5;
        return PixelRect::from_xywh(0, (surface_size.y - height) as i32, surface_size.x, height);
    }

    /// Every key with its rectangle, in layout order.
    pub fn keys(surface_size: UVec2) -> Vec<(KeyAction, PixelRect)> {
        let area = Self::area(surface_size);
        let key_width = area.size.x / COLUMNS;
        let row_height = area.size.y / ROW_COUNT;
        let key_rect = |column: u32, row: u32, span: u32| {
            let position = area.position + IVec2::new((column * key_width) as i32, (row * row_height) as i32);
            return PixelRect::new(position, UVec2::new(span * key_width, row_height));
        };

        let mut keys = Vec::with_capacity(ROWS.len() * COLUMNS as usize + BOTTOM_ROW.len());
        for (row, letters) in ROWS.iter().enumerate() {
            for (column, c) in letters.chars().enumerate() {
                keys.push((KeyAction::Insert(c), key_rect(column as u32, row as u32, 1)));
            }
        }
        for (action, column, span) in BOTTOM_ROW {
            keys.push((action, key_rect(column, ROWS.len() as u32, span)));
        }
        return keys;
    }

    pub fn key_at(surface_size: UVec2, point: Vec2) -> Option<KeyAction> {
        if Self::area(surface_size).contains(point) == false {
            return None;
        }
        return Self::keys(surface_size).into_iter().find(|(_, rect)| rect.contains(point)).map(|(action, _)| action);
    }

    pub fn draw(&self, surface: &mut Surface) {
        let size = surface::size_of(surface);
        surface::fill_rect(surface, Self::area(size), BACKGROUND);

        for ((action, rect), (_, label)) in Self::keys(size).into_iter().zip(&self.labels) {
            let inner = PixelRect::new(
                rect.position + IVec2::splat(INSET),
                rect.size.saturating_sub(UVec2::splat(2 * INSET as u32)),
            );
            surface::fill_rect(surface, inner, KEY);

            if let Some(label) = label {
                let centered = rect.position + (rect.size.as_ivec2() - surface::size_of(label).as_ivec2()) / 2;
                surface::blit(surface, label, centered, 255);
            } else {
                log::trace!("No font for virtual key {:?}", action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::vec2;

    const SCREEN: UVec2 = UVec2::new(1000, 500);

    #[test]
    fn test_layout() {
        assert_eq!(VirtualKeyboard::area(SCREEN), PixelRect::from_xywh(0, 300, 1000, 200));
        assert_eq!(VirtualKeyboard::keys(SCREEN).len(), 43);

        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(50.0, 310.0)), Some(KeyAction::Insert('1')));
        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(50.0, 360.0)), Some(KeyAction::Insert('a')));
        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(950.0, 430.0)), Some(KeyAction::Insert('-')));
        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(50.0, 480.0)), Some(KeyAction::Backspace));
        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(500.0, 480.0)), Some(KeyAction::Space));
        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(999.0, 499.0)), Some(KeyAction::Done));
        assert_eq!(VirtualKeyboard::key_at(SCREEN, vec2(50.0, 250.0)), None);
    }

    #[test]
    fn test_draw_stays_in_area() {
        let keyboard = VirtualKeyboard::new(None, 20.0);
        let mut surface = surface::new_surface(SCREEN, "test").unwrap();
        keyboard.draw(&mut surface);

        assert_eq!(surface.pixel(500, 299).unwrap().alpha(), 0);
        assert_eq!(surface.pixel(500, 300).unwrap().alpha(), 255);
        // key gaps show the background
        let gap = surface.pixel(0, 300).unwrap();
        assert_eq!((gap.red(), gap.green(), gap.blue()), (0x20, 0x20, 0x20));
        let key = surface.pixel(50, 320).unwrap();
        assert_eq!((key.red(), key.green(), key.blue()), (0x45, 0x45, 0x45));
    }
}
