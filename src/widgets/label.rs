use glam::{IVec2, UVec2};

use crate::params::missing;
use crate::*;

/// A rectangle of flat color with a line of text on it. The common core of [`Label`], [`Button`] and [`TextInput`].
#[derive(Clone, Debug)]
pub(crate) struct TextBox {
    pub widget: &'static str,
    pub position: IVec2,
    pub size: UVec2,
    pub text: String,
    pub fg: Color,
    pub bg: Color,
    pub text_size: f32,
    pub text_offset: IVec2,
    pub transparency: u8,
    pub font: Option<Font>,
    surface: Surface,
}

impl TextBox {
    pub const ATTRS: Attrs = Attrs::POSITION
        .union(Attrs::SIZE)
        .union(Attrs::TEXT)
        .union(Attrs::FG)
        .union(Attrs::BG)
        .union(Attrs::TEXT_SIZE)
        .union(Attrs::TEXT_OFFSET)
        .union(Attrs::TRANSPARENCY)
        .union(Attrs::FONT);

    /// Creates a box with default colors, then applies `params`. Position and size are required.
    pub fn new(widget: &'static str, params: &Params) -> Result<Self> {
        let position = params.position.ok_or(missing(widget, "position"))?;
        let size = params.size.ok_or(missing(widget, "size"))?;

        let mut text_box = TextBox {
            widget,
            position,
            size,
            text: String::new(),
            fg: Color::WHITE,
            bg: Color::BLACK,
            text_size: 20.0,
            text_offset: IVec2::ZERO,
            transparency: 255,
            font: None,
            surface: surface::new_surface(size, widget)?,
        };
        text_box.apply(params)?;
        return Ok(text_box);
    }

    /// Overwrites the attributes set in `params` and re-renders.
    pub fn apply(&mut self, params: &Params) -> Result<()> {
        if let Some(size) = params.size {
            if size.x == 0 || size.y == 0 {
                return Err(Error::InvalidGeometry { widget: self.widget, reason: "size must be non-zero" });
            }
        }

        if let Some(position) = params.position {
            self.position = position;
        }
        if let Some(size) = params.size {
            self.size = size;
        }
        if let Some(text) = &params.text {
            self.text = text.clone();
        }
        if let Some(fg) = params.fg {
            self.fg = fg;
        }
        if let Some(bg) = params.bg {
            self.bg = bg;
        }
        if let Some(text_size) = params.text_size {
            self.text_size = text_size;
        }
        if let Some(text_offset) = params.text_offset {
            self.text_offset = text_offset;
        }
        if let Some(transparency) = params.transparency {
            self.transparency = transparency;
        }
        if let Some(font) = &params.font {
            self.font = Some(font.clone());
        }

        return self.render();
    }

    pub fn render(&mut self) -> Result<()> {
        if surface::size_of(&self.surface) != self.size {
            self.surface = surface::new_surface(self.size, self.widget)?;
        }
        surface::fill(&mut self.surface, self.bg);

        if let Some(text) = text::render_text(self.font.as_ref(), &self.text, self.text_size, self.fg) {
            surface::blit(&mut self.surface, &text, self.text_offset, 255);
        }
        return Ok(());
    }

    pub fn rect(&self) -> PixelRect {
        return PixelRect::new(self.position, self.size);
    }

    pub fn draw(&self, dest: &mut Surface) {
        surface::blit(dest, &self.surface, self.position, self.transparency);
    }

    #[cfg(test)]
    pub fn cached(&self) -> &Surface {
        return &self.surface;
    }
}

/// Displays a line of text.
#[derive(Clone, Debug)]
pub struct Label {
    pub(crate) text_box: TextBox,
}

impl Label {
    pub const NAME: &'static str = "Label";
    pub const ATTRS: Attrs = TextBox::ATTRS;

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        return Ok(Label { text_box: TextBox::new(Self::NAME, &params)? });
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;
        return self.text_box.apply(&params);
    }

    pub fn draw(&self, surface: &mut Surface) {
        self.text_box.draw(surface);
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

    fn label() -> Label {
        let params = Params::new()
            .position(10, 20)
            .size(30, 10)
            .text("12:00")
            .bg(Color::GREEN)
            .fg(Color::BLUE)
            .text_size(50.0);
        return Label::new(params).unwrap();
    }

    #[test]
    fn test_required_attributes() {
        let err = Label::new(Params::new().size(10, 10)).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Label", attribute: "position" }));

        let err = Label::new(Params::new().position(0, 0)).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Label", attribute: "size" }));

        let err = Label::new(Params::new().position(0, 0).size(0, 10)).unwrap_err();
        assert!(matches!(err, Error::InvalidGeometry { .. }));
    }

    #[test]
    fn test_configure_overwrites_only_given_attributes() {
        let mut label = label();
        label.configure(Params::new().text("12:01").bg(Color::RED)).unwrap();

        let text_box = &label.text_box;
        assert_eq!(text_box.text, "12:01");
        assert_eq!(text_box.bg, Color::RED);
        assert_eq!(text_box.fg, Color::BLUE);
        assert_eq!(text_box.position, IVec2::new(10, 20));
        assert_eq!(text_box.text_size, 50.0);

        let pixel = text_box.cached().pixel(0, 0).unwrap();
        assert_eq!((pixel.red(), pixel.green()), (255, 0));
    }

    #[test]
    fn test_unsupported_attribute_changes_nothing() {
        let mut label = label();
        let before = label.text_box.cached().clone();

        let err = label.configure(Params::new().text("nope").fill(true)).unwrap_err();
        assert!(matches!(err, Error::UnsupportedAttribute { widget: "Label", attribute: "fill" }));

        assert_eq!(label.text(), "12:00");
        assert_eq!(label.text_box.cached().data(), before.data());
    }

    #[test]
    fn test_resize_reallocates() {
        let mut label = label();
        label.configure(Params::new().size(64, 32)).unwrap();
        assert_eq!(surface::size_of(label.text_box.cached()), UVec2::new(64, 32));
    }
}
