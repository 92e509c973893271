//! The closed set of widgets a [`Window`] can hold.

mod button;
mod button_image;
mod image;
mod keyboard;
mod label;
mod shapes;
mod text_input;

pub use button::Button;
pub use button_image::ButtonImage;
pub use image::Image;
pub use keyboard::{KeyAction, VirtualKeyboard};
pub use label::Label;
pub use shapes::{Line, Polygon};
pub use text_input::TextInput;

use std::fmt;

use glam::IVec2;

use crate::*;

/// What a widget reports back after being fed a frame's input.
#[derive(Debug, Default, Clone)]
pub struct Feedback {
    /// The widget's callback, if this frame completed a click on it. At most one per frame.
    pub fired: Option<Callback>,
    /// Whether the pointer is over an interactive part of the widget.
    pub hovered: bool,
}

/// A drawable, input-reactive UI element.
#[derive(Clone)]
pub enum Widget {
    Image(Image),
    Label(Label),
    Button(Button),
    ButtonImage(ButtonImage),
    TextInput(TextInput),
    Line(Line),
    Polygon(Polygon),
}

impl Widget {
    /// The variant's name, as used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Widget::Image(_) => return Image::NAME,
            Widget::Label(_) => return Label::NAME,
            Widget::Button(_) => return Button::NAME,
            Widget::ButtonImage(_) => return ButtonImage::NAME,
            Widget::TextInput(_) => return TextInput::NAME,
            Widget::Line(_) => return Line::NAME,
            Widget::Polygon(_) => return Polygon::NAME,
        }
    }

    /// The attributes `configure` accepts for this variant.
    pub fn attrs(&self) -> Attrs {
        match self {
            Widget::Image(_) => return Image::ATTRS,
            Widget::Label(_) => return Label::ATTRS,
            Widget::Button(_) => return Button::ATTRS,
            Widget::ButtonImage(_) => return ButtonImage::ATTRS,
            Widget::TextInput(_) => return TextInput::ATTRS,
            Widget::Line(_) => return Line::ATTRS,
            Widget::Polygon(_) => return Polygon::ATTRS,
        }
    }

    /// Composites the widget's cached visual onto `surface`.
    pub fn draw(&self, surface: &mut Surface) {
        match self {
            Widget::Image(w) => w.draw(surface),
            Widget::Label(w) => w.draw(surface),
            Widget::Button(w) => w.draw(surface),
            Widget::ButtonImage(w) => w.draw(surface),
            Widget::TextInput(w) => w.draw(surface),
            Widget::Line(w) => w.draw(surface),
            Widget::Polygon(w) => w.draw(surface),
        }
    }

    /// Consumes this frame's input. Widgets that don't react to input return an empty [`Feedback`].
    pub fn feed(&mut self, input: &FrameInput) -> Feedback {
        match self {
            Widget::Button(w) => return w.feed(input),
            Widget::ButtonImage(w) => return w.feed(input),
            Widget::TextInput(w) => return w.feed(input),
            Widget::Image(_) | Widget::Label(_) | Widget::Line(_) | Widget::Polygon(_) => {
                return Feedback::default();
            }
        }
    }

    /// Overwrites the attributes set in `params`. On error, nothing is changed.
    pub fn configure(&mut self, params: Params) -> Result<()> {
        match self {
            Widget::Image(w) => return w.configure(params),
            Widget::Label(w) => return w.configure(params),
            Widget::Button(w) => return w.configure(params),
            Widget::ButtonImage(w) => return w.configure(params),
            Widget::TextInput(w) => return w.configure(params),
            Widget::Line(w) => return w.configure(params),
            Widget::Polygon(w) => return w.configure(params),
        }
    }

    /// The top left corner of the widget.
    pub fn position(&self) -> IVec2 {
        match self {
            Widget::Image(w) => return w.rect().position,
            Widget::Label(w) => return w.rect().position,
            Widget::Button(w) => return w.rect().position,
            Widget::ButtonImage(w) => return w.rect().position,
            Widget::TextInput(w) => return w.rect().position,
            Widget::Line(w) => return w.bounds().position,
            Widget::Polygon(w) => return w.bounds().position,
        }
    }

    /// The widget's text, for the variants that have one.
    pub fn text(&self) -> Option<&str> {
        match self {
            Widget::Label(w) => return Some(w.text()),
            Widget::Button(w) => return Some(w.text()),
            Widget::ButtonImage(w) => return Some(w.text()),
            Widget::TextInput(w) => return Some(w.text()),
            Widget::Image(_) | Widget::Line(_) | Widget::Polygon(_) => return None,
        }
    }

    /// Tries to turn a type-erased value into a widget. Accepts a `Widget` or any of the variant types.
    pub fn from_any(value: Box<dyn std::any::Any>) -> std::result::Result<Widget, Box<dyn std::any::Any>> {
        let value = match value.downcast::<Widget>() {
            Ok(widget) => return Ok(*widget),
            Err(value) => value,
        };
        let value = match value.downcast::<Image>() {
            Ok(w) => return Ok(Widget::Image(*w)),
            Err(value) => value,
        };
        let value = match value.downcast::<Label>() {
            Ok(w) => return Ok(Widget::Label(*w)),
            Err(value) => value,
        };
        let value = match value.downcast::<Button>() {
            Ok(w) => return Ok(Widget::Button(*w)),
            Err(value) => value,
        };
        let value = match value.downcast::<ButtonImage>() {
            Ok(w) => return Ok(Widget::ButtonImage(*w)),
            Err(value) => value,
        };
        let value = match value.downcast::<TextInput>() {
            Ok(w) => return Ok(Widget::TextInput(*w)),
            Err(value) => value,
        };
        let value = match value.downcast::<Line>() {
            Ok(w) => return Ok(Widget::Line(*w)),
            Err(value) => value,
        };
        match value.downcast::<Polygon>() {
            Ok(w) => return Ok(Widget::Polygon(*w)),
            Err(value) => return Err(value),
        }
    }
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.position();
        write!(f, "{} at ({}, {})", self.kind(), position.x, position.y)
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),*) => {
        $(
            impl From<$variant> for Widget {
                fn from(widget: $variant) -> Self {
                    return Widget::$variant(widget);
                }
            }
        )*
    };
}

impl_from_variant!(Image, Label, Button, ButtonImage, TextInput, Line, Polygon);

#[cfg(test)]
mod tests {
    use super::*;

    fn label() -> Widget {
        return Label::new(Params::new().position(3, 4).size(10, 10).text("hi")).unwrap().into();
    }

    #[test]
    fn test_from_any() {
        let widget = Widget::from_any(Box::new(label())).unwrap();
        assert_eq!(widget.kind(), "Label");

        let line = Line::new(Params::new().start(0, 0).end(5, 5)).unwrap();
        let widget = Widget::from_any(Box::new(line)).unwrap();
        assert_eq!(widget.kind(), "Line");

        assert!(Widget::from_any(Box::new("not a widget")).is_err());
        assert!(Widget::from_any(Box::new(42_u32)).is_err());
    }

    #[test]
    fn test_empty_configure_changes_nothing() {
        let mut widget = label();
        let mut before = surface::new_surface(glam::UVec2::new(20, 20), "test").unwrap();
        widget.draw(&mut before);

        widget.configure(Params::new()).unwrap();

        let mut after = surface::new_surface(glam::UVec2::new(20, 20), "test").unwrap();
        widget.draw(&mut after);
        assert_eq!(before.data(), after.data());
        assert_eq!(widget.text(), Some("hi"));
    }

    #[test]
    fn test_draw_is_idempotent() {
        let widget = label();
        let mut a = surface::new_surface(glam::UVec2::new(20, 20), "test").unwrap();
        let mut b = a.clone();
        widget.draw(&mut a);
        widget.draw(&mut b);
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn test_debug() {
        assert_eq!(format!("{:?}", label()), "Label at (3, 4)");
    }
}
