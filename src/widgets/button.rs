use crate::input::ClickTracker;
use crate::params::missing;
use crate::widgets::label::TextBox;
use crate::*;

/// A text box that runs a callback when clicked.
#[derive(Clone, Debug)]
pub struct Button {
    pub(crate) text_box: TextBox,
    pub(crate) state: WidgetState,
    pub(crate) onclick: Callback,
    tracker: ClickTracker,
}

impl Button {
    pub const NAME: &'static str = "Button";
    pub const ATTRS: Attrs = TextBox::ATTRS.union(Attrs::STATE).union(Attrs::ONCLICK);

    pub fn new(params: Params) -> Result<Self> {
        params.check(Self::NAME, Self::ATTRS)?;
        let onclick = params.onclick.clone().ok_or(missing(Self::NAME, "onclick"))?;

        return Ok(Button {
            text_box: TextBox::new(Self::NAME, &params)?,
            state: params.state.unwrap_or_default(),
            onclick,
            tracker: ClickTracker::default(),
        });
    }

    pub fn configure(&mut self, params: Params) -> Result<()> {
        params.check(Self::NAME, Self::ATTRS)?;
        self.text_box.apply(&params)?;
        if let Some(state) = params.state {
            self.state = state;
        }
        if let Some(onclick) = params.onclick {
            self.onclick = onclick;
        }
        return Ok(());
    }

    pub fn draw(&self, surface: &mut Surface) {
        self.text_box.draw(surface);
        if self.state == WidgetState::Disabled {
            surface::disabled_overlay(surface, self.text_box.rect());
        }
    }

    pub fn feed(&mut self, input: &FrameInput) -> Feedback {
        if self.state == WidgetState::Disabled {
            self.tracker.reset();
            return Feedback::default();
        }

        let rect = self.text_box.rect();
        let clicked = self.tracker.update(input.events, |p| rect.contains(p));
        let hovered = input.pointer.is_some_and(|p| rect.contains(p));

        return Feedback {
            fired: clicked.then(|| self.onclick.clone()),
            hovered,
        };
    }

    pub fn state(&self) -> WidgetState {
        return self.state;
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

    fn button(state: WidgetState) -> Button {
        let params = Params::new()
            .position(10, 10)
            .size(20, 20)
            .text("Stop")
            .onclick(Callback::new(|_| Ok(())))
            .state(state);
        return Button::new(params).unwrap();
    }

    fn feed(button: &mut Button, events: &[InputEvent]) -> Feedback {
        let pointer = events.last().and_then(|e| e.position());
        return button.feed(&FrameInput::new(events, pointer, UVec2::new(100, 100)));
    }

    #[test]
    fn test_requires_onclick() {
        let err = Button::new(Params::new().position(0, 0).size(5, 5)).unwrap_err();
        assert!(matches!(err, Error::MissingAttribute { widget: "Button", attribute: "onclick" }));
    }

    #[test]
    fn test_click_inside_fires() {
        let mut button = button(WidgetState::Enabled);

        let feedback = feed(&mut button, &click_at(15.0, 15.0));
        assert_eq!(feedback.fired.map(|c| c.id()), Some(button.onclick.id()));
        assert!(feedback.hovered);

        assert!(feed(&mut button, &tap_at(29.0, 29.0)).fired.is_some());
        assert!(feed(&mut button, &click_at(30.0, 15.0)).fired.is_none());
    }

    #[test]
    fn test_fires_once_per_frame() {
        let mut button = button(WidgetState::Enabled);
        let mut events = click_at(15.0, 15.0);
        events.extend(click_at(16.0, 16.0));
        events.extend(tap_at(17.0, 17.0));

        let feedback = feed(&mut button, &events);
        assert!(feedback.fired.is_some());
    }

    #[test]
    fn test_disabled_never_fires() {
        let mut button = button(WidgetState::Disabled);
        for events in [click_at(15.0, 15.0), tap_at(10.0, 10.0), click_at(0.0, 0.0)] {
            let feedback = feed(&mut button, &events);
            assert!(feedback.fired.is_none());
            assert!(feedback.hovered == false);
        }

        // press while disabled, release after being enabled again: not a click
        let press = [InputEvent::TouchPressed { id: 1, position: vec2(15.0, 15.0) }];
        feed(&mut button, &press);
        button.configure(Params::new().state(WidgetState::Enabled)).unwrap();
        let release = [InputEvent::TouchReleased { id: 1, position: vec2(15.0, 15.0) }];
        assert!(feed(&mut button, &release).fired.is_none());
    }

    #[test]
    fn test_disabled_draws_overlay() {
        let enabled = button(WidgetState::Enabled);
        let disabled = button(WidgetState::Disabled);

        let mut a = surface::new_surface(UVec2::new(40, 40), "test").unwrap();
        let mut b = a.clone();
        enabled.draw(&mut a);
        disabled.draw(&mut b);

        assert_ne!(a.data(), b.data());
        // outside the button nothing differs
        assert_eq!(a.pixel(35, 35), b.pixel(35, 35));
    }
}
