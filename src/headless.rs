use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use glam::UVec2;

use crate::*;

#[derive(Default)]
struct HeadlessState {
    size: UVec2,
    batches: VecDeque<Vec<InputEvent>>,
    presented: usize,
    last_frame: Option<Surface>,
    cursor: CursorKind,
    cursor_changes: usize,
    torn_down: bool,
}

/// A [`Backend`] without a window: events come from a script, frames are kept in memory.
///
/// Clones share the same state, so a test can hand one to a [`Screen`] and keep another to push events and inspect frames.
///
/// ```
/// # use touchgui::*;
/// let backend = HeadlessBackend::new(glam::UVec2::new(320, 240));
/// let mut screen = Screen::new(backend.clone()).unwrap();
///
/// let mut window = Window::new(Color::BLACK).with_fps(0);
/// window.tick_add(&Callback::stop());
/// window.run(&mut screen).unwrap();
///
/// assert_eq!(backend.presented(), 1);
/// ```
#[derive(Clone, Default)]
pub struct HeadlessBackend {
    state: Rc<RefCell<HeadlessState>>,
}

impl HeadlessBackend {
    pub fn new(size: UVec2) -> Self {
        let state = HeadlessState { size, ..Default::default() };
        return Self { state: Rc::new(RefCell::new(state)) };
    }

    /// Queues the events returned by one future `poll_events` call. Polls with nothing queued return no events.
    pub fn push_batch(&self, events: Vec<InputEvent>) {
        let mut state = self.state.borrow_mut();
        for event in &events {
            if let InputEvent::Resized { size } = event {
                state.size = *size;
            }
        }
        state.batches.push_back(events);
    }

    pub fn pending_batches(&self) -> usize {
        return self.state.borrow().batches.len();
    }

    /// How many frames were presented so far.
    pub fn presented(&self) -> usize {
        return self.state.borrow().presented;
    }

    /// A copy of the most recently presented frame.
    pub fn last_frame(&self) -> Option<Surface> {
        return self.state.borrow().last_frame.clone();
    }

    pub fn cursor(&self) -> CursorKind {
        return self.state.borrow().cursor;
    }

    pub fn cursor_changes(&self) -> usize {
        return self.state.borrow().cursor_changes;
    }

    pub fn torn_down(&self) -> bool {
        return self.state.borrow().torn_down;
    }
}

impl Backend for HeadlessBackend {
    fn size(&self) -> UVec2 {
        return self.state.borrow().size;
    }

    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        return Ok(self.state.borrow_mut().batches.pop_front().unwrap_or_default());
    }

    fn present(&mut self, surface: &Surface) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.presented += 1;
        state.last_frame = Some(surface.clone());
        log::trace!("Headless frame {}", state.presented);
        return Ok(());
    }

    fn set_cursor(&mut self, cursor: CursorKind) {
        let mut state = self.state.borrow_mut();
        state.cursor = cursor;
        state.cursor_changes += 1;
    }

    fn teardown(&mut self) {
        self.state.borrow_mut().torn_down = true;
    }
}
