use glam::UVec2;

use crate::*;

/// The pointer shape the backend should show.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    #[default]
    Default,
    /// Over something that reacts to clicks.
    Pointer,
}

/// The platform side of a [`Screen`]: where events come from and where frames go.
pub trait Backend {
    /// The size of the area frames are presented to, in physical pixels.
    fn size(&self) -> UVec2;

    /// Everything that happened since the last call. Never blocks.
    fn poll_events(&mut self) -> Result<Vec<InputEvent>>;

    /// Shows `surface` on screen.
    fn present(&mut self, surface: &Surface) -> Result<()>;

    fn set_cursor(&mut self, cursor: CursorKind);

    /// Releases platform resources before the process exits.
    fn teardown(&mut self);
}

/// The single destination surface every window draws on, and the stack of windows currently running on it.
///
/// The window at the top of the stack is the one whose loop is currently iterating. The others are suspended
/// inside one of its callbacks, waiting for it to stop.
pub struct Screen {
    backend: Box<dyn Backend>,
    surface: Surface,
    active: Vec<WindowId>,
    cursor: CursorKind,
}

impl Screen {
    pub fn new(backend: impl Backend + 'static) -> Result<Self> {
        let size = backend.size();
        let surface = surface::new_surface(size, "Screen")?;
        log::info!("Screen ready at {}x{}", size.x, size.y);
        return Ok(Screen {
            backend: Box::new(backend),
            surface,
            active: Vec::new(),
            cursor: CursorKind::Default,
        });
    }

    pub fn surface(&self) -> &Surface {
        return &self.surface;
    }

    pub fn surface_mut(&mut self) -> &mut Surface {
        return &mut self.surface;
    }

    pub fn size(&self) -> UVec2 {
        return surface::size_of(&self.surface);
    }

    /// How many window loops are running, nested in each other.
    pub fn depth(&self) -> usize {
        return self.active.len();
    }

    /// The window whose loop is iterating right now.
    pub fn active_window(&self) -> Option<WindowId> {
        return self.active.last().copied();
    }

    pub(crate) fn enter(&mut self, window: WindowId) -> Result<()> {
        if self.active.contains(&window) {
            return Err(Error::AlreadyRunning);
        }
        self.active.push(window);
        log::debug!("{:?} entered its loop, depth {}", window, self.active.len());
        return Ok(());
    }

    pub(crate) fn leave(&mut self, window: WindowId) {
        if let Some(index) = self.active.iter().rposition(|w| *w == window) {
            self.active.truncate(index);
        }
        log::debug!("{:?} left its loop, depth {}", window, self.active.len());
    }

    /// Polls the backend. Resizes are applied to the surface before the events are returned.
    pub fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let events = self.backend.poll_events()?;
        for event in &events {
            if let InputEvent::Resized { size } = event {
                if *size != self.size() && size.x > 0 && size.y > 0 {
                    self.surface = surface::new_surface(*size, "Screen")?;
                    log::debug!("Screen resized to {}x{}", size.x, size.y);
                }
            }
        }
        return Ok(events);
    }

    pub fn present(&mut self) -> Result<()> {
        return self.backend.present(&self.surface);
    }

    pub fn set_cursor(&mut self, cursor: CursorKind) {
        if cursor != self.cursor {
            self.cursor = cursor;
            self.backend.set_cursor(cursor);
        }
    }

    pub fn teardown(&mut self) {
        log::info!("Tearing down the screen");
        self.backend.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize() {
        let backend = HeadlessBackend::new(UVec2::new(64, 32));
        let mut screen = Screen::new(backend.clone()).unwrap();
        assert_eq!(screen.size(), UVec2::new(64, 32));

        backend.push_batch(vec![InputEvent::Resized { size: UVec2::new(128, 16) }]);
        assert_eq!(backend.pending_batches(), 1);
        let events = screen.poll_events().unwrap();
        assert_eq!(backend.pending_batches(), 0);
        assert_eq!(events.len(), 1);
        assert_eq!(screen.size(), UVec2::new(128, 16));

        // minimized windows report a zero size: keep the old surface
        backend.push_batch(vec![InputEvent::Resized { size: UVec2::ZERO }]);
        screen.poll_events().unwrap();
        assert_eq!(screen.size(), UVec2::new(128, 16));
    }

    #[test]
    fn test_loop_stack() {
        let mut screen = Screen::new(HeadlessBackend::new(UVec2::new(8, 8))).unwrap();
        let outer = WindowId::next();
        let inner = WindowId::next();

        screen.enter(outer).unwrap();
        screen.enter(inner).unwrap();
        assert_eq!(screen.depth(), 2);
        assert_eq!(screen.active_window(), Some(inner));
        assert!(matches!(screen.enter(outer), Err(Error::AlreadyRunning)));

        screen.leave(inner);
        assert_eq!(screen.active_window(), Some(outer));
        screen.leave(outer);
        assert_eq!(screen.depth(), 0);
    }

    #[test]
    fn test_teardown_reaches_the_backend() {
        let backend = HeadlessBackend::new(UVec2::new(8, 8));
        let mut screen = Screen::new(backend.clone()).unwrap();
        assert!(backend.torn_down() == false);

        screen.teardown();
        assert!(backend.torn_down());
    }

    #[test]
    fn test_cursor_changes_are_forwarded_once() {
        let backend = HeadlessBackend::new(UVec2::new(8, 8));
        let mut screen = Screen::new(backend.clone()).unwrap();

        screen.set_cursor(CursorKind::Pointer);
        screen.set_cursor(CursorKind::Pointer);
        assert_eq!(backend.cursor(), CursorKind::Pointer);
        assert_eq!(backend.cursor_changes(), 1);
    }
}
