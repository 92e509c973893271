use std::{cell::RefCell, fmt, rc::Rc};

use crate::*;

type CallbackFn = dyn FnMut(&mut Context<'_>) -> Result<()>;

/// A zero-argument action, invoked with a [`Context`] for the window that is running it.
///
/// Cloning a `Callback` gives another handle to the same closure: clones share an identity,
/// which is what tick registration deduplicates on.
#[derive(Clone)]
pub struct Callback {
    inner: Rc<RefCell<CallbackFn>>,
}

/// The identity of a [`Callback`], shared by all its clones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallbackId(usize);

impl Callback {
    pub fn new(f: impl FnMut(&mut Context<'_>) -> Result<()> + 'static) -> Self {
        return Self { inner: Rc::new(RefCell::new(f)) };
    }

    /// A callback that stops whichever window runs it.
    pub fn stop() -> Self {
        return Self::new(|ctx| {
            ctx.stop();
            Ok(())
        });
    }

    pub fn id(&self) -> CallbackId {
        return CallbackId(Rc::as_ptr(&self.inner) as *const () as usize);
    }

    pub(crate) fn call(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self.inner.try_borrow_mut() {
            Ok(mut f) => return (f)(ctx),
            Err(_) => {
                // Only possible when a nested loop runs the same callback as an outer one.
                log::warn!("Callback {:?} is already running further up the stack, skipping it", self.id());
                return Ok(());
            }
        }
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callback({:#x})", self.id().0)
    }
}

/// What a running callback can reach: the window whose loop invoked it, and the screen, to run other windows on.
pub struct Context<'a> {
    pub window: &'a mut Window,
    screen: &'a mut Screen,
}

impl<'a> Context<'a> {
    pub(crate) fn new(window: &'a mut Window, screen: &'a mut Screen) -> Self {
        return Self { window, screen };
    }

    /// Stops the window running this callback once the current frame is complete.
    pub fn stop(&mut self) {
        self.window.stop();
    }

    /// Runs another window's loop on the same screen. Blocks until that window stops.
    pub fn run(&mut self, other: &mut Window) -> Result<()> {
        return other.run(self.screen);
    }

    pub fn screen(&mut self) -> &mut Screen {
        return self.screen;
    }

    pub fn duration(&self) -> f64 {
        return self.window.duration();
    }
}
