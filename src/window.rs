use std::{
    path::Path,
    rc::Rc,
    sync::atomic::{AtomicU64, Ordering},
    time::Duration,
};

use ahash::AHashMap;
use glam::Vec2;

use crate::schedule::{Deferred, Ticks};
use crate::*;

/// Identifies a [`Window`] on the [`Screen`]'s loop stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl WindowId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        return WindowId(NEXT.fetch_add(1, Ordering::Relaxed));
    }
}

/// A full-screen page of widgets, and the loop that runs it.
///
/// Each frame of [`Window::run`]:
/// 1. clears the screen to the background color,
/// 2. draws every widget,
/// 3. polls the pending input events once,
/// 4. feeds that same batch to every widget, then runs the callbacks of the widgets that were clicked,
/// 5. runs every tick callback,
/// 6. runs every deferred callback that is due,
/// 7. exits the process if the batch contained a quit event,
/// 8. presents the frame,
/// 9. sleeps to stay under the frame rate.
///
/// Widgets are visited in the map's order: unspecified, but the same for every frame of a run.
pub struct Window {
    id: WindowId,
    bg: Color,
    fps: u32,
    widgets: AHashMap<String, Widget>,
    running: bool,
    clock: Rc<dyn Clock>,
    begin: Duration,
    ticks: Ticks,
    deferred: Deferred,
    audio: Audio,
    pointer: Option<Vec2>,
    frames: u64,
}

impl Window {
    pub const DEFAULT_FPS: u32 = 60;

    pub fn new(bg: Color) -> Self {
        let clock: Rc<dyn Clock> = Rc::new(SystemClock::default());
        let begin = clock.now();
        return Window {
            id: WindowId::next(),
            bg,
            fps: Self::DEFAULT_FPS,
            widgets: AHashMap::new(),
            running: false,
            clock,
            begin,
            ticks: Ticks::default(),
            deferred: Deferred::default(),
            audio: Audio::default(),
            pointer: None,
            frames: 0,
        };
    }

    /// Caps the loop at `fps` frames per second. 0 removes the cap.
    pub fn with_fps(mut self, fps: u32) -> Self {
        self.fps = fps;
        return self;
    }

    /// Measures time with `clock` instead of the system clock. Restarts `duration` from 0.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Rc::new(clock);
        self.begin = self.clock.now();
        return self;
    }

    pub fn with_mixer(mut self, mixer: impl Mixer + 'static) -> Self {
        self.audio = Audio::new(Box::new(mixer));
        return self;
    }

    pub fn id(&self) -> WindowId {
        return self.id;
    }

    pub fn bg(&self) -> Color {
        return self.bg;
    }

    pub fn set_bg(&mut self, bg: Color) {
        self.bg = bg;
    }

    pub fn fps(&self) -> u32 {
        return self.fps;
    }

    /// Seconds since the window was created.
    pub fn duration(&self) -> f64 {
        return self.clock.now().saturating_sub(self.begin).as_secs_f64();
    }

    /// `duration` is derived from the clock and can't be written.
    pub fn set_duration(&mut self, _duration: f64) -> Result<()> {
        return Err(Error::ReadOnly("duration"));
    }

    /// How many frames the loop completed, over all runs.
    pub fn frames(&self) -> u64 {
        return self.frames;
    }

    // registry

    /// Adds `widget` under `key`, replacing whatever was there.
    pub fn insert(&mut self, key: impl Into<String>, widget: impl Into<Widget>) -> Option<Widget> {
        let key = key.into();
        let widget = widget.into();
        log::debug!("Inserting {:?} as {:?}", widget, key);
        return self.widgets.insert(key, widget);
    }

    /// Like [`Window::insert`], for values whose type is only known at runtime.
    ///
    /// Fails with [`Error::NotAWidget`] if `value` isn't a [`Widget`] or one of the widget types. The registry is left unchanged.
    pub fn insert_dyn(&mut self, key: impl Into<String>, value: Box<dyn std::any::Any>) -> Result<Option<Widget>> {
        let key = key.into();
        match Widget::from_any(value) {
            Ok(widget) => return Ok(self.insert(key, widget)),
            Err(_) => return Err(Error::NotAWidget(key)),
        }
    }

    pub fn get(&self, key: &str) -> Result<&Widget> {
        return self.widgets.get(key).ok_or_else(|| Error::MissingWidget(key.to_string()));
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut Widget> {
        return self.widgets.get_mut(key).ok_or_else(|| Error::MissingWidget(key.to_string()));
    }

    pub fn remove(&mut self, key: &str) -> Result<Widget> {
        log::debug!("Removing {:?}", key);
        return self.widgets.remove(key).ok_or_else(|| Error::MissingWidget(key.to_string()));
    }

    /// Shorthand for `get_mut(key)?.configure(params)`.
    pub fn configure(&mut self, key: &str, params: Params) -> Result<()> {
        return self.get_mut(key)?.configure(params);
    }

    pub fn contains(&self, key: &str) -> bool {
        return self.widgets.contains_key(key);
    }

    pub fn len(&self) -> usize {
        return self.widgets.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.widgets.is_empty();
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        return self.widgets.keys().map(|k| k.as_str());
    }

    // scheduling

    /// Runs `callback` once per frame from now on. Adding the same callback again does nothing.
    pub fn tick_add(&mut self, callback: &Callback) -> TickHandle {
        let handle = self.ticks.add(callback);
        log::debug!("Tick {:?} registered, {} in total", callback, self.ticks.len());
        return handle;
    }

    /// Returns `false` if the tick wasn't registered.
    pub fn tick_remove(&mut self, handle: TickHandle) -> bool {
        return self.ticks.remove(handle);
    }

    /// Runs `callback` every time at least `delay` seconds passed since it last ran, starting from now.
    ///
    /// Checked once per frame: the callback runs at most once per frame, and missed periods are skipped, not caught up.
    pub fn after(&mut self, callback: Callback, delay: f64) -> AfterHandle {
        let now = self.duration();
        log::debug!("{:?} scheduled every {}s, from {:.3}s", callback, delay, now);
        return self.deferred.add(callback, delay, now);
    }

    /// Returns `false` if the callback was already cancelled.
    pub fn cancel_after(&mut self, handle: AfterHandle) -> bool {
        return self.deferred.cancel(handle);
    }

    // loop

    /// Makes `run` return once the current frame is complete.
    pub fn stop(&mut self) {
        if self.running {
            log::debug!("{:?} stopping", self.id);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        return self.running;
    }

    /// Runs frames on `screen` until [`Window::stop`] is called.
    ///
    /// Blocks. A callback can run another window through [`Context::run`]: this loop is then suspended until the other one stops.
    /// Returns the first error a callback returns. A quit event exits the process.
    pub fn run(&mut self, screen: &mut Screen) -> Result<()> {
        if self.running {
            return Err(Error::AlreadyRunning);
        }
        screen.enter(self.id)?;
        self.running = true;
        log::info!("{:?} running with {} widgets", self.id, self.widgets.len());

        let mut limiter = FrameLimiter::new(self.clock.clone());
        let mut result = Ok(());
        while self.running {
            result = self.frame(screen, &mut limiter);
            if result.is_err() {
                break;
            }
        }

        self.running = false;
        screen.leave(self.id);
        log::info!("{:?} stopped after {} frames", self.id, self.frames);
        return result;
    }

    fn frame(&mut self, screen: &mut Screen, limiter: &mut FrameLimiter) -> Result<()> {
        log::trace!("{:?} frame {} at {:.3}s", self.id, self.frames, self.duration());

        let surface = screen.surface_mut();
        surface::fill(surface, self.bg);
        for widget in self.widgets.values() {
            widget.draw(surface);
        }

        let events = screen.poll_events()?;
        if let Some(position) = events.iter().rev().find_map(|e| e.position()) {
            self.pointer = Some(position);
        }

        let input = FrameInput::new(&events, self.pointer, screen.size());
        let mut fired = Vec::new();
        let mut hovered = false;
        for widget in self.widgets.values_mut() {
            let feedback = widget.feed(&input);
            hovered |= feedback.hovered;
            fired.extend(feedback.fired);
        }
        screen.set_cursor(if hovered { CursorKind::Pointer } else { CursorKind::Default });

        for callback in fired {
            self.invoke(&callback, screen)?;
        }

        for callback in self.ticks.snapshot() {
            self.invoke(&callback, screen)?;
        }

        let now = self.duration();
        for (handle, callback) in self.deferred.take_due(now) {
            // cancelled by a callback that ran earlier in this frame
            if self.deferred.contains(handle) == false {
                continue;
            }
            self.invoke(&callback, screen)?;
        }

        if events.iter().any(InputEvent::is_quit) {
            log::info!("Quit requested, exiting");
            screen.teardown();
            std::process::exit(0);
        }

        screen.present()?;
        self.frames += 1;
        limiter.wait(self.fps);
        return Ok(());
    }

    fn invoke(&mut self, callback: &Callback, screen: &mut Screen) -> Result<()> {
        let mut ctx = Context::new(self, screen);
        return callback.call(&mut ctx);
    }

    // audio

    pub fn audio(&mut self) -> &mut Audio {
        return &mut self.audio;
    }

    pub fn add_sound(&mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        return self.audio.add_sound(name, path);
    }

    pub fn add_sounds_from_folder(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        return self.audio.add_sounds_from_folder(dir);
    }

    pub fn play_sound(&mut self, name: &str) -> Result<()> {
        return self.audio.play_sound(name);
    }

    pub fn stop_sound(&mut self, name: &str) -> Result<()> {
        return self.audio.stop_sound(name);
    }

    pub fn add_music(&mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        return self.audio.add_music(name, path);
    }

    pub fn play_music(&mut self, name: &str) -> Result<()> {
        return self.audio.play_music(name);
    }

    pub fn pause_music(&mut self, name: &str) -> Result<()> {
        return self.audio.pause_music(name);
    }

    pub fn unpause_music(&mut self, name: &str) -> Result<()> {
        return self.audio.unpause_music(name);
    }

    pub fn stop_music(&mut self, name: &str) -> Result<()> {
        return self.audio.stop_music(name);
    }

    pub fn silence(&mut self) {
        self.audio.silence();
    }
}
