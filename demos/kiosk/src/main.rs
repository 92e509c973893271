use std::cell::RefCell;
use std::rc::Rc;

use touchgui::*;

// Kiosk screen: a running clock, a text field with the on-screen keyboard, a settings screen, and a stop button.

fn styled(params: Params, font: Option<&Font>) -> Params {
    match font {
        Some(font) => return params.font(font),
        None => return params,
    }
}

fn clock_text(seconds: f64) -> String {
    let seconds = seconds as u64;
    return format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds / 60) % 60, seconds % 60);
}

fn settings_window(font: Option<&Font>) -> Result<Window> {
    let mut settings = Window::new(Color::hex("#1c2430")?);

    settings.insert("title", Label::new(styled(
        Params::new().position(40, 30).size(460, 60).text("Settings").text_size(40.0).fg(Color::WHITE),
        font,
    ))?);

    let play_theme = Callback::new(|ctx| {
        ctx.window.play_music("theme")
    });
    settings.insert("music", Button::new(styled(
        Params::new().position(40, 110).size(220, 70).text("Music").bg(Color::hex("#3a6ea5")?).onclick(play_theme),
        font,
    ))?);

    let quiet = Callback::new(|ctx| {
        ctx.window.silence();
        Ok(())
    });
    settings.insert("silence", Button::new(styled(
        Params::new().position(280, 110).size(220, 70).text("Silence").bg(Color::hex("#3a6ea5")?).onclick(quiet),
        font,
    ))?);

    settings.insert("back", Button::new(styled(
        Params::new().position(40, 210).size(460, 70).text("Back").bg(Color::hex("#a53a3a")?).onclick(Callback::stop()),
        font,
    ))?);

    settings.insert("frame", Polygon::new(
        Params::new().points([(20, 20), (520, 20), (520, 300), (20, 300)]).color(Color::hex("#5d7592")?).width(3.0),
    )?);

    return Ok(settings);
}

fn main() -> Result<()> {
    basic_env_logger_init();

    let assets = AssetFolders::from_env();
    let font = assets.default_font()?;
    let font = font.as_ref();

    let backend = WinitBackend::new(ScreenConfig { title: "Kiosk".to_string(), ..Default::default() })?;
    let mut screen = Screen::new(backend)?;

    #[cfg(feature = "audio")]
    let mut home = Window::new(Color::hex("#101418")?).with_mixer(RodioMixer::new()?);
    #[cfg(not(feature = "audio"))]
    let mut home = Window::new(Color::hex("#101418")?);

    if assets.sounds().is_dir() {
        let loaded = home.add_sounds_from_folder(assets.sounds())?;
        log::info!("Loaded {} sounds", loaded);
    }

    let settings = Rc::new(RefCell::new(settings_window(font)?));
    if assets.track("theme.ogg").is_file() {
        settings.borrow_mut().add_music("theme", assets.track("theme.ogg"))?;
    }

    home.insert("clock", Label::new(styled(
        Params::new().position(40, 20).size(400, 90).text(clock_text(0.0)).text_size(64.0).fg(Color::WHITE),
        font,
    ))?);

    home.insert("name", TextInput::new(styled(
        Params::new().position(40, 140).size(400, 60).text("").bg(Color::hex("#e0e0e0")?).fg(Color::BLACK),
        font,
    ))?);

    home.insert("divider", Line::new(
        Params::new().start(40, 120).end(600, 120).color(Color::hex("#5d7592")?).width(2.0),
    )?);

    let open_settings = Callback::new(move |ctx| {
        if ctx.window.audio().has_sound("click") {
            ctx.window.play_sound("click")?;
        }
        let mut settings = settings.borrow_mut();
        ctx.run(&mut settings)
    });
    home.insert("settings", Button::new(styled(
        Params::new().position(40, 230).size(220, 70).text("Settings").bg(Color::hex("#3a6ea5")?).onclick(open_settings),
        font,
    ))?);

    let close = assets.image("close.png");
    if close.is_file() {
        home.insert("stop", ButtonImage::new(styled(
            Params::new().position(520, 220).path(close).text("Stop").onclick(Callback::stop()),
            font,
        ))?);
    } else {
        log::warn!("{:?} is missing, using a plain button to stop", close);
        home.insert("stop", Button::new(styled(
            Params::new().position(520, 230).size(120, 70).text("Stop").bg(Color::RED).onclick(Callback::stop()),
            font,
        ))?);
    }

    let update_clock = Callback::new(|ctx| {
        let text = clock_text(ctx.duration());
        ctx.window.configure("clock", Params::new().text(text))
    });
    home.tick_add(&update_clock);

    home.run(&mut screen)?;

    if let Ok(name) = home.get("name") {
        log::info!("Stopped, name field was {:?}", name.text().unwrap_or_default());
    }
    return Ok(());
}
