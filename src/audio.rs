//! Named sounds and music, played through a [`Mixer`].

use std::path::{Path, PathBuf};

use ahash::AHashMap;

use crate::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SoundId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MusicId(pub usize);

/// The audio device a window's sounds and music are played on.
///
/// Sounds are short effects that can overlap. Music is a single background track: playing one replaces the previous.
pub trait Mixer {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId>;
    fn play_sound(&mut self, sound: SoundId) -> Result<()>;
    /// Stops every playing instance of `sound`.
    fn stop_sound(&mut self, sound: SoundId);

    fn load_music(&mut self, path: &Path) -> Result<MusicId>;
    fn play_music(&mut self, music: MusicId) -> Result<()>;
    fn pause_music(&mut self);
    fn unpause_music(&mut self);
    fn stop_music(&mut self);

    /// Stops all sounds.
    fn silence(&mut self);
}

/// A mixer that plays nothing. Loading still checks that the files exist.
#[derive(Debug, Default)]
pub struct SilentMixer {
    sounds: Vec<PathBuf>,
    music: Vec<PathBuf>,
    playing: Option<MusicId>,
    paused: bool,
}

impl SilentMixer {
    pub fn new() -> Self {
        return Self::default();
    }

    /// The track `play_music` last started, unless it was stopped since.
    pub fn playing(&self) -> Option<MusicId> {
        return self.playing;
    }

    pub fn is_paused(&self) -> bool {
        return self.paused;
    }
}

impl Mixer for SilentMixer {
    fn load_sound(&mut self, path: &Path) -> Result<SoundId> {
        std::fs::metadata(path)?;
        self.sounds.push(path.to_path_buf());
        return Ok(SoundId(self.sounds.len() - 1));
    }

    fn play_sound(&mut self, sound: SoundId) -> Result<()> {
        log::debug!("(silent) playing sound {:?}", self.sounds.get(sound.0));
        return Ok(());
    }

    fn stop_sound(&mut self, sound: SoundId) {
        log::debug!("(silent) stopping sound {:?}", self.sounds.get(sound.0));
    }

    fn load_music(&mut self, path: &Path) -> Result<MusicId> {
        std::fs::metadata(path)?;
        self.music.push(path.to_path_buf());
        return Ok(MusicId(self.music.len() - 1));
    }

    fn play_music(&mut self, music: MusicId) -> Result<()> {
        log::debug!("(silent) playing music {:?}", self.music.get(music.0));
        self.playing = Some(music);
        self.paused = false;
        return Ok(());
    }

    fn pause_music(&mut self) {
        self.paused = self.playing.is_some();
    }

    fn unpause_music(&mut self) {
        self.paused = false;
    }

    fn stop_music(&mut self) {
        self.playing = None;
        self.paused = false;
    }

    fn silence(&mut self) {}
}

#[cfg(feature = "audio")]
pub use rodio_mixer::RodioMixer;

#[cfg(feature = "audio")]
mod rodio_mixer {
    use std::{io::Cursor, path::Path, sync::Arc};

    use ahash::AHashMap;
    use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

    use super::{Mixer, MusicId, SoundId};
    use crate::{Error, Result};

    fn audio_err(err: impl std::fmt::Display) -> Error {
        return Error::Audio(err.to_string());
    }

    /// Plays through the default output device. Files are read once and decoded on every play.
    pub struct RodioMixer {
        _stream: OutputStream,
        handle: OutputStreamHandle,
        sounds: Vec<Arc<[u8]>>,
        music: Vec<Arc<[u8]>>,
        sound_sinks: AHashMap<SoundId, Vec<Sink>>,
        music_sink: Option<Sink>,
    }

    impl RodioMixer {
        pub fn new() -> Result<Self> {
            let (stream, handle) = OutputStream::try_default().map_err(audio_err)?;
            return Ok(Self {
                _stream: stream,
                handle,
                sounds: Vec::new(),
                music: Vec::new(),
                sound_sinks: AHashMap::new(),
                music_sink: None,
            });
        }

        fn start(&self, bytes: &Arc<[u8]>) -> Result<Sink> {
            let source = Decoder::new(Cursor::new(bytes.clone())).map_err(audio_err)?;
            let sink = Sink::try_new(&self.handle).map_err(audio_err)?;
            sink.append(source);
            return Ok(sink);
        }
    }

    impl Mixer for RodioMixer {
        fn load_sound(&mut self, path: &Path) -> Result<SoundId> {
            self.sounds.push(std::fs::read(path)?.into());
            return Ok(SoundId(self.sounds.len() - 1));
        }

        fn play_sound(&mut self, sound: SoundId) -> Result<()> {
            let bytes = self.sounds.get(sound.0).ok_or(Error::UnknownSound(format!("{:?}", sound)))?;
            let sink = self.start(bytes)?;
            let sinks = self.sound_sinks.entry(sound).or_default();
            sinks.retain(|s| s.empty() == false);
            sinks.push(sink);
            return Ok(());
        }

        fn stop_sound(&mut self, sound: SoundId) {
            if let Some(sinks) = self.sound_sinks.remove(&sound) {
                for sink in sinks {
                    sink.stop();
                }
            }
        }

        fn load_music(&mut self, path: &Path) -> Result<MusicId> {
            self.music.push(std::fs::read(path)?.into());
            return Ok(MusicId(self.music.len() - 1));
        }

        fn play_music(&mut self, music: MusicId) -> Result<()> {
            let bytes = self.music.get(music.0).ok_or(Error::UnknownMusic(format!("{:?}", music)))?;
            let sink = self.start(bytes)?;
            if let Some(previous) = self.music_sink.replace(sink) {
                previous.stop();
            }
            return Ok(());
        }

        fn pause_music(&mut self) {
            if let Some(sink) = &self.music_sink {
                sink.pause();
            }
        }

        fn unpause_music(&mut self) {
            if let Some(sink) = &self.music_sink {
                sink.play();
            }
        }

        fn stop_music(&mut self) {
            if let Some(sink) = self.music_sink.take() {
                sink.stop();
            }
        }

        fn silence(&mut self) {
            for (_, sinks) in self.sound_sinks.drain() {
                for sink in sinks {
                    sink.stop();
                }
            }
        }
    }
}

/// The name tables in front of a [`Mixer`].
pub struct Audio {
    mixer: Box<dyn Mixer>,
    sounds: AHashMap<String, SoundId>,
    music: AHashMap<String, MusicId>,
}

impl Default for Audio {
    fn default() -> Self {
        return Self::new(Box::new(SilentMixer::new()));
    }
}

impl Audio {
    pub fn new(mixer: Box<dyn Mixer>) -> Self {
        return Self { mixer, sounds: AHashMap::new(), music: AHashMap::new() };
    }

    fn sound(&self, name: &str) -> Result<SoundId> {
        return self.sounds.get(name).copied().ok_or_else(|| Error::UnknownSound(name.to_string()));
    }

    fn track(&self, name: &str) -> Result<MusicId> {
        return self.music.get(name).copied().ok_or_else(|| Error::UnknownMusic(name.to_string()));
    }

    /// Registers a sound under `name`. A second registration under the same name replaces the first.
    pub fn add_sound(&mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let id = self.mixer.load_sound(path.as_ref())?;
        let name = name.into();
        log::debug!("Sound {:?} loaded from {:?}", name, path.as_ref());
        self.sounds.insert(name, id);
        return Ok(());
    }

    /// Registers every file in `dir` as a sound named after its file stem. Returns how many were added.
    pub fn add_sounds_from_folder(&mut self, dir: impl AsRef<Path>) -> Result<usize> {
        let mut added = 0;
        for path in assets::files_in(dir.as_ref())? {
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                log::warn!("Skipping {:?}: the name isn't valid unicode", path);
                continue;
            };
            self.add_sound(name, &path)?;
            added += 1;
        }
        return Ok(added);
    }

    pub fn play_sound(&mut self, name: &str) -> Result<()> {
        let id = self.sound(name)?;
        return self.mixer.play_sound(id);
    }

    pub fn stop_sound(&mut self, name: &str) -> Result<()> {
        let id = self.sound(name)?;
        self.mixer.stop_sound(id);
        return Ok(());
    }

    pub fn add_music(&mut self, name: impl Into<String>, path: impl AsRef<Path>) -> Result<()> {
        let id = self.mixer.load_music(path.as_ref())?;
        let name = name.into();
        log::debug!("Music {:?} loaded from {:?}", name, path.as_ref());
        self.music.insert(name, id);
        return Ok(());
    }

    pub fn play_music(&mut self, name: &str) -> Result<()> {
        let id = self.track(name)?;
        return self.mixer.play_music(id);
    }

    pub fn pause_music(&mut self, name: &str) -> Result<()> {
        self.track(name)?;
        self.mixer.pause_music();
        return Ok(());
    }

    pub fn unpause_music(&mut self, name: &str) -> Result<()> {
        self.track(name)?;
        self.mixer.unpause_music();
        return Ok(());
    }

    pub fn stop_music(&mut self, name: &str) -> Result<()> {
        self.track(name)?;
        self.mixer.stop_music();
        return Ok(());
    }

    pub fn silence(&mut self) {
        self.mixer.silence();
    }

    pub fn has_sound(&self, name: &str) -> bool {
        return self.sounds.contains_key(name);
    }

    pub fn has_music(&self, name: &str) -> bool {
        return self.music.contains_key(name);
    }
}
