use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use color_eyre::{Result, eyre::WrapErr};
use tracing::{debug, warn};

use crate::assets::Assets;
use crate::session::SoundCue;

type BufferedSound = Buffered<Decoder<BufReader<File>>>;

const CUE_VOLUME: f32 = 0.5;

/// Open output device plus the pre-loaded cues
struct AudioBackend {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
    hit_sound: BufferedSound,
    miss_sound: BufferedSound,
}

/// Audio manager for playing the hit and miss cues
pub struct AudioManager {
    backend: Option<AudioBackend>,
}

impl AudioManager {
    /// Opens the default output device and pre-loads both cues
    pub fn new(assets: &Assets) -> Result<Self> {
        let (stream, stream_handle) =
            OutputStream::try_default().wrap_err("failed to open audio output device")?;

        let hit_sound = load_sound(&assets.hit_sound)?;
        let miss_sound = load_sound(&assets.miss_sound)?;

        Ok(Self {
            backend: Some(AudioBackend {
                _stream: stream,
                stream_handle,
                hit_sound,
                miss_sound,
            }),
        })
    }

    /// An audio manager that never touches the audio device
    pub fn muted() -> Self {
        Self { backend: None }
    }

    /// True when no output device is open
    pub fn is_muted(&self) -> bool {
        self.backend.is_none()
    }

    /// Plays a cue without waiting for it to finish
    pub fn play(&self, cue: SoundCue) {
        let Some(backend) = &self.backend else {
            return;
        };

        let sound = match cue {
            SoundCue::Hit => &backend.hit_sound,
            SoundCue::Miss => &backend.miss_sound,
        };

        // Playback failures must not interrupt the game
        match Sink::try_new(&backend.stream_handle) {
            Ok(sink) => {
                sink.set_volume(CUE_VOLUME);
                // Cloning a buffered source only clones references
                sink.append(sound.clone());
                sink.detach();
            }
            Err(err) => warn!(?cue, %err, "failed to play sound"),
        }
    }
}

fn load_sound(path: &Path) -> Result<BufferedSound> {
    let file =
        File::open(path).wrap_err_with(|| format!("failed to open sound {}", path.display()))?;
    let source = Decoder::new(BufReader::new(file))
        .wrap_err_with(|| format!("failed to decode sound {}", path.display()))?;
    debug!(path = %path.display(), "loaded sound");
    Ok(source.buffered())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_manager_plays_nothing() {
        let audio = AudioManager::muted();
        assert!(audio.is_muted());
        audio.play(SoundCue::Hit);
        audio.play(SoundCue::Miss);
    }
}
