use log::warn;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source, source::Buffered};
use std::fs::File;
use std::io::BufReader;

const FIRE_SOUND_PATH: &str = "assets/sounds/fire.wav";
const FIRE_VOLUME: f32 = 0.05;

/// Audio manager for playing sound effects. Every part of it is
/// optional: a machine without an audio device, or a missing sound
/// file, just means silence.
pub struct AudioManager {
    output: Option<(OutputStream, OutputStreamHandle)>,
    fire_sound: Option<Buffered<Decoder<BufReader<File>>>>,
}

impl AudioManager {
    pub fn new() -> Self {
        let output = match OutputStream::try_default() {
            Ok(pair) => Some(pair),
            Err(err) => {
                warn!("no audio output available: {err}");
                None
            }
        };

        // Pre-load and buffer the fire sound at startup
        let fire_sound = match Self::load_sound(FIRE_SOUND_PATH) {
            Ok(sound) => Some(sound),
            Err(err) => {
                warn!("could not load {FIRE_SOUND_PATH}: {err}");
                None
            }
        };

        Self { output, fire_sound }
    }

    fn load_sound(path: &str) -> Result<Buffered<Decoder<BufReader<File>>>, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let source = Decoder::new(BufReader::new(file))?;
        Ok(source.buffered())
    }

    /// Play the weapon fire sound. Playback errors are ignored, the
    /// game must not stall on the audio path.
    pub fn play_fire_sound(&self) {
        let (Some((_, handle)), Some(fire_sound)) = (&self.output, &self.fire_sound) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(handle) {
            sink.set_volume(FIRE_VOLUME);
            // Clone of a buffered source only clones references
            sink.append(fire_sound.clone());
            sink.detach();
        }
    }
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}
