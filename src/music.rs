//! Background-music playback as an explicitly owned session.
//!
//! The session owns the output stream and sink for the looping track:
//! acquired when music is enabled, released by dropping it. No module-global
//! playback handle exists anywhere.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub struct AudioSession {
    _stream: OutputStream,
    sink: Sink,
}

impl AudioSession {
    /// Open the audio device and start looping `track` at `volume`.
    pub fn start(track: &Path, volume: f32) -> Result<Self> {
        let (stream, handle) = OutputStream::try_default().context("Opening audio output")?;
        let sink = Sink::try_new(&handle).context("Creating audio sink")?;
        let reader = BufReader::new(
            File::open(track)
                .with_context(|| format!("Opening music track {}", track.display()))?,
        );
        let source = Decoder::new(reader)
            .with_context(|| format!("Decoding music track {}", track.display()))?
            .repeat_infinite();
        sink.set_volume(volume.clamp(0.0, 1.0));
        sink.append(source);
        sink.play();
        info!(track = %track.display(), volume, "Background music started");
        Ok(AudioSession {
            _stream: stream,
            sink,
        })
    }

    pub fn set_volume(&self, volume: f32) {
        self.sink.set_volume(volume.clamp(0.0, 1.0));
    }

    pub fn stop(self) {
        self.sink.stop();
        info!("Background music stopped");
    }
}
