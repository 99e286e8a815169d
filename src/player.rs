/// Media player context: playlist plus a swappable audio backend
///
/// The `Playback` trait is the seam to the audio device. The real backend
/// sits on rodio; tests inject a recording fake so action semantics can be
/// verified without touching hardware.

use anyhow::{Context, Result};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::constants::playback::VOLUME_STEP;
use crate::playlist::Playlist;

/// Low-level playback operations the player context drives
pub trait Playback {
    /// Replace the current source with the given track, loaded but paused
    fn load(&mut self, path: &Path) -> Result<()>;
    fn play(&mut self);
    fn pause(&mut self);
    fn resume(&mut self);
    fn volume(&self) -> f32;
    fn set_volume(&mut self, volume: f32);
    /// A source is loaded and not yet exhausted
    fn is_active(&self) -> bool;
    fn is_paused(&self) -> bool;
}

/// rodio-backed playback
///
/// Owns the output stream for the process lifetime; dropping it releases
/// the audio device.
pub struct RodioBackend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    sink: Sink,
}

impl RodioBackend {
    pub fn new() -> Result<Self> {
        let (stream, handle) = OutputStream::try_default()
            .context("No audio output device available")?;
        let sink = Sink::try_new(&handle).context("Failed to create playback sink")?;

        Ok(RodioBackend {
            _stream: stream,
            handle,
            sink,
        })
    }
}

impl Playback for RodioBackend {
    fn load(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)
            .with_context(|| format!("Failed to open track: {}", path.display()))?;
        let source = Decoder::new(BufReader::new(file))
            .with_context(|| format!("Failed to decode track: {}", path.display()))?;

        // A stopped sink cannot be restarted, so swap in a fresh one and
        // carry the volume across
        let volume = self.sink.volume();
        self.sink.stop();

        let sink = Sink::try_new(&self.handle).context("Failed to create playback sink")?;
        sink.set_volume(volume);
        sink.pause();
        sink.append(source);
        self.sink = sink;

        Ok(())
    }

    fn play(&mut self) {
        self.sink.play();
    }

    fn pause(&mut self) {
        self.sink.pause();
    }

    fn resume(&mut self) {
        self.sink.play();
    }

    fn volume(&self) -> f32 {
        self.sink.volume()
    }

    fn set_volume(&mut self, volume: f32) {
        self.sink.set_volume(volume);
    }

    fn is_active(&self) -> bool {
        !self.sink.empty()
    }

    fn is_paused(&self) -> bool {
        self.sink.is_paused()
    }
}

/// High-level player state: current track, volume bookkeeping, backend
///
/// Owns everything the actions mutate, so nothing about playback lives in
/// process-wide state.
pub struct MediaPlayer<B: Playback> {
    playlist: Playlist,
    backend: B,
}

impl<B: Playback> MediaPlayer<B> {
    /// Create the player with the first track loaded but not playing
    pub fn new(playlist: Playlist, mut backend: B) -> Result<Self> {
        backend.load(playlist.current_track())?;
        Ok(MediaPlayer { playlist, backend })
    }

    pub fn pause(&mut self) {
        self.backend.pause();
        println!("⏸️  Paused");
    }

    /// Resume if paused mid-track, otherwise start the current track over
    pub fn play_or_resume(&mut self) -> Result<()> {
        if self.backend.is_active() && self.backend.is_paused() {
            self.backend.resume();
            println!("▶️  Resumed");
        } else {
            let track = self.playlist.current_track().to_path_buf();
            self.backend.load(&track)?;
            self.backend.play();
            println!("▶️  Playing: {}", track.display());
        }
        Ok(())
    }

    pub fn next_track(&mut self) -> Result<()> {
        let track = self.playlist.advance().to_path_buf();
        self.backend.load(&track)?;
        self.backend.play();
        println!("⏭️  Next track: {}", track.display());
        Ok(())
    }

    pub fn previous_track(&mut self) -> Result<()> {
        let track = self.playlist.retreat().to_path_buf();
        self.backend.load(&track)?;
        self.backend.play();
        println!("⏮️  Previous track: {}", track.display());
        Ok(())
    }

    pub fn volume_up(&mut self) {
        let volume = (self.backend.volume() + VOLUME_STEP).min(1.0);
        self.backend.set_volume(volume);
        println!("🔊 Volume up: {:.2}", self.backend.volume());
    }

    pub fn volume_down(&mut self) {
        let volume = (self.backend.volume() - VOLUME_STEP).max(0.0);
        self.backend.set_volume(volume);
        println!("🔉 Volume down: {:.2}", self.backend.volume());
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn volume(&self) -> f32 {
        self.backend.volume()
    }
}
