/// Ordered track list with wrap-around navigation

use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<PathBuf>,
    current: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<PathBuf>) -> Result<Self> {
        if tracks.is_empty() {
            bail!("Playlist is empty - add tracks to settings.yaml");
        }
        Ok(Playlist { tracks, current: 0 })
    }

    /// Verify every configured track exists on disk
    pub fn check_files(&self) -> Result<()> {
        for track in &self.tracks {
            if !track.exists() {
                bail!(
                    "Track file not found: {}\n\
                     Fix the playlist in settings.yaml or add the file",
                    track.display()
                );
            }
        }
        Ok(())
    }

    pub fn current_track(&self) -> &Path {
        &self.tracks[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Move to the next track, wrapping past the end
    pub fn advance(&mut self) -> &Path {
        self.current = (self.current + 1) % self.tracks.len();
        self.current_track()
    }

    /// Move to the previous track, wrapping before the start
    pub fn retreat(&mut self) -> &Path {
        self.current = (self.current + self.tracks.len() - 1) % self.tracks.len();
        self.current_track()
    }
}
