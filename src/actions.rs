/// Fixed mapping from gesture IDs to media-player actions

use anyhow::Result;

use crate::player::{MediaPlayer, Playback};

/// The six recognized actions, indexed by finger count
///
/// IDs outside 0..=5 have no mapping and are silently ignored upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureAction {
    Pause,
    Play,
    NextTrack,
    PreviousTrack,
    VolumeUp,
    VolumeDown,
}

impl GestureAction {
    /// Look up the action for a gesture ID; `None` for unmapped values
    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(GestureAction::Pause),
            1 => Some(GestureAction::Play),
            2 => Some(GestureAction::NextTrack),
            3 => Some(GestureAction::PreviousTrack),
            4 => Some(GestureAction::VolumeUp),
            5 => Some(GestureAction::VolumeDown),
            _ => None,
        }
    }

    pub fn id(&self) -> u32 {
        match self {
            GestureAction::Pause => 0,
            GestureAction::Play => 1,
            GestureAction::NextTrack => 2,
            GestureAction::PreviousTrack => 3,
            GestureAction::VolumeUp => 4,
            GestureAction::VolumeDown => 5,
        }
    }

    /// Display name for status output
    pub fn label(&self) -> &'static str {
        match self {
            GestureAction::Pause => "pause",
            GestureAction::Play => "play",
            GestureAction::NextTrack => "next track",
            GestureAction::PreviousTrack => "previous track",
            GestureAction::VolumeUp => "volume up",
            GestureAction::VolumeDown => "volume down",
        }
    }

    /// Run this action against the player context
    pub fn execute<B: Playback>(&self, player: &mut MediaPlayer<B>) -> Result<()> {
        match self {
            GestureAction::Pause => {
                player.pause();
                Ok(())
            }
            GestureAction::Play => player.play_or_resume(),
            GestureAction::NextTrack => player.next_track(),
            GestureAction::PreviousTrack => player.previous_track(),
            GestureAction::VolumeUp => {
                player.volume_up();
                Ok(())
            }
            GestureAction::VolumeDown => {
                player.volume_down();
                Ok(())
            }
        }
    }
}
