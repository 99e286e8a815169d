/// Application-wide constants for signal smoothing, gesture debouncing, and playback

pub mod smoothing {
    /// Capacity of the finger-count smoothing window (frames)
    /// Oldest entry is evicted FIFO once the window is full
    pub const WINDOW_SIZE: usize = 10;
}

pub mod gesture {
    use std::time::Duration;

    /// Number of consecutive frames the smoothed count must hold steady
    /// before a gesture is considered stable and eligible to dispatch
    pub const TRIGGER_FRAMES: u32 = 5;

    /// Minimum time between two dispatched actions
    pub const COOLDOWN: Duration = Duration::from_millis(1000);

    /// Gesture IDs 0..ACTION_COUNT map to actions; anything above is ignored
    pub const ACTION_COUNT: u32 = 6;
}

pub mod playback {
    /// Volume change per VolumeUp/VolumeDown action, clamped to [0.0, 1.0]
    pub const VOLUME_STEP: f32 = 0.1;
}

pub mod replay {
    /// Default synthetic frame rate when replaying a recorded signal trace
    pub const DEFAULT_FPS: u32 = 30;
}
