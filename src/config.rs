use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::constants::{gesture, replay};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub playlist: PlaylistConfig,
    #[serde(default)]
    pub control: ControlConfig,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlaylistConfig {
    #[serde(default = "default_tracks")]
    pub tracks: Vec<PathBuf>,
}

fn default_tracks() -> Vec<PathBuf> {
    (1..=5).map(|i| PathBuf::from(format!("{}.mp3", i))).collect()
}

impl Default for PlaylistConfig {
    fn default() -> Self {
        PlaylistConfig {
            tracks: default_tracks(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ControlConfig {
    #[serde(default = "default_trigger_frames")]
    pub trigger_frames: u32,
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: f64,
    #[serde(default = "default_replay_fps")]
    pub replay_fps: u32,
}

fn default_trigger_frames() -> u32 {
    gesture::TRIGGER_FRAMES
}

fn default_cooldown_secs() -> f64 {
    gesture::COOLDOWN.as_secs_f64()
}

fn default_replay_fps() -> u32 {
    replay::DEFAULT_FPS
}

impl Default for ControlConfig {
    fn default() -> Self {
        ControlConfig {
            trigger_frames: default_trigger_frames(),
            cooldown_secs: default_cooldown_secs(),
            replay_fps: default_replay_fps(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            playlist: PlaylistConfig::default(),
            control: ControlConfig::default(),
        }
    }
}

impl Config {
    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().context("Failed to get home directory")?;
        Ok(home.join(".gesture-player"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("settings.yaml"))
    }

    pub fn traces_dir() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("traces"))
    }

    pub fn load_or_create() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let contents = fs::read_to_string(&config_path)
                .context("Failed to read config file")?;
            let config: Config = serde_yaml::from_str(&contents)
                .context("Failed to parse config file")?;

            // Validate configuration after loading
            config.validate()?;

            Ok(config)
        } else {
            // Create default config
            let config = Config::default();
            config.save()?;
            println!("Created default config at: {}", config_path.display());
            Ok(config)
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.playlist.tracks.is_empty() {
            bail!("playlist.tracks cannot be empty");
        }

        if self.control.trigger_frames == 0 {
            bail!("trigger_frames must be greater than 0");
        }

        if self.control.cooldown_secs <= 0.0 {
            bail!("cooldown_secs must be greater than 0.0");
        }
        if self.control.cooldown_secs > 60.0 {
            bail!("cooldown_secs must be <= 60.0");
        }

        if self.control.replay_fps == 0 {
            bail!("replay_fps must be greater than 0");
        }
        if self.control.replay_fps > 240 {
            bail!("replay_fps must be <= 240");
        }

        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir)
            .context("Failed to create config directory")?;

        let config_path = Self::config_path()?;
        let yaml = serde_yaml::to_string(self)
            .context("Failed to serialize config")?;

        fs::write(&config_path, yaml)
            .context("Failed to write config file")?;

        Ok(())
    }
}
