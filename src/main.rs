mod actions;
mod config;
mod constants;
mod gesture;
mod landmarks;
mod player;
mod playlist;
mod signal;
mod smoothing;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use config::Config;
use gesture::GesturePipeline;
use player::{MediaPlayer, RodioBackend};
use playlist::Playlist;
use signal::{FrameSignal, parse_signal_line, read_trace};

#[derive(Parser)]
#[command(name = "gesture-player")]
#[command(about = "Hand-gesture media player control", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Record the detector's signal stream to a trace file for later replay
    Record {
        /// Name for this trace
        #[arg(default_value = "trace1")]
        name: String,
    },
    /// Replay a saved signal trace through the gesture pipeline
    Replay {
        /// Name of the trace (or a path to a .trace file)
        name: String,
        /// Synthetic frame rate; defaults to the configured replay_fps
        #[arg(short, long)]
        fps: Option<u32>,
    },
    /// Print the configured playlist
    Tracks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Record { name }) => record_command(&name),
        Some(Commands::Replay { name, fps }) => replay_command(&name, fps),
        Some(Commands::Tracks) => tracks_command(),
        None => run_app(),
    }
}

/// Resolve a trace argument: bare names live under ~/.gesture-player/traces
fn resolve_trace_path(name: &str) -> Result<PathBuf> {
    let direct = PathBuf::from(name);
    if direct.extension().is_some() || name.contains(std::path::MAIN_SEPARATOR) {
        return Ok(direct);
    }
    Ok(Config::traces_dir()?.join(format!("{}.trace", name)))
}

fn record_command(name: &str) -> Result<()> {
    println!("Gesture Player - Trace Recording");
    println!();
    println!("Reading detector frames from stdin (counts, 'none', or landmark lines).");
    println!("Press Ctrl-D (or send 'q') to finish.");
    println!();

    let traces_dir = Config::traces_dir()?;
    std::fs::create_dir_all(&traces_dir).context("Failed to create traces directory")?;

    let trace_path = traces_dir.join(format!("{}.trace", name));
    let meta_path = traces_dir.join(format!("{}.txt", name));

    let mut out = std::fs::File::create(&trace_path)
        .with_context(|| format!("Failed to create trace file: {}", trace_path.display()))?;

    let stdin = io::stdin();
    let mut frames = 0usize;
    let mut skipped = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim() == "q" || line.trim() == "quit" {
            break;
        }

        match parse_signal_line(&line) {
            Ok(Some(_)) => {
                writeln!(out, "{}", line.trim())?;
                frames += 1;
            }
            Ok(None) => {} // blank or comment
            Err(e) => {
                skipped += 1;
                eprintln!("⚠️  Skipping malformed frame: {:#}", e);
            }
        }
    }

    std::fs::write(
        &meta_path,
        format!("frames: {}\nskipped: {}\nformat: signal-trace-v1\n", frames, skipped),
    )?;

    println!();
    println!("✓ Recorded {} frames ({} skipped)", frames, skipped);
    println!("💾 Saved to:");
    println!("   Trace: {}", trace_path.display());
    println!("   Meta:  {}", meta_path.display());
    println!();
    println!("To replay: cargo run -- replay {}", name);

    Ok(())
}

fn replay_command(name: &str, fps_override: Option<u32>) -> Result<()> {
    println!("Gesture Player - Trace Replay");
    println!();

    let config = Config::load_or_create()?;
    let fps = fps_override.unwrap_or(config.control.replay_fps);
    if fps == 0 {
        anyhow::bail!("fps must be greater than 0");
    }

    let trace_path = resolve_trace_path(name)?;
    if !trace_path.exists() {
        anyhow::bail!("Trace '{}' not found at {}", name, trace_path.display());
    }

    println!("📂 Loading: {}", trace_path.display());
    let frames = read_trace(&trace_path)?;
    println!(
        "✓ Loaded {} frames ({:.2}s at {} fps)",
        frames.len(),
        frames.len() as f64 / fps as f64,
        fps
    );
    println!();

    let mut pipeline = GesturePipeline::new(
        config.control.trigger_frames,
        Duration::from_secs_f64(config.control.cooldown_secs),
    );

    // Synthetic clock: frame n happens at start + n * interval
    let start = Instant::now();
    let interval = Duration::from_secs_f64(1.0 / fps as f64);

    println!("─────────────────────────────────────────────────────");
    let mut dispatched = 0usize;
    for (i, frame) in frames.iter().enumerate() {
        let now = start + interval * i as u32;
        if let Some(action) = pipeline.process_frame(*frame, now) {
            dispatched += 1;
            let time_ms = interval.as_secs_f64() * i as f64 * 1000.0;
            println!(
                "[{:7.0}ms] frame {:4}: ✋ gesture {} → {}",
                time_ms,
                i + 1,
                action.id(),
                action.label()
            );
        }
    }
    println!("─────────────────────────────────────────────────────");
    println!();
    println!("📊 Replay complete:");
    println!("   Frames processed: {}", frames.len());
    println!("   Actions dispatched: {}", dispatched);

    Ok(())
}

fn tracks_command() -> Result<()> {
    let config = Config::load_or_create()?;

    println!("Configured playlist:");
    for (i, track) in config.playlist.tracks.iter().enumerate() {
        let marker = if i == 0 { "→" } else { " " };
        let found = if track.exists() { "" } else { "  (missing)" };
        println!("  {} {}. {}{}", marker, i + 1, track.display(), found);
    }

    Ok(())
}

fn run_app() -> Result<()> {
    println!("Gesture Player - Hand-Controlled Media Playback");

    // Load configuration
    let config = Config::load_or_create()?;
    println!("Configuration loaded successfully");

    let playlist = Playlist::new(config.playlist.tracks.clone())?;
    playlist.check_files()?;
    println!("Playlist: {} tracks", playlist.len());

    // Acquire the audio device up front so a missing device fails loudly
    let backend = RodioBackend::new()?;
    let mut media_player = MediaPlayer::new(playlist, backend)?;
    println!("Audio output initialized, first track loaded");

    let mut pipeline = GesturePipeline::new(
        config.control.trigger_frames,
        Duration::from_secs_f64(config.control.cooldown_secs),
    );

    println!();
    println!("Reading detector frames from stdin (one per video frame).");
    println!("Gestures: 0=pause 1=play 2=next 3=previous 4=volume-up 5=volume-down");
    println!("Send 'q' or close the stream to quit.");
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim() == "q" || line.trim() == "quit" {
            println!("Quit requested");
            break;
        }

        let frame = match parse_signal_line(&line) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue, // blank or comment
            Err(e) => {
                // A garbled detector line is treated like a frame with no hand
                eprintln!("⚠️  Malformed frame ({:#}), treating as no-hand", e);
                FrameSignal::Absent
            }
        };

        let now = Instant::now();
        if let Some(action) = pipeline.process_frame(frame, now) {
            println!("✋ Gesture {} → {}", action.id(), action.label());
            if let Err(e) = action.execute(&mut media_player) {
                // Playback failures don't stop the control loop
                eprintln!("✗ Action failed: {:#}", e);
            }
        }
    }

    println!("Detector stream ended, shutting down");
    // MediaPlayer and the rodio stream release the device on drop
    Ok(())
}
