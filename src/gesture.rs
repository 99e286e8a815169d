/// Gesture debouncing and rate-limited action dispatch
///
/// This module holds the state machine that turns the noisy per-frame
/// finger-count signal into at most one discrete action per stabilization,
/// keeping it testable without a camera or an audio device.

use std::time::{Duration, Instant};

use crate::actions::GestureAction;
use crate::signal::FrameSignal;
use crate::smoothing::SignalSmoother;

/// Consecutive-frame stabilizer for the smoothed finger count
///
/// A value only becomes a stable gesture after it has matched for
/// `trigger_frames` frames in a row. An absent frame drops straight back
/// to idle.
#[derive(Debug)]
pub struct GestureDebouncer {
    stable_value: Option<u32>,
    stable_count: u32,
    trigger_frames: u32,
}

impl GestureDebouncer {
    pub fn new(trigger_frames: u32) -> Self {
        GestureDebouncer {
            stable_value: None,
            stable_count: 0,
            trigger_frames,
        }
    }

    /// Feed one frame's smoothed estimate (`None` for an absent frame)
    ///
    /// Returns the stabilized value on every frame at or past the trigger
    /// threshold, so a held gesture keeps attempting dispatch and the gate
    /// decides what actually fires.
    pub fn observe(&mut self, estimate: Option<u32>) -> Option<u32> {
        let value = match estimate {
            None => {
                self.reset();
                return None;
            }
            Some(value) => value,
        };

        if self.stable_value == Some(value) {
            self.stable_count = self.stable_count.saturating_add(1);
        } else {
            self.stable_value = Some(value);
            self.stable_count = 1;
        }

        if self.stable_count >= self.trigger_frames {
            self.stable_value
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.stable_value = None;
        self.stable_count = 0;
    }
}

/// Rate limiter between stabilized gestures and executed actions
///
/// Two suppression rules, checked in order on every attempt:
/// cooldown since the last fire, then same-gesture-as-last-fire. A held
/// gesture fires exactly once; re-holding it after cooldown does not
/// re-trigger it. Only a different gesture firing replaces the bookkeeping
/// and re-arms the earlier one.
#[derive(Debug)]
pub struct DispatchGate {
    last_gesture: Option<u32>,
    last_fired_at: Option<Instant>,
    cooldown: Duration,
}

impl DispatchGate {
    pub fn new(cooldown: Duration) -> Self {
        DispatchGate {
            last_gesture: None,
            last_fired_at: None,
            cooldown,
        }
    }

    /// Attempt to dispatch a stabilized gesture
    ///
    /// Returns the mapped action when it fires. Suppressed attempts and
    /// unmapped gesture IDs return `None` and leave the bookkeeping alone.
    pub fn try_fire(&mut self, gesture: u32, now: Instant) -> Option<GestureAction> {
        if let Some(fired_at) = self.last_fired_at {
            if now.duration_since(fired_at) < self.cooldown {
                return None;
            }
        }

        if self.last_gesture == Some(gesture) {
            return None;
        }

        let action = GestureAction::from_id(gesture)?;
        self.last_gesture = Some(gesture);
        self.last_fired_at = Some(now);
        Some(action)
    }
}

/// The full per-frame path: raw signal -> smoother -> debouncer -> gate
///
/// One call per video frame. The caller supplies the clock so replay and
/// tests can drive a synthetic timeline.
#[derive(Debug)]
pub struct GesturePipeline {
    smoother: SignalSmoother,
    debouncer: GestureDebouncer,
    gate: DispatchGate,
}

impl GesturePipeline {
    pub fn new(trigger_frames: u32, cooldown: Duration) -> Self {
        GesturePipeline {
            smoother: SignalSmoother::new(),
            debouncer: GestureDebouncer::new(trigger_frames),
            gate: DispatchGate::new(cooldown),
        }
    }

    /// Process one frame; returns the action to execute, if any fired
    pub fn process_frame(&mut self, raw: FrameSignal, now: Instant) -> Option<GestureAction> {
        let smoothed = self.smoother.observe(raw);

        let estimate = match raw {
            FrameSignal::Absent => None,
            FrameSignal::Count(_) => Some(smoothed),
        };

        let stable = self.debouncer.observe(estimate)?;
        self.gate.try_fire(stable, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIGGER: u32 = 5;
    const COOLDOWN: Duration = Duration::from_millis(1000);

    #[test]
    fn test_debouncer_requires_full_streak() {
        let mut debouncer = GestureDebouncer::new(TRIGGER);
        for _ in 0..4 {
            assert_eq!(debouncer.observe(Some(2)), None);
        }
        assert_eq!(debouncer.observe(Some(2)), Some(2));
    }

    #[test]
    fn test_debouncer_restarts_on_value_change() {
        let mut debouncer = GestureDebouncer::new(TRIGGER);
        for _ in 0..4 {
            debouncer.observe(Some(2));
        }
        // A different value resets the streak to 1
        assert_eq!(debouncer.observe(Some(3)), None);
        for _ in 0..3 {
            assert_eq!(debouncer.observe(Some(3)), None);
        }
        assert_eq!(debouncer.observe(Some(3)), Some(3));
    }

    #[test]
    fn test_debouncer_resets_on_absent() {
        let mut debouncer = GestureDebouncer::new(TRIGGER);
        for _ in 0..4 {
            debouncer.observe(Some(2));
        }
        debouncer.observe(None);
        for _ in 0..4 {
            assert_eq!(debouncer.observe(Some(2)), None);
        }
        assert_eq!(debouncer.observe(Some(2)), Some(2));
    }

    #[test]
    fn test_debouncer_keeps_reporting_while_held() {
        let mut debouncer = GestureDebouncer::new(TRIGGER);
        for _ in 0..5 {
            debouncer.observe(Some(4));
        }
        for _ in 0..20 {
            assert_eq!(debouncer.observe(Some(4)), Some(4));
        }
    }

    #[test]
    fn test_gate_fires_once_per_hold() {
        let mut gate = DispatchGate::new(COOLDOWN);
        let start = Instant::now();

        assert!(gate.try_fire(0, start).is_some());
        // Same gesture, even well past cooldown: still suppressed
        assert!(gate.try_fire(0, start + Duration::from_secs(10)).is_none());
    }

    #[test]
    fn test_gate_cooldown_suppresses_different_gesture() {
        let mut gate = DispatchGate::new(COOLDOWN);
        let start = Instant::now();

        assert!(gate.try_fire(0, start).is_some());
        assert!(gate.try_fire(1, start + Duration::from_millis(500)).is_none());
        assert!(gate.try_fire(1, start + Duration::from_millis(1500)).is_some());
    }

    #[test]
    fn test_gate_switching_rearms_previous_gesture() {
        let mut gate = DispatchGate::new(COOLDOWN);
        let start = Instant::now();

        assert!(gate.try_fire(0, start).is_some());
        assert!(gate.try_fire(1, start + Duration::from_secs(2)).is_some());
        assert!(gate.try_fire(0, start + Duration::from_secs(4)).is_some());
    }

    #[test]
    fn test_gate_ignores_unmapped_ids() {
        let mut gate = DispatchGate::new(COOLDOWN);
        let start = Instant::now();

        assert!(gate.try_fire(7, start).is_none());
        // The failed lookup left no bookkeeping behind: a mapped gesture
        // immediately afterwards still fires
        assert!(gate.try_fire(2, start).is_some());
    }

    #[test]
    fn test_pipeline_constant_signal_fires_at_threshold() {
        let mut pipeline = GesturePipeline::new(TRIGGER, COOLDOWN);
        let start = Instant::now();
        let frame = Duration::from_millis(33);

        let mut fired = Vec::new();
        for i in 0..5 {
            if let Some(action) = pipeline.process_frame(FrameSignal::Count(2), start + frame * i) {
                fired.push((i, action));
            }
        }

        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].0, 4); // fifth frame
        assert_eq!(fired[0].1, GestureAction::NextTrack);
    }

    #[test]
    fn test_pipeline_absent_resets_everything() {
        let mut pipeline = GesturePipeline::new(TRIGGER, COOLDOWN);
        let start = Instant::now();
        let frame = Duration::from_millis(33);

        for i in 0..4 {
            assert!(pipeline
                .process_frame(FrameSignal::Count(2), start + frame * i)
                .is_none());
        }
        assert!(pipeline.process_frame(FrameSignal::Absent, start + frame * 4).is_none());
        // Streak starts over after the gap; the smoother also has to
        // re-converge past the injected zero
        assert!(pipeline
            .process_frame(FrameSignal::Count(2), start + frame * 5)
            .is_none());
    }
}
