//! Racer motion scheduler.
//!
//! Every racer owns one entry in the registry, holding only the step it is
//! currently playing:
//! - Drift: the marker eases toward a random offset within ±`DRIFT_AMPLITUDE`
//!   of its resting y, then immediately picks the next one
//! - Pulse: the outline ring tweens radius and opacity on its own cadence
//! - Hover: a short opacity fade driven by pointer enter/leave
//!
//! All entries advance from one `tick(now)` on the UI thread. Tearing a racer
//! down removes its entry, so nothing is rescheduled for markers that are gone.

use std::collections::HashMap;
use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::layout::{RaceLayout, RacerId, PULSE_BASE_RADIUS};

pub const DRIFT_AMPLITUDE: f32 = 10.0;
/// Seconds per drift step.
pub const DRIFT_DURATION: Range<f64> = 0.9..1.5;

pub const PULSE_RADIUS: Range<f32> = 24.0..34.0;
pub const PULSE_OPACITY: Range<f32> = 0.15..0.40;
/// Seconds per pulse step.
pub const PULSE_DURATION: Range<f64> = 0.8..1.2;

pub const HOVER_OPACITY: f32 = 0.6;
pub const HOVER_FADE_SECS: f64 = 0.2;

/// Sine in-out easing on `t ∈ [0, 1]`.
pub fn ease_sin_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    (1.0 - (std::f64::consts::PI * t).cos()) / 2.0
}

/// One timed interpolation from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start: f64,
    pub duration: f64,
}

impl Tween {
    pub fn new(from: f32, to: f32, start: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start,
            duration,
        }
    }

    pub fn progress(&self, now: f64) -> f64 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        ((now - self.start) / self.duration).clamp(0.0, 1.0)
    }

    pub fn finished(&self, now: f64) -> bool {
        self.progress(now) >= 1.0
    }

    pub fn linear(&self, now: f64) -> f32 {
        self.lerp(self.progress(now))
    }

    pub fn eased(&self, now: f64) -> f32 {
        self.lerp(ease_sin_in_out(self.progress(now)))
    }

    fn lerp(&self, t: f64) -> f32 {
        self.from + (self.to - self.from) * t as f32
    }
}

#[derive(Debug, Clone)]
struct RacerMotion {
    drift: Tween,
    pulse_radius: Tween,
    pulse_opacity: Tween,
    hover: Tween,
    hovered: bool,
}

/// Sampled state of one racer at a point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RacerFrame {
    /// Vertical offset from the resting centre.
    pub dy: f32,
    pub pulse_radius: f32,
    /// Larger of the ambient pulse and the hover fade.
    pub pulse_opacity: f32,
}

/// Registry of per-racer repeating tasks.
pub struct Animator {
    tasks: HashMap<RacerId, RacerMotion>,
    rng: StdRng,
}

impl Animator {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Deterministic jitter, for tests and replays.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            tasks: HashMap::new(),
            rng,
        }
    }

    /// Drop every task and start one per racer in `layout`.
    pub fn rebuild(&mut self, layout: &RaceLayout, now: f64) {
        self.clear();
        for racer in layout.racers() {
            self.spawn(racer.id.clone(), now);
        }
        log::debug!("animator rebuilt with {} racers", self.tasks.len());
    }

    /// Start (or restart) the task for `id`.
    pub fn spawn(&mut self, id: RacerId, now: f64) {
        let drift = self.next_drift(0.0, now);
        let (pulse_radius, pulse_opacity) = self.next_pulse(PULSE_BASE_RADIUS, 0.0, now);
        self.tasks.insert(
            id,
            RacerMotion {
                drift,
                pulse_radius,
                pulse_opacity,
                hover: Tween::new(0.0, 0.0, now, 0.0),
                hovered: false,
            },
        );
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Advance all tasks: any step that has ended is replaced by the next one.
    pub fn tick(&mut self, now: f64) {
        let Self { tasks, rng } = self;
        for motion in tasks.values_mut() {
            if motion.drift.finished(now) {
                motion.drift = drift_step(rng, motion.drift.to, now);
            }
            if motion.pulse_radius.finished(now) {
                let (radius, opacity) =
                    pulse_step(rng, motion.pulse_radius.to, motion.pulse_opacity.to, now);
                motion.pulse_radius = radius;
                motion.pulse_opacity = opacity;
            }
        }
    }

    /// Pointer entered or left `id`. Unknown ids are ignored.
    pub fn set_hover(&mut self, id: &RacerId, hovered: bool, now: f64) {
        if let Some(motion) = self.tasks.get_mut(id) {
            if motion.hovered == hovered {
                return;
            }
            let current = motion.hover.linear(now);
            let goal = if hovered { HOVER_OPACITY } else { 0.0 };
            motion.hover = Tween::new(current, goal, now, HOVER_FADE_SECS);
            motion.hovered = hovered;
        }
    }

    pub fn drift(&self, id: &RacerId, now: f64) -> f32 {
        self.tasks
            .get(id)
            .map(|m| m.drift.eased(now))
            .unwrap_or(0.0)
    }

    pub fn frame(&self, id: &RacerId, now: f64) -> Option<RacerFrame> {
        self.tasks.get(id).map(|m| RacerFrame {
            dy: m.drift.eased(now),
            pulse_radius: m.pulse_radius.linear(now),
            pulse_opacity: m.pulse_opacity.linear(now).max(m.hover.linear(now)),
        })
    }

    fn next_drift(&mut self, from: f32, now: f64) -> Tween {
        drift_step(&mut self.rng, from, now)
    }

    fn next_pulse(&mut self, radius: f32, opacity: f32, now: f64) -> (Tween, Tween) {
        pulse_step(&mut self.rng, radius, opacity, now)
    }
}

impl Default for Animator {
    fn default() -> Self {
        Self::new()
    }
}

fn drift_step(rng: &mut StdRng, from: f32, now: f64) -> Tween {
    let to = rng.random_range(-DRIFT_AMPLITUDE..=DRIFT_AMPLITUDE);
    Tween::new(from, to, now, rng.random_range(DRIFT_DURATION))
}

fn pulse_step(rng: &mut StdRng, radius: f32, opacity: f32, now: f64) -> (Tween, Tween) {
    let duration = rng.random_range(PULSE_DURATION);
    (
        Tween::new(radius, rng.random_range(PULSE_RADIUS), now, duration),
        Tween::new(opacity, rng.random_range(PULSE_OPACITY), now, duration),
    )
}
