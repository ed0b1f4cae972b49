//! Click-seeded wave disturbances.
//!
//! A [`WaveTracker`] holds up to [`MAX_WAVES`] disturbances, each an origin
//! on the ground plane plus a start time. Disturbances are created when a
//! pointer click hits the ground plane, expire after [`WAVE_LIFETIME`]
//! seconds, and are evicted oldest-first when the tracker is full. Nothing is
//! ever mutated after creation, only evicted.
//!
//! Every frame the tracker exports exactly [`MAX_WAVES`] uniform slots; empty
//! slots carry sentinel values (an origin far outside the scene and an age
//! deep past the decay range) so the shader sums all slots without branching
//! on a live count.
//!
//! The displacement formula lives here twice over: [`displacement`] is the
//! CPU reference used by tests, and `shader.wgsl` carries the same math for
//! the vertex stage.

use glam::{Vec2, Vec3};
use std::collections::VecDeque;

/// Maximum concurrent disturbances (and shader uniform slots).
pub const MAX_WAVES: usize = 5;

/// Seconds a disturbance stays active before eviction.
pub const WAVE_LIFETIME: f32 = 3.0;

/// Sentinel origin coordinate for empty slots, far outside the visible scene.
pub const SENTINEL_ORIGIN: f32 = 99_999.0;

/// Sentinel age for empty slots; deep enough into the decay curve that the
/// displacement contribution is indistinguishable from zero.
pub const SENTINEL_AGE: f32 = 999.0;

/// Wavefront propagation speed in world units per second.
const WAVE_SPEED: f32 = 30.0;
/// Exponential strength decay rate (1.25 s time constant).
const AMPLITUDE_DECAY: f32 = 0.8;
/// Peak vertical amplitude in world units.
const AMPLITUDE: f32 = 15.0;
/// Gaussian envelope width at age zero.
const WIDTH_BASE: f32 = 20.0;
/// Envelope widening per second as the front travels.
const WIDTH_GROWTH: f32 = 5.0;
/// Spatial ripple frequency.
const RIPPLE_FREQ: f32 = 0.2;
/// Temporal ripple rate.
const RIPPLE_RATE: f32 = 4.0;

/// A single transient disturbance: where it started and when.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Disturbance {
    /// Origin on the ground plane (x, z); y is ignored for distance.
    pub origin: Vec2,
    /// Clock reading at creation, in seconds.
    pub start_time: f32,
}

/// One shader uniform slot: a disturbance origin and its current age.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSlot {
    /// Disturbance origin on the ground plane.
    pub origin: Vec2,
    /// Seconds since the disturbance was created.
    pub age: f32,
}

impl WaveSlot {
    /// The empty slot: contributes ~0 displacement by construction.
    pub const EMPTY: WaveSlot = WaveSlot {
        origin: Vec2::new(SENTINEL_ORIGIN, SENTINEL_ORIGIN),
        age: SENTINEL_AGE,
    };
}

/// Insertion-ordered, capacity-bounded collection of active disturbances.
#[derive(Debug, Default)]
pub struct WaveTracker {
    waves: VecDeque<Disturbance>,
}

impl WaveTracker {
    /// Create an empty tracker.
    pub fn new() -> Self {
        Self {
            waves: VecDeque::with_capacity(MAX_WAVES),
        }
    }

    /// Append a disturbance starting now.
    ///
    /// When the tracker already holds [`MAX_WAVES`] entries the oldest is
    /// evicted first, so the collection never exceeds capacity.
    pub fn add(&mut self, origin: Vec2, now: f32) {
        if self.waves.len() >= MAX_WAVES {
            self.waves.pop_front();
        }
        self.waves.push_back(Disturbance {
            origin,
            start_time: now,
        });
    }

    /// Drop every disturbance whose age has reached [`WAVE_LIFETIME`].
    pub fn prune(&mut self, now: f32) {
        self.waves
            .retain(|w| now - w.start_time < WAVE_LIFETIME);
    }

    /// Number of currently tracked disturbances.
    #[inline]
    pub fn len(&self) -> usize {
        self.waves.len()
    }

    /// Whether no disturbances are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }

    /// Iterate tracked disturbances in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Disturbance> {
        self.waves.iter()
    }

    /// Export the uniform slots for this frame.
    ///
    /// Live disturbances fill slots in insertion order with their current
    /// age; remaining slots are [`WaveSlot::EMPTY`].
    pub fn slots(&self, now: f32) -> [WaveSlot; MAX_WAVES] {
        let mut slots = [WaveSlot::EMPTY; MAX_WAVES];
        for (slot, wave) in slots.iter_mut().zip(self.waves.iter()) {
            *slot = WaveSlot {
                origin: wave.origin,
                age: now - wave.start_time,
            };
        }
        slots
    }
}

/// Vertical displacement of one disturbance at planar distance `dist`.
///
/// An expanding ring: the wavefront sits at `age * 30`, a Gaussian envelope
/// confines the ripple to the front and widens as it travels, and the whole
/// wave decays exponentially with age. Sentinel ages short-circuit to zero,
/// matching the shader.
pub fn displacement(dist: f32, age: f32) -> f32 {
    if age > 900.0 {
        return 0.0;
    }
    let front = age * WAVE_SPEED - dist;
    let amplitude = (-age * AMPLITUDE_DECAY).exp() * AMPLITUDE;
    let width = WIDTH_BASE + age * WIDTH_GROWTH;
    let envelope = (-(front * front) / (2.0 * width)).exp();
    (dist * RIPPLE_FREQ - age * RIPPLE_RATE).sin() * envelope * amplitude
}

/// Total vertical offset for a particle: sum over all slots.
pub fn vertical_offset(position: Vec3, slots: &[WaveSlot; MAX_WAVES]) -> f32 {
    slots
        .iter()
        .map(|slot| {
            let dist = Vec2::new(position.x, position.z).distance(slot.origin);
            displacement(dist, slot.age)
        })
        .sum()
}

/// Point size / brightness multiplier for a particle's total offset.
///
/// Particles riding an active front render slightly larger and brighter.
#[inline]
pub fn brightness(total_offset: f32) -> f32 {
    1.0 + 0.05 * total_offset.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_caps_at_max_waves() {
        let mut tracker = WaveTracker::new();
        for i in 0..20 {
            tracker.add(Vec2::new(i as f32, 0.0), i as f32 * 0.01);
            assert!(tracker.len() <= MAX_WAVES);
        }
        assert_eq!(tracker.len(), MAX_WAVES);

        // Oldest-first eviction: the survivors are the last five added.
        let origins: Vec<f32> = tracker.iter().map(|w| w.origin.x).collect();
        assert_eq!(origins, vec![15.0, 16.0, 17.0, 18.0, 19.0]);
    }

    #[test]
    fn test_prune_removes_expired() {
        let mut tracker = WaveTracker::new();
        for t in 0..=5 {
            tracker.add(Vec2::ZERO, t as f32);
        }
        // Six adds through a five-slot tracker: t=0 already evicted.
        assert_eq!(tracker.len(), MAX_WAVES);

        tracker.prune(5.0);
        // Exactly the entries with age < 3 remain: start times 3, 4, 5.
        assert_eq!(tracker.len(), 3);
        let starts: Vec<f32> = tracker.iter().map(|w| w.start_time).collect();
        assert_eq!(starts, vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_prune_is_exclusive_at_lifetime() {
        let mut tracker = WaveTracker::new();
        tracker.add(Vec2::ZERO, 0.0);
        tracker.prune(WAVE_LIFETIME - 1e-3);
        assert_eq!(tracker.len(), 1);
        tracker.prune(WAVE_LIFETIME);
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_slots_fill_in_insertion_order() {
        let mut tracker = WaveTracker::new();
        tracker.add(Vec2::new(1.0, 2.0), 0.0);
        tracker.add(Vec2::new(3.0, 4.0), 1.0);

        let slots = tracker.slots(2.0);
        assert_eq!(slots[0].origin, Vec2::new(1.0, 2.0));
        assert_eq!(slots[0].age, 2.0);
        assert_eq!(slots[1].origin, Vec2::new(3.0, 4.0));
        assert_eq!(slots[1].age, 1.0);
        for slot in &slots[2..] {
            assert_eq!(*slot, WaveSlot::EMPTY);
        }
    }

    #[test]
    fn test_displacement_zero_at_origin_and_birth() {
        // sin(0) * envelope * 15 = 0
        assert_eq!(displacement(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_displacement_decays_with_age() {
        let dist = 11.0;
        let early = displacement(dist, 0.5).abs();
        assert!(early > 0.1);
        assert!(displacement(dist, 10.0).abs() < early);
        assert!(displacement(dist, 100.0).abs() < 1e-6);
    }

    #[test]
    fn test_displacement_on_the_front() {
        // Front at dist 30 after one second: envelope maximal, so the value
        // is sin(30 * 0.2 - 4) * exp(-0.8) * 15.
        let expected = (30.0_f32 * 0.2 - 4.0).sin() * (-0.8_f32).exp() * 15.0;
        let got = displacement(30.0, 1.0);
        assert!((got - expected).abs() < 1e-4, "got {got}, expected {expected}");
    }

    #[test]
    fn test_sentinel_slot_contributes_nothing() {
        let offset = vertical_offset(Vec3::new(5.0, 0.0, -2.0), &[WaveSlot::EMPTY; MAX_WAVES]);
        assert!(offset.abs() < 1e-6);
    }

    #[test]
    fn test_vertical_offset_sums_slots() {
        let mut tracker = WaveTracker::new();
        tracker.add(Vec2::new(0.0, 0.0), 0.0);
        tracker.add(Vec2::new(60.0, 0.0), 0.0);
        let slots = tracker.slots(1.0);

        // A point midway sits 30 units from both origins, on both fronts.
        let single = displacement(30.0, 1.0);
        let total = vertical_offset(Vec3::new(30.0, 0.0, 0.0), &slots);
        assert!((total - 2.0 * single).abs() < 1e-4);
    }

    #[test]
    fn test_brightness_feedback() {
        assert_eq!(brightness(0.0), 1.0);
        assert!((brightness(10.0) - 1.5).abs() < 1e-6);
        assert_eq!(brightness(-10.0), brightness(10.0));
    }
}
