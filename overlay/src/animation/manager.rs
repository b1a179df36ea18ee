//! Name-keyed animation registry

use std::collections::HashMap;
use std::time::{Duration, Instant};

use super::tween::{Easing, Tween};

/// Widget property driven by an animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    /// Host window opacity in [0, 1]
    Opacity,
    /// Uniform scale factor around the widget center
    Scale,
}

/// Side effect to apply when a slot completes naturally.
///
/// Kept as data rather than a callback: a canceled slot simply drops its
/// finish value, so teardown can never run a stale completion hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Finish {
    #[default]
    None,
    /// Hide the host window (fade-out-then-hide)
    Hide,
}

/// Lifecycle tag for a slot; retired slots leave the registry (= Idle)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Running,
    Completed,
    Canceled,
}

/// Everything needed to start one animation under a name
#[derive(Debug, Clone)]
pub struct AnimationSpec {
    pub property: Property,
    pub from: f32,
    pub to: f32,
    pub mid: Option<f32>,
    pub duration: Duration,
    pub easing: Easing,
    pub finish: Finish,
}

impl AnimationSpec {
    /// Opacity ramp with the smooth fade curve
    pub fn fade(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            property: Property::Opacity,
            from,
            to,
            mid: None,
            duration,
            easing: Easing::InOutCubic,
            finish: Finish::None,
        }
    }

    /// Three-keyframe scale pulse: rest → 105% at the midpoint → rest
    pub fn bounce(duration: Duration) -> Self {
        Self {
            property: Property::Scale,
            from: 1.0,
            to: 1.0,
            mid: Some(1.05),
            duration,
            easing: Easing::OutBounce,
            finish: Finish::None,
        }
    }

    pub fn with_finish(mut self, finish: Finish) -> Self {
        self.finish = finish;
        self
    }
}

#[derive(Debug)]
struct Slot {
    state: SlotState,
    property: Property,
    tween: Tween,
    finish: Finish,
}

/// One property update emitted by `advance`
#[derive(Debug, Clone, Copy)]
pub struct AnimationUpdate {
    pub property: Property,
    pub value: f32,
    /// True when the slot completed this tick and has been retired
    pub completed: bool,
    /// Completion effect; only meaningful when `completed`
    pub finish: Finish,
}

/// Registry of the widget's running animations, keyed by name.
///
/// The manager exclusively owns every tween it creates and releases it
/// when the slot leaves the registry — on supersede, cancel, teardown, or
/// natural completion.
#[derive(Debug, Default)]
pub struct AnimationManager {
    slots: HashMap<String, Slot>,
}

impl AnimationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an animation under `name`. A slot already running under that
    /// name is canceled and released first, so afterwards exactly one
    /// slot exists for the name.
    pub fn start(&mut self, now: Instant, name: &str, spec: AnimationSpec) {
        if let Some(mut previous) = self.slots.remove(name) {
            previous.state = SlotState::Canceled;
            tracing::trace!(name, state = ?previous.state, "superseded animation");
        }

        let mut tween = Tween::start(now, spec.from, spec.to, spec.duration, spec.easing);
        if let Some(mid) = spec.mid {
            tween = tween.with_midpoint(mid);
        }
        self.slots.insert(
            name.to_string(),
            Slot {
                state: SlotState::Running,
                property: spec.property,
                tween,
                finish: spec.finish,
            },
        );
    }

    /// Stop and release the slot under `name`; no-op when none exists
    pub fn cancel(&mut self, name: &str) {
        if let Some(mut slot) = self.slots.remove(name) {
            slot.state = SlotState::Canceled;
            tracing::trace!(name, state = ?slot.state, "canceled animation");
        }
    }

    /// Synchronously release every slot. Finish effects are dropped with
    /// their slots; nothing can fire after this returns.
    pub fn cancel_all(&mut self) {
        for (name, mut slot) in self.slots.drain() {
            slot.state = SlotState::Canceled;
            tracing::trace!(name = %name, state = ?slot.state, "canceled animation at teardown");
        }
    }

    /// Drive all running tweens to `now`.
    ///
    /// Completed slots are retired from the registry *before* this
    /// returns, so a caller acting on a `Finish` (or immediately starting
    /// a new animation under the same name) can never observe the old
    /// slot half-retired.
    pub fn advance(&mut self, now: Instant) -> Vec<AnimationUpdate> {
        let mut updates = Vec::with_capacity(self.slots.len());
        let mut finished = Vec::new();

        for (name, slot) in &mut self.slots {
            let value = slot.tween.value_at(now);
            if slot.tween.is_finished(now) {
                slot.state = SlotState::Completed;
                finished.push(name.clone());
                updates.push(AnimationUpdate {
                    property: slot.property,
                    value,
                    completed: true,
                    finish: slot.finish,
                });
            } else {
                updates.push(AnimationUpdate {
                    property: slot.property,
                    value,
                    completed: false,
                    finish: Finish::None,
                });
            }
        }

        for name in &finished {
            self.slots.remove(name);
        }
        updates
    }

    pub fn is_running(&self, name: &str) -> bool {
        self.slots
            .get(name)
            .is_some_and(|slot| slot.state == SlotState::Running)
    }

    pub fn running_count(&self) -> usize {
        self.slots.len()
    }
}
