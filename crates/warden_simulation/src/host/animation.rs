//! Headless animator: clips по таймеру
//!
//! Pending cue запускает clip когда animator в locomotion.
//! Clip держит normalized_time = 1.0 один тик, затем возвращается в locomotion.

use bevy::prelude::*;

use crate::components::{AnimationClip, Animator};

/// Длительности clips (секунды)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ClipDurations {
    pub look: f32,
    pub punch: f32,
}

impl Default for ClipDurations {
    fn default() -> Self {
        Self {
            look: 2.0,
            punch: 0.8,
        }
    }
}

impl ClipDurations {
    pub fn duration(&self, clip: AnimationClip) -> f32 {
        let seconds = match clip {
            AnimationClip::Look => self.look,
            AnimationClip::Punch => self.punch,
        };
        seconds.max(f32::EPSILON)
    }
}

/// Продвинуть clip на `delta` секунд и запустить pending cue
pub fn advance_animator(animator: &mut Animator, durations: &ClipDurations, delta: f32) {
    if let Some(clip) = animator.active_clip {
        if animator.normalized_time >= 1.0 {
            animator.active_clip = None;
            animator.normalized_time = 0.0;
        } else {
            animator.normalized_time = (animator.normalized_time + delta / durations.duration(clip)).min(1.0);
        }
    }

    if animator.active_clip.is_none() {
        if let Some(cue) = animator.take_pending_cue() {
            animator.active_clip = Some(cue.clip());
            animator.normalized_time = 0.0;
        }
    }
}

/// Система: проиграть clips всех animator'ов
pub fn play_animator_clips(
    mut animators: Query<&mut Animator>,
    durations: Res<ClipDurations>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut animator in animators.iter_mut() {
        advance_animator(&mut animator, &durations, delta);
    }
}
