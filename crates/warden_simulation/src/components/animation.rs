//! Animation компоненты: контракт animation driver'а
//!
//! ECS не блендит анимации. AI только:
//! - пишет continuous параметр "Speed"
//! - ставит / сбрасывает one-shot cues ("Look", "Punch")
//! - читает какой clip активен и его normalized progress
//!
//! Host (AnimationTree движка или headless host) проигрывает clips.

use bevy::prelude::*;

/// One-shot cue (trigger) для animation driver'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationCue {
    Look,
    Punch,
}

impl AnimationCue {
    pub const ALL: [AnimationCue; 2] = [AnimationCue::Look, AnimationCue::Punch];

    pub fn name(&self) -> &'static str {
        match self {
            AnimationCue::Look => "Look",
            AnimationCue::Punch => "Punch",
        }
    }

    /// Clip который проигрывается по этому cue
    pub fn clip(&self) -> AnimationClip {
        match self {
            AnimationCue::Look => AnimationClip::Look,
            AnimationCue::Punch => AnimationClip::Punch,
        }
    }
}

/// Именованный animation state (clip), который AI может опрашивать
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum AnimationClip {
    Look,
    Punch,
}

impl AnimationClip {
    pub fn name(&self) -> &'static str {
        match self {
            AnimationClip::Look => "look",
            AnimationClip::Punch => "punch",
        }
    }
}

/// Контракт animation driver'а
pub trait AnimationDriver {
    /// Параметр "Speed" (locomotion blend), выставляется каждый тик
    fn set_locomotion_speed(&mut self, speed: f32);
    fn fire_cue(&mut self, cue: AnimationCue);
    fn clear_cue(&mut self, cue: AnimationCue);
    fn is_clip_active(&self, clip: AnimationClip) -> bool;
    /// Progress активного clip'а: 0..1, >= 1 — clip доигран хотя бы раз
    fn normalized_time(&self) -> f32;
}

/// ECS-представление animator'а
///
/// `pending_cues` пишет AI, host забирает cue когда запускает clip.
/// `active_clip` / `normalized_time` пишет host.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Animator {
    pub locomotion_speed: f32,
    pub pending_cues: Vec<AnimationCue>,
    /// None = locomotion (idle/walk/run blend)
    pub active_clip: Option<AnimationClip>,
    pub normalized_time: f32,
}

impl Animator {
    pub fn is_cue_pending(&self, cue: AnimationCue) -> bool {
        self.pending_cues.contains(&cue)
    }

    /// Host: забрать первый pending cue (запуск clip'а)
    pub fn take_pending_cue(&mut self) -> Option<AnimationCue> {
        if self.pending_cues.is_empty() {
            None
        } else {
            Some(self.pending_cues.remove(0))
        }
    }
}

impl AnimationDriver for Animator {
    fn set_locomotion_speed(&mut self, speed: f32) {
        self.locomotion_speed = speed;
    }

    fn fire_cue(&mut self, cue: AnimationCue) {
        // trigger — bool: повторный fire до consume ничего не меняет
        if !self.is_cue_pending(cue) {
            self.pending_cues.push(cue);
        }
    }

    fn clear_cue(&mut self, cue: AnimationCue) {
        self.pending_cues.retain(|&pending| pending != cue);
    }

    fn is_clip_active(&self, clip: AnimationClip) -> bool {
        self.active_clip == Some(clip)
    }

    fn normalized_time(&self) -> f32 {
        self.normalized_time
    }
}
