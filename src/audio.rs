//! Sound cues
//!
//! The game never plays audio itself. Scenes and the round driver push cues
//! here and whatever presents the game drains and plays them.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Player hit a pursuer
    Crash,
    /// Engine hum while driving (looped)
    Engine,
    /// Out of lives or time
    Lose,
    /// Background track (looped)
    Music,
    /// Flag collected
    PickupFlag,
    /// Smoke dropped
    Smoke,
    /// Menu selection moved
    UiMove,
    /// Menu item activated
    UiSelect,
    /// All flags collected
    Win,
}

impl SoundEffect {
    /// Asset file the presentation layer should load
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Crash => "crash.mp3",
            SoundEffect::Engine => "engine_loop.mp3",
            SoundEffect::Lose => "lose.mp3",
            SoundEffect::Music => "music_loop.mp3",
            SoundEffect::PickupFlag => "pickup_flag.mp3",
            SoundEffect::Smoke => "smoke.mp3",
            SoundEffect::UiMove => "ui_move.mp3",
            SoundEffect::UiSelect => "ui_select.mp3",
            SoundEffect::Win => "win.mp3",
        }
    }

    pub fn is_music(&self) -> bool {
        matches!(self, SoundEffect::Music)
    }

    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::MarkerCollected { .. } => Some(SoundEffect::PickupFlag),
            GameEvent::SmokeDropped { .. } => Some(SoundEffect::Smoke),
            GameEvent::Crash => Some(SoundEffect::Crash),
            GameEvent::Victory => Some(SoundEffect::Win),
            GameEvent::Defeat => Some(SoundEffect::Lose),
            GameEvent::PursuerConfused { .. }
            | GameEvent::Respawned
            | GameEvent::TimeExpired
            | GameEvent::NewBestScore { .. } => None,
        }
    }
}

/// One instruction for the audio backend
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AudioCue {
    Play { effect: SoundEffect, volume: f32 },
    Loop { effect: SoundEffect, volume: f32 },
    Stop(SoundEffect),
    PauseMusic,
    ResumeMusic,
}

/// Pending cues plus the mixer levels they are stamped with
#[derive(Debug, Clone)]
pub struct AudioQueue {
    music_volume: f32,
    sfx_volume: f32,
    muted: bool,
    cues: Vec<AudioCue>,
}

impl Default for AudioQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioQueue {
    pub fn new() -> Self {
        let defaults = Settings::default();
        Self {
            music_volume: defaults.music_volume,
            sfx_volume: defaults.sfx_volume,
            muted: false,
            cues: Vec::new(),
        }
    }

    /// Take volumes from settings
    pub fn apply_settings(&mut self, settings: &Settings) {
        self.set_music_volume(settings.music_volume);
        self.set_sfx_volume(settings.sfx_volume);
    }

    /// Set music volume (0.0 - 1.0)
    pub fn set_music_volume(&mut self, vol: f32) {
        self.music_volume = vol.clamp(0.0, 1.0);
    }

    /// Set sound effects volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn effective_volume(&self, effect: SoundEffect) -> f32 {
        if self.muted {
            return 0.0;
        }
        if effect.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        }
    }

    /// Queue a one-shot effect
    pub fn play(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume(effect);
        if volume <= 0.0 {
            return;
        }
        self.cues.push(AudioCue::Play { effect, volume });
    }

    /// Queue a looping effect (music, engine)
    pub fn play_loop(&mut self, effect: SoundEffect) {
        let volume = self.effective_volume(effect);
        self.cues.push(AudioCue::Loop { effect, volume });
    }

    pub fn stop(&mut self, effect: SoundEffect) {
        self.cues.push(AudioCue::Stop(effect));
    }

    pub fn pause_music(&mut self) {
        self.cues.push(AudioCue::PauseMusic);
    }

    pub fn resume_music(&mut self) {
        self.cues.push(AudioCue::ResumeMusic);
    }

    /// Queue the cue for each event that has one
    pub fn play_events(&mut self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }

    /// Hand every pending cue to the caller
    pub fn drain(&mut self) -> Vec<AudioCue> {
        std::mem::take(&mut self.cues)
    }

    pub fn pending(&self) -> &[AudioCue] {
        &self.cues
    }
}
