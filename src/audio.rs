//! Audio system using Web Audio API
//!
//! Procedurally generated cues, one voice per cue. Triggering a cue that is
//! still sounding cuts the old voice and starts again from the top.

use std::collections::HashMap;

use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

use crate::settings::Settings;
use crate::sim::{SoundCue, SoundSink};

/// Audio manager for the game
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Last oscillator started for each cue
    voices: HashMap<SoundCue, OscillatorNode>,
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            voices: HashMap::new(),
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
        }
    }

    /// Manager configured from saved preferences
    pub fn from_settings(settings: &Settings) -> Self {
        let mut audio = Self::new();
        audio.set_master_volume(settings.master_volume);
        audio.set_sfx_volume(settings.sfx_volume);
        audio.set_muted(settings.muted);
        audio
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute; muting also silences voices already playing
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        if muted {
            for (_, osc) in self.voices.drain() {
                osc.stop().ok();
            }
        }
    }

    fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Create an oscillator with gain envelope
    fn create_osc(
        ctx: &AudioContext,
        freq: f32,
        osc_type: OscillatorType,
    ) -> Option<(OscillatorNode, GainNode)> {
        let osc = ctx.create_oscillator().ok()?;
        let gain = ctx.create_gain().ok()?;

        osc.set_type(osc_type);
        osc.frequency().set_value(freq);
        osc.connect_with_audio_node(&gain).ok()?;
        gain.connect_with_audio_node(&ctx.destination()).ok()?;

        Some((osc, gain))
    }

    // === Sound generators ===

    /// Jump - quick upward chirp
    fn jump(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = Self::create_osc(ctx, 220.0, OscillatorType::Square)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.15, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.18)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(660.0, t + 0.12)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.2).ok();
        Some(osc)
    }

    /// Walk - soft low tick
    fn walk(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = Self::create_osc(ctx, 90.0, OscillatorType::Triangle)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.12, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.06)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.08).ok();
        Some(osc)
    }

    /// Break - crunchy descending burst
    fn break_block(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = Self::create_osc(ctx, 300.0, OscillatorType::Sawtooth)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.15)
            .ok();
        osc.frequency().set_value_at_time(300.0, t).ok();
        osc.frequency().set_value_at_time(180.0, t + 0.03).ok();
        osc.frequency().set_value_at_time(260.0, t + 0.06).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(60.0, t + 0.15)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.18).ok();
        Some(osc)
    }

    /// Place - solid thump
    fn place(ctx: &AudioContext, vol: f32) -> Option<OscillatorNode> {
        let (osc, gain) = Self::create_osc(ctx, 150.0, OscillatorType::Sine)?;
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.1)
            .ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(70.0, t + 0.1)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
        Some(osc)
    }
}

impl SoundSink for AudioManager {
    fn play(&mut self, cue: SoundCue) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        // Restart from the top
        if let Some(previous) = self.voices.remove(&cue) {
            previous.stop().ok();
        }

        let voice = match cue {
            SoundCue::Jump => Self::jump(ctx, vol),
            SoundCue::Walk => Self::walk(ctx, vol),
            SoundCue::Break => Self::break_block(ctx, vol),
            SoundCue::Place => Self::place(ctx, vol),
        };
        match voice {
            Some(osc) => {
                self.voices.insert(cue, osc);
            }
            None => log::debug!("Could not start '{}' voice", cue.as_str()),
        }
    }
}
