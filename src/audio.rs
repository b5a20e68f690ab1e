//! Audio via the Web Audio API
//!
//! Every sound is synthesized from oscillator envelopes, including the
//! looping background pad - no sample files to load. `AudioPrefs`
//! holds the player-facing switches and compiles on every target;
//! `AudioManager` owns the browser audio graph and is wasm-only.

use crate::consts::{DEFAULT_VOLUME, VOLUME_STEP};

#[cfg(target_arch = "wasm32")]
use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Ball bounces off the paddle
    PaddleHit,
    /// Brick takes a hit but survives
    BrickDamaged,
    /// Brick destroyed
    BrickBreak,
    /// Ball dropped with lives to spare
    BallLost,
    /// Last brick of the level destroyed
    LevelComplete,
    /// Final life spent
    GameOver,
    /// New game starting
    GameStart,
}

/// Player audio switches, stepped by the keyboard bindings.
///
/// Kept apart from the Web Audio plumbing so the toggle and clamp
/// rules stay testable outside the browser.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AudioPrefs {
    /// Sound effects on/off
    pub sfx_enabled: bool,
    /// Background music on/off
    pub music_enabled: bool,
    master_volume: f32,
}

impl Default for AudioPrefs {
    fn default() -> Self {
        Self {
            sfx_enabled: true,
            music_enabled: true,
            master_volume: DEFAULT_VOLUME,
        }
    }
}

impl AudioPrefs {
    /// Flip sound effects, returning the new state
    pub fn toggle_sfx(&mut self) -> bool {
        self.sfx_enabled = !self.sfx_enabled;
        self.sfx_enabled
    }

    /// Flip background music, returning the new state
    pub fn toggle_music(&mut self) -> bool {
        self.music_enabled = !self.music_enabled;
        self.music_enabled
    }

    /// Raise master volume by one step, returning the new level
    pub fn volume_up(&mut self) -> f32 {
        self.set_volume(self.master_volume + VOLUME_STEP)
    }

    /// Lower master volume by one step, returning the new level
    pub fn volume_down(&mut self) -> f32 {
        self.set_volume(self.master_volume - VOLUME_STEP)
    }

    /// Current master volume (0.0 - 1.0)
    pub fn volume(&self) -> f32 {
        self.master_volume
    }

    /// Volume for one-shot effects, zero while effects are off
    pub fn sfx_volume(&self) -> f32 {
        if self.sfx_enabled { self.master_volume } else { 0.0 }
    }

    /// Volume for the background pad, zero while music is off
    pub fn music_volume(&self) -> f32 {
        if self.music_enabled { self.master_volume } else { 0.0 }
    }

    fn set_volume(&mut self, vol: f32) -> f32 {
        self.master_volume = vol.clamp(0.0, 1.0);
        self.master_volume
    }
}

/// Frequencies and per-node levels of the background pad (A minor drone)
#[cfg(target_arch = "wasm32")]
const MUSIC_PAD: [(f32, f32); 4] = [
    (55.0, 0.10),
    (82.41, 0.07),
    (110.0, 0.06),
    (130.81, 0.045),
];

/// Audio manager for the game
#[cfg(target_arch = "wasm32")]
pub struct AudioManager {
    ctx: Option<AudioContext>,
    prefs: AudioPrefs,
    /// Live pad nodes with their relative levels, kept so the pad can
    /// be retuned or silenced later
    music_nodes: Vec<(OscillatorNode, GainNode, f32)>,
}

#[cfg(target_arch = "wasm32")]
impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
impl AudioManager {
    pub fn new() -> Self {
        // Try to create audio context (may fail if not in secure context)
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            prefs: AudioPrefs::default(),
            music_nodes: Vec::new(),
        }
    }

    /// Resume audio context (required after user gesture)
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            let _ = ctx.resume();
        }
    }

    /// Flip sound effects, returning the new state
    pub fn toggle_sfx(&mut self) -> bool {
        self.prefs.toggle_sfx()
    }

    /// Flip background music, returning the new state. Turning it off
    /// fades out any playing pad; turning it back on is the caller's
    /// cue to `start_music` again.
    pub fn toggle_music(&mut self) -> bool {
        let on = self.prefs.toggle_music();
        if !on {
            self.stop_music();
        }
        on
    }

    /// Raise master volume by one step, returning the new level
    pub fn volume_up(&mut self) -> f32 {
        let vol = self.prefs.volume_up();
        self.retune_music();
        vol
    }

    /// Lower master volume by one step, returning the new level
    pub fn volume_down(&mut self) -> f32 {
        let vol = self.prefs.volume_down();
        self.retune_music();
        vol
    }

    /// Start the looping background pad `delay_s` seconds from now.
    /// No-op while music is off or the pad is already sounding.
    pub fn start_music(&mut self, delay_s: f64) {
        if !self.prefs.music_enabled || !self.music_nodes.is_empty() {
            return;
        }
        let Some(ctx) = self.ctx.clone() else { return };
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        let vol = self.prefs.music_volume();
        let t = ctx.current_time() + delay_s;
        for (freq, level) in MUSIC_PAD {
            let Some((osc, gain)) = self.create_osc(&ctx, freq, OscillatorType::Triangle) else {
                continue;
            };
            gain.gain().set_value_at_time(0.0001, t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(vol * level, t + 1.5)
                .ok();
            if osc.start_with_when(t).is_ok() {
                self.music_nodes.push((osc, gain, level));
            }
        }
    }

    /// Fade out and drop the background pad
    pub fn stop_music(&mut self) {
        let Some(ctx) = &self.ctx else {
            self.music_nodes.clear();
            return;
        };
        let t = ctx.current_time();
        for (osc, gain, _) in self.music_nodes.drain(..) {
            gain.gain().cancel_scheduled_values(t).ok();
            gain.gain().set_value_at_time(gain.gain().value(), t).ok();
            gain.gain()
                .linear_ramp_to_value_at_time(0.0001, t + 0.2)
                .ok();
            osc.stop_with_when(t + 0.25).ok();
        }
    }

    /// Bring the pad gains in line with the current prefs
    fn retune_music(&self) {
        let Some(ctx) = &self.ctx else { return };
        let vol = self.prefs.music_volume();
        let t = ctx.current_time();
        for (_, gain, level) in &self.music_nodes {
            gain.gain().cancel_scheduled_values(t).ok();
            gain.gain().set_target_at_time(vol * level, t, 0.05).ok();
        }
    }

    /// Play a sound effect
    pub fn play(&self, effect: SoundEffect) {
        let vol = self.prefs.sfx_volume();
        if vol <= 0.0 {
            return;
        }

        let Some(ctx) = &self.ctx else { return };

        // Resume context if suspended (browsers require user gesture)
        if ctx.state() == web_sys::AudioContextState::Suspended {
            let _ = ctx.resume();
        }

        match effect {
            SoundEffect::PaddleHit => self.play_paddle_hit(ctx, vol),
            SoundEffect::BrickDamaged => self.play_brick_damaged(ctx, vol),
            SoundEffect::BrickBreak => self.play_brick_break(ctx, vol),
            SoundEffect::BallLost => self.play_ball_lost(ctx, vol),
            SoundEffect::LevelComplete => self.play_level_complete(ctx, vol),
            SoundEffect::GameOver => self.play_game_over(ctx, vol),
            SoundEffect::GameStart => self.play_game_start(ctx, vol),
        }
    }

    // === Sound generators ===

    /// Create an oscillator with gain envelope
    fn create_osc(
        &self,
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

    /// Paddle hit - solid thump
    fn play_paddle_hit(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 160.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.5, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.09)
            .ok();
        osc.frequency().set_value_at_time(160.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(65.0, t + 0.09)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.12).ok();
    }

    /// Brick damaged but standing - dull clank
    fn play_brick_damaged(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 240.0, OscillatorType::Triangle) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.3, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.07)
            .ok();
        osc.frequency().set_value_at_time(240.0, t).ok();
        osc.frequency().set_value_at_time(180.0, t + 0.04).ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.1).ok();
    }

    /// Brick break - falling zap over a bass thump
    fn play_brick_break(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 880.0, OscillatorType::Square) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.12)
                .ok();
            osc.frequency().set_value_at_time(880.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(180.0, t + 0.12)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.15).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 70.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.25, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.08)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.1).ok();
        }
    }

    /// Ball lost - long descend into the floor
    fn play_ball_lost(&self, ctx: &AudioContext, vol: f32) {
        let Some((osc, gain)) = self.create_osc(ctx, 280.0, OscillatorType::Sine) else {
            return;
        };
        let t = ctx.current_time();

        gain.gain().set_value_at_time(vol * 0.4, t).ok();
        gain.gain()
            .exponential_ramp_to_value_at_time(0.01, t + 0.6)
            .ok();
        osc.frequency().set_value_at_time(280.0, t).ok();
        osc.frequency()
            .exponential_ramp_to_value_at_time(30.0, t + 0.6)
            .ok();

        osc.start().ok();
        osc.stop_with_when(t + 0.7).ok();
    }

    /// Level complete - rising arpeggio
    fn play_level_complete(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [440.0, 554.0, 659.0, 880.0].iter().enumerate() {
            let delay = i as f64 * 0.09;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Triangle) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.45).ok();
            }
        }
    }

    /// Game over - sad descending steps
    fn play_game_over(&self, ctx: &AudioContext, vol: f32) {
        for (i, freq) in [392.0, 311.0, 262.0, 196.0].iter().enumerate() {
            let delay = i as f64 * 0.22;
            if let Some((osc, gain)) = self.create_osc(ctx, *freq, OscillatorType::Sine) {
                let t = ctx.current_time() + delay;
                gain.gain().set_value_at_time(vol * 0.3, t).ok();
                gain.gain()
                    .exponential_ramp_to_value_at_time(0.01, t + 0.35)
                    .ok();
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + 0.45).ok();
            }
        }
    }

    /// Game start - rising sweep with a landing ping
    fn play_game_start(&self, ctx: &AudioContext, vol: f32) {
        let t = ctx.current_time();

        if let Some((osc, gain)) = self.create_osc(ctx, 180.0, OscillatorType::Triangle) {
            gain.gain().set_value_at_time(vol * 0.3, t).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.25)
                .ok();
            osc.frequency().set_value_at_time(180.0, t).ok();
            osc.frequency()
                .exponential_ramp_to_value_at_time(720.0, t + 0.2)
                .ok();
            osc.start().ok();
            osc.stop_with_when(t + 0.3).ok();
        }

        if let Some((osc, gain)) = self.create_osc(ctx, 960.0, OscillatorType::Sine) {
            gain.gain().set_value_at_time(vol * 0.2, t + 0.18).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, t + 0.45)
                .ok();
            osc.start_with_when(t + 0.18).ok();
            osc.stop_with_when(t + 0.5).ok();
        }
    }
}
