//! Audio system using Web Audio API
//!
//! Procedurally generated sound effects - no external files needed!
//! Sounds are fire-and-forget: if the AudioContext cannot be created the
//! game runs silently.

use crate::sim::{GameEvent, Gravity};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Gravity now pulls up - rising chirp
    FlipUp,
    /// Gravity now pulls down - falling chirp
    FlipDown,
    /// Player hit an obstacle - low crunch
    Crash,
    /// New best score
    HighScore,
}

impl SoundEffect {
    /// Sound for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<Self> {
        match event {
            GameEvent::Flipped {
                direction: Gravity::Up,
            } => Some(SoundEffect::FlipUp),
            GameEvent::Flipped {
                direction: Gravity::Down,
            } => Some(SoundEffect::FlipDown),
            GameEvent::Collided { .. } => Some(SoundEffect::Crash),
            GameEvent::BestScoreBeaten { .. } => Some(SoundEffect::HighScore),
            GameEvent::RoundStarted | GameEvent::ScoreIncremented { .. } => None,
        }
    }

    /// Oscillator voices making up this effect
    pub fn voices(self) -> Vec<Voice> {
        match self {
            SoundEffect::FlipUp => vec![Voice::sweep(Wave::Square, 520.0, 880.0, 0.18, 0.09)],
            SoundEffect::FlipDown => vec![Voice::sweep(Wave::Square, 440.0, 260.0, 0.18, 0.09)],
            SoundEffect::Crash => vec![
                Voice {
                    crackle: Some(0.6),
                    ..Voice::sweep(Wave::Sawtooth, 180.0, 40.0, 0.4, 0.35)
                },
                Voice::sweep(Wave::Sine, 90.0, 30.0, 0.5, 0.3),
            ],
            SoundEffect::HighScore => [523.25, 659.25, 783.99]
                .iter()
                .enumerate()
                .map(|(i, &freq)| Voice {
                    delay: i as f64 * 0.09,
                    ..Voice::sweep(Wave::Triangle, freq, freq, 0.3, 0.18)
                })
                .collect(),
        }
    }
}

/// Oscillator shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Square,
    Sawtooth,
    Triangle,
}

/// One oscillator with an exponential frequency sweep and gain decay
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    pub wave: Wave,
    pub freq_start: f32,
    pub freq_end: f32,
    /// Peak gain before master volume (0.0 - 1.0)
    pub gain: f32,
    /// Seconds
    pub duration: f64,
    /// Seconds after trigger
    pub delay: f64,
    /// Alternate the frequency by this fraction every 10 ms (noise-like)
    pub crackle: Option<f32>,
}

impl Voice {
    pub fn sweep(wave: Wave, freq_start: f32, freq_end: f32, gain: f32, duration: f64) -> Self {
        Self {
            wave,
            freq_start,
            freq_end,
            gain,
            duration,
            delay: 0.0,
            crackle: None,
        }
    }
}

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::{SoundEffect, Voice, Wave};

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        volume: f32,
    }

    impl AudioManager {
        pub fn new(volume: f32) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            Self {
                ctx,
                volume: volume.clamp(0.0, 1.0),
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        pub fn set_volume(&mut self, volume: f32) {
            self.volume = volume.clamp(0.0, 1.0);
        }

        /// Play a sound effect
        pub fn play(&self, effect: SoundEffect) {
            if self.volume <= 0.0 {
                return;
            }
            let Some(ctx) = &self.ctx else { return };

            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }

            for voice in effect.voices() {
                self.play_voice(ctx, &voice);
            }
        }

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

        fn play_voice(&self, ctx: &AudioContext, voice: &Voice) {
            let osc_type = match voice.wave {
                Wave::Sine => OscillatorType::Sine,
                Wave::Square => OscillatorType::Square,
                Wave::Sawtooth => OscillatorType::Sawtooth,
                Wave::Triangle => OscillatorType::Triangle,
            };
            let Some((osc, gain)) = self.create_osc(ctx, voice.freq_start, osc_type) else {
                return;
            };
            let t = ctx.current_time() + voice.delay;
            let end = t + voice.duration;

            gain.gain().set_value_at_time(0.0, ctx.current_time()).ok();
            gain.gain().set_value_at_time(voice.gain * self.volume, t).ok();
            gain.gain().exponential_ramp_to_value_at_time(0.001, end).ok();

            osc.frequency().set_value_at_time(voice.freq_start, t).ok();
            match voice.crackle {
                Some(amount) => {
                    // Stepped jumps around the sweep read as noise
                    let steps = (voice.duration / 0.01) as u32;
                    for i in 0..steps {
                        let k = i as f32 / steps.max(1) as f32;
                        let base = voice.freq_start + (voice.freq_end - voice.freq_start) * k;
                        let jump = if i % 2 == 0 { 1.0 + amount } else { 1.0 - amount };
                        osc.frequency()
                            .set_value_at_time(base * jump, t + i as f64 * 0.01)
                            .ok();
                    }
                }
                None => {
                    osc.frequency()
                        .exponential_ramp_to_value_at_time(voice.freq_end, end)
                        .ok();
                }
            }

            osc.start_with_when(t).ok();
            osc.stop_with_when(end + 0.02).ok();
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

/// Native stub: no audio device, effects are only logged
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct AudioManager {
    volume: f32,
}

#[cfg(not(target_arch = "wasm32"))]
impl AudioManager {
    pub fn new(volume: f32) -> Self {
        Self {
            volume: volume.clamp(0.0, 1.0),
        }
    }

    pub fn resume(&self) {}

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn play(&self, effect: SoundEffect) {
        if self.volume > 0.0 {
            log::debug!("sound: {:?}", effect);
        }
    }
}

impl AudioManager {
    /// Play whatever sounds a batch of simulation events calls for
    pub fn play_events(&self, events: &[GameEvent]) {
        for effect in events.iter().filter_map(SoundEffect::for_event) {
            self.play(effect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_pitch_follows_direction() {
        let up = SoundEffect::for_event(&GameEvent::Flipped {
            direction: Gravity::Up,
        })
        .unwrap();
        let down = SoundEffect::for_event(&GameEvent::Flipped {
            direction: Gravity::Down,
        })
        .unwrap();
        assert_eq!(up, SoundEffect::FlipUp);
        assert_eq!(down, SoundEffect::FlipDown);
        let up_voice = up.voices()[0];
        let down_voice = down.voices()[0];
        assert!(up_voice.freq_end > up_voice.freq_start);
        assert!(down_voice.freq_end < down_voice.freq_start);
        assert!(up_voice.freq_start > down_voice.freq_start);
    }

    #[test]
    fn test_crash_is_lower_and_noisy() {
        let crash = SoundEffect::for_event(&GameEvent::Collided { score: 3 }).unwrap();
        let voices = crash.voices();
        assert!(voices.iter().any(|v| v.crackle.is_some()));
        let flip_low = SoundEffect::FlipDown.voices()[0].freq_end;
        assert!(voices.iter().all(|v| v.freq_start < flip_low));
    }

    #[test]
    fn test_silent_events() {
        assert!(SoundEffect::for_event(&GameEvent::RoundStarted).is_none());
        assert!(SoundEffect::for_event(&GameEvent::ScoreIncremented { score: 1 }).is_none());
    }

    #[test]
    fn test_high_score_arpeggio_is_staggered() {
        let voices = SoundEffect::HighScore.voices();
        assert_eq!(voices.len(), 3);
        assert!(voices.windows(2).all(|w| w[1].delay > w[0].delay));
    }
}
