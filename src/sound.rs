use rodio::{OutputStream, Source};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

/// Pitch for a correct keystroke (A4)
pub const CORRECT_HZ: f32 = 440.0;
/// Pitch for a wrong keystroke
pub const INCORRECT_HZ: f32 = 150.0;

const BLIP_MS: u32 = 100;
const BLIP_SECS: f32 = BLIP_MS as f32 / 1000.0;
const START_GAIN: f32 = 0.1;
const END_GAIN: f32 = 0.01;
const SAMPLE_RATE: u32 = 44_100;

/// Audible feedback per keystroke. Implementations must never fail the
/// caller; a missing audio device just means silence.
pub trait SoundFeedback {
    fn keystroke(&self, correct: bool);
}

/// No sound at all
#[derive(Debug, Clone, Copy, Default)]
pub struct Muted;

impl SoundFeedback for Muted {
    fn keystroke(&self, _correct: bool) {}
}

/// Short sine tone with an exponentially decaying envelope
#[derive(Debug, Clone)]
pub struct Blip {
    freq: f32,
    num_sample: u32,
    total_samples: u32,
}

impl Blip {
    pub fn new(freq: f32) -> Self {
        Self {
            freq,
            num_sample: 0,
            total_samples: SAMPLE_RATE * BLIP_MS / 1000,
        }
    }

    pub fn for_keystroke(correct: bool) -> Self {
        Self::new(if correct { CORRECT_HZ } else { INCORRECT_HZ })
    }

    fn gain_at(t: f32) -> f32 {
        START_GAIN * (END_GAIN / START_GAIN).powf(t / BLIP_SECS)
    }
}

impl Iterator for Blip {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.num_sample >= self.total_samples {
            return None;
        }
        let t = self.num_sample as f32 / SAMPLE_RATE as f32;
        self.num_sample += 1;
        Some((2.0 * std::f32::consts::PI * self.freq * t).sin() * Self::gain_at(t))
    }
}

impl Source for Blip {
    fn current_frame_len(&self) -> Option<usize> {
        Some((self.total_samples - self.num_sample) as usize)
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_millis(BLIP_MS as u64))
    }
}

/// Plays a [`Blip`] per keystroke on a dedicated audio thread
pub struct ToneFeedback {
    tx: Sender<bool>,
}

impl ToneFeedback {
    pub fn spawn() -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel::<bool>();

        // The output stream is not Send, so it lives and dies on this thread
        thread::Builder::new()
            .name("keystroke-audio".to_string())
            .spawn(move || {
                let stream = match OutputStream::try_default() {
                    Ok(s) => Some(s),
                    Err(e) => {
                        log::debug!("no audio output, keystroke sounds disabled: {e}");
                        None
                    }
                };

                while let Ok(correct) = rx.recv() {
                    if let Some((_, ref handle)) = stream {
                        if let Err(e) = handle.play_raw(Blip::for_keystroke(correct)) {
                            log::debug!("failed to play keystroke sound: {e}");
                        }
                    }
                }
            })?;

        Ok(Self { tx })
    }
}

impl SoundFeedback for ToneFeedback {
    fn keystroke(&self, correct: bool) {
        // audio thread gone means we just go quiet
        let _ = self.tx.send(correct);
    }
}
