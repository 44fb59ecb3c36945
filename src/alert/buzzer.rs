//! Synthesised buzzer played through the default audio device
//!
//! The output stream is not `Send`, so it lives on a dedicated thread that is
//! fed trigger requests over a channel. The device is opened on the first
//! trigger and reused afterwards.

use std::{
    f32::consts::TAU,
    sync::mpsc::{self, Receiver, SyncSender, TrySendError},
    thread,
    time::Duration,
};

use rodio::{OutputStream, OutputStreamHandle, Source};
use tracing::{debug, info, warn};

use super::AlertSignal;

const SAMPLE_RATE: u32 = 44_100;
const TONE_LENGTH: Duration = Duration::from_millis(500);
const START_GAIN: f32 = 0.3;
const END_GAIN: f32 = 0.01;
/// Pending triggers beyond this are dropped
const QUEUE_DEPTH: usize = 4;

/// Buzzer alert backed by a background audio thread
#[derive(Debug)]
pub struct BuzzerAlert {
    requests: SyncSender<()>,
}

impl BuzzerAlert {
    /// Spawn the audio thread. The device itself is opened lazily.
    pub fn new() -> Self {
        let (requests, rx) = mpsc::sync_channel(QUEUE_DEPTH);

        if let Err(e) = thread::Builder::new()
            .name("alert-audio".to_string())
            .spawn(move || audio_thread(rx))
        {
            warn!("Audio thread could not be started, alerts disabled: {}", e);
        }

        Self { requests }
    }
}

impl Default for BuzzerAlert {
    fn default() -> Self {
        Self::new()
    }
}

impl AlertSignal for BuzzerAlert {
    fn trigger(&self) {
        match self.requests.try_send(()) {
            Ok(()) => debug!("Buzzer requested"),
            Err(TrySendError::Full(())) => debug!("Buzzer queue full, dropping alert"),
            Err(TrySendError::Disconnected(())) => debug!("Audio thread gone, alert skipped"),
        }
    }
}

fn audio_thread(rx: Receiver<()>) {
    let mut output: Option<(OutputStream, OutputStreamHandle)> = None;
    let mut unavailable = false;

    while rx.recv().is_ok() {
        if unavailable {
            continue;
        }

        if output.is_none() {
            match OutputStream::try_default() {
                Ok(stream) => {
                    info!("Audio output initialised");
                    output = Some(stream);
                }
                Err(e) => {
                    warn!("Audio output not available, continuing without sound: {}", e);
                    unavailable = true;
                    continue;
                }
            }
        }

        if let Some((_, handle)) = output.as_ref() {
            if let Err(e) = handle.play_raw(BuzzerTone::new()) {
                warn!("Could not play buzzer sound: {}", e);
            }
        }
    }

    debug!("Audio thread shutting down");
}

/// Half-second 800/600/800 Hz buzz with an exponential fade
#[derive(Debug, Clone)]
pub struct BuzzerTone {
    sample_rate: u32,
    position: u64,
    total_samples: u64,
    /// Oscillator phase in cycles, kept in [0, 1)
    cycle: f32,
}

impl BuzzerTone {
    pub fn new() -> Self {
        Self::with_sample_rate(SAMPLE_RATE)
    }

    pub fn with_sample_rate(sample_rate: u32) -> Self {
        let total_samples = u64::from(sample_rate) * TONE_LENGTH.as_millis() as u64 / 1000;
        Self {
            sample_rate,
            position: 0,
            total_samples,
            cycle: 0.0,
        }
    }

    /// Frequency in Hz at `t` seconds into the tone
    pub fn frequency_at(t: f32) -> f32 {
        if (0.1..0.2).contains(&t) {
            600.0
        } else {
            800.0
        }
    }

    /// Amplitude at `t` seconds, decaying from 0.3 to 0.01 over the tone
    pub fn gain_at(t: f32) -> f32 {
        let progress = (t / TONE_LENGTH.as_secs_f32()).clamp(0.0, 1.0);
        START_GAIN * (END_GAIN / START_GAIN).powf(progress)
    }
}

impl Default for BuzzerTone {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for BuzzerTone {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total_samples {
            return None;
        }

        let t = self.position as f32 / self.sample_rate as f32;
        let sample = (self.cycle * TAU).sin() * Self::gain_at(t);

        self.cycle = (self.cycle + Self::frequency_at(t) / self.sample_rate as f32).fract();
        self.position += 1;
        Some(sample)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total_samples - self.position) as usize;
        (left, Some(left))
    }
}

impl Source for BuzzerTone {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(TONE_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_sweeps_down_and_back_up() {
        assert_eq!(BuzzerTone::frequency_at(0.0), 800.0);
        assert_eq!(BuzzerTone::frequency_at(0.15), 600.0);
        assert_eq!(BuzzerTone::frequency_at(0.25), 800.0);
    }

    #[test]
    fn gain_decays_to_near_silence() {
        assert!((BuzzerTone::gain_at(0.0) - 0.3).abs() < 1e-6);
        assert!((BuzzerTone::gain_at(0.5) - 0.01).abs() < 1e-6);
        assert!(BuzzerTone::gain_at(0.25) < BuzzerTone::gain_at(0.1));
    }

    #[test]
    fn tone_lasts_half_a_second() {
        let tone = BuzzerTone::with_sample_rate(8_000);
        assert_eq!(tone.total_duration(), Some(Duration::from_millis(500)));

        let samples: Vec<f32> = tone.collect();
        assert_eq!(samples.len(), 4_000);
        assert!(samples.iter().all(|s| s.abs() <= START_GAIN));
    }

    #[test]
    fn trigger_never_blocks_without_a_device() {
        let alert = BuzzerAlert::new();
        for _ in 0..(QUEUE_DEPTH * 3) {
            alert.trigger();
        }
    }
}
