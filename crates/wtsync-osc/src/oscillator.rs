//! Per-voice wavetable oscillator driving the sync generator.
//!
//! The oscillator owns a continuous phase in [0, 128) advanced by
//! `128 * f0 / fs` each sample. Every tick it reads the sync generator at
//! the two integer positions bracketing the phase and linearly interpolates
//! between them, which is exactly the access pattern the generator's
//! two-entry cache is built for.

use crate::error::{OscError, OscResult};
use crate::sync::{SyncAccumulator, WaveVariant, TABLE_LEN};

/// One oscillator voice over the sync wavetable entry.
#[derive(Debug, Clone)]
pub struct WavetableOscillator {
    /// Audio sample rate in Hz.
    sample_rate: f64,
    /// Oscillator frequency in Hz.
    frequency: f64,
    /// Continuous table phase in [0, 128).
    phase: f64,
    /// Phase increment per sample.
    phase_step: f64,
    /// Waveform generator for this voice.
    sync: SyncAccumulator,
}

impl WavetableOscillator {
    /// Creates a silent voice at the given sample rate.
    ///
    /// The voice produces the waveform's start value until a frequency is
    /// set.
    ///
    /// # Arguments
    /// * `sample_rate` - Audio sample rate in Hz
    pub fn new(sample_rate: f64) -> OscResult<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(OscError::InvalidSampleRate { rate: sample_rate });
        }
        Ok(Self {
            sample_rate,
            frequency: 0.0,
            phase: 0.0,
            phase_step: 0.0,
            sync: SyncAccumulator::default(),
        })
    }

    /// Sets the oscillator frequency.
    ///
    /// The frequency must be positive and at most Nyquist.
    pub fn set_frequency(&mut self, freq: f64) -> OscResult<()> {
        if !freq.is_finite() || freq <= 0.0 || freq > self.sample_rate / 2.0 {
            return Err(OscError::InvalidFrequency { freq });
        }
        self.frequency = freq;
        self.phase_step = f64::from(TABLE_LEN) * freq / self.sample_rate;
        Ok(())
    }

    /// Returns the oscillator frequency in Hz.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Selects the wave variant. The generator state resets, so the next
    /// cycle starts from the canonical waveform origin.
    pub fn set_wave(&mut self, wave: WaveVariant) {
        self.sync.set_wave(wave);
    }

    /// Selects the wave variant from the 10-bit hardware shape parameter.
    pub fn set_shape(&mut self, param: u16) {
        self.set_wave(WaveVariant::from_shape(param));
    }

    /// Returns the selected wave variant.
    pub fn wave(&self) -> WaveVariant {
        self.sync.wave()
    }

    /// Returns phase and generator state to the start of the cycle.
    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.sync.reset();
    }

    /// Generates one sample.
    ///
    /// # Returns
    /// Interpolated waveform value in [-64, 64)
    pub fn tick(&mut self) -> f64 {
        let pos = self.phase.floor();
        let alpha = self.phase - pos;
        let pos = pos as i32;
        let y1 = self.sync.get(pos);
        let y2 = self.sync.get(pos + 1);
        self.phase += self.phase_step;
        if self.phase >= f64::from(TABLE_LEN) {
            self.phase -= f64::from(TABLE_LEN);
        }
        (1.0 - alpha) * y1 + alpha * y2
    }

    /// Generates a buffer of samples.
    ///
    /// # Arguments
    /// * `num_samples` - Number of samples to generate
    ///
    /// # Returns
    /// Vector of waveform values in [-64, 64)
    pub fn render(&mut self, num_samples: usize) -> Vec<f64> {
        let mut output = Vec::with_capacity(num_samples);
        for _ in 0..num_samples {
            output.push(self.tick());
        }
        output
    }
}
