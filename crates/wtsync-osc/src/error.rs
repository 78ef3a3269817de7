//! Error types for the oscillator boundary.
//!
//! The waveform generator itself has no error surface: wave variants clamp
//! and positions wrap, because it runs inside a hard-real-time audio path
//! where failing mid-stream is not an option. Errors exist only where the
//! voice is configured.

use thiserror::Error;

/// Result type for oscillator configuration.
pub type OscResult<T> = Result<T, OscError>;

/// Errors that can occur while configuring an oscillator voice.
#[derive(Debug, Error)]
pub enum OscError {
    /// Invalid sample rate.
    #[error("invalid sample rate: {rate} Hz")]
    InvalidSampleRate {
        /// The invalid sample rate.
        rate: f64,
    },

    /// Invalid oscillator frequency.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The invalid frequency.
        freq: f64,
    },
}
