//! Sync wavetable oscillator core
//!
//! This crate implements the waveform generator behind a classic hardware
//! wavetable entry: a Q8.24 phase accumulator that overflows and retriggers
//! ("sync") several times within one 128-position table cycle. A wave
//! variant parameter (0..=59) scales the accumulator step, so higher
//! variants pack more sub-divided sawtooth ramps into each cycle.
//!
//! # Overview
//!
//! - [`SyncAccumulator`] - the stateful fixed-point generator, queried per
//!   integer table position
//! - [`WavetableOscillator`] - a per-voice wrapper that advances a
//!   continuous phase and linearly interpolates between bracketing positions
//! - [`WaveVariant`] - clamped variant index, including the 10-bit hardware
//!   shape-parameter mapping
//!
//! # Determinism
//!
//! All waveform state lives in a 32-bit fixed-point accumulator; floating
//! point is used only for the final output conversion. Given the same
//! variant and query sequence, output is byte-identical across runs.
//!
//! # Example
//!
//! ```
//! use wtsync_osc::{WaveVariant, WavetableOscillator};
//!
//! let mut osc = WavetableOscillator::new(48000.0)?;
//! osc.set_wave(WaveVariant::new(10));
//! osc.set_frequency(110.0)?;
//! let samples = osc.render(256);
//! assert!(samples.iter().all(|s| (-64.0..64.0).contains(s)));
//! # Ok::<(), wtsync_osc::OscError>(())
//! ```

pub mod error;
pub mod oscillator;
pub mod sync;

pub use error::{OscError, OscResult};
pub use oscillator::WavetableOscillator;
pub use sync::{SyncAccumulator, WaveVariant, MAX_WAVE, TABLE_LEN};
