//! Sync waveform generation (hardware wavetable entry 28).
//!
//! The sync family of waveforms comes from a phase accumulator that runs
//! faster than the 128-position table cycle and is forced back to zero every
//! time it overflows. Each overflow ("sync retrigger") restarts the ramp
//! mid-cycle, so higher wave variants pack more sub-cycles into one table
//! period and sound progressively brighter.
//!
//! The shape cannot be computed from a position alone: the exact sample at
//! which an overflow lands depends on the fractional step size and on every
//! addition since the last reset. The generator therefore keeps explicit
//! accumulator state and walks forward one position at a time, re-seeding
//! from zero whenever the table cycle wraps.
//!
//! All arithmetic is Q8.24 fixed point in a `u32`. Floating point enters
//! only at the final output conversion, so the overflow timing that defines
//! the waveform family is exact and deterministic.

/// Number of discrete positions in one table cycle.
pub const TABLE_LEN: i32 = 128;

/// Highest selectable wave variant.
pub const MAX_WAVE: u8 = 59;

/// Base accumulator step: exactly one position per step in Q8.24.
const STEP_BASE: u32 = 1 << 24;

/// Step increase per wave variant (704 << 11) in Q8.24.
const STEP_PER_WAVE: u32 = 1_441_792;

/// Accumulator top bit; seeing it set after an addition is the sync
/// retrigger condition.
const SYNC_BIT: u32 = 0x8000_0000;

/// Q8.24 to float conversion factor (2^-24).
const Q24_TO_F: f64 = 1.0 / (1u32 << 24) as f64;

/// Canonical waveform value at position zero.
const MIN_VAL: f64 = -64.0;

/// Wave variant index selecting one member of the sync waveform family.
///
/// Out-of-range indices clamp to [`MAX_WAVE`]; the hardware never rejects a
/// knob position, and neither does this generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct WaveVariant(u8);

impl WaveVariant {
    /// Creates a variant from a raw index, clamping to [0, 59].
    pub fn new(index: u8) -> Self {
        Self(index.min(MAX_WAVE))
    }

    /// Creates a variant from the 10-bit hardware shape parameter (0..1023).
    ///
    /// The firmware widens the parameter into a Q7.24 wave number
    /// (`value << 20`) and keeps the integer part, which reduces to
    /// `value >> 4`, clamped to the last sync variant.
    pub fn from_shape(param: u16) -> Self {
        Self::new(((param & 0x3ff) >> 4) as u8)
    }

    /// Returns the variant index (0..=59).
    pub fn index(self) -> u8 {
        self.0
    }

    /// Accumulator step for this variant in Q8.24.
    fn step(self) -> u32 {
        STEP_BASE + u32::from(self.0) * STEP_PER_WAVE
    }
}

impl Default for WaveVariant {
    fn default() -> Self {
        Self(0)
    }
}

/// Stateful generator for one sync wavetable entry.
///
/// Values are queried per integer table position via [`get`](Self::get) and
/// linearly interpolated by the caller. The expected access pattern is
/// ascending positions as the caller's phase advances, with each position
/// and its successor queried alternately; a two-entry cache turns that
/// pattern into constant-time lookups.
///
/// One instance represents one oscillator voice. Every query may mutate the
/// cache or the accumulator, so instances must not be shared across voices.
#[derive(Debug, Clone)]
pub struct SyncAccumulator {
    /// Selected wave variant.
    wave: WaveVariant,
    /// Accumulator step in Q8.24, constant per variant selection.
    step: u32,
    /// Phase accumulator in Q8.24. Stays below 2^31 between queries.
    acc: u32,
    /// Most recently resolved table position.
    last_pos: u8,
    /// Position resolved before `last_pos`.
    prev_pos: u8,
    /// Output value at `last_pos`.
    last_val: f64,
    /// Output value at `prev_pos`.
    prev_val: f64,
}

impl SyncAccumulator {
    /// Creates a generator for the given wave variant, starting at the
    /// canonical reset state (position 0, value -64).
    pub fn new(wave: WaveVariant) -> Self {
        Self {
            wave,
            step: wave.step(),
            acc: 0,
            last_pos: 0,
            prev_pos: 0,
            last_val: MIN_VAL,
            prev_val: MIN_VAL,
        }
    }

    /// Selects a new wave variant and resets the accumulator state.
    pub fn set_wave(&mut self, wave: WaveVariant) {
        self.wave = wave;
        self.step = wave.step();
        self.reset();
    }

    /// Returns the selected wave variant.
    pub fn wave(&self) -> WaveVariant {
        self.wave
    }

    /// Returns the generator to the canonical start of the table cycle.
    pub fn reset(&mut self) {
        self.acc = 0;
        self.last_pos = 0;
        self.prev_pos = 0;
        self.last_val = MIN_VAL;
        self.prev_val = MIN_VAL;
    }

    /// Returns the waveform value at a table position.
    ///
    /// Positions are interpreted modulo 128 with floor semantics, so
    /// position -1 is position 127. The returned value is always in
    /// [-64, 64).
    ///
    /// Querying either of the two most recently resolved positions returns
    /// the cached value without touching the accumulator. Any other
    /// position behind the current one means the table cycle has wrapped;
    /// the walk re-seeds from position zero before stepping forward.
    pub fn get(&mut self, pos: i32) -> f64 {
        let pos = pos.rem_euclid(TABLE_LEN) as u8;
        if pos == self.last_pos {
            return self.last_val;
        }
        if pos == self.prev_pos {
            return self.prev_val;
        }
        self.prev_pos = self.last_pos;
        self.prev_val = self.last_val;
        if pos < self.last_pos {
            // Cycle wrap: the accumulator walk is only valid forward.
            self.acc = 0;
            self.last_pos = 0;
            self.last_val = MIN_VAL;
        }
        while self.last_pos < pos {
            self.acc = self.acc.wrapping_add(self.step);
            if self.acc & SYNC_BIT != 0 {
                // Sync retrigger: restart the ramp, discarding the overflow.
                self.acc = 0;
            }
            self.last_pos += 1;
        }
        self.last_val = f64::from(self.acc) * Q24_TO_F + MIN_VAL;
        self.last_val
    }
}

impl Default for SyncAccumulator {
    fn default() -> Self {
        Self::new(WaveVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Sweeps one full table cycle in ascending order on a fresh generator.
    fn sweep(wave: u8) -> Vec<f64> {
        let mut gen = SyncAccumulator::new(WaveVariant::new(wave));
        (0..TABLE_LEN).map(|pos| gen.get(pos)).collect()
    }

    /// Counts downward jumps in an ascending sweep. Each sync retrigger
    /// drops the ramp back toward -64, so this counts retriggers.
    fn retrigger_count(wave: u8) -> usize {
        let values = sweep(wave);
        values.windows(2).filter(|w| w[1] < w[0]).count()
    }

    #[test]
    fn test_variant_zero_is_exact_ramp() {
        let mut gen = SyncAccumulator::new(WaveVariant::new(0));
        assert_eq!(gen.get(0), -64.0);
        assert_eq!(gen.get(64), 0.0);
        assert_eq!(gen.get(127), 63.0);
        // Wrapping back to position 0 reproduces the canonical start.
        assert_eq!(gen.get(0), -64.0);
    }

    #[test]
    fn test_output_range_all_variants() {
        for wave in 0..=MAX_WAVE {
            for value in sweep(wave) {
                assert!(
                    (-64.0..64.0).contains(&value),
                    "wave {wave} produced out-of-range value {value}"
                );
            }
        }
    }

    #[test]
    fn test_repeated_query_hits_cache() {
        let mut gen = SyncAccumulator::new(WaveVariant::new(17));
        let first = gen.get(40);
        let state = gen.clone();
        let second = gen.get(40);
        assert_eq!(first.to_bits(), second.to_bits());
        // No stepping work on the cached path.
        assert_eq!(gen.acc, state.acc);
        assert_eq!(gen.last_pos, state.last_pos);
        assert_eq!(gen.prev_pos, state.prev_pos);
    }

    #[test]
    fn test_predecessor_query_does_not_reset() {
        // The interpolating caller queries pos and pos + 1 alternately;
        // going back one position must hit the cache, not re-seed the walk.
        let mut gen = SyncAccumulator::new(WaveVariant::new(31));
        let y1 = gen.get(40);
        let _y2 = gen.get(41);
        assert_eq!(gen.get(40).to_bits(), y1.to_bits());
        assert_eq!(gen.last_pos, 41);
    }

    #[test]
    fn test_wrap_reproduces_fresh_start() {
        for wave in [0, 7, 59] {
            let mut gen = SyncAccumulator::new(WaveVariant::new(wave));
            for pos in 0..TABLE_LEN {
                gen.get(pos);
            }
            let wrapped = gen.get(TABLE_LEN);
            let fresh = SyncAccumulator::new(WaveVariant::new(wave)).get(0);
            assert_eq!(wrapped.to_bits(), fresh.to_bits());
        }
    }

    #[test]
    fn test_floor_modulo_wraps_negative_positions() {
        for wave in [0, 23, 59] {
            let mut a = SyncAccumulator::new(WaveVariant::new(wave));
            let mut b = SyncAccumulator::new(WaveVariant::new(wave));
            assert_eq!(a.get(-1).to_bits(), b.get(127).to_bits());
        }
    }

    #[test]
    fn test_backward_jump_reseeds_from_zero() {
        let mut gen = SyncAccumulator::new(WaveVariant::new(42));
        gen.get(100);
        gen.get(101);
        let jumped = gen.get(3);
        let fresh = SyncAccumulator::new(WaveVariant::new(42)).get(3);
        assert_eq!(jumped.to_bits(), fresh.to_bits());
    }

    #[test]
    fn test_accumulator_top_bit_never_persists() {
        let mut gen = SyncAccumulator::new(WaveVariant::new(MAX_WAVE));
        for pos in 0..TABLE_LEN {
            gen.get(pos);
            assert!(gen.acc < 0x8000_0000);
        }
    }

    #[test]
    fn test_retrigger_density_grows_with_variant() {
        let low = retrigger_count(0);
        let mid = retrigger_count(10);
        let high = retrigger_count(MAX_WAVE);
        assert_eq!(low, 0);
        assert!(mid > low);
        assert!(high > mid);
    }

    #[test]
    fn test_sweep_determinism() {
        for wave in [0, 29, 59] {
            assert_eq!(sweep(wave), sweep(wave));
        }
    }

    #[test]
    fn test_set_wave_resets_state() {
        let mut gen = SyncAccumulator::new(WaveVariant::new(5));
        gen.get(77);
        gen.set_wave(WaveVariant::new(5));
        assert_eq!(gen.get(0), -64.0);
        assert_eq!(gen.get(77), {
            let mut fresh = SyncAccumulator::new(WaveVariant::new(5));
            fresh.get(77)
        });
    }

    #[test]
    fn test_variant_clamping() {
        assert_eq!(WaveVariant::new(200).index(), MAX_WAVE);
        assert_eq!(WaveVariant::new(59).index(), 59);
        assert_eq!(WaveVariant::new(0).index(), 0);
    }

    #[test]
    fn test_shape_parameter_mapping() {
        assert_eq!(WaveVariant::from_shape(0).index(), 0);
        assert_eq!(WaveVariant::from_shape(15).index(), 0);
        assert_eq!(WaveVariant::from_shape(16).index(), 1);
        assert_eq!(WaveVariant::from_shape(160).index(), 10);
        assert_eq!(WaveVariant::from_shape(1023).index(), MAX_WAVE);
        // Only the low 10 bits of the parameter are significant.
        assert_eq!(WaveVariant::from_shape(0x400 | 160).index(), 10);
    }
}
