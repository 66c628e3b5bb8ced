//! Randomness primitives.
//!
//! Every routine in this crate draws its randomness from a [`BitSource`]
//! handed in by the caller. Nothing reaches for a process-wide generator,
//! so a seeded source makes any run reproducible and separate sources
//! never interfere with each other.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A stream of independent unbiased random bits.
pub trait BitSource {
    /// Draw one fair coin.
    fn next_bit(&mut self) -> bool;

    /// Draw a real number uniformly from `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Draw a real number uniformly from `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }

    /// Returns `true` with probability `p`.
    ///
    /// `p <= 0` and `p >= 1` short-circuit without consuming a draw.
    fn bernoulli(&mut self, p: f64) -> bool {
        if p <= 0.0 {
            false
        } else if p >= 1.0 {
            true
        } else {
            self.next_unit() < p
        }
    }
}

impl<S: BitSource + ?Sized> BitSource for &mut S {
    fn next_bit(&mut self) -> bool {
        (**self).next_bit()
    }

    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// Adapts any `rand` generator into a [`BitSource`].
#[derive(Debug, Clone)]
pub struct RngBitSource<R: RngCore> {
    rng: R,
}

impl<R: RngCore> RngBitSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl<R: RngCore> BitSource for RngBitSource<R> {
    fn next_bit(&mut self) -> bool {
        self.rng.gen()
    }

    fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Deterministic source seeded from a `u64`. Identical seeds yield
/// identical streams.
pub type SeededBitSource = RngBitSource<StdRng>;

impl SeededBitSource {
    pub fn seeded(seed: u64) -> Self {
        RngBitSource::new(StdRng::seed_from_u64(seed))
    }

    /// A fresh source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        RngBitSource::new(StdRng::from_entropy())
    }
}

/// Replays a fixed script of draws, cycling when it runs out.
///
/// Bits and units are scripted independently. An empty bit script yields
/// `false` forever. Without a unit script, unit draws follow the bit
/// script: `true` becomes `0.25` and `false` becomes `0.75`. A measurement
/// reports outcome `1` when the unit falls below its probability, so
/// forcing every bit to `1` also pushes biased measurements towards `1`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedBitSource {
    bits: Vec<bool>,
    units: Vec<f64>,
    bit_cursor: usize,
    unit_cursor: usize,
}

impl ScriptedBitSource {
    pub fn new(bits: Vec<bool>) -> Self {
        Self {
            bits,
            ..Self::default()
        }
    }

    /// Every draw returns `bit`.
    pub fn constant(bit: bool) -> Self {
        Self::new(vec![bit])
    }

    /// Parse a script such as `"1101"`. Characters other than `0`/`1` are
    /// skipped.
    pub fn from_bit_str(script: &str) -> Self {
        Self::new(
            script
                .chars()
                .filter_map(|c| match c {
                    '0' => Some(false),
                    '1' => Some(true),
                    _ => None,
                })
                .collect(),
        )
    }

    pub fn with_units(mut self, units: Vec<f64>) -> Self {
        self.units = units;
        self
    }

    /// Total number of bit draws served so far.
    pub fn bits_drawn(&self) -> usize {
        self.bit_cursor
    }

    /// Total number of unit draws served so far.
    pub fn units_drawn(&self) -> usize {
        self.unit_cursor
    }
}

impl BitSource for ScriptedBitSource {
    fn next_bit(&mut self) -> bool {
        if self.bits.is_empty() {
            self.bit_cursor += 1;
            return false;
        }
        let bit = self.bits[self.bit_cursor % self.bits.len()];
        self.bit_cursor += 1;
        bit
    }

    fn next_unit(&mut self) -> f64 {
        let unit = if !self.units.is_empty() {
            self.units[self.unit_cursor % self.units.len()]
        } else if !self.bits.is_empty() {
            if self.bits[self.unit_cursor % self.bits.len()] {
                0.25
            } else {
                0.75
            }
        } else {
            0.75
        };
        self.unit_cursor += 1;
        unit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sources_are_reproducible() {
        let mut a = SeededBitSource::seeded(42);
        let mut b = SeededBitSource::seeded(42);
        let left: Vec<bool> = (0..256).map(|_| a.next_bit()).collect();
        let right: Vec<bool> = (0..256).map(|_| b.next_bit()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn different_seeds_diverge() {
        let mut a = SeededBitSource::seeded(1);
        let mut b = SeededBitSource::seeded(2);
        let left: Vec<bool> = (0..256).map(|_| a.next_bit()).collect();
        let right: Vec<bool> = (0..256).map(|_| b.next_bit()).collect();
        assert_ne!(left, right);
    }

    #[test]
    fn wrapped_generator_resumes_where_the_source_stopped() {
        let mut source = SeededBitSource::seeded(5);
        let _ = source.next_bit();
        let mut rng = source.into_inner();

        let mut reference = SeededBitSource::seeded(5);
        let _ = reference.next_bit();
        assert_eq!(rng.gen::<u64>(), reference.into_inner().gen::<u64>());
    }

    #[test]
    fn units_stay_in_half_open_interval() {
        let mut source = SeededBitSource::seeded(7);
        for _ in 0..10_000 {
            let u = source.next_unit();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn uniform_respects_bounds() {
        let mut source = SeededBitSource::seeded(9);
        for _ in 0..1_000 {
            let v = source.uniform(0.0, 20.0);
            assert!((0.0..20.0).contains(&v));
        }
    }

    #[test]
    fn bernoulli_extremes_consume_nothing() {
        let mut source = ScriptedBitSource::constant(true);
        assert!(!source.bernoulli(0.0));
        assert!(source.bernoulli(1.0));
        assert_eq!(source.units_drawn(), 0);
    }

    #[test]
    fn scripted_source_cycles() {
        let mut source = ScriptedBitSource::from_bit_str("10");
        let drawn: Vec<bool> = (0..5).map(|_| source.next_bit()).collect();
        assert_eq!(drawn, vec![true, false, true, false, true]);
        assert_eq!(source.bits_drawn(), 5);
    }

    #[test]
    fn empty_script_is_all_zero() {
        let mut source = ScriptedBitSource::default();
        assert!(!source.next_bit());
        assert!(source.next_unit() > 0.5);
    }

    #[test]
    fn fair_coin_is_roughly_balanced() {
        let mut source = SeededBitSource::seeded(2024);
        let samples = 40_000;
        let ones = (0..samples).filter(|_| source.next_bit()).count();
        let ratio = ones as f64 / samples as f64;
        assert!((ratio - 0.5).abs() < 0.02, "ratio was {}", ratio);
    }
}
