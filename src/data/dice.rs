use std::fmt;

use bracket_random::prelude::RandomNumberGenerator;
use smallvec::SmallVec;
use thiserror::Error;

/// Source of uniform integers. `range` is half-open: `[min, max)`.
pub trait Roller {
    fn range(&mut self, min: i32, max: i32) -> i32;

    /// One roll of a `sides`-sided die, `1..=sides`.
    fn die(&mut self, sides: i32) -> i32 {
        self.range(1, sides + 1)
    }
}

impl Roller for RandomNumberGenerator {
    fn range(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        RandomNumberGenerator::range(self, min, max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiceError {
    #[error("empty damage notation")]
    Empty,
    #[error("malformed dice component `{0}`, expected NdM")]
    Malformed(String),
}

/// A single `NdM` component: `count` dice of `sides` sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dice {
    pub count: u32,
    pub sides: u32,
}

impl Dice {
    pub const fn new(count: u32, sides: u32) -> Self {
        Self { count, sides }
    }

    pub fn parse(text: &str) -> Result<Self, DiceError> {
        let malformed = || DiceError::Malformed(text.to_string());
        let (count, sides) = text.split_once('d').ok_or_else(malformed)?;
        if !is_digits(count) || !is_digits(sides) {
            return Err(malformed());
        }
        let count = count.parse().map_err(|_| malformed())?;
        let sides = sides.parse().map_err(|_| malformed())?;
        Ok(Self { count, sides })
    }

    /// `0d0` and friends deal no rollable damage.
    pub fn is_inert(&self) -> bool {
        self.count == 0 || self.sides == 0
    }

    pub fn roll<R: Roller + ?Sized>(&self, rng: &mut R) -> i32 {
        if self.is_inert() {
            return 0;
        }
        (0..self.count).map(|_| rng.die(self.sides as i32)).sum()
    }

    pub fn min_total(&self) -> i32 {
        if self.is_inert() { 0 } else { self.count as i32 }
    }

    pub fn max_total(&self) -> i32 {
        if self.is_inert() {
            0
        } else {
            i32::try_from(self.count.saturating_mul(self.sides)).unwrap_or(i32::MAX)
        }
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}

/// One or more `/`-separated attacks made in a single exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DamageNotation {
    components: SmallVec<[Dice; 4]>,
}

impl DamageNotation {
    pub fn parse(text: &str) -> Result<Self, DiceError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(DiceError::Empty);
        }
        let components = text
            .split('/')
            .map(Dice::parse)
            .collect::<Result<SmallVec<[Dice; 4]>, DiceError>>()?;
        Ok(Self { components })
    }

    pub fn single(dice: Dice) -> Self {
        let mut components = SmallVec::new();
        components.push(dice);
        Self { components }
    }

    pub fn components(&self) -> &[Dice] {
        &self.components
    }

    pub fn attacks(&self) -> usize {
        self.components.len()
    }

    pub fn roll_each<R: Roller + ?Sized>(&self, rng: &mut R) -> SmallVec<[i32; 4]> {
        self.components.iter().map(|dice| dice.roll(rng)).collect()
    }
}

impl fmt::Display for DamageNotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, dice) in self.components.iter().enumerate() {
            if idx > 0 {
                f.write_str("/")?;
            }
            write!(f, "{dice}")?;
        }
        Ok(())
    }
}
