//! Observed coin flips.
//!
//! An [`Observations`] value can only be built from data in which every
//! entry is a head (1) or a tail (0); anything else is rejected with
//! [`Error::InvalidObservation`] before any posterior work starts. The
//! original order is kept even though the binomial likelihood only uses the
//! counts.

use crate::error::{Error, Result};

/// Flips used when no data is supplied: 8 heads, 2 tails.
pub const DEFAULT_FLIPS: [u8; 10] = [1, 1, 1, 0, 1, 1, 0, 1, 1, 1];

/// Outcome of a single flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flip {
    Tails,
    Heads,
}

impl Flip {
    /// Numeric encoding (1 = heads, 0 = tails).
    pub fn as_bit(self) -> u8 {
        match self {
            Flip::Tails => 0,
            Flip::Heads => 1,
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" | "h" | "H" => Some(Flip::Heads),
            "0" | "t" | "T" => Some(Flip::Tails),
            _ => None,
        }
    }
}

/// Immutable, validated sequence of flips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observations {
    flips: Vec<Flip>,
    heads: usize,
}

impl Observations {
    /// Validate raw numeric values; every entry must be 0 or 1.
    pub fn from_values(values: &[i64]) -> Result<Self> {
        let flips = values
            .iter()
            .enumerate()
            .map(|(index, &value)| match value {
                0 => Ok(Flip::Tails),
                1 => Ok(Flip::Heads),
                other => Err(Error::invalid_observation(index, other)),
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_flips(flips))
    }

    /// Build from already-typed flips (cannot fail).
    pub fn from_flips(flips: Vec<Flip>) -> Self {
        let heads = flips.iter().filter(|f| **f == Flip::Heads).count();
        Self { flips, heads }
    }

    /// Parse flips from text.
    ///
    /// Accepts tokens separated by commas and/or whitespace (`1,0,1`,
    /// `1 0 1`), or compact runs (`101`, `HTH`). `H`/`T` are accepted in
    /// either case. Text after `#` on a line is ignored so flip files can be
    /// commented.
    pub fn parse(input: &str) -> Result<Self> {
        let mut flips = Vec::new();
        for line in input.lines() {
            let content = line.split('#').next().unwrap_or_default();
            for token in content
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|t| !t.is_empty())
            {
                if let Some(flip) = Flip::from_token(token) {
                    flips.push(flip);
                    continue;
                }
                // Compact run: every character must itself be a flip.
                for ch in token.chars() {
                    let mut buf = [0u8; 4];
                    match Flip::from_token(ch.encode_utf8(&mut buf)) {
                        Some(flip) => flips.push(flip),
                        None => return Err(Error::invalid_observation(flips.len(), token)),
                    }
                }
            }
        }
        Ok(Self::from_flips(flips))
    }

    /// Number of flips.
    pub fn len(&self) -> usize {
        self.flips.len()
    }

    /// True when no flips were observed.
    pub fn is_empty(&self) -> bool {
        self.flips.is_empty()
    }

    /// Count of heads (1s).
    pub fn heads(&self) -> usize {
        self.heads
    }

    /// Count of tails (0s).
    pub fn tails(&self) -> usize {
        self.flips.len() - self.heads
    }

    /// Flips in their original order.
    pub fn flips(&self) -> &[Flip] {
        &self.flips
    }

    /// Flips as 0/1 values, in order.
    pub fn to_bits(&self) -> Vec<u8> {
        self.flips.iter().map(|f| f.as_bit()).collect()
    }
}

impl Default for Observations {
    fn default() -> Self {
        Self::from_flips(
            DEFAULT_FLIPS
                .iter()
                .map(|&bit| if bit == 1 { Flip::Heads } else { Flip::Tails })
                .collect(),
        )
    }
}
