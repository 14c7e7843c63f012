//! Native balance amounts.
//!
//! Amounts are carried as whole lamports (u64) end-to-end; conversion to SOL
//! happens only at the rendering edge to avoid floating-point drift in any
//! arithmetic path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

/// Lamports per SOL (the ledger's display unit).
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A lamport amount — the smallest indivisible unit of the native balance.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Lamports(u64);

impl Lamports {
    pub const ZERO: Self = Self(0);

    /// Balances at or below this are not worth moving: 100 lamports
    /// (1e-7 SOL), which also absorbs display-unit rounding noise.
    pub const DUST_THRESHOLD: Self = Self(100);

    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Whether this balance is at or below the dust threshold.
    pub fn is_dust(&self) -> bool {
        self.0 <= Self::DUST_THRESHOLD.0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Value in SOL. Rendering only — never feed this back into arithmetic.
    pub fn sol(&self) -> f64 {
        self.0 as f64 / LAMPORTS_PER_SOL as f64
    }

    /// SOL value at the 2-decimal precision used in chat views.
    pub fn format_sol(&self) -> String {
        format!("{:.2}", self.sol())
    }
}

impl Add for Lamports {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Lamports {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl fmt::Display for Lamports {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} lamports", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dust_threshold_boundaries() {
        assert!(Lamports::ZERO.is_dust());
        assert!(Lamports::new(100).is_dust());
        assert!(!Lamports::new(101).is_dust());
    }

    #[test]
    fn format_sol_two_decimals() {
        assert_eq!(Lamports::ZERO.format_sol(), "0.00");
        assert_eq!(Lamports::new(LAMPORTS_PER_SOL).format_sol(), "1.00");
        assert_eq!(Lamports::new(2_500_000_000).format_sol(), "2.50");
    }

    #[test]
    fn checked_sub_underflow() {
        let a = Lamports::new(5000);
        let b = Lamports::new(6000);
        assert_eq!(a.checked_sub(b), None);
        assert_eq!(a.saturating_sub(b), Lamports::ZERO);
    }
}
