//! Exact rational accumulation for rarity scores.
//!
//! Scores are sums of terms of the form `8000 / count`. Summing those in
//! floating point would make the final truncation sensitive to summation
//! order and platform rounding, so the accumulator keeps an exact `u128`
//! numerator/denominator pair instead. At most five terms contribute to one
//! slot score and every count is bounded by the collection size, which keeps
//! the reduced denominator far below `u128::MAX`.

/// A non-negative exact fraction accumulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fraction {
    num: u128,
    den: u128,
}

impl Fraction {
    /// The zero fraction.
    pub fn zero() -> Self {
        Fraction { num: 0, den: 1 }
    }

    /// Add `num / den` to the accumulator. `den` must be non-zero; callers
    /// guard zero counts before reaching arithmetic.
    pub fn add(&mut self, num: u64, den: u64) {
        debug_assert!(den != 0, "fraction denominator must be non-zero");
        let num = u128::from(num);
        let den = u128::from(den);
        self.num = self.num * den + num * self.den;
        self.den *= den;
        self.reduce();
    }

    /// `floor(self * scale)`.
    pub fn floor_scaled(&self, scale: u64) -> u64 {
        (self.num * u128::from(scale) / self.den) as u64
    }

    fn reduce(&mut self) {
        let g = gcd(self.num, self.den);
        if g > 1 {
            self.num /= g;
            self.den /= g;
        }
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::zero()
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
