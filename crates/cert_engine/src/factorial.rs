//! Exact integer factorials for series terms, memoized per evaluator.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

/// Factorial table grown on demand. factorial(0) = factorial(1) = 1,
/// factorial(n) = n * factorial(n - 1).
#[derive(Debug, Clone)]
pub struct Factorials {
    table: Vec<BigInt>,
}

impl Factorials {
    pub fn new() -> Self {
        Factorials {
            table: vec![BigInt::one(), BigInt::one()],
        }
    }

    pub fn get(&mut self, n: usize) -> BigInt {
        while self.table.len() <= n {
            let next = self.table.last().expect("table starts non-empty")
                * BigInt::from(self.table.len());
            self.table.push(next);
        }
        self.table[n].clone()
    }

    pub fn get_ratio(&mut self, n: usize) -> BigRational {
        BigRational::from_integer(self.get(n))
    }
}

impl Default for Factorials {
    fn default() -> Self {
        Self::new()
    }
}
