use std::fmt;

/// A single `coefficient * x^exponent` term of a sparse polynomial.
///
/// Terms with a zero coefficient are never stored inside a polynomial.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Term {
    pub coefficient: i64,
    pub exponent: i32,
}

impl Term {
    pub fn new(coefficient: i64, exponent: i32) -> Self {
        Term {
            coefficient,
            exponent,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.coefficient == 0
    }

    /// same exponent, opposite coefficient
    pub fn negated(&self) -> Self {
        Term::new(-self.coefficient, self.exponent)
    }
}

impl From<(i64, i32)> for Term {
    fn from((coefficient, exponent): (i64, i32)) -> Self {
        Term::new(coefficient, exponent)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x^{}", self.coefficient, self.exponent)
    }
}
