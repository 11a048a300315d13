//! # Sparse univariate polynomial
//!
//! `Polynomial` owns one ordered term chain inside a shared [`TermPool`].
//! The only mutator is [`Polynomial::new_term`]; addition, subtraction and
//! multiplication read their operands and always build a new polynomial in the
//! left operand's pool. Dropping a polynomial hands all of its cells back to the
//! pool, so repeated arithmetic mostly runs on recycled storage.
//!
//! # Example
//! ```
//! use RustedPoly::polynomial::{Polynomial, TermPool};
//! let pool = TermPool::new();
//! let p1 = Polynomial::from_terms(&pool, [(3, 2), (2, 1)]);
//! let p2 = Polynomial::from_terms(&pool, [(1, 1), (5, 0)]);
//! assert_eq!((&p1 * &p2).to_string(), "3x^3 + 17x^2 + 10x^1");
//! assert_eq!(p1.eval_f64(2.0), 16.0);
//! ```
use crate::polynomial::term::Term;
use crate::polynomial::term_chain::{ChainCursor, InsertOutcome, Terms};
use crate::polynomial::term_pool::{NodeId, TermArena, TermPool};
use itertools::Itertools;
use log::{debug, trace};
use num_traits::Float;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// The binary operations defined on polynomials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ArithmeticOp {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
}

impl ArithmeticOp {
    pub fn apply(&self, lhs: &Polynomial, rhs: &Polynomial) -> Polynomial {
        match self {
            ArithmeticOp::Add => lhs.add(rhs),
            ArithmeticOp::Subtract => lhs.subtract(rhs),
            ArithmeticOp::Multiply => lhs.multiply(rhs),
        }
    }
}

pub struct Polynomial {
    pool: TermPool,
    header: NodeId,
}

impl Polynomial {
    /// Empty polynomial whose terms will live in `pool`.
    pub fn new(pool: &TermPool) -> Self {
        let header = pool.arena_mut().new_chain();
        Polynomial {
            pool: pool.clone(),
            header,
        }
    }

    /// Builds a polynomial by calling [`Polynomial::new_term`] for every pair
    /// in input order.
    pub fn from_terms<I, T>(pool: &TermPool, terms: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Term>,
    {
        let mut poly = Polynomial::new(pool);
        for term in terms {
            let term = term.into();
            poly.new_term(term.coefficient, term.exponent);
        }
        poly
    }

    pub fn pool(&self) -> &TermPool {
        &self.pool
    }

    /// Adds `coefficient * x^exponent`.
    ///
    /// A zero coefficient is ignored. If a term with the same exponent exists
    /// the coefficients are summed and the term disappears when the sum is
    /// zero; otherwise the new term is placed so that exponents stay strictly
    /// descending.
    ///
    /// Coefficients are plain `i64`: a sum that overflows panics in debug
    /// builds and wraps in release builds.
    pub fn new_term(&mut self, coefficient: i64, exponent: i32) {
        let outcome = self
            .pool
            .arena_mut()
            .insert_term(self.header, coefficient, exponent);
        if outcome == InsertOutcome::Cancelled {
            trace!("term x^{} cancelled to zero", exponent);
        }
    }

    /// Terms in descending exponent order. Every call starts from the first
    /// term.
    pub fn terms(&self) -> Terms<'_> {
        Terms::new(&self.pool, self.header)
    }

    pub fn is_empty(&self) -> bool {
        self.pool.arena().chain_is_empty(self.header)
    }

    /// number of stored (non-zero) terms
    pub fn len(&self) -> usize {
        self.pool.arena().chain_len(self.header)
    }

    /// Exponent of the leading term, `None` for the empty polynomial.
    pub fn degree(&self) -> Option<i32> {
        self.terms().next().map(|t| t.exponent)
    }

    /// Returns every term to the pool. The polynomial stays usable.
    pub fn clear(&mut self) {
        let released = self.pool.arena_mut().release_terms(self.header);
        trace!("cleared polynomial, {} cells back in the pool", released);
    }

    /// Sum of both operands by a single merge of their chains.
    ///
    /// Coefficient overflow panics in debug builds and wraps in release builds.
    pub fn add(&self, rhs: &Polynomial) -> Polynomial {
        self.merge(rhs, ArithmeticOp::Add)
    }

    /// `self - rhs`. Negating `i64::MIN` or an overflowing difference panics
    /// in debug builds and wraps in release builds.
    pub fn subtract(&self, rhs: &Polynomial) -> Polynomial {
        self.merge(rhs, ArithmeticOp::Subtract)
    }

    /// Full cross product; terms landing on the same exponent are combined by
    /// the insertion itself.
    ///
    /// Coefficient products and exponent sums use plain `i64`/`i32`
    /// arithmetic: overflow panics in debug builds and wraps in release builds.
    pub fn multiply(&self, rhs: &Polynomial) -> Polynomial {
        let header = self.with_local_operand(rhs, |arena, rhs_header| {
            let result = arena.new_chain();
            let mut a = arena.first(self.header);
            while a != self.header {
                let ta = arena.term(a);
                let mut b = arena.first(rhs_header);
                while b != rhs_header {
                    let tb = arena.term(b);
                    arena.insert_term(
                        result,
                        ta.coefficient * tb.coefficient,
                        ta.exponent + tb.exponent,
                    );
                    b = arena.link(b);
                }
                a = arena.link(a);
            }
            result
        });
        let product = self.adopt(header);
        debug!(
            "polynomial product: {} x {} terms -> {} terms",
            self.len(),
            rhs.len(),
            product.len()
        );
        product
    }

    /// Value of the polynomial at `x`. `x^0` is 1 for every `x`, zero
    /// included.
    pub fn eval<F: Float>(&self, x: F) -> F {
        self.terms().fold(F::zero(), |acc, term| {
            let coefficient = F::from(term.coefficient).unwrap_or_else(F::nan);
            acc + coefficient * x.powi(term.exponent)
        })
    }

    pub fn eval_f64(&self, x: f64) -> f64 {
        self.eval(x)
    }

    /// Linear merge of two ordered chains. Under subtraction the right
    /// operand's coefficients enter with flipped sign.
    fn merge(&self, rhs: &Polynomial, op: ArithmeticOp) -> Polynomial {
        let sign: i64 = if op == ArithmeticOp::Subtract { -1 } else { 1 };
        let header = self.with_local_operand(rhs, |arena, rhs_header| {
            let result = arena.new_chain();
            let mut a = arena.first(self.header);
            let mut b = arena.first(rhs_header);
            while a != self.header && b != rhs_header {
                let ta = arena.term(a);
                let tb = arena.term(b);
                if ta.exponent == tb.exponent {
                    arena.insert_term(result, ta.coefficient + sign * tb.coefficient, ta.exponent);
                    a = arena.link(a);
                    b = arena.link(b);
                } else if ta.exponent > tb.exponent {
                    arena.insert_term(result, ta.coefficient, ta.exponent);
                    a = arena.link(a);
                } else {
                    arena.insert_term(result, sign * tb.coefficient, tb.exponent);
                    b = arena.link(b);
                }
            }
            while a != self.header {
                let ta = arena.term(a);
                arena.insert_term(result, ta.coefficient, ta.exponent);
                a = arena.link(a);
            }
            while b != rhs_header {
                let tb = arena.term(b);
                arena.insert_term(result, sign * tb.coefficient, tb.exponent);
                b = arena.link(b);
            }
            result
        });
        let merged = self.adopt(header);
        debug!(
            "polynomial merge ({}): {} and {} terms -> {} terms",
            op,
            self.len(),
            rhs.len(),
            merged.len()
        );
        merged
    }

    /// Runs `f` with this polynomial's arena borrowed mutably and the header
    /// of `rhs` as seen from that arena. A right operand from another pool is
    /// copied in first and released afterwards.
    fn with_local_operand<R>(
        &self,
        rhs: &Polynomial,
        f: impl FnOnce(&mut TermArena, NodeId) -> R,
    ) -> R {
        if self.pool.same_pool(&rhs.pool) {
            let mut arena = self.pool.arena_mut();
            return f(&mut *arena, rhs.header);
        }
        debug!("operand from a foreign pool, copying {} terms", rhs.len());
        let imported = rhs.copy_into(&self.pool);
        let result = {
            let mut arena = self.pool.arena_mut();
            f(&mut *arena, imported.header)
        };
        drop(imported);
        result
    }

    /// Deep copy of this polynomial with its terms stored in `pool`.
    pub fn copy_into(&self, pool: &TermPool) -> Polynomial {
        let header = if self.pool.same_pool(pool) {
            pool.arena_mut().copy_chain(self.header)
        } else {
            let source = self.pool.arena();
            let mut target = pool.arena_mut();
            target.chain_from_ordered(ChainCursor::new(&*source, self.header))
        };
        Polynomial {
            pool: pool.clone(),
            header,
        }
    }

    fn adopt(&self, header: NodeId) -> Polynomial {
        Polynomial {
            pool: self.pool.clone(),
            header,
        }
    }
}

impl Drop for Polynomial {
    fn drop(&mut self) {
        let released = self.pool.arena_mut().release_chain(self.header);
        trace!("polynomial dropped, {} term cells back in the pool", released);
    }
}

impl Clone for Polynomial {
    fn clone(&self) -> Self {
        self.copy_into(&self.pool)
    }
}

/// Term equality: same exponents with the same coefficients, pools ignored.
impl PartialEq for Polynomial {
    fn eq(&self, other: &Self) -> bool {
        self.terms().eq(other.terms())
    }
}

impl Eq for Polynomial {}

impl fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polynomial")
            .field("terms", &self.terms().collect::<Vec<_>>())
            .finish()
    }
}

/// `3x^2 + 2x^1`; the empty polynomial is printed as `0`.
impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "0");
        }
        write!(f, "{}", self.terms().join(" + "))
    }
}

impl<'a> IntoIterator for &'a Polynomial {
    type Item = Term;
    type IntoIter = Terms<'a>;

    fn into_iter(self) -> Terms<'a> {
        self.terms()
    }
}

impl std::ops::Add for &Polynomial {
    type Output = Polynomial;

    fn add(self, rhs: &Polynomial) -> Polynomial {
        Polynomial::add(self, rhs)
    }
}

impl std::ops::Sub for &Polynomial {
    type Output = Polynomial;

    fn sub(self, rhs: &Polynomial) -> Polynomial {
        self.subtract(rhs)
    }
}

impl std::ops::Mul for &Polynomial {
    type Output = Polynomial;

    fn mul(self, rhs: &Polynomial) -> Polynomial {
        self.multiply(rhs)
    }
}
