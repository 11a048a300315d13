//! Sparse single-variable polynomials with integer coefficients.
//!
//! ```
//! use RustedPoly::polynomial::{Polynomial, TermPool};
//! let pool = TermPool::new();
//! let mut p = Polynomial::new(&pool);
//! p.new_term(2, 1);
//! p.new_term(3, 2);
//! p.new_term(-2, 1); // cancels, the cell goes back to the pool
//! assert_eq!(p.to_string(), "3x^2");
//! assert_eq!(pool.stats().free_cells, 1);
//! ```
/// `coefficient * x^exponent`
pub mod term;
/// arena of term nodes with a free stack of recycled cells
pub mod term_pool;
/// descending-exponent chains threaded through the arena
pub mod term_chain;
/// the `Polynomial` type: insertion, arithmetic, evaluation
pub mod sparse_poly;
mod poly_tests;

pub use sparse_poly::{ArithmeticOp, Polynomial};
pub use term::Term;
pub use term_chain::Terms;
pub use term_pool::{PoolStats, TermPool};
