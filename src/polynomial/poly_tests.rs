//___________________________________TESTS____________________________________

#[cfg(test)]
mod tests {
    use crate::polynomial::{ArithmeticOp, Polynomial, Term, TermPool};
    use approx::assert_relative_eq;
    use strum::IntoEnumIterator;

    fn poly(pool: &TermPool, terms: &[(i64, i32)]) -> Polynomial {
        Polynomial::from_terms(pool, terms.iter().copied())
    }

    fn pairs(p: &Polynomial) -> Vec<(i64, i32)> {
        p.terms().map(|t| (t.coefficient, t.exponent)).collect()
    }

    fn assert_well_formed(p: &Polynomial) {
        let terms: Vec<Term> = p.terms().collect();
        for t in &terms {
            assert_ne!(t.coefficient, 0, "zero coefficient stored in {:?}", p);
        }
        for w in terms.windows(2) {
            assert!(
                w[0].exponent > w[1].exponent,
                "exponents not strictly descending in {:?}",
                p
            );
        }
    }

    #[test]
    fn test_scenario_arithmetic() {
        let pool = TermPool::new();
        let p1 = poly(&pool, &[(3, 2), (2, 1)]);
        let p2 = poly(&pool, &[(1, 1), (5, 0)]);

        assert_eq!(pairs(&(&p1 + &p2)), vec![(3, 2), (3, 1), (5, 0)]);
        assert_eq!(pairs(&(&p1 - &p2)), vec![(3, 2), (1, 1), (-5, 0)]);
        assert_eq!(pairs(&(&p1 * &p2)), vec![(3, 3), (17, 2), (10, 1)]);
        assert_relative_eq!(p1.eval(2.0), 16.0, epsilon = 1e-12);
        assert_relative_eq!(p2.eval(2.0), 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_scenario_rendering() {
        let pool = TermPool::new();
        let p1 = poly(&pool, &[(3, 2), (2, 1)]);
        let p2 = poly(&pool, &[(1, 1), (5, 0)]);
        assert_eq!(p1.to_string(), "3x^2 + 2x^1");
        assert_eq!((&p1 - &p2).to_string(), "3x^2 + 1x^1 + -5x^0");
        assert_eq!((&p1 - &p1).to_string(), "0");
    }

    #[test]
    fn test_sort_invariant_after_unordered_insertion() {
        let pool = TermPool::new();
        let mut p = Polynomial::new(&pool);
        let input = [
            (4, 1),
            (0, 7),
            (-3, 5),
            (2, -1),
            (6, 5),
            (1, 0),
            (-4, 1),
            (9, 12),
            (-3, 5),
            (5, 3),
        ];
        for &(c, e) in &input {
            p.new_term(c, e);
            assert_well_formed(&p);
        }
        assert_eq!(pairs(&p), vec![(9, 12), (5, 3), (1, 0), (2, -1)]);
        assert_eq!(p.len(), 4);
        assert_eq!(p.degree(), Some(12));
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let pool = TermPool::new();
        let a = poly(&pool, &[(1, 0), (2, 1), (3, 2), (4, 3)]);
        let b = poly(&pool, &[(4, 3), (3, 2), (2, 1), (1, 0)]);
        let c = poly(&pool, &[(2, 1), (4, 3), (1, 0), (3, 2)]);
        assert_eq!(a, b);
        assert_eq!(b, c);
    }

    #[test]
    fn test_additive_identity() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 4), (-2, 2), (7, 0)]);
        let zero = Polynomial::new(&pool);
        assert_eq!(&p + &zero, p);
        assert_eq!(&zero + &p, p);
        assert_eq!(&p - &zero, p);
        assert!((&p * &zero).is_empty());
    }

    #[test]
    fn test_commutativity() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 4), (-2, 2), (7, 0), (1, -3)]);
        let q = poly(&pool, &[(5, 3), (2, 2), (-7, 0)]);
        assert_eq!(&p + &q, &q + &p);
        assert_eq!(&p * &q, &q * &p);
    }

    #[test]
    fn test_self_subtraction_is_empty() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 4), (-2, 2), (7, 0)]);
        let diff = &p - &p;
        assert!(diff.is_empty());
        assert_eq!(diff.len(), 0);
        assert_eq!(diff.degree(), None);
    }

    #[test]
    fn test_subtraction_flips_right_operand() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(1, 1)]);
        let q = poly(&pool, &[(2, 3), (4, 2), (6, 0)]);
        assert_eq!(pairs(&(&p - &q)), vec![(-2, 3), (-4, 2), (1, 1), (-6, 0)]);
        assert_eq!(pairs(&(&q - &p)), vec![(2, 3), (4, 2), (-1, 1), (6, 0)]);
    }

    #[test]
    fn test_distributivity() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(2, 2), (-1, 0)]);
        let q = poly(&pool, &[(1, 3), (4, 1)]);
        let r = poly(&pool, &[(-1, 3), (3, 2), (5, 0)]);
        let lhs = &p * &(&q + &r);
        let rhs = &(&p * &q) + &(&p * &r);
        assert_eq!(lhs, rhs);
        assert_well_formed(&lhs);
    }

    #[test]
    fn test_multiplication_cancels_terms() {
        let pool = TermPool::new();
        // (x + 1)(x - 1) = x^2 - 1
        let p = poly(&pool, &[(1, 1), (1, 0)]);
        let q = poly(&pool, &[(1, 1), (-1, 0)]);
        assert_eq!(pairs(&(&p * &q)), vec![(1, 2), (-1, 0)]);
    }

    #[test]
    fn test_operands_are_not_mutated() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 2), (2, 1)]);
        let q = poly(&pool, &[(-3, 2), (5, 0)]);
        for op in ArithmeticOp::iter() {
            let _ = op.apply(&p, &q);
        }
        assert_eq!(pairs(&p), vec![(3, 2), (2, 1)]);
        assert_eq!(pairs(&q), vec![(-3, 2), (5, 0)]);
    }

    #[test]
    fn test_operand_accepts_more_terms_after_use() {
        let pool = TermPool::new();
        let mut p = poly(&pool, &[(1, 1)]);
        let q = poly(&pool, &[(1, 0)]);
        let sum = &p + &q;
        p.new_term(2, 2);
        assert_eq!(pairs(&p), vec![(2, 2), (1, 1)]);
        assert_eq!(pairs(&sum), vec![(1, 1), (1, 0)]);
    }

    #[test]
    fn test_evaluation_linearity() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 4), (-2, 2), (7, 0), (1, -1)]);
        let q = poly(&pool, &[(5, 3), (2, 2), (-7, 0)]);
        let sum = &p + &q;
        for &x in &[-2.5, -1.0, 0.5, 1.0, 3.0] {
            assert_relative_eq!(sum.eval(x), p.eval(x) + q.eval(x), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_eval_zero_exponent_at_zero() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(4, 0), (3, 2)]);
        assert_relative_eq!(p.eval(0.0), 4.0);
        assert_relative_eq!(p.eval_f64(0.0), 4.0);
        assert_relative_eq!(p.eval(0.0f32), 4.0f32);
        assert_relative_eq!(Polynomial::new(&pool).eval(3.0), 0.0);
    }

    #[test]
    fn test_eval_negative_exponent() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(8, -3), (1, 1)]);
        assert_relative_eq!(p.eval(2.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_traversal_is_restartable() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(1, 2), (1, 1)]);
        let mut first = p.terms();
        assert_eq!(first.next(), Some(Term::new(1, 2)));
        drop(first);
        let again: Vec<Term> = (&p).into_iter().collect();
        assert_eq!(again, vec![Term::new(1, 2), Term::new(1, 1)]);
    }

    #[test]
    fn test_pool_reuse_after_drop() {
        let pool = TermPool::new();
        let k = 6;
        {
            let _p = poly(&pool, &[(1, 5), (2, 4), (3, 3), (4, 2), (5, 1), (6, 0)]);
            assert_eq!(pool.stats().live_cells, k + 1);
        }
        let after_drop = pool.stats();
        assert_eq!(after_drop.live_cells, 0);
        assert_eq!(after_drop.free_cells, k + 1);

        let q = poly(&pool, &[(7, 9), (8, 3), (9, 1), (1, 0)]);
        let stats = pool.stats();
        assert_eq!(stats.fresh_allocations, after_drop.fresh_allocations);
        assert_eq!(stats.recycled, after_drop.recycled + q.len() + 1);
    }

    #[test]
    fn test_repeated_arithmetic_stops_allocating() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 2), (2, 1)]);
        let q = poly(&pool, &[(1, 1), (5, 0)]);
        drop(&p * &q);
        let warmed_up = pool.stats().fresh_allocations;
        for _ in 0..10 {
            for op in ArithmeticOp::iter() {
                drop(op.apply(&p, &q));
            }
        }
        assert_eq!(pool.stats().fresh_allocations, warmed_up);
    }

    #[test]
    fn test_clear_returns_cells() {
        let pool = TermPool::new();
        let mut p = poly(&pool, &[(1, 2), (1, 1), (1, 0)]);
        p.clear();
        assert!(p.is_empty());
        assert_eq!(pool.stats().free_cells, 3);
        p.new_term(5, 5);
        assert_eq!(pairs(&p), vec![(5, 5)]);
        assert_eq!(pool.stats().free_cells, 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(1, 2), (1, 1)]);
        let mut c = p.clone();
        assert_eq!(c, p);
        c.new_term(-1, 2);
        assert_eq!(pairs(&c), vec![(1, 1)]);
        assert_eq!(pairs(&p), vec![(1, 2), (1, 1)]);
    }

    #[test]
    fn test_operands_from_different_pools() {
        let left_pool = TermPool::new();
        let right_pool = TermPool::new();
        let p = poly(&left_pool, &[(3, 2), (2, 1)]);
        let q = poly(&right_pool, &[(1, 1), (5, 0)]);

        let sum = &p + &q;
        assert!(sum.pool().same_pool(&left_pool));
        assert_eq!(pairs(&sum), vec![(3, 2), (3, 1), (5, 0)]);
        assert_eq!(pairs(&(&q * &p)), vec![(3, 3), (17, 2), (10, 1)]);
        // temporary copy of q was released into the left pool
        assert_eq!(left_pool.stats().live_cells, 3 + 4);
    }

    #[test]
    fn test_copy_into_other_pool() {
        let a = TermPool::new();
        let b = TermPool::new();
        let p = poly(&a, &[(2, 3), (-1, 0)]);
        let moved = p.copy_into(&b);
        assert!(moved.pool().same_pool(&b));
        assert_eq!(moved, p);
        assert_eq!(b.stats().live_cells, 3);
    }

    #[test]
    fn test_build_from_traversal_in_same_pool() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(3, 2), (2, 1), (-1, 0)]);
        let mut q = Polynomial::new(&pool);
        for t in p.terms() {
            q.new_term(t.coefficient * 2, t.exponent);
            // other operations on the pool keep working mid-walk
            let copy = q.clone();
            let _ = &copy + &p;
        }
        assert_eq!(pairs(&q), vec![(6, 2), (4, 1), (-2, 0)]);
        assert_eq!(pairs(&p), vec![(3, 2), (2, 1), (-1, 0)]);
    }

    #[test]
    fn test_drop_during_traversal_recycles_cells() {
        let pool = TermPool::new();
        let p = poly(&pool, &[(1, 1), (1, 0)]);
        let q = poly(&pool, &[(4, 3), (5, 2)]);
        let mut walk = p.terms();
        assert_eq!(walk.next(), Some(Term::new(1, 1)));
        drop(q);
        assert_eq!(pool.stats().free_cells, 3);
        assert_eq!(walk.next(), Some(Term::new(1, 0)));
        assert_eq!(walk.next(), None);
        assert_eq!(pool.stats().live_cells, 3);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "overflow")]
    fn test_negating_min_coefficient_overflows_in_debug() {
        let pool = TermPool::new();
        let zero = Polynomial::new(&pool);
        let p = poly(&pool, &[(i64::MIN, 0)]);
        let _ = &zero - &p;
    }

    #[test]
    fn test_arithmetic_op_symbols() {
        let symbols: Vec<String> = ArithmeticOp::iter().map(|op| op.to_string()).collect();
        assert_eq!(symbols, vec!["+", "-", "*"]);
    }
}
