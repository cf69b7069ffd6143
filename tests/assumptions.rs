use heron_asp::{config::Config, context::Context, reports::Report, structures::literal::Literal};

mod assumptions {
    use super::*;

    #[test]
    fn coherent_under_assumptions() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q, r]).is_ok());

        assert_eq!(ctx.solve_given(vec![-p, -q]), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(p.atom()), Some(false));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
        assert_eq!(ctx.value_of(r.atom()), Some(true));
    }

    #[test]
    fn incoherent_under_assumptions_with_core() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q, r]).is_ok());

        assert_eq!(ctx.solve_given(vec![-p, -q, -r]), Ok(Report::Incoherent));

        let core = ctx.unsat_core().expect("a core");
        assert_eq!(core.len(), 3);
        assert!(core.contains(&p));
        assert!(core.contains(&q));
        assert!(core.contains(&r));
    }

    #[test]
    fn direct_failure() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![-p, q]).is_ok());
        assert!(ctx.add_clause(vec![-q]).is_ok());

        assert_eq!(ctx.solve_given(vec![p]), Ok(Report::Incoherent));

        assert!(ctx.failed_assumptions().contains(&p));
        assert_eq!(ctx.unsat_core(), Some(vec![-p]));
    }

    #[test]
    fn irrelevant_assumptions_left_out() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r, s, t, u] = *ctx.fresh_literals(6).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![-p, q]).is_ok());
        assert!(ctx.add_clause(vec![-r, s]).is_ok());
        assert!(ctx.add_clause(vec![-s, t]).is_ok());
        assert!(ctx.add_clause(vec![-q, -t]).is_ok());

        assert_eq!(ctx.solve_given(vec![p, r, u]), Ok(Report::Incoherent));

        let core = ctx.unsat_core().expect("a core");
        assert!(!core.contains(&-u));
        assert!(!core.contains(&u));

        assert!(matches!(ctx.report(), Report::Incoherent));
    }

    #[test]
    fn assumption_of_a_proven_literal() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p]).is_ok());
        assert!(ctx.add_clause(vec![p, q]).is_ok());

        // The assumption holds at level zero, so no conflict and no choice.
        assert_eq!(ctx.solve_given(vec![p]), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(p.atom()), Some(true));
    }

    #[test]
    fn assumption_against_a_proven_literal() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        assert!(ctx.add_clause(vec![-p]).is_ok());

        assert_eq!(ctx.solve_given(vec![p]), Ok(Report::Incoherent));
        assert_eq!(ctx.unsat_core(), Some(vec![-p]));
    }

    #[test]
    fn queries_in_sequence() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        assert_eq!(ctx.solve_given(vec![-p]), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(q.atom()), Some(true));

        assert_eq!(ctx.solve_given(vec![-q]), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(p.atom()), Some(true));

        assert_eq!(ctx.solve_given(vec![-p, -q]), Ok(Report::Incoherent));
    }
}
