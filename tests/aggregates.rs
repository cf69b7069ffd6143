use heron_asp::{config::Config, context::Context, reports::Report, structures::literal::Literal};

mod aggregates {
    use super::*;

    #[test]
    fn bound_respected() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        // At most one of p, q, r.
        assert!(ctx.add_aggregate(vec![(p, 1), (q, 1), (r, 1)], 1).is_ok());
        assert!(ctx.add_clause(vec![p]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(p.atom()), Some(true));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
        assert_eq!(ctx.value_of(r.atom()), Some(false));
    }

    #[test]
    fn weighted_propagation() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        // Weight 2 + 2 exceeds the bound of 3, so p excludes q; r is free.
        assert!(ctx
            .add_aggregate(vec![(p, 2), (q, 2), (r, 1)], 3)
            .is_ok());
        assert!(ctx.add_clause(vec![p]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(q.atom()), Some(false));
    }

    #[test]
    fn aggregate_conflict_is_learned_from() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        // The clauses force two of p, q true whenever r is true, against the
        // bound of one, so every model falsifies r.
        assert!(ctx.add_aggregate(vec![(p, 1), (q, 1)], 1).is_ok());
        assert!(ctx.add_clause(vec![-r, p]).is_ok());
        assert!(ctx.add_clause(vec![-r, q]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(r.atom()), Some(false));
    }

    #[test]
    fn trivially_exceeded_bound() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p]).is_ok());
        assert!(ctx.add_clause(vec![q]).is_ok());

        // Both literals are proven, so the bound of one is already exceeded.
        assert!(ctx.add_aggregate(vec![(p, 1), (q, 1)], 1).is_err());
        assert_eq!(ctx.report(), Report::Incoherent);
    }

    #[test]
    fn duplicate_members_merge() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        // p is merged to weight 2, and so exceeds the slack left by q.
        assert!(ctx.add_aggregate(vec![(p, 1), (p, 1), (q, 2)], 3).is_ok());
        assert!(ctx.add_clause(vec![q]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(p.atom()), Some(false));
    }

    #[test]
    fn zero_bound_falsifies_all() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_aggregate(vec![(p, 1), (q, 1)], 0).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(p.atom()), Some(false));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
    }
}
