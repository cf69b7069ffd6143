use heron_asp::{
    config::Config,
    context::Context,
    reports::{OptimizeReport, Report},
    structures::literal::Literal,
};

mod optimization {
    use super::*;

    #[test]
    fn single_level_weighted() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 1, 0, false).is_ok());
        assert!(ctx.add_optimization_literal(q, 2, 0, false).is_ok());
        assert!(ctx.optimization.is_weighted(0));

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Optimum(vec![1])));

        assert_eq!(ctx.value_of(p.atom()), Some(true));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
    }

    #[test]
    fn two_levels() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.set_levels(2);
        assert!(ctx.add_optimization_literal(p, 1, 0, false).is_ok());
        assert!(ctx.add_optimization_literal(q, 2, 0, false).is_ok());
        assert!(ctx.add_optimization_literal(r, 5, 1, false).is_ok());

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![r]).is_ok());

        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Optimum(vec![1, 5])));
    }

    #[test]
    fn hard_fragment_incoherent() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 1, 0, false).is_ok());

        assert!(ctx.add_clause(vec![p]).is_ok());
        assert!(ctx.add_clause(vec![-p]).is_err());

        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Incoherent));
    }

    #[test]
    fn zero_cost_model() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 3, 0, false).is_ok());

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        // Falsifying p costs nothing.
        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Optimum(vec![0])));
        assert_eq!(ctx.value_of(p.atom()), Some(false));
    }

    #[test]
    fn auxiliary_literals_skip_cost() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 1, 0, false).is_ok());
        assert!(ctx.add_optimization_literal(q, 7, 0, true).is_ok());

        assert!(ctx.add_clause(vec![q]).is_ok());
        assert!(ctx.add_clause(vec![p]).is_ok());

        // q is auxiliary, so only p contributes.
        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Optimum(vec![1])));
    }

    #[test]
    fn precomputed_costs_accumulate() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 4, 0, false).is_ok());
        assert!(ctx.add_optimization_literal(q, 1, 0, false).is_ok());

        // p is forced, so its weight is unavoidable.
        assert!(ctx.add_clause(vec![p]).is_ok());

        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Optimum(vec![4])));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
    }

    #[test]
    fn cost_callback_reports() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 1, 0, false).is_ok());
        assert!(ctx.add_optimization_literal(q, 2, 0, false).is_ok());
        assert!(ctx.add_clause(vec![p, q]).is_ok());

        let reported = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        let sink = reported.clone();
        ctx.set_callback_cost(Box::new(move |costs| {
            sink.borrow_mut().push(costs.to_vec());
        }));

        assert_eq!(ctx.optimize(), Ok(OptimizeReport::Optimum(vec![1])));

        let reports = reported.borrow();
        assert!(!reports.is_empty());
        assert_eq!(reports.last(), Some(&vec![1]));
    }

    #[test]
    fn plain_solve_ignores_soft_literals() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();

        ctx.set_levels(1);
        assert!(ctx.add_optimization_literal(p, 1, 0, false).is_ok());
        assert!(ctx.add_clause(vec![p]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(p.atom()), Some(true));
    }
}
