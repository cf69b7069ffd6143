use heron_asp::{config::Config, context::Context, reports::Report, structures::literal::Literal};

mod models {
    use super::*;

    #[test]
    fn enumerate_three_models() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        let mut models: Vec<(Option<bool>, Option<bool>)> = Vec::default();

        // Enumerate by hand to record each valuation.
        for _ in 0..3 {
            if ctx.report() == Report::Coherent {
                ctx.clear_decisions();
            }
            assert_eq!(ctx.solve(), Ok(Report::Coherent));
            models.push((ctx.value_of(p.atom()), ctx.value_of(q.atom())));
            assert!(ctx.block_model().is_ok() || ctx.report() == Report::Incoherent);
        }

        // Three distinct models, each satisfying the clause.
        assert_eq!(models.len(), 3);
        for model in &models {
            assert!(model.0 == Some(true) || model.1 == Some(true));
        }
        for (left, right) in models.iter().zip(models.iter().skip(1)) {
            assert_ne!(left, right);
        }

        // Every model is blocked: a fourth query is incoherent.
        assert_eq!(ctx.solve(), Ok(Report::Incoherent));
    }

    #[test]
    fn enumeration_bound() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        assert_eq!(ctx.enumerate_models(2), Ok(2));
    }

    #[test]
    fn enumeration_exhausts() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());

        // Only three assignments satisfy the clause.
        assert_eq!(ctx.enumerate_models(10), Ok(3));
        assert_eq!(ctx.report(), Report::Incoherent);
    }

    #[test]
    fn unique_model() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        assert_eq!(ctx.enumerate_models(10), Ok(1));
        assert_eq!(ctx.report(), Report::Incoherent);
    }

    #[test]
    fn model_literals_enumerate_the_valuation() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p]).is_ok());
        assert!(ctx.add_clause(vec![-q]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        let model = ctx.model_literals();
        assert!(model.contains(&p));
        assert!(model.contains(&-q));
    }

    #[test]
    fn model_callback_fires() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        assert!(ctx.add_clause(vec![p]).is_ok());

        let seen = std::rc::Rc::new(std::cell::Cell::new(0_usize));
        let counter = seen.clone();
        ctx.set_callback_model(Box::new(move |_| {
            counter.set(counter.get() + 1);
        }));

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(seen.get(), 1);
    }
}
