use heron_asp::{config::Config, context::Context, reports::Report};

mod budgets {
    use super::*;

    /// A pigeonhole-flavoured formula with enough room to require decisions.
    fn pigeons(ctx: &mut Context, holes: usize) {
        let pigeons = holes + 1;
        let mut atoms = Vec::new();
        for _ in 0..pigeons {
            atoms.push(ctx.fresh_literals(holes));
        }

        for row in &atoms {
            assert!(ctx.add_clause(row.clone()).is_ok());
        }

        for hole in 0..holes {
            for one in 0..pigeons {
                for two in (one + 1)..pigeons {
                    let clause = vec![-atoms[one][hole], -atoms[two][hole]];
                    assert!(ctx.add_clause(clause).is_ok());
                }
            }
        }
    }

    #[test]
    fn decision_budget() {
        let mut config = Config::default();
        config.decision_limit.value = 1;

        let mut ctx = Context::from_config(config);
        pigeons(&mut ctx, 4);

        assert_eq!(ctx.solve(), Ok(Report::Unknown));
    }

    #[test]
    fn budget_exhaustion_is_recoverable() {
        let mut config = Config::default();
        config.decision_limit.value = 1;

        let mut ctx = Context::from_config(config);
        pigeons(&mut ctx, 3);

        assert_eq!(ctx.solve(), Ok(Report::Unknown));

        // With the budget lifted the same context resolves the formula.
        ctx.config.decision_limit.value = 0;
        assert_eq!(ctx.solve(), Ok(Report::Incoherent));
    }

    #[test]
    fn time_budget_noticed() {
        let mut config = Config::default();
        config.time_limit.value = std::time::Duration::from_nanos(1);

        let mut ctx = Context::from_config(config);
        pigeons(&mut ctx, 5);

        assert_eq!(ctx.solve(), Ok(Report::Unknown));
    }
}
