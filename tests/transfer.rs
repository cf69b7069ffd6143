use heron_asp::{config::Config, context::Context, reports::Report, structures::literal::Literal};

mod transfer {
    use super::*;

    #[test]
    fn imported_units_are_facts() {
        let (sender, receiver) = crossbeam::channel::unbounded();

        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal();
        let q = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        ctx.set_import_channel(receiver);

        assert!(sender.send(vec![-q]).is_ok());
        ctx.import_shared_clauses();

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
        assert_eq!(ctx.value_of(p.atom()), Some(true));
    }

    #[test]
    fn subsumed_imports_rejected() {
        let (sender, receiver) = crossbeam::channel::unbounded();

        let mut ctx = Context::from_config(Config::default());
        let [p, q, r, s] = *ctx.fresh_literals(4).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p]).is_ok());
        ctx.set_import_channel(receiver);

        // Satisfied at level zero: of no use to this solver.
        assert!(sender.send(vec![p, q, r]).is_ok());
        ctx.import_shared_clauses();

        assert_eq!(ctx.clause_db.addition_count(), 0);

        // An unresolved clause is taken as is, less the falsified literal.
        assert!(sender.send(vec![-p, q, r, s]).is_ok());
        ctx.import_shared_clauses();

        assert_eq!(ctx.clause_db.addition_count(), 1);
        assert_eq!(ctx.clause_db.all_stored_clauses().count(), 1);
    }

    #[test]
    fn imported_clauses_constrain() {
        let (sender, receiver) = crossbeam::channel::unbounded();

        let mut ctx = Context::from_config(Config::default());
        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        ctx.set_import_channel(receiver);

        assert!(sender.send(vec![-p]).is_ok());
        assert!(sender.send(vec![-q]).is_ok());
        ctx.import_shared_clauses();

        assert_eq!(ctx.solve(), Ok(Report::Incoherent));
    }

    #[test]
    fn export_respects_size_bound() {
        let (sender, receiver) = crossbeam::channel::unbounded();

        let mut config = Config::default();
        config.transfer_size_bound.value = 2;

        let mut ctx = Context::from_config(config);
        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());

        ctx.set_export_channel(sender);
        assert_eq!(ctx.solve(), Ok(Report::Incoherent));

        // The refutation learns at least one short clause.
        let mut published = 0;
        while let Ok(clause) = receiver.try_recv() {
            assert!(clause.len() <= 2);
            published += 1;
        }
        assert!(published >= 1);
    }
}
