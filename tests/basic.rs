use heron_asp::{
    builder::ClauseOk,
    config::Config,
    context::Context,
    reports::Report,
    structures::literal::Literal,
    types::err::{self, ErrorKind},
};

mod basic {
    use super::*;

    #[test]
    fn one_literal() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal();

        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(vec![p]));

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(p.atom()), Some(true));
    }

    #[test]
    fn conflict() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q]).is_ok());
        assert!(ctx.add_clause(vec![-p, -q]).is_ok());
        assert!(ctx.add_clause(vec![p, -q]).is_ok());
        assert!(ctx.add_clause(vec![-p, q]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Incoherent));

        // Incoherence independent of assumptions yields the empty core.
        assert_eq!(ctx.unsat_core(), Some(vec![]));
    }

    #[test]
    fn unit_conjunct() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q, r] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        assert!(ctx.add_clause(vec![p, q, r]).is_ok());
        assert!(ctx.add_clause(vec![-p]).is_ok());
        assert!(ctx.add_clause(vec![-q]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(p.atom()), Some(false));
        assert_eq!(ctx.value_of(q.atom()), Some(false));
        assert_eq!(ctx.value_of(r.atom()), Some(true));
    }

    #[test]
    fn tautology_skip() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        assert_eq!(Ok(ClauseOk::Skipped), ctx.add_clause(vec![p, -q, -p]));
    }

    #[test]
    fn duplicate_literals_merge() {
        let mut ctx = Context::from_config(Config::default());

        let [p, q] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        // After cleanup the clause is binary, and so propagates from a single
        // falsified literal.
        assert_eq!(Ok(ClauseOk::Added), ctx.add_clause(vec![p, p, q, q]));
        assert!(ctx.add_clause(vec![-p]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.value_of(q.atom()), Some(true));
    }

    #[test]
    fn empty_clause() {
        let mut ctx = Context::from_config(Config::default());

        assert_eq!(
            ctx.add_clause(vec![]),
            Err(ErrorKind::Build(err::BuildError::Unsatisfiable))
        );

        assert_eq!(ctx.report(), Report::Incoherent);
        assert_eq!(ctx.unsat_core(), Some(vec![]));
    }

    #[test]
    fn contradictory_units() {
        let mut ctx = Context::from_config(Config::default());
        let p = ctx.fresh_literal();

        assert!(ctx.add_clause(vec![p]).is_ok());

        // The contradiction with the level-zero fact surfaces on the add.
        assert_eq!(
            ctx.add_clause(vec![-p]),
            Err(ErrorKind::Build(err::BuildError::Unsatisfiable))
        );
        assert_eq!(ctx.report(), Report::Incoherent);
    }

    #[test]
    fn unknown_atoms_rejected() {
        let mut ctx = Context::from_config(Config::default());

        let foreign = heron_asp::structures::literal::CLiteral::new(21, true);
        assert_eq!(
            ctx.add_clause(vec![foreign]),
            Err(ErrorKind::Build(err::BuildError::UnknownAtom))
        );
    }

    #[test]
    fn solved_state_is_stable() {
        let mut ctx = Context::from_config(Config::default());

        let p = ctx.fresh_literal();
        assert!(ctx.add_clause(vec![p]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));
        assert_eq!(ctx.solve(), Ok(Report::Coherent));
    }
}
