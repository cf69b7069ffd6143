use heron_asp::{config::Config, context::Context, reports::Report, structures::literal::Literal};

mod unfounded {
    use super::*;

    /// a :- b. b :- a.
    ///
    /// The component {a, b} has no external support, so both atoms are false
    /// in every model.
    #[test]
    fn unsupported_loop() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.add_dependency(a.atom(), b.atom());
        ctx.add_dependency(b.atom(), a.atom());
        assert_eq!(ctx.compute_components(), 1);

        assert!(ctx.add_support(a.atom(), b, &[b.atom()]).is_ok());
        assert!(ctx.add_support(b.atom(), a, &[a.atom()]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(a.atom()), Some(false));
        assert_eq!(ctx.value_of(b.atom()), Some(false));
    }

    /// a :- b. b :- a. a :- c.
    ///
    /// With c false the loop has no external support; with c true the loop is
    /// founded through c.
    #[test]
    fn externally_supported_loop() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b, c] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.add_dependency(a.atom(), b.atom());
        ctx.add_dependency(b.atom(), a.atom());
        assert_eq!(ctx.compute_components(), 1);

        assert!(ctx.add_support(a.atom(), b, &[b.atom()]).is_ok());
        assert!(ctx.add_support(b.atom(), a, &[a.atom()]).is_ok());
        assert!(ctx.add_support(a.atom(), c, &[]).is_ok());

        assert!(ctx.add_clause(vec![-c]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(a.atom()), Some(false));
        assert_eq!(ctx.value_of(b.atom()), Some(false));
    }

    /// As [externally_supported_loop], though a is required, so the conflict
    /// between the loop formula and the requirement surfaces as incoherence.
    #[test]
    fn unfounded_conflict() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b, c] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.add_dependency(a.atom(), b.atom());
        ctx.add_dependency(b.atom(), a.atom());
        assert_eq!(ctx.compute_components(), 1);

        assert!(ctx.add_support(a.atom(), b, &[b.atom()]).is_ok());
        assert!(ctx.add_support(b.atom(), a, &[a.atom()]).is_ok());
        assert!(ctx.add_support(a.atom(), c, &[]).is_ok());

        assert!(ctx.add_clause(vec![a]).is_ok());
        assert!(ctx.add_clause(vec![-c]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Incoherent));
    }

    /// The loop formula keeps the loop alive while its external support
    /// holds.
    #[test]
    fn founded_loop_survives() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b, c] = *ctx.fresh_literals(3).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.add_dependency(a.atom(), b.atom());
        ctx.add_dependency(b.atom(), a.atom());
        assert_eq!(ctx.compute_components(), 1);

        assert!(ctx.add_support(a.atom(), b, &[b.atom()]).is_ok());
        assert!(ctx.add_support(b.atom(), a, &[a.atom()]).is_ok());
        assert!(ctx.add_support(a.atom(), c, &[]).is_ok());

        assert!(ctx.add_clause(vec![a]).is_ok());
        assert!(ctx.add_clause(vec![b]).is_ok());
        assert!(ctx.add_clause(vec![c]).is_ok());

        assert_eq!(ctx.solve(), Ok(Report::Coherent));

        assert_eq!(ctx.value_of(a.atom()), Some(true));
        assert_eq!(ctx.value_of(b.atom()), Some(true));
    }

    /// Atoms outside every cycle require no check.
    #[test]
    fn tight_program() {
        let mut ctx = Context::from_config(Config::default());

        let [a, b] = *ctx.fresh_literals(2).as_slice() else {
            panic!("Insufficient literals");
        };

        ctx.add_dependency(a.atom(), b.atom());
        assert_eq!(ctx.compute_components(), 0);
        assert!(ctx.tight());

        assert!(ctx.add_clause(vec![a, b]).is_ok());
        assert_eq!(ctx.solve(), Ok(Report::Coherent));
    }
}
