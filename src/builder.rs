/*!
Methods for building a context: atoms, clauses, aggregates, the dependency
graph, components and their supports, and soft literals.

# Clauses

[add_clause](GenericContext::add_clause) accepts any clause and performs the
usual cleanup: duplicate literals are removed, tautologies are skipped, and
literals falsified at level zero are dropped.
What remains is dispatched on size:

- The empty clause establishes incoherence.
- A unit clause is valued at level zero, with propagation deferred to the
  next solve.
- A binary clause is recorded in the binary implication lists.
- A long clause is stored in the clause database with watches on its first
  two literals.

Clauses may be added between solves (e.g. blocking clauses); additions while
a decision is current are refused.

# Aggregates

[add_aggregate](GenericContext::add_aggregate) accepts weighted literals and
an upper bound on the weight of true literals.
Duplicate literals are merged by summing weights.
Members are subscribed with positional hints, counters are primed from the
current (level-zero) valuation, and any immediately forced literals are
valued.

# Components

Dependencies are gathered in the positive dependency graph through
[add_dependency](GenericContext::add_dependency);
[compute_components](GenericContext::compute_components) partitions the atoms
into strongly connected components and registers the cyclic ones for
unfounded-set checks.
Support rules are then attached with
[add_support](GenericContext::add_support), which subscribes the component to
the falsification of the support's body.
*/

use std::collections::HashSet;

use crate::{
    context::{ContextState, GenericContext},
    misc::log::targets,
    propagators::{
        aggregate::{Aggregate, AggregateMember},
        AggregateId, Component, ComponentId, SupportRule,
    },
    structures::{
        atom::Atom,
        clause::{CClause, ClauseSource},
        consequence::{AssignmentSource, Reason},
        literal::{CLiteral, Literal},
    },
    types::err::{self, ErrorKind},
};

/// Ok results of adding a clause to a context.
#[derive(Debug, PartialEq, Eq)]
pub enum ClauseOk {
    /// The clause was added to the context.
    Added,

    /// The clause was a tautology, or already satisfied at level zero, and
    /// was skipped.
    Skipped,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// A fresh atom, extending every per-atom structure.
    pub fn fresh_atom(&mut self) -> Result<Atom, ErrorKind> {
        let previous_value = self.rng.random_bool(self.config.polarity_lean.value);
        let atom = self.atom_db.fresh_atom(previous_value)?;
        self.watches.fresh_atom();
        Ok(atom)
    }

    /// A fresh atom, for use after solving has begun.
    ///
    /// All structures grow with the atom regardless of when it is created, so
    /// this is [fresh_atom](GenericContext::fresh_atom) with a guard: fresh
    /// atoms may not be created while a decision is current.
    pub fn fresh_atom_runtime(&mut self) -> Result<Atom, ErrorKind> {
        if self.trail.decision_is_made() {
            return Err(err::AtomDBError::DecisionMade.into());
        }
        self.fresh_atom()
    }

    /// A positive literal over a fresh atom.
    pub fn fresh_literal(&mut self) -> CLiteral {
        let atom = self.fresh_atom().expect("atoms exhausted");
        CLiteral::new(atom, true)
    }

    /// A vector of `count` positive literals over fresh atoms.
    pub fn fresh_literals(&mut self, count: usize) -> Vec<CLiteral> {
        (0..count).map(|_| self.fresh_literal()).collect()
    }

    /// Extends the context until `atom` is part of its language.
    pub fn ensure_atom(&mut self, atom: Atom) -> Result<(), ErrorKind> {
        while (self.atom_db.count() as Atom) <= atom {
            self.fresh_atom()?;
        }
        Ok(())
    }

    /// Adds a clause to the context, dispatched on size after cleanup.
    ///
    /// Returns an error on a clause with an out-of-language atom, on an
    /// addition while a decision is current, and on trivial incoherence (an
    /// empty clause, or a unit conflicting with level zero).
    pub fn add_clause(&mut self, clause: impl Into<CClause>) -> Result<ClauseOk, ErrorKind> {
        let clause: CClause = clause.into();

        if self.trail.level() != 0 {
            return Err(ErrorKind::InvalidState);
        }

        for literal in &clause {
            if literal.atom() as usize >= self.atom_db.count() {
                return Err(err::BuildError::UnknownAtom.into());
            }
        }

        if self.state == ContextState::Configuration {
            self.state = ContextState::Input;
        }

        // Cleanup: duplicates, tautologies, and level-zero values.
        let mut cleaned = CClause::with_capacity(clause.len());
        let mut seen: HashSet<CLiteral> = HashSet::with_capacity(clause.len());

        for literal in clause {
            if seen.contains(&literal.negate()) {
                log::trace!(target: targets::CLAUSE_DB, "Skipped a tautology.");
                return Ok(ClauseOk::Skipped);
            }

            match self.atom_db.value_of(literal.atom()) {
                Some(value) if value == literal.polarity() => {
                    // Values outside a solve are level-zero facts.
                    return Ok(ClauseOk::Skipped);
                }
                Some(_) => continue,
                None => {}
            }

            if seen.insert(literal) {
                cleaned.push(literal);
            }
        }

        match cleaned.len() {
            0 => {
                log::info!(target: targets::CLAUSE_DB, "An empty clause was added.");
                self.note_conflict(
                    // An empty clause has no literal; the conflict is marked
                    // on the fixed top atom.
                    CLiteral::new(0, false),
                    None,
                );
                self.note_fundamental_incoherence();
                Err(err::BuildError::Unsatisfiable.into())
            }

            1 => {
                let literal = cleaned[0];
                self.atom_db
                    .value_and_record(&mut self.trail, literal, AssignmentSource::Unit);
                // Propagation of the unit is deferred to the next solve.
                if self.state == ContextState::Coherent {
                    self.state = ContextState::Input;
                }
                Ok(ClauseOk::Added)
            }

            2 => {
                self.watches.watch_binary(cleaned[0], cleaned[1]);
                self.watches.watch_binary(cleaned[1], cleaned[0]);
                if self.state == ContextState::Coherent {
                    self.state = ContextState::Input;
                }
                Ok(ClauseOk::Added)
            }

            _ => {
                let key =
                    self.clause_db
                        .store(cleaned, ClauseSource::Original, &mut self.watches)?;

                // Literals may hold level-zero values, so watches are chosen
                // with respect to the valuation.
                self.clause_db
                    .rewatch(key, &self.atom_db, &mut self.watches)?;

                if self.state == ContextState::Coherent {
                    self.state = ContextState::Input;
                }
                Ok(ClauseOk::Added)
            }
        }
    }

    /// Adds an aggregate: the weighted sum of true members may not exceed
    /// `bound`.
    ///
    /// Duplicate literals are merged by summing weights; a member whose
    /// weight alone exceeds the bound is falsified immediately.
    pub fn add_aggregate(
        &mut self,
        members: Vec<(CLiteral, u64)>,
        bound: u64,
    ) -> Result<AggregateId, ErrorKind> {
        if self.trail.level() != 0 {
            return Err(ErrorKind::InvalidState);
        }

        // Merge duplicates.
        let mut merged: Vec<AggregateMember> = Vec::with_capacity(members.len());
        for (literal, weight) in members {
            if literal.atom() as usize >= self.atom_db.count() {
                return Err(err::BuildError::UnknownAtom.into());
            }

            match merged.iter_mut().find(|member| member.literal == literal) {
                Some(member) => member.weight = member.weight.saturating_add(weight),
                None => merged.push(AggregateMember { literal, weight }),
            }
        }

        let id = self.propagators.fresh_aggregate_id();
        let mut aggregate = Aggregate::new(merged, bound);

        // Subscriptions, and counters primed from the current valuation.
        for index in 0..aggregate.members().len() {
            let member = aggregate.members()[index];
            self.watches
                .subscribe_aggregate(member.literal, id, index as u32);

            if let Some(value) = self.atom_db.value_of(member.literal.atom()) {
                if value == member.literal.polarity() {
                    let level = self.atom_db.level_of(member.literal.atom()).unwrap_or(0);
                    aggregate.apply(index as u32, level);
                }
            }
        }

        if aggregate.slack().is_none() {
            self.propagators.aggregates.push(aggregate);
            self.note_conflict(CLiteral::new(0, false), None);
            self.note_fundamental_incoherence();
            return Err(err::BuildError::Unsatisfiable.into());
        }

        let forced: Vec<CLiteral> = aggregate.forced_members(&self.atom_db).collect();
        self.propagators.aggregates.push(aggregate);

        for negation in forced {
            let reason = Reason::Aggregate {
                id,
                trail_length: self.trail.assignment_count(),
            };
            self.atom_db.value_and_record(
                &mut self.trail,
                negation,
                AssignmentSource::BCP(reason),
            );
        }

        if self.state == ContextState::Configuration {
            self.state = ContextState::Input;
        }

        Ok(id)
    }

    /// Adds an edge of the positive dependency graph, from a head atom to a
    /// positive atom of its rule body.
    pub fn add_dependency(&mut self, head: Atom, positive_body_atom: Atom) {
        self.propagators.dependency.add_edge(head, positive_body_atom);
    }

    /// Computes the strongly connected components of the dependency graph,
    /// consuming the graph and registering each cyclic component for
    /// unfounded-set checks.
    ///
    /// Returns the count of cyclic components; a formula with none is
    /// *tight*, and no checks will run.
    pub fn compute_components(&mut self) -> usize {
        let components = self.propagators.dependency.cyclic_components();

        for atoms in components {
            let id = self.propagators.fresh_component_id();
            for atom in &atoms {
                self.atom_db.set_component(*atom, id);
            }
            self.propagators.components.push(Component::new(id, atoms));
        }

        self.propagators.components.len()
    }

    /// Marks a component as part of the head-cycle partition.
    pub fn mark_head_cycle(&mut self, component: ComponentId) {
        self.propagators.components[component as usize].head_cycle = true;
    }

    /// Attaches a support rule to an atom of a cyclic component: `body` is
    /// true when the rule may fire, and `positive_body_atoms` are the
    /// positive atoms of the body.
    ///
    /// Atoms of the rule body inside the same component become the internal
    /// atoms of the support; a support with no internal atom is external.
    /// No-op for atoms outside any cyclic component.
    pub fn add_support(
        &mut self,
        head: Atom,
        body: CLiteral,
        positive_body_atoms: &[Atom],
    ) -> Result<(), ErrorKind> {
        if body.atom() as usize >= self.atom_db.count() {
            return Err(err::BuildError::UnknownAtom.into());
        }

        let Some(component) = self.atom_db.component_of(head) else {
            return Ok(());
        };

        let internal: Vec<Atom> = positive_body_atoms
            .iter()
            .filter(|atom| self.atom_db.component_of(**atom) == Some(component))
            .copied()
            .collect();

        self.propagators.components[component as usize]
            .add_support(head, SupportRule { body, internal });

        // A check is due when the body is falsified.
        self.watches.subscribe_component(body.negate(), component);

        // The baseline check for the component on the initial valuation.
        self.propagators.queue_component(component);

        Ok(())
    }

    /// Sizes the per-level stores of the optimization database.
    /// To be called before soft literals are added.
    pub fn set_levels(&mut self, count: usize) {
        self.optimization.set_levels(count);
    }

    /// Registers a soft literal with a weight at a priority level.
    pub fn add_optimization_literal(
        &mut self,
        literal: CLiteral,
        weight: u64,
        level: usize,
        aux: bool,
    ) -> Result<(), ErrorKind> {
        if literal.atom() as usize >= self.atom_db.count() {
            return Err(err::BuildError::UnknownAtom.into());
        }

        self.optimization.add(literal, weight, level, aux)?;
        self.watches.mark_optimization(literal);
        Ok(())
    }

    /// Injects the negations of the undefined soft literals of a level as
    /// preferred decisions.
    pub fn prefer_optimization_literals(&mut self, level: usize) {
        let negations: Vec<CLiteral> = self
            .optimization
            .literals(level)
            .iter()
            .filter(|soft| !soft.removed)
            .filter(|soft| self.atom_db.value_of(soft.literal.atom()).is_none())
            .map(|soft| soft.literal.negate())
            .collect();

        self.inject_preferred(negations.into_iter());
    }
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// True if no cyclic component is registered.
    pub fn tight(&self) -> bool {
        self.propagators.components.is_empty()
    }

    /// True if some aggregate or cyclic component is attached.
    pub fn has_propagators(&self) -> bool {
        self.propagators.is_active()
    }
}
