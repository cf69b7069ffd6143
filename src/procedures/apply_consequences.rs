/*!
Applies queued consequences.

At a high level [apply_consequences](GenericContext::apply_consequences)
sequences a handful of more basic procedures in a loop:

- Take an assignment past the propagation cursor of the trail.
- Apply boolean constraint propagation with respect to the assignment.
- If no conflict is found, continue.
- Otherwise, perform conflict analysis and return, so the caller may take
  further actions due to a conflict having been found.

When the cursor catches the trail, pending unfounded-set checks are run.
A check may extend the trail (resuming propagation), conflict (entering
analysis), or conclude nothing, and the loop ends when the trail is at
fixpoint with no check pending.

The following invariant is upheld:
<div class="warning">
apply_consequences returns [Exhausted](ApplyConsequencesOk::Exhausted) only
if there are no further consequences to apply and no check is pending.
</div>
*/

use crate::{
    context::GenericContext,
    db::ClauseKey,
    procedures::analysis::AnalysisOk,
    structures::literal::CLiteral,
    types::err::{self, ErrorKind},
};

/// Ok results of [apply_consequences](GenericContext::apply_consequences).
pub enum ApplyConsequencesOk {
    /// A conflict was found independent of any decision or assumption, and so
    /// the formula is unsatisfiable.
    FundamentalConflict,

    /// A conflict was found with no decision current, due to an assumption.
    AssumptionConflict,

    /// A unit clause was derived from some conflict; a backjump to level zero
    /// has been made and the literal awaits valuation.
    UnitClause {
        /// The literal of the clause.
        literal: CLiteral,
    },

    /// A binary asserting clause was derived from some conflict.
    AssertingBinary {
        /// The asserted literal.
        literal: CLiteral,

        /// The other (false) literal of the clause.
        other: CLiteral,
    },

    /// A (non-unit, non-binary) asserting clause was derived from some
    /// conflict.
    AssertingClause {
        /// The key to the clause.
        key: ClauseKey,

        /// The asserted literal.
        literal: CLiteral,
    },

    /// There were no (further) consequences to apply.
    Exhausted,
}

impl<R: rand::Rng + std::default::Default> GenericContext<R> {
    /// Applies queued consequences to fixpoint or conflict.
    ///
    /// See [procedures::apply_consequences](crate::procedures::apply_consequences)
    /// for details.
    pub fn apply_consequences(&mut self) -> Result<ApplyConsequencesOk, ErrorKind> {
        'application: loop {
            let Some(literal) = self.trail.next_to_propagate() else {
                // Fixpoint: run any pending unfounded-set checks.
                if self.propagators.has_pending() {
                    match self.run_unfounded_checks()? {
                        true => continue 'application,
                        false => {}
                    }

                    if self.conflict_noted() {
                        match self.conflict_to_analysis()? {
                            Some(result) => return Ok(result),
                            None => continue 'application,
                        }
                    }

                    continue 'application;
                }

                return Ok(ApplyConsequencesOk::Exhausted);
            };

            match self.propagate_literal(literal) {
                Ok(()) => {}

                Err(err::BCPError::Conflict(conflict_literal, reason)) => {
                    self.note_conflict(conflict_literal, Some(reason));

                    match self.conflict_to_analysis()? {
                        Some(result) => return Ok(result),
                        None => continue 'application,
                    }
                }
            }
        }
    }

    /// Routes a noted conflict: to incoherence when no decision is current,
    /// and to analysis otherwise.
    ///
    /// None is returned when analysis resolved the conflict internally and
    /// propagation may continue.
    fn conflict_to_analysis(&mut self) -> Result<Option<ApplyConsequencesOk>, ErrorKind> {
        if !self.trail.decision_is_made() {
            // Values at level zero are facts, so a conflict there is
            // independent of any assumption.
            if self.trail.level() > 0 {
                return Ok(Some(ApplyConsequencesOk::AssumptionConflict));
            }
            return Ok(Some(ApplyConsequencesOk::FundamentalConflict));
        }

        match self.analyze_conflict()? {
            AnalysisOk::UnitClause { literal } => {
                Ok(Some(ApplyConsequencesOk::UnitClause { literal }))
            }

            AnalysisOk::AssertingBinary { literal, other } => {
                Ok(Some(ApplyConsequencesOk::AssertingBinary { literal, other }))
            }

            AnalysisOk::AssertingClause { key, literal } => {
                Ok(Some(ApplyConsequencesOk::AssertingClause { key, literal }))
            }
        }
    }
}
