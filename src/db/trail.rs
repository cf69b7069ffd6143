/*!
The trail: an ordered log of the assignments made during a solve.

A propagation cursor (`q_head`) separates assignments whose consequences have
been examined from those pending examination, so queuing a consequence is a
matter of extending the trail and propagation is a matter of advancing the
cursor.

A parallel stack of level boundaries records the length of the trail at each
decision, so backjumping truncates in constant time per unassigned literal.

# Invariants

<div class="warning">
The trail enumerates every assigned atom exactly once, in assignment order,
and the decision level of trail entries is non-decreasing with position.
</div>
*/

use crate::{db::LevelIndex, structures::literal::CLiteral};

/// The assignment log, with a propagation cursor and level boundaries.
#[derive(Default)]
pub struct Trail {
    /// Every assignment, in order of assignment.
    pub assignments: Vec<CLiteral>,

    /// The length of the assignment log when each level was opened.
    pub level_indicies: Vec<usize>,

    /// The propagation cursor: assignments before the cursor have been
    /// propagated.
    pub q_head: usize,

    /// The level below which no backjump is made: zero, or the count of
    /// assumption levels during a solve under assumptions.
    pub initial_decision_level: LevelIndex,
}

impl Trail {
    /// Records an assignment on the trail.
    pub fn push_assignment(&mut self, literal: CLiteral) {
        self.assignments.push(literal);
    }

    /// Opens a fresh decision level.
    pub fn push_fresh_level(&mut self) {
        self.level_indicies.push(self.assignments.len());
    }

    /// The current decision level.
    pub fn level(&self) -> LevelIndex {
        self.level_indicies.len() as LevelIndex
    }

    /// The lowest decision level to backjump to: zero, unless assumptions
    /// have been made.
    pub fn lowest_decision_level(&self) -> LevelIndex {
        self.initial_decision_level
    }

    /// A count of the decisions made, excluding assumption levels.
    ///
    /// The level may rest below the assumption floor, e.g. between a backjump
    /// and the re-assertion of the assumptions, so the difference saturates.
    pub fn decision_count(&self) -> LevelIndex {
        (self.level_indicies.len() as LevelIndex).saturating_sub(self.initial_decision_level)
    }

    /// True if some decision is current, false otherwise (regardless of
    /// whether an assumption has been made).
    pub fn decision_is_made(&self) -> bool {
        self.decision_count() > 0
    }

    /// True if some assumption is current.
    pub fn assumption_is_made(&self) -> bool {
        self.initial_decision_level > 0
    }

    /// The count of assignments on the trail.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// The assignments made at the top level, in order of assignment.
    pub fn top_level_assignments(&self) -> &[CLiteral] {
        if let Some(&level_start) = self.level_indicies.last() {
            &self.assignments[level_start..]
        } else {
            &[]
        }
    }

    /// The next assignment past the propagation cursor, advancing the cursor.
    pub fn next_to_propagate(&mut self) -> Option<CLiteral> {
        if self.q_head < self.assignments.len() {
            let literal = self.assignments[self.q_head];
            self.q_head += 1;
            Some(literal)
        } else {
            None
        }
    }

    /// True if some assignment is pending propagation.
    pub fn has_next_to_propagate(&self) -> bool {
        self.q_head < self.assignments.len()
    }

    /// Removes the top level, returning its assignments.
    ///
    /// # Soundness
    /// Does not clear the *valuation* of the removed assignments.
    pub fn forget_top_level(&mut self) -> Vec<CLiteral> {
        match self.level_indicies.pop() {
            Some(top_start) => {
                let forgotten = self.assignments.split_off(top_start);
                self.q_head = std::cmp::min(self.q_head, self.assignments.len());
                forgotten
            }
            None => Vec::default(),
        }
    }

    /// Takes the current assignment log, leaving the default container.
    /// To be used in conjunction with [Trail::restore_assignments].
    pub fn take_assignments(&mut self) -> Vec<CLiteral> {
        std::mem::take(&mut self.assignments)
    }

    /// Restores an assignment log taken with [Trail::take_assignments].
    pub fn restore_assignments(&mut self, assignments: Vec<CLiteral>) {
        self.assignments = assignments;
    }
}
