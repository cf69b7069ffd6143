/*!
Cyclic components and unfounded-set checks.

A component is a strongly connected component of the positive [dependency
graph](crate::propagators::dependency) with a cycle.
Atoms in such components require unfounded-set checks: a true atom must be
derivable through some chain of support which does not loop through the
component itself.

# Supports

Each atom of a component carries its support rules.
A support rule pairs a body literal (true when the rule may fire) with the
positive atoms of the body which fall inside the same component.
A support with no internal atoms is *external*.

# The check

At propagation fixpoint the *founded* atoms of the component are computed as
a least fixpoint: an atom is founded if some support has a body which is not
false and internal atoms which are all founded.
Component atoms which are neither founded nor false form an unfounded set,
and each must be false on any model extending the current valuation.

For each such atom *a* the check materialises the loop formula

> ¬a ∨ β₁ ∨ … ∨ βₖ

where the βᵢ are the body literals of supports of unfounded atoms with no
internal atom in the unfounded set.
Every such body is false --- otherwise its head would be founded --- so the
formula asserts ¬a, or conflicts if *a* is true.

A component partitioned for head-cycle checking carries the `head_cycle`
mark; the check itself is the same at this level, with disjunctive testing
delegated to an external collaborator.
*/

use std::collections::{HashMap, HashSet};

use crate::{
    db::atom::AtomDB,
    structures::{
        atom::Atom,
        clause::CClause,
        literal::{CLiteral, Literal},
    },
};

use super::ComponentId;

/// A rule body supporting an atom of a component.
#[derive(Clone)]
pub struct SupportRule {
    /// The body of the rule, as a single literal.
    pub body: CLiteral,

    /// The positive atoms of the body inside the same component.
    pub internal: Vec<Atom>,
}

/// A strongly connected component of the positive dependency graph.
pub struct Component {
    /// The id of the component.
    pub id: ComponentId,

    /// The atoms of the component.
    pub atoms: Vec<Atom>,

    /// The support rules of each atom of the component.
    pub supports: HashMap<Atom, Vec<SupportRule>>,

    /// True if the component is part of the head-cycle partition.
    pub head_cycle: bool,
}

impl Component {
    /// A fresh component over the given atoms.
    pub fn new(id: ComponentId, atoms: Vec<Atom>) -> Self {
        Component {
            id,
            atoms,
            supports: HashMap::default(),
            head_cycle: false,
        }
    }

    /// Notes a support rule for an atom of the component.
    pub fn add_support(&mut self, atom: Atom, support: SupportRule) {
        self.supports.entry(atom).or_default().push(support);
    }

    /// The unfounded atoms of the component on the current valuation, paired
    /// with their loop formulas.
    ///
    /// Empty when every non-false atom of the component is founded.
    pub fn unfounded_atoms(&self, atom_db: &AtomDB) -> Vec<(Atom, CClause)> {
        let body_false = |support: &SupportRule| {
            atom_db
                .value_of(support.body.atom())
                .is_some_and(|value| value != support.body.polarity())
        };

        // The least fixpoint of the founded atoms.
        let mut founded: HashSet<Atom> = HashSet::default();
        let mut change = true;
        while change {
            change = false;
            for atom in &self.atoms {
                if founded.contains(atom) {
                    continue;
                }

                let supported = self.supports.get(atom).is_some_and(|supports| {
                    supports.iter().any(|support| {
                        !body_false(support)
                            && support.internal.iter().all(|internal| founded.contains(internal))
                    })
                });

                if supported {
                    founded.insert(*atom);
                    change = true;
                }
            }
        }

        let unfounded: HashSet<Atom> = self
            .atoms
            .iter()
            .filter(|atom| {
                !founded.contains(*atom) && atom_db.value_of(**atom) != Some(false)
            })
            .copied()
            .collect();

        if unfounded.is_empty() {
            return Vec::default();
        }

        // The bodies external to the unfounded set, shared by each loop
        // formula.
        let mut external_bodies: Vec<CLiteral> = Vec::default();
        let mut noted: HashSet<CLiteral> = HashSet::default();
        for atom in &unfounded {
            if let Some(supports) = self.supports.get(atom) {
                for support in supports {
                    let external = support
                        .internal
                        .iter()
                        .all(|internal| !unfounded.contains(internal));
                    if external && noted.insert(support.body) {
                        external_bodies.push(support.body);
                    }
                }
            }
        }

        unfounded
            .into_iter()
            .map(|atom| {
                let mut loop_formula = CClause::with_capacity(1 + external_bodies.len());
                loop_formula.push(CLiteral::new(atom, false));
                loop_formula.extend_from_slice(&external_bodies);
                (atom, loop_formula)
            })
            .collect()
    }
}
