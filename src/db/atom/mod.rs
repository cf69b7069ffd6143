/*!
A database of 'atom related' things, accessed via fields on an [AtomDB].

Things include:
- A current (often partial) [valuation](Valuation) and the previous valuation
  (or some randomised valuation) for phase saving.
- The decision level, trail position, and [source](AssignmentSource) of every
  assigned atom.
- An [IndexHeap] recording the activity of atoms, where any atom without a
  value is 'active' on the heap.
- Flags: frozen, eliminated, assumption, and the cyclic component of the
  atom, if any.

The watch lists of an atom are kept apart in the [watch
database](crate::db::watches), as propagation borrows watch lists and atom
values independently.
*/

pub mod activity;

use crate::{
    config::{Activity, AtomDBConfig, Config},
    db::LevelIndex,
    generic::index_heap::IndexHeap,
    misc::log::targets,
    propagators::ComponentId,
    structures::{
        atom::{Atom, ATOM_MAX},
        consequence::AssignmentSource,
        literal::{CLiteral, Literal},
        valuation::{VValuation, Valuation},
    },
    types::err::AtomDBError,
};

use super::trail::Trail;

/// The status of the valuation of an atom, relative to some known valuation
/// or literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AtomValue {
    /// The atom has no value.
    NotSet,

    /// The value of the atom is the same as the polarity of the literal.
    Same,

    /// The value of the atom is not the same as the polarity of the literal.
    Different,
}

/// Flags attached to an atom.
#[derive(Clone, Copy, Default)]
pub struct AtomFlags {
    /// The atom must not be touched by the (external) preprocessor.
    pub frozen: bool,

    /// The atom has been eliminated by the (external) preprocessor.
    pub eliminated: bool,

    /// The atom is assumed during the present solve.
    pub assumption: bool,
}

/// The atom database.
pub struct AtomDB {
    /// A current (often partial) valuation.
    valuation: VValuation,

    /// The previous valuation, for phase saving.
    previous_valuation: Vec<bool>,

    /// The decision level at which each assigned atom was valued.
    decision_levels: Vec<Option<LevelIndex>>,

    /// The position on the trail at which each assigned atom was valued.
    trail_positions: Vec<usize>,

    /// The source of the assignment of each assigned atom.
    sources: Vec<AssignmentSource>,

    /// Per-atom flags.
    flags: Vec<AtomFlags>,

    /// The cyclic component of each atom, if any.
    components: Vec<Option<ComponentId>>,

    /// An [IndexHeap] of atom activity, where any atom without a value is
    /// active on the heap.
    activity_heap: IndexHeap<Activity>,

    /// A local configuration, derived from the configuration of a context.
    config: AtomDBConfig,
}

impl AtomDB {
    pub fn new(config: &Config) -> Self {
        let mut db = AtomDB {
            valuation: Vec::default(),
            previous_valuation: Vec::default(),
            decision_levels: Vec::default(),
            trail_positions: Vec::default(),
            sources: Vec::default(),
            flags: Vec::default(),
            components: Vec::default(),
            activity_heap: IndexHeap::default(),
            config: config.atom_db.clone(),
        };

        // Atom zero is created with the context and fixed true, off the
        // trail, so external atoms may start from one.
        let top = db.fresh_atom(true).expect("atoms exhausted on creation");
        db.valuation[top as usize] = Some(true);
        db.decision_levels[top as usize] = Some(0);
        db.sources[top as usize] = AssignmentSource::Unit;

        db
    }

    /// A count of atoms in the database.
    pub fn count(&self) -> usize {
        self.valuation.len()
    }

    /// The current valuation.
    pub fn valuation(&self) -> &VValuation {
        &self.valuation
    }

    /// A fresh atom --- on Ok the atom is part of the language of the
    /// context, and every per-atom structure supports access via the atom.
    pub fn fresh_atom(&mut self, previous_value: bool) -> Result<Atom, AtomDBError> {
        let atom = match self.valuation.len().try_into() {
            Ok(atom) if atom <= ATOM_MAX => atom,
            _ => return Err(AtomDBError::AtomsExhausted),
        };

        self.activity_heap.add(atom as usize, Activity::default());
        self.activity_heap.activate(atom as usize);

        self.valuation.push(None);
        self.previous_valuation.push(previous_value);
        self.decision_levels.push(None);
        self.trail_positions.push(0);
        self.sources.push(AssignmentSource::Unit);
        self.flags.push(AtomFlags::default());
        self.components.push(None);

        Ok(atom)
    }

    /// The value of the atom on the current valuation, if any.
    pub fn value_of(&self, atom: Atom) -> Option<bool> {
        // # Safety
        // An atom is only created via fresh_atom, which grows the valuation.
        unsafe { self.valuation.value_of_unchecked(atom) }
    }

    /// The 'previous' value of the atom, used for phase saving.
    ///
    /// When an atom is fresh this value may be arbitrary.
    pub fn previous_value_of(&self, atom: Atom) -> bool {
        self.previous_valuation[atom as usize]
    }

    /// Which decision level the atom was valued on, if any.
    pub fn level_of(&self, atom: Atom) -> Option<LevelIndex> {
        self.decision_levels[atom as usize]
    }

    /// The trail position at which the atom was valued.
    ///
    /// Meaningful only while the atom has a value.
    pub fn position_of(&self, atom: Atom) -> usize {
        self.trail_positions[atom as usize]
    }

    /// The source of the assignment of the atom.
    ///
    /// Meaningful only while the atom has a value.
    pub fn source_of(&self, atom: Atom) -> AssignmentSource {
        self.sources[atom as usize]
    }

    /// Values the atom of `literal` with the polarity of `literal` and
    /// records the assignment on the trail, unless the atom already has a
    /// value.
    ///
    /// The returned [AtomValue] notes whether the valuation was extended
    /// ([NotSet](AtomValue::NotSet)), already agreed
    /// ([Same](AtomValue::Same)), or conflicts
    /// ([Different](AtomValue::Different)) --- in the final case the caller
    /// notes the conflict.
    pub fn value_and_record(
        &mut self,
        trail: &mut Trail,
        literal: CLiteral,
        source: AssignmentSource,
    ) -> AtomValue {
        let atom = literal.atom() as usize;

        match self.valuation[atom] {
            None => {
                self.valuation[atom] = Some(literal.polarity());
                self.decision_levels[atom] = Some(trail.level());
                self.trail_positions[atom] = trail.assignment_count();
                self.sources[atom] = source;
                trail.push_assignment(literal);

                log::trace!(target: targets::VALUATION, "Valued {literal} at level {}.", trail.level());
                AtomValue::NotSet
            }
            Some(value) if value == literal.polarity() => AtomValue::Same,
            Some(_) => AtomValue::Different,
        }
    }

    /// Clears the value of an atom, saving the phase and returning the atom
    /// to the activity heap.
    pub fn drop_value(&mut self, atom: Atom) {
        let index = atom as usize;
        if let Some(value) = self.valuation[index] {
            self.previous_valuation[index] = value;
        }
        self.valuation[index] = None;
        self.decision_levels[index] = None;
        self.activity_heap.activate(index);
    }

    /// Pops the most active atom from the activity heap, if any.
    pub fn heap_pop_most_active(&mut self) -> Option<Atom> {
        self.activity_heap.pop_max().map(|index| index as Atom)
    }

    /// Bumps the activities of each atom in the given iterator, and increases
    /// the bump applied for next time.
    pub fn bump_relative(&mut self, atoms: impl Iterator<Item = Atom>) {
        activity::bump_relative(atoms, &mut self.activity_heap, &mut self.config);
    }

    /// The flags of an atom.
    pub fn flags(&self, atom: Atom) -> &AtomFlags {
        &self.flags[atom as usize]
    }

    /// Mutable access to the flags of an atom.
    pub fn flags_mut(&mut self, atom: Atom) -> &mut AtomFlags {
        &mut self.flags[atom as usize]
    }

    /// The cyclic component the atom belongs to, if any.
    pub fn component_of(&self, atom: Atom) -> Option<ComponentId> {
        self.components[atom as usize]
    }

    /// Places the atom in a cyclic component.
    pub fn set_component(&mut self, atom: Atom, component: ComponentId) {
        self.components[atom as usize] = Some(component);
    }

    /// True if the atom is in some cyclic component.
    pub fn in_cyclic_component(&self, atom: Atom) -> bool {
        self.components[atom as usize].is_some()
    }
}
