/*!
The post-propagator framework: aggregates and unfounded-set checkers.

Propagation of a literal runs in three phases (see
[bcp](crate::procedures::bcp)): binary short propagation, unit propagation via
watches, and propagator dispatch.
The structures here support the third phase:

- [Aggregates](aggregate::Aggregate) are pseudo-Boolean bounds over weighted
  literals. An aggregate subscribes to the literals it contains and updates a
  counter as subscribed literals become true, propagating negations or
  reporting a conflict when the bound tightens. Counter updates are recorded
  per decision level, and a per-level registry bounds the set of aggregates to
  rewind on backjump.
- [Components](component::Component) partition the atoms of the positive
  [dependency graph](dependency::DependencyGraph) into strongly connected
  components. Components with a cycle are checked for unfounded sets at
  propagation fixpoint, in insertion order, with loop formulas materialised
  into the clause database.

A pending queue records the components whose supports were touched since the
last fixpoint; the queue is cleared when conflict analysis discards pending
work.
*/

pub mod aggregate;
pub mod component;
pub mod dependency;

use crate::db::LevelIndex;

pub use aggregate::Aggregate;
pub use component::{Component, SupportRule};
pub use dependency::DependencyGraph;

/// The id of an aggregate: an index into the aggregate store.
pub type AggregateId = u32;

/// The id of a cyclic component: an index into the component store.
pub type ComponentId = u32;

/// The stores of the post-propagator framework.
#[derive(Default)]
pub struct PropagatorDB {
    /// Every aggregate, indexed by [AggregateId].
    pub aggregates: Vec<Aggregate>,

    /// Every cyclic component, indexed by [ComponentId].
    pub components: Vec<Component>,

    /// The positive dependency graph, present until components are computed.
    pub dependency: DependencyGraph,

    /// Components pending an unfounded-set check, in insertion order.
    pending: Vec<ComponentId>,

    /// Whether a component is on the pending queue.
    queued: Vec<bool>,

    /// Aggregates touched since the relevant level was opened, for rewinds.
    unroll_registry: Vec<AggregateId>,

    /// The length of the unroll registry when each level was opened.
    unroll_boundaries: Vec<usize>,

    /// The level an aggregate was last registered for unroll at, to avoid
    /// duplicate registration within a level.
    registered_at: Vec<Option<LevelIndex>>,
}

impl PropagatorDB {
    /// True if any aggregate or cyclic component is attached.
    pub fn is_active(&self) -> bool {
        !self.aggregates.is_empty() || !self.components.is_empty()
    }

    /// Queues a component for an unfounded-set check, unless already queued.
    pub fn queue_component(&mut self, component: ComponentId) {
        if !self.queued[component as usize] {
            self.queued[component as usize] = true;
            self.pending.push(component);
        }
    }

    /// Takes the queue of pending components, clearing the queued marks.
    pub fn take_pending(&mut self) -> Vec<ComponentId> {
        for component in &self.pending {
            self.queued[*component as usize] = false;
        }
        std::mem::take(&mut self.pending)
    }

    /// True if some component awaits an unfounded-set check.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Discards pending post-propagator work, e.g. when a conflict is noted.
    pub fn reset_pending(&mut self) {
        for component in &self.pending {
            self.queued[*component as usize] = false;
        }
        self.pending.clear();
    }

    /// Registers an aggregate for rewind at the given level, once per level.
    pub fn register_for_unroll(&mut self, id: AggregateId, level: LevelIndex) {
        while (self.unroll_boundaries.len() as LevelIndex) < level {
            self.unroll_boundaries.push(self.unroll_registry.len());
        }

        if self.registered_at[id as usize] != Some(level) {
            self.registered_at[id as usize] = Some(level);
            self.unroll_registry.push(id);
        }
    }

    /// Rewinds every aggregate registered above `level`.
    pub fn rewind_to(&mut self, level: LevelIndex) {
        let boundary = match self.unroll_boundaries.get(level as usize) {
            Some(&boundary) => boundary,
            None => return,
        };

        for index in boundary..self.unroll_registry.len() {
            let id = self.unroll_registry[index];
            self.aggregates[id as usize].rewind_to(level);
            self.registered_at[id as usize] = None;
        }

        self.unroll_registry.truncate(boundary);
        self.unroll_boundaries.truncate(level as usize);
    }

    /// Extends per-aggregate records for a fresh aggregate.
    pub fn fresh_aggregate_id(&mut self) -> AggregateId {
        let id = self.aggregates.len() as AggregateId;
        self.registered_at.push(None);
        id
    }

    /// Extends per-component records for a fresh component.
    pub fn fresh_component_id(&mut self) -> ComponentId {
        let id = self.components.len() as ComponentId;
        self.queued.push(false);
        id
    }
}
