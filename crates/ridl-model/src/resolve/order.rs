//! Class emission ordering pass.
//!
//! Assigns every class a unique 1-based order such that, wherever the
//! dependency graph allows it, a class comes after its base class and
//! after every class it embeds by value as a field. The inheritance edge
//! is satisfied before composition edges are examined.
//!
//! The walk is a three-state depth-first traversal over class handles
//! with an explicit work stack: processing a class marks it in-progress;
//! an unvisited dependency defers the class behind that dependency; a
//! dependency that is itself in-progress is an edge of a cycle and is
//! treated as satisfied so the traversal always terminates. Ties resolve
//! by input (arena) position, so the result is deterministic for a fixed
//! input order.
//!
//! Cycles and dangling references are not errors — the pass always
//! produces a total order — but every edge it was forced to break is
//! reported in the result so callers can surface what was ordered
//! arbitrarily.

use tracing::{debug, warn};

use crate::model::{ClassId, Model};

/// Dependency relation an edge belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// `class` derives from `dependency`.
    Inheritance,
    /// `class` embeds `dependency` by value in a field.
    Composition,
}

/// A dependency edge the resolver could not honor without contradicting
/// an order it had already committed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokenEdge {
    /// The class that was finalized despite the unsatisfied edge.
    pub class: ClassId,
    /// The dependency that ended up ordered after `class`.
    pub dependency: ClassId,
    pub kind: EdgeKind,
}

/// Result of the ordering pass: the emission sequence plus every edge
/// broken to obtain it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassOrder {
    /// Class handles in emission order.
    pub sequence: Vec<ClassId>,
    pub broken_edges: Vec<BrokenEdge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    Unvisited,
    InProgress,
    Ordered,
}

/// Orders all classes in the model, writing each class's assigned order
/// back onto it.
pub fn order_classes(model: &mut Model) -> ClassOrder {
    let count = model.classes.len();
    let mut state = vec![Visit::Unvisited; count];
    let mut sequence = Vec::with_capacity(count);
    let mut broken_edges = Vec::new();
    let mut next_order: u32 = 1;
    let mut stack: Vec<ClassId> = Vec::new();

    for root in 0..count {
        stack.push(ClassId::from(root));
        while let Some(id) = stack.pop() {
            if state[id.index()] == Visit::Ordered {
                continue;
            }
            state[id.index()] = Visit::InProgress;
            let class = &model.classes[id.index()];

            // The inheritance edge comes first: an unvisited base defers
            // this class until the base's subtree has been walked.
            if let Some(base) = class.base
                && state[base.index()] == Visit::Unvisited
            {
                stack.push(id);
                stack.push(base);
                continue;
            }

            // Composition edges: every resolvable value-held field type
            // must be walked before this class is finalized.
            let mut pending = Vec::new();
            for field in &class.fields {
                if let Some(dep) = field.value_type
                    && state[dep.index()] == Visit::Unvisited
                {
                    pending.push(dep);
                }
            }
            if !pending.is_empty() {
                stack.push(id);
                // Reversed so fields are walked in declaration order.
                for dep in pending.into_iter().rev() {
                    stack.push(dep);
                }
                continue;
            }

            // Every dependency is now ordered or part of a cycle through
            // this class; finalizing here is what breaks the cycle.
            if let Some(base) = class.base
                && state[base.index()] == Visit::InProgress
            {
                broken_edges.push(BrokenEdge {
                    class: id,
                    dependency: base,
                    kind: EdgeKind::Inheritance,
                });
            }
            for field in &class.fields {
                if let Some(dep) = field.value_type
                    && state[dep.index()] == Visit::InProgress
                    && dep != id
                {
                    broken_edges.push(BrokenEdge {
                        class: id,
                        dependency: dep,
                        kind: EdgeKind::Composition,
                    });
                }
            }

            state[id.index()] = Visit::Ordered;
            model.classes[id.index()].order = Some(next_order);
            next_order += 1;
            sequence.push(id);
        }
    }

    for edge in &broken_edges {
        warn!(
            class = %model.class(edge.class).name,
            dependency = %model.class(edge.dependency).name,
            kind = ?edge.kind,
            "dependency cycle broken; emission order is arbitrary for this edge"
        );
    }
    debug!(
        classes = count,
        broken = broken_edges.len(),
        "emission order assigned"
    );

    ClassOrder {
        sequence,
        broken_edges,
    }
}
