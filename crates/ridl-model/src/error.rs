//! Fatal error taxonomy for model building.
//!
//! All three variants abort the compilation run: processing is pure and
//! deterministic over a fixed tree, so nothing is retried and no partial
//! model is handed out. Every variant names the offending entity by its
//! qualified name so one diagnostic is enough to locate the problem.
//!
//! Dependency cycles and dangling type references are deliberately *not*
//! here — the ordering pass resolves those permissively and reports them
//! as [`BrokenEdge`](crate::resolve::order::BrokenEdge) records instead.

use thiserror::Error;

/// Result type alias for model-building operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions raised while turning an IR tree into a model.
#[derive(Debug, Error)]
pub enum Error {
    /// The IR tree violates the containment contract it was handed over
    /// with — e.g. a class node missing its declaration kind. Indicates a
    /// broken upstream loader or scanner, not bad user input.
    #[error("invalid input IR at '{entity}': {message}")]
    InvalidInput {
        /// Qualified name of the offending entity.
        entity: String,
        /// The violated rule.
        message: String,
    },

    /// A present annotation value could not be coerced to the type its
    /// semantic slot requires. Absent keys never raise — they all have
    /// defaults — only unparseable present values do.
    #[error("malformed annotation on '{entity}': {key} = \"{value}\": {message}")]
    MalformedAnnotation {
        /// Qualified name of the annotated entity.
        entity: String,
        /// Annotation key whose value failed to parse.
        key: String,
        /// The raw value as written.
        value: String,
        /// What the slot required.
        message: String,
    },

    /// An entity's ownership chain failed to terminate at a package file
    /// during qualified-name computation. The builder constructs names
    /// from the tree itself, so this firing means a defect in the loader
    /// handing over the tree.
    #[error("ownership chain of '{entity}' does not reach a package file")]
    UnresolvableContainment {
        /// Best-effort name of the disconnected entity.
        entity: String,
    },
}
