// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Semantic core of the ridl compiler
//!
//! This crate turns the tree-shaped IR of `ridl-ir` into a name-resolved
//! model — every entity carrying its qualified name, namespace chain and
//! resolved annotations — and linearizes the package's classes into a
//! deterministic emission order that respects inheritance and value
//! composition, tolerating cycles and dangling references.
//!
//! Text emission is a downstream concern: this crate hands an emitter the
//! ordered class sequence, enum and function collections, per-file
//! include sets and resolved annotations, and formats nothing itself.

pub mod error;
pub mod extension;
pub mod model;
pub mod resolve;

pub use error::{Error, Result};
pub use extension::{NoExtension, SideTable, TargetExtension};
pub use model::{
    ArgKind, Argument, Class, ClassId, Enum, EnumId, EnumItem, Field, FieldKind, FileId, Function,
    FunctionId, Import, Method, Model, Namespace, NamespaceId, Package, PackageContents,
    PackageFile, ResolvedAnnotations,
};
pub use resolve::{compile, compile_with, BrokenEdge, ClassOrder, CompiledPackage, EdgeKind};
