// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! IR types for the ridl compiler
//!
//! This crate contains the tree-shaped intermediate representation an
//! upstream loader hands to the semantic core, plus the foundation types
//! (paths) shared across the toolchain. It is data only — resolution lives
//! in `ridl-model`.

pub mod foundation;
pub mod ir;

// Re-export commonly used types
pub use foundation::Path;
pub use ir::{
    Annotation, AnnotationEntry, ClassKind, IrArgument, IrClass, IrEnum, IrEnumItem, IrField,
    IrFile, IrFunction, IrMethod, IrNamespace, IrPackage, TypeQualifier, TypeRef,
};
