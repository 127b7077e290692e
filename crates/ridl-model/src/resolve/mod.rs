//! Resolution pipeline.
//!
//! Three passes run in fixed order over one IR package:
//!
//! ```text
//! IR tree → build (entities, names, annotations)
//!         → link  (raw type names → class handles)
//!         → order (class emission sequence)
//! ```
//!
//! [`compile`] runs all three and is what most callers want; the passes
//! stay public for tools that need to stop midway.

pub mod annotations;
pub mod build;
pub mod link;
pub mod order;

pub use annotations::{DESCRIPTOR_SENTINEL, LIMITS_INCLUDE};
pub use order::{BrokenEdge, ClassOrder, EdgeKind};

use ridl_ir::IrPackage;
use tracing::debug;

use crate::error::Result;
use crate::extension::{NoExtension, TargetExtension};
use crate::model::Model;

/// Fully resolved package: the model plus the class emission order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledPackage {
    pub model: Model,
    pub order: ClassOrder,
}

/// Builds, links and orders one package with no target extension.
pub fn compile(ir: &IrPackage) -> Result<CompiledPackage> {
    compile_with(ir, &mut NoExtension)
}

/// Builds, links and orders one package, firing `ext` hooks during the
/// build pass.
pub fn compile_with(ir: &IrPackage, ext: &mut dyn TargetExtension) -> Result<CompiledPackage> {
    debug!(package = %ir.name, "compiling package");
    let mut model = build::build(ir, ext)?;
    link::link(&mut model);
    let order = order::order_classes(&mut model);
    Ok(CompiledPackage { model, order })
}
