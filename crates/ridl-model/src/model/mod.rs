//! The resolved in-memory model.
//!
//! Entities live in per-kind append-only arenas owned by [`Model`];
//! cross-references are typed handles from [`ids`]. Arena order is the
//! builder's pre-order traversal of the IR tree, which makes it the
//! deterministic input order the dependency resolver breaks ties by.

pub mod entity;
pub mod ids;

pub use entity::{
    ArgKind, Argument, Class, Enum, EnumItem, Field, FieldKind, Function, Import, Method,
    Namespace, Package, PackageFile, ResolvedAnnotations,
};
pub use ids::{ClassId, EnumId, FileId, FunctionId, NamespaceId};

use serde::{Deserialize, Serialize};

/// Fully built model of one package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Model {
    pub package: Package,
    pub files: Vec<PackageFile>,
    pub namespaces: Vec<Namespace>,
    pub classes: Vec<Class>,
    pub enums: Vec<Enum>,
    pub functions: Vec<Function>,
}

/// Flattened package contents handed to the emitter: enums and functions
/// in IR order, classes in emission order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageContents {
    pub enums: Vec<EnumId>,
    pub classes: Vec<ClassId>,
    pub functions: Vec<FunctionId>,
}

impl Model {
    pub fn file(&self, id: FileId) -> &PackageFile {
        &self.files[id.index()]
    }

    pub fn namespace(&self, id: NamespaceId) -> &Namespace {
        &self.namespaces[id.index()]
    }

    pub fn class(&self, id: ClassId) -> &Class {
        &self.classes[id.index()]
    }

    pub fn enumeration(&self, id: EnumId) -> &Enum {
        &self.enums[id.index()]
    }

    pub fn function(&self, id: FunctionId) -> &Function {
        &self.functions[id.index()]
    }

    /// All class handles in arena (traversal) order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(ClassId::from)
    }

    /// Class handles sorted by assigned emission order. Classes the
    /// resolver has not ordered yet keep their arena position at the end.
    pub fn ordered_classes(&self) -> Vec<ClassId> {
        let mut ids: Vec<ClassId> = self.class_ids().collect();
        ids.sort_by_key(|id| self.class(*id).order.unwrap_or(u32::MAX));
        ids
    }

    /// Flattened contents for the emitter.
    pub fn contents(&self) -> PackageContents {
        PackageContents {
            enums: (0..self.enums.len()).map(EnumId::from).collect(),
            classes: self.ordered_classes(),
            functions: (0..self.functions.len()).map(FunctionId::from).collect(),
        }
    }
}
