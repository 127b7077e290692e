//! Target extension boundary.
//!
//! A backend that needs target-specific derived data — computed include
//! lists, synthesized wrapper-class names, export macros — plugs in here
//! instead of subclassing model entities. The builder fires one hook per
//! constructed entity; the extension keeps whatever it derives in side
//! tables keyed by entity handle, so the core's entities and traversal
//! stay target-neutral.
//!
//! Hooks may mutate the owning file's include sets (that is how the
//! original backends contribute runtime-support headers) but see every
//! other entity immutably, after its annotations are resolved.

use indexmap::IndexMap;
use std::hash::Hash;

use crate::model::{Class, ClassId, Enum, EnumId, FileId, Function, FunctionId, Model, Package, PackageFile};

/// Per-entity-kind hooks fired during model building.
///
/// Every method has a no-op default; a target implements only what it
/// needs. Hooks run in construction order: `package_started` first, then
/// one `*_built` per entity as its subtree completes, then `file_built`
/// per file, then `package_built` once the whole model exists.
pub trait TargetExtension {
    /// Package metadata exists; no files built yet.
    fn package_started(&mut self, package: &mut Package) {
        let _ = package;
    }

    /// A class and everything it owns is fully constructed.
    fn class_built(&mut self, id: ClassId, class: &Class, file: &mut PackageFile) {
        let _ = (id, class, file);
    }

    /// An enumeration is fully constructed.
    fn enum_built(&mut self, id: EnumId, en: &Enum, file: &mut PackageFile) {
        let _ = (id, en, file);
    }

    /// A free function is fully constructed.
    fn function_built(&mut self, id: FunctionId, function: &Function, file: &mut PackageFile) {
        let _ = (id, function, file);
    }

    /// A package file's whole subtree is constructed.
    fn file_built(&mut self, id: FileId, file: &mut PackageFile) {
        let _ = (id, file);
    }

    /// The full model exists; cross-references are not linked yet.
    fn package_built(&mut self, model: &mut Model) {
        let _ = model;
    }
}

/// Extension that derives nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoExtension;

impl TargetExtension for NoExtension {}

/// Target-specific derived data keyed by entity handle.
///
/// Insertion order is preserved, so iterating a side table replays
/// construction order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideTable<I: Hash + Eq, T> {
    entries: IndexMap<I, T>,
}

impl<I: Hash + Eq, T> SideTable<I, T> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    pub fn insert(&mut self, id: I, value: T) -> Option<T> {
        self.entries.insert(id, value)
    }

    pub fn get(&self, id: &I) -> Option<&T> {
        self.entries.get(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&I, &T)> {
        self.entries.iter()
    }
}

impl<I: Hash + Eq, T> Default for SideTable<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ClassId;

    #[test]
    fn test_side_table_preserves_insertion_order() {
        let mut table = SideTable::new();
        table.insert(ClassId(2), "B");
        table.insert(ClassId(0), "A");
        let order: Vec<_> = table.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![ClassId(2), ClassId(0)]);
    }

    #[test]
    fn test_side_table_lookup() {
        let mut table = SideTable::new();
        assert!(table.is_empty());
        table.insert(ClassId(1), 42);
        assert_eq!(table.get(&ClassId(1)), Some(&42));
        assert_eq!(table.get(&ClassId(9)), None);
        assert_eq!(table.len(), 1);
    }
}
