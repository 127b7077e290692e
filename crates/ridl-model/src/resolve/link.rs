//! Cross-reference linking pass.
//!
//! The builder leaves base-class and field-type references as the raw
//! type-name strings the scanner wrote down. This pass builds the flat
//! class-name table (qualified name → handle) and converts each raw name
//! into an optional handle: `Some` when the name resolves to a class in
//! this package, `None` for external or primitive types. Field references
//! only link when the field holds its type by value — pointer and
//! reference fields impose no layout dependency.
//!
//! Linking is permissive by design: a dangling name is not an error, it
//! simply stays unlinked and the dependency resolver ignores it.

use indexmap::IndexMap;
use tracing::{debug, trace};

use crate::model::{ClassId, Model};

/// Resolves raw type names into class handles, in place.
pub fn link(model: &mut Model) {
    let table: IndexMap<String, ClassId> = model
        .class_ids()
        .map(|id| (model.class(id).qualified_name(), id))
        .collect();

    let mut linked_bases = 0usize;
    let mut linked_fields = 0usize;

    for class in &mut model.classes {
        if let Some(base_name) = &class.base_name {
            class.base = table.get(base_name.as_str()).copied();
            linked_bases += usize::from(class.base.is_some());
        }
        for field in &mut class.fields {
            if field.is_value_held() {
                field.value_type = table.get(field.type_name.as_str()).copied();
                linked_fields += usize::from(field.value_type.is_some());
            }
        }
        trace!(class = %class.name, base = ?class.base, "linked");
    }

    debug!(
        classes = table.len(),
        linked_bases, linked_fields, "cross-references linked"
    );
}
