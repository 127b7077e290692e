//! Typed arena handles for model entities.
//!
//! Entities live in per-kind arenas on [`Model`](crate::model::Model) and
//! refer to each other by index handle, never by name: the link pass turns
//! raw type-name strings into handles once, and everything downstream —
//! the dependency resolver included — works on handles only. Handles are
//! stable for the lifetime of the model; arenas are append-only.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub u32);

        impl $name {
            /// Arena index this handle points at.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}#{}", stringify!($name), self.0)
            }
        }

        impl From<usize> for $name {
            fn from(index: usize) -> Self {
                Self(index as u32)
            }
        }
    };
}

define_handle!(
    /// Handle to a package file.
    FileId
);

define_handle!(
    /// Handle to a namespace.
    NamespaceId
);

define_handle!(
    /// Handle to a class.
    ClassId
);

define_handle!(
    /// Handle to an enumeration.
    EnumId
);

define_handle!(
    /// Handle to a free function.
    FunctionId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_index_roundtrip() {
        let id = ClassId::from(7usize);
        assert_eq!(id.index(), 7);
        assert_eq!(id, ClassId(7));
    }

    #[test]
    fn test_handle_display() {
        assert_eq!(FileId(0).to_string(), "FileId#0");
    }
}
