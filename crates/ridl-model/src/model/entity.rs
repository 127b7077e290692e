//! Resolved model entities.
//!
//! One entity per IR node, constructed top-down in a single builder pass.
//! Each carries its qualified name (the ancestor chain up to, but not
//! including, the owning package file) and whatever the annotation
//! resolver derived for its kind. Nothing here is mutated after
//! construction except [`Class::order`], which the dependency resolver
//! assigns.

use indexmap::{IndexMap, IndexSet};
use ridl_ir::{ClassKind, Path, TypeQualifier};
use serde::{Deserialize, Serialize};

use super::ids::{ClassId, EnumId, FileId, FunctionId, NamespaceId};

/// Resolved key/value configuration of one entity, required keys present.
pub type ResolvedAnnotations = IndexMap<String, String>;

/// Package metadata: the root of the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub name: String,
    /// Shared-library file name this package builds into on the current
    /// platform; `None` on platforms without a known naming scheme.
    pub library: Option<String>,
    /// Imported packages with their resolved library names.
    pub imports: Vec<Import>,
}

impl Package {
    pub fn new(name: impl Into<String>, imports: &[String]) -> Self {
        let name = name.into();
        let library = platform_library(&name);
        let imports = imports
            .iter()
            .map(|import| Import {
                library: platform_library(import),
                name: import.clone(),
            })
            .collect();
        Self {
            name,
            library,
            imports,
        }
    }
}

/// One imported package and the library file it resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Import {
    pub name: String,
    pub library: Option<String>,
}

/// Shared-library file name for a package on the running platform.
fn platform_library(name: &str) -> Option<String> {
    match std::env::consts::OS {
        "macos" => Some(format!("lib{name}.dylib")),
        "linux" => Some(format!("lib{name}.so")),
        "windows" => Some(format!("{name}.dll")),
        _ => None,
    }
}

/// One input source unit.
///
/// Owns its top-level declarations and accumulates the include directives
/// that entities beneath it discover they need. The two sets are free-text
/// and order-preserving; deduplication is by exact string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageFile {
    pub name: String,
    /// Includes required by the generated header side.
    pub header_includes: IndexSet<String>,
    /// Includes required by the generated source side.
    pub source_includes: IndexSet<String>,
    pub namespaces: Vec<NamespaceId>,
    pub classes: Vec<ClassId>,
    pub enums: Vec<EnumId>,
    pub functions: Vec<FunctionId>,
}

impl PackageFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Pure container for nested declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Namespace {
    pub name: String,
    pub file: FileId,
    pub namespaces: Vec<NamespaceId>,
    pub classes: Vec<ClassId>,
    pub enums: Vec<EnumId>,
    pub functions: Vec<FunctionId>,
}

/// Class or value-type entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Class {
    /// Ancestor name chain, file-exclusive. Renders the dotted full name
    /// and the `::`-qualified name.
    pub name: Path,
    pub kind: ClassKind,
    pub file: FileId,
    /// Enclosing namespace names, innermost last. Empty for classes nested
    /// inside another class — the chain stops at the nearest enclosing
    /// class or file.
    pub namespace_chain: Vec<String>,
    /// Base class type name as written in the IR, if any.
    pub base_name: Option<String>,
    /// Base class handle once the link pass has run.
    pub base: Option<ClassId>,
    pub annotations: ResolvedAnnotations,
    /// Declaration order preserved; it is semantically meaningful for
    /// emission.
    pub fields: Vec<Field>,
    pub methods: Vec<Method>,
    pub classes: Vec<ClassId>,
    pub enums: Vec<EnumId>,
    /// 1-based emission order assigned by the dependency resolver.
    pub order: Option<u32>,
}

impl Class {
    /// Source-level name of the class itself.
    pub fn source_name(&self) -> &str {
        self.name.last().unwrap_or_default()
    }

    /// Dotted full name, e.g. `geometry.Shape`.
    pub fn full_name(&self) -> String {
        self.name.dotted()
    }

    /// Scope-qualified name, e.g. `geometry::Shape`.
    pub fn qualified_name(&self) -> String {
        self.name.scoped()
    }
}

/// Semantic kind of a field, resolved from its annotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Bounded numeric value with range/step/precision configuration.
    Number,
    /// Value of an enumeration type.
    Enum,
    /// Anything else; carries a wrapped default-value expression.
    #[default]
    Generic,
}

/// Field entity, owned by exactly one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name as declared in the source.
    pub source_name: String,
    /// Stable identifier; defaults to the source name.
    pub id: String,
    /// Display name; defaults to the id.
    pub name: String,
    pub kind: FieldKind,
    /// Raw type name as written.
    pub type_name: String,
    pub qualifier: TypeQualifier,
    /// Class handle when the type names a class in this package and the
    /// field embeds it by value. Set by the link pass.
    pub value_type: Option<ClassId>,
    /// Wrapped default-value expression for generic-kind fields.
    pub default_value: Option<String>,
    pub annotations: ResolvedAnnotations,
}

impl Field {
    /// True when the field embeds its type by value rather than pointing
    /// or referring to it.
    pub fn is_value_held(&self) -> bool {
        !self.qualifier.is_pointer && !self.qualifier.is_reference
    }
}

/// Direction of one method argument.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    /// Input argument (the default).
    #[default]
    In,
    /// Output argument.
    Out,
    /// Auxiliary: neither input nor output.
    Aux,
}

impl ArgKind {
    /// One-character tag used in the compact signature descriptor.
    pub fn tag(self) -> char {
        match self {
            Self::In => 'i',
            Self::Out => 'o',
            Self::Aux => 'a',
        }
    }
}

/// One resolved method argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub type_name: String,
    pub kind: ArgKind,
}

/// Method entity, owned by exactly one class.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Method {
    pub source_name: String,
    /// Display name; defaults to the source name.
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: String,
    /// Full member-pointer signature:
    /// `<return-type>(<owner>::*)(<comma-joined argument types>)`.
    pub signature: String,
    /// Compact descriptor: the `x` sentinel followed by one tag character
    /// per argument in declaration order.
    pub descriptor: String,
    pub annotations: ResolvedAnnotations,
}

/// One resolved enumerator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumItem {
    pub id: String,
    pub value: i64,
    /// Display name from the enum's annotation, keyed by item id;
    /// defaults to the id.
    pub display_name: String,
}

/// Enumeration entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: Path,
    pub file: FileId,
    pub namespace_chain: Vec<String>,
    pub items: Vec<EnumItem>,
    pub annotations: ResolvedAnnotations,
}

impl Enum {
    pub fn full_name(&self) -> String {
        self.name.dotted()
    }

    pub fn qualified_name(&self) -> String {
        self.name.scoped()
    }
}

/// Free function entity, owned by a namespace or file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: Path,
    pub file: FileId,
    pub namespace_chain: Vec<String>,
    pub arguments: Vec<Argument>,
    pub return_type: String,
    pub annotations: ResolvedAnnotations,
}

impl Function {
    pub fn full_name(&self) -> String {
        self.name.dotted()
    }

    pub fn qualified_name(&self) -> String {
        self.name.scoped()
    }
}
