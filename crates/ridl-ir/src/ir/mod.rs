//! The tree-shaped IR handed to the semantic core.
//!
//! An upstream loader deserializes and merges scanner output into exactly
//! one [`IrPackage`] per compilation; the shapes here mirror that contract.
//! Containment is strictly tree-shaped: a package owns files, files own
//! namespaces and top-level types, namespaces nest, classes own fields,
//! methods and nested types. Cross-references (base classes, field types)
//! stay raw type names at this level — resolving them is the model
//! builder's job, not the loader's.

pub mod annotation;

pub use annotation::{Annotation, AnnotationEntry};

use serde::{Deserialize, Serialize};

/// Declaration kind of a class-like entity.
///
/// Carried structurally by the IR (it comes from the scanner's annotation
/// macro, not from a key/value entry); a class node without one is a
/// malformed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// Full class: participates in inheritance, gets the class emission path.
    Class,
    /// Plain value type: emitted through the struct path.
    Struct,
}

/// Reference to a type by name, with the source file that declares it when
/// the scanner could tell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Scope-qualified type name as written (`geometry::Shape`, `float`).
    pub name: String,
    /// Declaring source unit, when known and different from primitive.
    pub source_file: Option<String>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_file: None,
        }
    }

    pub fn in_file(name: impl Into<String>, source_file: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_file: Some(source_file.into()),
        }
    }
}

/// Declarator qualifiers on a field's type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeQualifier {
    pub is_pointer: bool,
    pub is_reference: bool,
    pub is_const: bool,
}

/// Root of one compilation: a single merged package.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrPackage {
    pub name: String,
    /// Names of packages this one imports.
    pub imports: Vec<String>,
    pub files: Vec<IrFile>,
}

impl IrPackage {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One input source unit and the declarations directly inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrFile {
    pub name: String,
    pub namespaces: Vec<IrNamespace>,
    pub classes: Vec<IrClass>,
    pub enums: Vec<IrEnum>,
    pub functions: Vec<IrFunction>,
}

impl IrFile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Pure container; nests arbitrarily.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrNamespace {
    pub name: String,
    pub namespaces: Vec<IrNamespace>,
    pub classes: Vec<IrClass>,
    pub enums: Vec<IrEnum>,
    pub functions: Vec<IrFunction>,
}

impl IrNamespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// Class or value-type declaration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrClass {
    pub name: String,
    /// Declaration kind; `None` means the scanner emitted a malformed node.
    pub kind: Option<ClassKind>,
    /// Base class reference, raw. Resolution happens in the link pass.
    pub base: Option<TypeRef>,
    pub annotation: Annotation,
    pub classes: Vec<IrClass>,
    pub enums: Vec<IrEnum>,
    pub fields: Vec<IrField>,
    pub methods: Vec<IrMethod>,
}

impl IrClass {
    pub fn new(name: impl Into<String>, kind: ClassKind) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Enumeration declaration. Items keep declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrEnum {
    pub name: String,
    pub items: Vec<IrEnumItem>,
    pub annotation: Annotation,
}

impl IrEnum {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// One enumerator: stable id plus integer value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IrEnumItem {
    pub id: String,
    pub value: i64,
}

impl IrEnumItem {
    pub fn new(id: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            value,
        }
    }
}

/// Field declaration inside a class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrField {
    pub name: String,
    pub type_ref: TypeRef,
    pub qualifier: TypeQualifier,
    pub annotation: Annotation,
}

impl IrField {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            ..Self::default()
        }
    }
}

/// Method declaration inside a class.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrMethod {
    pub name: String,
    pub arguments: Vec<IrArgument>,
    pub return_type: TypeRef,
    pub annotation: Annotation,
}

impl IrMethod {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            ..Self::default()
        }
    }
}

/// One method or function argument.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrArgument {
    pub name: String,
    pub type_ref: TypeRef,
    pub annotation: Annotation,
}

impl IrArgument {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            ..Self::default()
        }
    }
}

/// Free function owned by a namespace or file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IrFunction {
    pub name: String,
    pub arguments: Vec<IrArgument>,
    pub return_type: TypeRef,
    pub annotation: Annotation,
}

impl IrFunction {
    pub fn new(name: impl Into<String>, return_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            return_type,
            ..Self::default()
        }
    }
}
