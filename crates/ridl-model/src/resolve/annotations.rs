//! Annotation resolution pass.
//!
//! Turns the flat key/value entries attached to an IR node into the
//! entity-kind-specific resolved configuration of §`model::entity`,
//! filling defaults so required keys are always present. Missing optional
//! keys never fail; a present value that cannot be coerced to what its
//! slot requires fails with [`Error::MalformedAnnotation`].
//!
//! Defaulting rules by entity kind:
//! - field: `kind` defaults to `generic`, `id` to the source name, `name`
//!   to the id; `number` fields synthesize bounds, steps and precision;
//!   other non-enum fields synthesize a wrapped default-value expression
//! - method: display `name` defaults to the source name; arguments
//!   classify as `in` (default), `out` or `aux`, producing the compact
//!   descriptor and the member-pointer signature
//! - class/enum: entries pass through unchanged

use ridl_ir::{Annotation, IrEnum, IrField, IrMethod};
use tracing::trace;

use crate::error::{Error, Result};
use crate::model::{ArgKind, Argument, EnumItem, FieldKind, ResolvedAnnotations};

/// Sentinel prefix of the compact method signature descriptor.
pub const DESCRIPTOR_SENTINEL: char = 'x';

/// Include synthesized numeric bounds depend on.
pub const LIMITS_INCLUDE: &str = "<limits>";

/// Resolved configuration of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldResolution {
    pub kind: FieldKind,
    pub id: String,
    pub name: String,
    /// Wrapped default-value expression; `Some` only for generic fields.
    pub default_value: Option<String>,
    pub annotations: ResolvedAnnotations,
    /// True when a bound was synthesized from the numeric-limits range,
    /// which obligates the owning file to the limits include.
    pub needs_limits: bool,
}

/// Resolved configuration of one method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodResolution {
    pub name: String,
    pub arguments: Vec<Argument>,
    pub return_type: String,
    pub signature: String,
    pub descriptor: String,
    pub annotations: ResolvedAnnotations,
}

/// Resolves a field's annotations. `entity` is the field's qualified name
/// for diagnostics.
pub fn resolve_field(entity: &str, field: &IrField) -> Result<FieldResolution> {
    let mut map = field.annotation.to_map();

    let kind = match map.get("kind").map(String::as_str) {
        Some("number") => FieldKind::Number,
        Some("enum") => FieldKind::Enum,
        Some(_) => FieldKind::Generic,
        None => {
            map.insert("kind".into(), "generic".into());
            FieldKind::Generic
        }
    };

    let id = map
        .entry("id".into())
        .or_insert_with(|| field.name.clone())
        .clone();
    let name = map.entry("name".into()).or_insert_with(|| id.clone()).clone();

    let mut default_value = None;
    let mut needs_limits = false;

    match kind {
        FieldKind::Number => {
            needs_limits = fill_numeric_bounds(entity, &field.type_ref.name, &mut map)?;
        }
        FieldKind::Enum => {}
        FieldKind::Generic => {
            default_value = Some(fill_generic_default(field, &mut map));
        }
    }

    trace!(field = entity, ?kind, "resolved field annotations");
    Ok(FieldResolution {
        kind,
        id,
        name,
        default_value,
        annotations: map,
        needs_limits,
    })
}

/// Floating-point types get fractional steps and nonzero precision.
fn is_floating(type_name: &str) -> bool {
    type_name == "float" || type_name == "double"
}

/// Fills `min`/`max`/`step`/`page_step`/`page_size`/`precision` for a
/// numeric field. Returns true when either bound had to be synthesized
/// from the type's representable range.
fn fill_numeric_bounds(
    entity: &str,
    type_name: &str,
    map: &mut ResolvedAnnotations,
) -> Result<bool> {
    for key in ["min", "max", "step", "page_step", "page_size"] {
        require_numeric(entity, key, map)?;
    }
    require_integer(entity, "precision", map)?;

    let floating = is_floating(type_name);
    let mut needs_limits = false;

    if !map.contains_key("min") {
        map.insert(
            "min".into(),
            format!("-(std::numeric_limits<{type_name}>::max())"),
        );
        needs_limits = true;
    }
    if !map.contains_key("max") {
        map.insert(
            "max".into(),
            format!("std::numeric_limits<{type_name}>::max()"),
        );
        needs_limits = true;
    }

    let step = if floating { "0.1" } else { "1" };
    for key in ["step", "page_step", "page_size"] {
        if !map.contains_key(key) {
            map.insert(key.into(), step.into());
        }
    }
    if !map.contains_key("precision") {
        map.insert("precision".into(), if floating { "2" } else { "0" }.into());
    }

    Ok(needs_limits)
}

/// Synthesizes the wrapped default-value expression for a generic field
/// and records the raw default under the `default` key.
fn fill_generic_default(field: &IrField, map: &mut ResolvedAnnotations) -> String {
    let type_name = field.type_ref.name.as_str();

    let wrapper = if field.qualifier.is_pointer {
        if !map.contains_key("default") {
            map.insert("default".into(), "nullptr".into());
        }
        format!("({type_name} *)")
    } else if field.qualifier.is_const {
        let stripped = type_name.strip_prefix("const ").unwrap_or(type_name);
        format!("({stripped})")
    } else {
        type_name.to_string()
    };

    let default = map.entry("default".into()).or_default().clone();
    format!("{wrapper}({default})")
}

/// Resolves a method's annotations. `owner` is the source name of the
/// owning class, used in the member-pointer signature.
pub fn resolve_method(entity: &str, owner: &str, method: &IrMethod) -> Result<MethodResolution> {
    let mut map = method.annotation.to_map();
    let name = map
        .entry("name".into())
        .or_insert_with(|| method.name.clone())
        .clone();

    let arguments = resolve_arguments(&method.arguments);
    let mut descriptor = String::from(DESCRIPTOR_SENTINEL);
    for arg in &arguments {
        descriptor.push(arg.kind.tag());
    }

    let arg_types: Vec<&str> = arguments.iter().map(|a| a.type_name.as_str()).collect();
    let return_type = method.return_type.name.clone();
    let signature = format!("{return_type}({owner}::*)({})", arg_types.join(", "));

    trace!(method = entity, %signature, %descriptor, "resolved method");
    Ok(MethodResolution {
        name,
        arguments,
        return_type,
        signature,
        descriptor,
        annotations: map,
    })
}

/// Classifies arguments by their own `kind` annotation; absent means `in`,
/// unknown kinds are auxiliary.
pub fn resolve_arguments(arguments: &[ridl_ir::IrArgument]) -> Vec<Argument> {
    arguments
        .iter()
        .map(|arg| Argument {
            name: arg.name.clone(),
            type_name: arg.type_ref.name.clone(),
            kind: match arg.annotation.get("kind") {
                None | Some("in") => ArgKind::In,
                Some("out") => ArgKind::Out,
                Some(_) => ArgKind::Aux,
            },
        })
        .collect()
}

/// Resolves enum items: display names come from the enum's annotation,
/// keyed by item id.
pub fn resolve_enum_items(en: &IrEnum) -> Vec<EnumItem> {
    en.items
        .iter()
        .map(|item| EnumItem {
            id: item.id.clone(),
            value: item.value,
            display_name: en
                .annotation
                .get(&item.id)
                .unwrap_or(item.id.as_str())
                .to_string(),
        })
        .collect()
}

/// Passes a class or enum annotation through unchanged.
pub fn resolve_passthrough(annotation: &Annotation) -> ResolvedAnnotations {
    annotation.to_map()
}

fn require_numeric(entity: &str, key: &str, map: &ResolvedAnnotations) -> Result<()> {
    if let Some(value) = map.get(key)
        && value.parse::<f64>().is_err()
    {
        return Err(Error::MalformedAnnotation {
            entity: entity.to_string(),
            key: key.to_string(),
            value: value.clone(),
            message: "expected a numeric value".to_string(),
        });
    }
    Ok(())
}

fn require_integer(entity: &str, key: &str, map: &ResolvedAnnotations) -> Result<()> {
    if let Some(value) = map.get(key)
        && value.parse::<i64>().is_err()
    {
        return Err(Error::MalformedAnnotation {
            entity: entity.to_string(),
            key: key.to_string(),
            value: value.clone(),
            message: "expected an integer value".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ridl_ir::{Annotation, IrArgument, IrEnumItem, TypeRef};

    fn number_field(type_name: &str) -> IrField {
        let mut field = IrField::new("value_", TypeRef::new(type_name));
        field.annotation = Annotation::from_pairs([("kind", "number")]);
        field
    }

    #[test]
    fn test_field_kind_defaults_to_generic() {
        let field = IrField::new("tag_", TypeRef::new("std::string"));
        let resolved = resolve_field("T.tag_", &field).unwrap();
        assert_eq!(resolved.kind, FieldKind::Generic);
        assert_eq!(resolved.annotations.get("kind").unwrap(), "generic");
    }

    #[test]
    fn test_field_id_and_name_default_chain() {
        let field = IrField::new("count_", TypeRef::new("int"));
        let resolved = resolve_field("T.count_", &field).unwrap();
        assert_eq!(resolved.id, "count_");
        assert_eq!(resolved.name, "count_");

        let mut field = IrField::new("count_", TypeRef::new("int"));
        field.annotation = Annotation::from_pairs([("id", "count")]);
        let resolved = resolve_field("T.count_", &field).unwrap();
        assert_eq!(resolved.id, "count");
        assert_eq!(resolved.name, "count");
    }

    #[test]
    fn test_floating_number_defaults() {
        let resolved = resolve_field("T.value_", &number_field("float")).unwrap();
        let anno = &resolved.annotations;
        assert_eq!(anno.get("step").unwrap(), "0.1");
        assert_eq!(anno.get("page_step").unwrap(), "0.1");
        assert_eq!(anno.get("page_size").unwrap(), "0.1");
        assert_eq!(anno.get("precision").unwrap(), "2");
        assert_eq!(
            anno.get("min").unwrap(),
            "-(std::numeric_limits<float>::max())"
        );
        assert_eq!(anno.get("max").unwrap(), "std::numeric_limits<float>::max()");
        assert!(resolved.needs_limits);
    }

    #[test]
    fn test_integral_number_defaults() {
        let resolved = resolve_field("T.value_", &number_field("int")).unwrap();
        let anno = &resolved.annotations;
        assert_eq!(anno.get("step").unwrap(), "1");
        assert_eq!(anno.get("page_step").unwrap(), "1");
        assert_eq!(anno.get("page_size").unwrap(), "1");
        assert_eq!(anno.get("precision").unwrap(), "0");
    }

    #[test]
    fn test_explicit_bounds_skip_limits_include() {
        let mut field = number_field("float");
        field
            .annotation
            .entries
            .extend(Annotation::from_pairs([("min", "0"), ("max", "1")]).entries);
        let resolved = resolve_field("T.value_", &field).unwrap();
        assert!(!resolved.needs_limits);
        assert_eq!(resolved.annotations.get("min").unwrap(), "0");
    }

    #[test]
    fn test_non_numeric_min_is_malformed() {
        let mut field = number_field("float");
        field
            .annotation
            .entries
            .extend(Annotation::from_pairs([("min", "lots")]).entries);
        let err = resolve_field("T.value_", &field).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotation { ref key, .. } if key == "min"));
    }

    #[test]
    fn test_non_integer_precision_is_malformed() {
        let mut field = number_field("int");
        field
            .annotation
            .entries
            .extend(Annotation::from_pairs([("precision", "2.5")]).entries);
        let err = resolve_field("T.value_", &field).unwrap_err();
        assert!(matches!(err, Error::MalformedAnnotation { ref key, .. } if key == "precision"));
    }

    #[test]
    fn test_pointer_default_is_null_literal() {
        let mut field = IrField::new("next_", TypeRef::new("Node"));
        field.qualifier.is_pointer = true;
        let resolved = resolve_field("T.next_", &field).unwrap();
        assert_eq!(resolved.default_value.as_deref(), Some("(Node *)(nullptr)"));
    }

    #[test]
    fn test_const_qualifier_stripped_in_default() {
        let mut field = IrField::new("label_", TypeRef::new("const std::string"));
        field.qualifier.is_const = true;
        let resolved = resolve_field("T.label_", &field).unwrap();
        assert_eq!(resolved.default_value.as_deref(), Some("(std::string)()"));
    }

    #[test]
    fn test_plain_default_wraps_type() {
        let mut field = IrField::new("label_", TypeRef::new("std::string"));
        field.annotation = Annotation::from_pairs([("default", "\"none\"")]);
        let resolved = resolve_field("T.label_", &field).unwrap();
        assert_eq!(
            resolved.default_value.as_deref(),
            Some("std::string(\"none\")")
        );
    }

    #[test]
    fn test_enum_kind_gets_no_default_value() {
        let mut field = IrField::new("mode_", TypeRef::new("Mode"));
        field.annotation = Annotation::from_pairs([("kind", "enum")]);
        let resolved = resolve_field("T.mode_", &field).unwrap();
        assert_eq!(resolved.kind, FieldKind::Enum);
        assert_eq!(resolved.default_value, None);
    }

    #[test]
    fn test_method_descriptor_and_signature() {
        let mut method = IrMethod::new("Update", TypeRef::new("void"));
        let mut a = IrArgument::new("dt", TypeRef::new("float"));
        a.annotation = Annotation::from_pairs([("kind", "in")]);
        let mut b = IrArgument::new("result", TypeRef::new("Status"));
        b.annotation = Annotation::from_pairs([("kind", "out")]);
        let mut c = IrArgument::new("scratch", TypeRef::new("Buffer"));
        c.annotation = Annotation::from_pairs([("kind", "scratch")]);
        method.arguments = vec![a, b, c];

        let resolved = resolve_method("T.Update", "Widget", &method).unwrap();
        assert_eq!(resolved.descriptor, "xioa");
        assert_eq!(resolved.signature, "void(Widget::*)(float, Status, Buffer)");
        assert_eq!(resolved.name, "Update");
    }

    #[test]
    fn test_method_display_name_annotation_wins() {
        let mut method = IrMethod::new("DoUpdate", TypeRef::new("void"));
        method.annotation = Annotation::from_pairs([("name", "Update")]);
        let resolved = resolve_method("T.DoUpdate", "Widget", &method).unwrap();
        assert_eq!(resolved.name, "Update");
        assert_eq!(resolved.signature, "void(Widget::*)()");
    }

    #[test]
    fn test_argument_kind_defaults_to_in() {
        let args = vec![IrArgument::new("x", TypeRef::new("int"))];
        let resolved = resolve_arguments(&args);
        assert_eq!(resolved[0].kind, ArgKind::In);
    }

    #[test]
    fn test_enum_item_display_names() {
        let mut en = IrEnum::new("Mode");
        en.items = vec![IrEnumItem::new("kIdle", 0), IrEnumItem::new("kBusy", 1)];
        en.annotation = Annotation::from_pairs([("kIdle", "Idle")]);

        let items = resolve_enum_items(&en);
        assert_eq!(items[0].display_name, "Idle");
        assert_eq!(items[1].display_name, "kBusy");
        assert_eq!(items[1].value, 1);
    }
}
