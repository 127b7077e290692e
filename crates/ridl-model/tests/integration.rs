//! End-to-end coverage of the build → link → order pipeline through the
//! public API.

use ridl_ir::{
    Annotation, ClassKind, IrClass, IrEnum, IrEnumItem, IrField, IrFile, IrFunction, IrNamespace,
    IrPackage, TypeRef,
};
use ridl_model::{
    compile, compile_with, Class, ClassId, EnumId, Error, FileId, FunctionId, Model, PackageFile,
    SideTable, TargetExtension,
};

/// Package `P` with one file whose root namespace carries the package
/// name: class `Base` (integral field `x`) and class `Derived` deriving
/// from `Base` and embedding it by value.
fn base_derived_package() -> IrPackage {
    let mut base = IrClass::new("Base", ClassKind::Class);
    let mut x = IrField::new("x", TypeRef::new("int"));
    x.annotation = Annotation::from_pairs([("kind", "number")]);
    base.fields.push(x);

    let mut derived = IrClass::new("Derived", ClassKind::Class);
    derived.base = Some(TypeRef::new("P::Base"));
    derived
        .fields
        .push(IrField::new("base_", TypeRef::new("P::Base")));

    let mut ns = IrNamespace::new("P");
    ns.classes.push(base);
    ns.classes.push(derived);

    let mut file = IrFile::new("p/p.h");
    file.namespaces.push(ns);

    let mut pkg = IrPackage::new("P");
    pkg.files.push(file);
    pkg
}

fn class_by_name<'a>(model: &'a Model, name: &str) -> &'a Class {
    model
        .classes
        .iter()
        .find(|c| c.full_name() == name)
        .unwrap_or_else(|| panic!("no class named {name}"))
}

#[test]
fn base_and_derived_order_and_names() {
    let compiled = compile(&base_derived_package()).unwrap();
    let model = &compiled.model;

    let base = class_by_name(model, "P.Base");
    let derived = class_by_name(model, "P.Derived");

    assert_eq!(base.order, Some(1));
    assert_eq!(derived.order, Some(2));
    assert_eq!(derived.full_name(), "P.Derived");
    assert_eq!(derived.qualified_name(), "P::Derived");
    assert!(compiled.order.broken_edges.is_empty());

    // The integral field resolved its numeric defaults.
    let x = &base.fields[0];
    assert_eq!(x.annotations.get("step").map(String::as_str), Some("1"));
    assert_eq!(x.annotations.get("precision").map(String::as_str), Some("0"));

    // Synthesized bounds obligated the file to the limits include.
    assert!(model.file(FileId(0)).source_includes.contains("<limits>"));
}

#[test]
fn contents_hand_emitter_ordered_classes() {
    let mut pkg = base_derived_package();
    // An enum and a free function alongside the classes.
    let mut mode = IrEnum::new("Mode");
    mode.items.push(IrEnumItem::new("kOn", 1));
    pkg.files[0].namespaces[0].enums.push(mode);
    pkg.files[0]
        .functions
        .push(IrFunction::new("Reset", TypeRef::new("void")));

    let compiled = compile(&pkg).unwrap();
    let contents = compiled.model.contents();

    assert_eq!(contents.classes, compiled.order.sequence);
    assert_eq!(contents.enums, vec![EnumId(0)]);
    assert_eq!(contents.functions, vec![FunctionId(0)]);
    assert_eq!(
        compiled.model.enumeration(EnumId(0)).qualified_name(),
        "P::Mode"
    );
}

#[test]
fn mutual_composition_cycle_is_survived_and_reported() {
    let mut a = IrClass::new("A", ClassKind::Class);
    a.fields.push(IrField::new("b_", TypeRef::new("B")));
    let mut b = IrClass::new("B", ClassKind::Class);
    b.fields.push(IrField::new("a_", TypeRef::new("A")));

    let mut file = IrFile::new("pkg/cycle.h");
    file.classes.push(a);
    file.classes.push(b);
    let mut pkg = IrPackage::new("pkg");
    pkg.files.push(file);

    let compiled = compile(&pkg).unwrap();
    assert_eq!(compiled.order.sequence.len(), 2);
    assert_eq!(compiled.order.broken_edges.len(), 1);

    let orders: Vec<_> = compiled.model.classes.iter().map(|c| c.order).collect();
    assert!(orders.contains(&Some(1)));
    assert!(orders.contains(&Some(2)));
}

#[test]
fn malformed_annotation_names_the_entity() {
    let mut field = IrField::new("v_", TypeRef::new("float"));
    field.annotation = Annotation::from_pairs([("kind", "number"), ("max", "plenty")]);
    let mut gauge = IrClass::new("Gauge", ClassKind::Class);
    gauge.fields.push(field);
    let mut file = IrFile::new("pkg/gauge.h");
    file.classes.push(gauge);
    let mut pkg = IrPackage::new("pkg");
    pkg.files.push(file);

    let err = compile(&pkg).unwrap_err();
    assert!(matches!(err, Error::MalformedAnnotation { .. }));
    let message = err.to_string();
    assert!(message.contains("Gauge.v_"), "got: {message}");
    assert!(message.contains("max"), "got: {message}");
}

/// Extension mirroring a backend that derives a wrapper-class name per
/// class and pins a runtime-support header into every file that declares
/// one — all without touching the core entities.
#[derive(Default)]
struct WrapperNames {
    names: SideTable<ClassId, String>,
}

impl TargetExtension for WrapperNames {
    fn class_built(&mut self, id: ClassId, class: &Class, file: &mut PackageFile) {
        let mut comps: Vec<String> = class.name.segments().to_vec();
        // A nested class's qualified wrapper name goes through its
        // container's wrapper, not the container itself.
        let nested_in_class = comps.len() > class.namespace_chain.len() + 1;
        if nested_in_class {
            let idx = comps.len() - 2;
            comps[idx] = format!("{}Class", comps[idx]);
        }
        self.names.insert(id, format!("{}Class", comps.join("::")));
        file.header_includes.insert("support/wrapper.h".to_string());
    }
}

#[test]
fn extension_side_table_and_includes() {
    let mut outer = IrClass::new("Outer", ClassKind::Class);
    outer
        .classes
        .push(IrClass::new("Inner", ClassKind::Struct));
    let mut file = IrFile::new("pkg/outer.h");
    file.classes.push(outer);
    let mut pkg = IrPackage::new("pkg");
    pkg.files.push(file);

    let mut ext = WrapperNames::default();
    let compiled = compile_with(&pkg, &mut ext).unwrap();

    let outer_id = ClassId(0);
    let inner_id = ClassId(1);
    assert_eq!(
        ext.names.get(&outer_id).map(String::as_str),
        Some("OuterClass")
    );
    assert_eq!(
        ext.names.get(&inner_id).map(String::as_str),
        Some("OuterClass::InnerClass")
    );
    assert!(compiled
        .model
        .file(FileId(0))
        .header_includes
        .contains("support/wrapper.h"));
}

#[test]
fn model_serializes_for_dump_tooling() {
    let compiled = compile(&base_derived_package()).unwrap();
    let json = serde_json::to_string(&compiled.model).unwrap();
    let back: Model = serde_json::from_str(&json).unwrap();
    assert_eq!(back, compiled.model);
}
