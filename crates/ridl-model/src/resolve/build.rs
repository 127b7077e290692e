//! Model building pass.
//!
//! Single recursive descent over the IR tree, one model entity per IR
//! node. At each container the pass visits nested classes and enums
//! first (pre-order, so a class's own children exist before anything
//! cross-references the class), then a class's fields and methods, then
//! nested namespaces and free functions.
//!
//! Qualified names are the ancestor chain from the owning package file
//! (exclusive) down to the entity, computed once at construction. The
//! namespace chain collects enclosing *namespace* names only and stops at
//! the nearest enclosing class or file.
//!
//! Side effects during the walk land on the owning file's include sets: a
//! synthesized numeric bound pulls in the limits header, a cross-file
//! base class pulls in its declaring file. Target extensions hook in
//! right after each entity is constructed.

use ridl_ir::{
    IrClass, IrEnum, IrField, IrFile, IrFunction, IrMethod, IrNamespace, IrPackage, Path,
};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::extension::TargetExtension;
use crate::model::{
    Class, ClassId, Enum, EnumId, Field, FileId, Function, FunctionId, Method, Model, Namespace,
    NamespaceId, Package, PackageFile,
};
use crate::resolve::annotations::{
    resolve_arguments, resolve_enum_items, resolve_field, resolve_method, resolve_passthrough,
    LIMITS_INCLUDE,
};

/// Naming context threaded through the descent.
///
/// Replaces the process-wide factory/context stack of older generators:
/// everything a construction site needs to know about its ancestry rides
/// in here, and nothing survives the `build` call.
#[derive(Debug, Clone)]
struct Scope {
    file: FileId,
    /// Ancestor names from the file (exclusive) down to the container.
    names: Path,
    /// Enclosing namespace names; cleared when descent enters a class.
    namespaces: Vec<String>,
}

impl Scope {
    fn file_root(file: FileId) -> Self {
        Self {
            file,
            names: Path::default(),
            namespaces: Vec::new(),
        }
    }

    /// Scope for children of a namespace named `name`.
    fn in_namespace(&self, name: &str) -> Self {
        let mut namespaces = self.namespaces.clone();
        namespaces.push(name.to_string());
        Self {
            file: self.file,
            names: self.names.append(name),
            namespaces,
        }
    }

    /// Scope for children of a class named `name`. The namespace chain
    /// stops here: nested entities wrap in no namespace blocks of their
    /// own.
    fn in_class(&self, name: &str) -> Self {
        Self {
            file: self.file,
            names: self.names.append(name),
            namespaces: Vec::new(),
        }
    }
}

/// Builds the model for one IR package. `ext` hooks fire as entities are
/// constructed; pass [`NoExtension`](crate::extension::NoExtension) when
/// no target is plugged in.
pub fn build(ir: &IrPackage, ext: &mut dyn TargetExtension) -> Result<Model> {
    let mut builder = Builder {
        model: Model {
            package: Package::new(&ir.name, &ir.imports),
            files: Vec::new(),
            namespaces: Vec::new(),
            classes: Vec::new(),
            enums: Vec::new(),
            functions: Vec::new(),
        },
        ext,
    };

    builder.ext.package_started(&mut builder.model.package);
    for file in &ir.files {
        builder.build_file(file)?;
    }
    builder.ext.package_built(&mut builder.model);

    debug!(
        package = %ir.name,
        files = builder.model.files.len(),
        classes = builder.model.classes.len(),
        enums = builder.model.enums.len(),
        functions = builder.model.functions.len(),
        "model built"
    );
    Ok(builder.model)
}

struct Builder<'ext> {
    model: Model,
    ext: &'ext mut dyn TargetExtension,
}

impl Builder<'_> {
    /// Appends `name` to the scope's ancestor chain. An unnamed node
    /// cannot be addressed through its parent chain, which makes the
    /// chain unresolvable — that is a loader defect, not user input.
    fn name_of(&self, scope: &Scope, name: &str) -> Result<Path> {
        if name.is_empty() {
            return Err(Error::UnresolvableContainment {
                entity: scope.names.dotted(),
            });
        }
        Ok(scope.names.append(name))
    }

    fn build_file(&mut self, ir: &IrFile) -> Result<FileId> {
        let id = FileId::from(self.model.files.len());
        self.model.files.push(PackageFile::new(&ir.name));
        let scope = Scope::file_root(id);

        for class in &ir.classes {
            let class_id = self.build_class(class, &scope)?;
            self.model.files[id.index()].classes.push(class_id);
        }
        for en in &ir.enums {
            let enum_id = self.build_enum(en, &scope)?;
            self.model.files[id.index()].enums.push(enum_id);
        }
        for ns in &ir.namespaces {
            let ns_id = self.build_namespace(ns, &scope)?;
            self.model.files[id.index()].namespaces.push(ns_id);
        }
        for function in &ir.functions {
            let fn_id = self.build_function(function, &scope)?;
            self.model.files[id.index()].functions.push(fn_id);
        }

        let (model, ext) = (&mut self.model, &mut self.ext);
        ext.file_built(id, &mut model.files[id.index()]);
        Ok(id)
    }

    fn build_namespace(&mut self, ir: &IrNamespace, scope: &Scope) -> Result<NamespaceId> {
        if ir.name.is_empty() {
            return Err(Error::UnresolvableContainment {
                entity: scope.names.dotted(),
            });
        }
        let id = NamespaceId::from(self.model.namespaces.len());
        self.model.namespaces.push(Namespace {
            name: ir.name.clone(),
            file: scope.file,
            namespaces: Vec::new(),
            classes: Vec::new(),
            enums: Vec::new(),
            functions: Vec::new(),
        });
        let inner = scope.in_namespace(&ir.name);

        for class in &ir.classes {
            let class_id = self.build_class(class, &inner)?;
            self.model.namespaces[id.index()].classes.push(class_id);
        }
        for en in &ir.enums {
            let enum_id = self.build_enum(en, &inner)?;
            self.model.namespaces[id.index()].enums.push(enum_id);
        }
        for ns in &ir.namespaces {
            let ns_id = self.build_namespace(ns, &inner)?;
            self.model.namespaces[id.index()].namespaces.push(ns_id);
        }
        for function in &ir.functions {
            let fn_id = self.build_function(function, &inner)?;
            self.model.namespaces[id.index()].functions.push(fn_id);
        }
        Ok(id)
    }

    fn build_class(&mut self, ir: &IrClass, scope: &Scope) -> Result<ClassId> {
        let name = self.name_of(scope, &ir.name)?;
        let kind = ir.kind.ok_or_else(|| Error::InvalidInput {
            entity: name.dotted(),
            message: "class node carries no declaration kind".to_string(),
        })?;

        // Reserve the arena slot first so the flattened input order is
        // pre-order: containers ahead of the classes nested in them.
        let id = ClassId::from(self.model.classes.len());
        self.model.classes.push(Class {
            name: name.clone(),
            kind,
            file: scope.file,
            namespace_chain: scope.namespaces.clone(),
            base_name: None,
            base: None,
            annotations: resolve_passthrough(&ir.annotation),
            fields: Vec::new(),
            methods: Vec::new(),
            classes: Vec::new(),
            enums: Vec::new(),
            order: None,
        });
        trace!(class = %name, "class entity");

        if let Some(base) = &ir.base {
            self.model.classes[id.index()].base_name = Some(base.name.clone());
            if let Some(source_file) = &base.source_file
                && *source_file != self.model.files[scope.file.index()].name
            {
                self.model.files[scope.file.index()]
                    .header_includes
                    .insert(source_file.clone());
            }
        }

        let inner = scope.in_class(&ir.name);
        for nested in &ir.classes {
            let nested_id = self.build_class(nested, &inner)?;
            self.model.classes[id.index()].classes.push(nested_id);
        }
        for en in &ir.enums {
            let enum_id = self.build_enum(en, &inner)?;
            self.model.classes[id.index()].enums.push(enum_id);
        }

        for field in &ir.fields {
            let built = self.build_field(field, &name, scope.file)?;
            self.model.classes[id.index()].fields.push(built);
        }
        for method in &ir.methods {
            let built = self.build_method(method, &name, &ir.name)?;
            self.model.classes[id.index()].methods.push(built);
        }

        let (model, ext) = (&mut self.model, &mut self.ext);
        ext.class_built(
            id,
            &model.classes[id.index()],
            &mut model.files[scope.file.index()],
        );
        Ok(id)
    }

    fn build_field(&mut self, ir: &IrField, owner: &Path, file: FileId) -> Result<Field> {
        let entity = owner.append(&ir.name).dotted();
        let resolved = resolve_field(&entity, ir)?;
        if resolved.needs_limits {
            self.model.files[file.index()]
                .source_includes
                .insert(LIMITS_INCLUDE.to_string());
        }
        Ok(Field {
            source_name: ir.name.clone(),
            id: resolved.id,
            name: resolved.name,
            kind: resolved.kind,
            type_name: ir.type_ref.name.clone(),
            qualifier: ir.qualifier,
            value_type: None,
            default_value: resolved.default_value,
            annotations: resolved.annotations,
        })
    }

    fn build_method(&mut self, ir: &IrMethod, owner: &Path, owner_source: &str) -> Result<Method> {
        let entity = owner.append(&ir.name).dotted();
        let resolved = resolve_method(&entity, owner_source, ir)?;
        Ok(Method {
            source_name: ir.name.clone(),
            name: resolved.name,
            arguments: resolved.arguments,
            return_type: resolved.return_type,
            signature: resolved.signature,
            descriptor: resolved.descriptor,
            annotations: resolved.annotations,
        })
    }

    fn build_enum(&mut self, ir: &IrEnum, scope: &Scope) -> Result<EnumId> {
        let name = self.name_of(scope, &ir.name)?;
        let id = EnumId::from(self.model.enums.len());
        self.model.enums.push(Enum {
            name,
            file: scope.file,
            namespace_chain: scope.namespaces.clone(),
            items: resolve_enum_items(ir),
            annotations: resolve_passthrough(&ir.annotation),
        });

        let (model, ext) = (&mut self.model, &mut self.ext);
        ext.enum_built(
            id,
            &model.enums[id.index()],
            &mut model.files[scope.file.index()],
        );
        Ok(id)
    }

    fn build_function(&mut self, ir: &IrFunction, scope: &Scope) -> Result<FunctionId> {
        let name = self.name_of(scope, &ir.name)?;
        let id = FunctionId::from(self.model.functions.len());
        self.model.functions.push(Function {
            name,
            file: scope.file,
            namespace_chain: scope.namespaces.clone(),
            arguments: resolve_arguments(&ir.arguments),
            return_type: ir.return_type.name.clone(),
            annotations: resolve_passthrough(&ir.annotation),
        });

        let (model, ext) = (&mut self.model, &mut self.ext);
        ext.function_built(
            id,
            &model.functions[id.index()],
            &mut model.files[scope.file.index()],
        );
        Ok(id)
    }
}
