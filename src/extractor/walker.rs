use super::{class_display_name, dedent, exported_members, DocClass, DocFunction, DocModule};
use crate::reflect::{Namespace, Object, ObjectId};
use log::debug;
use std::collections::HashSet;
use std::path::Path;

/// Recursive walker that turns a reflective namespace into a documentation tree.
///
/// One `Extractor` performs one walk. The `seen` set is shared by the whole walk rather than
/// per subtree, so an object reachable through several import paths is documented once, at
/// the first place it is reached, and circular imports terminate.
pub struct Extractor<'a> {
    namespace: &'a Namespace,
    seen: HashSet<ObjectId>,
}

impl<'a> Extractor<'a> {
    pub fn new(namespace: &'a Namespace) -> Self {
        Self::with_seen(namespace, HashSet::new())
    }

    /// Start a walk with objects that must not be documented again.
    pub fn with_seen(namespace: &'a Namespace, seen: HashSet<ObjectId>) -> Self {
        Self { namespace, seen }
    }

    /// Objects visited so far.
    pub fn seen(&self) -> &HashSet<ObjectId> {
        &self.seen
    }

    /// Build the tree for a root module.
    ///
    /// The root is always documented, whatever its computed visibility. Returns `None` if
    /// `root` does not name a module.
    pub fn extract(&mut self, root: &ObjectId) -> Option<DocModule> {
        self.seen.insert(root.clone());
        let mut tree = self.build_module(root)?;
        tree.should_document = true;
        Some(tree)
    }

    /// Build a module node and, recursively, everything it documents.
    pub fn build_module(&mut self, id: &ObjectId) -> Option<DocModule> {
        let namespace = self.namespace;
        let module = namespace.module(id)?;
        debug!("Walking module {}", module.name);

        let parent_dir = module.file.as_deref().and_then(Path::parent);
        let mut classes = Vec::new();
        let mut modules = Vec::new();
        let mut functions = Vec::new();

        for (name, target) in exported_members(&module.members, module.all.as_deref()) {
            if self.seen.contains(target) {
                debug!("{}.{}: already documented", module.name, name);
                continue;
            }

            match namespace.get(target) {
                Some(Object::Class(class)) if class.module.as_deref() == Some(module.name.as_str()) => {
                    self.seen.insert(target.clone());
                    classes.extend(self.build_class(target, name));
                }
                Some(Object::Function(function))
                    if function.module.as_deref() == Some(module.name.as_str())
                        && function.doc.as_deref().is_some_and(|d| !d.is_empty()) =>
                {
                    self.seen.insert(target.clone());
                    functions.extend(self.build_function(target, format!("{}.{}", module.name, name)));
                }
                Some(Object::Module(child)) if is_nested(parent_dir, child.file.as_deref()) => {
                    self.seen.insert(target.clone());
                    modules.extend(self.build_module(target));
                }
                Some(_) => {}
                None => debug!("{}.{}: no object {}", module.name, name, target),
            }
        }

        let doc = dedent(module.doc.as_deref());
        let computed = !doc.is_empty()
            || classes.iter().any(|c: &DocClass| c.should_document)
            || modules.iter().any(|m: &DocModule| m.should_document)
            || !functions.is_empty();

        Some(DocModule {
            name: module.name.clone(),
            doc,
            file: module.file.clone(),
            classes,
            modules,
            functions,
            should_document: module.autodoc.unwrap_or(computed),
        })
    }

    /// Build a class node with its methods.
    ///
    /// Every function member that passes the export policy becomes a method; undocumented
    /// ones are kept but flagged invisible.
    pub fn build_class(&self, id: &ObjectId, name: &str) -> Option<DocClass> {
        let class = self.namespace.class(id)?;

        let methods: Vec<DocFunction> = exported_members(&class.members, class.all.as_deref())
            .into_iter()
            .filter_map(|(member, target)| self.build_function(target, format!("{}.{}", name, member)))
            .collect();

        let doc = dedent(class.doc.as_deref());
        let computed = !doc.is_empty() || methods.iter().any(|m| m.should_document);

        Some(DocClass {
            name: name.to_string(),
            display_name: class_display_name(self.namespace, class, name),
            doc,
            methods,
            should_document: class.autodoc.unwrap_or(computed),
        })
    }

    /// Build a function node. Functions without doc text are never documented.
    pub fn build_function(&self, id: &ObjectId, path: String) -> Option<DocFunction> {
        let function = self.namespace.function(id)?;
        let doc = dedent(function.doc.as_deref());
        let should_document = function.autodoc.unwrap_or(true) && !doc.is_empty();
        if !should_document {
            debug!("{}: not documented", path);
        }

        Some(DocFunction {
            path,
            name: function.name.clone(),
            doc,
            signature: function.signature.clone(),
            should_document,
        })
    }
}

/// Whether `child` lives strictly below `parent_dir`.
fn is_nested(parent_dir: Option<&Path>, child: Option<&Path>) -> bool {
    match (parent_dir, child) {
        (Some(dir), Some(file)) => file != dir && file.starts_with(dir),
        _ => false,
    }
}
