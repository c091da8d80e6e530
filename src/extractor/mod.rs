//! Documentation tree extraction.
//!
//! The extractor walks a module's reflective namespace and builds an in-memory documentation
//! tree: [`DocModule`] nodes owning [`DocClass`] and [`DocFunction`] children. Visibility is
//! decided here, once, and recorded in each node's `should_document` flag; the renderer trusts
//! those flags.
//!
//! # Example
//!
//! ```no_run
//! use docmd::extractor::Extractor;
//! use docmd::importer::import_module;
//! use std::path::Path;
//!
//! let imported = import_module(Path::new("snapshots"), "pkg").unwrap();
//! let tree = Extractor::new(&imported.namespace).extract(&imported.id).unwrap();
//! println!("{} has {} classes", tree.name, tree.classes.len());
//! ```

pub mod dedent;
pub mod display;
pub mod walker;

pub use dedent::dedent;
pub use display::class_display_name;
pub use walker::Extractor;

use crate::reflect::{Member, ObjectId, Signature};
use std::path::PathBuf;

/// Member name that is documented even though it starts with an underscore.
pub const CONSTRUCTOR_NAME: &str = "__init__";

/// A documented module.
#[derive(Debug, Clone, PartialEq)]
pub struct DocModule {
    /// Dotted module name (e.g. `pkg.sub`)
    pub name: String,
    /// Dedented docstring, empty if absent
    pub doc: String,
    /// Source file, used for source links
    pub file: Option<PathBuf>,
    /// Classes defined in this module, sorted by name
    pub classes: Vec<DocClass>,
    /// Submodules physically nested under this module's directory
    pub modules: Vec<DocModule>,
    /// Documented functions defined in this module, sorted by name
    pub functions: Vec<DocFunction>,
    pub should_document: bool,
}

/// A documented class.
#[derive(Debug, Clone, PartialEq)]
pub struct DocClass {
    /// Attribute name within the owning module
    pub name: String,
    /// Name decorated with base classes and type parameters (e.g. `Typed [T=int]`)
    pub display_name: String,
    pub doc: String,
    /// Methods, sorted by name
    pub methods: Vec<DocFunction>,
    pub should_document: bool,
}

/// A documented function or method.
#[derive(Debug, Clone, PartialEq)]
pub struct DocFunction {
    /// Owning entity path plus name (e.g. `pkg.helper` or `Foo.meth`)
    pub path: String,
    pub name: String,
    pub doc: String,
    pub signature: Signature,
    pub should_document: bool,
}

impl DocModule {
    /// Child modules that will be rendered.
    pub fn documented_modules(&self) -> impl Iterator<Item = &DocModule> {
        self.modules.iter().filter(|m| m.should_document)
    }

    /// Functions that will be rendered.
    pub fn documented_functions(&self) -> impl Iterator<Item = &DocFunction> {
        self.functions.iter().filter(|f| f.should_document)
    }
}

impl DocClass {
    /// Methods that will be rendered.
    pub fn documented_methods(&self) -> impl Iterator<Item = &DocFunction> {
        self.methods.iter().filter(|f| f.should_document)
    }
}

/// Candidate members of a module or class, in documentation order.
///
/// With a non-empty export list, exactly the exported names that resolve to a member are
/// candidates, underscores or not. Otherwise every member not starting with `_` is a candidate,
/// plus the constructor. Candidates are sorted by name either way.
pub fn exported_members<'a>(
    members: &'a [Member],
    exports: Option<&'a [String]>,
) -> Vec<(&'a str, &'a ObjectId)> {
    let mut candidates: Vec<(&str, &ObjectId)> = match exports {
        Some(exports) if !exports.is_empty() => exports
            .iter()
            .filter_map(|export| {
                members
                    .iter()
                    .find(|m| &m.name == export)
                    .map(|m| (m.name.as_str(), &m.target))
            })
            .collect(),
        _ => members
            .iter()
            .filter(|m| !m.name.starts_with('_') || m.name == CONSTRUCTOR_NAME)
            .map(|m| (m.name.as_str(), &m.target))
            .collect(),
    };

    candidates.sort_by(|a, b| a.0.cmp(b.0));
    candidates.dedup_by(|a, b| a.0 == b.0);
    candidates
}
