//! docmd - Markdown API documentation from module introspection.
//!
//! This library turns a module's reflective metadata (docstrings, signatures, submodules,
//! class hierarchies and generic type parameters) into Markdown reference documentation.
//! The metadata comes from an introspection snapshot written by the host runtime's
//! reflection facility, so no source text is ever parsed.
//!
//! # Architecture
//!
//! 1. [`scanner`] - Finds snapshot files on a search path
//! 2. [`loader`] - Decodes snapshot files (JSON or YAML) into a [`reflect::Namespace`]
//! 3. [`importer`] - Resolves a dotted module name to its snapshot
//! 4. [`extractor`] - Walks the namespace and builds the documentation tree, deciding what
//!    is documented
//! 5. [`renderer`] - Writes the tree as Markdown, to one stream or one file per module
//! 6. [`generator`] - Ties extraction and rendering together
//!
//! # Example Usage
//!
//! ```no_run
//! use docmd::generator::{DocGenerator, OutputTarget};
//! use docmd::importer::import_module;
//! use std::path::Path;
//!
//! let imported = import_module(Path::new("./snapshots"), "mypkg").unwrap();
//!
//! let mut out = std::io::stdout();
//! DocGenerator::new(None)
//!     .generate(&imported.namespace, &imported.id, OutputTarget::Stream(&mut out))
//!     .unwrap();
//! ```
//!
//! # Command-Line Interface
//!
//! For command-line usage, see the [`cli`] module.

pub mod cli;
pub mod error;
pub mod extractor;
pub mod generator;
pub mod importer;
pub mod loader;
pub mod reflect;
pub mod renderer;
pub mod scanner;
