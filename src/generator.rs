use crate::error::{Error, Result};
use crate::extractor::Extractor;
use crate::reflect::{Namespace, ObjectId};
use crate::renderer::MarkdownRenderer;
use log::{debug, info};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Where generated Markdown goes.
pub enum OutputTarget<'a> {
    /// One `.md` file per module in this directory, created if absent
    Directory(PathBuf),
    /// Every module, in order, to one writer
    Stream(&'a mut dyn Write),
}

/// Documentation generator: extracts a module tree and renders it.
///
/// # Example
///
/// ```no_run
/// use docmd::generator::{DocGenerator, OutputTarget};
/// use docmd::importer::import_module;
/// use std::path::{Path, PathBuf};
///
/// let imported = import_module(Path::new("snapshots"), "pkg").unwrap();
/// let generator = DocGenerator::new(Some("https://github.com/org/pkg/blob/main".to_string()));
/// generator
///     .generate(&imported.namespace, &imported.id, OutputTarget::Directory(PathBuf::from("docs")))
///     .unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocGenerator {
    source_url: Option<String>,
}

impl DocGenerator {
    /// Creates a generator; `source_url` enables "view source" links.
    pub fn new(source_url: Option<String>) -> Self {
        Self { source_url }
    }

    /// Generate Markdown for the module `root` and everything it documents.
    ///
    /// Returns the name of the generated root module, or `None` if the module opts out of
    /// documentation, in which case nothing is written.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` is not a module in `namespace`, or if an output unit cannot
    /// be created or written. Output already written is left in place.
    pub fn generate(
        &self,
        namespace: &Namespace,
        root: &ObjectId,
        target: OutputTarget<'_>,
    ) -> Result<Option<String>> {
        let module = namespace
            .module(root)
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not a module", root)))?;

        if module.autodoc == Some(false) {
            info!("{} is excluded from documentation", module.name);
            return Ok(None);
        }

        let source_root = module
            .file
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf);
        if let Some(source_root) = &source_root {
            debug!("set source path: {}", source_root.display());
        }

        let tree = Extractor::new(namespace)
            .extract(root)
            .ok_or_else(|| Error::InvalidArgument(format!("{} is not a module", root)))?;

        let renderer = MarkdownRenderer::new(self.source_url.clone(), source_root);
        match target {
            OutputTarget::Directory(dir) => {
                fs::create_dir_all(&dir)?;
                renderer.render_to_dir(&tree, &dir)?;
            }
            OutputTarget::Stream(out) => renderer.render_to_stream(&tree, out)?,
        }

        info!("Generated documentation for {}", tree.name);
        Ok(Some(tree.name))
    }
}
