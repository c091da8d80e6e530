//! Markdown rendering of documentation trees.
//!
//! The renderer walks a [`DocModule`] tree produced by the extractor and writes Markdown,
//! either as one contiguous stream or as one file per module. It trusts the tree's
//! `should_document` flags and checks them on every child before descending.
//!
//! Identifiers and signatures are escaped with [`escape_md`]; doc text is written verbatim.

use crate::error::Result;
use crate::extractor::{DocClass, DocFunction, DocModule};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Component, Path, PathBuf};

/// Separator substituted for dots in anchors and file names.
const NAME_SEPARATOR: &str = "_";
/// Extension of files written in multi-file mode.
const FILE_EXTENSION: &str = "md";

/// How links between modules are written. Fixed by the output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkStyle {
    /// In-page anchors, for single-stream output (`#pkg_sub`)
    Anchor,
    /// Sibling file names, for multi-file output (`pkg_sub.md`)
    File,
}

/// Escape Markdown emphasis characters in an identifier.
pub fn escape_md(text: &str) -> String {
    text.replace('_', "\\_")
}

/// Output file name for a module in multi-file mode.
pub fn module_file_name(module_name: &str) -> String {
    format!(
        "{}.{}",
        module_name.replace('.', NAME_SEPARATOR),
        FILE_EXTENSION
    )
}

/// In-page anchor for a module in single-stream mode.
pub fn module_anchor(module_name: &str) -> String {
    format!("#{}", module_name.replace('.', NAME_SEPARATOR))
}

/// Markdown renderer for documentation trees.
pub struct MarkdownRenderer {
    /// Base URL for source links, trailing slashes removed
    source_url: Option<String>,
    /// Directory source links are made relative to
    source_root: Option<PathBuf>,
}

impl MarkdownRenderer {
    /// Creates a renderer.
    ///
    /// Source links are emitted only when both `source_url` and `source_root` are known.
    pub fn new(source_url: Option<String>, source_root: Option<PathBuf>) -> Self {
        Self {
            source_url: source_url.map(|url| url.trim_end_matches('/').to_string()),
            source_root,
        }
    }

    /// Render a module and all its documented descendants, in pre-order, to one sink.
    ///
    /// Modules link to each other through in-page anchors. A module's classes and functions
    /// follow the sections of its child modules.
    pub fn render_to_stream(&self, module: &DocModule, out: &mut dyn Write) -> Result<()> {
        if !module.should_document {
            return Ok(());
        }
        debug!("Rendering {}", module.name);

        self.write_header(out, module, LinkStyle::Anchor)?;
        self.write_source_link(out, module)?;

        for child in module.documented_modules() {
            self.render_to_stream(child, out)?;
        }

        self.write_members(out, module)?;
        Ok(())
    }

    /// Render a module into its own file in `dir`, children first into theirs.
    ///
    /// Modules link to each other by file name. The module's file stays open while its
    /// children are written, so that it can list links to them once they exist.
    pub fn render_to_dir(&self, module: &DocModule, dir: &Path) -> Result<()> {
        if !module.should_document {
            return Ok(());
        }

        let path = dir.join(module_file_name(&module.name));
        debug!("Rendering {} to {}", module.name, path.display());
        let mut file = BufWriter::new(File::create(&path)?);

        self.write_header(&mut file, module, LinkStyle::File)?;
        self.write_source_link(&mut file, module)?;

        for child in module.documented_modules() {
            self.render_to_dir(child, dir)?;
            writeln!(
                file,
                " - [{}]({})",
                escape_md(&child.name),
                module_file_name(&child.name)
            )?;
        }

        self.write_members(&mut file, module)?;
        file.flush()?;
        Ok(())
    }

    fn write_header(
        &self,
        out: &mut dyn Write,
        module: &DocModule,
        link_style: LinkStyle,
    ) -> io::Result<()> {
        match module.name.rsplit_once('.') {
            Some((parent, child)) => writeln!(
                out,
                "# [{}]({}).{}",
                escape_md(parent),
                module_link(parent, link_style),
                escape_md(child)
            )?,
            None => writeln!(out, "# {}", escape_md(&module.name))?,
        }

        if module.doc.is_empty() {
            warn!("no docstring for: {}", module.name);
        } else {
            writeln!(out, "{}", module.doc)?;
        }
        writeln!(out, "\n")
    }

    fn write_source_link(&self, out: &mut dyn Write, module: &DocModule) -> io::Result<()> {
        let (Some(url), Some(root)) = (&self.source_url, &self.source_root) else {
            return Ok(());
        };
        let Some(file) = &module.file else {
            debug!("{} has no source file, skipping source link", module.name);
            return Ok(());
        };

        match relative_url_path(file, root) {
            Some(rel) => writeln!(out, "[(view source)]({}/{})", url, rel),
            None => {
                debug!(
                    "{} is outside {}, skipping source link",
                    file.display(),
                    root.display()
                );
                Ok(())
            }
        }
    }

    fn write_members(&self, out: &mut dyn Write, module: &DocModule) -> io::Result<()> {
        for class in module.classes.iter().filter(|c| c.should_document) {
            write_class(out, class)?;
        }

        let mut functions = module.documented_functions().peekable();
        if functions.peek().is_some() {
            writeln!(out, "## Functions:\n")?;
            for function in functions {
                write_function(out, function)?;
            }
        }
        Ok(())
    }
}

fn module_link(module_name: &str, link_style: LinkStyle) -> String {
    match link_style {
        LinkStyle::Anchor => module_anchor(module_name),
        LinkStyle::File => module_file_name(module_name),
    }
}

/// A class with neither doc text nor documented methods produces nothing.
fn write_class(out: &mut dyn Write, class: &DocClass) -> io::Result<()> {
    let mut methods = class.documented_methods().peekable();
    if class.doc.is_empty() && methods.peek().is_none() {
        return Ok(());
    }

    writeln!(out, "## {}", escape_md(&class.display_name))?;
    if !class.doc.is_empty() {
        writeln!(out, "{}", class.doc)?;
        writeln!(out, "\n")?;
    }
    for method in methods {
        write_function(out, method)?;
    }
    writeln!(out)
}

fn write_function(out: &mut dyn Write, function: &DocFunction) -> io::Result<()> {
    debug!("Rendering {}", function.path);
    writeln!(
        out,
        "#### {}{}",
        escape_md(&format!(".{}", function.name)),
        escape_md(&function.signature.to_string())
    )?;
    writeln!(out, "{}", function.doc)?;
    writeln!(out)
}

/// `file` relative to `root`, joined with `/` for use in a URL.
fn relative_url_path(file: &Path, root: &Path) -> Option<String> {
    let rel = file.strip_prefix(root).ok()?;
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::{Parameter, ParameterKind, Signature};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn function(name: &str, doc: &str) -> DocFunction {
        DocFunction {
            path: name.to_string(),
            name: name.to_string(),
            doc: doc.to_string(),
            signature: Signature::default(),
            should_document: !doc.is_empty(),
        }
    }

    fn module(name: &str, doc: &str) -> DocModule {
        DocModule {
            name: name.to_string(),
            doc: doc.to_string(),
            file: None,
            classes: Vec::new(),
            modules: Vec::new(),
            functions: Vec::new(),
            should_document: true,
        }
    }

    fn render(renderer: &MarkdownRenderer, module: &DocModule) -> String {
        let mut out = Vec::new();
        renderer.render_to_stream(module, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_escape_md() {
        assert_eq!(escape_md("meth_1(kw_1=None)"), "meth\\_1(kw\\_1=None)");
        assert_eq!(escape_md("plain"), "plain");
    }

    #[test]
    fn test_module_names_to_links() {
        assert_eq!(module_file_name("pkg.sub.leaf"), "pkg_sub_leaf.md");
        assert_eq!(module_anchor("pkg.sub"), "#pkg_sub");
    }

    #[test]
    fn test_render_class_and_functions_layout() {
        let mut m = module("foo_mod", "Module doc");
        m.classes.push(DocClass {
            name: "Foo".to_string(),
            display_name: "Foo".to_string(),
            doc: "Class doc".to_string(),
            methods: vec![DocFunction {
                signature: Signature {
                    parameters: vec![
                        Parameter::new("arg", ParameterKind::PositionalOrKeyword),
                        Parameter::new("kw_1", ParameterKind::PositionalOrKeyword)
                            .with_default("None"),
                    ],
                    return_annotation: None,
                },
                ..function("meth_1", "Method doc")
            }],
            should_document: true,
        });
        m.functions.push(function("helper", "Helps"));

        let renderer = MarkdownRenderer::new(None, None);

        let expected = "# foo\\_mod\n\
                        Module doc\n\
                        \n\n\
                        ## Foo\n\
                        Class doc\n\
                        \n\n\
                        #### .meth\\_1(arg, kw\\_1=None)\n\
                        Method doc\n\
                        \n\
                        \n\
                        ## Functions:\n\
                        \n\
                        #### .helper()\n\
                        Helps\n\
                        \n";
        assert_eq!(render(&renderer, &m), expected);
    }

    #[test]
    fn test_missing_doc_has_no_placeholder() {
        let m = module("bare", "");
        let renderer = MarkdownRenderer::new(None, None);
        assert_eq!(render(&renderer, &m), "# bare\n\n\n");
    }

    #[test]
    fn test_hidden_entities_not_rendered() {
        let mut m = module("m", "doc");
        m.modules.push(DocModule {
            should_document: false,
            ..module("m.secret_child", "child doc")
        });
        m.classes.push(DocClass {
            name: "Hidden".to_string(),
            display_name: "Hidden".to_string(),
            doc: "hidden doc".to_string(),
            methods: Vec::new(),
            should_document: false,
        });
        m.classes.push(DocClass {
            name: "Empty".to_string(),
            display_name: "Empty".to_string(),
            doc: String::new(),
            methods: vec![function("quiet", "")],
            should_document: true,
        });
        m.functions.push(DocFunction {
            should_document: false,
            ..function("off", "off doc")
        });

        let renderer = MarkdownRenderer::new(None, None);
        let out = render(&renderer, &m);

        assert!(!out.contains("secret"));
        assert!(!out.contains("Hidden"));
        assert!(!out.contains("Empty"));
        assert!(!out.contains("quiet"));
        assert!(!out.contains("off"));
        assert!(!out.contains("Functions"));
    }

    #[test]
    fn test_nested_heading_uses_anchor() {
        let mut m = module("pkg", "top");
        m.modules.push(module("pkg.sub_mod", "nested"));

        let renderer = MarkdownRenderer::new(None, None);
        let out = render(&renderer, &m);

        assert!(out.contains("# [pkg](#pkg).sub\\_mod\nnested\n"));
        assert!(out.find("# pkg").unwrap() < out.find("nested").unwrap());
    }

    #[test]
    fn test_source_link() {
        let mut m = module("pkg", "top");
        m.file = Some(PathBuf::from("/src/pkg/__init__.py"));
        let mut sub = module("pkg.util", "util");
        sub.file = Some(PathBuf::from("/src/pkg/util/helpers.py"));
        m.modules.push(sub);

        let renderer = MarkdownRenderer::new(
            Some("https://example.com/repo//".to_string()),
            Some(PathBuf::from("/src/pkg")),
        );
        let out = render(&renderer, &m);

        assert!(out.contains("[(view source)](https://example.com/repo/__init__.py)\n"));
        assert!(out.contains("[(view source)](https://example.com/repo/util/helpers.py)\n"));
    }

    #[test]
    fn test_no_source_link_without_url() {
        let mut m = module("pkg", "top");
        m.file = Some(PathBuf::from("/src/pkg/__init__.py"));

        let renderer = MarkdownRenderer::new(None, Some(PathBuf::from("/src/pkg")));

        assert!(!render(&renderer, &m).contains("view source"));
    }

    #[test]
    fn test_relative_url_path() {
        let root = Path::new("/src/pkg");
        assert_eq!(
            relative_url_path(Path::new("/src/pkg/a/b.py"), root).as_deref(),
            Some("a/b.py")
        );
        assert_eq!(relative_url_path(Path::new("/elsewhere/b.py"), root), None);
    }

    #[test]
    fn test_render_to_dir_writes_file_per_module() {
        let temp_dir = TempDir::new().unwrap();
        let mut m = module("pkg", "top");
        m.modules.push(module("pkg.child", "child doc"));

        let renderer = MarkdownRenderer::new(None, None);
        renderer.render_to_dir(&m, temp_dir.path()).unwrap();

        let parent = fs::read_to_string(temp_dir.path().join("pkg.md")).unwrap();
        let child = fs::read_to_string(temp_dir.path().join("pkg_child.md")).unwrap();

        assert_eq!(parent, "# pkg\ntop\n\n\n - [pkg.child](pkg_child.md)\n");
        assert!(child.starts_with("# [pkg](pkg.md).child\nchild doc\n"));
    }

    #[test]
    fn test_doc_text_is_not_escaped() {
        let mut m = module("snake_mod", "uses snake_case words");
        m.classes.push(DocClass {
            name: "Snake".to_string(),
            display_name: "Snake".to_string(),
            doc: "holds a snake_case field".to_string(),
            methods: vec![function("shed_skin", "returns the old_skin value")],
            should_document: true,
        });
        m.functions.push(function("make_snake", "builds a new_snake"));

        let out = render(&MarkdownRenderer::new(None, None), &m);

        assert!(out.contains("# snake\\_mod\nuses snake_case words\n"));
        assert!(out.contains("## Snake\nholds a snake_case field\n"));
        assert!(out.contains("#### .shed\\_skin()\nreturns the old_skin value\n"));
        assert!(out.contains("#### .make\\_snake()\nbuilds a new_snake\n"));
        assert!(!out.contains("snake\\_case"));
        assert!(!out.contains("old\\_skin"));
        assert!(!out.contains("new\\_snake"));
    }

    #[test]
    fn test_link_style_follows_output_mode() {
        let temp_dir = TempDir::new().unwrap();
        let mut m = module("pkg", "top");
        m.modules.push(module("pkg.child", "child doc"));

        let renderer = MarkdownRenderer::new(None, None);
        let streamed = render(&renderer, &m);
        renderer.render_to_dir(&m, temp_dir.path()).unwrap();
        let child = fs::read_to_string(temp_dir.path().join("pkg_child.md")).unwrap();

        assert!(streamed.contains("# [pkg](#pkg).child\n"));
        assert!(!streamed.contains("pkg.md"));
        assert!(child.starts_with("# [pkg](pkg.md).child\n"));
        assert!(!child.contains("#pkg"));
    }

    #[test]
    fn test_render_to_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let m = module("pkg", "top");

        let renderer = MarkdownRenderer::new(None, None);
        let result = renderer.render_to_dir(&m, &temp_dir.path().join("absent"));

        assert!(matches!(result, Err(crate::error::Error::IoError(_))));
    }
}
