//! Introspection object model.
//!
//! A [`Namespace`] is a snapshot of a host runtime's reflective object graph: every module,
//! class, function and plain value reachable from a module is recorded once under a stable
//! [`ObjectId`], and attribute references between objects are stored as ids. Identity
//! comparisons during the documentation walk are therefore id comparisons, which is what lets
//! the extractor detect cycles and diamond references.
//!
//! Snapshots are produced by the host language's reflection facility and deserialized with
//! serde (see [`crate::loader`]).

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Id of the marker base class that generic classes inherit from.
///
/// It carries no information beyond the type parameters, so it is left out of class display names.
pub const GENERIC_BASE: &str = "typing.Generic";

/// Identity of a reflective object within one [`Namespace`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The last dotted segment of the id, used when the object itself is not in the snapshot.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A complete introspection snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Namespace {
    /// All objects in the graph, keyed by identity
    #[serde(default)]
    pub objects: BTreeMap<ObjectId, Object>,
}

/// A reflective object.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Object {
    Module(ModuleObject),
    Class(ClassObject),
    Function(FunctionObject),
    /// Anything else: constants, instances, objects without reflective metadata
    Value(ValueObject),
}

/// A named attribute of a module or class, in the order the host reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub name: String,
    pub target: ObjectId,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleObject {
    /// Dotted module name (e.g. `pkg.sub`)
    pub name: String,
    /// Raw docstring
    pub doc: Option<String>,
    /// Source file the module was loaded from
    pub file: Option<PathBuf>,
    /// Explicit export list
    pub all: Option<Vec<String>>,
    /// Visibility override
    pub autodoc: Option<bool>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassObject {
    pub name: String,
    /// Name of the module the class was defined in
    pub module: Option<String>,
    pub doc: Option<String>,
    /// Direct base classes, in declaration order
    pub bases: Vec<ObjectId>,
    pub type_params: Vec<TypeParam>,
    pub all: Option<Vec<String>>,
    pub autodoc: Option<bool>,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionObject {
    pub name: String,
    /// Name of the module the function was defined in
    pub module: Option<String>,
    pub doc: Option<String>,
    pub signature: Signature,
    pub autodoc: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueObject {
    pub type_name: Option<String>,
}

/// A type parameter declared by a generic class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeParam {
    pub name: String,
    pub bound: Option<TypeBound>,
}

/// Upper bound of a type parameter.
///
/// `name` is set once the bound resolves to a concrete type; until then only the textual
/// forward reference is known.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeBound {
    pub name: Option<String>,
    pub forward_arg: Option<String>,
}

impl TypeBound {
    /// Concrete type name if resolved, forward-reference text otherwise.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.forward_arg.as_deref())
            .unwrap_or("")
    }
}

/// Structural signature of a callable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Signature {
    pub parameters: Vec<Parameter>,
    pub return_annotation: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    /// Textual representation of the default value
    pub default: Option<String>,
    pub annotation: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    PositionalOnly,
    #[default]
    PositionalOrKeyword,
    VarPositional,
    KeywordOnly,
    VarKeyword,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default: None,
            annotation: None,
        }
    }

    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParameterKind::VarPositional => f.write_str("*")?,
            ParameterKind::VarKeyword => f.write_str("**")?,
            _ => {}
        }
        f.write_str(&self.name)?;
        if let Some(annotation) = &self.annotation {
            write!(f, ": {}", annotation)?;
        }
        if let Some(default) = &self.default {
            if self.annotation.is_some() {
                write!(f, " = {}", default)?;
            } else {
                write!(f, "={}", default)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(self.parameters.len() + 2);
        let mut pending_positional_separator = false;
        let mut keyword_separator_needed = true;

        for param in &self.parameters {
            if param.kind == ParameterKind::PositionalOnly {
                pending_positional_separator = true;
            } else if pending_positional_separator {
                parts.push("/".to_string());
                pending_positional_separator = false;
            }

            if param.kind == ParameterKind::VarPositional {
                keyword_separator_needed = false;
            } else if param.kind == ParameterKind::KeywordOnly && keyword_separator_needed {
                parts.push("*".to_string());
                keyword_separator_needed = false;
            }

            parts.push(param.to_string());
        }
        if pending_positional_separator {
            parts.push("/".to_string());
        }

        write!(f, "({})", parts.join(", "))?;
        if let Some(ret) = &self.return_annotation {
            write!(f, " -> {}", ret)?;
        }
        Ok(())
    }
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a snapshot from JSON text.
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Decode a snapshot from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn insert(&mut self, id: impl Into<ObjectId>, object: Object) {
        self.objects.insert(id.into(), object);
    }

    pub fn get(&self, id: &ObjectId) -> Option<&Object> {
        self.objects.get(id)
    }

    pub fn module(&self, id: &ObjectId) -> Option<&ModuleObject> {
        match self.objects.get(id)? {
            Object::Module(module) => Some(module),
            _ => None,
        }
    }

    pub fn class(&self, id: &ObjectId) -> Option<&ClassObject> {
        match self.objects.get(id)? {
            Object::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn function(&self, id: &ObjectId) -> Option<&FunctionObject> {
        match self.objects.get(id)? {
            Object::Function(function) => Some(function),
            _ => None,
        }
    }

    /// Find the module object with the given dotted name.
    pub fn find_module(&self, name: &str) -> Option<&ObjectId> {
        self.objects.iter().find_map(|(id, object)| match object {
            Object::Module(module) if module.name == name => Some(id),
            _ => None,
        })
    }

    /// Name of a class referenced by id, falling back to the id's last segment
    /// for classes the snapshot does not include (builtins, third-party bases).
    pub fn class_name<'a>(&'a self, id: &'a ObjectId) -> &'a str {
        match self.class(id) {
            Some(class) => &class.name,
            None => id.short_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, kind: ParameterKind) -> Parameter {
        Parameter::new(name, kind)
    }

    #[test]
    fn test_signature_plain_and_default() {
        let sig = Signature {
            parameters: vec![
                param("arg", ParameterKind::PositionalOrKeyword),
                param("kw1", ParameterKind::PositionalOrKeyword).with_default("None"),
            ],
            return_annotation: None,
        };
        assert_eq!(sig.to_string(), "(arg, kw1=None)");
    }

    #[test]
    fn test_signature_empty() {
        assert_eq!(Signature::default().to_string(), "()");
    }

    #[test]
    fn test_signature_separators() {
        let sig = Signature {
            parameters: vec![
                param("a", ParameterKind::PositionalOnly),
                param("b", ParameterKind::PositionalOrKeyword),
                param("c", ParameterKind::KeywordOnly),
                param("kw", ParameterKind::VarKeyword),
            ],
            return_annotation: None,
        };
        assert_eq!(sig.to_string(), "(a, /, b, *, c, **kw)");
    }

    #[test]
    fn test_signature_trailing_positional_separator() {
        let sig = Signature {
            parameters: vec![param("a", ParameterKind::PositionalOnly)],
            return_annotation: None,
        };
        assert_eq!(sig.to_string(), "(a, /)");
    }

    #[test]
    fn test_signature_varargs_suppresses_bare_star() {
        let sig = Signature {
            parameters: vec![
                param("args", ParameterKind::VarPositional),
                param("flag", ParameterKind::KeywordOnly).with_default("False"),
            ],
            return_annotation: None,
        };
        assert_eq!(sig.to_string(), "(*args, flag=False)");
    }

    #[test]
    fn test_signature_annotations() {
        let sig = Signature {
            parameters: vec![
                param("self", ParameterKind::PositionalOrKeyword),
                param("limit", ParameterKind::PositionalOrKeyword)
                    .with_annotation("int")
                    .with_default("10"),
            ],
            return_annotation: Some("T1".to_string()),
        };
        assert_eq!(sig.to_string(), "(self, limit: int = 10) -> T1");
    }

    #[test]
    fn test_type_bound_prefers_concrete_name() {
        let bound = TypeBound {
            name: Some("int".to_string()),
            forward_arg: Some("Other".to_string()),
        };
        assert_eq!(bound.display_name(), "int");

        let forward = TypeBound {
            name: None,
            forward_arg: Some("Node".to_string()),
        };
        assert_eq!(forward.display_name(), "Node");

        assert_eq!(TypeBound::default().display_name(), "");
    }

    #[test]
    fn test_deserialize_snapshot() {
        let json = r#"{
            "objects": {
                "pkg": {"kind": "module", "name": "pkg", "doc": "Top",
                        "members": [{"name": "Foo", "target": "pkg.Foo"}]},
                "pkg.Foo": {"kind": "class", "name": "Foo", "module": "pkg",
                            "bases": ["typing.Generic"],
                            "type_params": [{"name": "T", "bound": {"forward_arg": "int"}}]},
                "pkg.f": {"kind": "function", "name": "f",
                          "signature": {"parameters": [{"name": "x", "kind": "keyword_only"}]}},
                "pkg.X": {"kind": "value"}
            }
        }"#;
        let ns = Namespace::from_json_str(json).unwrap();
        assert_eq!(ns.objects.len(), 4);

        let module = ns.module(&ObjectId::from("pkg")).unwrap();
        assert_eq!(module.doc.as_deref(), Some("Top"));
        assert_eq!(module.members[0].target, ObjectId::from("pkg.Foo"));
        assert!(module.autodoc.is_none());

        let class = ns.class(&ObjectId::from("pkg.Foo")).unwrap();
        assert_eq!(class.type_params[0].bound.as_ref().unwrap().display_name(), "int");

        let function = ns.function(&ObjectId::from("pkg.f")).unwrap();
        assert_eq!(function.signature.parameters[0].kind, ParameterKind::KeywordOnly);
        assert!(matches!(ns.get(&ObjectId::from("pkg.X")), Some(Object::Value(_))));
    }

    #[test]
    fn test_deserialize_yaml_snapshot() {
        let yaml = "objects:\n  m:\n    kind: module\n    name: m\n    autodoc: false\n";
        let ns = Namespace::from_yaml_str(yaml).unwrap();
        assert_eq!(ns.module(&ObjectId::from("m")).unwrap().autodoc, Some(false));
    }

    #[test]
    fn test_find_module_and_class_name_fallback() {
        let mut ns = Namespace::new();
        ns.insert(
            "pkg.sub",
            Object::Module(ModuleObject {
                name: "pkg.sub".to_string(),
                ..Default::default()
            }),
        );
        ns.insert(
            "pkg.sub.Base",
            Object::Class(ClassObject {
                name: "Base".to_string(),
                ..Default::default()
            }),
        );

        assert_eq!(ns.find_module("pkg.sub"), Some(&ObjectId::from("pkg.sub")));
        assert!(ns.find_module("pkg").is_none());

        let base = ObjectId::from("pkg.sub.Base");
        let missing = ObjectId::from("builtins.object");
        assert_eq!(ns.class_name(&base), "Base");
        assert_eq!(ns.class_name(&missing), "object");
    }
}
