use crate::reflect::{ClassObject, Namespace, GENERIC_BASE};

/// Build the heading name for a class.
///
/// Base classes other than the generic marker are appended in parentheses, then type
/// parameters in brackets, each shown as `name` or `name=bound`:
///
/// ```text
/// Typed(Base) [T=int,U]
/// ```
///
/// The result is unescaped; the renderer escapes it.
pub fn class_display_name(namespace: &Namespace, class: &ClassObject, name: &str) -> String {
    let mut display = name.to_string();

    let bases: Vec<&str> = class
        .bases
        .iter()
        .filter(|base| base.as_str() != GENERIC_BASE)
        .map(|base| namespace.class_name(base))
        .collect();
    if !bases.is_empty() {
        display.push('(');
        display.push_str(&bases.join(","));
        display.push(')');
    }

    if !class.type_params.is_empty() {
        let params: Vec<String> = class
            .type_params
            .iter()
            .map(|param| match &param.bound {
                Some(bound) => format!("{}={}", param.name, bound.display_name()),
                None => param.name.clone(),
            })
            .collect();
        display.push_str(" [");
        display.push_str(&params.join(","));
        display.push(']');
    }

    display
}
