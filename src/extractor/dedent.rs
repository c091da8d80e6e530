use once_cell::sync::Lazy;
use regex::Regex;

/// A flush first line followed by a line indented by two or more spaces.
static FIRST_LINE_FLUSH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^ ][^\n]+\r?\n+( {2,})").unwrap());

/// Normalize raw doc text.
///
/// The text is trimmed, then the common leading whitespace of its lines is removed. Doc
/// comments usually open flush with their delimiter while the following lines are indented,
/// so when the first line has no indent but the next line has two or more spaces, the first
/// line is treated as carrying that same indent.
///
/// Missing doc text yields an empty string.
pub fn dedent(raw: Option<&str>) -> String {
    let doc = raw.unwrap_or("").trim();

    match FIRST_LINE_FLUSH.captures(doc) {
        Some(caps) => remove_common_indent(&format!("{}{}", &caps[1], doc)),
        None => remove_common_indent(doc),
    }
}

/// Remove the longest whitespace prefix shared by every non-blank line.
///
/// Whitespace-only lines are emptied and do not take part in computing the margin.
fn remove_common_indent(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();

    let margin = lines
        .iter()
        .copied()
        .filter(|line| !is_blank(line))
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    lines
        .iter()
        .map(|&line| if is_blank(line) { "" } else { &line[margin.len()..] })
        .collect::<Vec<_>>()
        .join("\n")
}

fn is_blank(line: &str) -> bool {
    line.chars().all(|c| c == ' ' || c == '\t')
}

fn leading_whitespace(line: &str) -> &str {
    let end = line
        .find(|c: char| c != ' ' && c != '\t')
        .unwrap_or(line.len());
    &line[..end]
}

fn common_prefix<'a>(a: &'a str, b: &'a str) -> &'a str {
    let len = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    &a[..len]
}
