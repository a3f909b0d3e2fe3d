//! Content transforms applied to fetched component sources.
//!
//! Pure string rewriting; no I/O happens here.

use crate::config::{ProjectConfig, StyleStrategy};

/// Placeholder for the components path alias
pub const ALIAS_COMPONENTS: &str = "__ALIAS_COMPONENTS__";

/// Placeholder for the lib path alias
pub const ALIAS_LIB: &str = "__ALIAS_LIB__";

/// Marker comment for a conditional CSS import line
pub const IMPORT_CSS_MARKER: &str = "// __IMPORT_CSS__";

/// Rewrite placeholders in fetched component content.
///
/// Alias placeholders are substituted globally. Under the tailwind-only
/// strategy every CSS-import marker is stripped from the marker through the
/// end of its line, terminator included; under tailwind+css the content
/// passes through untouched since real import lines are kept verbatim.
pub fn transform_component(content: &str, config: &ProjectConfig) -> String {
    let mut result = content.replace(ALIAS_COMPONENTS, &config.aliases.components);
    result = result.replace(ALIAS_LIB, &config.aliases.lib);

    if config.style.strategy == StyleStrategy::TailwindOnly {
        result = strip_css_markers(&result);
    }

    result
}

fn strip_css_markers(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut rest = content;
    while let Some(pos) = rest.find(IMPORT_CSS_MARKER) {
        out.push_str(&rest[..pos]);
        rest = match rest[pos..].find('\n') {
            Some(nl) => &rest[pos + nl + 1..],
            None => "",
        };
    }
    out.push_str(rest);
    out
}

/// Convert a free-form name to kebab-case.
///
/// A hyphen is inserted at each lower-to-upper boundary, whitespace and
/// underscore runs collapse to a single hyphen, and the result is
/// lowercased. Existing hyphens are kept as-is.
pub fn to_kebab_case(name: &str) -> String {
    let mut hyphenated = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            hyphenated.push('-');
        }
        prev_lower = ch.is_ascii_lowercase();
        hyphenated.push(ch);
    }

    let mut out = String::with_capacity(hyphenated.len());
    let mut in_separator = false;
    for ch in hyphenated.chars() {
        if ch.is_whitespace() || ch == '_' {
            if !in_separator {
                out.push('-');
            }
            in_separator = true;
        } else {
            in_separator = false;
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Convert a free-form name to PascalCase.
pub fn to_pascal_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect()
}

/// CSS import statement for a component's companion stylesheet
pub fn css_import(component_name: &str) -> String {
    format!("import './{}.css';", to_kebab_case(component_name))
}
