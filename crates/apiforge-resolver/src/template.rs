// crates/apiforge-resolver/src/template.rs
// ============================================================================
// Module: Placeholder Templates
// Description: `{name}` placeholder substitution and route path normalization.
// Purpose: One substitution routine for route names, paths, prefixes, patterns.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! [`Placeholders::render`] scans a template once from left to right.
//! Substituted values are copied verbatim and never re-scanned, and unknown
//! placeholders such as `{id}` are preserved for the router.

// ============================================================================
// SECTION: Placeholders
// ============================================================================

/// Placeholder name → value bindings.
#[derive(Debug, Clone, Default)]
pub struct Placeholders<'a> {
    /// Bound values; later bindings shadow earlier ones.
    values: Vec<(&'static str, &'a str)>,
}

impl<'a> Placeholders<'a> {
    /// Creates an empty binding set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
        }
    }

    /// Binds `{name}` to `value`.
    #[must_use]
    pub fn with(mut self, name: &'static str, value: &'a str) -> Self {
        self.values.push((name, value));
        self
    }

    /// Returns the value bound to `name`.
    fn lookup(&self, name: &str) -> Option<&'a str> {
        self.values.iter().rev().find(|(key, _)| *key == name).map(|(_, value)| *value)
    }

    /// Substitutes every bound placeholder in `template`.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            output.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let Some(close) = after.find('}') else {
                output.push_str(&rest[open..]);
                return output;
            };
            let name = &after[..close];
            match self.lookup(name) {
                Some(value) => output.push_str(value),
                None => {
                    output.push('{');
                    output.push_str(name);
                    output.push('}');
                }
            }
            rest = &after[close + 1..];
        }
        output.push_str(rest);
        output
    }
}

// ============================================================================
// SECTION: Paths
// ============================================================================

/// Normalizes a route path: leading `/`, no empty segments, no trailing `/`.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let segments: Vec<&str> =
        path.split(['/', '\\']).map(str::trim).filter(|segment| !segment.is_empty()).collect();
    format!("/{}", segments.join("/"))
}

/// Replaces a host or scheme list containing `*` with an empty list.
pub fn normalize_wildcard(list: &mut Option<Vec<String>>) {
    if let Some(entries) = list
        && entries.iter().any(|entry| entry.trim() == "*")
    {
        entries.clear();
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
