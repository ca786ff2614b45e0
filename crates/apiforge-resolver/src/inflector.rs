// crates/apiforge-resolver/src/inflector.rs
// ============================================================================
// Module: Inflector
// Description: English pluralization for collection names.
// Purpose: Derive stable plural collection names from entity short names.
// Dependencies: Standard library.
// ============================================================================

//! ## Overview
//! Pluralization is rule-ordered: the first matching rule wins. The order is
//! part of the naming contract because derived names end up in route names
//! and paths, so it must not be "corrected" for linguistic accuracy.
//!
//! 1. irregular table
//! 2. `s`, `x`, `z`, `ch`, `sh` → `+es`
//! 3. consonant + `y` → `ies`
//! 4. `f` / `fe` → `ves`
//! 5. consonant + `o` → `+es` (except the plain-`s` table)
//! 6. otherwise `+s`

// ============================================================================
// SECTION: Tables
// ============================================================================

/// Irregular singular → plural forms.
const IRREGULAR: [(&str, &str); 8] = [
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
];

/// Consonant + `o` words that take a plain `s`.
const PLAIN_S_O_ENDINGS: [&str; 1] = ["photo"];

/// Endings that take `es`.
const SIBILANT_ENDINGS: [&str; 5] = ["s", "x", "z", "ch", "sh"];

// ============================================================================
// SECTION: Pluralization
// ============================================================================

/// Returns the lower-cased plural of `word`.
#[must_use]
pub fn pluralize(word: &str) -> String {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
        return word;
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == word) {
        return (*plural).to_string();
    }
    if SIBILANT_ENDINGS.iter().any(|ending| word.ends_with(ending)) {
        return format!("{word}es");
    }
    if let Some(stem) = word.strip_suffix('y')
        && ends_with_consonant(stem)
    {
        return format!("{stem}ies");
    }
    if let Some(stem) = word.strip_suffix("fe").or_else(|| word.strip_suffix('f')) {
        return format!("{stem}ves");
    }
    if let Some(stem) = word.strip_suffix('o')
        && ends_with_consonant(stem)
        && !PLAIN_S_O_ENDINGS.iter().any(|plain| word.ends_with(plain))
    {
        return format!("{word}es");
    }
    format!("{word}s")
}

/// Returns true when the last character of `stem` is an ASCII consonant.
fn ends_with_consonant(stem: &str) -> bool {
    stem.chars()
        .last()
        .is_some_and(|last| last.is_ascii_alphabetic() && !"aeiou".contains(last))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
