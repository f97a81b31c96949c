// src/macros.rs

//! Macro table and inline expansion
//!
//! Recipes reference macros as `%name` or `%{name}`; the table maps each
//! name to a replacement body. Definitions carry an integer level, with
//! lower levels taking precedence (the rpm convention), so a site-wide
//! macro file can be overridden by definitions derived from the recipe
//! itself. One `MacroContext` exists per build invocation; sharing a table
//! across builds would leak definitions between unrelated recipes.

use crate::error::{Error, Result};
use std::collections::HashMap;
use std::path::Path;

/// Expansion stops after this many recursive substitutions per call.
/// A recipe that hits it has a definition cycle, not a deep macro.
const MAX_EXPANSION_DEPTH: usize = 64;

/// Default level for definitions loaded from macro files
pub const FILE_MACRO_LEVEL: i32 = 0;

/// Level for macros derived from recipe fields; wins over file macros
pub const RECIPE_MACRO_LEVEL: i32 = -1;

#[derive(Debug, Clone)]
struct MacroDef {
    body: String,
    level: i32,
}

/// A table of named text substitutions scoped to one build invocation
#[derive(Debug, Default)]
pub struct MacroContext {
    // Strongest (lowest-level) definition first
    table: HashMap<String, Vec<MacroDef>>,
}

impl MacroContext {
    /// Create an empty macro table
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a macro at the given level, replacing any existing
    /// definition at that same level
    pub fn define(&mut self, name: &str, body: &str, level: i32) {
        let defs = self.table.entry(name.to_string()).or_default();
        defs.retain(|d| d.level != level);
        let def = MacroDef {
            body: body.to_string(),
            level,
        };
        let pos = defs
            .iter()
            .position(|d| d.level > level)
            .unwrap_or(defs.len());
        defs.insert(pos, def);
    }

    /// Remove the strongest definition of a macro, uncovering any weaker
    /// definition that remains
    pub fn delete(&mut self, name: &str) {
        if let Some(defs) = self.table.get_mut(name) {
            if !defs.is_empty() {
                defs.remove(0);
            }
            if defs.is_empty() {
                self.table.remove(name);
            }
        }
    }

    /// Look up the strongest definition body for a name
    fn resolve(&self, name: &str) -> Option<&str> {
        self.table
            .get(name)
            .and_then(|defs| defs.first())
            .map(|d| d.body.as_str())
    }

    /// Substitute `%name` and `%{name}` references in the input.
    ///
    /// Unknown references are left verbatim. `%%` escapes a literal
    /// percent sign. Bodies are expanded recursively up to a fixed depth;
    /// exceeding it reports a definition cycle.
    pub fn expand(&self, text: &str) -> Result<String> {
        self.expand_depth(text, 0)
    }

    fn expand_depth(&self, text: &str, depth: usize) -> Result<String> {
        if depth > MAX_EXPANSION_DEPTH {
            return Err(Error::MacroError(format!(
                "Macro expansion exceeded {} levels; definition cycle in '{}'",
                MAX_EXPANSION_DEPTH, text
            )));
        }

        let mut out = String::with_capacity(text.len());
        let mut chars = text.char_indices().peekable();

        while let Some((i, c)) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }

            match chars.peek() {
                // %% is a literal percent sign
                Some((_, '%')) => {
                    chars.next();
                    out.push('%');
                }
                // %{name}
                Some((_, '{')) => {
                    let rest = &text[i + 2..];
                    match rest.find('}') {
                        Some(end) => {
                            let name = &rest[..end];
                            for _ in 0..name.chars().count() + 2 {
                                chars.next();
                            }
                            match self.resolve(name) {
                                Some(body) => {
                                    out.push_str(&self.expand_depth(body, depth + 1)?)
                                }
                                None => {
                                    out.push_str("%{");
                                    out.push_str(name);
                                    out.push('}');
                                }
                            }
                        }
                        // Unterminated brace, leave as-is
                        None => out.push('%'),
                    }
                }
                // %name
                Some((_, c2)) if c2.is_ascii_alphabetic() || *c2 == '_' => {
                    let rest = &text[i + 1..];
                    let end = rest
                        .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                        .unwrap_or(rest.len());
                    let name = &rest[..end];
                    for _ in 0..name.len() {
                        chars.next();
                    }
                    match self.resolve(name) {
                        Some(body) => out.push_str(&self.expand_depth(body, depth + 1)?),
                        None => {
                            out.push('%');
                            out.push_str(name);
                        }
                    }
                }
                _ => out.push('%'),
            }
        }

        Ok(out)
    }

    /// Bulk-load definitions from a macro file.
    ///
    /// The format is one definition per line: `%name body...`. Blank lines
    /// and `#` comments are skipped.
    pub fn load_from_file(&mut self, path: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::IoError(format!(
                "Failed to read macro file {}: {}",
                path.display(),
                e
            ))
        })?;

        let mut loaded = 0;
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some(rest) = line.strip_prefix('%') else {
                continue;
            };
            let mut parts = rest.splitn(2, char::is_whitespace);
            let name = match parts.next() {
                Some(n) if !n.is_empty() => n,
                _ => continue,
            };
            let body = parts.next().unwrap_or("").trim();
            self.define(name, body, FILE_MACRO_LEVEL);
            loaded += 1;
        }

        Ok(loaded)
    }

    /// Snapshot the table as (name, strongest body) pairs, ordered by name
    pub fn dump(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = self
            .table
            .iter()
            .filter_map(|(name, defs)| {
                defs.first().map(|d| (name.clone(), d.body.clone()))
            })
            .collect();
        entries.sort();
        entries
    }
}
