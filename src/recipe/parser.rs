// src/recipe/parser.rs

//! Two-pass recipe parser
//!
//! Pass 1 walks every line and routes metadata (`Keyword: value` lines,
//! `Source*`/`Patch*` lines, `%package` declarations) into the descriptor
//! tree, tracking which package is the active write target. Pass 2 walks
//! the same text again and collects shell command lines into the
//! `%prep`/`%build`/`%install` stages of the top-level descriptor.
//!
//! Every value is macro-expanded as its line is processed, and the
//! already-committed scalar fields are visible as macros, so a line can
//! reference fields resolved by earlier lines:
//!
//! ```text
//! Name: hello
//! Version: 1.0
//! Source0: https://example.com/%{name}-%{version}.tar.gz
//! ```
//!
//! The passes run strictly in order: Pass 2 expansion may depend on
//! fields resolved in Pass 1, and the active-subpackage state of Pass 1
//! must not leak into stage collection.

use crate::error::{Error, Result};
use crate::macros::{MacroContext, RECIPE_MACRO_LEVEL};
use crate::recipe::descriptor::PackageDescriptor;
use crate::recipe::schema::{self, FieldKind};
use regex::Regex;
use tracing::{debug, trace};

/// Section markers that end a command stage without starting a new one
const OTHER_SECTIONS: &[&str] = &[
    "%description",
    "%files",
    "%changelog",
    "%check",
    "%clean",
    "%pre",
    "%post",
    "%preun",
    "%postun",
    "%package",
];

/// Which command stage the collector is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stage {
    None,
    Prepare,
    Build,
    Install,
}

/// Parse a recipe into a package descriptor.
///
/// The macro context carries site definitions in and accumulates
/// field-derived definitions during the parse; it must not be shared
/// with another build invocation.
pub fn parse_recipe(text: &str, macros: &mut MacroContext) -> Result<PackageDescriptor> {
    let mut descriptor = PackageDescriptor::default();

    collect_metadata(text, &mut descriptor, macros)?;
    collect_commands(text, &mut descriptor, macros)?;

    // Leave the final field values in the macro table, where diagnostics
    // and any caller-side expansion expect them
    for (name, value) in descriptor.field_macros() {
        macros.define(name, value, RECIPE_MACRO_LEVEL);
    }

    debug!(
        "Parsed recipe for '{}' with {} subpackage(s)",
        descriptor.name,
        descriptor.subpackages.len()
    );

    Ok(descriptor)
}

/// Pass 1: route metadata lines into the descriptor tree
fn collect_metadata(
    text: &str,
    descriptor: &mut PackageDescriptor,
    macros: &mut MacroContext,
) -> Result<()> {
    // `%package -n NAME` names the subpackage explicitly
    let name_flag = Regex::new(r"(?:^|\s)-n\s+(\S+)").unwrap();

    // Key of the subpackage currently receiving metadata; None targets
    // the top-level package
    let mut active: Option<String> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_number = idx + 1;

        if line.contains(": ") {
            let words: Vec<&str> = line.split_whitespace().collect();

            // A Key: Value pair needs at least two tokens
            if words.len() >= 2 {
                let keyword = words[0];

                if keyword_has_prefix(keyword, "source") {
                    let value = expand_inline(words[1], descriptor, macros)?;
                    target_mut(descriptor, active.as_ref()).sources.push(value);
                    continue;
                }

                if keyword_has_prefix(keyword, "patch") {
                    let value = expand_inline(words[1], descriptor, macros)?;
                    target_mut(descriptor, active.as_ref()).patches.push(value);
                    continue;
                }

                if let Some(kind) = schema::lookup(keyword) {
                    let rest = line.trim_start();
                    let rest = rest.strip_prefix(keyword).unwrap_or(rest).trim();
                    let value = expand_inline(rest, descriptor, macros)?;
                    let target = target_mut(descriptor, active.as_ref());
                    match kind {
                        FieldKind::Scalar(field) => *target.scalar_mut(field) = value,
                        FieldKind::List(field) => target
                            .list_mut(field)
                            .extend(value.split(' ').filter(|t| !t.is_empty()).map(String::from)),
                    }
                    continue;
                }

                trace!(
                    "Ignoring unrecognized keyword at line {}: {}",
                    line_number, keyword
                );
            }
        }

        if line.contains("%package") {
            let suffix = match name_flag.captures(line) {
                Some(caps) => caps[1].to_string(),
                None => match line.split_whitespace().nth(1) {
                    Some(token) if token != "-n" => token.to_string(),
                    _ => {
                        return Err(Error::MalformedSubpackage {
                            line_number,
                            line: line.to_string(),
                        });
                    }
                },
            };

            let key = descriptor.subpackage_key(&suffix);
            debug!("Entering subpackage '{}' at line {}", key, line_number);
            descriptor
                .subpackages
                .entry(key.clone())
                .or_insert_with(|| PackageDescriptor::named(key.clone()));
            active = Some(key);
        }
    }

    Ok(())
}

/// Pass 2: collect stage command lines onto the top-level descriptor
fn collect_commands(
    text: &str,
    descriptor: &mut PackageDescriptor,
    macros: &mut MacroContext,
) -> Result<()> {
    let mut stage = Stage::None;

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        // A non-command section ends any active stage
        let first = line.split_whitespace().next().unwrap_or("");
        if OTHER_SECTIONS.contains(&first) {
            stage = Stage::None;
            continue;
        }

        if line.starts_with("%prep") {
            stage = Stage::Prepare;
            continue;
        }
        if line.starts_with("%build") {
            stage = Stage::Build;
            continue;
        }
        if line.starts_with("%install") {
            stage = Stage::Install;
            continue;
        }

        if stage == Stage::None {
            continue;
        }

        let value = expand_inline(line, descriptor, macros)?;
        match stage {
            Stage::Prepare => descriptor.commands.prepare.push(value),
            Stage::Build => descriptor.commands.build.push(value),
            Stage::Install => descriptor.commands.install.push(value),
            Stage::None => {}
        }
    }

    Ok(())
}

/// Resolve the active write target: a subpackage or the top-level package
fn target_mut<'a>(
    descriptor: &'a mut PackageDescriptor,
    active: Option<&String>,
) -> &'a mut PackageDescriptor {
    match active {
        Some(key) => descriptor
            .subpackages
            .entry(key.clone())
            .or_insert_with(|| PackageDescriptor::named(key.clone())),
        None => descriptor,
    }
}

/// Expand a value with the committed top-level fields visible as macros
fn expand_inline(
    text: &str,
    descriptor: &PackageDescriptor,
    macros: &mut MacroContext,
) -> Result<String> {
    for (name, value) in descriptor.field_macros() {
        macros.define(name, value, RECIPE_MACRO_LEVEL);
    }
    macros.expand(text)
}

/// Case-insensitive keyword prefix test
fn keyword_has_prefix(keyword: &str, prefix: &str) -> bool {
    keyword.len() >= prefix.len() && keyword[..prefix.len()].eq_ignore_ascii_case(prefix)
}
