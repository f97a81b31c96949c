// src/recipe/descriptor.rs

//! Package descriptor tree produced by recipe parsing
//!
//! One `PackageDescriptor` describes one installable unit. The top-level
//! descriptor owns every subpackage descriptor; subpackages never nest
//! further and never reference each other.

use crate::recipe::schema::{ListField, ScalarField};
use serde::Serialize;
use std::collections::BTreeMap;

/// Shell command lines collected per build stage, in source order
#[derive(Debug, Clone, Default, Serialize)]
pub struct StageCommands {
    /// Commands from the %prep stage
    pub prepare: Vec<String>,
    /// Commands from the %build stage
    pub build: Vec<String>,
    /// Commands from the %install stage
    pub install: Vec<String>,
}

/// One installable unit: the top-level package or a named subpackage.
///
/// Scalar fields are empty until the recipe sets them; a later metadata
/// line for the same keyword overwrites. List fields only ever append,
/// preserving source order with duplicates kept, since source and patch
/// ordering drives downstream numbering.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PackageDescriptor {
    pub name: String,
    pub version: String,
    pub release: String,
    pub summary: String,
    pub license: String,
    pub url: String,

    /// Source archive URLs or paths, in declaration order
    pub sources: Vec<String>,
    /// Patch files, in declaration order
    pub patches: Vec<String>,

    pub requires: Vec<String>,
    pub build_requires: Vec<String>,
    pub provides: Vec<String>,
    pub conflicts: Vec<String>,

    /// Staged build commands; only ever populated on the top-level
    /// descriptor, never on subpackages
    pub commands: StageCommands,

    /// Subpackages keyed by their full derived name
    pub subpackages: BTreeMap<String, PackageDescriptor>,
}

impl PackageDescriptor {
    /// Create a descriptor seeded with a name, as done for subpackages
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mutable access to a scalar field selected by the schema table
    pub fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::Name => &mut self.name,
            ScalarField::Version => &mut self.version,
            ScalarField::Release => &mut self.release,
            ScalarField::Summary => &mut self.summary,
            ScalarField::License => &mut self.license,
            ScalarField::Url => &mut self.url,
        }
    }

    /// Mutable access to a list field selected by the schema table
    pub fn list_mut(&mut self, field: ListField) -> &mut Vec<String> {
        match field {
            ListField::Requires => &mut self.requires,
            ListField::BuildRequires => &mut self.build_requires,
            ListField::Provides => &mut self.provides,
            ListField::Conflicts => &mut self.conflicts,
        }
    }

    /// Full name for a subpackage of this package.
    ///
    /// Both `%package suffix` and `%package -n name` derive the same
    /// `<parent>-<arg>` key.
    pub fn subpackage_key(&self, suffix: &str) -> String {
        format!("{}-{}", self.name, suffix)
    }

    /// Scalar fields that become macros visible to later recipe lines.
    ///
    /// Only fields already committed appear; a line can reference what
    /// came before it, never what comes after.
    pub fn field_macros(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("name", self.name.as_str()),
            ("version", self.version.as_str()),
            ("release", self.release.as_str()),
            ("summary", self.summary.as_str()),
            ("license", self.license.as_str()),
            ("url", self.url.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
    }
}
