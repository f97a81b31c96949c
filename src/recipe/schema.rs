// src/recipe/schema.rs

//! Static keyword-to-field schema for metadata lines
//!
//! Each `Keyword: value` line routes to a descriptor field through this
//! table. The table is the single source of truth for which keywords
//! exist and whether they overwrite (scalar) or accumulate (list); there
//! is no runtime introspection of the descriptor type.

/// Scalar descriptor fields: the last write wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Name,
    Version,
    Release,
    Summary,
    License,
    Url,
}

/// List descriptor fields: every write appends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListField {
    Requires,
    BuildRequires,
    Provides,
    Conflicts,
}

/// How a metadata keyword maps onto the descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Scalar(ScalarField),
    List(ListField),
}

/// Keyword table. Matching is case-insensitive on the first token of the
/// line with its trailing colon stripped.
const SCHEMA: &[(&str, FieldKind)] = &[
    ("name", FieldKind::Scalar(ScalarField::Name)),
    ("version", FieldKind::Scalar(ScalarField::Version)),
    ("release", FieldKind::Scalar(ScalarField::Release)),
    ("summary", FieldKind::Scalar(ScalarField::Summary)),
    ("license", FieldKind::Scalar(ScalarField::License)),
    ("url", FieldKind::Scalar(ScalarField::Url)),
    ("requires", FieldKind::List(ListField::Requires)),
    ("buildrequires", FieldKind::List(ListField::BuildRequires)),
    ("provides", FieldKind::List(ListField::Provides)),
    ("conflicts", FieldKind::List(ListField::Conflicts)),
];

/// Look up a metadata keyword, ignoring case and a trailing colon
pub fn lookup(keyword: &str) -> Option<FieldKind> {
    let keyword = keyword.strip_suffix(':').unwrap_or(keyword);
    SCHEMA
        .iter()
        .find(|(name, _)| keyword.eq_ignore_ascii_case(name))
        .map(|(_, kind)| *kind)
}
