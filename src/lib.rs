// src/lib.rs

//! Specforge
//!
//! Builds Arch Linux packages from RPM-style spec recipes.
//!
//! # Architecture
//!
//! - Recipe parser: two-pass transformation of recipe text into a
//!   package descriptor tree (metadata pass, then stage collection)
//! - Schema table: static keyword-to-field mapping driving metadata
//!   routing, no runtime introspection
//! - Macro engine: per-invocation table with `%name`/`%{name}` expansion
//!   and precedence levels
//! - Assembler boundary: the completed descriptor is handed to a
//!   `PackageAssembler` for archive construction

mod error;
pub mod macros;
pub mod recipe;

pub use error::{Error, Result};
pub use macros::MacroContext;
pub use recipe::{
    build_from_file, parse_recipe, DryRunAssembler, PackageAssembler, PackageDescriptor,
    StageCommands,
};
