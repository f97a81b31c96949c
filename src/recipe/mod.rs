// src/recipe/mod.rs

//! Recipe parsing for package builds
//!
//! A recipe is a line-oriented spec describing how one or more packages
//! are built:
//! - `Keyword: value` metadata lines (name, version, dependencies, ...)
//! - `Source0:`/`Patch0:` lines naming archives and patches
//! - `%package` declarations opening named subpackages
//! - `%prep`/`%build`/`%install` stages holding shell commands
//!
//! # Example Recipe
//!
//! ```text
//! Name: hello
//! Version: 1.0
//! Release: 1
//! Summary: Prints a friendly greeting
//! Source0: https://example.com/hello-%{version}.tar.gz
//!
//! %package doc
//! Summary: Documentation for hello
//!
//! %prep
//! %setup -q
//!
//! %build
//! make
//!
//! %install
//! make install DESTDIR=$pkgdir
//! ```
//!
//! Parsing produces a [`PackageDescriptor`] tree: the top-level package
//! owning its subpackages, with every textual value macro-expanded. The
//! tree is then handed to a [`PackageAssembler`] to produce the actual
//! package archives.

mod assemble;
mod descriptor;
pub mod parser;
pub mod schema;

pub use assemble::{build_from_file, DryRunAssembler, PackageAssembler};
pub use descriptor::{PackageDescriptor, StageCommands};
pub use parser::parse_recipe;
