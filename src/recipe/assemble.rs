// src/recipe/assemble.rs

//! Hand-off from parsed descriptor to the downstream packager
//!
//! The parser's job ends at a completed descriptor tree. Turning that
//! tree into an archive on disk belongs to a packager behind the
//! `PackageAssembler` trait; `build_from_file` wires the two together.

use crate::error::{Error, Result};
use crate::macros::MacroContext;
use crate::recipe::descriptor::PackageDescriptor;
use crate::recipe::parser::parse_recipe;
use std::path::Path;
use tracing::{debug, info};

/// Downstream packager boundary.
///
/// Implementations receive the completed, frozen descriptor tree and
/// produce the target package format from it.
pub trait PackageAssembler {
    /// Assemble packages from a parsed descriptor
    fn assemble(&self, descriptor: &PackageDescriptor) -> Result<()>;
}

/// Assembler that only reports what would be packaged.
///
/// Used by default until a real packager is wired in, and useful for
/// validating recipes without touching the filesystem.
pub struct DryRunAssembler;

impl PackageAssembler for DryRunAssembler {
    fn assemble(&self, descriptor: &PackageDescriptor) -> Result<()> {
        info!(
            "Would assemble {}-{}-{} with {} source(s), {} patch(es)",
            descriptor.name,
            descriptor.version,
            descriptor.release,
            descriptor.sources.len(),
            descriptor.patches.len()
        );
        for name in descriptor.subpackages.keys() {
            info!("Would assemble subpackage {}", name);
        }
        Ok(())
    }
}

/// Read a recipe file, parse it, and hand the descriptor to the assembler.
///
/// I/O failures surface before parsing starts; parse failures surface
/// before the assembler runs. No partial descriptor ever reaches the
/// assembler.
pub fn build_from_file(
    path: &Path,
    macros: &mut MacroContext,
    assembler: &dyn PackageAssembler,
) -> Result<()> {
    let text = std::fs::read_to_string(path).map_err(|e| {
        Error::IoError(format!("Failed to read recipe {}: {}", path.display(), e))
    })?;

    let descriptor = parse_recipe(&text, macros)?;

    if let Ok(json) = serde_json::to_string_pretty(&descriptor) {
        debug!("Descriptor for {}:\n{}", path.display(), json);
    }

    assembler.assemble(&descriptor)
}
