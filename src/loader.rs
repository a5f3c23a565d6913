use crate::advisory::{self, Advisory};
use crate::context::Context;
use crate::errors::{ProfileError, Result};
use crate::presets;
use crate::profile::Profile;
use crate::schema::Schema;
use std::path::Path;
use tracing::{debug, info};

/// Prefix selecting an embedded preset instead of a file, e.g. `preset:plugin_ui`.
pub const PRESET_PREFIX: &str = "preset:";

/// Read and validate a profile file. The profile is named after the file stem.
pub fn load_path(path: &Path, schema: &Schema, ctx: &Context) -> Result<Profile> {
    let text = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    debug!(path = %path.display(), "reading profile");
    Profile::load(name, &text, schema, ctx)
}

/// Load `preset:<name>` from the embedded presets, anything else from disk.
pub fn resolve(location: &str, schema: &Schema, ctx: &Context) -> Result<Profile> {
    match location.strip_prefix(PRESET_PREFIX) {
        Some(name) => Profile::load(name, presets::source(name)?, schema, ctx),
        None => load_path(Path::new(location), schema, ctx),
    }
}

/// Outcome of validating one profile.
#[derive(Debug)]
pub struct CheckReport {
    pub location: String,
    pub options: usize,
    pub advisories: Vec<Advisory>,
}

/// Load `location` and run the advisory rules on it.
pub fn check(location: &str, schema: &Schema, ctx: &Context) -> Result<CheckReport> {
    let profile = resolve(location, schema, ctx)?;
    let advisories = advisory::check(&profile);
    info!(profile = %location, options = profile.len(), advisories = advisories.len(), "checked");
    Ok(CheckReport {
        location: location.to_string(),
        options: profile.len(),
        advisories,
    })
}

/// Fail when `ctx` denies advisories and any report carries one.
pub fn enforce(reports: &[CheckReport], ctx: &Context) -> Result<()> {
    let total: usize = reports.iter().map(|r| r.advisories.len()).sum();
    if ctx.deny_advisories && total > 0 {
        return Err(ProfileError::AdvisoriesDenied(total));
    }
    Ok(())
}
