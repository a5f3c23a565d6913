//! Build presets shipped with the crate.

use crate::context::Context;
use crate::errors::{ProfileError, Result};
use crate::profile::Profile;
use crate::schema::Schema;

const PRESETS: &[(&str, &str)] = &[
    ("plugin_ui", include_str!("../presets/plugin_ui.py")),
    ("plugin_ui_3d", include_str!("../presets/plugin_ui_3d.py")),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    PRESETS.iter().map(|(name, _)| *name)
}

/// Raw `custom.py` text of a preset.
pub fn source(name: &str) -> Result<&'static str> {
    PRESETS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, text)| *text)
        .ok_or_else(|| ProfileError::UnknownPreset(name.to_string()))
}

/// Load a preset with strict validation.
pub fn load(name: &str, schema: &Schema) -> Result<Profile> {
    Profile::load(name, source(name)?, schema, &Context::strict())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_loads_strictly() {
        let schema = Schema::with_builtins();
        for name in names() {
            let p = load(name, &schema).unwrap();
            assert_eq!(p.name(), name);
            assert!(!p.is_empty());
        }
    }

    #[test]
    fn unknown_preset() {
        assert!(matches!(source("desktop"), Err(ProfileError::UnknownPreset(n)) if n == "desktop"));
    }
}
