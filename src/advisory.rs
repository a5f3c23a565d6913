//! Cross-option consistency hints.
//!
//! Some options only make sense together: stripping 3D leaves nothing for XR
//! to attach to, the Vorbis and Theora decoders read Ogg containers, and so
//! on. The build tool accepts contradicting combinations anyway, so these
//! are reported, never enforced. Only explicit contradictions count; an
//! option left unset is not assumed to hold any particular default.

use crate::profile::Profile;
use serde::Serialize;
use std::fmt;
use tracing::warn;

/// `when` holding implies `then` should hold too.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub when: (&'static str, bool),
    pub then: (&'static str, bool),
    pub reason: &'static str,
}

pub const RULES: &[Rule] = &[
    Rule {
        when: ("disable_3d", true),
        then: ("module_openxr_enabled", false),
        reason: "XR needs 3D",
    },
    Rule {
        when: ("disable_3d", true),
        then: ("module_gltf_enabled", false),
        reason: "glTF imports 3D scenes",
    },
    Rule {
        when: ("disable_3d", true),
        then: ("module_csg_enabled", false),
        reason: "CSG builds 3D meshes",
    },
    Rule {
        when: ("disable_3d", true),
        then: ("module_gridmap_enabled", false),
        reason: "GridMap is a 3D node",
    },
    Rule {
        when: ("disable_xr", true),
        then: ("module_openxr_enabled", false),
        reason: "OpenXR is an XR interface",
    },
    Rule {
        when: ("vulkan", false),
        then: ("use_volk", false),
        reason: "volk only loads Vulkan",
    },
    Rule {
        when: ("module_ogg_enabled", false),
        then: ("module_vorbis_enabled", false),
        reason: "Vorbis streams live in Ogg containers",
    },
    Rule {
        when: ("module_ogg_enabled", false),
        then: ("module_theora_enabled", false),
        reason: "Theora streams live in Ogg containers",
    },
    Rule {
        when: ("module_freetype_enabled", false),
        then: ("module_text_server_adv_enabled", false),
        reason: "text servers render glyphs through FreeType",
    },
    Rule {
        when: ("module_freetype_enabled", false),
        then: ("module_text_server_fb_enabled", false),
        reason: "text servers render glyphs through FreeType",
    },
    Rule {
        when: ("module_miniupnpc_enabled", false),
        then: ("module_upnp_enabled", false),
        reason: "UPnP is built on miniupnpc",
    },
];

/// A reported contradiction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Advisory {
    /// Options involved, in the order they should be read.
    pub options: Vec<String>,
    pub message: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.options.join(", "), self.message)
    }
}

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

/// Run every rule against `profile`. Each hit is also logged at `warn`.
pub fn check(profile: &Profile) -> Vec<Advisory> {
    let mut out: Vec<Advisory> = RULES
        .iter()
        .filter(|r| profile.toggle(r.when.0) == Some(r.when.1))
        .filter(|r| profile.toggle(r.then.0) == Some(!r.then.1))
        .map(|r| Advisory {
            options: vec![r.when.0.to_string(), r.then.0.to_string()],
            message: format!(
                "{}=\"{}\" but {}=\"{}\" ({})",
                r.when.0,
                yes_no(r.when.1),
                r.then.0,
                yes_no(!r.then.1),
                r.reason
            ),
        })
        .collect();

    let adv = "module_text_server_adv_enabled";
    let fb = "module_text_server_fb_enabled";
    if profile.toggle(adv) == Some(false) && profile.toggle(fb) == Some(false) {
        out.push(Advisory {
            options: vec![adv.to_string(), fb.to_string()],
            message: "both text servers are disabled, no text can be drawn".to_string(),
        });
    }

    for a in &out {
        warn!(profile = profile.name(), advisory = %a, "inconsistent options");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::schema::Schema;
    use pretty_assertions::assert_eq;

    fn load(text: &str) -> Profile {
        Profile::load("t", text, &Schema::with_builtins(), &Context::strict()).unwrap()
    }

    #[test]
    fn explicit_contradiction_is_reported() {
        let p = load("vulkan = \"no\"\nuse_volk = \"yes\"\n");
        let out = check(&p);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].options, vec!["vulkan", "use_volk"]);
        assert!(out[0].message.contains("volk"));
    }

    #[test]
    fn unset_consequent_is_not_reported() {
        let p = load("disable_3d = \"yes\"\nmodule_ogg_enabled = \"no\"\n");
        assert!(check(&p).is_empty());
    }

    #[test]
    fn both_text_servers_off() {
        let p = load(
            "module_text_server_adv_enabled = \"no\"\n\
             module_text_server_fb_enabled = \"no\"\n",
        );
        let out = check(&p);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("text servers"));
    }

    #[test]
    fn ogg_off_flags_both_decoders() {
        let p = load(
            "module_ogg_enabled = \"no\"\n\
             module_vorbis_enabled = \"yes\"\n\
             module_theora_enabled = \"yes\"\n",
        );
        let names: Vec<_> = check(&p).into_iter().map(|a| a.options[1].clone()).collect();
        assert_eq!(names, vec!["module_vorbis_enabled", "module_theora_enabled"]);
    }
}
