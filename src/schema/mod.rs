use itertools::Itertools;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Domain an option's value is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// `yes` / `no`.
    Toggle,
    /// One of a fixed set of words.
    Choice(&'static [&'static str]),
    /// Free-form identifier such as a target or platform name.
    Identifier,
}

impl OptionKind {
    /// Check `raw` against the domain and return its typed form.
    pub fn validate(&self, raw: &str) -> Option<OptionValue> {
        match self {
            OptionKind::Toggle => match raw {
                "yes" => Some(OptionValue::Toggle(true)),
                "no" => Some(OptionValue::Toggle(false)),
                _ => None,
            },
            OptionKind::Choice(allowed) => allowed
                .iter()
                .any(|a| *a == raw)
                .then(|| OptionValue::Choice(raw.to_string())),
            OptionKind::Identifier => {
                let ok = !raw.is_empty()
                    && raw
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | '/'));
                ok.then(|| OptionValue::Identifier(raw.to_string()))
            }
        }
    }

    /// Human readable description of the domain, used in error messages.
    pub fn expected(&self) -> String {
        match self {
            OptionKind::Toggle => "one of \"yes\", \"no\"".to_string(),
            OptionKind::Choice(allowed) => {
                format!("one of {}", allowed.iter().map(|a| format!("\"{a}\"")).join(", "))
            }
            OptionKind::Identifier => "an identifier ([A-Za-z0-9_.-/])".to_string(),
        }
    }
}

/// A validated option value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionValue {
    Toggle(bool),
    Choice(String),
    Identifier(String),
}

impl OptionValue {
    pub fn as_toggle(&self) -> Option<bool> {
        match self {
            OptionValue::Toggle(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Toggle(true) => f.write_str("yes"),
            OptionValue::Toggle(false) => f.write_str("no"),
            OptionValue::Choice(s) | OptionValue::Identifier(s) => f.write_str(s),
        }
    }
}

// Serialized exactly as it is written in a profile file.
impl Serialize for OptionValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One entry of the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionSpec {
    pub name: String,
    pub kind: OptionKind,
    pub summary: String,
}

impl OptionSpec {
    pub fn new(name: impl Into<String>, kind: OptionKind, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            summary: summary.into(),
        }
    }
}

/// Authoritative set of known options. Cheap to clone and shareable across
/// threads.
#[derive(Clone, Default)]
pub struct Schema {
    inner: Arc<HashMap<String, OptionSpec>>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut schema = Self::new();
        for spec in builtins::catalogue() {
            schema.register(spec);
        }
        schema
    }

    /// Add or replace an entry.
    pub fn register(&mut self, spec: OptionSpec) {
        let map = Arc::make_mut(&mut self.inner);
        map.insert(spec.name.clone(), spec);
    }

    pub fn get(&self, name: &str) -> Option<&OptionSpec> {
        self.inner.get(name)
    }

    /// Entries sorted by name.
    pub fn iter(&self) -> impl Iterator<Item = &OptionSpec> {
        self.inner.values().sorted_by(|a, b| a.name.cmp(&b.name))
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

pub mod builtins {
    use super::{OptionKind, OptionSpec};

    pub const OPTIMIZE: &[&str] = &[
        "auto",
        "none",
        "custom",
        "debug",
        "speed",
        "speed_trace",
        "size",
        "size_extra",
    ];
    pub const LTO: &[&str] = &["none", "auto", "thin", "full"];
    pub const PRECISION: &[&str] = &["single", "double"];
    pub const ARCH: &[&str] = &[
        "auto",
        "x86_32",
        "x86_64",
        "arm32",
        "arm64",
        "rv64",
        "ppc32",
        "ppc64",
        "wasm32",
        "loongarch64",
    ];

    /// Engine modules that get a `module_<name>_enabled` toggle.
    pub const MODULES: &[&str] = &[
        "astcenc",
        "basis_universal",
        "bmp",
        "bullet",
        "camera",
        "csg",
        "cvtt",
        "dds",
        "denoise",
        "enet",
        "etcpak",
        "fbx",
        "freetype",
        "gdscript",
        "glslang",
        "gltf",
        "godot_physics_2d",
        "godot_physics_3d",
        "gridmap",
        "hdr",
        "interactive_music",
        "jolt_physics",
        "jpg",
        "jsonrpc",
        "ktx",
        "lightmapper_rd",
        "mbedtls",
        "meshoptimizer",
        "minimp3",
        "miniupnpc",
        "mobile_vr",
        "mono",
        "msdfgen",
        "multiplayer",
        "navigation",
        "navigation_2d",
        "navigation_3d",
        "noise",
        "ogg",
        "openxr",
        "png",
        "raycast",
        "regex",
        "squish",
        "svg",
        "text_server_adv",
        "text_server_fb",
        "tga",
        "theora",
        "upnp",
        "vhacd",
        "vorbis",
        "webp",
        "webrtc",
        "websocket",
        "webxr",
        "xatlas_unwrap",
        "zip",
    ];

    pub fn module_key(module: &str) -> String {
        format!("module_{module}_enabled")
    }

    pub fn catalogue() -> Vec<OptionSpec> {
        use OptionKind::*;
        let mut out = vec![
            OptionSpec::new(
                "library_type",
                Identifier,
                "Artifact kind: executable, static_library or shared_library",
            ),
            OptionSpec::new("target", Identifier, "Build target, e.g. editor or template_release"),
            OptionSpec::new("platform", Identifier, "Target platform"),
            OptionSpec::new("profile", Identifier, "Path to a build profile file"),
            OptionSpec::new("optimize", Choice(OPTIMIZE), "Optimization level"),
            OptionSpec::new("lto", Choice(LTO), "Link-time optimization mode"),
            OptionSpec::new("precision", Choice(PRECISION), "Floating point precision"),
            OptionSpec::new("arch", Choice(ARCH), "CPU architecture"),
            OptionSpec::new("debug_symbols", Toggle, "Emit debug symbols"),
            OptionSpec::new(
                "separate_debug_symbols",
                Toggle,
                "Split debug symbols into a separate file",
            ),
            OptionSpec::new("deprecated", Toggle, "Keep deprecated APIs"),
            OptionSpec::new("production", Toggle, "Production build settings"),
            OptionSpec::new("dev_build", Toggle, "Developer build with extra checks"),
            OptionSpec::new("threads", Toggle, "Threading support"),
            OptionSpec::new("use_static_cpp", Toggle, "Link the C++ runtime statically"),
            OptionSpec::new("disable_3d", Toggle, "Strip 3D nodes and rendering"),
            OptionSpec::new("disable_physics_2d", Toggle, "Strip 2D physics"),
            OptionSpec::new("disable_physics_3d", Toggle, "Strip 3D physics"),
            OptionSpec::new("disable_navigation_2d", Toggle, "Strip 2D navigation"),
            OptionSpec::new("disable_navigation_3d", Toggle, "Strip 3D navigation"),
            OptionSpec::new("disable_xr", Toggle, "Strip XR support"),
            OptionSpec::new("disable_advanced_gui", Toggle, "Strip advanced GUI controls"),
            OptionSpec::new("vulkan", Toggle, "Vulkan renderer"),
            OptionSpec::new("opengl3", Toggle, "OpenGL 3 renderer"),
            OptionSpec::new("use_volk", Toggle, "Load Vulkan through volk"),
            OptionSpec::new("sdl", Toggle, "SDL input backend"),
            OptionSpec::new("accesskit", Toggle, "AccessKit accessibility"),
            OptionSpec::new("brotli", Toggle, "Brotli decompression (WOFF2 fonts)"),
            OptionSpec::new("minizip", Toggle, "ZIP archive support"),
            OptionSpec::new("modules_enabled_by_default", Toggle, "Default state of every module"),
        ];
        out.extend(
            MODULES
                .iter()
                .map(|m| OptionSpec::new(module_key(m), Toggle, format!("Engine module `{m}`"))),
        );
        out
    }
}
