//! Schema-checked build option profiles.
//!
//! A profile is the flat `name = "value"` file handed to the engine's build
//! tool. Loading one validates every assignment against a [`Schema`]; the
//! result can be compared, checked for contradicting options, and rendered
//! back as text, build arguments or JSON.

pub mod advisory;
pub mod comparison;
pub mod context;
pub mod errors;
pub mod loader;
pub mod parser;
pub mod presets;
pub mod profile;
pub mod schema;

pub use advisory::Advisory;
pub use comparison::{diff, Difference};
pub use context::Context;
pub use errors::{ProfileError, Result};
pub use loader::{check, enforce, load_path, resolve, CheckReport};
pub use profile::{Entry, Profile};
pub use schema::{OptionKind, OptionSpec, OptionValue, Schema};

/// Convenience: load text against the built-in schema, strictly.
pub fn load(name: &str, text: &str) -> Result<Profile> {
    Profile::load(name, text, &Schema::with_builtins(), &Context::strict())
}
