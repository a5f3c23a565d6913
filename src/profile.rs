use crate::context::Context;
use crate::errors::{ProfileError, Result};
use crate::parser::{self, Assignment};
use crate::schema::{OptionValue, Schema};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use tracing::{debug, warn};

/// A single validated assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub value: OptionValue,
}

/// A complete, validated set of build option assignments.
///
/// Keys are unique and kept in authoring order so the profile renders back
/// the way it was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    name: String,
    entries: Vec<Entry>,
    index: HashMap<String, usize>,
}

impl Profile {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Load a `custom.py`-style text.
    pub fn load(
        name: impl Into<String>,
        text: &str,
        schema: &Schema,
        ctx: &Context,
    ) -> Result<Self> {
        let assignments = parser::parse_document(text)?;
        Self::build(name.into(), assignments, schema, ctx)
    }

    /// Load from `name=value` build arguments.
    pub fn from_args<I, S>(
        name: impl Into<String>,
        args: I,
        schema: &Schema,
        ctx: &Context,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let assignments = args
            .into_iter()
            .enumerate()
            .map(|(i, arg)| parser::parse_argument(arg.as_ref(), i + 1))
            .collect::<Result<Vec<_>>>()?;
        Self::build(name.into(), assignments, schema, ctx)
    }

    /// Load from a single build command line, as produced by
    /// [`Profile::to_scons_args`].
    pub fn from_arg_line(
        name: impl Into<String>,
        line: &str,
        schema: &Schema,
        ctx: &Context,
    ) -> Result<Self> {
        let args = parser::split_arguments(line)?;
        Self::from_args(name, args, schema, ctx)
    }

    fn build(
        name: String,
        assignments: Vec<Assignment>,
        schema: &Schema,
        ctx: &Context,
    ) -> Result<Self> {
        let mut profile = Profile::new(name);
        let mut seen_at: HashMap<String, usize> = HashMap::new();
        for a in assignments {
            let value = validate(schema, &a.name, &a.value, a.line)?;
            if let Some(&first) = seen_at.get(&a.name) {
                if !ctx.allow_redefinition {
                    return Err(ProfileError::DuplicateOption {
                        name: a.name,
                        first,
                        line: a.line,
                    });
                }
                warn!(
                    option = %a.name,
                    first,
                    line = a.line,
                    "option redefined, last assignment wins"
                );
            } else {
                seen_at.insert(a.name.clone(), a.line);
            }
            profile.insert(a.name, value);
        }
        debug!(profile = %profile.name, options = profile.len(), "profile loaded");
        Ok(profile)
    }

    /// Validated insert or replace. An existing key keeps its position.
    /// Returns the previous value.
    pub fn set(&mut self, name: &str, raw: &str, schema: &Schema) -> Result<Option<OptionValue>> {
        let value = validate(schema, name, raw, 0)?;
        Ok(self.insert(name.to_string(), value))
    }

    fn insert(&mut self, name: String, value: OptionValue) -> Option<OptionValue> {
        match self.index.get(&name) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].value, value)),
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push(Entry { name, value });
                None
            }
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.index.get(name).map(|&i| &self.entries[i].value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// `Some(true)` for `yes`, `Some(false)` for `no`, `None` when the option
    /// is absent or not a toggle.
    pub fn toggle(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_toggle)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in authoring order.
    pub fn iter(&self) -> impl Iterator<Item = &Entry> {
        self.entries.iter()
    }

    /// Render as `custom.py` text. Loading the result yields the same mapping.
    pub fn to_text(&self) -> String {
        let mut out = format!("# {}\n", self.name.escape_debug());
        for e in &self.entries {
            let value = parser::quote(&e.value.to_string());
            out.push_str(&format!("{} = {value}\n", e.name));
        }
        out
    }

    /// One `name=value` token per option. Values that would not read back
    /// unchanged as a bare token are quoted.
    pub fn to_args(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|e| format!("{}={}", e.name, parser::quote_argument(&e.value.to_string())))
            .collect()
    }

    /// Render as a single build command line.
    pub fn to_scons_args(&self) -> String {
        self.to_args().join(" ")
    }
}

fn validate(schema: &Schema, name: &str, raw: &str, line: usize) -> Result<OptionValue> {
    let spec = schema.get(name).ok_or_else(|| ProfileError::InvalidOption {
        name: name.to_string(),
        line,
    })?;
    spec.kind.validate(raw).ok_or_else(|| ProfileError::InvalidValue {
        name: name.to_string(),
        value: raw.to_string(),
        expected: spec.kind.expected(),
        line,
    })
}

struct OrderedOptions<'a>(&'a [Entry]);

impl Serialize for OrderedOptions<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for e in self.0 {
            map.serialize_entry(&e.name, &e.value)?;
        }
        map.end()
    }
}

impl Serialize for Profile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Profile", 2)?;
        s.serialize_field("name", &self.name)?;
        s.serialize_field("options", &OrderedOptions(&self.entries))?;
        s.end()
    }
}
