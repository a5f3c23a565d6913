use thiserror::Error;

/// Everything that can go wrong while loading or editing a profile.
///
/// Configuration errors are never transient, so none of these carry retry
/// information. `line` is 1-based; `0` means the value did not come from a
/// text source (e.g. [`crate::Profile::set`]).
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("{}unknown option `{name}`", at(.line))]
    InvalidOption { name: String, line: usize },

    #[error("{}invalid value \"{value}\" for `{name}` (expected {expected})", at(.line))]
    InvalidValue {
        name: String,
        value: String,
        expected: String,
        line: usize,
    },

    #[error("{}syntax error: {message}", at(.line))]
    Syntax { line: usize, message: String },

    #[error("{}option `{name}` already assigned on line {first}", at(.line))]
    DuplicateOption {
        name: String,
        first: usize,
        line: usize,
    },

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("{0} advisory(ies) reported while advisories are denied")]
    AdvisoriesDenied(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProfileError {
    /// Source line the error points at, when there is one.
    pub fn line(&self) -> Option<usize> {
        match self {
            ProfileError::InvalidOption { line, .. }
            | ProfileError::InvalidValue { line, .. }
            | ProfileError::Syntax { line, .. }
            | ProfileError::DuplicateOption { line, .. } => Some(*line).filter(|l| *l > 0),
            ProfileError::UnknownPreset(_)
            | ProfileError::AdvisoriesDenied(_)
            | ProfileError::Io(_) => None,
        }
    }
}

fn at(line: &usize) -> String {
    match line {
        0 => String::new(),
        n => format!("line {n}: "),
    }
}

pub type Result<T> = std::result::Result<T, ProfileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_prefix_only_for_text_sources() {
        let from_file = ProfileError::InvalidOption {
            name: "vulcan".into(),
            line: 4,
        };
        assert_eq!(from_file.to_string(), "line 4: unknown option `vulcan`");
        assert_eq!(from_file.line(), Some(4));

        let from_set = ProfileError::InvalidOption {
            name: "vulcan".into(),
            line: 0,
        };
        assert_eq!(from_set.to_string(), "unknown option `vulcan`");
        assert_eq!(from_set.line(), None);
    }
}
