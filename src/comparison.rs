use crate::profile::Profile;
use crate::schema::OptionValue;
use itertools::{EitherOrBoth, Itertools};
use serde::Serialize;
use std::fmt;

/// One option on which two profiles disagree. `None` means the option is not
/// set on that side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Difference {
    pub name: String,
    pub left: Option<OptionValue>,
    pub right: Option<OptionValue>,
}

impl fmt::Display for Difference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<OptionValue>| v.as_ref().map_or("-".to_string(), |v| v.to_string());
        write!(f, "{}: {} -> {}", self.name, show(&self.left), show(&self.right))
    }
}

/// Option-by-option comparison, sorted by option name.
pub fn diff(left: &Profile, right: &Profile) -> Vec<Difference> {
    let l = left.iter().sorted_by(|a, b| a.name.cmp(&b.name));
    let r = right.iter().sorted_by(|a, b| a.name.cmp(&b.name));
    l.merge_join_by(r, |a, b| a.name.cmp(&b.name))
        .filter_map(|pair| match pair {
            EitherOrBoth::Both(a, b) if a.value == b.value => None,
            EitherOrBoth::Both(a, b) => Some(Difference {
                name: a.name.clone(),
                left: Some(a.value.clone()),
                right: Some(b.value.clone()),
            }),
            EitherOrBoth::Left(a) => Some(Difference {
                name: a.name.clone(),
                left: Some(a.value.clone()),
                right: None,
            }),
            EitherOrBoth::Right(b) => Some(Difference {
                name: b.name.clone(),
                left: None,
                right: Some(b.value.clone()),
            }),
        })
        .collect()
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
    fn reports_changed_and_one_sided_options() {
        let a = load("sdl = \"no\"\ndisable_3d = \"yes\"\noptimize = \"size\"\n");
        let b = load("optimize = \"size\"\ndisable_3d = \"no\"\nvulkan = \"no\"\n");
        let d = diff(&a, &b);
        assert_eq!(
            d,
            vec![
                Difference {
                    name: "disable_3d".into(),
                    left: Some(OptionValue::Toggle(true)),
                    right: Some(OptionValue::Toggle(false)),
                },
                Difference {
                    name: "sdl".into(),
                    left: Some(OptionValue::Toggle(false)),
                    right: None,
                },
                Difference {
                    name: "vulkan".into(),
                    left: None,
                    right: Some(OptionValue::Toggle(false)),
                },
            ]
        );
        assert_eq!(d[1].to_string(), "sdl: no -> -");
    }

    #[test]
    fn identical_profiles_have_no_differences() {
        let a = load("sdl = \"no\"\n");
        assert!(diff(&a, &a).is_empty());
    }
}
