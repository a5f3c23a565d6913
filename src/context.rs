/// Load-time knobs.
///
/// The default is strict: every key may be assigned once and advisories are
/// only reported.
#[derive(Debug, Clone, Copy, Default)]
pub struct Context {
    /// Let a later assignment replace an earlier one instead of failing with
    /// `DuplicateOption`. Matches how the build tool itself reads the file.
    pub allow_redefinition: bool,
    /// Treat advisories as failures in the CLI `check` command.
    pub deny_advisories: bool,
}

impl Context {
    pub fn strict() -> Self {
        Self::default()
    }

    pub fn lenient() -> Self {
        Self {
            allow_redefinition: true,
            ..Self::default()
        }
    }
}
