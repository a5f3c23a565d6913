use option_profile as op;
use op::{Context, OptionKind, OptionSpec, Profile, Schema};
use proptest::prelude::*;

// Values that need escaping in text form or quoting in argument form.
const AWKWARD: &[&str] = &["a\"b", "two words", "back\\slash", "tab\there", "'lead", "x#y"];

fn schema() -> Schema {
    let mut s = Schema::with_builtins();
    s.register(OptionSpec::new("custom_mode", OptionKind::Choice(AWKWARD), "awkward values"));
    s
}

// Generate (name, raw value) pairs drawn from the schema.
fn assignment() -> impl Strategy<Value = (String, String)> {
    let specs: Vec<OptionSpec> = schema().iter().cloned().collect();
    let ident = "[a-z][a-z0-9_]{0,11}";
    (0..specs.len(), ident, any::<bool>(), any::<prop::sample::Index>()).prop_map(
        move |(i, ident, flag, pick)| {
            let spec = &specs[i];
            let raw = match spec.kind {
                OptionKind::Toggle => if flag { "yes" } else { "no" }.to_string(),
                OptionKind::Choice(allowed) => pick.get(allowed).to_string(),
                OptionKind::Identifier => ident,
            };
            (spec.name.clone(), raw)
        },
    )
}

proptest! {
    #[test]
    fn text_and_args_reload_identically(
        name in "[a-z \n\"\\\\#]{0,12}",
        assignments in prop::collection::vec(assignment(), 0..40),
    ) {
        let schema = schema();
        let ctx = Context::strict();
        let mut profile = Profile::new(name.clone());
        for (option, raw) in &assignments {
            profile.set(option, raw, &schema).unwrap();
        }

        let from_text = Profile::load(name.clone(), &profile.to_text(), &schema, &ctx).unwrap();
        prop_assert_eq!(&from_text, &profile);

        let line = profile.to_scons_args();
        let from_line = Profile::from_arg_line(name.clone(), &line, &schema, &ctx).unwrap();
        prop_assert_eq!(&from_line, &profile);

        let from_args = Profile::from_args(name, profile.to_args(), &schema, &ctx).unwrap();
        prop_assert_eq!(&from_args, &profile);
    }
}
