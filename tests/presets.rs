use option_profile as op;
use op::{presets, Schema};
use pretty_assertions::assert_eq;

fn both() -> (op::Profile, op::Profile) {
    let schema = Schema::with_builtins();
    (
        presets::load("plugin_ui", &schema).unwrap(),
        presets::load("plugin_ui_3d", &schema).unwrap(),
    )
}

#[test]
fn test_presets_listed() {
    assert_eq!(presets::names().collect::<Vec<_>>(), vec!["plugin_ui", "plugin_ui_3d"]);
}

#[test]
fn test_presets_are_independent() {
    let (ui, ui3d) = both();
    assert_eq!(ui.toggle("disable_3d"), Some(true));
    assert_eq!(ui3d.toggle("disable_3d"), Some(false));
    assert_eq!(ui.toggle("module_text_server_adv_enabled"), Some(false));
    assert_eq!(ui3d.toggle("module_text_server_adv_enabled"), Some(true));
    assert_eq!(ui3d.toggle("module_text_server_fb_enabled"), Some(false));

    let names: Vec<_> = op::diff(&ui, &ui3d).into_iter().map(|d| d.name).collect();
    assert!(names.contains(&"disable_3d".to_string()));
    assert!(names.contains(&"module_noise_enabled".to_string()));
    assert!(names.contains(&"module_bullet_enabled".to_string()));
}

#[test]
fn test_presets_share_build_type() {
    let (ui, ui3d) = both();
    for key in ["library_type", "target", "optimize", "production"] {
        assert_eq!(ui.get(key), ui3d.get(key), "{key}");
    }
}

#[test]
fn test_presets_have_no_advisories() {
    let (ui, ui3d) = both();
    assert!(op::advisory::check(&ui).is_empty());
    assert!(op::advisory::check(&ui3d).is_empty());
}

#[test]
fn test_preset_toggles_are_yes_or_no() {
    let schema = Schema::with_builtins();
    let (ui, _) = both();
    for e in ui.iter() {
        if schema.get(&e.name).unwrap().kind == op::OptionKind::Toggle {
            let text = e.value.to_string();
            assert!(text == "yes" || text == "no", "{}: {text}", e.name);
        }
    }
}
