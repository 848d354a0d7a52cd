//! End-to-end tests for a settings page built from a control table.

use std::sync::Arc;

use serde_json::{Value, json};
use settings_ui_core::{
    ControlSet, ControlTable, MemoryOptions, RecordingRegistrar, SettingsField, initialize,
};
use settings_ui_model::ControlArgs;

fn page(stored: Value) -> ControlSet {
    let table = ControlTable::from_value(json!({
        "limit": {
            "ui": "number_input",
            "tab_id": "general",
            "default": 10,
            "label": "Limit",
            "grouped_with": "enable",
        },
        "enable": {
            "ui": "checkbox_input",
            "tab_id": "general",
            "section": "main",
            "short": "Enable",
            "label": "%1$s Enable the thing",
            "help_text": "Turns it <em>on</em>.",
            "default": false,
        },
        "mode": {
            "ui": "select",
            "tab_id": "general",
            "short": "Mode",
            "default": "fast",
            "option_values": {"fast": "Fast", "safe": "Safe & sound"},
            "settings_args": {"label_for": "mode"},
        },
        "save": {
            "ui": "submit_input",
            "tab_id": "general",
            "default": "Save",
            "button_class": "button button-primary",
        },
        "about": {
            "ui": "display_text",
            "tab_id": "about",
            "elements": ["<p>Version <code>1.0</code></p>", "<img src=\"x.png\"/>"],
        },
    }))
    .unwrap();

    let options = Arc::new(MemoryOptions::new("wp_"));
    options.set("settings", stored);
    initialize(&table, options, "settings").unwrap()
}

#[test]
fn grouped_control_renders_children_in_fieldset() {
    let set = page(json!({"enable": true, "limit": 0}));
    insta::assert_snapshot!(
        set.render_control("enable").unwrap(),
        @r#"<fieldset><legend class="screen-reader-text">Enable</legend><label for="wp_settings[enable]"><input type="checkbox" id="wp_settings[enable]" name="wp_settings[enable]" aria-describedby="wp_settings[enable]-description" value="1" checked="checked"/> Enable the thing</label><p id="wp_settings[enable]-description" class="description">Turns it <em>on</em>.</p><br /><div><label for="wp_settings[limit]">Limit</label><input type="number" id="wp_settings[limit]" name="wp_settings[limit]" value="0"/></div></fieldset>"#
    );
}

#[test]
fn select_renders_only_known_value_as_selected() {
    let set = page(json!({"mode": "safe"}));
    insta::assert_snapshot!(
        set.render_control("mode").unwrap(),
        @r#"<div><select id="wp_settings[mode]" name="wp_settings[mode]"><option value="fast">Fast</option><option value="safe" selected="selected">Safe &amp; sound</option></select></div>"#
    );

    let set = page(json!({"mode": "turbo"}));
    assert!(!set.render_control("mode").unwrap().contains("selected"));
}

#[test]
fn submit_and_display_text() {
    let set = page(json!({}));
    assert_eq!(
        set.render_control("save").unwrap(),
        concat!(
            r#"<div><input type="submit" name="wp_settings[save]" "#,
            r#"class="button button-primary" value="Save"/></div>"#
        )
    );
    assert_eq!(
        set.render_control("about").unwrap(),
        "<div><p>Version <code>1.0</code></p></div>"
    );
    assert!(set.render_control("missing").is_none());
}

#[test]
fn only_ungrouped_controls_register() {
    let set = page(json!({}));
    let mut registrar = RecordingRegistrar::new();
    set.register_all("my_plugin_", &mut registrar);

    let ids: Vec<&str> = registrar
        .fields()
        .iter()
        .map(|field| field.render_callback.as_str())
        .collect();
    assert_eq!(ids, vec!["enable", "mode", "save", "about"]);

    assert_eq!(
        registrar.fields()[1],
        SettingsField {
            id: "wp_settings[mode]".to_string(),
            title: "Mode".to_string(),
            render_callback: "mode".to_string(),
            page: "my_plugin_general".to_string(),
            section: "general".to_string(),
            args: json!({"label_for": "mode"}).as_object().cloned().unwrap(),
        }
    );
    assert_eq!(registrar.fields()[3].page, "my_plugin_about");
}

#[test]
fn posted_values_are_sanitized_per_type() {
    let set = page(json!({}));
    assert_eq!(set.sanitize("limit", json!("42 apples")), Some(json!(42)));
    assert_eq!(set.sanitize("enable", json!("")), Some(json!(false)));
    assert_eq!(set.sanitize("mode", json!("<b>safe</b>")), Some(json!("safe")));
    assert_eq!(set.sanitize("about", json!("anything")), Some(json!("")));
    assert_eq!(set.sanitize("nope", json!(1)), None);
}

#[test]
fn values_resolve_without_defaults() {
    let set = page(json!({"limit": 5}));
    let limit = set.get("limit").unwrap();
    assert_eq!(limit.get_value(), json!(5));

    let enable = set.get("enable").unwrap();
    assert_eq!(enable.get_value(), Value::Null);
    assert_eq!(enable.get_default(), &json!(false));
}

#[test]
fn closures_can_sanitize() {
    let table = ControlTable::new().with(
        "slug",
        ControlArgs::new()
            .with("ui", "text_input")
            .with("tab_id", "general")
            .with("default", "")
            .with_sanitize_callback(|value| {
                json!(value.as_str().unwrap_or_default().to_lowercase())
            }),
    );
    let set = initialize(&table, Arc::new(MemoryOptions::new("")), "").unwrap();
    assert_eq!(set.sanitize("slug", json!("Hello")), Some(json!("hello")));
}
