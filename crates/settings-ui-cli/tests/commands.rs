//! Integration tests for the command implementations.

use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;

use settings_ui_cli::commands::{
    PageSource, control_types, load_page, load_posted, register_page, render_page,
    sanitize_posted,
};

fn write_json(dir: &TempDir, name: &str, value: &serde_json::Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, value.to_string()).unwrap();
    path
}

fn source(dir: &TempDir) -> PageSource {
    let controls = write_json(
        dir,
        "controls.json",
        &json!({
            "title": {
                "ui": "text_input",
                "tab_id": "general",
                "short": "Title",
                "label": "Site title",
                "default": "",
            },
            "tagline": {
                "ui": "textarea",
                "tab_id": "general",
                "default": "",
                "grouped_with": "title",
            },
            "count": {"ui": "number_input", "tab_id": "advanced", "default": 3},
        }),
    );
    let options = write_json(
        dir,
        "options.json",
        &json!({"site": {"title": "My <Site>", "tagline": "Hello", "count": 7}}),
    );
    PageSource {
        controls,
        options: Some(options),
        options_key: "site".to_string(),
        prefix: "opt_".to_string(),
    }
}

#[test]
fn renders_top_level_controls() {
    let dir = TempDir::new().unwrap();
    let set = load_page(&source(&dir)).unwrap();
    insta::assert_snapshot!(render_page(&set, &[]).unwrap(), @r#"
    <fieldset><legend class="screen-reader-text">Title</legend><label for="opt_site[title]">Site title</label><input type="text" id="opt_site[title]" name="opt_site[title]" value="My &lt;Site&gt;"/><br /><div><textarea class="large-text" id="opt_site[tagline]" name="opt_site[tagline]">Hello</textarea></div></fieldset>
    <div><input type="number" id="opt_site[count]" name="opt_site[count]" value="7"/></div>
    "#);
}

#[test]
fn renders_requested_controls_only() {
    let dir = TempDir::new().unwrap();
    let set = load_page(&source(&dir)).unwrap();
    let markup = render_page(&set, &["count".to_string()]).unwrap();
    assert_eq!(
        markup,
        r#"<div><input type="number" id="opt_site[count]" name="opt_site[count]" value="7"/></div>"#
    );

    let error = render_page(&set, &["nope".to_string()]).unwrap_err();
    assert_eq!(error.to_string(), "unknown control 'nope'");
}

#[test]
fn registers_ungrouped_controls() {
    let dir = TempDir::new().unwrap();
    let set = load_page(&source(&dir)).unwrap();
    let fields = register_page(&set, "site_");
    let summary: Vec<(&str, &str, &str)> = fields
        .iter()
        .map(|field| (field.id.as_str(), field.page.as_str(), field.section.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("opt_site[title]", "site_general", "general"),
            ("opt_site[count]", "site_advanced", "advanced"),
        ]
    );
}

#[test]
fn sanitizes_posted_values() {
    let dir = TempDir::new().unwrap();
    let set = load_page(&source(&dir)).unwrap();
    let posted = write_json(
        &dir,
        "posted.json",
        &json!({"title": "  New <b>title</b> ", "count": "12", "_nonce": "abc"}),
    );
    let sanitized = sanitize_posted(&set, load_posted(&posted).unwrap());
    assert_eq!(
        serde_json::Value::Object(sanitized),
        json!({"title": "  New <b>title</b> ", "count": 12})
    );
}

#[test]
fn missing_options_file_means_empty_store() {
    let dir = TempDir::new().unwrap();
    let mut source = source(&dir);
    source.options = None;
    let set = load_page(&source).unwrap();
    assert_eq!(
        render_page(&set, &["count".to_string()]).unwrap(),
        r#"<div><input type="number" id="opt_site[count]" name="opt_site[count]" value=""/></div>"#
    );
}

#[test]
fn reports_configuration_errors() {
    let dir = TempDir::new().unwrap();
    let controls = write_json(
        &dir,
        "bad.json",
        &json!({"x": {"ui": "select", "tab_id": "t", "default": ""}}),
    );
    let error = load_page(&PageSource {
        controls,
        ..PageSource::default()
    })
    .unwrap_err();
    assert_eq!(
        format!("{error:#}"),
        "initialize controls: missing argument 'option_values'"
    );

    let missing = load_page(&PageSource {
        controls: dir.path().join("absent.json"),
        ..PageSource::default()
    })
    .unwrap_err();
    assert!(missing.to_string().starts_with("read "));
}

#[test]
fn lists_builtin_control_types() {
    let uis: Vec<&str> = control_types().into_iter().map(|(ui, _)| ui).collect();
    assert!(uis.contains(&"select"));
    assert!(uis.contains(&"submit_input"));
    assert_eq!(uis.len(), 9);
}
