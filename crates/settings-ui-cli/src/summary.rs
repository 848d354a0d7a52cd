use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use settings_ui_core::SettingsField;

pub fn print_fields(fields: &[SettingsField]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Field"),
        header_cell("Title"),
        header_cell("Control"),
        header_cell("Page"),
        header_cell("Section"),
        header_cell("Args"),
    ]);
    apply_table_style(&mut table);
    for field in fields {
        let args = if field.args.is_empty() {
            Cell::new("-").fg(Color::DarkGrey)
        } else {
            Cell::new(serde_json::Value::Object(field.args.clone()).to_string())
        };
        table.add_row(vec![
            Cell::new(&field.id),
            Cell::new(&field.title),
            Cell::new(&field.render_callback),
            Cell::new(&field.page),
            Cell::new(&field.section),
            args,
        ]);
    }
    println!("{table}");
    println!("{} field(s) registered", fields.len());
}

pub fn print_control_types(types: &[(&str, &str)]) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("UI"), header_cell("Description")]);
    apply_table_style(&mut table);
    for (ui, description) in types {
        table.add_row(vec![*ui, *description]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}
