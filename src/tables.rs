use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

use crate::core::{SensorKind, Sensors};

pub fn build_sensors_table(sensors: &Sensors) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED).apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.enforce_styling();
    table.set_header(vec!["Sensor", "State", "Updated", "Status"]);

    let updated_at = sensors
        .updated_at()
        .map_or_else(|| "never".to_string(), |at| at.format("%Y-%m-%d %H:%M:%S").to_string());
    let status = sensors.last_status().unwrap_or("pending");

    for kind in SensorKind::ALL {
        table.add_row(vec![
            Cell::new(kind).add_attribute(Attribute::Bold),
            sensors.state(kind).map_or_else(
                || Cell::new("unknown").fg(Color::DarkGrey),
                |state| Cell::new(state).set_alignment(CellAlignment::Right),
            ),
            Cell::new(&updated_at).add_attribute(Attribute::Dim),
            Cell::new(status).fg(if status == "ok" { Color::Green } else { Color::Red }),
        ]);
    }
    table
}
