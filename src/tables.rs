use chrono_tz::Tz;
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};
use elspot::{AREAS, Area, MergeResult};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

/// Render the merged series in each area's local time.
pub fn build_prices_table(result: &MergeResult) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Area", "Date", "Start", "End", "Price"]);
    for series in result {
        let time_zone = Area::find(&series.code).map_or(Tz::UTC, |area| area.time_zone);
        #[expect(clippy::cast_precision_loss)]
        let mean_value = if series.records.is_empty() {
            0.0
        } else {
            series.records.iter().map(|record| record.value).sum::<f64>()
                / series.records.len() as f64
        };
        for record in &series.records {
            let start = record.start.with_timezone(&time_zone);
            table.add_row(vec![
                Cell::new(&series.code).add_attribute(Attribute::Bold),
                Cell::new(start.format("%b %d")).add_attribute(Attribute::Dim),
                Cell::new(start.format("%H:%M")),
                Cell::new(record.end.with_timezone(&time_zone).format("%H:%M"))
                    .add_attribute(Attribute::Dim),
                Cell::new(format!("{:.2}", record.value))
                    .set_alignment(CellAlignment::Right)
                    .fg(if record.value >= mean_value { Color::Red } else { Color::Green }),
            ]);
        }
    }
    table
}

pub fn build_areas_table() -> Table {
    let mut table = new_table();
    table.set_header(vec!["Area", "Country", "Time zone", "Hourly page"]);
    for area in AREAS {
        table.add_row(vec![
            Cell::new(area.code).add_attribute(Attribute::Bold),
            Cell::new(area.country),
            Cell::new(area.time_zone.name()),
            Cell::new(area.country.hourly_page().map_or_else(String::new, |page| page.to_string()))
                .set_alignment(CellAlignment::Right),
        ]);
    }
    table
}
