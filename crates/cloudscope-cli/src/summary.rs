use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use cloudscope_cli::orchestrator::ExportOutcome;

pub fn print_summary(outcomes: &[ExportOutcome]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Format"),
        header_cell("Status"),
        header_cell("File"),
        header_cell("Size"),
        header_cell("Notes"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);

    for outcome in outcomes {
        let format = Cell::new(outcome.format.label()).add_attribute(Attribute::Bold);
        let row = match &outcome.result {
            Ok(saved) => {
                let file = saved
                    .path
                    .as_ref()
                    .map_or_else(|| saved.file_name.clone(), |p| p.display().to_string());
                let status = if outcome.note.is_some() {
                    Cell::new("degraded").fg(Color::Yellow)
                } else {
                    Cell::new("saved").fg(Color::Green)
                };
                vec![
                    format,
                    status,
                    Cell::new(file),
                    Cell::new(format_size(saved.size)),
                    note_cell(outcome.note.as_deref()),
                ]
            }
            Err(error) => {
                let mut note = error.to_string();
                if let Some(hint) = error.suggestion() {
                    note.push('\n');
                    note.push_str(hint);
                }
                vec![
                    format,
                    Cell::new("failed")
                        .fg(Color::Red)
                        .add_attribute(Attribute::Bold),
                    dim_cell("-"),
                    dim_cell("-"),
                    Cell::new(note).fg(Color::Red),
                ]
            }
        };
        table.add_row(row);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}

fn note_cell(note: Option<&str>) -> Cell {
    match note {
        Some(note) => Cell::new(note).fg(Color::Yellow),
        None => dim_cell("-"),
    }
}

fn format_size(bytes: usize) -> String {
    const KIB: f64 = 1024.0;
    let bytes = bytes as f64;
    if bytes < KIB {
        format!("{bytes} B")
    } else if bytes < KIB * KIB {
        format!("{:.1} KiB", bytes / KIB)
    } else {
        format!("{:.1} MiB", bytes / (KIB * KIB))
    }
}
