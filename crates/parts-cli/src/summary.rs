use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use parts_model::{RefreshReport, Snapshot};
use parts_resolve::{AggregateRow, ResolvedPart, SectionPrefixes};

pub fn print_report(report: &RefreshReport) {
    println!("Output: {}", report.output.display());
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Rows before"),
        header_cell("Rows after"),
        header_cell("Added"),
        header_cell("Removed"),
        header_cell("Changed"),
        header_cell("Status"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 0..5 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    table.add_row(vec![
        Cell::new(report.rows_before),
        Cell::new(report.rows_after).add_attribute(Attribute::Bold),
        count_cell(report.diff.added, Color::Green),
        count_cell(report.diff.removed, Color::Red),
        count_cell(report.diff.changed, Color::Yellow),
        if report.updated {
            Cell::new("updated")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            dim_cell("unchanged")
        },
    ]);
    println!("{table}");

    if !report.exports.is_empty() {
        let mut exports = Table::new();
        exports.set_header(vec![header_cell("Category table"), header_cell("Rows")]);
        apply_table_style(&mut exports);
        align_column(&mut exports, 1, CellAlignment::Right);
        for (name, rows) in &report.exports {
            exports.add_row(vec![Cell::new(name), Cell::new(rows)]);
        }
        println!();
        println!("Category exports:");
        println!("{exports}");
    }

    if !report.failures.is_empty() {
        eprintln!("Failed sources:");
        for failure in &report.failures {
            eprintln!("- {} ({}): {}", failure.name, failure.origin, failure.reason);
        }
    }
}

pub fn print_aggregate(rows: &[AggregateRow]) {
    if rows.is_empty() {
        println!("No part tokens found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Qty"),
        header_cell("Code"),
        header_cell("Part Type"),
        header_cell("Name"),
        header_cell("Stats"),
    ]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for row in rows {
        let type_cell = if row.part_type == ResolvedPart::UNKNOWN {
            Cell::new(&row.part_type).fg(Color::Red)
        } else {
            Cell::new(&row.part_type).fg(Color::Blue)
        };
        table.add_row(vec![
            Cell::new(row.quantity).add_attribute(Attribute::Bold),
            Cell::new(&row.code),
            type_cell,
            Cell::new(&row.display),
            if row.stats.is_empty() {
                dim_cell("-")
            } else {
                Cell::new(&row.stats)
            },
        ]);
    }
    println!("{table}");
}

pub fn print_snapshot(snapshot: &Snapshot) {
    println!("Generated: {}", non_empty(&snapshot.generated_at));
    println!("Rows: {}", snapshot.len());
    if !snapshot.key_fields.is_empty() {
        println!("Dedup key: {}", snapshot.key_fields.join(" + "));
    }
    println!("Columns: {}", snapshot.columns.join(", "));

    let mut per_source: BTreeMap<&str, usize> = BTreeMap::new();
    for row in &snapshot.rows {
        *per_source.entry(row.source.as_str()).or_default() += 1;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Source"),
        header_cell("Origin"),
        header_cell("Rows"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Right);
    for source in &snapshot.sources {
        let rows = per_source.remove(source.name.as_str()).unwrap_or(0);
        table.add_row(vec![
            Cell::new(&source.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(&source.origin),
            count_cell(rows, Color::Reset),
        ]);
    }
    for (name, rows) in per_source {
        table.add_row(vec![Cell::new(name), dim_cell("-"), Cell::new(rows)]);
    }
    println!("{table}");
}

pub fn print_sections(sections: &SectionPrefixes) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Section"), header_cell("Source prefixes")]);
    apply_table_style(&mut table);
    for (section, prefixes) in sections.sections() {
        let prefixes = if prefixes.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(prefixes.join(", "))
        };
        table.add_row(vec![Cell::new(section).fg(Color::Blue), prefixes]);
    }
    println!("{table}");
}

fn non_empty(value: &str) -> &str {
    if value.is_empty() { "-" } else { value }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color)
    } else {
        dim_cell(count)
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
