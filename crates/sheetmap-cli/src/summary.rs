use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use sheetmap_model::{CellValue, Mapping, Rule, Table as DataTable, Workbook};

use sheetmap_cli::types::RunResult;

pub fn print_sheets(workbook: &Workbook) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Sheet"),
        header_cell("Rows"),
        header_cell("Columns"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for sheet in &workbook.sheets {
        table.add_row(vec![
            Cell::new(&sheet.name)
                .fg(Color::Blue)
                .add_attribute(Attribute::Bold),
            Cell::new(sheet.table.row_count()),
            Cell::new(sheet.table.column_names().join(", ")),
        ]);
    }
    println!("{table}");
}

pub fn print_mapping(mapping: &Mapping, target_columns: &[String]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Target"),
        header_cell("Rule"),
        header_cell("Value"),
    ]);
    apply_table_style(&mut table);
    for target in target_columns {
        let rule = mapping.get(target).cloned().unwrap_or_default();
        table.add_row(vec![Cell::new(target), rule_cell(&rule), value_cell(&rule)]);
    }
    println!("{table}");
}

pub fn print_run(result: &RunResult, preview: usize) {
    println!("Source sheet: {}", result.source_sheet);
    println!("Target sheet: {}", result.target_sheet);
    for notice in &result.notices {
        eprintln!("warning: {notice}");
    }

    print_mapping(&result.mapping, &result.output.column_names());
    println!(
        "Filled: {} / {} target columns",
        result.summary.filled, result.summary.total
    );
    if !result.summary.manual_columns.is_empty() {
        println!("Manual: {}", result.summary.manual_columns.join(", "));
    }
    for (target, source) in &result.report.missing_sources {
        eprintln!("warning: source column '{source}' for '{target}' not found; left empty");
    }

    if preview > 0 {
        println!();
        let rows = result.output.row_count();
        println!("Preview ({} of {rows} rows):", preview.min(rows));
        print_preview(&result.output.head(preview));
    }
    if let Some(id) = &result.saved_template {
        println!("Template saved: {id}");
    }
    if let Some(path) = &result.output_path {
        println!("Output: {}", path.display());
    }
}

fn print_preview(data: &DataTable) {
    let mut table = Table::new();
    table.set_header(
        data.columns()
            .iter()
            .map(|column| header_cell(&column.name))
            .collect::<Vec<_>>(),
    );
    apply_wide_table_style(&mut table);
    for index in 0..data.row_count() {
        let Some(row) = data.row(index) else {
            continue;
        };
        table.add_row(row.into_iter().map(data_cell).collect::<Vec<_>>());
    }
    println!("{table}");
}

pub fn print_template_ids(ids: &[String]) {
    if ids.is_empty() {
        println!("No saved templates.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Template")]);
    apply_table_style(&mut table);
    for id in ids {
        table.add_row(vec![Cell::new(id)]);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

pub fn apply_wide_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn rule_cell(rule: &Rule) -> Cell {
    match rule {
        Rule::Blank => dim_cell("blank"),
        Rule::Source(_) => Cell::new("source").fg(Color::Green),
        Rule::Manual(_) => Cell::new("manual").fg(Color::Yellow),
    }
}

fn value_cell(rule: &Rule) -> Cell {
    match rule {
        Rule::Blank => dim_cell("-"),
        Rule::Source(column) => Cell::new(column),
        Rule::Manual(value) => Cell::new(format!("\"{value}\"")),
    }
}

fn data_cell(value: &CellValue) -> Cell {
    match value {
        CellValue::Null => dim_cell(""),
        CellValue::Int(_) | CellValue::Float(_) => {
            Cell::new(value).set_alignment(CellAlignment::Right)
        }
        _ => Cell::new(value),
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
