use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use outreach_core::{Page, StatusCounts};
use outreach_model::{ActionEntry, FieldMapping, GuestField, GuestRecord, GuestStatus};
use outreach_store::{DataPaths, Settings};
use outreach_cli::workflow::{ImportReport, ReviewItem};

pub fn print_mapping(mapping: &FieldMapping) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Field"), header_cell("Column")]);
    apply_table_style(&mut table);
    for field in GuestField::ALL {
        let column = match mapping.column(field) {
            Some(column) => Cell::new(column).fg(Color::Green),
            None => dim_cell("Not detected"),
        };
        table.add_row(vec![Cell::new(field.label()), column]);
    }
    println!("{table}");
}

pub fn print_import_report(report: &ImportReport) {
    print_mapping(&report.mapping);
    println!("Imported {} guests.", report.imported);
    if !report.skipped_rows.is_empty() {
        let rows: Vec<String> = report.skipped_rows.iter().map(ToString::to_string).collect();
        println!("Skipped rows without a name: {}", rows.join(", "));
    }
    if let Some(path) = &report.stored_copy {
        println!("Edits will be written back to {}", path.display());
    }
}

pub fn print_stats(counts: &StatusCounts) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Status"), header_cell("Guests")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for status in GuestStatus::ALL {
        table.add_row(vec![
            status_cell(status),
            count_cell(counts.get(status), status_color(status)),
        ]);
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(counts.total()).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
    println!("{}% of guests have an address.", counts.completion_percent());
}

pub fn print_guest_page(page: &Page<'_>) {
    if page.total == 0 {
        println!("No guests found.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("ID"),
        header_cell("Name"),
        header_cell("Status"),
        header_cell("Address"),
        header_cell("Notes"),
        header_cell("Profile"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    for guest in &page.items {
        table.add_row(guest_row(guest));
    }
    println!("{table}");
    print_page_footer(page);
}

pub fn print_review(page: &Page<'_>, items: &[ReviewItem<'_>]) {
    if items.is_empty() {
        println!("No guests to review.");
        return;
    }
    for item in items {
        let guest = item.guest;
        println!(
            "#{} {} [{}]",
            guest.id,
            guest.name,
            guest.status.label()
        );
        if let Some(note) = &guest.note {
            println!("  Note:    {note}");
        }
        println!("  Message: {}", item.message);
        println!("  Link:    {}", item.link);
        println!();
    }
    print_page_footer(page);
}

pub fn print_guest(guest: &GuestRecord) {
    let mut table = Table::new();
    apply_table_style(&mut table);
    table.add_row(vec![Cell::new("ID"), Cell::new(guest.id)]);
    table.add_row(vec![Cell::new("Name"), Cell::new(&guest.name)]);
    table.add_row(vec![Cell::new("Status"), status_cell(guest.status)]);
    table.add_row(vec![Cell::new("Address"), optional_cell(guest.address.as_deref())]);
    table.add_row(vec![Cell::new("Notes"), optional_cell(guest.note.as_deref())]);
    table.add_row(vec![
        Cell::new("Profile"),
        optional_cell(guest.social_profile.as_deref()),
    ]);
    table.add_row(vec![
        Cell::new("Last action"),
        Cell::new(guest.last_action_at.format("%Y-%m-%d %H:%M")),
    ]);
    println!("{table}");
}

pub fn print_history<'a>(entries: impl IntoIterator<Item = &'a ActionEntry>) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("When"), header_cell("Action"), header_cell("Detail")]);
    apply_table_style(&mut table);
    let mut any = false;
    for entry in entries {
        any = true;
        table.add_row(vec![
            Cell::new(entry.ts.format("%Y-%m-%d %H:%M:%S")),
            Cell::new(&entry.action),
            Cell::new(&entry.meta),
        ]);
    }
    if any {
        println!("{table}");
    } else {
        println!("No actions recorded.");
    }
}

pub fn print_settings(paths: &DataPaths, settings: &Settings) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Setting"), header_cell("Value")]);
    apply_table_style(&mut table);
    let csv_path = settings
        .csv
        .file_path
        .as_ref()
        .map(|path| path.display().to_string());
    let wedding = &settings.wedding;
    let rows = [
        ("Data directory", Some(paths.root().display().to_string())),
        ("Sheet URL", settings.sheet.public_url.clone()),
        ("Sheet CSV export", settings.sheet.csv_url.clone()),
        ("Write-back CSV", csv_path),
        ("Ollama server", Some(settings.ollama.base.clone())),
        ("Ollama model", Some(settings.ollama.model.clone())),
        ("Bride", wedding.bride_name.clone()),
        ("Groom", wedding.groom_name.clone()),
        ("Wedding date", wedding.wedding_date.clone()),
        ("Message sender", Some(wedding.sender_name())),
    ];
    for (label, value) in rows {
        table.add_row(vec![Cell::new(label), optional_cell(value.as_deref())]);
    }
    println!("{table}");
}

fn print_page_footer(page: &Page<'_>) {
    println!(
        "Page {} of {} ({} guests)",
        page.page,
        page.total_pages(),
        page.total
    );
}

fn guest_row(guest: &GuestRecord) -> Vec<Cell> {
    vec![
        Cell::new(guest.id),
        Cell::new(&guest.name),
        status_cell(guest.status),
        optional_cell(guest.address.as_deref()),
        optional_cell(guest.note.as_deref()),
        optional_cell(guest.social_profile.as_deref()),
    ]
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
        .set_content_arrangement(ContentArrangement::Dynamic);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_color(status: GuestStatus) -> Color {
    match status {
        GuestStatus::NeedsAddress => Color::Yellow,
        GuestStatus::HasAddress => Color::Green,
        GuestStatus::Requested => Color::Blue,
        GuestStatus::NotOnFb => Color::Red,
    }
}

fn status_cell(status: GuestStatus) -> Cell {
    Cell::new(status.label()).fg(status_color(status))
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label).add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
