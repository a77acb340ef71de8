//! List command - Show installed cursor schemes

use anyhow::Result;
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};

/// Execute the list command and return formatted output.
#[cfg(windows)]
pub fn execute(json: bool) -> Result<String> {
    use crate::store::{ops, registry::RegistryStore};

    let store = RegistryStore;
    let records = ops::list_schemes(&store)?;
    if json {
        return Ok(serde_json::to_string_pretty(&records)?);
    }

    let current = ops::current_scheme(&store)?.map(|c| c.name);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Scheme"), Cell::new("Cursors"), Cell::new("Active")]);

    for record in &records {
        let bound = record
            .raw_value
            .split(',')
            .filter(|v| !v.trim().is_empty())
            .count();
        let active = if current.as_deref() == Some(record.name.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(bound),
            Cell::new(active),
        ]);
    }

    Ok(format!(
        "{}\n\n{} scheme(s) found",
        table,
        records.len()
    ))
}

/// Execute the list command and return formatted output.
#[cfg(not(windows))]
pub fn execute(json: bool) -> Result<String> {
    use crate::config;
    use crate::store::themes;

    let records = themes::list_themes(&config::icons_search_dirs()?)?;
    if json {
        return Ok(serde_json::to_string_pretty(&records)?);
    }

    let current = themes::current_theme().map(|c| c.name);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Theme"),
            Cell::new("Path"),
            Cell::new("Cursors"),
            Cell::new("Active"),
        ]);

    for record in &records {
        let active = if current.as_deref() == Some(record.name.as_str()) {
            "*"
        } else {
            ""
        };
        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(record.path.display()),
            Cell::new(record.cursor_count),
            Cell::new(active),
        ]);
    }

    Ok(format!(
        "{}\n\n{} theme(s) found",
        table,
        records.len()
    ))
}
