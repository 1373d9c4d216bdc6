// SPDX-License-Identifier: Apache-2.0

//! Table view of a `BuildDescriptor` for `--describe`.

use crate::command::BuildCommand;
use crate::types::Field;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

/// Placeholder shown for fields whose query produced nothing.
pub const UNAVAILABLE: &str = "(unavailable)";

/// Creates a new styled table with consistent formatting.
pub fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.apply_modifier(UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// One row per field: key, the Go variable it overrides, and its value.
/// Absent fields are listed too so it is obvious which flags will be skipped.
pub fn descriptor_table(command: &BuildCommand) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Field", "Variable", "Value"]);

    let package = &command.options().package;
    for field in Field::ALL {
        let value = command.descriptor().get(field).unwrap_or(UNAVAILABLE);
        table.add_row(vec![
            field.to_string(),
            format!("{}.{}", package, field.variable()),
            value.to_string(),
        ]);
    }
    table
}
