use super::ui;
use crate::core::CurrencyRegistry;
use comfy_table::Table;

const CODES_PER_ROW: usize = 10;

pub fn run(registry: &CurrencyRegistry) {
    println!(
        "\n{}",
        ui::style_text(
            &format!("Supported currencies ({})", registry.len()),
            ui::StyleType::Title
        )
    );
    println!("{}", codes_table(registry));
}

/// Lays the sorted codes out in rows of fixed width.
pub fn codes_table(registry: &CurrencyRegistry) -> Table {
    let mut table = ui::new_styled_table();
    let codes = registry.sorted_codes();
    for row in codes.chunks(CODES_PER_ROW) {
        table.add_row(row.iter().map(|code| ui::code_cell(code)));
    }
    table
}
