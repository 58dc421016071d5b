use super::ui;
use crate::core::catalog::{self, Currency};
use anyhow::Result;
use comfy_table::Cell;

pub fn display_as_table(currencies: &[&Currency]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Code"), ui::header_cell("Name")]);
    for currency in currencies {
        table.add_row(vec![Cell::new(currency.code), Cell::new(currency.name)]);
    }
    table.to_string()
}

/// Prints the catalog, filtered by `search` when given.
pub fn run(search: Option<&str>) -> Result<()> {
    let currencies = catalog::filter(search.unwrap_or_default());
    if currencies.is_empty() {
        println!(
            "{}",
            ui::style_text(
                &format!("No currency matches '{}'", search.unwrap_or_default()),
                ui::StyleType::Error
            )
        );
        return Ok(());
    }
    println!("{}", display_as_table(&currencies));
    Ok(())
}
