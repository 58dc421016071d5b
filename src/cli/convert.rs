use super::ui;
use crate::core::catalog::{self, Currency};
use crate::core::convert;
use crate::core::CurrencyRateProvider;
use anyhow::{Context, Result};
use comfy_table::Cell;
use futures::future::join_all;
use tracing::warn;

#[derive(Debug)]
pub struct ConversionRow {
    pub to: &'static Currency,
    pub rate: Option<f64>,
    pub converted: String,
    pub error: Option<String>,
}

/// Resolves a code or search string to a catalog entry: exact code first,
/// then the first search match.
pub fn resolve(query: &str) -> Result<&'static Currency> {
    catalog::find(query)
        .or_else(|| catalog::filter(query).first().copied())
        .with_context(|| format!("No currency matches '{query}'"))
}

/// Converts `amount` into every target concurrently.
pub async fn convert_all(
    amount: &str,
    from: &'static Currency,
    targets: &[&'static Currency],
    provider: &(dyn CurrencyRateProvider + Send + Sync),
) -> Vec<ConversionRow> {
    let pb = if targets.len() == 1 {
        ui::new_spinner("Fetching rate...")
    } else {
        let pb = ui::new_progress_bar(targets.len() as u64, true);
        pb.set_message("Fetching rates...");
        pb
    };

    let futures = targets.iter().map(|&to| {
        let pb_clone = pb.clone();
        async move {
            let result = provider.get_rate(from.code, to.code).await;
            pb_clone.inc(1);
            match result {
                Ok(rate) => ConversionRow {
                    to,
                    rate,
                    converted: convert::convert(amount, rate),
                    error: None,
                },
                Err(e) => {
                    warn!(from = from.code, to = to.code, error = %e, "Rate fetch failed");
                    ConversionRow {
                        to,
                        rate: None,
                        converted: convert::convert(amount, None),
                        error: Some(e.to_string()),
                    }
                }
            }
        }
    });

    let rows = join_all(futures).await;
    pb.finish_and_clear();
    rows
}

pub fn display_as_table(amount: &str, from: &Currency, rows: &[ConversionRow]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Currency"),
        ui::header_cell(&format!("Rate (1 {})", from.code)),
        ui::header_cell(&format!("{} {}", amount, from.code)),
    ]);

    for row in rows {
        let rate = row
            .rate
            .map_or_else(|| ui::na_cell(row.error.is_some()), |r| Cell::new(format!("{r}")));
        let converted = if row.error.is_some() {
            ui::na_cell(true)
        } else {
            ui::value_cell(&row.converted)
        };
        table.add_row(vec![Cell::new(row.to.to_string()), rate, converted]);
    }

    table.to_string()
}

pub async fn run(
    amount: &str,
    from: &str,
    targets: &[String],
    provider: &(dyn CurrencyRateProvider + Send + Sync),
) -> Result<()> {
    let from = resolve(from)?;
    let targets = targets
        .iter()
        .map(|t| resolve(t))
        .collect::<Result<Vec<_>>>()?;

    let rows = convert_all(amount, from, &targets, provider).await;

    if let [row] = rows.as_slice() {
        if row.error.is_none() {
            println!(
                "{}",
                ui::style_text(
                    &convert::result_line(amount, from.code, row.to.code, row.rate, false),
                    ui::StyleType::Result
                )
            );
            return Ok(());
        }
    }

    println!("{}", display_as_table(amount, from, &rows));
    for row in rows.iter().filter(|r| r.error.is_some()) {
        eprintln!(
            "{}",
            ui::style_text(
                &format!(
                    "Failed to fetch {}/{}: {}",
                    from.code,
                    row.to.code,
                    row.error.as_deref().unwrap_or_default()
                ),
                ui::StyleType::Error
            )
        );
    }
    Ok(())
}
