//! Tabular export of probe outcomes

use crate::prober::ProbeOutcome;
use crate::report::classify::classify;
use crate::ReportError;
use std::io::Write;

/// Value used in the title/price columns of outcomes without products
pub const PLACEHOLDER: &str = "—";

/// Header row of the CSV export
pub const CSV_HEADER: [&str; 5] = ["URL", "Shopify", "Currency", "Product Title", "Price"];

/// One row of the tabular export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub url: String,
    pub storefront: String,
    pub currency: String,
    pub title: String,
    pub price: String,
}

impl TableRow {
    fn as_record(&self) -> [&str; 5] {
        [
            &self.url,
            &self.storefront,
            &self.currency,
            &self.title,
            &self.price,
        ]
    }
}

/// Flattens outcomes into rows
///
/// Each product of an outcome becomes one row; an outcome without products
/// becomes exactly one placeholder row. Rows follow outcome order, then
/// product order. Titles are written untruncated.
pub fn table_rows(outcomes: &[ProbeOutcome]) -> Vec<TableRow> {
    let mut rows = Vec::new();

    for outcome in outcomes {
        let storefront = classify(outcome).table_label().to_string();
        let row = |title: &str, price: &str| TableRow {
            url: outcome.target().to_string(),
            storefront: storefront.clone(),
            currency: outcome.currency_symbol().to_string(),
            title: title.to_string(),
            price: price.to_string(),
        };

        if outcome.products().is_empty() {
            rows.push(row(PLACEHOLDER, PLACEHOLDER));
        } else {
            rows.extend(
                outcome
                    .products()
                    .iter()
                    .map(|p| row(&p.title, &p.price_range)),
            );
        }
    }

    rows
}

/// Writes rows as CSV, header first
pub fn write_csv<W: Write>(rows: &[TableRow], writer: W) -> Result<(), ReportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for row in rows {
        wtr.write_record(row.as_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Renders rows as CSV bytes
pub fn csv_bytes(rows: &[TableRow]) -> Result<Vec<u8>, ReportError> {
    let mut buffer = Vec::new();
    write_csv(rows, &mut buffer)?;
    Ok(buffer)
}
