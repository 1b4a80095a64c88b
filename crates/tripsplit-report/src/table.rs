//! Tabular export: one row per expense.
//!
//! Columns: timestamp, description, amount, payer, comma-joined
//! beneficiaries. Spreadsheet writers consume [`ExpenseTable`] directly;
//! [`ExpenseTable::to_delimited`] writes it out with the `csv` crate.

use serde::Serialize;
use tripsplit_ledger::Ledger;
use tripsplit_types::{Result, TripsplitError};

/// Header plus rendered rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpenseTable {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ExpenseTable {
    #[must_use]
    pub fn from_ledger(ledger: &Ledger) -> Self {
        let config = ledger.config();
        let header = vec![
            "Timestamp".to_string(),
            "Description".to_string(),
            format!("Amount ({})", config.currency_code),
            "Payer".to_string(),
            "Beneficiaries".to_string(),
        ];
        let rows = ledger
            .expenses()
            .iter()
            .map(|e| {
                vec![
                    e.formatted_timestamp(),
                    e.description.clone(),
                    config.format_amount(e.amount),
                    e.payer.clone(),
                    e.beneficiary_list(),
                ]
            })
            .collect();
        Self { header, rows }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Render header and rows as delimited text, one record per line.
    ///
    /// Cells containing the delimiter, a quote or a line break are quoted,
    /// with inner quotes doubled.
    ///
    /// # Errors
    /// Returns [`TripsplitError::Serialization`] if the writer fails.
    pub fn to_delimited(&self, delimiter: u8) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(delimiter)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(Vec::new());
        for record in std::iter::once(&self.header).chain(&self.rows) {
            writer.write_record(record).map_err(serialization)?;
        }
        let bytes = writer.into_inner().map_err(serialization)?;
        String::from_utf8(bytes).map_err(serialization)
    }
}

fn serialization(err: impl std::fmt::Display) -> TripsplitError {
    TripsplitError::Serialization(err.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use rust_decimal::Decimal;

    use super::*;

    fn ledger() -> Ledger {
        let mut ledger = Ledger::with_participants(&["A", "B"]);
        let ts = Utc.with_ymd_and_hms(2024, 5, 2, 20, 0, 0).unwrap();
        ledger
            .add_expense_at(Decimal::new(4550, 2), "A", ["A", "B"], "Pizza \"XL\"", ts)
            .unwrap();
        ledger
            .add_expense_at(Decimal::new(12, 0), "B", ["A"], "Water", ts)
            .unwrap();
        ledger
    }

    #[test]
    fn header_names_currency() {
        let table = ExpenseTable::from_ledger(&ledger());
        assert_eq!(
            table.header,
            vec!["Timestamp", "Description", "Amount (INR)", "Payer", "Beneficiaries"]
        );
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn rows_follow_expense_order() {
        let table = ExpenseTable::from_ledger(&ledger());
        assert_eq!(
            table.rows[0],
            vec!["2024-05-02 20:00:00", "Pizza \"XL\"", "₹45.50", "A", "A, B"]
        );
        assert_eq!(table.rows[1][1], "Water");
    }

    #[test]
    fn delimited_output_quotes_when_needed() {
        let csv = ExpenseTable::from_ledger(&ledger()).to_delimited(b',').unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "Timestamp,Description,Amount (INR),Payer,Beneficiaries");
        assert_eq!(
            lines[1],
            "2024-05-02 20:00:00,\"Pizza \"\"XL\"\"\",₹45.50,A,\"A, B\""
        );
        assert_eq!(lines[2], "2024-05-02 20:00:00,Water,₹12.00,B,A");
    }

    #[test]
    fn other_delimiters_quote_their_own_character() {
        let mut ledger = Ledger::with_participants(&["A"]);
        let ts = Utc.with_ymd_and_hms(2024, 5, 3, 8, 0, 0).unwrap();
        ledger
            .add_expense_at(Decimal::new(3, 0), "A", ["A"], "tea; biscuits", ts)
            .unwrap();

        let text = ExpenseTable::from_ledger(&ledger).to_delimited(b';').unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some("2024-05-03 08:00:00;\"tea; biscuits\";₹3.00;A;A")
        );
    }

    #[test]
    fn empty_ledger_has_header_only() {
        let table = ExpenseTable::from_ledger(&Ledger::default());
        assert!(table.is_empty());
        assert_eq!(table.to_delimited(b'\t').unwrap().lines().count(), 1);
    }

    #[test]
    fn table_serializes_to_json() {
        let json = serde_json::to_string(&ExpenseTable::from_ledger(&ledger())).unwrap();
        assert!(json.contains("\"Amount (INR)\""));
    }
}
