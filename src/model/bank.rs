//! Bank classification and per-bank statement column layouts.

use crate::Result;
use anyhow::bail;
use serde::{Deserialize, Serialize};

/// Identifies which bank, and which account type, a statement file came from. The bank is
/// inferred once from the statement's filename and decides the column layout for every row in
/// the file.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bank {
    /// The filename matched none of the known banks. There is no column layout for `Unknown`, so
    /// trying to process such a statement is an error.
    #[default]
    Unknown,
    BofaChecking,
    BofaCredit,
    Discover,
    Chase,
}

serde_plain::derive_display_from_serialize!(Bank);
serde_plain::derive_fromstr_from_deserialize!(Bank);

/// Filename tests applied in order; the first that matches decides the bank. Matching is
/// case-sensitive on the raw filename.
const CLASSIFIERS: &[(fn(&str) -> bool, Bank)] = &[
    (|name| name.starts_with("discover"), Bank::Discover),
    (|name| name.contains("chase"), Bank::Chase),
    (
        |name| name.contains("bofa") && name.contains("check"),
        Bank::BofaChecking,
    ),
    (|name| name.contains("bofa"), Bank::BofaCredit),
];

impl Bank {
    /// Determines the bank from a statement's filename (the base name, not a full path).
    pub fn classify(filename: &str) -> Bank {
        for (test, bank) in CLASSIFIERS {
            if test(filename) {
                return *bank;
            }
        }
        Bank::Unknown
    }

    /// Returns the column layout for this bank, or an error when no layout is known, which is
    /// always the case for `Unknown`.
    pub fn layout(&self) -> Result<&'static Layout> {
        match LAYOUTS.iter().find(|(bank, _)| bank == self) {
            Some((_, layout)) => Ok(layout),
            None => bail!("No column layout is known for bank '{self}'"),
        }
    }
}

/// The fixed mapping from record fields to zero-based CSV column indices for one bank's export
/// format, along with the number of preamble rows that bank emits above the header.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Layout {
    date: usize,
    description: usize,
    amount: usize,
    preamble_rows: usize,
}

impl Layout {
    /// The column holding the transaction date.
    pub fn date(&self) -> usize {
        self.date
    }

    /// The column holding the transaction description.
    pub fn description(&self) -> usize {
        self.description
    }

    /// The column holding the transaction amount.
    pub fn amount(&self) -> usize {
        self.amount
    }

    /// How many rows the bank's export places above the CSV header. These carry no transaction
    /// data and are discarded before any other processing.
    pub fn preamble_rows(&self) -> usize {
        self.preamble_rows
    }
}

/// One row per supported bank. Supporting a new bank means adding a row here and a classifier
/// above.
const LAYOUTS: &[(Bank, Layout)] = &[
    (
        Bank::BofaChecking,
        Layout {
            date: 0,
            description: 1,
            amount: 2,
            preamble_rows: 7,
        },
    ),
    (
        Bank::BofaCredit,
        Layout {
            date: 0,
            description: 2,
            amount: 4,
            preamble_rows: 0,
        },
    ),
    (
        Bank::Discover,
        Layout {
            date: 0,
            description: 2,
            amount: 3,
            preamble_rows: 0,
        },
    ),
    (
        Bank::Chase,
        Layout {
            date: 0,
            description: 2,
            amount: 5,
            preamble_rows: 0,
        },
    ),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_classify_discover_is_a_prefix() {
        assert_eq!(Bank::classify("discover_2024_01.csv"), Bank::Discover);
        assert_eq!(Bank::classify("my_discover.csv"), Bank::Unknown);
    }

    #[test]
    fn test_classify_chase_outranks_bofa() {
        assert_eq!(Bank::classify("chase_and_bofa.csv"), Bank::Chase);
        assert_eq!(Bank::classify("bofa_chase.csv"), Bank::Chase);
    }

    #[test]
    fn test_classify_bofa() {
        assert_eq!(Bank::classify("bofa_credit_jan.csv"), Bank::BofaCredit);
        assert_eq!(Bank::classify("bofa_checking_jan.csv"), Bank::BofaChecking);
        assert_eq!(Bank::classify("check_bofa.csv"), Bank::BofaChecking);
    }

    #[test]
    fn test_classify_is_case_sensitive() {
        assert_eq!(Bank::classify("Chase.csv"), Bank::Unknown);
        assert_eq!(Bank::classify("DISCOVER.CSV"), Bank::Unknown);
        assert_eq!(Bank::classify("BofA_check.csv"), Bank::Unknown);
    }

    #[test]
    fn test_classify_unknown() {
        assert_eq!(Bank::classify("statement.csv"), Bank::Unknown);
        assert_eq!(Bank::classify(""), Bank::Unknown);
    }

    #[test]
    fn test_layout_table() {
        let layout = Bank::BofaChecking.layout().unwrap();
        assert_eq!(
            (layout.date(), layout.description(), layout.amount()),
            (0, 1, 2)
        );
        assert_eq!(layout.preamble_rows(), 7);

        let layout = Bank::BofaCredit.layout().unwrap();
        assert_eq!(
            (layout.date(), layout.description(), layout.amount()),
            (0, 2, 4)
        );
        assert_eq!(layout.preamble_rows(), 0);

        let layout = Bank::Discover.layout().unwrap();
        assert_eq!(
            (layout.date(), layout.description(), layout.amount()),
            (0, 2, 3)
        );

        let layout = Bank::Chase.layout().unwrap();
        assert_eq!(
            (layout.date(), layout.description(), layout.amount()),
            (0, 2, 5)
        );
    }

    #[test]
    fn test_unknown_has_no_layout() {
        assert!(Bank::Unknown.layout().is_err());
    }
}
