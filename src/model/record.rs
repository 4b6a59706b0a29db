use crate::model::Layout;
use crate::Result;
use anyhow::Context;
use csv::StringRecord;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// The three-field representation common to all banks: the date, description and amount strings
/// lifted from one statement row. The values are copied verbatim; no reformatting of the date or
/// amount takes place.
#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Record {
    date: String,
    description: String,
    amount: String,
}

impl Record {
    /// Lifts the layout's three columns out of a raw statement row. A row that has no field at
    /// one of the layout's column indices is an error.
    pub fn from_row(row: &StringRecord, layout: &Layout) -> Result<Self> {
        Ok(Self {
            date: field(row, layout.date())?,
            description: field(row, layout.description())?,
            amount: field(row, layout.amount())?,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }
}

impl Display for Record {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{},{}", self.date, self.description, self.amount)
    }
}

fn field(row: &StringRecord, ix: usize) -> Result<String> {
    Ok(row
        .get(ix)
        .with_context(|| format!("The row {row:?} has no field at column index {ix}"))?
        .to_string())
}
