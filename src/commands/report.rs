use crate::args::Args;
use crate::commands::Out;
use crate::filter::{RecordFilter, Rule};
use crate::{dir, statement, Result};
use serde::Serialize;
use tracing::info;

/// What a report run accomplished.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Summary {
    /// The number of statement files processed.
    statements: usize,
    /// The number of lines appended to the report across all statements.
    lines_written: usize,
}

impl Summary {
    pub fn statements(&self) -> usize {
        self.statements
    }

    pub fn lines_written(&self) -> usize {
        self.lines_written
    }
}

/// Builds the expense report: finds the statement CSVs directly inside the statements directory
/// and appends each one's matching records to the report, in filename order. The first statement
/// that fails stops the run; blocks already appended for earlier statements stay in the report.
pub fn report(args: &Args) -> Result<Out<Summary>> {
    info!(
        "Generating expense report for {}/{}",
        args.month(),
        args.year()
    );

    let rules = args
        .exclude_description()
        .iter()
        .map(|needle| Rule::DescriptionContains(needle.clone()))
        .collect();
    let filter = RecordFilter::new(args.month(), args.year(), rules);

    let mut summary = Summary::default();
    for path in dir::csv_files(args.statements().path())? {
        info!("Processing statement {}", path.display());
        summary.lines_written += statement::process(&path, &filter)?;
        summary.statements += 1;
    }

    Ok(Out::new(
        format!(
            "Wrote {} lines from {} statements to the expense report",
            summary.lines_written, summary.statements
        ),
        summary,
    ))
}
