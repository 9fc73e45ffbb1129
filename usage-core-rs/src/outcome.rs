//! Printable outcomes of a dispatched usage query
//!
//! The three providers return different shapes: Athena hands back an
//! execution id for a query that keeps running remotely, Azure Monitor Logs
//! returns headerless row tuples, and BigQuery returns a schema plus fully
//! materialized rows. `QueryOutcome` captures all three so the binaries can
//! share the printing boilerplate.

use serde_json::Value;

/// A single result row of mixed-type cells.
pub type Row = Vec<Value>;

/// The printable result of a one-shot usage query.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutcome {
    /// The provider accepted the query and runs it asynchronously; `message`
    /// carries the execution handle.
    Started { message: String },

    /// Fully materialized rows. With a header the table prints
    /// tab-separated; without one each row prints as a JSON array.
    Table { header: Option<Vec<String>>, rows: Vec<Row> },
}

impl QueryOutcome {
    /// Render the outcome as output lines, one per printed row.
    pub fn lines(&self) -> Vec<String> {
        match self {
            QueryOutcome::Started { message } => vec![message.clone()],
            QueryOutcome::Table { header, rows } => {
                let mut out = Vec::with_capacity(rows.len() + 1);
                match header {
                    Some(columns) => {
                        out.push(columns.join("\t"));
                        for row in rows {
                            out.push(
                                row.iter().map(cell_text).collect::<Vec<_>>().join("\t"),
                            );
                        }
                    }
                    None => {
                        for row in rows {
                            out.push(Value::Array(row.clone()).to_string());
                        }
                    }
                }
                out
            }
        }
    }

    /// Print the outcome to standard output.
    pub fn emit(&self) {
        for line in self.lines() {
            println!("{}", line);
        }
    }
}

/// Strings print bare; every other JSON value keeps its literal form.
fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
