//! The embedded survey dataset and the thin delimited-text adapter that
//! turns it into ordered row records for the parser.

use super::parser::{ParseError, SurveyRow};

/// Wahl-O-Mat Bayern 2013: one row per thesis, one column per party.
pub const BAYERN_2013: &str = include_str!("../../../data/bayern2013.tsv");

/// Split tab-separated text into row records, zipping each data line with
/// the header line. Blank lines are skipped; a line with a different cell
/// count than the header cannot match the schema and aborts the load.
pub fn rows_from_tsv(text: &str) -> Result<Vec<SurveyRow>, ParseError> {
	let mut lines = text.lines();
	let Some(header) = lines.next() else {
		return Ok(Vec::new());
	};
	let columns: Vec<&str> = header.split('\t').collect();

	let mut rows = Vec::new();
	for line in lines {
		if line.trim().is_empty() {
			continue;
		}
		let cells: Vec<&str> = line.split('\t').collect();
		if cells.len() != columns.len() {
			return Err(ParseError::SchemaInconsistency { row: rows.len() });
		}
		rows.push(
			columns
				.iter()
				.zip(cells)
				.map(|(column, cell)| (column.to_string(), cell.to_string()))
				.collect(),
		);
	}
	Ok(rows)
}
