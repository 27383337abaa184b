//! Row parser: normalizes raw survey rows into the
//! `(theses, parties, stances)` triple the graph builder consumes.
//!
//! Input rows are thesis-major (one row per thesis, one column per party);
//! the builder wants party-major data, so the stance lists are transposed
//! at the end.

use std::collections::HashMap;

use thiserror::Error;

use super::types::Stance;

/// Column that carries the thesis text. All other columns are party names.
pub const THESIS_COLUMN: &str = "These";

/// One raw input row as ordered `(column, value)` pairs. Order matters: the
/// first row's column order fixes the party order for the whole dataset.
pub type SurveyRow = Vec<(String, String)>;

/// Fatal errors of the load pipeline. No partial survey is ever returned.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
	/// A row's column set disagrees with the first row's.
	#[error("row {row}: column set does not match the header row")]
	SchemaInconsistency {
		/// Zero-based data row index.
		row: usize,
	},

	/// A cell value outside the `{x, -, #, y}` vocabulary. No default stance
	/// is safe to assume.
	#[error("row {row}, column {column:?}: unrecognized stance code {code:?}")]
	UnknownStanceCode {
		/// Zero-based data row index.
		row: usize,
		/// Party column the bad cell was found in.
		column: String,
		/// The offending cell value.
		code: String,
	},
}

/// Normalized survey data, ready for graph construction.
#[derive(Clone, Debug, Default)]
pub struct ParsedSurvey {
	/// Thesis labels in input row order.
	pub theses: Vec<String>,
	/// Party names in first-row column order.
	pub parties: Vec<String>,
	/// Stance matrix indexed `[party][thesis]`.
	pub stances: Vec<Vec<Stance>>,
}

/// Parse raw rows into a [`ParsedSurvey`]. Pure function of its input.
///
/// The first row's key set is the schema: every later row must carry exactly
/// the same columns (in any order).
pub fn parse_rows(rows: &[SurveyRow]) -> Result<ParsedSurvey, ParseError> {
	let Some(first) = rows.first() else {
		return Ok(ParsedSurvey::default());
	};

	let parties: Vec<String> = first
		.iter()
		.map(|(column, _)| column)
		.filter(|column| *column != THESIS_COLUMN)
		.cloned()
		.collect();

	let mut theses = Vec::with_capacity(rows.len());
	let mut by_thesis: Vec<Vec<Stance>> = Vec::with_capacity(rows.len());

	for (row_idx, row) in rows.iter().enumerate() {
		let cells: HashMap<&str, &str> = row
			.iter()
			.map(|(column, value)| (column.as_str(), value.as_str()))
			.collect();
		// Same length and no duplicate columns, or the sets cannot match.
		if row.len() != first.len() || cells.len() != row.len() {
			return Err(ParseError::SchemaInconsistency { row: row_idx });
		}
		let Some(thesis) = cells.get(THESIS_COLUMN) else {
			return Err(ParseError::SchemaInconsistency { row: row_idx });
		};
		theses.push((*thesis).to_string());

		let mut row_stances = Vec::with_capacity(parties.len());
		for party in &parties {
			let Some(code) = cells.get(party.as_str()) else {
				return Err(ParseError::SchemaInconsistency { row: row_idx });
			};
			let stance =
				Stance::from_code(code).ok_or_else(|| ParseError::UnknownStanceCode {
					row: row_idx,
					column: party.clone(),
					code: (*code).to_string(),
				})?;
			row_stances.push(stance);
		}
		by_thesis.push(row_stances);
	}

	Ok(ParsedSurvey {
		stances: transpose(&by_thesis, parties.len()),
		theses,
		parties,
	})
}

/// Turn the thesis-major stance lists into the party-major matrix.
fn transpose(by_thesis: &[Vec<Stance>], n_parties: usize) -> Vec<Vec<Stance>> {
	(0..n_parties)
		.map(|party| by_thesis.iter().map(|row| row[party]).collect())
		.collect()
}
