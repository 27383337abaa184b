//! Two-tier party color lookup: a fixed table for the historically modeled
//! parties, with a cyclic categorical fallback for anything else.

use std::collections::HashMap;

use thiserror::Error;

/// Colors of the parties the dataset has historically contained.
const PARTY_COLORS: &[(&str, &str)] = &[
	("NEUTRAL", "#ffffff"),
	("SPD", "#e2001a"),
	("Linke", "#ff0000"),
	("CSU", "#0099ff"),
	("CDU", "#000"),
	("Piraten", "#ff8800"),
	("Grüne", "#64a12d"),
	("Frauen", "#7f1e48"),
	("FW", "#007e84"),
	("FDP", "#ffd600"),
	("REP", "#964b00"),
	("NPD", "#964b00"),
	("ÖDP", "#ea7c13"),
];

/// Fallback palette for unrecognized party names, one color per name in
/// first-encounter order.
const GENERATED_COLORS: &[&str] = &[
	"#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
	"#bcbd22", "#17becf",
];

/// More distinct unrecognized party names than fallback colors.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("{needed} unrecognized parties exceed the {available} fallback colors")]
pub struct PaletteExhausted {
	/// Distinct unrecognized names seen so far, including the current one.
	pub needed: usize,
	/// Size of the fallback palette.
	pub available: usize,
}

/// Party color resolver. Each unrecognized name is assigned one fallback
/// slot when first seen and keeps it for the palette's lifetime.
#[derive(Debug, Default)]
pub struct PartyPalette {
	slots: HashMap<String, usize>,
}

impl PartyPalette {
	/// New palette with no fallback slots assigned.
	pub fn new() -> Self {
		Self::default()
	}

	fn fixed(party: &str) -> Option<&'static str> {
		PARTY_COLORS
			.iter()
			.find(|(name, _)| *name == party)
			.map(|(_, color)| *color)
	}

	fn slot(&mut self, party: &str) -> usize {
		let next = self.slots.len();
		*self.slots.entry(party.to_string()).or_insert(next)
	}

	/// Resolve a party color. Fails with [`PaletteExhausted`] once more
	/// distinct unrecognized names than fallback colors have been seen.
	pub fn color_for(&mut self, party: &str) -> Result<&'static str, PaletteExhausted> {
		if let Some(color) = Self::fixed(party) {
			return Ok(color);
		}
		let slot = self.slot(party);
		if slot >= GENERATED_COLORS.len() {
			return Err(PaletteExhausted {
				needed: slot + 1,
				available: GENERATED_COLORS.len(),
			});
		}
		Ok(GENERATED_COLORS[slot])
	}

	/// Best-effort variant: wraps around the fallback palette instead of
	/// failing, so rendering can proceed with repeating colors.
	pub fn color_for_lossy(&mut self, party: &str) -> &'static str {
		if let Some(color) = Self::fixed(party) {
			return color;
		}
		let slot = self.slot(party);
		GENERATED_COLORS[slot % GENERATED_COLORS.len()]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn known_parties_hit_the_fixed_table() {
		let mut palette = PartyPalette::new();
		assert_eq!(palette.color_for("CSU").unwrap(), "#0099ff");
		assert_eq!(palette.color_for("SPD").unwrap(), "#e2001a");
		assert_eq!(palette.color_for("Grüne").unwrap(), "#64a12d");
	}

	#[test]
	fn unknown_parties_get_cached_fallback_colors() {
		let mut palette = PartyPalette::new();
		let first = palette.color_for("Bayernpartei").unwrap();
		let second = palette.color_for("Violetten").unwrap();
		assert_ne!(first, second);
		// Stable on repeat lookup.
		assert_eq!(palette.color_for("Bayernpartei").unwrap(), first);
		// Never collides with the fixed table.
		assert!(!PARTY_COLORS.iter().any(|(_, c)| *c == first));
	}

	#[test]
	fn assignment_is_deterministic_by_encounter_order() {
		let mut a = PartyPalette::new();
		let mut b = PartyPalette::new();
		for name in ["P1", "P2", "P3"] {
			assert_eq!(a.color_for(name).unwrap(), b.color_for(name).unwrap());
		}
	}

	#[test]
	fn exhaustion_fails_then_wraps_in_lossy_mode() {
		let mut palette = PartyPalette::new();
		let names: Vec<String> = (0..11).map(|i| format!("Partei {i}")).collect();
		for name in &names[..10] {
			palette.color_for(name).unwrap();
		}
		assert_eq!(
			palette.color_for(&names[10]).unwrap_err(),
			PaletteExhausted { needed: 11, available: 10 }
		);
		// Lossy lookup reuses the palette from the start.
		let wrapped = palette.color_for_lossy(&names[10]);
		assert_eq!(wrapped, palette.color_for_lossy(&names[0]));
	}

	#[test]
	fn fixed_lookups_do_not_consume_fallback_slots() {
		let mut palette = PartyPalette::new();
		palette.color_for("CSU").unwrap();
		palette.color_for("FDP").unwrap();
		assert_eq!(palette.color_for("Unbekannt").unwrap(), GENERATED_COLORS[0]);
	}
}
