//! Graph builder: turns a parsed survey into the typed node/edge graph.
//!
//! Construction order: thesis nodes, the neutral anchor, one neutral edge
//! per thesis, party nodes, then one stance edge per (party, thesis) cell.
//! The neutral edges give every thesis the same loose pull toward the pinned
//! anchor, so the initial layout settles into a ring around the center.

use log::warn;

use super::palette::PartyPalette;
use super::parser::ParsedSurvey;
use super::types::{GraphNode, NodeId, NodeKind, Stance, StanceEdge, StanceGraph};

/// Build the stance graph from a parsed survey.
///
/// Infallible: the only non-structural failure, running out of fallback
/// party colors, is logged once and degrades to repeating colors.
pub fn build_graph(survey: &ParsedSurvey) -> StanceGraph {
	let n_theses = survey.theses.len();
	let n_parties = survey.parties.len();
	let mut nodes = Vec::with_capacity(n_theses + 1 + n_parties);
	let mut edges = Vec::with_capacity(n_theses * (n_parties + 1));

	let thesis_ids: Vec<NodeId> = survey
		.theses
		.iter()
		.map(|label| {
			let id = NodeId(nodes.len());
			nodes.push(GraphNode {
				id,
				label: label.clone(),
				kind: NodeKind::Thesis,
			});
			id
		})
		.collect();

	let neutral = NodeId(nodes.len());
	nodes.push(GraphNode {
		id: neutral,
		label: "Neutral".to_string(),
		kind: NodeKind::NeutralAnchor,
	});
	for &thesis in &thesis_ids {
		edges.push(StanceEdge {
			source: neutral,
			target: thesis,
			stance: Stance::Neutral,
		});
	}

	let mut palette = PartyPalette::new();
	let mut palette_warned = false;
	let party_ids: Vec<NodeId> = survey
		.parties
		.iter()
		.map(|name| {
			let color = palette.color_for(name).unwrap_or_else(|err| {
				if !palette_warned {
					warn!("{err}; party colors will repeat");
					palette_warned = true;
				}
				palette.color_for_lossy(name)
			});
			let id = NodeId(nodes.len());
			nodes.push(GraphNode {
				id,
				label: name.clone(),
				kind: NodeKind::Party { color: color.to_string() },
			});
			id
		})
		.collect();

	for (party, per_party) in survey.stances.iter().enumerate() {
		for (thesis, &stance) in per_party.iter().enumerate() {
			edges.push(StanceEdge {
				source: party_ids[party],
				target: thesis_ids[thesis],
				stance,
			});
		}
	}

	StanceGraph { nodes, edges, neutral }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::stance_graph::parser::{parse_rows, SurveyRow};

	fn survey(rows: &[&[(&str, &str)]]) -> ParsedSurvey {
		let rows: Vec<SurveyRow> = rows
			.iter()
			.map(|row| {
				row.iter()
					.map(|(c, v)| (c.to_string(), v.to_string()))
					.collect()
			})
			.collect();
		parse_rows(&rows).unwrap()
	}

	fn example() -> ParsedSurvey {
		survey(&[
			&[("These", "Q1"), ("A", "#"), ("B", "x")],
			&[("These", "Q2"), ("A", "-"), ("B", "#")],
		])
	}

	#[test]
	fn node_and_edge_counts_follow_the_survey_shape() {
		let graph = build_graph(&example());
		// 2 theses + 1 neutral + 2 parties.
		assert_eq!(graph.nodes.len(), 5);
		// 2 neutral edges + 2 * 2 stance edges.
		assert_eq!(graph.edges.len(), 6);
	}

	#[test]
	fn every_thesis_gets_exactly_one_neutral_edge() {
		let graph = build_graph(&example());
		let thesis_ids: Vec<NodeId> = graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::Thesis)
			.map(|n| n.id)
			.collect();
		for thesis in thesis_ids {
			let neutral_edges: Vec<_> = graph
				.edges
				.iter()
				.filter(|e| e.source == graph.neutral && e.target == thesis)
				.collect();
			assert_eq!(neutral_edges.len(), 1);
			assert_eq!(neutral_edges[0].stance, Stance::Neutral);
		}
	}

	#[test]
	fn exactly_one_neutral_anchor_exists() {
		let graph = build_graph(&example());
		let anchors: Vec<_> = graph
			.nodes
			.iter()
			.filter(|n| n.kind == NodeKind::NeutralAnchor)
			.collect();
		assert_eq!(anchors.len(), 1);
		assert_eq!(anchors[0].id, graph.neutral);
	}

	#[test]
	fn stance_edges_carry_the_matrix_values() {
		let graph = build_graph(&example());
		let node = |label: &str| graph.nodes.iter().find(|n| n.label == label).unwrap().id;
		let stance_of = |source: NodeId, target: NodeId| {
			graph
				.edges
				.iter()
				.find(|e| e.source == source && e.target == target)
				.unwrap()
				.stance
		};
		assert_eq!(stance_of(node("A"), node("Q1")), Stance::Agree);
		assert_eq!(stance_of(node("A"), node("Q2")), Stance::Neutral);
		assert_eq!(stance_of(node("B"), node("Q1")), Stance::Disagree);
		assert_eq!(stance_of(node("B"), node("Q2")), Stance::Agree);
	}

	#[test]
	fn node_ids_are_unique_and_edges_reference_existing_nodes() {
		let graph = build_graph(&example());
		let mut ids: Vec<usize> = graph.nodes.iter().map(|n| n.id.0).collect();
		ids.sort_unstable();
		ids.dedup();
		assert_eq!(ids.len(), graph.nodes.len());
		for edge in &graph.edges {
			assert!(graph.nodes.iter().any(|n| n.id == edge.source));
			assert!(graph.nodes.iter().any(|n| n.id == edge.target));
		}
	}

	#[test]
	fn known_parties_keep_their_table_colors() {
		let graph = build_graph(&survey(&[&[("These", "Q1"), ("CSU", "#"), ("SPD", "x")]]));
		let color = |label: &str| {
			graph
				.nodes
				.iter()
				.find(|n| n.label == label)
				.unwrap()
				.kind
				.color()
				.to_string()
		};
		assert_eq!(color("CSU"), "#0099ff");
		assert_eq!(color("SPD"), "#e2001a");
	}

	#[test]
	fn too_many_unknown_parties_degrades_to_repeating_colors() {
		let header: Vec<(String, String)> = std::iter::once(("These".to_string(), "Q1".to_string()))
			.chain((0..12).map(|i| (format!("Partei {i}"), "#".to_string())))
			.collect();
		let survey = parse_rows(&[header]).unwrap();
		let graph = build_graph(&survey);
		// Still builds: 1 thesis + 1 neutral + 12 parties.
		assert_eq!(graph.nodes.len(), 14);
		let color = |label: String| {
			graph
				.nodes
				.iter()
				.find(|n| n.label == label)
				.unwrap()
				.kind
				.color()
				.to_string()
		};
		// The 11th unknown wraps around to the first fallback color.
		assert_eq!(color("Partei 10".into()), color("Partei 0".into()));
		assert_ne!(color("Partei 1".into()), color("Partei 0".into()));
	}
}
