//! Domain types for the stance graph: the `Stance` enum with its derived
//! simulation/stroke parameters, and the node/edge structures produced by
//! the graph builder.

/// Categorical position of a party on a thesis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stance {
	/// The party supports the thesis (`#` or `y` in the input).
	Agree,
	/// The party is undecided or abstains (`-`).
	Neutral,
	/// The party rejects the thesis (`x`).
	Disagree,
}

impl Stance {
	/// Decode a single-character cell code. Returns `None` for anything
	/// outside the `{x, -, #, y}` vocabulary.
	pub fn from_code(code: &str) -> Option<Self> {
		match code {
			"#" | "y" => Some(Stance::Agree),
			"-" => Some(Stance::Neutral),
			"x" => Some(Stance::Disagree),
			_ => None,
		}
	}

	// The numeric ordinal exists only here, at the point where the physical
	// parameters are computed.
	fn ordinal(self) -> f64 {
		match self {
			Stance::Agree => 0.0,
			Stance::Neutral => 1.0,
			Stance::Disagree => 2.0,
		}
	}

	/// Rest length of the edge in the simulation. Superlinear in the ordinal
	/// so disagreement pushes much further than the linear step from neutral
	/// would suggest: 10 for agree, 130 for neutral, ~643 for disagree.
	pub fn link_distance(self) -> f64 {
		self.ordinal().powf(2.4) * 120.0 + 10.0
	}

	/// Spring stiffness. Agreement and disagreement are equally firm
	/// constraints; a neutral stance is a loose one.
	pub fn link_strength(self) -> f64 {
		match self {
			Stance::Neutral => 0.1,
			Stance::Agree | Stance::Disagree => 1.0,
		}
	}

	/// Stroke width of the drawn edge, thickest for agreement.
	pub fn stroke_width(self) -> f64 {
		match self {
			Stance::Agree => 3.0,
			Stance::Neutral => 1.0,
			Stance::Disagree => 2.0,
		}
	}

	/// Canvas dash pattern of the drawn edge. Empty means solid.
	pub fn dash_pattern(self) -> &'static [f64] {
		match self {
			Stance::Agree => &[],
			Stance::Neutral => &[2.0, 2.0],
			Stance::Disagree => &[4.0, 2.0],
		}
	}
}

/// Stable node identifier, assigned once at graph construction. Edges refer
/// to nodes by id, never by position in the node list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Node variant. Radius and fill color are resolved per variant.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
	/// One survey question.
	Thesis,
	/// The single abstention anchor, pinned at the simulation origin.
	NeutralAnchor,
	/// One political party, with its resolved display color.
	Party {
		/// Fill color from the party palette.
		color: String,
	},
}

impl NodeKind {
	/// Drawn radius of this node variant.
	pub fn radius(&self) -> f64 {
		match self {
			NodeKind::Thesis => 7.0,
			NodeKind::NeutralAnchor => 4.0,
			NodeKind::Party { .. } => 12.0,
		}
	}

	/// Fill color of this node variant.
	pub fn color(&self) -> &str {
		match self {
			NodeKind::Thesis => "grey",
			NodeKind::NeutralAnchor => "white",
			NodeKind::Party { color } => color,
		}
	}
}

/// A node of the built graph.
#[derive(Clone, Debug)]
pub struct GraphNode {
	/// Stable identifier.
	pub id: NodeId,
	/// Display label (thesis text or party name).
	pub label: String,
	/// Variant with its rendering rule.
	pub kind: NodeKind,
}

/// Directed relation from a party (or the neutral anchor) to a thesis.
/// The simulation and stroke parameters are derived from `stance` on demand.
#[derive(Clone, Debug)]
pub struct StanceEdge {
	/// Party or neutral-anchor node.
	pub source: NodeId,
	/// Thesis node.
	pub target: NodeId,
	/// The agreement value carried by this edge.
	pub stance: Stance,
}

/// The complete built graph. Structurally immutable after construction;
/// only simulation coordinates and user-toggled relevance change later, and
/// those live in the simulation state, not here.
#[derive(Clone, Debug)]
pub struct StanceGraph {
	/// All nodes: theses, the neutral anchor, then parties.
	pub nodes: Vec<GraphNode>,
	/// One edge per (party, thesis) pair plus one neutral edge per thesis.
	pub edges: Vec<StanceEdge>,
	/// Id of the pinned neutral anchor.
	pub neutral: NodeId,
}
