//! Force-directed political landscape: survey data pipeline, graph
//! construction and the interactive canvas view.

mod builder;
mod component;
mod dataset;
mod palette;
mod parser;
mod render;
mod state;
mod types;

pub use builder::build_graph;
pub use component::StanceGraphCanvas;
pub use dataset::{BAYERN_2013, rows_from_tsv};
pub use palette::PaletteExhausted;
pub use parser::{THESIS_COLUMN, ParseError, ParsedSurvey, SurveyRow, parse_rows};
pub use types::{GraphNode, NodeId, NodeKind, Stance, StanceEdge, StanceGraph};
