//! Reusable UI components.

pub mod stance_graph;
