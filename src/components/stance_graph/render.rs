//! Canvas renderer: edges with per-stance width/dash, nodes with
//! per-variant radius/color, and a tooltip label on the hovered node.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::StanceGraphState;

const BACKGROUND: &str = "#fafafa";
const EDGE_ALPHA: f64 = 0.6;
const DIMMED_EDGE_ALPHA: f64 = 0.15;
const NODE_ALPHA: f64 = 0.9;
const DIMMED_NODE_ALPHA: f64 = 0.45;

/// Draw one frame.
pub fn render(state: &StanceGraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	draw_tooltip(state, ctx);
	ctx.restore();
}

fn set_dash(ctx: &CanvasRenderingContext2d, pattern: &[f64]) {
	let dash = js_sys::Array::new();
	for d in pattern {
		dash.push(&JsValue::from_f64(*d));
	}
	let _ = ctx.set_line_dash(&dash);
}

fn draw_edges(state: &StanceGraphState, ctx: &CanvasRenderingContext2d) {
	let hovering = state.hover.node.is_some();
	state.graph.visit_edges(|a, b, edge| {
		let v = &edge.user_data;
		let highlighted = state.is_highlighted(a.index()) && state.is_highlighted(b.index());
		let alpha = match (hovering, highlighted) {
			(true, false) => DIMMED_EDGE_ALPHA,
			_ => EDGE_ALPHA,
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(&v.color);
		ctx.set_line_width(v.stroke_width);
		set_dash(ctx, v.dash);
		ctx.begin_path();
		ctx.move_to(a.x() as f64, a.y() as f64);
		ctx.line_to(b.x() as f64, b.y() as f64);
		ctx.stroke();
	});
	set_dash(ctx, &[]);
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &StanceGraphState, ctx: &CanvasRenderingContext2d) {
	let hovering = state.hover.node.is_some();
	state.graph.visit_nodes(|node| {
		let v = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let r = v.base_radius * v.relevance.radius_scale();
		let alpha = if hovering && !state.is_highlighted(node.index()) {
			DIMMED_NODE_ALPHA
		} else {
			NODE_ALPHA
		};

		ctx.set_global_alpha(alpha);
		ctx.begin_path();
		let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&v.color);
		ctx.fill();
		ctx.set_line_width(1.0);
		ctx.set_stroke_style_str("black");
		ctx.stroke();

		if state.hover.node == Some(node.index()) {
			ctx.set_global_alpha(1.0);
			ctx.begin_path();
			let _ = ctx.arc(x, y, r + 3.0, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str("#333");
			ctx.set_line_width(1.5);
			ctx.stroke();
		}
	});
	ctx.set_global_alpha(1.0);
}

fn draw_tooltip(state: &StanceGraphState, ctx: &CanvasRenderingContext2d) {
	let Some(hovered) = state.hover.node else {
		return;
	};
	state.graph.visit_nodes(|node| {
		if node.index() != hovered {
			return;
		}
		let v = &node.data.user_data;
		let r = v.base_radius * v.relevance.radius_scale();
		ctx.set_font("bold 14px sans-serif");
		ctx.set_text_align("center");
		ctx.set_fill_style_str("black");
		let _ = ctx.fill_text(&v.label, node.x() as f64, node.y() as f64 - r - 8.0);
		ctx.set_text_align("start");
	});
}
