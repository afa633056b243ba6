use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::state::GraphState;

const BACKGROUND: &str = "#14100C";
const LABEL_COLOR: &str = "#E8DCC4";
const NODE_STROKE: &str = "#C5A572";
const SELECTED_STROKE: &str = "#8B0000";

/// Opacity floor for nodes unrelated to the selection.
const DIMMED_NODE_ALPHA: f64 = 0.2;
/// Opacity floor for edges unrelated to the selection.
const DIMMED_EDGE_ALPHA: f64 = 0.05;
const NEIGHBOR_ALPHA: f64 = 0.8;
const EDGE_ALPHA: f64 = 0.5;
const HIGHLIGHT_EDGE_ALPHA: f64 = 0.9;

fn ease_out_cubic(t: f64) -> f64 {
	1.0 - (1.0 - t).powi(3)
}

/// Full clear-then-redraw of the current frame. Colors, radii, and widths
/// were fixed when the view was seeded; only coordinates change per tick.
pub fn render(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let mut positions: HashMap<DefaultNodeIdx, (f64, f64)> = HashMap::new();
	state.graph.visit_nodes(|node| {
		positions.insert(node.index(), (node.x() as f64, node.y() as f64));
	});

	draw_edges(state, ctx, &positions);
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edges(
	state: &GraphState,
	ctx: &CanvasRenderingContext2d,
	positions: &HashMap<DefaultNodeIdx, (f64, f64)>,
) {
	let t = ease_out_cubic(state.selection.highlight_t);

	for (src, tgt, visual) in state.edges() {
		let (Some(&(x1, y1)), Some(&(x2, y2))) = (positions.get(src), positions.get(tgt)) else {
			continue;
		};

		let incident = state.is_selected(*src) || state.is_selected(*tgt);
		let (alpha, width) = if incident {
			(
				EDGE_ALPHA + (HIGHLIGHT_EDGE_ALPHA - EDGE_ALPHA) * t,
				visual.width * (1.0 + 0.5 * t),
			)
		} else {
			(
				EDGE_ALPHA - (EDGE_ALPHA - DIMMED_EDGE_ALPHA) * t,
				visual.width,
			)
		};

		ctx.set_global_alpha(alpha);
		ctx.set_stroke_style_str(visual.color);
		ctx.set_line_width(width / state.transform.k);
		ctx.begin_path();
		ctx.move_to(x1, y1);
		ctx.line_to(x2, y2);
		ctx.stroke();
	}
	ctx.set_global_alpha(1.0);
}

fn draw_nodes(state: &GraphState, ctx: &CanvasRenderingContext2d) {
	let t = ease_out_cubic(state.selection.highlight_t);
	let k = state.transform.k;

	state.graph.visit_nodes(|node| {
		let idx = node.index();
		let visual = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);

		let selected = state.is_selected(idx);
		let neighbor = state.is_neighbor(idx);
		let alpha = if selected {
			1.0
		} else if neighbor {
			1.0 - (1.0 - NEIGHBOR_ALPHA) * t
		} else {
			1.0 - (1.0 - DIMMED_NODE_ALPHA) * t
		};

		ctx.set_global_alpha(alpha);

		if selected && t > 0.01 {
			let glow = ctx.create_radial_gradient(
				x,
				y,
				visual.radius * 0.3,
				x,
				y,
				visual.radius * 2.4,
			);
			if let Ok(gradient) = glow {
				let _ = gradient.add_color_stop(0.0, &format!("rgba(139, 0, 0, {})", 0.45 * t));
				let _ = gradient.add_color_stop(1.0, "rgba(139, 0, 0, 0)");
				ctx.begin_path();
				let _ = ctx.arc(x, y, visual.radius * 2.4, 0.0, 2.0 * PI);
				#[allow(deprecated)]
				ctx.set_fill_style(&gradient);
				ctx.fill();
			}
		}

		ctx.begin_path();
		let _ = ctx.arc(x, y, visual.radius, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(&visual.color);
		ctx.fill();

		if selected {
			ctx.set_stroke_style_str(SELECTED_STROKE);
			ctx.set_line_width(4.0 / k);
		} else {
			ctx.set_stroke_style_str(NODE_STROKE);
			ctx.set_line_width(2.0 / k);
		}
		ctx.stroke();

		ctx.set_fill_style_str(LABEL_COLOR);
		ctx.set_font(&format!("{}px serif", 9.0 / k.max(0.5)));
		ctx.set_text_align("center");
		let _ = ctx.fill_text(&visual.label, x, y - visual.radius - 6.0 / k);
	});

	ctx.set_global_alpha(1.0);
	ctx.set_text_align("start");
}
