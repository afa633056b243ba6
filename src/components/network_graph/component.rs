use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::state::{GraphState, ZoomCommand};
use crate::data::filter::FilteredView;

/// Hover card contents raised to the page while the pointer rests on a node.
#[derive(Clone, Debug, PartialEq)]
pub struct TooltipInfo {
	pub name: String,
	pub node_type: String,
	pub cohort_year: Option<i32>,
	pub position: Option<String>,
	pub connections: u32,
	/// Pointer position in viewport coordinates.
	pub x: f64,
	pub y: f64,
}

/// Pixels of pointer travel before a press counts as a drag, not a click.
const CLICK_SLOP: f64 = 4.0;

/// Fullscreen canvas driving the force simulation for the current view.
///
/// Re-seeds the simulation whenever `view` changes; `selected` only adjusts
/// the highlight partition and never restarts the layout.
#[component]
pub fn NetworkCanvas(
	#[prop(into)] view: Signal<FilteredView>,
	#[prop(into)] selected: Signal<Option<String>>,
	zoom: RwSignal<Option<ZoomCommand>>,
	#[prop(into)] on_select: Callback<String>,
	#[prop(into)] on_hover: Callback<Option<TooltipInfo>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let hovered_id: Rc<RefCell<Option<String>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let window: Window = web_sys::window().unwrap();

		let (w, h) = (
			window.inner_width().unwrap().as_f64().unwrap(),
			window.inner_height().unwrap().as_f64().unwrap(),
		);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		*state_init.borrow_mut() = Some(GraphState::new(&view.get_untracked(), w, h));

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if let Some(Some(cmd)) = zoom.try_update(|z| z.take()) {
					s.apply_zoom(cmd);
				}
				s.tick(0.016);
				render::render(s, &ctx);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Re-seed on every view change so removed nodes stop being simulated.
	let state_seed = state.clone();
	Effect::new(move |_| {
		let v = view.get();
		if let Some(ref mut s) = *state_seed.borrow_mut() {
			s.reseed(&v);
		}
	});

	// Selection only re-partitions the highlight.
	let state_sel = state.clone();
	Effect::new(move |_| {
		let id = selected.get();
		if let Some(ref mut s) = *state_sel.borrow_mut() {
			s.set_selected(id);
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_md.borrow_mut() {
			if let Some(idx) = s.node_at_position(x, y) {
				s.drag.active = true;
				s.drag.moved = false;
				s.drag.node_idx = Some(idx);
				s.drag.start_x = x;
				s.drag.start_y = y;
				s.graph.visit_nodes(|node| {
					if node.index() == idx {
						s.drag.node_start_x = node.x();
						s.drag.node_start_y = node.y();
					}
				});
			} else {
				s.pan.active = true;
				s.pan.moved = false;
				s.pan.start_x = x;
				s.pan.start_y = y;
				s.pan.transform_start_x = s.transform.x;
				s.pan.transform_start_y = s.transform.y;
			}
		}
	};

	let (state_mm, hovered_mm) = (state.clone(), hovered_id.clone());
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_mm.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					let (dx, dy) = (
						(x - s.drag.start_x) / s.transform.k,
						(y - s.drag.start_y) / s.transform.k,
					);
					if dx.abs() + dy.abs() > CLICK_SLOP {
						s.drag.moved = true;
					}
					s.pin_drag_target(
						idx,
						s.drag.node_start_x + dx as f32,
						s.drag.node_start_y + dy as f32,
					);
				}
				return;
			}
			if s.pan.active {
				s.pan.moved = true;
				s.transform.x = s.pan.transform_start_x + (x - s.pan.start_x);
				s.transform.y = s.pan.transform_start_y + (y - s.pan.start_y);
				return;
			}

			let id = s.node_at_position(x, y).and_then(|idx| s.node_id(idx));
			let mut hovered = hovered_mm.borrow_mut();
			if *hovered != id {
				*hovered = id.clone();
				let info = id.and_then(|id| {
					view.with_untracked(|v| {
						v.node(&id).map(|n| TooltipInfo {
							name: n.name.clone(),
							node_type: n.node_type.clone(),
							cohort_year: n.cohort_year,
							position: n.position.clone(),
							connections: n.connection_count(),
							x: ev.client_x() as f64 + 15.0,
							y: ev.client_y() as f64 + 15.0,
						})
					})
				});
				on_hover.run(info);
			}
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let mut clicked = None;
		if let Some(ref mut s) = *state_mu.borrow_mut() {
			if s.drag.active {
				if let Some(idx) = s.drag.node_idx {
					// Pins are not kept: the node resumes free movement.
					s.release_drag_target(idx);
					if !s.drag.moved {
						clicked = s.node_id(idx);
					}
				}
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
		if let Some(id) = clicked {
			on_select.run(id);
		}
	};

	let (state_ml, hovered_ml) = (state.clone(), hovered_id.clone());
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			if let Some(idx) = s.drag.node_idx {
				s.release_drag_target(idx);
			}
			s.drag.active = false;
			s.drag.node_idx = None;
			s.pan.active = false;
		}
		*hovered_ml.borrow_mut() = None;
		on_hover.run(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			s.zoom_about(x, y, factor);
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="network-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
