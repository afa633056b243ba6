//! Ambient backdrop of slow-drifting symbols behind the graph.
//!
//! Runs on its own animation-frame loop and shares no state with the
//! simulation; a viewport resize is the only external input.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

const SYMBOLS: &[&str] = &["☠", "👁", "🗝", "⚰", "🕯", "✦", "☥", "⛤", "⛧"];
const PARTICLE_COUNT: usize = 25;

struct Particle {
	x: f64,
	y: f64,
	vx: f64,
	vy: f64,
	symbol: &'static str,
	opacity: f64,
	size: f64,
}

fn spawn(width: f64, height: f64) -> Vec<Particle> {
	(0..PARTICLE_COUNT)
		.map(|_| {
			let rand = js_sys::Math::random;
			Particle {
				x: rand() * width,
				y: rand() * height,
				vx: (rand() - 0.5) * 0.2,
				vy: (rand() - 0.5) * 0.2,
				symbol: SYMBOLS[(rand() * SYMBOLS.len() as f64) as usize % SYMBOLS.len()],
				opacity: rand() * 0.15 + 0.03,
				size: rand() * 20.0 + 12.0,
			}
		})
		.collect()
}

fn step(particles: &mut [Particle], ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.clear_rect(0.0, 0.0, width, height);
	for p in particles {
		p.x += p.vx;
		p.y += p.vy;
		if p.x < 0.0 || p.x > width {
			p.vx = -p.vx;
		}
		if p.y < 0.0 || p.y > height {
			p.vy = -p.vy;
		}
		ctx.set_font(&format!("{}px serif", p.size));
		ctx.set_fill_style_str(&format!("rgba(197, 165, 114, {})", p.opacity));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(p.symbol, p.x, p.y);
	}
}

/// Fullscreen decorative particle canvas. Pointer events pass through it.
#[component]
pub fn ParticleBackdrop() -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (animate_init, resize_cb_init) = (animate.clone(), resize_cb.clone());

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

		let canvas_resize = canvas.clone();
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let win: Window = web_sys::window().unwrap();
			let (nw, nh) = (
				win.inner_width().unwrap().as_f64().unwrap(),
				win.inner_height().unwrap().as_f64().unwrap(),
			);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let mut particles = spawn(w, h);
		let (canvas_anim, animate_inner) = (canvas.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let (w, h) = (canvas_anim.width() as f64, canvas_anim.height() as f64);
			step(&mut particles, &ctx, w, h);
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

	view! { <canvas node_ref=canvas_ref class="particle-canvas" /> }
}
