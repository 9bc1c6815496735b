use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::render;
use super::scene::{MapScene, NodeSummary};
use super::state::SupplyMapState;
use super::tiles::TileCache;
use crate::api::GraphData;
use crate::components::legend::Legend;
use crate::config::MapOptions;

type SharedState = Rc<RefCell<Option<SupplyMapState>>>;
type SharedClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// World map of the current graph. Clicking a marker reports its id.
#[component]
pub fn SupplyMap(
	#[prop(into)] graph: Signal<Arc<GraphData>>,
	#[prop(into)] selection: Signal<Option<String>>,
	on_select: Callback<String>,
	#[prop(optional)] options: Option<MapOptions>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let hover = RwSignal::new(Option::<(String, f64, f64)>::None);
	let scene = Memo::new(move |_| {
		graph.with(|g| selection.with(|sel| MapScene::build(g, sel.as_deref())))
	});

	let state: SharedState = Rc::new(RefCell::new(None));
	let animate: SharedClosure = Rc::new(RefCell::new(None));
	let resize_cb: SharedClosure = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());
	let options = options.unwrap_or_default();

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			log::warn!("supply map: 2d canvas context unavailable");
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		let mut initial = SupplyMapState::new(options.clone(), w, h);
		initial.set_scene(scene.get_untracked());
		initial.fit_to_scene();
		*state_init.borrow_mut() = Some(initial);

		let (state_resize, canvas_resize) = (state_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let mut tiles = TileCache::new();
		let (state_anim, animate_inner, resize_inner) =
			(state_init.clone(), animate_init.clone(), resize_cb_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			if !canvas.is_connected() {
				if let Some(cb) = resize_inner.borrow_mut().take() {
					let _ = win.remove_event_listener_with_callback(
						"resize",
						cb.as_ref().unchecked_ref(),
					);
				}
				log::debug!("supply map detached, stopping render loop");
				return;
			}
			if let Some(ref mut s) = *state_anim.borrow_mut() {
				if s.dirty || tiles.loaded.replace(false) {
					render::render(s, &mut tiles, &ctx);
					s.dirty = false;
				}
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let state_scene = state.clone();
	Effect::new(move |_| {
		let next = scene.get();
		if let Some(ref mut s) = *state_scene.borrow_mut() {
			s.set_scene(next);
		}
	});

	// Refit only when the node set is replaced, not on selection changes.
	let state_fit = state.clone();
	Effect::new(move |_| {
		graph.track();
		hover.set(None);
		if let Some(ref mut s) = *state_fit.borrow_mut() {
			s.replace_scene(scene.get_untracked());
		}
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_md.borrow_mut() {
			s.press(x, y);
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			s.pointer_move(x, y);
			hover.set(s.hovered.clone().map(|id| (id, x, y)));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |ev: MouseEvent| {
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		let clicked = state_mu
			.borrow_mut()
			.as_mut()
			.and_then(|s| s.release(x, y));
		if let Some(id) = clicked {
			on_select.run(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.leave();
		}
		hover.set(None);
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let Some((x, y)) = local_point(canvas_ref, &ev) else {
			return;
		};
		if let Some(ref mut s) = *state_wh.borrow_mut() {
			s.wheel(x, y, ev.delta_y());
		}
	};

	let tooltip = move || {
		let (id, x, y) = hover.get()?;
		let summary = graph.with(|g| NodeSummary::of(g, &id))?;
		let supplies = summary.supplies_line();
		Some(view! {
			<div class="map-tooltip" style=format!("left: {}px; top: {}px;", x + 14.0, y + 14.0)>
				<strong>{summary.name.clone()}</strong>
				<div>{summary.subtitle()}</div>
				{supplies.map(|line| view! { <div class="map-tooltip-supplies">{line}</div> })}
			</div>
		})
	};

	view! {
		<div class="supply-map" style="position: relative; width: 100%; height: 100%; min-height: 400px;">
			<canvas
				node_ref=canvas_ref
				class="supply-map-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
				style=move || {
					if hover.with(|h| h.is_some()) {
						"display: block; cursor: pointer;"
					} else {
						"display: block; cursor: grab;"
					}
				}
			/>
			{tooltip}
			<Legend />
		</div>
	}
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.or_else(|| {
			let win: Window = web_sys::window()?;
			Some((
				win.inner_width().ok()?.as_f64()?,
				win.inner_height().ok()?.as_f64()?,
			))
		})
		.unwrap_or((800.0, 600.0))
}

fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}
