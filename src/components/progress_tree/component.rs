//! Leptos component wrapping the progress tree canvas.
//!
//! The component creates an HTML canvas element, fetches the hierarchy once
//! and then runs an animation loop via `requestAnimationFrame` that advances
//! the scene's transitions and redraws each frame. Clicks are hit-tested
//! against the rendered nodes and either toggle a subtree or open the detail
//! dialog.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, info, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::config::TreeConfig;
use super::detail::NodeDetailDialog;
use super::render;
use super::source::fetch_hierarchy;
use super::theme::Theme;
use super::types::NodeDetail;
use super::view::{ClickOutcome, TreeView};

/// Width used when the parent container reports none.
const FALLBACK_WIDTH: f64 = 960.0;

/// Bundles the tree view with the canvas it draws on.
struct TreeContext {
	view: TreeView,
	theme: Theme,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	/// Whether the frame after the last transition has been drawn.
	settled_drawn: bool,
}

/// Current frame-clock time in milliseconds.
fn now() -> f64 {
	web_sys::window()
		.and_then(|w| w.performance())
		.map(|p| p.now())
		.unwrap_or(0.0)
}

/// Width of the mount element's bounding box, or of the canvas's parent
/// when no selector is configured.
fn container_width(canvas: &HtmlCanvasElement, selector: Option<&str>) -> Option<f64> {
	let container = match selector {
		Some(selector) => {
			let found = web_sys::window()
				.and_then(|w| w.document())
				.and_then(|d| d.query_selector(selector).ok().flatten());
			if found.is_none() {
				warn!("progress-tree: no element matches mount selector {selector}");
			}
			found
		}
		None => canvas.parent_element(),
	}?;
	Some(container.get_bounding_client_rect().width()).filter(|w| *w > 0.0)
}

/// Renders the collapsible progress tree described by `config`.
///
/// The canvas takes its parent's width unless `width` is given; its height
/// follows the depth currently shown.
#[component]
pub fn ProgressTreeCanvas(
	config: TreeConfig,
	#[prop(default = None)] width: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Rc<RefCell<Option<TreeContext>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
	let (detail, set_detail) = signal(None::<NodeDetail>);
	let (context_init, animate_init) = (context.clone(), animate.clone());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if context_init.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("progress-tree: canvas has no 2d context");
			return;
		};

		let w = width.unwrap_or_else(|| {
			container_width(&canvas, config.mount_selector.as_deref()).unwrap_or(FALLBACK_WIDTH)
		});
		canvas.set_width(w as u32);

		let config = config.clone();
		let (context_load, animate_load) = (context_init.clone(), animate_init.clone());
		wasm_bindgen_futures::spawn_local(async move {
			let root = match fetch_hierarchy(&config.data_url).await {
				Ok(root) => root,
				Err(e) => {
					error!("progress-tree: failed to load {}: {}", config.data_url, e);
					return;
				}
			};

			let mut view = TreeView::new(&root, config, w);
			let root_index = view.tree().root();
			view.update(root_index, now());
			info!("progress-tree: loaded {} nodes", view.tree().len());

			canvas.set_height(view.canvas_height(now()) as u32);
			*context_load.borrow_mut() = Some(TreeContext {
				view,
				theme: Theme::default(),
				canvas,
				ctx,
				settled_drawn: false,
			});

			let (context_anim, animate_inner) = (context_load.clone(), animate_load.clone());
			*animate_load.borrow_mut() = Some(Closure::new(move |now: f64| {
				if let Some(ref mut c) = *context_anim.borrow_mut() {
					c.view.tick(now);
					let animating = c.view.scene().is_animating(now);
					if animating || !c.settled_drawn {
						let height = c.view.canvas_height(now).round();
						if c.canvas.height() != height as u32 {
							c.canvas.set_height(height as u32);
						}
						let width = c.canvas.width() as f64;
						render::render(&c.view, &c.ctx, &c.theme, width, height, now);
						c.settled_drawn = !animating;
					}
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					if let Some(window) = web_sys::window() {
						let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
					}
				}
			}));
			if let Some(ref cb) = *animate_load.borrow() {
				if let Some(window) = web_sys::window() {
					let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		});
	});

	let context_click = context.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		let t = now();
		let outcome = {
			let mut guard = context_click.borrow_mut();
			let Some(c) = guard.as_mut() else {
				return;
			};
			let Some(index) = c.view.node_at(x, y, t) else {
				return;
			};
			c.view.click(index, t)
		};
		if let ClickOutcome::ShowDetail(d) = outcome {
			set_detail.set(Some(d));
		}
	};

	view! {
		<div class="progress-tree">
			<canvas
				node_ref=canvas_ref
				class="progress-tree-canvas"
				on:click=on_click
				style="display: block; cursor: pointer;"
			/>
			<NodeDetailDialog detail=detail on_close=set_detail />
		</div>
	}
}
