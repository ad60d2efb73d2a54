//! progress-tree: Collapsible tree visualization with animated progress rings.
//!
//! This crate provides a WASM-based tree component that renders a hierarchy
//! fetched over HTTP, with expand/collapse on click, animated transitions and
//! per-node progress rings.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

pub mod components;

pub use components::progress_tree::{
	ClickOutcome, ProgressTreeCanvas, TreeConfig, TreeDatum, TreeView,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("progress-tree: logging initialized");
}

/// Load chart configuration from a script element with id="tree-config".
/// Missing or malformed configuration falls back to the defaults.
fn load_config() -> TreeConfig {
	let Some(json_text) = config_script_text() else {
		info!("progress-tree: no tree-config element, using defaults");
		return TreeConfig::default().normalized();
	};

	match TreeConfig::from_json(&json_text) {
		Ok(config) => {
			info!(
				"progress-tree: loaded config, data from {}, cutoff depth {}",
				config.data_url, config.cutoff_depth
			);
			config
		}
		Err(e) => {
			warn!("progress-tree: failed to parse tree config: {}", e);
			TreeConfig::default().normalized()
		}
	}
}

fn config_script_text() -> Option<String> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("tree-config")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

/// Main application component.
/// Reads the configuration from the DOM and renders the progress tree.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="Progress Tree" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="tree-container">
			<ProgressTreeCanvas config=config />
		</div>
	}
}
