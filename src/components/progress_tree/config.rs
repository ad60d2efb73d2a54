//! Chart configuration.
//!
//! Built once before the first render and never mutated afterwards. Every
//! field has a default, so a partial JSON object is a valid configuration.

use log::warn;
use serde::Deserialize;

use super::label::LabelPosition;

/// Space reserved around the drawing area.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Margins {
	/// Above the root row.
	pub top: f64,
	/// Right of the deepest column, room for its labels.
	pub right: f64,
	/// Below the last row.
	pub bottom: f64,
	/// Left of the root.
	pub left: f64,
}

impl Default for Margins {
	fn default() -> Self {
		Self {
			top: 20.0,
			right: 120.0,
			bottom: 20.0,
			left: 120.0,
		}
	}
}

/// Height of the container when no height table is given.
const DEFAULT_CONTAINER_HEIGHT: f64 = 400.0;

/// Everything the chart reads before its first render.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
	/// Where the hierarchy JSON is fetched from.
	pub data_url: String,
	/// CSS selector of the element whose bounding box sets the canvas width.
	/// `None` uses the canvas's parent element.
	pub mount_selector: Option<String>,
	/// Depth at which nodes start collapsed; `-1` shows everything.
	pub cutoff_depth: i32,
	/// Length of every transition in milliseconds.
	pub duration_ms: f64,
	/// Space around the tree.
	pub margin: Margins,
	/// Inner radius of the progress ring.
	pub inner_radius: f64,
	/// Outer radius of the progress ring, also the click target radius.
	pub outer_radius: f64,
	/// Font size as a fraction of the inner radius.
	pub font_coefficient: f64,
	/// Where node names are drawn relative to their ring.
	pub label_position: LabelPosition,
	/// Drawing height per visible depth; the first entry is the initial height.
	/// Left empty, it is filled from the container height minus the vertical
	/// margins by [`normalized`](Self::normalized).
	pub height_hierarchy: Vec<f64>,
	/// Horizontal distance between depth levels.
	pub depth_spacing: f64,
}

impl Default for TreeConfig {
	fn default() -> Self {
		Self {
			data_url: "data/tree.json".to_string(),
			mount_selector: None,
			cutoff_depth: -1,
			duration_ms: 750.0,
			margin: Margins::default(),
			inner_radius: 16.0,
			outer_radius: 22.0,
			font_coefficient: 0.6,
			label_position: LabelPosition::Side,
			height_hierarchy: Vec::new(),
			depth_spacing: 180.0,
		}
	}
}

fn default_height(margin: &Margins) -> f64 {
	DEFAULT_CONTAINER_HEIGHT - margin.top - margin.bottom
}

impl TreeConfig {
	/// Parses a JSON configuration object.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str::<TreeConfig>(json).map(TreeConfig::normalized)
	}

	/// Replaces values the chart cannot work with.
	pub fn normalized(mut self) -> Self {
		let usable = |h: f64| h.is_finite() && h > 0.0;
		let fallback = self
			.height_hierarchy
			.iter()
			.copied()
			.find(|h| usable(*h))
			.unwrap_or_else(|| default_height(&self.margin));
		if self.height_hierarchy.is_empty() {
			self.height_hierarchy.push(fallback);
		}
		// Entries are indexed by depth, so bad ones are replaced in place.
		let mut previous = fallback;
		for (depth, height) in self.height_hierarchy.iter_mut().enumerate() {
			if usable(*height) {
				previous = *height;
			} else {
				warn!(
					"progress-tree: invalid height {} for depth {}, using {}",
					height, depth, previous
				);
				*height = previous;
			}
		}
		if !(self.duration_ms.is_finite() && self.duration_ms >= 0.0) {
			warn!(
				"progress-tree: invalid duration {}, using 750ms",
				self.duration_ms
			);
			self.duration_ms = 750.0;
		}
		if self.inner_radius < 0.0 {
			warn!("progress-tree: negative inner radius, using 0");
			self.inner_radius = 0.0;
		}
		if self.outer_radius <= self.inner_radius {
			warn!(
				"progress-tree: outer radius {} does not exceed inner radius {}",
				self.outer_radius, self.inner_radius
			);
			self.outer_radius = self.inner_radius + 6.0;
		}
		self
	}

	/// Font size of the percentage and the label.
	pub fn font_size(&self) -> f64 {
		self.inner_radius * self.font_coefficient
	}

	/// Drawing height before the first update.
	pub fn initial_height(&self) -> f64 {
		self.height_hierarchy
			.first()
			.copied()
			.unwrap_or_else(|| default_height(&self.margin))
	}

	/// Top plus bottom margin.
	pub fn vertical_margin(&self) -> f64 {
		self.margin.top + self.margin.bottom
	}
}
