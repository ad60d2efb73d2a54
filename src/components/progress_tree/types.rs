//! Data structures for input to the progress tree component.

use serde::Deserialize;

/// One node of the hierarchy as delivered by the data source.
///
/// Missing `name`/`value` fields fall back to an empty label and 0%.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TreeDatum {
	/// Display label.
	#[serde(default)]
	pub name: String,
	/// Progress percentage. Values above 100 are rendered as an overflow ring.
	#[serde(default)]
	pub value: f64,
	/// Child nodes; absent for leaves.
	#[serde(default)]
	pub children: Option<Vec<TreeDatum>>,
}

impl TreeDatum {
	/// Convenience constructor for a leaf.
	pub fn leaf(name: impl Into<String>, value: f64) -> Self {
		Self {
			name: name.into(),
			value,
			children: None,
		}
	}

	/// Convenience constructor for an inner node.
	pub fn branch(name: impl Into<String>, value: f64, children: Vec<TreeDatum>) -> Self {
		Self {
			name: name.into(),
			value,
			children: Some(children),
		}
	}
}

/// What the detail dialog shows for a clicked leaf.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDetail {
	/// Display name.
	pub name: String,
	/// Progress percentage.
	pub value: f64,
	/// Distance from the root.
	pub depth: usize,
}
