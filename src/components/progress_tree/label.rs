//! Node label placement.

use serde::Deserialize;

/// Where a node's name is drawn relative to its ring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
	/// Above the ring.
	Top,
	/// Below the ring.
	Bottom,
	/// Right of leaves, left of nodes with children.
	#[default]
	#[serde(other)]
	Side,
}

/// Horizontal text alignment relative to the label anchor point.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAnchor {
	/// Text begins at the anchor.
	Start,
	/// Text centered on the anchor.
	Middle,
	/// Text ends at the anchor.
	End,
}

impl TextAnchor {
	/// Value for the canvas `textAlign` property.
	pub fn as_css(self) -> &'static str {
		match self {
			TextAnchor::Start => "start",
			TextAnchor::Middle => "center",
			TextAnchor::End => "end",
		}
	}
}

/// Label anchor offset from the node center, with its alignment.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelGeometry {
	/// Offset along the screen x axis.
	pub dx: f64,
	/// Offset along the screen y axis.
	pub dy: f64,
	/// Alignment at the anchor point.
	pub anchor: TextAnchor,
}

/// Gap between the outer ring and the label.
const LABEL_GAP: f64 = 5.0;

/// Where the label of a node sits relative to its center.
pub fn label_geometry(
	position: LabelPosition,
	has_children: bool,
	outer_radius: f64,
	font_size: f64,
) -> LabelGeometry {
	let offset = outer_radius + LABEL_GAP;
	match position {
		LabelPosition::Top => LabelGeometry {
			dx: 0.0,
			dy: -offset,
			anchor: TextAnchor::Middle,
		},
		LabelPosition::Bottom => LabelGeometry {
			dx: 0.0,
			dy: offset + font_size / 4.0,
			anchor: TextAnchor::Middle,
		},
		LabelPosition::Side if has_children => LabelGeometry {
			dx: -offset,
			dy: 0.0,
			anchor: TextAnchor::End,
		},
		LabelPosition::Side => LabelGeometry {
			dx: offset,
			dy: 0.0,
			anchor: TextAnchor::Start,
		},
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn side_labels_read_away_from_the_node() {
		let inner = label_geometry(LabelPosition::Side, true, 20.0, 12.0);
		assert_eq!(inner.dx, -25.0);
		assert_eq!(inner.anchor, TextAnchor::End);

		let leaf = label_geometry(LabelPosition::Side, false, 20.0, 12.0);
		assert_eq!(leaf.dx, 25.0);
		assert_eq!(leaf.anchor, TextAnchor::Start);
	}

	#[test]
	fn top_and_bottom_are_centered() {
		let top = label_geometry(LabelPosition::Top, true, 20.0, 12.0);
		assert_eq!((top.dx, top.dy, top.anchor), (0.0, -25.0, TextAnchor::Middle));

		let bottom = label_geometry(LabelPosition::Bottom, false, 20.0, 12.0);
		assert_eq!(
			(bottom.dx, bottom.dy, bottom.anchor),
			(0.0, 28.0, TextAnchor::Middle)
		);
	}

	#[test]
	fn unknown_positions_fall_back_to_side() {
		let parse = |s: &str| serde_json::from_str::<LabelPosition>(s).unwrap();
		assert_eq!(parse(r#""top""#), LabelPosition::Top);
		assert_eq!(parse(r#""bottom""#), LabelPosition::Bottom);
		assert_eq!(parse(r#""right""#), LabelPosition::Side);
	}
}
