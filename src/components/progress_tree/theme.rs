//! Visual theming for the progress tree.
//!
//! Provides the color type, the three-bucket progress color policy and the
//! static style of links, rings and text.

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color at opacity `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Hex when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Progress bucket a ring is colored by.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressColor {
	/// Up to 33%.
	Red,
	/// Up to 67%.
	Amber,
	/// Above 67%.
	Green,
}

impl ProgressColor {
	/// `<= 33` red, `<= 67` amber, anything above green.
	pub fn for_value(value: f64) -> Self {
		if value <= 33.0 {
			ProgressColor::Red
		} else if value <= 67.0 {
			ProgressColor::Amber
		} else {
			ProgressColor::Green
		}
	}

	/// Ring color of the bucket.
	pub fn color(self) -> Color {
		match self {
			ProgressColor::Red => Color::rgb(229, 57, 53),
			ProgressColor::Amber => Color::rgb(255, 179, 0),
			ProgressColor::Green => Color::rgb(67, 160, 71),
		}
	}
}

/// Link (edge) style.
#[derive(Clone, Debug)]
pub struct LinkStyle {
	/// Stroke color when fully shown.
	pub color: Color,
	/// Stroke width in pixels.
	pub width: f64,
}

/// Node ring and text style.
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Full background ring drawn behind the progress sweep
	pub track_color: Color,
	/// Fill inside the inner radius
	pub fill_color: Color,
	/// Node name
	pub label_color: Color,
	/// Percentage in the ring's center
	pub percent_color: Color,
	/// Font of both texts; the size comes from the config.
	pub font_family: &'static str,
}

/// Complete visual theme.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Canvas fill behind everything.
	pub background: Color,
	/// Links between parents and children.
	pub link: LinkStyle,
	/// Rings and their text.
	pub node: NodeStyle,
}

impl Default for Theme {
	fn default() -> Self {
		Self {
			background: Color::rgb(255, 255, 255),
			link: LinkStyle {
				color: Color::rgb(204, 204, 204),
				width: 1.5,
			},
			node: NodeStyle {
				track_color: Color::rgb(230, 230, 230),
				fill_color: Color::rgb(255, 255, 255),
				label_color: Color::rgb(51, 51, 51),
				percent_color: Color::rgb(85, 85, 85),
				font_family: "sans-serif",
			},
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn buckets_include_their_upper_boundary() {
		assert_eq!(ProgressColor::for_value(20.0), ProgressColor::Red);
		assert_eq!(ProgressColor::for_value(33.0), ProgressColor::Red);
		assert_eq!(ProgressColor::for_value(33.5), ProgressColor::Amber);
		assert_eq!(ProgressColor::for_value(45.0), ProgressColor::Amber);
		assert_eq!(ProgressColor::for_value(67.0), ProgressColor::Amber);
		assert_eq!(ProgressColor::for_value(90.0), ProgressColor::Green);
		assert_eq!(ProgressColor::for_value(150.0), ProgressColor::Green);
		assert_eq!(ProgressColor::for_value(-5.0), ProgressColor::Red);
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::rgb(229, 57, 53).to_css(), "#e53935");
		assert_eq!(
			Color::rgb(0, 0, 0).with_alpha(0.5).to_css(),
			"rgba(0, 0, 0, 0.5)"
		);
	}
}
