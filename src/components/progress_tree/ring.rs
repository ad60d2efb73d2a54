//! Progress ring geometry.
//!
//! Angles are in degrees, measured clockwise from twelve o'clock. A value of
//! 100 sweeps the full circle; anything beyond is drawn as a second ring
//! just inside the first.

/// Degrees of sweep per percentage point.
pub const DEGREES_PER_PERCENT: f64 = 360.0 / 100.0;

/// Radial extent of a ring band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RingBand {
	/// Inner radius.
	pub inner: f64,
	/// Outer radius.
	pub outer: f64,
}

impl RingBand {
	/// Radial thickness.
	pub fn width(&self) -> f64 {
		self.outer - self.inner
	}

	/// Band of the same width mirrored inward from this band's inner edge.
	pub fn overflow(&self) -> RingBand {
		RingBand {
			inner: (self.inner - self.width()).max(0.0),
			outer: self.inner,
		}
	}
}

/// Percentage shown by the outer ring.
pub fn primary_percent(value: f64) -> f64 {
	value.clamp(0.0, 100.0)
}

/// Outer ring sweep for `value`.
pub fn primary_sweep(value: f64) -> f64 {
	primary_percent(value) * DEGREES_PER_PERCENT
}

/// Inner ring sweep, present only for values above 100.
pub fn overflow_sweep(value: f64) -> Option<f64> {
	(value > 100.0).then(|| (value - 100.0) * DEGREES_PER_PERCENT)
}

/// Text shown in the middle of a ring.
pub fn percent_label(percent: f64) -> String {
	format!("{}%", percent.round() as i64)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn sweep_is_clamped_to_one_lap() {
		assert_eq!(primary_sweep(50.0), 180.0);
		assert_eq!(primary_sweep(150.0), 360.0);
		assert_eq!(primary_sweep(-3.0), 0.0);
	}

	#[test]
	fn overflow_covers_the_excess() {
		assert_eq!(overflow_sweep(100.0), None);
		assert_eq!(overflow_sweep(150.0), Some(180.0));
		assert_eq!(overflow_sweep(250.0), Some(540.0));
	}

	#[test]
	fn overflow_band_is_mirrored_inward() {
		let band = RingBand {
			inner: 16.0,
			outer: 22.0,
		};
		assert_eq!(
			band.overflow(),
			RingBand {
				inner: 10.0,
				outer: 16.0
			}
		);
	}

	#[test]
	fn labels_round_to_integers() {
		assert_eq!(percent_label(0.0), "0%");
		assert_eq!(percent_label(49.6), "50%");
		assert_eq!(percent_label(150.0), "150%");
	}
}
