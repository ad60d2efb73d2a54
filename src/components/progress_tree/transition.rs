//! Time-based attribute interpolation.
//!
//! Every animated attribute of the scene is an [`Animated`] value holding a
//! single [`Tween`]. Scheduling a new tween replaces the old one and starts
//! from whatever value the attribute shows at that instant, so the last
//! scheduled transition always wins. Time is measured in milliseconds on the
//! frame clock.

/// Easing curve applied to normalized transition time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Ease {
	/// Constant speed.
	Linear,
	/// Slow start and end.
	#[default]
	CubicInOut,
}

impl Ease {
	/// Maps time in `[0, 1]` to progress.
	pub fn apply(self, t: f64) -> f64 {
		let t = t.clamp(0.0, 1.0);
		match self {
			Ease::Linear => t,
			Ease::CubicInOut => {
				let t = t * 2.0;
				if t <= 1.0 {
					t * t * t / 2.0
				} else {
					let t = t - 2.0;
					(t * t * t + 2.0) / 2.0
				}
			}
		}
	}
}

/// A single interpolation from `from` to `to` over `[start, start + duration]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
	/// Start value.
	pub from: f64,
	/// End value.
	pub to: f64,
	/// Start time in milliseconds.
	pub start: f64,
	/// Length in milliseconds.
	pub duration: f64,
	/// Easing curve.
	pub ease: Ease,
}

impl Tween {
	/// A tween that has already finished at `value`.
	pub fn settled(value: f64) -> Self {
		Self {
			from: value,
			to: value,
			start: f64::NEG_INFINITY,
			duration: 0.0,
			ease: Ease::Linear,
		}
	}

	/// When the tween finishes.
	pub fn end_time(&self) -> f64 {
		self.start + self.duration
	}

	/// Normalized, un-eased progress in `[0, 1]`.
	pub fn progress(&self, now: f64) -> f64 {
		if self.duration <= 0.0 {
			return if now >= self.start { 1.0 } else { 0.0 };
		}
		((now - self.start) / self.duration).clamp(0.0, 1.0)
	}

	/// Value at `now`; exactly `to` once finished.
	pub fn value_at(&self, now: f64) -> f64 {
		let progress = self.progress(now);
		if progress >= 1.0 {
			return self.to;
		}
		self.from + (self.to - self.from) * self.ease.apply(progress)
	}

	/// True once `now` reached the end time.
	pub fn is_finished(&self, now: f64) -> bool {
		now >= self.end_time()
	}
}

/// An attribute driven by at most one running tween.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Animated {
	tween: Tween,
}

impl Animated {
	/// Value at rest.
	pub fn new(value: f64) -> Self {
		Self {
			tween: Tween::settled(value),
		}
	}

	/// Current value at `now`.
	pub fn value(&self, now: f64) -> f64 {
		self.tween.value_at(now)
	}

	/// The value the attribute ends up at once the current tween completes.
	pub fn target(&self) -> f64 {
		self.tween.to
	}

	/// When the latest tween finishes.
	pub fn end_time(&self) -> f64 {
		self.tween.end_time()
	}

	/// True once `now` reached the end time.
	pub fn is_finished(&self, now: f64) -> bool {
		self.tween.is_finished(now)
	}

	/// Replaces the running tween, continuing from the value shown at `now`.
	pub fn animate_to(&mut self, now: f64, to: f64, duration: f64, ease: Ease) {
		let from = self.value(now);
		self.animate(from, to, now, duration, ease);
	}

	/// Replaces the running tween with an explicit origin and start time.
	pub fn animate(&mut self, from: f64, to: f64, start: f64, duration: f64, ease: Ease) {
		self.tween = Tween {
			from,
			to,
			start,
			duration,
			ease,
		};
	}
}
