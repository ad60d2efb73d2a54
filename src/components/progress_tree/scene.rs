//! Rendered elements and their running transitions.
//!
//! The scene mirrors what is on the canvas: one [`NodeVisual`] per rendered
//! node and one [`LinkVisual`] per rendered link, both keyed by the node id
//! (a link by its target's id). Elements that left the visible tree stay in
//! the scene while their exit transition runs and are dropped by
//! [`Scene::tick`] once it completes.

use std::collections::BTreeMap;

use super::hierarchy::{NodeId, NodeIndex};
use super::label::LabelGeometry;
use super::ring;
use super::transition::{Animated, Ease};

/// Where a node's progress animation stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProgressPhase {
	/// Outer ring sweeping towards `min(value, 100)`.
	Primary,
	/// Outer ring full, inner ring sweeping the excess above 100.
	Overflow,
	/// Both rings at rest.
	Settled,
}

/// Progress ring and percentage text of one node.
#[derive(Clone, Debug)]
pub struct ProgressVisual {
	/// The node value the rings show.
	pub value: f64,
	/// Outer ring sweep in degrees.
	pub sweep: Animated,
	/// Number shown in the middle of the ring.
	pub percent: Animated,
	/// Inner ring sweep in degrees; present once the overflow has started.
	pub overflow_sweep: Option<Animated>,
	/// Which ring is animating.
	pub phase: ProgressPhase,
	duration: f64,
}

impl ProgressVisual {
	/// Starts the primary sweep and text from zero at `now`.
	pub fn start(value: f64, now: f64, duration: f64) -> Self {
		let mut sweep = Animated::new(0.0);
		sweep.animate(0.0, ring::primary_sweep(value), now, duration, Ease::CubicInOut);
		let mut percent = Animated::new(0.0);
		percent.animate(0.0, ring::primary_percent(value), now, duration, Ease::Linear);
		Self {
			value,
			sweep,
			percent,
			overflow_sweep: None,
			phase: ProgressPhase::Primary,
			duration,
		}
	}

	/// Runs the continuation once the primary sweep has completed.
	///
	/// The overflow starts at the primary sweep's end time, not at `now`, so
	/// a late frame does not shift it.
	pub fn advance(&mut self, now: f64) {
		if self.phase == ProgressPhase::Primary && self.sweep.is_finished(now) {
			match ring::overflow_sweep(self.value) {
				Some(extra) => {
					let start = self.sweep.end_time();
					let mut inner = Animated::new(0.0);
					inner.animate(0.0, extra, start, self.duration, Ease::CubicInOut);
					self.overflow_sweep = Some(inner);
					self.percent
						.animate(100.0, self.value, start, self.duration, Ease::Linear);
					self.phase = ProgressPhase::Overflow;
				}
				None => self.phase = ProgressPhase::Settled,
			}
		}
		if self.phase == ProgressPhase::Overflow
			&& self
				.overflow_sweep
				.is_none_or(|inner| inner.is_finished(now))
			&& self.percent.is_finished(now)
		{
			self.phase = ProgressPhase::Settled;
		}
	}

	/// Percentage text at `now`.
	pub fn percent_label(&self, now: f64) -> String {
		ring::percent_label(self.percent.value(now))
	}
}

/// A rendered node.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	/// Model node this visual draws.
	pub node: NodeIndex,
	/// Display name.
	pub name: String,
	/// Breadth position (screen vertical).
	pub x: Animated,
	/// Depth position (screen horizontal).
	pub y: Animated,
	/// Fades in on enter and out on exit.
	pub opacity: Animated,
	/// The progress rings.
	pub progress: ProgressVisual,
	/// Where the name is drawn.
	pub label: LabelGeometry,
	/// Set once the node left the visible tree; removed when its exit ends.
	pub exiting: bool,
}

impl NodeVisual {
	/// Layout `(x, y)` at `now`.
	pub fn position(&self, now: f64) -> (f64, f64) {
		(self.x.value(now), self.y.value(now))
	}

	fn is_finished(&self, now: f64) -> bool {
		self.x.is_finished(now) && self.y.is_finished(now) && self.opacity.is_finished(now)
	}
}

/// A rendered parent-child curve, stored as its two animated end points.
#[derive(Clone, Debug)]
pub struct LinkVisual {
	/// Parent end, breadth.
	pub source_x: Animated,
	/// Parent end, depth.
	pub source_y: Animated,
	/// Child end, breadth.
	pub target_x: Animated,
	/// Child end, depth.
	pub target_y: Animated,
	/// Set once the link left the visible tree.
	pub exiting: bool,
}

impl LinkVisual {
	/// A zero-length curve sitting at `(x, y)`.
	pub fn degenerate(x: f64, y: f64) -> Self {
		Self {
			source_x: Animated::new(x),
			source_y: Animated::new(y),
			target_x: Animated::new(x),
			target_y: Animated::new(y),
			exiting: false,
		}
	}

	/// Animates both end points, continuing from where they are now.
	pub fn animate_to(
		&mut self,
		now: f64,
		source: (f64, f64),
		target: (f64, f64),
		duration: f64,
	) {
		let ease = Ease::CubicInOut;
		self.source_x.animate_to(now, source.0, duration, ease);
		self.source_y.animate_to(now, source.1, duration, ease);
		self.target_x.animate_to(now, target.0, duration, ease);
		self.target_y.animate_to(now, target.1, duration, ease);
	}

	/// `((source x, y), (target x, y))` at `now`.
	pub fn endpoints(&self, now: f64) -> ((f64, f64), (f64, f64)) {
		(
			(self.source_x.value(now), self.source_y.value(now)),
			(self.target_x.value(now), self.target_y.value(now)),
		)
	}

	fn is_finished(&self, now: f64) -> bool {
		[self.source_x, self.source_y, self.target_x, self.target_y]
			.iter()
			.all(|v| v.is_finished(now))
	}
}

/// Everything currently drawn, plus the animated canvas height.
#[derive(Clone, Debug)]
pub struct Scene {
	/// Rendered nodes, including exiting ones.
	pub nodes: BTreeMap<NodeId, NodeVisual>,
	/// Rendered links, keyed by their child node.
	pub links: BTreeMap<NodeId, LinkVisual>,
	/// Canvas height including margins.
	pub canvas_height: Animated,
}

impl Scene {
	/// Empty scene with a canvas of the given height.
	pub fn new(canvas_height: f64) -> Self {
		Self {
			nodes: BTreeMap::new(),
			links: BTreeMap::new(),
			canvas_height: Animated::new(canvas_height),
		}
	}

	/// Runs due continuations and drops elements whose exit has completed.
	pub fn tick(&mut self, now: f64) {
		for visual in self.nodes.values_mut() {
			visual.progress.advance(now);
		}
		self.nodes
			.retain(|_, visual| !(visual.exiting && visual.is_finished(now)));
		self.links
			.retain(|_, link| !(link.exiting && link.is_finished(now)));
	}

	/// Links fade in and out with the node they lead to.
	pub fn link_opacity(&self, target: NodeId, now: f64) -> f64 {
		self.nodes
			.get(&target)
			.map_or(1.0, |node| node.opacity.value(now).clamp(0.0, 1.0))
	}

	/// True while any transition is still running or pending.
	pub fn is_animating(&self, now: f64) -> bool {
		!self.canvas_height.is_finished(now)
			|| self.nodes.values().any(|v| {
				v.exiting || !v.is_finished(now) || v.progress.phase != ProgressPhase::Settled
			})
			|| self
				.links
				.values()
				.any(|l| l.exiting || !l.is_finished(now))
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn value_within_one_lap_settles_without_overflow() {
		let mut progress = ProgressVisual::start(45.0, 0.0, 750.0);
		assert_eq!(progress.sweep.target(), 162.0);
		assert_eq!(progress.percent_label(0.0), "0%");

		progress.advance(800.0);
		assert_eq!(progress.phase, ProgressPhase::Settled);
		assert!(progress.overflow_sweep.is_none());
		assert_eq!(progress.percent_label(800.0), "45%");
	}

	#[test]
	fn overflow_is_chained_after_the_primary_sweep() {
		let mut progress = ProgressVisual::start(150.0, 0.0, 750.0);
		assert_eq!(progress.sweep.target(), 360.0);

		progress.advance(400.0);
		assert_eq!(progress.phase, ProgressPhase::Primary);
		assert!(progress.overflow_sweep.is_none());

		// A late frame still starts the overflow exactly at 750.
		progress.advance(1_000.0);
		assert_eq!(progress.phase, ProgressPhase::Overflow);
		let inner = progress.overflow_sweep.unwrap();
		assert_eq!(inner.end_time(), 1_500.0);
		assert_eq!(inner.target(), 180.0);
		assert_eq!(progress.percent_label(750.0), "100%");

		progress.advance(1_500.0);
		assert_eq!(progress.phase, ProgressPhase::Settled);
		assert_eq!(progress.percent_label(1_500.0), "150%");
		assert_eq!(progress.sweep.value(1_500.0), 360.0);
	}

	#[test]
	fn one_long_frame_can_run_both_phases() {
		let mut progress = ProgressVisual::start(120.0, 0.0, 100.0);
		progress.advance(10_000.0);
		assert_eq!(progress.phase, ProgressPhase::Settled);
		assert!(progress.overflow_sweep.is_some());
	}

	#[test]
	fn exiting_elements_are_dropped_when_finished() {
		let mut scene = Scene::new(400.0);
		let mut link = LinkVisual::degenerate(0.0, 0.0);
		link.animate_to(0.0, (5.0, 5.0), (5.0, 5.0), 100.0);
		link.exiting = true;
		scene.links.insert(NodeId(2), link);
		scene.links.insert(NodeId(3), LinkVisual::degenerate(1.0, 1.0));

		scene.tick(50.0);
		assert_eq!(scene.links.len(), 2);
		assert!(scene.is_animating(50.0));

		scene.tick(100.0);
		assert_eq!(scene.links.keys().copied().collect::<Vec<_>>(), [NodeId(3)]);
		assert!(!scene.is_animating(100.0));
	}
}
