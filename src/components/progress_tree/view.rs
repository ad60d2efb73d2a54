//! The tree view: model, view state and scene, tied together by the update
//! cycle.
//!
//! [`TreeView::update`] reflows the visible tree and schedules every visual
//! change as a transition starting at `now`. Elements entering the tree grow
//! out of the clicked node's previous position and elements leaving it
//! shrink into the clicked node's new position.

use std::collections::HashSet;

use log::debug;

use super::config::TreeConfig;
use super::hierarchy::{Hierarchy, NodeId, NodeIndex};
use super::label::label_geometry;
use super::layout::{self, Link};
use super::scene::{LinkVisual, NodeVisual, ProgressVisual, Scene};
use super::state::TreeViewState;
use super::transition::{Animated, Ease};
use super::types::{NodeDetail, TreeDatum};

/// What a click on a node resolved to.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
	/// The node's children were shown or hidden and the tree reflowed.
	Toggled,
	/// The node is a leaf; its details should be shown.
	ShowDetail(NodeDetail),
}

/// A hierarchy, its view state and its animated scene.
pub struct TreeView {
	tree: Hierarchy,
	state: TreeViewState,
	config: TreeConfig,
	scene: Scene,
	width: f64,
}

impl TreeView {
	/// Builds the view for `root`. Nothing is shown until the first
	/// [`update`](Self::update).
	pub fn new(root: &TreeDatum, config: TreeConfig, width: f64) -> Self {
		let config = config.normalized();
		let mut tree = Hierarchy::from_datum(root);
		let initial_height = config.initial_height();
		let root_index = tree.root();
		let root_node = tree.node_mut(root_index);
		root_node.x0 = initial_height / 2.0;
		root_node.y0 = 0.0;

		Self {
			tree,
			state: TreeViewState::new(config.cutoff_depth),
			scene: Scene::new(initial_height + config.vertical_margin()),
			config,
			width,
		}
	}

	/// The model.
	pub fn tree(&self) -> &Hierarchy {
		&self.tree
	}

	/// Per-depth visible counts.
	pub fn state(&self) -> &TreeViewState {
		&self.state
	}

	/// The normalized configuration.
	pub fn config(&self) -> &TreeConfig {
		&self.config
	}

	/// What the frame loop draws.
	pub fn scene(&self) -> &Scene {
		&self.scene
	}

	/// Animated canvas height at `now`, margins included.
	pub fn canvas_height(&self, now: f64) -> f64 {
		self.scene.canvas_height.value(now)
	}

	/// Reflows the visible tree and animates from prior to new positions.
	pub fn update(&mut self, source: NodeIndex, now: f64) {
		let duration = self.config.duration_ms;

		let all_visible = self.tree.visible_nodes();
		if !self.state.is_initialized() {
			self.state.init(&self.tree, &all_visible);
		}

		let height = self.state.current_height(&self.config.height_hierarchy);
		self.scene.canvas_height.animate_to(
			now,
			height + self.config.vertical_margin(),
			duration,
			Ease::CubicInOut,
		);

		if self.state.take_first_render() {
			self.apply_cutoff(&all_visible);
		}

		for index in self.tree.visible_nodes() {
			if self.tree.node(index).id.is_none() {
				let id = self.state.next_id();
				self.tree.node_mut(index).id = Some(id);
			}
		}

		let inner_width = self.width - self.config.margin.left - self.config.margin.right;
		let nodes = layout::layout(&mut self.tree, (height, inner_width.max(0.0)));
		for &index in &nodes {
			let node = self.tree.node_mut(index);
			node.y = node.depth as f64 * self.config.depth_spacing;
		}
		let links = layout::links(&self.tree, &nodes);

		self.update_nodes(source, &nodes, now);
		self.update_links(source, &links, now);

		for &index in &nodes {
			let node = self.tree.node_mut(index);
			node.x0 = node.x;
			node.y0 = node.y;
		}
		debug!(
			"progress-tree: update from {:?}, {} nodes, height {}",
			self.tree.node(source).id,
			nodes.len(),
			height
		);
	}

	/// Collapses everything at or below the cutoff depth, once.
	fn apply_cutoff(&mut self, nodes: &[NodeIndex]) {
		let Some(cutoff) = self.state.effective_cutoff(self.tree.max_depth()) else {
			return;
		};
		for &index in nodes {
			if self.tree.node(index).depth >= cutoff {
				self.tree.collapse(index);
			}
		}
	}

	fn id_of(&self, index: NodeIndex) -> NodeId {
		// Every node passed here was visible during id assignment.
		self.tree.node(index).id.unwrap_or(NodeId(0))
	}

	fn update_nodes(&mut self, source: NodeIndex, nodes: &[NodeIndex], now: f64) {
		let duration = self.config.duration_ms;
		let ease = Ease::CubicInOut;
		let source_node = self.tree.node(source);
		let (origin_x, origin_y) = (source_node.x0, source_node.y0);
		let (sink_x, sink_y) = (source_node.x, source_node.y);

		let mut visible = HashSet::with_capacity(nodes.len());
		for &index in nodes {
			let id = self.id_of(index);
			visible.insert(id);
			let node = self.tree.node(index);
			let label = label_geometry(
				self.config.label_position,
				node.has_children(),
				self.config.outer_radius,
				self.config.font_size(),
			);
			let progress = ProgressVisual::start(node.value, now, duration);

			let visual = self.scene.nodes.entry(id).or_insert_with(|| NodeVisual {
				node: index,
				name: node.name.clone(),
				x: Animated::new(origin_x),
				y: Animated::new(origin_y),
				opacity: Animated::new(0.0),
				progress: progress.clone(),
				label,
				exiting: false,
			});
			visual.x.animate_to(now, node.x, duration, ease);
			visual.y.animate_to(now, node.y, duration, ease);
			visual.opacity.animate_to(now, 1.0, duration, ease);
			visual.progress = progress;
			visual.label = label;
			visual.exiting = false;
		}

		for (id, visual) in self.scene.nodes.iter_mut() {
			if visible.contains(id) || visual.exiting {
				continue;
			}
			visual.x.animate_to(now, sink_x, duration, ease);
			visual.y.animate_to(now, sink_y, duration, ease);
			visual.opacity.animate_to(now, 0.0, duration, ease);
			visual.exiting = true;
		}
	}

	fn update_links(&mut self, source: NodeIndex, links: &[Link], now: f64) {
		let duration = self.config.duration_ms;
		let source_node = self.tree.node(source);
		let (origin_x, origin_y) = (source_node.x0, source_node.y0);
		let sink = (source_node.x, source_node.y);

		let mut visible = HashSet::with_capacity(links.len());
		for link in links {
			let id = self.id_of(link.target);
			visible.insert(id);
			let (from, to) = (self.tree.node(link.source), self.tree.node(link.target));
			let visual = self
				.scene
				.links
				.entry(id)
				.or_insert_with(|| LinkVisual::degenerate(origin_x, origin_y));
			visual.animate_to(now, (from.x, from.y), (to.x, to.y), duration);
			visual.exiting = false;
		}

		for (id, visual) in self.scene.links.iter_mut() {
			if visible.contains(id) || visual.exiting {
				continue;
			}
			visual.animate_to(now, sink, sink, duration);
			visual.exiting = true;
		}
	}

	/// Shows or hides the node's children and reflows from it.
	///
	/// Returns false, without re-rendering, for leaves.
	pub fn expand_or_collapse(&mut self, index: NodeIndex, now: f64) -> bool {
		let node = self.tree.node(index);
		let child_depth = node.depth + 1;
		if !node.children.visible().is_empty() {
			let hidden = self.tree.collapse(index);
			self.state.remove_visible(child_depth, hidden);
		} else if !node.children.hidden().is_empty() {
			let shown = self.tree.expand(index);
			self.state.add_visible(child_depth, shown);
		} else {
			return false;
		}
		self.update(index, now);
		true
	}

	/// Toggles nodes with children; leaves resolve to their details.
	pub fn click(&mut self, index: NodeIndex, now: f64) -> ClickOutcome {
		if self.expand_or_collapse(index, now) {
			ClickOutcome::Toggled
		} else {
			ClickOutcome::ShowDetail(self.tree.node(index).detail())
		}
	}

	/// Screen position of a rendered node, in canvas pixels.
	pub fn screen_position(&self, visual: &NodeVisual, now: f64) -> (f64, f64) {
		let (x, y) = visual.position(now);
		(self.config.margin.left + y, self.config.margin.top + x)
	}

	/// The rendered, non-exiting node under canvas point `(px, py)`.
	pub fn node_at(&self, px: f64, py: f64, now: f64) -> Option<NodeIndex> {
		let radius = self.config.outer_radius;
		self.scene
			.nodes
			.values()
			.filter(|visual| !visual.exiting)
			.filter_map(|visual| {
				let (sx, sy) = self.screen_position(visual, now);
				let distance = ((sx - px).powi(2) + (sy - py).powi(2)).sqrt();
				(distance <= radius).then_some((visual.node, distance))
			})
			.min_by(|a, b| a.1.total_cmp(&b.1))
			.map(|(index, _)| index)
	}

	/// Advances continuations and retires finished exits.
	pub fn tick(&mut self, now: f64) {
		self.scene.tick(now);
	}
}
