//! Per-depth visibility bookkeeping.
//!
//! `levels[d]` counts the visible nodes at depth `d`. Expanding a node at
//! depth `d` adds its children to `levels[d + 1]` and collapsing removes
//! them again. The deepest level with a non-zero count (before the first
//! gap) selects the canvas height from the configured height table.

use super::hierarchy::{Hierarchy, NodeId, NodeIndex};

/// Mutable view state owned by the tree view for its whole lifetime.
#[derive(Clone, Debug)]
pub struct TreeViewState {
	levels: Vec<usize>,
	cutoff_depth: i32,
	initialized: bool,
	first_render: bool,
	next_id: u32,
}

impl TreeViewState {
	/// Counts are filled in by the first `init`.
	pub fn new(cutoff_depth: i32) -> Self {
		Self {
			levels: Vec::new(),
			cutoff_depth,
			initialized: false,
			first_render: true,
			next_id: 0,
		}
	}

	/// True once the level counts were computed.
	pub fn is_initialized(&self) -> bool {
		self.initialized
	}

	/// Visible nodes per depth.
	pub fn levels(&self) -> &[usize] {
		&self.levels
	}

	/// Cutoff if it lies within `[0, max_depth]`, otherwise `None`.
	pub fn effective_cutoff(&self, max_depth: usize) -> Option<usize> {
		usize::try_from(self.cutoff_depth)
			.ok()
			.filter(|&cutoff| cutoff <= max_depth)
	}

	/// Seeds the level counts from the first layout's node list.
	pub fn init(&mut self, tree: &Hierarchy, nodes: &[NodeIndex]) {
		let max_depth = nodes
			.iter()
			.map(|&i| tree.node(i).depth)
			.max()
			.unwrap_or(0);
		let initial_depth = match usize::try_from(self.cutoff_depth) {
			Ok(cutoff) => cutoff.min(max_depth),
			Err(_) => max_depth,
		};

		self.levels = vec![0; max_depth + 1];
		for &index in nodes {
			let depth = tree.node(index).depth;
			if depth <= initial_depth {
				self.levels[depth] += 1;
			}
		}
		self.initialized = true;
		log::debug!(
			"progress-tree: initial depth {} of {}, levels {:?}",
			initial_depth,
			max_depth,
			self.levels
		);
	}

	/// Returns true exactly once, on the first render.
	pub fn take_first_render(&mut self) -> bool {
		std::mem::replace(&mut self.first_render, false)
	}

	/// Deepest depth before the first level with no visible nodes.
	pub fn current_depth(&self) -> usize {
		match self.levels.iter().position(|&count| count == 0) {
			Some(first_empty) => first_empty.saturating_sub(1),
			None => self.levels.len().saturating_sub(1),
		}
	}

	/// Canvas height for the current depth, clamped to the last table entry.
	pub fn current_height(&self, heights: &[f64]) -> f64 {
		heights
			.get(self.current_depth())
			.or(heights.last())
			.copied()
			.unwrap_or(0.0)
	}

	/// Records `count` more visible nodes at `depth`.
	pub fn add_visible(&mut self, depth: usize, count: usize) {
		if self.levels.len() <= depth {
			self.levels.resize(depth + 1, 0);
		}
		self.levels[depth] += count;
	}

	/// Records `count` fewer visible nodes at `depth`.
	pub fn remove_visible(&mut self, depth: usize, count: usize) {
		if let Some(level) = self.levels.get_mut(depth) {
			*level = level.saturating_sub(count);
		}
	}

	/// Hands out the next node id.
	pub fn next_id(&mut self) -> NodeId {
		self.next_id += 1;
		NodeId(self.next_id)
	}
}
