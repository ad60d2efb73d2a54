//! Tidy tree layout for the visible part of the hierarchy.
//!
//! A contour-based Reingold–Tilford variant: every subtree is laid out
//! bottom-up relative to its root, sibling subtrees are pushed apart until
//! their facing contours respect the minimum separation at every depth, the
//! push is shared out among the siblings in between, and parents are
//! centered over their first and last child. The breadth axis is
//! then scaled to fit the requested size, leaving half a separation unit of
//! padding on either side.

use super::hierarchy::{Hierarchy, NodeIndex};

/// Gap between adjacent siblings, in layout units.
const SIBLING_SEPARATION: f64 = 1.0;
/// Gap between adjacent nodes with different parents.
const COUSIN_SEPARATION: f64 = 2.0;

/// A parent-child edge between two visible nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
	/// The parent.
	pub source: NodeIndex,
	/// The child; links are keyed by it.
	pub target: NodeIndex,
}

/// Leftmost and rightmost breadth offsets per relative depth of a subtree.
#[derive(Clone, Debug, Default)]
struct Contour {
	left: Vec<f64>,
	right: Vec<f64>,
}

impl Contour {
	fn single() -> Self {
		Self {
			left: vec![0.0],
			right: vec![0.0],
		}
	}

	fn merge(&mut self, other: &Contour, offset: f64) {
		for (level, (&left, &right)) in other.left.iter().zip(&other.right).enumerate() {
			let (left, right) = (left + offset, right + offset);
			if level < self.left.len() {
				self.left[level] = self.left[level].min(left);
				self.right[level] = self.right[level].max(right);
			} else {
				self.left.push(left);
				self.right.push(right);
			}
		}
	}
}

/// Contour level 0 holds siblings; deeper levels never share a parent.
fn separation_at(level: usize) -> f64 {
	if level == 0 {
		SIBLING_SEPARATION
	} else {
		COUSIN_SEPARATION
	}
}

fn separation(tree: &Hierarchy, a: NodeIndex, b: NodeIndex) -> f64 {
	if tree.node(a).parent == tree.node(b).parent {
		SIBLING_SEPARATION
	} else {
		COUSIN_SEPARATION
	}
}

/// Lays out `node`'s subtree, recording each child's offset from its parent.
///
/// When a subtree is pushed right by a conflict with an earlier sibling's
/// subtree, the smaller subtrees between the two take an even share of the
/// shift.
fn first_walk(tree: &Hierarchy, node: NodeIndex, relative: &mut [f64]) -> Contour {
	let children = tree.node(node).children.visible();
	if children.is_empty() {
		return Contour::single();
	}

	let subtrees: Vec<Contour> = children
		.iter()
		.map(|&child| first_walk(tree, child, relative))
		.collect();
	let mut offsets = vec![0.0; children.len()];
	let mut forest = subtrees[0].clone();

	for i in 1..subtrees.len() {
		offsets[i] = offsets[i - 1] + separation_at(0);
		let depth = subtrees[i].left.len().min(forest.right.len());
		for level in 1..depth {
			let shift =
				forest.right[level] + separation_at(level) - (subtrees[i].left[level] + offsets[i]);
			if shift <= 0.0 {
				continue;
			}
			offsets[i] += shift;
			// The rightmost earlier subtree reaching this level caused the conflict.
			if let Some(owner) = (0..i).rev().find(|&j| subtrees[j].left.len() > level) {
				spread_shift(&mut offsets, owner, i, shift);
			}
		}

		forest = Contour::default();
		for (subtree, &offset) in subtrees[..=i].iter().zip(&offsets) {
			forest.merge(subtree, offset);
		}
	}

	let mid = (offsets[0] + offsets[offsets.len() - 1]) / 2.0;
	for (&child, &offset) in children.iter().zip(&offsets) {
		relative[child.index()] = offset - mid;
	}

	let mut contour = Contour::single();
	contour.left.extend(forest.left.iter().map(|l| l - mid));
	contour.right.extend(forest.right.iter().map(|r| r - mid));
	contour
}

/// Moves the subtrees strictly between `from` and `to` by their share of
/// the `shift` applied to `to`.
fn spread_shift(offsets: &mut [f64], from: usize, to: usize, shift: f64) {
	let span = (to - from) as f64;
	for (k, offset) in offsets.iter_mut().enumerate().take(to).skip(from + 1) {
		*offset += shift * (k - from) as f64 / span;
	}
}

/// Positions every visible node inside `size = (breadth, depth_extent)`.
///
/// Writes `x` (breadth) and `y` (depth) into the nodes and returns the
/// visible nodes in pre-order.
pub fn layout(tree: &mut Hierarchy, size: (f64, f64)) -> Vec<NodeIndex> {
	let mut relative = vec![0.0; tree.len()];
	first_walk(tree, tree.root(), &mut relative);

	let nodes = tree.visible_nodes();
	let mut absolute = vec![0.0; tree.len()];
	for &index in &nodes {
		if let Some(parent) = tree.node(index).parent {
			absolute[index.index()] = absolute[parent.index()] + relative[index.index()];
		}
	}

	let root = tree.root();
	let (mut left, mut right, mut bottom) = (root, root, root);
	for &index in &nodes {
		if absolute[index.index()] < absolute[left.index()] {
			left = index;
		}
		if absolute[index.index()] > absolute[right.index()] {
			right = index;
		}
		if tree.node(index).depth > tree.node(bottom).depth {
			bottom = index;
		}
	}

	let tx = separation(tree, left, right) / 2.0 - absolute[left.index()];
	let kx = size.0 / (absolute[right.index()] + separation(tree, right, left) / 2.0 + tx);
	let ky = size.1 / tree.node(bottom).depth.max(1) as f64;

	for &index in &nodes {
		let node = tree.node_mut(index);
		node.x = (absolute[index.index()] + tx) * kx;
		node.y = node.depth as f64 * ky;
	}
	nodes
}

/// Parent-child links among `nodes`.
pub fn links(tree: &Hierarchy, nodes: &[NodeIndex]) -> Vec<Link> {
	nodes
		.iter()
		.filter_map(|&target| {
			tree.node(target)
				.parent
				.map(|source| Link { source, target })
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::super::types::TreeDatum;
	use super::*;

	fn approx(a: f64, b: f64) -> bool {
		(a - b).abs() < 1e-9
	}

	#[test]
	fn lone_root_is_centered() {
		let mut tree = Hierarchy::from_datum(&TreeDatum::leaf("root", 0.0));
		let nodes = layout(&mut tree, (400.0, 600.0));
		assert_eq!(nodes, [tree.root()]);
		assert!(approx(tree.node(tree.root()).x, 200.0));
		assert!(approx(tree.node(tree.root()).y, 0.0));
	}

	#[test]
	fn siblings_are_spread_evenly_and_parent_centered() {
		let mut tree = Hierarchy::from_datum(&TreeDatum::branch(
			"root",
			0.0,
			vec![
				TreeDatum::leaf("a", 0.0),
				TreeDatum::leaf("b", 0.0),
				TreeDatum::leaf("c", 0.0),
			],
		));
		layout(&mut tree, (300.0, 100.0));
		let x = |name: &str| tree.node(tree.find(name).unwrap()).x;
		let y = |name: &str| tree.node(tree.find(name).unwrap()).y;

		// Three siblings one unit apart plus half a unit of padding per side.
		assert!(approx(x("a"), 50.0));
		assert!(approx(x("b"), 150.0));
		assert!(approx(x("c"), 250.0));
		assert!(approx(x("root"), 150.0));
		assert!(approx(y("a"), 100.0));
	}

	#[test]
	fn cousins_push_their_parents_apart() {
		let mut tree = Hierarchy::from_datum(&TreeDatum::branch(
			"root",
			0.0,
			vec![
				TreeDatum::branch("a", 0.0, vec![TreeDatum::leaf("a1", 0.0)]),
				TreeDatum::branch("b", 0.0, vec![TreeDatum::leaf("b1", 0.0)]),
			],
		));
		layout(&mut tree, (100.0, 100.0));
		let x = |name: &str| tree.node(tree.find(name).unwrap()).x;

		// a1 and b1 need two units, so a and b end up two units apart too.
		assert!(approx(x("b1") - x("a1"), 200.0 / 3.0));
		assert!(approx(x("b") - x("a"), 200.0 / 3.0));
		assert!(approx(x("a1"), x("a")));
	}

	#[test]
	fn shifts_are_shared_by_siblings_between_wide_subtrees() {
		let wide = |name: &str| {
			TreeDatum::branch(
				name,
				0.0,
				(1..=4)
					.map(|i| TreeDatum::leaf(format!("{name}{i}"), 0.0))
					.collect(),
			)
		};
		let mut tree = Hierarchy::from_datum(&TreeDatum::branch(
			"root",
			0.0,
			vec![
				wide("A"),
				TreeDatum::leaf("b", 0.0),
				TreeDatum::leaf("c", 0.0),
				wide("D"),
			],
		));
		layout(&mut tree, (1000.0, 100.0));
		let x = |name: &str| tree.node(tree.find(name).unwrap()).x;

		let row = [x("A"), x("b"), x("c"), x("D")];
		let gaps: Vec<f64> = row.windows(2).map(|w| w[1] - w[0]).collect();
		for gap in &gaps {
			assert!(approx(*gap, 500.0 / 3.0), "uneven gaps {gaps:?}");
		}
		assert!(approx(x("root"), 500.0));
		assert!(approx(x("D1") - x("A4"), 200.0));
	}

	#[test]
	fn collapsed_children_take_no_space() {
		let datum = TreeDatum::branch(
			"root",
			0.0,
			vec![
				TreeDatum::branch("a", 0.0, vec![TreeDatum::leaf("a1", 0.0)]),
				TreeDatum::leaf("b", 0.0),
			],
		);
		let mut tree = Hierarchy::from_datum(&datum);
		let a = tree.find("a").unwrap();
		tree.collapse(a);
		let nodes = layout(&mut tree, (200.0, 100.0));
		assert_eq!(nodes.len(), 3);
		assert!(approx(tree.node(a).x, 50.0));
		assert!(approx(tree.node(tree.find("b").unwrap()).x, 150.0));
	}

	#[test]
	fn layout_is_deterministic() {
		let datum = TreeDatum::branch(
			"root",
			0.0,
			vec![
				TreeDatum::branch(
					"a",
					0.0,
					vec![TreeDatum::leaf("a1", 0.0), TreeDatum::leaf("a2", 0.0)],
				),
				TreeDatum::leaf("b", 0.0),
			],
		);
		let mut tree = Hierarchy::from_datum(&datum);
		let positions = |tree: &mut Hierarchy| -> Vec<(f64, f64)> {
			layout(tree, (250.0, 90.0))
				.into_iter()
				.map(|i| (tree.node(i).x, tree.node(i).y))
				.collect()
		};
		let first = positions(&mut tree);
		let second = positions(&mut tree);
		assert_eq!(first, second);
	}

	#[test]
	fn links_follow_parent_pointers() {
		let mut tree = Hierarchy::from_datum(&TreeDatum::branch(
			"root",
			0.0,
			vec![TreeDatum::leaf("a", 0.0), TreeDatum::leaf("b", 0.0)],
		));
		let nodes = layout(&mut tree, (100.0, 100.0));
		let root = tree.root();
		assert_eq!(
			links(&tree, &nodes),
			[
				Link {
					source: root,
					target: tree.find("a").unwrap()
				},
				Link {
					source: root,
					target: tree.find("b").unwrap()
				},
			]
		);
	}
}
