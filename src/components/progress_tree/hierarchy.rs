//! Node arena for the displayed hierarchy.
//!
//! Nodes are never removed. Expanding or collapsing a node only moves its
//! child list between the two [`Children`] variants, so arena indices stay
//! valid for the lifetime of the tree.

use super::types::{NodeDetail, TreeDatum};

/// Stable identity handed out the first time a node becomes visible.
/// Rendered nodes and links are matched on it across updates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u32);

/// Position of a node inside the [`Hierarchy`] arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
	/// Position in the arena.
	pub fn index(self) -> usize {
		self.0
	}
}

/// A node's child list, either shown or tucked away.
///
/// Leaves are `Expanded` with an empty list.
#[derive(Clone, Debug, PartialEq)]
pub enum Children {
	/// Children are shown.
	Expanded(Vec<NodeIndex>),
	/// Children are hidden.
	Collapsed(Vec<NodeIndex>),
}

impl Children {
	/// Children that take part in layout.
	pub fn visible(&self) -> &[NodeIndex] {
		match self {
			Children::Expanded(children) => children,
			Children::Collapsed(_) => &[],
		}
	}

	/// Children retained while the node is collapsed.
	pub fn hidden(&self) -> &[NodeIndex] {
		match self {
			Children::Expanded(_) => &[],
			Children::Collapsed(children) => children,
		}
	}

	/// All children regardless of visibility.
	pub fn all(&self) -> &[NodeIndex] {
		match self {
			Children::Expanded(children) | Children::Collapsed(children) => children,
		}
	}
}

/// One node of the hierarchy together with its layout bookkeeping.
#[derive(Clone, Debug)]
pub struct Node {
	/// Assigned the first time the node is shown, then kept.
	pub id: Option<NodeId>,
	/// Display name.
	pub name: String,
	/// Progress percentage; may exceed 100.
	pub value: f64,
	/// Distance from the root (root = 0).
	pub depth: usize,
	/// `None` for the root.
	pub parent: Option<NodeIndex>,
	/// Child indices, visible or hidden.
	pub children: Children,
	/// Breadth coordinate (vertical on screen).
	pub x: f64,
	/// Depth coordinate (horizontal on screen).
	pub y: f64,
	/// `x` at the end of the previous update; origin for entering elements.
	pub x0: f64,
	/// `y` at the end of the previous update.
	pub y0: f64,
}

impl Node {
	/// True when the node has children, visible or hidden.
	pub fn has_children(&self) -> bool {
		!self.children.all().is_empty()
	}

	/// Payload for the leaf detail dialog.
	pub fn detail(&self) -> NodeDetail {
		NodeDetail {
			name: self.name.clone(),
			value: self.value,
			depth: self.depth,
		}
	}
}

/// The full tree, rooted at index 0.
#[derive(Clone, Debug)]
pub struct Hierarchy {
	nodes: Vec<Node>,
}

impl Hierarchy {
	/// Builds the arena from parsed input. Every node starts expanded.
	pub fn from_datum(root: &TreeDatum) -> Self {
		let mut hierarchy = Self { nodes: Vec::new() };
		hierarchy.push(root, 0, None);
		hierarchy
	}

	fn push(&mut self, datum: &TreeDatum, depth: usize, parent: Option<NodeIndex>) -> NodeIndex {
		let index = NodeIndex(self.nodes.len());
		self.nodes.push(Node {
			id: None,
			name: datum.name.clone(),
			value: datum.value,
			depth,
			parent,
			children: Children::Expanded(Vec::new()),
			x: 0.0,
			y: 0.0,
			x0: 0.0,
			y0: 0.0,
		});
		let children = datum
			.children
			.iter()
			.flatten()
			.map(|child| self.push(child, depth + 1, Some(index)))
			.collect();
		self.nodes[index.0].children = Children::Expanded(children);
		index
	}

	/// Index of the root node.
	pub fn root(&self) -> NodeIndex {
		NodeIndex(0)
	}

	/// The node at `index`.
	pub fn node(&self, index: NodeIndex) -> &Node {
		&self.nodes[index.0]
	}

	/// Mutable access to the node at `index`.
	pub fn node_mut(&mut self, index: NodeIndex) -> &mut Node {
		&mut self.nodes[index.0]
	}

	/// Number of nodes, visible or not.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True for an arena without nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// First node with the given name, in pre-order.
	pub fn find(&self, name: &str) -> Option<NodeIndex> {
		self.nodes.iter().position(|n| n.name == name).map(NodeIndex)
	}

	/// Deepest depth present in the tree, hidden nodes included.
	pub fn max_depth(&self) -> usize {
		self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
	}

	/// Nodes reachable from the root through expanded children, in pre-order.
	pub fn visible_nodes(&self) -> Vec<NodeIndex> {
		let mut out = Vec::with_capacity(self.nodes.len());
		let mut stack = vec![self.root()];
		while let Some(index) = stack.pop() {
			out.push(index);
			stack.extend(self.node(index).children.visible().iter().rev());
		}
		out
	}

	/// Hides the node's children. Returns how many were hidden.
	pub fn collapse(&mut self, index: NodeIndex) -> usize {
		let node = &mut self.nodes[index.0];
		match &mut node.children {
			Children::Expanded(children) if !children.is_empty() => {
				let hidden = std::mem::take(children);
				let count = hidden.len();
				node.children = Children::Collapsed(hidden);
				count
			}
			_ => 0,
		}
	}

	/// Restores the node's hidden children. Returns how many were shown.
	pub fn expand(&mut self, index: NodeIndex) -> usize {
		let node = &mut self.nodes[index.0];
		match &mut node.children {
			Children::Collapsed(children) => {
				let shown = std::mem::take(children);
				let count = shown.len();
				node.children = Children::Expanded(shown);
				count
			}
			Children::Expanded(_) => 0,
		}
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn sample() -> Hierarchy {
		Hierarchy::from_datum(&TreeDatum::branch(
			"root",
			50.0,
			vec![
				TreeDatum::branch("a", 20.0, vec![TreeDatum::leaf("a1", 5.0)]),
				TreeDatum::leaf("b", 90.0),
			],
		))
	}

	fn names(tree: &Hierarchy, indices: &[NodeIndex]) -> Vec<String> {
		indices.iter().map(|&i| tree.node(i).name.clone()).collect()
	}

	#[test]
	fn builds_depths_and_parents() {
		let tree = sample();
		assert_eq!(tree.len(), 4);
		assert_eq!(tree.max_depth(), 2);
		let a1 = tree.find("a1").unwrap();
		assert_eq!(tree.node(a1).depth, 2);
		assert_eq!(tree.node(a1).parent, tree.find("a"));
		assert_eq!(tree.node(tree.root()).parent, None);
	}

	#[test]
	fn visible_nodes_are_pre_order() {
		let tree = sample();
		assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "a", "a1", "b"]);
	}

	#[test]
	fn collapse_and_expand_move_children_between_variants() {
		let mut tree = sample();
		let a = tree.find("a").unwrap();

		assert_eq!(tree.collapse(a), 1);
		assert!(tree.node(a).children.visible().is_empty());
		assert_eq!(tree.node(a).children.hidden().len(), 1);
		assert!(tree.node(a).has_children());
		assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "a", "b"]);

		assert_eq!(tree.collapse(a), 0);
		assert_eq!(tree.expand(a), 1);
		assert_eq!(tree.expand(a), 0);
		assert_eq!(names(&tree, &tree.visible_nodes()), ["root", "a", "a1", "b"]);
	}

	#[test]
	fn leaves_neither_collapse_nor_expand() {
		let mut tree = sample();
		let b = tree.find("b").unwrap();
		assert_eq!(tree.collapse(b), 0);
		assert_eq!(tree.expand(b), 0);
		assert!(!tree.node(b).has_children());
		assert_eq!(tree.node(b).children, Children::Expanded(Vec::new()));
	}
}
