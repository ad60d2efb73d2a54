//! Collapsible tree visualization with animated progress rings.
//!
//! Renders a hierarchy on an HTML canvas with:
//! - A tidy tree layout whose canvas height follows the deepest level shown
//! - Click-to-expand/collapse subtrees, with enter/update/exit transitions
//! - A progress ring per node, sweeping to its value and continuing into an
//!   inner ring when the value exceeds 100%
//! - A detail dialog for leaf nodes
//!
//! # Example
//!
//! ```ignore
//! use progress_tree::{ProgressTreeCanvas, TreeConfig};
//!
//! let config = TreeConfig {
//!     data_url: "data/tree.json".into(),
//!     cutoff_depth: 1,
//!     height_hierarchy: vec![300.0, 450.0, 600.0],
//!     ..TreeConfig::default()
//! };
//!
//! view! { <ProgressTreeCanvas config=config /> }
//! ```

mod component;
pub mod config;
mod detail;
pub mod hierarchy;
pub mod label;
pub mod layout;
mod render;
pub mod ring;
pub mod scene;
pub mod source;
pub mod state;
pub mod theme;
pub mod transition;
mod types;
pub mod view;

pub use component::ProgressTreeCanvas;
pub use config::{Margins, TreeConfig};
pub use detail::NodeDetailDialog;
pub use hierarchy::{Children, Hierarchy, Node, NodeId, NodeIndex};
pub use label::LabelPosition;
pub use source::LoadError;
pub use state::TreeViewState;
pub use theme::{ProgressColor, Theme};
pub use types::{NodeDetail, TreeDatum};
pub use view::{ClickOutcome, TreeView};
