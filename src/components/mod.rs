//! UI components.

pub mod progress_tree;
