//! UI components.

pub mod network_graph;
pub mod panels;
pub mod particles;
pub mod sidebar;
