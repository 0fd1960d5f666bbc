pub mod client;
pub mod cursors;
pub mod keys;
pub mod layout;
pub mod manager;
pub mod navigation;
pub mod registry;
pub mod spawn;
pub mod state;
pub mod status;
pub mod strut;

/// Workspaces 1-9, exactly one visible at a time (docks are on all).
pub const WORKSPACE_COUNT: usize = 9;
