//! Domain models for the org chart.
//!
//! # Core Concepts
//!
//! - [`OrgNode`]: One person in the chart. Nodes form a strict
//!   Manager → Lead → Member tree and are treated as immutable snapshots;
//!   every edit produces a new root.
//! - [`NodePatch`]: Shallow field merge used by the tree algebra.
//! - [`UserRole`]: Session role. `Admin` edits, `Viewer` reads.
//! - [`HistoryStatus`]: Undo/redo availability for the current session.
//! - [`HierarchyStats`]: Headcount summary derived from a tree.
//! - [`StoredDocument`]: A versioned chart document in the durable store.

mod history;
mod node;
mod session;
mod stats;
mod stored;

pub use history::*;
pub use node::*;
pub use session::*;
pub use stats::*;
pub use stored::*;
