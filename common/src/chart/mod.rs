//! The organization chart core: pure hierarchy assembly over flat entity
//! collections, explicit collapse state, and a renderable tree derivation.
//! Nothing here touches the database or the network.

pub mod assembly;
pub mod render;
pub mod view_state;

pub use assembly::{assemble, AssemblyError, DepartmentNode, OrgChart, OrphanPolicy, SubfunctionNode};
pub use render::{initials, render, NodeKind, RenderNode};
pub use view_state::{CollapseState, RebuildPolicy};
