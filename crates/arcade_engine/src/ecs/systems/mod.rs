//! ECS Systems module
//!
//! Per-tick order: movement (Update), bounds (PostUpdate), render sync (Render).

pub mod bounds_system;
pub mod movement_system;
pub mod render_sync_system;

pub use bounds_system::{is_out_of_bounds, BoundsSystem};
pub use movement_system::MovementSystem;
pub use render_sync_system::RenderSyncSystem;
