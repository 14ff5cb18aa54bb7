//! ECS Components module
//!
//! Engine-level components shared by every game built on the engine

pub mod animation;
pub mod bounds;
pub mod movement;
pub mod transform;

pub use animation::AnimationComponent;
pub use bounds::{BoundsComponent, OutOfBoundsAction};
pub use movement::MovementComponent;
pub use transform::TransformComponent;
