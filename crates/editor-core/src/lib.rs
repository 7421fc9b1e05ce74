//! Scene model and editing core for the sphere editor.
//!
//! Leaves first: [`geometry`] and [`color`] are pure helpers, [`sphere`] and
//! [`scene`] hold the data model, [`store`] is the command surface used by the
//! UI, and [`picking`] / [`frame`] serve the render loop.

pub mod color;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod picking;
pub mod scene;
pub mod sphere;
pub mod store;

pub use color::*;
pub use constants::*;
pub use error::*;
pub use frame::*;
pub use geometry::{Ray, RayHit, Vector3};
pub use picking::*;
pub use scene::*;
pub use sphere::*;
pub use store::*;
