//! bonk-rigid: small 2D rigid-body engine (discs, rectangles, convex polygons,
//! all-pairs SAT detection, impulse resolution, boxed world)

pub mod types;
pub mod error;
pub mod body;
pub mod api;
pub mod narrowphase;
pub mod shape;
pub mod resolve;
pub mod world;

pub use crate::types::*;
pub use crate::api::*;
pub use crate::body::Body;
pub use crate::error::{ShapeError, WorldError};
pub use crate::narrowphase::Narrowphase;
pub use crate::resolve::{resolve_contact, resolve_pair, resolver_for, Resolver};
pub use crate::shape::{presets, ConvexPolygon, Disc, Rectangle, Shape};
pub use crate::world::PhysicsWorld;
