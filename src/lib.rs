pub mod config;
pub mod geometry;
pub mod predicates;
pub mod scenario;
pub mod sweep;
pub mod visibility;

pub use geometry::{Block, EndPoint, Point, Segment, Wall};
pub use sweep::{SweepError, FULL_SWEEP};
pub use visibility::{MapError, Visibility};
