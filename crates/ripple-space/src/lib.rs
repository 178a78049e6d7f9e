//! Spatial layout of the Ripple solver grid.
//!
//! [`GridExtent`] maps between cell coordinates, linear indices and the
//! normalized `[-1, 1]` domain used by the interaction layer. [`Edge`]
//! classifies the outermost ring of cells for the absorbing boundary.
//! [`Circle`], [`Footprint`] and [`Shape`] decide which cells a
//! geometry or source write touches.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod extent;
pub mod footprint;
pub mod segment;

pub use edge::Edge;
pub use error::SpaceError;
pub use extent::GridExtent;
pub use footprint::{falloff, Circle, Footprint, Shape, FOOTPRINT_THRESHOLD, MIN_RADIUS_FLOOR};
pub use segment::Segment;
