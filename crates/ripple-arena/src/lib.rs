//! Double-buffered grid storage for the Ripple solver.
//!
//! Every grid is a [`BufferPair`]: two equally sized slots, one holding
//! the current state and one used as the write target of the next pass.
//! A pass reads only the current slot through a [`ReadHandle`], writes
//! every cell of the other slot, then swaps the roles by flipping one
//! bit. No cell data is copied on swap.
//!
//! ```text
//! GridBufferStore
//! ├── field:     BufferPair<FieldCell>      ez, hx, hy, material
//! ├── accessory: BufferPair<AccessoryCell>  source amplitude/phase, dielectric
//! └── history:   BufferPair<HistoryCell>    field one step ago
//! ```
//!
//! A [`ReadHandle`] borrows its pair, so the borrow checker rejects any
//! use of a handle after the pair has been swapped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod dispatch;
pub mod error;
pub mod pingpong;
pub mod read;
pub mod store;

pub use dispatch::Dispatch;
pub use error::ArenaError;
pub use pingpong::{BufferPair, Slot};
pub use read::ReadHandle;
pub use store::{GridBufferStore, GridsMut};
