//! Form Model - Canvas tree structure and field types
//!
//! This crate provides the data model for the form builder canvas: an ordered
//! column of fields and horizontal row groups, addressed through stable node IDs.
//! Trees are plain values; mutation helpers operate on owned copies so callers
//! can keep earlier versions around as snapshots.

mod node_id;
mod error;
mod component;
mod field;
mod canvas;
mod factory;
mod document;

pub use node_id::*;
pub use error::*;
pub use component::*;
pub use field::*;
pub use canvas::*;
pub use factory::*;
pub use document::*;
