#![warn(clippy::all)]
#![allow(clippy::missing_errors_doc, clippy::use_self, clippy::doc_markdown)]

//! Layout engine for the flexdash start page.
//!
//! This crate provides the geometry primitives and the two layout passes used to
//! arrange dashboard widgets: horizontal centering for freeform mode and grid
//! snapping with overlap resolution for grid mode. Everything here is pure; the
//! passes take position and size maps and return a new position map.

pub mod arrangement;
pub mod centering;
pub mod error;
pub mod grid;
pub mod layout_mode;
pub mod position;
pub mod rect;
pub mod row;
pub mod sizing;
pub mod widget;

pub use arrangement::*;
pub use centering::*;
pub use error::*;
pub use grid::*;
pub use layout_mode::*;
pub use position::*;
pub use rect::*;
pub use row::*;
pub use sizing::*;
pub use widget::*;
