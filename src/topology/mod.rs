//! Top-level module for grid topology primitives.
//!
//! This module provides the cell vocabulary shared by every grid provider:
//! - [`CellType`]: VTK-compatible cell kinds with dimension metadata
//! - [`CellRef`]/[`Cell`]: borrowed and owned cell records
//! - [`faces`]: outward-oriented local face tables for volumetric kinds

pub mod cell;
pub mod cell_type;
pub mod faces;

pub use cell::{Cell, CellRef};
pub use cell_type::CellType;
