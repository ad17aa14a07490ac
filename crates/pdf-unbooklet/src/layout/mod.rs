//! Layout calculation modules for booklet reassembly
//!
//! This module handles all the geometric calculations, free of PDF I/O:
//! - Booklet numbering (which logical pages share a sheet)
//! - Sheet splitting (rotation flattening, half extraction)
//! - Reassembly (reading order, output scaling)
//! - Poster tiling

mod numbering;
mod poster;
mod reassemble;
mod split;
mod types;

pub use numbering::*;
pub use poster::*;
pub use reassemble::*;
pub use split::*;
pub use types::*;
