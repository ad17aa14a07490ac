//! PDF rendering modules for reassembly
//!
//! This module handles all PDF-specific operations:
//! - Creating XObjects from source pages
//! - Building output pages from placements
//! - Reading inherited page attributes
//! - Deep copying PDF objects

mod page;
mod xobject;

pub use page::OutputBuilder;
pub use xobject::{
    copy_object_deep, create_page_xobject, get_media_box, get_rotate_degrees, resolve_inherited,
};
