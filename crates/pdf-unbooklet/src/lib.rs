pub mod constants;
pub mod layout;
mod options;
mod poster;
pub mod progress;
pub mod render;
mod sample;
mod stats;
mod types;
pub mod unbooklet;

pub use options::*;
pub use poster::{poster, poster_sync};
pub use progress::{NoProgress, ProgressSink};
pub use sample::{SampleBooklet, create_sample_booklet};
pub use stats::calculate_statistics;
pub use types::*;
pub use unbooklet::{load_pdf, read_sheets, save_pdf, unbooklet, unbooklet_sync};
