pub mod ansi;
pub mod decoration;

pub use decoration::{Color, Decoration, Segment, Segments, Style};
