pub mod common;
pub mod image;
pub mod process;
pub mod result;

pub use common::*;
pub use image::*;
pub use process::*;
pub use result::*;
