//! Core ROMDIR reader module.

pub mod format;
pub mod hash;
pub mod iter;
pub mod reader;
pub mod source;
pub mod types;
mod extract;
mod utils;

pub use reader::Directory;
pub use source::ImageSource;
pub use types::error::{RomdirError, Result};
pub use utils::align_up;
