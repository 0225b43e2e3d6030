// Utils compartidos

pub mod constants;
pub mod format;
pub mod storage;
pub mod browser;

pub use constants::*;
pub use format::*;
