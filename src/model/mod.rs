pub mod entry;
pub mod round;

pub use entry::*;
pub use round::*;
