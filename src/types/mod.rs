pub mod segment;
pub mod sequence;
pub mod signal;

pub use segment::*;
pub use sequence::*;
pub use signal::*;
