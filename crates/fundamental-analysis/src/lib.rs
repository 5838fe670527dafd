pub mod dcf;
pub mod summary;

pub use dcf::*;
pub use summary::*;
