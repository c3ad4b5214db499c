pub mod codec;
pub mod error;
pub mod operations;
pub mod primitives;
pub mod util;
