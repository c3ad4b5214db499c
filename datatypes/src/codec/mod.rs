mod binary;
mod number;
#[cfg(feature = "postgres")]
mod postgres;
mod reader;
mod text;
mod timestamp;

pub use binary::BinaryCodec;
pub use number::{FLOAT_PRECISION, format_float};
pub use text::TextCodec;
pub use timestamp::{IsoTimestampFormat, TimestampFormat};
