mod hash;
pub mod ranges;
mod result;

pub(crate) use hash::{hash_f64, hash_i64};
pub use result::Result;
