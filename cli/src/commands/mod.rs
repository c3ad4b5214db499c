mod binary;
mod normalize;
mod parse;
mod predicate;
mod set_operations;

pub use binary::{Binary, binary};
pub use normalize::{Normalize, normalize};
pub use parse::{Parse, parse};
pub use predicate::{Predicate, PredicateArgs, predicate};
pub use set_operations::{BoxPair, intersect, union};
