//! Turning user-supplied paths into normalized absolute ones.

mod normalize;
mod resolver;

pub use normalize::normalize;
pub use resolver::{PathResolver, WorkingDir};
