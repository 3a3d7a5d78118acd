mod owned_iter;
mod pruners;
mod pruning_iter;
mod ref_iter;

pub use owned_iter::IntoIter;
pub use ref_iter::Iter;

pub(crate) use pruners::*;
pub(crate) use pruning_iter::*;
