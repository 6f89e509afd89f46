mod filter;
mod inspect;
mod map;

pub use filter::{FilterIter, Filtered};
pub(crate) use inspect::log_failure;
pub use inspect::{InspectIter, OnEachFailure};
pub use map::{Fallible, MapIter, Mapped, Pure};
