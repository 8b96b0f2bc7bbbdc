#[doc(inline)]
pub use tree_set::{self, *};
