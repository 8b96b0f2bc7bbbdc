#[doc(inline)]
pub use sorted_vec_set::{self, *};
