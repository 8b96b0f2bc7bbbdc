use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// An absent value was passed where an element or comparator is required.
    #[error("invalid argument: `{0}` must be present")]
    InvalidArgument(&'static str),

    /// Two elements turned out not to be comparable under the active order.
    #[error("elements are not mutually comparable")]
    TypeMismatch,

    #[error("set was structurally modified since the iterator was created")]
    ConcurrentModification,

    #[error("no more elements")]
    NoSuchElement,
}

pub type Result<T> = std::result::Result<T, Error>;
