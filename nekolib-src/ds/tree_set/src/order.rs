use std::{cmp::Ordering, fmt, rc::Rc};

use crate::error::{Error, Result};

/// A caller-supplied total order.
pub struct Comparator<T> {
    cmp: Rc<dyn Fn(&T, &T) -> Ordering>,
    reversed: bool,
}

impl<T> Comparator<T> {
    pub fn new(cmp: impl Fn(&T, &T) -> Ordering + 'static) -> Self {
        Self { cmp: Rc::new(cmp), reversed: false }
    }
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        if self.reversed { (self.cmp)(b, a) } else { (self.cmp)(a, b) }
    }
    pub fn reversed(&self) -> Self {
        Self { cmp: Rc::clone(&self.cmp), reversed: !self.reversed }
    }
}

impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        Self { cmp: Rc::clone(&self.cmp), reversed: self.reversed }
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt.debug_struct("Comparator")
            .field("reversed", &self.reversed)
            .finish_non_exhaustive()
    }
}

/// How two elements of a set are compared.
///
/// The natural order is captured as `partial_cmp` once at construction, so
/// the set itself carries no ordering bound and an incomparable pair only
/// fails when it is actually compared.
pub(crate) enum Order<T> {
    Natural(fn(&T, &T) -> Option<Ordering>),
    Explicit(Comparator<T>),
}

impl<T> Order<T> {
    pub fn natural() -> Self
    where
        T: PartialOrd,
    {
        Order::Natural(T::partial_cmp)
    }
    pub fn compare(&self, a: &T, b: &T) -> Result<Ordering> {
        match self {
            Order::Natural(partial_cmp) => {
                partial_cmp(a, b).ok_or(Error::TypeMismatch)
            }
            Order::Explicit(cmp) => Ok(cmp.compare(a, b)),
        }
    }
    pub fn comparator(&self) -> Option<&Comparator<T>> {
        match self {
            Order::Natural(_) => None,
            Order::Explicit(cmp) => Some(cmp),
        }
    }
}
