pub struct SortedVecSet<T>(Vec<T>);

impl<T: Ord + Clone> SortedVecSet<T> {
    pub fn new() -> Self { Self(vec![]) }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn len(&self) -> usize { self.0.len() }

    pub fn insert(&mut self, elt: T) -> bool {
        if self.0.contains(&elt) {
            return false;
        }
        let i = self.0.iter().take_while(|x| **x < elt).count();
        self.0.insert(i, elt);
        true
    }
    pub fn remove(&mut self, elt: &T) -> bool {
        (0..self.0.len())
            .find(|&i| &self.0[i] == elt)
            .map(|i| self.0.remove(i))
            .is_some()
    }
    pub fn contains(&self, elt: &T) -> bool { self.0.contains(elt) }

    pub fn first(&self) -> Option<T> { self.0.first().cloned() }
    pub fn last(&self) -> Option<T> { self.0.last().cloned() }

    pub fn lower(&self, elt: &T) -> Option<T> {
        self.0.iter().rev().find(|x| *x < elt).cloned()
    }
    pub fn floor(&self, elt: &T) -> Option<T> {
        self.0.iter().rev().find(|x| *x <= elt).cloned()
    }
    pub fn ceiling(&self, elt: &T) -> Option<T> {
        self.0.iter().find(|x| *x >= elt).cloned()
    }
    pub fn higher(&self, elt: &T) -> Option<T> {
        self.0.iter().find(|x| *x > elt).cloned()
    }

    pub fn pop_first(&mut self) -> Option<T> {
        if self.0.is_empty() { None } else { Some(self.0.remove(0)) }
    }
    pub fn pop_last(&mut self) -> Option<T> { self.0.pop() }

    pub fn iter(&self) -> impl Iterator<Item = &T> + DoubleEndedIterator {
        self.0.iter()
    }
}

#[test]
fn sanity_check() {
    let mut set = SortedVecSet::new();
    assert!(set.insert(3));
    assert!(set.insert(1));
    assert!(!set.insert(3));
    assert!(set.insert(2));
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);

    assert_eq!(set.lower(&2), Some(1));
    assert_eq!(set.floor(&2), Some(2));
    assert_eq!(set.ceiling(&0), Some(1));
    assert_eq!(set.higher(&3), None);

    assert!(set.remove(&1));
    assert!(!set.remove(&1));
    assert_eq!(set.first(), Some(2));
    assert_eq!(set.pop_last(), Some(3));
    assert_eq!(set.len(), 1);
}
