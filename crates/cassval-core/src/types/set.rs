use derive_more::{Deref, DerefMut, From};

///
/// Set
///
/// Marks a sequence for CQL `set` binding. A bare `Vec` binds as `list`.
///

#[derive(Clone, Debug, Deref, DerefMut, Eq, From, Hash, PartialEq)]
#[repr(transparent)]
pub struct Set<T>(pub Vec<T>);

impl<T> Set<T> {
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

// Hand-written so an empty set needs no `T: Default`.
impl<T> Default for Set<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Set<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T> IntoIterator for Set<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
