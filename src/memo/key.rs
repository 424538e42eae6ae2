//! Two-component cache key for [`MemoizedBiFn`](crate::memo::binary::MemoizedBiFn).
//!
//! The combined hash is computed once, at construction, and replayed by
//! [`Hash`]; equality checks that cached hash before comparing components.

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

/// Immutable pair of arguments with a precomputed hash.
///
/// Equal pairs always hash equally. The two positions are not
/// interchangeable: `(a, b)` and `(b, a)` are different keys.
///
/// # Example
///
/// ```
/// use memokit::memo::key::CompositeKey;
///
/// let k = CompositeKey::new(1, "x");
/// assert_eq!(k, CompositeKey::new(1, "x"));
/// assert_ne!(k, CompositeKey::new(2, "x"));
/// assert_eq!(k.to_string(), "(1, x)");
/// ```
#[derive(Clone)]
pub struct CompositeKey<A, B> {
    first: A,
    second: B,
    hash: u64,
}

impl<A, B> CompositeKey<A, B>
where
    A: Hash,
    B: Hash,
{
    pub fn new(first: A, second: B) -> Self {
        let mut hasher = FxHasher::default();
        first.hash(&mut hasher);
        second.hash(&mut hasher);
        let hash = hasher.finish();
        Self {
            first,
            second,
            hash,
        }
    }
}

impl<A, B> CompositeKey<A, B> {
    #[inline]
    pub fn first(&self) -> &A {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &B {
        &self.second
    }

    /// Hash computed at construction.
    #[inline]
    pub fn precomputed_hash(&self) -> u64 {
        self.hash
    }

    pub fn into_parts(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: PartialEq, B: PartialEq> PartialEq for CompositeKey<A, B> {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.first == other.first && self.second == other.second
    }
}

impl<A: Eq, B: Eq> Eq for CompositeKey<A, B> {}

impl<A, B> Hash for CompositeKey<A, B> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl<A: Hash, B: Hash> From<(A, B)> for CompositeKey<A, B> {
    fn from((first, second): (A, B)) -> Self {
        Self::new(first, second)
    }
}

impl<A: fmt::Display, B: fmt::Display> fmt::Display for CompositeKey<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.first, self.second)
    }
}

impl<A: fmt::Debug, B: fmt::Debug> fmt::Debug for CompositeKey<A, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CompositeKey")
            .field(&self.first)
            .field(&self.second)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use std::hash::BuildHasher;

    #[test]
    fn equal_keys_hash_equally() {
        let state = std::collections::hash_map::RandomState::new();
        let a = CompositeKey::new("left".to_string(), 7u32);
        let b = CompositeKey::new("left".to_string(), 7u32);
        assert_eq!(a, b);
        assert_eq!(state.hash_one(&a), state.hash_one(&b));
        assert_eq!(a.precomputed_hash(), b.precomputed_hash());
    }

    #[test]
    fn order_of_components_matters() {
        let ab = CompositeKey::new(1, 2);
        let ba = CompositeKey::new(2, 1);
        assert_ne!(ab, ba);
    }

    #[test]
    fn display_and_debug() {
        let key = CompositeKey::new("a", 3);
        assert_eq!(key.to_string(), "(a, 3)");
        assert_eq!(format!("{:?}", key), "CompositeKey(\"a\", 3)");
    }

    #[test]
    fn accessors_and_parts() {
        let key: CompositeKey<_, _> = ("x".to_string(), 9u8).into();
        assert_eq!(key.first(), "x");
        assert_eq!(*key.second(), 9);
        assert_eq!(key.into_parts(), ("x".to_string(), 9));
    }

    #[test]
    fn works_as_hash_set_member() {
        let mut set = HashSet::new();
        assert!(set.insert(CompositeKey::new(1u8, 'a')));
        assert!(!set.insert(CompositeKey::new(1u8, 'a')));
        assert!(set.insert(CompositeKey::new(1u8, 'b')));
        assert_eq!(set.len(), 2);
    }

    proptest! {
        #[test]
        fn eq_implies_same_hash(a in any::<i64>(), b in ".{0,8}") {
            let state = std::collections::hash_map::RandomState::new();
            let left = CompositeKey::new(a, b.clone());
            let right = CompositeKey::new(a, b);
            prop_assert_eq!(&left, &right);
            prop_assert_eq!(state.hash_one(&left), state.hash_one(&right));
        }

        #[test]
        fn distinct_components_are_unequal(
            a in any::<u16>(),
            b in any::<u16>(),
            c in any::<u16>()
        ) {
            prop_assume!(b != c);
            prop_assert_ne!(CompositeKey::new(a, b), CompositeKey::new(a, c));
        }
    }
}
