//! Keeping a dropdown's option set consistent with the current selection.

use std::borrow::Cow;
use std::collections::HashSet;

use crate::entities::Entity;

/// Prepend candidates to `collection` unless an entity with the same
/// identifier is already present.
///
/// `None` candidates are ignored. If no candidate remains, the original
/// collection is returned borrowed and untouched. Otherwise the result is a
/// new vector holding the newly added candidates, in argument order, followed
/// by the original collection in its original order. Candidates without an
/// identifier are dropped, and duplicates within one call collapse to the
/// first occurrence.
///
/// # Example
///
/// ```
/// use cryptfield_core::{CustomerAddress, CustomerAddressId, add_to_collection_if_missing};
///
/// let options = vec![CustomerAddress::with_id(CustomerAddressId::new(26589))];
/// let current = CustomerAddress::with_id(CustomerAddressId::new(40575));
///
/// let merged = add_to_collection_if_missing(&options, [Some(&current)]);
/// let ids: Vec<_> = merged.iter().filter_map(|a| a.id).map(i64::from).collect();
/// assert_eq!(ids, vec![40575, 26589]);
/// ```
pub fn add_to_collection_if_missing<'a, 'b, E, I>(collection: &'a [E], candidates: I) -> Cow<'a, [E]>
where
    E: Entity + Clone + 'b,
    I: IntoIterator<Item = Option<&'b E>>,
{
    let candidates: Vec<&E> = candidates.into_iter().flatten().collect();
    if candidates.is_empty() {
        return Cow::Borrowed(collection);
    }

    let mut seen: HashSet<E::Id> = collection.iter().filter_map(Entity::id).collect();
    let to_add = candidates
        .into_iter()
        .filter(|candidate| candidate.id().is_some_and(|id| seen.insert(id)));

    let mut merged: Vec<E> = Vec::with_capacity(collection.len() + 1);
    merged.extend(to_add.cloned());
    merged.extend_from_slice(collection);
    Cow::Owned(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::CustomerAddress;
    use crate::types::CustomerAddressId;

    fn address(id: i64) -> CustomerAddress {
        CustomerAddress::with_id(CustomerAddressId::new(id))
    }

    fn ids(addresses: &[CustomerAddress]) -> Vec<i64> {
        addresses.iter().filter_map(|a| a.id).map(i64::from).collect()
    }

    #[test]
    fn test_no_candidates_returns_same_collection() {
        let collection = vec![address(123)];
        let merged = add_to_collection_if_missing(&collection, std::iter::empty());
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert!(std::ptr::eq(merged.as_ref(), collection.as_slice()));
    }

    #[test]
    fn test_only_none_candidates_returns_same_collection() {
        let collection = vec![address(123)];
        let merged = add_to_collection_if_missing(&collection, [None, None]);
        assert!(matches!(merged, Cow::Borrowed(_)));
        assert_eq!(ids(&merged), vec![123]);
    }

    #[test]
    fn test_adds_missing_candidate_first() {
        let collection = vec![address(26589)];
        let current = address(40575);
        let merged = add_to_collection_if_missing(&collection, [Some(&current)]);
        assert_eq!(ids(&merged), vec![40575, 26589]);
    }

    #[test]
    fn test_skips_candidate_already_present() {
        let collection = vec![address(123), address(456)];
        let duplicate = address(456);
        let merged = add_to_collection_if_missing(&collection, [Some(&duplicate)]);
        assert_eq!(merged.len(), collection.len());
        assert_eq!(ids(&merged), vec![123, 456]);
    }

    #[test]
    fn test_duplicate_candidates_collapse() {
        let collection: Vec<CustomerAddress> = Vec::new();
        let first = address(1);
        let again = address(1);
        let merged = add_to_collection_if_missing(&collection, [Some(&first), None, Some(&again)]);
        assert_eq!(ids(&merged), vec![1]);
    }

    #[test]
    fn test_candidates_keep_argument_order() {
        let collection = vec![address(9)];
        let (a, b, c) = (address(3), address(1), address(2));
        let merged = add_to_collection_if_missing(&collection, [Some(&a), Some(&b), Some(&c)]);
        assert_eq!(ids(&merged), vec![3, 1, 2, 9]);
    }

    #[test]
    fn test_candidate_without_id_is_dropped() {
        let collection = vec![address(5)];
        let unsaved = CustomerAddress::default();
        let merged = add_to_collection_if_missing(&collection, [Some(&unsaved)]);
        assert_eq!(merged.len(), 1);
        assert_eq!(ids(&merged), vec![5]);
    }

    #[test]
    fn test_input_collection_is_not_mutated() {
        let collection = vec![address(10), address(20)];
        let snapshot = collection.clone();
        let extra = address(30);
        let merged = add_to_collection_if_missing(&collection, [Some(&extra)]);
        assert_eq!(ids(&merged), vec![30, 10, 20]);
        assert_eq!(collection, snapshot);
    }
}
