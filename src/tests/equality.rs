use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use crate::AdaptiveMap;
use crate::Error;
use crate::ImmutableEntry;
use crate::Mode;
use crate::OrderedMapFactory;
use crate::SortedMapFactory;

use super::big_test_map;
use super::small_test_map;

fn std_hash<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

#[test]
fn same_maps_are_equal() {
    let map1 = small_test_map();
    let map2 = small_test_map();

    assert_eq!(map1, map2);
    assert_eq!(map2, map1);
    assert_eq!(map1, map1);
    assert_eq!(map1.content_hash(), map2.content_hash());
}

#[test]
fn small_and_big_maps_with_same_entries_are_equal() {
    let small = small_test_map();
    let mut big = AdaptiveMap::with_capacity(1);
    big.put("def", 456).unwrap();
    big.put("xyz", 123).unwrap();
    big.put("abc", 155).unwrap();

    assert_eq!(small.mode(), Mode::Small);
    assert_eq!(big.mode(), Mode::Big);
    assert_eq!(small, big);
    assert_eq!(big, small);
    assert_eq!(small.content_hash(), big.content_hash());
    assert_eq!(std_hash(&small), std_hash(&big));
    assert_eq!(big, big_test_map());
}

#[test]
fn equality_ignores_factory() {
    let mut sorted = AdaptiveMap::with_capacity_and_factory(1, SortedMapFactory);
    sorted.put("xyz", 123).unwrap();
    sorted.put("abc", 155).unwrap();
    sorted.put("def", 456).unwrap();

    assert_eq!(sorted, small_test_map());
    assert_eq!(small_test_map(), sorted);
}

#[test]
fn equal_to_std_maps() {
    let mut map = AdaptiveMap::new();
    map.put("abc", 123).unwrap();
    map.put("xyz", 456).unwrap();

    let hash_map = HashMap::from([("abc", 123), ("xyz", 456)]);
    let btree_map = BTreeMap::from([("abc", 123), ("xyz", 456)]);

    assert_eq!(map, hash_map);
    assert_eq!(map, btree_map);
    assert!(map.eq_map(&hash_map));
}

#[test]
fn different_maps_are_not_equal() {
    let mut map = AdaptiveMap::new();
    map.put("abc", 123).unwrap();
    map.put("xyz", 456).unwrap();

    let different_value = HashMap::from([("abc", 123), ("xyz", 123)]);
    let different_key = HashMap::from([("abc", 123), ("zzz", 456)]);
    let different_len = HashMap::from([("abc", 123)]);

    assert_ne!(map, different_value);
    assert_ne!(map, different_key);
    assert_ne!(map, different_len);
}

#[test]
fn absent_value_in_other_map_is_never_equal() {
    let mut map = AdaptiveMap::new();
    map.put("abc", Some(1)).unwrap();

    let mut other = HashMap::new();
    other.insert("abc", None);
    assert!(!map.eq_map(&other));

    other.insert("abc", Some(1));
    assert!(map.eq_map(&other));
}

#[test]
fn content_hash_ignores_order() {
    let mut forward = AdaptiveMap::new();
    let mut backward = AdaptiveMap::new();
    for i in 0..5u32 {
        forward.put(i, i * 2).unwrap();
        backward.put(4 - i, (4 - i) * 2).unwrap();
    }

    assert_ne!(
        forward.keys().collect::<Vec<_>>(),
        backward.keys().collect::<Vec<_>>()
    );
    assert_eq!(forward, backward);
    assert_eq!(forward.content_hash(), backward.content_hash());
}

#[test]
fn empty_maps_hash_to_zero() {
    assert_eq!(AdaptiveMap::<u32, u32>::new().content_hash(), 0);
}

#[test]
fn display_small() {
    assert_eq!(
        small_test_map().to_string(),
        "[Small]{xyz=123, abc=155, def=456}"
    );
}

#[test]
fn display_big() {
    let mut map = AdaptiveMap::with_capacity(0);
    map.put("abc", 1).unwrap();
    assert_eq!(map.to_string(), "[Big]{abc=1}");

    let rendered = big_test_map().to_string();
    assert!(rendered.starts_with("[Big]{"));
    assert!(rendered.contains("xyz=123"));
    assert!(rendered.contains("abc=155"));
    assert!(rendered.contains("def=456"));
}

#[test]
fn display_big_lists_every_entry_in_delegate_order() {
    let mut map = AdaptiveMap::with_capacity_and_factory(1, OrderedMapFactory);
    map.put("xyz", 123).unwrap();
    map.put("abc", 155).unwrap();
    map.put("def", 456).unwrap();

    assert_eq!(map.mode(), Mode::Big);
    assert_eq!(map.to_string(), "[Big]{xyz=123, abc=155, def=456}");

    map.remove(&"abc").unwrap();
    assert_eq!(map.to_string(), "[Big]{xyz=123, def=456}");
}

#[test]
fn debug_is_a_plain_map() {
    let mut map = AdaptiveMap::new();
    map.put("abc", 1).unwrap();
    assert_eq!(format!("{map:?}"), r#"{"abc": 1}"#);
}

#[test]
fn key_set_snapshot() {
    let mut map = small_test_map();
    let keys = map.key_set();

    assert_eq!(keys.iter().copied().collect::<Vec<_>>(), ["xyz", "abc", "def"]);

    map.remove(&"abc").unwrap();
    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"abc"));
}

#[test]
fn value_list_snapshot() {
    let map = small_test_map();
    let values = map.value_list();

    assert_eq!(values.as_slice(), [123, 155, 456]);
    assert!(values.contains(&155));
    assert_eq!(values.len(), 3);
}

#[test]
fn entry_set_snapshot() {
    let mut map = AdaptiveMap::with_capacity(3);
    map.put("abc", 123).unwrap();
    map.put("def", 456).unwrap();

    let entries = map.entry_set();
    map.clear();

    assert_eq!(entries.len(), 2);
    assert!(entries.contains(&ImmutableEntry::new("abc", 123)));
    assert!(entries.contains(&ImmutableEntry::new("def", 456)));
    assert!(!entries.contains(&ImmutableEntry::new("abc", 456)));
}

#[test]
fn snapshots_of_big_map() {
    let map = big_test_map();

    let keys = map.key_set();
    let entries = map.entry_set();
    let mut values = map.value_list().into_iter().collect::<Vec<_>>();
    values.sort_unstable();

    assert_eq!(keys.len(), 3);
    assert!(keys.contains(&"def"));
    assert!(entries.contains(&ImmutableEntry::new("xyz", 123)));
    assert_eq!(values, [123, 155, 456]);
    assert_eq!(entries, small_test_map().entry_set());
}

#[test]
fn immutable_entry_rejects_set_value() {
    let mut entry = ImmutableEntry::new("abc", 123);

    assert_eq!(
        entry.set_value(1),
        Err(Error::Unsupported {
            operation: "set_value"
        })
    );
    assert_eq!(entry.value(), &123);
    assert_eq!(entry.key(), &"abc");
    assert_eq!(entry.to_string(), "abc=123");
    assert_eq!(entry.into_inner(), ("abc", 123));
}

#[test]
fn immutable_entries_compare_key_and_value() {
    let entry = ImmutableEntry::from(("abc", 123));

    assert_eq!(entry, ImmutableEntry::new("abc", 123));
    assert_ne!(entry, ImmutableEntry::new("abc", 124));
    assert_ne!(entry, ImmutableEntry::new("abd", 123));
    assert_eq!(std_hash(&entry), std_hash(&ImmutableEntry::new("abc", 123)));
}
