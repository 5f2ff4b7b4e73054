use std::collections::HashMap;

use crate::AdaptiveMap;
use crate::Mode;

#[test]
fn bincode_round_trip() {
    let mut map = AdaptiveMap::with_capacity(2);
    map.put("abc".to_owned(), 1u32).unwrap();
    map.put("def".to_owned(), 2).unwrap();

    let bytes = bincode::serialize(&map).unwrap();
    let read: AdaptiveMap<String, u32> = bincode::deserialize(&bytes).unwrap();

    assert_eq!(read, map);
    assert_eq!(read.mode(), Mode::Small);
}

#[test]
fn deserialized_map_migrates_past_default_capacity() {
    let entries = (0..10u32).map(|i| (i, i * 3)).collect::<HashMap<_, _>>();

    let bytes = bincode::serialize(&entries).unwrap();
    let read: AdaptiveMap<u32, u32> = bincode::deserialize(&bytes).unwrap();

    assert_eq!(read.mode(), Mode::Big);
    assert_eq!(read, entries);
}

#[test]
fn deserialize_rejects_absent_value() {
    let mut entries = HashMap::new();
    entries.insert("abc".to_owned(), Some(1u32));
    entries.insert("def".to_owned(), None);

    let bytes = bincode::serialize(&entries).unwrap();
    let error = bincode::deserialize::<AdaptiveMap<String, Option<u32>>>(&bytes).unwrap_err();

    assert!(error.to_string().contains("absent values"));
}

#[derive(::serde::Serialize, ::serde::Deserialize)]
struct Wrapper {
    #[serde(with = "crate::adaptive_map::serde_as_seq")]
    map: AdaptiveMap<u64, String>,
}

#[test]
fn serde_as_seq_round_trip() {
    let mut map = AdaptiveMap::new();
    map.put(7u64, "seven".to_owned()).unwrap();
    map.put(3, "three".to_owned()).unwrap();
    let wrapper = Wrapper { map };

    let bytes = bincode::serialize(&wrapper).unwrap();
    let as_pairs: Vec<(u64, String)> = bincode::deserialize(&bytes).unwrap();
    assert_eq!(
        as_pairs,
        [(7, "seven".to_owned()), (3, "three".to_owned())]
    );

    let read: Wrapper = bincode::deserialize(&bytes).unwrap();
    assert_eq!(read.map, wrapper.map);
}
