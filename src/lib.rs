//! # 🗂️ `adaptive-map`
//!
//! A key-value map for the very common case of maps that only ever hold a handful of entries (per-object
//! attribute bags, small lookup tables built once per request, ...), which still behaves well when one of them
//! turns out to hold a lot more.
//!
//! # Provided types
//!
//! - [`AdaptiveMap`], which keeps up to `capacity` entries (5 by default) in two parallel inline arrays and
//!   searches them linearly. The first insertion of a new key that does not fit moves every entry into a
//!   general-purpose map created by a [`MapFactory`], and from then on all operations are forwarded to it.
//!   Both storage strategies are observably the same map: length, lookups, equality, and hashing do not change
//!   across migration.
//! - [`MapFactory`], which decides what the map migrates into. [`DefaultMapFactory`] creates a [`HashMap`]
//!   with a [`foldhash`] hasher; [`OrderedMapFactory`], [`SortedMapFactory`] and [`PrimitiveMapFactory`]
//!   create an ordered, sorted, or primitive-key-hashed map instead, and any `Fn(usize) -> M` closure works too.
//! - [`MapView`] and [`AssociativeMap`], the read-only and read-write map capabilities that delegates provide
//!   and that [`AdaptiveMap::eq_map`] compares against.
//! - [`ImmutableEntry`] and the [`snapshot`] types, detached read-only copies of a map's contents.
//!
//! # Absent keys and values
//!
//! Types implementing [`AbsenceMarker`] can mark one of their values as *absent* (`None`, a null pointer).
//! [`AdaptiveMap`] never stores such a value, and every operation that takes a key or a value rejects one with
//! [`Error::InvalidArgument`] before changing anything.
//!
//! # Usage table
//!
//! Number of elements | Choose
//! ---|---
//! Almost always a few, occasionally many | [`AdaptiveMap`]
//! Always many | the delegate map directly
//!
//! # `serde_as_seq`
//!
//! When the `serde` feature is enabled, there is an adapter usable with `#[serde(with = "path::to::module")]` at
//! `adaptive_map::adaptive_map::serde_as_seq` which will serialize and deserialize the map as a sequence of `(k, v)`
//! pair elements rather than as a native serde Map. This is useful with JSON because JSON maps can only have string
//! keys, and if you try to serialize a map to JSON which has a key type that can't be serialized as a string, the
//! serde JSON impl will simply panic at runtime. Using `serde_as_seq` will circumvent this issue and allow you to
//! serialize a wider range of key types.
//!
//! # Feature flags
//!
//! `adaptive-map` uses a set of [feature flags] to optionally reduce the number of dependencies.
//!
//! The following optional features are available:
//!
//! Name | Description | Default?
//! ---|---|---
//! `speedy` | Enables [`speedy`] support for [`AdaptiveMap`] | No
//! `serde` | Enables [`serde`] support for [`AdaptiveMap`] | No
//!
//! [`HashMap`]: std::collections::HashMap
//! [`speedy`]: https://crates.io/crates/speedy
//! [`serde`]: https://crates.io/crates/serde
//! [feature flags]: https://doc.rust-lang.org/cargo/reference/features.html

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

use core::hash::Hash;

#[macro_use]
mod internal_macros;

/// The default hasher used by hash-based maps and snapshots in this crate.
pub type BuildHasher = foldhash::fast::RandomState;

/// Marks the one value of a type that can never be stored in an [`AdaptiveMap`].
pub mod absence;
#[doc(inline)]
pub use absence::AbsenceMarker;

/// The map capabilities that [`AdaptiveMap`] forwards to and compares against.
pub mod associative_map;
#[doc(inline)]
pub use associative_map::AssociativeMap;
#[doc(inline)]
pub use associative_map::MapView;

/// Strategies for creating the map an [`AdaptiveMap`] migrates into.
pub mod factory;
#[doc(inline)]
pub use factory::BuildPrimitiveHasher;
#[doc(inline)]
pub use factory::DefaultMapFactory;
#[doc(inline)]
pub use factory::MapFactory;
#[doc(inline)]
pub use factory::OrderedMapFactory;
#[doc(inline)]
pub use factory::PrimitiveMapFactory;
#[doc(inline)]
pub use factory::SortedMapFactory;

/// A map that scans two small inline arrays until it outgrows them, then delegates to a general-purpose map.
pub mod adaptive_map;
#[doc(inline)]
pub use adaptive_map::AdaptiveMap;
#[doc(inline)]
pub use adaptive_map::DEFAULT_CAPACITY;
#[doc(inline)]
pub use adaptive_map::Mode;

/// The read-only `(key, value)` pair handed out by [`AdaptiveMap::entry_set`].
pub mod entry;
#[doc(inline)]
pub use entry::ImmutableEntry;

pub mod snapshot;

mod error;
pub use error::ArgumentRole;
pub use error::Error;


const STATIC_RANDOM_SEED: u64 = 0x86c11a44c63f4f2f;

#[inline(always)]
pub fn hash_one_fixed<H: Hash>(one: H) -> u64 {
    use core::hash::Hasher;
    let mut hasher = foldhash::fast::FoldHasher::with_seed(
        STATIC_RANDOM_SEED,
        foldhash::SharedSeed::global_fixed(),
    );
    one.hash(&mut hasher);
    hasher.finish()
}

#[cold]
#[inline(never)]
fn panic_rejected_argument(error: Error) -> ! {
    panic!("Failed to insert to map: {error}");
}
