//! Hash containers used across the crate.
//!
//! All maps use *hashbrown* with a fixed-seed *foldhash* state, so iteration
//! order only depends on the inserted keys and never on process randomness.

use core::hash::BuildHasher;

use foldhash::fast::{FixedState, FoldHasher};

/// A fixed hash seed.
const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x2C5B_7D3A_91E4_06F1);

/// Hash state with a fixed seed, see [`foldhash::fast::FixedState`].
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FoldHasher<'static>;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

/// A [`hashbrown::HashMap`] using [`FixedHashState`].
pub type HashMap<K, V> = hashbrown::HashMap<K, V, FixedHashState>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`].
pub type HashSet<K> = hashbrown::HashSet<K, FixedHashState>;
