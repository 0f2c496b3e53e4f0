//! Interned names.
//!
//! Every identifier, field name and string literal in a Velox program is
//! stored once in the [`StringInterner`](crate::StringInterner) and referred
//! to by a [`Name`]. Comparing two names is a `u32` compare, which is what
//! scope lookups and object field tables key on.

use std::fmt;

const SHARD_BITS: u32 = 4;
const LOCAL_BITS: u32 = 32 - SHARD_BITS;

/// Handle to an interned string.
///
/// The top four bits select the interner shard, the rest index into it.
/// A `Name` is only meaningful together with the interner that produced it;
/// programs and contexts sharing names must share that interner.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct Name(u32);

impl Name {
    /// The empty string. Every interner reserves slot 0 of shard 0 for it,
    /// and `intern("")` returns this without touching a lock.
    pub const EMPTY: Name = Name(0);

    pub const MAX_LOCAL: u32 = (1 << LOCAL_BITS) - 1;

    pub const NUM_SHARDS: usize = 1 << SHARD_BITS;

    #[inline]
    pub const fn new(shard: u32, local: u32) -> Self {
        debug_assert!((shard as usize) < Self::NUM_SHARDS);
        debug_assert!(local <= Self::MAX_LOCAL);
        Name((shard << LOCAL_BITS) | local)
    }

    #[inline]
    pub const fn shard(self) -> usize {
        (self.0 >> LOCAL_BITS) as usize
    }

    #[inline]
    pub const fn local(self) -> usize {
        (self.0 & Self::MAX_LOCAL) as usize
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::EMPTY {
            return f.write_str("Name(<empty>)");
        }
        write!(f, "Name({}:{})", self.shard(), self.local())
    }
}

impl Default for Name {
    fn default() -> Self {
        Self::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::Name;

    #[test]
    fn shard_and_local_survive_packing() {
        let last = Name::new(15, Name::MAX_LOCAL);
        assert_eq!(last.shard(), 15);
        assert_eq!(last.local(), Name::MAX_LOCAL as usize);

        let name = Name::new(3, 42);
        assert_eq!((name.shard(), name.local()), (3, 42));
    }

    #[test]
    fn empty_is_the_default_and_sits_in_shard_zero() {
        assert_eq!(Name::default(), Name::EMPTY);
        assert_eq!(Name::new(0, 0), Name::EMPTY);
        assert_ne!(Name::new(1, 0), Name::EMPTY);
    }

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", Name::EMPTY), "Name(<empty>)");
        assert_eq!(format!("{:?}", Name::new(2, 7)), "Name(2:7)");
    }
}
