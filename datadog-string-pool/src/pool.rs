// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::terminated::{self, TERMINATOR};
use crate::{PoolError, PoolHasher as Hasher, StringId, StringPoolView, Strings};
use allocator_api2::alloc::{Allocator, Global};
use allocator_api2::vec::Vec;
use core::hint::unreachable_unchecked;
use hashbrown::HashTable;
use std::fmt;
use std::hash::BuildHasher;

/// The arena may hold at most this many bytes, terminators included, so
/// that the offset of every stored string fits strictly within a `u32`.
pub const MAX_ARENA_BYTES: usize = u32::MAX as usize;

/// Holds unique strings and provides [`StringId`]s that stand in for them.
///
/// The pool is two halves that grow together: the arena, one contiguous
/// buffer holding every interned string followed by a terminator byte, and
/// the index, a hash set of handles. The index stores no string bytes of
/// its own; hashing and equality re-read the arena through each handle, so
/// every probe is built around the arena's current contents.
pub struct StringPool<A: Allocator = Global> {
    /// All interned strings back-to-back, each followed by one terminator
    /// byte. Handles are offsets into this buffer; the buffer may move when
    /// it grows, the offsets never do.
    arena: Vec<u8, A>,

    /// The handles of every stored string. Rehashing on table growth
    /// re-reads the arena, which is why every reserve of this table takes a
    /// closure over the arena as it is at that moment.
    index: HashTable<StringId, A>,
}

impl StringPool {
    /// Creates an empty pool backed by the global allocator.
    pub fn new() -> Self {
        Self::new_in(Global)
    }

    /// Creates an empty pool with room for `strings` entries and `bytes`
    /// bytes of string storage, terminators included.
    ///
    /// # Errors
    /// Returns [`PoolError::OutOfMemory`] if either half cannot be
    /// allocated; nothing is leaked in that case.
    pub fn try_with_capacity(strings: usize, bytes: usize) -> Result<Self, PoolError> {
        Self::try_with_capacity_in(strings, bytes, Global)
    }
}

impl Default for StringPool {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: Allocator + Clone> StringPool<A> {
    /// Creates an empty pool that allocates both halves from `alloc`.
    pub fn new_in(alloc: A) -> Self {
        Self {
            arena: Vec::new_in(alloc.clone()),
            index: HashTable::new_in(alloc),
        }
    }

    /// Like [`StringPool::try_with_capacity`], but allocating from `alloc`.
    ///
    /// # Errors
    /// Returns [`PoolError::OutOfMemory`] if either half cannot be
    /// allocated.
    pub fn try_with_capacity_in(strings: usize, bytes: usize, alloc: A) -> Result<Self, PoolError> {
        let mut pool = Self::new_in(alloc);
        pool.arena.try_reserve(bytes)?;
        // SAFETY: the table is empty, so reserving cannot rehash anything
        // and the hash closure cannot be called.
        pool.index
            .try_reserve(strings, |_| unsafe { unreachable_unchecked() })?;
        Ok(pool)
    }
}

impl<A: Allocator> StringPool<A> {
    /// Returns the number of strings currently held in the pool.
    #[inline]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true if no string has been interned yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Returns the number of entries the index can hold without growing.
    pub fn capacity(&self) -> usize {
        self.index.capacity()
    }

    /// Returns the bytes of string storage in use, terminators included.
    pub fn size_in_bytes(&self) -> usize {
        self.arena.len()
    }

    /// Reserves room for one more string of up to `len` bytes without
    /// writing it. After a successful reserve, interning any string of
    /// length `len` or less cannot fail for allocation reasons.
    ///
    /// Growing the index here rebuilds its layout with hashes read from the
    /// arena's current contents.
    ///
    /// # Errors
    /// Returns [`PoolError::OutOfMemory`] if either half fails to grow. The
    /// pool's logical contents are untouched on failure; no partial growth
    /// is observable.
    ///
    /// # Panics
    /// Panics if the arena would exceed [`MAX_ARENA_BYTES`]. That limit is
    /// a programming error rather than a recoverable condition: any handle
    /// handed out past it would be ambiguous.
    pub fn try_reserve(&mut self, len: usize) -> Result<(), PoolError> {
        let new_len = self
            .arena
            .len()
            .checked_add(len)
            .and_then(|n| n.checked_add(1));
        assert!(
            matches!(new_len, Some(n) if n <= MAX_ARENA_BYTES),
            "string pool exceeded the 32-bit handle space"
        );
        self.arena.try_reserve(len + 1)?;
        let arena = &self.arena;
        self.index
            .try_reserve(1, |&id| Hasher::default().hash_one(terminated::resolve(arena, id)))?;
        Ok(())
    }

    /// Adds the string to the pool if it isn't present already, and returns
    /// the handle of its single stored copy.
    ///
    /// A string that is a strict prefix of a stored string is not a match;
    /// equality requires identical length and content.
    ///
    /// # Errors
    /// Returns [`PoolError::ReservedByte`] if `bytes` contains the
    /// terminator byte, and [`PoolError::OutOfMemory`] if growing either
    /// half fails. Failure happens entirely inside the reservation step,
    /// before any byte is written or any handle is inserted, so the pool is
    /// byte-for-byte identical to its pre-call state afterwards.
    ///
    /// # Panics
    /// Panics if the arena would exceed [`MAX_ARENA_BYTES`]; see
    /// [`StringPool::try_reserve`].
    pub fn intern(&mut self, bytes: &[u8]) -> Result<StringId, PoolError> {
        if bytes.contains(&TERMINATOR) {
            return Err(PoolError::ReservedByte);
        }
        let hash = Hasher::default().hash_one(bytes);
        if let Some(id) = self.find_with_hash(hash, bytes) {
            return Ok(id);
        }

        // All allocation happens in the reserve; past this point neither
        // half can fail, so they cannot go out of sync.
        self.try_reserve(bytes.len())?;

        let id = StringId::from_offset(self.arena.len());
        self.arena.extend_from_slice(bytes);
        self.arena.push(TERMINATOR);
        // The new entry hashes to `hash`: the bytes now stored at `id` are
        // exactly the input slice.
        // SAFETY: the try_reserve above already performed any re-layout of
        // the table, so the rehash closure cannot be called.
        self.index
            .insert_unique(hash, id, |_| unsafe { unreachable_unchecked() });
        Ok(id)
    }

    /// Returns the handle for `bytes` if the string is already interned,
    /// without inserting. Never allocates.
    pub fn find(&self, bytes: &[u8]) -> Option<StringId> {
        let hash = Hasher::default().hash_one(bytes);
        self.find_with_hash(hash, bytes)
    }

    /// Returns true if `bytes` is already interned. Input containing the
    /// terminator byte can never be stored, so it reports false.
    pub fn contains(&self, bytes: &[u8]) -> bool {
        self.find(bytes).is_some()
    }

    /// The hash must have been computed by this pool's hasher over `bytes`;
    /// a mismatched hash reports a miss for a present string.
    fn find_with_hash(&self, hash: u64, bytes: &[u8]) -> Option<StringId> {
        let arena = &self.arena;
        let found = self
            .index
            .find(hash, |&id| terminated::resolve(arena, id) == bytes)?;
        Some(*found)
    }

    /// Returns the bytes of the string `id` names, excluding the
    /// terminator. The slice is valid until the next mutating call, since
    /// growth may relocate the arena.
    ///
    /// The handle must have come from this pool. Foreign or stale handles
    /// are not validated, by design: the handle stays four bytes with no
    /// generation counter. Passing one yields an unspecified slice or an
    /// index panic, never undefined behavior.
    #[inline]
    pub fn get(&self, id: StringId) -> &[u8] {
        terminated::resolve(&self.arena, id)
    }

    /// Returns an iterator over the stored strings in insertion order.
    pub fn iter(&self) -> Strings<'_> {
        Strings::new(&self.arena)
    }

    /// Converts the pool into a read-only view of its strings, keyed by the
    /// handles produced before the conversion. The index is dropped and the
    /// arena is shrunk to fit; no further interning is possible.
    pub fn into_view(self) -> StringPoolView<A> {
        let Self { arena, index: _ } = self;
        StringPoolView::new(arena)
    }
}

impl<A: Allocator> fmt::Debug for StringPool<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringPool")
            .field("strings", &self.len())
            .field("bytes", &self.size_in_bytes())
            .finish()
    }
}
