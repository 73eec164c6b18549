// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// A handle to one interned string.
///
/// The raw value is the byte offset of the string within the arena of the
/// pool that produced it. Handles from the same pool are equal if and only
/// if they name byte-identical strings, because the pool never stores equal
/// content twice. A handle carries no lifetime and is meaningless without
/// its pool; see [`crate::StringPool::get`] for the provenance contract.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct StringId(u32);

impl StringId {
    /// Creates a handle from a byte offset into the arena.
    ///
    /// # Panics
    /// Panics if the offset cannot be represented in 32 bits. The pool
    /// checks its size before growing, so this is a backstop.
    #[allow(clippy::expect_used)]
    pub(crate) fn from_offset(offset: usize) -> Self {
        Self(
            offset
                .try_into()
                .expect("string pool offset exceeded the 32-bit handle space"),
        )
    }

    #[inline]
    pub(crate) fn to_offset(self) -> usize {
        self.0 as usize
    }
}
