// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::{terminated, StringId, Strings};
use allocator_api2::alloc::{Allocator, Global};
use allocator_api2::vec::Vec;
use std::fmt;

/// A read-only view over the strings of a detached [`crate::StringPool`].
///
/// The view owns the arena buffer outright; the pool's index is gone by the
/// time one exists. Since the buffer never grows again, resolved slices stay
/// valid for as long as the view itself, with no next-mutation caveat.
pub struct StringPoolView<A: Allocator = Global> {
    /// The frozen arena, shrunk to fit on detachment.
    bytes: Vec<u8, A>,
}

impl<A: Allocator> StringPoolView<A> {
    pub(crate) fn new(mut arena: Vec<u8, A>) -> Self {
        arena.shrink_to_fit();
        Self { bytes: arena }
    }

    /// Returns the bytes of the string `id` names, excluding the
    /// terminator. The handle must have been produced by the pool this view
    /// was detached from; see [`crate::StringPool::get`].
    #[inline]
    pub fn get(&self, id: StringId) -> &[u8] {
        terminated::resolve(&self.bytes, id)
    }

    /// Returns an iterator over the stored strings in insertion order.
    pub fn iter(&self) -> Strings<'_> {
        Strings::new(&self.bytes)
    }

    /// Returns the bytes of string storage held, terminators included.
    pub fn size_in_bytes(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the pool held no strings when it was detached.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl<A: Allocator> fmt::Debug for StringPoolView<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringPoolView")
            .field("bytes", &self.size_in_bytes())
            .finish()
    }
}
