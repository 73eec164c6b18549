// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

/// Represents errors that occur in the string pool API.
///
/// The pool returns errors on allocation failures. This means the error type
/// needs to avoid allocating, or else it's possible to hit an allocation
/// error that can't be reported, because the error also cannot allocate.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum PoolError {
    /// The input contains the reserved terminator byte, so it can never be
    /// stored in the arena.
    #[error("string contains the reserved terminator byte")]
    ReservedByte,
    /// Failed to allocate memory needed for the operation. The pool is left
    /// exactly as it was before the failing call.
    #[error("out of memory")]
    OutOfMemory,
}

impl From<allocator_api2::collections::TryReserveError> for PoolError {
    #[cold]
    fn from(_: allocator_api2::collections::TryReserveError) -> Self {
        // Capacity overflow of the arena is unreachable behind the pool's
        // 32-bit handle-space check, so both kinds collapse to one variant.
        Self::OutOfMemory
    }
}

impl From<hashbrown::TryReserveError> for PoolError {
    #[cold]
    fn from(_: hashbrown::TryReserveError) -> Self {
        Self::OutOfMemory
    }
}
