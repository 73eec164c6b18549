// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! An arena for interned strings.
//!
//! A [`StringPool`] stores many short strings back-to-back in one contiguous
//! growable buffer, deduplicating identical contents. Interning a string
//! returns a [`StringId`], a 32-bit handle that stands in for a heap pointer
//! and stays valid while the pool is alive, even across buffer reallocation.
//! This is aimed at code that stores and compares thousands of repeated
//! identifiers, such as symbol tables and serializers.
//!
//! The pool is single-threaded and append-only: individual strings cannot be
//! removed. Once no more strings will be interned, the pool can be converted
//! into a [`StringPoolView`], which drops the lookup structures and keeps
//! only the bytes.
//!
//! Strings are opaque byte sequences with one restriction: the zero byte is
//! reserved as the in-arena terminator and cannot appear in stored content.
//! All growth paths report allocation failure as an error instead of
//! aborting.
//!
//! # Example
//!
//! ```
//! use datadog_string_pool::StringPool;
//!
//! let mut pool = StringPool::new();
//! let id = pool.intern(b"wall-time")?;
//! assert_eq!(id, pool.intern(b"wall-time")?);
//! assert_eq!(b"wall-time".as_slice(), pool.get(id));
//! # Ok::<(), datadog_string_pool::PoolError>(())
//! ```

mod error;
mod pool;
mod string_id;
mod terminated;
mod view;

pub use error::*;
pub use pool::*;
pub use string_id::*;
pub use terminated::Strings;
pub use view::*;

pub(crate) type PoolHasher = core::hash::BuildHasherDefault<rustc_hash::FxHasher>;
