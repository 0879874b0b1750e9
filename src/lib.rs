//! A growable array with an explicit doubling policy, built on an
//! exclusively-owned heap buffer.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

#[doc = include_str!("../README.md")]
#[cfg(doctest)]
struct _ReadmeDoctests;

#[cfg(test)]
#[macro_use]
extern crate std;

#[cfg(feature = "alloc")]
extern crate alloc as alloc_crate;

pub mod alloc;

pub mod buffer;

pub(crate) mod error;

pub mod grow;

pub mod vec;

pub use {
    self::buffer::ArrayBuffer,
    self::error::{OutOfRange, StorageError, UpdateError},
    self::vec::{reserve, ReserveCapacity, SimpleVec},
};
