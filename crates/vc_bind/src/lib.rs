//! Codec resolution for data binding.
//!
//! Given a [`TypeDescriptor`](info::TypeDescriptor) and the description an
//! [`Introspector`](registry::Introspector) produces for it, this crate
//! decides how instances of the type are written: by an explicit codec, a
//! converter, a container or reference builder, an externally provided
//! codec, or property by property as a bean. The result is a [`Codec`](codec::Codec)
//! that can be cached and shared.
//!
//! Start with `Binder`, which bundles everything a resolution needs. The
//! binder, the root name lookup and the shared registry use locks and need
//! the `std` feature (on by default); the rest of the crate only needs `alloc`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;

#[cfg(any(test, feature = "std"))]
extern crate std;

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "std")]
mod binder;

pub mod cache;
pub mod codec;
pub mod config;
pub mod error;
pub mod hash;
pub mod info;
pub mod registry;
#[cfg(feature = "std")]
pub mod root_name;
pub mod ser;

#[cfg(test)]
mod testing;

// -----------------------------------------------------------------------------
// Top-Level exports

#[cfg(feature = "std")]
pub use binder::Binder;
pub use error::BindError;
