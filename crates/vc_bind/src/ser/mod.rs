//! Codec resolution.
//!
//! [`CodecFactory::create_codec`] decides, for one type, which codec writes
//! it. The first step that produces a codec wins:
//!
//! 1. an explicit codec declared on the type;
//! 2. type refinement (may force static typing);
//! 3. a declared [`Converter`], wrapped in a [`DelegatingCodec`];
//! 4. the container, reference, provider and annotation builders;
//! 5. the known-type and primary-type lookups;
//! 6. bean construction, then the [`UnknownCodec`] fallback.
//!
//! Registered [`BeanCodecModifier`]s post-process the result.
//!
//! ## Menu
//!
//! - [`ResolveContext`]: configuration and collaborators of one resolution.
//! - [`StandardCodecs`]: builders for non-bean types, consumed as black boxes.
//! - [`CodecProvider`]: externally registered codec sources.
//! - [`BeanCodecModifier`]: hooks rewriting each stage of bean construction.
//! - [`CodecFactory`]: the dispatcher.
//!
//! [`Converter`]: crate::codec::Converter
//! [`DelegatingCodec`]: crate::codec::DelegatingCodec
//! [`UnknownCodec`]: crate::codec::UnknownCodec

// -----------------------------------------------------------------------------
// Modules

mod context;
mod factory;
mod identity;
mod modifier;
mod properties;
mod views;

// -----------------------------------------------------------------------------
// Exports

pub use context::{CodecProvider, ResolveContext, StandardCodecs};
pub use factory::CodecFactory;
pub use modifier::BeanCodecModifier;
