#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_bind as bind;

pub use vc_bind::BindError;

#[cfg(feature = "std")]
pub use vc_bind::Binder;
