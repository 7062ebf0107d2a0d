//! RPC framework components.
//!
//! Each component is an immutable, `Arc`-backed handle built from one validated
//! configuration section. Clones share identity, which is how a [`Provider`] holds
//! "the" [`Protocol`] rather than a copy of it.
//!
//! Every non-null value of a section is carried over unchanged in the component's
//! `settings`; unset values stay unset and the component accessors report their own
//! defaults.
//!
//! ```rust
//! use dbx_kernel::domain::config::{ProtocolSection, ProviderSection};
//! use dbx_rpc::{Protocol, Provider};
//!
//! let protocol = Protocol::from_section(&ProtocolSection {
//!     name: Some("dubbox".to_owned()),
//!     port: Some(20880),
//!     ..ProtocolSection::default()
//! })
//! .unwrap();
//!
//! let provider = Provider::from_section(&ProviderSection::default(), &protocol);
//! assert!(provider.protocol.ptr_eq(&protocol));
//! assert_eq!(provider.protocol.settings.port, Some(20880));
//! ```
mod annotation;
mod application;
mod consumer;
mod error;
mod module;
mod protocol;
mod provider;
mod registry;

pub use annotation::{AnnotationScanner, AnnotationScannerInner};
pub use application::{Application, ApplicationInner};
pub use consumer::{Consumer, ConsumerInner};
pub use error::{ComponentError, ComponentErrorExt};
pub use module::{Module, ModuleInner};
pub use protocol::{Protocol, ProtocolInner};
pub use provider::{Provider, ProviderInner};
pub use registry::{Registry, RegistryInner};
