//! Kernel utilities shared by the wiring crates.
//! Keep this crate lightweight: layered configuration loading and the component registry
//! capability, nothing that constructs framework components.
//!
//! ## Config loading
//! ```rust
//! use dbx_kernel::config::PropertiesLoader;
//!
//! let props = PropertiesLoader::new()
//!     .optional_file("dubbox")
//!     .without_env()
//!     .set("registry.address", "zookeeper://127.0.0.1:2181")
//!     .load()
//!     .unwrap();
//! assert_eq!(props.registry.address.as_deref(), Some("zookeeper://127.0.0.1:2181"));
//! ```
pub mod config;
pub mod registry;

pub use dbx_domain as domain;
