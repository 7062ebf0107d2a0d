//! Facade crate for Dubbox auto-configuration.
//! Re-exports the domain, kernel and RPC crates and hosts the wiring engine.
//! Keep this crate thin: component behavior lives in `dbx-rpc`, binding in `dbx-kernel`.
//!
//! ## Usage
//! - Load properties with [`kernel::config::PropertiesLoader`].
//! - Call [`wire`] with the host's [`kernel::registry::ComponentRegistry`].

pub use dbx_domain as domain;
pub use dbx_kernel as kernel;
pub use dbx_rpc as rpc;

pub mod autoconfigure;

pub use autoconfigure::{
    AutoConfiguration, Outcome, SkipReason, WiringEntry, WiringError, WiringErrorExt, WiringReport,
};

use dbx_domain::config::DubboxProperties;
use dbx_kernel::registry::ComponentRegistry;

/// Wires every configured component into `registry`.
///
/// # Errors
/// Returns an error if any component fails to construct; nothing is registered then.
pub fn wire<R>(properties: &DubboxProperties, registry: &mut R) -> Result<WiringReport, WiringError>
where
    R: ComponentRegistry + ?Sized,
{
    AutoConfiguration::new(properties).wire(registry)
}
