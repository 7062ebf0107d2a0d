use crate::protocol::Protocol;
use dbx_kernel::domain::config::ProviderSection;

/// Defaults for exported services, bound to the protocol they are exported with.
#[dbx_derive::dbx_component(role = Provider)]
pub struct Provider {
    pub protocol: Protocol,
    pub settings: ProviderSection,
}

impl Provider {
    /// Builds the provider around a shared handle to `protocol`.
    #[must_use]
    pub fn from_section(section: &ProviderSection, protocol: &Protocol) -> Self {
        Self::new(ProviderInner { protocol: protocol.clone(), settings: section.clone() })
    }

    /// Export services at all. Defaults to `true`.
    #[must_use]
    pub fn export(&self) -> bool {
        self.settings.export.unwrap_or(true)
    }

    /// Register exported services with the registry. Defaults to `true`.
    #[must_use]
    pub fn register(&self) -> bool {
        self.settings.register.unwrap_or(true)
    }
}
