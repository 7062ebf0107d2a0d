use crate::error::{ComponentError, require};
use dbx_kernel::domain::config::RegistrySection;

/// Connection settings for one service registry.
#[dbx_derive::dbx_component(role = Registry)]
pub struct Registry {
    /// Registry location as configured. Only presence is validated.
    pub address: String,
    pub settings: RegistrySection,
}

impl Registry {
    /// # Errors
    /// Returns [`ComponentError::MissingField`] if `address` is unset or empty.
    pub fn from_section(section: &RegistrySection) -> Result<Self, ComponentError> {
        let address = require::<RegistrySection>(section.address.as_deref(), "address")?;
        Ok(Self::new(RegistryInner { address: address.to_owned(), settings: section.clone() }))
    }

    /// Fail startup when the registry is unreachable. Defaults to `true`.
    #[must_use]
    pub fn check(&self) -> bool {
        self.settings.check.unwrap_or(true)
    }

    /// Register exported services. Defaults to `true`.
    #[must_use]
    pub fn register(&self) -> bool {
        self.settings.register.unwrap_or(true)
    }

    /// Subscribe to provider changes. Defaults to `true`.
    #[must_use]
    pub fn subscribe(&self) -> bool {
        self.settings.subscribe.unwrap_or(true)
    }

    /// Register services as dynamic entries. Defaults to `true`.
    #[must_use]
    pub fn dynamic(&self) -> bool {
        self.settings.dynamic.unwrap_or(true)
    }

    #[must_use]
    pub fn is_default(&self) -> Option<bool> {
        self.settings.is_default
    }
}
