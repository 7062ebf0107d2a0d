use crate::error::{ComponentError, require};
use dbx_kernel::domain::config::ProtocolSection;

/// Wire protocol a provider exports services with.
#[dbx_derive::dbx_component(role = Protocol)]
pub struct Protocol {
    pub name: String,
    pub settings: ProtocolSection,
}

impl Protocol {
    /// # Errors
    /// Returns [`ComponentError::MissingField`] if `name` is unset or empty.
    pub fn from_section(section: &ProtocolSection) -> Result<Self, ComponentError> {
        let name = require::<ProtocolSection>(section.name.as_deref(), "name")?;
        Ok(Self::new(ProtocolInner { name: name.to_owned(), settings: section.clone() }))
    }

    /// Publish services exported over this protocol. Defaults to `true`.
    #[must_use]
    pub fn register(&self) -> bool {
        self.settings.register.unwrap_or(true)
    }

    #[must_use]
    pub fn is_default(&self) -> Option<bool> {
        self.settings.is_default
    }
}
