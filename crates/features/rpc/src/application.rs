use crate::error::{ComponentError, require};
use dbx_kernel::domain::config::ApplicationSection;

/// Application identity reported to registries and monitors.
#[dbx_derive::dbx_component(role = Application)]
pub struct Application {
    pub name: String,
    pub settings: ApplicationSection,
}

impl Application {
    /// # Errors
    /// Returns [`ComponentError::MissingField`] if `name` is unset or empty.
    pub fn from_section(section: &ApplicationSection) -> Result<Self, ComponentError> {
        let name = require::<ApplicationSection>(section.name.as_deref(), "name")?;
        Ok(Self::new(ApplicationInner { name: name.to_owned(), settings: section.clone() }))
    }

    /// Value of the `isDefault` key; `None` leaves the choice to the runtime.
    #[must_use]
    pub fn is_default(&self) -> Option<bool> {
        self.settings.is_default
    }
}
