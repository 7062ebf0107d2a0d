use crate::error::{ComponentError, require};
use dbx_kernel::domain::config::ModuleSection;

/// Module identity within an application.
#[dbx_derive::dbx_component(role = Module)]
pub struct Module {
    pub name: String,
    pub settings: ModuleSection,
}

impl Module {
    /// # Errors
    /// Returns [`ComponentError::MissingField`] if `name` is unset or empty.
    pub fn from_section(section: &ModuleSection) -> Result<Self, ComponentError> {
        let name = require::<ModuleSection>(section.name.as_deref(), "name")?;
        Ok(Self::new(ModuleInner { name: name.to_owned(), settings: section.clone() }))
    }

    #[must_use]
    pub fn is_default(&self) -> Option<bool> {
        self.settings.is_default
    }
}
