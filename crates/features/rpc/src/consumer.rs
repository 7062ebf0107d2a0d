use dbx_kernel::domain::config::ConsumerSection;

/// Defaults for service references.
#[dbx_derive::dbx_component(role = Consumer)]
pub struct Consumer {
    pub settings: ConsumerSection,
}

impl Consumer {
    #[must_use]
    pub fn from_section(section: &ConsumerSection) -> Self {
        Self::new(ConsumerInner { settings: section.clone() })
    }

    /// Fail startup when no provider is available. Defaults to `true`.
    #[must_use]
    pub fn check(&self) -> bool {
        self.settings.check.unwrap_or(true)
    }

    #[must_use]
    pub fn is_default(&self) -> Option<bool> {
        self.settings.is_default
    }
}
