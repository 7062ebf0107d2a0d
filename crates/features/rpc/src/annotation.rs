use dbx_kernel::domain::config::AnnotationSection;

/// Annotation scanner restricted to a set of packages.
#[dbx_derive::dbx_component(role = AnnotationScanner)]
pub struct AnnotationScanner {
    /// Raw comma-separated package list; empty when not configured.
    pub package: String,
}

impl AnnotationScanner {
    /// Builds the scanner; an unset package means "scan everything".
    #[must_use]
    pub fn from_section(section: &AnnotationSection) -> Self {
        Self::new(AnnotationScannerInner { package: section.package.clone().unwrap_or_default() })
    }

    /// Trimmed, non-empty package entries.
    pub fn packages(&self) -> impl Iterator<Item = &str> {
        self.package.split(',').map(str::trim).filter(|p| !p.is_empty())
    }

    /// Returns `true` if `path` lives in one of the configured packages.
    #[must_use]
    pub fn covers(&self, path: &str) -> bool {
        let mut packages = self.packages().peekable();
        if packages.peek().is_none() {
            return true;
        }
        packages.any(|package| {
            path.strip_prefix(package)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('.') || rest.starts_with("::"))
        })
    }
}
