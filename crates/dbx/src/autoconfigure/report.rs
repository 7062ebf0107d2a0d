use dbx_kernel::domain::registry::ComponentRole;
use serde::Serialize;

/// Why a role was left alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The host registered its own component for the role.
    AlreadyRegistered,
    /// The section that triggers the component was not supplied.
    NotConfigured,
    /// A component the role depends on is absent.
    MissingDependency(ComponentRole),
}

/// Result of evaluating one role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Constructed and registered; `key` is the identifying value (name, address, package).
    Registered { key: Option<String> },
    Skipped { reason: SkipReason },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WiringEntry {
    pub role: ComponentRole,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Per-role outcomes of a wiring run, in evaluation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WiringReport {
    entries: Vec<WiringEntry>,
}

impl WiringReport {
    pub(crate) fn push(&mut self, role: ComponentRole, outcome: Outcome) {
        self.entries.push(WiringEntry { role, outcome });
    }

    #[must_use]
    pub fn entries(&self) -> &[WiringEntry] {
        &self.entries
    }

    #[must_use]
    pub fn outcome(&self, role: ComponentRole) -> Option<&Outcome> {
        self.entries.iter().find(|entry| entry.role == role).map(|entry| &entry.outcome)
    }

    /// Roles registered by this run.
    pub fn registered(&self) -> impl Iterator<Item = ComponentRole> + '_ {
        self.entries
            .iter()
            .filter(|entry| matches!(entry.outcome, Outcome::Registered { .. }))
            .map(|entry| entry.role)
    }

    #[must_use]
    pub fn is_registered(&self, role: ComponentRole) -> bool {
        matches!(self.outcome(role), Some(Outcome::Registered { .. }))
    }
}

impl FromIterator<(ComponentRole, Outcome)> for WiringReport {
    fn from_iter<I: IntoIterator<Item = (ComponentRole, Outcome)>>(iter: I) -> Self {
        Self { entries: iter.into_iter().map(|(role, outcome)| WiringEntry { role, outcome }).collect() }
    }
}
