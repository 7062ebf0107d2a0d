//! Construct-if-absent wiring of RPC components.
//!
//! Roles are evaluated in [`ComponentRole`] declaration order. For each role the
//! engine skips it when the host already registered one, checks the role's trigger,
//! and otherwise builds the component from its section. Built components are staged
//! and only handed to the registry once every construction succeeded.
//!
//! | Role | Attempted when |
//! |------|----------------|
//! | `AnnotationScanner` | always |
//! | `Application`, `Module`, `Protocol` | `name` is supplied |
//! | `Registry`, `Consumer` | always |
//! | `Provider` | a `Protocol` exists and the provider section is non-empty |

mod error;
mod report;

pub use error::{WiringError, WiringErrorExt};
pub use report::{Outcome, SkipReason, WiringEntry, WiringReport};

use dbx_domain::config::{DubboxProperties, Section};
use dbx_domain::registry::{Component, ComponentRole, InitializedComponent};
use dbx_kernel::registry::{ComponentRegistry, ComponentRegistryExt};
use dbx_rpc::{AnnotationScanner, Application, Consumer, Module, Protocol, Provider, Registry};
use strum::IntoEnumIterator;
use tracing::{debug, info};

/// Components built during one run, not yet registered.
#[derive(Debug, Default)]
struct Staged {
    components: Vec<InitializedComponent>,
    protocol: Option<Protocol>,
}

impl Staged {
    fn push<T>(&mut self, component: T, key: Option<String>) -> Outcome
    where
        T: Component + Into<InitializedComponent>,
    {
        self.components.push(component.into());
        Outcome::Registered { key }
    }
}

/// Wiring engine over one set of bound properties.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfiguration<'a> {
    properties: &'a DubboxProperties,
}

impl<'a> AutoConfiguration<'a> {
    #[must_use]
    pub const fn new(properties: &'a DubboxProperties) -> Self {
        Self { properties }
    }

    /// Evaluates every role and registers what was built.
    ///
    /// # Errors
    /// Returns [`WiringError::Component`] when a triggered component fails validation;
    /// the registry is left untouched. Returns [`WiringError::Registry`] if the
    /// registry refuses a staged component.
    pub fn wire<R>(&self, registry: &mut R) -> Result<WiringReport, WiringError>
    where
        R: ComponentRegistry + ?Sized,
    {
        let mut staged = Staged::default();
        let mut report = WiringReport::default();

        for role in ComponentRole::iter() {
            let outcome = if registry.contains(role) {
                debug!("'{role}' already registered, keeping it");
                Outcome::Skipped { reason: SkipReason::AlreadyRegistered }
            } else {
                self.evaluate(role, &*registry, &mut staged)?
            };
            report.push(role, outcome);
        }

        for component in staged.components {
            let role = component.role;
            registry.register(component).context(role.bean_name())?;
        }

        info!("Wired {} component(s)", report.registered().count());
        Ok(report)
    }

    fn evaluate<R>(&self, role: ComponentRole, registry: &R, staged: &mut Staged) -> Result<Outcome, WiringError>
    where
        R: ComponentRegistry + ?Sized,
    {
        let props = self.properties;

        let outcome = match role {
            ComponentRole::AnnotationScanner => {
                let scanner = AnnotationScanner::from_section(&props.annotation);
                info!("Constructing '{role}' for package: '{}'", scanner.package);
                let key = (!scanner.package.is_empty()).then(|| scanner.package.clone());
                staged.push(scanner, key)
            },
            ComponentRole::Application => {
                let Some(name) = props.application.name.as_deref() else {
                    return Ok(not_configured(role));
                };
                info!("Constructing '{role}' with name: '{name}'");
                let application = Application::from_section(&props.application).context(role.bean_name())?;
                let key = application.name.clone();
                staged.push(application, Some(key))
            },
            ComponentRole::Module => {
                let Some(name) = props.module.name.as_deref() else {
                    return Ok(not_configured(role));
                };
                info!("Constructing '{role}' with name: '{name}'");
                let module = Module::from_section(&props.module).context(role.bean_name())?;
                let key = module.name.clone();
                staged.push(module, Some(key))
            },
            ComponentRole::Registry => {
                info!(
                    "Constructing '{role}' with address: '{}'",
                    props.registry.address.as_deref().unwrap_or_default()
                );
                let registry = Registry::from_section(&props.registry).context(role.bean_name())?;
                let key = registry.address.clone();
                staged.push(registry, Some(key))
            },
            ComponentRole::Protocol => {
                let Some(name) = props.protocol.name.as_deref() else {
                    return Ok(not_configured(role));
                };
                info!("Constructing '{role}' with name: '{name}'");
                let protocol = Protocol::from_section(&props.protocol).context(role.bean_name())?;
                let key = protocol.name.clone();
                staged.protocol = Some(protocol.clone());
                staged.push(protocol, Some(key))
            },
            ComponentRole::Provider => {
                let protocol = staged.protocol.clone().or_else(|| registry.get::<Protocol>().cloned());
                let Some(protocol) = protocol else {
                    debug!("Skipping '{role}': no '{}' available", ComponentRole::Protocol);
                    return Ok(Outcome::Skipped {
                        reason: SkipReason::MissingDependency(ComponentRole::Protocol),
                    });
                };
                if props.provider.is_empty() {
                    return Ok(not_configured(role));
                }
                info!("Constructing '{role}' on protocol: '{}'", protocol.name);
                let provider = Provider::from_section(&props.provider, &protocol);
                staged.push(provider, None)
            },
            ComponentRole::Consumer => {
                info!("Constructing '{role}'");
                staged.push(Consumer::from_section(&props.consumer), None)
            },
        };

        Ok(outcome)
    }
}

fn not_configured(role: ComponentRole) -> Outcome {
    debug!("Skipping '{role}': section '{}' not configured", role.section());
    Outcome::Skipped { reason: SkipReason::NotConfigured }
}
