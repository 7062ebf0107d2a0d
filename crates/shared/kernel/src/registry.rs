//! The host application's component container, seen from the wiring layer.
//!
//! The wiring engine only needs three capabilities: ask whether a role is taken, look
//! a component up, and register a new one. [`BeanRegistry`] is the in-memory
//! implementation; hosts with their own container implement [`ComponentRegistry`].

use dbx_domain::registry::{Component, ComponentRole, InitializedComponent};
use fxhash::FxHashMap;
use std::borrow::Cow;
use tracing::debug;

#[dbx_derive::dbx_error]
pub enum RegistryError {
    #[error("Component '{role}' is already registered{}", format_context(.context))]
    Duplicate { role: ComponentRole, context: Option<Cow<'static, str>> },

    #[error("Component '{role}' is not registered{}", format_context(.context))]
    Missing { role: ComponentRole, context: Option<Cow<'static, str>> },
}

/// Role-keyed component container.
pub trait ComponentRegistry {
    /// Returns `true` if a component already fills `role`.
    fn contains(&self, role: ComponentRole) -> bool;

    /// Returns the component filling `role`, if any.
    fn lookup(&self, role: ComponentRole) -> Option<&dyn Component>;

    /// Stores `component` under its role.
    ///
    /// # Errors
    /// Returns [`RegistryError::Duplicate`] if the role is already taken; the existing
    /// component stays in place.
    fn register(&mut self, component: InitializedComponent) -> Result<(), RegistryError>;
}

/// Typed lookups for every [`ComponentRegistry`].
pub trait ComponentRegistryExt: ComponentRegistry {
    /// Returns the component of type `T`, if registered.
    fn get<T: Component>(&self) -> Option<&T> {
        self.lookup(T::component_role()).and_then(|component| component.as_any().downcast_ref::<T>())
    }

    /// Returns the component of type `T`.
    ///
    /// # Errors
    /// Returns [`RegistryError::Missing`] if the role is empty or holds another type.
    fn try_get<T: Component>(&self) -> Result<&T, RegistryError> {
        self.get::<T>().ok_or_else(|| RegistryError::Missing {
            role: T::component_role(),
            context: Some(std::any::type_name::<T>().into()),
        })
    }
}

impl<R: ComponentRegistry + ?Sized> ComponentRegistryExt for R {}

/// In-memory [`ComponentRegistry`].
#[derive(Debug, Default)]
pub struct BeanRegistry {
    components: FxHashMap<ComponentRole, InitializedComponent>,
}

impl BeanRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component while building the registry.
    ///
    /// # Errors
    /// Returns [`RegistryError::Duplicate`] if the role is already taken.
    pub fn with(mut self, component: impl Into<InitializedComponent>) -> Result<Self, RegistryError> {
        self.register(component.into())?;
        Ok(self)
    }

    /// Registered roles in wiring order.
    #[must_use]
    pub fn roles(&self) -> Vec<ComponentRole> {
        let mut roles: Vec<_> = self.components.keys().copied().collect();
        roles.sort_unstable();
        roles
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

impl ComponentRegistry for BeanRegistry {
    fn contains(&self, role: ComponentRole) -> bool {
        self.components.contains_key(&role)
    }

    fn lookup(&self, role: ComponentRole) -> Option<&dyn Component> {
        self.components.get(&role).map(|initialized| initialized.state.as_ref())
    }

    fn register(&mut self, component: InitializedComponent) -> Result<(), RegistryError> {
        let role = component.role;
        if self.components.contains_key(&role) {
            return Err(RegistryError::Duplicate { role, context: None });
        }
        debug!("Registered '{role}'");
        self.components.insert(role, component);
        Ok(())
    }
}
