//! Component registry primitives.
//! A role-keyed, type-erased container entry for constructed framework components.

use serde::{Serialize, Serializer};
use std::any::Any;
use std::fmt::Debug;
use strum_macros::{Display, EnumIter, IntoStaticStr};

/// Role a component plays in the RPC graph.
///
/// Declaration order is the fixed wiring order; `ComponentRole::iter()` yields it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter, IntoStaticStr)]
pub enum ComponentRole {
    #[strum(serialize = "annotationBean")]
    AnnotationScanner,
    #[strum(serialize = "applicationConfig")]
    Application,
    #[strum(serialize = "moduleConfig")]
    Module,
    #[strum(serialize = "registryConfig")]
    Registry,
    #[strum(serialize = "protocolConfig")]
    Protocol,
    #[strum(serialize = "providerConfig")]
    Provider,
    #[strum(serialize = "consumerConfig")]
    Consumer,
}

impl ComponentRole {
    /// Registration name of the component, e.g. `protocolConfig`.
    #[must_use]
    pub fn bean_name(self) -> &'static str {
        self.into()
    }

    /// Configuration section the component is built from.
    #[must_use]
    pub const fn section(self) -> &'static str {
        match self {
            Self::AnnotationScanner => "annotation",
            Self::Application => "application",
            Self::Module => "module",
            Self::Registry => "registry",
            Self::Protocol => "protocol",
            Self::Provider => "provider",
            Self::Consumer => "consumer",
        }
    }
}

impl Serialize for ComponentRole {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.bean_name())
    }
}

/// A constructed framework component that can live in a registry.
pub trait Component: Any + Debug + Send + Sync {
    /// Role of the implementing type.
    fn component_role() -> ComponentRole
    where
        Self: Sized;

    /// Role of this instance.
    fn role(&self) -> ComponentRole;

    /// Helper to allow downcasting from the trait object.
    fn as_any(&self) -> &dyn Any;
}

/// A component ready for registration.
#[derive(Debug)]
pub struct InitializedComponent {
    pub role: ComponentRole,
    pub state: Box<dyn Component>,
}

impl InitializedComponent {
    /// Wrap a concrete component.
    pub fn new<T: Component>(state: T) -> Self {
        Self { role: state.role(), state: Box::new(state) }
    }

    /// Downcast to the concrete component type.
    #[must_use]
    pub fn downcast_ref<T: Component>(&self) -> Option<&T> {
        self.state.as_any().downcast_ref::<T>()
    }
}
