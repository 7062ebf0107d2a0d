use dbx_kernel::registry::RegistryError;
use dbx_rpc::ComponentError;
use std::borrow::Cow;

/// Wiring error type. Any variant aborts the run before the registry is touched,
/// except `Registry`, which a custom registry may raise during commit.
#[dbx_derive::dbx_error]
pub enum WiringError {
    #[error("Failed to construct component{}: {source}", format_context(.context))]
    Component { source: ComponentError, context: Option<Cow<'static, str>> },

    #[error("Failed to register component{}: {source}", format_context(.context))]
    Registry { source: RegistryError, context: Option<Cow<'static, str>> },
}
