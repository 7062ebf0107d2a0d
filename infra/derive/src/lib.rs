#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the wiring crates.
//!
//! * [`macro@dbx_error`] turns an enum into a context-aware `thiserror` error.
//! * [`macro@dbx_component`] turns a struct into a cheap, shareable component handle
//!   that can be stored in a component registry.
//!
//! The examples are `ignore`d because the generated code refers to crates that
//! this proc-macro crate does not depend on.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `Debug` and `thiserror::Error` unless already derived.
/// * **Context Support**: Generates a companion `<Name>Ext` trait adding `.context(...)`
///   to `Result<T, Name>` and to `Result<T, Source>` for every wrapped source error.
/// * **Conversions**: Implements `From<Source>` for variants holding a `source` field,
///   so `?` lifts upstream errors.
/// * **Internal Fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
///
/// # Requirements
///
/// 1. Applied to an **enum** whose variants all use named fields.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants with a `source` (or `#[source]`/`#[from]`) field must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[dbx_derive::dbx_error]
/// pub enum LoaderError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<config::Config, LoaderError> {
///     config::Config::builder().build().context("Building layered source")
/// }
/// ```
#[proc_macro_attribute]
pub fn dbx_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Attribute macro to define a framework component handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` itself is an `Arc` handle that
/// derefs to the inner state, so clones share identity (see the generated `ptr_eq`).
/// The handle implements `Component` for the given `ComponentRole` variant and converts
/// into an `InitializedComponent` for registration.
///
/// # Example
///
/// ```rust,ignore
/// #[dbx_derive::dbx_component(role = Protocol)]
/// pub struct Protocol {
///     pub name: String,
/// }
///
/// let protocol = Protocol::new(ProtocolInner { name: "dubbo".to_owned() });
/// assert!(protocol.ptr_eq(&protocol.clone()));
/// ```
#[proc_macro_attribute]
pub fn dbx_component(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::component::expand_component(args.into(), input).into()
}
