use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Fields, Ident, ItemStruct};

/// Parsed `#[dbx_component(role = ...)]` arguments.
#[derive(Default)]
pub struct ComponentArgs {
    role: Option<Ident>,
}

impl ComponentArgs {
    pub fn parse(args: TokenStream) -> syn::Result<Self> {
        let mut parsed = Self::default();
        let parser = syn::meta::parser(|meta| {
            if meta.path.is_ident("role") {
                parsed.role = Some(meta.value()?.parse()?);
                Ok(())
            } else {
                Err(meta.error("unsupported dbx_component argument, expected `role = <ComponentRole>`"))
            }
        });
        syn::parse::Parser::parse2(parser, args)?;
        Ok(parsed)
    }
}

pub fn expand_component(args: TokenStream, input: ItemStruct) -> TokenStream {
    let args = match ComponentArgs::parse(args) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error(),
    };
    let handle = &input.ident;
    let Some(role) = args.role else {
        return syn::Error::new_spanned(handle, "dbx_component requires `role = <ComponentRole>`")
            .to_compile_error();
    };
    if !matches!(input.fields, Fields::Named(_)) {
        return syn::Error::new_spanned(handle, "dbx_component requires a struct with named fields")
            .to_compile_error();
    }

    let vis = &input.vis;
    let fields = &input.fields;
    let attrs = &input.attrs;
    let inner = format_ident!("{handle}Inner");
    let registry = quote! { ::dbx_kernel::domain::registry };

    quote! {
        #[derive(Debug, Clone)]
        #vis struct #inner #fields

        #(#attrs)*
        #[derive(Debug, Clone)]
        #vis struct #handle {
            inner: std::sync::Arc<#inner>,
        }

        impl #handle {
            #[must_use]
            pub fn new(inner: #inner) -> Self {
                Self { inner: std::sync::Arc::new(inner) }
            }

            /// Returns `true` when both handles refer to the same constructed component.
            #[must_use]
            pub fn ptr_eq(&self, other: &Self) -> bool {
                std::sync::Arc::ptr_eq(&self.inner, &other.inner)
            }
        }

        impl std::ops::Deref for #handle {
            type Target = #inner;

            fn deref(&self) -> &Self::Target {
                &self.inner
            }
        }

        impl #registry::Component for #handle {
            fn component_role() -> #registry::ComponentRole
            where
                Self: Sized,
            {
                #registry::ComponentRole::#role
            }

            fn role(&self) -> #registry::ComponentRole {
                #registry::ComponentRole::#role
            }

            fn as_any(&self) -> &dyn std::any::Any {
                self
            }
        }

        impl From<#handle> for #registry::InitializedComponent {
            fn from(component: #handle) -> Self {
                Self::new(component)
            }
        }
    }
}
