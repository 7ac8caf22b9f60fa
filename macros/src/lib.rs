//! Derive macros for the todo-redux state container
//!
//! This crate provides procedural macros to reduce boilerplate when declaring
//! action enums.
//!
//! # Available Macros
//!
//! - `#[derive(Action)]` - Implements `ActionType` with slice-qualified type names
//!
//! # Example
//!
//! ```ignore
//! use todo_redux_core::action::ActionType;
//! use todo_redux_macros::Action;
//!
//! #[derive(Action, Clone, Debug)]
//! #[action(slice = "todos")]
//! enum TodoAction {
//!     Create { desc: String },
//!     Remove { id: String },
//!
//!     #[action(slice = "selectedTodo")]
//!     Select { id: String },
//! }
//!
//! assert_eq!(TodoAction::Create { desc: "x".into() }.action_type(), "todos/create");
//! assert_eq!(TodoAction::Select { id: "1".into() }.action_type(), "selectedTodo/select");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitStr};

/// Derive macro for Action enums
///
/// Implements `todo_redux_core::action::ActionType`:
/// - `action_type()` - `"{slice}/{variant}"` with the variant in lower camel case
/// - `slice()` - The slice that owns the variant, if any
///
/// # Attributes
///
/// - `#[action(slice = "...")]` on the enum - Default slice for every variant
/// - `#[action(slice = "...")]` on a variant - Overrides the default
///
/// Variants without any slice report the bare lower-camel name.
///
/// # Panics
///
/// This macro will produce a compile error (not a runtime panic) if:
/// - Applied to a non-enum type
/// - An `#[action(...)]` attribute contains anything other than `slice = "..."`
#[proc_macro_derive(Action, attributes(action))]
pub fn derive_action(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let Data::Enum(data_enum) = &input.data else {
        return syn::Error::new_spanned(&input, "#[derive(Action)] can only be used on enums")
            .to_compile_error()
            .into();
    };

    let default_slice = match parse_slice(&input.attrs) {
        Ok(slice) => slice,
        Err(error) => return error.to_compile_error().into(),
    };

    let mut type_arms = Vec::with_capacity(data_enum.variants.len());
    let mut slice_arms = Vec::with_capacity(data_enum.variants.len());

    for variant in &data_enum.variants {
        let variant_name = &variant.ident;

        let slice = match parse_slice(&variant.attrs) {
            Ok(slice) => slice.or_else(|| default_slice.clone()),
            Err(error) => return error.to_compile_error().into(),
        };

        let short_name = lower_camel(&variant_name.to_string());
        let type_name = match &slice {
            Some(slice) => format!("{slice}/{short_name}"),
            None => short_name,
        };

        let pattern = match &variant.fields {
            Fields::Named(_) => quote! { Self::#variant_name { .. } },
            Fields::Unnamed(_) => quote! { Self::#variant_name(..) },
            Fields::Unit => quote! { Self::#variant_name },
        };

        let slice_value = match &slice {
            Some(slice) => quote! { ::core::option::Option::Some(#slice) },
            None => quote! { ::core::option::Option::None },
        };

        type_arms.push(quote! { #pattern => #type_name, });
        slice_arms.push(quote! { #pattern => #slice_value, });
    }

    let expanded = quote! {
        impl #impl_generics ::todo_redux_core::action::ActionType for #name #ty_generics #where_clause {
            fn action_type(&self) -> &'static str {
                match *self {
                    #(#type_arms)*
                }
            }

            fn slice(&self) -> ::core::option::Option<&'static str> {
                match *self {
                    #(#slice_arms)*
                }
            }
        }
    };

    TokenStream::from(expanded)
}

/// Read `slice = "..."` out of any `#[action(...)]` attributes
fn parse_slice(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut slice = None;

    for attr in attrs.iter().filter(|attr| attr.path().is_ident("action")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("slice") {
                let value: LitStr = meta.value()?.parse()?;
                slice = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("expected `slice = \"...\"`"))
            }
        })?;
    }

    Ok(slice)
}

/// `CreateTodo` -> `createTodo`
fn lower_camel(name: &str) -> String {
    let mut chars = name.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_lowercase().chain(chars).collect()
    })
}
