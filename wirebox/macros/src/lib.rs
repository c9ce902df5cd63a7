//! Derive macros for wirebox. Use `#[derive(Service)]` instead of writing `impl Service for T {}`.

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput};

/// Implements the `Service` trait with no methods and no call capability.
/// Requires `Service` to be in scope (e.g. `use wirebox::Service`).
#[proc_macro_derive(Service)]
pub fn derive_service(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let expanded = quote! {
        impl #impl_generics Service for #name #ty_generics #where_clause {}
    };
    TokenStream::from(expanded)
}
