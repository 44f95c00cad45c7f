use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, DeriveInput, Field};

/// Derives `agency_di::Build` for a struct.
///
/// Every field is built from the provider, except fields marked with
/// `#[state]`, which are initialized with `Default::default()`. Built values
/// are cached in the provider.
#[proc_macro_derive(Build, attributes(state))]
pub fn derive_build(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let ident = input.ident;

    let generics = input
        .generics
        .type_params()
        .map(|x| &x.ident)
        .collect::<Vec<_>>();

    let syn::Data::Struct(data) = input.data else {
        return quote! { ::core::compile_error!("Build can only be derived for structs"); }.into();
    };

    fn is_state(field: &Field) -> bool {
        field
            .attrs
            .iter()
            .any(|x| x.path().get_ident().is_some_and(|x| x == "state"))
    }

    let bounds = data
        .fields
        .iter()
        .filter(|x| !is_state(x))
        .map(|Field { ty, .. }| quote! { #ty: ::agency_di::Build<__Provider> })
        .collect::<Vec<_>>();

    let build_expr = match data.fields {
        syn::Fields::Named(fields) => {
            let fields = fields
                .named
                .iter()
                .map(|f @ Field { ident, .. }| {
                    if is_state(f) {
                        quote! { #ident: ::core::default::Default::default() }
                    } else {
                        quote! { #ident: ::agency_di::Build::build(provider) }
                    }
                })
                .collect::<Vec<_>>();
            quote! { Self { #(#fields),* } }
        }
        syn::Fields::Unnamed(fields) => {
            let fields = fields
                .unnamed
                .iter()
                .map(|f| {
                    if is_state(f) {
                        quote! { ::core::default::Default::default() }
                    } else {
                        quote! { ::agency_di::Build::build(provider) }
                    }
                })
                .collect::<Vec<_>>();
            quote! { Self( #(#fields),* ) }
        }
        syn::Fields::Unit => quote! { Self },
    };

    quote! {
        impl<__Provider, #(#generics),*> ::agency_di::Build<__Provider> for #ident<#(#generics),*>
        where
            Self: ::core::clone::Clone + 'static,
            __Provider: ::agency_di::Provider,
            #(#bounds),*
        {
            fn build(provider: &mut __Provider) -> Self {
                if let ::core::option::Option::Some(cached) =
                    ::agency_di::Provider::cache(provider).get::<Self>()
                {
                    return ::core::clone::Clone::clone(cached);
                }

                let value: Self = #build_expr;
                ::agency_di::Provider::cache(provider)
                    .insert(::core::clone::Clone::clone(&value));
                value
            }
        }
    }
    .into()
}
