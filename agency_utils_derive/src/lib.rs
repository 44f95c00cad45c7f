use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Instruments a function with a `tracing` span that records the arguments
/// and, at trace level, the return value.
///
/// Accepts the same arguments as `#[tracing::instrument]`, e.g.
/// `#[trace_instrument(skip(self))]`. The annotated crate must depend on
/// `tracing`.
#[proc_macro_attribute]
pub fn trace_instrument(meta: TokenStream, input: TokenStream) -> TokenStream {
    let meta = proc_macro2::TokenStream::from(meta);
    let ItemFn {
        attrs,
        vis,
        sig,
        block,
    } = parse_macro_input!(input as ItemFn);

    quote! {
        #[::tracing::instrument(ret(level = "trace"), #meta)]
        #(#attrs)*
        #vis #sig {
            ::tracing::trace!("call");
            #block
        }
    }
    .into()
}
