use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, ItemFn};

/// Stamps the calling crate's package version into the process before `main`
/// runs, then emits `main` unchanged.
#[proc_macro_attribute]
pub fn main(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(input as ItemFn);

    let expanded = quote! {
        #[::verstamp::ctor::ctor]
        fn __verstamp_stamp_version() {
            ::verstamp::embed::embed(env!("CARGO_PKG_VERSION"));
        }

        #input_fn
    };

    TokenStream::from(expanded)
}
