//! Procedural macros for mox-matchers
//!
//! This crate provides the `#[mox_matchers::test]` attribute macro for tests
//! that receive a [`TestHost`] with every matcher installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use mox_matchers::prelude::*;
//! use serde_json::json;
//!
//! #[mox_matchers::test]
//! fn resolves(host: TestHost) {
//!     let promise = host.resolved(json!(1));
//!     host.expect(&promise).to("to_resolve", &[]);
//! }
//! ```
//!
//! [`TestHost`]: https://docs.rs/mox-matchers/latest/mox_matchers/host/struct.TestHost.html

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::{Parse, ParseStream},
    parse_macro_input, FnArg, Ident, ItemFn, LitStr, Pat, Token, Type,
};

/// Configuration options for the test macro.
#[derive(Debug, Default)]
struct TestConfig {
    /// Host convention ("modern" or "legacy")
    convention: Option<String>,
    /// Matcher configuration file, relative to the crate root
    config: Option<String>,
}

impl Parse for TestConfig {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut config = TestConfig::default();

        while !input.is_empty() {
            let ident: Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            let value: LitStr = input.parse()?;

            match ident.to_string().as_str() {
                "convention" => match value.value().as_str() {
                    "modern" | "legacy" => config.convention = Some(value.value()),
                    other => {
                        return Err(syn::Error::new(
                            value.span(),
                            format!("unknown convention: {other}. Use \"modern\" or \"legacy\""),
                        ));
                    }
                },
                "config" => config.config = Some(value.value()),
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        format!("unknown attribute: {ident}"),
                    ));
                }
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(config)
    }
}

/// Determines if a function parameter is requesting a TestHost.
fn is_host_param(arg: &FnArg) -> bool {
    if let FnArg::Typed(pat_type) = arg {
        if let Type::Path(type_path) = &*pat_type.ty {
            if let Some(segment) = type_path.path.segments.last() {
                return segment.ident == "TestHost";
            }
        }
    }
    false
}

/// Extracts the parameter pattern from a function argument.
fn get_param_pat(arg: &FnArg) -> Option<&Pat> {
    if let FnArg::Typed(pat_type) = arg {
        Some(&pat_type.pat)
    } else {
        None
    }
}

/// Test attribute macro injecting a prepared `TestHost`.
///
/// The generated test builds a host, installs the matcher catalogue in the
/// host's convention and passes it as the `TestHost` parameter.
///
/// # Configuration Options
///
/// - `convention = "modern"` (default) or `convention = "legacy"`
/// - `config = "tests/matchers.toml"` - Load a `MatcherConfig`; the path is
///   relative to the crate root
///
/// ```rust,ignore
/// #[mox_matchers::test(convention = "legacy", config = "tests/matchers.toml")]
/// fn legacy_messages(host: TestHost) {
///     host.expect(&host.pending()).not().to("to_resolve", &[]);
/// }
/// ```
#[proc_macro_attribute]
pub fn test(attr: TokenStream, item: TokenStream) -> TokenStream {
    let config = parse_macro_input!(attr as TestConfig);
    let input = parse_macro_input!(item as ItemFn);

    expand_test(&config, &input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand_test(config: &TestConfig, input: &ItemFn) -> syn::Result<TokenStream2> {
    let name = &input.sig.ident;
    let body = &input.block;
    let attrs = &input.attrs;
    let vis = &input.vis;

    if let Some(asyncness) = &input.sig.asyncness {
        return Err(syn::Error::new_spanned(
            asyncness,
            "test function must not be async; matchers flush promises synchronously",
        ));
    }

    let mut params = input.sig.inputs.iter();
    let host_pat = match (params.next(), params.next()) {
        (None, _) => None,
        (Some(arg), None) if is_host_param(arg) => get_param_pat(arg),
        (Some(arg), _) => {
            return Err(syn::Error::new_spanned(
                arg,
                "test function takes at most one parameter, of type `TestHost`",
            ));
        }
    };

    let convention = match config.convention.as_deref() {
        Some("legacy") => quote! { ::mox_matchers::host::Convention::Legacy },
        _ => quote! { ::mox_matchers::host::Convention::Modern },
    };

    let with_config = config.config.as_ref().map(|path| {
        quote! {
            let host = host.with_config(
                &::mox_matchers::config::MatcherConfig::load(
                    ::std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join(#path),
                )
                .unwrap_or_else(|err| panic!("{err}")),
            );
        }
    });

    let host_init = host_pat.map(|pat| {
        quote! {
            let #pat = {
                let host = ::mox_matchers::host::TestHost::with_convention(#convention);
                #with_config
                let mut host = host;
                ::mox_matchers::host::install(&mut host);
                host
            };
        }
    });

    Ok(quote! {
        #[::core::prelude::v1::test]
        #(#attrs)*
        #vis fn #name() {
            #host_init
            #body
        }
    })
}

#[cfg(test)]
mod tests {
    use super::{expand_test, TestConfig};
    use syn::ItemFn;

    #[::core::prelude::v1::test]
    fn test_config_parse_empty() {
        let config: TestConfig = syn::parse_str("").unwrap();
        assert!(config.convention.is_none());
        assert!(config.config.is_none());
    }

    #[::core::prelude::v1::test]
    fn test_config_parse_multiple() {
        let config: TestConfig =
            syn::parse_str("convention = \"legacy\", config = \"tests/matchers.toml\"").unwrap();
        assert_eq!(config.convention.as_deref(), Some("legacy"));
        assert_eq!(config.config.as_deref(), Some("tests/matchers.toml"));
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_unknown_convention() {
        let err = syn::parse_str::<TestConfig>("convention = \"classic\"").unwrap_err();
        assert!(err.to_string().contains("unknown convention"));
    }

    #[::core::prelude::v1::test]
    fn test_config_rejects_unknown_key() {
        assert!(syn::parse_str::<TestConfig>("runtime = \"tokio\"").is_err());
    }

    #[::core::prelude::v1::test]
    fn test_rejects_async_fn() {
        let item: ItemFn = syn::parse_str("async fn t(host: TestHost) {}").unwrap();
        assert!(expand_test(&TestConfig::default(), &item).is_err());
    }

    #[::core::prelude::v1::test]
    fn test_rejects_foreign_param() {
        let item: ItemFn = syn::parse_str("fn t(clock: MockClock) {}").unwrap();
        assert!(expand_test(&TestConfig::default(), &item).is_err());
    }

    #[::core::prelude::v1::test]
    fn test_expands_host_injection() {
        let item: ItemFn = syn::parse_str("fn t(host: TestHost) {}").unwrap();
        let expanded = expand_test(&TestConfig::default(), &item).unwrap().to_string();
        assert!(expanded.contains("install"));
        assert!(expanded.contains("Modern"));
    }
}
