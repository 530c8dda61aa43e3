//! The `#[dynvalue_testhelpers::test]` attribute.

use unsynn::*;

keyword! {
    KFn = "fn";
}

unsynn! {
    // attributes, visibility and qualifiers ahead of `fn`
    struct Prelude {
        items: Any<Cons<Except<KFn>, TokenTree>>,
    }

    // generics, arguments and return type
    struct Signature {
        items: Any<Cons<Except<BraceGroup>, TokenTree>>,
    }

    struct TestFn {
        prelude: Prelude,
        _fn: KFn,
        name: Ident,
        signature: Signature,
        body: BraceGroup,
    }
}

impl quote::ToTokens for Prelude {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

impl quote::ToTokens for Signature {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        self.items.to_tokens(tokens)
    }
}

/// Marks a test and runs `dynvalue_testhelpers::setup()` before its body.
///
/// ```ignore
/// use dynvalue_testhelpers::test;
///
/// #[test]
/// fn decodes_points() {
///     // tracing output from dynvalue is captured per test
/// }
/// ```
#[proc_macro_attribute]
pub fn test(
    _attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> proc_macro::TokenStream {
    let item = TokenStream::from(item);
    let mut tokens = item.to_token_iter();
    let TestFn {
        prelude,
        _fn,
        name,
        signature,
        body,
    } = match tokens.parse::<TestFn>() {
        Ok(f) => f,
        Err(_) => {
            return quote::quote! {
                ::core::compile_error!("#[dynvalue_testhelpers::test] expects a function");
            }
            .into();
        }
    };
    let body = body.0.stream();

    quote::quote! {
        #[::core::prelude::rust_2024::test]
        #prelude fn #name #signature {
            ::dynvalue_testhelpers::setup();

            #body
        }
    }
    .into()
}
