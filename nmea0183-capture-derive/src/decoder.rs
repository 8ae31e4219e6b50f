use proc_macro2::{Ident, Literal, TokenStream};
use quote::{ToTokens, quote};
use syn::Type;

/// Expression producing the value of one struct field.
#[derive(Clone)]
pub enum Decoder {
    /// Reads entry `position` of the raw field table.
    Field {
        context: Ident,
        table: Ident,
        position: usize,
        optional: bool,
    },
    /// Evaluates entry `position` of the derived attribute table.
    Derived {
        context: Ident,
        table: Ident,
        position: usize,
        optional: bool,
    },
    Ignore(Box<Type>),
}

impl ToTokens for Decoder {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let token_stream = match self {
            Self::Field {
                context,
                table,
                position,
                optional,
            } => read(quote! { #context.field }, table, *position, *optional),
            Self::Derived {
                context,
                table,
                position,
                optional,
            } => read(quote! { #context.derived }, table, *position, *optional),
            Self::Ignore(ty) => {
                quote! { <#ty as ::core::default::Default>::default() }
            }
        };

        tokens.extend(token_stream);
    }
}

fn read(method: TokenStream, table: &Ident, position: usize, optional: bool) -> TokenStream {
    let position = Literal::usize_unsuffixed(position);
    if optional {
        quote! { #method(&#table[#position]) }
    } else {
        quote! { #method(&#table[#position]).unwrap_or_default() }
    }
}
