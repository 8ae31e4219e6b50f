use std::fmt::Display;

use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{
    Attribute, Error, Expr, Ident, Lit, LitStr, Result, Token, parenthesized,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    token::Paren,
};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MetaAttributeType {
    Convert,
    Derive,
    Ignore,
    Index,
    Tag,
}

impl MetaAttributeType {
    pub fn from_ident(ident: &Ident) -> Option<Self> {
        match ident.to_string().as_str() {
            "convert" => Some(Self::Convert),
            "derive" => Some(Self::Derive),
            "ignore" => Some(Self::Ignore),
            "index" => Some(Self::Index),
            "tag" => Some(Self::Tag),
            _ => None,
        }
    }

    fn takes_argument(&self) -> bool {
        !matches!(self, Self::Ignore)
    }
}

impl Display for MetaAttributeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Convert => "convert",
            Self::Derive => "derive",
            Self::Ignore => "ignore",
            Self::Index => "index",
            Self::Tag => "tag",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug)]
pub struct MetaAttribute {
    pub r#type: MetaAttributeType,
    arg: Option<TokenStream>,
    span: Span,
}

impl MetaAttribute {
    pub fn new(r#type: MetaAttributeType, arg: Option<TokenStream>, span: Span) -> Self {
        Self { r#type, arg, span }
    }

    pub fn is_top_level(&self) -> bool {
        matches!(self.r#type, MetaAttributeType::Tag)
    }

    pub fn is_field_level(&self) -> bool {
        !self.is_top_level()
    }

    /// The argument of an attribute that takes one.
    pub fn required_arg(&self) -> Result<&TokenStream> {
        self.arg.as_ref().ok_or_else(|| {
            Error::new(
                self.span,
                format!("nmea0183-capture-derive: Attribute `{}` needs a value", self.r#type),
            )
        })
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

impl Parse for MetaAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let ident: Ident = input.parse()?;
        let attribute_type = MetaAttributeType::from_ident(&ident).ok_or_else(|| {
            Error::new(ident.span(), "nmea0183-capture-derive: Unknown nmea attribute")
        })?;

        let arg = if attribute_type.takes_argument() {
            // read (value) or ="value"

            let token_stream = match attribute_type {
                MetaAttributeType::Tag => parse_tag(input)?,
                _ => parse_argument::<Expr>(input)?,
            };
            Some(token_stream)
        } else {
            None
        };

        Ok(MetaAttribute::new(attribute_type, arg, ident.span()))
    }
}

impl Display for MetaAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.r#type)?;
        if let Some(arg) = &self.arg {
            write!(f, "({arg})")?;
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct List<T: Parse>(pub Vec<T>);

impl<T: Parse> Parse for List<T> {
    fn parse(input: ParseStream) -> Result<Self> {
        Ok(List(
            Punctuated::<T, Token![,]>::parse_terminated(input)?
                .into_iter()
                .collect(),
        ))
    }
}

fn parse_argument<P>(input: ParseStream) -> Result<TokenStream>
where
    P: Parse + ToTokens,
{
    if input.peek(Token![=]) {
        let _: Token![=] = input.parse()?;
        let value = Lit::parse(input)?;

        match value {
            Lit::Str(string) => {
                let parsed: P = string.parse()?;
                Ok(quote! { #parsed })
            }
            Lit::Int(int) => Ok(quote! { #int }),
            _ => Err(Error::new(
                value.span(),
                "nmea0183-capture-derive: Unexpected type for nmea attribute content",
            )),
        }
    } else if input.peek(Paren) {
        let content;
        parenthesized!(content in input);
        let parsed: P = content.parse()?;
        Ok(quote! { #parsed })
    } else {
        Err(Error::new(
            input.span(),
            "nmea0183-capture-derive: Expected '= <value>' or '(<value>)' for nmea attribute",
        ))
    }
}

/// The tag is kept as a string literal: `tag = "GPRMC"` or `tag("GPRMC")`.
fn parse_tag(input: ParseStream) -> Result<TokenStream> {
    let tag: LitStr = if input.peek(Token![=]) {
        let _: Token![=] = input.parse()?;
        input.parse()?
    } else if input.peek(Paren) {
        let content;
        parenthesized!(content in input);
        content.parse()?
    } else {
        return Err(Error::new(
            input.span(),
            "nmea0183-capture-derive: Expected '= \"<tag>\"' or '(\"<tag>\")' for `tag`",
        ));
    };

    if tag.value().is_empty() || !tag.value().is_ascii() {
        return Err(Error::new(
            tag.span(),
            "nmea0183-capture-derive: `tag` must be a non-empty ASCII string",
        ));
    }

    Ok(quote! { #tag })
}

fn parse_nmea_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    Ok(attrs
        .iter()
        .filter_map(|attr| {
            if attr.path().is_ident("nmea") {
                Some(attr.parse_args::<List<MetaAttribute>>())
            } else {
                None
            }
        })
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flat_map(|list| list.0.into_iter())
        .collect())
}

pub fn parse_top_level_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    let mut attributes_set = std::collections::HashSet::new();

    parse_nmea_attributes(attrs)?
        .into_iter()
        .map(|meta_attr| {
            if !meta_attr.is_top_level() {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-capture-derive: Attribute `{}` is not allowed at the top level",
                        meta_attr.r#type
                    ),
                ));
            }

            if !attributes_set.insert(meta_attr.r#type) {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-capture-derive: Duplicate nmea attribute `{}`",
                        meta_attr.r#type
                    ),
                ));
            }

            Ok(meta_attr)
        })
        .collect()
}

pub fn parse_field_level_attributes(attrs: &[Attribute]) -> Result<Vec<MetaAttribute>> {
    let mut attributes_set = std::collections::HashSet::new();

    parse_nmea_attributes(attrs)?
        .into_iter()
        .map(|meta_attr| {
            if !meta_attr.is_field_level() {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-capture-derive: Attribute `{}` is not allowed at the field level",
                        meta_attr.r#type
                    ),
                ));
            }

            if !attributes_set.insert(meta_attr.r#type) {
                return Err(Error::new(
                    meta_attr.span(),
                    format!(
                        "nmea0183-capture-derive: Duplicate nmea attribute `{}`",
                        meta_attr.r#type
                    ),
                ));
            }

            // A field is read from exactly one source.
            let sources = [
                MetaAttributeType::Index,
                MetaAttributeType::Derive,
                MetaAttributeType::Ignore,
            ];
            if sources.contains(&meta_attr.r#type)
                && sources
                    .iter()
                    .filter(|source| attributes_set.contains(*source))
                    .count()
                    > 1
            {
                return Err(Error::new(
                    meta_attr.span(),
                    "nmea0183-capture-derive: Only one of `index`, `derive` or `ignore` can be used.",
                ));
            }

            Ok(meta_attr)
        })
        .collect()
}
