use proc_macro2::{Span, TokenStream};
use syn::{Error, Ident, Result};

use crate::meta::{MetaAttribute, MetaAttributeType};

#[derive(Clone)]
pub struct Config {
    pub context_name: Ident,
    pub fields_name: Ident,
    pub derived_name: Ident,
    pub tag: TokenStream,
}

impl Config {
    pub fn from_meta_attributes(attribute_list: &[MetaAttribute], span: Span) -> Result<Self> {
        let mut tag = None;

        for meta in attribute_list {
            if meta.r#type == MetaAttributeType::Tag {
                tag = Some(meta.required_arg()?.clone());
            }
        }

        let tag = tag.ok_or_else(|| {
            Error::new(
                span,
                "nmea0183-capture-derive: Missing `#[nmea(tag = \"...\")]` attribute",
            )
        })?;

        Ok(Self {
            context_name: Ident::new("nmea_context", Span::call_site()),
            fields_name: Ident::new("nmea_fields", Span::call_site()),
            derived_name: Ident::new("nmea_derived", Span::call_site()),
            tag,
        })
    }
}
