use proc_macro2::TokenStream;
use quote::quote;
use syn::{
    Error, Fields, GenericArgument, Ident, LitStr, PathArguments, Result, Type, TypePath,
    ext::IdentExt, spanned::Spanned,
};

use crate::{
    config::Config,
    decoder::Decoder,
    meta::{self, MetaAttribute, MetaAttributeType},
};

#[derive(Clone)]
pub struct FieldDecoder {
    pub variable_name: Ident,
    pub ty: Type,
    pub decoder: Decoder,
}

impl FieldDecoder {
    /// Raw fields first, then derived attributes, then ignored fields.
    pub fn stage(&self) -> u8 {
        match self.decoder {
            Decoder::Field { .. } => 0,
            Decoder::Derived { .. } => 1,
            Decoder::Ignore(_) => 2,
        }
    }
}

#[derive(Clone)]
pub struct StructDecoder {
    pub empty: bool,
    pub decoders: Vec<FieldDecoder>,
    pub field_specs: Vec<TokenStream>,
    pub derived_specs: Vec<TokenStream>,
}

impl StructDecoder {
    pub fn from_fields(fields: &Fields, config: &Config) -> Result<Self> {
        let empty = match fields {
            Fields::Named(_) => false,
            Fields::Unit => true,
            Fields::Unnamed(unnamed) => {
                return Err(Error::new(
                    unnamed.span(),
                    "nmea0183-capture-derive: Tuple structs not supported; attributes are named after struct fields",
                ));
            }
        };

        let mut decoders = vec![];
        let mut field_specs = vec![];
        let mut derived_specs = vec![];

        for field in fields {
            let Some(ident) = &field.ident else {
                continue;
            };
            let attributes = meta::parse_field_level_attributes(&field.attrs)?;
            let name = LitStr::new(&ident.unraw().to_string(), ident.span());
            let optional = is_option(&field.ty);
            let read_type = value_type(&field.ty);

            let decoder = match Self::get_source(&attributes, ident)? {
                Source::Index(index) => {
                    let conversion = find(&attributes, MetaAttributeType::Convert)
                        .map(MetaAttribute::required_arg)
                        .transpose()?
                        .cloned()
                        .unwrap_or_else(|| quote! { nmea0183_capture::Conversion::Text });

                    field_specs.push(quote! {
                        nmea0183_capture::FieldSpec::new(#index, #name, #conversion)
                            .with_fit(nmea0183_capture::Fit::of::<#read_type>())
                    });
                    Decoder::Field {
                        context: config.context_name.clone(),
                        table: config.fields_name.clone(),
                        position: field_specs.len() - 1,
                        optional,
                    }
                }
                Source::Derive(derivation) => {
                    derived_specs.push(quote! {
                        nmea0183_capture::DerivedSpec::new(#name, #derivation)
                            .with_fit(nmea0183_capture::Fit::of::<#read_type>())
                    });
                    Decoder::Derived {
                        context: config.context_name.clone(),
                        table: config.derived_name.clone(),
                        position: derived_specs.len() - 1,
                        optional,
                    }
                }
                Source::Ignore => Decoder::Ignore(Box::new(field.ty.clone())),
            };

            decoders.push(FieldDecoder {
                variable_name: ident.clone(),
                ty: field.ty.clone(),
                decoder,
            });
        }

        Ok(Self {
            empty,
            decoders,
            field_specs,
            derived_specs,
        })
    }

    fn get_source(attributes: &[MetaAttribute], ident: &Ident) -> Result<Source> {
        let convert = find(attributes, MetaAttributeType::Convert);

        if let Some(index) = find(attributes, MetaAttributeType::Index) {
            return Ok(Source::Index(index.required_arg()?.clone()));
        }

        if let Some(convert) = convert {
            return Err(Error::new(
                convert.span(),
                "nmea0183-capture-derive: `convert` applies to raw fields and needs `index`",
            ));
        }

        if let Some(derive) = find(attributes, MetaAttributeType::Derive) {
            return Ok(Source::Derive(derive.required_arg()?.clone()));
        }

        if find(attributes, MetaAttributeType::Ignore).is_some() {
            return Ok(Source::Ignore);
        }

        Err(Error::new(
            ident.span(),
            "nmea0183-capture-derive: Field needs one of `index`, `derive` or `ignore`",
        ))
    }
}

enum Source {
    Index(TokenStream),
    Derive(TokenStream),
    Ignore,
}

fn find(attributes: &[MetaAttribute], r#type: MetaAttributeType) -> Option<&MetaAttribute> {
    attributes
        .iter()
        .find(|attribute| attribute.r#type == r#type)
}

fn is_option(ty: &Type) -> bool {
    if let Type::Path(TypePath { qself: None, path }) = ty
        && let Some(segment) = path.segments.last()
    {
        return segment.ident == "Option";
    }

    false
}

/// The type a value is read into: `T` for `Option<T>`, the field type otherwise.
fn value_type(ty: &Type) -> &Type {
    if let Type::Path(TypePath { qself: None, path }) = ty
        && let Some(segment) = path.segments.last()
        && segment.ident == "Option"
        && let PathArguments::AngleBracketed(arguments) = &segment.arguments
        && let Some(GenericArgument::Type(inner)) = arguments.args.first()
    {
        return inner;
    }

    ty
}
