use proc_macro2::TokenStream;
use quote::quote;
use syn::{Attribute, DataStruct, Generics, Ident, Path, Result, parse_quote};

use crate::{
    config::Config,
    generate::{Generator, structs::decoder::StructDecoder},
    meta,
};

pub mod decoder;

pub struct Struct {
    pub name: Path,
    pub config: Config,
    pub generics: Generics,
    pub struct_decoder: StructDecoder,
}

impl Struct {
    pub fn from_datastruct(
        name: &Ident,
        datastruct: &DataStruct,
        attributes: &[Attribute],
        generics: &Generics,
    ) -> Result<Self> {
        let attributes = meta::parse_top_level_attributes(attributes)?;
        let config = Config::from_meta_attributes(&attributes, name.span())?;
        let struct_decoder = StructDecoder::from_fields(&datastruct.fields, &config)?;

        Ok(Self {
            name: parse_quote!(#name),
            config,
            generics: generics.clone(),
            struct_decoder,
        })
    }
}

impl Generator for Struct {
    fn name(&self) -> &Path {
        &self.name
    }

    fn config(&self) -> &Config {
        &self.config
    }

    fn generics(&self) -> &Generics {
        &self.generics
    }

    fn generate_descriptor(&self) -> TokenStream {
        let tag = &self.config.tag;
        let fields = &self.struct_decoder.field_specs;
        let derived = &self.struct_decoder.derived_specs;

        quote! {
            nmea0183_capture::SentenceTypeDescriptor {
                tag: #tag,
                fields: &[#(#fields),*],
                derived: &[#(#derived),*],
            }
        }
    }

    fn generate_decode_body(&self) -> TokenStream {
        let name = &self.name;
        let fields_name = &self.config.fields_name;
        let derived_name = &self.config.derived_name;

        // Raw fields are read before derived attributes so that a bad field is
        // reported under its own name.
        let mut decoders = self.struct_decoder.decoders.clone();
        decoders.sort_by_key(|field_decoder| field_decoder.stage());

        let (variable_name, decoder): (Vec<_>, Vec<_>) = decoders
            .iter()
            .map(|field_decoder| (&field_decoder.variable_name, &field_decoder.decoder))
            .unzip();
        let ty = decoders.iter().map(|field_decoder| &field_decoder.ty);

        let ordered_name = self
            .struct_decoder
            .decoders
            .iter()
            .map(|field_decoder| &field_decoder.variable_name);

        let struct_def = if self.struct_decoder.empty {
            quote! { #name }
        } else {
            quote! { #name { #(#ordered_name),* } }
        };

        let fields_table = (!self.struct_decoder.field_specs.is_empty()).then(|| {
            quote! {
                let #fields_name: &'static [nmea0183_capture::FieldSpec] =
                    <Self as nmea0183_capture::DecodeSentence>::DESCRIPTOR.fields;
            }
        });
        let derived_table = (!self.struct_decoder.derived_specs.is_empty()).then(|| {
            quote! {
                let #derived_name: &'static [nmea0183_capture::DerivedSpec] =
                    <Self as nmea0183_capture::DecodeSentence>::DESCRIPTOR.derived;
            }
        });

        quote! {
            #fields_table
            #derived_table
            #(let #variable_name: #ty = #decoder;)*
            #struct_def
        }
    }
}
