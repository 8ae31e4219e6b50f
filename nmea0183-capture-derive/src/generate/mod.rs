use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Error, Generics, Path, Result};

use crate::{config::Config, generate::structs::Struct};

mod structs;

// Usage:
// #[derive(DecodeSentence)]
// #[nmea(tag = "GPWPL")]
// pub struct WPL {
//     #[nmea(index(1), convert(Conversion::Latitude))]
//     pub latitude_source: Option<Angle>,
//     #[nmea(index(2))]
//     pub latitude_hemisphere: Option<String>,
//     #[nmea(derive(Derivation::latitude(1, 2)))]
//     pub latitude: Option<f64>,
//     #[nmea(ignore)]
//     pub note: String,
// }

trait Generator {
    fn name(&self) -> &Path;
    fn config(&self) -> &Config;
    fn generics(&self) -> &Generics;
    fn generate_descriptor(&self) -> TokenStream;
    fn generate_decode_body(&self) -> TokenStream;

    fn generate_decode(&self) -> TokenStream {
        let context = &self.config().context_name;
        let body = self.generate_decode_body();

        quote! {
            fn decode_with(#context: &mut nmea0183_capture::DecodeContext<'_>) -> Self {
                #body
            }
        }
    }

    fn generate_impl(&self) -> TokenStream {
        let name = self.name();
        let descriptor = self.generate_descriptor();
        let decode = self.generate_decode();
        let (impl_generics, ty_generics, where_clause) = self.generics().split_for_impl();

        quote! {
            impl #impl_generics nmea0183_capture::DecodeSentence for #name #ty_generics #where_clause {
                const DESCRIPTOR: nmea0183_capture::SentenceTypeDescriptor = #descriptor;

                #decode
            }
        }
    }
}

pub fn generate_decode_sentence_impl(input: &DeriveInput) -> Result<TokenStream> {
    let generator: Box<dyn Generator> = match &input.data {
        Data::Struct(datastruct) => {
            let name = &input.ident;
            let attributes = &input.attrs;
            let generics = &input.generics;

            Box::new(Struct::from_datastruct(
                name, datastruct, attributes, generics,
            )?)
        }
        Data::Enum(_) => {
            return Err(Error::new(
                input.ident.span(),
                "nmea0183-capture-derive: Enums not supported; sentence types are structs",
            ));
        }
        Data::Union(_) => {
            return Err(Error::new(
                input.ident.span(),
                "nmea0183-capture-derive: Unions not supported",
            ));
        }
    };

    Ok(generator.generate_impl())
}
