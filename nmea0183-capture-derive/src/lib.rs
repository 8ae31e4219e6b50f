//! # A Rust procedural macro describing NMEA 0183 sentence types
//!
//! `nmea0183-capture-derive` turns an annotated struct into a sentence type for
//! [`nmea0183-capture`]: a static descriptor listing the raw fields and derived
//! attributes of the sentence, and the code decoding one from a field sequence.
//!
//! It is not meant to be used on its own; `nmea0183-capture` re-exports the macro.
//!
//! [`nmea0183-capture`]: https://crates.io/crates/nmea0183-capture

use generate::generate_decode_sentence_impl;
use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod config;
mod decoder;
mod generate;
mod meta;

#[doc = include_str!("../README.md")]
#[proc_macro_derive(DecodeSentence, attributes(nmea))]
pub fn derive_decode_sentence(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_decode_sentence_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
