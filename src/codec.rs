//! Schema-driven log codec.
//!
//! The decoder and encoder are symmetric: storage text produced with a schema
//! decodes back to the same records with that schema.

pub mod decoder;
pub mod encoder;
pub mod tokenizer;

pub use decoder::{decode, decode_blocks, decode_raw_block, DecodeOutcome, Decoder, SourceBlock};
pub use encoder::{encode_for_display, encode_for_storage, horizontal_rule, RULE_WIDTH};
pub use tokenizer::{TokenizeError, Tokenizer};
