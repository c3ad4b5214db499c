use crate::error::{self, Result};
use crate::value::Value;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chronobox_datatypes::codec::IsoTimestampFormat;
use clap::{Parser, Subcommand};
use snafu::ResultExt;

/// Converts between the text form and the base64 encoded binary layout
#[derive(Debug, Parser)]
pub struct Binary {
    #[command(subcommand)]
    direction: Direction,
}

#[derive(Debug, Subcommand)]
enum Direction {
    /// Encodes a period or a box
    Encode { value: String },
    /// Decodes a period or a box, its kind is inferred from the length
    Decode { data: String },
}

pub fn binary(params: Binary, format: &IsoTimestampFormat) -> Result<String> {
    match params.direction {
        Direction::Encode { value } => {
            let value = Value::parse(&value, format)?;
            Ok(STANDARD.encode(value.to_bytes()))
        }
        Direction::Decode { data } => {
            let bytes = STANDARD.decode(data.trim()).context(error::Base64)?;
            Ok(Value::from_bytes(&bytes)?.to_text(format))
        }
    }
}
