use crate::error::Result;
use crate::value::Value;
use chronobox_datatypes::codec::IsoTimestampFormat;
use clap::Parser;

/// Parses periods and boxes and prints them in canonical form
#[derive(Debug, Parser)]
pub struct Parse {
    /// Values such as `[2021-01-01, 2021-01-02)` or `STBOX T((1,2,2021-01-01),(3,4,2021-01-02))`
    #[arg(required = true)]
    values: Vec<String>,
}

pub fn parse(params: Parse, format: &IsoTimestampFormat) -> Result<String> {
    let lines = params
        .values
        .iter()
        .map(|text| Value::parse(text, format).map(|value| value.to_text(format)))
        .collect::<Result<Vec<_>>>()?;

    Ok(lines.join("\n"))
}
