use crate::error::Result;
use crate::value::{Value, ValuePair};
use chronobox_datatypes::codec::IsoTimestampFormat;
use chronobox_datatypes::operations::BoxTopology;
use clap::Parser;

/// Printed when two values do not intersect.
pub const EMPTY: &str = "empty";

/// Two periods or two boxes of the same kind
#[derive(Debug, Parser)]
pub struct BoxPair {
    left: String,
    right: String,
}

impl BoxPair {
    fn parse(&self, format: &IsoTimestampFormat) -> Result<ValuePair> {
        ValuePair::parse(&self.left, &self.right, format)
    }
}

pub fn intersect(params: BoxPair, format: &IsoTimestampFormat) -> Result<String> {
    let intersection = match params.parse(format)? {
        ValuePair::Period(left, right) => left.intersection(&right).map(Value::Period),
        ValuePair::TBox(left, right) => left.intersection(&right)?.map(Value::TBox),
        ValuePair::STBox(left, right) => left.intersection(&right)?.map(Value::STBox),
    };

    Ok(intersection.map_or_else(|| EMPTY.to_string(), |value| value.to_text(format)))
}

pub fn union(params: BoxPair, format: &IsoTimestampFormat) -> Result<String> {
    let union = match params.parse(format)? {
        ValuePair::Period(left, right) => Value::Period(left.union(&right)?),
        ValuePair::TBox(left, right) => Value::TBox(left.union(&right)?),
        ValuePair::STBox(left, right) => Value::STBox(left.union(&right)?),
    };

    Ok(union.to_text(format))
}
