use crate::error::{self, Result};
use chronobox_datatypes::codec::{BinaryCodec, IsoTimestampFormat, TextCodec};
use chronobox_datatypes::primitives::{Period, STBox, TBox};

/// The kinds of values the command line accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ValueKind {
    #[strum(serialize = "period")]
    Period,
    #[strum(serialize = "TBOX")]
    TBox,
    #[strum(serialize = "STBOX")]
    STBox,
}

/// A period or a box, recognized by its text prefix or its binary length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Period(Period),
    TBox(TBox),
    STBox(STBox),
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
}

impl Value {
    pub fn parse(text: &str, format: &IsoTimestampFormat) -> Result<Self> {
        let trimmed = text.trim_start();

        let value = if trimmed.starts_with(['[', '(']) {
            Self::Period(Period::parse_with(text, format)?)
        } else if starts_with_keyword(trimmed, "TBOX") {
            Self::TBox(TBox::parse_with(text, format)?)
        } else if ["STBOX", "GEODSTBOX", "SRID"]
            .iter()
            .any(|keyword| starts_with_keyword(trimmed, keyword))
        {
            Self::STBox(STBox::parse_with(text, format)?)
        } else {
            return error::UnknownValue { input: text }.fail();
        };

        Ok(value)
    }

    /// Decodes the binary layout whose length matches the input.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let value = match bytes.len() {
            Period::SIZE => Self::Period(Period::from_bytes(bytes)?),
            TBox::SIZE => Self::TBox(TBox::from_bytes(bytes)?),
            STBox::SIZE => Self::STBox(STBox::from_bytes(bytes)?),
            length => return error::UnknownBinaryLength { length }.fail(),
        };
        Ok(value)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Period(_) => ValueKind::Period,
            Self::TBox(_) => ValueKind::TBox,
            Self::STBox(_) => ValueKind::STBox,
        }
    }

    pub fn to_text(&self, format: &IsoTimestampFormat) -> String {
        match self {
            Self::Period(period) => period.to_text_with(format),
            Self::TBox(tbox) => tbox.to_text_with(format),
            Self::STBox(stbox) => stbox.to_text_with(format),
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            Self::Period(period) => period.to_bytes().to_vec(),
            Self::TBox(tbox) => tbox.to_bytes().to_vec(),
            Self::STBox(stbox) => stbox.to_bytes().to_vec(),
        }
    }
}

/// Two values of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValuePair {
    Period(Period, Period),
    TBox(TBox, TBox),
    STBox(STBox, STBox),
}

impl ValuePair {
    pub fn new(left: Value, right: Value) -> Result<Self> {
        match (left, right) {
            (Value::Period(left), Value::Period(right)) => Ok(Self::Period(left, right)),
            (Value::TBox(left), Value::TBox(right)) => Ok(Self::TBox(left, right)),
            (Value::STBox(left), Value::STBox(right)) => Ok(Self::STBox(left, right)),
            (left, right) => error::KindMismatch {
                left: left.kind(),
                right: right.kind(),
            }
            .fail(),
        }
    }

    pub fn parse(left: &str, right: &str, format: &IsoTimestampFormat) -> Result<Self> {
        Self::new(Value::parse(left, format)?, Value::parse(right, format)?)
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Period(..) => ValueKind::Period,
            Self::TBox(..) => ValueKind::TBox,
            Self::STBox(..) => ValueKind::STBox,
        }
    }
}
