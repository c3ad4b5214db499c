use crate::commands::Predicate;
use crate::value::ValueKind;
use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("{}", source))]
    Datatypes {
        source: chronobox_datatypes::error::Error,
    },

    #[snafu(display("Invalid configuration: {}", source))]
    Config { source: config::ConfigError },

    ConfigLockFailed,

    #[snafu(display("Invalid log spec \"{}\": {}", log_spec, source))]
    LogSpec {
        log_spec: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[snafu(display("Unable to read standard input: {}", source))]
    Stdin { source: std::io::Error },

    #[snafu(display("Invalid base64 input: {}", source))]
    Base64 { source: base64::DecodeError },

    #[snafu(display("\"{}\" is neither a period nor a box", input))]
    UnknownValue { input: String },

    #[snafu(display("{} bytes do not encode a period or a box", length))]
    UnknownBinaryLength { length: usize },

    #[snafu(display("Cannot combine a {} with a {}", left, right))]
    KindMismatch { left: ValueKind, right: ValueKind },

    #[snafu(display("{} is not defined for a {}", predicate, kind))]
    UnsupportedPredicate {
        predicate: Predicate,
        kind: ValueKind,
    },
}

impl From<chronobox_datatypes::error::Error> for Error {
    fn from(source: chronobox_datatypes::error::Error) -> Self {
        Self::Datatypes { source }
    }
}
