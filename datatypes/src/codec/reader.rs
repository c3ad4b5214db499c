use super::TimestampFormat;
use crate::error::Error;
use crate::primitives::TimeInstance;
use crate::util::Result;

/// A cursor over the text of a single value that reports errors with their byte position.
pub(crate) struct Reader<'a> {
    input: &'a str,
    position: usize,
}

/// Characters that end a field.
const DELIMITERS: [char; 5] = [',', ')', ']', ';', '('];

impl<'a> Reader<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    pub fn error(&self, reason: impl Into<String>) -> Error {
        self.error_at(self.position, reason)
    }

    fn error_at(&self, position: usize, reason: impl Into<String>) -> Error {
        Error::ParseError {
            input: self.input.to_string(),
            position,
            reason: reason.into(),
        }
    }

    pub fn skip_whitespace(&mut self) {
        let rest = self.rest();
        self.position += rest.len() - rest.trim_start().len();
    }

    /// The next non-whitespace character without consuming it.
    pub fn peek(&mut self) -> Option<char> {
        self.skip_whitespace();
        self.rest().chars().next()
    }

    /// Consumes `expected` if it is the next non-whitespace character.
    pub fn consume(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.position += expected.len_utf8();
            true
        } else {
            false
        }
    }

    pub fn expect(&mut self, expected: char) -> Result<()> {
        if self.consume(expected) {
            Ok(())
        } else {
            let found = self
                .peek()
                .map_or_else(|| "end of input".to_string(), |c| format!("'{c}'"));
            Err(self.error(format!("expected '{expected}', found {found}")))
        }
    }

    /// Consumes `keyword` (ASCII case-insensitive) if the input continues with it.
    pub fn consume_keyword(&mut self, keyword: &str) -> bool {
        self.skip_whitespace();
        let matches = self
            .rest()
            .get(..keyword.len())
            .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword));
        if matches {
            self.position += keyword.len();
        }
        matches
    }

    pub fn expect_keyword(&mut self, keyword: &str) -> Result<()> {
        if self.consume_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(format!("expected {keyword}")))
        }
    }

    pub fn expect_end(&mut self) -> Result<()> {
        self.skip_whitespace();
        if self.rest().is_empty() {
            Ok(())
        } else {
            Err(self.error("unexpected trailing characters"))
        }
    }

    /// The trimmed text up to the next delimiter and the position it starts at.
    ///
    /// Returns an empty field if a delimiter follows immediately.
    fn field(&mut self) -> (usize, &'a str) {
        self.skip_whitespace();
        let start = self.position;
        let rest = self.rest();
        let length = rest.find(DELIMITERS).unwrap_or(rest.len());
        self.position += length;
        (start, rest[..length].trim_end())
    }

    /// A float field, `None` if the field is blank.
    pub fn optional_float(&mut self) -> Result<Option<f64>> {
        let (start, field) = self.field();
        if field.is_empty() {
            return Ok(None);
        }
        match field.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            Ok(_) => Err(self.error_at(start, format!("\"{field}\" is not a finite number"))),
            Err(_) => Err(self.error_at(start, format!("\"{field}\" is not a number"))),
        }
    }

    pub fn float(&mut self) -> Result<f64> {
        let position = self.position;
        self.optional_float()?
            .ok_or_else(|| self.error_at(position, "missing coordinate"))
    }

    pub fn integer(&mut self) -> Result<i32> {
        let (start, field) = self.field();
        field
            .parse()
            .map_err(|_| self.error_at(start, format!("\"{field}\" is not a valid integer")))
    }

    /// A timestamp field, `None` if the field is blank.
    pub fn optional_timestamp<F>(&mut self, format: &F) -> Result<Option<TimeInstance>>
    where
        F: TimestampFormat + ?Sized,
    {
        let (start, field) = self.field();
        if field.is_empty() {
            return Ok(None);
        }
        format
            .parse_timestamp(field)
            .map(Some)
            .map_err(|error| self.error_at(start, error.to_string()))
    }

    pub fn timestamp<F>(&mut self, format: &F) -> Result<TimeInstance>
    where
        F: TimestampFormat + ?Sized,
    {
        let position = self.position;
        self.optional_timestamp(format)?
            .ok_or_else(|| self.error_at(position, "missing timestamp"))
    }
}
