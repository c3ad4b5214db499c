use super::number::format_float;
use super::reader::Reader;
use super::{IsoTimestampFormat, TimestampFormat};
use crate::error::Error;
use crate::primitives::{Extent, Period, STBox, SpatialExtent, TBox, TimeInstance};
use crate::util::Result;
use serde::de::Visitor;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::Formatter;
use std::marker::PhantomData;
use std::str::FromStr;

/// Canonical text representation with an exchangeable timestamp format.
///
/// `Display` and `FromStr` use the [`IsoTimestampFormat`] in UTC.
pub trait TextCodec: Sized {
    fn to_text_with<F>(&self, format: &F) -> String
    where
        F: TimestampFormat + ?Sized;

    /// # Errors
    ///
    /// Fails with a `ParseError` pointing at the offending position or with the
    /// constructor error of the parsed value.
    ///
    fn parse_with<F>(text: &str, format: &F) -> Result<Self>
    where
        F: TimestampFormat + ?Sized;
}

impl TextCodec for Period {
    fn to_text_with<F>(&self, format: &F) -> String
    where
        F: TimestampFormat + ?Sized,
    {
        format!(
            "{}{}, {}{}",
            if self.lower_inclusive() { '[' } else { '(' },
            format.format_timestamp(self.lower()),
            format.format_timestamp(self.upper()),
            if self.upper_inclusive() { ']' } else { ')' },
        )
    }

    fn parse_with<F>(text: &str, format: &F) -> Result<Self>
    where
        F: TimestampFormat + ?Sized,
    {
        let mut reader = Reader::new(text);

        let lower_inclusive = match reader.peek() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err(reader.error("expected '[' or '('")),
        };
        reader.consume(if lower_inclusive { '[' } else { '(' });

        let lower = reader.timestamp(format)?;
        reader.expect(',')?;
        let upper = reader.timestamp(format)?;

        let upper_inclusive = match reader.peek() {
            Some(']') => true,
            Some(')') => false,
            _ => return Err(reader.error("expected ']' or ')'")),
        };
        reader.consume(if upper_inclusive { ']' } else { ')' });
        reader.expect_end()?;

        Period::new(lower, upper, lower_inclusive, upper_inclusive)
    }
}

fn optional_text<T, P: FnOnce(T) -> String>(value: Option<T>, print: P) -> String {
    value.map(print).unwrap_or_default()
}

impl TextCodec for TBox {
    fn to_text_with<F>(&self, format: &F) -> String
    where
        F: TimestampFormat + ?Sized,
    {
        let timestamp = |t: TimeInstance| format.format_timestamp(t);
        format!(
            "TBOX(({},{}),({},{}))",
            optional_text(self.xmin(), format_float),
            optional_text(self.tmin(), timestamp),
            optional_text(self.xmax(), format_float),
            optional_text(self.tmax(), timestamp),
        )
    }

    fn parse_with<F>(text: &str, format: &F) -> Result<Self>
    where
        F: TimestampFormat + ?Sized,
    {
        let mut reader = Reader::new(text);

        reader.expect_keyword("TBOX")?;
        reader.expect('(')?;
        let (xmin, tmin) = tbox_corner(&mut reader, format)?;
        reader.expect(',')?;
        let (xmax, tmax) = tbox_corner(&mut reader, format)?;
        reader.expect(')')?;
        reader.expect_end()?;

        let value = pair_up(&reader, xmin, xmax, "value")?;
        let time = pair_up(&reader, tmin, tmax, "time")?;
        if value.is_none() && time.is_none() {
            return Err(reader.error("a TBOX needs a value or a time dimension"));
        }
        TBox::new(value, time)
    }
}

fn tbox_corner<F>(
    reader: &mut Reader,
    format: &F,
) -> Result<(Option<f64>, Option<TimeInstance>)>
where
    F: TimestampFormat + ?Sized,
{
    reader.expect('(')?;
    let x = reader.optional_float()?;
    reader.expect(',')?;
    let t = reader.optional_timestamp(format)?;
    expect_corner_end(reader)?;
    Ok((x, t))
}

fn expect_corner_end(reader: &mut Reader) -> Result<()> {
    if reader.peek() == Some(',') {
        return Err(reader.error("too many coordinates for the declared dimensions"));
    }
    reader.expect(')')
}

/// Both corners must agree on whether a dimension is present.
fn pair_up<T: PartialOrd + Copy>(
    reader: &Reader,
    min: Option<T>,
    max: Option<T>,
    dimension: &str,
) -> Result<Option<Extent<T>>> {
    match (min, max) {
        (Some(min), Some(max)) => Ok(Some(Extent::new(min, max))),
        (None, None) => Ok(None),
        _ => Err(reader.error(format!(
            "the {dimension} dimension must be given for both corners or for none"
        ))),
    }
}

/// One corner of an `STBOX`.
struct SpatialCorner {
    xy: Option<(f64, f64)>,
    z: Option<f64>,
    t: Option<TimeInstance>,
}

impl TextCodec for STBox {
    fn to_text_with<F>(&self, format: &F) -> String
    where
        F: TimestampFormat + ?Sized,
    {
        let mut text = String::new();
        if self.srid() != 0 {
            text.push_str(&format!("SRID={};", self.srid()));
        }
        text.push_str(if self.is_geodetic() { "GEODSTBOX" } else { "STBOX" });
        text.push_str(match (self.has_z(), self.has_t()) {
            (true, true) => " ZT",
            (true, false) => " Z",
            (false, true) => " T",
            (false, false) => "",
        });

        let corner = |x: Option<f64>, y: Option<f64>, z: Option<f64>, t: Option<TimeInstance>| {
            let mut fields = vec![optional_text(x, format_float), optional_text(y, format_float)];
            if let Some(z) = z {
                fields.push(format_float(z));
            }
            if let Some(t) = t {
                fields.push(format.format_timestamp(t));
            }
            fields.join(",")
        };

        text.push_str(&format!(
            "(({}),({}))",
            corner(self.xmin(), self.ymin(), self.zmin(), self.tmin()),
            corner(self.xmax(), self.ymax(), self.zmax(), self.tmax()),
        ));
        text
    }

    fn parse_with<F>(text: &str, format: &F) -> Result<Self>
    where
        F: TimestampFormat + ?Sized,
    {
        let mut reader = Reader::new(text);

        let srid = if reader.consume_keyword("SRID=") {
            let srid = reader.integer()?;
            reader.expect(';')?;
            srid
        } else {
            0
        };

        let geodetic = if reader.consume_keyword("GEODSTBOX") {
            true
        } else {
            reader.expect_keyword("STBOX")?;
            false
        };

        let (has_z, has_t) = if reader.consume_keyword("ZT") {
            (true, true)
        } else if reader.consume_keyword("Z") {
            (true, false)
        } else if reader.consume_keyword("T") {
            (false, true)
        } else {
            (false, false)
        };

        reader.expect('(')?;
        let min = stbox_corner(&mut reader, format, has_z, has_t)?;
        reader.expect(',')?;
        let max = stbox_corner(&mut reader, format, has_z, has_t)?;
        reader.expect(')')?;
        reader.expect_end()?;

        let space = match (min.xy, max.xy) {
            (Some((x1, y1)), Some((x2, y2))) => {
                let (x, y) = (Extent::new(x1, x2), Extent::new(y1, y2));
                Some(match min.z.zip(max.z) {
                    Some((z1, z2)) => SpatialExtent::new_3d(x, y, Extent::new(z1, z2)),
                    None => SpatialExtent::new_2d(x, y),
                })
            }
            (None, None) => None,
            _ => {
                return Err(
                    reader.error("the spatial dimension must be given for both corners or for none")
                );
            }
        };
        let time = pair_up(&reader, min.t, max.t, "time")?;

        STBox::new(space, time, srid, geodetic)
    }
}

fn stbox_corner<F>(
    reader: &mut Reader,
    format: &F,
    has_z: bool,
    has_t: bool,
) -> Result<SpatialCorner>
where
    F: TimestampFormat + ?Sized,
{
    reader.expect('(')?;

    let x = reader.optional_float()?;
    reader.expect(',')?;
    let y = reader.optional_float()?;
    let xy = match (x, y) {
        (Some(x), Some(y)) => Some((x, y)),
        (None, None) if has_t && !has_z => None,
        _ => return Err(reader.error("missing x or y coordinate")),
    };

    let z = if has_z {
        reader.expect(',')?;
        Some(reader.float()?)
    } else {
        None
    };
    let t = if has_t {
        reader.expect(',')?;
        Some(reader.timestamp(format)?)
    } else {
        None
    };

    expect_corner_end(reader)?;
    Ok(SpatialCorner { xy, z, t })
}

macro_rules! impl_text_format {
    ($type:ty, $expecting:literal) => {
        impl std::fmt::Display for $type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_text_with(&IsoTimestampFormat::default()))
            }
        }

        impl FromStr for $type {
            type Err = Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse_with(s, &IsoTimestampFormat::default())
            }
        }

        impl Serialize for $type {
            fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
            where
                S: Serializer,
            {
                serializer.serialize_str(&self.to_string())
            }
        }

        impl<'de> Deserialize<'de> for $type {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(TextVisitor::<$type>::new($expecting))
            }
        }
    };
}

impl_text_format!(Period, "a period such as [2021-01-01 00:00:00+00, 2021-01-02 00:00:00+00)");
impl_text_format!(TBox, "a box such as TBOX((1,2021-01-01),(2,2021-01-02))");
impl_text_format!(STBox, "a box such as SRID=4326;STBOX T((1,2,2021-01-01),(3,4,2021-01-02))");

/// Helper struct for deserializing values from their text representation
struct TextVisitor<T> {
    expecting: &'static str,
    value: PhantomData<T>,
}

impl<T> TextVisitor<T> {
    fn new(expecting: &'static str) -> Self {
        Self {
            expecting,
            value: PhantomData,
        }
    }
}

impl<T> Visitor<'_> for TextVisitor<T>
where
    T: FromStr<Err = Error>,
{
    type Value = T;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str(self.expecting)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(serde::de::Error::custom)
    }
}
