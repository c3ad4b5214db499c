use crate::error;
use crate::primitives::{DimensionFlags, Extent, Period, STBox, SpatialExtent, TBox, TimeInstance};
use crate::util::Result;
use bytes::{Buf, BufMut, Bytes, BytesMut};
use snafu::ensure;

const LOWER_INCLUSIVE: u8 = 0x01;
const UPPER_INCLUSIVE: u8 = 0x02;

/// Fixed-size big-endian binary layout.
///
/// Fields are written in the dimension order of the text format (`x`, `y`, `z`, `t`),
/// all minima before all maxima, followed by a flag byte. Absent dimensions are
/// written as zeros.
pub trait BinaryCodec: Sized {
    /// The number of bytes of the encoded value.
    const SIZE: usize;

    const TYPE_NAME: &'static str;

    fn write_to<B: BufMut>(&self, buf: &mut B);

    /// Reads a value from exactly [`Self::SIZE`] bytes.
    fn read_from(buf: &mut &[u8]) -> Result<Self>;

    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(Self::SIZE);
        self.write_to(&mut buf);
        buf.freeze()
    }

    /// # Errors
    ///
    /// Fails if the length does not match, the flag byte is invalid or the
    /// decoded fields violate the invariants of the type.
    ///
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == Self::SIZE,
            error::InvalidBinaryLayout {
                type_name: Self::TYPE_NAME,
                expected: Self::SIZE,
                found: bytes.len(),
            }
        );
        let mut buf = bytes;
        Self::read_from(&mut buf).inspect_err(|error| {
            tracing::debug!(type_name = Self::TYPE_NAME, %error, "rejected binary input");
        })
    }
}

fn read_flags(buf: &mut &[u8]) -> Result<DimensionFlags> {
    DimensionFlags::from_bits(buf.get_u8())
}

fn time_extent(min: i64, max: i64) -> Result<Extent<TimeInstance>> {
    Ok(Extent::new(
        TimeInstance::from_micros(min)?,
        TimeInstance::from_micros(max)?,
    ))
}

fn extent_or_zero<T: Default>(extent: Option<Extent<T>>) -> (T, T)
where
    T: PartialOrd + Copy,
{
    extent.map_or_else(|| (T::default(), T::default()), |e| (e.min(), e.max()))
}

impl BinaryCodec for Period {
    const SIZE: usize = 17;
    const TYPE_NAME: &'static str = "period";

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        let mut flags = 0;
        if self.lower_inclusive() {
            flags |= LOWER_INCLUSIVE;
        }
        if self.upper_inclusive() {
            flags |= UPPER_INCLUSIVE;
        }

        buf.put_i64(self.lower().inner());
        buf.put_i64(self.upper().inner());
        buf.put_u8(flags);
    }

    fn read_from(buf: &mut &[u8]) -> Result<Self> {
        let lower = buf.get_i64();
        let upper = buf.get_i64();
        let flags = buf.get_u8();

        ensure!(
            flags & !(LOWER_INCLUSIVE | UPPER_INCLUSIVE) == 0,
            error::InvalidArgument {
                details: format!("unknown period flags {flags:#04x}")
            }
        );

        Period::new(
            TimeInstance::from_micros(lower)?,
            TimeInstance::from_micros(upper)?,
            flags & LOWER_INCLUSIVE != 0,
            flags & UPPER_INCLUSIVE != 0,
        )
    }
}

impl BinaryCodec for TBox {
    const SIZE: usize = 33;
    const TYPE_NAME: &'static str = "tbox";

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        let (xmin, xmax) = extent_or_zero(self.value());
        let (tmin, tmax) = self
            .time()
            .map_or((0, 0), |t| (t.min().inner(), t.max().inner()));

        buf.put_f64(xmin);
        buf.put_i64(tmin);
        buf.put_f64(xmax);
        buf.put_i64(tmax);
        buf.put_u8(self.flags().bits());
    }

    fn read_from(buf: &mut &[u8]) -> Result<Self> {
        let xmin = buf.get_f64();
        let tmin = buf.get_i64();
        let xmax = buf.get_f64();
        let tmax = buf.get_i64();
        let flags = read_flags(buf)?;

        ensure!(
            !flags.has_z && !flags.geodetic,
            error::InvalidArgument {
                details: "a TBOX has neither a Z dimension nor a geodetic interpretation"
            }
        );

        let value = flags.has_x.then(|| Extent::new(xmin, xmax));
        let time = if flags.has_t {
            Some(time_extent(tmin, tmax)?)
        } else {
            None
        };
        TBox::new(value, time)
    }
}

impl BinaryCodec for STBox {
    const SIZE: usize = 69;
    const TYPE_NAME: &'static str = "stbox";

    fn write_to<B: BufMut>(&self, buf: &mut B) {
        let space = self.space();
        let (xmin, xmax) = extent_or_zero(space.map(|s| s.x()));
        let (ymin, ymax) = extent_or_zero(space.map(|s| s.y()));
        let (zmin, zmax) = extent_or_zero(space.and_then(|s| s.z()));
        let (tmin, tmax) = self
            .time()
            .map_or((0, 0), |t| (t.min().inner(), t.max().inner()));

        buf.put_f64(xmin);
        buf.put_f64(ymin);
        buf.put_f64(zmin);
        buf.put_i64(tmin);
        buf.put_f64(xmax);
        buf.put_f64(ymax);
        buf.put_f64(zmax);
        buf.put_i64(tmax);
        buf.put_i32(self.srid());
        buf.put_u8(self.flags().bits());
    }

    fn read_from(buf: &mut &[u8]) -> Result<Self> {
        let xmin = buf.get_f64();
        let ymin = buf.get_f64();
        let zmin = buf.get_f64();
        let tmin = buf.get_i64();
        let xmax = buf.get_f64();
        let ymax = buf.get_f64();
        let zmax = buf.get_f64();
        let tmax = buf.get_i64();
        let srid = buf.get_i32();
        let flags = read_flags(buf)?;

        ensure!(
            flags.has_x || !flags.has_z,
            error::InvalidArgument {
                details: "an STBOX can only have a Z dimension together with X"
            }
        );

        let space = flags.has_x.then(|| {
            let (x, y) = (Extent::new(xmin, xmax), Extent::new(ymin, ymax));
            if flags.has_z {
                SpatialExtent::new_3d(x, y, Extent::new(zmin, zmax))
            } else {
                SpatialExtent::new_2d(x, y)
            }
        });
        let time = if flags.has_t {
            Some(time_extent(tmin, tmax)?)
        } else {
            None
        };
        STBox::new(space, time, srid, flags.geodetic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn period_layout() {
        let period = Period::new(1, 258, true, false).unwrap();
        let bytes = period.to_bytes();

        assert_eq!(
            bytes.as_ref(),
            &[0, 0, 0, 0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 1, 2, LOWER_INCLUSIVE]
        );
        assert_eq!(Period::from_bytes(&bytes).unwrap(), period);
    }

    #[test]
    fn tbox_layout() {
        let tbox: TBox = "TBOX((1.5,),(2,))".parse().unwrap();
        let bytes = tbox.to_bytes();

        assert_eq!(bytes.len(), TBox::SIZE);
        assert_eq!(&bytes[..8], &1.5_f64.to_be_bytes());
        assert_eq!(&bytes[8..16], &[0; 8]);
        assert_eq!(bytes[32], DimensionFlags::X);
        assert_eq!(TBox::from_bytes(&bytes).unwrap(), tbox);
    }

    #[test]
    fn stbox_layout() {
        let stbox: STBox = "SRID=4326;GEODSTBOX ZT((1,2,3,2020-01-01),(4,5,6,2020-01-02))"
            .parse()
            .unwrap();
        let bytes = stbox.to_bytes();

        assert_eq!(bytes.len(), STBox::SIZE);
        assert_eq!(&bytes[16..24], &3.0_f64.to_be_bytes());
        assert_eq!(&bytes[64..68], &4326_i32.to_be_bytes());
        assert_eq!(
            bytes[68],
            DimensionFlags::X | DimensionFlags::Z | DimensionFlags::T | DimensionFlags::GEODETIC
        );
        assert_eq!(STBox::from_bytes(&bytes).unwrap(), stbox);

        let time_only: STBox = "STBOX T((,,2020-01-01),(,,2020-01-02))".parse().unwrap();
        assert_eq!(STBox::from_bytes(&time_only.to_bytes()).unwrap(), time_only);
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            Period::from_bytes(&[0; 16]),
            Err(Error::InvalidBinaryLayout {
                type_name: "period",
                expected: 17,
                found: 16
            })
        ));
        assert!(TBox::from_bytes(&[]).is_err());
    }

    #[test]
    fn validates_content() {
        let mut bytes = Period::new(0, 0, true, true).unwrap().to_bytes().to_vec();
        bytes[16] = LOWER_INCLUSIVE;
        assert!(matches!(
            Period::from_bytes(&bytes),
            Err(Error::EmptyInterval { .. })
        ));
        bytes[16] = 0x04;
        assert!(Period::from_bytes(&bytes).is_err());

        let mut bytes = TBox::from_value(1.0).unwrap().to_bytes().to_vec();
        bytes[32] = 0;
        assert!(TBox::from_bytes(&bytes).is_err());
        bytes[32] = DimensionFlags::X | DimensionFlags::Z;
        assert!(TBox::from_bytes(&bytes).is_err());

        let mut bytes = STBox::from_timestamp(TimeInstance::from_micros(0).unwrap())
            .to_bytes()
            .to_vec();
        bytes[68] |= DimensionFlags::Z;
        assert!(STBox::from_bytes(&bytes).is_err());
        bytes[68] = 0x80;
        assert!(STBox::from_bytes(&bytes).is_err());

        let mut bytes = TBox::from_value(1.0).unwrap().to_bytes().to_vec();
        bytes[..8].copy_from_slice(&f64::NAN.to_be_bytes());
        assert!(TBox::from_bytes(&bytes).is_err());
    }
}
