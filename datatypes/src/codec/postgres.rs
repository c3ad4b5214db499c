use super::BinaryCodec;
use crate::primitives::{Period, STBox, TBox};
use bytes::BytesMut;
use postgres_types::{FromSql, IsNull, ToSql, Type, to_sql_checked};
use std::error::Error;

/// Binds a type to the database type `$name` using its binary layout.
macro_rules! impl_postgres_binary {
    ($type:ty, $name:literal) => {
        impl ToSql for $type {
            fn to_sql(
                &self,
                _ty: &Type,
                out: &mut BytesMut,
            ) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
                self.write_to(out);
                Ok(IsNull::No)
            }

            fn accepts(ty: &Type) -> bool {
                ty.name() == $name
            }

            to_sql_checked!();
        }

        impl<'a> FromSql<'a> for $type {
            fn from_sql(_ty: &Type, raw: &'a [u8]) -> Result<Self, Box<dyn Error + Sync + Send>> {
                Ok(Self::from_bytes(raw)?)
            }

            fn accepts(ty: &Type) -> bool {
                ty.name() == $name
            }
        }
    };
}

impl_postgres_binary!(Period, "period");
impl_postgres_binary!(TBox, "tbox");
impl_postgres_binary!(STBox, "stbox");
