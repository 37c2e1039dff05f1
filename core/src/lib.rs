#![allow(dead_code)]
mod conn;
pub use conn::{Connection, ConnectionConfig};

pub mod error;
pub use error::{Error, Result};
pub mod registry;
pub use registry::{DatetimeIntervalCode, IntervalSqlType, MetaType, SqlTypeDescriptor, TypeRegistry};
pub mod compat;
pub mod desc;
pub use desc::{DescKind, Descriptor};
pub mod value;
pub use value::SqlValue;
pub mod convert_to_c;
pub mod convert_to_sql;
pub mod datetime;
pub mod interval;
pub mod wire;
pub use wire::{Packing, RequestEnvelope, ResponseEnvelope};
pub mod cursor;
pub use cursor::{ResultSetCursor, Transport};
pub mod catalog;
pub mod escape;
