use crate::error::{Error, Result};
use definitions::{CDataType, Desc, Len, Pointer, ULen, USmallInt};
use std::collections::HashMap;

/// Which of the four descriptor kinds a record belongs to; field legality
/// differs by kind (application vs implementation, row vs parameter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DescKind {
    /// Application Row Descriptor -- bound result-set columns.
    Ard,
    /// Application Parameter Descriptor -- bound statement parameters.
    Apd,
    /// Implementation Row Descriptor -- server-reported column metadata.
    Ird,
    /// Implementation Parameter Descriptor -- server-reported parameter metadata.
    Ipd,
}

/// Read/write legality of a descriptor field for a given descriptor kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAccess {
    ReadWrite,
    ReadOnly,
    Forbidden,
}

/// Static legality table keyed by (descriptor kind, field id), per the CLI
/// standard's descriptor record field tables. Only the fields this driver's
/// conversion engine actually touches are listed; anything absent is
/// `Forbidden`.
fn field_access(kind: DescKind, field: Desc) -> FieldAccess {
    use Desc::*;
    use DescKind::*;
    use FieldAccess::*;
    match (kind, field) {
        (_, SQL_DESC_COUNT) => ReadWrite,
        (Ard | Apd, SQL_DESC_DATA_PTR) => ReadWrite,
        (Ird | Ipd, SQL_DESC_DATA_PTR) => Forbidden,
        (Ard | Apd, SQL_DESC_INDICATOR_PTR) => ReadWrite,
        (Ard | Apd, SQL_DESC_OCTET_LENGTH_PTR) => ReadWrite,
        (Ard | Apd, SQL_DESC_CONCISE_TYPE) => ReadWrite,
        (Ird | Ipd, SQL_DESC_CONCISE_TYPE) => ReadOnly,
        (Ard | Apd, SQL_DESC_TYPE) => ReadWrite,
        (Ird | Ipd, SQL_DESC_TYPE) => ReadOnly,
        (Ard | Apd, SQL_DESC_LENGTH) => ReadWrite,
        (Ird | Ipd, SQL_DESC_LENGTH) => ReadOnly,
        (Ard | Apd, SQL_DESC_PRECISION) => ReadWrite,
        (Ird | Ipd, SQL_DESC_PRECISION) => ReadOnly,
        (Ard | Apd, SQL_DESC_SCALE) => ReadWrite,
        (Ird | Ipd, SQL_DESC_SCALE) => ReadOnly,
        (Ard | Apd, SQL_DESC_DATETIME_INTERVAL_CODE) => ReadWrite,
        (Ird | Ipd, SQL_DESC_DATETIME_INTERVAL_CODE) => ReadOnly,
        (Ard | Apd, SQL_DESC_OCTET_LENGTH) => ReadWrite,
        (Ird | Ipd, SQL_DESC_OCTET_LENGTH) => ReadOnly,
        (_, SQL_DESC_NAME) => ReadOnly,
        (_, SQL_DESC_NULLABLE) => ReadOnly,
        (_, SQL_DESC_UNNAMED) => ReadOnly,
        (Ard, SQL_DESC_BIND_OFFSET_PTR) => ReadWrite,
        (Ard | Apd, SQL_DESC_BIND_TYPE) => ReadWrite,
        (Ard | Apd, SQL_DESC_ARRAY_SIZE) => ReadWrite,
        (Ard | Apd, SQL_DESC_ARRAY_STATUS_PTR) => ReadWrite,
        (Ird, SQL_DESC_ARRAY_STATUS_PTR) => ReadWrite,
        (Ird | Ipd, SQL_DESC_ROWS_PROCESSED_PTR) => ReadWrite,
        (_, SQL_DESC_ALLOC_TYPE) => ReadOnly,
        (Apd, SQL_DESC_PARAMETER_TYPE) => ReadWrite,
        (_, SQL_DESC_CASE_SENSITIVE) => ReadOnly,
        (_, SQL_DESC_SEARCHABLE) => ReadOnly,
        (_, SQL_DESC_UNSIGNED) => ReadOnly,
        (_, SQL_DESC_FIXED_PREC_SCALE) => ReadOnly,
        (_, SQL_DESC_DISPLAY_SIZE) => ReadOnly,
        (_, SQL_DESC_TYPE_NAME) => ReadOnly,
        (_, SQL_DESC_TABLE_NAME | SQL_DESC_BASE_TABLE_NAME | SQL_DESC_BASE_COLUMN_NAME
        | SQL_DESC_SCHEMA_NAME | SQL_DESC_CATALOG_NAME | SQL_DESC_LABEL
        | SQL_DESC_LITERAL_PREFIX | SQL_DESC_LITERAL_SUFFIX | SQL_DESC_LOCAL_TYPE_NAME
        | SQL_DESC_NUM_PREC_RADIX | SQL_DESC_AUTO_UNIQUE_VALUE | SQL_DESC_UPDATABLE
        | SQL_DESC_MAXIMUM_SCALE | SQL_DESC_MINIMUM_SCALE
        | SQL_DESC_DATETIME_INTERVAL_PRECISION) => ReadOnly,
        _ => Forbidden,
    }
}

/// Concrete value a descriptor field holds. Numeric fields are widened to
/// `i64` uniformly; pointer fields retain their raw address.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Numeric(i64),
    Str(String),
    Ptr(Pointer),
    Len(Len),
    None,
}

/// One descriptor record: either the row 0 "bookmark" pseudo-record or a
/// 1-based column/parameter record. Field storage is sparse; unset fields
/// fall back to the type registry's defaults through `concise_type`.
#[derive(Debug, Clone, Default)]
pub struct DescRecord {
    fields: HashMap<u16, FieldValue>,
}

impl DescRecord {
    pub fn get(&self, field: Desc) -> Option<&FieldValue> {
        self.fields.get(&(field as u16))
    }

    fn set(&mut self, field: Desc, value: FieldValue) {
        self.fields.insert(field as u16, value);
    }

    /// `SQL_DESC_CONCISE_TYPE`, defaulting to `SQL_C_DEFAULT`/`SQL_UNKNOWN_TYPE`
    /// equivalents when the application never bound one explicitly.
    pub fn concise_type(&self) -> Option<i64> {
        match self.get(Desc::SQL_DESC_CONCISE_TYPE) {
            Some(FieldValue::Numeric(n)) => Some(*n),
            _ => None,
        }
    }

    pub fn data_ptr(&self) -> Option<Pointer> {
        match self.get(Desc::SQL_DESC_DATA_PTR) {
            Some(FieldValue::Ptr(p)) => Some(*p),
            _ => None,
        }
    }

    pub fn octet_length(&self) -> Option<Len> {
        match self.get(Desc::SQL_DESC_OCTET_LENGTH) {
            Some(FieldValue::Len(l)) => Some(*l),
            Some(FieldValue::Numeric(n)) => Some(*n as Len),
            _ => None,
        }
    }
}

/// A full descriptor -- the fixed header (`SQL_DESC_COUNT`, bind type, array
/// size, ...) plus a sparse set of per-record bindings.
#[derive(Debug, Clone)]
pub struct Descriptor {
    pub kind: DescKind,
    pub count: USmallInt,
    pub array_size: ULen,
    pub bind_type: ULen,
    pub bind_offset_ptr: Option<*const Len>,
    pub rows_processed_ptr: Option<*mut ULen>,
    pub array_status_ptr: Option<*mut USmallInt>,
    records: HashMap<u16, DescRecord>,
}

impl Descriptor {
    pub fn new(kind: DescKind) -> Self {
        Self {
            kind,
            count: 0,
            array_size: 1,
            bind_type: 0, // SQL_BIND_BY_COLUMN
            bind_offset_ptr: None,
            rows_processed_ptr: None,
            array_status_ptr: None,
            records: HashMap::new(),
        }
    }

    pub fn record(&self, index: u16) -> Option<&DescRecord> {
        self.records.get(&index)
    }

    pub fn record_mut(&mut self, index: u16) -> &mut DescRecord {
        self.records.entry(index).or_default()
    }

    /// Sets a field on `index`, enforcing the static legality table and the
    /// `SQL_DESC_DATA_PTR` consistency rule (clearing it unsets the binding
    /// rather than leaving stale length/indicator pointers behind).
    pub fn set_field(&mut self, index: u16, field: Desc, value: FieldValue) -> Result<()> {
        match field_access(self.kind, field) {
            FieldAccess::Forbidden => {
                return Err(Error::InvalidDescriptorFieldId(format!(
                    "{field:?} is not a legal field on this descriptor"
                )))
            }
            FieldAccess::ReadOnly => {
                return Err(Error::InvalidDescriptorFieldId(format!(
                    "{field:?} is read-only on this descriptor"
                )))
            }
            FieldAccess::ReadWrite => {}
        }
        if field == Desc::SQL_DESC_COUNT {
            if let FieldValue::Numeric(n) = value {
                self.count = n.max(0) as USmallInt;
            }
            return Ok(());
        }
        let rec = self.record_mut(index);
        if field == Desc::SQL_DESC_DATA_PTR {
            if matches!(value, FieldValue::Ptr(p) if p.is_null()) {
                rec.fields.remove(&(Desc::SQL_DESC_INDICATOR_PTR as u16));
                rec.fields.remove(&(Desc::SQL_DESC_OCTET_LENGTH_PTR as u16));
            }
        }
        rec.set(field, value);
        Ok(())
    }

    /// Computes `address(rec, row_index)` per the deferred-address formula:
    /// `data_ptr + (bind_offset_ptr ? *bind_offset_ptr : 0) + row_index *
    /// (bind_type == 0 ? octet_length : bind_type)`.
    ///
    /// # Safety
    /// `bind_offset_ptr` must point to a valid, live `Len` for the duration
    /// of this call if it is set.
    pub unsafe fn deferred_address(&self, index: u16, row_index: usize) -> Result<Pointer> {
        let rec = self
            .record(index)
            .ok_or(Error::InvalidDescriptorIndex(index))?;
        let base = rec
            .data_ptr()
            .ok_or_else(|| Error::NullPointer(format!("record {index} has no SQL_DESC_DATA_PTR")))?;
        if base.is_null() {
            return Err(Error::NullPointer(format!(
                "record {index} SQL_DESC_DATA_PTR is null"
            )));
        }
        let offset = match self.bind_offset_ptr {
            Some(p) if !p.is_null() => *p,
            _ => 0,
        };
        let stride = if self.bind_type == 0 {
            rec.octet_length().unwrap_or(0)
        } else {
            self.bind_type as Len
        };
        let addr = (base as isize) + offset + (row_index as isize) * stride;
        Ok(addr as Pointer)
    }
}

/// Derives the default `SQL_C_*` concise type for a bound record whose
/// application left `SQL_DESC_CONCISE_TYPE` as `SQL_C_DEFAULT`, by looking up
/// the SQL type's registry default.
pub fn resolve_default_c_type(
    sql_type_code: i16,
    registry: &crate::registry::TypeRegistry,
) -> CDataType {
    registry
        .by_code(sql_type_code)
        .map(|d| d.c_concise_default)
        .unwrap_or(CDataType::SQL_C_CHAR)
}
