use crate::record::RecordDescriptor;
use crate::value::{Kind, Mapping, Value};

/// Core trait for field types that can be read from and written to a
/// document value.
pub trait Codec: Sized {
    /// The kind a document value is coerced to before conversion.
    ///
    /// Reported for each bound field by [`crate::FieldInfo::kind`].
    const KIND: Kind;

    /// Converts a non-null document value into this type.
    ///
    /// Implementations coerce through [`crate::coerce`] where the value's kind
    /// differs from [`Codec::KIND`], and fail rather than guess when it
    /// cannot be converted.
    fn decode_value(value: &Value) -> crate::CoerceResult<Self>;

    /// Converts this value into a document value.
    fn encode_value(&self) -> Value;
}

/// A typed record whose fields are described by a static [`RecordDescriptor`].
///
/// Decoding starts from `Default::default()` and then assigns every described
/// field, so the `Default` impl only needs to produce some value of the type.
pub trait Record: Default + Sized + 'static {
    /// The record's field table, built once and shared by every call.
    fn descriptor() -> &'static RecordDescriptor<Self>;

    /// Builds a record entirely from its field defaults.
    fn from_defaults() -> Self {
        Self::descriptor().decode_mapping(&Mapping::new())
    }
}
