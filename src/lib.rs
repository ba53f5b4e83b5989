//! Pliant is a lenient codec for typed records stored in key-value documents.
//!
//! Every field of a record is described by a [`FieldDescriptor`]: the keys it
//! may appear under, whether it may be absent, and a default. Decoding never
//! fails because of a single field. A missing key, an unexpected null or a
//! value that cannot be coerced to the field's type resolves to the field's
//! default (or to `None` for optional fields). Only a document whose root is
//! not a mapping is rejected.
//!
//! Primitive values are coerced across kinds where the conversion is
//! unambiguous: `"233"` decodes into an integer field, `2` into a string field
//! and `"1"` or `"true"` into a boolean field.
//!
//! # Examples
//!
//! ```
//! use std::sync::LazyLock;
//!
//! use pliant::{FieldDescriptor, Record, RecordDescriptor};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Account {
//!     id: u64,
//!     name: String,
//!     email: Option<String>,
//! }
//!
//! impl Record for Account {
//!     fn descriptor() -> &'static RecordDescriptor<Self> {
//!         static DESCRIPTOR: LazyLock<RecordDescriptor<Account>> = LazyLock::new(|| {
//!             RecordDescriptor::<Account>::builder("Account")
//!                 .field(FieldDescriptor::new(&["id", "account_id"], || 0), |a| &a.id, |a, v| a.id = v)
//!                 .field(
//!                     FieldDescriptor::new(&["name"], || "anonymous".to_string()),
//!                     |a| &a.name,
//!                     |a, v| a.name = v,
//!                 )
//!                 .optional(
//!                     FieldDescriptor::optional(&["email"]),
//!                     |a| a.email.as_ref(),
//!                     |a, v| a.email = v,
//!                 )
//!                 .build()
//!         });
//!         &DESCRIPTOR
//!     }
//! }
//!
//! let account: Account = pliant::from_str(r#"{"account_id": "42", "name": null}"#).unwrap();
//! assert_eq!(
//!     account,
//!     Account {
//!         id: 42,
//!         name: "anonymous".to_string(),
//!         email: None,
//!     }
//! );
//!
//! assert_eq!(
//!     pliant::to_string(&account).unwrap(),
//!     r#"{"id":42,"name":"anonymous"}"#
//! );
//! ```

mod coerce;
mod error;
mod field;
mod parse;
mod record;
mod traits;
mod types;
mod value;
mod write;

pub use crate::coerce::coerce;
pub use crate::error::{CoerceResult, CoercionError, DecodeError, DecodeResult, Error, Result};
pub use crate::field::{FieldDescriptor, FieldOutcome};
pub use crate::parse::{decode, from_bytes, from_slice, from_str};
pub use crate::record::{FieldInfo, RecordDescriptor, RecordDescriptorBuilder};
pub use crate::traits::{Codec, Record};
pub use crate::value::{Kind, Mapping, Number, Value};
pub use crate::write::{encode, to_string, to_vec};

#[cfg(test)]
mod test_support {
    use std::sync::LazyLock;

    use crate::{FieldDescriptor, Record, RecordDescriptor};

    #[derive(Debug, Default, PartialEq)]
    pub(crate) struct Sample {
        pub(crate) name: String,
        pub(crate) count: u32,
        pub(crate) note: Option<String>,
    }

    impl Record for Sample {
        fn descriptor() -> &'static RecordDescriptor<Self> {
            static DESCRIPTOR: LazyLock<RecordDescriptor<Sample>> = LazyLock::new(|| {
                RecordDescriptor::<Sample>::builder("Sample")
                    .field(
                        FieldDescriptor::new(&["name"], || "unnamed".to_string()),
                        |s| &s.name,
                        |s, v| s.name = v,
                    )
                    .field(
                        FieldDescriptor::new(&["n", "count"], || 0),
                        |s| &s.count,
                        |s, v| s.count = v,
                    )
                    .optional(
                        FieldDescriptor::optional(&["note"]),
                        |s| s.note.as_ref(),
                        |s, v| s.note = v,
                    )
                    .build()
            });
            &DESCRIPTOR
        }
    }
}
