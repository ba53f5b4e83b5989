use std::fmt;

use tracing::debug;

use crate::{Codec, Record};
use crate::error::{CoerceResult, CoercionError, DecodeError, DecodeResult};
use crate::field::FieldDescriptor;
use crate::value::{Kind, Mapping, Value};

/// Public view of one entry in a [`RecordDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    aliases: &'static [&'static str],
    kind: Kind,
    optional: bool,
}

impl FieldInfo {
    pub fn aliases(&self) -> &'static [&'static str] {
        self.aliases
    }

    pub fn canonical_key(&self) -> &'static str {
        self.aliases[0]
    }

    /// The kind a document value is coerced to for this field.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

trait Slot<R>: Send + Sync {
    fn info(&self) -> FieldInfo;
    fn decode_into(&self, record: &mut R, document: &Mapping);
    fn encode_from(&self, record: &R, output: &mut Mapping);
}

enum Access<R, T> {
    Required {
        get: fn(&R) -> &T,
        set: fn(&mut R, T),
    },
    Optional {
        get: fn(&R) -> Option<&T>,
        set: fn(&mut R, Option<T>),
    },
}

struct Bound<R, T> {
    field: FieldDescriptor<T>,
    kind: Kind,
    decode: fn(&Value) -> CoerceResult<T>,
    encode: fn(&T) -> Value,
    access: Access<R, T>,
}

impl<R, T> Slot<R> for Bound<R, T> {
    fn info(&self) -> FieldInfo {
        FieldInfo {
            aliases: self.field.aliases(),
            kind: self.kind,
            optional: self.field.is_optional(),
        }
    }

    fn decode_into(&self, record: &mut R, document: &Mapping) {
        let outcome = self.field.resolve_with(document, self.decode);
        match &self.access {
            Access::Required { set, .. } => {
                // Required slots are only built from fields with a default.
                if let Some(value) = outcome.into_option() {
                    set(record, value);
                }
            }
            Access::Optional { set, .. } => set(record, outcome.into_option()),
        }
    }

    fn encode_from(&self, record: &R, output: &mut Mapping) {
        let value = match &self.access {
            Access::Required { get, .. } => Some((self.encode)(get(record))),
            Access::Optional { get, .. } => get(record).map(self.encode),
        };
        self.field.encode_into(output, value);
    }
}

fn decode_record<N: Record>(value: &Value) -> CoerceResult<N> {
    match value {
        Value::Mapping(mapping) => Ok(N::descriptor().decode_mapping(mapping)),
        Value::Null => Err(CoercionError::Null),
        other => Err(CoercionError::mismatch(Kind::Mapping, other.kind())),
    }
}

fn encode_record<N: Record>(record: &N) -> Value {
    Value::Mapping(N::descriptor().encode(record))
}

fn decode_records<N: Record>(value: &Value) -> CoerceResult<Vec<N>> {
    match value {
        Value::Sequence(items) => items.iter().map(decode_record::<N>).collect(),
        Value::Null => Err(CoercionError::Null),
        other => Err(CoercionError::mismatch(Kind::Sequence, other.kind())),
    }
}

#[allow(clippy::ptr_arg)]
fn encode_records<N: Record>(records: &Vec<N>) -> Value {
    Value::Sequence(records.iter().map(encode_record).collect())
}

/// The ordered field table of a record type.
///
/// Built once, typically in a `static LazyLock`, and shared read-only by
/// every decode and encode call. Fields are resolved and written in the
/// order they were added.
pub struct RecordDescriptor<R> {
    name: &'static str,
    fields: Vec<Box<dyn Slot<R>>>,
}

impl<R: 'static> RecordDescriptor<R> {
    pub fn builder(name: &'static str) -> RecordDescriptorBuilder<R> {
        RecordDescriptorBuilder {
            name,
            fields: Vec::new(),
        }
    }
}

impl<R> RecordDescriptor<R> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the described fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldInfo> + '_ {
        self.fields.iter().map(|slot| slot.info())
    }

    /// Writes every present field of `record` under its canonical key.
    ///
    /// Absent optional fields are omitted.
    pub fn encode(&self, record: &R) -> Mapping {
        let mut output = Mapping::with_capacity(self.fields.len());
        for slot in &self.fields {
            slot.encode_from(record, &mut output);
        }
        output
    }
}

impl<R: Default> RecordDescriptor<R> {
    /// Decodes a record from a document tree.
    ///
    /// Fails only when `document` is not a mapping; per-field problems are
    /// resolved to defaults.
    pub fn decode(&self, document: &Value) -> DecodeResult<R> {
        match document {
            Value::Mapping(mapping) => Ok(self.decode_mapping(mapping)),
            other => {
                debug!(record = self.name, found = %other.kind(), "invalid root");
                Err(DecodeError::InvalidRoot {
                    record: self.name,
                    found: other.kind(),
                })
            }
        }
    }

    pub fn decode_mapping(&self, document: &Mapping) -> R {
        let mut record = R::default();
        for slot in &self.fields {
            slot.decode_into(&mut record, document);
        }
        record
    }
}

impl<R> fmt::Debug for RecordDescriptor<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDescriptor")
            .field("name", &self.name)
            .field("fields", &self.fields().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`RecordDescriptor`].
///
/// Each method binds a [`FieldDescriptor`] to a getter and setter on the
/// record.
///
/// # Panics
///
/// Adding two fields with the same canonical key panics, as does binding a
/// field without a default through a method that stores a plain value.
pub struct RecordDescriptorBuilder<R> {
    name: &'static str,
    fields: Vec<Box<dyn Slot<R>>>,
}

impl<R: 'static> RecordDescriptorBuilder<R> {
    /// Adds a field that always holds a value.
    pub fn field<T: Codec + 'static>(
        self,
        field: FieldDescriptor<T>,
        get: fn(&R) -> &T,
        set: fn(&mut R, T),
    ) -> Self {
        self.push(
            field,
            T::KIND,
            T::decode_value,
            T::encode_value,
            Access::Required { get, set },
        )
    }

    /// Adds a field stored as an `Option`.
    pub fn optional<T: Codec + 'static>(
        self,
        field: FieldDescriptor<T>,
        get: fn(&R) -> Option<&T>,
        set: fn(&mut R, Option<T>),
    ) -> Self {
        self.push(
            field,
            T::KIND,
            T::decode_value,
            T::encode_value,
            Access::Optional { get, set },
        )
    }

    /// Adds a nested record field.
    ///
    /// A missing, null or malformed sub-document decodes as
    /// [`Record::from_defaults`], so the nested record's own field defaults
    /// apply.
    pub fn nested<N: Record>(
        self,
        aliases: &'static [&'static str],
        get: fn(&R) -> &N,
        set: fn(&mut R, N),
    ) -> Self {
        self.push(
            FieldDescriptor::new(aliases, N::from_defaults),
            Kind::Mapping,
            decode_record::<N>,
            encode_record::<N>,
            Access::Required { get, set },
        )
    }

    /// Adds a nested record field stored as an `Option`.
    pub fn optional_nested<N: Record>(
        self,
        field: FieldDescriptor<N>,
        get: fn(&R) -> Option<&N>,
        set: fn(&mut R, Option<N>),
    ) -> Self {
        self.push(
            field,
            Kind::Mapping,
            decode_record::<N>,
            encode_record::<N>,
            Access::Optional { get, set },
        )
    }

    /// Adds a sequence of nested records.
    pub fn nested_list<N: Record>(
        self,
        field: FieldDescriptor<Vec<N>>,
        get: fn(&R) -> &Vec<N>,
        set: fn(&mut R, Vec<N>),
    ) -> Self {
        self.push(
            field,
            Kind::Sequence,
            decode_records::<N>,
            encode_records::<N>,
            Access::Required { get, set },
        )
    }

    pub fn build(self) -> RecordDescriptor<R> {
        RecordDescriptor {
            name: self.name,
            fields: self.fields,
        }
    }

    fn push<T: 'static>(
        mut self,
        field: FieldDescriptor<T>,
        kind: Kind,
        decode: fn(&Value) -> CoerceResult<T>,
        encode: fn(&T) -> Value,
        access: Access<R, T>,
    ) -> Self {
        let key = field.canonical_key();
        assert!(
            self.fields.iter().all(|slot| slot.info().canonical_key() != key),
            "record {} declares canonical key {key:?} twice",
            self.name,
        );
        if let Access::Required { .. } = access {
            assert!(
                field.has_default(),
                "record {} binds field {key:?} as required but it has no default",
                self.name,
            );
        }
        self.fields.push(Box::new(Bound {
            field,
            kind,
            decode,
            encode,
            access,
        }));
        self
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use super::RecordDescriptor;
    use crate::Record;
    use crate::error::DecodeError;
    use crate::field::FieldDescriptor;
    use crate::value::{Kind, Mapping, Value};

    #[derive(Debug, Default, PartialEq)]
    struct Point {
        x: i32,
        y: i32,
        label: Option<String>,
    }

    impl Record for Point {
        fn descriptor() -> &'static RecordDescriptor<Self> {
            static DESCRIPTOR: LazyLock<RecordDescriptor<Point>> = LazyLock::new(|| {
                RecordDescriptor::<Point>::builder("Point")
                    .field(FieldDescriptor::new(&["x", "X"], || 1), |p| &p.x, |p, v| p.x = v)
                    .field(FieldDescriptor::new(&["y"], || 2), |p| &p.y, |p, v| p.y = v)
                    .optional(
                        FieldDescriptor::optional(&["label"]),
                        |p| p.label.as_ref(),
                        |p, v| p.label = v,
                    )
                    .build()
            });
            &DESCRIPTOR
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Path {
        points: Vec<Point>,
        origin: Option<Point>,
    }

    impl Record for Path {
        fn descriptor() -> &'static RecordDescriptor<Self> {
            static DESCRIPTOR: LazyLock<RecordDescriptor<Path>> = LazyLock::new(|| {
                RecordDescriptor::<Path>::builder("Path")
                    .nested_list(
                        FieldDescriptor::new(&["points"], Vec::new),
                        |p| &p.points,
                        |p, v| p.points = v,
                    )
                    .optional_nested(
                        FieldDescriptor::optional(&["origin"]),
                        |p| p.origin.as_ref(),
                        |p, v| p.origin = v,
                    )
                    .build()
            });
            &DESCRIPTOR
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Segment {
        start: Point,
        end: Point,
    }

    impl Record for Segment {
        fn descriptor() -> &'static RecordDescriptor<Self> {
            static DESCRIPTOR: LazyLock<RecordDescriptor<Segment>> = LazyLock::new(|| {
                RecordDescriptor::<Segment>::builder("Segment")
                    .nested(&["start"], |s| &s.start, |s, v| s.start = v)
                    .nested(&["end"], |s| &s.end, |s, v| s.end = v)
                    .build()
            });
            &DESCRIPTOR
        }
    }

    fn json(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn test_introspection() {
        let descriptor = Point::descriptor();
        assert_eq!(descriptor.name(), "Point");
        assert_eq!(descriptor.len(), 3);
        let keys: Vec<_> = descriptor.fields().map(|f| f.canonical_key()).collect();
        assert_eq!(keys, ["x", "y", "label"]);
        let first = descriptor.fields().next().unwrap();
        assert_eq!(first.aliases(), ["x", "X"]);
        assert!(!first.is_optional());
        assert!(descriptor.fields().nth(2).unwrap().is_optional());

        let kinds: Vec<_> = descriptor.fields().map(|f| f.kind()).collect();
        assert_eq!(kinds, [Kind::Integer, Kind::Integer, Kind::String]);
        let kinds: Vec<_> = Path::descriptor().fields().map(|f| f.kind()).collect();
        assert_eq!(kinds, [Kind::Sequence, Kind::Mapping]);
    }

    #[test]
    fn test_decode() {
        assert_eq!(
            Point::descriptor().decode(&json(r#"{"X": "5", "label": "a"}"#)),
            Ok(Point {
                x: 5,
                y: 2,
                label: Some("a".to_string()),
            })
        );
    }

    #[test]
    fn test_from_defaults() {
        assert_eq!(
            Point::from_defaults(),
            Point {
                x: 1,
                y: 2,
                label: None,
            }
        );
    }

    #[test]
    fn test_invalid_root() {
        for (doc, found) in [
            ("[1, 2]", Kind::Sequence),
            ("null", Kind::Null),
            (r#""x""#, Kind::String),
            ("3", Kind::Integer),
        ] {
            assert_eq!(
                Point::descriptor().decode(&json(doc)),
                Err(DecodeError::InvalidRoot {
                    record: "Point",
                    found,
                })
            );
        }
    }

    #[test]
    fn test_encode_order_and_omission() {
        let mapping = Point::descriptor().encode(&Point {
            x: 3,
            y: 4,
            label: None,
        });
        let keys: Vec<_> = mapping.keys().cloned().collect();
        assert_eq!(keys, ["x", "y"]);
        assert_eq!(Value::Mapping(mapping), json(r#"{"x": 3, "y": 4}"#));
    }

    #[test]
    fn test_nested_list() {
        let path = Path::descriptor()
            .decode(&json(r#"{"points": [{"x": 9}, {"y": "8"}], "origin": {}}"#))
            .unwrap();
        assert_eq!(
            path.points,
            [
                Point {
                    x: 9,
                    y: 2,
                    label: None,
                },
                Point {
                    x: 1,
                    y: 8,
                    label: None,
                },
            ]
        );
        assert_eq!(path.origin, Some(Point::from_defaults()));

        let encoded = Value::Mapping(Path::descriptor().encode(&path));
        assert_eq!(
            encoded,
            json(r#"{"points": [{"x": 9, "y": 2}, {"x": 1, "y": 8}], "origin": {"x": 1, "y": 2}}"#)
        );
    }

    #[test]
    fn test_nested_list_falls_back_as_a_whole() {
        let path = Path::descriptor()
            .decode(&json(r#"{"points": [{"x": 1}, 7], "origin": "nowhere"}"#))
            .unwrap();
        assert_eq!(path, Path::default());
    }

    #[test]
    fn test_nested_uses_field_defaults() {
        // Point::default() is all zeroes; its field defaults are x = 1, y = 2.
        let defaults = Point::from_defaults();
        assert_ne!(defaults, Point::default());

        let segment = Segment::descriptor()
            .decode(&json(r#"{"end": {"x": 7}}"#))
            .unwrap();
        assert_eq!(segment.start, defaults);
        assert_eq!(segment.end, Point { x: 7, y: 2, label: None });

        for doc in [r#"{"start": null}"#, r#"{"start": [1]}"#, r#"{"start": "here"}"#] {
            let segment = Segment::descriptor().decode(&json(doc)).unwrap();
            assert_eq!(segment.start, defaults);
        }
        assert_eq!(
            Segment::from_defaults(),
            Segment {
                start: Point::from_defaults(),
                end: Point::from_defaults(),
            }
        );
    }

    #[test]
    #[should_panic(expected = "binds field \"count\" as required but it has no default")]
    fn test_required_field_without_default() {
        #[derive(Default)]
        struct Counter {
            count: u32,
        }

        RecordDescriptor::<Counter>::builder("Counter")
            .field(
                FieldDescriptor::optional(&["count"]),
                |c| &c.count,
                |c, v| c.count = v,
            )
            .build();
    }

    #[test]
    #[should_panic(expected = "declares canonical key \"x\" twice")]
    fn test_duplicate_canonical_key() {
        #[derive(Default)]
        struct Twice {
            a: i32,
        }

        RecordDescriptor::<Twice>::builder("Twice")
            .field(FieldDescriptor::new(&["x"], || 0), |t| &t.a, |t, v| t.a = v)
            .field(FieldDescriptor::new(&["x", "a"], || 0), |t| &t.a, |t, v| t.a = v)
            .build();
    }

    #[test]
    fn test_empty_record() {
        #[derive(Debug, Default, PartialEq)]
        struct Empty {}

        let descriptor = RecordDescriptor::<Empty>::builder("Empty").build();
        assert!(descriptor.is_empty());
        assert_eq!(descriptor.decode(&json(r#"{"a": 1}"#)), Ok(Empty {}));
        assert_eq!(descriptor.encode(&Empty {}), Mapping::new());
    }
}
