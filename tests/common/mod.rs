#![allow(dead_code)]

use std::sync::LazyLock;

use pliant::{
    Codec, CoerceResult, CoercionError, FieldDescriptor, Kind, Record, RecordDescriptor, Value,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Animal {
    #[default]
    Dog,
    Cat,
    Fish,
}

impl Codec for Animal {
    const KIND: Kind = Kind::String;

    fn decode_value(value: &Value) -> CoerceResult<Self> {
        match String::decode_value(value)?.as_str() {
            "dog" => Ok(Animal::Dog),
            "cat" => Ok(Animal::Cat),
            "fish" => Ok(Animal::Fish),
            other => Err(CoercionError::UnknownVariant(other.to_string())),
        }
    }

    fn encode_value(&self) -> Value {
        let name = match self {
            Animal::Dog => "dog",
            Animal::Cat => "cat",
            Animal::Fish => "fish",
        };
        Value::from(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExampleModel {
    pub string_val: String,
    pub int_val: i64,
    pub array: Vec<f64>,
    pub bool: bool,
    pub bool2: bool,
    pub un_impl: Option<String>,
    pub animal: Animal,
}

impl Record for ExampleModel {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: LazyLock<RecordDescriptor<ExampleModel>> = LazyLock::new(|| {
            RecordDescriptor::<ExampleModel>::builder("ExampleModel")
                .field(
                    FieldDescriptor::new(&["stringVal", "string_Val"], || "scyano".to_string()),
                    |m| &m.string_val,
                    |m, v| m.string_val = v,
                )
                .field(
                    FieldDescriptor::new(&["int_Val", "intVal"], || 123456),
                    |m| &m.int_val,
                    |m, v| m.int_val = v,
                )
                .field(
                    FieldDescriptor::new(&["array"], || vec![1.998, 2.998, 3.998]),
                    |m| &m.array,
                    |m, v| m.array = v,
                )
                .field(
                    FieldDescriptor::new(&["bool"], || false),
                    |m| &m.bool,
                    |m, v| m.bool = v,
                )
                .field(
                    FieldDescriptor::new(&["bool2"], || true),
                    |m| &m.bool2,
                    |m, v| m.bool2 = v,
                )
                .optional(
                    FieldDescriptor::optional(&["unImpl"]),
                    |m| m.un_impl.as_ref(),
                    |m, v| m.un_impl = v,
                )
                .field(
                    FieldDescriptor::new(&["animal"], || Animal::Dog),
                    |m| &m.animal,
                    |m, v| m.animal = v,
                )
                .build()
        });
        &DESCRIPTOR
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct SubRootModel {
    pub value: Option<ExampleModel>,
    pub value2: ExampleModel,
}

impl Record for SubRootModel {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: LazyLock<RecordDescriptor<SubRootModel>> = LazyLock::new(|| {
            RecordDescriptor::<SubRootModel>::builder("SubRootModel")
                .optional_nested(
                    FieldDescriptor::optional(&["value"]),
                    |m| m.value.as_ref(),
                    |m, v| m.value = v,
                )
                .nested(
                    &["value2"],
                    |m| &m.value2,
                    |m, v| m.value2 = v,
                )
                .build()
        });
        &DESCRIPTOR
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct RootModel {
    pub root: SubRootModel,
}

impl Record for RootModel {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: LazyLock<RecordDescriptor<RootModel>> = LazyLock::new(|| {
            RecordDescriptor::<RootModel>::builder("RootModel")
                .nested(
                    &["root"],
                    |m| &m.root,
                    |m, v| m.root = v,
                )
                .build()
        });
        &DESCRIPTOR
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct OptionalModel {
    pub val: Option<String>,
}

impl Record for OptionalModel {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: LazyLock<RecordDescriptor<OptionalModel>> = LazyLock::new(|| {
            RecordDescriptor::<OptionalModel>::builder("OptionalModel")
                .optional(
                    FieldDescriptor::optional(&["val"]).with_fallback(|| "default".to_string()),
                    |m| m.val.as_ref(),
                    |m, v| m.val = v,
                )
                .build()
        });
        &DESCRIPTOR
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct OptionalNullModel {
    pub val: Option<String>,
}

impl Record for OptionalNullModel {
    fn descriptor() -> &'static RecordDescriptor<Self> {
        static DESCRIPTOR: LazyLock<RecordDescriptor<OptionalNullModel>> = LazyLock::new(|| {
            RecordDescriptor::<OptionalNullModel>::builder("OptionalNullModel")
                .optional(
                    FieldDescriptor::optional(&["val"]),
                    |m| m.val.as_ref(),
                    |m, v| m.val = v,
                )
                .build()
        });
        &DESCRIPTOR
    }
}
