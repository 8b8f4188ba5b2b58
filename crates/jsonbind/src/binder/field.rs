//! Types a parsed value can be coerced into.

use super::{BindContext, Bindable, Site, calculate_readable_value, registry};
use crate::{
    binder::{FieldKind, ScalarKind},
    error::BindError,
    value::Value,
};

/// A type that can be the target of a field read or a setter.
///
/// [`calculate_readable_value`] validates the parsed value against
/// [`kind`](Self::kind) before calling [`coerce`](Self::coerce), so
/// implementations only see values of the right shape or `null`.
pub trait FieldType: Sized + 'static {
    /// The declared shape of this type.
    fn kind() -> FieldKind;

    /// Converts an already validated parsed value.
    ///
    /// # Errors
    ///
    /// [`BindError::NullValue`] for null into a non-nullable type; otherwise
    /// whatever binding the nested value reports.
    fn coerce<'v>(
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError>;
}

fn reject_scalar(expected: ScalarKind, parsed: &Value, site: &Site<'_>) -> BindError {
    match parsed {
        Value::Null => site.null_value(),
        other => BindError::TypeMismatch {
            field: site.field.to_owned(),
            type_name: site.type_name,
            expected,
            found: other.kind_name(),
        },
    }
}

impl FieldType for String {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::String)
    }

    fn coerce<'v>(
        parsed: &'v Value,
        _: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        match parsed {
            Value::String(s) => Ok(s.clone()),
            other => Err(reject_scalar(ScalarKind::String, other, site)),
        }
    }
}

impl FieldType for bool {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Bool)
    }

    fn coerce<'v>(
        parsed: &'v Value,
        _: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        match parsed {
            Value::Boolean(b) => Ok(*b),
            other => Err(reject_scalar(ScalarKind::Bool, other, site)),
        }
    }
}

/// Doubles bind only from decimal literals; integers are not widened.
impl FieldType for f64 {
    fn kind() -> FieldKind {
        FieldKind::Scalar(ScalarKind::Double)
    }

    fn coerce<'v>(
        parsed: &'v Value,
        _: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        match parsed {
            Value::Double(d) => Ok(*d),
            other => Err(reject_scalar(ScalarKind::Double, other, site)),
        }
    }
}

macro_rules! integer_field {
    ($($ty:ty),*) => {$(
        impl FieldType for $ty {
            fn kind() -> FieldKind {
                FieldKind::Scalar(ScalarKind::Int)
            }

            fn coerce<'v>(
                parsed: &'v Value,
                _: &mut BindContext<'v>,
                site: &Site<'_>,
            ) -> Result<Self, BindError> {
                match parsed {
                    Value::Integer(n) => <$ty>::try_from(*n).map_err(|_| BindError::OutOfRange {
                        field: site.field.to_owned(),
                        type_name: site.type_name,
                        value: *n,
                    }),
                    other => Err(reject_scalar(ScalarKind::Int, other, site)),
                }
            }
        }
    )*};
}

integer_field!(i64, i32, i16);

impl FieldType for Value {
    fn kind() -> FieldKind {
        FieldKind::Value
    }

    fn coerce<'v>(
        parsed: &'v Value,
        _: &mut BindContext<'v>,
        _: &Site<'_>,
    ) -> Result<Self, BindError> {
        Ok(parsed.clone())
    }
}

impl<T: FieldType> FieldType for Option<T> {
    fn kind() -> FieldKind {
        T::kind()
    }

    fn coerce<'v>(
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        match parsed {
            Value::Null => Ok(None),
            other => T::coerce(other, ctx, site).map(Some),
        }
    }
}

fn elements<'v, T: FieldType>(
    parsed: &'v Value,
    ctx: &mut BindContext<'v>,
    site: &Site<'_>,
) -> Result<Vec<T>, BindError> {
    match parsed {
        Value::Array(items) => items
            .iter()
            .map(|item| calculate_readable_value::<T>(item, ctx, site))
            .collect(),
        Value::Null => Err(site.null_value()),
        other => Err(BindError::ExpectedArray {
            field: site.field.to_owned(),
            type_name: site.type_name,
            found: other.kind_name(),
        }),
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn kind() -> FieldKind {
        FieldKind::List(Box::new(T::kind()))
    }

    fn coerce<'v>(
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        elements(parsed, ctx, site)
    }
}

impl<T: FieldType> FieldType for Box<[T]> {
    fn kind() -> FieldKind {
        FieldKind::Array(Box::new(T::kind()))
    }

    fn coerce<'v>(
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        elements(parsed, ctx, site).map(Vec::into_boxed_slice)
    }
}

/// Nested objects bind with the style their own descriptor selects.
impl<T: Bindable> FieldType for T {
    fn kind() -> FieldKind {
        let descriptor = registry::descriptor::<T>();
        if descriptor.is_abstract() {
            FieldKind::Interface(descriptor.name())
        } else {
            FieldKind::Object(descriptor.name())
        }
    }

    fn coerce<'v>(
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<Self, BindError> {
        match parsed {
            Value::Object(map) => ctx
                .bind_object::<T>(map)
                .map_err(|source| BindError::Nested {
                    field: site.field.to_owned(),
                    type_name: site.type_name,
                    source: Box::new(source),
                }),
            Value::Null => Err(site.null_value()),
            other => Err(BindError::ExpectedObject {
                field: site.field.to_owned(),
                type_name: site.type_name,
                found: other.kind_name(),
            }),
        }
    }
}
