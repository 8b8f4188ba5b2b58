//! Binding parsed objects onto typed object graphs.
//!
//! A type opts in by implementing [`Bindable`], whose descriptor selects one of
//! two styles:
//!
//! - construction-style: the type's build function pulls each field through
//!   [`BindContext::get_value`];
//! - setter-style: the binder creates a blank instance, feeds every key of the
//!   parsed object to the matching setter and then runs the post-read hook.
//!
//! Both styles coerce through [`calculate_readable_value`]. While an object is
//! being built its descriptor and value map sit on top of the context's frame
//! stack, so field lookups always resolve against the innermost object.

mod descriptor;
mod field;
pub mod registry;

pub use descriptor::{BindStyle, FieldKind, ScalarKind, TypeDescriptor};
pub use field::FieldType;
use descriptor::FieldLookup;
use tracing::trace;

use crate::{
    error::BindError,
    value::{Map, Value},
};

/// A type the binder can build from a parsed object.
pub trait Bindable: Sized + 'static {
    /// Builds the descriptor. Called at most once per process in practice;
    /// the result is cached by the [`registry`].
    fn describe() -> TypeDescriptor<Self>;
}

/// Where a value is being read: the field name and the enclosing type.
#[derive(Debug, Clone, Copy)]
pub struct Site<'a> {
    /// The field being read.
    pub field: &'a str,
    /// The enclosing type.
    pub type_name: &'static str,
}

impl Site<'_> {
    pub(crate) fn null_value(&self) -> BindError {
        BindError::NullValue {
            field: self.field.to_owned(),
            type_name: self.type_name,
        }
    }
}

#[derive(Clone, Copy)]
struct Frame<'v> {
    descriptor: &'static dyn FieldLookup,
    values: &'v Map,
}

impl<'v> Frame<'v> {
    fn new<T: Bindable>(descriptor: &'static TypeDescriptor<T>, values: &'v Map) -> Self {
        Self { descriptor, values }
    }
}

static NULL: Value = Value::Null;

/// State of an in-progress bind.
///
/// Construction-style build functions receive the context and read their
/// fields from it.
pub struct BindContext<'v> {
    current: Frame<'v>,
    parents: Vec<Frame<'v>>,
}

impl<'v> BindContext<'v> {
    fn new(root: Frame<'v>) -> Self {
        Self {
            current: root,
            parents: Vec::new(),
        }
    }

    /// Name of the type currently being built.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.current.descriptor.type_name()
    }

    /// Number of objects being built, counting the root.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.parents.len() + 1
    }

    /// Reads field `name` of the current object as `F`.
    ///
    /// A key absent from the parsed object reads as `null`, so optional
    /// fields should be requested as `Option<_>`.
    ///
    /// # Errors
    ///
    /// The field must be declared on the current descriptor with the same kind
    /// as `F`; beyond that, any coercion failure.
    pub fn get_value<F: FieldType>(&mut self, name: &str) -> Result<F, BindError> {
        let Frame { descriptor, values } = self.current;
        let type_name = descriptor.type_name();
        let Some(declared) = descriptor.declared_kind(name) else {
            return Err(BindError::UndeclaredField {
                field: name.to_owned(),
                type_name,
            });
        };
        let requested = F::kind();
        if declared != requested {
            return Err(BindError::DeclaredKindMismatch {
                field: name.to_owned(),
                type_name,
                declared,
                requested,
            });
        }
        let parsed = values.get(name).unwrap_or(&NULL);
        calculate_readable_value(parsed, self, &Site {
            field: name,
            type_name,
        })
    }

    /// An error for a construction-style type whose input violates its own
    /// invariants.
    #[must_use]
    pub fn reject(&self, reason: impl Into<String>) -> BindError {
        BindError::Rejected {
            type_name: self.type_name(),
            reason: reason.into(),
        }
    }

    /// Binds `values` as a nested `T`.
    ///
    /// The nested frame is popped whether or not the bind succeeds.
    ///
    /// # Errors
    ///
    /// Whatever building `T` reports.
    pub fn bind_object<T: Bindable>(&mut self, values: &'v Map) -> Result<T, BindError> {
        let descriptor = registry::descriptor::<T>();
        trace!(
            type_name = descriptor.name(),
            depth = self.depth(),
            "binding nested object"
        );
        let parent = core::mem::replace(&mut self.current, Frame::new(descriptor, values));
        self.parents.push(parent);
        let result = self.construct(descriptor);
        if let Some(parent) = self.parents.pop() {
            self.current = parent;
        }
        result
    }

    fn construct<T: Bindable>(
        &mut self,
        descriptor: &'static TypeDescriptor<T>,
    ) -> Result<T, BindError> {
        let type_name = descriptor.name();
        match descriptor.style() {
            BindStyle::Abstract => Err(BindError::Interface { type_name }),
            BindStyle::Constructed(build) => build(self),
            BindStyle::SetterBound { new, post_read } => {
                let values = self.current.values;
                let mut target = new();
                for (key, parsed) in values {
                    let Some(setter) = descriptor.setter_for(key) else {
                        return Err(BindError::NoSetter {
                            field: key.clone(),
                            type_name,
                        });
                    };
                    setter.apply(&mut target, parsed, self, &Site {
                        field: key,
                        type_name,
                    })?;
                }
                post_read(&mut target);
                Ok(target)
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn detached(values: &'v Map) -> Self {
        struct Detached;

        impl Bindable for Detached {
            fn describe() -> TypeDescriptor<Self> {
                TypeDescriptor::abstract_type("Detached")
            }
        }

        Self::new(Frame::new(registry::descriptor::<Detached>(), values))
    }
}

/// Binds a parsed object onto `T`.
///
/// # Errors
///
/// [`BindError::ExpectedRootObject`] unless `value` is an object, otherwise
/// any failure building `T` or its nested objects.
pub fn bind<T: Bindable>(value: &Value) -> Result<T, BindError> {
    let descriptor = registry::descriptor::<T>();
    let Value::Object(values) = value else {
        return Err(BindError::ExpectedRootObject {
            type_name: descriptor.name(),
            found: value.kind_name(),
        });
    };
    BindContext::new(Frame::new(descriptor, values)).construct(descriptor)
}

/// Checks `parsed` against the declared kind of `F`, then coerces it.
///
/// | declared kind | accepted parsed values |
/// |---|---|
/// | scalar | the matching scalar, or null |
/// | object / interface | an object, or null |
/// | list / array | an array, or null; each element checked against the element kind |
/// | any value | anything |
///
/// Lists and arrays of interface types, and lists or arrays whose elements
/// are lists, are rejected before the value is looked at. Arrays of arrays are
/// allowed.
///
/// # Errors
///
/// A [`BindError`] naming `site`.
pub fn calculate_readable_value<'v, F: FieldType>(
    parsed: &'v Value,
    ctx: &mut BindContext<'v>,
    site: &Site<'_>,
) -> Result<F, BindError> {
    let kind = F::kind();
    check_container(&kind, site)?;
    if parsed.is_null() {
        return F::coerce(parsed, ctx, site);
    }
    match kind {
        FieldKind::Object(_) | FieldKind::Interface(_) if !parsed.is_object() => {
            Err(BindError::ExpectedObject {
                field: site.field.to_owned(),
                type_name: site.type_name,
                found: parsed.kind_name(),
            })
        }
        FieldKind::List(_) | FieldKind::Array(_) if !parsed.is_array() => {
            Err(BindError::ExpectedArray {
                field: site.field.to_owned(),
                type_name: site.type_name,
                found: parsed.kind_name(),
            })
        }
        FieldKind::Scalar(expected) if !expected.matches(parsed) => {
            Err(BindError::TypeMismatch {
                field: site.field.to_owned(),
                type_name: site.type_name,
                expected,
                found: parsed.kind_name(),
            })
        }
        _ => F::coerce(parsed, ctx, site),
    }
}

fn check_container(kind: &FieldKind, site: &Site<'_>) -> Result<(), BindError> {
    let (container, element) = match kind {
        FieldKind::List(element) => ("list", element),
        FieldKind::Array(element) => ("array", element),
        _ => return Ok(()),
    };
    match **element {
        FieldKind::Interface(interface) => Err(BindError::InterfaceElement {
            field: site.field.to_owned(),
            type_name: site.type_name,
            interface,
        }),
        FieldKind::List(_) => Err(BindError::NestedList {
            field: site.field.to_owned(),
            type_name: site.type_name,
            container,
        }),
        _ => Ok(()),
    }
}
