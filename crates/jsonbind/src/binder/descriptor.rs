//! Explicitly registered type metadata.
//!
//! A [`TypeDescriptor`] is the table the binder and the writer consult in
//! place of runtime reflection: for each field name it records the declared
//! [`FieldKind`], an optional setter and an optional getter.

use std::{collections::BTreeMap, fmt, marker::PhantomData};

use super::{BindContext, Site, calculate_readable_value, field::FieldType};
use crate::{error::BindError, value::Value, writer::FieldValue};

/// The scalar shapes a field can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarKind {
    /// `String`.
    String,
    /// `i64`, `i32` or `i16`.
    Int,
    /// `bool`.
    Bool,
    /// `f64`.
    Double,
}

impl ScalarKind {
    /// Whether `value` is this kind of scalar. Null never matches.
    #[must_use]
    pub fn matches(self, value: &Value) -> bool {
        matches!(
            (self, value),
            (Self::String, Value::String(_))
                | (Self::Int, Value::Integer(_))
                | (Self::Bool, Value::Boolean(_))
                | (Self::Double, Value::Double(_))
        )
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::String => "string",
            Self::Int => "integer",
            Self::Bool => "boolean",
            Self::Double => "double",
        })
    }
}

/// Declared shape of a field.
///
/// Nullability is not part of the kind: `Option<String>` and `String` are both
/// `Scalar(String)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// A single scalar.
    Scalar(ScalarKind),
    /// A concrete bindable type, by name.
    Object(&'static str),
    /// A type the binder cannot instantiate.
    Interface(&'static str),
    /// Growable sequence (`Vec<T>`).
    List(Box<FieldKind>),
    /// Fixed sequence (`Box<[T]>`).
    Array(Box<FieldKind>),
    /// Any parsed value, taken as is.
    Value,
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scalar(kind) => kind.fmt(f),
            Self::Object(name) => write!(f, "object `{name}`"),
            Self::Interface(name) => write!(f, "interface `{name}`"),
            Self::List(element) => write!(f, "list of {element}"),
            Self::Array(element) => write!(f, "array of {element}"),
            Self::Value => f.write_str("any value"),
        }
    }
}

/// How the binder produces an instance of `T`.
pub enum BindStyle<T> {
    /// The type pulls its own fields through [`BindContext::get_value`].
    Constructed(fn(&mut BindContext<'_>) -> Result<T, BindError>),
    /// The binder creates a blank instance, pushes every parsed key through
    /// its setter, then runs `post_read`.
    SetterBound {
        /// Creates the blank instance.
        new: fn() -> T,
        /// Runs once every setter has been applied.
        post_read: fn(&mut T),
    },
    /// Never instantiated by the binder.
    Abstract,
}

/// Accessors registered under the underscore-prefixed name take priority over
/// the plain ones, whatever the registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum AccessorRank {
    Plain,
    Underscored,
}

pub(crate) type Getter<T> = Box<dyn for<'a> Fn(&'a T) -> FieldValue<'a> + Send + Sync>;

/// A setter with its parameter type erased.
pub(crate) trait ApplySetter<T>: Send + Sync {
    fn apply<'v>(
        &self,
        target: &mut T,
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<(), BindError>;
}

struct TypedSetter<V, S> {
    set: S,
    _marker: PhantomData<fn(V)>,
}

impl<T, V, S> ApplySetter<T> for TypedSetter<V, S>
where
    V: FieldType,
    S: Fn(&mut T, V) + Send + Sync,
{
    fn apply<'v>(
        &self,
        target: &mut T,
        parsed: &'v Value,
        ctx: &mut BindContext<'v>,
        site: &Site<'_>,
    ) -> Result<(), BindError> {
        let value = calculate_readable_value::<V>(parsed, ctx, site)?;
        (self.set)(target, value);
        Ok(())
    }
}

struct FieldSlot<T> {
    kind: Option<fn() -> FieldKind>,
    setter: Option<(AccessorRank, Box<dyn ApplySetter<T>>)>,
    getter: Option<(AccessorRank, Getter<T>)>,
}

impl<T> FieldSlot<T> {
    fn empty() -> Self {
        Self {
            kind: None,
            setter: None,
            getter: None,
        }
    }
}

/// Binding and writing metadata for one type.
///
/// Built once by [`Bindable::describe`](super::Bindable::describe) and cached
/// for the life of the process.
///
/// ```
/// use jsonbind::{Bindable, FieldValue, TypeDescriptor};
///
/// #[derive(Default)]
/// struct Color {
///     name: String,
///     hex: Option<String>,
/// }
///
/// impl Bindable for Color {
///     fn describe() -> TypeDescriptor<Self> {
///         TypeDescriptor::setter_bound("Color", Self::default)
///             .setter("name", |c, v: String| c.name = v)
///             .setter("hex", |c, v: Option<String>| c.hex = v)
///             .getter("name", |c| FieldValue::from(&c.name))
///     }
/// }
///
/// let color: Color = jsonbind::parse_as(r#"{"name": "teal", "hex": null}"#).unwrap();
/// assert_eq!(color.name, "teal");
/// assert_eq!(color.hex, None);
/// ```
pub struct TypeDescriptor<T> {
    name: &'static str,
    style: BindStyle<T>,
    fields: BTreeMap<&'static str, FieldSlot<T>>,
}

impl<T: 'static> TypeDescriptor<T> {
    /// Describes a type built by `build`, which reads its fields through the
    /// context. Fields must be declared with [`field`](Self::field).
    #[must_use]
    pub fn constructed(
        name: &'static str,
        build: fn(&mut BindContext<'_>) -> Result<T, BindError>,
    ) -> Self {
        Self::with_style(name, BindStyle::Constructed(build))
    }

    /// Describes a type instantiated with `new` and filled through setters.
    #[must_use]
    pub fn setter_bound(name: &'static str, new: fn() -> T) -> Self {
        Self::with_style(
            name,
            BindStyle::SetterBound {
                new,
                post_read: |_| {},
            },
        )
    }

    /// Describes an interface type. Binding it, or a list or array of it,
    /// fails; getters may still be registered for writing.
    #[must_use]
    pub fn abstract_type(name: &'static str) -> Self {
        Self::with_style(name, BindStyle::Abstract)
    }

    fn with_style(name: &'static str, style: BindStyle<T>) -> Self {
        Self {
            name,
            style,
            fields: BTreeMap::new(),
        }
    }

    /// Declares a field of type `V` for construction-style reads.
    #[must_use]
    pub fn field<V: FieldType>(mut self, name: &'static str) -> Self {
        self.slot(name).kind = Some(V::kind as fn() -> FieldKind);
        self
    }

    /// Registers the setter for `name`. The parsed value is coerced to `V`.
    #[must_use]
    pub fn setter<V, S>(self, name: &'static str, set: S) -> Self
    where
        V: FieldType,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.with_setter(name, AccessorRank::Plain, set)
    }

    /// Registers the underscore-prefixed setter for `name`, which replaces any
    /// plain setter.
    #[must_use]
    pub fn underscore_setter<V, S>(self, name: &'static str, set: S) -> Self
    where
        V: FieldType,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        self.with_setter(name, AccessorRank::Underscored, set)
    }

    /// Registers the getter used by field-driven writing.
    #[must_use]
    pub fn getter<G>(self, name: &'static str, get: G) -> Self
    where
        G: for<'a> Fn(&'a T) -> FieldValue<'a> + Send + Sync + 'static,
    {
        self.with_getter(name, AccessorRank::Plain, Box::new(get))
    }

    /// Registers the underscore-prefixed getter for `name`, which replaces any
    /// plain getter.
    #[must_use]
    pub fn underscore_getter<G>(self, name: &'static str, get: G) -> Self
    where
        G: for<'a> Fn(&'a T) -> FieldValue<'a> + Send + Sync + 'static,
    {
        self.with_getter(name, AccessorRank::Underscored, Box::new(get))
    }

    /// Sets the hook run after every setter-style bind. Ignored for other
    /// styles.
    #[must_use]
    pub fn post_read(mut self, hook: fn(&mut T)) -> Self {
        if let BindStyle::SetterBound { post_read, .. } = &mut self.style {
            *post_read = hook;
        }
        self
    }

    fn with_setter<V, S>(mut self, name: &'static str, rank: AccessorRank, set: S) -> Self
    where
        V: FieldType,
        S: Fn(&mut T, V) + Send + Sync + 'static,
    {
        let slot = self.slot(name);
        if slot.setter.as_ref().is_none_or(|(held, _)| rank >= *held) {
            let setter = TypedSetter {
                set,
                _marker: PhantomData,
            };
            slot.kind = Some(V::kind as fn() -> FieldKind);
            slot.setter = Some((rank, Box::new(setter)));
        }
        self
    }

    fn with_getter(mut self, name: &'static str, rank: AccessorRank, get: Getter<T>) -> Self {
        let slot = self.slot(name);
        if slot.getter.as_ref().is_none_or(|(held, _)| rank >= *held) {
            slot.getter = Some((rank, get));
        }
        self
    }

    fn slot(&mut self, name: &'static str) -> &mut FieldSlot<T> {
        self.fields.entry(name).or_insert_with(FieldSlot::empty)
    }
}

impl<T> TypeDescriptor<T> {
    /// Name used in diagnostics.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// How instances are produced.
    #[must_use]
    pub fn style(&self) -> &BindStyle<T> {
        &self.style
    }

    /// Whether the binder refuses to instantiate the type.
    #[must_use]
    pub fn is_abstract(&self) -> bool {
        matches!(self.style, BindStyle::Abstract)
    }

    /// The declared kind of `field`, if it was declared through
    /// [`field`](Self::field) or a setter.
    #[must_use]
    pub fn declared_kind(&self, field: &str) -> Option<FieldKind> {
        self.fields.get(field)?.kind.map(|kind| kind())
    }

    /// Names with a registered getter, in sorted order.
    pub fn readable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|(_, slot)| slot.getter.is_some())
            .map(|(name, _)| *name)
    }

    pub(crate) fn setter_for(&self, field: &str) -> Option<&dyn ApplySetter<T>> {
        let (_, setter) = self.fields.get(field)?.setter.as_ref()?;
        Some(setter.as_ref())
    }

    pub(crate) fn getter_for(&self, field: &str) -> Option<&Getter<T>> {
        let (_, getter) = self.fields.get(field)?.getter.as_ref()?;
        Some(getter)
    }
}

/// Type-erased view of a descriptor, held by binding frames.
pub(crate) trait FieldLookup: Send + Sync {
    fn type_name(&self) -> &'static str;

    fn declared_kind(&self, field: &str) -> Option<FieldKind>;
}

impl<T> FieldLookup for TypeDescriptor<T> {
    fn type_name(&self) -> &'static str {
        self.name
    }

    fn declared_kind(&self, field: &str) -> Option<FieldKind> {
        TypeDescriptor::declared_kind(self, field)
    }
}
