//! Named-field containers: heterogeneous aggregates with declared fields.
//!
//! A container's fields are declared once per type and their declaration
//! order is the canonical serialization order. Field values are reached by
//! name through [`SszContainer::field`], or walked in order with
//! [`SszContainer::fields`]. Containers are declared with
//! [`ssz_container!`](crate::ssz_container) and built through
//! [`ContainerBuilder`](crate::ContainerBuilder) or the generated `new`.

use std::any::Any;
use std::fmt;
use std::io::Write;
use std::iter::FusedIterator;

use crate::composite::serialize_parts;
use crate::contract::SszType;
use crate::error::{short_type_name, SszError, SszResult, ValidationError};
use crate::validation::FieldValues;

/// A type-erased encodable value, as held by a container field.
///
/// Implemented for every `SszType + Debug + 'static`.
pub trait SszValue: fmt::Debug + Any {
    fn value_is_fixed_size(&self) -> bool;

    fn value_encoded_len(&self) -> SszResult<usize>;

    fn serialize_value(&self, stream: &mut dyn Write) -> SszResult<usize>;

    fn encode_value(&self) -> SszResult<Vec<u8>>;

    fn value_type_name(&self) -> &'static str;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl<T: SszType + fmt::Debug + Any> SszValue for T {
    fn value_is_fixed_size(&self) -> bool {
        T::is_fixed_size()
    }

    fn value_encoded_len(&self) -> SszResult<usize> {
        self.encoded_len()
    }

    fn serialize_value(&self, mut stream: &mut dyn Write) -> SszResult<usize> {
        self.serialize(&mut stream)
    }

    fn encode_value(&self) -> SszResult<Vec<u8>> {
        self.encode_bytes()
    }

    fn value_type_name(&self) -> &'static str {
        short_type_name::<T>()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        self
    }
}

impl<'a> dyn SszValue + 'a {
    /// The value as a `T`, if that is its concrete type.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    pub fn is<T: Any>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

/// An aggregate of uniquely-named, individually-typed fields.
pub trait SszContainer: SszType {
    /// The container's type name, used in errors and Debug output.
    const NAME: &'static str;

    /// Field names in declaration order.
    const FIELD_NAMES: &'static [&'static str];

    /// The value of the field at `index` in declaration order.
    fn field_at(&self, index: usize) -> Option<&dyn SszValue>;

    /// Assemble a container from validated field values.
    fn from_fields(values: &mut FieldValues) -> Result<Self, ValidationError>;

    /// Number of declared fields.
    fn field_count(&self) -> usize {
        Self::FIELD_NAMES.len()
    }

    /// `(name, value)` pairs in declaration order.
    ///
    /// Each call starts a fresh walk.
    fn fields(&self) -> Fields<'_, Self> {
        Fields {
            container: self,
            index: 0,
        }
    }

    /// The value of the named field.
    fn field(&self, name: &str) -> SszResult<&dyn SszValue> {
        Self::FIELD_NAMES
            .iter()
            .position(|field| *field == name)
            .and_then(|index| self.field_at(index))
            .ok_or_else(|| SszError::MissingField {
                container: Self::NAME,
                field: name.to_string(),
            })
    }

    /// The value of the named field as its concrete type.
    fn field_as<T: Any>(&self, name: &str) -> SszResult<&T> {
        let value = self.field(name)?;
        value.downcast_ref::<T>().ok_or_else(|| {
            SszError::InvalidOperation(format!(
                "field '{}' of {} is {}, not {}",
                name,
                Self::NAME,
                value.value_type_name(),
                short_type_name::<T>()
            ))
        })
    }
}

/// Iterator over the `(name, value)` pairs of a container.
pub struct Fields<'a, C: ?Sized> {
    container: &'a C,
    index: usize,
}

impl<'a, C: SszContainer> Iterator for Fields<'a, C> {
    type Item = (&'static str, &'a dyn SszValue);

    fn next(&mut self) -> Option<Self::Item> {
        let name = *C::FIELD_NAMES.get(self.index)?;
        let value = self.container.field_at(self.index)?;
        self.index += 1;
        Some((name, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = C::FIELD_NAMES.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<C: SszContainer> ExactSizeIterator for Fields<'_, C> {}

impl<C: SszContainer> FusedIterator for Fields<'_, C> {}

/// Serialize a container's fields in declaration order.
pub fn serialize_container<C: SszContainer, W: Write>(container: &C, stream: &mut W) -> SszResult<usize> {
    let parts: Vec<&dyn SszValue> = container.fields().map(|(_, value)| value).collect();
    serialize_parts(&parts, stream)
}

/// Render `Name(a=.. b=..)`.
pub fn fmt_container<C: SszContainer>(container: &C, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}(", C::NAME)?;
    for (i, (name, value)) in container.fields().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}={:?}", name, value)?;
    }
    write!(f, ")")
}

/// Declare a named-field container.
///
/// Generates the struct with private fields, a typed `new`, read-only
/// accessors, a `builder()`, and implementations of [`SszContainer`],
/// [`SszType`] and `Debug`. The container is fixed-size when every field
/// is.
///
/// ```
/// use lean_ssz_core::{ssz_container, SszContainer, SszType};
/// # use lean_ssz_core::{stream, SszResult};
/// # use std::io::{Read, Write};
/// # #[derive(Debug, Clone, PartialEq)]
/// # pub struct Slot(u64);
/// # impl SszType for Slot {
/// #     fn is_fixed_size() -> bool { true }
/// #     fn get_byte_length() -> SszResult<usize> { Ok(8) }
/// #     fn serialize<W: Write>(&self, s: &mut W) -> SszResult<usize> {
/// #         stream::write_bytes(s, &self.0.to_le_bytes())
/// #     }
/// #     fn deserialize<R: Read>(s: &mut R, scope: usize) -> SszResult<Self> {
/// #         Ok(Slot(u64::from_le_bytes(stream::read_array(s, scope)?)))
/// #     }
/// # }
///
/// ssz_container! {
///     #[derive(Clone, PartialEq)]
///     pub struct Window {
///         start: Slot,
///         end: Slot,
///     }
/// }
///
/// let window = Window::new(Slot(1), Slot(4));
/// assert_eq!(Window::get_byte_length().unwrap(), 16);
/// assert_eq!(window.field_count(), 2);
/// assert_eq!(Window::decode_bytes(&window.encode_bytes().unwrap()).unwrap(), window);
/// ```
#[macro_export]
macro_rules! ssz_container {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field:ident : $ty:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field: $ty,
            )+
        }

        impl $name {
            /// Construct from fully-typed field values.
            #[allow(clippy::too_many_arguments)]
            pub fn new($($field: $ty),+) -> Self {
                Self { $($field),+ }
            }

            /// Start building through the validation layer.
            pub fn builder() -> $crate::ContainerBuilder<Self> {
                $crate::ContainerBuilder::new()
            }

            $(
                pub fn $field(&self) -> &$ty {
                    &self.$field
                }
            )+
        }

        impl $crate::SszContainer for $name {
            const NAME: &'static str = stringify!($name);
            const FIELD_NAMES: &'static [&'static str] = &[$(stringify!($field)),+];

            fn field_at(&self, index: usize) -> Option<&dyn $crate::SszValue> {
                let fields: &[&dyn $crate::SszValue] = &[$(&self.$field),+];
                fields.get(index).copied()
            }

            fn from_fields(
                values: &mut $crate::FieldValues,
            ) -> ::std::result::Result<Self, $crate::ValidationError> {
                Ok(Self {
                    $($field: values.take::<$ty>(stringify!($field))?,)+
                })
            }
        }

        impl $crate::SszType for $name {
            fn is_fixed_size() -> bool {
                true $(&& <$ty as $crate::SszType>::is_fixed_size())+
            }

            fn get_byte_length() -> $crate::SszResult<usize> {
                if !<Self as $crate::SszType>::is_fixed_size() {
                    return Err($crate::SszError::variable_size::<Self>());
                }
                let mut len = 0;
                $(len += <$ty as $crate::SszType>::get_byte_length()?;)+
                Ok(len)
            }

            fn encoded_len(&self) -> $crate::SszResult<usize> {
                let mut len = 0;
                $(
                    len += $crate::contract::fixed_portion_len::<$ty>()?;
                    if !<$ty as $crate::SszType>::is_fixed_size() {
                        len += $crate::SszType::encoded_len(&self.$field)?;
                    }
                )+
                Ok(len)
            }

            fn serialize<W: ::std::io::Write>(&self, stream: &mut W) -> $crate::SszResult<usize> {
                $crate::container::serialize_container(self, stream)
            }

            fn deserialize<R: ::std::io::Read>(
                stream: &mut R,
                scope: usize,
            ) -> $crate::SszResult<Self> {
                let bytes = $crate::stream::read_scope::<Self, R>(stream, scope)?;
                let mut builder = $crate::composite::SszDecoderBuilder::new(&bytes);
                $(builder.register_type::<$ty>()?;)+
                let mut decoder = builder.build()?;
                Ok(Self {
                    $($field: decoder.decode_next::<$ty>()?,)+
                })
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                $crate::container::fmt_container(self, f)
            }
        }
    };
}
