//! Construction-time validation for containers.
//!
//! [`ContainerBuilder`] collects type-erased field values by name and checks
//! them eagerly when [`build`](ContainerBuilder::build) is called:
//!
//! - every name must be a declared field, set once;
//! - every declared field must be present;
//! - every value must have the declared field type.
//!
//! The result is a finished, immutable container.

use std::any::{type_name, Any};
use std::collections::BTreeMap;
use std::marker::PhantomData;

use crate::container::{SszContainer, SszValue};
use crate::error::{short_type_name, ValidationError};

/// Field values keyed by name, awaiting assembly into a container.
pub struct FieldValues {
    container: &'static str,
    entries: BTreeMap<String, Box<dyn SszValue>>,
}

impl FieldValues {
    fn new(container: &'static str) -> Self {
        Self {
            container,
            entries: BTreeMap::new(),
        }
    }

    /// Remove the named value, checking that it is a `T`.
    pub fn take<T: Any>(&mut self, field: &'static str) -> Result<T, ValidationError> {
        let value = self
            .entries
            .remove(field)
            .ok_or(ValidationError::MissingField {
                container: self.container,
                field,
            })?;

        let actual = value.value_type_name();
        value
            .into_any()
            .downcast::<T>()
            .map(|boxed| *boxed)
            .map_err(|_| ValidationError::WrongType {
                container: self.container,
                field,
                expected: short_type_name::<T>(),
                actual,
            })
    }
}

/// Builder for a container of type `C`.
pub struct ContainerBuilder<C> {
    values: FieldValues,
    duplicate: Option<String>,
    _container: PhantomData<fn() -> C>,
}

impl<C: SszContainer> ContainerBuilder<C> {
    pub fn new() -> Self {
        Self {
            values: FieldValues::new(C::NAME),
            duplicate: None,
            _container: PhantomData,
        }
    }

    /// Set a field.
    pub fn set<T: SszValue>(mut self, field: &str, value: T) -> Self {
        let previous = self.values.entries.insert(field.to_string(), Box::new(value));
        if previous.is_some() && self.duplicate.is_none() {
            self.duplicate = Some(field.to_string());
        }
        self
    }

    /// Validate the collected fields and assemble the container.
    pub fn build(self) -> Result<C, ValidationError> {
        let result = self.validate();
        if let Err(e) = &result {
            tracing::debug!(container = C::NAME, error = %e, "container construction rejected");
        }
        result
    }

    fn validate(mut self) -> Result<C, ValidationError> {
        if let Some(field) = self.duplicate {
            return Err(ValidationError::DuplicateField {
                container: C::NAME,
                field,
            });
        }

        if let Some(unknown) = self
            .values
            .entries
            .keys()
            .find(|name| !C::FIELD_NAMES.iter().any(|declared| *declared == name.as_str()))
        {
            return Err(ValidationError::UnknownField {
                container: C::NAME,
                field: unknown.clone(),
            });
        }

        C::from_fields(&mut self.values)
    }
}

impl<C: SszContainer> Default for ContainerBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for ContainerBuilder<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerBuilder")
            .field("container", &type_name::<C>())
            .field("fields", &self.values.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::test_types::{Blob, U16};
    use crate::SszContainer;

    crate::ssz_container! {
        #[derive(Clone, PartialEq, Eq)]
        pub struct Entry {
            key: U16,
            value: Blob,
        }
    }

    #[test]
    fn test_build_valid() {
        let entry = Entry::builder()
            .set("value", Blob(vec![1, 2]))
            .set("key", U16(9))
            .build()
            .unwrap();

        assert_eq!(entry, Entry::new(U16(9), Blob(vec![1, 2])));
        // Declaration order, not insertion order.
        let names: Vec<_> = entry.fields().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["key", "value"]);
    }

    #[test]
    fn test_missing_field() {
        let err = Entry::builder().set("key", U16(1)).build().unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingField {
                container: "Entry",
                field: "value"
            }
        );
    }

    #[test]
    fn test_unknown_field() {
        let err = Entry::builder()
            .set("key", U16(1))
            .set("value", Blob(vec![]))
            .set("extra", U16(2))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownField {
                container: "Entry",
                field: "extra".into()
            }
        );
    }

    #[test]
    fn test_duplicate_field() {
        let err = Entry::builder()
            .set("key", U16(1))
            .set("key", U16(2))
            .set("value", Blob(vec![]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateField {
                container: "Entry",
                field: "key".into()
            }
        );
    }

    #[test]
    fn test_wrong_type() {
        let err = Entry::builder()
            .set("key", Blob(vec![1]))
            .set("value", Blob(vec![]))
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongType {
                container: "Entry",
                field: "key",
                expected: "U16",
                actual: "Blob",
            }
        );
    }

    #[test]
    fn test_builder_debug() {
        let builder = Entry::builder().set("key", U16(1));
        let debug = format!("{:?}", builder);
        assert!(debug.starts_with("ContainerBuilder"));
        assert!(debug.contains("\"key\""));
    }
}
