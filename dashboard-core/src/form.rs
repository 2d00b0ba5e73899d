//! Named-field form model
//!
//! Views keep editable input in a [`FormModel`] rather than in the store:
//! the form is local to the view and only flows into the store when the view
//! builds a command from it.

/// Errors from form field access
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("form has no field named `{0}`")]
    UnknownField(String),
}

/// A single named value with the default it was created with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    name: String,
    value: String,
    default: String,
}

impl Field {
    fn new(name: impl Into<String>, default: impl Into<String>) -> Self {
        let default = default.into();
        Self {
            name: name.into(),
            value: default.clone(),
            default,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn default_value(&self) -> &str {
        &self.default
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Whether the value differs from the default
    pub fn is_dirty(&self) -> bool {
        self.value != self.default
    }
}

/// Builds [`FormModel`]s from `(name, default)` pairs
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBuilder;

impl FormBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Create a form with one field per pair, in the given order
    ///
    /// A repeated name keeps the first default.
    pub fn group<I, N, V>(&self, fields: I) -> FormModel
    where
        I: IntoIterator<Item = (N, V)>,
        N: Into<String>,
        V: Into<String>,
    {
        let mut model = FormModel { fields: Vec::new() };
        for (name, default) in fields {
            let name = name.into();
            if model.position(&name).is_none() {
                model.fields.push(Field::new(name, default));
            }
        }
        model
    }
}

/// Mutable container of named fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormModel {
    fields: Vec<Field>,
}

impl FormModel {
    pub fn get(&self, name: &str) -> Result<&Field, FormError> {
        self.position(name)
            .map(|i| &self.fields[i])
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Field, FormError> {
        match self.position(name) {
            Some(i) => Ok(&mut self.fields[i]),
            None => Err(FormError::UnknownField(name.to_string())),
        }
    }

    /// Shorthand for `get(name)?.value()`
    pub fn value(&self, name: &str) -> Result<&str, FormError> {
        self.get(name).map(Field::value)
    }

    /// Shorthand for `get_mut(name)?.set_value(value)`
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        self.get_mut(name)?.set_value(value);
        Ok(())
    }

    /// Restore every field to its default
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.value = field.default.clone();
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.fields.iter().any(Field::is_dirty)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}
