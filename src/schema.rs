use std::{
    collections::HashSet,
    fmt,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::{
    FieldValue,
    SchemaError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Text,
    Choice,
    BooleanToggle,
    ExclusiveChoice,
}

impl FieldKind {
    pub fn needs_options(self) -> bool {
        matches!(self, FieldKind::Choice | FieldKind::ExclusiveChoice)
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Choice => "choice",
            FieldKind::BooleanToggle => "toggle",
            FieldKind::ExclusiveChoice => "exclusive choice",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
    pub options: Option<Vec<String>>,
    pub default: Option<FieldValue>,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self { name: name.into(), kind, options: None, default: None }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Text)
    }

    pub fn toggle(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::BooleanToggle)
    }

    pub fn choice<S: Into<String>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(name, FieldKind::Choice).with_options(options)
    }

    pub fn exclusive_choice<S: Into<String>>(
        name: impl Into<String>,
        options: impl IntoIterator<Item = S>,
    ) -> Self {
        Self::new(name, FieldKind::ExclusiveChoice).with_options(options)
    }

    pub fn with_options<S: Into<String>>(mut self, options: impl IntoIterator<Item = S>) -> Self {
        self.options = Some(options.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }

    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }

    /// Value the control starts with: the explicit default if one was given,
    /// otherwise empty text, the first option, or `false`.
    pub fn initial_value(&self) -> FieldValue {
        match (self.kind, &self.default) {
            (_, Some(value)) => value.clone(),
            (FieldKind::Text, None) => FieldValue::Text(String::new()),
            (FieldKind::Choice | FieldKind::ExclusiveChoice, None) => {
                FieldValue::Selected(self.options().first().cloned().unwrap_or_default())
            }
            (FieldKind::BooleanToggle, None) => FieldValue::Toggle(false),
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.kind.needs_options() {
            match &self.options {
                None => return Err(SchemaError::MissingOptions(self.name.clone())),
                Some(options) if options.is_empty() => {
                    return Err(SchemaError::EmptyOptions(self.name.clone()))
                }
                Some(_) => {}
            }
        }

        let Some(default) = &self.default else {
            return Ok(());
        };

        let reason = match (self.kind, default) {
            (FieldKind::Text, FieldValue::Text(_)) => None,
            (FieldKind::BooleanToggle, FieldValue::Toggle(_)) => None,
            (FieldKind::Choice | FieldKind::ExclusiveChoice, FieldValue::Selected(option)) => {
                if self.options().iter().any(|o| o == option) {
                    None
                } else {
                    Some(format!("'{option}' is not one of the options"))
                }
            }
            (kind, value) => Some(format!("{value:?} does not fit a {kind} field")),
        };

        match reason {
            Some(reason) => Err(SchemaError::InvalidDefault { field: self.name.clone(), reason }),
            None => Ok(()),
        }
    }
}

/// Ordered, validated list of form fields. Order is layout order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::new();
        for field in &fields {
            field.validate()?;
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField(field.name.clone()));
            }
        }

        Ok(Self { fields })
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|field| field.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Pinned attribute names, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderSchema {
    names: Vec<String>,
}

impl HeaderSchema {
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Result<Self, SchemaError> {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();

        let mut seen = HashSet::new();
        for name in &names {
            if name.trim().is_empty() {
                return Err(SchemaError::EmptyHeaderName);
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateHeader(name.clone()));
            }
        }

        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn choice_without_options_is_rejected() {
        let result = FieldSchema::new(vec![
            FieldDescriptor::text("Model"),
            FieldDescriptor::new("Manufacturer", FieldKind::Choice),
        ]);
        assert_eq!(result, Err(SchemaError::MissingOptions("Manufacturer".into())));

        let result = FieldSchema::new(vec![FieldDescriptor::exclusive_choice(
            "Socket",
            Vec::<String>::new(),
        )]);
        assert_eq!(result, Err(SchemaError::EmptyOptions("Socket".into())));
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let result = FieldSchema::new(vec![
            FieldDescriptor::text("Model"),
            FieldDescriptor::toggle("Model"),
        ]);
        assert_eq!(result, Err(SchemaError::DuplicateField("Model".into())));
    }

    #[test]
    fn defaults_must_fit_the_field() {
        let bad_option = FieldDescriptor::choice("Manufacturer", ["Intel", "AMD"])
            .with_default(FieldValue::Selected("VIA".into()));
        assert!(matches!(
            FieldSchema::new(vec![bad_option]),
            Err(SchemaError::InvalidDefault { .. })
        ));

        let bad_kind =
            FieldDescriptor::toggle("Unlocked").with_default(FieldValue::Text("yes".into()));
        assert!(matches!(
            FieldSchema::new(vec![bad_kind]),
            Err(SchemaError::InvalidDefault { .. })
        ));

        let good = FieldDescriptor::choice("Manufacturer", ["Intel", "AMD"])
            .with_default(FieldValue::Selected("AMD".into()));
        assert!(FieldSchema::new(vec![good]).is_ok());
    }

    #[test]
    fn header_rejects_blank_and_duplicate_names() {
        assert_eq!(HeaderSchema::new(["Model", " "]), Err(SchemaError::EmptyHeaderName));
        assert_eq!(
            HeaderSchema::new(["Model", "Cores", "Model"]),
            Err(SchemaError::DuplicateHeader("Model".into()))
        );
        assert_eq!(HeaderSchema::new(["Model", "Cores"]).unwrap().len(), 2);
    }

    fn arbitrary_kind() -> impl Strategy<Value = FieldKind> {
        prop_oneof![
            Just(FieldKind::Text),
            Just(FieldKind::Choice),
            Just(FieldKind::BooleanToggle),
            Just(FieldKind::ExclusiveChoice),
        ]
    }

    proptest! {
        #[test]
        fn any_option_less_choice_field_fails(
            kinds in prop::collection::vec(arbitrary_kind(), 1..8),
            broken in any::<prop::sample::Index>(),
        ) {
            let broken = broken.index(kinds.len());
            let fields: Vec<FieldDescriptor> = kinds
                .iter()
                .enumerate()
                .map(|(i, kind)| {
                    let name = format!("field_{i}");
                    if i == broken {
                        FieldDescriptor::new(name, FieldKind::Choice)
                    } else if kind.needs_options() {
                        FieldDescriptor::new(name, *kind).with_options(["a", "b"])
                    } else {
                        FieldDescriptor::new(name, *kind)
                    }
                })
                .collect();

            prop_assert!(matches!(
                FieldSchema::new(fields),
                Err(SchemaError::MissingOptions(_))
            ));
        }
    }
}
