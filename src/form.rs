use crate::{
    core::{
        FieldValue,
        FormError,
        SearchCriteria,
    },
    schema::{
        FieldDescriptor,
        FieldKind,
        FieldSchema,
    },
};

/// Live state of one control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlState {
    Text(String),
    Choice { selected: usize },
    Toggle(bool),
    /// One flag per option; at most one is set.
    Exclusive { flags: Vec<bool> },
}

/// One rendered form control: the descriptor it came from plus its state.
#[derive(Debug, Clone)]
pub struct Control {
    descriptor: FieldDescriptor,
    state: ControlState,
}

impl Control {
    fn new(descriptor: FieldDescriptor) -> Self {
        let state = Self::initial_state(&descriptor);
        Self { descriptor, state }
    }

    fn initial_state(descriptor: &FieldDescriptor) -> ControlState {
        let initial = descriptor.initial_value();
        let option_index = |value: &FieldValue| {
            value
                .as_str()
                .and_then(|option| descriptor.options().iter().position(|o| o == option))
                .unwrap_or(0)
        };

        match descriptor.kind {
            FieldKind::Text => ControlState::Text(initial.as_str().unwrap_or_default().to_string()),
            FieldKind::Choice => ControlState::Choice { selected: option_index(&initial) },
            FieldKind::BooleanToggle => ControlState::Toggle(initial.as_bool().unwrap_or(false)),
            FieldKind::ExclusiveChoice => {
                let selected = option_index(&initial);
                let flags = (0..descriptor.options().len()).map(|i| i == selected).collect();
                ControlState::Exclusive { flags }
            }
        }
    }

    pub fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn kind(&self) -> FieldKind {
        self.descriptor.kind
    }

    pub fn options(&self) -> &[String] {
        self.descriptor.options()
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    /// Editable buffer of a text control.
    pub fn text_mut(&mut self) -> Option<&mut String> {
        match &mut self.state {
            ControlState::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn toggle_mut(&mut self) -> Option<&mut bool> {
        match &mut self.state {
            ControlState::Toggle(on) => Some(on),
            _ => None,
        }
    }

    pub fn selected_index(&self) -> Option<usize> {
        match &self.state {
            ControlState::Choice { selected } => Some(*selected),
            ControlState::Exclusive { flags } => flags.iter().position(|&on| on),
            ControlState::Text(_) | ControlState::Toggle(_) => None,
        }
    }

    /// Selects an option of a choice or exclusive control. For exclusive
    /// controls every other flag of the field is cleared.
    pub fn select_index(&mut self, index: usize) -> bool {
        if index >= self.descriptor.options().len() {
            return false;
        }

        match &mut self.state {
            ControlState::Choice { selected } => {
                *selected = index;
                true
            }
            ControlState::Exclusive { flags } => {
                for (i, flag) in flags.iter_mut().enumerate() {
                    *flag = i == index;
                }
                true
            }
            ControlState::Text(_) | ControlState::Toggle(_) => false,
        }
    }

    pub fn value(&self) -> FieldValue {
        match &self.state {
            ControlState::Text(text) => FieldValue::Text(text.clone()),
            ControlState::Toggle(on) => FieldValue::Toggle(*on),
            ControlState::Choice { .. } | ControlState::Exclusive { .. } => FieldValue::Selected(
                self.selected_index()
                    .and_then(|i| self.options().get(i))
                    .cloned()
                    .unwrap_or_default(),
            ),
        }
    }

    fn reset(&mut self) {
        self.state = Self::initial_state(&self.descriptor);
    }

    fn expect_kind(&self, expected: FieldKind) -> Result<(), FormError> {
        if self.kind() == expected {
            Ok(())
        } else {
            Err(FormError::KindMismatch {
                field: self.name().to_string(),
                expected,
                actual: self.kind(),
            })
        }
    }

    fn option_position(&self, option: &str) -> Result<usize, FormError> {
        self.options().iter().position(|o| o == option).ok_or_else(|| FormError::UnknownOption {
            field: self.name().to_string(),
            option: option.to_string(),
        })
    }
}

/// The controls of one rendered form. Dropping it drops every control; a
/// new category always gets a fresh handle.
#[derive(Debug, Clone)]
pub struct FormHandle {
    controls: Vec<Control>,
}

impl FormHandle {
    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn controls_mut(&mut self) -> &mut [Control] {
        &mut self.controls
    }

    /// Reads the controls as they are right now.
    pub fn current_values(&self) -> SearchCriteria {
        self.controls.iter().map(|control| (control.name().to_string(), control.value())).collect()
    }

    pub fn set_text(&mut self, field: &str, value: impl Into<String>) -> Result<(), FormError> {
        let control = self.control_mut(field)?;
        control.expect_kind(FieldKind::Text)?;
        if let Some(text) = control.text_mut() {
            *text = value.into();
        }
        Ok(())
    }

    pub fn set_toggle(&mut self, field: &str, on: bool) -> Result<(), FormError> {
        let control = self.control_mut(field)?;
        control.expect_kind(FieldKind::BooleanToggle)?;
        if let Some(flag) = control.toggle_mut() {
            *flag = on;
        }
        Ok(())
    }

    pub fn select_option(&mut self, field: &str, option: &str) -> Result<(), FormError> {
        let control = self.control_mut(field)?;
        control.expect_kind(FieldKind::Choice)?;
        let index = control.option_position(option)?;
        control.select_index(index);
        Ok(())
    }

    pub fn select_exclusive(&mut self, field: &str, option: &str) -> Result<(), FormError> {
        let control = self.control_mut(field)?;
        control.expect_kind(FieldKind::ExclusiveChoice)?;
        let index = control.option_position(option)?;
        control.select_index(index);
        Ok(())
    }

    pub fn reset_to_defaults(&mut self) {
        for control in &mut self.controls {
            control.reset();
        }
    }

    fn control_mut(&mut self, field: &str) -> Result<&mut Control, FormError> {
        self.controls
            .iter_mut()
            .find(|control| control.name() == field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }
}

pub struct FormRenderer;

impl FormRenderer {
    /// One control per field, in schema order.
    pub fn render(schema: &FieldSchema) -> FormHandle {
        FormHandle { controls: schema.fields().iter().cloned().map(Control::new).collect() }
    }
}
