/// What kind of input a field takes. Only `Email` is validated beyond presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
  Text,
  Email,
  Phone,
  Message
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
  pub key: &'static str,
  pub label: &'static str,
  pub required: bool,
  pub kind: FieldKind
}

const fn field(key: &'static str, label: &'static str, required: bool, kind: FieldKind) -> FieldSpec {
  FieldSpec { key, label, required, kind }
}

/// Customer details collected when asking about a specific product
pub const CHECKOUT_FIELDS: [FieldSpec; 9] = [
  field("first_name", "First Name", true, FieldKind::Text),
  field("last_name", "Last Name", true, FieldKind::Text),
  field("email", "Email Address", true, FieldKind::Email),
  field("phone", "Phone Number", true, FieldKind::Phone),
  field("company", "Company", false, FieldKind::Text),
  field("address", "Address", true, FieldKind::Text),
  field("city", "City", true, FieldKind::Text),
  field("country", "Country", true, FieldKind::Text),
  field("message", "Additional Information", false, FieldKind::Message)
];

/// The general "Send Us a Message" form
pub const CONTACT_FIELDS: [FieldSpec; 5] = [
  field("name", "Your Name", true, FieldKind::Text),
  field("email", "Email Address", true, FieldKind::Email),
  field("phone", "Phone Number", false, FieldKind::Phone),
  field("subject", "Subject", true, FieldKind::Text),
  field("message", "Message", true, FieldKind::Message)
];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
  #[error("{label} is required")]
  Missing { field: usize, label: &'static str },

  #[error("{label} must be an email address")]
  InvalidEmail { field: usize, label: &'static str }
}

impl ValidationError {
  /// Index of the offending field
  pub fn field(&self) -> usize {
    match self {
      ValidationError::Missing { field, .. } | ValidationError::InvalidEmail { field, .. } => *field
    }
  }
}

/// Free text values for a fixed set of fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
  specs: &'static [FieldSpec],
  values: Vec<String>
}

impl Form {
  pub fn new(specs: &'static [FieldSpec]) -> Self {
    Form { specs, values: vec![String::new(); specs.len()] }
  }

  pub fn specs(&self) -> &'static [FieldSpec] { self.specs }

  pub fn len(&self) -> usize { self.specs.len() }

  /// Value of the field with `key`, empty for unknown keys
  pub fn get(&self, key: &str) -> &str {
    self.position(key).map_or("", |i| self.values[i].as_str())
  }

  #[cfg(test)]
  pub fn set(&mut self, key: &str, value: impl Into<String>) {
    if let Some(i) = self.position(key) {
      self.values[i] = value.into();
    }
  }

  pub fn value(&self, index: usize) -> &str {
    self.values.get(index).map_or("", String::as_str)
  }

  pub fn value_mut(&mut self, index: usize) -> Option<&mut String> {
    self.values.get_mut(index)
  }

  pub fn clear(&mut self) {
    self.values.iter_mut().for_each(String::clear);
  }

  pub fn is_empty(&self) -> bool {
    self.values.iter().all(String::is_empty)
  }

  /// Checks fields in display order and reports the first problem
  pub fn validate(&self) -> Result<(), ValidationError> {
    for (field, (spec, value)) in self.specs.iter().zip(&self.values).enumerate() {
      let value = value.trim();

      if spec.required && value.is_empty() {
        return Err(ValidationError::Missing { field, label: spec.label });
      }

      if spec.kind == FieldKind::Email && !value.is_empty() && !looks_like_email(value) {
        return Err(ValidationError::InvalidEmail { field, label: spec.label });
      }
    }

    Ok(())
  }

  fn position(&self, key: &str) -> Option<usize> {
    self.specs.iter().position(|s| s.key == key)
  }
}

fn looks_like_email(value: &str) -> bool {
  match value.split_once('@') {
    Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !value.contains(char::is_whitespace),
    None => false
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn filled_contact() -> Form {
    let mut form = Form::new(&CONTACT_FIELDS);
    form.set("name", "Ayesha Khan");
    form.set("email", "ayesha@clinic.pk");
    form.set("subject", "Ventilator service");
    form.set("message", "Do you service Evita units?");
    form
  }

  #[test]
  fn complete_form_validates() {
    assert_eq!(filled_contact().validate(), Ok(()));
  }

  #[test]
  fn first_missing_required_field_is_reported() {
    let mut form = filled_contact();
    form.set("subject", "   ");
    form.set("message", "");

    let err = form.validate().unwrap_err();
    assert_eq!(err, ValidationError::Missing { field: 3, label: "Subject" });
    assert_eq!(err.to_string(), "Subject is required");
  }

  #[test]
  fn optional_fields_may_stay_empty() {
    let mut form = Form::new(&CHECKOUT_FIELDS);
    for spec in CHECKOUT_FIELDS.iter().filter(|s| s.required) {
      form.set(spec.key, "x");
    }
    form.set("email", "buyer@hospital.org");

    assert_eq!(form.validate(), Ok(()));
    assert_eq!(form.get("company"), "");
  }

  #[test]
  fn email_needs_both_halves() {
    let mut form = filled_contact();
    for bad in ["ayesha", "@clinic.pk", "ayesha@", "a b@clinic.pk"] {
      form.set("email", bad);
      assert_eq!(form.validate(), Err(ValidationError::InvalidEmail { field: 1, label: "Email Address" }), "{}", bad);
    }
  }

  #[test]
  fn clear_empties_every_field() {
    let mut form = filled_contact();
    form.clear();
    assert!(form.is_empty());
    assert_eq!(form.len(), CONTACT_FIELDS.len());
  }
}
