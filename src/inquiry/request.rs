use indexmap::IndexMap;

use crate::catalog::CatalogEntry;
use super::Form;

/// Flat parameter map handed to the email template, in a stable order
pub type TemplateParams = IndexMap<String, String>;

/// Which of the two email templates a message goes through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateKind {
  Contact,
  Checkout
}

/// One message ready to send. Never stored anywhere.
#[derive(Debug, Clone, PartialEq)]
pub struct InquiryRequest {
  pub template: TemplateKind,
  pub params: TemplateParams
}

impl InquiryRequest {
  /// Contact page message
  pub fn contact(form: &Form, sales_inbox: &str) -> Self {
    let params = params([
      ("to_email", sales_inbox.to_string()),
      ("from_name", form.get("name").to_string()),
      ("from_email", form.get("email").to_string()),
      ("phone", form.get("phone").to_string()),
      ("subject", form.get("subject").to_string()),
      ("message", form.get("message").to_string())
    ]);

    InquiryRequest { template: TemplateKind::Contact, params }
  }

  /// Product inquiry: the customer's details plus a flattened copy of the product
  pub fn checkout(form: &Form, entry: &CatalogEntry, sales_inbox: &str) -> Self {
    let (name, description, features, specifications) = match entry {
      CatalogEntry::Machine(m) => (
        m.name.clone(),
        m.metadata.description.clone(),
        m.metadata.features.join("\n"),
        m.specifications_json()
      ),
      CatalogEntry::Instrument(i) => (
        format!("Instrument {}", unnamed(i.name.as_deref())),
        "Instrument Inquiry".to_string(),
        "N/A".to_string(),
        "N/A".to_string()
      ),
      CatalogEntry::Part(p) => (
        format!("Part {}", unnamed(p.name.as_deref())),
        "Part Inquiry".to_string(),
        "N/A".to_string(),
        "N/A".to_string()
      )
    };

    let params = params([
      ("to_email", sales_inbox.to_string()),
      ("from_name", format!("{} {}", form.get("first_name"), form.get("last_name"))),
      ("from_email", form.get("email").to_string()),
      ("phone", form.get("phone").to_string()),
      ("company", form.get("company").to_string()),
      ("address", form.get("address").to_string()),
      ("city", form.get("city").to_string()),
      ("country", form.get("country").to_string()),
      ("message", form.get("message").to_string()),
      ("product_name", name),
      ("product_description", description),
      ("product_features", features),
      ("product_specifications", specifications)
    ]);

    InquiryRequest { template: TemplateKind::Checkout, params }
  }
}

fn unnamed(name: Option<&str>) -> &str {
  match name {
    Some(n) if !n.is_empty() => n,
    _ => "Unnamed"
  }
}

fn params<const N: usize>(pairs: [(&str, String); N]) -> TemplateParams {
  pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}
