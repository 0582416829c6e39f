use tracing::{error, info};

use crate::catalog::CatalogEntry;
use super::{EmailError, Form, InquiryRequest, TemplateKind, ValidationError, CHECKOUT_FIELDS, CONTACT_FIELDS};

/// Banner above the form after a submission attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
  Success(&'static str),
  Error(String)
}

/// Owns one form and the state of submitting it: focus, sending flag, banner.
///
/// Submission is split in two so the caller can send without blocking the
/// screen: `begin_submit` validates and flattens, `finish_submit` applies
/// whatever the email service answered.
#[derive(Debug, Clone)]
pub struct InquiryController {
  kind: TemplateKind,
  form: Form,
  focus: usize,
  submitting: bool,
  banner: Option<Banner>
}

impl InquiryController {
  pub fn contact() -> Self { Self::with(TemplateKind::Contact, Form::new(&CONTACT_FIELDS)) }

  pub fn checkout() -> Self { Self::with(TemplateKind::Checkout, Form::new(&CHECKOUT_FIELDS)) }

  fn with(kind: TemplateKind, form: Form) -> Self {
    InquiryController { kind, form, focus: 0, submitting: false, banner: None }
  }

  pub fn kind(&self) -> TemplateKind { self.kind }
  pub fn form(&self) -> &Form { &self.form }
  pub fn focus(&self) -> usize { self.focus }
  pub fn is_submitting(&self) -> bool { self.submitting }
  pub fn banner(&self) -> Option<&Banner> { self.banner.as_ref() }

  pub fn focus_next(&mut self) {
    self.focus = (self.focus + 1) % self.form.len();
  }

  pub fn focus_previous(&mut self) {
    self.focus = (self.focus + self.form.len() - 1) % self.form.len();
  }

  pub fn type_char(&mut self, c: char) {
    if self.submitting { return; }
    if let Some(value) = self.form.value_mut(self.focus) { value.push(c); }
  }

  pub fn backspace(&mut self) {
    if self.submitting { return; }
    if let Some(value) = self.form.value_mut(self.focus) { value.pop(); }
  }

  /// Validates and builds the message. Checkout inquiries need the product they're about.
  /// On a validation problem the offending field gets focus and nothing is sent.
  pub fn begin_submit(&mut self, product: Option<&CatalogEntry>, sales_inbox: &str) -> Result<InquiryRequest, ValidationError> {
    if let Err(e) = self.form.validate() {
      self.focus = e.field();
      return Err(e);
    }

    let request = match (self.kind, product) {
      (TemplateKind::Checkout, Some(entry)) => InquiryRequest::checkout(&self.form, entry, sales_inbox),
      // a checkout form without a product is never shown, treat it as a plain message
      (TemplateKind::Checkout, None) | (TemplateKind::Contact, _) => InquiryRequest::contact(&self.form, sales_inbox)
    };

    self.submitting = true;
    self.banner = None;
    Ok(request)
  }

  /// Success clears the form, failure keeps it for another try
  pub fn finish_submit(&mut self, outcome: Result<(), EmailError>) {
    self.submitting = false;

    match outcome {
      Ok(()) => {
        info!(kind = ?self.kind, "inquiry sent");
        self.form.clear();
        self.focus = 0;
        self.banner = Some(Banner::Success(match self.kind {
          TemplateKind::Checkout => "Your inquiry has been sent successfully! We will contact you soon.",
          TemplateKind::Contact => "Your message has been sent successfully! We will get back to you soon."
        }));
      },
      Err(e) => {
        error!(kind = ?self.kind, error = %e, "failed to send email");
        self.banner = Some(Banner::Error(match self.kind {
          TemplateKind::Checkout => "Failed to send your inquiry. Please try again later.".into(),
          TemplateKind::Contact => "Failed to send your message. Please try again later.".into()
        }));
      }
    }
  }
}
