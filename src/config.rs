/// Everything here is baked in when the binary is built, the same way the
/// storefront bundle carried its endpoints. There is no config file to read
/// at runtime.
#[derive(Debug, Clone)]
pub struct Config {
  /// Base of the catalog API, without a trailing slash
  pub api_url: String,
  pub images: ImageBases,
  pub email: EmailSettings
}

/// Where product photos live, one bucket per category
#[derive(Debug, Clone)]
pub struct ImageBases {
  pub machine: String,
  pub instrument: String,
  pub part: String
}

/// EmailJS credentials and the inbox inquiries are addressed to
#[derive(Debug, Clone)]
pub struct EmailSettings {
  pub endpoint: String,
  pub service_id: String,
  pub contact_template_id: String,
  pub checkout_template_id: String,
  pub public_key: String,
  pub sales_inbox: String
}

const DEFAULT_API_URL: &str = "http://localhost:3000";
const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";
const DEFAULT_SALES_INBOX: &str = "info@gmpol.com";

impl Config {
  pub fn baked() -> Self {
    let api_url = base(option_env!("MEDCAT_API_URL").unwrap_or(DEFAULT_API_URL));

    Config {
      images: ImageBases {
        machine: base(option_env!("MEDCAT_MACHINE_IMAGE_URL").unwrap_or("http://localhost:3000/images/machines")),
        instrument: base(option_env!("MEDCAT_INSTRUMENT_IMAGE_URL").unwrap_or("http://localhost:3000/images/instruments")),
        part: base(option_env!("MEDCAT_PART_IMAGE_URL").unwrap_or("http://localhost:3000/images/parts"))
      },
      email: EmailSettings {
        endpoint: option_env!("MEDCAT_EMAILJS_ENDPOINT").unwrap_or(DEFAULT_EMAILJS_ENDPOINT).into(),
        service_id: option_env!("MEDCAT_EMAILJS_SERVICE_ID").unwrap_or_default().into(),
        contact_template_id: option_env!("MEDCAT_EMAILJS_CONTACT_TEMPLATE_ID").unwrap_or_default().into(),
        checkout_template_id: option_env!("MEDCAT_EMAILJS_CHECKOUT_TEMPLATE_ID").unwrap_or_default().into(),
        public_key: option_env!("MEDCAT_EMAILJS_PUBLIC_KEY").unwrap_or_default().into(),
        sales_inbox: option_env!("MEDCAT_SALES_EMAIL").unwrap_or(DEFAULT_SALES_INBOX).into()
      },
      api_url
    }
  }
}

// urls are always joined with an explicit '/'
fn base(url: &str) -> String {
  url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn trailing_slashes_are_trimmed() {
    assert_eq!(base("https://cdn.example.com/machines/"), "https://cdn.example.com/machines");
    assert_eq!(base(" https://api.example.com// "), "https://api.example.com");
  }

  #[test]
  fn baked_config_always_has_an_inbox_and_endpoint() {
    let config = Config::baked();
    assert!(!config.email.sales_inbox.is_empty());
    assert!(config.email.endpoint.starts_with("http"));
    assert!(!config.api_url.ends_with('/'));
  }
}
