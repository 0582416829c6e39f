use std::{fmt::{Display, Formatter, Result as FmtResult}, str::FromStr};

use crate::catalog::Category;

/// Which detail rendering applies, taken from the optional last path segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
  Machine,
  Instrument,
  Part
}

impl Origin {
  /// Anything that isn't `instrument` or `part` is a machine, including nothing at all
  pub fn from_segment(segment: Option<&str>) -> Self {
    match segment {
      Some("instrument") => Origin::Instrument,
      Some("part") => Origin::Part,
      _ => Origin::Machine
    }
  }

  pub fn segment(&self) -> Option<&'static str> {
    match self {
      Origin::Machine => None,
      Origin::Instrument => Some("instrument"),
      Origin::Part => Some("part")
    }
  }
}

impl From<Category> for Origin {
  fn from(category: Category) -> Self {
    match category {
      Category::Machines => Origin::Machine,
      Category::Instruments => Origin::Instrument,
      Category::Parts => Origin::Part
    }
  }
}

/// Every screen the client can show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
  Home,
  Products,
  /// `id` is the raw, still percent-encoded path segment
  Detail { id: String, origin: Origin },
  Checkout,
  About,
  Contact
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouteError {
  #[error("no such page: {0}")]
  Unknown(String)
}

impl Route {
  /// Title used by the navbar
  pub fn title(&self) -> &'static str {
    match self {
      Route::Home => "Home",
      Route::Products | Route::Detail { .. } => "Products",
      Route::Checkout => "Checkout",
      Route::About => "About",
      Route::Contact => "Contact"
    }
  }
}

impl FromStr for Route {
  type Err = RouteError;

  fn from_str(path: &str) -> Result<Self, Self::Err> {
    // query and fragment never select a screen
    let bare = path.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    let segments: Vec<&str> = bare.split('/').filter(|s| !s.is_empty()).collect();

    match segments.as_slice() {
      [] => Ok(Route::Home),
      ["products"] => Ok(Route::Products),
      ["products", id] => Ok(Route::Detail { id: id.to_string(), origin: Origin::Machine }),
      ["products", id, origin] => Ok(Route::Detail { id: id.to_string(), origin: Origin::from_segment(Some(*origin)) }),
      ["checkout"] => Ok(Route::Checkout),
      ["about"] => Ok(Route::About),
      ["contact"] => Ok(Route::Contact),
      _ => Err(RouteError::Unknown(path.to_string()))
    }
  }
}

impl Display for Route {
  fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
    match self {
      Route::Home => write!(f, "/"),
      Route::Products => write!(f, "/products"),
      Route::Detail { id, origin } => match origin.segment() {
        Some(segment) => write!(f, "/products/{}/{}", id, segment),
        None => write!(f, "/products/{}", id)
      },
      Route::Checkout => write!(f, "/checkout"),
      Route::About => write!(f, "/about"),
      Route::Contact => write!(f, "/contact")
    }
  }
}
