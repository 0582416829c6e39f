mod form;
mod request;
mod email;
mod controller;

pub use form::*;
pub use request::*;
pub use email::*;
pub use controller::*;
