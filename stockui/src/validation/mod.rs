//! Fluent validation for form widgets.
//!
//! ```ignore
//! use stockui::validation::Validator;
//!
//! let result = Validator::new()
//!     .field(&email, "email")
//!         .required("Email address is required")
//!         .pattern(&EMAIL_RE, "Please enter a valid email address")
//!     .field(&password, "password")
//!         .required("Password is required")
//!         .min_length(8, "Password must be at least 8 characters")
//!     .validate();
//!
//! if let Some(id) = result.first_invalid_widget() {
//!     focus.focus(id);
//! }
//! ```
//!
//! Each field reports only its first failing rule, and the message lands on
//! that field's own widget.

mod error_display;
mod result;
mod validatable;
mod validator;

pub use error_display::ErrorDisplay;
pub use result::{FieldError, ValidationResult};
pub use validatable::Validatable;
pub use validator::{FieldBuilder, Validator};
