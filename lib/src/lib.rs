//! Named paths for the account pages of a web application.
//!
//! Every page (logging in, signing up, recovering an account, two-factor
//! setup and so on) has a symbolic name and a fixed path. [`Page`] is the
//! typed handle, [`routes`] holds the same paths as plain constants, and
//! [`Registry`] maps pages to the paths they're actually served at, which
//! may include a configured mount base.
//!
//! ```
//! use accounts::{Page, Registry};
//!
//! assert_eq!(Page::TwoFactorSetup.path(), "/two-factor/setup");
//!
//! let registry = Registry::with_base("/accounts").unwrap();
//! assert_eq!(registry.lookup("LOGIN").unwrap(), "/accounts/login");
//! assert_eq!(registry.resolve("/accounts/recover").unwrap(), Page::Recover);
//! ```

#[macro_use]
extern crate serde_derive;

pub mod config;
pub mod error;
pub mod page;
pub mod registry;
pub mod routes;
pub mod tracing;

#[cfg(feature = "axum")]
pub mod axum;

pub use config::Config;
pub use error::{Error, ErrorKind, Result};
pub use page::Page;
pub use registry::Registry;
