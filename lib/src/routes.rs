//! Canonical paths of the account pages as plain string constants.
//!
//! Consumers matching on literal paths rely on these exact values. They must
//! stay in sync with [`Page::path`](crate::Page::path).

pub const CHANGE_EMAIL: &str = "/change-email";
pub const CHANGE_PASSWORD: &str = "/change-password";
pub const CREDENTIALS: &str = "/credentials";
pub const GENERATE: &str = "/generate";

pub const LOGIN: &str = "/login";
pub const RECOVER: &str = "/recover";
pub const SIGNUP: &str = "/signup";

pub const TWO_FACTOR_SETUP: &str = "/two-factor/setup";
pub const TWO_FACTOR_VERIFY: &str = "/two-factor/verify";
pub const TWO_FACTOR_RECOVER: &str = "/two-factor/recover";

pub const VERIFY: &str = "/verify";
