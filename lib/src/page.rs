use std::fmt::{Display, Formatter};

use strum::IntoEnumIterator;

use crate::error::{ErrorKind, Result};
use crate::routes;

/// Account page known to the application.
///
/// Each variant carries a fixed, canonical path (see [`Page::path`]) and a
/// symbolic name in `SCREAMING_SNAKE_CASE` (see [`Page::name`]). Declaration
/// order is the canonical order used for iteration and listings.
///
/// Parsing with [`str::parse`] and (de)serialization both go through the
/// symbolic name, e.g. `"TWO_FACTOR_SETUP"`. Display prints the path.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    PartialEq,
    Hash,
    Ord,
    PartialOrd,
    Deserialize,
    Serialize,
    strum::EnumCount,
    strum::EnumIter,
    strum::EnumString,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Page {
    ChangeEmail,
    ChangePassword,
    Credentials,
    Generate,
    Login,
    Recover,
    Signup,
    TwoFactorSetup,
    TwoFactorVerify,
    TwoFactorRecover,
    Verify,
}

impl Page {
    /// All pages in canonical order.
    pub const ALL: [Page; 11] = [
        Page::ChangeEmail,
        Page::ChangePassword,
        Page::Credentials,
        Page::Generate,
        Page::Login,
        Page::Recover,
        Page::Signup,
        Page::TwoFactorSetup,
        Page::TwoFactorVerify,
        Page::TwoFactorRecover,
        Page::Verify,
    ];

    /// Canonical path of the page, as served without any mount base.
    pub const fn path(self) -> &'static str {
        match self {
            Page::ChangeEmail => routes::CHANGE_EMAIL,
            Page::ChangePassword => routes::CHANGE_PASSWORD,
            Page::Credentials => routes::CREDENTIALS,
            Page::Generate => routes::GENERATE,
            Page::Login => routes::LOGIN,
            Page::Recover => routes::RECOVER,
            Page::Signup => routes::SIGNUP,
            Page::TwoFactorSetup => routes::TWO_FACTOR_SETUP,
            Page::TwoFactorVerify => routes::TWO_FACTOR_VERIFY,
            Page::TwoFactorRecover => routes::TWO_FACTOR_RECOVER,
            Page::Verify => routes::VERIFY,
        }
    }

    /// Symbolic name of the page, e.g. `CHANGE_EMAIL`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    pub fn iter() -> PageIter {
        <Self as IntoEnumIterator>::iter()
    }

    /// Finds the page by its symbolic name. Matching is case-sensitive.
    pub fn from_name(name: &str) -> Result<Self> {
        name.parse()
            .map_err(|_| ErrorKind::PageNotFound(name.to_string()).into())
    }

    /// Finds the page by its canonical path.
    pub fn from_path(path: &str) -> Result<Self> {
        Self::iter()
            .find(|page| page.path() == path)
            .ok_or_else(|| ErrorKind::PathNotFound(path.to_string()).into())
    }
}

impl Display for Page {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

impl AsRef<str> for Page {
    fn as_ref(&self) -> &str {
        self.path()
    }
}
