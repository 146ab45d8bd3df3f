//! Caller roles allowed to upload images

use strum::{Display, EnumString};

/// Roles that may store images through the upload route
///
/// Roles are compared verbatim: `Admin` or `seller ` are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, Display)]
#[strum(serialize_all = "lowercase")]
pub enum UploaderRole {
    Admin,
    Seller,
}

impl UploaderRole {
    /// Parses a caller-supplied role, `None` when it may not upload
    #[must_use]
    pub fn from_claimed(role: &str) -> Option<Self> {
        role.parse().ok()
    }
}
