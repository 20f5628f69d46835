//! HTTP method types for documented endpoints.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// HTTP methods an [`Endpoint`](crate::Endpoint) can be documented under.
///
/// The `Display` form is upper case (`GET`); the key used inside a Swagger
/// path item is the lower-case form returned by [`RestMethod::as_path_key`].
///
/// ## Examples
///
/// ```rust
/// use apidoc::RestMethod;
///
/// let method = RestMethod::Get;
/// assert_eq!(method.to_string(), "GET");
/// assert_eq!(method.as_path_key(), "get");
///
/// // Parse from string
/// let parsed: RestMethod = "POST".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Post);
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// HTTP OPTIONS - Query supported methods.
    Options,
}

impl RestMethod {
    /// The lower-case key used for this method inside a Swagger path item.
    pub fn as_path_key(&self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
            Self::Head => "head",
            Self::Options => "options",
        }
    }

    /// Returns `true` if this method typically has a request body.
    ///
    /// Bodies declared on any other method are still documented, with a
    /// warning.
    pub fn has_body(&self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_display() {
        assert_eq!(RestMethod::Get.to_string(), "GET");
        assert_eq!(RestMethod::Post.to_string(), "POST");
        assert_eq!(RestMethod::Delete.to_string(), "DELETE");
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("GET".parse::<RestMethod>().unwrap(), RestMethod::Get);
        assert_eq!("post".parse::<RestMethod>().unwrap(), RestMethod::Post);
        assert_eq!("Delete".parse::<RestMethod>().unwrap(), RestMethod::Delete);
        assert!("FETCH".parse::<RestMethod>().is_err());
    }

    #[test]
    fn test_path_key_matches_lowercased_display() {
        for method in RestMethod::iter() {
            assert_eq!(method.as_path_key(), method.to_string().to_lowercase());
        }
    }

    #[test]
    fn test_has_body() {
        assert!(!RestMethod::Get.has_body());
        assert!(RestMethod::Post.has_body());
        assert!(RestMethod::Put.has_body());
        assert!(RestMethod::Patch.has_body());
        assert!(!RestMethod::Delete.has_body());
        assert!(!RestMethod::Head.has_body());
    }

    #[test]
    fn test_serde_uses_upper_case() {
        let json = serde_json::to_string(&RestMethod::Patch).unwrap();
        assert_eq!(json, "\"PATCH\"");
        let parsed: RestMethod = serde_json::from_str("\"OPTIONS\"").unwrap();
        assert_eq!(parsed, RestMethod::Options);
    }
}
