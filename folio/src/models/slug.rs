use crate::constants::{LIKES_KEY_PREFIX, MAX_SLUG_LENGTH};
use crate::errors::FolioError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// URL-safe identifier of a post, e.g. `rewriting-my-website-from-scratch`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

impl Slug {
    pub fn parse(value: &str) -> Result<Self, FolioError> {
        let value = value.trim();

        if value.is_empty() {
            return Err(FolioError::ValidationError((
                "slug".to_string(),
                "can not be empty".to_string(),
            )));
        }

        if value.len() > MAX_SLUG_LENGTH {
            return Err(FolioError::ValidationError((
                "slug".to_string(),
                format!("can not be longer than {} characters", MAX_SLUG_LENGTH),
            )));
        }

        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(FolioError::ValidationError((
                "slug".to_string(),
                "may only contain letters, digits, '-' and '_'".to_string(),
            )));
        }

        Ok(Self(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Store key holding the like count of this post.
    pub fn likes_key(&self) -> String {
        format!("{}:{}", LIKES_KEY_PREFIX, self.0)
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Slug {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Slug::parse(s)
    }
}

impl TryFrom<String> for Slug {
    type Error = FolioError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Slug::parse(&value)
    }
}

impl From<Slug> for String {
    fn from(slug: Slug) -> Self {
        slug.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_store_key() {
        let slug = Slug::parse("hello-world").unwrap();

        assert_eq!(slug.likes_key(), "post:likes:hello-world");
    }

    #[test]
    fn rejects_unsafe_slugs() {
        assert!(Slug::parse("").is_err());
        assert!(Slug::parse("../etc/passwd").is_err());
        assert!(Slug::parse("with space").is_err());
        assert!(Slug::parse(&"a".repeat(MAX_SLUG_LENGTH + 1)).is_err());
    }

    #[test]
    fn deserializes_through_validation() {
        let slug: Slug = serde_json::from_str("\"my_post-2\"").unwrap();
        assert_eq!(slug.as_str(), "my_post-2");

        assert!(serde_json::from_str::<Slug>("\"no/slashes\"").is_err());
    }
}
