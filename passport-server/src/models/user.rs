//! Users and the validated fields of the new-user form

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::ValidationError;

/// Name stored when the form leaves it blank
pub const DEFAULT_USER_NAME: &str = "user";

/// Color stored when the form leaves it blank
pub const DEFAULT_USER_COLOR: &str = "red";

/// Maximum length for user names
const MAX_USER_NAME_LEN: usize = 64;

/// Which user the home page shows when the request names none.
///
/// There is no session, so the choice is made again on every request.
pub const DEFAULT_ACTIVE_USER: ActiveUserPolicy = ActiveUserPolicy::First;

/// CSS color: keyword, hex, or a color function such as `rgb(0,0,255)`.
///
/// Colors end up in a style attribute, so function arguments may not contain
/// quotes, semicolons, angle brackets or nested parentheses.
static COLOR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)^(?:
            [a-zA-Z]{1,32}
          | \#(?:[0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})
          | (?i:rgba?|hsla?|hwb|lab|lch|oklab|oklch)\([0-9a-zA-Z.,%/+\-\x20]{1,64}\)
        )$",
    )
    .expect("invalid color regex")
});

/// User record from database
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub color: String,
}

/// Selection rule for the active user on the home page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActiveUserPolicy {
    /// Lowest id, i.e. the first user ever created
    First,
    /// Highest id, i.e. the most recently created user
    MostRecent,
}

impl ActiveUserPolicy {
    /// Pick the active user from a list ordered by id.
    pub fn select<'a>(&self, users: &'a [User]) -> Option<&'a User> {
        match self {
            Self::First => users.first(),
            Self::MostRecent => users.last(),
        }
    }
}

/// Validated user display name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserName(String);

impl UserName {
    /// Create a user name from optional form input.
    ///
    /// Missing or blank input falls back to [`DEFAULT_USER_NAME`].
    ///
    /// # Example
    /// ```
    /// use passport_server::models::UserName;
    ///
    /// assert_eq!(UserName::from_form(None).unwrap().as_str(), "user");
    /// assert_eq!(UserName::from_form(Some(" Alice ")).unwrap().as_str(), "Alice");
    /// ```
    pub fn from_form(input: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = input.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Ok(Self(DEFAULT_USER_NAME.to_owned()));
        }

        if trimmed.chars().count() > MAX_USER_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "name",
                max: MAX_USER_NAME_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated display color tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserColor(String);

impl UserColor {
    /// Create a color from optional form input.
    ///
    /// Missing or blank input falls back to [`DEFAULT_USER_COLOR`].
    /// Anything else must be a color keyword (`teal`), hex (`#0a0`) or a
    /// color function (`rgb(0,170,0)`).
    pub fn from_form(input: Option<&str>) -> Result<Self, ValidationError> {
        let trimmed = input.map(str::trim).unwrap_or_default();
        if trimmed.is_empty() {
            return Ok(Self(DEFAULT_USER_COLOR.to_owned()));
        }

        if !COLOR_RE.is_match(trimmed) {
            return Err(ValidationError::InvalidFormat {
                field: "color",
                reason: "must be a color name, hex value or color function",
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Parse a user id taken from a path segment or form field.
pub fn parse_user_id(raw: &str) -> Result<i32, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::Empty { field: "user id" });
    }

    raw.parse().map_err(|_| ValidationError::InvalidFormat {
        field: "user id",
        reason: "must be an integer",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32) -> User {
        User {
            id,
            name: format!("u{id}"),
            color: "teal".into(),
        }
    }

    #[test]
    fn blank_name_and_color_use_defaults() {
        assert_eq!(UserName::from_form(None).unwrap().as_str(), "user");
        assert_eq!(UserName::from_form(Some("")).unwrap().as_str(), "user");
        assert_eq!(UserName::from_form(Some("   ")).unwrap().as_str(), "user");
        assert_eq!(UserColor::from_form(None).unwrap().as_str(), "red");
        assert_eq!(UserColor::from_form(Some("")).unwrap().as_str(), "red");
    }

    #[test]
    fn name_is_trimmed() {
        let name = UserName::from_form(Some("  Alice ")).unwrap();
        assert_eq!(name.as_str(), "Alice");
    }

    #[test]
    fn name_max_length() {
        let name_64 = "a".repeat(64);
        assert!(UserName::from_form(Some(&name_64)).is_ok());

        let name_65 = "a".repeat(65);
        let err = UserName::from_form(Some(&name_65)).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { max: 64, .. }));
    }

    #[test]
    fn accepts_color_names_and_hex() {
        assert!(UserColor::from_form(Some("blue")).is_ok());
        assert!(UserColor::from_form(Some("#0af")).is_ok());
        assert!(UserColor::from_form(Some("#00AAFF")).is_ok());
        assert!(UserColor::from_form(Some("#00AAFF80")).is_ok());
    }

    #[test]
    fn accepts_color_functions() {
        for color in [
            "rgb(0,0,255)",
            "rgba(0, 0, 255, 0.5)",
            "hsl(120deg 100% 50%)",
            "RGB(10 20 30 / 40%)",
            "oklch(70% 0.1 200)",
        ] {
            assert_eq!(UserColor::from_form(Some(color)).unwrap().as_str(), color);
        }
    }

    #[test]
    fn rejects_color_markup() {
        let err = UserColor::from_form(Some("red; background: url(x)")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "color", .. }));
        assert!(UserColor::from_form(Some("#12345")).is_err());
        assert!(UserColor::from_form(Some("rgb(0,0,255);x:y")).is_err());
        assert!(UserColor::from_form(Some("rgb(0,0,255)\" onclick=\"x")).is_err());
        assert!(UserColor::from_form(Some("url(x)")).is_err());
        assert!(UserColor::from_form(Some("rgb(var(--x))")).is_err());
    }

    #[test]
    fn parses_user_ids() {
        assert_eq!(parse_user_id("3").unwrap(), 3);
        assert_eq!(parse_user_id(" 12 ").unwrap(), 12);
        assert!(matches!(
            parse_user_id("").unwrap_err(),
            ValidationError::Empty { .. }
        ));
        assert!(matches!(
            parse_user_id("three").unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
    }

    #[test]
    fn active_user_policy() {
        let users = vec![user(1), user(2), user(5)];
        assert_eq!(ActiveUserPolicy::First.select(&users).unwrap().id, 1);
        assert_eq!(ActiveUserPolicy::MostRecent.select(&users).unwrap().id, 5);
        assert!(DEFAULT_ACTIVE_USER.select(&[]).is_none());
    }
}
