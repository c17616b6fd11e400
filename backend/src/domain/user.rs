//! User data model.

use std::fmt;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 50;

/// Validation errors returned by [`Username::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    BlankUsername,
    UsernameTooShort { min: usize },
    UsernameTooLong { max: usize },
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BlankUsername => write!(f, "username must not be blank"),
            Self::UsernameTooShort { min } => {
                write!(f, "username must be at least {min} characters")
            }
            Self::UsernameTooLong { max } => {
                write!(f, "username must be at most {max} characters")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Public handle chosen by a user.
///
/// Length is counted in characters, not bytes.
///
/// # Examples
/// ```
/// use gamer_society::domain::Username;
///
/// assert!(Username::new("ada").is_ok());
/// assert!(Username::new("al").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::BlankUsername);
        }
        let length = username.chars().count();
        if length < USERNAME_MIN {
            return Err(UserValidationError::UsernameTooShort { min: USERNAME_MIN });
        }
        if length > USERNAME_MAX {
            return Err(UserValidationError::UsernameTooLong { max: USERNAME_MAX });
        }
        Ok(Self(username))
    }

    /// Borrow the username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

/// Account-level settings: the username and whether the account is private.
///
/// Creating a user and editing its settings both carry this pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountSettings {
    pub username: Username,
    pub is_private: bool,
}

impl AccountSettings {
    pub fn new(username: Username, is_private: bool) -> Self {
        Self {
            username,
            is_private,
        }
    }
}

/// Settings as stored, returned without revalidation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSettings {
    pub username: String,
    pub is_private: bool,
}
