use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use utility::id::{HasId, Id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Guide,
    Tourist,
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::Guide => write!(f, "GUIDE"),
            Self::Tourist => write!(f, "TOURIST"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().trim_start_matches("ROLE_") {
            "ADMIN" => Ok(Self::Admin),
            "GUIDE" => Ok(Self::Guide),
            "TOURIST" => Ok(Self::Tourist),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<Id<User>>,
    pub username: String,
    pub email: String,
    pub role: UserRole,
    #[serde(default)]
    pub blocked: bool,
}

impl HasId for User {
    type IdType = i64;
}

pub const MIN_USERNAME_LENGTH: usize = 3;
pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub enum RegistrationError {
    UsernameTooShort(String),
    InvalidEmail(String),
    PasswordTooShort,
}

impl std::error::Error for RegistrationError {}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UsernameTooShort(username) => write!(
                f,
                "username '{}' needs at least {} characters",
                username, MIN_USERNAME_LENGTH
            ),
            Self::InvalidEmail(email) => write!(f, "'{}' is not an email address", email),
            Self::PasswordTooShort => write!(
                f,
                "password needs at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        }
    }
}

/// New account for the stakeholders service. The role goes over the wire
/// as `ROLE_<NAME>`.
#[derive(Clone, PartialEq, Serialize)]
pub struct RegisterRequest {
    username: String,
    email: String,
    password: String,
    #[serde(serialize_with = "serialize_role")]
    role: UserRole,
}

fn serialize_role<S: Serializer>(role: &UserRole, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&format_args!("ROLE_{}", role))
}

impl RegisterRequest {
    /// Registers a tourist unless `with_role` says otherwise.
    pub fn new<U, E, P>(username: U, email: E, password: P) -> Result<Self, RegistrationError>
    where
        U: Into<String>,
        E: Into<String>,
        P: Into<String>,
    {
        let username = username.into().trim().to_owned();
        let email = email.into().trim().to_owned();
        let password = password.into();
        if username.chars().count() < MIN_USERNAME_LENGTH {
            return Err(RegistrationError::UsernameTooShort(username));
        }
        match email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(RegistrationError::InvalidEmail(email)),
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(RegistrationError::PasswordTooShort);
        }
        Ok(Self {
            username,
            email,
            password,
            role: UserRole::Tourist,
        })
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> UserRole {
        self.role
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}
