use secrecy::{ExposeSecret, Secret};

/// A well-formed token that no account owns.
pub const INVALID_TOKEN: &str = "8d16404936e72e705980878e18c95976";

/// The bearer credential a request is sent with.
#[derive(Clone, Debug)]
pub enum Credential {
    /// No `Authorization` header at all.
    Missing,
    Valid(Secret<String>),
    /// The fixed [`INVALID_TOKEN`].
    Invalid,
    /// A valid token with every letter uppercased. Tokens are case-sensitive,
    /// so the API must reject it.
    Uppercased(Secret<String>),
}

impl Credential {
    /// The token to put after `Bearer `, if any.
    pub fn bearer_token(&self) -> Option<Secret<String>> {
        match self {
            Credential::Missing => None,
            Credential::Valid(token) => Some(token.clone()),
            Credential::Invalid => Some(Secret::new(INVALID_TOKEN.to_string())),
            Credential::Uppercased(token) => {
                Some(Secret::new(token.expose_secret().to_uppercase()))
            }
        }
    }

    /// Case-mangled variant of a valid credential.
    ///
    /// Returns `None` for anything but `Valid`, or when uppercasing would leave
    /// the token unchanged (no lowercase letters), since the result would not
    /// exercise case sensitivity.
    pub fn uppercased(&self) -> Option<Credential> {
        match self {
            Credential::Valid(token) => {
                let exposed = token.expose_secret();
                if exposed.to_uppercase() == *exposed {
                    None
                } else {
                    Some(Credential::Uppercased(token.clone()))
                }
            }
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Credential::Missing => "missing",
            Credential::Valid(_) => "valid",
            Credential::Invalid => "invalid",
            Credential::Uppercased(_) => "uppercased",
        }
    }
}
