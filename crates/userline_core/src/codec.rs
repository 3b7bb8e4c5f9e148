//! Line codec for persisted user records.
//!
//! # Responsibility
//! - Convert `User` values to and from the single-line JSON record format.
//!
//! # Invariants
//! - Encoded records never contain a raw newline (JSON escapes them), so one
//!   record always occupies exactly one storage line.
//! - `decode(&encode(user)?)? == user` for every user.

use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Serialization failure between `User` and its record text.
#[derive(Debug)]
pub enum CodecError {
    Encode(serde_json::Error),
    Decode(serde_json::Error),
}

impl Display for CodecError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Encode(err) => write!(f, "failed to encode user record: {err}"),
            Self::Decode(err) => write!(f, "failed to decode user record: {err}"),
        }
    }
}

impl Error for CodecError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Encode(err) | Self::Decode(err) => Some(err),
        }
    }
}

/// Serializes a user into one compact JSON line.
pub fn encode(user: &User) -> Result<String, CodecError> {
    serde_json::to_string(user).map_err(CodecError::Encode)
}

/// Parses one stored record line back into a user.
///
/// All four fields are required; unknown fields are ignored.
pub fn decode(record: &str) -> Result<User, CodecError> {
    serde_json::from_str(record).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, CodecError};
    use crate::model::user::User;

    #[test]
    fn encode_uses_wire_field_names_in_order() {
        let user = User::new("Ada", "Lovelace", "Mathematician")
            .with_id("0b4b8a4e-4c1f-4f5e-9a43-1f7d2c9b8e10");

        let line = encode(&user).unwrap();
        assert_eq!(
            line,
            r#"{"id":"0b4b8a4e-4c1f-4f5e-9a43-1f7d2c9b8e10","first_name":"Ada","last_name":"Lovelace","biography":"Mathematician"}"#
        );
        assert_eq!(decode(&line).unwrap(), user);
    }

    #[test]
    fn multiline_text_stays_on_one_line() {
        let user = User::new("Ada", "Lovelace", "line one\nline two\r\n");
        let line = encode(&user).unwrap();

        assert!(!line.contains('\n'));
        assert_eq!(decode(&line).unwrap().biography, "line one\nline two\r\n");
    }

    #[test]
    fn decode_rejects_missing_fields_and_garbage() {
        let err = decode(r#"{"id":"x","first_name":"Ada"}"#).unwrap_err();
        assert!(matches!(err, CodecError::Decode(_)));

        let err = decode("not json at all").unwrap_err();
        assert!(err.to_string().starts_with("failed to decode user record"));
    }
}
