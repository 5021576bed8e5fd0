//! Basic-auth per-call credentials
//!
//! Every gateway endpoint is authenticated. The credential is built once at
//! connect time and attached to each outgoing call as `authorization`
//! metadata by the channel's interceptor, in both TLS and plaintext modes.

use std::fmt;

use base64::Engine;
use tonic::metadata::{Ascii, MetadataValue};
use tonic::service::Interceptor;
use tonic::{Request, Status};

use crate::error::{ClientError, Result};

/// Metadata key carrying the credential.
pub const AUTHORIZATION_KEY: &str = "authorization";

/// Immutable basic-auth credential shared by all service stubs.
#[derive(Clone)]
pub struct BasicAuth {
    username: String,
    header: MetadataValue<Ascii>,
}

impl BasicAuth {
    /// Encode `username:password` into a `Basic` authorization value.
    ///
    /// The username may not contain `:` (RFC 7617) and neither field may
    /// contain control characters.
    pub fn new(username: &str, password: &str) -> Result<Self> {
        if username.contains(':') {
            return Err(ClientError::CredentialConstruction(
                "username must not contain ':'".to_string(),
            ));
        }
        if username.chars().chain(password.chars()).any(char::is_control) {
            return Err(ClientError::CredentialConstruction(
                "credentials must not contain control characters".to_string(),
            ));
        }

        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", username, password));
        let header = MetadataValue::try_from(format!("Basic {}", token))
            .map_err(|e| ClientError::CredentialConstruction(e.to_string()))?;

        Ok(Self {
            username: username.to_string(),
            header,
        })
    }

    /// Username this credential was built from
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The `Basic ...` metadata value sent on every call
    pub fn header_value(&self) -> &MetadataValue<Ascii> {
        &self.header
    }
}

impl PartialEq for BasicAuth {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
    }
}

impl Eq for BasicAuth {}

impl fmt::Debug for BasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuth")
            .field("username", &self.username)
            .field("header", &"Basic <redacted>")
            .finish()
    }
}

impl Interceptor for BasicAuth {
    fn call(&mut self, mut req: Request<()>) -> std::result::Result<Request<()>, Status> {
        req.metadata_mut()
            .insert(AUTHORIZATION_KEY, self.header.clone());
        Ok(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_basic_header() {
        let auth = BasicAuth::new("u", "p").unwrap();
        assert_eq!(auth.username(), "u");
        // base64("u:p")
        assert_eq!(auth.header_value().to_str().unwrap(), "Basic dTpw");
    }

    #[test]
    fn test_password_may_contain_colon() {
        let auth = BasicAuth::new("Administrator", "pa:ss").unwrap();
        assert_eq!(
            auth.header_value().to_str().unwrap(),
            "Basic QWRtaW5pc3RyYXRvcjpwYTpzcw=="
        );
    }

    #[test]
    fn test_username_with_colon_rejected() {
        let err = BasicAuth::new("a:b", "p").unwrap_err();
        assert!(matches!(err, ClientError::CredentialConstruction(_)));
    }

    #[test]
    fn test_control_characters_rejected() {
        assert!(matches!(
            BasicAuth::new("user\n", "p"),
            Err(ClientError::CredentialConstruction(_))
        ));
        assert!(matches!(
            BasicAuth::new("user", "p\0"),
            Err(ClientError::CredentialConstruction(_))
        ));
    }

    #[test]
    fn test_interceptor_attaches_metadata() {
        let mut auth = BasicAuth::new("u", "p").unwrap();
        let req = auth.call(Request::new(())).unwrap();
        let value = req.metadata().get(AUTHORIZATION_KEY).unwrap();
        assert_eq!(value.to_str().unwrap(), "Basic dTpw");
    }

    #[test]
    fn test_debug_redacts_secret() {
        let auth = BasicAuth::new("u", "hunter2").unwrap();
        let debug = format!("{:?}", auth);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains(auth.header_value().to_str().unwrap()));
    }
}
