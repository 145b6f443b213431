use crate::{
  crypto::SecretKey,
  error::{IntersigError, IntersigResult},
  trace::*,
};
use parking_lot::RwLock;

/* ---------------------------------------- */
#[derive(Clone, PartialEq, Eq)]
/// Immutable key pair used to sign one or more requests.
/// `key_id` is sent verbatim as `keyId`, `private_key` is PEM and only parsed when signing.
pub struct Credentials {
  key_id: String,
  private_key: String,
}

impl Credentials {
  pub fn new(key_id: impl Into<String>, private_key: impl Into<String>) -> Self {
    Self {
      key_id: key_id.into(),
      private_key: private_key.into(),
    }
  }

  /// Key id announced in the authorization header
  pub fn key_id(&self) -> &str {
    &self.key_id
  }

  /// Parse the PEM private key. Malformed material surfaces here as a crypto error.
  pub fn secret_key(&self) -> IntersigResult<SecretKey> {
    SecretKey::from_pem(&self.private_key)
  }
}

impl std::fmt::Debug for Credentials {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Credentials")
      .field("key_id", &self.key_id)
      .field("private_key", &"..")
      .finish()
  }
}

/* ---------------------------------------- */
#[derive(Default)]
struct Slots {
  public_key: Option<String>,
  private_key: Option<String>,
}

/// Mutable holder of the configured key pair.
/// Setters overwrite; signing takes a [`Credentials`] snapshot so that a later rotation never
/// changes a request that is already being signed.
#[derive(Default)]
pub struct CredentialStore {
  slots: RwLock<Slots>,
}

impl CredentialStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Store pre-assembled credentials
  pub fn with_credentials(credentials: Credentials) -> Self {
    let store = Self::new();
    store.set_public_key(credentials.key_id);
    store.set_private_key(credentials.private_key);
    store
  }

  /// Set the public key, i.e. the key id. The value is not validated.
  pub fn set_public_key(&self, key: impl Into<String>) {
    self.slots.write().public_key = Some(key.into());
    debug!("Public key set");
  }

  /// Set the PEM encoded private key. The value is not validated until signing.
  pub fn set_private_key(&self, key: impl Into<String>) {
    self.slots.write().private_key = Some(key.into());
    debug!("Private key set");
  }

  /// Take a snapshot of the current key pair, failing with a configuration error naming the missing half.
  pub fn snapshot(&self) -> IntersigResult<Credentials> {
    let slots = self.slots.read();
    let Some(public_key) = slots.public_key.as_ref() else {
      return Err(IntersigError::MissingPublicKey);
    };
    let Some(private_key) = slots.private_key.as_ref() else {
      return Err(IntersigError::MissingPrivateKey);
    };
    Ok(Credentials::new(public_key.as_str(), private_key.as_str()))
  }
}

impl std::fmt::Debug for CredentialStore {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let slots = self.slots.read();
    f.debug_struct("CredentialStore")
      .field("public_key", &slots.public_key)
      .field("private_key", &slots.private_key.as_ref().map(|_| ".."))
      .finish()
  }
}
