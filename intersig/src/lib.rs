//! # intersig
//!
//! Signing core for REST APIs authenticating every request with an RSA-SHA256 http signature carried in the
//! `Authorization` header. The crate plans the request (method, path, query), digests the body, builds the
//! signature base and assembles the header value. It performs no network I/O.

mod authorization;
mod credentials;
mod crypto;
mod digest;
mod endpoint;
mod error;
mod planner;
mod request;
mod signature_base;
mod signer;
mod trace;
mod util;

#[cfg(test)]
mod test_keys;

pub mod prelude {
  pub use crate::{
    authorization::{AuthorizationHeader, SIGNATURE_SCHEME},
    credentials::{CredentialStore, Credentials},
    crypto::{AlgorithmName, PublicKey, SecretKey, SigningKey, VerifyingKey},
    digest::{verify_digest, DigestAlgorithm, DIGEST_HEADER},
    endpoint::{ApiEndpoint, DEFAULT_ENDPOINT},
    error::{ErrorKind, IntersigError, IntersigResult},
    planner::{encode_query, PlannedRequest},
    request::{ObjectId, QueryParams, RequestBody, OBJECT_ID_LEN},
    signature_base::{CanonicalHeaders, SignatureBase, REQUEST_TARGET},
    signer::{format_date, verify_signature, RequestSigner, SignedHeaders, ACCEPT_JSON, DATE_FORMAT},
  };
}

/* ----------------------------------------------------------------- */
