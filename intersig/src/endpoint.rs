use crate::error::{IntersigError, IntersigResult};

/// Origin and versioned base path every resource path is appended to
pub const DEFAULT_ENDPOINT: &str = "https://intersight.com/api/v1";

/* ---------------------------------------- */
#[derive(Debug, Clone, PartialEq, Eq)]
/// Base url of the API, split the way the signing scheme uses it:
/// the authority goes to the `Host` header, the base path prefixes the request target.
pub struct ApiEndpoint {
  scheme: String,
  authority: String,
  base_path: String,
}

impl Default for ApiEndpoint {
  fn default() -> Self {
    Self {
      scheme: "https".to_string(),
      authority: "intersight.com".to_string(),
      base_path: "/api/v1".to_string(),
    }
  }
}

impl ApiEndpoint {
  /// Value of the `Host` header
  pub fn host(&self) -> &str {
    &self.authority
  }

  /// Base path without trailing slash, empty for a bare origin
  pub fn base_path(&self) -> &str {
    &self.base_path
  }

  /// Request target as covered by the signature: base path, resource path and encoded query
  pub fn request_target(&self, path_and_query: &str) -> String {
    format!("{}{}", self.base_path, path_and_query)
  }

  /// Absolute url for the given resource path and encoded query
  pub fn url(&self, path_and_query: &str) -> String {
    format!("{}://{}{}", self.scheme, self.authority, self.request_target(path_and_query))
  }
}

impl TryFrom<&str> for ApiEndpoint {
  type Error = IntersigError;
  fn try_from(value: &str) -> IntersigResult<Self> {
    let uri = value
      .parse::<http::Uri>()
      .map_err(|e| IntersigError::InvalidEndpoint(format!("{value}: {e}")))?;
    let scheme = uri
      .scheme_str()
      .ok_or_else(|| IntersigError::InvalidEndpoint(format!("{value}: missing scheme")))?;
    let authority = uri
      .authority()
      .ok_or_else(|| IntersigError::InvalidEndpoint(format!("{value}: missing host")))?;
    if uri.query().is_some() {
      return Err(IntersigError::InvalidEndpoint(format!("{value}: query is not allowed")));
    }
    Ok(Self {
      scheme: scheme.to_ascii_lowercase(),
      authority: authority.as_str().to_ascii_lowercase(),
      base_path: uri.path().trim_end_matches('/').to_string(),
    })
  }
}

impl std::str::FromStr for ApiEndpoint {
  type Err = IntersigError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(s)
  }
}

impl std::fmt::Display for ApiEndpoint {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.url(""))
  }
}
