use crate::error::{IntersigError, IntersigResult};
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::{Map, Value};

/// Byte length of an object id (MOID)
pub const OBJECT_ID_LEN: usize = 24;

/* ---------------------------------------- */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Fixed width identifier of an existing object
pub struct ObjectId(String);

impl ObjectId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl TryFrom<&str> for ObjectId {
  type Error = IntersigError;
  fn try_from(value: &str) -> IntersigResult<Self> {
    if value.len() != OBJECT_ID_LEN {
      return Err(IntersigError::InvalidObjectId(format!(
        "expected {OBJECT_ID_LEN} bytes, got {}",
        value.len()
      )));
    }
    Ok(Self(value.to_string()))
  }
}

impl TryFrom<String> for ObjectId {
  type Error = IntersigError;
  fn try_from(value: String) -> IntersigResult<Self> {
    Self::try_from(value.as_str())
  }
}

impl std::str::FromStr for ObjectId {
  type Err = IntersigError;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::try_from(s)
  }
}

impl std::fmt::Display for ObjectId {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.0)
  }
}

/* ---------------------------------------- */
#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Query parameters in the order they are rendered, e.g. `$filter`, `$top`
pub struct QueryParams(IndexMap<String, String>);

impl QueryParams {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add or overwrite a parameter. Overwriting keeps the original position.
  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
    self.0.insert(key.into(), value.into());
    self
  }

  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(|v| v.as_str())
  }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
  K: Into<String>,
  V: Into<String>,
{
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
  }
}

impl TryFrom<Value> for QueryParams {
  type Error = IntersigError;

  /// Accepts a flat JSON object only. Scalars are rendered as text (`1`, `true`, `null`).
  fn try_from(value: Value) -> IntersigResult<Self> {
    let map = match value {
      Value::Object(map) => map,
      other => {
        return Err(IntersigError::InvalidQueryParams(format!(
          "must be an object, got {}",
          json_type_name(&other)
        )))
      }
    };
    map
      .into_iter()
      .map(|(k, v)| {
        let v = match v {
          Value::String(s) => s,
          Value::Number(n) => render_number(&n),
          Value::Bool(b) => b.to_string(),
          Value::Null => "null".to_string(),
          other => {
            return Err(IntersigError::InvalidQueryParams(format!(
              "value of {k} must be a scalar, got {}",
              json_type_name(&other)
            )))
          }
        };
        Ok((k, v))
      })
      .collect()
  }
}

/* ---------------------------------------- */
#[derive(Debug, Clone, Default, PartialEq)]
/// JSON object sent as request body. An empty body serializes to `{}`.
pub struct RequestBody(Map<String, Value>);

impl RequestBody {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build a body from any serializable value that serializes to a JSON object
  pub fn from_serialize<T: Serialize>(value: &T) -> IntersigResult<Self> {
    Self::try_from(serde_json::to_value(value)?)
  }

  pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> &mut Self {
    self.0.insert(key.into(), value.into());
    self
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Serialize the body. Keys are emitted in sorted order, so equal bodies yield equal bytes.
  pub fn to_bytes(&self) -> IntersigResult<Vec<u8>> {
    Ok(serde_json::to_vec(&self.0)?)
  }
}

impl TryFrom<Value> for RequestBody {
  type Error = IntersigError;
  fn try_from(value: Value) -> IntersigResult<Self> {
    match value {
      Value::Object(map) => Ok(Self(map)),
      other => Err(IntersigError::InvalidBody(format!(
        "must be an object, got {}",
        json_type_name(&other)
      ))),
    }
  }
}

/// Render a number the way it reads in a url: whole floats drop the fraction, `10.0` becomes `10`
fn render_number(n: &serde_json::Number) -> String {
  match n.as_f64() {
    Some(f) if !(n.is_i64() || n.is_u64()) && f.fract() == 0.0 && f.abs() < 1e21 => {
      if f == 0.0 {
        "0".to_string()
      } else {
        format!("{f:.0}")
      }
    }
    _ => n.to_string(),
  }
}

fn json_type_name(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}
