// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups on serde_json::Value with typed, defaulting extraction for GitHub payloads
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to, to_or_default, to_utc)
// invariants: No panics; missing paths and JSON null yield None; numeric segments index arrays
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;

/// A location inside a JSON document, resolved lazily into a typed value.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  /// Deserialize the value as `T`; `null` counts as absent.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self
      .inner
      .filter(|v| !v.is_null())
      .and_then(|v| T::deserialize(v).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// Read a timestamp string (`2025-06-01T00:00:00Z`, naive values as UTC).
  pub fn to_utc(&self) -> Option<DateTime<Utc>> {
    self.to::<String>().and_then(|s| crate::window::parse_utc(&s).ok())
  }
}

/// Fetch nested values via dotted paths such as `user.login` or `items.0.number`.
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let inner = path.split('.').try_fold(self, |cur, key| match cur {
      serde_json::Value::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
      _ => cur.get(key),
    });

    JsonFetched { inner }
  }
}
