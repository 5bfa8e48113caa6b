//! Structural duplicate-key detection for raw JSON text
//!
//! `serde_json` keeps the last value when an object repeats a key. This scan
//! walks the document with a stateful visitor and records every repeated key
//! together with its path, without building the value tree.
//!
//! Copyright (c) 2025 Formcheck Team
//! Licensed under the Apache-2.0 license

use crate::path::{FieldPath, PathSegment};
use serde::de::{self, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use std::collections::HashSet;
use std::fmt;

/// A key that appears more than once in the same object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateKey {
    /// Path of the repeated member (its parent object plus the key)
    pub path: FieldPath,
    pub key: String,
}

/// Find every repeated object key in `raw`, in document order
///
/// A key repeated `n` times is reported `n - 1` times. Fails with the parser
/// error when `raw` is not valid JSON.
pub fn find_duplicate_keys(raw: &str) -> serde_json::Result<Vec<DuplicateKey>> {
    let mut found = Vec::new();
    let mut deserializer = serde_json::Deserializer::from_str(raw);
    Scan {
        path: FieldPath::root(),
        found: &mut found,
    }
    .deserialize(&mut deserializer)?;
    deserializer.end()?;
    Ok(found)
}

struct Scan<'f> {
    path: FieldPath,
    found: &'f mut Vec<DuplicateKey>,
}

impl<'de, 'f> DeserializeSeed<'de> for Scan<'f> {
    type Value = ();

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<(), D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de, 'f> Visitor<'de> for Scan<'f> {
    type Value = ();

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> Result<(), E> {
        Ok(())
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> Result<(), E> {
        Ok(())
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> Result<(), E> {
        Ok(())
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> Result<(), E> {
        Ok(())
    }

    fn visit_str<E: de::Error>(self, _: &str) -> Result<(), E> {
        Ok(())
    }

    fn visit_unit<E: de::Error>(self) -> Result<(), E> {
        Ok(())
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<(), A::Error> {
        let found = self.found;
        let mut index = 0;
        while seq
            .next_element_seed(Scan {
                path: self.path.child_index(index),
                found: &mut *found,
            })?
            .is_some()
        {
            index += 1;
        }
        Ok(())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<(), A::Error> {
        let found = self.found;
        let mut seen = HashSet::new();
        while let Some(key) = map.next_key::<String>()? {
            let path = self.path.clone().join(PathSegment::Key(key.clone()));
            if !seen.insert(key.clone()) {
                found.push(DuplicateKey {
                    path: path.clone(),
                    key,
                });
            }
            map.next_value_seed(Scan {
                path,
                found: &mut *found,
            })?;
        }
        Ok(())
    }
}
