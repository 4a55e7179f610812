//! Label sets and equality-based selectors.

use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, iter::FromIterator};

type Map = BTreeMap<String, String>;

/// An equality-based label selector.
///
/// A selector matches a label set when every one of its `key=value`
/// requirements is present in the set. The empty selector matches every
/// object, which is why callers creating objects must treat an empty label
/// set as unsafe.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Selector(Map);

impl Selector {
    /// Whether the given label set satisfies every requirement.
    pub fn matches(&self, labels: &Map) -> bool {
        self.0.iter().all(|(k, v)| labels.get(k) == Some(v))
    }

    /// Whether this selector matches all objects.
    pub fn selects_all(&self) -> bool {
        self.0.is_empty()
    }

    /// Canonical `key1=value1,key2=value2` form for the API.
    pub fn to_selector_string(&self) -> String {
        let requirements: Vec<String> = self.0.iter().map(|(k, v)| format!("{k}={v}")).collect();
        requirements.join(",")
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_selector_string())
    }
}

impl From<Map> for Selector {
    fn from(map: Map) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, String)> for Selector {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Selector {
    fn from_iter<T: IntoIterator<Item = (&'a str, &'a str)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}
