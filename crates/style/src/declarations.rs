//! The computed style declarations attached to a single element.

use serde::{Deserialize, Deserializer, Serialize, Serializer, de, ser::SerializeMap};
use std::fmt;

/// An ordered set of `property: value` declarations.
///
/// Property names compare case-insensitively; inserting a name that is
/// already present replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleDeclarations {
    entries: Vec<(String, String)>,
}

impl StyleDeclarations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses an inline `style="key: value; ..."` attribute.
    /// Declarations without a colon are skipped.
    pub fn parse_inline(css: &str) -> Self {
        let mut declarations = Self::new();
        for declaration in css.split(';') {
            if let Some((key, value)) = declaration.split_once(':') {
                let key = key.trim();
                if !key.is_empty() {
                    declarations.insert(key, value.trim());
                }
            }
        }
        declarations
    }

    /// Sets a declaration, returning the previous value if there was one.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let name = name.into();
        let value = value.into();
        match self
            .entries
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.entries.push((name, value));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// All declarations, in insertion order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleDeclarations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut declarations = Self::new();
        for (k, v) in iter {
            declarations.insert(k, v);
        }
        declarations
    }
}

impl Serialize for StyleDeclarations {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

/// Accepts either a map of declarations or an inline style string.
impl<'de> Deserialize<'de> for StyleDeclarations {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DeclarationsVisitor;
        impl<'de> de::Visitor<'de> for DeclarationsVisitor {
            type Value = StyleDeclarations;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of style declarations or an inline style string")
            }

            fn visit_str<E>(self, value: &str) -> Result<StyleDeclarations, E>
            where
                E: de::Error,
            {
                Ok(StyleDeclarations::parse_inline(value))
            }

            fn visit_map<A>(self, mut map: A) -> Result<StyleDeclarations, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut declarations = StyleDeclarations::new();
                while let Some((k, v)) = map.next_entry::<String, String>()? {
                    declarations.insert(k, v);
                }
                Ok(declarations)
            }
        }
        deserializer.deserialize_any(DeclarationsVisitor)
    }
}
