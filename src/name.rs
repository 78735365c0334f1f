//! Qualified names and namespace resolution
//!
//! A name written in markup is a `(namespace, local name)` pair. When the
//! local name is dotted, as in `Grid.Row`, it addresses a member of a
//! containing type and is decomposed at construction time. Prefixes such as
//! `x:` are resolved against an externally owned table of prefix to
//! namespace-URI mappings, queried read-only.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Prefix to namespace-URI table, built by the caller and shared read-only
/// across parses.
///
/// The empty prefix keys the default namespace. `get` answers the empty
/// string for unregistered prefixes, so call sites relying on it never fail;
/// callers that must distinguish "unregistered" use `contains`.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Namespaces {
    entries: HashMap<String, String>,
}

impl Namespaces {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `prefix` as mapping to `uri`, replacing any earlier mapping
    pub fn insert(&mut self, prefix: String, uri: String) {
        self.entries.insert(prefix, uri);
    }

    pub fn contains(&self, prefix: &str) -> bool {
        self.entries.contains_key(prefix)
    }

    /// Resolve `prefix`, answering the empty namespace when unregistered
    pub fn get(&self, prefix: &str) -> &str {
        self.entries.get(prefix).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for Namespaces {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// A name qualified by a namespace, with the member decomposition applied
/// when the local name is dotted.
///
/// Equality and hashing consider only the local name and the namespace;
/// the member fields are derived from them.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QualifiedName {
    pub local_name: String,
    pub namespace_name: String,

    /// The part after the first `.` of the local name, or the whole local
    /// name when it is not dotted
    pub member_name: String,

    /// The type owning the member, with the same namespace; present only
    /// when the local name is dotted
    pub containing_type_name: Option<Box<QualifiedName>>,
}

impl QualifiedName {
    pub fn new(local_name: String, namespace_name: String) -> Self {
        match local_name.find('.') {
            Some(separator) => {
                let containing = QualifiedName::new(
                    local_name[..separator].to_string(),
                    namespace_name.clone(),
                );
                Self {
                    member_name: local_name[separator + 1..].to_string(),
                    local_name,
                    namespace_name,
                    containing_type_name: Some(Box::new(containing)),
                }
            }
            None => Self {
                member_name: local_name.clone(),
                local_name,
                namespace_name,
                containing_type_name: None,
            },
        }
    }

    /// A name without a namespace
    pub fn unqualified(local_name: String) -> Self {
        Self::new(local_name, String::new())
    }

    /// The distinguished empty name, signalling "unresolvable" from
    /// [`QualifiedName::from_prefixed`]
    pub fn empty() -> Self {
        Self::new(String::new(), String::new())
    }

    /// Build a name from its prefixed written form.
    ///
    /// The text is split at the first `:`. A registered prefix resolves to
    /// its namespace URI; an unregistered prefix yields the empty name, which
    /// the caller must check for before use. Text without a prefix gets the
    /// empty namespace.
    pub fn from_prefixed(prefixed_name: &str, namespaces: &Namespaces) -> Self {
        match prefixed_name.split_once(':') {
            Some((prefix, local_name)) => {
                if namespaces.contains(prefix) {
                    QualifiedName::new(local_name.to_string(), namespaces.get(prefix).to_string())
                } else {
                    QualifiedName::empty()
                }
            }
            None => QualifiedName::unqualified(prefixed_name.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.local_name.is_empty()
    }

    /// True when the local name addresses a member of a containing type
    pub fn is_member_name(&self) -> bool {
        self.containing_type_name.is_some()
    }
}

impl PartialEq for QualifiedName {
    fn eq(&self, other: &Self) -> bool {
        self.local_name == other.local_name && self.namespace_name == other.namespace_name
    }
}

impl Eq for QualifiedName {}

impl Hash for QualifiedName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.local_name.hash(state);
        self.namespace_name.hash(state);
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.namespace_name.is_empty() {
            write!(f, "{}", self.local_name)
        } else {
            write!(f, "{}:{}", self.namespace_name, self.local_name)
        }
    }
}
