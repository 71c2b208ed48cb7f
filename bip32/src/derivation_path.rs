//! Derivation paths: ordered walks from a master key to a leaf.

use crate::{ChildNumber, Error, Result};
use core::{
    fmt::{self, Display},
    str::FromStr,
};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Prefix for all derivation paths.
const PREFIX: &str = "m";

/// An immutable sequence of [`ChildNumber`] values describing a walk in the
/// key hierarchy, e.g. `m/44'/60'/0'/0/0`.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct DerivationPath {
    path: Vec<ChildNumber>,
}

impl DerivationPath {
    /// Iterate over the [`ChildNumber`] values in this derivation path.
    pub fn iter(&self) -> impl Iterator<Item = ChildNumber> + '_ {
        self.path.iter().copied()
    }

    /// Is this derivation path empty? (i.e. the root)
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Number of [`ChildNumber`] values in this derivation path.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// The parent [`DerivationPath`] of the current one, or `None` at the
    /// root.
    pub fn parent(&self) -> Option<Self> {
        self.path.len().checked_sub(1).map(|n| DerivationPath { path: self.path[..n].to_vec() })
    }

    /// Append a [`ChildNumber`] to this derivation path.
    pub fn push(&mut self, child_number: ChildNumber) {
        self.path.push(child_number)
    }
}

impl AsRef<[ChildNumber]> for DerivationPath {
    fn as_ref(&self) -> &[ChildNumber] {
        &self.path
    }
}

impl FromStr for DerivationPath {
    type Err = Error;

    fn from_str(path: &str) -> Result<DerivationPath> {
        let mut components = path.split('/');

        if components.next() != Some(PREFIX) {
            return Err(Error::MalformedPath(format!("`{path}` does not start with `{PREFIX}`")));
        }

        // An empty component covers both `m//0` and a trailing separator,
        // which split() surfaces as a trailing "".
        Ok(DerivationPath { path: components.map(str::parse).collect::<Result<_>>()? })
    }
}

impl Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(PREFIX)?;

        for child_number in self.iter() {
            write!(f, "/{}", child_number)?;
        }

        Ok(())
    }
}

impl Extend<ChildNumber> for DerivationPath {
    fn extend<T>(&mut self, iter: T)
    where
        T: IntoIterator<Item = ChildNumber>,
    {
        self.path.extend(iter);
    }
}

impl IntoIterator for DerivationPath {
    type Item = ChildNumber;
    type IntoIter = std::vec::IntoIter<ChildNumber>;

    fn into_iter(self) -> std::vec::IntoIter<ChildNumber> {
        self.path.into_iter()
    }
}

impl Serialize for DerivationPath {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DerivationPath {
    fn deserialize<D>(deserializer: D) -> std::result::Result<DerivationPath, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DerivationPathVisitor;
        impl de::Visitor<'_> for DerivationPathVisitor {
            type Value = DerivationPath;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a derivation path string such as m/44'/0'/0'/0/0")
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                DerivationPath::from_str(value).map_err(|err| de::Error::custom(err.to_string()))
            }
        }

        deserializer.deserialize_str(DerivationPathVisitor)
    }
}
