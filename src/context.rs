use serde::{Deserialize, Serialize};
use std::collections::hash_map::Iter;
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::ops::Index;

/// Key-value attributes describing the subject of a flag evaluation.
///
/// The service matches its segment constraints against these attributes.
/// A [`Context`] always serializes as a JSON object, `{}` when it's empty.
///
/// # Examples
///
/// ```rust
/// use flipt::Context;
///
/// let context = Context::new()
///     .with("country", "Hungary")
///     .with("plan", "premium");
///
/// assert_eq!(&context["plan"], "premium");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    attributes: HashMap<String, String>,
}

impl Context {
    /// Creates an empty [`Context`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing the previous value of the same key.
    ///
    /// # Examples:
    ///
    /// ```rust
    /// use flipt::Context;
    ///
    /// let context = Context::new()
    ///     .with("user", "demo")
    ///     .with("user", "demo2");
    ///
    /// assert_eq!(context.get("user"), Some("demo2"));
    /// ```
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_owned(), value.to_owned());
        self
    }

    /// Returns a new [`Context`] with every attribute of `overrides` laid over the
    /// attributes of `self`. On a key collision the value of `overrides` wins.
    ///
    /// The merge is shallow, values are never combined.
    ///
    /// # Examples:
    ///
    /// ```rust
    /// use flipt::Context;
    ///
    /// let defaults = Context::from([("context1", "one"), ("context2", "two")]);
    /// let merged = defaults.merged_with(&Context::from([("context1", "new")]));
    ///
    /// assert_eq!(merged, Context::from([("context1", "new"), ("context2", "two")]));
    /// ```
    pub fn merged_with(&self, overrides: &Context) -> Context {
        let mut attributes = self.attributes.clone();
        attributes.extend(
            overrides
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        Context { attributes }
    }

    /// Gets the value of an attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Returns `true` when the context has no attributes.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    /// Iterates over the attributes in arbitrary order.
    pub fn iter(&self) -> Iter<'_, String, String> {
        self.attributes.iter()
    }
}

impl Index<&str> for Context {
    type Output = String;

    fn index(&self, index: &str) -> &Self::Output {
        &self.attributes[index]
    }
}

impl<'a> IntoIterator for &'a Context {
    type Item = (&'a String, &'a String);
    type IntoIter = Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter()
    }
}

impl Display for Context {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(self) {
            Ok(str) => write!(f, "{str}"),
            Err(_) => f.write_str("<invalid context>"),
        }
    }
}

impl From<HashMap<String, String>> for Context {
    fn from(attributes: HashMap<String, String>) -> Self {
        Self { attributes }
    }
}

impl From<HashMap<&str, &str>> for Context {
    fn from(value: HashMap<&str, &str>) -> Self {
        Self {
            attributes: value
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for Context {
    /// # Examples
    ///
    /// ```rust
    /// use flipt::Context;
    ///
    /// let context: Context = [("user", "demo")].into();
    /// assert_eq!(context.len(), 1);
    /// ```
    fn from(arr: [(&str, &str); N]) -> Self {
        Self {
            attributes: HashMap::from_iter(
                arr.iter().map(|(k, v)| (k.to_string(), v.to_string())),
            ),
        }
    }
}

impl FromIterator<(String, String)> for Context {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            attributes: iter.into_iter().collect(),
        }
    }
}
