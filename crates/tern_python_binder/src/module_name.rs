use std::fmt;
use std::ops::Deref;

use compact_str::{CompactString, ToCompactString};

use tern_python_ast as ast;

/// An absolute dotted module name, e.g. `foo.bar`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct ModuleName(CompactString);

impl ModuleName {
    /// Creates a module name from `name`. Returns `Some` only when every
    /// dot-separated component is a valid identifier.
    #[must_use]
    pub fn new(name: &str) -> Option<Self> {
        Self::is_valid_name(name).then(|| Self(CompactString::from(name)))
    }

    #[must_use]
    pub fn new_static(name: &'static str) -> Option<Self> {
        Self::is_valid_name(name).then(|| Self(CompactString::const_new(name)))
    }

    fn is_valid_name(name: &str) -> bool {
        !name.is_empty() && name.split('.').all(is_identifier)
    }

    /// The components of the name, in order.
    #[must_use]
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.0.split('.')
    }

    /// The name of this module's immediate parent package, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ModuleName> {
        let (parent, _) = self.0.rsplit_once('.')?;
        Some(Self(parent.to_compact_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Builds a module name out of pre-split components.
    #[must_use]
    pub fn from_components<'a>(components: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut components = components.into_iter();
        let first = components.next()?;
        if !is_identifier(first) {
            return None;
        }
        let mut name = CompactString::from(first);
        for part in components {
            if !is_identifier(part) {
                return None;
            }
            name.push('.');
            name.push_str(part);
        }
        Some(Self(name))
    }

    /// The dotted parts of an `import a.b.c` alias clause.
    #[must_use]
    pub fn from_import_alias(alias: &ast::Alias) -> Option<Self> {
        Self::new(alias.name.as_str())
    }

    pub fn extend(&mut self, other: &ModuleName) {
        self.0.push('.');
        self.0.push_str(other);
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (unicode_ident::is_xid_start(first) || first == '_')
        && chars.all(unicode_ident::is_xid_continue)
}

impl Deref for ModuleName {
    type Target = str;

    fn deref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for ModuleName {
    fn eq(&self, other: &str) -> bool {
        self.as_str() == other
    }
}

impl PartialEq<ModuleName> for str {
    fn eq(&self, other: &ModuleName) -> bool {
        self == other.as_str()
    }
}

impl fmt::Display for ModuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for ModuleName {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::ModuleName;

    #[test]
    fn validation() {
        assert_eq!(ModuleName::new_static("foo.bar").as_deref(), Some("foo.bar"));
        assert_eq!(ModuleName::new_static(""), None);
        assert_eq!(ModuleName::new_static(".foo"), None);
        assert_eq!(ModuleName::new_static("foo."), None);
        assert_eq!(ModuleName::new_static("foo..bar"), None);
        assert_eq!(ModuleName::new_static("2000"), None);
    }

    #[test]
    fn components_and_parent() {
        let name = ModuleName::new_static("foo.bar.baz").unwrap();
        assert_eq!(name.components().collect::<Vec<_>>(), vec!["foo", "bar", "baz"]);
        assert_eq!(name.parent(), ModuleName::new_static("foo.bar"));
        assert_eq!(ModuleName::new_static("root").unwrap().parent(), None);
    }

    #[test]
    fn from_components() {
        assert_eq!(&*ModuleName::from_components(["a", "b", "c"]).unwrap(), "a.b.c");
        assert_eq!(ModuleName::from_components(["a", "a-b"]), None);
    }
}
