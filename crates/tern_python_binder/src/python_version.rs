use std::fmt;

/// A Python language version the execution environment targets.
///
/// Ordered, so feature gates read as comparisons
/// (`version >= PythonVersion::PY33`).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct PythonVersion {
    pub major: u8,
    pub minor: u8,
}

impl PythonVersion {
    pub const PY27: PythonVersion = PythonVersion { major: 2, minor: 7 };
    pub const PY33: PythonVersion = PythonVersion { major: 3, minor: 3 };
    pub const PY38: PythonVersion = PythonVersion { major: 3, minor: 8 };
    pub const PY312: PythonVersion = PythonVersion {
        major: 3,
        minor: 12,
    };

    pub const fn latest() -> Self {
        Self::PY312
    }
}

impl Default for PythonVersion {
    fn default() -> Self {
        Self::latest()
    }
}

impl TryFrom<(&str, &str)> for PythonVersion {
    type Error = std::num::ParseIntError;

    fn try_from(value: (&str, &str)) -> Result<Self, Self::Error> {
        let (major, minor) = value;
        Ok(Self {
            major: major.parse()?,
            minor: minor.parse()?,
        })
    }
}

impl fmt::Display for PythonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let PythonVersion { major, minor } = self;
        write!(f, "{major}.{minor}")
    }
}

#[cfg(test)]
mod tests {
    use super::PythonVersion;

    #[test]
    fn ordering_follows_release_order() {
        assert!(PythonVersion::PY27 < PythonVersion::PY33);
        assert!(PythonVersion::PY33 <= PythonVersion::latest());
        assert_eq!(PythonVersion::try_from(("3", "11")).unwrap().to_string(), "3.11");
    }
}
