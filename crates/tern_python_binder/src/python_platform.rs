/// The platform the analyzed code is assumed to run on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum PythonPlatform {
    /// Do not make any assumptions about the target platform.
    #[default]
    All,
    /// A concrete `sys.platform` value such as `linux`, `darwin` or `win32`.
    #[cfg_attr(feature = "serde", serde(untagged))]
    Individual(String),
}

impl std::fmt::Display for PythonPlatform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PythonPlatform::All => f.write_str("all"),
            PythonPlatform::Individual(platform) => f.write_str(platform),
        }
    }
}
