//! Diagnostics produced while binding, collected in traversal order.

use text_size::TextRange;

use crate::module_name::ModuleName;

/// Severity of an emitted diagnostic.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

/// Configured level for a warn-family rule.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Level {
    /// The rule is disabled; matching diagnostics are dropped.
    #[strum(to_string = "none", serialize = "ignore")]
    Ignore,
    #[default]
    #[strum(to_string = "warning", serialize = "warn")]
    Warn,
    #[strum(to_string = "error")]
    Error,
}

impl Level {
    pub(crate) fn severity(self) -> Option<Severity> {
        match self {
            Level::Ignore => None,
            Level::Warn => Some(Severity::Warning),
            Level::Error => Some(Severity::Error),
        }
    }
}

/// The configurable rules. Everything else the binder reports is an
/// unconditional error.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Rule {
    MissingImports,
    MissingTypeStubs,
    InvalidStringEscapeSequence,
}

impl Rule {
    pub const fn as_str(self) -> &'static str {
        match self {
            Rule::MissingImports => "reportMissingImports",
            Rule::MissingTypeStubs => "reportMissingTypeStubs",
            Rule::InvalidStringEscapeSequence => "reportInvalidStringEscapeSequence",
        }
    }
}

/// Per-file severity configuration for the warn-family rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagnosticSettings {
    pub report_missing_imports: Level,
    pub report_missing_type_stubs: Level,
    pub report_invalid_string_escape_sequence: Level,
}

impl Default for DiagnosticSettings {
    fn default() -> Self {
        Self {
            report_missing_imports: Level::Error,
            report_missing_type_stubs: Level::Warn,
            report_invalid_string_escape_sequence: Level::Warn,
        }
    }
}

impl DiagnosticSettings {
    fn level(&self, rule: Rule) -> Level {
        match rule {
            Rule::MissingImports => self.report_missing_imports,
            Rule::MissingTypeStubs => self.report_missing_type_stubs,
            Rule::InvalidStringEscapeSequence => self.report_invalid_string_escape_sequence,
        }
    }
}

/// A machine-readable remediation attached to a diagnostic.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "action")
)]
pub enum DiagnosticAction {
    #[cfg_attr(
        feature = "serde",
        serde(rename = "tern.createtypestub", rename_all = "camelCase")
    )]
    CreateTypeStub { module_name: ModuleName },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub range: TextRange,
    pub rule: Option<Rule>,
    pub action: Option<DiagnosticAction>,
}

/// Collects diagnostics during a walk. Appended in traversal order.
#[derive(Debug, Default)]
pub(crate) struct DiagnosticSink {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink {
    pub(crate) fn error(&mut self, range: TextRange, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic {
            severity: Severity::Error,
            message: message.into(),
            range,
            rule: None,
            action: None,
        });
    }

    /// Reports under a configurable rule; dropped when the rule is disabled.
    pub(crate) fn report(
        &mut self,
        settings: &DiagnosticSettings,
        rule: Rule,
        range: TextRange,
        message: impl Into<String>,
        action: Option<DiagnosticAction>,
    ) {
        let Some(severity) = settings.level(rule).severity() else {
            return;
        };
        self.diagnostics.push(Diagnostic {
            severity,
            message: message.into(),
            range,
            rule: Some(rule),
            action,
        });
    }

    pub(crate) fn finish(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}
