//! Unified diagnostic type produced by every validation pass.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Data is structurally or referentially invalid; blocks export.
    Error,
    /// A risk or inefficiency signal; does not block.
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Client,
    Worker,
    Task,
}

impl EntityKind {
    /// The column holding the identifying value for this collection.
    pub fn id_column(&self) -> &'static str {
        match self {
            EntityKind::Client => "ClientID",
            EntityKind::Worker => "WorkerID",
            EntityKind::Task => "TaskID",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Client => "client",
            EntityKind::Worker => "worker",
            EntityKind::Task => "task",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One validation result.
///
/// `row` is the value of the collection's identifying column, never a
/// positional index (saturation findings use a synthetic `phase-N` id since
/// they are not tied to a row). `column` is the offending column, empty for
/// collection-level findings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub code: &'static str,
    pub severity: Severity,
    pub entity: EntityKind,
    pub row: String,
    pub column: String,
    pub message: String,
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.column.is_empty() {
            write!(
                f,
                "[{}:{}] {} ({} '{}')",
                self.severity, self.code, self.message, self.entity, self.row
            )
        } else {
            write!(
                f,
                "[{}:{}] {} ({} '{}', column '{}')",
                self.severity, self.code, self.message, self.entity, self.row, self.column
            )
        }
    }
}

impl Finding {
    pub fn error(
        code: &'static str,
        entity: EntityKind,
        row: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            code,
            severity: Severity::Error,
            entity,
            row: row.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn warning(
        code: &'static str,
        entity: EntityKind,
        row: impl Into<String>,
        column: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Finding {
            code,
            severity: Severity::Warning,
            entity,
            row: row.into(),
            column: column.into(),
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
