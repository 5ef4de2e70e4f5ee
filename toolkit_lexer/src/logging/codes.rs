//! Error, warning and success codes with their classification metadata
//!
//! Every diagnostic the lexer can raise has a stable code here. Metadata is
//! looked up through a lazily built registry so log sinks can report
//! category, severity and a recommended action without knowing the caller.

use std::collections::HashMap;
use std::sync::OnceLock;

/// Wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIGURATION_ERROR: Code = Code::new("ERR004");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const UNTERMINATED_COMMENT: Code = Code::new("E022");
    pub const TOKEN_TOO_LONG: Code = Code::new("E023");
    pub const TOO_MANY_TOKENS: Code = Code::new("E024");

    // Warnings: scanning continues
    pub const UNKNOWN_ESCAPE: Code = Code::new("W020");
    pub const DANGLING_ESCAPE: Code = Code::new("W021");
    pub const UNTERMINATED_INPUT_ACCEPTED: Code = Code::new("W022");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const SCAN_COMPLETE: Code = Code::new("I020");
    pub const CATEGORIZATION_COMPLETE: Code = Code::new("I021");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I022");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

type Entry = (
    &'static str,
    &'static str,
    Severity,
    bool,
    bool,
    &'static str,
    &'static str,
);

// (code, category, severity, recoverable, requires_halt, description, action)
const ENTRIES: &[Entry] = &[
    (
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Internal lexer inconsistency",
        "Report the input that triggered it as a bug",
    ),
    (
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Logging system initialization failure",
        "Check logging configuration",
    ),
    (
        "ERR004",
        "System",
        Severity::High,
        false,
        true,
        "Runtime configuration could not be loaded",
        "Fix the preferences file or remove it to use defaults",
    ),
    (
        "E005",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File not found at specified path",
        "Check file path and ensure file exists",
    ),
    (
        "E007",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "File exceeds maximum size limit",
        "Split the script or rebuild with a larger limit profile",
    ),
    (
        "E008",
        "FileProcessing",
        Severity::Low,
        false,
        true,
        "File contains no source text",
        "Provide a file with content",
    ),
    (
        "E009",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Permission denied accessing file",
        "Check file permissions",
    ),
    (
        "E010",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Invalid UTF-8 encoding in file",
        "Convert the file to UTF-8",
    ),
    (
        "E011",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "I/O error during file operation",
        "Check disk and file system state",
    ),
    (
        "E012",
        "FileProcessing",
        Severity::Medium,
        false,
        true,
        "Invalid file path provided",
        "Provide a path to a regular file",
    ),
    (
        "E021",
        "Lexical",
        Severity::High,
        false,
        true,
        "String literal is missing its closing quote",
        "Close the string or escape the final quote correctly",
    ),
    (
        "E022",
        "Lexical",
        Severity::High,
        false,
        true,
        "Comment opened with <* is never closed with *>",
        "Add a standalone *> token after the comment",
    ),
    (
        "E023",
        "Lexical",
        Severity::High,
        false,
        true,
        "Token exceeds maximum length",
        "Shorten the token or split the literal",
    ),
    (
        "E024",
        "Lexical",
        Severity::High,
        false,
        true,
        "Source produces too many tokens",
        "Split the script into smaller units",
    ),
    (
        "W020",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Unknown escape sequence in string literal",
        "Use one of \\\" \\\\ \\' \\t \\n",
    ),
    (
        "W021",
        "Lexical",
        Severity::Low,
        true,
        false,
        "String literal ends with a lone backslash",
        "Remove the backslash or complete the escape",
    ),
    (
        "W022",
        "Lexical",
        Severity::Low,
        true,
        false,
        "Unterminated string or comment accepted to end of input",
        "Terminate the construct or disable lenient scanning",
    ),
];

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        ENTRIES
            .iter()
            .map(
                |&(code, category, severity, recoverable, requires_halt, description, action)| {
                    (
                        code,
                        ErrorMetadata {
                            code,
                            category,
                            severity,
                            recoverable,
                            requires_halt,
                            description,
                            recommended_action: action,
                        },
                    )
                },
            )
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Medium)
}

pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.recoverable)
        .unwrap_or(false)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|m| m.requires_halt)
        .unwrap_or(false)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|m| m.recommended_action)
        .unwrap_or("No specific action available")
}

pub fn get_category(code: &str) -> &'static str {
    match get_error_metadata(code) {
        Some(m) => m.category,
        None if code.starts_with('I') => "Success",
        None if code.starts_with('D') => "Debug",
        None => "Unknown",
    }
}
