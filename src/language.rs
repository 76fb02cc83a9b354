//! Extension-based language classification for incoming chunks.

use serde::Serialize;

/// Language tag derived from a chunk's file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    #[serde(rename = "python")]
    Python,
    #[serde(rename = "typescript/javascript")]
    TypeScriptJavaScript,
    #[serde(rename = "generic")]
    Generic,
}

impl Language {
    /// Classify an extension. Matching is exact and case-sensitive.
    pub fn from_extension(extension: &str) -> Self {
        match extension {
            "py" => Self::Python,
            "ts" | "js" => Self::TypeScriptJavaScript,
            _ => Self::Generic,
        }
    }

    /// Classify a path by the suffix after its last `.`.
    pub fn from_path(path: &str) -> Self {
        Self::from_extension(file_extension(path))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Python => "python",
            Self::TypeScriptJavaScript => "typescript/javascript",
            Self::Generic => "generic",
        }
    }

    /// Short human-readable note attached to processing results.
    pub fn analysis(&self) -> &'static str {
        match self {
            Self::Python => "Python file processed",
            Self::TypeScriptJavaScript => "TypeScript/JavaScript file processed",
            Self::Generic => "Generic file processed",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Return everything after the last `.` in `path`, or `""` if there is none.
///
/// The whole path is considered, not just the final component, so
/// `/a.d/Makefile` yields `d/Makefile`.
pub fn file_extension(path: &str) -> &str {
    path.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("")
}

/// Count `\n`-separated segments. Empty content is one (empty) line.
pub fn line_count(content: &str) -> usize {
    content.split('\n').count()
}
