//! Parser error types for gosplit-parser.

/// Errors raised while parsing Go source or validating rendered output.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    /// The source contains syntax errors.
    #[error("Parse failed at line {line}: {message}")]
    ParseFailed { line: usize, message: String },

    /// The source has no `package` clause.
    #[error("Missing package clause")]
    MissingPackage,

    /// Rendered output does not parse. Indicates a rendering bug.
    #[error("Rendered output is not valid Go at line {line}: {message}")]
    InvalidOutput { line: usize, message: String },
}
