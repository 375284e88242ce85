/// Broad classification of an [`AppError`].
///
/// Callers that need to react to a specific failure (the per-year isolation
/// boundary, tests) match on this instead of parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The requested source file does not exist.
    MissingFile,
    /// A year or state argument could not be read as an integer.
    Coercion,
    /// The file exists but its content could not be decoded into records.
    Parse,
    /// Every year of a multi-year request failed.
    InvalidYearBatch,
    /// The state code is not present in the year's data.
    InvalidStateCode,
    /// Writing an export or rendering a map failed.
    Output,
}

#[derive(Clone)]
pub struct AppError {
    kind: ErrorKind,
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(kind: ErrorKind, exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            kind,
            exit_code,
            message: message.into(),
        }
    }

    pub fn missing_file(path: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::MissingFile, 2, format!("file '{path}' does not exist"))
    }

    pub fn coercion(what: &str, raw: &str) -> Self {
        Self::new(
            ErrorKind::Coercion,
            2,
            format!("cannot interpret '{raw}' as an integer {what}"),
        )
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Parse, 2, message)
    }

    pub fn output(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Output, 4, message)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("kind", &self.kind)
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
