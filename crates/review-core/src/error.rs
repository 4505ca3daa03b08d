/// Error types shared by the content review crates.
///
/// Term table failures are recoverable at the process level: the binary falls back
/// to an empty index and surfaces the message to the operator. Server crates wrap
/// `CoreError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("failed to read term table {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed term table: {0}")]
    Csv(#[from] csv::Error),

    #[error("term table is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("请先输入内容。")]
    EmptyInput,
}
