use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("malformed DMS coordinate `{input}`: {reason}")]
    Format { input: String, reason: &'static str },
    #[error("unknown colour `{0}`")]
    UnknownColour(String),
    #[error("latitude list has {lat} entries but longitude list has {lon}")]
    MismatchedCoordinates { lat: usize, lon: usize },
    #[error("reference airport `{0}` is not in the airport table")]
    UnknownReference(String),
    #[error("failed to build `{entry}`: {source}")]
    Table {
        entry: String,
        #[source]
        source: Box<ChartError>,
    },
}

impl ChartError {
    pub(crate) fn format(input: &str, reason: &'static str) -> Self {
        ChartError::Format { input: input.to_owned(), reason }
    }

    /// Wraps an error with the name of the table entry being built.
    pub fn in_entry(self, entry: impl Into<String>) -> Self {
        ChartError::Table { entry: entry.into(), source: Box::new(self) }
    }
}
