/// Result of reading a resource from the backend
///
/// Reads never fail for the caller: every variant but `Fetched` degrades to an
/// empty value, but tests and callers can still tell why no data came back.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Fetched(T),
    /// The backend answered successfully without content
    Empty,
    /// The request could not be sent, or the backend answered with a non-success status
    TransportError(String),
    /// The backend answered with something that is not the expected JSON document
    DecodeError(String),
}

impl<T> FetchOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Fetched(data) => FetchOutcome::Fetched(f(data)),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::TransportError(message) => FetchOutcome::TransportError(message),
            FetchOutcome::DecodeError(message) => FetchOutcome::DecodeError(message),
        }
    }

    pub fn and_then<U>(self, f: impl FnOnce(T) -> FetchOutcome<U>) -> FetchOutcome<U> {
        match self {
            FetchOutcome::Fetched(data) => f(data),
            FetchOutcome::Empty => FetchOutcome::Empty,
            FetchOutcome::TransportError(message) => FetchOutcome::TransportError(message),
            FetchOutcome::DecodeError(message) => FetchOutcome::DecodeError(message),
        }
    }

    pub fn is_fetched(&self) -> bool {
        matches!(self, FetchOutcome::Fetched(_))
    }

    pub fn data(self) -> Option<T> {
        match self {
            FetchOutcome::Fetched(data) => Some(data),
            _ => None,
        }
    }
}

impl<T: Default> FetchOutcome<T> {
    pub fn into_data_or_default(self) -> T {
        self.data().unwrap_or_default()
    }
}
