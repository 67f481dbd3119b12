/// The kind of error that occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The service rejected the caller's credential.
    Unauthorized,
    /// The service is rate limited.
    RateLimitExceeded,
    /// Any other errors.
    Other,
}
