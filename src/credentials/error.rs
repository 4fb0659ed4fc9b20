use thiserror::Error;

/// Reasons a secret cannot be hashed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("secret is empty")]
    Empty,
    #[error("secret is {len} bytes, maximum is {max}")]
    TooLong { len: usize, max: usize },
    #[error("secret contains a NUL byte")]
    NulByte,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("malformed hash")]
    MalformedHash,
    #[error("secure random source unavailable: {0}")]
    RandomSource(String),
    #[error("hash backend failure: {0}")]
    Backend(String),
    #[error("invalid cost policy: {0}")]
    InvalidCostPolicy(String),
}

impl From<rand::Error> for Error {
    fn from(err: rand::Error) -> Self {
        Self::RandomSource(err.to_string())
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_messages_do_not_leak_secret() {
        let err = Error::from(InvalidInput::TooLong { len: 80, max: 72 });
        assert_eq!(
            err.to_string(),
            "invalid input: secret is 80 bytes, maximum is 72"
        );
    }
}
