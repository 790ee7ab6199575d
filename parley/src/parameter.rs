use core::{fmt::Display, str::FromStr};

/**
A conversion from a single command-line token into a typed value failed.

Keeps the token and the message from the underlying parser, so that
diagnostics can say what went wrong.
*/
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to parse {arg:?}: {message}")]
pub struct ConversionError {
    arg: String,
    message: String,
}

impl ConversionError {
    pub fn new(arg: &str, message: impl Display) -> Self {
        Self {
            arg: arg.to_owned(),
            message: message.to_string(),
        }
    }

    /// The token that failed to convert
    #[inline]
    #[must_use]
    pub fn arg(&self) -> &str {
        &self.arg
    }

    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/**
A type that can be parsed from a single command line token, for use as the
value of a positional parameter or a key-value option.

A conversion must consume the *entire* token. `"22,22"` is not a valid `u32`,
even though it starts with one; implementations must never return a truncated
success. See also [`ParsedValue`] for the common case that your type already
implements [`FromStr`], which has exactly these semantics.
*/
pub trait Value: Sized {
    /// Parse a `Value` from a token given on the command line
    fn from_arg(arg: &str) -> Result<Self, ConversionError>;
}

/// For types with a [`FromStr`] implementation, [`ParsedValue`] automatically
/// gives them a [`Value`] implementation so that they can be used as command
/// line arguments.
pub trait ParsedValue: FromStr {}

impl<T> Value for T
where
    T: ParsedValue,
    T::Err: Display,
{
    #[inline]
    fn from_arg(arg: &str) -> Result<Self, ConversionError> {
        arg.parse().map_err(|err| ConversionError::new(arg, err))
    }
}
