/*!
Error types for [`parley`][crate].

There are two very different kinds of error here. [`RegistrationError`] is a
mistake in the program itself: a malformed or duplicated key, found while
specs are being registered. [`ParseError`] is a mistake by the user running
the program, found while parsing their arguments; it's usually carried in an
[`Outcome`][crate::Outcome] rather than raised directly.
*/

use thiserror::Error;

/// A spec couldn't be registered with a [`Parser`][crate::Parser].
///
/// `config` is the 1-based registration number of the offending spec, counting
/// every `add_*` call on the parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum RegistrationError {
    /// A positional was registered with an empty name
    #[error("config number {config}: positional name cannot be empty")]
    EmptyName { config: usize },

    /// A key-value or flag was registered with an empty long key
    #[error("config number {config}: key cannot be empty")]
    EmptyKey { config: usize },

    /// The long key contains `=`, which would make `--key=value` ambiguous
    #[error("config number {config}: key {key:?} cannot contain '='")]
    KeyContainsEquals { config: usize, key: &'static str },

    /// The long key is reserved by the parser, like `help`
    #[error("config number {config}: key {key:?} is reserved")]
    ReservedKey { config: usize, key: &'static str },

    /// The short key is reserved by the parser, like `h`
    #[error("config number {config}: short key {short:?} is reserved")]
    ReservedShortKey { config: usize, short: char },

    /// The short key can never be matched on the command line
    #[error("config number {config}: {short:?} cannot be used as a short key")]
    InvalidShortKey { config: usize, short: char },

    /// Another key-value or flag already uses this long key
    #[error("config number {config}: key {key:?} is a duplicate")]
    DuplicateKey { config: usize, key: &'static str },

    /// Another key-value or flag already uses this short key
    #[error("config number {config}: short key {short:?} is a duplicate")]
    DuplicateShortKey { config: usize, short: char },
}

/// The user's arguments couldn't be parsed. Each variant corresponds to a
/// failing [`Status`][crate::Status]. Keys are written the way the user gave
/// them, `--key` or `-k`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("argument key {0} invalid")]
    InvalidKey(String),

    #[error("argument key {0} needs a value")]
    MissingValue(String),

    #[error("flag {0} does not take a value")]
    ExtraValue(String),

    #[error("could not parse value of argument {item}: {detail}")]
    InvalidValue { item: String, detail: String },

    #[error("missing required argument <{0}>")]
    MissingArg(String),

    #[error("too many positional arguments")]
    ExtraArg,
}

/// The process arguments couldn't be loaded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("argument {position} is not valid unicode: {lossy:?}")]
    NotUnicode { position: usize, lossy: String },
}
