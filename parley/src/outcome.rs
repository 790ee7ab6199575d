use crate::errors::ParseError;

/// The discriminating part of an [`Outcome`]: what happened when the
/// arguments were parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// Every token was consumed and every positional was bound
    Success,

    /// `--help` or `-h` was given. Not an error; parsing stopped there.
    Help,

    /// A long or short key isn't registered
    InvalidKey,

    /// A key-value option had no attached or following token
    MissingValue,

    /// A flag was given an attached value it can't accept
    ExtraValue,

    /// A value was present, but didn't convert to the argument's type
    InvalidValue,

    /// Fewer positional tokens were supplied than were declared
    MissingArg,

    /// More positional tokens were supplied than were declared
    ExtraArg,
}

impl Status {
    /// True for every status other than [`Success`][Status::Success] and
    /// [`Help`][Status::Help]
    #[inline]
    #[must_use]
    pub const fn is_failure(self) -> bool {
        !matches!(self, Status::Success | Status::Help)
    }
}

/**
The result of one [`Parser::parse`][crate::Parser::parse] call.

An outcome pairs a [`Status`] with the `item` that caused it: the key of the
offending option, or the name of the offending positional. The item is empty
when no single key or name is to blame (success, help, or an excess
positional).
*/
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    status: Status,
    item: String,
    form: ItemForm,
    detail: Option<String>,
}

/// How the [`item`][Outcome::item] of an outcome appeared on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ItemForm {
    /// A positional name, or no item at all
    #[default]
    Name,

    /// A long key, written as `--item`
    Long,

    /// A short key, written as `-item`
    Short,
}

/// What a caller should do after a parse that wasn't a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Arguments are ready; carry on with the program
    Proceed,

    /// Help was printed; the program should exit successfully
    Help,
}

impl Outcome {
    pub(crate) fn success() -> Self {
        Self::new(Status::Success, String::new())
    }

    pub(crate) fn help() -> Self {
        Self::new(Status::Help, String::new())
    }

    pub(crate) fn new(status: Status, item: impl Into<String>) -> Self {
        Self {
            status,
            item: item.into(),
            form: ItemForm::Name,
            detail: None,
        }
    }

    pub(crate) fn with_form(mut self, form: ItemForm) -> Self {
        self.form = form;
        self
    }

    pub(crate) fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// The key or positional name that caused a failure, or `""`
    #[inline]
    #[must_use]
    pub fn item(&self) -> &str {
        &self.item
    }

    #[inline]
    #[must_use]
    pub fn form(&self) -> ItemForm {
        self.form
    }

    /// The item as the user wrote it: `--kv`, `-k`, or a bare positional name
    #[must_use]
    pub fn display_item(&self) -> String {
        match self.form {
            ItemForm::Name => self.item.clone(),
            ItemForm::Long => format!("--{}", self.item),
            ItemForm::Short => format!("-{}", self.item),
        }
    }

    /// Extra information about an [`InvalidValue`][Status::InvalidValue]
    /// failure, usually the message from the value's parser
    #[inline]
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }

    /// The failure as an error, or [`None`] for success and help
    #[must_use]
    pub fn error(&self) -> Option<ParseError> {
        let item = self.display_item();

        Some(match self.status {
            Status::Success | Status::Help => return None,
            Status::InvalidKey => ParseError::InvalidKey(item),
            Status::MissingValue => ParseError::MissingValue(item),
            Status::ExtraValue => ParseError::ExtraValue(item),
            Status::InvalidValue => ParseError::InvalidValue {
                item,
                detail: self.detail.clone().unwrap_or_default(),
            },
            Status::MissingArg => ParseError::MissingArg(item),
            Status::ExtraArg => ParseError::ExtraArg,
        })
    }

    /// Convert into a [`Result`], for callers that would rather use `?`.
    /// Help is not an error; it comes back as [`Flow::Help`].
    pub fn into_result(self) -> Result<Flow, ParseError> {
        match self.error() {
            Some(error) => Err(error),
            None if self.status == Status::Help => Ok(Flow::Help),
            None => Ok(Flow::Proceed),
        }
    }
}
