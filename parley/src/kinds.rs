/*!
The three kinds of argument a [`Parser`][crate::Parser] knows about:
[`Positional`] parameters, [`KeyValue`] options, and [`Flag`]s.

Specs are plain values. Create them first, register them with a parser by
mutable reference, and read their results once the parse is done:

```
use parley::{Flag, KeyValue, Parser, Positional, Status};

let mut input = Positional::<String>::new("input", "file to read");
let mut jobs = KeyValue::<u32>::new("jobs", "worker count").short('j');
let mut verbose = Flag::new("verbose", "print more").short('v');

let mut parser = Parser::new("tool");
parser
    .add_positional(&mut input)
    .add_key_value(&mut jobs)
    .add_flag(&mut verbose)
    .silent(true);

let outcome = parser.parse(&["data.txt", "-j4"]);

assert_eq!(outcome.status(), Status::Success);
assert_eq!(input.value().map(String::as_str), Some("data.txt"));
assert_eq!(jobs.value_or(1), 4);
assert!(!verbose.value());
```
*/

use crate::{
    Tags,
    parameter::{ConversionError, Value},
};

/// The capability shared by every kind of argument: it has a display name
/// and a description, and it knows whether it was found on the command line.
pub trait ArgSpec {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn was_found(&self) -> bool;
}

/// An argument that receives a converted value from a token. Implemented by
/// [`Positional`] and [`KeyValue`], for any [`Value`] type.
pub(crate) trait Bind: ArgSpec {
    /// Convert `arg` and store it. On failure the previous state is kept.
    fn bind(&mut self, arg: &str) -> Result<(), ConversionError>;
}

/// A parameter bound by position rather than by key. Positionals are filled
/// strictly in the order they were registered.
#[derive(Debug, Clone)]
pub struct Positional<T> {
    name: &'static str,
    description: &'static str,
    value: Option<T>,
}

impl<T> Positional<T> {
    #[must_use]
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self {
            name,
            description,
            value: None,
        }
    }

    /// The converted value, if this positional was supplied
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> ArgSpec for Positional<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn was_found(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: Value> Bind for Positional<T> {
    fn bind(&mut self, arg: &str) -> Result<(), ConversionError> {
        self.value = Some(T::from_arg(arg)?);
        Ok(())
    }
}

/// An option with a value, given as `--key value`, `--key=value`,
/// `-k value` or `-kvalue`. The long key is mandatory; the short key is
/// optional.
#[derive(Debug, Clone)]
pub struct KeyValue<T> {
    tags: Tags<'static>,
    description: &'static str,
    value: Option<T>,
}

impl<T> KeyValue<T> {
    #[must_use]
    pub const fn new(long: &'static str, description: &'static str) -> Self {
        Self {
            tags: Tags::Long { long },
            description,
            value: None,
        }
    }

    /// Also accept this option as `-short`
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.tags = self.tags.with_short(short);
        self
    }

    #[inline]
    #[must_use]
    pub const fn tags(&self) -> Tags<'static> {
        self.tags
    }

    /// The converted value, if this option was supplied
    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// The converted value, or `default` if this option wasn't supplied
    #[must_use]
    pub fn value_or(&self, default: T) -> T
    where
        T: Clone,
    {
        self.value.clone().unwrap_or(default)
    }

    #[inline]
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        self.value
    }
}

impl<T> ArgSpec for KeyValue<T> {
    fn name(&self) -> &'static str {
        self.tags.long()
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn was_found(&self) -> bool {
        self.value.is_some()
    }
}

impl<T: Value> Bind for KeyValue<T> {
    fn bind(&mut self, arg: &str) -> Result<(), ConversionError> {
        self.value = Some(T::from_arg(arg)?);
        Ok(())
    }
}

/// A boolean switch, given as `--flag` or `-f`. A flag never takes a value.
#[derive(Debug, Clone)]
pub struct Flag {
    tags: Tags<'static>,
    description: &'static str,
    found: bool,
}

impl Flag {
    #[must_use]
    pub const fn new(long: &'static str, description: &'static str) -> Self {
        Self {
            tags: Tags::Long { long },
            description,
            found: false,
        }
    }

    /// Also accept this flag as `-short`
    #[must_use]
    pub const fn short(mut self, short: char) -> Self {
        self.tags = self.tags.with_short(short);
        self
    }

    #[inline]
    #[must_use]
    pub const fn tags(&self) -> Tags<'static> {
        self.tags
    }

    /// Whether the flag appeared on the command line
    #[inline]
    #[must_use]
    pub const fn value(&self) -> bool {
        self.found
    }

    pub(crate) fn mark(&mut self) {
        self.found = true;
    }
}

impl ArgSpec for Flag {
    fn name(&self) -> &'static str {
        self.tags.long()
    }

    fn description(&self) -> &'static str {
        self.description
    }

    fn was_found(&self) -> bool {
        self.found
    }
}
