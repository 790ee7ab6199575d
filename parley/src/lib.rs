/*!
A small, strongly-typed command line argument parser.

`parley` knows three kinds of argument: [`Positional`] parameters, bound in
the order they're registered; [`KeyValue`] options, given as `--key value`,
`--key=value`, `-k value` or `-kvalue`; and [`Flag`]s, which are either
present or absent. Each one is a plain value owned by the caller. Register
them with a [`Parser`], [`parse`][Parser::parse] the tokens, and read the
results back out of the specs themselves.

```
use parley::{Flag, KeyValue, Parser, Positional, Status};

let mut path = Positional::<String>::new("path", "where to look");
let mut depth = KeyValue::<u32>::new("depth", "how far to look").short('d');
let mut all = Flag::new("all", "include hidden files").short('a');

let mut parser = Parser::new("find");
parser
    .add_positional(&mut path)
    .add_key_value(&mut depth)
    .add_flag(&mut all)
    .silent(true);

let outcome = parser.parse(&["-a", "--depth=3", "src"]);

assert_eq!(outcome.status(), Status::Success);
assert_eq!(path.value().map(String::as_str), Some("src"));
assert_eq!(depth.value(), Some(&3));
assert!(all.value());
```

Every parse produces an [`Outcome`]: a [`Status`] and the key or name it
concerns. `--help` and `-h` are always available and produce
[`Status::Help`]. Unless the parser is silent, any outcome other than success
also prints a usage message.

Values are converted with the [`Value`] trait, which is implemented for every
type that opts into [`ParsedValue`] (and so parses with [`FromStr`][core::str::FromStr]).
*/

mod arguments;
mod engine;
pub mod errors;
mod impls;
mod kinds;
mod outcome;
pub mod parameter;
mod parser;
mod printers;
mod registry;
mod settings;

pub use arguments::LoadedArguments;
pub use kinds::{ArgSpec, Flag, KeyValue, Positional};
pub use outcome::{Flow, ItemForm, Outcome, Status};
pub use parameter::{ConversionError, ParsedValue, Value};
pub use parser::Parser;
pub use registry::{RESERVED_LONG, RESERVED_SHORT};
pub use settings::{LongFlagValue, Settings};

/// The set of tags that identify a key-value or flag (`--long`, `-short`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tags<'a> {
    /// This argument uses only a long tag
    Long { long: &'a str },

    /// This argument uses both a long and short tag
    LongShort { long: &'a str, short: char },
}

impl<'a> Tags<'a> {
    /// Get the long tag
    #[inline]
    #[must_use]
    pub const fn long(&self) -> &'a str {
        match *self {
            Tags::Long { long } | Tags::LongShort { long, .. } => long,
        }
    }

    /// Get the short tag, if any
    #[inline]
    #[must_use]
    pub const fn short(&self) -> Option<char> {
        match *self {
            Tags::LongShort { short, .. } => Some(short),
            Tags::Long { .. } => None,
        }
    }

    /// Replace the short tag, keeping the long one
    #[inline]
    #[must_use]
    pub const fn with_short(self, short: char) -> Self {
        Tags::LongShort {
            long: self.long(),
            short,
        }
    }
}
