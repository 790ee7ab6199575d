#![no_std]

/*!
Low-level implementation of argument handling. Takes care of distinctions
between flags, options, and positionals, that sort of thing. No type handling
happens here, and no knowledge of which keys exist; that's left to the
[`Visitor`]. Usually this is too low level to use directly.
*/

#[cfg(test)]
extern crate std;

use core::fmt::{self, Debug};

/**
A single, raw argument passed in from the command line.

This type is used in two ways: to indicate long command line options, and to
indicate arguments themselves. For instance, given
`--target foo --path=bar input.txt`, `target`, `foo`, `path`, `bar`, and
`input.txt` would all be passed as [`Arg`] values to the relevant functions.
*/
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arg<'arg>(&'arg str);

impl<'arg> Arg<'arg> {
    #[inline]
    #[must_use]
    pub const fn new(arg: &'arg str) -> Self {
        Self(arg)
    }

    #[inline]
    #[must_use]
    pub const fn as_str(&self) -> &'arg str {
        self.0
    }
}

impl PartialEq<str> for Arg<'_> {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Arg<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl Debug for Arg<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/**
The [`ArgumentsParser`] type operates by passing arguments it finds into a
[`Visitor`], to be handled.
 */
pub trait Visitor<'arg> {
    type Value;

    /// A positional parameter. Everything after a raw `--` arrives here,
    /// no matter what it looks like.
    fn visit_positional(self, argument: Arg<'arg>) -> Self::Value;

    /// A long option that definitely has an argument, because it was given
    /// as `--option=argument`. The argument may be empty (`--option=`).
    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Self::Value;

    /// A long option or flag, such as `--option`
    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Self::Value;

    /// A short option that definitely has an attached argument, because
    /// there was more text after the key, as in `-ovalue`. Flags can't
    /// accept this form.
    fn visit_short_option(self, option: char, argument: Arg<'arg>) -> Self::Value;

    /// A short option or flag with nothing attached, such as `-o`
    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Self::Value;
}

/**
[`ArgAccess`] allows a visitor to decide if a given parameter needs an argument,
based on the identity of the flag or option.

Consider `--foo bar`. Is this a pair of parameters (the flag `--foo` and the
positional parameter `bar`) or a single option `--foo bar` that takes an
argument? The [`ArgumentsParser`] can't independently classify it, so instead,
a visitor requests an argument via this trait only for options that need them.
*/
pub trait ArgAccess<'arg>: Sized {
    /**
    Get an argument from the parser. This should only be called by options
    that need it; flags should simply ignore it, to ensure that the next
    command line argument can correctly be parsed independently.

    The next token is taken verbatim, even if it looks like an option or is a
    raw `--`. This returns [`None`] only if all of the CLI arguments have been
    exhausted.
    */
    fn take(self) -> Option<Arg<'arg>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    PositionalOnly,
}

/**
An `ArgumentsParser` is the main entry point into `parley_parser`. It parses
arguments in each call to [`next_arg`][ArgumentsParser::next_arg], sending
those arguments to the given [`Visitor`]. It handles distinguishing flags,
options, and positionals, along with the `--` separator.

The parser is a cursor over a borrowed slice of tokens; the slice itself is
never modified. The ubiquitous `'arg` lifetime refers to this borrowed command
line data.
*/
#[derive(Debug, Clone)]
pub struct ArgumentsParser<'arg, S> {
    state: State,
    args: &'arg [S],
    cursor: usize,
}

impl<'arg, S> ArgumentsParser<'arg, S>
where
    S: AsRef<str>,
{
    /**
    Create a new [`ArgumentsParser`] from a slice of tokens, where each token
    is a single argument received from the command line. This list should
    *exclude* the name of the program, which is commonly passed as the first
    argument in the list.
     */
    #[inline]
    #[must_use]
    pub fn new(args: &'arg [S]) -> Self {
        Self {
            state: State::Scanning,
            args,
            cursor: 0,
        }
    }

    /// True once a raw `--` has been seen; every remaining token will be
    /// treated as positional.
    #[inline]
    #[must_use]
    pub fn is_positional_only(&self) -> bool {
        self.state == State::PositionalOnly
    }

    /// The tokens that haven't been consumed yet.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'arg [S] {
        self.args.get(self.cursor..).unwrap_or(&[])
    }

    #[inline]
    fn pop(&mut self) -> Option<&'arg str> {
        let args: &'arg [S] = self.args;
        let arg = args.get(self.cursor)?;
        self.cursor += 1;
        Some(arg.as_ref())
    }

    /// Put `self` into a `PositionalOnly` state, then process a positional
    /// argument
    #[inline]
    fn positional_only_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        self.state = State::PositionalOnly;
        self.pop().map(Arg).map(|arg| visitor.visit_positional(arg))
    }

    /// Handle everything after the leading `-` of a short option. `short`
    /// must be non-empty.
    #[inline]
    fn handle_short<V>(&mut self, short: &'arg str, visitor: V) -> V::Value
    where
        V: Visitor<'arg>,
    {
        let mut chars = short.chars();

        match chars.next() {
            None => visitor.visit_positional(Arg("-")),
            Some(option) => match chars.as_str() {
                "" => visitor.visit_short(option, StandardArgAccess { parent: self }),
                attached => visitor.visit_short_option(option, Arg(attached)),
            },
        }
    }

    /// Classify the next token and send it to the visitor. Returns [`None`]
    /// once the tokens are exhausted. An option may consume one extra token
    /// as its argument, via [`ArgAccess`].
    pub fn next_arg<V>(&mut self, visitor: V) -> Option<V::Value>
    where
        V: Visitor<'arg>,
    {
        match self.state {
            State::Scanning => match self.pop()? {
                "--" => self.positional_only_arg(visitor),
                argument => Some(match argument.strip_prefix("--") {
                    Some(option) => match split_once(option, b'=') {
                        Some((option, argument)) => {
                            visitor.visit_long_option(Arg(option), Arg(argument))
                        }
                        None => visitor.visit_long(Arg(option), StandardArgAccess { parent: self }),
                    },
                    None => match argument.strip_prefix('-') {
                        Some("") | None => visitor.visit_positional(Arg(argument)),
                        Some(short) => self.handle_short(short, visitor),
                    },
                }),
            },
            State::PositionalOnly => self.positional_only_arg(visitor),
        }
    }
}

/// ArgAccess implementation that gets the next argument from the list.
struct StandardArgAccess<'a, 'arg, S> {
    parent: &'a mut ArgumentsParser<'arg, S>,
}

impl<'arg, S> ArgAccess<'arg> for StandardArgAccess<'_, 'arg, S>
where
    S: AsRef<str>,
{
    fn take(self) -> Option<Arg<'arg>> {
        self.parent.pop().map(Arg)
    }
}

/// Split at the first `delimiter`. The delimiter must be ASCII, so that both
/// halves are still valid `str` slices.
fn split_once(input: &str, delimiter: u8) -> Option<(&str, &str)> {
    debug_assert!(delimiter.is_ascii());

    memchr::memchr(delimiter, input.as_bytes()).map(|i| (&input[..i], &input[i + 1..]))
}
