use std::{fmt, io};

use tracing::{debug, warn};

use crate::{
    engine,
    errors::RegistrationError,
    kinds::{Flag, KeyValue, Positional},
    outcome::{Outcome, Status},
    parameter::Value,
    printers::{self, Page},
    registry::Registry,
    settings::{LongFlagValue, Settings},
};

/**
A command-line parser for one invocation.

Build a `Parser`, register every spec with it, then call
[`parse`][Parser::parse] exactly once. Registration borrows each spec mutably
for the parser's lifetime, and `parse` consumes the parser, so once parsing is
done the specs are free to be read again.

Registration problems are bugs in the calling program, not in the user's
input: the `add_*` methods panic on them, and the `try_add_*` methods return
them as a [`RegistrationError`] for callers that want to handle it
themselves.

When a parse fails or help is requested, the parser renders a usage message
to its output (standard error unless [`output`][Parser::output] says
otherwise). In [`silent`][Parser::silent] mode nothing is rendered; the
[`Outcome`] is the same either way.
*/
pub struct Parser<'a> {
    program: &'a str,
    description: &'a str,
    settings: Settings,
    output: Option<Box<dyn io::Write + 'a>>,
    registry: Registry<'a>,
}

impl<'a> Parser<'a> {
    /// Create a parser for a program with the given display name
    #[must_use]
    pub fn new(program: &'a str) -> Self {
        Self {
            program,
            description: "",
            settings: Settings::default(),
            output: None,
            registry: Registry::default(),
        }
    }

    /// Text printed above the usage synopsis
    pub fn description(&mut self, description: &'a str) -> &mut Self {
        self.description = description;
        self
    }

    /// Suppress all usage rendering
    pub fn silent(&mut self, silent: bool) -> &mut Self {
        self.settings.silent = silent;
        self
    }

    pub fn long_flag_value(&mut self, policy: LongFlagValue) -> &mut Self {
        self.settings.long_flag_value = policy;
        self
    }

    pub fn wrap_width(&mut self, width: usize) -> &mut Self {
        self.settings.wrap_width = width;
        self
    }

    /// Render usage messages here instead of standard error
    pub fn output(&mut self, output: impl io::Write + 'a) -> &mut Self {
        self.output = Some(Box::new(output));
        self
    }

    #[inline]
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn try_add_positional<T>(
        &mut self,
        spec: &'a mut Positional<T>,
    ) -> Result<&mut Self, RegistrationError>
    where
        T: Value + 'a,
    {
        self.registry.add_positional(spec)?;
        Ok(self)
    }

    pub fn try_add_key_value<T>(
        &mut self,
        spec: &'a mut KeyValue<T>,
    ) -> Result<&mut Self, RegistrationError>
    where
        T: Value + 'a,
    {
        self.registry.add_key_value(spec)?;
        Ok(self)
    }

    pub fn try_add_flag(&mut self, spec: &'a mut Flag) -> Result<&mut Self, RegistrationError> {
        self.registry.add_flag(spec)?;
        Ok(self)
    }

    /// Register a positional. Positionals are bound in registration order.
    ///
    /// # Panics
    ///
    /// If the positional's name is empty.
    #[track_caller]
    pub fn add_positional<T>(&mut self, spec: &'a mut Positional<T>) -> &mut Self
    where
        T: Value + 'a,
    {
        match self.try_add_positional(spec) {
            Ok(parser) => parser,
            Err(error) => configuration_error(error),
        }
    }

    /// Register a key-value option.
    ///
    /// # Panics
    ///
    /// If the keys are malformed, reserved, or already registered.
    #[track_caller]
    pub fn add_key_value<T>(&mut self, spec: &'a mut KeyValue<T>) -> &mut Self
    where
        T: Value + 'a,
    {
        match self.try_add_key_value(spec) {
            Ok(parser) => parser,
            Err(error) => configuration_error(error),
        }
    }

    /// Register a flag.
    ///
    /// # Panics
    ///
    /// If the keys are malformed, reserved, or already registered.
    #[track_caller]
    pub fn add_flag(&mut self, spec: &'a mut Flag) -> &mut Self {
        match self.try_add_flag(spec) {
            Ok(parser) => parser,
            Err(error) => configuration_error(error),
        }
    }

    /// Write the usage message for everything registered so far
    pub fn write_usage(&self, out: &mut impl io::Write) -> io::Result<()> {
        printers::print_usage(out, &self.page(), &self.registry)
    }

    fn page(&self) -> Page<'a> {
        Page {
            program: self.program,
            description: self.description,
            wrap_width: self.settings.wrap_width,
        }
    }

    /**
    Parse `args`, which should *exclude* the program name.

    Tokens are consumed until they run out or something goes wrong; the first
    failure ends the parse. Each matched spec is updated as its token is
    consumed, so specs matched before a failure keep their values.
    */
    pub fn parse<S>(mut self, args: &[S]) -> Outcome
    where
        S: AsRef<str>,
    {
        let outcome = engine::run(&mut self.registry, self.settings.long_flag_value, args);
        debug!(status = ?outcome.status(), item = outcome.item(), "parse finished");

        if outcome.status() != Status::Success && !self.settings.silent {
            let page = self.page();

            let written = match self.output.as_mut() {
                Some(out) => printers::print_outcome(out, &page, &self.registry, &outcome),
                None => printers::print_outcome(
                    &mut io::stderr().lock(),
                    &page,
                    &self.registry,
                    &outcome,
                ),
            };

            if let Err(error) = written {
                warn!(%error, "failed to write usage message");
            }
        }

        outcome
    }
}

impl fmt::Debug for Parser<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parser")
            .field("program", &self.program)
            .field("description", &self.description)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

#[track_caller]
fn configuration_error(error: RegistrationError) -> ! {
    panic!("parley configuration error: {error}")
}
