use std::{env, ffi::OsString, path::Path};

use tracing::debug;

use crate::{errors::LoadError, outcome::Outcome, parser::Parser};

/// Owned container for the arguments of a process, including the program
/// name in position 0.
///
/// A [`Parser`] only ever sees the [`tokens`][LoadedArguments::tokens]; the
/// program name is kept separately so it can be used to label usage messages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoadedArguments {
    arguments: Vec<String>,
}

impl LoadedArguments {
    /// Load the arguments of the current process. Fails if any argument isn't
    /// valid unicode.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_os(env::args_os())
    }

    /// Load arguments from any source of platform strings, with the program
    /// name first.
    pub fn from_os(arguments: impl IntoIterator<Item = OsString>) -> Result<Self, LoadError> {
        let arguments = arguments
            .into_iter()
            .enumerate()
            .map(|(position, arg)| {
                arg.into_string().map_err(|arg| LoadError::NotUnicode {
                    position,
                    lossy: arg.to_string_lossy().into_owned(),
                })
            })
            .collect::<Result<Vec<String>, LoadError>>()?;

        debug!(count = arguments.len(), "loaded arguments");
        Ok(Self { arguments })
    }

    /// The program name exactly as it was invoked, or `""` if there wasn't one
    #[must_use]
    pub fn argv0(&self) -> &str {
        self.arguments.first().map(String::as_str).unwrap_or("")
    }

    /// The final path component of [`argv0`][LoadedArguments::argv0], which
    /// is what usage messages should call the program.
    #[must_use]
    pub fn program_name(&self) -> &str {
        let argv0 = self.argv0();

        Path::new(argv0)
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or(argv0)
    }

    /// Every argument after the program name
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        self.arguments.get(1..).unwrap_or(&[])
    }

    /// A parser labeled with this program's name
    #[must_use]
    pub fn parser(&self) -> Parser<'_> {
        Parser::new(self.program_name())
    }

    /// Run `parser` over the tokens
    pub fn parse(&self, parser: Parser<'_>) -> Outcome {
        parser.parse(self.tokens())
    }
}

impl From<Vec<String>> for LoadedArguments {
    fn from(arguments: Vec<String>) -> Self {
        Self { arguments }
    }
}

impl<S: Into<String>> FromIterator<S> for LoadedArguments {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            arguments: iter.into_iter().map(Into::into).collect(),
        }
    }
}
