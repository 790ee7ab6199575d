use std::{
    fmt::Display,
    io::{self, Write as _},
};

use indent_write::io::IndentWriter;
use joinery::JoinableIterator;
use lazy_format::lazy_format;

use crate::{Tags, outcome::Outcome, registry::Registry};

const HELP_TAGS: Tags<'static> = Tags::LongShort {
    long: "help",
    short: 'h',
};

const HELP_DESCRIPTION: &str = "print this message";

const SECTION_INDENT: &str = "  ";
const DESCRIPTION_INDENT: &str = "        ";

/// Descriptions are never wrapped narrower than this, however small the
/// configured width
const MIN_DESCRIPTION_WIDTH: usize = 20;

/// The parts of a usage message that don't come from the registry
#[derive(Debug, Clone, Copy)]
pub(crate) struct Page<'a> {
    pub program: &'a str,
    pub description: &'a str,
    pub wrap_width: usize,
}

impl Page<'_> {
    fn description_width(&self) -> usize {
        self.wrap_width
            .saturating_sub(SECTION_INDENT.len() + DESCRIPTION_INDENT.len())
            .max(MIN_DESCRIPTION_WIDTH)
    }
}

fn printable_tags(tags: Tags<'_>) -> impl Display + '_ {
    lazy_format!(match (tags) {
        Tags::Long { long } => "    --{long}",
        Tags::LongShort { long, short } => "-{short}, --{long}",
    })
}

/// Print the diagnostic line for a failed outcome, if any, then the usage.
pub(crate) fn print_outcome(
    out: &mut (impl io::Write + ?Sized),
    page: &Page<'_>,
    registry: &Registry<'_>,
    outcome: &Outcome,
) -> io::Result<()> {
    if let Some(error) = outcome.error() {
        writeln!(out, "error: {error}")?;
    }

    print_usage(out, page, registry)
}

/*
Overall structure:

DESCRIPTION

Usage:
  command <ARG> [FLAGS] [OPTIONS]

Arguments:
  <ARG>   description

Options:
  -k, --key <val>
          description

Flags:
  -h, --help
          print this message
 */
pub(crate) fn print_usage(
    out: &mut (impl io::Write + ?Sized),
    page: &Page<'_>,
    registry: &Registry<'_>,
) -> io::Result<()> {
    if !page.description.is_empty() {
        let width = page.wrap_width.max(MIN_DESCRIPTION_WIDTH);
        writeln!(out, "{}", textwrap::fill(page.description, width))?;
        writeln!(out)?;
    }

    writeln!(out, "Usage:")?;
    {
        let mut out = IndentWriter::new(SECTION_INDENT, &mut *out);
        print_synopsis(&mut out, page.program, registry)?;
    }

    let width = page.description_width();

    maybe_section(out, "Arguments", registry.positionals(), |out, (name, description)| {
        describe(out, lazy_format!("<{name}>"), description, width)
    })?;

    maybe_section(out, "Options", registry.key_values(), |out, (tags, description)| {
        let tags = printable_tags(tags);
        describe(out, lazy_format!("{tags} <val>"), description, width)
    })?;

    section(out, "Flags", |mut out| {
        registry
            .flags()
            .try_for_each(|(tags, description)| {
                describe(&mut out, printable_tags(tags), description, width)
            })?;

        describe(&mut out, printable_tags(HELP_TAGS), HELP_DESCRIPTION, width)
    })
}

fn print_synopsis(
    out: &mut (impl io::Write + ?Sized),
    program: &str,
    registry: &Registry<'_>,
) -> io::Result<()> {
    let names: Vec<&str> = registry.positionals().map(|(name, _)| name).collect();

    write!(out, "{program}")?;

    if !names.is_empty() {
        let names = names.iter().map(|name| lazy_format!("<{name}>"));
        write!(out, " {}", names.join_with(' '))?;
    }

    if registry.has_flags() {
        write!(out, " [FLAGS]")?;
    }

    if registry.has_key_values() {
        write!(out, " [OPTIONS]")?;
    }

    writeln!(out)
}

/// Write a section by writing a newline, then the `header`, then an
/// indented `body`.
fn section<O: io::Write + ?Sized, T>(
    out: &mut O,
    header: &str,
    body: impl FnOnce(IndentWriter<&mut O>) -> io::Result<T>,
) -> io::Result<T> {
    writeln!(out, "\n{header}:")?;
    body(IndentWriter::new(SECTION_INDENT, out))
}

/// Write an optional section, only if the iterator is not empty.
/// Otherwise identical to `section`.
fn maybe_section<O: io::Write + ?Sized, I: IntoIterator>(
    out: &mut O,
    header: &str,
    items: I,
    body: impl Fn(&mut IndentWriter<&mut O>, I::Item) -> io::Result<()>,
) -> io::Result<()> {
    let mut items = items.into_iter();

    match items.next() {
        None => Ok(()),
        Some(first) => section(out, header, |mut out| {
            body(&mut out, first)?;
            items.try_for_each(|item| body(&mut out, item))
        }),
    }
}

/// Describe an item by printing the item, followed by the indented and
/// wrapped description.
///
/// If the item is short and the description fits on one line, the entire
/// thing is instead printed on a single line.
fn describe(
    out: &mut (impl io::Write + ?Sized),
    item: impl Display,
    description: &str,
    width: usize,
) -> io::Result<()> {
    /// Counts the bytes that flow through it, so that `describe` can tell
    /// how wide the item was.
    struct IoByteCounter<'a, T: io::Write + ?Sized> {
        inner: &'a mut T,
        count: &'a mut usize,
    }

    impl<T: io::Write + ?Sized> io::Write for IoByteCounter<'_, T> {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let n = self.inner.write(buf)?;
            *self.count += n;
            Ok(n)
        }

        fn flush(&mut self) -> io::Result<()> {
            self.inner.flush()
        }
    }

    let mut count = 0;

    {
        let mut out = IoByteCounter {
            inner: &mut *out,
            count: &mut count,
        };
        write!(out, "{item}")?;
    }

    if description.is_empty() {
        return writeln!(out);
    }

    let description = textwrap::fill(description, width);

    if let Some(space) = DESCRIPTION_INDENT.len().checked_sub(count)
        && space >= 2
        && !description.contains('\n')
    {
        (0..space).try_for_each(|_| out.write_all(b" "))?;
        writeln!(out, "{description}")
    } else {
        let mut out = IndentWriter::new(DESCRIPTION_INDENT, out);

        writeln!(out, "\n{description}")?;
        if description.contains('\n') {
            writeln!(out)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        kinds::{Flag, KeyValue, Positional},
        outcome::{ItemForm, Status},
    };

    fn render(page: Page<'_>, registry: &Registry<'_>, outcome: Option<&Outcome>) -> String {
        let mut out = Vec::new();
        match outcome {
            Some(outcome) => print_outcome(&mut out, &page, registry, outcome).unwrap(),
            None => print_usage(&mut out, &page, registry).unwrap(),
        }
        String::from_utf8(out).unwrap()
    }

    fn page() -> Page<'static> {
        Page {
            program: "tool",
            description: "",
            wrap_width: 80,
        }
    }

    #[test]
    fn test_full_usage() {
        let mut input = Positional::<String>::new("in", "read this");
        let mut jobs = KeyValue::<u32>::new("jobs", "worker count").short('j');
        let mut verbose = Flag::new("verbose", "");
        let mut registry = Registry::default();

        registry.add_positional(&mut input).unwrap();
        registry.add_key_value(&mut jobs).unwrap();
        registry.add_flag(&mut verbose).unwrap();

        let expected = "\
Usage:
  tool <in> [FLAGS] [OPTIONS]

Arguments:
  <in>    read this

Options:
  -j, --jobs <val>
          worker count

Flags:
      --verbose
  -h, --help
          print this message
";

        assert_eq!(render(page(), &registry, None), expected);
    }

    #[test]
    fn test_bare_usage_only_has_help() {
        let registry = Registry::default();

        let expected = "\
Usage:
  tool

Flags:
  -h, --help
          print this message
";

        assert_eq!(render(page(), &registry, None), expected);
    }

    #[test]
    fn test_description_comes_first() {
        let registry = Registry::default();
        let page = Page {
            description: "Does a thing.",
            ..page()
        };

        assert!(render(page, &registry, None).starts_with("Does a thing.\n\nUsage:\n"));
    }

    #[test]
    fn test_long_descriptions_wrap() {
        let mut input = Positional::<String>::new("in", "one two three four five six seven eight");
        let mut registry = Registry::default();
        registry.add_positional(&mut input).unwrap();

        let page = Page {
            wrap_width: 30,
            ..page()
        };

        let output = render(page, &registry, None);
        assert!(output.contains("  <in>\n          one two three four\n          five six seven eight\n\n"));
    }

    #[test]
    fn test_tiny_width_still_wraps_at_words() {
        let registry = Registry::default();
        let page = Page {
            wrap_width: 0,
            ..page()
        };

        let output = render(page, &registry, None);
        assert!(output.ends_with("  -h, --help\n          print this message\n"));
    }

    #[test]
    fn test_failure_prints_diagnostic_first() {
        let registry = Registry::default();
        let outcome = Outcome::new(Status::MissingValue, "jobs").with_form(ItemForm::Long);

        let output = render(page(), &registry, Some(&outcome));
        assert!(output.starts_with("error: argument key --jobs needs a value\nUsage:\n"));
    }

    #[test]
    fn test_help_has_no_diagnostic() {
        let registry = Registry::default();

        let output = render(page(), &registry, Some(&Outcome::help()));
        assert!(output.starts_with("Usage:\n"));
    }
}
