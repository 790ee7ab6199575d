/*!
The parsing engine: walks the tokens with a [`ArgumentsParser`], dispatches
each classified token to the matching registered spec, and stops at the first
failure.
*/

use core::ops::ControlFlow;

use parley_parser::{Arg, ArgAccess, ArgumentsParser, Visitor};
use tracing::{debug, trace};

use crate::{
    kinds::{ArgSpec, Bind},
    outcome::{ItemForm, Outcome, Status},
    registry::{Entry, RESERVED_LONG, RESERVED_SHORT, Registry},
    settings::LongFlagValue,
};

type Step = ControlFlow<Outcome>;

/// Run the state machine over `args` to completion, binding values into the
/// registered specs as a side effect.
pub(crate) fn run<S>(registry: &mut Registry<'_>, policy: LongFlagValue, args: &[S]) -> Outcome
where
    S: AsRef<str>,
{
    let mut arguments = ArgumentsParser::new(args);
    let mut bound = 0;

    while let Some(step) = arguments.next_arg(Dispatch {
        registry: &mut *registry,
        bound: &mut bound,
        policy,
    }) {
        if let ControlFlow::Break(outcome) = step {
            return outcome;
        }
    }

    match registry.positional_name(bound) {
        Some(name) => {
            debug!(name, "ran out of tokens before every positional was bound");
            Outcome::new(Status::MissingArg, name)
        }
        None => Outcome::success(),
    }
}

struct Dispatch<'r, 'a> {
    registry: &'r mut Registry<'a>,

    /// Number of positionals bound so far; also the index of the next one
    bound: &'r mut usize,

    policy: LongFlagValue,
}

fn bind(spec: &mut dyn Bind, item: &str, form: ItemForm, argument: Arg<'_>) -> Step {
    match spec.bind(argument.as_str()) {
        Ok(()) => {
            trace!(item, value = argument.as_str(), "bound value");
            ControlFlow::Continue(())
        }
        Err(error) => {
            debug!(item, %error, "value failed to convert");
            ControlFlow::Break(
                Outcome::new(Status::InvalidValue, item)
                    .with_form(form)
                    .with_detail(error.message()),
            )
        }
    }
}

fn fail(status: Status, item: impl Into<String>, form: ItemForm) -> Step {
    ControlFlow::Break(Outcome::new(status, item).with_form(form))
}

impl<'arg> Visitor<'arg> for Dispatch<'_, '_> {
    type Value = Step;

    fn visit_positional(self, argument: Arg<'arg>) -> Step {
        let index = *self.bound;

        let Some(spec) = self.registry.positional(index) else {
            debug!(token = argument.as_str(), "excess positional");
            return fail(Status::ExtraArg, "", ItemForm::Name);
        };

        let name = spec.name();
        let step = bind(spec, name, ItemForm::Name, argument);

        if step.is_continue() {
            *self.bound += 1;
        }

        step
    }

    fn visit_long_option(self, option: Arg<'arg>, argument: Arg<'arg>) -> Step {
        let key = option.as_str();
        debug!(key, value = argument.as_str(), "long option with inline value");

        if RESERVED_LONG.contains(&key) {
            return ControlFlow::Break(Outcome::help());
        }

        match self.registry.long(key) {
            None => fail(Status::InvalidKey, key, ItemForm::Long),
            Some(Entry::KeyValue(spec)) => bind(spec, key, ItemForm::Long, argument),
            Some(Entry::Flag(flag)) => match self.policy {
                LongFlagValue::Ignore => {
                    debug!(key, "discarding value attached to long flag");
                    flag.mark();
                    ControlFlow::Continue(())
                }
                LongFlagValue::Reject => fail(Status::ExtraValue, key, ItemForm::Long),
            },
        }
    }

    fn visit_long(self, option: Arg<'arg>, arg: impl ArgAccess<'arg>) -> Step {
        let key = option.as_str();
        debug!(key, "long option");

        if RESERVED_LONG.contains(&key) {
            return ControlFlow::Break(Outcome::help());
        }

        match self.registry.long(key) {
            None => fail(Status::InvalidKey, key, ItemForm::Long),
            Some(Entry::Flag(flag)) => {
                flag.mark();
                ControlFlow::Continue(())
            }
            Some(Entry::KeyValue(spec)) => match arg.take() {
                Some(argument) => bind(spec, key, ItemForm::Long, argument),
                None => fail(Status::MissingValue, key, ItemForm::Long),
            },
        }
    }

    fn visit_short_option(self, option: char, argument: Arg<'arg>) -> Step {
        debug!(key = %option, value = argument.as_str(), "short option with attached value");

        if RESERVED_SHORT.contains(&option) {
            return ControlFlow::Break(Outcome::help());
        }

        match self.registry.short(option) {
            None => fail(Status::InvalidKey, option, ItemForm::Short),
            Some(Entry::Flag(_)) => fail(Status::ExtraValue, option, ItemForm::Short),
            Some(Entry::KeyValue(spec)) => {
                let mut buffer = [0; 4];
                bind(spec, option.encode_utf8(&mut buffer), ItemForm::Short, argument)
            }
        }
    }

    fn visit_short(self, option: char, arg: impl ArgAccess<'arg>) -> Step {
        debug!(key = %option, "short option");

        if RESERVED_SHORT.contains(&option) {
            return ControlFlow::Break(Outcome::help());
        }

        match self.registry.short(option) {
            None => fail(Status::InvalidKey, option, ItemForm::Short),
            Some(Entry::Flag(flag)) => {
                flag.mark();
                ControlFlow::Continue(())
            }
            Some(Entry::KeyValue(spec)) => match arg.take() {
                Some(argument) => {
                    let mut buffer = [0; 4];
                    bind(spec, option.encode_utf8(&mut buffer), ItemForm::Short, argument)
                }
                None => fail(Status::MissingValue, option, ItemForm::Short),
            },
        }
    }
}
