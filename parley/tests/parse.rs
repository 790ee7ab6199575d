use parley::{
    ArgSpec, Flag, Flow, KeyValue, LongFlagValue, Outcome, Parser, Positional, Status,
    errors::ParseError,
};

/// One positional `pos`, one key-value `kv`/`k` and one flag `flag`/`f`
struct Specs {
    pos: Positional<String>,
    kv: KeyValue<String>,
    flag: Flag,
}

impl Specs {
    fn new() -> Self {
        Self {
            pos: Positional::new("pos", "positional argument"),
            kv: KeyValue::new("kv", "key-value argument").short('k'),
            flag: Flag::new("flag", "flag argument").short('f'),
        }
    }

    fn parse(&mut self, args: &[&str]) -> Outcome {
        self.parse_with(LongFlagValue::Ignore, args)
    }

    fn parse_with(&mut self, policy: LongFlagValue, args: &[&str]) -> Outcome {
        let mut parser = Parser::new("test");
        parser
            .add_positional(&mut self.pos)
            .add_key_value(&mut self.kv)
            .add_flag(&mut self.flag)
            .long_flag_value(policy)
            .silent(true);

        parser.parse(args)
    }

    fn pos(&self) -> Option<&str> {
        self.pos.value().map(String::as_str)
    }

    fn kv(&self) -> Option<&str> {
        self.kv.value().map(String::as_str)
    }
}

#[test]
fn test_long_option_with_separate_value() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "--kv", "val"]);

    assert_eq!(outcome.status(), Status::Success);
    assert_eq!(specs.pos(), Some("pos"));
    assert_eq!(specs.kv(), Some("val"));
    assert!(!specs.flag.value());
}

#[test]
fn test_long_option_with_inline_value_and_short_flag() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "--kv=val", "-f"]);

    assert_eq!(outcome.status(), Status::Success);
    assert_eq!(specs.pos(), Some("pos"));
    assert_eq!(specs.kv(), Some("val"));
    assert!(specs.flag.value());
}

#[test]
fn test_missing_positional() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["--kv=val", "-f"]);

    assert_eq!(outcome.status(), Status::MissingArg);
    assert_eq!(outcome.item(), "pos");
    assert_eq!(
        outcome.into_result(),
        Err(ParseError::MissingArg("pos".to_owned()))
    );

    // Everything before the failure was still bound
    assert_eq!(specs.kv(), Some("val"));
    assert!(specs.flag.was_found());
}

#[test]
fn test_missing_value() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "-f", "--kv"]);

    assert_eq!(outcome.status(), Status::MissingValue);
    assert_eq!(outcome.item(), "kv");
}

#[test]
fn test_extra_positional() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "-f", "--kv=v", "pos"]);

    assert_eq!(outcome.status(), Status::ExtraArg);
    assert_eq!(outcome.item(), "");
    assert_eq!(outcome.into_result(), Err(ParseError::ExtraArg));
}

#[test]
fn test_invalid_integer_value() {
    let mut count = KeyValue::<i32>::new("kv", "").short('k');

    let mut parser = Parser::new("test");
    parser.add_key_value(&mut count).silent(true);
    let outcome = parser.parse(&["--kv=v"]);

    assert_eq!(outcome.status(), Status::InvalidValue);
    assert_eq!(outcome.item(), "kv");
    assert!(outcome.detail().is_some());
    assert_eq!(count.value(), None);
}

#[test]
fn test_integer_conversion_consumes_whole_token() {
    let mut count = KeyValue::<i32>::new("count", "").short('n');

    let mut parser = Parser::new("test");
    parser.add_key_value(&mut count).silent(true);

    assert_eq!(parser.parse(&["-n", "22,22"]).status(), Status::InvalidValue);
}

#[test]
fn test_inline_and_separate_values_agree() {
    for args in [&["pos", "--kv=a b"][..], &["pos", "--kv", "a b"][..]] {
        let mut specs = Specs::new();

        assert!(specs.parse(args).is_success());
        assert_eq!(specs.kv(), Some("a b"));
    }
}

#[test]
fn test_short_option_forms() {
    for args in [&["-kval", "pos"][..], &["-k", "val", "pos"][..]] {
        let mut specs = Specs::new();

        assert!(specs.parse(args).is_success());
        assert_eq!(specs.kv(), Some("val"));
        assert_eq!(specs.pos(), Some("pos"));
    }
}

#[test]
fn test_separate_value_is_taken_verbatim() {
    let mut specs = Specs::new();

    assert!(specs.parse(&["--kv", "--flag", "pos"]).is_success());
    assert_eq!(specs.kv(), Some("--flag"));
    assert!(!specs.flag.was_found());
}

#[test]
fn test_separator_makes_everything_positional() {
    let mut specs = Specs::new();

    assert!(specs.parse(&["--", "-f"]).is_success());
    assert_eq!(specs.pos(), Some("-f"));
    assert!(!specs.flag.value());

    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "--", "--kv=1"]);
    assert_eq!(outcome.status(), Status::ExtraArg);
}

#[test]
fn test_unknown_keys() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "--nope"]);
    assert_eq!(outcome.status(), Status::InvalidKey);
    assert_eq!(outcome.item(), "nope");

    let mut specs = Specs::new();
    let outcome = specs.parse(&["-x", "pos"]);
    assert_eq!(outcome.status(), Status::InvalidKey);
    assert_eq!(outcome.item(), "x");
}

#[test]
fn test_short_flag_rejects_attached_value() {
    let mut specs = Specs::new();
    let outcome = specs.parse(&["pos", "-fx"]);

    assert_eq!(outcome.status(), Status::ExtraValue);
    assert_eq!(outcome.item(), "f");
}

#[test]
fn test_long_flag_value_policy() {
    let mut specs = Specs::new();
    assert!(specs.parse(&["pos", "--flag=x"]).is_success());
    assert!(specs.flag.value());

    let mut specs = Specs::new();
    let outcome = specs.parse_with(LongFlagValue::Reject, &["pos", "--flag=x"]);
    assert_eq!(outcome.status(), Status::ExtraValue);
    assert_eq!(outcome.item(), "flag");
}

#[test]
fn test_help_stops_parsing() {
    for help in ["--help", "-h"] {
        let mut specs = Specs::new();
        let outcome = specs.parse(&[help, "--nope"]);

        assert_eq!(outcome.status(), Status::Help);
        assert_eq!(outcome.into_result(), Ok(Flow::Help));
    }
}

#[test]
fn test_help_renders_usage() {
    let mut output = Vec::new();
    let mut specs = Specs::new();

    let mut parser = Parser::new("test 1");
    parser
        .add_positional(&mut specs.pos)
        .add_key_value(&mut specs.kv)
        .add_flag(&mut specs.flag)
        .output(&mut output);

    assert_eq!(parser.parse(&["--help"]).status(), Status::Help);

    let output = String::from_utf8(output).unwrap();
    let expected = "\
Usage:
  test 1 <pos> [FLAGS] [OPTIONS]

Arguments:
  <pos>   positional argument

Options:
  -k, --kv <val>
          key-value argument

Flags:
  -f, --flag
          flag argument
  -h, --help
          print this message
";

    assert_eq!(output, expected);
}

#[test]
fn test_failure_renders_diagnostic() {
    let mut output = Vec::new();
    let mut count = KeyValue::<u32>::new("count", "").short('n');

    let mut parser = Parser::new("test");
    parser.add_key_value(&mut count).output(&mut output);

    assert_eq!(parser.parse(&["-n", "lots"]).status(), Status::InvalidValue);

    let output = String::from_utf8(output).unwrap();
    assert!(output.starts_with(
        "error: could not parse value of argument -n: invalid digit found in string\n"
    ));
}

#[test]
fn test_last_value_wins() {
    let mut specs = Specs::new();

    assert!(specs.parse(&["-k1", "pos", "--kv", "2"]).is_success());
    assert_eq!(specs.kv(), Some("2"));
}

#[test]
fn test_value_or_default() {
    let mut jobs = KeyValue::<u32>::new("jobs", "").short('j');
    assert_eq!(jobs.value_or(8), 8);

    let mut parser = Parser::new("test");
    parser.add_key_value(&mut jobs);
    assert!(parser.parse(&["-j", "2"]).is_success());
    assert_eq!(jobs.value_or(8), 2);
}

#[test]
fn test_no_specs_no_tokens() {
    assert!(Parser::new("test").parse::<String>(&[]).is_success());
}

#[test]
#[should_panic(expected = "short key 'k' is a duplicate")]
fn test_duplicate_short_key_aborts() {
    let mut first = KeyValue::<String>::new("key", "").short('k');
    let mut second = Flag::new("keep", "").short('k');

    Parser::new("test")
        .add_key_value(&mut first)
        .add_flag(&mut second);
}

#[test]
#[should_panic(expected = "config number 2: short key 'h' is reserved")]
fn test_reserved_short_key_aborts() {
    let mut pos = Positional::<String>::new("pos", "");
    let mut host = KeyValue::<String>::new("host", "").short('h');

    Parser::new("test")
        .add_positional(&mut pos)
        .add_key_value(&mut host);
}
