use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    Tags,
    errors::RegistrationError,
    kinds::{ArgSpec, Bind, Flag, KeyValue, Positional},
    parameter::Value,
};

/// Long keys owned by the parser itself. `--help` always requests usage.
pub const RESERVED_LONG: &[&str] = &["help"];

/// Short keys owned by the parser itself. `-h` always requests usage.
pub const RESERVED_SHORT: &[char] = &['h'];

struct Keyed<'a> {
    tags: Tags<'static>,
    spec: &'a mut dyn Bind,
}

/// A registered key-value or flag spec, found by key
pub(crate) enum Entry<'r, 'a> {
    KeyValue(&'r mut (dyn Bind + 'a)),
    Flag(&'r mut Flag),
}

/**
The set of specs registered with a parser.

Positionals are kept in registration order. Key-value options and flags each
get a long-key map and a short-key map into their storage; both namespaces
are checked together, so a key is never shared between a key-value and a
flag.
*/
#[derive(Default)]
pub(crate) struct Registry<'a> {
    configs: usize,

    positionals: Vec<&'a mut dyn Bind>,

    key_values: Vec<Keyed<'a>>,
    key_value_long: BTreeMap<&'static str, usize>,
    key_value_short: BTreeMap<char, usize>,

    flags: Vec<&'a mut Flag>,
    flag_long: BTreeMap<&'static str, usize>,
    flag_short: BTreeMap<char, usize>,
}

impl<'a> Registry<'a> {
    pub fn add_positional<T>(
        &mut self,
        spec: &'a mut Positional<T>,
    ) -> Result<(), RegistrationError>
    where
        T: Value + 'a,
    {
        self.configs += 1;
        let config = self.configs;

        if spec.name().is_empty() {
            return Err(RegistrationError::EmptyName { config });
        }

        debug!(config, name = spec.name(), "registered positional");
        self.positionals.push(spec);
        Ok(())
    }

    pub fn add_key_value<T>(&mut self, spec: &'a mut KeyValue<T>) -> Result<(), RegistrationError>
    where
        T: Value + 'a,
    {
        self.configs += 1;
        let tags = spec.tags();
        self.check_keys(tags)?;

        let index = self.key_values.len();
        self.key_value_long.insert(tags.long(), index);
        if let Some(short) = tags.short() {
            self.key_value_short.insert(short, index);
        }

        debug!(config = self.configs, key = tags.long(), short = ?tags.short(), "registered key-value");
        self.key_values.push(Keyed { tags, spec });
        Ok(())
    }

    pub fn add_flag(&mut self, spec: &'a mut Flag) -> Result<(), RegistrationError> {
        self.configs += 1;
        let tags = spec.tags();
        self.check_keys(tags)?;

        let index = self.flags.len();
        self.flag_long.insert(tags.long(), index);
        if let Some(short) = tags.short() {
            self.flag_short.insert(short, index);
        }

        debug!(config = self.configs, key = tags.long(), short = ?tags.short(), "registered flag");
        self.flags.push(spec);
        Ok(())
    }

    /// Validate the keys of registration number `self.configs` against the
    /// reserved keys and everything registered so far.
    fn check_keys(&self, tags: Tags<'static>) -> Result<(), RegistrationError> {
        let config = self.configs;
        let key = tags.long();

        if key.is_empty() {
            return Err(RegistrationError::EmptyKey { config });
        }

        if RESERVED_LONG.contains(&key) {
            return Err(RegistrationError::ReservedKey { config, key });
        }

        if key.contains('=') {
            return Err(RegistrationError::KeyContainsEquals { config, key });
        }

        if self.key_value_long.contains_key(key) || self.flag_long.contains_key(key) {
            return Err(RegistrationError::DuplicateKey { config, key });
        }

        let Some(short) = tags.short() else {
            return Ok(());
        };

        if RESERVED_SHORT.contains(&short) {
            return Err(RegistrationError::ReservedShortKey { config, short });
        }

        // `--` is always a separator or a long option
        if short == '-' {
            return Err(RegistrationError::InvalidShortKey { config, short });
        }

        if self.key_value_short.contains_key(&short) || self.flag_short.contains_key(&short) {
            return Err(RegistrationError::DuplicateShortKey { config, short });
        }

        Ok(())
    }

    /// The positional at `index` in registration order
    pub fn positional(&mut self, index: usize) -> Option<&mut (dyn Bind + 'a)> {
        self.positionals.get_mut(index).map(|spec| &mut **spec)
    }

    pub fn positional_name(&self, index: usize) -> Option<&'static str> {
        self.positionals.get(index).map(|spec| spec.name())
    }

    /// Look up a long key, key-values first, then flags
    pub fn long(&mut self, key: &str) -> Option<Entry<'_, 'a>> {
        if let Some(&index) = self.key_value_long.get(key) {
            return self
                .key_values
                .get_mut(index)
                .map(|keyed| Entry::KeyValue(&mut *keyed.spec));
        }

        let index = *self.flag_long.get(key)?;
        self.flags.get_mut(index).map(|flag| Entry::Flag(&mut **flag))
    }

    /// Look up a short key, key-values first, then flags
    pub fn short(&mut self, key: char) -> Option<Entry<'_, 'a>> {
        if let Some(&index) = self.key_value_short.get(&key) {
            return self
                .key_values
                .get_mut(index)
                .map(|keyed| Entry::KeyValue(&mut *keyed.spec));
        }

        let index = *self.flag_short.get(&key)?;
        self.flags.get_mut(index).map(|flag| Entry::Flag(&mut **flag))
    }

    /// `(name, description)` for each positional, in registration order
    pub fn positionals(&self) -> impl Iterator<Item = (&'static str, &'static str)> {
        self.positionals
            .iter()
            .map(|spec| (spec.name(), spec.description()))
    }

    /// `(tags, description)` for each key-value, ordered by long key
    pub fn key_values(&self) -> impl Iterator<Item = (Tags<'static>, &'static str)> {
        self.key_value_long
            .values()
            .filter_map(|&index| self.key_values.get(index))
            .map(|keyed| (keyed.tags, keyed.spec.description()))
    }

    /// `(tags, description)` for each flag, ordered by long key
    pub fn flags(&self) -> impl Iterator<Item = (Tags<'static>, &'static str)> {
        self.flag_long
            .values()
            .filter_map(|&index| self.flags.get(index))
            .map(|flag| (flag.tags(), flag.description()))
    }

    pub fn has_key_values(&self) -> bool {
        !self.key_values.is_empty()
    }

    pub fn has_flags(&self) -> bool {
        !self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registers_and_finds_keys() {
        let mut kv = KeyValue::<String>::new("kv", "").short('k');
        let mut flag = Flag::new("flag", "").short('f');
        let mut registry = Registry::default();

        registry.add_key_value(&mut kv).unwrap();
        registry.add_flag(&mut flag).unwrap();

        assert!(matches!(registry.long("kv"), Some(Entry::KeyValue(_))));
        assert!(matches!(registry.short('k'), Some(Entry::KeyValue(_))));
        assert!(matches!(registry.long("flag"), Some(Entry::Flag(_))));
        assert!(matches!(registry.short('f'), Some(Entry::Flag(_))));
        assert!(registry.long("nope").is_none());
        assert!(registry.short('x').is_none());
    }

    #[test]
    fn test_positionals_keep_registration_order() {
        let mut first = Positional::<String>::new("first", "1");
        let mut second = Positional::<u8>::new("second", "2");
        let mut registry = Registry::default();

        registry.add_positional(&mut first).unwrap();
        registry.add_positional(&mut second).unwrap();

        assert_eq!(registry.positional_name(0), Some("first"));
        assert_eq!(registry.positional_name(1), Some("second"));
        assert_eq!(registry.positional_name(2), None);
        assert_eq!(
            registry.positionals().collect::<Vec<_>>(),
            [("first", "1"), ("second", "2")]
        );
    }

    #[test]
    fn test_rejects_empty_key() {
        let mut flag = Flag::new("", "");
        let mut registry = Registry::default();

        assert_eq!(
            registry.add_flag(&mut flag),
            Err(RegistrationError::EmptyKey { config: 1 })
        );
    }

    #[test]
    fn test_rejects_empty_positional_name() {
        let mut pos = Positional::<String>::new("", "");
        let mut registry = Registry::default();

        assert_eq!(
            registry.add_positional(&mut pos),
            Err(RegistrationError::EmptyName { config: 1 })
        );
    }

    #[test]
    fn test_rejects_reserved_keys() {
        let mut help = Flag::new("help", "");
        let mut host = KeyValue::<String>::new("host", "").short('h');
        let mut registry = Registry::default();

        assert_eq!(
            registry.add_flag(&mut help),
            Err(RegistrationError::ReservedKey {
                config: 1,
                key: "help"
            })
        );
        assert_eq!(
            registry.add_key_value(&mut host),
            Err(RegistrationError::ReservedShortKey {
                config: 2,
                short: 'h'
            })
        );
    }

    #[test]
    fn test_rejects_equals_in_key() {
        let mut kv = KeyValue::<String>::new("a=b", "");
        let mut registry = Registry::default();

        assert_eq!(
            registry.add_key_value(&mut kv),
            Err(RegistrationError::KeyContainsEquals {
                config: 1,
                key: "a=b"
            })
        );
    }

    #[test]
    fn test_rejects_dash_short_key() {
        let mut flag = Flag::new("dash", "").short('-');
        let mut registry = Registry::default();

        assert_eq!(
            registry.add_flag(&mut flag),
            Err(RegistrationError::InvalidShortKey {
                config: 1,
                short: '-'
            })
        );
    }

    #[test]
    fn test_rejects_duplicates_across_namespaces() {
        let mut pos = Positional::<String>::new("pos", "");
        let mut kv = KeyValue::<String>::new("name", "").short('n');
        let mut same_long = Flag::new("name", "");
        let mut same_short = Flag::new("number", "").short('n');
        let mut registry = Registry::default();

        registry.add_positional(&mut pos).unwrap();
        registry.add_key_value(&mut kv).unwrap();

        assert_eq!(
            registry.add_flag(&mut same_long),
            Err(RegistrationError::DuplicateKey {
                config: 3,
                key: "name"
            })
        );
        assert_eq!(
            registry.add_flag(&mut same_short),
            Err(RegistrationError::DuplicateShortKey {
                config: 4,
                short: 'n'
            })
        );
    }

    #[test]
    fn test_views_are_sorted_by_long_key() {
        let mut zeta = KeyValue::<u8>::new("zeta", "z").short('z');
        let mut alpha = KeyValue::<u8>::new("alpha", "a");
        let mut registry = Registry::default();

        registry.add_key_value(&mut zeta).unwrap();
        registry.add_key_value(&mut alpha).unwrap();

        let longs: Vec<_> = registry.key_values().map(|(tags, _)| tags.long()).collect();
        assert_eq!(longs, ["alpha", "zeta"]);
        assert!(registry.has_key_values());
        assert!(!registry.has_flags());
    }
}
