/// What to do with a value attached to a long flag, as in `--verbose=yes`.
///
/// Short flags never accept an attached value (`-vyes` is always
/// [`ExtraValue`][crate::Status::ExtraValue]); long flags historically
/// accepted and discarded one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LongFlagValue {
    /// Mark the flag as found and discard the value
    #[default]
    Ignore,

    /// Fail with [`ExtraValue`][crate::Status::ExtraValue], like a short flag
    Reject,
}

/// Parser configuration. Set these through the
/// [`Parser`][crate::Parser] builder methods.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Compute outcomes without rendering any usage text
    pub silent: bool,

    pub long_flag_value: LongFlagValue,

    /// Column at which usage descriptions are wrapped
    pub wrap_width: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            silent: false,
            long_flag_value: LongFlagValue::Ignore,
            wrap_width: 80,
        }
    }
}
