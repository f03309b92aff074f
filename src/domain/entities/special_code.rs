//! Reserved codes that share the store namespace but not its traffic rules.

use std::fmt;

/// The closed set of reserved codes.
///
/// `Root` and `Fallback` are real files that can only be written by an
/// operator. `List` is a command, not a file. `DefaultNotifyDir` names the
/// sub-directory probed for notification opt-ins when none is configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialCode {
    Root,
    List,
    Fallback,
    DefaultNotifyDir,
}

impl SpecialCode {
    pub const ALL: [SpecialCode; 4] = [
        SpecialCode::Root,
        SpecialCode::List,
        SpecialCode::Fallback,
        SpecialCode::DefaultNotifyDir,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SpecialCode::Root => ".root",
            SpecialCode::List => ".list",
            SpecialCode::Fallback => ".fallback",
            SpecialCode::DefaultNotifyDir => ".notify",
        }
    }

    /// Returns the special code spelled by `code`, if any.
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|sc| sc.as_str() == code)
    }

    pub fn is_special(code: &str) -> bool {
        Self::parse(code).is_some()
    }
}

impl fmt::Display for SpecialCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
