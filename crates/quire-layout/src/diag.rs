//! Errors and warnings.
//!
//! Only configuration can fail. Layout itself always produces a result and
//! reports what it had to paper over as a warning [`LayoutDiagnostic`].

use std::fmt::{self, Display, Formatter};

use ecow::EcoVec;

/// Return early with an error message, optionally followed by hints.
///
/// ```ignore
/// bail!("unknown leading type `{}`", kind);
/// bail!("unknown leading type `{}`", kind; hint: "use `fixed`");
/// ```
#[macro_export]
#[doc(hidden)]
macro_rules! __bail {
    ($($tts:tt)*) => {
        return Err($crate::diag::error!($($tts)*).into())
    };
}

/// Format an error message. With `; hint:` clauses, this builds a
/// [`HintedString`] instead of a plain [`EcoString`].
#[macro_export]
#[doc(hidden)]
macro_rules! __error {
    ($fmt:literal $(, $arg:expr)* $(,)?) => {
        $crate::diag::EcoString::from($crate::diag::eco_format!($fmt $(, $arg)*))
    };

    (
        $fmt:literal $(, $arg:expr)*
        $(; hint: $hint:literal $(, $hint_arg:expr)*)+
        $(,)?
    ) => {
        $crate::diag::HintedString::new($crate::diag::eco_format!($fmt $(, $arg)*))
            $(.with_hint($crate::diag::eco_format!($hint $(, $hint_arg)*)))+
    };
}

/// Build a warning [`LayoutDiagnostic`], with optional `; hint:` clauses.
#[macro_export]
#[doc(hidden)]
macro_rules! __warning {
    (
        $fmt:literal $(, $arg:expr)*
        $(; hint: $hint:literal $(, $hint_arg:expr)*)*
        $(,)?
    ) => {
        $crate::diag::LayoutDiagnostic::warning($crate::diag::eco_format!($fmt $(, $arg)*))
            $(.with_hint($crate::diag::eco_format!($hint $(, $hint_arg)*)))*
    };
}

#[rustfmt::skip]
#[doc(inline)]
pub use {
    crate::__bail as bail,
    crate::__error as error,
    crate::__warning as warning,
    ecow::{eco_format, EcoString},
};

/// A fallible operation with a plain message.
pub type StrResult<T> = Result<T, EcoString>;

/// A fallible operation whose message may come with hints.
pub type HintedStrResult<T> = Result<T, HintedString>;

/// An error message together with suggestions for fixing it.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct HintedString {
    message: EcoString,
    hints: EcoVec<EcoString>,
}

impl HintedString {
    pub fn new(message: impl Into<EcoString>) -> Self {
        Self { message: message.into(), hints: EcoVec::new() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn hints(&self) -> &[EcoString] {
        &self.hints
    }

    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

impl From<EcoString> for HintedString {
    fn from(message: EcoString) -> Self {
        Self::new(message)
    }
}

impl From<&str> for HintedString {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl Display for HintedString {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&self.message)?;
        self.hints.iter().try_for_each(|hint| write!(f, " (hint: {hint})"))
    }
}

/// Attach a hint to the error of a result.
pub trait Hint<T> {
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T>;
}

impl<T, E: Into<HintedString>> Hint<T> for Result<T, E> {
    fn hint(self, hint: impl Into<EcoString>) -> HintedStrResult<T> {
        self.map_err(|err| err.into().with_hint(hint))
    }
}

/// Something the engine reports without failing.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct LayoutDiagnostic {
    pub severity: Severity,
    pub message: EcoString,
    pub hints: EcoVec<EcoString>,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl LayoutDiagnostic {
    pub fn warning(message: impl Into<EcoString>) -> Self {
        Self { severity: Severity::Warning, message: message.into(), hints: EcoVec::new() }
    }

    pub fn with_hint(mut self, hint: impl Into<EcoString>) -> Self {
        self.hints.push(hint.into());
        self
    }
}

/// A configuration error, reported to whoever collects diagnostics.
impl From<HintedString> for LayoutDiagnostic {
    fn from(error: HintedString) -> Self {
        Self { severity: Severity::Error, message: error.message, hints: error.hints }
    }
}

impl Display for LayoutDiagnostic {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let label = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{label}: {}", self.message)?;
        self.hints.iter().try_for_each(|hint| write!(f, " (hint: {hint})"))
    }
}
