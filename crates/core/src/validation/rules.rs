//! Constraint chains and the form-wide checker.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::{ValidationError, Violation};

type Message = Cow<'static, str>;

enum TextCheck {
    MinChars(usize, Message),
    MaxChars(usize, Message),
    Pattern(&'static LazyLock<Regex>, Message),
    Predicate(fn(&str) -> bool, Message),
}

impl TextCheck {
    fn evaluate(&self, value: &str) -> Result<(), &Message> {
        let ok = match self {
            Self::MinChars(min, _) => value.chars().count() >= *min,
            Self::MaxChars(max, _) => value.chars().count() <= *max,
            Self::Pattern(regex, _) => regex.is_match(value),
            Self::Predicate(predicate, _) => predicate(value),
        };
        if ok { Ok(()) } else { Err(self.message()) }
    }

    const fn message(&self) -> &Message {
        match self {
            Self::MinChars(_, m) | Self::MaxChars(_, m) | Self::Pattern(_, m) | Self::Predicate(_, m) => m,
        }
    }
}

/// Ordered constraints for one text field.
///
/// Checks run in insertion order and stop at the first failure, so a field
/// reports at most one message per evaluation.
///
/// ```
/// use motoshop_core::validation::TextRule;
///
/// let rule = TextRule::new()
///     .min_chars(1, "Título obligatorio")
///     .max_chars(50, "Máximo 50 caracteres");
///
/// assert!(rule.check("Revisión").is_ok());
/// assert_eq!(rule.check("").unwrap_err(), "Título obligatorio");
/// ```
#[derive(Default)]
pub struct TextRule {
    checks: Vec<TextCheck>,
}

impl TextRule {
    #[must_use]
    pub const fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Require at least `min` characters.
    #[must_use]
    pub fn min_chars(mut self, min: usize, message: impl Into<Message>) -> Self {
        self.checks.push(TextCheck::MinChars(min, message.into()));
        self
    }

    /// Allow at most `max` characters.
    #[must_use]
    pub fn max_chars(mut self, max: usize, message: impl Into<Message>) -> Self {
        self.checks.push(TextCheck::MaxChars(max, message.into()));
        self
    }

    /// Allow at most `max` characters with the standard message.
    #[must_use]
    pub fn max_chars_default(self, max: usize) -> Self {
        self.max_chars(max, format!("Máximo {max} caracteres"))
    }

    /// Require the whole value to match `regex`.
    #[must_use]
    pub fn pattern(mut self, regex: &'static LazyLock<Regex>, message: impl Into<Message>) -> Self {
        self.checks.push(TextCheck::Pattern(regex, message.into()));
        self
    }

    /// Require `predicate` to hold.
    #[must_use]
    pub fn refine(mut self, predicate: fn(&str) -> bool, message: impl Into<Message>) -> Self {
        self.checks.push(TextCheck::Predicate(predicate, message.into()));
        self
    }

    /// Evaluate the chain, returning the first failing message.
    ///
    /// # Errors
    ///
    /// Returns the message of the first constraint `value` breaks.
    pub fn check(&self, value: &str) -> Result<(), String> {
        self.checks
            .iter()
            .try_for_each(|check| check.evaluate(value))
            .map_err(|message| message.to_string())
    }
}

/// Runs field rules over a whole candidate and collects violations.
///
/// Fields are evaluated independently: one invalid field never hides the
/// message of another.
pub struct Checker<F> {
    violations: Vec<Violation<F>>,
}

impl<F> Default for Checker<F> {
    fn default() -> Self {
        Self {
            violations: Vec::new(),
        }
    }
}

impl<F: Copy> Checker<F> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `rule` on `value`; returns `true` when it passed.
    pub fn text(&mut self, field: F, rule: &TextRule, value: &str) -> bool {
        self.record(field, rule.check(value)).is_some()
    }

    /// Run `rule` on `value` and hand back an owned copy when it passed.
    pub fn text_value(&mut self, field: F, rule: &TextRule, value: &str) -> Option<String> {
        self.text(field, rule, value).then(|| value.to_owned())
    }

    /// Record the outcome of a parser or custom check.
    pub fn record<T, E: Into<String>>(&mut self, field: F, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(message) => {
                self.fail(field, message);
                None
            }
        }
    }

    /// Cross-field refinement: attach `message` to `field` unless `holds`.
    pub fn refine(&mut self, field: F, holds: bool, message: impl Into<String>) {
        if !holds {
            self.fail(field, message);
        }
    }

    /// Record a violation.
    pub fn fail(&mut self, field: F, message: impl Into<String>) {
        self.violations.push(Violation {
            field,
            message: message.into(),
        });
    }

    /// Whether nothing failed so far.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Finish the pass.
    ///
    /// `output` is the normalized value assembled from the per-field results;
    /// it is only `Some` when every parser succeeded.
    ///
    /// # Errors
    ///
    /// Returns every collected violation if any field failed.
    pub fn finish<T>(self, output: Option<T>) -> Result<T, ValidationError<F>> {
        match output {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(ValidationError::new(self.violations)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

    #[test]
    fn test_rule_short_circuits_in_order() {
        let rule = TextRule::new()
            .min_chars(2, "corto")
            .pattern(&DIGITS, "solo dígitos");
        assert_eq!(rule.check("a").unwrap_err(), "corto");
        assert_eq!(rule.check("ab").unwrap_err(), "solo dígitos");
        assert!(rule.check("12").is_ok());
    }

    #[test]
    fn test_max_chars_default_message() {
        let rule = TextRule::new().max_chars_default(3);
        assert_eq!(rule.check("abcd").unwrap_err(), "Máximo 3 caracteres");
        assert!(rule.check("ñññ").is_ok());
    }

    #[test]
    fn test_checker_collects_every_field() {
        let rule = TextRule::new().min_chars(1, "requerido");
        let mut checker = Checker::new();
        checker.text("a", &rule, "");
        checker.text("b", &rule, "ok");
        checker.text("c", &rule, "");
        let error = checker.finish(Some(())).unwrap_err();
        let fields: Vec<_> = error.violations().iter().map(|v| v.field).collect();
        assert_eq!(fields, vec!["a", "c"]);
    }

    #[test]
    fn test_checker_finish_ok() {
        let mut checker: Checker<&str> = Checker::new();
        let n = checker.record("n", "42".parse::<i32>().map_err(|e| e.to_string()));
        assert!(checker.is_clean());
        assert_eq!(checker.finish(n).unwrap(), 42);
    }

    #[test]
    fn test_refine() {
        let mut checker = Checker::new();
        checker.refine("confirm", false, "no coinciden");
        checker.refine("other", true, "never");
        let error = checker.finish(Some(())).unwrap_err();
        assert_eq!(error.violations().len(), 1);
        assert_eq!(error.violations()[0].field, "confirm");
    }
}
