//! The result of running a property.

use crate::error::{Error, Result};
use crate::journal::JournalEntry;
use crate::recheck::RecheckToken;
use std::collections::BTreeMap;
use std::fmt;

/// How a property run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum Status<T> {
    /// Every requested test passed.
    Passed,
    /// Too many tests were discarded before enough passed.
    GaveUp,
    /// The property failed; the counterexample has been shrunk.
    Failed(Failure<T>),
    /// A generator panicked while producing a value. Nothing was shrunk.
    GeneratorError { message: String, recheck: RecheckToken },
    /// The run stopped early because its cancel token fired.
    Cancelled,
}

/// A failing value before and after shrinking.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure<T> {
    /// The value that first failed.
    pub original: T,
    /// The smallest failing value found.
    pub shrunk: T,
    /// Number of shrink steps taken.
    pub shrinks: usize,
    /// Every accepted value, from `original` to `shrunk`.
    pub progression: Vec<T>,
    /// Reproduces `shrunk` without rerunning the search.
    pub token: RecheckToken,
    /// What the property recorded while evaluating `shrunk`.
    pub journal: Vec<JournalEntry>,
    /// The shrink limit stopped the search, so `shrunk` may not be locally minimal.
    pub truncated: bool,
}

/// Summary of a property run.
#[derive(Debug, Clone, PartialEq)]
pub struct Report<T> {
    pub tests: usize,
    pub discards: usize,
    pub status: Status<T>,
    /// How many passing tests each classification matched.
    pub labels: BTreeMap<String, usize>,
    pub property_name: Option<String>,
    pub variable_name: Option<String>,
}

impl<T> Report<T> {
    pub(crate) fn new(status: Status<T>) -> Self {
        Report {
            tests: 0,
            discards: 0,
            status,
            labels: BTreeMap::new(),
            property_name: None,
            variable_name: None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, Status::Passed)
    }

    /// The failure, if the property failed.
    pub fn failure(&self) -> Option<&Failure<T>> {
        match &self.status {
            Status::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    /// Number of shrink steps taken, zero unless the property failed.
    pub fn shrinks(&self) -> usize {
        self.failure().map_or(0, |failure| failure.shrinks)
    }

    /// The recheck token for a failure or generator error.
    pub fn recheck_token(&self) -> Option<&RecheckToken> {
        match &self.status {
            Status::Failed(failure) => Some(&failure.token),
            Status::GeneratorError { recheck, .. } => Some(recheck),
            _ => None,
        }
    }
}

impl<T: fmt::Debug> Report<T> {
    /// Turn every outcome other than [`Status::Passed`] into an [`Error`].
    pub fn into_result(self) -> Result<Report<T>> {
        match &self.status {
            Status::Passed => Ok(self),
            Status::GaveUp => Err(Error::TooManyDiscards {
                tests_run: self.tests,
                discards: self.discards,
            }),
            Status::Failed(failure) => Err(Error::PropertyFailed {
                counterexample: format!("{:?}", failure.shrunk),
                tests_run: self.tests,
                shrinks_performed: failure.shrinks,
                recheck: failure.token.to_string(),
            }),
            Status::GeneratorError { message, .. } => Err(Error::GeneratorFailed {
                reason: message.clone(),
            }),
            Status::Cancelled => Err(Error::Cancelled {
                tests_run: self.tests,
            }),
        }
    }
}

impl<T: fmt::Debug> fmt::Display for Report<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.property_name.as_deref().unwrap_or("property");
        match &self.status {
            Status::Passed => {
                write!(f, "  ✓ {} passed {} tests.", name, self.tests)?;
                if !self.labels.is_empty() && self.tests > 0 {
                    writeln!(f)?;
                    writeln!(f)?;
                    write!(f, "  Test data distribution:")?;
                    for (label, count) in &self.labels {
                        let percentage = (*count as f64 / self.tests as f64) * 100.0;
                        write!(f, "\n    {percentage:>3.0}% {label}")?;
                    }
                }
                Ok(())
            }
            Status::GaveUp => write!(
                f,
                "  ⚐ {} gave up after {} discards, passed {} tests.",
                name, self.discards, self.tests
            ),
            Status::Cancelled => write!(f, "  ⚐ {} cancelled after {} tests.", name, self.tests),
            Status::GeneratorError { message, recheck } => {
                writeln!(
                    f,
                    "  ✗ {} generator failed after {} tests: {}",
                    name, self.tests, message
                )?;
                write!(f, "    Reproduce with recheck \"{recheck}\"")
            }
            Status::Failed(failure) => {
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    name, self.tests, failure.shrinks
                )?;

                if failure.progression.len() > 1 {
                    writeln!(f)?;
                    writeln!(f, "    Shrinking progression:")?;
                    for (step, value) in failure.progression.iter().enumerate() {
                        match &self.variable_name {
                            Some(var) => writeln!(f, "      │ forAll {step} = {value:?} -- {var}")?,
                            None if step == 0 => writeln!(f, "      │ Original: {value:?}")?,
                            None => writeln!(f, "      │ Step {step}: {value:?}")?,
                        }
                    }
                    writeln!(f)?;
                }

                for entry in &failure.journal {
                    writeln!(f, "    {entry}")?;
                }
                writeln!(f, "    Minimal counterexample: {:?}", failure.shrunk)?;
                if failure.truncated {
                    writeln!(f, "    Shrink limit reached, the counterexample may not be minimal.")?;
                }
                write!(f, "    Reproduce with recheck \"{}\"", failure.token)
            }
        }
    }
}
