//! Property definitions for property-based testing.

use crate::data::Config;
use crate::error::Result;
use crate::gen::Gen;
use crate::journal::Journal;
use crate::recheck::RecheckToken;
use crate::report::Report;
use crate::runner::{Runner, Test};
use futures::FutureExt;
use std::fmt;
use std::future::Future;
use std::rc::Rc;

/// The verdict of a single property evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    /// The value does not count as a test; another one is generated.
    Discard,
    /// A failure with a message, recorded as a footnote in the journal.
    Error(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure | Outcome::Error(_))
    }
}

impl From<bool> for Outcome {
    fn from(passed: bool) -> Self {
        if passed {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }
}

impl From<()> for Outcome {
    fn from(_: ()) -> Self {
        Outcome::Success
    }
}

impl<E: fmt::Display> From<std::result::Result<(), E>> for Outcome {
    fn from(result: std::result::Result<(), E>) -> Self {
        match result {
            Ok(()) => Outcome::Success,
            Err(error) => Outcome::Error(error.to_string()),
        }
    }
}

/// A property that can be tested with generated inputs.
///
/// The body runs synchronously. Panics inside it are caught and count as
/// failures, so panicking inputs are shrunk like any other counterexample.
pub struct Property<T> {
    runner: Runner<T>,
}

impl<T> Property<T>
where
    T: Clone + fmt::Debug + 'static,
{
    /// Create a property from a generator and a body that may write to a journal.
    pub fn new<F, O>(generator: Gen<T>, body: F) -> Self
    where
        F: Fn(&T, &Journal) -> O + 'static,
        O: Into<Outcome>,
    {
        let body = Rc::new(body);
        let test: Test<T> = Rc::new(move |value: T, journal: Journal| {
            let body = Rc::clone(&body);
            async move {
                let outcome: Outcome = body(&value, &journal).into();
                outcome
            }
            .boxed_local()
        });
        Property {
            runner: Runner::new(generator, test),
        }
    }

    /// Create a property that checks a boolean condition.
    pub fn for_all<F>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Property::new(generator, move |value, _journal| condition(value))
    }

    /// Create a property that checks a boolean condition with a named variable.
    pub fn for_all_named<F>(generator: Gen<T>, variable_name: &str, condition: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        let mut property = Property::for_all(generator, condition);
        property.runner.variable_name = Some(variable_name.to_string());
        property
    }

    /// Name the property in its report.
    pub fn with_name(mut self, name: &str) -> Self {
        self.runner.name = Some(name.to_string());
        self
    }

    /// Count how many passing tests match `predicate`.
    pub fn classify<F>(mut self, name: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.runner
            .classifiers
            .push((name.to_string(), Box::new(predicate)));
        self
    }

    /// Run the property and describe how it went.
    pub fn report(&self, config: &Config) -> Report<T> {
        futures::executor::block_on(self.runner.run(config))
    }

    /// Run the property, turning anything but a pass into an error.
    pub fn check(&self, config: &Config) -> Result<Report<T>> {
        self.report(config).into_result()
    }

    /// Replay the counterexample a recheck token describes.
    ///
    /// The value is regenerated from the token's seed and size and its shrink
    /// path is followed, so no search happens and no shrink steps are taken.
    pub fn recheck(&self, token: &str) -> Result<Report<T>> {
        let token: RecheckToken = token.parse()?;
        futures::executor::block_on(self.runner.recheck(&token))
    }
}

/// A property whose body is asynchronous.
///
/// Generation stays synchronous; only the body is awaited. Panics inside the
/// body are caught and count as failures.
pub struct AsyncProperty<T> {
    runner: Runner<T>,
}

impl<T> AsyncProperty<T>
where
    T: Clone + fmt::Debug + 'static,
{
    pub fn new<F, Fut, O>(generator: Gen<T>, body: F) -> Self
    where
        F: Fn(T, Journal) -> Fut + 'static,
        Fut: Future<Output = O> + 'static,
        O: Into<Outcome>,
    {
        let test: Test<T> = Rc::new(move |value: T, journal: Journal| {
            let pending = body(value, journal);
            async move {
                let outcome: Outcome = pending.await.into();
                outcome
            }
            .boxed_local()
        });
        AsyncProperty {
            runner: Runner::new(generator, test),
        }
    }

    pub fn for_all<F, Fut>(generator: Gen<T>, condition: F) -> Self
    where
        F: Fn(T) -> Fut + 'static,
        Fut: Future<Output = bool> + 'static,
    {
        AsyncProperty::new(generator, move |value, _journal| condition(value))
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.runner.name = Some(name.to_string());
        self
    }

    pub fn with_variable_name(mut self, variable_name: &str) -> Self {
        self.runner.variable_name = Some(variable_name.to_string());
        self
    }

    pub fn classify<F>(mut self, name: &str, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        self.runner
            .classifiers
            .push((name.to_string(), Box::new(predicate)));
        self
    }

    pub async fn report(&self, config: &Config) -> Report<T> {
        self.runner.run(config).await
    }

    pub async fn check(&self, config: &Config) -> Result<Report<T>> {
        self.report(config).await.into_result()
    }

    pub async fn recheck(&self, token: &str) -> Result<Report<T>> {
        let token: RecheckToken = token.parse()?;
        self.runner.recheck(&token).await
    }
}

/// Create a property for a generator and a body.
pub fn property<T, F, O>(generator: Gen<T>, body: F) -> Property<T>
where
    T: Clone + fmt::Debug + 'static,
    F: Fn(&T, &Journal) -> O + 'static,
    O: Into<Outcome>,
{
    Property::new(generator, body)
}

/// Create a property that checks a boolean condition.
pub fn for_all<T, F>(generator: Gen<T>, condition: F) -> Property<T>
where
    T: Clone + fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all(generator, condition)
}

/// Create a property that checks a boolean condition with a named variable.
pub fn for_all_named<T, F>(generator: Gen<T>, variable_name: &str, condition: F) -> Property<T>
where
    T: Clone + fmt::Debug + 'static,
    F: Fn(&T) -> bool + 'static,
{
    Property::for_all_named(generator, variable_name, condition)
}
