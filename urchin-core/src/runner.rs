//! The trial loop and shrink search shared by sync and async properties.

use crate::data::{Config, Seed, Size};
use crate::error::{Error, Result};
use crate::gen::Gen;
use crate::journal::{Journal, JournalEntry};
use crate::property::Outcome;
use crate::recheck::RecheckToken;
use crate::report::{Failure, Report, Status};
use crate::tree::Tree;
use futures::future::LocalBoxFuture;
use futures::FutureExt;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;
use tracing::{debug, trace};

/// A property body: given a value and a fresh journal, decide the outcome.
pub(crate) type Test<T> = Rc<dyn Fn(T, Journal) -> LocalBoxFuture<'static, Outcome>>;

pub(crate) type Classifier<T> = (String, Box<dyn Fn(&T) -> bool>);

struct Evaluation {
    outcome: Outcome,
    journal: Vec<JournalEntry>,
}

impl Evaluation {
    fn failed(&self) -> bool {
        self.outcome.is_failure()
    }
}

/// Everything a property needs to run, independent of how it is driven.
pub(crate) struct Runner<T> {
    pub gen: Gen<T>,
    pub test: Test<T>,
    pub classifiers: Vec<Classifier<T>>,
    pub name: Option<String>,
    pub variable_name: Option<String>,
}

impl<T: Clone + 'static> Runner<T> {
    pub(crate) fn new(gen: Gen<T>, test: Test<T>) -> Self {
        Runner {
            gen,
            test,
            classifiers: Vec::new(),
            name: None,
            variable_name: None,
        }
    }

    fn report(&self, status: Status<T>) -> Report<T> {
        let mut report = Report::new(status);
        report.property_name = self.name.clone();
        report.variable_name = self.variable_name.clone();
        report
    }

    /// Run trials until the test limit, a failure, too many discards or cancellation.
    pub(crate) async fn run(&self, config: &Config) -> Report<T> {
        let mut seed = config.seed.unwrap_or_else(Seed::random);
        let mut report = self.report(Status::Passed);
        let discard_limit = config.discard_limit();

        while report.tests < config.test_limit {
            if config.is_cancelled() {
                debug!(tests = report.tests, "property run cancelled");
                report.status = Status::Cancelled;
                return report;
            }

            let size = config.size_for(report.tests + report.discards);
            let (trial_seed, next_seed) = seed.split();
            seed = next_seed;
            let token = RecheckToken::new(size, trial_seed);

            let tree = match generate(&self.gen, size, trial_seed) {
                Ok(Some(tree)) => tree,
                Ok(None) => {
                    report.discards += 1;
                    if report.discards >= discard_limit {
                        debug!(tests = report.tests, discards = report.discards, "giving up after too many discards");
                        report.status = Status::GaveUp;
                        return report;
                    }
                    continue;
                }
                Err(message) => {
                    debug!(tests = report.tests, %token, %message, "generator panicked");
                    report.status = Status::GeneratorError {
                        message,
                        recheck: token,
                    };
                    return report;
                }
            };

            let evaluation = self.evaluate(tree.value.clone()).await;
            match evaluation.outcome {
                Outcome::Discard => {
                    report.discards += 1;
                    if report.discards >= discard_limit {
                        debug!(tests = report.tests, discards = report.discards, "giving up after too many discards");
                        report.status = Status::GaveUp;
                        return report;
                    }
                }
                Outcome::Success => {
                    report.tests += 1;
                    self.classify(&tree.value, &mut report.labels);
                }
                Outcome::Failure | Outcome::Error(_) => {
                    report.tests += 1;
                    debug!(tests = report.tests, %size, "property failed, shrinking");
                    let failure = self.shrink(tree, evaluation, token, config).await;
                    report.status = Status::Failed(failure);
                    return report;
                }
            }
        }

        report
    }

    /// Greedy depth-first descent: move to the first failing child until none fails.
    async fn shrink(
        &self,
        tree: Tree<T>,
        evaluation: Evaluation,
        mut token: RecheckToken,
        config: &Config,
    ) -> Failure<T> {
        let original = tree.value.clone();
        let mut progression = vec![original.clone()];
        let mut journal = evaluation.journal;
        let mut current = tree;
        let mut truncated = false;

        'descend: loop {
            if progression.len() > config.shrink_limit {
                truncated = true;
                break;
            }
            if config.is_cancelled() {
                debug!(shrinks = progression.len() - 1, "shrinking cancelled");
                truncated = true;
                break;
            }

            let mut children = match panic::catch_unwind(AssertUnwindSafe(|| current.children())) {
                Ok(children) => children,
                Err(payload) => {
                    debug!(
                        message = %crate::journal::panic_message(&*payload),
                        "shrink candidates panicked, keeping current value"
                    );
                    break 'descend;
                }
            };
            let mut index = 0;
            loop {
                let child = match panic::catch_unwind(AssertUnwindSafe(|| children.next())) {
                    Ok(Some(child)) => child,
                    Ok(None) => break 'descend,
                    Err(payload) => {
                        debug!(
                            message = %crate::journal::panic_message(&*payload),
                            "shrink candidates panicked, keeping current value"
                        );
                        break 'descend;
                    }
                };

                let evaluation = self.evaluate(child.value.clone()).await;
                if evaluation.failed() {
                    trace!(step = progression.len(), index, "accepted shrink");
                    token.path.push(index);
                    progression.push(child.value.clone());
                    journal = evaluation.journal;
                    current = child;
                    continue 'descend;
                }
                index += 1;
            }
        }

        let shrinks = progression.len() - 1;
        debug!(shrinks, truncated, "shrinking finished");
        Failure {
            original,
            shrunk: current.value,
            shrinks,
            progression,
            token,
            journal,
            truncated,
        }
    }

    /// Regenerate the value a token describes and evaluate it once.
    pub(crate) async fn recheck(&self, token: &RecheckToken) -> Result<Report<T>> {
        let mut report = self.report(Status::Passed);
        let tree = match generate(&self.gen, token.size, token.seed) {
            Ok(Some(tree)) => tree,
            Ok(None) => {
                report.discards = 1;
                report.status = Status::GaveUp;
                return Ok(report);
            }
            Err(message) => {
                report.status = Status::GeneratorError {
                    message,
                    recheck: token.clone(),
                };
                return Ok(report);
            }
        };

        let original = tree.value.clone();
        let mut progression = vec![original.clone()];
        let mut current = tree;
        for &index in &token.path {
            let child = panic::catch_unwind(AssertUnwindSafe(|| current.children().nth(index)))
                .ok()
                .flatten()
                .ok_or_else(|| Error::InvalidRecheckToken {
                    token: token.to_string(),
                    reason: format!("shrink step {index} does not exist for this property"),
                })?;
            progression.push(child.value.clone());
            current = child;
        }

        let evaluation = self.evaluate(current.value.clone()).await;
        match evaluation.outcome {
            Outcome::Discard => {
                report.discards = 1;
                report.status = Status::GaveUp;
            }
            Outcome::Success => {
                report.tests = 1;
                self.classify(&current.value, &mut report.labels);
            }
            Outcome::Failure | Outcome::Error(_) => {
                report.tests = 1;
                report.status = Status::Failed(Failure {
                    original,
                    shrunk: current.value,
                    shrinks: 0,
                    progression,
                    token: token.clone(),
                    journal: evaluation.journal,
                    truncated: false,
                });
            }
        }
        Ok(report)
    }

    async fn evaluate(&self, value: T) -> Evaluation {
        let journal = Journal::new();
        let test = Rc::clone(&self.test);
        let handle = journal.clone();
        let call = async move { test(value, handle).await };
        let outcome = match AssertUnwindSafe(call).catch_unwind().await {
            Ok(Outcome::Error(message)) => {
                journal.footnote(&message);
                Outcome::Error(message)
            }
            Ok(outcome) => outcome,
            Err(payload) => {
                journal.record_panic(&*payload);
                Outcome::Failure
            }
        };
        Evaluation {
            outcome,
            journal: journal.entries(),
        }
    }

    fn classify(&self, value: &T, labels: &mut BTreeMap<String, usize>) {
        for (label, predicate) in &self.classifiers {
            if predicate(value) {
                *labels.entry(label.clone()).or_insert(0) += 1;
            }
        }
    }
}

/// Generate a tree, turning a generator panic into its message.
fn generate<T: 'static>(
    gen: &Gen<T>,
    size: Size,
    seed: Seed,
) -> std::result::Result<Option<Tree<T>>, String> {
    panic::catch_unwind(AssertUnwindSafe(|| gen.generate(size, seed)))
        .map_err(|payload| crate::journal::panic_message(&*payload))
}
