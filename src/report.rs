use crate::harness::{CaseError, CaseResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Passed,
    Failed(String),
    Skipped(String),
    /// The request never produced a response (timeout, refused connection).
    Errored(String),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "PASSED",
            Outcome::Failed(_) => "FAILED",
            Outcome::Skipped(_) => "SKIPPED",
            Outcome::Errored(_) => "ERRORED",
        }
    }

    pub fn detail(&self) -> Option<&str> {
        match self {
            Outcome::Passed => None,
            Outcome::Failed(detail) | Outcome::Skipped(detail) | Outcome::Errored(detail) => {
                Some(detail)
            }
        }
    }
}

impl From<CaseResult> for Outcome {
    fn from(result: CaseResult) -> Self {
        match result {
            Ok(()) => Outcome::Passed,
            Err(CaseError::Failed(failure)) => Outcome::Failed(failure.to_string()),
            Err(CaseError::Skipped(reason)) => Outcome::Skipped(reason),
            Err(CaseError::Transport(e)) => Outcome::Errored(flatten_chain(&e)),
        }
    }
}

// `error: cause: root cause` on a single line.
fn flatten_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut current = e.source();
    while let Some(cause) = current {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        current = cause.source();
    }
    message
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub name: &'static str,
    pub outcome: Outcome,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteReport {
    pub suite: &'static str,
    pub cases: Vec<CaseReport>,
}

/// Name under which a failed suite precondition is recorded.
pub const SETUP_CASE: &str = "setup";

impl SuiteReport {
    pub fn new(suite: &'static str) -> Self {
        Self {
            suite,
            cases: Vec::new(),
        }
    }

    pub fn record(&mut self, name: &'static str, result: CaseResult) {
        let outcome = Outcome::from(result);
        match &outcome {
            Outcome::Passed => tracing::info!(suite = self.suite, case = name, "Passed"),
            Outcome::Skipped(reason) => {
                tracing::info!(suite = self.suite, case = name, %reason, "Skipped")
            }
            Outcome::Failed(reason) => {
                tracing::warn!(suite = self.suite, case = name, %reason, "Failed")
            }
            Outcome::Errored(reason) => {
                tracing::error!(suite = self.suite, case = name, %reason, "Errored")
            }
        }
        self.cases.push(CaseReport { name, outcome });
    }

    pub fn outcome_of(&self, name: &str) -> Option<&Outcome> {
        self.cases
            .iter()
            .find(|case| case.name == name)
            .map(|case| &case.outcome)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub errored: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub suites: Vec<SuiteReport>,
}

impl RunReport {
    pub fn suite(&self, name: &str) -> Option<&SuiteReport> {
        self.suites.iter().find(|suite| suite.suite == name)
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for case in self.suites.iter().flat_map(|suite| &suite.cases) {
            match case.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed(_) => summary.failed += 1,
                Outcome::Skipped(_) => summary.skipped += 1,
                Outcome::Errored(_) => summary.errored += 1,
            }
        }
        summary
    }

    /// Skips do not count against a run.
    pub fn is_success(&self) -> bool {
        let summary = self.summary();
        summary.failed == 0 && summary.errored == 0
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for suite in &self.suites {
            writeln!(f, "{}", suite.suite)?;
            for case in &suite.cases {
                match case.outcome.detail() {
                    Some(detail) => writeln!(
                        f,
                        "  {:<8} {} ({})",
                        case.outcome.label(),
                        case.name,
                        detail.lines().next().unwrap_or_default()
                    )?,
                    None => writeln!(f, "  {:<8} {}", case.outcome.label(), case.name)?,
                }
            }
        }
        let summary = self.summary();
        write!(
            f,
            "{} passed, {} failed, {} skipped, {} errored",
            summary.passed, summary.failed, summary.skipped, summary.errored
        )
    }
}
