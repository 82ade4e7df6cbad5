//! One-shot approval before destructive actions.
//!
//! The gate asks once, through an injectable [`Prompt`], and only the exact
//! answer `y` approves. Anything else, including a prompt that cannot be
//! answered, declines without raising an error.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;

use tracing::debug;

use crate::core::constants;
use crate::core::plan::DeletionPlan;

/// Source of a single-line answer to a question.
pub trait Prompt {
    /// Ask `message` and return the raw answer.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if no answer can be obtained (closed stdin,
    /// no terminal, interrupted prompt).
    fn ask(&self, message: &str) -> io::Result<String>;
}

/// Prompt answering from a fixed script, for tests and non-interactive use.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far.
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn ask(&self, message: &str) -> io::Result<String> {
        self.asked.borrow_mut().push(message.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no answer scripted"))
    }
}

/// Result of passing a plan through the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Approval {
    /// Approval was given up front (`--auto-approve`); nobody was asked.
    AutoApproved,
    /// The operator answered `y`.
    Approved,
    /// The operator answered something else.
    Declined(String),
    /// No answer could be obtained.
    Failed(String),
}

impl Approval {
    pub fn is_approved(&self) -> bool {
        matches!(self, Self::AutoApproved | Self::Approved)
    }
}

/// Asks for approval of a [`DeletionPlan`].
#[derive(Debug, Clone, Copy)]
pub struct ConfirmationGate {
    auto_approve: bool,
}

impl ConfirmationGate {
    pub fn new(auto_approve: bool) -> Self {
        Self { auto_approve }
    }

    /// Question shown for a plan of `count` deletions.
    pub fn message(count: usize) -> String {
        format!(
            "Do you want to delete the {} secret{} listed above? Only '{}' will be accepted to approve.",
            count,
            if count == 1 { "" } else { "s" },
            constants::AFFIRMATIVE
        )
    }

    /// Obtain approval for `plan`.
    pub fn approve(&self, prompt: &dyn Prompt, plan: &DeletionPlan) -> Approval {
        if self.auto_approve {
            debug!(count = plan.len(), "deletion auto-approved");
            return Approval::AutoApproved;
        }

        let approval = match prompt.ask(&Self::message(plan.len())) {
            Ok(answer) => {
                let answer = answer.trim_end_matches(['\r', '\n']).to_string();
                if answer == constants::AFFIRMATIVE {
                    Approval::Approved
                } else {
                    Approval::Declined(answer)
                }
            }
            Err(e) => Approval::Failed(e.to_string()),
        };
        debug!(?approval, "confirmation answered");
        approval
    }
}
