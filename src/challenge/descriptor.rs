//! What a challenge asks, and how an answer is judged.

use serde::{Deserialize, Serialize};

/// A question shown when a team lands on a region.
///
/// Multiple-choice when `choices` is non-empty; otherwise freeform, judged
/// by the host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeDescriptor {
    /// Question text.
    pub prompt: String,

    /// Options for multiple choice. Empty for freeform.
    #[serde(default)]
    pub choices: Vec<String>,

    /// Index of the correct option.
    #[serde(default)]
    pub answer_index: Option<usize>,

    /// Hint shown alongside the question.
    #[serde(default)]
    pub explanation: Option<String>,
}

impl ChallengeDescriptor {
    /// A freeform question.
    #[must_use]
    pub fn freeform(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            choices: Vec::new(),
            answer_index: None,
            explanation: None,
        }
    }

    /// A multiple-choice question. An out-of-range `answer_index` makes the
    /// question unanswerable rather than panicking.
    #[must_use]
    pub fn multiple_choice<I, S>(prompt: impl Into<String>, choices: I, answer_index: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let choices: Vec<String> = choices.into_iter().map(Into::into).collect();
        let answer_index = (answer_index < choices.len()).then_some(answer_index);
        Self {
            prompt: prompt.into(),
            choices,
            answer_index,
            explanation: None,
        }
    }

    /// Attach a hint.
    #[must_use]
    pub fn with_explanation(mut self, explanation: impl Into<String>) -> Self {
        self.explanation = Some(explanation.into());
        self
    }

    /// Check if this is a multiple-choice question.
    #[must_use]
    pub fn is_multiple_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    /// The correct option's text, if any.
    #[must_use]
    pub fn correct_choice(&self) -> Option<&str> {
        self.answer_index
            .and_then(|i| self.choices.get(i))
            .map(String::as_str)
    }

    /// Judge an answer.
    ///
    /// A skip is always wrong. A choice is right only if it is the correct
    /// index. A freeform verdict is taken as given, but only for freeform
    /// questions.
    #[must_use]
    pub fn evaluate(&self, answer: &Answer) -> bool {
        match answer {
            Answer::Skip => false,
            Answer::Choice(i) => self.answer_index == Some(*i),
            Answer::Freeform(correct) => !self.is_multiple_choice() && *correct,
        }
    }
}

/// A team's response to a challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Answer {
    /// Picked option `i` of a multiple-choice question.
    Choice(usize),
    /// Host's verdict on a freeform answer.
    Freeform(bool),
    /// Gave up.
    Skip,
}
