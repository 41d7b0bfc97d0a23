//! Raw questionnaire rows and Likert answer coercion.
//!
//! Rows arrive as a flat JSON object (`{"q1": 4, "q2": "5", ...}`). The
//! engine never rejects a row by default: anything that is not a usable
//! number coerces to 0 and counts as unanswered. [`RawPersonaAnswers::validate_strict`]
//! is the opt-in alternative that refuses such rows instead.

use crate::error::{Error, Result};
use crate::layer::PersonaLayer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::debug;

/// Lowest valid Likert answer.
pub const LIKERT_MIN: f64 = 1.0;

/// Highest valid Likert answer.
pub const LIKERT_MAX: f64 = 5.0;

/// Direction in which an answer indicates its construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    /// Higher answer means more of the construct
    Direct,
    /// Higher answer means less; complemented as `6 - answer`
    Inverse,
}

impl Polarity {
    /// Apply polarity correction to an answered value in `[1, 5]`.
    #[must_use]
    pub fn correct(self, answer: f64) -> f64 {
        match self {
            Self::Direct => answer,
            Self::Inverse => (LIKERT_MIN + LIKERT_MAX) - answer,
        }
    }

    /// Corrected contribution of an optional answer; unanswered contributes 0.
    #[must_use]
    pub fn contribution(self, answer: Option<f64>) -> f64 {
        answer.map_or(0.0, |a| self.correct(a))
    }
}

/// Storage key of a question (`q1` … `qN`).
#[must_use]
pub fn question_key(question: u16) -> String {
    format!("q{question}")
}

/// One submitted questionnaire row for a single persona layer.
///
/// Keys are kept exactly as submitted; sorted order makes the serialized
/// form canonical for fingerprinting.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawPersonaAnswers {
    answers: BTreeMap<String, Value>,
}

impl RawPersonaAnswers {
    /// Create an empty row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already-parsed row.
    #[must_use]
    pub fn from_map(answers: BTreeMap<String, Value>) -> Self {
        Self { answers }
    }

    /// Parse a row from a JSON object string.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Build a row from `(question, answer)` pairs.
    pub fn from_pairs<I, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u16, V)>,
        V: Into<Value>,
    {
        let mut row = Self::new();
        for (q, v) in pairs {
            row.insert(q, v);
        }
        row
    }

    /// A row answering questions `1..=count` with the same value.
    #[must_use]
    pub fn uniform(count: u16, answer: i64) -> Self {
        Self::from_pairs((1..=count).map(|q| (q, answer)))
    }

    /// Set the answer to one question.
    pub fn insert(&mut self, question: u16, value: impl Into<Value>) {
        self.answers.insert(question_key(question), value.into());
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with_answer(mut self, question: u16, value: impl Into<Value>) -> Self {
        self.insert(question, value);
        self
    }

    /// The raw value stored for a question, if any.
    #[must_use]
    pub fn raw(&self, question: u16) -> Option<&Value> {
        self.answers.get(&question_key(question))
    }

    /// Coerced answer in `[1, 5]`, or `None` when the question counts as unanswered.
    #[must_use]
    pub fn answer(&self, question: u16) -> Option<f64> {
        let raw = self.raw(question)?;
        let value = coerce(raw);
        if value <= 0.0 {
            if !raw.is_null() {
                debug!(question, value = %raw, "answer coerced to unanswered");
            }
            return None;
        }
        Some(value.max(LIKERT_MIN))
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.answers.len()
    }

    /// Whether the row holds no answers at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Underlying map.
    #[must_use]
    pub fn as_map(&self) -> &BTreeMap<String, Value> {
        &self.answers
    }

    /// Reject the row if any of the layer's questions is missing, non-numeric,
    /// fractional or outside 1–5.
    ///
    /// Not used by the default derivation path, which stays fail-soft.
    pub fn validate_strict(&self, layer: PersonaLayer) -> Result<()> {
        for question in 1..=layer.question_count() {
            let raw = self.raw(question);
            let ok = raw.and_then(strict_value).is_some();
            if !ok {
                return Err(Error::MalformedAnswer {
                    layer,
                    question,
                    value: raw.map_or_else(|| "<missing>".to_string(), Value::to_string),
                });
            }
        }
        Ok(())
    }
}

/// Coerce a raw JSON value to a number in `[0, 5]`; anything unusable becomes 0.
#[must_use]
pub fn coerce(raw: &Value) -> f64 {
    let n = match raw {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if n.is_finite() {
        n.clamp(0.0, LIKERT_MAX)
    } else {
        0.0
    }
}

fn strict_value(raw: &Value) -> Option<i64> {
    let n = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }?;
    (1..=5).contains(&n).then_some(n)
}
