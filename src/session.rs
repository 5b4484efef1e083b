//! Bounded chat transcript.
//!
//! A [`ChatSession`] records the alternating user and bot turns of one
//! conversation. It is owned by the presentation layer; the responder never
//! reads it. Appends go through `&mut self`, so a session shared between
//! tasks must be wrapped in a lock by its owner.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::responder::Responder;

/// Default number of turns kept by a session.
pub const DEFAULT_CAPACITY: usize = 200;

/// Who produced a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    User,
    Bot,
}

/// One line of the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub at: DateTime<Utc>,
}

/// An append-only transcript that keeps at most `capacity` turns.
///
/// Turns are added in user/bot pairs and evicted in pairs from the front,
/// so the transcript always starts with a user turn and alternates.
#[derive(Debug, Clone)]
pub struct ChatSession {
    turns: VecDeque<Turn>,
    capacity: usize,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl ChatSession {
    /// Create an empty session. Capacities below one exchange are raised to
    /// two turns.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        ChatSession {
            turns: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Answer `text` and record both turns.
    ///
    /// Blank input is ignored: nothing is recorded and `None` is returned.
    pub fn exchange(&mut self, responder: &Responder, text: &str) -> Option<&str> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        let reply = responder.get_response(text);
        let now = Utc::now();
        self.turns.push_back(Turn {
            speaker: Speaker::User,
            text: text.to_string(),
            at: now,
        });
        self.turns.push_back(Turn {
            speaker: Speaker::Bot,
            text: reply,
            at: now,
        });

        while self.turns.len() > self.capacity {
            self.turns.pop_front();
            self.turns.pop_front();
        }

        self.turns.back().map(|turn| turn.text.as_str())
    }

    /// Recorded turns, oldest first.
    pub fn turns(&self) -> impl Iterator<Item = &Turn> {
        self.turns.iter()
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Maximum number of turns kept.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Forget every turn.
    pub fn clear(&mut self) {
        self.turns.clear();
    }
}
