use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Emoji categories a post can be reacted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub(crate) enum Reaction {
    Laugh,
    Surprise,
    Anger,
    Cry,
}

impl Reaction {
    pub(crate) const ALL: [Reaction; 4] = [
        Reaction::Laugh,
        Reaction::Surprise,
        Reaction::Anger,
        Reaction::Cry,
    ];

    /// Accepts both the category name and the legacy client key
    /// (`Risos`, `Surpresa`, `Raiva`, `Choro`).
    pub(crate) fn parse(key: &str) -> Option<Self> {
        match key {
            "Laugh" | "Risos" => Some(Self::Laugh),
            "Surprise" | "Surpresa" => Some(Self::Surprise),
            "Anger" | "Raiva" => Some(Self::Anger),
            "Cry" | "Choro" => Some(Self::Cry),
            _ => None,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Self::Laugh => "Laugh",
            Self::Surprise => "Surprise",
            Self::Anger => "Anger",
            Self::Cry => "Cry",
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown reaction: {0}")]
pub(crate) struct UnknownReaction(pub(crate) String);

impl FromStr for Reaction {
    type Err = UnknownReaction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| UnknownReaction(s.to_string()))
    }
}

pub(crate) type ReactionCounts = BTreeMap<Reaction, u64>;

pub(crate) fn zero_reactions() -> ReactionCounts {
    Reaction::ALL.iter().map(|reaction| (*reaction, 0)).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Comment {
    pub(crate) author: String,
    pub(crate) text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Report {
    pub(crate) author: String,
    pub(crate) text: String,
}

/// A post together with its engagement.
///
/// `id` is meaningful only once the post has been stored by a repository.
/// Title and content are not validated; empty strings are accepted.
#[derive(Debug, Clone)]
pub(crate) struct Post {
    pub(crate) id: i64,
    pub(crate) title: String,
    pub(crate) content: String,
    pub(crate) date: DateTime<Utc>,
    like_count: u64,
    reactions: ReactionCounts,
    comments: Vec<Comment>,
    reports: Vec<Report>,
}

impl Post {
    pub(crate) fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        date: DateTime<Utc>,
        like_count: Option<u64>,
        reactions: Option<ReactionCounts>,
    ) -> Self {
        let mut counts = zero_reactions();
        if let Some(initial) = reactions {
            counts.extend(initial);
        }

        Self {
            id: 0,
            title: title.into(),
            content: content.into(),
            date,
            like_count: like_count.unwrap_or(0),
            reactions: counts,
            comments: Vec::new(),
            reports: Vec::new(),
        }
    }

    pub(crate) fn like_count(&self) -> u64 {
        self.like_count
    }

    pub(crate) fn reactions(&self) -> &ReactionCounts {
        &self.reactions
    }

    pub(crate) fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub(crate) fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub(crate) fn like(&mut self) -> u64 {
        self.like_count = self.like_count.saturating_add(1);
        self.like_count
    }

    /// Returns `false` when `key` is not a known category; counts are left as is.
    pub(crate) fn add_reaction(&mut self, key: &str) -> bool {
        let Some(reaction) = Reaction::parse(key) else {
            return false;
        };
        let count = self.reactions.entry(reaction).or_insert(0);
        *count = count.saturating_add(1);
        true
    }

    pub(crate) fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    pub(crate) fn add_report(&mut self, report: Report) {
        self.reports.push(report);
    }

    /// Replaces the editable fields. Engagement collections are untouched;
    /// `like_count: None` keeps the current count.
    pub(crate) fn apply_edit(
        &mut self,
        title: String,
        content: String,
        date: DateTime<Utc>,
        like_count: Option<u64>,
    ) {
        self.title = title;
        self.content = content;
        self.date = date;
        if let Some(like_count) = like_count {
            self.like_count = like_count;
        }
    }
}
