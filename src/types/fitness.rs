use crate::error::RoutineError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Training tags a fitness record may carry.
///
/// `Rest` is the "did not train" selection and never gets stored as a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    Chest,
    Back,
    Arms,
    Shoulders,
    Abs,
    Legs,
    Cardio,
    Rest,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Chest => "chest",
            Activity::Back => "back",
            Activity::Arms => "arms",
            Activity::Shoulders => "shoulders",
            Activity::Abs => "abs",
            Activity::Legs => "legs",
            Activity::Cardio => "cardio",
            Activity::Rest => "rest",
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated activity choice ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySelection {
    activities: Vec<Activity>,
    trained: bool,
}

impl ActivitySelection {
    /// Validate a raw selection.
    ///
    /// Empty selections are rejected, and `Rest` must be chosen alone. A rest
    /// day stores no tags and `trained = false`; duplicates are collapsed.
    pub fn parse(mut selected: Vec<Activity>) -> Result<Self, RoutineError> {
        if selected.is_empty() {
            return Err(RoutineError::validation("select at least one activity"));
        }
        if selected.contains(&Activity::Rest) {
            if selected.iter().any(|a| *a != Activity::Rest) {
                return Err(RoutineError::validation(
                    "`rest` cannot be combined with other activities",
                ));
            }
            return Ok(Self {
                activities: Vec::new(),
                trained: false,
            });
        }
        selected.sort();
        selected.dedup();
        Ok(Self {
            activities: selected,
            trained: true,
        })
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn trained(&self) -> bool {
        self.trained
    }
}
