//! Normalization settings.
//!
//! Every field has a default matching the usual spreadsheet layout, so an
//! empty `[ingest]` section (or none at all) is valid.

use serde::Deserialize;

use almanac_core::event::UNKNOWN_ENTITY;

/// What to do when an end time is earlier than the start time on the same date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OvernightPolicy {
    /// Assume the event ran past midnight and move the end to the next day.
    #[default]
    NextDay,
    /// Keep the end as written. Such an end precedes its start and is dropped.
    Keep,
}

/// Header names of the columns the normalizer reads.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    date: String,
    start_time: String,
    end_time: String,
    certain: String,
    entities: String,
    description: String,
    verified: String,
    sources: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            date: "Date".to_string(),
            start_time: "Start time".to_string(),
            end_time: "End time".to_string(),
            certain: "Certain".to_string(),
            entities: "Entities".to_string(),
            description: "Description".to_string(),
            verified: "Verified".to_string(),
            sources: "Sources".to_string(),
        }
    }
}

impl ColumnNames {
    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn end_time(&self) -> &str {
        &self.end_time
    }

    pub fn certain(&self) -> &str {
        &self.certain
    }

    pub fn entities(&self) -> &str {
        &self.entities
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn verified(&self) -> &str {
        &self.verified
    }

    /// The optional sources column.
    pub fn sources(&self) -> &str {
        &self.sources
    }

    /// The columns a table must have.
    pub fn required(&self) -> [&str; 7] {
        [
            &self.date,
            &self.start_time,
            &self.end_time,
            &self.certain,
            &self.entities,
            &self.description,
            &self.verified,
        ]
    }
}

/// Settings for turning raw rows into events.
///
/// # Example
///
/// ```
/// # use almanac_ingest::config::{NormalizeConfig, OvernightPolicy};
/// let config = NormalizeConfig::default();
/// assert_eq!(config.affirmative(), "yes");
/// assert_eq!(config.overnight(), OvernightPolicy::NextDay);
/// assert_eq!(config.columns().date(), "Date");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NormalizeConfig {
    columns: ColumnNames,

    /// Token that marks a boolean cell as true, compared case-insensitively.
    affirmative: String,

    /// Entity assigned to rows that name none.
    unknown_entity: String,

    overnight: OvernightPolicy,
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            columns: ColumnNames::default(),
            affirmative: "yes".to_string(),
            unknown_entity: UNKNOWN_ENTITY.to_string(),
            overnight: OvernightPolicy::default(),
        }
    }
}

impl NormalizeConfig {
    pub fn columns(&self) -> &ColumnNames {
        &self.columns
    }

    pub fn affirmative(&self) -> &str {
        &self.affirmative
    }

    pub fn unknown_entity(&self) -> &str {
        &self.unknown_entity
    }

    pub fn overnight(&self) -> OvernightPolicy {
        self.overnight
    }

    /// Returns a copy with a different overnight policy.
    pub fn with_overnight(mut self, overnight: OvernightPolicy) -> Self {
        self.overnight = overnight;
        self
    }

    /// Returns a copy with a different affirmative token.
    pub fn with_affirmative(mut self, affirmative: impl Into<String>) -> Self {
        self.affirmative = affirmative.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_columns_follow_renames() {
        let config: NormalizeConfig =
            serde_json::from_str(r#"{"columns": {"start_time": "Begin"}}"#).unwrap();

        assert!(config.columns().required().contains(&"Begin"));
        assert!(!config.columns().required().contains(&"Start time"));
        assert_eq!(config.columns().sources(), "Sources");
    }

    #[test]
    fn test_builder_overrides() {
        let config = NormalizeConfig::default()
            .with_affirmative("ja")
            .with_overnight(OvernightPolicy::Keep);

        assert_eq!(config.affirmative(), "ja");
        assert_eq!(config.overnight(), OvernightPolicy::Keep);
        assert_eq!(config.unknown_entity(), "Unknown");
    }

    #[test]
    fn test_overnight_policy_names() {
        let policy: OvernightPolicy = serde_json::from_str(r#""next-day""#).unwrap();
        assert_eq!(policy, OvernightPolicy::NextDay);
    }
}
