//! Crontab time expressions.
//!
//! An entry's time expression is written to the crontab as given. It must be
//! either a standard 5-field expression (`minute hour day month weekday`) or
//! one of the crontab shortcuts (`@reboot`, `@hourly`, `@daily`, ...). The
//! expression is checked with the `cron` crate, which is also used to compute
//! upcoming run times for listings.

use chrono::{DateTime, Utc};
use cron::Schedule as CronSchedule;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur when parsing or using schedules.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// Invalid cron expression.
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidCron { expression: String, reason: String },

    /// Unknown `@` shortcut.
    #[error("unknown schedule shortcut: {0}")]
    UnknownShortcut(String),

    /// No more occurrences.
    #[error("no more occurrences")]
    NoMoreOccurrences,
}

/// A validated crontab time expression.
#[derive(Clone)]
pub struct Schedule {
    /// The expression as written.
    expression: String,
    schedule_type: ScheduleType,
}

#[derive(Debug, Clone)]
enum ScheduleType {
    /// Standard cron schedule.
    Cron(Box<CronSchedule>),
    /// Runs once when the cron daemon starts.
    Reboot,
}

impl fmt::Debug for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schedule")
            .field("expression", &self.expression)
            .finish()
    }
}

impl Schedule {
    /// Parse a crontab time expression.
    pub fn new(expression: impl Into<String>) -> Result<Self, ScheduleError> {
        let expression = expression.into().trim().to_string();
        let schedule_type = Self::parse_expression(&expression)?;
        Ok(Self {
            expression,
            schedule_type,
        })
    }

    fn parse_expression(expression: &str) -> Result<ScheduleType, ScheduleError> {
        if expression.starts_with('@') {
            return Self::parse_shortcut(expression);
        }
        Self::parse_cron(expression)
    }

    /// Parse a shortcut expression (@daily, @reboot, etc.).
    fn parse_shortcut(expression: &str) -> Result<ScheduleType, ScheduleError> {
        match expression.to_lowercase().as_str() {
            "@reboot" => Ok(ScheduleType::Reboot),
            "@yearly" | "@annually" => Self::parse_cron("0 0 1 1 *"),
            "@monthly" => Self::parse_cron("0 0 1 * *"),
            "@weekly" => Self::parse_cron("0 0 * * 0"),
            "@daily" | "@midnight" => Self::parse_cron("0 0 * * *"),
            "@hourly" => Self::parse_cron("0 * * * *"),
            _ => Err(ScheduleError::UnknownShortcut(expression.to_string())),
        }
    }

    /// Parse a 5-field crontab expression.
    fn parse_cron(expression: &str) -> Result<ScheduleType, ScheduleError> {
        let invalid = |reason: String| ScheduleError::InvalidCron {
            expression: expression.to_string(),
            reason,
        };

        let fields: Vec<&str> = expression.split_whitespace().collect();
        if fields.len() != 5 {
            return Err(invalid(format!("expected 5 fields, got {}", fields.len())));
        }

        // The cron crate wants a seconds field and numbers weekdays 1-7 from
        // Sunday, where crontab uses 0-7 with both 0 and 7 meaning Sunday.
        let weekday = crontab_weekday_to_cron(fields[4]).map_err(invalid)?;
        let cron_expr = format!(
            "0 {} {} {} {} {}",
            fields[0], fields[1], fields[2], fields[3], weekday
        );

        let schedule =
            CronSchedule::from_str(&cron_expr).map_err(|e| invalid(e.to_string()))?;
        Ok(ScheduleType::Cron(Box::new(schedule)))
    }

    /// Get the next occurrence after the given time.
    pub fn next_after(&self, after: DateTime<Utc>) -> Result<DateTime<Utc>, ScheduleError> {
        match &self.schedule_type {
            ScheduleType::Cron(schedule) => schedule
                .after(&after)
                .next()
                .ok_or(ScheduleError::NoMoreOccurrences),
            ScheduleType::Reboot => Err(ScheduleError::NoMoreOccurrences),
        }
    }

    /// Get the next occurrence from now.
    pub fn next(&self) -> Result<DateTime<Utc>, ScheduleError> {
        self.next_after(Utc::now())
    }

    /// Get the next N occurrences after the given time.
    pub fn next_n_after(&self, after: DateTime<Utc>, n: usize) -> Vec<DateTime<Utc>> {
        match &self.schedule_type {
            ScheduleType::Cron(schedule) => schedule.after(&after).take(n).collect(),
            ScheduleType::Reboot => Vec::new(),
        }
    }

    /// Whether this schedule only fires when the cron daemon starts.
    pub fn is_reboot(&self) -> bool {
        matches!(self.schedule_type, ScheduleType::Reboot)
    }

    /// Get the original expression string.
    pub fn expression(&self) -> &str {
        &self.expression
    }
}

impl FromStr for Schedule {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

/// Renumber a crontab weekday field (0-7, Sunday = 0 or 7) into the cron
/// crate's numbering (1-7, Sunday = 1). Named days pass through.
fn crontab_weekday_to_cron(field: &str) -> Result<String, String> {
    let mut parts = Vec::new();

    for item in field.split(',') {
        let (range, step) = match item.split_once('/') {
            Some((range, step)) => (range, Some(step)),
            None => (item, None),
        };
        let with_step = |r: String| match step {
            Some(step) => format!("{}/{}", r, step),
            None => r,
        };

        match range.split_once('-') {
            Some((start, end)) => {
                match (weekday_number(start)?, weekday_number(end)?) {
                    (Some(start), Some(end)) => {
                        if start > end {
                            return Err(format!("weekday range '{}' runs backwards", range));
                        }
                        if start == 7 {
                            parts.push(with_step("1".to_string()));
                        } else if end < 7 {
                            parts.push(with_step(format!("{}-{}", start + 1, end + 1)));
                        } else if start == 0 {
                            parts.push(with_step("1-7".to_string()));
                        } else if step.is_none() {
                            // `5-7` means Friday through Sunday.
                            parts.push(format!("{}-7", start + 1));
                            parts.push("1".to_string());
                        } else {
                            return Err(format!(
                                "stepped weekday range '{}' ending on Sunday is not supported",
                                item
                            ));
                        }
                    }
                    _ => parts.push(with_step(range.to_string())),
                }
            }
            None => match weekday_number(range)? {
                Some(day) => parts.push(with_step((day % 7 + 1).to_string())),
                None => parts.push(with_step(range.to_string())),
            },
        }
    }

    Ok(parts.join(","))
}

/// Parse a numeric weekday; `Ok(None)` for `*` or names.
fn weekday_number(token: &str) -> Result<Option<u32>, String> {
    if !token.chars().all(|c| c.is_ascii_digit()) || token.is_empty() {
        return Ok(None);
    }
    match token.parse::<u32>() {
        Ok(day) if day <= 7 => Ok(Some(day)),
        _ => Err(format!("weekday '{}' out of range 0-7", token)),
    }
}
