//! Date recognition
//!
//! Extraction only needs a date and the offset it is centred on, so date
//! recognition sits behind the [`DateResolver`] trait. [`PatternDateResolver`]
//! covers numeric dates and English month-name dates.

use chrono::NaiveDate;
use regex::{Match, Regex};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// A recognised date and the byte offset of the middle of its match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDate {
    pub date: NaiveDate,
    pub center: usize,
}

/// Source of dates for date-centred extraction.
pub trait DateResolver {
    /// Dates in `text`, ordered by centre offset
    fn resolve(&self, text: &str) -> Vec<ResolvedDate>;
}

pub(crate) fn numeric_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"\b\d{4}-\d{1,2}-\d{1,2}\b|\b\d{1,2}-\d{1,2}-(?:\d{4}|\d{2})\b|",
            r"\b\d{4}\.\d{1,2}\.\d{1,2}\b|\b\d{1,2}\.\d{1,2}\.(?:\d{4}|\d{2})\b|",
            r"\b\d{4}/\d{1,2}/\d{1,2}\b|\b\d{1,2}/\d{1,2}/(?:\d{4}|\d{2})\b",
        ))
        .expect("numeric date pattern is valid")
    })
}

pub(crate) fn month_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(concat!(
            r"(?i)\b(?:(?P<lead>\d{1,2})(?:st|nd|rd|th)?\D{0,3})?\b",
            r"(?P<month>jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|",
            r"aug(?:ust)?|sept?(?:ember)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?)\b",
            r"\.?\D{0,2}?(?:(?P<day>\d{1,2})(?:st|nd|rd|th)?\D{1,2})?(?P<year>\d{4})\b",
        ))
        .expect("month name date pattern is valid")
    })
}

fn digit_runs() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+").expect("digit pattern is valid"))
}

/// Byte offset of the middle character of a match
fn match_center(m: &Match<'_>) -> usize {
    let text = m.as_str();
    let half = text.chars().count() / 2;
    m.start() + text.char_indices().nth(half).map_or(text.len(), |(i, _)| i)
}

fn month_number(name: &str) -> Option<u32> {
    let prefix: String = name.chars().take(3).collect::<String>().to_lowercase();
    let month = match prefix.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

/// Regex-based recogniser for common English date formats.
///
/// Recognises `2011-09-30`, `09-30-2011` and `09-30-11` with `-`, `.` or
/// `/` separators, and month-name dates such as `Sep 30th, 2011` or
/// `30 September 2011`. Two-digit years are only accepted with a pivot:
/// years above the pivot fall in the 1900s, the rest in the 2000s.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatternDateResolver {
    two_digit_pivot: Option<u32>,
}

impl PatternDateResolver {
    /// Resolver that skips two-digit years
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolver that expands two-digit years around `pivot`
    pub fn with_pivot(pivot: u32) -> Self {
        Self {
            two_digit_pivot: Some(pivot),
        }
    }

    /// The configured two-digit year pivot
    pub fn two_digit_pivot(&self) -> Option<u32> {
        self.two_digit_pivot
    }

    fn parse_numeric(&self, text: &str) -> Option<NaiveDate> {
        let nums: Vec<&str> = digit_runs().find_iter(text).map(|m| m.as_str()).collect();
        let [a, b, c] = nums.as_slice() else {
            return None;
        };
        let value = |s: &str| s.parse::<u32>().ok();

        let (year, month, day) = if a.len() == 4 {
            (value(a)?, value(b)?, value(c)?)
        } else if c.len() == 4 {
            (value(c)?, value(a)?, value(b)?)
        } else {
            let pivot = self.two_digit_pivot?;
            let yy = value(c)?;
            let year = if yy > pivot { 1900 + yy } else { 2000 + yy };
            (year, value(a)?, value(b)?)
        };
        NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month, day)
    }

    fn parse_month_name(caps: &regex::Captures<'_>) -> Option<NaiveDate> {
        let month = month_number(caps.name("month")?.as_str())?;
        let day = caps.name("day").or_else(|| caps.name("lead"))?;
        let day: u32 = day.as_str().parse().ok()?;
        let year: i32 = caps.name("year")?.as_str().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

impl DateResolver for PatternDateResolver {
    fn resolve(&self, text: &str) -> Vec<ResolvedDate> {
        let mut dates: Vec<ResolvedDate> = numeric_pattern()
            .find_iter(text)
            .filter_map(|m| {
                Some(ResolvedDate {
                    date: self.parse_numeric(m.as_str())?,
                    center: match_center(&m),
                })
            })
            .collect();

        for caps in month_name_pattern().captures_iter(text) {
            let (Some(whole), Some(date)) = (caps.get(0), Self::parse_month_name(&caps)) else {
                continue;
            };
            dates.push(ResolvedDate {
                date,
                center: match_center(&whole),
            });
        }

        dates.sort_by_key(|d| d.center);
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dates(resolver: &PatternDateResolver, text: &str) -> Vec<NaiveDate> {
        resolver.resolve(text).into_iter().map(|d| d.date).collect()
    }

    #[test]
    fn test_numeric_formats() {
        let resolver = PatternDateResolver::new();
        assert_eq!(dates(&resolver, "on 2011-09-30 ok"), vec![ymd(2011, 9, 30)]);
        assert_eq!(dates(&resolver, "on 9/30/2011 ok"), vec![ymd(2011, 9, 30)]);
        assert_eq!(dates(&resolver, "on 2011.9.3"), vec![ymd(2011, 9, 3)]);
    }

    #[test]
    fn test_invalid_calendar_date_skipped() {
        let resolver = PatternDateResolver::new();
        assert!(dates(&resolver, "2011-02-30").is_empty());
        assert!(dates(&resolver, "13/01/2011").is_empty());
    }

    #[test]
    fn test_two_digit_year_needs_pivot() {
        assert!(dates(&PatternDateResolver::new(), "born 04/05/67").is_empty());

        let resolver = PatternDateResolver::with_pivot(30);
        assert_eq!(dates(&resolver, "born 04/05/67"), vec![ymd(1967, 4, 5)]);
        assert_eq!(dates(&resolver, "seen 04/05/21"), vec![ymd(2021, 4, 5)]);
    }

    #[test]
    fn test_month_name_formats() {
        let resolver = PatternDateResolver::new();
        assert_eq!(dates(&resolver, "Sep 30th, 2011"), vec![ymd(2011, 9, 30)]);
        assert_eq!(dates(&resolver, "30 September 2011"), vec![ymd(2011, 9, 30)]);
        assert_eq!(dates(&resolver, "on march 5, 2020."), vec![ymd(2020, 3, 5)]);
        assert!(dates(&resolver, "the mayor in 2011").is_empty());
    }

    #[test]
    fn test_centers_sorted_and_inside_match() {
        let resolver = PatternDateResolver::new();
        let text = "Seen on Jan 2, 2020 and again 2020-01-03.";
        let resolved = resolver.resolve(text);
        assert_eq!(resolved.len(), 2);
        assert!(resolved[0].center < resolved[1].center);
        assert_eq!(resolved[0].date, ymd(2020, 1, 2));
        assert_eq!(resolved[1].center, text.find("2020-01-03").unwrap() + 5);
    }
}
