//! Importer for a small subset of the OSM `opening_hours` syntax.
//!
//! Supported:
//!
//! - rules separated by `;`, later rules replacing earlier ones for the days
//!   they name,
//! - weekday selectors: `Mo`, `Mo-Fr`, `Sa,Su`, wrapping ranges like `Fr-Mo`;
//!   a rule without a selector applies to every day,
//! - times: comma-separated `HH:MM-HH:MM`, or `off` / `closed`,
//! - `24/7`.
//!
//! Month, week, year, holiday and solar-time selectors cannot be expressed
//! by a [`ScheduleDef`] without extra data and fail with
//! [`ScheduleError::UnsupportedSelector`].

use std::collections::BTreeMap;

use crate::definition::{RangeDef, ScheduleDef};
use crate::error::{Result, ScheduleError};
use crate::interval::TimeInterval;
use crate::weekday::Weekday;

const UNSUPPORTED_WORDS: &[&str] = &[
    "PH", "SH", "easter", "sunrise", "sunset", "dawn", "dusk", "week", "Jan", "Feb", "Mar", "Apr",
    "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn weekday_from_abbreviation(abbr: &str) -> Option<Weekday> {
    let day = match abbr {
        "Mo" => Weekday::Monday,
        "Tu" => Weekday::Tuesday,
        "We" => Weekday::Wednesday,
        "Th" => Weekday::Thursday,
        "Fr" => Weekday::Friday,
        "Sa" => Weekday::Saturday,
        "Su" => Weekday::Sunday,
        _ => return None,
    };
    Some(day)
}

fn check_supported(rule: &str) -> Result<()> {
    for token in rule.split(|c: char| !c.is_ascii_alphanumeric() && c != '/') {
        if token.is_empty() {
            continue;
        }
        let is_year = token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit());
        if is_year || UNSUPPORTED_WORDS.contains(&token) {
            return Err(ScheduleError::UnsupportedSelector(token.to_string()));
        }
    }
    for marker in ["[", "+", "\""] {
        if rule.contains(marker) {
            return Err(ScheduleError::UnsupportedSelector(rule.to_string()));
        }
    }
    Ok(())
}

/// Parses `Mo-Fr,Su` into the days it names, in canonical order.
fn parse_weekdays(selector: &str) -> Result<Vec<Weekday>> {
    let unsupported = || ScheduleError::UnsupportedSelector(selector.to_string());
    let mut selected = [false; 7];

    for part in selector.split(',') {
        match part.split_once('-') {
            Some((from, to)) => {
                let from = weekday_from_abbreviation(from).ok_or_else(unsupported)?;
                let to = weekday_from_abbreviation(to).ok_or_else(unsupported)?;
                let mut index = from.index();
                loop {
                    selected[index] = true;
                    if index == to.index() {
                        break;
                    }
                    index = (index + 1) % 7;
                }
            }
            None => {
                let day = weekday_from_abbreviation(part).ok_or_else(unsupported)?;
                selected[day.index()] = true;
            }
        }
    }

    Ok(Weekday::ALL
        .into_iter()
        .filter(|day| selected[day.index()])
        .collect())
}

fn parse_times(times: &str) -> Result<Vec<RangeDef>> {
    if matches!(times, "off" | "closed") {
        return Ok(Vec::new());
    }
    times
        .split(',')
        .map(|range| {
            let interval: TimeInterval = range.trim().parse()?;
            Ok(RangeDef::Text(interval.format()))
        })
        .collect()
}

fn looks_like_weekday_selector(token: &str) -> bool {
    token
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_uppercase())
}

/// Converts an expression such as `Mo-Fr 09:00-18:00; Sa 10:00-14:00` into
/// a schedule definition.
///
/// # Errors
///
/// [`ScheduleError::UnsupportedSelector`] for selectors outside the subset,
/// and the usual time-format errors for malformed times.
pub fn parse(expression: &str) -> Result<ScheduleDef> {
    let mut days: BTreeMap<Weekday, Vec<RangeDef>> = BTreeMap::new();

    for rule in expression.split(';').map(str::trim).filter(|r| !r.is_empty()) {
        if rule == "24/7" {
            for day in Weekday::ALL {
                days.insert(day, vec![RangeDef::from("00:00-24:00")]);
            }
            continue;
        }

        check_supported(rule)?;

        let (selected, times) = match rule.split_once(char::is_whitespace) {
            Some((selector, times)) if looks_like_weekday_selector(selector) => {
                (parse_weekdays(selector)?, times.trim())
            }
            _ if looks_like_weekday_selector(rule) => {
                return Err(ScheduleError::UnsupportedSelector(rule.to_string()));
            }
            _ => (Weekday::ALL.to_vec(), rule),
        };

        let ranges = parse_times(&times.split_whitespace().collect::<String>())?;
        for day in selected {
            days.insert(day, ranges.clone());
        }
    }

    let mut def = ScheduleDef::new();
    for (day, ranges) in days {
        def = def.day(day.key(), ranges);
    }
    Ok(def)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::ranges;
    use crate::week::WeekSchedule;

    #[test]
    fn parses_weekday_rules() {
        let def = parse("Mo-Fr 09:00-12:00,13:00-18:00; Sa 10:00-14:00; Su off").unwrap();
        assert_eq!(def.days.len(), 7);
        assert_eq!(def.days["monday"], ranges(["09:00-12:00", "13:00-18:00"]));
        assert_eq!(def.days["friday"], ranges(["09:00-12:00", "13:00-18:00"]));
        assert_eq!(def.days["saturday"], ranges(["10:00-14:00"]));
        assert!(def.days["sunday"].is_empty());
    }

    #[test]
    fn later_rules_override_earlier_ones() {
        let def = parse("Mo-Su 10:00-20:00; We closed").unwrap();
        assert!(def.days["wednesday"].is_empty());
        assert_eq!(def.days["thursday"], ranges(["10:00-20:00"]));
    }

    #[test]
    fn wrapping_day_range_and_lists() {
        let def = parse("Fr-Mo 18:00-02:00; We,Th 12:00-14:00").unwrap();
        let keys: Vec<&str> = def.days.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["friday", "monday", "saturday", "sunday", "thursday", "wednesday"]
        );
        assert_eq!(def.days["sunday"], ranges(["18:00-02:00"]));
    }

    #[test]
    fn rule_without_selector_applies_to_all_days() {
        let def = parse("08:00-20:00").unwrap();
        assert_eq!(def.days.len(), 7);
        let def = parse("24/7").unwrap();
        assert_eq!(def.days["tuesday"], ranges(["00:00-24:00"]));
    }

    #[test]
    fn imported_definition_feeds_fill() {
        let def = parse("Mo-Fr 09:00-18:00").unwrap();
        let schedule = WeekSchedule::fill(&def).unwrap();
        assert!(schedule.is_open_on(Weekday::Wednesday));
        assert!(schedule.is_closed_on(Weekday::Saturday));
    }

    #[test]
    fn rejects_unsupported_selectors() {
        for expression in [
            "PH off",
            "Mo-Fr sunrise-sunset",
            "Jan-Mar Mo-Fr 08:00-12:00",
            "week 01-10 Mo 08:00-12:00",
            "2024 Mo 08:00-12:00",
            "Mo[1] 10:00-12:00",
            "Mo 10:00+",
            "Xx 10:00-12:00",
            "Mo-Fr",
        ] {
            assert!(
                matches!(parse(expression), Err(ScheduleError::UnsupportedSelector(_))),
                "{expression} should be unsupported"
            );
        }
    }

    #[test]
    fn malformed_times_keep_their_error() {
        assert_eq!(
            parse("Mo 9-12").unwrap_err(),
            ScheduleError::InvalidTimeFormat("9".into())
        );
    }
}
