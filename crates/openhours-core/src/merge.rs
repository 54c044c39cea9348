//! Normalization of schedule definitions with overlapping ranges.

use crate::definition::{ExceptionDef, HoursDef, Metadata, RangeDef, ScheduleDef};
use crate::error::Result;
use crate::interval::TimeInterval;
use crate::week::WeekSchedule;

struct Entry {
    interval: TimeInterval,
    def: RangeDef,
}

impl WeekSchedule {
    /// Rewrites a definition so that no two ranges of the same list overlap.
    ///
    /// Each list is merged in a single left-to-right pass: exact duplicates
    /// are dropped, and a range overlapping an already accumulated one (in
    /// either direction) is replaced by their enclosing span, which then
    /// keeps being compared against the rest of the accumulated list. No
    /// second pass is made. Filters and metadata are passed through.
    ///
    /// # Errors
    ///
    /// Fails on malformed ranges.
    pub fn merge_overlapping_ranges(def: &ScheduleDef) -> Result<ScheduleDef> {
        let mut merged = ScheduleDef {
            filters: def.filters.clone(),
            data: def.data.clone(),
            ..ScheduleDef::default()
        };

        for (key, defs) in &def.days {
            merged.days.insert(key.clone(), merge_list(defs)?);
        }

        for (key, exception) in &def.exceptions {
            let exception = match exception {
                ExceptionDef::Ranges(defs) => ExceptionDef::Ranges(merge_list(defs)?),
                ExceptionDef::Filter(filter) => ExceptionDef::Filter(filter.clone()),
            };
            merged.exceptions.insert(key.clone(), exception);
        }

        Ok(merged)
    }
}

fn merge_list(defs: &[RangeDef]) -> Result<Vec<RangeDef>> {
    let mut accumulated: Vec<Entry> = Vec::with_capacity(defs.len());

    for def in defs {
        let def = normalize_leaf(def)?;
        let mut interval = TimeInterval::from_def(&def)?;

        if accumulated
            .iter()
            .any(|entry| entry.interval.format() == interval.format())
        {
            continue;
        }

        let mut data = def.data().cloned();
        let mut absorbed_any = false;
        let mut insert_at = None;
        let mut kept = Vec::with_capacity(accumulated.len() + 1);
        for entry in accumulated {
            if entry.interval.overlaps(&interval) || interval.overlaps(&entry.interval) {
                interval = TimeInterval::from_list(&[entry.interval.clone(), interval])?;
                data = entry.def.data().cloned().or(data);
                absorbed_any = true;
                insert_at.get_or_insert(kept.len());
            } else {
                kept.push(entry);
            }
        }

        let def = if absorbed_any {
            leaf(interval.format(), data)
        } else {
            def
        };
        let entry = Entry { interval, def };
        match insert_at {
            Some(index) => kept.insert(index, entry),
            None => kept.push(entry),
        }
        accumulated = kept;
    }

    Ok(accumulated.into_iter().map(|entry| entry.def).collect())
}

/// Re-emits a definition with formatted hours, merging nested lists first.
fn normalize_leaf(def: &RangeDef) -> Result<RangeDef> {
    match def {
        RangeDef::Text(text) => Ok(RangeDef::Text(text.parse::<TimeInterval>()?.format())),
        RangeDef::Record {
            hours: HoursDef::Text(text),
            data,
        } => Ok(leaf(text.parse::<TimeInterval>()?.format(), data.clone())),
        RangeDef::Record {
            hours: HoursDef::List(list),
            data,
        } => Ok(RangeDef::Record {
            hours: HoursDef::List(merge_list(list)?),
            data: data.clone(),
        }),
    }
}

fn leaf(hours: String, data: Option<Metadata>) -> RangeDef {
    match data {
        Some(data) => RangeDef::record(hours, Some(data)),
        None => RangeDef::Text(hours),
    }
}
