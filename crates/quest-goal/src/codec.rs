// codec.rs — The goal-file text format.
//
// Line 1 holds the score. Each following line is `<Tag>:<fields>` with
// comma-separated fields in a fixed per-kind order:
//
//   SimpleGoal:name,description,basePoints,completed
//   EternalGoal:name,description,basePoints,timesCompleted
//   ChecklistGoal:name,description,basePoints,bonus,target,amountCompleted
//
// `completed` is written `True`/`False` and read case-insensitively.
// Lines with an unknown tag are skipped. There is no escaping, so free text
// must not contain `,` or `:` (the store refuses to create such goals).

use std::str::FromStr;

use crate::error::GoalError;
use crate::goal::{GoalKind, GoalRecord, GoalVariant};
use crate::store::GoalStore;

/// Render `store` in the goal-file format.
pub fn encode(store: &GoalStore) -> String {
    let mut out = format!("{}\n", store.score());
    for goal in store.goals() {
        out.push_str(&encode_goal(goal));
        out.push('\n');
    }
    out
}

fn encode_goal(goal: &GoalRecord) -> String {
    let tail = match &goal.variant {
        GoalVariant::Simple { completed } => {
            String::from(if *completed { "True" } else { "False" })
        }
        GoalVariant::Eternal { times_completed } => times_completed.to_string(),
        GoalVariant::Checklist {
            target,
            bonus,
            amount_completed,
        } => format!("{},{},{}", bonus, target, amount_completed),
    };
    format!(
        "{}:{},{},{},{}",
        goal.kind().tag(),
        goal.name,
        goal.description,
        goal.base_points,
        tail
    )
}

/// Decode a goal file into a new store.
pub fn decode(text: &str) -> Result<GoalStore, GoalError> {
    let mut store = GoalStore::new();
    decode_into(&mut store, text)?;
    Ok(store)
}

/// Replace `store`'s goals and score with the decoded contents of `text`.
///
/// The goal list is cleared first and filled line by line. On a malformed
/// line decoding stops: goals from earlier lines remain, later ones are
/// absent, and the score is whatever line 1 held (unchanged if line 1 itself
/// is bad).
pub fn decode_into(store: &mut GoalStore, text: &str) -> Result<(), GoalError> {
    store.reset_goals();

    let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l));
    let (_, header) = lines.next().ok_or_else(|| GoalError::MalformedRecord {
        line: 1,
        reason: "missing score line".to_string(),
    })?;
    store.set_score(parse_field(1, "score", header.trim())?);

    for (line_no, line) in lines {
        if line.trim().is_empty() {
            continue;
        }
        let (tag, blob) = line.split_once(':').ok_or_else(|| GoalError::MalformedRecord {
            line: line_no,
            reason: "expected `<Kind>:<fields>`".to_string(),
        })?;
        let Some(kind) = GoalKind::from_tag(tag) else {
            tracing::debug!(line = line_no, tag, "skipping record with unknown kind");
            continue;
        };
        let fields: Vec<&str> = blob.split(',').collect();
        store.push_decoded(decode_goal(line_no, kind, &fields)?);
    }
    Ok(())
}

fn decode_goal(line: usize, kind: GoalKind, fields: &[&str]) -> Result<GoalRecord, GoalError> {
    let expected = match kind {
        GoalKind::Simple | GoalKind::Eternal => 4,
        GoalKind::Checklist => 6,
    };
    if fields.len() != expected {
        return Err(GoalError::MalformedRecord {
            line,
            reason: format!(
                "{} expects {} fields, found {}",
                kind.tag(),
                expected,
                fields.len()
            ),
        });
    }

    let base_points = parse_field(line, "basePoints", fields[2])?;
    let variant = match kind {
        GoalKind::Simple => GoalVariant::Simple {
            completed: parse_bool(line, fields[3])?,
        },
        GoalKind::Eternal => GoalVariant::Eternal {
            times_completed: parse_field(line, "timesCompleted", fields[3])?,
        },
        GoalKind::Checklist => {
            let bonus: u32 = parse_field(line, "bonus", fields[3])?;
            let target: u32 = parse_field(line, "target", fields[4])?;
            let amount_completed: u32 = parse_field(line, "amountCompleted", fields[5])?;
            if target == 0 {
                return Err(GoalError::MalformedRecord {
                    line,
                    reason: "checklist target must be at least 1".to_string(),
                });
            }
            GoalVariant::Checklist {
                target,
                bonus,
                amount_completed,
            }
        }
    };
    Ok(GoalRecord::new(fields[0], fields[1], base_points, variant))
}

fn parse_field<T: FromStr>(line: usize, field: &str, raw: &str) -> Result<T, GoalError> {
    raw.trim().parse().map_err(|_| GoalError::MalformedRecord {
        line,
        reason: format!("{} is not a valid number: {:?}", field, raw),
    })
}

fn parse_bool(line: usize, raw: &str) -> Result<bool, GoalError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(GoalError::MalformedRecord {
            line,
            reason: format!("completed is not a boolean: {:?}", raw),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::goal::ChecklistTerms;

    fn one_of_each() -> GoalStore {
        let mut store = GoalStore::new();
        store
            .create(GoalKind::Simple, "Run a marathon", "once", 1000, None)
            .unwrap();
        store
            .create(GoalKind::Eternal, "Scriptures", "daily", 100, None)
            .unwrap();
        store
            .create(
                GoalKind::Checklist,
                "Temple",
                "ten visits",
                50,
                Some(ChecklistTerms {
                    target: 10,
                    bonus: 100,
                }),
            )
            .unwrap();
        store.record_event(1).unwrap();
        store.record_event(2).unwrap();
        store.record_event(2).unwrap();
        store.record_event(3).unwrap();
        store
    }

    #[test]
    fn encode_writes_score_then_one_line_per_goal() {
        let text = encode(&one_of_each());
        assert_eq!(
            text,
            "1250\n\
             SimpleGoal:Run a marathon,once,1000,True\n\
             EternalGoal:Scriptures,daily,100,2\n\
             ChecklistGoal:Temple,ten visits,50,100,10,1\n"
        );
    }

    #[test]
    fn round_trip_preserves_listing_score_and_next_event() {
        let original = one_of_each();
        let mut decoded = decode(&encode(&original)).unwrap();

        assert_eq!(decoded.score(), original.score());
        assert_eq!(decoded.list().unwrap(), original.list().unwrap());
        assert_eq!(decoded, original);

        let mut expected = original.clone();
        for index in 1..=3 {
            assert_eq!(
                decoded.record_event(index).unwrap(),
                expected.record_event(index).unwrap()
            );
        }
    }

    #[test]
    fn empty_store_round_trips() {
        let decoded = decode(&encode(&GoalStore::new())).unwrap();
        assert!(decoded.is_empty());
        assert_eq!(decoded.score(), 0);
    }

    #[test]
    fn unknown_kind_is_skipped_silently() {
        let text = "40\nMystery:x,y,1\nEternalGoal:Read,daily,20,2\n";
        let store = decode(text).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.score(), 40);
        assert_eq!(store.get(1).unwrap().name(), "Read");
    }

    #[test]
    fn boolean_tokens_are_case_insensitive() {
        let store = decode("0\nSimpleGoal:a,b,1,true\nSimpleGoal:c,d,1,FALSE\n").unwrap();
        assert!(store.get(1).unwrap().is_complete());
        assert!(!store.get(2).unwrap().is_complete());
    }

    #[test]
    fn malformed_line_keeps_prefix_and_score() {
        let mut store = one_of_each();
        let text = "77\n\
                    SimpleGoal:a,b,1,False\n\
                    EternalGoal:c,d,lots,0\n\
                    SimpleGoal:e,f,1,False\n";
        let result = decode_into(&mut store, text);

        assert!(matches!(
            result,
            Err(GoalError::MalformedRecord { line: 3, .. })
        ));
        assert_eq!(store.score(), 77);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).unwrap().name(), "a");
    }

    #[test]
    fn bad_score_line_clears_goals_but_keeps_score() {
        let mut store = one_of_each();
        let result = decode_into(&mut store, "many\nSimpleGoal:a,b,1,False\n");
        assert!(matches!(
            result,
            Err(GoalError::MalformedRecord { line: 1, .. })
        ));
        assert!(store.is_empty());
        assert_eq!(store.score(), 1250);
    }

    #[test]
    fn structural_errors_are_malformed() {
        for text in [
            "",
            "0\nSimpleGoal a,b,1,False",
            "0\nSimpleGoal:a,b,1",
            "0\nSimpleGoal:a,b,1,maybe",
            "0\nChecklistGoal:a,b,1,5,0,0",
            "0\nEternalGoal:a,b,1,-3",
        ] {
            assert!(
                matches!(decode(text), Err(GoalError::MalformedRecord { .. })),
                "expected malformed: {:?}",
                text
            );
        }
    }

    #[test]
    fn blank_lines_are_ignored() {
        let store = decode("5\n\nEternalGoal:a,b,1,0\n\n").unwrap();
        assert_eq!(store.len(), 1);
    }
}
