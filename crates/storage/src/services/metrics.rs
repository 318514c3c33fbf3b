use crate::models::{Attempt, DNF, DNS, Event, EventFormat, EventResult, Metric, RoundFormat};

/// Derives the best single and the average of a result from its attempts.
///
/// `0` is returned for an average the round format doesn't have (best-of rounds,
/// multi-blind style events) or when the round is incomplete.
pub fn compute_best_and_average(
    attempts: &[Attempt],
    round_format: RoundFormat,
    event_format: EventFormat,
) -> (i64, i64) {
    let counted: Vec<&Attempt> = attempts.iter().filter(|a| a.is_counted()).collect();

    let best = match counted.iter().filter(|a| a.is_valid()).map(|a| a.result).min() {
        Some(best) => best,
        None if counted.is_empty() => 0,
        None if counted.iter().all(|a| a.is_dns()) => DNS,
        None => DNF,
    };

    if event_format == EventFormat::Multi
        || round_format.is_best_of()
        || counted.len() != round_format.number_of_attempts()
    {
        return (best, 0);
    }

    let mut values: Vec<i64> = counted.iter().map(|a| a.result).collect();
    let invalid = values.iter().filter(|v| **v <= 0).count();

    let average = match round_format {
        RoundFormat::Average => {
            if invalid > 1 {
                DNF
            } else {
                // invalid attempts sort as the worst one
                values.sort_by_key(|v| if *v > 0 { *v } else { i64::MAX });
                rounded_mean(&values[1..values.len() - 1])
            }
        }
        _ => {
            if invalid > 0 {
                DNF
            } else {
                rounded_mean(&values)
            }
        }
    };

    (best, average)
}

fn rounded_mean(values: &[i64]) -> i64 {
    let len = values.len() as i64;
    let sum: i64 = values.iter().sum();
    (sum * 2 + len) / (len * 2)
}

/// Whether a result can set a record or appear in a ranking for the metric.
///
/// Averages additionally need the event's full default number of attempts.
pub fn is_eligible(result: &EventResult, metric: Metric, event: &Event) -> bool {
    match metric {
        Metric::Single => result.best > 0,
        Metric::Average => {
            result.average > 0 && result.counted_attempts() == event.default_number_of_attempts()
        }
    }
}
