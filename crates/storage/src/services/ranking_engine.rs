use std::collections::HashMap;

use crate::dto::ranking::{MAX_RANKING_ROWS, RankingMode};
use crate::models::{Event, EventResult, Metric, RecordCategory, RegionScope};
use crate::services::metrics::is_eligible;

#[derive(Debug, Clone, Copy)]
pub struct RankingQuery {
    pub metric: Metric,
    pub mode: RankingMode,
    pub category: Option<RecordCategory>,
    pub region: RegionScope,
    pub top_n: u32,
}

impl RankingQuery {
    fn includes(&self, result: &EventResult, event: &Event) -> bool {
        result.approved
            && result.event_id == event.event_id
            && self.category.is_none_or(|c| c == result.record_category)
            && self.region.contains(
                result.region_code.as_deref(),
                result.super_region_code.as_deref(),
            )
            && is_eligible(result, self.metric, event)
    }
}

/// What a ranked row stands for, on top of the result it comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RankedItem {
    /// The result's average
    Result,
    /// A participant's personal best
    Person(i32),
    /// One attempt of the result
    Attempt { index: usize, memo: Option<i64> },
}

#[derive(Debug, Clone)]
pub struct RankedResult<'a> {
    pub rank: u32,
    pub value: i64,
    pub result: &'a EventResult,
    pub item: RankedItem,
}

impl RankedResult<'_> {
    pub fn ranking_id(&self) -> String {
        match self.item {
            RankedItem::Result => self.result.result_id.to_string(),
            RankedItem::Person(person_id) => format!("{}_{}", self.result.result_id, person_id),
            RankedItem::Attempt { index, .. } => format!("{}_{}", self.result.result_id, index + 1),
        }
    }
}

/// Ranks the results of one event.
///
/// Rows are ordered by value, then by date, and share a rank when their values are
/// equal (1, 1, 3). Every row whose rank is within `top_n` is kept, so ties at the
/// boundary may return more than `top_n` rows. `top_n` is capped at [`MAX_RANKING_ROWS`].
pub fn rank_results<'a>(
    results: &'a [EventResult],
    event: &Event,
    query: &RankingQuery,
) -> Vec<RankedResult<'a>> {
    let qualifying = results.iter().filter(|r| query.includes(r, event));

    let mut rows: Vec<RankedResult<'a>> = match (query.mode, query.metric) {
        (RankingMode::Persons, metric) => personal_bests(qualifying, metric),
        (RankingMode::Results, Metric::Single) => qualifying
            .flat_map(|result| {
                result
                    .attempts
                    .iter()
                    .enumerate()
                    .filter(|(_, attempt)| attempt.is_valid())
                    .map(move |(index, attempt)| RankedResult {
                        rank: 0,
                        value: attempt.result,
                        result,
                        item: RankedItem::Attempt {
                            index,
                            memo: attempt.memo,
                        },
                    })
            })
            .collect(),
        (RankingMode::Results, Metric::Average) => qualifying
            .map(|result| RankedResult {
                rank: 0,
                value: result.average,
                result,
                item: RankedItem::Result,
            })
            .collect(),
    };

    rows.sort_by(|a, b| {
        a.value
            .cmp(&b.value)
            .then(a.result.date.cmp(&b.result.date))
            .then(a.result.result_id.cmp(&b.result.result_id))
            .then(a.item.cmp(&b.item))
    });

    let values: Vec<i64> = rows.iter().map(|r| r.value).collect();
    for (row, rank) in rows.iter_mut().zip(competition_ranks(&values)) {
        row.rank = rank;
    }

    let top_n = query.top_n.min(MAX_RANKING_ROWS);
    rows.retain(|r| r.rank <= top_n);
    rows
}

/// Standard competition ranking of values sorted in ascending order
pub fn competition_ranks(sorted_values: &[i64]) -> Vec<u32> {
    let mut ranks: Vec<u32> = Vec::with_capacity(sorted_values.len());

    for (position, value) in sorted_values.iter().enumerate() {
        let rank = match position {
            0 => 1,
            _ if sorted_values[position - 1] == *value => ranks[position - 1],
            _ => position as u32 + 1,
        };
        ranks.push(rank);
    }

    ranks
}

/// Keeps the best result of every participant, earliest one first on equal values
fn personal_bests<'a>(
    results: impl Iterator<Item = &'a EventResult>,
    metric: Metric,
) -> Vec<RankedResult<'a>> {
    let mut bests: HashMap<i32, RankedResult<'a>> = HashMap::new();

    for result in results {
        let value = result.value(metric);

        for person_id in &result.person_ids {
            let is_better = match bests.get(person_id) {
                None => true,
                Some(current) => {
                    (value, result.date, result.result_id)
                        < (current.value, current.result.date, current.result.result_id)
                }
            };

            if is_better {
                bests.insert(
                    *person_id,
                    RankedResult {
                        rank: 0,
                        value,
                        result,
                        item: RankedItem::Person(*person_id),
                    },
                );
            }
        }
    }

    bests.into_values().collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use sqlx::types::Json;

    use super::*;
    use crate::models::{Attempt, EventFormat, RoundFormat};

    fn event() -> Event {
        Event {
            event_id: "333".to_string(),
            name: "3x3x3 Cube".to_string(),
            format: EventFormat::Time,
            default_round_format: RoundFormat::Average,
            participants: 1,
            rank: 10,
        }
    }

    fn result(result_id: i32, day: u32, person_ids: &[i32], attempts: &[i64]) -> EventResult {
        let attempts: Vec<Attempt> = attempts.iter().copied().map(Attempt::new).collect();
        let (best, average) = crate::services::metrics::compute_best_and_average(
            &attempts,
            RoundFormat::Average,
            EventFormat::Time,
        );

        EventResult {
            result_id,
            event_id: "333".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            person_ids: person_ids.to_vec(),
            attempts: Json(attempts),
            best,
            average,
            region_code: Some("US".to_string()),
            super_region_code: Some("NA".to_string()),
            record_category: RecordCategory::Competitions,
            regional_single_record: None,
            regional_average_record: None,
            approved: true,
            competition_id: None,
            video_link: None,
            discussion_link: None,
        }
    }

    fn query(metric: Metric, mode: RankingMode) -> RankingQuery {
        RankingQuery {
            metric,
            mode,
            category: None,
            region: RegionScope::World,
            top_n: 100,
        }
    }

    #[test]
    fn test_competition_ranks() {
        assert_eq!(
            competition_ranks(&[10, 10, 12, 15, 15, 15]),
            vec![1, 1, 3, 4, 4, 4]
        );
        assert!(competition_ranks(&[]).is_empty());
    }

    #[test]
    fn test_top_persons_keeps_personal_best() {
        let results = vec![
            result(1, 1, &[1], &[1000, 1100, 1200, 1300, 1400]),
            result(2, 2, &[1], &[900, 1100, 1200, 1300, 1400]),
            result(3, 3, &[2], &[950, 1000, 1000, 1000, 1000]),
        ];

        let rows = rank_results(&results, &event(), &query(Metric::Single, RankingMode::Persons));
        let summary: Vec<(u32, String, i64)> = rows
            .iter()
            .map(|r| (r.rank, r.ranking_id(), r.value))
            .collect();

        assert_eq!(
            summary,
            vec![(1, "2_1".to_string(), 900), (2, "3_2".to_string(), 950)]
        );
    }

    #[test]
    fn test_personal_best_tie_goes_to_earliest_result() {
        let results = vec![
            result(5, 9, &[1], &[900, 1000, 1000, 1000, 1000]),
            result(4, 2, &[1], &[900, 1100, 1100, 1100, 1100]),
        ];

        let rows = rank_results(&results, &event(), &query(Metric::Single, RankingMode::Persons));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].result.result_id, 4);
    }

    #[test]
    fn test_team_result_ranks_every_participant() {
        let results = vec![result(1, 1, &[7, 8], &[500, 600, 700, 800, 900])];

        let rows = rank_results(&results, &event(), &query(Metric::Average, RankingMode::Persons));
        let ids: Vec<String> = rows.iter().map(|r| r.ranking_id()).collect();
        assert_eq!(ids, vec!["1_7".to_string(), "1_8".to_string()]);
        assert!(rows.iter().all(|r| r.rank == 1 && r.value == 700));
    }

    #[test]
    fn test_top_singles_are_attempt_level() {
        let mut results = vec![
            result(1, 1, &[1], &[1000, 800, 1200, -1, 900]),
            result(2, 2, &[2], &[850, 1100, 1200, 1300, 1400]),
        ];
        results[1].attempts.0[0] = Attempt::with_memo(850, 3000);

        let rows = rank_results(&results, &event(), &query(Metric::Single, RankingMode::Results));
        let summary: Vec<(u32, String, i64)> = rows
            .iter()
            .take(4)
            .map(|r| (r.rank, r.ranking_id(), r.value))
            .collect();

        assert_eq!(rows.len(), 9);
        assert_eq!(
            summary,
            vec![
                (1, "1_2".to_string(), 800),
                (2, "2_1".to_string(), 850),
                (3, "1_5".to_string(), 900),
                (4, "1_1".to_string(), 1000),
            ]
        );
        assert_eq!(
            rows[1].item,
            RankedItem::Attempt {
                index: 0,
                memo: Some(3000)
            }
        );
    }

    #[test]
    fn test_top_averages_one_row_per_result() {
        let results = vec![
            result(1, 1, &[1], &[1000, 1000, 1000, 1000, 1000]),
            result(2, 2, &[1], &[900, 900, 900, 900, 900]),
            result(3, 3, &[2], &[1000, 1000, 1000, 1000, 1000]),
        ];

        let rows = rank_results(&results, &event(), &query(Metric::Average, RankingMode::Results));
        let summary: Vec<(u32, i32)> = rows.iter().map(|r| (r.rank, r.result.result_id)).collect();
        assert_eq!(summary, vec![(1, 2), (2, 1), (2, 3)]);
    }

    #[test]
    fn test_top_n_keeps_boundary_ties() {
        let values = [100, 100, 200, 200, 300, 300, 400];
        let results: Vec<EventResult> = values
            .iter()
            .enumerate()
            .map(|(i, v)| result(i as i32 + 1, i as u32 + 1, &[i as i32 + 1], &[*v, *v, *v, *v, *v]))
            .collect();

        let mut q = query(Metric::Single, RankingMode::Persons);
        q.top_n = 3;
        let rows = rank_results(&results, &event(), &q);
        assert_eq!(
            rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 1, 3, 3]
        );

        q.top_n = 5;
        let rows = rank_results(&results, &event(), &q);
        assert_eq!(
            rows.iter().map(|r| r.rank).collect::<Vec<_>>(),
            vec![1, 1, 3, 3, 5, 5]
        );
    }

    #[test]
    fn test_ties_ordered_by_date() {
        let results = vec![
            result(1, 20, &[1], &[500, 600, 600, 600, 600]),
            result(2, 10, &[2], &[500, 700, 700, 700, 700]),
        ];

        let rows = rank_results(&results, &event(), &query(Metric::Single, RankingMode::Persons));
        assert_eq!(rows[0].result.result_id, 2);
        assert_eq!(rows[1].result.result_id, 1);
        assert!(rows.iter().all(|r| r.rank == 1));
    }

    #[test]
    fn test_filters() {
        let mut results = vec![
            result(1, 1, &[1], &[1000, 1000, 1000, 1000, 1000]),
            result(2, 1, &[2], &[900, 900, 900, 900, 900]),
            result(3, 1, &[3], &[800, 800, 800, 800, 800]),
            result(4, 1, &[4], &[700, 700, 700, 700, 700]),
            result(5, 1, &[5], &[600, 600, 600, 600, 600]),
        ];
        results[1].approved = false;
        results[2].record_category = RecordCategory::Meetups;
        results[3].region_code = Some("DE".to_string());
        results[3].super_region_code = Some("EU".to_string());
        results[4].event_id = "444".to_string();

        let mut q = query(Metric::Single, RankingMode::Persons);
        q.category = Some(RecordCategory::Competitions);
        let ids: Vec<i32> = rank_results(&results, &event(), &q)
            .iter()
            .map(|r| r.result.result_id)
            .collect();
        assert_eq!(ids, vec![4, 1]);

        q.region = RegionScope::parse("US").unwrap();
        let ids: Vec<i32> = rank_results(&results, &event(), &q)
            .iter()
            .map(|r| r.result.result_id)
            .collect();
        assert_eq!(ids, vec![1]);

        q.category = None;
        q.region = RegionScope::parse("NA").unwrap();
        let ids: Vec<i32> = rank_results(&results, &event(), &q)
            .iter()
            .map(|r| r.result.result_id)
            .collect();
        assert_eq!(ids, vec![3, 1]);

        q.region = RegionScope::parse("EU").unwrap();
        let ids: Vec<i32> = rank_results(&results, &event(), &q)
            .iter()
            .map(|r| r.result.result_id)
            .collect();
        assert_eq!(ids, vec![4]);
    }

    #[test]
    fn test_dnf_attempt_keeps_average_eligible() {
        let results = vec![result(1, 1, &[1], &[1000, -1, 1100, 1200, 1300])];

        let singles = rank_results(&results, &event(), &query(Metric::Single, RankingMode::Results));
        let ids: Vec<String> = singles.iter().map(|r| r.ranking_id()).collect();
        assert_eq!(ids, vec!["1_1", "1_3", "1_4", "1_5"]);

        let averages = rank_results(&results, &event(), &query(Metric::Average, RankingMode::Persons));
        assert_eq!(averages.len(), 1);
        assert_eq!(averages[0].value, 1200);
    }

    #[test]
    fn test_top_n_is_capped() {
        let results: Vec<EventResult> = (0..MAX_RANKING_ROWS as i32 + 10)
            .map(|i| {
                let time = 1000 + i as i64;
                result(i + 1, 1, &[i + 1], &[time, time, time, time, time])
            })
            .collect();

        let mut q = query(Metric::Average, RankingMode::Results);
        q.top_n = 1_000_000;

        let rows = rank_results(&results, &event(), &q);
        assert_eq!(rows.len(), MAX_RANKING_ROWS as usize);
        assert_eq!(rows.last().map(|r| r.rank), Some(MAX_RANKING_ROWS));
    }

    #[test]
    fn test_incomplete_average_is_not_ranked() {
        let mut partial = result(1, 1, &[1], &[1000, 1000, 1000, 0, 0]);
        partial.average = 1000;
        let results = vec![partial];

        let rows = rank_results(&results, &event(), &query(Metric::Average, RankingMode::Results));
        assert!(rows.is_empty());
    }
}
