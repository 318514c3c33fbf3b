use std::collections::{BTreeSet, HashMap};

use sqlx::PgPool;

use crate::dto::ranking::{ContestInfo, PersonInfo, RankingEntry, RankingFilter, RankingMode};
use crate::error::{Result, StorageError};
use crate::models::{Contest, EventResult, Metric, Person, RegionScope};
use crate::repository::contest::ContestRepository;
use crate::repository::event::EventRepository;
use crate::repository::person::PersonRepository;
use crate::repository::result::ResultRepository;
use crate::services::ranking_engine::{RankedItem, RankingQuery, rank_results};

pub struct RankingRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RankingRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn get_rankings(
        &self,
        event_id: &str,
        metric: Metric,
        filter: &RankingFilter,
    ) -> Result<Vec<RankingEntry>> {
        filter.validate().map_err(StorageError::InvalidInput)?;

        let region = match filter.region.as_deref() {
            Some(code) => RegionScope::parse(code)?,
            None => RegionScope::World,
        };

        let event = EventRepository::new(self.pool).find_by_id(event_id).await?;

        let query = RankingQuery {
            metric,
            mode: filter.show,
            category: filter.category.record_category(),
            region,
            top_n: filter.top_n,
        };

        let results = ResultRepository::new(self.pool)
            .fetch_for_ranking(event_id, metric, query.category, region)
            .await?;

        let ranked = rank_results(&results, &event, &query);
        let lookups = Lookups::load(self.pool, ranked.iter().map(|r| r.result)).await?;

        let entries = ranked
            .into_iter()
            .map(|row| {
                let (person_id, memo) = match row.item {
                    RankedItem::Person(person_id) => (Some(person_id), None),
                    RankedItem::Attempt { memo, .. } => (None, memo),
                    RankedItem::Result => (None, None),
                };
                let attempts = match (query.mode, metric) {
                    (RankingMode::Results, Metric::Single) => Vec::new(),
                    _ => row.result.attempts.0.clone(),
                };

                RankingEntry {
                    ranking_id: row.ranking_id(),
                    rank: row.rank,
                    date: row.result.date,
                    person_id,
                    persons: lookups.persons_of(row.result),
                    result: row.value,
                    memo,
                    attempts,
                    contest: lookups.contest_of(row.result),
                    video_link: row.result.video_link.clone(),
                    discussion_link: row.result.discussion_link.clone(),
                }
            })
            .collect();

        Ok(entries)
    }
}

/// Participants and contests referenced by a set of results
pub(crate) struct Lookups {
    persons: HashMap<i32, Person>,
    contests: HashMap<String, Contest>,
}

impl Lookups {
    pub(crate) async fn load<'r>(
        pool: &PgPool,
        results: impl Iterator<Item = &'r EventResult>,
    ) -> Result<Self> {
        let mut person_ids = BTreeSet::new();
        let mut competition_ids = BTreeSet::new();

        for result in results {
            person_ids.extend(result.person_ids.iter().copied());
            if let Some(ref competition_id) = result.competition_id {
                competition_ids.insert(competition_id.clone());
            }
        }

        let person_ids: Vec<i32> = person_ids.into_iter().collect();
        let competition_ids: Vec<String> = competition_ids.into_iter().collect();

        Ok(Self {
            persons: PersonRepository::new(pool).find_by_ids(&person_ids).await?,
            contests: ContestRepository::new(pool)
                .find_by_ids(&competition_ids)
                .await?,
        })
    }

    pub(crate) fn persons_of(&self, result: &EventResult) -> Vec<PersonInfo> {
        result
            .person_ids
            .iter()
            .filter_map(|id| self.persons.get(id))
            .map(|p| PersonInfo {
                person_id: p.person_id,
                name: p.name.clone(),
                localized_name: p.localized_name.clone(),
                region_code: p.region_code.clone(),
                wca_id: p.wca_id.clone(),
            })
            .collect()
    }

    pub(crate) fn contest_of(&self, result: &EventResult) -> Option<ContestInfo> {
        let contest = self.contests.get(result.competition_id.as_deref()?)?;

        Some(ContestInfo {
            competition_id: contest.competition_id.clone(),
            short_name: contest.short_name.clone(),
            contest_type: contest.contest_type,
            region_code: contest.region_code.clone(),
        })
    }
}
