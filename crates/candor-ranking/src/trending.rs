//! Companies with the most posts in a recent window.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::RankingError;

pub const DEFAULT_TRENDING_LIMIT: usize = 5;

const UNKNOWN_INDUSTRY: &str = "Unknown";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendingPeriod {
    #[default]
    Week,
    Month,
}

impl TrendingPeriod {
    #[must_use]
    pub fn days(self) -> i64 {
        match self {
            TrendingPeriod::Week => 7,
            TrendingPeriod::Month => 30,
        }
    }
}

impl FromStr for TrendingPeriod {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "week" => Ok(TrendingPeriod::Week),
            "month" => Ok(TrendingPeriod::Month),
            other => Err(RankingError::UnknownPeriod(other.to_string())),
        }
    }
}

/// One post's company attribution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyActivity {
    pub company_id: Uuid,
    pub company_name: String,
    #[serde(default)]
    pub industry: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// All-time post count from the company directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTotals {
    pub company_id: Uuid,
    pub post_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendingCompany {
    pub id: Uuid,
    pub name: String,
    pub industry: String,
    pub post_count: u32,
    pub recent_post_count: u32,
}

/// Rank companies by post count within `period` before `now`.
///
/// Companies are grouped in first-seen order, so passing activity newest
/// first makes ties favor the most recently active company. Name and
/// industry come from the first row seen for each company.
#[must_use]
pub fn trending_companies(
    activity: &[CompanyActivity],
    totals: &[CompanyTotals],
    period: TrendingPeriod,
    now: DateTime<Utc>,
    limit: usize,
) -> Vec<TrendingCompany> {
    let threshold = now - Duration::days(period.days());

    let mut companies: Vec<TrendingCompany> = Vec::new();
    let mut index: HashMap<Uuid, usize> = HashMap::new();

    for row in activity.iter().filter(|row| row.created_at >= threshold) {
        let i = *index.entry(row.company_id).or_insert_with(|| {
            companies.push(TrendingCompany {
                id: row.company_id,
                name: row.company_name.clone(),
                industry: row
                    .industry
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| UNKNOWN_INDUSTRY.to_string()),
                post_count: 0,
                recent_post_count: 0,
            });
            companies.len() - 1
        });
        companies[i].recent_post_count += 1;
    }

    let total_by_id: HashMap<Uuid, u32> = totals
        .iter()
        .map(|t| (t.company_id, t.post_count))
        .collect();
    for company in &mut companies {
        company.post_count = total_by_id.get(&company.id).copied().unwrap_or(0);
    }

    companies.sort_by(|a, b| b.recent_post_count.cmp(&a.recent_post_count));
    companies.truncate(limit);

    tracing::debug!(
        period = ?period,
        activity = activity.len(),
        returned = companies.len(),
        "computed trending companies"
    );

    companies
}
