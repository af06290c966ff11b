//! Company directory search.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Selector value that matches every industry or tier.
pub const ANY_CHOICE: &str = "All";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyListing {
    pub id: Uuid,
    pub name: String,
    pub industry: String,
    pub location: String,
    pub tier: String,
    #[serde(default)]
    pub post_count: u32,
}

/// Directory search box plus the industry and tier selectors.
///
/// `None` and `"All"` both leave a selector unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CompanyFilter {
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub tier: Option<String>,
}

impl CompanyFilter {
    /// Case-insensitive substring match on name or location, and exact
    /// industry and tier equality.
    #[must_use]
    pub fn matches(&self, company: &CompanyListing) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = company.name.to_lowercase().contains(&needle)
            || company.location.to_lowercase().contains(&needle);

        matches_search
            && choice_matches(self.industry.as_deref(), &company.industry)
            && choice_matches(self.tier.as_deref(), &company.tier)
    }
}

fn choice_matches(selected: Option<&str>, value: &str) -> bool {
    match selected {
        None | Some(ANY_CHOICE) => true,
        Some(selected) => selected == value,
    }
}

/// Keep the companies `filter` accepts, in input order.
#[must_use]
pub fn filter_companies(
    mut companies: Vec<CompanyListing>,
    filter: &CompanyFilter,
) -> Vec<CompanyListing> {
    let before = companies.len();
    companies.retain(|company| filter.matches(company));
    tracing::debug!(before, after = companies.len(), "filtered company directory");
    companies
}
