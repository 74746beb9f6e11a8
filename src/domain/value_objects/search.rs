use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{plans::PlanEntity, users::UserEntity},
    value_objects::money,
};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchResultType {
    User,
    Plan,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SearchResult {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub result_type: SearchResultType,
    pub title: String,
    pub subtitle: String,
    pub link: &'static str,
}

/// Case-insensitive substring search. Users come before plans, and exact
/// title matches are moved to the front without reordering the rest.
pub fn search_all(term: &str, users: &[UserEntity], plans: &[PlanEntity]) -> Vec<SearchResult> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    let matches = |value: &str| value.to_lowercase().contains(&needle);

    let user_results = users
        .iter()
        .filter(|user| matches(&user.full_name) || matches(&user.username) || matches(&user.email))
        .map(|user| SearchResult {
            id: user.id,
            result_type: SearchResultType::User,
            title: user.full_name.clone(),
            subtitle: user.email.clone(),
            link: "/users",
        });

    let plan_results = plans
        .iter()
        .filter_map(|plan| {
            let formatted_price = money::format_price(plan.price);
            let hit = matches(&plan.plan_name)
                || matches(&formatted_price)
                || plan.features.iter().any(|feature| matches(feature));
            hit.then(|| SearchResult {
                id: plan.id,
                result_type: SearchResultType::Plan,
                title: plan.plan_name.clone(),
                subtitle: format!("{formatted_price} / month"),
                link: "/subscriptions",
            })
        });

    let mut results: Vec<SearchResult> = user_results.chain(plan_results).collect();
    results.sort_by_key(|result| result.title.to_lowercase() != needle);
    results
}
