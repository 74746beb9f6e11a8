pub mod authentication;
pub mod dashboard;
pub mod discounts;
pub mod plans;
pub mod search;
pub mod user_subscriptions;
pub mod users;
