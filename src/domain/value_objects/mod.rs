pub mod dashboard;
pub mod discounts;
pub mod enums;
pub mod iam;
pub mod money;
pub mod plans;
pub mod pricing;
pub mod search;
pub mod user_subscriptions;
pub mod users;
pub mod validation;
