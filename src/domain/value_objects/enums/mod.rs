pub mod assignment_statuses;
pub mod billing_durations;
pub mod discount_statuses;
pub mod plan_statuses;
pub mod user_statuses;
