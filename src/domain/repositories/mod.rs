pub mod admins;
pub mod discounts;
pub mod plans;
pub mod user_subscriptions;
pub mod users;
