use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::{
    entities::{plans::PlanEntity, user_subscriptions::UserSubscriptionEntity, users::UserEntity},
    value_objects::enums::{
        assignment_statuses::AssignmentStatus, plan_statuses::PlanStatus,
        user_statuses::UserStatus,
    },
};

pub const CHART_MONTHS: u32 = 6;

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DashboardStatsDto {
    pub total_users: usize,
    pub active_users: usize,
    pub total_plans: usize,
    pub active_plans: usize,
    pub total_subscriptions: usize,
    pub active_subscriptions: usize,
    pub monthly_revenue: Decimal,
    pub annual_revenue: Decimal,
}

impl DashboardStatsDto {
    /// Revenue counts the monthly price of the plan behind every active
    /// assignment; assignments whose plan was deleted contribute nothing.
    pub fn compute(
        users: &[UserEntity],
        plans: &[PlanEntity],
        assignments: &[UserSubscriptionEntity],
    ) -> Self {
        let prices: HashMap<Uuid, Decimal> =
            plans.iter().map(|plan| (plan.id, plan.price)).collect();

        let active_assignments: Vec<&UserSubscriptionEntity> = assignments
            .iter()
            .filter(|assignment| assignment.status == AssignmentStatus::Active)
            .collect();

        let monthly_revenue: Decimal = active_assignments
            .iter()
            .filter_map(|assignment| prices.get(&assignment.plan_id))
            .sum();

        Self {
            total_users: users.len(),
            active_users: users
                .iter()
                .filter(|user| user.status == UserStatus::Active)
                .count(),
            total_plans: plans.len(),
            active_plans: plans
                .iter()
                .filter(|plan| plan.status == PlanStatus::Active)
                .count(),
            total_subscriptions: assignments.len(),
            active_subscriptions: active_assignments.len(),
            monthly_revenue,
            annual_revenue: monthly_revenue * Decimal::from(12),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MonthlySubscriptionCount {
    pub label: String,
    pub total: usize,
    pub active: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubscriptionChartDto {
    pub months: Vec<MonthlySubscriptionCount>,
}

impl SubscriptionChartDto {
    /// Counts assignments by start month over the `months` calendar months
    /// ending with the month of `today`, oldest first.
    pub fn bucket(today: NaiveDate, months: u32, assignments: &[UserSubscriptionEntity]) -> Self {
        let current_month = today.with_day(1).unwrap_or(today);

        let mut buckets: Vec<((i32, u32), MonthlySubscriptionCount)> = (0..months)
            .rev()
            .filter_map(|offset| current_month.checked_sub_months(Months::new(offset)))
            .map(|month| {
                (
                    (month.year(), month.month()),
                    MonthlySubscriptionCount {
                        label: month.format("%b %Y").to_string(),
                        total: 0,
                        active: 0,
                    },
                )
            })
            .collect();

        for assignment in assignments {
            let started = assignment.starts_at.date_naive();
            let key = (started.year(), started.month());
            if let Some((_, count)) = buckets.iter_mut().find(|(month, _)| *month == key) {
                count.total += 1;
                if assignment.status == AssignmentStatus::Active {
                    count.active += 1;
                }
            }
        }

        Self {
            months: buckets.into_iter().map(|(_, count)| count).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::user_subscriptions::{AppliedDiscount, QuoteStamp},
        value_objects::enums::billing_durations::BillingDuration,
    };
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn assignment(plan_id: Uuid, status: AssignmentStatus, y: i32, m: u32) -> UserSubscriptionEntity {
        let starts_at = Utc.with_ymd_and_hms(y, m, 15, 10, 0, 0).unwrap();
        UserSubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id,
            duration: BillingDuration::OneMonth,
            status,
            applied_discount: AppliedDiscount::None,
            quote: QuoteStamp {
                original_price: dec!(100),
                total_discount: dec!(0),
                final_price: dec!(100),
                discount_percentage: dec!(0),
            },
            starts_at,
            created_at: starts_at,
        }
    }

    fn plan(price: Decimal, status: PlanStatus) -> PlanEntity {
        PlanEntity {
            id: Uuid::new_v4(),
            plan_name: "Plan".to_string(),
            price,
            features: vec!["Feature".to_string()],
            duration: BillingDuration::OneMonth,
            status,
            default_discount_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            created_at: Utc::now(),
        }
    }

    fn user(status: UserStatus) -> UserEntity {
        UserEntity {
            id: Uuid::new_v4(),
            full_name: "User".to_string(),
            email: "user@example.com".to_string(),
            username: "user".to_string(),
            mobile_number: String::new(),
            device_id: None,
            status,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn revenue_sums_active_assignments_with_existing_plans() {
        let basic = plan(dec!(199), PlanStatus::Active);
        let gold = plan(dec!(499), PlanStatus::Inactive);
        let users = vec![user(UserStatus::Active), user(UserStatus::Inactive)];
        let assignments = vec![
            assignment(basic.id, AssignmentStatus::Active, 2026, 9),
            assignment(gold.id, AssignmentStatus::Active, 2026, 9),
            assignment(gold.id, AssignmentStatus::Inactive, 2026, 8),
            assignment(Uuid::new_v4(), AssignmentStatus::Active, 2026, 7),
        ];

        let stats = DashboardStatsDto::compute(&users, &[basic, gold], &assignments);

        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.active_users, 1);
        assert_eq!(stats.total_plans, 2);
        assert_eq!(stats.active_plans, 1);
        assert_eq!(stats.total_subscriptions, 4);
        assert_eq!(stats.active_subscriptions, 3);
        assert_eq!(stats.monthly_revenue, dec!(698));
        assert_eq!(stats.annual_revenue, dec!(8376));
    }

    #[test]
    fn chart_covers_last_six_months_oldest_first() {
        let today = NaiveDate::from_ymd_opt(2026, 2, 20).unwrap();
        let plan_id = Uuid::new_v4();
        let assignments = vec![
            assignment(plan_id, AssignmentStatus::Active, 2026, 2),
            assignment(plan_id, AssignmentStatus::Inactive, 2026, 2),
            assignment(plan_id, AssignmentStatus::Active, 2025, 9),
            assignment(plan_id, AssignmentStatus::Active, 2025, 8),
            assignment(plan_id, AssignmentStatus::Active, 2026, 3),
        ];

        let chart = SubscriptionChartDto::bucket(today, CHART_MONTHS, &assignments);
        let labels: Vec<&str> = chart.months.iter().map(|m| m.label.as_str()).collect();

        assert_eq!(
            labels,
            vec!["Sep 2025", "Oct 2025", "Nov 2025", "Dec 2025", "Jan 2026", "Feb 2026"]
        );
        assert_eq!(chart.months[0].total, 1);
        assert_eq!(chart.months[0].active, 1);
        assert_eq!(chart.months[5].total, 2);
        assert_eq!(chart.months[5].active, 1);
        assert_eq!(chart.months.iter().map(|m| m.total).sum::<usize>(), 3);
    }
}
