use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use crate::{
    application::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::{
            plans::PlanRepository, user_subscriptions::UserSubscriptionRepository,
            users::UserRepository,
        },
        value_objects::dashboard::{CHART_MONTHS, DashboardStatsDto, SubscriptionChartDto},
    },
};

pub struct DashboardUseCase<U, P, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    plan_repository: Arc<P>,
    user_subscription_repository: Arc<S>,
}

impl<U, P, S> DashboardUseCase<U, P, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        plan_repository: Arc<P>,
        user_subscription_repository: Arc<S>,
    ) -> Self {
        Self {
            user_repository,
            plan_repository,
            user_subscription_repository,
        }
    }

    pub async fn stats(&self) -> UseCaseResult<DashboardStatsDto> {
        let users = self.user_repository.list_users().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load users");
            UseCaseError::Internal(err)
        })?;
        let plans = self.plan_repository.list_plans().await.map_err(|err| {
            error!(db_error = ?err, "dashboard: failed to load plans");
            UseCaseError::Internal(err)
        })?;
        let assignments = self
            .user_subscription_repository
            .list_all()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to load assignments");
                UseCaseError::Internal(err)
            })?;

        let stats = DashboardStatsDto::compute(&users, &plans, &assignments);
        info!(
            active_subscriptions = stats.active_subscriptions,
            monthly_revenue = %stats.monthly_revenue,
            "dashboard: stats computed"
        );
        Ok(stats)
    }

    pub async fn subscription_chart(&self, today: NaiveDate) -> UseCaseResult<SubscriptionChartDto> {
        let assignments = self
            .user_subscription_repository
            .list_all()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "dashboard: failed to load assignments");
                UseCaseError::Internal(err)
            })?;

        Ok(SubscriptionChartDto::bucket(today, CHART_MONTHS, &assignments))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            plans::PlanEntity,
            user_subscriptions::{AppliedDiscount, QuoteStamp, UserSubscriptionEntity},
        },
        repositories::{
            plans::MockPlanRepository, user_subscriptions::MockUserSubscriptionRepository,
            users::MockUserRepository,
        },
        value_objects::enums::{
            assignment_statuses::AssignmentStatus, billing_durations::BillingDuration,
            plan_statuses::PlanStatus,
        },
    };
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn assignment(plan_id: Uuid, status: AssignmentStatus, month: u32) -> UserSubscriptionEntity {
        UserSubscriptionEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            plan_id,
            duration: BillingDuration::OneMonth,
            status,
            applied_discount: AppliedDiscount::None,
            quote: QuoteStamp {
                original_price: dec!(500),
                total_discount: dec!(0),
                final_price: dec!(500),
                discount_percentage: dec!(0),
            },
            starts_at: Utc.with_ymd_and_hms(2026, month, 5, 9, 0, 0).unwrap(),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn stats_sum_plan_prices_of_active_assignments() {
        let plan = PlanEntity {
            id: Uuid::new_v4(),
            plan_name: "Basic".to_string(),
            price: dec!(500),
            features: vec!["SD".to_string()],
            duration: BillingDuration::OneMonth,
            status: PlanStatus::Active,
            default_discount_id: None,
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            created_at: Utc::now(),
        };
        let assignments = vec![
            assignment(plan.id, AssignmentStatus::Active, 9),
            assignment(plan.id, AssignmentStatus::Active, 10),
            assignment(plan.id, AssignmentStatus::Inactive, 8),
            assignment(Uuid::new_v4(), AssignmentStatus::Active, 10),
        ];

        let mut user_repository = MockUserRepository::new();
        user_repository
            .expect_list_users()
            .returning(|| Box::pin(async { Ok(Vec::new()) }));
        let mut plan_repository = MockPlanRepository::new();
        plan_repository.expect_list_plans().returning(move || {
            let plans = vec![plan.clone()];
            Box::pin(async move { Ok(plans) })
        });
        let mut user_subscription_repository = MockUserSubscriptionRepository::new();
        user_subscription_repository
            .expect_list_all()
            .returning(move || {
                let assignments = assignments.clone();
                Box::pin(async move { Ok(assignments) })
            });

        let usecase = DashboardUseCase::new(
            Arc::new(user_repository),
            Arc::new(plan_repository),
            Arc::new(user_subscription_repository),
        );
        let stats = usecase.stats().await.unwrap();

        assert_eq!(stats.total_subscriptions, 4);
        assert_eq!(stats.active_subscriptions, 3);
        assert_eq!(stats.monthly_revenue, dec!(1000));
        assert_eq!(stats.annual_revenue, dec!(12000));
    }

    #[tokio::test]
    async fn chart_covers_six_months() {
        let assignments = vec![
            assignment(Uuid::new_v4(), AssignmentStatus::Active, 10),
            assignment(Uuid::new_v4(), AssignmentStatus::Inactive, 10),
            assignment(Uuid::new_v4(), AssignmentStatus::Active, 2),
        ];

        let mut user_subscription_repository = MockUserSubscriptionRepository::new();
        user_subscription_repository
            .expect_list_all()
            .returning(move || {
                let assignments = assignments.clone();
                Box::pin(async move { Ok(assignments) })
            });

        let usecase = DashboardUseCase::new(
            Arc::new(MockUserRepository::new()),
            Arc::new(MockPlanRepository::new()),
            Arc::new(user_subscription_repository),
        );
        let chart = usecase
            .subscription_chart(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
            .await
            .unwrap();

        assert_eq!(chart.months.len(), 6);
        assert_eq!(chart.months[0].label, "May 2026");
        let october = &chart.months[5];
        assert_eq!(october.label, "Oct 2026");
        assert_eq!((october.total, october.active), (2, 1));
        assert_eq!(chart.months.iter().map(|month| month.total).sum::<usize>(), 2);
    }
}
