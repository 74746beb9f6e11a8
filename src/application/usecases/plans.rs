use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::errors::{UseCaseError, UseCaseResult, is_unique_violation},
    domain::{
        repositories::{discounts::DiscountRepository, plans::PlanRepository},
        value_objects::plans::{InsertPlanModel, PlanDto},
    },
};

pub struct PlanUseCase<P, D>
where
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
{
    plan_repository: Arc<P>,
    discount_repository: Arc<D>,
}

impl<P, D> PlanUseCase<P, D>
where
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
{
    pub fn new(plan_repository: Arc<P>, discount_repository: Arc<D>) -> Self {
        Self {
            plan_repository,
            discount_repository,
        }
    }

    pub async fn create_plan(&self, insert_plan_model: InsertPlanModel) -> UseCaseResult<PlanDto> {
        info!(
            plan_name = %insert_plan_model.plan_name.trim(),
            "plans: create requested"
        );

        let insert_plan_entity = insert_plan_model
            .validate(Utc::now().date_naive())
            .map_err(|err| {
                warn!(error = %err, "plans: invalid plan form");
                UseCaseError::from(err)
            })?;

        let name_taken = self
            .plan_repository
            .exists_by_name(insert_plan_entity.plan_name.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "plans: failed to check plan name");
                UseCaseError::Internal(err)
            })?;
        if name_taken {
            warn!(plan_name = %insert_plan_entity.plan_name, "plans: duplicate plan name");
            return Err(UseCaseError::Conflict(
                "A plan with this name already exists".to_string(),
            ));
        }

        if let Some(discount_id) = insert_plan_entity.default_discount_id {
            let discount = self
                .discount_repository
                .find_active_by_id(discount_id)
                .await
                .map_err(|err| {
                    error!(%discount_id, db_error = ?err, "plans: failed to load default discount");
                    UseCaseError::Internal(err)
                })?;
            if discount.is_none() {
                warn!(%discount_id, "plans: default discount is missing or inactive");
                return Err(UseCaseError::NotFound("discount"));
            }
        }

        let plan = self
            .plan_repository
            .create(insert_plan_entity)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(db_error = ?err, "plans: plan name taken concurrently");
                    return UseCaseError::Conflict(
                        "A plan with this name already exists".to_string(),
                    );
                }
                error!(db_error = ?err, "plans: failed to insert plan");
                UseCaseError::Internal(err)
            })?;

        info!(plan_id = %plan.id, "plans: plan created");
        Ok(PlanDto::from(plan))
    }

    pub async fn list_plans(&self) -> UseCaseResult<Vec<PlanDto>> {
        let plans = self.plan_repository.list_plans().await.map_err(|err| {
            error!(db_error = ?err, "plans: failed to list plans");
            UseCaseError::Internal(err)
        })?;

        info!(plan_count = plans.len(), "plans: plans loaded");
        Ok(plans.into_iter().map(PlanDto::from).collect())
    }

    /// Returns the plan list as it stands after the delete.
    pub async fn delete_plan(&self, plan_id: Uuid) -> UseCaseResult<Vec<PlanDto>> {
        info!(%plan_id, "plans: delete requested");

        let deleted = self.plan_repository.delete(plan_id).await.map_err(|err| {
            error!(%plan_id, db_error = ?err, "plans: failed to delete plan");
            UseCaseError::Internal(err)
        })?;
        if !deleted {
            warn!(%plan_id, "plans: plan to delete not found");
            return Err(UseCaseError::NotFound("plan"));
        }

        self.list_plans().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::{
            discounts::DiscountEntity,
            plans::{InsertPlanEntity, PlanEntity},
        },
        repositories::{discounts::MockDiscountRepository, plans::MockPlanRepository},
        value_objects::{
            enums::{
                billing_durations::BillingDuration, discount_statuses::DiscountStatus,
                plan_statuses::PlanStatus,
            },
            money,
            plans::FeaturesInput,
            pricing::DiscountPercentage,
        },
    };
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    fn plan_from(insert: &InsertPlanEntity) -> PlanEntity {
        PlanEntity {
            id: Uuid::new_v4(),
            plan_name: insert.plan_name.clone(),
            price: money::from_minor_units(insert.price_minor),
            features: serde_json::from_value(insert.features.clone()).unwrap(),
            duration: BillingDuration::try_from(insert.duration_months).unwrap(),
            status: PlanStatus::from_str(&insert.status).unwrap(),
            default_discount_id: insert.default_discount_id,
            start_date: insert.start_date,
            created_at: Utc::now(),
        }
    }

    fn form(default_discount_id: Option<Uuid>) -> InsertPlanModel {
        InsertPlanModel {
            plan_name: "Gold ".to_string(),
            price: Some(dec!(499)),
            features: FeaturesInput::Text("HD, Downloads".to_string()),
            duration: Some(3),
            status: PlanStatus::Active,
            start_date: None,
            default_discount_id,
        }
    }

    #[tokio::test]
    async fn creates_plan_with_trimmed_name() {
        let mut plan_repository = MockPlanRepository::new();
        let discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_exists_by_name()
            .with(eq("Gold".to_string()))
            .returning(|_| Box::pin(async { Ok(false) }));
        plan_repository
            .expect_create()
            .times(1)
            .returning(|insert| {
                let plan = plan_from(&insert);
                Box::pin(async move { Ok(plan) })
            });

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let plan = usecase.create_plan(form(None)).await.unwrap();

        assert_eq!(plan.plan_name, "Gold");
        assert_eq!(plan.price, dec!(499));
        assert_eq!(plan.formatted_price, "₹499");
        assert_eq!(plan.features, vec!["HD", "Downloads"]);
    }

    #[tokio::test]
    async fn rejects_duplicate_plan_name() {
        let mut plan_repository = MockPlanRepository::new();
        let discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_exists_by_name()
            .returning(|_| Box::pin(async { Ok(true) }));
        plan_repository.expect_create().never();

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let err = usecase.create_plan(form(None)).await.unwrap_err();

        assert!(matches!(err, UseCaseError::Conflict(_)));
        assert_eq!(err.to_string(), "A plan with this name already exists");
    }

    #[tokio::test]
    async fn duplicate_name_lost_at_insert_is_a_conflict() {
        let mut plan_repository = MockPlanRepository::new();
        let discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_exists_by_name()
            .returning(|_| Box::pin(async { Ok(false) }));
        plan_repository.expect_create().times(1).returning(|_| {
            Box::pin(async {
                Err(anyhow::Error::from(diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    Box::new("plans_plan_name_key".to_string()),
                )))
            })
        });

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let err = usecase.create_plan(form(None)).await.unwrap_err();

        assert!(matches!(err, UseCaseError::Conflict(_)));
        assert_eq!(err.to_string(), "A plan with this name already exists");
    }

    #[tokio::test]
    async fn invalid_form_never_reaches_the_repository() {
        let plan_repository = MockPlanRepository::new();
        let discount_repository = MockDiscountRepository::new();

        let mut model = form(None);
        model.price = None;

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let err = usecase.create_plan(model).await.unwrap_err();

        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn default_discount_must_be_active() {
        let discount_id = Uuid::new_v4();
        let mut plan_repository = MockPlanRepository::new();
        let mut discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_exists_by_name()
            .returning(|_| Box::pin(async { Ok(false) }));
        discount_repository
            .expect_find_active_by_id()
            .with(eq(discount_id))
            .returning(|_| Box::pin(async { Ok(None) }));
        plan_repository.expect_create().never();

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let err = usecase.create_plan(form(Some(discount_id))).await.unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("discount")));
    }

    #[tokio::test]
    async fn accepts_active_default_discount() {
        let discount_id = Uuid::new_v4();
        let mut plan_repository = MockPlanRepository::new();
        let mut discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_exists_by_name()
            .returning(|_| Box::pin(async { Ok(false) }));
        discount_repository
            .expect_find_active_by_id()
            .with(eq(discount_id))
            .returning(move |_| {
                let discount = DiscountEntity {
                    id: discount_id,
                    name: "Launch".to_string(),
                    percentage: DiscountPercentage::new(dec!(5)).unwrap(),
                    description: None,
                    status: DiscountStatus::Active,
                    created_at: Utc::now(),
                };
                Box::pin(async move { Ok(Some(discount)) })
            });
        plan_repository.expect_create().returning(|insert| {
            let plan = plan_from(&insert);
            Box::pin(async move { Ok(plan) })
        });

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let plan = usecase.create_plan(form(Some(discount_id))).await.unwrap();

        assert_eq!(plan.default_discount_id, Some(discount_id));
    }

    #[tokio::test]
    async fn delete_returns_refreshed_list() {
        let plan_id = Uuid::new_v4();
        let mut plan_repository = MockPlanRepository::new();
        let discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_delete()
            .with(eq(plan_id))
            .times(1)
            .returning(|_| Box::pin(async { Ok(true) }));
        plan_repository
            .expect_list_plans()
            .times(1)
            .returning(|| Box::pin(async { Ok(Vec::new()) }));

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let plans = usecase.delete_plan(plan_id).await.unwrap();

        assert!(plans.is_empty());
    }

    #[tokio::test]
    async fn delete_of_unknown_plan_is_not_found() {
        let mut plan_repository = MockPlanRepository::new();
        let discount_repository = MockDiscountRepository::new();

        plan_repository
            .expect_delete()
            .returning(|_| Box::pin(async { Ok(false) }));
        plan_repository.expect_list_plans().never();

        let usecase = PlanUseCase::new(Arc::new(plan_repository), Arc::new(discount_repository));
        let err = usecase.delete_plan(Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, UseCaseError::NotFound("plan")));
    }
}
