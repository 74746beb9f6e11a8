use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::errors::{UseCaseError, UseCaseResult, is_unique_violation},
    domain::{
        entities::{plans::PlanEntity, user_subscriptions::InsertUserSubscriptionEntity},
        repositories::{
            discounts::DiscountRepository, plans::PlanRepository,
            user_subscriptions::UserSubscriptionRepository, users::UserRepository,
        },
        value_objects::{
            enums::{
                billing_durations::BillingDuration, plan_statuses::PlanStatus,
                user_statuses::UserStatus,
            },
            pricing::{DiscountSource, PriceQuote},
            user_subscriptions::{
                AssignSubscriptionModel, DiscountSelection, QuoteRequestModel,
                UserSubscriptionDto,
            },
        },
    },
};

pub struct UserSubscriptionUseCase<U, P, D, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    plan_repository: Arc<P>,
    discount_repository: Arc<D>,
    user_subscription_repository: Arc<S>,
}

impl<U, P, D, S> UserSubscriptionUseCase<U, P, D, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    D: DiscountRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    pub fn new(
        user_repository: Arc<U>,
        plan_repository: Arc<P>,
        discount_repository: Arc<D>,
        user_subscription_repository: Arc<S>,
    ) -> Self {
        Self {
            user_repository,
            plan_repository,
            discount_repository,
            user_subscription_repository,
        }
    }

    /// Prices a plan without recording anything.
    pub async fn quote(
        &self,
        plan_id: Uuid,
        quote_request_model: QuoteRequestModel,
    ) -> UseCaseResult<PriceQuote> {
        let plan = self.load_plan(plan_id).await?;
        let (_, _, quote) = self.price(&plan, &quote_request_model).await?;

        info!(
            %plan_id,
            final_price = %quote.final_price,
            discount_percentage = %quote.discount_percentage,
            "user_subscriptions: quote computed"
        );
        Ok(quote)
    }

    /// Replaces the user's active assignment with a new one carrying the quote
    /// as it stands right now.
    pub async fn assign(
        &self,
        user_id: Uuid,
        assign_subscription_model: AssignSubscriptionModel,
    ) -> UseCaseResult<Vec<UserSubscriptionDto>> {
        let user = self
            .user_repository
            .find_by_id(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "user_subscriptions: failed to load user");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("user"))?;
        if user.status != UserStatus::Active {
            warn!(%user_id, "user_subscriptions: assignment to inactive user");
            return Err(UseCaseError::InvalidArgument(
                "Cannot assign a plan to an inactive user".to_string(),
            ));
        }

        let plan = self.load_plan(assign_subscription_model.plan_id).await?;
        if plan.status != PlanStatus::Active {
            warn!(%user_id, plan_id = %plan.id, "user_subscriptions: assignment of inactive plan");
            return Err(UseCaseError::InvalidArgument(
                "Cannot assign an inactive plan".to_string(),
            ));
        }

        let (duration, source, quote) = self
            .price(&plan, &assign_subscription_model.quote_request())
            .await?;

        let insert_user_subscription_entity = InsertUserSubscriptionEntity::stamped(
            user_id,
            plan.id,
            duration,
            &source,
            &quote,
            Utc::now(),
        )?;

        let assignment_id = self
            .user_subscription_repository
            .replace_active(insert_user_subscription_entity)
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(%user_id, db_error = ?err, "user_subscriptions: concurrent assignment");
                    return UseCaseError::Conflict(
                        "Another plan was assigned to this user at the same time".to_string(),
                    );
                }
                error!(%user_id, db_error = ?err, "user_subscriptions: failed to store assignment");
                UseCaseError::Internal(err)
            })?;

        info!(
            %user_id,
            %assignment_id,
            plan_id = %plan.id,
            final_price = %quote.final_price,
            "user_subscriptions: plan assigned"
        );
        self.list_for_user(user_id).await
    }

    pub async fn remove(&self, user_id: Uuid) -> UseCaseResult<Vec<UserSubscriptionDto>> {
        let removed = self
            .user_subscription_repository
            .deactivate_active_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "user_subscriptions: failed to remove assignment");
                UseCaseError::Internal(err)
            })?;
        if !removed {
            warn!(%user_id, "user_subscriptions: no active assignment to remove");
            return Err(UseCaseError::NotFound("subscription"));
        }

        info!(%user_id, "user_subscriptions: assignment removed");
        self.list_for_user(user_id).await
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> UseCaseResult<Vec<UserSubscriptionDto>> {
        let assignments = self
            .user_subscription_repository
            .list_for_user(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "user_subscriptions: failed to list assignments");
                UseCaseError::Internal(err)
            })?;

        Ok(assignments
            .into_iter()
            .map(UserSubscriptionDto::from)
            .collect())
    }

    async fn load_plan(&self, plan_id: Uuid) -> UseCaseResult<PlanEntity> {
        self.plan_repository
            .find_by_id(plan_id)
            .await
            .map_err(|err| {
                error!(%plan_id, db_error = ?err, "user_subscriptions: failed to load plan");
                UseCaseError::Internal(err)
            })?
            .ok_or(UseCaseError::NotFound("plan"))
    }

    async fn price(
        &self,
        plan: &PlanEntity,
        quote_request_model: &QuoteRequestModel,
    ) -> UseCaseResult<(BillingDuration, DiscountSource, PriceQuote)> {
        let duration = BillingDuration::try_from(quote_request_model.duration).map_err(|err| {
            warn!(duration = quote_request_model.duration, "user_subscriptions: unknown duration");
            UseCaseError::from(err)
        })?;
        let source = self.resolve_discount(&quote_request_model.discount).await?;
        let quote = PriceQuote::compute(plan.price, duration, &source)?;

        Ok((duration, source, quote))
    }

    async fn resolve_discount(&self, selection: &DiscountSelection) -> UseCaseResult<DiscountSource> {
        match selection {
            DiscountSelection::None => Ok(DiscountSource::None),
            DiscountSelection::Manual { percentage } => Ok(DiscountSource::manual(*percentage)?),
            DiscountSelection::Saved { discount_id } => {
                let discount_id = *discount_id;
                let discount = self
                    .discount_repository
                    .find_active_by_id(discount_id)
                    .await
                    .map_err(|err| {
                        error!(%discount_id, db_error = ?err, "user_subscriptions: failed to load discount");
                        UseCaseError::Internal(err)
                    })?
                    .ok_or(UseCaseError::NotFound("discount"))?;

                Ok(DiscountSource::Saved(discount))
            }
        }
    }
}
