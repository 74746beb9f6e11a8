use std::{collections::HashMap, sync::Arc};

use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        errors::{UseCaseError, UseCaseResult, is_unique_violation},
        usecases::authentication::hash_password,
    },
    domain::{
        entities::{plans::PlanEntity, user_subscriptions::UserSubscriptionEntity},
        repositories::{
            plans::PlanRepository, user_subscriptions::UserSubscriptionRepository,
            users::UserRepository,
        },
        value_objects::{
            enums::{assignment_statuses::AssignmentStatus, user_statuses::UserStatus},
            money,
            users::{CurrentSubscriptionInfo, RegisterUserModel, UserDto, UserWithSubscriptionDto},
        },
    },
};

pub struct UserUseCase<U, P, S>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
    S: UserSubscriptionRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    plan_repository: Arc<P>,
    user_subscription_repository: Arc<S>,
}

impl<U, P, S> UserUseCase<U, P, S>
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

    pub async fn register_user(&self, register_user_model: RegisterUserModel) -> UseCaseResult<UserDto> {
        register_user_model.validate().map_err(|err| {
            warn!(error = %err, "users: invalid registration form");
            UseCaseError::from(err)
        })?;

        let email = register_user_model.normalized_email();
        let email_taken = self
            .user_repository
            .exists_by_email(email.clone())
            .await
            .map_err(|err| {
                error!(db_error = ?err, "users: failed to check email");
                UseCaseError::Internal(err)
            })?;
        if email_taken {
            warn!(%email, "users: email already registered");
            return Err(UseCaseError::Conflict(
                "A user with this email already exists".to_string(),
            ));
        }

        let password_hash = hash_password(&register_user_model.password).map_err(|err| {
            error!(error = ?err, "users: failed to hash password");
            UseCaseError::Internal(err)
        })?;

        let user = self
            .user_repository
            .create(register_user_model.to_entity(password_hash))
            .await
            .map_err(|err| {
                if is_unique_violation(&err) {
                    warn!(db_error = ?err, "users: email taken concurrently");
                    return UseCaseError::Conflict(
                        "A user with this email already exists".to_string(),
                    );
                }
                error!(db_error = ?err, "users: failed to insert user");
                UseCaseError::Internal(err)
            })?;

        info!(user_id = %user.id, "users: user registered");
        Ok(UserDto::from(user))
    }

    /// Every user with the plan behind their most recent active assignment.
    pub async fn list_users(&self) -> UseCaseResult<Vec<UserWithSubscriptionDto>> {
        let users = self.user_repository.list_users().await.map_err(|err| {
            error!(db_error = ?err, "users: failed to list users");
            UseCaseError::Internal(err)
        })?;
        let assignments = self
            .user_subscription_repository
            .list_all()
            .await
            .map_err(|err| {
                error!(db_error = ?err, "users: failed to list assignments");
                UseCaseError::Internal(err)
            })?;
        let plans = self.plan_repository.list_plans().await.map_err(|err| {
            error!(db_error = ?err, "users: failed to list plans");
            UseCaseError::Internal(err)
        })?;

        let plans: HashMap<Uuid, &PlanEntity> = plans.iter().map(|plan| (plan.id, plan)).collect();

        // `list_all` is newest first, so the first active hit per user wins.
        let mut current: HashMap<Uuid, &UserSubscriptionEntity> = HashMap::new();
        for assignment in assignments
            .iter()
            .filter(|assignment| assignment.status == AssignmentStatus::Active)
        {
            current.entry(assignment.user_id).or_insert(assignment);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let subscription = current.get(&user.id).and_then(|assignment| {
                    plans.get(&assignment.plan_id).map(|plan| CurrentSubscriptionInfo {
                        id: assignment.id,
                        plan_id: plan.id,
                        plan_name: plan.plan_name.clone(),
                        price: plan.price,
                        formatted_price: money::format_price(plan.price),
                        status: assignment.status,
                        start_date: assignment.starts_at.date_naive(),
                    })
                });

                UserWithSubscriptionDto {
                    user: UserDto::from(user),
                    subscription,
                }
            })
            .collect())
    }

    pub async fn activate_user(&self, user_id: Uuid) -> UseCaseResult<Vec<UserWithSubscriptionDto>> {
        self.set_status(user_id, UserStatus::Active).await
    }

    pub async fn deactivate_user(&self, user_id: Uuid) -> UseCaseResult<Vec<UserWithSubscriptionDto>> {
        self.set_status(user_id, UserStatus::Inactive).await
    }

    pub async fn unlink_device(&self, user_id: Uuid) -> UseCaseResult<Vec<UserWithSubscriptionDto>> {
        let updated = self
            .user_repository
            .clear_device(user_id)
            .await
            .map_err(|err| {
                error!(%user_id, db_error = ?err, "users: failed to unlink device");
                UseCaseError::Internal(err)
            })?;
        if !updated {
            warn!(%user_id, "users: user to unlink not found");
            return Err(UseCaseError::NotFound("user"));
        }

        info!(%user_id, "users: device unlinked");
        self.list_users().await
    }

    async fn set_status(
        &self,
        user_id: Uuid,
        status: UserStatus,
    ) -> UseCaseResult<Vec<UserWithSubscriptionDto>> {
        let updated = self
            .user_repository
            .update_status(user_id, status)
            .await
            .map_err(|err| {
                error!(%user_id, %status, db_error = ?err, "users: failed to update status");
                UseCaseError::Internal(err)
            })?;
        if !updated {
            warn!(%user_id, "users: user to update not found");
            return Err(UseCaseError::NotFound("user"));
        }

        info!(%user_id, %status, "users: status updated");
        self.list_users().await
    }
}
