use std::sync::Arc;

use tracing::{error, info};

use crate::{
    application::errors::{UseCaseError, UseCaseResult},
    domain::{
        repositories::{plans::PlanRepository, users::UserRepository},
        value_objects::search::{SearchResult, search_all},
    },
};

pub struct SearchUseCase<U, P>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    user_repository: Arc<U>,
    plan_repository: Arc<P>,
}

impl<U, P> SearchUseCase<U, P>
where
    U: UserRepository + Send + Sync + 'static,
    P: PlanRepository + Send + Sync + 'static,
{
    pub fn new(user_repository: Arc<U>, plan_repository: Arc<P>) -> Self {
        Self {
            user_repository,
            plan_repository,
        }
    }

    pub async fn search(&self, term: &str) -> UseCaseResult<Vec<SearchResult>> {
        if term.trim().is_empty() {
            return Ok(Vec::new());
        }

        let users = self.user_repository.list_users().await.map_err(|err| {
            error!(db_error = ?err, "search: failed to load users");
            UseCaseError::Internal(err)
        })?;
        let plans = self.plan_repository.list_plans().await.map_err(|err| {
            error!(db_error = ?err, "search: failed to load plans");
            UseCaseError::Internal(err)
        })?;

        let results = search_all(term, &users, &plans);
        info!(result_count = results.len(), "search: completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        entities::users::UserEntity,
        repositories::{plans::MockPlanRepository, users::MockUserRepository},
        value_objects::{enums::user_statuses::UserStatus, search::SearchResultType},
    };
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn blank_term_skips_storage() {
        let mut user_repository = MockUserRepository::new();
        user_repository.expect_list_users().never();
        let mut plan_repository = MockPlanRepository::new();
        plan_repository.expect_list_plans().never();

        let usecase = SearchUseCase::new(Arc::new(user_repository), Arc::new(plan_repository));

        assert!(usecase.search("   ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn finds_users_by_email() {
        let mut user_repository = MockUserRepository::new();
        user_repository.expect_list_users().returning(|| {
            let users = vec![UserEntity {
                id: Uuid::new_v4(),
                full_name: "Asha Rao".to_string(),
                email: "asha@example.com".to_string(),
                username: "asha".to_string(),
                mobile_number: "9876543210".to_string(),
                device_id: None,
                status: UserStatus::Active,
                created_at: Utc::now(),
            }];
            Box::pin(async move { Ok(users) })
        });
        let mut plan_repository = MockPlanRepository::new();
        plan_repository
            .expect_list_plans()
            .returning(|| Box::pin(async { Ok(Vec::new()) }));

        let usecase = SearchUseCase::new(Arc::new(user_repository), Arc::new(plan_repository));
        let results = usecase.search("EXAMPLE.com").await.unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].result_type, SearchResultType::User);
        assert_eq!(results[0].link, "/users");
    }
}
