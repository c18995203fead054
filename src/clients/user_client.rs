use tracing::{debug, error, info, instrument, warn};

use crate::actor_framework::{Query, ResourceClient};
use crate::domain::{RegisteredUser, UserCreate};
use crate::user_actor::{UserError, UserFilter};

/// Client for the registration ledger.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<RegisteredUser>,
}

impl_basic_client!(UserClient, RegisteredUser, UserError => RegistrationFailed, user);

impl UserClient {
    /// Whether a customer with this phone is already registered.
    ///
    /// A failed lookup is logged and reported as `false`, so a backend outage
    /// does not block registration.
    #[instrument(skip(self))]
    pub async fn check_phone_exists(&self, phone: &str) -> bool {
        debug!("Sending request");
        let query = Query::all().filter(UserFilter::Phone(phone.to_string()));
        match self.inner.select(query).await {
            Ok(rows) => !rows.is_empty(),
            Err(e) => {
                error!(error = %e, "Phone lookup failed");
                false
            }
        }
    }

    #[instrument(skip(self, name))]
    pub async fn register_user(&self, phone: &str, name: Option<&str>) -> Result<RegisteredUser, UserError> {
        if self.check_phone_exists(phone).await {
            warn!("Phone already registered");
            return Err(UserError::AlreadyRegistered(phone.to_string()));
        }

        debug!("Sending request");
        let user = self
            .inner
            .insert(UserCreate::new(phone, name))
            .await
            .map_err(|e| {
                error!(error = %e, "Registration insert failed");
                UserError::RegistrationFailed(e.to_string())
            })?;

        info!(user_id = %user.id, "User registered");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor_framework::{FrameworkError, ResourceActor};
    use crate::mock_framework::{create_mock_client, expect_idle, expect_insert, expect_select};
    use chrono::Utc;

    fn stored(phone: &str) -> RegisteredUser {
        RegisteredUser {
            id: "user_1".to_string(),
            phone: phone.to_string(),
            name: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_phone_is_rejected_without_insert() {
        let (inner, mut rx) = create_mock_client::<RegisteredUser>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.register_user("998901234567", Some("Aziz")).await });

        let (query, responder) = expect_select(&mut rx).await.expect("Expected phone lookup");
        assert_eq!(query.filter, Some(UserFilter::Phone("998901234567".to_string())));
        responder.send(Ok(vec![stored("998901234567")])).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Err(UserError::AlreadyRegistered("998901234567".to_string())));
        expect_idle(&mut rx);
    }

    #[tokio::test]
    async fn test_lookup_failure_counts_as_unregistered() {
        let (inner, mut rx) = create_mock_client::<RegisteredUser>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.register_user("998901234567", None).await });

        let (_, responder) = expect_select(&mut rx).await.expect("Expected phone lookup");
        responder.send(Err(FrameworkError::Backend("timeout".into()))).unwrap();

        let (params, responder) = expect_insert(&mut rx).await.expect("Expected insert");
        assert_eq!(params.phone, "998901234567");
        responder.send(Ok(stored(&params.phone))).unwrap();

        let user = task.await.unwrap().unwrap();
        assert_eq!(user.phone, "998901234567");
    }

    #[tokio::test]
    async fn test_insert_failure_reports_registration_error() {
        let (inner, mut rx) = create_mock_client::<RegisteredUser>(10);
        let client = UserClient::new(inner);

        let task = tokio::spawn(async move { client.register_user("998901234567", None).await });

        let (_, responder) = expect_select(&mut rx).await.expect("Expected phone lookup");
        responder.send(Ok(vec![])).unwrap();
        let (_, responder) = expect_insert(&mut rx).await.expect("Expected insert");
        responder.send(Err(FrameworkError::Backend("disk full".into()))).unwrap();

        let err = task.await.unwrap().unwrap_err();
        assert!(matches!(err, UserError::RegistrationFailed(_)));
        assert_eq!(err.user_message(), "Ro'yxatdan o'tishda xatolik yuz berdi");
    }

    #[tokio::test]
    async fn test_second_registration_leaves_one_row() {
        let (actor, inner) = ResourceActor::<RegisteredUser>::new(10, || uuid::Uuid::new_v4().to_string());
        tokio::spawn(actor.run());
        let client = UserClient::new(inner.clone());

        let first = client.register_user("998901234567", Some("Aziz")).await.unwrap();
        assert_eq!(first.name.as_deref(), Some("Aziz"));
        assert!(client.check_phone_exists("998901234567").await);

        let second = client.register_user("998901234567", Some("Other")).await;
        assert_eq!(second, Err(UserError::AlreadyRegistered("998901234567".to_string())));

        let rows = inner.select(Query::all()).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(client.get_user(first.id.clone()).await.unwrap(), Some(first));
    }
}
