//! # Mock Framework
//!
//! Utilities for testing clients in isolation.
//!
//! Use [`create_mock_client`] to get a client and a receiver.
//! Then use helpers like [`expect_insert`] or [`expect_select`] to assert behavior
//! and script the table's reply, including backend failures.

use crate::actor_framework::{Entity, FrameworkError, ResourceClient, ResourceRequest, TableQuery};
use tokio::sync::{mpsc, oneshot};

pub type Responder<R> = oneshot::Sender<Result<R, FrameworkError>>;

/// Creates a mock client and a receiver for asserting requests.
///
/// # Testing Strategy
/// Instead of spinning up a `ResourceActor`, the client sends to a channel the test owns.
/// The test inspects each request and decides the reply.
pub fn create_mock_client<T: Entity>(buffer_size: usize) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is an Insert request
pub async fn expect_insert<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::CreateParams, Responder<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Insert { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Select request
pub async fn expect_select<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(TableQuery<T>, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Select { query, respond_to }) => Some((query, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request
pub async fn expect_update<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Filter, T::Patch, Responder<usize>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update { filter, patch, respond_to }) => Some((filter, patch, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Delete request
pub async fn expect_delete<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) -> Option<(T::Filter, Responder<Vec<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Delete { filter, respond_to }) => Some((filter, respond_to)),
        _ => None,
    }
}

/// Asserts that no request is waiting on the mock channel.
pub fn expect_idle<T: Entity>(receiver: &mut mpsc::Receiver<ResourceRequest<T>>) {
    assert!(receiver.try_recv().is_err(), "Expected no request to reach the table");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RegisteredUser, UserCreate};
    use chrono::Utc;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client::<RegisteredUser>(10);

        let insert_task = tokio::spawn(async move {
            let user = UserCreate { phone: "998901234567".to_string(), name: None };
            client.insert(user).await
        });

        let (params, responder) = expect_insert(&mut receiver).await.expect("Expected Insert request");
        assert_eq!(params.phone, "998901234567");
        let stored = RegisteredUser {
            id: "user_1".to_string(),
            phone: params.phone,
            name: None,
            created_at: Utc::now(),
        };
        responder.send(Ok(stored.clone())).unwrap();

        let result = insert_task.await.unwrap();
        assert_eq!(result, Ok(stored));
    }
}
