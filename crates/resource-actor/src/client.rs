//! # Generic Client
//!
//! This module defines the generic client for communicating with participant actors.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use crate::transaction::{Reservation, TransactionId};
use std::collections::HashMap;
use tokio::sync::{mpsc, oneshot};

/// ## ResourceClient
///
/// The `ResourceClient<T>` provides a type‑safe, async API for interacting with a
/// `ResourceActor<T>`. It forwards catalog and protocol requests over a Tokio mpsc channel
/// and returns results via oneshot channels. The client is cheap to clone and can be shared
/// across tasks.
///
/// * **Cloneable** – holds only a sender, so cloning is inexpensive.
/// * **Async API** – all methods resolve to `Result<…, FrameworkError>`.
/// * **Unavailability** – a closed mailbox surfaces as [`FrameworkError::ActorClosed`], a
///   request the actor never answered as [`FrameworkError::ActorDropped`].
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> Clone for ResourceClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    /// Sends one request and waits for its answer.
    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<HashMap<T::Id, T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn enlist(
        &self,
        tx: TransactionId,
        id: T::Id,
        delta: T::Delta,
    ) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Enlist {
            tx,
            id,
            delta,
            respond_to,
        })
        .await
    }

    pub async fn prepare(&self, tx: TransactionId) -> Result<bool, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Prepare { tx, respond_to })
            .await
    }

    pub async fn commit(&self, tx: TransactionId) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Commit { tx, respond_to })
            .await
    }

    pub async fn rollback(&self, tx: TransactionId) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Rollback { tx, respond_to })
            .await
    }

    pub async fn staged(&self, tx: TransactionId) -> Result<Option<Reservation<T>>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Staged { tx, respond_to })
            .await
    }

    /// Removes reservations created more than `older_than` ago. Returns how many were removed.
    pub async fn expire_staged(&self, older_than: chrono::Duration) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::ExpireStaged {
            older_than,
            respond_to,
        })
        .await
    }

    pub async fn clear_staged(&self) -> Result<usize, FrameworkError> {
        self.request(|respond_to| ResourceRequest::ClearStaged { respond_to })
            .await
    }
}
