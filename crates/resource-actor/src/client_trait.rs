//! # ActorClient Trait
//!
//! Provides a common interface for resource‑specific clients, adding default `get`, `list`
//! and `staged` methods built on top of a generic `ResourceClient`.
use crate::{ActorEntity, FrameworkError, Reservation, ResourceClient, TransactionId};
use async_trait::async_trait;
use std::collections::HashMap;

/// Trait for resource-specific clients to inherit the standard read operations.
///
/// This trait reduces boilerplate by providing default implementations for
/// the operations every participant exposes the same way.
///
/// # Example
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, value: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct CounterError(String);
///
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Delta = u32;
///     type Error = CounterError;
///
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, Self::Error> {
///         Ok(Self { id, value: 0 })
///     }
///     fn can_apply(&self, delta: &u32) -> bool { *delta <= self.value }
///     fn apply(&mut self, delta: &u32) -> Result<(), Self::Error> {
///         self.value -= *delta;
///         Ok(())
///     }
/// }
///
/// struct CounterClient {
///     inner: ResourceClient<Counter>,
/// }
///
/// #[async_trait]
/// impl ActorClient<Counter> for CounterClient {
///     type Error = CounterError;
///
///     fn inner(&self) -> &ResourceClient<Counter> {
///         &self.inner
///     }
///
///     fn map_error(e: FrameworkError) -> Self::Error {
///         CounterError(e.to_string())
///     }
/// }
///
/// async fn usage(client: CounterClient) {
///     // get(), list() and staged() are provided automatically!
///     let _ = client.get(1).await;
///     let _ = client.list().await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// The resource-specific error type.
    type Error: Send + Sync;

    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// Map framework errors to the specific resource error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch an entity by ID.
    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    /// Fetch every entity held by the actor.
    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<HashMap<T::Id, T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    /// Inspect the reservation staged for `tx`, if any.
    #[tracing::instrument(skip(self))]
    async fn staged(&self, tx: TransactionId) -> Result<Option<Reservation<T>>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().staged(tx).await.map_err(Self::map_error)
    }
}
