//! # Generic Messages
//!
//! This module defines the generic message types used for communication between
//! the `ResourceClient` and `ResourceActor`.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::transaction::{Reservation, TransactionId};
use std::collections::HashMap;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// # Two kinds of requests
/// The variants fall into two groups:
///
/// - **Catalog**: `Create`, `Get`, `List`. Plain reads and bootstrap writes over the
///   authoritative entities. They are not part of the commit protocol.
/// - **Protocol**: `Enlist`, `Prepare`, `Commit`, `Rollback`, plus the staging-table
///   maintenance requests `Staged`, `ExpireStaged` and `ClearStaged`. Every protocol request
///   is keyed by [`TransactionId`]; only `Enlist` names the target entity, the others find it
///   through the stored [`Reservation`].
///
/// # Entity Interaction
/// This type is generic over `T: ActorEntity` and uses its associated types (`Create`,
/// `Delta`) so a ledger amount can never be staged against an inventory actor.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<HashMap<T::Id, T>>,
    },
    Enlist {
        tx: TransactionId,
        id: T::Id,
        delta: T::Delta,
        respond_to: Response<()>,
    },
    Prepare {
        tx: TransactionId,
        respond_to: Response<bool>,
    },
    Commit {
        tx: TransactionId,
        respond_to: Response<()>,
    },
    Rollback {
        tx: TransactionId,
        respond_to: Response<()>,
    },
    Staged {
        tx: TransactionId,
        respond_to: Response<Option<Reservation<T>>>,
    },
    ExpireStaged {
        older_than: chrono::Duration,
        respond_to: Response<usize>,
    },
    ClearStaged {
        respond_to: Response<usize>,
    },
}
