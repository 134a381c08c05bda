use bookstore::clients::{InventoryClient, LedgerClient};
use bookstore::config::CoordinatorConfig;
use bookstore::coordinator::{PurchaseRequest, TransactionCoordinator, TransactionError};
use bookstore::inventory_actor;
use bookstore::ledger_actor::LedgerError;
use bookstore::model::{Account, AccountId, InventoryItem, ItemCreate, ItemId};
use bookstore::participant::{ParticipantError, Phase};
use resource_actor::mock::{create_mock_client, MockClient};
use resource_actor::{ActorClient, FrameworkError, ResourceRequest};
use std::collections::HashMap;
use std::time::Duration;

fn dijana() -> HashMap<AccountId, Account> {
    HashMap::from([(AccountId(2), Account::new(AccountId(2), "Dijana", 1000.0))])
}

fn book_two() -> InventoryItem {
    InventoryItem::new(ItemId(1), "Book 2", 50.0, 1)
}

/// Real inventory actor holding one copy of "Book 2" as `book1`.
async fn real_inventory() -> InventoryClient {
    let (actor, client) = inventory_actor::new(10);
    tokio::spawn(actor.run());
    client
        .create_item(ItemCreate {
            title: "Book 2".to_string(),
            price: 50.0,
            quantity: 1,
        })
        .await
        .unwrap();
    client
}

fn config(participant_timeout: Duration) -> CoordinatorConfig {
    CoordinatorConfig {
        participant_timeout,
        transaction_timeout: Duration::from_secs(5),
    }
}

/// Pattern 2: Coordinator + Mocks
/// - Both participants mocked, so every call the coordinator makes is scripted and verified
/// - The ledger fails its commit after both voted yes
#[tokio::test]
async fn test_commit_failure_still_rolls_back_every_participant() {
    let mut inventory_mock = MockClient::<InventoryItem>::new();
    let mut ledger_mock = MockClient::<Account>::new();

    inventory_mock
        .expect_list()
        .return_ok(HashMap::from([(ItemId(1), book_two())]));
    inventory_mock.expect_get().return_ok(Some(book_two()));
    inventory_mock.expect_enlist().return_ok(());
    inventory_mock.expect_prepare().return_ok(true);
    inventory_mock.expect_commit().return_ok(());
    inventory_mock.expect_rollback().return_ok(());

    ledger_mock.expect_list().return_ok(dijana());
    ledger_mock.expect_enlist().return_ok(());
    ledger_mock.expect_prepare().return_ok(true);
    ledger_mock
        .expect_commit()
        .return_err(FrameworkError::EntityError(Box::new(
            LedgerError::InsufficientFunds {
                requested: 50.0,
                available: 0.0,
            },
        )));
    ledger_mock.expect_rollback().return_ok(());

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_mock.client()),
        InventoryClient::new(inventory_mock.client()),
        config(Duration::from_secs(1)),
    );

    let result = coordinator.start_transaction("Book 2", 1, "Dijana").await;

    assert!(
        matches!(
            result,
            Err(TransactionError::Participant(ParticipantError::Failed {
                participant: "ledger",
                phase: Phase::Commit,
                ..
            }))
        ),
        "unexpected result: {:?}",
        result
    );
    // Both rollbacks were consumed
    inventory_mock.verify();
    ledger_mock.verify();
}

/// Pattern 2: Real inventory actor + mocked ledger failing at commit.
/// The inventory's reservation is gone afterwards; its commit went through, which is the
/// non-atomic window two-phase commit without a recovery log leaves open.
#[tokio::test]
async fn test_commit_failure_leaves_no_reservation_on_healthy_participant() {
    let inventory = real_inventory().await;
    let mut ledger_mock = MockClient::<Account>::new();

    ledger_mock.expect_list().return_ok(dijana());
    ledger_mock.expect_enlist().return_ok(());
    ledger_mock.expect_prepare().return_ok(true);
    ledger_mock.expect_commit().return_err(FrameworkError::ActorDropped);
    ledger_mock.expect_rollback().return_ok(());

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_mock.client()),
        inventory.clone(),
        config(Duration::from_secs(1)),
    );

    let result = coordinator.start_transaction("Book 2", 1, "Dijana").await;
    assert!(matches!(
        result,
        Err(TransactionError::Participant(ParticipantError::Unavailable {
            participant: "ledger",
            phase: Phase::Commit
        }))
    ));

    assert_eq!(inventory.clear_staged().await.unwrap(), 0);
    assert_eq!(inventory.get(ItemId(1)).await.unwrap().unwrap().quantity, 0);
    ledger_mock.verify();
}

#[tokio::test]
async fn test_unreachable_participant_at_prepare_aborts() {
    let inventory = real_inventory().await;
    let mut ledger_mock = MockClient::<Account>::new();

    ledger_mock.expect_list().return_ok(dijana());
    ledger_mock.expect_enlist().return_ok(());
    ledger_mock.expect_prepare().return_err(FrameworkError::ActorClosed);
    ledger_mock.expect_rollback().return_ok(());

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_mock.client()),
        inventory.clone(),
        config(Duration::from_secs(1)),
    );

    let result = coordinator.start_transaction("Book 2", 1, "Dijana").await;
    let tx = match result {
        Err(TransactionError::Aborted(tx)) => tx,
        other => panic!("Expected Aborted, got {:?}", other),
    };

    assert!(inventory.staged(tx).await.unwrap().is_none());
    assert_eq!(inventory.get(ItemId(1)).await.unwrap().unwrap().quantity, 1);
    ledger_mock.verify();
}

#[tokio::test]
async fn test_failed_enlist_is_rolled_back_too() {
    let inventory = real_inventory().await;
    let mut ledger_mock = MockClient::<Account>::new();

    ledger_mock.expect_list().return_ok(dijana());
    ledger_mock.expect_enlist().return_err(FrameworkError::ActorDropped);
    // The participant whose enlist failed still gets a rollback
    ledger_mock.expect_rollback().return_ok(());

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_mock.client()),
        inventory.clone(),
        config(Duration::from_secs(1)),
    );

    let result = coordinator.start_transaction("Book 2", 1, "Dijana").await;
    assert!(matches!(
        result,
        Err(TransactionError::Ledger(LedgerError::ActorCommunicationError(_)))
    ));

    assert_eq!(inventory.clear_staged().await.unwrap(), 0);
    assert_eq!(inventory.get(ItemId(1)).await.unwrap().unwrap().quantity, 1);
    ledger_mock.verify();
}

#[tokio::test]
async fn test_silent_participant_times_out_as_no_vote() {
    let inventory = real_inventory().await;
    let (ledger_client, mut ledger_inbox) = create_mock_client::<Account>(10);

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_client),
        inventory.clone(),
        config(Duration::from_millis(50)),
    );
    let purchase =
        tokio::spawn(async move { coordinator.start_transaction("Book 2", 1, "Dijana").await });

    // Answer everything except the vote
    let mut held_vote = None;
    while let Some(request) = ledger_inbox.recv().await {
        match request {
            ResourceRequest::List { respond_to } => {
                respond_to.send(Ok(dijana())).unwrap();
            }
            ResourceRequest::Enlist { respond_to, .. } => {
                respond_to.send(Ok(())).unwrap();
            }
            ResourceRequest::Prepare { respond_to, .. } => {
                held_vote = Some(respond_to);
            }
            ResourceRequest::Rollback { respond_to, .. } => {
                respond_to.send(Ok(())).unwrap();
                break;
            }
            other => panic!("Unexpected request {:?}", other),
        }
    }
    assert!(held_vote.is_some(), "prepare was never sent");

    let result = purchase.await.unwrap();
    let tx = match result {
        Err(TransactionError::Aborted(tx)) => tx,
        other => panic!("Expected Aborted, got {:?}", other),
    };
    assert!(inventory.staged(tx).await.unwrap().is_none());
    assert_eq!(inventory.get(ItemId(1)).await.unwrap().unwrap().quantity, 1);
}

#[tokio::test]
async fn test_expired_deadline_fails_during_resolution() {
    let inventory = real_inventory().await;
    let ledger_mock = MockClient::<Account>::new();

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_mock.client()),
        inventory.clone(),
        config(Duration::from_secs(1)),
    );

    let request = PurchaseRequest::new("Book 2", 1, "Dijana").unwrap();
    let deadline = tokio::time::Instant::now();
    let result = coordinator.start_transaction_until(request, deadline).await;

    assert_eq!(
        result,
        Err(TransactionError::Participant(ParticipantError::Timeout {
            participant: "inventory",
            phase: Phase::Resolve
        }))
    );
    assert_eq!(inventory.clear_staged().await.unwrap(), 0);
    ledger_mock.verify();
}

#[tokio::test]
async fn test_silent_participant_at_commit_times_out() {
    let inventory = real_inventory().await;
    let (ledger_client, mut ledger_inbox) = create_mock_client::<Account>(10);

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_client),
        inventory.clone(),
        config(Duration::from_millis(50)),
    );
    let started = tokio::time::Instant::now();
    let purchase =
        tokio::spawn(async move { coordinator.start_transaction("Book 2", 1, "Dijana").await });

    // Vote yes, then never acknowledge the commit
    let mut held_commit = None;
    while let Some(request) = ledger_inbox.recv().await {
        match request {
            ResourceRequest::List { respond_to } => {
                respond_to.send(Ok(dijana())).unwrap();
            }
            ResourceRequest::Enlist { respond_to, .. } => {
                respond_to.send(Ok(())).unwrap();
            }
            ResourceRequest::Prepare { respond_to, .. } => {
                respond_to.send(Ok(true)).unwrap();
            }
            ResourceRequest::Commit { respond_to, .. } => {
                held_commit = Some(respond_to);
            }
            ResourceRequest::Rollback { respond_to, .. } => {
                respond_to.send(Ok(())).unwrap();
                break;
            }
            other => panic!("Unexpected request {:?}", other),
        }
    }
    assert!(held_commit.is_some(), "commit was never sent");

    let result = purchase.await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(
        result,
        Err(TransactionError::Participant(ParticipantError::Timeout {
            participant: "ledger",
            phase: Phase::Commit
        }))
    );
    assert_eq!(inventory.clear_staged().await.unwrap(), 0);
}

#[tokio::test]
async fn test_silent_participant_at_rollback_keeps_original_error() {
    let inventory = real_inventory().await;
    let (ledger_client, mut ledger_inbox) = create_mock_client::<Account>(10);

    let coordinator = TransactionCoordinator::new(
        LedgerClient::new(ledger_client),
        inventory.clone(),
        config(Duration::from_millis(50)),
    );
    let started = tokio::time::Instant::now();
    let purchase =
        tokio::spawn(async move { coordinator.start_transaction("Book 2", 1, "Dijana").await });

    // Vote no, then never acknowledge the rollback
    let mut held_rollback = None;
    while let Some(request) = ledger_inbox.recv().await {
        match request {
            ResourceRequest::List { respond_to } => {
                respond_to.send(Ok(dijana())).unwrap();
            }
            ResourceRequest::Enlist { respond_to, .. } => {
                respond_to.send(Ok(())).unwrap();
            }
            ResourceRequest::Prepare { respond_to, .. } => {
                respond_to.send(Ok(false)).unwrap();
            }
            ResourceRequest::Rollback { respond_to, .. } => {
                held_rollback = Some(respond_to);
                break;
            }
            other => panic!("Unexpected request {:?}", other),
        }
    }

    let result = purchase.await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(held_rollback.is_some());
    let tx = match result {
        Err(TransactionError::Aborted(tx)) => tx,
        other => panic!("Expected Aborted, got {:?}", other),
    };
    assert!(inventory.staged(tx).await.unwrap().is_none());
    assert_eq!(inventory.get(ItemId(1)).await.unwrap().unwrap().quantity, 1);
}
