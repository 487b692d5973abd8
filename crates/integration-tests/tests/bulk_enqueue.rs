//! Bulk enqueue against SQLite: chunking, validation, transactions.

use stowage_core::application::enqueue::make_batches;
use stowage_core::domain::Job;
use stowage_core::port::Transaction;
use stowage_core::{EnqueueConfig, QueueError};
use stowage_integration_tests::TestDb;

fn jobs(kinds: &[&str]) -> Vec<Job> {
    kinds.iter().map(|kind| Job::new(*kind)).collect()
}

#[tokio::test]
async fn test_bulk_enqueue() {
    let db = TestDb::new().await;
    let queue = db.queue();
    let kinds = ["Foo", "Bar", "Baz"];

    let mut batch = jobs(&kinds);
    let inserted = queue.bulk_enqueue(&mut batch).await.unwrap();

    assert_eq!(inserted, 3);
    for kind in kinds {
        assert_eq!(queue.count_jobs(kind).await.unwrap(), 1);
    }
    assert_eq!(db.count_rows().await, 3);
}

#[tokio::test]
async fn test_bulk_enqueue_across_chunks() {
    let db = TestDb::new().await;
    let config = EnqueueConfig::default().with_batch_size(3).unwrap();
    let queue = db.queue_with(config);
    let kinds = ["Foo", "Bar", "Baz", "Fizz", "Buzz"];

    let mut batch = jobs(&kinds);
    assert_eq!(make_batches(&batch, config.batch_size()).len(), 2);

    let inserted = queue.bulk_enqueue(&mut batch).await.unwrap();
    assert_eq!(inserted, 5);

    // Rows land in input order
    let stored: Vec<String> =
        sqlx::query_scalar("SELECT job_class FROM job_queue ORDER BY job_id")
            .fetch_all(&db.pool)
            .await
            .unwrap();
    assert_eq!(stored, kinds);
}

#[tokio::test]
async fn test_bulk_enqueue_over_default_batch_size() {
    let db = TestDb::new().await;
    let queue = db.queue();

    let mut batch: Vec<Job> = (0..450)
        .map(|i| Job::new("Index").with_json_args(&[i]).unwrap())
        .collect();
    let inserted = queue.bulk_enqueue(&mut batch).await.unwrap();

    assert_eq!(inserted, 450);
    assert_eq!(queue.count_jobs("Index").await.unwrap(), 450);
}

#[tokio::test]
async fn test_bulk_enqueue_applies_defaults() {
    let db = TestDb::new().await;
    let queue = db.queue();

    let mut batch = vec![Job::new("Foo"), Job::new("Bar").with_priority(5).with_queue("low")];
    queue.bulk_enqueue(&mut batch).await.unwrap();

    let rows: Vec<(String, String, i16, Vec<u8>)> = sqlx::query_as(
        "SELECT job_class, queue, priority, args FROM job_queue ORDER BY job_id",
    )
    .fetch_all(&db.pool)
    .await
    .unwrap();

    assert_eq!(rows[0], ("Foo".into(), "".into(), 100, b"[]".to_vec()));
    assert_eq!(rows[1], ("Bar".into(), "low".into(), 5, b"[]".to_vec()));
}

#[tokio::test]
async fn test_bulk_enqueue_with_empty_type() {
    let db = TestDb::new().await;
    let queue = db.queue();

    let mut batch = jobs(&["Foo", "", "Baz"]);
    let err = queue.bulk_enqueue(&mut batch).await.unwrap_err();

    assert!(matches!(err, QueueError::MissingType));
    assert_eq!(db.count_rows().await, 0);
}

#[tokio::test]
async fn test_bulk_enqueue_failed_chunk_keeps_earlier_chunks() {
    let db = TestDb::new().await;
    let queue = db.queue_with(EnqueueConfig::default().with_batch_size(2).unwrap());

    // Rejects the third row, which sits in the second chunk
    sqlx::query(
        "CREATE TRIGGER reject_poison BEFORE INSERT ON job_queue \
         WHEN NEW.job_class = 'Poison' BEGIN SELECT RAISE(ABORT, 'poison job'); END",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let mut batch = jobs(&["A", "B", "Poison", "D", "E"]);
    let err = queue.bulk_enqueue(&mut batch).await.unwrap_err();

    assert!(matches!(err, QueueError::Storage(_)));
    assert!(err.to_string().contains("poison job"));
    // First chunk committed on its own, nothing after the failure was sent
    assert_eq!(db.count_rows().await, 2);
    assert_eq!(queue.count_jobs("E").await.unwrap(), 0);
}

#[tokio::test]
async fn test_bulk_enqueue_in_tx_is_all_or_nothing() {
    let db = TestDb::new().await;
    let queue = db.queue_with(EnqueueConfig::default().with_batch_size(2).unwrap());

    sqlx::query(
        "CREATE TRIGGER reject_poison BEFORE INSERT ON job_queue \
         WHEN NEW.job_class = 'Poison' BEGIN SELECT RAISE(ABORT, 'poison job'); END",
    )
    .execute(&db.pool)
    .await
    .unwrap();

    let mut tx = queue.begin().await.unwrap();
    let mut batch = jobs(&["A", "B", "Poison", "D"]);
    assert!(queue.bulk_enqueue_in_tx(&mut batch, &mut tx).await.is_err());
    tx.rollback().await.unwrap();

    assert_eq!(db.count_rows().await, 0);
}

#[tokio::test]
async fn test_bulk_enqueue_in_tx_commit() {
    let db = TestDb::new().await;
    let queue = db.queue_with(EnqueueConfig::default().with_batch_size(2).unwrap());

    let mut tx = queue.begin().await.unwrap();
    let mut batch = jobs(&["A", "B", "C"]);
    let inserted = queue.bulk_enqueue_in_tx(&mut batch, &mut tx).await.unwrap();
    assert_eq!(inserted, 3);
    assert_eq!(tx.count_jobs("C").await.unwrap(), 1);
    assert_eq!(db.count_rows().await, 0);

    tx.commit().await.unwrap();
    assert_eq!(db.count_rows().await, 3);
}
