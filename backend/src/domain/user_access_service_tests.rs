//! Tests for the access coordinator.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::{MockErrorReporter, MockUserRepository};
use crate::test_support::users::{
    CacheOp, CallLog, InMemoryUserCache, InMemoryUserRepository, RecordingUserQueue,
};

type Service = UserAccessService<InMemoryUserRepository, InMemoryUserCache, RecordingUserQueue>;

struct Harness {
    repository: Arc<InMemoryUserRepository>,
    cache: Arc<InMemoryUserCache>,
    queue: Arc<RecordingUserQueue>,
    log: CallLog,
    service: Service,
}

#[fixture]
fn harness() -> Harness {
    let log = CallLog::new();
    let repository = Arc::new(InMemoryUserRepository::new().with_log(log.clone()));
    let cache = Arc::new(InMemoryUserCache::new().with_log(log.clone()));
    let queue = Arc::new(RecordingUserQueue::new().with_log(log.clone()));
    let service = UserAccessService::new(repository.clone(), cache.clone(), queue.clone());
    Harness {
        repository,
        cache,
        queue,
        log,
        service,
    }
}

fn ada(id: i64) -> User {
    User::from_parts(UserId::new(id), "Ada", "ada@x.io")
}

fn payload(user: &User) -> String {
    serde_json::to_string(user).expect("serialise user")
}

#[rstest]
#[tokio::test]
async fn get_user_refills_cache_after_store_hit(harness: Harness) {
    let user = ada(7);
    harness.repository.insert(user.clone());

    let fetched = harness.service.get_user(UserId::new(7)).await.expect("user");

    assert_eq!(fetched, user);
    let cached = harness.cache.entry(UserId::new(7)).expect("cache refilled");
    let decoded: User = serde_json::from_str(&cached).expect("valid payload");
    assert_eq!(decoded, user);
    assert_eq!(harness.repository.reads(), 1);
}

#[rstest]
#[tokio::test]
async fn get_user_hit_never_queries_store(harness: Harness) {
    let user = ada(3);
    harness.cache.put(UserId::new(3), payload(&user));

    let fetched = harness.service.get_user(UserId::new(3)).await.expect("user");

    assert_eq!(fetched, user);
    assert_eq!(harness.repository.reads(), 0);
}

#[rstest]
#[tokio::test]
async fn get_user_consults_cache_before_store(harness: Harness) {
    harness.repository.insert(ada(5));

    harness.service.get_user(UserId::new(5)).await.expect("user");

    assert_eq!(
        harness.log.entries(),
        vec!["cache.get:5", "store.get:5", "cache.set:5"]
    );
}

#[rstest]
#[tokio::test]
async fn get_user_missing_is_not_found(harness: Harness) {
    let error = harness
        .service
        .get_user(UserId::new(404))
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), USER_NOT_FOUND_MESSAGE);
    assert!(harness.cache.entry(UserId::new(404)).is_none());
}

#[rstest]
#[tokio::test]
async fn get_user_degrades_to_store_when_cache_read_fails(harness: Harness) {
    harness.repository.insert(ada(9));
    harness
        .cache
        .fail(CacheOp::Get, UserCacheError::connection("pool timed out"));

    let fetched = harness.service.get_user(UserId::new(9)).await.expect("user");

    assert_eq!(fetched, ada(9));
    assert_eq!(harness.repository.reads(), 1);
}

#[rstest]
#[case::not_json("not json")]
#[case::wrong_shape("{\"id\":1}")]
#[case::other_id("{\"id\":2,\"name\":\"Bob\",\"email\":\"bob@x.io\"}")]
#[tokio::test]
async fn get_user_treats_unusable_payload_as_miss(harness: Harness, #[case] raw: &str) {
    harness.repository.insert(ada(1));
    harness.cache.put(UserId::new(1), raw);

    let fetched = harness.service.get_user(UserId::new(1)).await.expect("user");

    assert_eq!(fetched, ada(1));
    assert_eq!(harness.repository.reads(), 1);
    assert_eq!(harness.cache.entry(UserId::new(1)), Some(payload(&ada(1))));
}

#[rstest]
#[tokio::test]
async fn get_user_fails_when_refill_fails(harness: Harness) {
    harness.repository.insert(ada(2));
    harness
        .cache
        .fail(CacheOp::Set, UserCacheError::command("READONLY"));

    let error = harness
        .service
        .get_user(UserId::new(2))
        .await
        .expect_err("refill failure surfaces");

    assert_eq!(error.code(), ErrorCode::CacheFailure);
}

#[rstest]
#[tokio::test]
async fn get_user_surfaces_store_failure(harness: Harness) {
    harness
        .repository
        .fail_with(Some(UserPersistenceError::connection("refused")));

    let error = harness
        .service
        .get_user(UserId::new(2))
        .await
        .expect_err("store failure");

    assert_eq!(error.code(), ErrorCode::StoreFailure);
    assert!(!error.message().contains("refused"));
}

#[rstest]
#[case(0, 0)]
#[case(0, 11)]
#[case(-5, 10)]
#[case(-5, -1)]
#[tokio::test]
async fn list_users_clamps_like_default_window(
    harness: Harness,
    #[case] start: i64,
    #[case] count: i64,
) {
    for id in 1..=15 {
        harness.repository.insert(ada(id));
    }

    let clamped = harness.service.list_users(start, count).await.expect("list");
    let baseline = harness.service.list_users(0, 10).await.expect("list");

    assert_eq!(clamped, baseline);
    assert_eq!(clamped.len(), 10);
    assert_eq!(clamped.first().map(User::id), Some(UserId::new(1)));
}

#[rstest]
#[tokio::test]
async fn list_users_bypasses_cache(harness: Harness) {
    harness.repository.insert(ada(1));

    let users = harness.service.list_users(0, 5).await.expect("list");

    assert_eq!(users, vec![ada(1)]);
    assert_eq!(harness.log.entries(), vec!["store.list"]);
}

#[rstest]
#[tokio::test]
async fn list_users_past_end_is_empty(harness: Harness) {
    harness.repository.insert(ada(1));

    let users = harness.service.list_users(50, 10).await.expect("list");

    assert!(users.is_empty());
}

#[rstest]
#[tokio::test]
async fn create_user_assigns_distinct_nonzero_ids(harness: Harness) {
    let first = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect("create");
    let second = harness
        .service
        .create_user(UserInput::new("Grace", "grace@x.io"))
        .await
        .expect("create");

    assert_eq!(first.id(), UserId::new(1));
    assert!(second.id().is_assigned());
    assert_ne!(first.id(), second.id());
}

#[rstest]
#[tokio::test]
async fn created_user_is_served_from_cache(harness: Harness) {
    let created = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect("create");

    let fetched = harness.service.get_user(created.id()).await.expect("get");

    assert_eq!(fetched, created);
    assert_eq!(harness.repository.reads(), 0);
}

#[rstest]
#[tokio::test]
async fn create_user_allocates_then_caches_then_enqueues(harness: Harness) {
    let created = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect("create");
    let id = created.id();

    let allocated = harness.log.position(&format!("store.create:{id}"));
    let cached = harness.log.position(&format!("cache.set:{id}"));
    let enqueued = harness.log.position(&format!("queue.enqueue:{id}"));
    assert!(allocated < cached, "{:?}", harness.log.entries());
    assert!(cached < enqueued, "{:?}", harness.log.entries());
    assert_eq!(harness.queue.jobs(), vec![(QueueName::create_user(), id)]);
}

#[rstest]
#[case::blank_name("", "ada@x.io")]
#[case::blank_email("Ada", "")]
#[case::bad_email("Ada", "not-an-email")]
#[tokio::test]
async fn create_user_rejects_invalid_input_without_side_effects(
    harness: Harness,
    #[case] name: &str,
    #[case] email: &str,
) {
    let error = harness
        .service
        .create_user(UserInput::new(name, email))
        .await
        .expect_err("invalid input");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(harness.log.entries().is_empty());
}

#[rstest]
#[tokio::test]
async fn create_user_skips_enqueue_when_cache_write_fails(harness: Harness) {
    harness
        .cache
        .fail(CacheOp::Set, UserCacheError::connection("down"));

    let error = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect_err("cache failure");

    assert_eq!(error.code(), ErrorCode::CacheFailure);
    assert!(harness.queue.jobs().is_empty());
}

#[rstest]
#[tokio::test]
async fn create_user_burns_sequence_value_on_failure(harness: Harness) {
    harness
        .queue
        .fail_with(Some(UserQueueError::unavailable("no broker")));
    let error = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect_err("queue failure");
    assert_eq!(error.code(), ErrorCode::CacheFailure);

    harness.queue.fail_with(None);
    let created = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect("create");
    assert_eq!(created.id(), UserId::new(2));
}

#[rstest]
#[tokio::test]
async fn create_user_uses_configured_queue(harness: Harness) {
    let queue = QueueName::new("users:created").expect("queue name");
    let service = UserAccessService::new(
        harness.repository.clone(),
        harness.cache.clone(),
        harness.queue.clone(),
    )
    .with_create_queue(queue.clone());

    let created = service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect("create");

    assert_eq!(harness.queue.jobs(), vec![(queue, created.id())]);
}

#[rstest]
#[tokio::test]
async fn update_user_forces_path_id_and_invalidates(harness: Harness) {
    harness.repository.insert(ada(4));
    harness.cache.put(UserId::new(4), payload(&ada(4)));

    let updated = harness
        .service
        .update_user(UserId::new(4), UserInput::new("Ada L", "ada@l.io"))
        .await
        .expect("update");

    assert_eq!(updated.id(), UserId::new(4));
    assert_eq!(harness.repository.row(UserId::new(4)), Some(updated.clone()));
    assert!(harness.cache.entry(UserId::new(4)).is_none());
    let fetched = harness.service.get_user(UserId::new(4)).await.expect("get");
    assert_eq!(fetched, updated);
}

#[rstest]
#[tokio::test]
async fn update_user_fails_when_invalidation_fails(harness: Harness) {
    harness.repository.insert(ada(4));
    harness
        .cache
        .fail(CacheOp::Delete, UserCacheError::connection("down"));

    let error = harness
        .service
        .update_user(UserId::new(4), UserInput::new("Ada", "ada@x.io"))
        .await
        .expect_err("invalidation failure");

    assert_eq!(error.code(), ErrorCode::CacheFailure);
}

#[rstest]
#[tokio::test]
async fn delete_then_get_is_not_found(harness: Harness) {
    let created = harness
        .service
        .create_user(UserInput::new("Ada", "ada@x.io"))
        .await
        .expect("create");
    harness.repository.insert(created.clone());

    harness
        .service
        .delete_user(created.id())
        .await
        .expect("delete");
    let error = harness
        .service
        .get_user(created.id())
        .await
        .expect_err("deleted");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_missing_user_succeeds(harness: Harness) {
    harness
        .service
        .delete_user(UserId::new(77))
        .await
        .expect("no-op delete");

    assert_eq!(
        harness.log.entries(),
        vec!["store.delete:77", "cache.delete:77"]
    );
}

#[tokio::test]
async fn store_failures_are_reported_with_context() {
    let mut repository = MockUserRepository::new();
    repository
        .expect_get()
        .times(1)
        .return_once(|_| Err(UserPersistenceError::query("syntax error")));
    let mut reporter = MockErrorReporter::new();
    reporter
        .expect_report()
        .withf(|error, context| {
            error.code() == ErrorCode::StoreFailure
                && context.operation() == "get_user"
                && context.user_id() == Some(UserId::new(8))
        })
        .times(1)
        .return_const(());

    let service = UserAccessService::new(
        Arc::new(repository),
        Arc::new(InMemoryUserCache::new()),
        Arc::new(RecordingUserQueue::new()),
    )
    .with_error_reporter(Arc::new(reporter));

    let error = service
        .get_user(UserId::new(8))
        .await
        .expect_err("store failure");
    assert_eq!(error.code(), ErrorCode::StoreFailure);
}

#[tokio::test]
async fn client_errors_are_not_reported() {
    let mut reporter = MockErrorReporter::new();
    reporter.expect_report().times(0);

    let service = UserAccessService::new(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemoryUserCache::new()),
        Arc::new(RecordingUserQueue::new()),
    )
    .with_error_reporter(Arc::new(reporter));

    let missing = service.get_user(UserId::new(1)).await.expect_err("missing");
    let invalid = service
        .create_user(UserInput::new("", ""))
        .await
        .expect_err("invalid");

    assert_eq!(missing.code(), ErrorCode::NotFound);
    assert_eq!(invalid.code(), ErrorCode::InvalidRequest);
}
