//! End-to-end HTTP behaviour over the composed application.
//!
//! Real handlers, JSON config, and trace middleware run against the in-memory
//! store, cache, and queue doubles so the full cache-aside path is visible.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use users_service::Trace;
use users_service::domain::ports::{HealthCheck, QueueName, UserAccess, UserCacheError};
use users_service::domain::{
    DependencyHealthService, TRACE_ID_HEADER, User, UserAccessService, UserId,
};
use users_service::inbound::http::configure;
use users_service::inbound::http::health::{HealthState, live, ready};
use users_service::inbound::http::state::HttpState;
use users_service::test_support::users::{
    CacheOp, CallLog, InMemoryUserCache, InMemoryUserRepository, RecordingUserQueue,
};

struct World {
    log: CallLog,
    repository: Arc<InMemoryUserRepository>,
    cache: Arc<InMemoryUserCache>,
    queue: Arc<RecordingUserQueue>,
}

#[fixture]
fn world() -> World {
    let log = CallLog::new();
    World {
        repository: Arc::new(InMemoryUserRepository::new().with_log(log.clone())),
        cache: Arc::new(InMemoryUserCache::new().with_log(log.clone())),
        queue: Arc::new(RecordingUserQueue::new().with_log(log.clone())),
        log,
    }
}

impl World {
    fn state(&self) -> HttpState {
        let users: Arc<dyn UserAccess> = Arc::new(UserAccessService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.cache),
            Arc::clone(&self.queue),
        ));
        let health: Arc<dyn HealthCheck> = Arc::new(DependencyHealthService::new(
            Arc::clone(&self.repository),
            Arc::clone(&self.cache),
        ));
        HttpState::new(users, health)
    }

    fn seed(&self, count: i64) {
        for id in 1..=count {
            self.repository.insert(User::from_parts(
                UserId::new(id),
                format!("user{id}"),
                format!("user{id}@example.com"),
            ));
        }
    }

    fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        App::new()
            .app_data(health_state)
            .app_data(web::Data::new(self.state()))
            .wrap(Trace)
            .configure(configure)
            .service(ready)
            .service(live)
    }
}

async fn body_json(response: ServiceResponse) -> Value {
    let bytes = actix_test::read_body(response).await;
    serde_json::from_slice(&bytes).expect("json body")
}

#[rstest]
#[actix_web::test]
async fn created_user_is_served_from_cache(world: World) {
    let app = actix_test::init_service(world.app()).await;

    let created = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(created.status(), StatusCode::CREATED);
    assert!(created.headers().contains_key(TRACE_ID_HEADER));
    let body = body_json(created).await;
    assert_eq!(body["name"], json!("Ada"));
    let id = body["id"].as_i64().expect("numeric id");

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/user/{id}"))
            .to_request(),
    )
    .await;

    assert_eq!(fetched.status(), StatusCode::OK);
    assert_eq!(
        body_json(fetched).await,
        json!({"id": id, "name": "Ada", "email": "ada@example.com"})
    );
    assert_eq!(world.repository.reads(), 0);
    assert_eq!(
        world.queue.jobs(),
        vec![(QueueName::create_user(), UserId::new(id))]
    );
}

#[rstest]
#[actix_web::test]
async fn miss_refills_cache_then_hits(world: World) {
    world.seed(3);
    let app = actix_test::init_service(world.app()).await;

    for _ in 0..2 {
        let response = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/user/2").to_request(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["email"], json!("user2@example.com"));
    }

    assert_eq!(world.repository.reads(), 1);
    assert!(world.cache.entry(UserId::new(2)).is_some());
}

#[rstest]
#[case("/users?start=1&count=2", vec![2, 3])]
#[case("/users?start=4&count=10", vec![5])]
#[case("/users?start=9", vec![])]
#[case("/users?count=99", vec![1, 2, 3, 4, 5])]
#[actix_web::test]
async fn list_pages_through_store(world: World, #[case] uri: &str, #[case] expected: Vec<i64>) {
    world.seed(5);
    let app = actix_test::init_service(world.app()).await;

    let response =
        actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;

    assert_eq!(response.status(), StatusCode::OK);
    let ids: Vec<i64> = body_json(response)
        .await
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|user| user["id"].as_i64())
        .collect();
    assert_eq!(ids, expected);
    assert!(world.log.entries().iter().all(|entry| !entry.starts_with("cache.")));
}

#[rstest]
#[actix_web::test]
async fn update_replaces_record_and_next_read_sees_it(world: World) {
    world.seed(1);
    let app = actix_test::init_service(world.app()).await;

    let warm = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/user/1").to_request(),
    )
    .await;
    assert_eq!(warm.status(), StatusCode::OK);

    let updated = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri("/user/1")
            .set_json(json!({"name": "Grace", "email": "grace@example.com"}))
            .to_request(),
    )
    .await;
    assert_eq!(updated.status(), StatusCode::OK);

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/user/1").to_request(),
    )
    .await;
    assert_eq!(
        body_json(fetched).await,
        json!({"id": 1, "name": "Grace", "email": "grace@example.com"})
    );
}

#[rstest]
#[actix_web::test]
async fn deleted_user_is_not_found(world: World) {
    world.seed(1);
    let app = actix_test::init_service(world.app()).await;

    let deleted = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete().uri("/user/1").to_request(),
    )
    .await;
    assert_eq!(deleted.status(), StatusCode::OK);
    assert_eq!(body_json(deleted).await, json!({"result": "success"}));

    let fetched = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/user/1").to_request(),
    )
    .await;
    assert_eq!(fetched.status(), StatusCode::NOT_FOUND);
    assert!(fetched.headers().contains_key(TRACE_ID_HEADER));
    assert_eq!(body_json(fetched).await, json!({"error": "User not found"}));
}

#[rstest]
#[actix_web::test]
async fn cache_outage_on_create_skips_enqueue(world: World) {
    world
        .cache
        .fail(CacheOp::Set, UserCacheError::connection("redis down"));
    let app = actix_test::init_service(world.app()).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/user")
            .set_json(json!({"name": "Ada", "email": "ada@example.com"}))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(world.queue.jobs().is_empty());
}

#[rstest]
#[actix_web::test]
async fn healthcheck_reports_dependencies(world: World) {
    let app = actix_test::init_service(world.app()).await;

    let healthy = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/healthcheck").to_request(),
    )
    .await;
    assert_eq!(healthy.status(), StatusCode::OK);
    assert_eq!(actix_test::read_body(healthy).await, "OK");

    world
        .cache
        .fail(CacheOp::Ping, UserCacheError::connection("redis down"));
    let degraded = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/healthcheck").to_request(),
    )
    .await;
    assert_eq!(degraded.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(actix_test::read_body(degraded).await, "CRITICAL");
}

#[rstest]
#[actix_web::test]
async fn probes_answer(world: World) {
    let app = actix_test::init_service(world.app()).await;

    for uri in ["/health/ready", "/health/live"] {
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
