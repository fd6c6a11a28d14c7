use super::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

// =========================================================
// Shared Mock Components
// =========================================================

struct TestContext {
    /// Operation log to verify calling order
    log: RefCell<Vec<String>>,
    /// The single persisted token slot
    slot: RefCell<Option<String>>,
    fail_login: Cell<bool>,
    fail_register: Cell<bool>,
    fail_profile: Cell<bool>,
}

impl TestContext {
    fn new() -> Rc<Self> {
        Rc::new(Self {
            log: RefCell::new(Vec::new()),
            slot: RefCell::new(None),
            fail_login: Cell::new(false),
            fail_register: Cell::new(false),
            fail_profile: Cell::new(false),
        })
    }

    fn push_log(&self, msg: String) {
        self.log.borrow_mut().push(msg);
    }

    /// Only the network-facing entries of the log
    fn gateway_calls(&self) -> Vec<String> {
        self.log
            .borrow()
            .iter()
            .filter(|entry| entry.starts_with("gateway:"))
            .cloned()
            .collect()
    }
}

struct MockGateway {
    ctx: Rc<TestContext>,
}

#[async_trait(?Send)]
impl AuthGateway for MockGateway {
    async fn login(&self, email: &str, _password: &str) -> Result<TokenGrant, ApiError> {
        self.ctx.push_log(format!("gateway:login:{email}"));
        if self.ctx.fail_login.get() {
            return Err(ApiError::new(401, "Invalid credentials"));
        }
        Ok(TokenGrant {
            access_token: "tok-1".to_string(),
            token_type: "bearer".to_string(),
        })
    }

    async fn register(&self, name: &str, _email: &str, _password: &str) -> Result<User, ApiError> {
        self.ctx.push_log(format!("gateway:register:{name}"));
        if self.ctx.fail_register.get() {
            return Err(ApiError::new(400, "Email already registered"));
        }
        Ok(sample_user("user"))
    }

    async fn profile(&self, token: &str) -> Result<User, ApiError> {
        self.ctx.push_log(format!("gateway:profile:{token}"));
        if self.ctx.fail_profile.get() {
            return Err(ApiError::new(401, "Could not validate credentials"));
        }
        Ok(sample_user("user"))
    }
}

struct MockSlot {
    ctx: Rc<TestContext>,
}

impl TokenSlot for MockSlot {
    fn load(&self) -> Option<String> {
        self.ctx.push_log("slot:load".to_string());
        self.ctx.slot.borrow().clone()
    }

    fn store(&self, token: &str) {
        self.ctx.push_log(format!("slot:store:{token}"));
        *self.ctx.slot.borrow_mut() = Some(token.to_string());
    }

    fn clear(&self) {
        self.ctx.push_log("slot:clear".to_string());
        *self.ctx.slot.borrow_mut() = None;
    }
}

fn sample_user(role: &str) -> User {
    User {
        id: 7,
        name: "Ana".to_string(),
        email: "a@b.com".to_string(),
        role: role.to_string(),
    }
}

fn new_store(ctx: &Rc<TestContext>) -> SessionStore<MockGateway, MockSlot> {
    SessionStore::new(
        MockGateway { ctx: ctx.clone() },
        MockSlot { ctx: ctx.clone() },
    )
}

/// currentUser 与 authToken 当且仅当 Authenticated 时存在
fn invariant_holds(session: &Session) -> bool {
    match session {
        Session::Authenticated { .. } => session.user().is_some() && session.token().is_some(),
        _ => session.user().is_none() && session.token().is_none(),
    }
}

// =========================================================
// Startup (restore)
// =========================================================

#[tokio::test]
async fn restore_without_token_goes_unauthenticated() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    assert_eq!(store.snapshot(), Session::Initializing);

    store.restore().await;

    assert_eq!(store.snapshot(), Session::Unauthenticated);
    // No network call happens when there is nothing to validate
    assert!(ctx.gateway_calls().is_empty());
}

#[tokio::test]
async fn restore_with_valid_token_authenticates() {
    let ctx = TestContext::new();
    *ctx.slot.borrow_mut() = Some("tok-persisted".to_string());
    let store = new_store(&ctx);

    store.restore().await;

    let session = store.snapshot();
    assert!(session.is_authenticated());
    assert_eq!(session.token(), Some("tok-persisted"));
    assert_eq!(ctx.gateway_calls(), vec!["gateway:profile:tok-persisted"]);
}

#[tokio::test]
async fn restore_with_rejected_token_recovers_silently() {
    let ctx = TestContext::new();
    *ctx.slot.borrow_mut() = Some("tok-stale".to_string());
    ctx.fail_profile.set(true);
    let store = new_store(&ctx);

    // restore never fails; recovery is a silent, expected path
    store.restore().await;

    assert_eq!(store.snapshot(), Session::Unauthenticated);
    assert_eq!(*ctx.slot.borrow(), None);
    assert_eq!(
        *ctx.log.borrow(),
        vec!["slot:load", "gateway:profile:tok-stale", "slot:clear"]
    );
}

// =========================================================
// Login / Register
// =========================================================

#[tokio::test]
async fn login_exchanges_credentials_then_fetches_profile() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    store.restore().await;

    store.login("a@b.com", "secret").await.unwrap();

    // Exactly two network calls, strictly in order
    assert_eq!(
        ctx.gateway_calls(),
        vec!["gateway:login:a@b.com", "gateway:profile:tok-1"]
    );
    let session = store.snapshot();
    assert_eq!(session.user(), Some(&sample_user("user")));
    assert_eq!(session.token(), Some("tok-1"));
    assert!(invariant_holds(&session));
    assert_eq!(*ctx.slot.borrow(), Some("tok-1".to_string()));
}

#[tokio::test]
async fn failed_credential_exchange_leaves_state_unchanged() {
    let ctx = TestContext::new();
    ctx.fail_login.set(true);
    let store = new_store(&ctx);
    store.restore().await;

    let err = store.login("a@b.com", "wrong").await.unwrap_err();

    assert_eq!(err.status, 401);
    assert_eq!(store.snapshot(), Session::Unauthenticated);
    assert_eq!(*ctx.slot.borrow(), None);
    // Profile fetch must never start after a failed exchange
    assert_eq!(ctx.gateway_calls(), vec!["gateway:login:a@b.com"]);
}

#[tokio::test]
async fn profile_failure_after_grant_is_contained() {
    let ctx = TestContext::new();
    ctx.fail_profile.set(true);
    let store = new_store(&ctx);
    store.restore().await;

    let err = store.login("a@b.com", "secret").await.unwrap_err();

    // No half-authenticated state: token cleared, back to unauthenticated
    assert_eq!(err.status, 401);
    assert_eq!(store.snapshot(), Session::Unauthenticated);
    assert_eq!(*ctx.slot.borrow(), None);
    let log = ctx.log.borrow();
    let store_pos = log.iter().position(|e| e == "slot:store:tok-1").unwrap();
    let clear_pos = log.iter().position(|e| e == "slot:clear").unwrap();
    assert!(store_pos < clear_pos);
}

#[tokio::test]
async fn register_creates_account_then_logs_in() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    store.restore().await;

    store.register("Ana", "a@b.com", "secret").await.unwrap();

    assert_eq!(
        ctx.gateway_calls(),
        vec![
            "gateway:register:Ana",
            "gateway:login:a@b.com",
            "gateway:profile:tok-1"
        ]
    );
    assert!(store.is_authenticated());
}

#[tokio::test]
async fn register_failure_reports_first_error() {
    let ctx = TestContext::new();
    ctx.fail_register.set(true);
    let store = new_store(&ctx);
    store.restore().await;

    let err = store.register("Ana", "a@b.com", "secret").await.unwrap_err();

    assert_eq!(err.message, "Email already registered");
    assert_eq!(store.snapshot(), Session::Unauthenticated);
    assert_eq!(ctx.gateway_calls(), vec!["gateway:register:Ana"]);
}

// =========================================================
// Logout & invariants
// =========================================================

#[tokio::test]
async fn logout_revokes_authenticated_session() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    store.restore().await;
    store.login("a@b.com", "secret").await.unwrap();

    store.logout();

    assert_eq!(store.snapshot(), Session::Unauthenticated);
    assert_eq!(*ctx.slot.borrow(), None);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    store.restore().await;

    store.logout();
    store.logout();

    assert_eq!(store.snapshot(), Session::Unauthenticated);
}

#[tokio::test]
async fn invariant_holds_across_all_reachable_states() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    assert!(invariant_holds(&store.snapshot()));

    store.restore().await;
    assert!(invariant_holds(&store.snapshot()));

    ctx.fail_login.set(true);
    let _ = store.login("a@b.com", "wrong").await;
    assert!(invariant_holds(&store.snapshot()));

    ctx.fail_login.set(false);
    store.login("a@b.com", "secret").await.unwrap();
    assert!(invariant_holds(&store.snapshot()));

    store.logout();
    assert!(invariant_holds(&store.snapshot()));
}

#[tokio::test]
async fn subscribers_observe_every_transition() {
    let ctx = TestContext::new();
    let store = new_store(&ctx);
    let seen: Rc<RefCell<Vec<Session>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = seen.clone();
    store.subscribe(move |session| sink.borrow_mut().push(session.clone()));

    store.restore().await;
    store.login("a@b.com", "secret").await.unwrap();
    store.logout();

    let seen = seen.borrow();
    assert_eq!(seen.len(), 3);
    assert_eq!(seen[0], Session::Unauthenticated);
    assert!(seen[1].is_authenticated());
    assert_eq!(seen[2], Session::Unauthenticated);
}

#[tokio::test]
async fn admin_flag_follows_the_server_role_tag() {
    let session = Session::Authenticated {
        user: sample_user("admin"),
        token: "tok-1".to_string(),
    };
    assert!(session.is_admin());

    let session = Session::Authenticated {
        user: sample_user("user"),
        token: "tok-1".to_string(),
    };
    assert!(!session.is_admin());
    assert!(!Session::Unauthenticated.is_admin());
}
