use super::*;
use crate::adapter::tests::MockSession;
use crate::guard::{NavigationDecision, NavigationTarget};
use crate::router::MemoryRouter;
use crate::view::ViewRegistry;
use async_trait::async_trait;
use menuroute_shared::{ComponentRef, RouteMeta, SESSION_TOKEN_KEY};
use std::cell::RefCell;

// =========================================================
// Shared Mock Components
// =========================================================

struct TestSource {
    log: Rc<RefCell<Vec<String>>>,
    routes: RefCell<RouteResult<Vec<RouteNode>>>,
}

impl TestSource {
    fn new(log: Rc<RefCell<Vec<String>>>, routes: Vec<RouteNode>) -> Self {
        Self {
            log,
            routes: RefCell::new(Ok(routes)),
        }
    }

    fn failing(log: Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            log,
            routes: RefCell::new(Err(RouteError::upstream("menu endpoint unreachable"))),
        }
    }
}

#[async_trait(?Send)]
impl RouteSource for TestSource {
    async fn fetch_routes(&self) -> RouteResult<Vec<RouteNode>> {
        self.log.borrow_mut().push("source:fetch".to_string());
        // 让出一次，模拟网络等待
        tokio::task::yield_now().await;
        match &*self.routes.borrow() {
            Ok(routes) => Ok(routes.clone()),
            Err(e) => Err(RouteError::new(e.status, e.message.clone())),
        }
    }
}

type TestContext = RouteContext<Rc<MemoryRouter>, Rc<MockSession>, TestSource>;

struct Harness {
    ctx: TestContext,
    router: Rc<MemoryRouter>,
    session: Rc<MockSession>,
    log: Rc<RefCell<Vec<String>>>,
}

fn declared_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new("/", "layout")
            .with_component(ComponentRef::view("layout/index"))
            .with_redirect("/home")
            .with_meta(RouteMeta::titled("layout").keep_alive())
            .with_children(vec![
                RouteNode::new("/home", "home")
                    .with_meta(RouteMeta::titled("home").with_roles(["admin", "common"]).keep_alive()),
                RouteNode::new("/user", "user")
                    .with_meta(RouteMeta::titled("user").with_roles(["admin"])),
                RouteNode::new("/user/:id", "userDetail")
                    .with_meta(RouteMeta::titled("detail").with_roles(["admin"]).hidden()),
                RouteNode::new("/untitled", "untitled")
                    .with_meta(RouteMeta::default().with_roles(["admin", "common"])),
            ]),
    ]
}

fn remote_routes() -> Vec<RouteNode> {
    vec![
        RouteNode::new("/home", "home")
            .with_component(ComponentRef::Path("/src/views/home/index.vue".into()))
            .with_meta(RouteMeta::titled("home").keep_alive()),
        RouteNode::new("/system", "system")
            .with_component(ComponentRef::Path("layout/routerView/parent".into()))
            .with_meta(RouteMeta::titled("system"))
            .with_children(vec![RouteNode::new("/system/menu", "systemMenu")
                .with_component(ComponentRef::Path("/src/views/system/menu/index.vue".into()))
                .with_meta(RouteMeta::titled("menu"))]),
    ]
}

fn static_routes() -> Vec<RouteNode> {
    vec![RouteNode::new("/login", "login").with_meta(RouteMeta::titled("login"))]
}

fn harness(mode: ControlMode, source: impl FnOnce(Rc<RefCell<Vec<String>>>) -> TestSource) -> Harness {
    let log = Rc::new(RefCell::new(Vec::new()));
    let router = Rc::new(MemoryRouter::new());
    let session = Rc::new(MockSession::new());
    let views: Rc<dyn ViewLookup> = Rc::new(
        ViewRegistry::new()
            .register("home/index", ())
            .register("system/menu/index", ())
            .register("layout/routerView/parent", ()),
    );
    let config = RouterConfig {
        mode,
        app_title: "Admin".into(),
        ..Default::default()
    };
    let ctx = RouteContext::new(config, router.clone(), session.clone(), source(log.clone()), views)
        .with_static_routes(static_routes())
        .with_dynamic_routes(declared_routes());
    Harness {
        ctx,
        router,
        session,
        log,
    }
}

fn front_end() -> Harness {
    harness(ControlMode::FrontEnd, |log| TestSource::new(log, remote_routes()))
}

fn back_end(routes: Vec<RouteNode>) -> Harness {
    harness(ControlMode::BackEnd, |log| TestSource::new(log, routes))
}

fn login(session: &MockSession, role: &str) {
    session.set(SESSION_TOKEN_KEY, "t0k3n");
    session.set(
        SESSION_USER_INFO_KEY,
        &format!(r#"{{"userName":"tester","roles":["{}"]}}"#, role),
    );
}

fn route_names(nodes: &[RouteNode]) -> Vec<String> {
    nodes.iter().map(|n| n.name.clone()).collect()
}

// =========================================================
// 前端控制路由
// =========================================================

#[test]
fn test_front_end_without_token_is_a_no_op() {
    let h = front_end();
    let revision = h.ctx.state().revision();
    let registered = h.router.get_routes().len();

    let outcome = h.ctx.init_front_end_control_routes().unwrap();
    assert_eq!(outcome, InitOutcome::NoSession);
    assert!(!outcome.is_proceeding());
    assert_eq!(h.router.get_routes().len(), registered);
    assert_eq!(h.ctx.state().revision(), revision);
}

#[test]
fn test_front_end_admin_init_publishes_state() {
    let h = front_end();
    login(&h.session, "admin");

    let outcome = h.ctx.init_front_end_control_routes().unwrap();
    assert_eq!(outcome, InitOutcome::Committed { routes: 6 });

    let snapshot = h.ctx.state().snapshot();
    assert_eq!(
        route_names(&snapshot.route_list),
        vec!["home", "user", "userDetail", "untitled", "notFound", "noPower"]
    );
    assert_eq!(
        route_names(&snapshot.tags_view_routes),
        vec!["home", "user", "untitled"]
    );
    assert_eq!(snapshot.request_old_routes, snapshot.tags_view_routes);
    assert_eq!(snapshot.keep_alive_names, vec!["home"]);
    assert_eq!(snapshot.menu_list.len(), 4);

    let detail = &snapshot.route_list[2];
    assert!(detail.meta.is_dynamic);
    assert_eq!(detail.meta.is_dynamic_path.as_deref(), Some("/user/:id"));

    assert!(h.router.has_route("layout"));
    assert!(h.router.has_route("userDetail"));
    assert!(h.router.has_route("login"));
}

#[test]
fn test_front_end_common_role_is_filtered() {
    let h = front_end();
    login(&h.session, "common");

    h.ctx.init_front_end_control_routes().unwrap();
    let snapshot = h.ctx.state().snapshot();
    assert_eq!(
        route_names(&snapshot.route_list),
        vec!["home", "untitled", "notFound", "noPower"]
    );
    assert!(!h.router.has_route("user"));
}

#[test]
fn test_front_end_repeated_init_keeps_single_fallbacks() {
    let h = front_end();
    login(&h.session, "admin");

    h.ctx.init_front_end_control_routes().unwrap();
    h.ctx.init_front_end_control_routes().unwrap();

    let named: Vec<_> = h
        .router
        .get_routes()
        .into_iter()
        .filter_map(|r| r.name)
        .filter(|n| n == "notFound")
        .collect();
    assert_eq!(named.len(), 1);
    let list = h.ctx.state().route_list();
    assert_eq!(list.iter().filter(|r| r.name == "noPower").count(), 1);
}

#[test]
fn test_front_end_corrupt_user_info_is_an_error() {
    let h = front_end();
    h.session.set(SESSION_TOKEN_KEY, "t0k3n");
    h.session.set(SESSION_USER_INFO_KEY, "not json");

    let err = h.ctx.init_front_end_control_routes().unwrap_err();
    assert_eq!(err.status, crate::error::RouteErrorStatus::Serialization);
}

// =========================================================
// 后端控制路由
// =========================================================

#[tokio::test]
async fn test_back_end_without_token_is_a_no_op() {
    let h = back_end(remote_routes());
    let outcome = h.ctx.init_back_end_control_routes().await.unwrap();
    assert_eq!(outcome, InitOutcome::NoSession);
    assert!(h.log.borrow().is_empty());
    assert!(h.ctx.state().route_list_is_empty());
    assert!(!h.router.has_route("layout"));
}

#[tokio::test]
async fn test_back_end_empty_grant_is_success() {
    let h = back_end(Vec::new());
    login(&h.session, "admin");

    let outcome = h.ctx.init_back_end_control_routes().await.unwrap();
    assert_eq!(outcome, InitOutcome::Empty);
    assert!(outcome.is_proceeding());
    assert!(h.ctx.state().route_list_is_empty());
    assert!(h.ctx.state().no_grant());
    assert!(!h.router.has_route("layout"));
}

#[tokio::test]
async fn test_back_end_init_resolves_and_commits() {
    let h = back_end(remote_routes());
    login(&h.session, "admin");

    let outcome = h.ctx.init_all().await.unwrap();
    assert_eq!(outcome, InitOutcome::Committed { routes: 5 });

    let snapshot = h.ctx.state().snapshot();
    assert_eq!(
        route_names(&snapshot.route_list),
        vec!["home", "system", "systemMenu", "notFound", "noPower"]
    );
    assert_eq!(
        snapshot.route_list[2].component,
        Some(ComponentRef::view("system/menu/index"))
    );
    assert_eq!(snapshot.keep_alive_names, vec!["home"]);
    assert!(snapshot.request_old_routes.is_empty());
    assert_eq!(h.router.resolve("/system/menu").unwrap().name, "systemMenu");
}

#[tokio::test]
async fn test_back_end_concurrent_init_fetches_once() {
    let h = back_end(remote_routes());
    login(&h.session, "admin");

    let (a, b) = futures::join!(
        h.ctx.init_back_end_control_routes(),
        h.ctx.init_back_end_control_routes()
    );
    let outcomes = [a.unwrap(), b.unwrap()];
    assert!(outcomes.contains(&InitOutcome::Committed { routes: 5 }));
    assert!(outcomes.contains(&InitOutcome::AlreadyLoaded));
    assert_eq!(*h.log.borrow(), vec!["source:fetch"]);
}

#[tokio::test]
async fn test_back_end_transport_failure_propagates() {
    let h = harness(ControlMode::BackEnd, TestSource::failing);
    login(&h.session, "admin");

    let err = h.ctx.init_back_end_control_routes().await.unwrap_err();
    assert_eq!(err.status, crate::error::RouteErrorStatus::Upstream);
    assert_eq!(err.spans()[0].operation, "init.back_end");
    assert!(h.ctx.state().route_list_is_empty());
}

// =========================================================
// 登出与重新初始化
// =========================================================

#[tokio::test]
async fn test_logout_clears_everything_but_static_routes() {
    let h = back_end(remote_routes());
    login(&h.session, "admin");
    h.ctx.init_all().await.unwrap();

    h.ctx.logout();
    assert!(!h.ctx.has_token());
    assert!(h.ctx.state().route_list_is_empty());
    assert!(h.ctx.state().keep_alive_names().is_empty());
    assert!(!h.router.has_route("layout"));
    assert!(!h.router.has_route("systemMenu"));
    assert!(h.router.has_route("login"));
}

#[tokio::test]
async fn test_reinitialize_switches_mode() {
    let h = back_end(remote_routes());
    login(&h.session, "common");
    h.ctx.init_all().await.unwrap();
    assert!(h.router.has_route("system"));

    let outcome = h.ctx.reinitialize(ControlMode::FrontEnd).await.unwrap();
    assert_eq!(outcome, InitOutcome::Committed { routes: 4 });
    assert_eq!(h.ctx.state().mode(), ControlMode::FrontEnd);
    assert!(!h.router.has_route("system"));
    assert!(h.router.has_route("untitled"));
}

// =========================================================
// 导航守卫
// =========================================================

#[tokio::test]
async fn test_guard_login_page_without_token() {
    let h = front_end();
    let decision = h.ctx.before_each(&NavigationTarget::new("/login")).await.unwrap();
    assert_eq!(
        decision,
        NavigationDecision::Proceed {
            title: "login - Admin".into()
        }
    );
}

#[tokio::test]
async fn test_guard_redirects_anonymous_to_login() {
    let h = front_end();
    h.session.set("stale", "value");
    let target = NavigationTarget::new("/user").with_query("tab", "1");

    let decision = h.ctx.before_each(&target).await.unwrap();
    assert_eq!(
        decision,
        NavigationDecision::Redirect("/login?params=%7B%22tab%22%3A%221%22%7D&redirect=/user".into())
    );
    assert!(h.session.get("stale").is_none());
}

#[tokio::test]
async fn test_guard_sends_logged_in_user_home() {
    let h = front_end();
    login(&h.session, "admin");
    let decision = h.ctx.before_each(&NavigationTarget::new("/login")).await.unwrap();
    assert_eq!(decision, NavigationDecision::Redirect("/home".into()));
}

#[tokio::test]
async fn test_guard_first_back_end_navigation_replays() {
    let h = back_end(remote_routes());
    login(&h.session, "admin");
    let target = NavigationTarget::new("/system/menu");

    let decision = h.ctx.before_each(&target).await.unwrap();
    assert_eq!(decision, NavigationDecision::Replay(target.clone()));

    let decision = h.ctx.before_each(&target).await.unwrap();
    assert_eq!(
        decision,
        NavigationDecision::Proceed {
            title: "menu - Admin".into()
        }
    );
    assert_eq!(*h.log.borrow(), vec!["source:fetch"]);
}

#[tokio::test]
async fn test_guard_empty_grant_goes_to_no_power_once() {
    let h = back_end(Vec::new());
    login(&h.session, "admin");

    let decision = h.ctx.before_each(&NavigationTarget::new("/home")).await.unwrap();
    assert_eq!(decision, NavigationDecision::Redirect("/401".into()));

    // 不再重复请求
    h.ctx.before_each(&NavigationTarget::new("/home")).await.unwrap();
    assert_eq!(h.log.borrow().len(), 1);
}

#[tokio::test]
async fn test_guard_untitled_routes() {
    let h = front_end();
    login(&h.session, "admin");
    h.ctx.init_all().await.unwrap();

    // 未声明的路径落到兜底路由
    let decision = h.ctx.before_each(&NavigationTarget::new("/nope")).await.unwrap();
    assert!(matches!(decision, NavigationDecision::Proceed { .. }));

    // 无标题但已注册的路由照常放行
    let decision = h.ctx.before_each(&NavigationTarget::new("/untitled")).await.unwrap();
    assert_eq!(
        decision,
        NavigationDecision::Proceed {
            title: "Admin".into()
        }
    );
}

#[tokio::test]
async fn test_guard_unmatched_path_without_fallback_is_not_found() {
    let h = front_end();
    login(&h.session, "admin");
    // 还未初始化，路由器中只有登录页

    let decision = h.ctx.before_each(&NavigationTarget::new("/home")).await.unwrap();
    assert_eq!(decision, NavigationDecision::Redirect("/error/404".into()));
}
