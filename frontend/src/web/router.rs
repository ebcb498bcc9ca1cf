//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 每次导航都交给 `RouteContext::before_each` 决定：放行、跳转或在路由注册完成后重放。

use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;
use menuroute::Router as _;
use menuroute::{MemoryRouter, NavigationDecision, NavigationTarget, RouteContext};
use menuroute_shared::RouteNode;
use wasm_bindgen::prelude::*;

use super::{HttpRouteSource, SessionStorage};

/// 应用使用的路由上下文
pub type AppContext = RouteContext<Rc<MemoryRouter>, SessionStorage, HttpRouteSource>;

/// 单次导航最多跟随的跳转次数
const MAX_HOPS: usize = 5;

/// 获取当前浏览器地址（path + query）
fn current_url() -> String {
    let Some(location) = web_sys::window().map(|w| w.location()) else {
        return "/".to_string();
    };
    let path = location.pathname().unwrap_or_else(|_| "/".to_string());
    let search = location.search().unwrap_or_default();
    format!("{}{}", path, search)
}

/// 当前浏览器地址解析成的导航目标
pub fn current_location() -> NavigationTarget {
    NavigationTarget::parse(&current_url())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向与重放）
fn replace_history_state(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(url));
        }
    }
}

fn set_document_title(title: &str) {
    if let Some(document) = web_sys::window().and_then(|w| w.document()) {
        document.set_title(title);
    }
}

/// 路由器服务
///
/// 路由上下文不是 `Send`，通过 `StoredValue::new_local` 保存在当前线程；
/// 当前路由与状态版本号通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    ctx: StoredValue<Rc<AppContext>, LocalStorage>,
    /// 当前匹配到的路由记录（只读信号）
    current_route: ReadSignal<Option<RouteNode>>,
    set_route: WriteSignal<Option<RouteNode>>,
    /// 共享状态的版本号，变化时菜单、标签页等重新读取快照
    revision: ReadSignal<u64>,
    set_revision: WriteSignal<u64>,
}

impl RouterService {
    fn new(ctx: Rc<AppContext>) -> Self {
        let (current_route, set_route) = signal(None);
        let (revision, set_revision) = signal(ctx.state().revision());
        Self {
            ctx: StoredValue::new_local(ctx),
            current_route,
            set_route,
            revision,
            set_revision,
        }
    }

    pub fn context(&self) -> Rc<AppContext> {
        self.ctx.get_value()
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<Option<RouteNode>> {
        self.current_route
    }

    pub fn revision(&self) -> ReadSignal<u64> {
        self.revision
    }

    /// 共享状态发生写入后调用，通知界面刷新
    pub fn sync_state(&self) {
        let revision = self.ctx.with_value(|ctx| ctx.state().revision());
        self.set_revision.set(revision);
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, url: &str) {
        self.navigate_to(NavigationTarget::parse(url), true);
    }

    /// 导航到指定地址
    ///
    /// # Arguments
    /// * `target` - 目标地址
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to(&self, target: NavigationTarget, use_push: bool) {
        let service = *self;
        spawn_local(async move {
            service.run_guard(target, use_push).await;
        });
    }

    async fn run_guard(self, mut target: NavigationTarget, mut use_push: bool) {
        let ctx = self.context();

        for _ in 0..MAX_HOPS {
            let decision = match ctx.before_each(&target).await {
                Ok(decision) => decision,
                Err(e) => {
                    web_sys::console::error_1(&format!("[Router] guard failed: {}", e).into());
                    self.sync_state();
                    return;
                }
            };

            match decision {
                // --- 加载页面 (更新状态) ---
                NavigationDecision::Proceed { title } => {
                    let matched = ctx.router().resolve(&target.path);
                    // 路由记录自带 redirect（如 `/` → `/home`）
                    if let Some(redirect) = matched.as_ref().and_then(|r| r.redirect.clone()) {
                        target = NavigationTarget::parse(&redirect);
                        use_push = false;
                        continue;
                    }

                    let url = target.to_url();
                    if use_push {
                        push_history_state(&url);
                    } else {
                        replace_history_state(&url);
                    }
                    set_document_title(&title);
                    self.set_route.set(matched);
                    self.sync_state();
                    return;
                }
                NavigationDecision::Redirect(url) => {
                    web_sys::console::log_1(&format!("[Router] redirecting to {}", url).into());
                    target = NavigationTarget::parse(&url);
                }
                // 路由刚注册完成，以 replace 方式重新导航
                NavigationDecision::Replay(again) => {
                    target = again;
                    use_push = false;
                }
            }
        }

        web_sys::console::error_1(
            &format!("[Router] too many redirects, stopped at {}", target.path).into(),
        );
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let service = *self;

        // popstate 时也执行守卫逻辑
        let closure = Closure::<dyn Fn()>::new(move || {
            service.navigate_to(current_location(), false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并完成首次导航
fn provide_router(ctx: Rc<AppContext>) -> RouterService {
    let router = RouterService::new(ctx);

    router.init_popstate_listener();
    router.navigate_to(current_location(), false);

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 已组装好的路由上下文
    ctx: Rc<AppContext>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(ctx);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件，首次导航完成前不渲染。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由记录，返回对应视图
    matcher: fn(RouteNode) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || router.current_route().get().map(matcher)
}

/// 站内链接，点击时走路由服务而不是整页刷新
#[component]
pub fn Link(
    /// 目标地址
    #[prop(into)]
    to: String,
    #[prop(optional, into)] class: String,
    /// 子内容
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
