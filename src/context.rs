//! 路由上下文
//!
//! 把路由器、会话、远程路由源、视图注册表与共享状态组装在一起，
//! 对外提供初始化、登出与导航守卫。

use std::rc::Rc;

use crate::adapter::{RouteSource, Router, SessionStore};
use crate::builder::back_end::build_back_end_table;
use crate::builder::front_end::build_front_end_table;
use crate::builder::{BuiltTable, InitOutcome};
use crate::config::{ControlMode, RouterConfig};
use crate::error::{RouteError, RouteResult};
use crate::latch::InitLatch;
use crate::registry::RouteRegistry;
use crate::state::RouteState;
use crate::view::ViewLookup;
use menuroute_shared::{ROOT_PATH, RouteNode, SESSION_USER_INFO_KEY, UserInfo, not_found_and_no_power};

pub struct RouteContext<R, S, Src> {
    pub(crate) config: RouterConfig,
    pub(crate) state: Rc<RouteState>,
    pub(crate) registry: RouteRegistry<R>,
    pub(crate) session: S,
    source: Src,
    views: Rc<dyn ViewLookup>,
    /// 登录页等无需权限的路由，登出后重新注册
    static_routes: Vec<RouteNode>,
    /// 前端控制路由时声明的路由树
    dynamic_routes: Vec<RouteNode>,
    fallbacks: Vec<RouteNode>,
    latch: InitLatch,
}

impl<R, S, Src> RouteContext<R, S, Src>
where
    R: Router,
    S: SessionStore,
    Src: RouteSource,
{
    pub fn new(
        config: RouterConfig,
        router: R,
        session: S,
        source: Src,
        views: Rc<dyn ViewLookup>,
    ) -> Self {
        let state = Rc::new(RouteState::new(config.mode));
        Self {
            config,
            state,
            registry: RouteRegistry::new(router),
            session,
            source,
            views,
            static_routes: Vec::new(),
            dynamic_routes: Vec::new(),
            fallbacks: not_found_and_no_power(),
            latch: InitLatch::new(),
        }
    }

    /// 注册静态路由
    pub fn with_static_routes(mut self, routes: Vec<RouteNode>) -> Self {
        self.registry.commit(&routes);
        self.static_routes = routes;
        self
    }

    pub fn with_dynamic_routes(mut self, routes: Vec<RouteNode>) -> Self {
        self.dynamic_routes = routes;
        self
    }

    pub fn with_fallbacks(mut self, fallbacks: Vec<RouteNode>) -> Self {
        self.fallbacks = fallbacks;
        self
    }

    // --- Accessors ---

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// 共享状态（UI 层只读）
    pub fn state(&self) -> Rc<RouteState> {
        self.state.clone()
    }

    pub fn router(&self) -> &R {
        self.registry.router()
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    // --- 会话 ---

    pub fn has_token(&self) -> bool {
        self.session
            .get(&self.config.token_key)
            .is_some_and(|token| !token.is_empty())
    }

    /// 会话中的用户信息
    pub fn current_user(&self) -> RouteResult<Option<UserInfo>> {
        let Some(raw) = self.session.get(SESSION_USER_INFO_KEY) else {
            return Ok(None);
        };
        let info = serde_json::from_str(&raw)
            .map_err(|e| RouteError::from(e).in_op("session.user_info"))?;
        Ok(Some(info))
    }

    /// 当前角色：用户信息中的第一个角色
    pub fn current_role(&self) -> RouteResult<Option<String>> {
        Ok(self
            .current_user()?
            .and_then(|info| info.role().map(str::to_string)))
    }

    // --- 初始化 ---

    /// 按当前控制方式初始化路由
    pub async fn init_all(&self) -> RouteResult<InitOutcome> {
        match self.state.mode() {
            ControlMode::FrontEnd => self.init_front_end_control_routes(),
            ControlMode::BackEnd => self.init_back_end_control_routes().await,
        }
    }

    /// 前端控制路由：初始化，防止刷新时路由丢失
    pub fn init_front_end_control_routes(&self) -> RouteResult<InitOutcome> {
        if !self.has_token() {
            return Ok(InitOutcome::NoSession);
        }

        let role = match self.current_role()? {
            Some(role) => role,
            None => {
                log_warn!("[Init] session has a token but no role, nothing will be granted");
                String::new()
            }
        };

        let built =
            build_front_end_table(&self.dynamic_routes, &role, &self.fallbacks, &self.config)?;
        self.registry.commit(&built.table);

        let routes = built.route_list().len();
        self.publish(built, true);
        Ok(InitOutcome::Committed { routes })
    }

    /// 后端控制路由：初始化
    ///
    /// 同一时刻只有一轮在执行；后到的调用等待前一轮结束，
    /// 若此时路由列表已有数据则直接返回 `AlreadyLoaded`。
    pub async fn init_back_end_control_routes(&self) -> RouteResult<InitOutcome> {
        let cycle = self.latch.enter().await;

        if !self.has_token() {
            return Ok(InitOutcome::NoSession);
        }
        if !self.state.route_list_is_empty() {
            log_info!("[Init {}] routes already loaded, skipping", cycle.id());
            return Ok(InitOutcome::AlreadyLoaded);
        }

        let fetched = self
            .source
            .fetch_routes()
            .await
            .map_err(|e| {
                log_error!("[Init {}] failed to fetch routes: {}", cycle.id(), e);
                e.in_op("init.back_end")
            })?;

        // 无登录权限时
        if fetched.is_empty() {
            log_info!("[Init {}] no routes granted", cycle.id());
            self.state.set_no_grant(true);
            return Ok(InitOutcome::Empty);
        }

        let (built, _) = build_back_end_table(
            fetched,
            &self.layout(),
            &self.fallbacks,
            self.views.as_ref(),
            &self.config,
        )?;
        self.registry.commit(&built.table);

        let routes = built.route_list().len();
        self.publish(built, false);
        log_info!("[Init {}] committed {} route(s)", cycle.id(), routes);
        Ok(InitOutcome::Committed { routes })
    }

    /// 登出：清空会话、删除所有具名路由、清空共享状态，然后恢复静态路由
    pub fn logout(&self) {
        self.session.clear();
        self.reset_routes();
    }

    /// 切换控制方式并重新初始化
    pub async fn reinitialize(&self, mode: ControlMode) -> RouteResult<InitOutcome> {
        self.reset_routes();
        self.state.set_mode(mode);
        self.init_all().await
    }

    fn reset_routes(&self) {
        self.registry.reset();
        self.state.clear();
        self.registry.commit(&self.static_routes);
    }

    fn publish(&self, built: BuiltTable, keep_old_routes: bool) {
        let BuiltTable {
            mut table,
            tags_view,
            keep_alive_names,
            menu,
        } = built;
        let route_list = if table.is_empty() {
            Vec::new()
        } else {
            std::mem::take(&mut table[0].children)
        };

        if keep_old_routes {
            self.state.set_request_old_routes(tags_view.clone());
        }
        self.state.set_route_list(route_list);
        self.state.set_tags_view_routes(tags_view);
        self.state.set_keep_alive_names(keep_alive_names);
        self.state.set_menu_list(menu);
        self.state.set_no_grant(false);
    }

    /// 后端返回的路由树不含根路由时使用的布局外壳
    fn layout(&self) -> RouteNode {
        let mut layout = self
            .dynamic_routes
            .iter()
            .find(|r| r.is_root())
            .cloned()
            .unwrap_or_else(|| RouteNode::new(ROOT_PATH, "layout"));
        layout.children = Vec::new();
        layout
    }
}

#[cfg(test)]
mod tests;
