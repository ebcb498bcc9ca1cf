//! 动态路由与菜单权限层
//!
//! 把前端声明或后端返回的路由树转换成路由器可注册的两级路由表，
//! 按当前用户角色过滤，并同步路由列表、标签页列表与 keep-alive 缓存列表。
//!
//! - `normalize`: 路由树展开与两级化
//! - `permission`: 角色过滤
//! - `builder`: 前端/后端控制路由的路由表构建
//! - `registry`: 向路由器注册/清除路由
//! - `guard`: 导航守卫
//! - `state`: 共享状态容器

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
macro_rules! log_info {
    ($($t:tt)*) => (web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_warn {
    ($($t:tt)*) => (web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
macro_rules! log_error {
    ($($t:tt)*) => (web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}

pub mod adapter;
pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod guard;
pub mod latch;
pub mod normalize;
pub mod permission;
pub mod registry;
pub mod router;
pub mod state;
pub mod view;

pub use adapter::{EnvAdapter, RegisteredRoute, RouteSource, Router, SessionStore};
pub use builder::{BuiltTable, InitOutcome};
pub use config::{ControlMode, DepthOverflow, RouterConfig};
pub use context::RouteContext;
pub use error::{RouteError, RouteErrorStatus, RouteResult};
pub use guard::{NavigationDecision, NavigationTarget, redirect_after_login};
pub use router::MemoryRouter;
pub use state::{RouteSnapshot, RouteState};
pub use view::{ViewLookup, ViewRegistry};

pub use menuroute_shared as shared;
