use crate::adapter::Router;
use menuroute_shared::RouteNode;

// =========================================================
// 路由注册适配层
// =========================================================

/// 把规整好的路由表推送到底层路由器，或从中清除
pub struct RouteRegistry<R> {
    router: R,
}

impl<R> RouteRegistry<R>
where
    R: Router,
{
    pub fn new(router: R) -> Self {
        Self { router }
    }

    pub fn router(&self) -> &R {
        &self.router
    }

    /// 按表中顺序注册每一条顶级路由
    ///
    /// 只做追加，不会清除之前注册的路由。
    pub fn commit(&self, table: &[RouteNode]) -> usize {
        for route in table {
            self.router.add_route(route.clone());
        }
        log_info!("[Registry] committed {} top-level route(s)", table.len());
        table.len()
    }

    /// 删除所有具名路由，匿名路由保持不变
    ///
    /// 登出或会话重置时调用，保证不会残留可访问的授权路由。
    pub fn reset(&self) -> usize {
        let mut removed = 0;
        for route in self.router.get_routes() {
            let Some(name) = route.name else { continue };
            // 父路由删除时其子路由已一并移除
            if self.router.has_route(&name) && self.router.remove_route(&name) {
                removed += 1;
            }
        }
        log_info!("[Registry] reset removed {} named route(s)", removed);
        removed
    }
}
