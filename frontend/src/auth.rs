//! 认证模块
//!
//! 登录时把 token 与用户信息写入会话并初始化路由，登出时清空会话与已注册路由。
//! 导航由路由服务负责，这里只在完成后触发一次跳转。

use menuroute::{
    InitOutcome, NavigationTarget, RouteError, RouteResult, SessionStore, redirect_after_login,
};
use menuroute_shared::{HOME_PATH, LOGIN_PATH, NO_POWER_PATH, SESSION_USER_INFO_KEY, UserInfo};

use crate::web::router::RouterService;

/// 登录并保存会话
///
/// `admin` 用户获得 `admin` 角色，其余用户为 `common`。
pub async fn login(
    router: RouterService,
    user_name: String,
    login_url: NavigationTarget,
) -> RouteResult<()> {
    let ctx = router.context();
    let role = if user_name == "admin" { "admin" } else { "common" };
    let info = UserInfo {
        user_name,
        roles: vec![role.to_string()],
    };
    let info = serde_json_wasm::to_string(&info)
        .map_err(|e| RouteError::serialization(e.to_string()).in_op("auth.login"))?;

    let token = uuid::Uuid::new_v4().simple().to_string();
    if !ctx.session().set(&ctx.config().token_key, &token)
        || !ctx.session().set(SESSION_USER_INFO_KEY, &info)
    {
        return Err(RouteError::store("无法写入 sessionStorage").in_op("auth.login"));
    }

    let outcome = ctx.init_all().await.map_err(|e| e.in_op("auth.login"))?;
    router.sync_state();
    if outcome == InitOutcome::Empty {
        router.navigate(NO_POWER_PATH);
    } else {
        // 守卫写入的 redirect/params 无法还原时回到首页
        let target = redirect_after_login(&login_url).unwrap_or_else(|e| {
            web_sys::console::warn_1(&format!("[Auth] {}", e).into());
            HOME_PATH.to_string()
        });
        router.navigate(&target);
    }
    Ok(())
}

/// 注销并清除状态
pub fn logout(router: RouterService) {
    router.context().logout();
    router.sync_state();
    router.navigate(LOGIN_PATH);
}
