//! 构建期配置
//!
//! 浏览器中没有进程环境变量，配置在编译时通过 `option_env!` 注入，
//! 例如 `ROUTE_MODE=backend trunk build`。

use menuroute::{EnvAdapter, RouterConfig};

pub struct BuildEnv;

impl EnvAdapter for BuildEnv {
    fn var(&self, name: &str) -> Option<String> {
        let value = match name {
            "ROUTE_MODE" => option_env!("ROUTE_MODE"),
            "APP_TITLE" => option_env!("APP_TITLE"),
            "TOKEN_KEY" => option_env!("TOKEN_KEY"),
            "MENU_URL" => option_env!("MENU_URL"),
            "VIEWS_ROOT" => option_env!("VIEWS_ROOT"),
            "MAX_RESOLVE_DEPTH" => option_env!("MAX_RESOLVE_DEPTH"),
            "DEPTH_OVERFLOW" => option_env!("DEPTH_OVERFLOW"),
            "DEFAULT_ROLE" => option_env!("DEFAULT_ROLE"),
            _ => None,
        };
        value.map(str::to_string)
    }
}

pub fn load_config() -> RouterConfig {
    RouterConfig::from_env(&BuildEnv)
}
