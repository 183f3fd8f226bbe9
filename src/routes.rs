// Route path constants - single source of truth for all API paths

pub const INDEX: &str = "/";
pub const HEALTH: &str = "/healthy";
pub const KV_ITEM: &str = "/kv/{key}";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
