use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Response type for successful GET and PUT operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct KvResponse {
    pub key: String,
    pub value: JsonValue,
}

/// Response type for DELETE operations
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub deleted: String,
}

/// Process memory usage in bytes
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MemoryUsage {
    /// Resident set size
    pub rss: u64,
    /// Virtual memory size
    pub vms: u64,
}

/// Response type for the health endpoint
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthSnapshot {
    pub status: String,
    /// ISO-8601 UTC timestamp
    pub timestamp: String,
    /// Seconds since the process started
    pub uptime: f64,
    pub memory: MemoryUsage,
    /// 1, 5 and 15 minute load averages
    #[schema(value_type = Vec<f64>)]
    pub loadavg: [f64; 3],
    pub port: u16,
}
