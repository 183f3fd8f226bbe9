use anyhow::{anyhow, Result};
use chrono::{SecondsFormat, Utc};
use std::time::Instant;
use sysinfo::{ProcessesToUpdate, System};

use crate::models::{HealthSnapshot, MemoryUsage};

pub const STATUS_OK: &str = "ok";

/// Collects process and host metrics on demand
///
/// Nothing is cached: every call to [`HealthReporter::report`] reads the
/// current values from the operating system.
#[derive(Debug, Clone, Copy)]
pub struct HealthReporter {
    started_at: Instant,
}

impl HealthReporter {
    pub fn new(started_at: Instant) -> Self {
        Self { started_at }
    }

    /// Take a fresh snapshot for a service listening on `port`
    pub fn report(&self, port: u16) -> Result<HealthSnapshot> {
        let memory = current_process_memory()?;
        let load = System::load_average();

        Ok(HealthSnapshot {
            status: STATUS_OK.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            uptime: self.started_at.elapsed().as_secs_f64(),
            memory,
            loadavg: [load.one, load.five, load.fifteen],
            port,
        })
    }
}

fn current_process_memory() -> Result<MemoryUsage> {
    let pid = sysinfo::get_current_pid()
        .map_err(|e| anyhow!("Cannot determine current process id: {}", e))?;

    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    let process = system
        .process(pid)
        .ok_or_else(|| anyhow!("Process {} not found in OS process table", pid))?;

    Ok(MemoryUsage {
        rss: process.memory(),
        vms: process.virtual_memory(),
    })
}
