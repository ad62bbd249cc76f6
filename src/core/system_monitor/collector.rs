use sysinfo::{
    CpuRefreshKind, MemoryRefreshKind, Process, ProcessRefreshKind, ProcessesToUpdate,
    RefreshKind, System, Uid, UpdateKind, Users,
};

use crate::error::{MonitorError, Result};

use super::metrics::{HostReading, ProcessSnapshot};
use super::registry::{ProcessProbe, ProcessSource, SkipReason, SkippedProcess};

/// Source of host-level CPU and memory readings
pub trait HostSampler: Send {
    fn sample(&mut self) -> Result<HostReading>;
}

impl<H: HostSampler + ?Sized> HostSampler for Box<H> {
    fn sample(&mut self) -> Result<HostReading> {
        (**self).sample()
    }
}

/// Reads global CPU and memory usage through sysinfo.
///
/// CPU usage is measured against the previous refresh, so the first reading
/// after construction is only meaningful once `MINIMUM_CPU_UPDATE_INTERVAL`
/// has elapsed.
pub struct SysinfoHostSampler {
    system: System,
}

impl SysinfoHostSampler {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(Self::cpu_refresh_kind())
            .with_memory(MemoryRefreshKind::nothing().with_ram());

        Self {
            system: System::new_with_specifics(refresh_kind),
        }
    }

    fn cpu_refresh_kind() -> CpuRefreshKind {
        CpuRefreshKind::nothing().with_cpu_usage().with_frequency()
    }
}

impl Default for SysinfoHostSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl HostSampler for SysinfoHostSampler {
    fn sample(&mut self) -> Result<HostReading> {
        self.system.refresh_cpu_specifics(Self::cpu_refresh_kind());
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());

        let total = self.system.total_memory();
        if total == 0 {
            return Err(MonitorError::metric_collection(
                "total memory reported as zero",
            ));
        }
        let available = self.system.available_memory();

        let cpus = self.system.cpus();
        let cpu_freq_mhz = if cpus.is_empty() {
            0.0
        } else {
            cpus.iter().map(|cpu| cpu.frequency() as f64).sum::<f64>() / cpus.len() as f64
        };

        Ok(HostReading {
            cpu_percent: self.system.global_cpu_usage(),
            cpu_freq_mhz,
            memory_used_bytes: self.system.used_memory(),
            memory_total_bytes: total,
            memory_percent: (total.saturating_sub(available) as f32 / total as f32) * 100.0,
        })
    }
}

/// Enumerates the live process table through sysinfo.
///
/// Keeps its own `System` so per-process CPU usage is relative to the
/// previous probe.
pub struct SysinfoProcessSource {
    system: System,
    users: Users,
}

impl SysinfoProcessSource {
    pub fn new() -> Self {
        let mut system = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::nothing().with_ram()),
        );
        system.refresh_processes_specifics(ProcessesToUpdate::All, true, Self::refresh_kind());

        Self {
            system,
            users: Users::new_with_refreshed_list(),
        }
    }

    fn refresh_kind() -> ProcessRefreshKind {
        ProcessRefreshKind::nothing()
            .with_cpu()
            .with_memory()
            .with_user(UpdateKind::OnlyIfNotSet)
    }

    fn user_name(&mut self, uid: Option<&Uid>, users_refreshed: &mut bool) -> String {
        let Some(uid) = uid else {
            return String::new();
        };
        if let Some(user) = self.users.get_user_by_id(uid) {
            return user.name().to_string();
        }
        if *users_refreshed {
            return String::new();
        }
        // Accounts created after the last user list refresh
        self.users.refresh();
        *users_refreshed = true;
        self.users
            .get_user_by_id(uid)
            .map(|user| user.name().to_string())
            .unwrap_or_default()
    }

    fn read_process(process: &Process, total_memory: u64) -> ProcessProbe {
        let pid = process.pid().as_u32();
        if !process.exists() {
            return Err(SkippedProcess {
                pid,
                reason: SkipReason::Vanished,
            });
        }

        let memory_percent = if total_memory > 0 {
            (process.memory() as f64 / total_memory as f64 * 100.0) as f32
        } else {
            0.0
        };

        Ok(ProcessSnapshot {
            pid,
            name: process.name().to_string_lossy().into_owned(),
            user: String::new(),
            cpu_percent: process.cpu_usage().max(0.0),
            memory_percent,
            status: process.status().to_string(),
        })
    }
}

impl Default for SysinfoProcessSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoProcessSource {
    fn probe(&mut self) -> Vec<ProcessProbe> {
        self.system
            .refresh_memory_specifics(MemoryRefreshKind::nothing().with_ram());
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, Self::refresh_kind());
        let total_memory = self.system.total_memory();

        // Userland threads show up as processes on Linux; the table lists processes only
        let mut entries: Vec<(ProcessProbe, Option<Uid>)> = self
            .system
            .processes()
            .values()
            .filter(|process| process.thread_kind().is_none())
            .map(|process| {
                (
                    Self::read_process(process, total_memory),
                    process.user_id().cloned(),
                )
            })
            .collect();

        // Enumerate in pid order so CPU ties rank deterministically
        entries.sort_by_key(|(probe, _)| match probe {
            Ok(snapshot) => snapshot.pid,
            Err(skipped) => skipped.pid,
        });

        let mut users_refreshed = false;
        entries
            .into_iter()
            .map(|(probe, uid)| {
                probe.map(|mut snapshot| {
                    snapshot.user = self.user_name(uid.as_ref(), &mut users_refreshed);
                    snapshot
                })
            })
            .collect()
    }
}
