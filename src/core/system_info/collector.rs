use log::warn;
use once_cell::sync::OnceCell;
use sysinfo::{CpuRefreshKind, MemoryRefreshKind, RefreshKind, System};

use crate::core::system_info::types::{SystemInfo, UNKNOWN};

static SYSTEM_INFO: OnceCell<SystemInfo> = OnceCell::new();

/// Host description, collected on first use and shared for the process lifetime.
pub fn cached() -> &'static SystemInfo {
    SYSTEM_INFO.get_or_init(collect)
}

/// Whether [`cached`] has already collected the host description.
pub fn is_collected() -> bool {
    SYSTEM_INFO.get().is_some()
}

/// Query the OS for the static host description.
///
/// Never fails: every field the host does not report falls back to
/// [`UNKNOWN`] or `None` on its own.
pub fn collect() -> SystemInfo {
    let refresh = RefreshKind::nothing()
        .with_cpu(CpuRefreshKind::everything())
        .with_memory(MemoryRefreshKind::nothing().with_ram());
    let sys = System::new_with_specifics(refresh);

    let os_name = System::name().unwrap_or_else(|| {
        warn!("OS name unavailable");
        UNKNOWN.to_string()
    });
    let os_version = System::os_version().unwrap_or_else(|| {
        warn!("OS version unavailable");
        UNKNOWN.to_string()
    });

    let processor = sys
        .cpus()
        .first()
        .map(|cpu| cpu.brand().trim().to_string())
        .filter(|brand| !brand.is_empty())
        .unwrap_or_else(|| {
            warn!("Processor brand unavailable");
            UNKNOWN.to_string()
        });

    let core_count = System::physical_core_count();
    if core_count.is_none() {
        warn!("Physical core count unavailable");
    }

    let thread_count = match sys.cpus().len() {
        0 => {
            warn!("Logical processor count unavailable");
            None
        }
        n => Some(n),
    };

    let total_memory_bytes = match sys.total_memory() {
        0 => {
            warn!("Total memory unavailable");
            None
        }
        bytes => Some(bytes),
    };

    SystemInfo {
        os_name,
        os_version,
        processor,
        core_count,
        thread_count,
        total_memory_bytes,
    }
}
