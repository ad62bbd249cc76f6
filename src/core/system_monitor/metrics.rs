use serde::{Deserialize, Serialize};

/// Point-in-time record of one process's observed attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    pub name: String,
    /// Owning account; empty when it could not be read
    pub user: String,
    pub cpu_percent: f32,
    /// 0.0 when unavailable
    pub memory_percent: f32,
    pub status: String,
}

impl ProcessSnapshot {
    /// Text of every column a user can see for this row, in table order.
    pub fn display_fields(&self) -> [String; 5] {
        [
            self.pid.to_string(),
            self.name.clone(),
            self.user.clone(),
            format!("{:.1}%", self.cpu_percent),
            format!("{:.1}%", self.memory_percent),
        ]
    }
}

/// Processes sorted by CPU usage (descending), truncated to the top K.
///
/// Built fresh on every sample; there is no way to mutate one in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RankedProcessList {
    processes: Vec<ProcessSnapshot>,
}

impl RankedProcessList {
    pub(crate) fn from_ranked(processes: Vec<ProcessSnapshot>) -> Self {
        Self { processes }
    }

    pub fn as_slice(&self) -> &[ProcessSnapshot] {
        &self.processes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ProcessSnapshot> {
        self.processes.iter()
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn pids(&self) -> Vec<u32> {
        self.processes.iter().map(|p| p.pid).collect()
    }

    pub fn into_vec(self) -> Vec<ProcessSnapshot> {
        self.processes
    }
}

impl<'a> IntoIterator for &'a RankedProcessList {
    type Item = &'a ProcessSnapshot;
    type IntoIter = std::slice::Iter<'a, ProcessSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.processes.iter()
    }
}

/// One host-level CPU/memory reading
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HostReading {
    pub cpu_percent: f32,
    pub cpu_freq_mhz: f64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub memory_percent: f32,
}

/// Everything published to observers on an accepted sample
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonitorSnapshot {
    /// Accepted sample counter, starting at 1
    pub sequence: u64,
    pub timestamp: i64, // Unix timestamp
    pub cpu_percent: f32,
    pub cpu_freq_mhz: f64,
    pub memory_used_bytes: u64,
    pub memory_total_bytes: u64,
    pub memory_percent: f32,
    pub cpu_history: Vec<f32>,
    pub memory_history: Vec<f32>,
    pub ranked_processes: RankedProcessList,
}
