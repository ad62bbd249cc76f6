//! Process enumeration and ranking.
//!
//! A [`ProcessSource`] produces one outcome per visible process; the
//! [`ProcessRegistry`] drops the entries that could not be read and ranks the
//! rest by CPU usage.

use std::fmt;

use super::metrics::{ProcessSnapshot, RankedProcessList};

/// Why a single process was left out of a refresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Exited between enumeration and read
    Vanished,
    AccessDenied,
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Vanished => write!(f, "process vanished"),
            SkipReason::AccessDenied => write!(f, "access denied"),
            SkipReason::Unreadable(detail) => write!(f, "unreadable: {}", detail),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedProcess {
    pub pid: u32,
    pub reason: SkipReason,
}

/// Per-entry outcome of reading one process
pub type ProcessProbe = std::result::Result<ProcessSnapshot, SkippedProcess>;

/// Something that can enumerate the live process table.
///
/// Implementations return entries in enumeration order. CPU figures must be
/// relative to the previous call; blocking per-process measurement windows
/// are not allowed.
pub trait ProcessSource: Send {
    fn probe(&mut self) -> Vec<ProcessProbe>;
}

impl<S: ProcessSource + ?Sized> ProcessSource for Box<S> {
    fn probe(&mut self) -> Vec<ProcessProbe> {
        (**self).probe()
    }
}

/// Produces ranked, truncated process lists from a [`ProcessSource`].
pub struct ProcessRegistry<S> {
    source: S,
    top_k: usize,
}

impl<S: ProcessSource> ProcessRegistry<S> {
    pub fn new(source: S, top_k: usize) -> Self {
        Self { source, top_k }
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Re-enumerate the host and return a fresh ranked list.
    pub fn refresh(&mut self) -> RankedProcessList {
        let probes = self.source.probe();
        let total = probes.len();

        let readable: Vec<ProcessSnapshot> = probes
            .into_iter()
            .filter_map(|probe| match probe {
                Ok(snapshot) => Some(snapshot),
                Err(skipped) => {
                    log::trace!("Skipping pid {}: {}", skipped.pid, skipped.reason);
                    None
                }
            })
            .collect();

        log::debug!(
            "Process refresh: {} enumerated, {} readable",
            total,
            readable.len()
        );

        rank_processes(readable, self.top_k)
    }
}

/// Sort by CPU usage descending and keep the first `top_k`.
///
/// The sort is stable: entries with equal CPU usage keep their input order.
pub fn rank_processes(mut processes: Vec<ProcessSnapshot>, top_k: usize) -> RankedProcessList {
    processes.sort_by(|a, b| {
        b.cpu_percent
            .partial_cmp(&a.cpu_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    processes.truncate(top_k);
    RankedProcessList::from_ranked(processes)
}
