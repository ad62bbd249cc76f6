//! Process lookup, liveness and signalling.

use parking_lot::Mutex;
use sysinfo::{Pid, ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, System, UpdateKind, Users};

use crate::error::{MonitorError, Result};

/// A live process resolved for termination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessTarget {
    pub pid: u32,
    pub name: String,
    /// Owning account; `None` when it could not be read
    pub user: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationSignal {
    /// SIGTERM on Unix
    Graceful,
    /// SIGKILL on Unix
    Force,
}

/// OS facilities the termination workflow needs.
///
/// Errors follow one convention: a process that does not exist is
/// [`MonitorError::ProcessNotFound`], an OS permission refusal is
/// [`MonitorError::PermissionDenied`].
pub trait ProcessControl: Send + Sync {
    fn inspect(&self, pid: u32) -> Result<ProcessTarget>;
    fn signal(&self, pid: u32, signal: TerminationSignal) -> Result<()>;
    fn is_alive(&self, pid: u32) -> bool;
}

impl<P: ProcessControl + ?Sized> ProcessControl for Box<P> {
    fn inspect(&self, pid: u32) -> Result<ProcessTarget> {
        (**self).inspect(pid)
    }

    fn signal(&self, pid: u32, signal: TerminationSignal) -> Result<()> {
        (**self).signal(pid, signal)
    }

    fn is_alive(&self, pid: u32) -> bool {
        (**self).is_alive(pid)
    }
}

/// [`ProcessControl`] backed by sysinfo (and `kill(2)` on Unix)
pub struct SystemProcessControl {
    system: Mutex<System>,
    users: Mutex<Users>,
}

impl SystemProcessControl {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
            users: Mutex::new(Users::new_with_refreshed_list()),
        }
    }

    /// Refresh one pid; returns false when it is gone or a zombie.
    fn refresh_pid(system: &mut System, pid: u32, kind: ProcessRefreshKind) -> bool {
        let sys_pid = Pid::from_u32(pid);
        system.refresh_processes_specifics(ProcessesToUpdate::Some(&[sys_pid]), true, kind);
        system
            .process(sys_pid)
            .map(|process| {
                // Exited children linger as zombies until reaped
                !matches!(process.status(), ProcessStatus::Zombie | ProcessStatus::Dead)
            })
            .unwrap_or(false)
    }

    fn user_name(&self, uid: &sysinfo::Uid) -> Option<String> {
        let mut users = self.users.lock();
        if let Some(user) = users.get_user_by_id(uid) {
            return Some(user.name().to_string());
        }
        users.refresh();
        users.get_user_by_id(uid).map(|user| user.name().to_string())
    }

    #[cfg(unix)]
    fn send(&self, pid: u32, signal: TerminationSignal) -> Result<()> {
        // pid 0 and negative pids address process groups
        let raw_pid = match libc::pid_t::try_from(pid) {
            Ok(raw) if raw > 0 => raw,
            _ => return Err(MonitorError::ProcessNotFound(pid)),
        };
        let sig = match signal {
            TerminationSignal::Graceful => libc::SIGTERM,
            TerminationSignal::Force => libc::SIGKILL,
        };

        let rc = unsafe { libc::kill(raw_pid, sig) };
        if rc == 0 {
            return Ok(());
        }

        let err = std::io::Error::last_os_error();
        match err.raw_os_error() {
            Some(libc::ESRCH) => Err(MonitorError::ProcessNotFound(pid)),
            Some(libc::EPERM) => Err(MonitorError::permission_denied(format!(
                "cannot signal pid {}: {}",
                pid, err
            ))),
            _ => Err(MonitorError::signal(format!("pid {}: {}", pid, err))),
        }
    }

    #[cfg(not(unix))]
    fn send(&self, pid: u32, signal: TerminationSignal) -> Result<()> {
        let mut system = self.system.lock();
        if !Self::refresh_pid(&mut system, pid, ProcessRefreshKind::nothing()) {
            return Err(MonitorError::ProcessNotFound(pid));
        }
        let process = system
            .process(Pid::from_u32(pid))
            .ok_or(MonitorError::ProcessNotFound(pid))?;

        let sent = match signal {
            // Platforms without a terminate signal fall back to a plain kill
            TerminationSignal::Graceful => process
                .kill_with(sysinfo::Signal::Term)
                .unwrap_or_else(|| process.kill()),
            TerminationSignal::Force => process.kill(),
        };
        if sent {
            return Ok(());
        }

        let owner = process.user_id().cloned();
        let still_alive = Self::refresh_pid(&mut system, pid, ProcessRefreshKind::nothing());
        let caller = sysinfo::get_current_pid()
            .ok()
            .and_then(|current| {
                system.refresh_processes_specifics(
                    ProcessesToUpdate::Some(&[current]),
                    false,
                    ProcessRefreshKind::nothing().with_user(UpdateKind::OnlyIfNotSet),
                );
                system.process(current).and_then(|p| p.user_id().cloned())
            });
        let same_owner = match (owner, caller) {
            (Some(owner), Some(caller)) => Some(owner == caller),
            _ => None,
        };
        Err(refused_signal_error(pid, still_alive, same_owner))
    }
}

/// Classify a signal the OS refused without an error code.
///
/// `same_owner` compares the target's account with the caller's; `None` when
/// either could not be read. A live process owned by someone else (or by an
/// unknown account) is a permission refusal.
#[cfg_attr(unix, allow(dead_code))]
pub(crate) fn refused_signal_error(
    pid: u32,
    still_alive: bool,
    same_owner: Option<bool>,
) -> MonitorError {
    if !still_alive {
        return MonitorError::ProcessNotFound(pid);
    }
    match same_owner {
        Some(true) => MonitorError::signal(format!("pid {}: kill request refused", pid)),
        Some(false) | None => MonitorError::permission_denied(format!(
            "pid {} belongs to another account",
            pid
        )),
    }
}

impl Default for SystemProcessControl {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessControl for SystemProcessControl {
    fn inspect(&self, pid: u32) -> Result<ProcessTarget> {
        let mut system = self.system.lock();
        let kind = ProcessRefreshKind::nothing().with_user(UpdateKind::OnlyIfNotSet);
        if !Self::refresh_pid(&mut system, pid, kind) {
            return Err(MonitorError::ProcessNotFound(pid));
        }

        let process = system
            .process(Pid::from_u32(pid))
            .ok_or(MonitorError::ProcessNotFound(pid))?;
        let name = process.name().to_string_lossy().into_owned();
        let uid = process.user_id().cloned();
        drop(system);

        let user = uid.and_then(|uid| self.user_name(&uid));
        Ok(ProcessTarget { pid, name, user })
    }

    fn signal(&self, pid: u32, signal: TerminationSignal) -> Result<()> {
        self.send(pid, signal)
    }

    fn is_alive(&self, pid: u32) -> bool {
        let mut system = self.system.lock();
        Self::refresh_pid(&mut system, pid, ProcessRefreshKind::nothing())
    }
}
