//! Protected-process policy.

/// Service accounts whose processes are never terminated
pub const GUARDED_ACCOUNTS: [&str; 3] = ["SYSTEM", "LOCAL SERVICE", "NETWORK SERVICE"];

/// Highest pid reserved for the kernel and idle/system processes
pub const MAX_RESERVED_PID: u32 = 4;

pub fn is_reserved_pid(pid: u32) -> bool {
    pid <= MAX_RESERVED_PID
}

/// Matches `SYSTEM` as well as `NT AUTHORITY\SYSTEM`, ignoring case.
pub fn is_guarded_account(user: &str) -> bool {
    let account = user.rsplit('\\').next().unwrap_or(user).trim();
    GUARDED_ACCOUNTS
        .iter()
        .any(|guarded| guarded.eq_ignore_ascii_case(account))
}

pub fn is_protected(pid: u32, user: &str) -> bool {
    is_reserved_pid(pid) || is_guarded_account(user)
}
