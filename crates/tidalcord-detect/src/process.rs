use sysinfo::{ProcessRefreshKind, ProcessesToUpdate, RefreshKind, System};
use tracing::{debug, warn};

/// Locates a running process by a case-insensitive name substring.
pub struct ProcessFinder {
    needle: String,
    own_pid: u32,
    system: System,
}

impl ProcessFinder {
    pub fn new(needle: impl Into<String>) -> Self {
        Self {
            needle: needle.into().to_lowercase(),
            own_pid: std::process::id(),
            system: System::new_with_specifics(
                RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
            ),
        }
    }

    /// Refresh the process table and return the pid of the matching process.
    pub fn find_pid(&mut self) -> Option<u32> {
        self.system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );

        let names = self.system.processes().iter().map(|(pid, process)| {
            (pid.as_u32(), process.name().to_string_lossy().into_owned())
        });

        match select_pid(names, &self.needle, self.own_pid) {
            Some(pid) => {
                debug!(pid, needle = %self.needle, "Found player process");
                Some(pid)
            }
            None => {
                warn!(needle = %self.needle, "Player process not found");
                None
            }
        }
    }
}

/// Pick the lowest pid whose name contains `needle` (already lowercase),
/// skipping `own_pid`.
///
/// Players often run helper processes with the same name prefix; the main
/// process is started first. Our own binary name can contain the needle too.
pub fn select_pid<I, S>(processes: I, needle: &str, own_pid: u32) -> Option<u32>
where
    I: IntoIterator<Item = (u32, S)>,
    S: AsRef<str>,
{
    processes
        .into_iter()
        .filter(|(pid, _)| *pid != own_pid)
        .filter(|(_, name)| name.as_ref().to_lowercase().contains(needle))
        .map(|(pid, _)| pid)
        .min()
}
