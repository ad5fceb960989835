use crate::scheduler::Pid;

/// The single simulated lock shared by every process.
///
/// At most one process holds it, and only that process can release it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MutexResource {
    holder: Option<Pid>,
}

impl MutexResource {
    pub fn new() -> MutexResource {
        MutexResource { holder: None }
    }

    pub fn is_locked(&self) -> bool {
        self.holder.is_some()
    }

    pub fn holder(&self) -> Option<Pid> {
        self.holder
    }

    /// Takes the lock for `pid`, returns false if it was already held
    pub fn lock(&mut self, pid: Pid) -> bool {
        if self.holder.is_some() {
            return false;
        }

        self.holder = Some(pid);
        true
    }

    /// Releases the lock held by `pid`, returns false if `pid` is not the
    /// holder, leaving the mutex untouched
    pub fn unlock(&mut self, pid: Pid) -> bool {
        if self.holder != Some(pid) {
            return false;
        }

        self.holder = None;
        true
    }
}
