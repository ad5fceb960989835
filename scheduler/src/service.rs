use std::fmt;

use serde::Serialize;

/// The kind of service a process asks for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ServiceKind {
    Cpu,
    Keyboard,
    Disk,
    MutexLock,
    MutexUnlock,
}

impl ServiceKind {
    /// Decodes the single character used by workload files
    pub fn from_code(code: char) -> Option<ServiceKind> {
        match code {
            'C' => Some(ServiceKind::Cpu),
            'K' => Some(ServiceKind::Keyboard),
            'D' => Some(ServiceKind::Disk),
            'L' => Some(ServiceKind::MutexLock),
            'U' => Some(ServiceKind::MutexUnlock),
            _ => None,
        }
    }

    pub fn code(self) -> char {
        match self {
            ServiceKind::Cpu => 'C',
            ServiceKind::Keyboard => 'K',
            ServiceKind::Disk => 'D',
            ServiceKind::MutexLock => 'L',
            ServiceKind::MutexUnlock => 'U',
        }
    }

    /// Lock and unlock are instantaneous, everything else takes time
    pub fn is_timed(self) -> bool {
        !matches!(self, ServiceKind::MutexLock | ServiceKind::MutexUnlock)
    }

    /// The device serving this kind of request, if any
    pub fn device(self) -> Option<Device> {
        match self {
            ServiceKind::Keyboard => Some(Device::Keyboard),
            ServiceKind::Disk => Some(Device::Disk),
            _ => None,
        }
    }
}

impl fmt::Display for ServiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// I/O devices a process can block on.
///
/// `ALL` lists them in the order the engine resolves them every tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Device {
    Keyboard,
    Disk,
}

impl Device {
    pub const ALL: [Device; 2] = [Device::Keyboard, Device::Disk];
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Keyboard => write!(f, "keyboard"),
            Device::Disk => write!(f, "disk"),
        }
    }
}

/// One requested unit of service, immutable once built
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Service {
    kind: ServiceKind,
    duration: usize,
}

impl Service {
    /// Creates a new service request
    ///
    /// * `kind` - what the process asks for
    /// * `duration` - ticks the request takes; ignored for lock and unlock,
    ///                which always take 0
    pub fn new(kind: ServiceKind, duration: usize) -> Service {
        let duration = if kind.is_timed() { duration } else { 0 };
        Service { kind, duration }
    }

    pub fn cpu(duration: usize) -> Service {
        Service::new(ServiceKind::Cpu, duration)
    }

    pub fn keyboard(duration: usize) -> Service {
        Service::new(ServiceKind::Keyboard, duration)
    }

    pub fn disk(duration: usize) -> Service {
        Service::new(ServiceKind::Disk, duration)
    }

    pub fn lock() -> Service {
        Service::new(ServiceKind::MutexLock, 0)
    }

    pub fn unlock() -> Service {
        Service::new(ServiceKind::MutexUnlock, 0)
    }

    pub fn kind(&self) -> ServiceKind {
        self.kind
    }

    pub fn duration(&self) -> usize {
        self.duration
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.kind.is_timed() {
            write!(f, "{}:{}", self.kind, self.duration)
        } else {
            write!(f, "{}", self.kind)
        }
    }
}
