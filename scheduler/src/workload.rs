//! Workload descriptions and their text format.
//!
//! A workload file lists processes one after another. Each starts with a
//! header `P <id> <arrival> <count>` followed by `count` service lines
//! `<code> [duration]`, where the code is one of `C`, `K`, `D`, `L`, `U`.
//! Lock and unlock lines take no duration.
//!
//! ```text
//! P 1 0 3
//! C 2
//! D 3
//! C 1
//! ```

use std::collections::HashSet;
use std::str::FromStr;

use crate::common_types::Timestamp;
use crate::error::WorkloadError;
use crate::scheduler::Pid;
use crate::schedulers::SimProcess;
use crate::service::{Service, ServiceKind};

/// One process of a workload, before it enters the simulation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessSpec {
    pub pid: Pid,
    pub arrival: Timestamp,
    pub services: Vec<Service>,
}

impl ProcessSpec {
    pub fn new(pid: usize, arrival: usize, services: Vec<Service>) -> ProcessSpec {
        ProcessSpec {
            pid: Pid::new(pid),
            arrival: Timestamp::new(arrival),
            services,
        }
    }
}

/// A validated set of processes, in input order
#[derive(Clone, Debug, Default)]
pub struct Workload {
    processes: Vec<SimProcess>,
}

impl Workload {
    /// Builds a workload, rejecting empty service lists and duplicate pids
    pub fn new<I>(specs: I) -> Result<Workload, WorkloadError>
    where
        I: IntoIterator<Item = ProcessSpec>,
    {
        let mut seen = HashSet::new();
        let mut processes = Vec::new();

        for spec in specs {
            if spec.services.is_empty() {
                return Err(WorkloadError::EmptyServices(spec.pid));
            }
            if !seen.insert(spec.pid) {
                return Err(WorkloadError::DuplicatePid(spec.pid));
            }
            processes.push(SimProcess::new(spec.pid, spec.arrival, spec.services));
        }

        Ok(Workload { processes })
    }

    /// Parses the text format described in the module docs
    pub fn parse(text: &str) -> Result<Workload, WorkloadError> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let mut specs = Vec::new();

        while let Some((line_no, header)) = lines.next() {
            let (pid, arrival, count) = parse_header(line_no, header)?;

            let mut services = Vec::with_capacity(count);
            for _ in 0..count {
                match lines.next() {
                    Some((line_no, line)) => services.push(parse_service(line_no, line)?),
                    None => break,
                }
            }

            if services.len() < count {
                return Err(WorkloadError::MissingServices {
                    pid: Pid::new(pid),
                    expected: count,
                    found: services.len(),
                });
            }

            specs.push(ProcessSpec::new(pid, arrival, services));
        }

        Workload::new(specs)
    }

    pub fn processes(&self) -> &[SimProcess] {
        &self.processes
    }

    pub fn into_processes(self) -> Vec<SimProcess> {
        self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }
}

impl FromStr for Workload {
    type Err = WorkloadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Workload::parse(s)
    }
}

fn parse_number(line: usize, value: &str) -> Result<usize, WorkloadError> {
    value.parse().map_err(|_| WorkloadError::BadNumber {
        line,
        value: value.to_string(),
    })
}

fn parse_header(line: usize, text: &str) -> Result<(usize, usize, usize), WorkloadError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();

    match tokens.as_slice() {
        ["P", pid, arrival, count] => Ok((
            parse_number(line, pid)?,
            parse_number(line, arrival)?,
            parse_number(line, count)?,
        )),
        _ => Err(WorkloadError::BadHeader {
            line,
            text: text.to_string(),
        }),
    }
}

fn parse_service(line: usize, text: &str) -> Result<Service, WorkloadError> {
    let mut tokens = text.split_whitespace();
    let code = tokens.next().unwrap_or_default();

    let mut chars = code.chars();
    let kind = match (chars.next(), chars.next()) {
        (Some(c), None) => ServiceKind::from_code(c),
        _ => None,
    };
    let Some(kind) = kind else {
        return Err(WorkloadError::UnknownService {
            line,
            code: code.to_string(),
        });
    };

    if !kind.is_timed() {
        return Ok(Service::new(kind, 0));
    }

    match tokens.next() {
        Some(duration) => Ok(Service::new(kind, parse_number(line, duration)?)),
        None => Err(WorkloadError::MissingDuration {
            line,
            code: kind.code(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::Process;

    const SAMPLE: &str = "P 1 0 3\nC 2\nD 3\nC 1\n\nP 2 4 4\nL\nC 3\nU\nK 2\n";

    #[test]
    fn parses_headers_and_services() {
        let workload = Workload::parse(SAMPLE).unwrap();
        assert_eq!(workload.len(), 2);

        let first = &workload.processes()[0];
        assert_eq!(first.pid(), Pid::new(1));
        assert_eq!(
            first.services(),
            &[Service::cpu(2), Service::disk(3), Service::cpu(1)]
        );

        let second = &workload.processes()[1];
        assert_eq!(second.arrival_time(), Timestamp::new(4));
        assert_eq!(
            second.services(),
            &[Service::lock(), Service::cpu(3), Service::unlock(), Service::keyboard(2)]
        );
    }

    #[test]
    fn lock_lines_may_carry_a_placeholder() {
        let workload = Workload::parse("P 1 0 2\nL -\nU x\n").unwrap();
        assert_eq!(workload.processes()[0].services(), &[Service::lock(), Service::unlock()]);
    }

    #[test]
    fn empty_input_is_an_empty_workload() {
        assert!(Workload::parse("\n\n").unwrap().is_empty());
    }

    #[test]
    fn rejects_bad_header() {
        let err = Workload::parse("C 3\n").unwrap_err();
        assert!(matches!(err, WorkloadError::BadHeader { line: 1, .. }));
    }

    #[test]
    fn rejects_unknown_code_with_line_number() {
        let err = Workload::parse("P 1 0 2\nC 1\nX 2\n").unwrap_err();
        assert!(matches!(err, WorkloadError::UnknownService { line: 3, .. }));
    }

    #[test]
    fn rejects_negative_duration() {
        let err = Workload::parse("P 1 0 1\nC -2\n").unwrap_err();
        assert!(matches!(err, WorkloadError::BadNumber { line: 2, .. }));
    }

    #[test]
    fn rejects_missing_duration() {
        let err = Workload::parse("P 1 0 1\nD\n").unwrap_err();
        assert!(matches!(err, WorkloadError::MissingDuration { code: 'D', .. }));
    }

    #[test]
    fn rejects_short_service_list() {
        let err = Workload::parse("P 1 0 3\nC 1\n").unwrap_err();
        assert!(matches!(
            err,
            WorkloadError::MissingServices { expected: 3, found: 1, .. }
        ));
    }

    #[test]
    fn rejects_duplicates_and_empty_processes() {
        let dup = Workload::new(vec![
            ProcessSpec::new(1, 0, vec![Service::cpu(1)]),
            ProcessSpec::new(1, 2, vec![Service::cpu(1)]),
        ]);
        assert!(matches!(dup, Err(WorkloadError::DuplicatePid(_))));

        let empty = Workload::parse("P 4 0 0\n");
        assert!(matches!(empty, Err(WorkloadError::EmptyServices(_))));
    }
}
