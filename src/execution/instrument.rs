use std::io::{self, Write};
use std::time::Instant;

use crate::storage::disk::DiskCounters;

/// Snapshot of the clocks taken before a statement runs.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
    disk_time: f64,
    disk_ios: u64,
}

/// Cost of one statement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement {
    pub elapsed_ms: u128,
    pub disk_time_ms: f64,
    pub disk_ios: u64,
}

impl Stopwatch {
    pub fn start<D: DiskCounters + ?Sized>(disk: &D) -> Self {
        Stopwatch { started: Instant::now(), disk_time: disk.disk_time(), disk_ios: disk.disk_ios() }
    }

    pub fn finish<D: DiskCounters + ?Sized>(self, disk: &D) -> Measurement {
        Measurement {
            elapsed_ms: self.started.elapsed().as_millis(),
            disk_time_ms: (disk.disk_time() - self.disk_time).max(0.0),
            disk_ios: disk.disk_ios().saturating_sub(self.disk_ios),
        }
    }
}

impl Measurement {
    /// Write the three timing lines followed by a blank separator line.
    pub fn report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Computer elapse time = {} ms", self.elapsed_ms)?;
        writeln!(out, "Calculated elapse time = {:?} ms", self.disk_time_ms)?;
        writeln!(out, "Calculated Disk I/Os = {}", self.disk_ios)?;
        writeln!(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Disk;

    #[test]
    fn deltas_are_after_minus_before() {
        let mut disk = Disk::new(1.5);
        disk.read_blocks(4);
        let watch = Stopwatch::start(&disk);
        disk.write_blocks(2);
        let m = watch.finish(&disk);
        assert_eq!(m.disk_ios, 2);
        assert_eq!(m.disk_time_ms, 3.0);
    }

    #[test]
    fn report_lines() {
        let m = Measurement { elapsed_ms: 5, disk_time_ms: 12.5, disk_ios: 3 };
        let mut out = Vec::new();
        m.report(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Computer elapse time = 5 ms\nCalculated elapse time = 12.5 ms\nCalculated Disk I/Os = 3\n\n"
        );
    }

    #[test]
    fn whole_disk_time_keeps_one_decimal() {
        let m = Measurement { elapsed_ms: 0, disk_time_ms: 20.0, disk_ios: 2 };
        let mut out = Vec::new();
        m.report(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("Calculated elapse time = 20.0 ms\n"));
    }
}
