use log::trace;

/// Cumulative cost counters exposed by a disk. Both values never decrease.
pub trait DiskCounters {
    /// Simulated milliseconds spent on block transfers so far.
    fn disk_time(&self) -> f64;
    /// Block transfers performed so far.
    fn disk_ios(&self) -> u64;
}

/// Simulated disk. Data lives in the catalog; the disk only keeps score.
#[derive(Debug, Clone)]
pub struct Disk {
    latency_ms: f64,
    timer: f64,
    ios: u64,
}

impl Disk {
    pub fn new(latency_ms: f64) -> Self {
        Disk { latency_ms: latency_ms.max(0.0), timer: 0.0, ios: 0 }
    }

    pub fn read_blocks(&mut self, blocks: usize) {
        trace!("disk read {} block(s)", blocks);
        self.charge(blocks);
    }

    pub fn write_blocks(&mut self, blocks: usize) {
        trace!("disk write {} block(s)", blocks);
        self.charge(blocks);
    }

    fn charge(&mut self, blocks: usize) {
        self.ios += blocks as u64;
        self.timer += blocks as f64 * self.latency_ms;
    }
}

impl DiskCounters for Disk {
    fn disk_time(&self) -> f64 {
        self.timer
    }

    fn disk_ios(&self) -> u64 {
        self.ios
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut disk = Disk::new(2.5);
        disk.read_blocks(3);
        disk.write_blocks(1);
        disk.read_blocks(0);
        assert_eq!(disk.disk_ios(), 4);
        assert_eq!(disk.disk_time(), 10.0);
    }
}
