/// Simulated main memory: a fixed number of block frames.
#[derive(Debug, Clone)]
pub struct MainMemory {
    frames: usize,
}

impl MainMemory {
    pub fn new(frames: usize) -> Self {
        MainMemory { frames: frames.max(2) }
    }

    pub fn capacity(&self) -> usize {
        self.frames
    }

    /// Blocks of an outer relation that fit beside one frame reserved for
    /// the inner relation during a nested-loop scan.
    pub fn outer_frames(&self) -> usize {
        self.frames - 1
    }

    /// How many times the inner relation must be scanned to join it with
    /// `outer_blocks` blocks of outer input.
    pub fn passes(&self, outer_blocks: usize) -> usize {
        outer_blocks.div_ceil(self.outer_frames()).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_round_up() {
        let mem = MainMemory::new(10);
        assert_eq!(mem.passes(0), 1);
        assert_eq!(mem.passes(9), 1);
        assert_eq!(mem.passes(10), 2);
        assert_eq!(MainMemory::new(0).capacity(), 2);
    }
}
