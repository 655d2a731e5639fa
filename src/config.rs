use std::env;

/// Minimum width of a rendered result cell.
pub const DEFAULT_CELL_WIDTH: usize = 18;
/// Block frames available in simulated main memory.
pub const DEFAULT_MEMORY_BLOCKS: usize = 10;
/// Simulated milliseconds charged per block transferred to or from disk.
pub const DEFAULT_DISK_LATENCY_MS: f64 = 10.0;

/// What the renderer does with a value longer than the cell width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverflowPolicy {
    /// The cell widens to fit the value.
    #[default]
    Grow,
    /// The value is cut to exactly the cell width.
    Truncate,
}

impl OverflowPolicy {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "grow" => Some(OverflowPolicy::Grow),
            "truncate" => Some(OverflowPolicy::Truncate),
            _ => None,
        }
    }
}

/// Engine settings. Every field has a default; `from_env` overrides them
/// from `SIMDB_*` variables and ignores values it cannot parse.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub cell_width: usize,
    pub overflow: OverflowPolicy,
    pub memory_blocks: usize,
    pub disk_latency_ms: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            cell_width: DEFAULT_CELL_WIDTH,
            overflow: OverflowPolicy::default(),
            memory_blocks: DEFAULT_MEMORY_BLOCKS,
            disk_latency_ms: DEFAULT_DISK_LATENCY_MS,
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = EngineConfig::default();
        EngineConfig {
            cell_width: lookup("SIMDB_CELL_WIDTH")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|w| *w > 0)
                .unwrap_or(defaults.cell_width),
            overflow: lookup("SIMDB_CELL_OVERFLOW")
                .and_then(|v| OverflowPolicy::from_str(&v))
                .unwrap_or(defaults.overflow),
            memory_blocks: lookup("SIMDB_MEMORY_BLOCKS")
                .and_then(|v| v.trim().parse::<usize>().ok())
                .filter(|b| *b >= 2)
                .unwrap_or(defaults.memory_blocks),
            disk_latency_ms: lookup("SIMDB_DISK_LATENCY")
                .and_then(|v| v.trim().parse::<f64>().ok())
                .filter(|l| l.is_finite() && *l >= 0.0)
                .unwrap_or(defaults.disk_latency_ms),
        }
    }
}
