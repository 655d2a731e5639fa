use std::fs::{self, File};
use std::io::BufReader;

use simdb::config::{EngineConfig, OverflowPolicy};
use simdb::engine::{BatchSummary, Engine};

#[test]
fn runs_script_and_counts_failures() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.tree");
    fs::write(
        &path,
        "-- setup\n\
         (CREATE (TABLE t) (ATTRIBUTES (ATTRIBUTE id INT) (ATTRIBUTE name STR20)))\n\
         \n\
         (INSERT (TABLE t) (VALUES 1 \"Ann Lee\"))\n\
         (INSERT (TABLE t) (VALUES x broken))\n\
         (SELECT (COLUMNS (COLUMN name)) (FROM (TABLE t))\n\
         (SELECT (COLUMNS (COLUMN name)) (FROM (TABLE t)))\n",
    )
    .unwrap();

    let mut engine = Engine::default();
    let mut out = Vec::new();
    let summary = engine
        .run_batch(BufReader::new(File::open(&path).unwrap()), &mut out)
        .unwrap();
    assert_eq!(summary, BatchSummary { executed: 5, failed: 2 });

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Rows returned: 1\n"));
    assert!(text.contains(&format!("{:<18}\n", "Ann Lee")));
    // Four statements reached the engine, the unbalanced one did not.
    assert_eq!(text.matches("Calculated Disk I/Os").count(), 4);
}

#[test]
fn configured_width_applies() {
    let config = EngineConfig { cell_width: 6, overflow: OverflowPolicy::Truncate, ..EngineConfig::default() };
    let mut engine = Engine::new(&config);
    let script = "(CREATE (TABLE t) (ATTRIBUTES (ATTRIBUTE name STR20)))\n\
                  (INSERT (TABLE t) (VALUES Bartholomew))\n\
                  (SELECT (COLUMNS (COLUMN name)) (FROM (TABLE t)))\n";
    let mut out = Vec::new();
    engine.run_batch(script.as_bytes(), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\nname  \nBartho\n"));
}
