//! End-to-end pipeline tests over temp directory trees.
//!
//! A stub decoder stands in for vgmstream-cli: it writes a marker file on
//! success and can be told to fail for specific source stems, which lets
//! the tests drive failure-ledger and retry behavior deterministically.

use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

use wemforge::decoder::Decoder;
use wemforge::ledger::FailureLedger;
use wemforge::mapping::CategoryMap;
use wemforge::pipeline::{self, PipelineConfig, extract, rename, retry};
use wemforge::report::RunStats;
use wemforge::{Error, Result};

struct StubDecoder {
    /// Source stems that should fail to decode.
    fail_stems: HashSet<String>,
    /// Every decode invocation observed, in order.
    calls: RefCell<Vec<PathBuf>>,
}

impl StubDecoder {
    fn new() -> Self {
        Self {
            fail_stems: HashSet::new(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn failing(stems: &[&str]) -> Self {
        Self {
            fail_stems: stems.iter().map(ToString::to_string).collect(),
            calls: RefCell::new(Vec::new()),
        }
    }

    fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Decoder for StubDecoder {
    fn decode(&self, input: &Path, output: &Path) -> Result<()> {
        self.calls.borrow_mut().push(input.to_path_buf());
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        if self.fail_stems.contains(&stem) {
            return Err(Error::DecodeFailed {
                input: input.to_path_buf(),
                stderr: "stub: forced failure".to_string(),
            });
        }
        fs::write(output, format!("decoded:{stem}"))?;
        Ok(())
    }
}

struct TestEnv {
    _dir: TempDir,
    config: PipelineConfig,
}

impl TestEnv {
    fn new() -> Self {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let config = PipelineConfig {
            input_root: root.join("txtp/wem"),
            temp_root: root.join("out_temp"),
            output_root: root.join("out"),
            refs_dir: root.join("txtp"),
            ledger_path: root.join("conversion_errors.log"),
        };
        fs::create_dir_all(&config.input_root).unwrap();
        fs::create_dir_all(&config.refs_dir).unwrap();
        Self { _dir: dir, config }
    }

    fn add_source(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.config.input_root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn add_reference(&self, name: &str, contents: &str) {
        fs::write(self.config.refs_dir.join(name), contents).unwrap();
    }

    fn output(&self, rel: &str) -> PathBuf {
        self.config.output_root.join(rel)
    }
}

#[test]
fn full_run_converts_and_relocates_by_category() {
    let env = TestEnv::new();
    env.add_source("123.wem", "wem-data");
    env.add_source("777/456.wem", "wem-data");
    env.add_source("777/789.wav", "already-wav");

    // Token positions: 0 = "header", 1 and 2 are the references.
    env.add_reference("music.txtp", "header wem/123.wem\nwem/456.wem tail");

    let decoder = StubDecoder::new();
    let stats = pipeline::run(&env.config, &decoder).unwrap();

    assert_eq!(
        stats,
        RunStats {
            converted: 2,
            skipped: 1, // pre-existing .wav copied, not decoded
            failed: 0,
        }
    );

    // 123.wem sat directly in the input root, so it lands under "root".
    assert!(env.output("root/music_1.wav").exists());
    assert!(env.output("777/music_2.wav").exists());

    // Unreferenced staged files are swept away with the temp tree.
    assert!(!env.config.temp_root.exists());
    assert!(!env.output("777/789.wav").exists());
}

#[test]
fn second_run_overwrites_nothing() {
    let env = TestEnv::new();
    env.add_source("777/456.wem", "wem-data");
    env.add_reference("music.txtp", "wem/456.wem");

    let decoder = StubDecoder::new();
    pipeline::run(&env.config, &decoder).unwrap();

    let dest = env.output("777/music_0.wav");
    let first_contents = fs::read(&dest).unwrap();
    fs::write(&dest, "operator edit").unwrap();

    let stats = pipeline::run(&env.config, &decoder).unwrap();

    // The rename stage skips the existing destination instead of
    // overwriting it, and nothing new appears in the output tree.
    assert_eq!(fs::read(&dest).unwrap(), b"operator edit");
    assert_eq!(stats.failed, 0);
    assert_eq!(first_contents, b"decoded:456");
}

#[test]
fn extraction_skips_when_stem_destination_exists() {
    let env = TestEnv::new();
    env.add_source("777/456.wem", "wem-data");

    // A stem-named final output from a previous run short-circuits the
    // decode entirely.
    fs::create_dir_all(env.output("777")).unwrap();
    fs::write(env.output("777/456.wav"), "prior output").unwrap();

    let decoder = StubDecoder::new();
    let stats = pipeline::run(&env.config, &decoder).unwrap();

    assert_eq!(decoder.call_count(), 0);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.converted, 0);
}

#[test]
fn partial_failure_isolates_the_failing_source() {
    let env = TestEnv::new();
    env.add_source("a/1.wem", "x");
    let bad = env.add_source("a/2.wem", "x");
    env.add_source("b/3.wem", "x");

    let decoder = StubDecoder::failing(&["2"]);
    let ledger = FailureLedger::new(&env.config.ledger_path);
    let mut stats = RunStats::default();

    extract::stage_assets(
        &env.config.input_root,
        &env.config.staging_root(),
        &env.config.output_root,
        &decoder,
        &ledger,
        &mut stats,
    )
    .unwrap();

    assert_eq!(stats.converted, 2);
    assert_eq!(stats.failed, 1);

    let recorded = fs::read_to_string(&env.config.ledger_path).unwrap();
    let lines: Vec<_> = recorded.lines().collect();
    assert_eq!(lines, vec![bad.to_string_lossy().as_ref()]);
}

#[test]
fn retry_keeps_only_still_failing_sources() {
    let env = TestEnv::new();
    let staging = env.config.staging_root();
    fs::create_dir_all(&staging).unwrap();

    let recovers = env.add_source("a/1.wem", "x");
    let persists = env.add_source("a/2.wem", "x");

    let ledger = FailureLedger::new(&env.config.ledger_path);
    ledger.append(&recovers).unwrap();
    ledger.append(&persists).unwrap();

    let decoder = StubDecoder::failing(&["2"]);
    // failed = 2 as left by the extract pass
    let mut stats = RunStats {
        failed: 2,
        ..RunStats::default()
    };

    retry::retry_failures(&staging, &decoder, &ledger, &mut stats).unwrap();

    assert_eq!(stats.converted, 1);
    assert_eq!(stats.failed, 1);

    let remaining = ledger.take().unwrap();
    assert_eq!(remaining, vec![persists]);
}

#[test]
fn retry_skips_sources_already_staged() {
    let env = TestEnv::new();
    let staging = env.config.staging_root();
    fs::create_dir_all(&staging).unwrap();
    fs::write(staging.join("1.wav"), "already staged").unwrap();

    let source = env.add_source("a/1.wem", "x");
    let ledger = FailureLedger::new(&env.config.ledger_path);
    ledger.append(&source).unwrap();

    let decoder = StubDecoder::new();
    let mut stats = RunStats::default();
    retry::retry_failures(&staging, &decoder, &ledger, &mut stats).unwrap();

    assert_eq!(decoder.call_count(), 0);
    assert_eq!(stats.converted, 0);
    assert_eq!(stats.failed, 0);
}

#[test]
fn unmapped_reference_lands_under_unknown() {
    let env = TestEnv::new();
    let staging = env.config.staging_root();
    fs::create_dir_all(&staging).unwrap();
    fs::write(staging.join("999.wav"), "orphan").unwrap();

    let ref_path = env.config.refs_dir.join("voice.txtp");
    fs::write(&ref_path, "wem/999.wem").unwrap();

    let map = CategoryMap::new(); // no entry for 999.wav
    rename::relocate_references(&ref_path, &staging, &env.config.output_root, &map).unwrap();

    assert!(env.output("unknown/voice_0.wav").exists());
}

#[test]
fn repeated_references_consume_the_staged_file_once() {
    let env = TestEnv::new();
    let staging = env.config.staging_root();
    fs::create_dir_all(&staging).unwrap();
    fs::write(staging.join("5.wav"), "once").unwrap();

    let mut map = CategoryMap::new();
    map.insert("5.wav", "777");

    let ref_path = env.config.refs_dir.join("loop.txtp");
    // Same asset referenced at token positions 0 and 2.
    fs::write(&ref_path, "wem/5.wem again wem/5.wem").unwrap();

    rename::relocate_references(&ref_path, &staging, &env.config.output_root, &map).unwrap();

    // The first reference wins the move; the second finds nothing staged,
    // which is logged as benign.
    assert!(env.output("777/loop_0.wav").exists());
    assert!(!env.output("777/loop_2.wav").exists());
}

#[test]
fn unreadable_reference_file_does_not_abort() {
    let env = TestEnv::new();
    let staging = env.config.staging_root();
    fs::create_dir_all(&staging).unwrap();

    let map = CategoryMap::new();
    let missing_ref = env.config.refs_dir.join("ghost.txtp");

    // The file does not exist; the rename stage logs and moves on.
    rename::relocate_references(&missing_ref, &staging, &env.config.output_root, &map).unwrap();
}

#[test]
fn non_audio_extensions_are_ignored() {
    let env = TestEnv::new();
    env.add_source("777/readme.txt", "not audio");
    env.add_source("777/456.wem", "wem-data");

    let decoder = StubDecoder::new();
    let ledger = FailureLedger::new(&env.config.ledger_path);
    let mut stats = RunStats::default();

    let map = extract::stage_assets(
        &env.config.input_root,
        &env.config.staging_root(),
        &env.config.output_root,
        &decoder,
        &ledger,
        &mut stats,
    )
    .unwrap();

    assert_eq!(map.len(), 1);
    assert_eq!(stats.converted, 1);
    assert_eq!(stats.skipped, 0);
}
