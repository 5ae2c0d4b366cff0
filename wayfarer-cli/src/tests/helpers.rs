//! Test helpers for writing plan request files.

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;
use wayfarer_core::TripPreferences;
use wayfarer_core::test_support::{lyon, marseille, paris};

use crate::plan::PlanFile;

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    std::fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Temporary directory that lives as long as the returned handle.
pub(super) fn workspace() -> (TempDir, Utf8PathBuf) {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    (tmp, root)
}

/// Six days over Paris and Lyon with the three French fixtures catalogued.
pub(super) fn french_plan_file(ids: &[&str]) -> PlanFile {
    PlanFile {
        preferences: TripPreferences::new(3000.0, "EUR", 6),
        destination_ids: ids.iter().map(|id| (*id).to_owned()).collect(),
        catalogue: vec![paris(), lyon(), marseille()],
    }
}

pub(super) fn write_plan_file(path: &Utf8Path, file: &PlanFile) {
    let payload = serde_json::to_string_pretty(file).expect("serialize plan file");
    write_utf8(path, payload.as_bytes());
}
