//! Input artifact checks run before any tool is invoked.

use crate::packager::{error::Error, settings::Settings};
use std::io::Read;
use std::path::Path;

/// Leading bytes of a Windows icon resource: reserved 0, type 1 (icon).
const ICO_MAGIC: [u8; 4] = [0x00, 0x00, 0x01, 0x00];

/// Checks that every input artifact exists and looks usable.
///
/// Returns every problem found, in manifest, entry script, icon order. An
/// empty vector means the inputs are fine.
pub fn check_inputs(settings: &Settings) -> Vec<Error> {
    let mut problems = Vec::new();

    if !settings.skip_install() {
        let manifest = settings.manifest_path();
        if !manifest.is_file() {
            problems.push(Error::ManifestMissing(manifest));
        }
    }

    let entry = settings.entry_script_path();
    if !entry.is_file() {
        problems.push(Error::EntryScriptMissing(entry));
    }

    let icon = settings.icon_path();
    if !icon.is_file() {
        problems.push(Error::IconMissing(icon));
    } else if !has_ico_header(&icon) {
        problems.push(Error::IconInvalid(icon));
    }

    problems
}

fn has_ico_header(path: &Path) -> bool {
    let mut header = [0u8; 4];
    match std::fs::File::open(path).and_then(|mut f| f.read_exact(&mut header)) {
        Ok(()) => header == ICO_MAGIC,
        Err(e) => {
            log::debug!("Could not read icon header from {}: {e}", path.display());
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{PackageSettings, SettingsBuilder};

    fn settings(dir: &Path, skip_install: bool) -> Settings {
        SettingsBuilder::new()
            .working_dir(dir)
            .package_settings(PackageSettings::default())
            .skip_install(skip_install)
            .build()
            .unwrap()
    }

    fn write_valid_inputs(dir: &Path) {
        std::fs::write(dir.join("requirements.txt"), "Pillow\nnumpy\n").unwrap();
        std::fs::write(dir.join("timview-v2.py"), "print('hi')\n").unwrap();
        std::fs::write(dir.join("icon.ico"), [0u8, 0, 1, 0, 1, 0, 16, 16]).unwrap();
    }

    #[test]
    fn valid_inputs_pass() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_inputs(dir.path());
        assert!(check_inputs(&settings(dir.path(), false)).is_empty());
    }

    #[test]
    fn empty_directory_reports_all_three() {
        let dir = tempfile::tempdir().unwrap();
        let problems = check_inputs(&settings(dir.path(), false));
        assert_eq!(problems.len(), 3);
        assert!(matches!(problems[0], Error::ManifestMissing(_)));
        assert!(matches!(problems[1], Error::EntryScriptMissing(_)));
        assert!(matches!(problems[2], Error::IconMissing(_)));
    }

    #[test]
    fn manifest_ignored_when_install_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_inputs(dir.path());
        std::fs::remove_file(dir.path().join("requirements.txt")).unwrap();
        assert!(check_inputs(&settings(dir.path(), true)).is_empty());
    }

    #[test]
    fn png_renamed_to_ico_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_inputs(dir.path());
        std::fs::write(dir.path().join("icon.ico"), b"\x89PNG\r\n\x1a\n").unwrap();
        let problems = check_inputs(&settings(dir.path(), false));
        assert!(matches!(problems.as_slice(), [Error::IconInvalid(_)]));
    }

    #[test]
    fn truncated_icon_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        write_valid_inputs(dir.path());
        std::fs::write(dir.path().join("icon.ico"), [0u8, 0]).unwrap();
        let problems = check_inputs(&settings(dir.path(), false));
        assert!(matches!(problems.as_slice(), [Error::IconInvalid(_)]));
    }
}
