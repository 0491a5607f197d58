//! Transfer progress tests

use edwh_files_cli::{create_transfer_bar, TransferProgress, VerbosityLevel};
use serial_test::serial;

#[test]
fn test_transfer_bar_length() {
    let bar = create_transfer_bar(1024, "Uploading");
    assert_eq!(bar.length(), Some(1024));
}

#[test]
#[serial]
fn test_progress_tracks_known_length() {
    VerbosityLevel::set(VerbosityLevel::Quiet);
    let progress = TransferProgress::new("Downloading");
    let callback = progress.callback();

    callback(10, Some(40));
    callback(40, Some(40));

    assert_eq!(progress.position(), 40);
    assert_eq!(progress.length(), Some(40));
    progress.finish();
    VerbosityLevel::set(VerbosityLevel::Normal);
}

#[test]
#[serial]
fn test_progress_unknown_length() {
    VerbosityLevel::set(VerbosityLevel::Quiet);
    let progress = TransferProgress::new("Downloading");

    progress.update(512, None);

    assert_eq!(progress.position(), 512);
    assert_eq!(progress.length(), None);
    progress.finish();
    VerbosityLevel::set(VerbosityLevel::Normal);
}
