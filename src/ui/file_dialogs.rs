use std::path::{Path, PathBuf};

use fltk::dialog::{FileDialogOptions, FileDialogType, NativeFileChooser};

const NOTES_FILTER: &str = "Notes\t*.{txt,md}";
const SAVE_FILTER: &str = "Markdown\t*.md\nText\t*.txt";

fn run_chooser(mut nfc: NativeFileChooser) -> Option<PathBuf> {
    nfc.show();
    let path = nfc.filename();
    if path.as_os_str().is_empty() { None } else { Some(path) }
}

pub fn native_open_dialog(data_dir: &Path) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseFile);
    nfc.set_title("Open Note");
    nfc.set_filter(NOTES_FILTER);
    let _ = nfc.set_directory(&data_dir);
    run_chooser(nfc)
}

/// Ask where to save. Only the file name of the answer is used; notes
/// always live in the data directory.
pub fn native_save_dialog(data_dir: &Path, suggested: &str) -> Option<PathBuf> {
    let mut nfc = NativeFileChooser::new(FileDialogType::BrowseSaveFile);
    nfc.set_title("Save Note As");
    nfc.set_filter(SAVE_FILTER);
    nfc.set_option(FileDialogOptions::SaveAsConfirm);
    nfc.set_preset_file(suggested);
    let _ = nfc.set_directory(&data_dir);
    run_chooser(nfc)
}
