//! Output formatting tests

use edwh_files_cli::output::{render_json, OutputStyle};
use edwh_files_http::{DeleteReceipt, UploadReceipt};

#[test]
fn test_plain_style_has_no_escape_codes() {
    let style = OutputStyle::plain();
    assert_eq!(style.success("done"), "✓ done");
    assert_eq!(style.error("failed"), "✗ failed");
    assert_eq!(style.warning("careful"), "⚠ careful");
    assert_eq!(style.info("fyi"), "ℹ fyi");
    assert_eq!(style.link("https://files.edwh.nl/x"), "https://files.edwh.nl/x");
}

#[test]
fn test_colored_style_wraps_text() {
    colored::control::set_override(true);
    let style = OutputStyle { use_colors: true };
    let rendered = style.error("failed");
    assert!(rendered.contains("failed"));
    assert!(rendered.contains('\u{1b}'));
    colored::control::unset_override();
}

#[test]
fn test_upload_receipt_json() {
    let receipt = UploadReceipt {
        status: 200,
        url: "https://files.edwh.nl/abc/notes.txt".to_string(),
        delete: Some("https://files.edwh.nl/abc/notes.txt/token".to_string()),
    };
    let value: serde_json::Value = serde_json::from_str(&render_json(&receipt).unwrap()).unwrap();
    assert_eq!(value["status"], 200);
    assert_eq!(value["url"], "https://files.edwh.nl/abc/notes.txt");
    assert_eq!(value["delete"], "https://files.edwh.nl/abc/notes.txt/token");
}

#[test]
fn test_delete_receipt_json() {
    let receipt = DeleteReceipt {
        status: 200,
        response: String::new(),
    };
    let rendered = render_json(&receipt).unwrap();
    assert!(rendered.contains("\"status\": 200"));
}
