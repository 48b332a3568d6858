/*!
 * Common test utilities for the tbxmin test suite
 */

#![allow(dead_code)]

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Route library logging to the test harness output
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Wrap term entries in a complete TBX document with a header
pub fn tbx_document(entries: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE martif SYSTEM "TBXBasiccoreStructV02.dtd">
<martif type="TBX-Basic" xml:lang="en-US">
    <martifHeader>
        <fileDesc>
            <titleStmt>
                <title>Sample termbase</title>
                <note>Converted for testing</note>
            </titleStmt>
            <sourceDesc>
                <p>Exported from a terminology database</p>
            </sourceDesc>
        </fileDesc>
        <encodingDesc>
            <p type="XCSURI">TBXBasicXCSV02.xcs</p>
        </encodingDesc>
    </martifHeader>
    <text>
        <body>
{}
        </body>
    </text>
</martif>
"#,
        entries
    )
}

/// The two-language cat entry used by most scenarios
pub fn cat_entry() -> &'static str {
    r#"
            <termEntry id="c1">
                <descrip type="subjectField">zoology</descrip>
                <langSet xml:lang="EN">
                    <tig>
                        <term>cat</term>
                        <termNote type="administrativeStatus">preferredTerm-admn-sts</termNote>
                        <note>common pet</note>
                    </tig>
                </langSet>
                <langSet xml:lang="DE">
                    <tig>
                        <term>Katze</term>
                    </tig>
                </langSet>
            </termEntry>"#
}

/// A complete document holding only the cat entry
pub fn cat_document() -> String {
    tbx_document(cat_entry())
}
