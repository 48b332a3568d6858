/*!
 * End-to-end conversion tests
 */

use anyhow::Result;
use tbxmin::conversion::{convert, convert_str, convert_with_report};
use tbxmin::file_utils::InputSource;
use tbxmin::tbx_min::Status;
use tbxmin::ConvertError;

use crate::common;

/// The reference scenario: one entry, EN and DE groups
#[test]
fn test_convert_withCatEntry_shouldProduceOneEntryWithTwoGroups() -> Result<()> {
    common::init_logging();
    let doc = convert_str(&common::cat_document(), "EN", "DE")?;

    assert_eq!(doc.entries().len(), 1);
    let entry = &doc.entries()[0];
    assert_eq!(entry.id.as_deref(), Some("c1"));
    assert_eq!(entry.subject_field.as_deref(), Some("zoology"));
    assert_eq!(entry.lang_groups().len(), 2);

    let english = &entry.lang_groups()[0];
    assert!(english.code().eq_ignore_ascii_case("en"));
    assert_eq!(english.term_groups().len(), 1);
    let cat = &english.term_groups()[0];
    assert_eq!(cat.term, "cat");
    assert_eq!(cat.status, Some(Status::Preferred));
    assert_eq!(cat.note.as_deref(), Some("common pet"));

    let german = &entry.lang_groups()[1];
    assert!(german.code().eq_ignore_ascii_case("de"));
    assert_eq!(german.term_groups()[0].term, "Katze");
    assert_eq!(german.term_groups()[0].status, None);

    Ok(())
}

#[test]
fn test_convert_withHeader_shouldCaptureIdAndDescription() -> Result<()> {
    let doc = convert_str(&common::cat_document(), "en", "de")?;

    assert_eq!(doc.id.as_deref(), Some("Sample termbase"));
    assert_eq!(
        doc.description.as_deref(),
        Some("Converted for testing\nExported from a terminology database")
    );
    assert_eq!(doc.source_lang(), "en");
    assert_eq!(doc.target_lang(), "de");
    Ok(())
}

#[test]
fn test_convert_withAllDirectCategories_shouldFillTermGroup() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c2">
            <langSet xml:lang="en">
                <tig>
                    <term>printer</term>
                    <termNote type="partOfSpeech">noun</termNote>
                    <termNote type="administrativeStatus">deprecatedTerm-admn-sts</termNote>
                    <admin type="customerSubset">ACME</admin>
                </tig>
            </langSet>
            <langSet xml:lang="fr"><tig><term>imprimante</term></tig></langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "fr")?;
    let group = &doc.entries()[0].lang_groups()[0].term_groups()[0];
    assert_eq!(group.term, "printer");
    assert_eq!(group.part_of_speech.as_deref(), Some("noun"));
    assert_eq!(group.status, Some(Status::NotRecommended));
    assert_eq!(group.customer.as_deref(), Some("ACME"));
    assert_eq!(group.note, None);
    Ok(())
}

#[test]
fn test_convert_withTransactionRecord_shouldKeepItAsNoteLine() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c3">
            <langSet xml:lang="en">
                <tig>
                    <term>dog</term>
                    <transacGrp>
                        <transac>created 2020</transac>
                    </transacGrp>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let note = doc.entries()[0].lang_groups()[0].term_groups()[0]
        .note
        .clone()
        .unwrap_or_default();
    assert!(note.lines().any(|line| line == "transac:created 2020"));
    Ok(())
}

#[test]
fn test_convert_withSeveralFallbacks_shouldJoinInDocumentOrder() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c4">
            <langSet xml:lang="en">
                <tig>
                    <term>mouse</term>
                    <admin type="source">Manual</admin>
                    <descrip type="context">Move the mouse.</descrip>
                    <termNote type="termType">fullForm</termNote>
                    <transacGrp>
                        <transac type="transactionType">origination</transac>
                        <date>2020-01-01</date>
                    </transacGrp>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let group = &doc.entries()[0].lang_groups()[0].term_groups()[0];
    assert_eq!(
        group.note.as_deref(),
        Some(
            "admin:Manual\ndescrip:Move the mouse.\ntermNote:fullForm\n\
             transac:origination\ndate:2020-01-01"
        )
    );
    Ok(())
}

#[test]
fn test_convert_withEmptyCrossReferences_shouldUseTargetAttribute() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c4b">
            <langSet xml:lang="en">
                <tig>
                    <term>monitor</term>
                    <xref type="xGraphic" target="http://example.com/monitor.png"/>
                    <ref type="crossReference" target="c12"></ref>
                    <ref type="crossReference" target="c13">screen</ref>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let group = &doc.entries()[0].lang_groups()[0].term_groups()[0];
    assert_eq!(
        group.note.as_deref(),
        Some("xref:http://example.com/monitor.png\nref:c12\nref:screen")
    );
    Ok(())
}

#[test]
fn test_convert_withNoteAfterFallbacks_shouldOverwriteNote() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c5">
            <langSet xml:lang="en">
                <tig>
                    <term>key</term>
                    <admin type="source">Manual</admin>
                    <note>final note</note>
                    <transac>updated</transac>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let group = &doc.entries()[0].lang_groups()[0].term_groups()[0];
    assert_eq!(group.note.as_deref(), Some("final note\ntransac:updated"));
    Ok(())
}

#[test]
fn test_convert_withRepeatedSingleValuedFields_lastOneShouldWin() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c6">
            <descrip type="subjectField">first</descrip>
            <langSet xml:lang="en">
                <tig>
                    <term>old</term>
                    <term>new</term>
                    <termNote type="administrativeStatus">admittedTerm-admn-sts</termNote>
                    <termNote type="administrativeStatus">supersededTerm-admn-sts</termNote>
                </tig>
            </langSet>
            <descrip type="subjectField">second</descrip>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let entry = &doc.entries()[0];
    assert_eq!(entry.subject_field.as_deref(), Some("second"));
    let group = &entry.lang_groups()[0].term_groups()[0];
    assert_eq!(group.term, "new");
    assert_eq!(group.status, Some(Status::Obsolete));
    Ok(())
}

#[test]
fn test_convert_withUnknownStatusLast_shouldLeaveStatusEmpty() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c7">
            <langSet xml:lang="en">
                <tig>
                    <term>bird</term>
                    <termNote type="administrativeStatus">preferredTerm-admn-sts</termNote>
                    <termNote type="administrativeStatus">standardized</termNote>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    assert_eq!(doc.entries()[0].lang_groups()[0].term_groups()[0].status, None);
    Ok(())
}

#[test]
fn test_convert_withWhitespaceInStatus_shouldStillNormalize() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c8">
            <langSet xml:lang="en">
                <tig>
                    <term>fish</term>
                    <termNote type="administrativeStatus">
                        admittedTerm-admn-sts
                    </termNote>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    assert_eq!(doc.entries()[0].lang_groups()[0].term_groups()[0].status, Some(Status::Admitted));
    Ok(())
}

#[test]
fn test_convert_withNtig_shouldReadTermFromTermGrp() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c9">
            <langSet xml:lang="en">
                <ntig>
                    <termGrp>
                        <term>horse</term>
                        <termNote type="partOfSpeech">noun</termNote>
                    </termGrp>
                    <admin type="customerSubset">Stable Inc</admin>
                </ntig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let group = &doc.entries()[0].lang_groups()[0].term_groups()[0];
    assert_eq!(group.term, "horse");
    assert_eq!(group.part_of_speech.as_deref(), Some("noun"));
    assert_eq!(group.customer.as_deref(), Some("Stable Inc"));
    Ok(())
}

#[test]
fn test_convert_withInlineMarkupAndEntities_shouldKeepTextContent() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c10">
            <langSet xml:lang="en">
                <tig>
                    <term>salt &amp; pepper</term>
                    <descrip type="context">Pass the <hi type="bold">salt</hi>, please.</descrip>
                </tig>
            </langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let group = &doc.entries()[0].lang_groups()[0].term_groups()[0];
    assert_eq!(group.term, "salt & pepper");
    assert_eq!(group.note.as_deref(), Some("descrip:Pass the salt, please."));
    Ok(())
}

#[test]
fn test_convert_withEntryLevelAnnotation_shouldDropIt() -> Result<()> {
    let xml = common::tbx_document(
        r#"<termEntry id="c11">
            <descrip type="definition">A small animal.</descrip>
            <note>entry note</note>
            <langSet xml:lang="en"><tig><term>cat</term></tig></langSet>
        </termEntry>"#,
    );

    let doc = convert_str(&xml, "en", "de")?;
    let entry = &doc.entries()[0];
    assert_eq!(entry.subject_field, None);
    assert_eq!(entry.lang_groups()[0].term_groups()[0].note, None);
    Ok(())
}

#[test]
fn test_convert_twice_shouldBeDeterministic() -> Result<()> {
    let xml = common::tbx_document(&format!(
        "{}{}",
        common::cat_entry(),
        r#"<termEntry id="c12">
            <langSet xml:lang="de"><tig><term>Hund</term><transac>created</transac></tig></langSet>
            <langSet xml:lang="fr"><tig><term>chien</term></tig></langSet>
        </termEntry>"#
    ));

    let first = convert_str(&xml, "en", "de")?;
    let second = convert_str(&xml, "en", "de")?;
    assert_eq!(first, second);
    assert_eq!(first.to_xml(), second.to_xml());
    Ok(())
}

#[test]
fn test_convert_fromFile_shouldMatchBufferConversion() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "sample.tbx", &common::cat_document())?;

    let from_file = convert(&InputSource::from_path(&path), "en", "de")?;
    let from_buffer = convert_str(&common::cat_document(), "en", "de")?;
    assert_eq!(from_file, from_buffer);
    Ok(())
}

#[test]
fn test_convert_withMissingFile_shouldReturnIoErrorWithPath() {
    let result = convert(&InputSource::from_path("does/not/exist.tbx"), "en", "de");
    match result {
        Err(ConvertError::Io { path, .. }) => {
            assert_eq!(path.as_deref(), Some(std::path::Path::new("does/not/exist.tbx")));
        }
        other => panic!("Expected I/O error, got {:?}", other),
    }
}

#[test]
fn test_convert_withEmptyLanguage_shouldReturnUsageError() {
    let result = convert_str(&common::cat_document(), "", "de");
    assert!(matches!(result, Err(ConvertError::Usage(_))));

    let result = convert_str(&common::cat_document(), "en", "   ");
    assert!(result.map_err(|e| e.is_usage()).unwrap_err());
}

#[test]
fn test_convert_withUsageErrorAndMissingFile_shouldReportUsageFirst() {
    let result = convert(&InputSource::from_path("does/not/exist.tbx"), "en", "");
    assert!(matches!(result, Err(ConvertError::Usage(_))));
}

#[test]
fn test_convert_withMismatchedTags_shouldReturnMalformed() {
    let xml = "<martif><text><body></text></martif>";
    let result = convert_str(xml, "en", "de");
    assert!(matches!(result, Err(ConvertError::Malformed { .. })));
}

#[test]
fn test_convert_withTruncatedDocument_shouldReturnMalformed() {
    let xml = "<martif><text><body><termEntry id=\"c1\">";
    let result = convert_str(xml, "en", "de");
    assert!(matches!(result, Err(ConvertError::Malformed { .. })));
}

#[test]
fn test_convert_withEmptyInput_shouldReturnMalformed() {
    let result = convert_str("", "en", "de");
    assert!(matches!(result, Err(ConvertError::Malformed { .. })));
}

#[test]
fn test_convertWithReport_shouldReturnDocumentAndDiagnostics() -> Result<()> {
    common::init_logging();
    let conversion =
        convert_with_report(&InputSource::from_string(&common::cat_document()), "en", "de")?;
    assert_eq!(conversion.document.entries().len(), 1);
    assert!(!conversion.diagnostics.is_empty());
    assert_eq!(conversion.warnings().count(), 0);
    Ok(())
}
