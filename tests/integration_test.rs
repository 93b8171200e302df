use std::fs;
use std::path::PathBuf;

use address_normalizer::{CanonicalAddress, FormatError, NormalizeError, Normalizer};
use anyhow::Result;
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};

const TSV_INPUT: &str = "first\tmiddle\tlast\torganization\taddress\tcity\tstate\tcounty\tzip\tzip4
Jane\tN/M/N\tDoe\tN/A\t123 Main St\tAnytown\tCA\tAlameda\t94016\t
\t\t\tHarvard University\t1350 Massachusetts Ave\tCambridge\tMA\tMiddlesex\t02138\t1234
\t\tSmith Holdings\tN/A\t9 Elm St\tDover\tDE\tKent\t19901\t
John\tQuincy\tAdams\tN/A\t1250 Hancock St\tQuincy\tMA\tNorfolk\t02169\t0001
";

const XML_INPUT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<EXPORT>
  <ENTITY>
    <ENT>
      <NAME> </NAME>
      <COMPANY>Acme Inc</COMPANY>
      <STREET>1 Loop Rd</STREET>
      <STREET_2></STREET_2>
      <STREET_3>Building 7</STREET_3>
      <CITY>Springfield</CITY>
      <STATE>IL</STATE>
      <POSTAL_CODE>62701-</POSTAL_CODE>
    </ENT>
    <ENT>
      <NAME>Jane Q. Public</NAME>
      <COMPANY> </COMPANY>
      <STREET>123 Main St</STREET>
      <STREET_2/>
      <STREET_3>Suite 4</STREET_3>
      <CITY>Anytown</CITY>
      <STATE>CA</STATE>
      <POSTAL_CODE>10001-</POSTAL_CODE>
    </ENT>
  </ENTITY>
</EXPORT>
"#;

const TXT_INPUT: &str = "Jane Doe
123 Main St
Anytown, CA 94016

John Smith
456 Oak Ave
MARIN COUNTY
Sausalito, CA 94965

Ann Lee
9 Pine Rd
Boston, MA 02108-1234
";

fn write_input(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

fn run_to_values(paths: &[PathBuf]) -> Result<Vec<Value>> {
    let mut buffer = Vec::new();
    Normalizer::default().run(paths, &mut buffer)?;

    let text = String::from_utf8(buffer)?;
    let values = serde_json::Deserializer::from_str(&text)
        .into_iter::<Value>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(values)
}

#[test]
fn test_tsv_file_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let path = write_input(&dir, "input2.tsv", TSV_INPUT)?;

    let values = run_to_values(&[path])?;
    assert_eq!(
        values,
        vec![
            json!({
                "organization": "Harvard University",
                "street": "1350 Massachusetts Ave",
                "city": "Cambridge",
                "state": "MA",
                "zip": "02138-1234"
            }),
            json!({
                "name": "John Quincy Adams",
                "street": "1250 Hancock St",
                "city": "Quincy",
                "county": "",
                "state": "MA",
                "zip": "02169"
            }),
            json!({
                "organization": "Smith Holdings",
                "street": "9 Elm St",
                "city": "Dover",
                "state": "DE",
                "zip": "19901"
            }),
            json!({
                "name": "Jane Doe",
                "street": "123 Main St",
                "city": "Anytown",
                "county": "",
                "state": "CA",
                "zip": "94016"
            }),
        ]
    );
    Ok(())
}

#[test]
fn test_xml_file_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let path = write_input(&dir, "input1.xml", XML_INPUT)?;

    let values = run_to_values(&[path])?;
    assert_eq!(
        values,
        vec![
            json!({
                "name": "Jane Q. Public",
                "street": "123 Main St;Suite 4",
                "city": "Anytown",
                "county": "",
                "state": "CA",
                "zip": "10001-"
            }),
            json!({
                "organization": "Acme Inc",
                "street": "1 Loop Rd;Building 7",
                "city": "Springfield",
                "state": "IL",
                "zip": "62701-"
            }),
        ]
    );
    Ok(())
}

#[test]
fn test_txt_file_end_to_end() -> Result<()> {
    let dir = tempdir()?;
    let path = write_input(&dir, "input3.txt", TXT_INPUT)?;

    let values = run_to_values(&[path])?;
    let zips: Vec<&str> = values.iter().filter_map(|v| v["zip"].as_str()).collect();
    assert_eq!(zips, vec!["02108-1234", "94016", "94965"]);
    assert_eq!(values[2]["county"], json!("MARIN"));
    assert_eq!(values[0]["state"], json!("MA"));
    assert_eq!(values[1]["city"], json!("Anytown"));
    Ok(())
}

#[test]
fn test_files_printed_in_given_order_without_merging() -> Result<()> {
    let dir = tempdir()?;
    let txt = write_input(&dir, "input3.txt", TXT_INPUT)?;
    let notes = write_input(&dir, "notes.md", "ignored")?;
    let tsv = write_input(&dir, "input2.tsv", TSV_INPUT)?;

    let mut buffer = Vec::new();
    let summary = Normalizer::default().run(&[txt, notes, tsv], &mut buffer)?;
    assert_eq!(summary.files_processed, 2);
    assert_eq!(summary.files_skipped, 1);
    assert_eq!(summary.records_written, 7);

    let text = String::from_utf8(buffer)?;
    let records: Vec<CanonicalAddress> = serde_json::Deserializer::from_str(&text)
        .into_iter::<CanonicalAddress>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    let zips: Vec<&str> = records.iter().map(|r| r.zip()).collect();
    // Each file is sorted on its own; the second file starts over at the lowest zip
    assert_eq!(
        zips,
        vec!["02108-1234", "94016", "94965", "02138-1234", "02169", "19901", "94016"]
    );
    Ok(())
}

#[test]
fn test_missing_zip_aborts_run() -> Result<()> {
    let dir = tempdir()?;
    let good = write_input(&dir, "good.txt", TXT_INPUT)?;
    let bad = write_input(&dir, "bad.txt", "Jane Doe\n123 Main St\nAnytown, CA\n")?;

    let mut buffer = Vec::new();
    let err = Normalizer::default()
        .run(&[good, bad], &mut buffer)
        .unwrap_err();

    let cause = err
        .downcast_ref::<NormalizeError>()
        .expect("error should carry the normalization failure");
    assert!(matches!(
        cause,
        NormalizeError::Format(FormatError::MissingZip(_))
    ));
    // The first file was already written before the failure
    assert!(!buffer.is_empty());
    Ok(())
}
