mod common;

use common::{Call, DESCRIPTOR_XML, RecordingSdk};
use decolar::ConfigReader;
use decolar::error::DeployError;
use decolar::reader::Descriptor;

fn write_descriptor(xml: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("appengine-web.xml");
    std::fs::write(&path, xml).unwrap();
    (dir, path)
}

#[test]
fn reads_fields_from_descriptor_file() {
    let (_dir, path) = write_descriptor(DESCRIPTOR_XML);
    let reader = ConfigReader::new();

    assert_eq!(reader.project_id_from_descriptor(&path).unwrap(), "my-proj");
    assert_eq!(reader.version_from_descriptor(&path).unwrap(), "from-descriptor");
}

#[test]
fn blank_field_is_not_found() {
    let (_dir, path) =
        write_descriptor("<appengine-web-app><application>   </application></appengine-web-app>");

    let err = ConfigReader::new().project_id_from_descriptor(&path).unwrap_err();

    assert!(matches!(err, DeployError::ConfigNotFound(_)));
    assert!(err.to_string().contains("<application>"));
}

#[test]
fn missing_file_is_a_parse_error_naming_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("appengine-web.xml");

    let err = ConfigReader::new().version_from_descriptor(&path).unwrap_err();

    assert!(matches!(
        err,
        DeployError::DescriptorParse { ref path, .. } if path.ends_with("appengine-web.xml")
    ));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let (_dir, path) = write_descriptor("<appengine-web-app><application>x</version>");

    let err = ConfigReader::new().project_id_from_descriptor(&path).unwrap_err();

    assert!(matches!(err, DeployError::DescriptorParse { .. }));
}

#[test]
fn reads_every_call_fresh() {
    let (_dir, path) = write_descriptor(DESCRIPTOR_XML);
    let reader = ConfigReader::new();
    assert_eq!(reader.version_from_descriptor(&path).unwrap(), "from-descriptor");

    std::fs::write(
        &path,
        "<appengine-web-app><version>rewritten</version></appengine-web-app>",
    )
    .unwrap();

    assert_eq!(reader.version_from_descriptor(&path).unwrap(), "rewritten");
}

#[test]
fn escaped_text_is_unescaped() {
    let descriptor =
        Descriptor::parse("<appengine-web-app><version>a&amp;b</version></appengine-web-app>")
            .unwrap();

    assert_eq!(descriptor.version.as_deref(), Some("a&b"));
}

#[test]
fn ambient_project_from_sdk() {
    let sdk = RecordingSdk::new().with_project("ambient");

    assert_eq!(ConfigReader::new().project_id_from_sdk(&sdk).unwrap(), "ambient");
    assert_eq!(sdk.calls(), vec![Call::ProjectFromConfig]);
}

#[test]
fn blank_ambient_project_is_not_found() {
    let sdk = RecordingSdk::new().with_project(" ");

    let err = ConfigReader::new().project_id_from_sdk(&sdk).unwrap_err();

    assert!(matches!(err, DeployError::ConfigNotFound(_)));
}
