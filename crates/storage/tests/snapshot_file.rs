use std::io::Write;

use path_core::model::QuestionId;
use storage::{CatalogRepository, CatalogSnapshot, CompletionRepository, StorageError};

const CATALOG: &str = r#"{
    "units": [{ "_id": "u1", "title": "Basics", "level": 1 }],
    "questions": [
        { "_id": "q1", "type": "Choice", "body": "Pick", "exp": 10, "unit_id": "u1" },
        { "_id": "q2", "type": "Open", "body": "Explain", "exp": 20, "unit_id": "u1" }
    ],
    "completed": ["q1"]
}"#;

#[tokio::test]
async fn snapshot_file_seeds_repository() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(CATALOG.as_bytes()).expect("write");

    let snapshot = CatalogSnapshot::load(file.path()).await.expect("load");
    let repo = snapshot.into_repository().expect("seed");

    let units = repo.list_units().await.unwrap();
    assert_eq!(units.len(), 1);
    let questions = repo.list_questions().await.unwrap();
    assert_eq!(questions.len(), 2);

    let completed = repo.completion_set().await.unwrap();
    assert!(completed.contains(&QuestionId::new("q1")));
    assert!(!completed.contains(&QuestionId::new("q2")));
}

#[tokio::test]
async fn missing_snapshot_file_is_not_found() {
    let dir = tempfile::tempdir().expect("tempdir");
    let err = CatalogSnapshot::load(dir.path().join("absent.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn malformed_snapshot_file_is_a_serialization_error() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(b"{ \"units\": [").expect("write");

    let err = CatalogSnapshot::load(file.path()).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[tokio::test]
async fn blank_question_id_in_file_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(CATALOG.replace("\"q2\"", "\"  \"").as_bytes())
        .expect("write");

    let err = CatalogSnapshot::load(file.path()).await.unwrap_err();
    assert!(matches!(err, StorageError::Serialization(_)));
}

#[test]
fn whole_float_levels_and_rewards_are_accepted() {
    let snapshot = CatalogSnapshot::from_json_str(
        r#"{
            "units": [{ "_id": "u1", "title": "Basics", "level": 2.0 }],
            "questions": [{ "_id": "q1", "type": "Choice", "body": "Pick", "exp": 10.0, "unit_id": "u1" }]
        }"#,
    )
    .unwrap();
    assert_eq!(snapshot.units[0].level, 2);
    assert_eq!(snapshot.questions[0].reward, 10);
}

#[test]
fn fractional_reward_is_a_serialization_error() {
    let err = CatalogSnapshot::from_json_str(
        r#"{
            "units": [{ "_id": "u1", "title": "Basics", "level": 1 }],
            "questions": [{ "_id": "q1", "type": "Choice", "body": "Pick", "exp": 2.5, "unit_id": "u1" }]
        }"#,
    )
    .unwrap_err();
    assert!(matches!(err, StorageError::Serialization(msg) if msg.contains("question exp")));
}
