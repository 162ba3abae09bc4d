//! Telegram Desktop export reader.

use channel_tally::pipeline::Pipeline;
use channel_tally::sources::export::ExportSource;
use channel_tally::sources::{MessageSource, SourceError};
use channel_tally::types::Score;

const EXPORT: &str = r#"{
  "name": "Nzui Manto",
  "type": "public_channel",
  "id": 1234567890,
  "messages": [
    {
      "id": 1,
      "type": "service",
      "date": "2025-10-12T13:00:00",
      "date_unixtime": "1760274000",
      "action": "create_channel",
      "text": ""
    },
    {
      "id": 2,
      "type": "message",
      "date": "2025-10-12T14:03:00",
      "date_unixtime": "1760277780",
      "text": "Paul Biya: 40 Issa Tchiroma: 35"
    },
    {
      "id": 3,
      "type": "message",
      "date": "2025-10-12T14:04:00",
      "date_unixtime": "1760277840",
      "photo": "photos/photo_1.jpg",
      "text": ""
    },
    {
      "id": 4,
      "type": "message",
      "date": "2025-10-12T14:05:00",
      "date_unixtime": "1760277900",
      "text": [
        {"type": "bold", "text": "Issa Tchiroma"},
        ": 50 ",
        {"type": "bold", "text": "Paul Biya"},
        ": 50"
      ]
    }
  ]
}"#;

async fn drain(source: &mut ExportSource) -> Vec<channel_tally::types::ChannelMessage> {
    let mut out = Vec::new();
    while let Some(message) = source.next_message().await.expect("export reads") {
        out.push(message);
    }
    out
}

#[tokio::test]
async fn skips_service_entries_and_keeps_textless_posts() {
    let mut source = ExportSource::from_json("result.json", EXPORT, 100).expect("export parses");
    let messages = drain(&mut source).await;

    let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4, 3, 2]);
    assert_eq!(messages[1].text, None);
    assert_eq!(messages[2].timestamp.to_rfc3339(), "2025-10-12T14:03:00+00:00");
}

#[tokio::test]
async fn rich_text_is_flattened() {
    let mut source = ExportSource::from_json("result.json", EXPORT, 100).expect("export parses");
    let messages = drain(&mut source).await;
    assert_eq!(
        messages[0].text.as_deref(),
        Some("Issa Tchiroma: 50 Paul Biya: 50")
    );
}

#[tokio::test]
async fn limit_keeps_the_newest_entries() {
    let mut source = ExportSource::from_json("result.json", EXPORT, 1).expect("export parses");
    let messages = drain(&mut source).await;
    let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4]);
}

#[tokio::test]
async fn limit_counts_every_entry() {
    let mut source = ExportSource::from_json("result.json", EXPORT, 2).expect("export parses");
    let messages = drain(&mut source).await;
    // The textless post 3 uses up the second slot.
    let ids: Vec<i64> = messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4, 3]);
}

#[tokio::test]
async fn history_is_listed_newest_first() {
    let mut source = ExportSource::from_json("result.json", EXPORT, 100).expect("export parses");
    let outcome = Pipeline::new(&["Paul Biya", "Issa Tchiroma"])
        .run(&mut source)
        .await;
    let paul = outcome.result.record("Paul Biya").expect("paul");
    let ids: Vec<i64> = paul.messages.iter().map(|m| m.id).collect();
    assert_eq!(ids, vec![4, 2]);
}

#[tokio::test]
async fn export_feeds_the_pipeline() {
    let mut source = ExportSource::from_json("result.json", EXPORT, 100).expect("export parses");
    let outcome = Pipeline::new(&["Paul Biya", "Issa Tchiroma"])
        .run(&mut source)
        .await;
    assert!(outcome.is_complete());
    let paul = outcome.result.record("Paul Biya").expect("paul");
    assert_eq!(paul.total, Score::from(90u64));
    assert_eq!(outcome.stats.scanned, 2);
}

#[tokio::test]
async fn open_reads_from_disk() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let path = tmp.path().join("result.json");
    std::fs::write(&path, EXPORT).expect("write export");

    let mut source = ExportSource::open(&path, 100).await.expect("export opens");
    assert!(source.describe().ends_with("result.json"));
    assert_eq!(drain(&mut source).await.len(), 3);
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let tmp = tempfile::tempdir().expect("should create temp dir");
    let result = ExportSource::open(&tmp.path().join("missing.json"), 100).await;
    assert!(matches!(result, Err(SourceError::ExportRead { .. })));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let result = ExportSource::from_json("bad.json", "{\"messages\": 3}", 100);
    assert!(matches!(result, Err(SourceError::ExportParse { .. })));
}
