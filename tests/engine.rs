//! End-to-end engine tests over a mock transport.
//!
//! The mock stream verifies the exact command bytes sent and replays server
//! output in deliberately awkward fragments, since a real reply may span any
//! number of reads.

#![allow(clippy::unwrap_used)]

use tokio_test::io::Builder;

use petrel_imap::{
    CriterionValue, Engine, Error, FetchQuery, MessageDate, SearchCriteria, StreamTransport,
    TagGenerator,
};

const FETCH_1_2: &[u8] = b"A0001 FETCH 1:2 (BODY.PEEK[TEXT] BODY.PEEK[HEADER.FIELDS \
    (SUBJECT FROM TO MESSAGE-ID CONTENT-TYPE DATE)])\r\n";

#[tokio::test]
async fn fetch_extracts_records_from_fragmented_reply() {
    let mock = Builder::new()
        .write(FETCH_1_2)
        .read(b"* 1 FETCH (BODY[HEADER.FIELDS (SUBJECT FROM TO MESSAGE-ID CONTENT-TYPE DATE)]\r\n")
        .read(b"From: alice@example.com\r\nSubject: =?UTF-8?B?SGVsbG8=?=\r\n")
        .read(b"Date: Tue, 1 Jul 2003 10:52:37 +0200\r\n\r\n")
        .read(b"BODY[TEXT]\r\ngreetings\r\nfrom the mock server\r\n)\r\n")
        .read(b"* 2 FETCH (BODY[HEADER.FIELDS (SUBJECT FROM TO MESSAGE-ID CONTENT-TYPE DATE)]\r\n")
        .read(b"Subject: second\r\nDate: not a date\r\n)\r\n")
        .read(b"A0001 OK Comp")
        .read(b"leted\r\n")
        .build();

    let mut engine = Engine::new(StreamTransport::new(mock));
    let records = engine.fetch(&FetchQuery::range(1, 2)).await.unwrap();

    assert_eq!(records.len(), 2);

    let first = &records[0];
    assert_eq!(first.from.as_deref(), Some("alice@example.com"));
    assert_eq!(first.subject.as_deref(), Some("Hello"));
    assert!(matches!(first.date, MessageDate::Parsed(_)));
    assert_eq!(first.body, "greetings\nfrom the mock server");

    let second = &records[1];
    assert_eq!(second.subject.as_deref(), Some("second"));
    assert_eq!(second.date, MessageDate::Invalid("not a date".to_string()));
    assert_eq!(second.from, None);
    assert_eq!(second.body, "");
}

#[tokio::test]
async fn fetch_trims_trailing_framing_noise_from_last_block() {
    let mock = Builder::new()
        .write(FETCH_1_2)
        .read(b"* 1 FETCH (stuff\r\nBODY[TEXT]\r\nbody text\r\n)\r\n\r\nA0001 OK Completed\r\n")
        .build();

    let mut engine = Engine::new(StreamTransport::new(mock));
    let records = engine.fetch(&FetchQuery::range(1, 2)).await.unwrap();

    // The completion line belongs to the last block but is framing noise.
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].body, "body text");
    assert!(records[0].raw.contains("A0001 OK Completed"));
}

#[tokio::test]
async fn fetch_respects_custom_tag_prefix() {
    let mock = Builder::new()
        .write(b"g0001 FETCH 5:5 (BODY.PEEK[TEXT] BODY.PEEK[HEADER.FIELDS \
            (SUBJECT FROM TO MESSAGE-ID CONTENT-TYPE DATE)])\r\n")
        .read(b"* 5 FETCH (BODY[TEXT]\r\nx\r\n)\r\ng0001 OK Completed\r\n")
        .build();

    let mut engine =
        Engine::new(StreamTransport::new(mock)).with_tag_generator(TagGenerator::new('g'));
    let records = engine.fetch(&FetchQuery::range(5, 5)).await.unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].body, "x");
}

#[tokio::test]
async fn search_compiles_criteria_and_collects_ids() {
    let mock = Builder::new()
        .write(b"A0001 SEARCH UNSEEN SINCE 5-Apr-2024\r\n")
        .read(b"* SEARCH 2 4 7\r\n")
        .read(b"A0001 OK Completed\r\n")
        .build();

    let criteria = SearchCriteria::new()
        .with("seen", CriterionValue::Flag(false))
        .with(
            "since",
            CriterionValue::Date(chrono::NaiveDate::from_ymd_opt(2024, 4, 5).unwrap()),
        );

    let mut engine = Engine::new(StreamTransport::new(mock));
    let ids = engine.search(&criteria).await.unwrap();

    assert_eq!(ids, [2, 4, 7]);
}

#[tokio::test]
async fn search_with_no_matches_returns_empty() {
    let mock = Builder::new()
        .write(b"A0001 SEARCH DELETED\r\n")
        .read(b"* SEARCH\r\nA0001 OK Completed\r\n")
        .build();

    let criteria = SearchCriteria::new().with("deleted", CriterionValue::Flag(true));

    let mut engine = Engine::new(StreamTransport::new(mock));
    let ids = engine.search(&criteria).await.unwrap();

    assert!(ids.is_empty());
}

#[tokio::test]
async fn search_rejects_empty_criteria_before_any_io() {
    // No expectations queued: touching the stream would panic the mock.
    let mock = Builder::new().build();

    let mut engine = Engine::new(StreamTransport::new(mock));
    let err = engine.search(&SearchCriteria::new()).await.unwrap_err();

    assert!(matches!(err, Error::EmptyCriteria));
}

#[tokio::test]
async fn truncated_stream_surfaces_incomplete_response() {
    let mock = Builder::new()
        .write(FETCH_1_2)
        .read(b"* 1 FETCH (BODY[TEXT]\r\npartial body\r\n")
        .build();

    let mut engine = Engine::new(StreamTransport::new(mock));
    let err = engine.fetch(&FetchQuery::range(1, 2)).await.unwrap_err();

    assert!(matches!(
        err,
        Error::IncompleteResponse { ref tag, lines_seen: 2 } if tag == "A0001"
    ));
}

#[tokio::test]
async fn consecutive_commands_use_fresh_tags() {
    let mock = Builder::new()
        .write(b"A0001 SEARCH SEEN\r\n")
        .read(b"* SEARCH 1\r\nA0001 OK Completed\r\n")
        .write(b"A0002 SEARCH UNSEEN\r\n")
        .read(b"* SEARCH 2\r\nA0002 OK Completed\r\n")
        .build();

    let mut engine = Engine::new(StreamTransport::new(mock));

    let seen = engine
        .search(&SearchCriteria::new().with("seen", CriterionValue::Flag(true)))
        .await
        .unwrap();
    let unseen = engine
        .search(&SearchCriteria::new().with("seen", CriterionValue::Flag(false)))
        .await
        .unwrap();

    assert_eq!(seen, [1]);
    assert_eq!(unseen, [2]);
}
