//! Field-by-field checks of the bundled fixture files against a recorded
//! reference table, null and list-valued fields included.

use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use syosetu_metrics::extract;
use syosetu_metrics::record::{MetricRecord, RankEntry};

#[derive(Default)]
struct Reference {
    word_cnt: Option<u64>,
    post_cnt: Option<u64>,
    genre: Option<&'static str>,
    keywords: Option<&'static [&'static str]>,
    global_point: Option<u64>,
    weekly_unique_cnt: Option<u64>,
    review_cnt: Option<u64>,
    bookmark_cnt: Option<u64>,
    hyouka_cnt: Option<u64>,
    hyouka_point: Option<u64>,
    most_recent_update: Option<NaiveDateTime>,
    rank: &'static [(&'static str, u64)],
}

fn ts(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> Option<NaiveDateTime> {
    Some(
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, 0)
            .unwrap(),
    )
}

fn reference_table() -> Vec<Reference> {
    vec![
        // 01: fully populated search box
        Reference {
            word_cnt: Some(864831),
            post_cnt: Some(208),
            genre: Some("ハイファンタジー〔ファンタジー〕"),
            keywords: Some(&["異世界転生", "チート", "成り上がり"]),
            global_point: Some(45678),
            weekly_unique_cnt: Some(1234),
            review_cnt: Some(56),
            bookmark_cnt: Some(12345),
            hyouka_cnt: Some(678),
            hyouka_point: Some(9876),
            most_recent_update: ts(2021, 5, 3, 12, 30),
            rank: &[("日", 12), ("週", 345), ("月", 6789)],
        },
        // 02: short story, no post marker, no keywords, no ranking
        Reference {
            word_cnt: Some(6912),
            post_cnt: None,
            genre: Some("純文学〔文芸〕"),
            global_point: Some(234),
            bookmark_cnt: Some(45),
            hyouka_cnt: Some(12),
            hyouka_point: Some(88),
            most_recent_update: ts(2019, 11, 20, 8, 5),
            ..Default::default()
        },
        // 03: first 文字 marker has no digits, fallback takes the second
        Reference {
            word_cnt: Some(1234567),
            post_cnt: Some(912),
            keywords: Some(&["VRMMO", "ゲーム"]),
            global_point: Some(8765),
            most_recent_update: ts(2022, 1, 31, 23, 59),
            rank: &[("週", 999)],
            ..Default::default()
        },
        // 04: out-of-range date, empty post count, one rank entry missing
        // its point value
        Reference {
            word_cnt: Some(45000),
            post_cnt: None,
            genre: Some("推理〔文芸〕"),
            keywords: Some(&["ミステリー", "探偵"]),
            global_point: Some(1200),
            review_cnt: Some(3),
            most_recent_update: None,
            rank: &[("月", 77)],
            ..Default::default()
        },
        // 05: separator runs longer than the 5-character bound
        Reference {
            word_cnt: Some(123456),
            post_cnt: Some(56),
            genre: Some("ローファンタジー〔ファンタジー〕"),
            keywords: Some(&["現代", "異能力バトル"]),
            global_point: None,
            weekly_unique_cnt: None,
            most_recent_update: ts(2021, 5, 3, 12, 30),
            rank: &[("月", 4567), ("週", 123)],
            ..Default::default()
        },
        // 06: quarter and year windows; the period capture keeps at most
        // two ideographs
        Reference {
            word_cnt: Some(2345678),
            post_cnt: Some(512),
            genre: Some("宇宙〔SF〕"),
            keywords: Some(&["スペースオペラ", "艦隊戦"]),
            global_point: Some(98765),
            weekly_unique_cnt: Some(4321),
            review_cnt: Some(210),
            bookmark_cnt: Some(87654),
            hyouka_cnt: Some(3456),
            hyouka_point: Some(65432),
            most_recent_update: ts(2023, 8, 15, 6, 45),
            rank: &[("半期", 1111), ("年", 22222)],
        },
        // 07: no markers at all
        Reference::default(),
        // 08: duplicated labels, the first occurrence wins
        Reference {
            word_cnt: Some(787878),
            post_cnt: Some(99),
            genre: Some("ホラー〔文芸〕"),
            keywords: Some(&["幽霊", "洋館", "呪い"]),
            global_point: Some(777),
            most_recent_update: ts(2018, 6, 1, 0, 0),
            rank: &[("日", 5)],
            ..Default::default()
        },
        // 09: empty keyword cell falls through to the second occurrence
        Reference {
            word_cnt: Some(55555),
            post_cnt: Some(123),
            genre: Some("エッセイ〔その他〕"),
            keywords: Some(&["日常", "ほのぼの"]),
            bookmark_cnt: Some(1000),
            hyouka_cnt: Some(50),
            hyouka_point: Some(450),
            most_recent_update: ts(2024, 2, 29, 18, 20),
            ..Default::default()
        },
        // 10: large values with separators everywhere, including the post
        // count
        Reference {
            word_cnt: Some(9999999),
            post_cnt: Some(1234),
            genre: Some("異世界〔恋愛〕"),
            keywords: Some(&["悪役令嬢", "婚約破棄", "ざまぁ", "溺愛"]),
            global_point: Some(1234567),
            weekly_unique_cnt: Some(98765),
            review_cnt: Some(1234),
            bookmark_cnt: Some(345678),
            hyouka_cnt: Some(23456),
            hyouka_point: Some(456789),
            most_recent_update: ts(2025, 12, 31, 23, 59),
            rank: &[("日", 8888)],
        },
    ]
}

fn fixture(num: usize) -> String {
    let path = format!("tests/fixtures/novel{num:02}.txt");
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("{path}: {err}"))
}

fn assert_matches(num: usize, record: &MetricRecord, reference: &Reference) {
    let counts = [
        ("word_cnt", reference.word_cnt),
        ("post_cnt", reference.post_cnt),
        ("global_point", reference.global_point),
        ("weekly_unique_cnt", reference.weekly_unique_cnt),
        ("review_cnt", reference.review_cnt),
        ("bookmark_cnt", reference.bookmark_cnt),
        ("hyouka_cnt", reference.hyouka_cnt),
        ("hyouka_point", reference.hyouka_point),
    ];
    for (field, expected) in counts {
        assert_eq!(record.count(field), expected, "fixture {num}: {field}");
        if expected.is_none() {
            assert!(record.is_null(field), "fixture {num}: {field} not null");
        }
    }

    assert_eq!(record.text("genre"), reference.genre, "fixture {num}: genre");
    if reference.genre.is_none() {
        assert!(record.is_null("genre"), "fixture {num}: genre not null");
    }

    let keywords = record
        .tags("keywords")
        .map(|tags| tags.iter().map(String::as_str).collect::<Vec<_>>());
    assert_eq!(
        keywords.as_deref(),
        reference.keywords,
        "fixture {num}: keywords"
    );
    if reference.keywords.is_none() {
        assert!(record.is_null("keywords"), "fixture {num}: keywords not null");
    }

    assert_eq!(
        record.timestamp("most_recent_update"),
        reference.most_recent_update,
        "fixture {num}: most_recent_update"
    );

    let expected_ranks: Vec<RankEntry> = reference
        .rank
        .iter()
        .map(|(period, points)| RankEntry::new(*period, *points))
        .collect();
    assert_eq!(
        record.ranks("rank"),
        Some(expected_ranks.as_slice()),
        "fixture {num}: rank"
    );
}

#[test]
fn fixtures_match_reference_table() {
    for (index, reference) in reference_table().iter().enumerate() {
        let num = index + 1;
        let record = extract(&fixture(num));
        assert_eq!(record.len(), 12, "fixture {num}: field count");
        assert_matches(num, &record, reference);
    }
}
