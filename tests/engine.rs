use actionboard::domain::ActionType;
use actionboard::engine::{self, DateRange, Query, SortDirection, SortKey, SortSpec, PAGE_SIZE};
use actionboard::export::{to_csv, FlatRecord};
use actionboard::storage::{RecordScope, RecordStore};
use chrono::NaiveDate;
use std::collections::HashSet;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ids(records: &[actionboard::ActionRecord]) -> Vec<&str> {
    records.iter().map(|r| r.id.as_str()).collect()
}

#[test]
fn results_come_only_from_input_and_never_repeat() {
    let store = RecordStore::embedded().unwrap();
    let input: HashSet<&str> = store.all().iter().map(|r| r.id.as_str()).collect();

    let queries = [
        Query::default(),
        Query {
            search_term: "inc".to_string(),
            ..Query::default()
        },
        Query {
            action_type: Some(ActionType::CashDividend),
            sort: Some(SortSpec {
                key: SortKey::EffectiveDate,
                direction: SortDirection::Ascending,
            }),
            ..Query::default()
        },
    ];

    for query in &queries {
        let out = engine::filter_and_sort(store.all(), query);
        let unique: HashSet<&str> = out.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(unique.len(), out.len());
        assert!(unique.is_subset(&input));
    }
}

#[test]
fn default_order_is_newest_announcement_first() {
    let store = RecordStore::embedded().unwrap();
    let page = engine::apply(store.all(), &Query::paginated(), PAGE_SIZE);

    assert_eq!(page.total, 12);
    assert_eq!(page.total_pages, 3);
    assert_eq!(ids(&page.records), vec!["12", "11", "9", "7", "4"]);
}

#[test]
fn last_page_of_twelve_holds_two() {
    let store = RecordStore::embedded().unwrap();
    let query = Query {
        page: Some(3),
        ..Query::paginated()
    };
    let page = engine::apply(store.all(), &query, PAGE_SIZE);
    assert_eq!(page.records.len(), 2);

    let beyond = Query {
        page: Some(9),
        ..Query::paginated()
    };
    assert_eq!(engine::apply(store.all(), &beyond, PAGE_SIZE).page, 3);
}

#[test]
fn company_name_matches_case_insensitively() {
    let store = RecordStore::embedded().unwrap();
    let query = Query {
        search_term: "apple".to_string(),
        ..Query::default()
    };
    assert_eq!(ids(&engine::filter_and_sort(store.all(), &query)), vec!["1"]);
}

#[test]
fn to_bound_keeps_records_on_that_day() {
    let store = RecordStore::embedded().unwrap();
    let query = Query {
        date_range: Some(DateRange {
            from: Some(date(2024, 7, 15)),
            to: Some(date(2024, 7, 15)),
        }),
        ..Query::default()
    };
    assert_eq!(ids(&engine::filter_and_sort(store.all(), &query)), vec!["1"]);
}

#[test]
fn completed_scope_exports_processing_columns() {
    let store = RecordStore::embedded().unwrap();
    let completed = store.scoped(&RecordScope::Completed {
        types: ActionType::HOLDING.to_vec(),
    });
    let rows: Vec<FlatRecord> = completed
        .iter()
        .map(|r| FlatRecord::from_processed_action(r).without("id"))
        .collect();

    let csv = to_csv(&rows).unwrap().unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.get(0), Some("announcementDate"));
    assert_eq!(headers.get(headers.len() - 1), Some("remarks"));

    let processors: HashSet<String> = reader
        .records()
        .map(|r| r.unwrap()[8].to_string())
        .collect();
    assert_eq!(
        processors,
        HashSet::from(["Admin A".to_string(), "Admin B".to_string()])
    );
}

#[test]
fn quoted_company_survives_a_csv_parser() {
    let record = FlatRecord::new()
        .with("ticker", Some("AAPL".to_string()))
        .with("companyName", Some("Acme, \"Inc.\"".to_string()));
    let csv = to_csv(&[record]).unwrap().unwrap();
    assert!(csv.contains("\"Acme, \"\"Inc.\"\"\""));

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let row = reader.records().next().unwrap().unwrap();
    assert_eq!(&row[1], "Acme, \"Inc.\"");
}
