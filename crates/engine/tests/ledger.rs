use chrono::NaiveDate;
use sea_orm::Database;

use engine::{Engine, Session, Store, SubmitOutcome, TimeFilter};

async fn engine_with_db() -> Engine {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Engine::builder().database(db).build().await.unwrap()
}

fn day(text: &str) -> NaiveDate {
    text.parse().unwrap()
}

fn fill_draft(engine: &mut Engine, amount: &str, category: &str, note: &str, date: &str) {
    let draft = engine.draft_mut();
    draft.amount = amount.to_string();
    draft.category = category.to_string();
    draft.note = note.to_string();
    draft.date = date.to_string();
}

async fn add_expense(engine: &mut Engine, amount: &str, category: &str, note: &str, date: &str) {
    fill_draft(engine, amount, category, note, date);
    assert_eq!(engine.submit_draft().await.unwrap(), SubmitOutcome::Saved);
}

#[tokio::test]
async fn round_trip_preserves_every_field() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "12.5", "Food", "lunch", "2024-03-10").await;

    let records = engine.records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert!(record.id >= 1);
    assert_eq!(record.amount, 12.5);
    assert_eq!(record.category, "Food");
    assert_eq!(record.note.as_deref(), Some("lunch"));
    assert_eq!(record.date, "2024-03-10");
}

#[tokio::test]
async fn working_set_is_most_recent_first() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "1", "A", "", "2024-03-10").await;
    add_expense(&mut engine, "2", "B", "", "2024-03-10").await;
    add_expense(&mut engine, "3", "C", "", "2024-03-10").await;

    let ids: Vec<i64> = engine.records().iter().map(|record| record.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(ids, sorted);
    assert_eq!(engine.records()[0].category, "C");
}

#[tokio::test]
async fn invalid_drafts_never_reach_the_store() {
    let mut engine = engine_with_db().await;

    for (amount, category) in [
        ("", "Food"),
        ("abc", "Food"),
        ("0", "Food"),
        ("-4", "Food"),
        ("NaN", "Food"),
        ("5", ""),
        ("5", "   "),
    ] {
        fill_draft(&mut engine, amount, category, "note", "2024-03-10");
        assert_eq!(
            engine.submit_draft().await.unwrap(),
            SubmitOutcome::Rejected,
            "draft {amount:?}/{category:?} should be rejected"
        );
        assert!(engine.records().is_empty());
        // The fields stay as typed so the user can correct them.
        assert_eq!(engine.state().draft.amount, amount);
        assert_eq!(engine.state().draft.category, category);
    }
}

#[tokio::test]
async fn blank_note_and_date_are_normalized() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "5", "Food", "   ", "  ").await;

    let record = &engine.records()[0];
    assert_eq!(record.note, None);
    let today = engine.today().format("%Y-%m-%d").to_string();
    assert_eq!(record.date, today);
}

#[tokio::test]
async fn submitting_while_idle_only_inserts() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "10", "Food", "", "2024-03-10").await;
    add_expense(&mut engine, "20", "Books", "", "2024-03-11").await;

    assert_eq!(engine.records().len(), 2);
    let first = engine
        .records()
        .iter()
        .find(|record| record.category == "Food")
        .unwrap();
    assert_eq!(first.amount, 10.0);
    assert_eq!(engine.state().session, Session::Idle);
}

#[tokio::test]
async fn editing_overwrites_in_place() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "12.5", "Food", "lunch", "2024-03-10").await;
    let id = engine.records()[0].id;

    engine.begin_edit(id);
    assert_eq!(engine.state().session, Session::Editing(id));
    assert_eq!(engine.state().draft.amount, "12.5");
    assert_eq!(engine.state().draft.category, "Food");
    assert_eq!(engine.state().draft.note, "lunch");
    assert_eq!(engine.state().draft.date, "2024-03-10");

    fill_draft(&mut engine, "8", "Snacks", "", "2024-03-11");
    assert_eq!(engine.submit_draft().await.unwrap(), SubmitOutcome::Saved);

    // Same row, new fields, no second record.
    assert_eq!(engine.records().len(), 1);
    let record = &engine.records()[0];
    assert_eq!(record.id, id);
    assert_eq!(record.amount, 8.0);
    assert_eq!(record.category, "Snacks");
    assert_eq!(record.note, None);
    assert_eq!(record.date, "2024-03-11");
    assert_eq!(engine.state().session, Session::Idle);
}

#[tokio::test]
async fn begin_edit_ignores_unknown_ids() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "5", "Food", "", "2024-03-10").await;
    engine.begin_edit(999);

    assert_eq!(engine.state().session, Session::Idle);
    assert_eq!(engine.state().draft.amount, "");
}

#[tokio::test]
async fn cancel_edit_discards_the_draft_only() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "5", "Food", "snack", "2024-03-10").await;
    let id = engine.records()[0].id;

    engine.begin_edit(id);
    engine.draft_mut().amount = "999".to_string();
    engine.cancel_edit();

    assert_eq!(engine.state().session, Session::Idle);
    assert_eq!(engine.state().draft.amount, "");
    // The record is untouched.
    assert_eq!(engine.records()[0].amount, 5.0);
}

#[tokio::test]
async fn deleting_removes_the_record() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "5", "Food", "", "2024-03-10").await;
    add_expense(&mut engine, "7", "Books", "", "2024-03-10").await;
    let id = engine.records()[0].id;

    engine.delete_record(id).await.unwrap();

    assert_eq!(engine.records().len(), 1);
    assert!(engine.records().iter().all(|record| record.id != id));
}

#[tokio::test]
async fn deleting_an_absent_id_changes_nothing() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "5", "Food", "", "2024-03-10").await;
    add_expense(&mut engine, "7", "Books", "", "2024-03-10").await;

    engine.delete_record(999).await.unwrap();

    assert_eq!(engine.records().len(), 2);
}

#[tokio::test]
async fn deleting_the_edit_target_resets_the_session() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "5", "Food", "", "2024-03-10").await;
    let id = engine.records()[0].id;

    engine.begin_edit(id);
    engine.delete_record(id).await.unwrap();

    assert_eq!(engine.state().session, Session::Idle);
    assert_eq!(engine.state().draft.amount, "");
}

#[tokio::test]
async fn stale_store_updates_and_deletes_are_no_ops() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let store = Store::new(db);
    store.initialize().await.unwrap();

    store.insert(5.0, "Food", None, "2024-03-10").await.unwrap();

    store
        .update(999, 1.0, "Ghost", None, "2024-01-01")
        .await
        .unwrap();
    store.delete(999).await.unwrap();

    let records = store.list_all().await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].category, "Food");
}

#[tokio::test]
async fn windowed_views_follow_sunday_weeks() {
    let mut engine = engine_with_db().await;

    // 2024-03-10 is a Sunday, 2024-03-16 the following Saturday and
    // 2024-03-17 the next Sunday.
    add_expense(&mut engine, "1", "A", "", "2024-03-10").await;
    add_expense(&mut engine, "2", "B", "", "2024-03-16").await;
    add_expense(&mut engine, "3", "C", "", "2024-03-17").await;
    add_expense(&mut engine, "4", "D", "", "soon").await;

    let today = day("2024-03-12");

    engine.set_filter(TimeFilter::ThisWeek);
    let dates: Vec<&str> = engine
        .filtered_view_on(today)
        .iter()
        .map(|record| record.date.as_str())
        .collect();
    assert_eq!(dates, ["2024-03-16", "2024-03-10"]);

    engine.set_filter(TimeFilter::ThisMonth);
    assert_eq!(engine.filtered_view_on(today).len(), 3);

    engine.set_filter(TimeFilter::All);
    assert_eq!(engine.filtered_view_on(today).len(), 4);
}

#[tokio::test]
async fn filter_selection_survives_mutations() {
    let mut engine = engine_with_db().await;

    engine.set_filter(TimeFilter::ThisWeek);
    add_expense(&mut engine, "5", "Food", "", "2024-03-10").await;

    assert_eq!(engine.state().filter, TimeFilter::ThisWeek);
}

#[tokio::test]
async fn totals_sum_and_group_by_category() {
    let mut engine = engine_with_db().await;

    // Inserted oldest-first so the id-descending view reads Food, Food,
    // Books.
    add_expense(&mut engine, "20", "Books", "", "2024-03-10").await;
    add_expense(&mut engine, "5", "Food", "", "2024-03-10").await;
    add_expense(&mut engine, "10", "Food", "", "2024-03-10").await;

    let totals = engine.totals_on(day("2024-03-12"));
    assert_eq!(totals.total, 35.0);
    assert_eq!(totals.by_category.len(), 2);
    assert_eq!(totals.by_category[0].label, "Food");
    assert_eq!(totals.by_category[0].value, 15.0);
    assert_eq!(totals.by_category[1].label, "Books");
    assert_eq!(totals.by_category[1].value, 20.0);
}

#[tokio::test]
async fn totals_respect_the_active_window() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "10", "Food", "", "2024-03-10").await;
    add_expense(&mut engine, "99", "Food", "", "2024-04-02").await;

    engine.set_filter(TimeFilter::ThisMonth);
    let totals = engine.totals_on(day("2024-03-12"));

    assert_eq!(totals.total, 10.0);
    assert_eq!(totals.by_category.len(), 1);
    assert_eq!(totals.by_category[0].value, 10.0);
}

#[tokio::test]
async fn zone_parameter_moves_today() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let engine = Engine::builder()
        .database(db)
        .zone(chrono_tz::Pacific::Kiritimati)
        .build()
        .await
        .unwrap();

    // UTC+14 is never behind UTC.
    assert!(engine.today() >= chrono::Utc::now().date_naive());
}

#[tokio::test]
async fn chart_feed_serializes_as_label_value_pairs() {
    let mut engine = engine_with_db().await;

    add_expense(&mut engine, "20", "Books", "", "2024-03-10").await;
    add_expense(&mut engine, "15", "Food", "", "2024-03-10").await;

    let totals = engine.totals_on(day("2024-03-12"));
    let feed = serde_json::to_value(&totals.by_category).unwrap();

    assert_eq!(
        feed,
        serde_json::json!([
            {"label": "Food", "value": 15.0},
            {"label": "Books", "value": 20.0},
        ])
    );
}
