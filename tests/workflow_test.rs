//! End-to-end workflow tests
//!
//! Drive the review controller with a scripted UI against the mock
//! Google backend and check the decisions that reach the sheet and the
//! calendar.

mod helpers;

use chrono::NaiveDate;
use serde_json::json;

use eventdesk::models::UserIdentity;
use eventdesk::workflow::{EditorAction, QueueChoice, ReviewController, ReviewState};

use helpers::{
    responses_header, users_sheet, valid_row, EditorStep, GoogleMockServer, ScriptedUi,
    RESPONSES_WORKSHEET, USERS_WORKSHEET,
};

fn reviewer() -> UserIdentity {
    UserIdentity::new("Dana Reviewer", "dana@example.org")
}

async fn mock_standard_sheets(mock: &GoogleMockServer, rows: serde_json::Value) {
    mock.mock_values(USERS_WORKSHEET, users_sheet(&["dana@example.org"]))
        .await;
    mock.mock_values(RESPONSES_WORKSHEET, rows).await;
    mock.mock_values(
        &format!("{RESPONSES_WORKSHEET}!1:1"),
        json!([responses_header()]),
    )
    .await;
    mock.mock_cell_write(&format!("{RESPONSES_WORKSHEET}!M2")).await;
    mock.mock_cell_write(&format!("{RESPONSES_WORKSHEET}!N2")).await;
}

#[tokio::test]
async fn approving_a_submission_creates_the_event_and_records_the_decision() {
    let mock = GoogleMockServer::start().await;
    mock_standard_sheets(&mock, json!([responses_header(), valid_row("Square Dance")])).await;
    mock.mock_calendar_insert(
        200,
        json!({"id": "evt1", "htmlLink": "https://calendar.google.com/event?eid=evt1"}),
    )
    .await;

    let mut ui = ScriptedUi::new(
        [QueueChoice::Open(0), QueueChoice::Quit],
        [EditorStep::action(EditorAction::AddToCalendar {
            repeat_monthly: false,
        })],
    );
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    // One event was inserted
    assert_eq!(mock.received_event_bodies().await.len(), 1);

    // The decision and the acting reviewer reached the sheet
    let puts = mock.received_put_bodies().await;
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0].1, json!({"values": [["Added to Calendar"]]}));
    assert_eq!(puts[1].1, json!({"values": [["Dana Reviewer"]]}));

    assert!(ui
        .infos
        .iter()
        .any(|m| m.contains("added to the calendar")));
}

#[tokio::test]
async fn unlisted_reviewer_is_rejected_before_seeing_the_queue() {
    let mock = GoogleMockServer::start().await;
    mock.mock_values(USERS_WORKSHEET, users_sheet(&["someone-else@example.org"]))
        .await;

    let mut ui = ScriptedUi::default();
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    assert_eq!(controller.state(), ReviewState::Rejected);
    assert!(ui.errors.iter().any(|m| m.contains("not authorized")));
    assert!(ui.queue_renders.is_empty());
}

#[tokio::test]
async fn ignoring_a_submission_writes_the_status_without_touching_the_calendar() {
    let mock = GoogleMockServer::start().await;
    mock_standard_sheets(&mock, json!([responses_header(), valid_row("Square Dance")])).await;

    let mut ui = ScriptedUi::new(
        [QueueChoice::Open(0), QueueChoice::Quit],
        [EditorStep::action(EditorAction::Ignore)],
    );
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    let puts = mock.received_put_bodies().await;
    assert_eq!(puts.len(), 2);
    assert_eq!(puts[0].1, json!({"values": [["Ignored"]]}));
    assert_eq!(puts[1].1, json!({"values": [["Dana Reviewer"]]}));
    assert!(mock.received_event_bodies().await.is_empty());
}

#[tokio::test]
async fn calendar_failure_keeps_editing_and_writes_no_status() {
    let mock = GoogleMockServer::start().await;
    mock_standard_sheets(&mock, json!([responses_header(), valid_row("Square Dance")])).await;
    mock.mock_calendar_insert(403, json!({"error": {"code": 403, "message": "Forbidden"}}))
        .await;

    let mut ui = ScriptedUi::new(
        [QueueChoice::Open(0), QueueChoice::Quit],
        [
            EditorStep::action(EditorAction::AddToCalendar {
                repeat_monthly: false,
            }),
            EditorStep::action(EditorAction::Back),
        ],
    );
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    // The row stays pending: no status write happened
    assert!(mock.received_put_bodies().await.is_empty());
    assert!(ui.errors.iter().any(|m| m.contains("Could not create the event")));
    // The editor was rendered again after the failure
    assert_eq!(ui.editor_validity, [true, true]);
}

#[tokio::test]
async fn invalid_draft_cannot_be_acted_on() {
    let mock = GoogleMockServer::start().await;
    let mut row = valid_row("Nameless");
    row[6] = json!(""); // no location
    mock_standard_sheets(&mock, json!([responses_header(), row])).await;

    let mut ui = ScriptedUi::new(
        [QueueChoice::Open(0), QueueChoice::Quit],
        [
            EditorStep::action(EditorAction::AddToCalendar {
                repeat_monthly: false,
            }),
            EditorStep::action(EditorAction::Back),
        ],
    );
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    assert_eq!(ui.editor_validity, [false, false]);
    assert!(ui
        .errors
        .iter()
        .any(|m| m.contains("Fix the validation errors")));
    assert!(mock.received_event_bodies().await.is_empty());
    assert!(mock.received_put_bodies().await.is_empty());
}

#[tokio::test]
async fn multi_day_timed_submission_warns_and_spans_to_the_end_date() {
    let mock = GoogleMockServer::start().await;
    let mut row = valid_row("Quilt Show");
    row[3] = json!("08/25/2025"); // runs 08/23 through 08/25, 19:00-21:00
    mock_standard_sheets(&mock, json!([responses_header(), row])).await;
    mock.mock_calendar_insert(200, json!({"id": "evt3"})).await;

    let mut ui = ScriptedUi::new(
        [QueueChoice::Open(0), QueueChoice::Quit],
        [EditorStep::action(EditorAction::AddToCalendar {
            repeat_monthly: false,
        })],
    );
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    // The advisory reached the reviewer but did not block the action
    assert!(ui.warnings.iter().any(|m| m.contains("multi-day event")));
    assert_eq!(ui.editor_validity, [true]);

    // The event runs from the first day's start to the last day's end
    let events = mock.received_event_bodies().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["start"]["dateTime"], "2025-08-23T19:00:00");
    assert_eq!(events[0]["end"]["dateTime"], "2025-08-25T21:00:00");
}

#[tokio::test]
async fn editing_the_draft_can_make_it_valid() {
    let mock = GoogleMockServer::start().await;
    let mut row = valid_row("Backwards Dates");
    row[2] = json!("08/23/2025");
    row[3] = json!("08/20/2025"); // ends before it starts
    row[4] = json!("");
    row[5] = json!("");
    mock_standard_sheets(&mock, json!([responses_header(), row])).await;
    mock.mock_calendar_insert(200, json!({"id": "evt2"})).await;

    let mut ui = ScriptedUi::new(
        [QueueChoice::Open(0), QueueChoice::Quit],
        [
            EditorStep::edit(
                |draft| draft.end_date = NaiveDate::from_ymd_opt(2025, 8, 25),
                EditorAction::Stay,
            ),
            EditorStep::action(EditorAction::AddToCalendar {
                repeat_monthly: false,
            }),
        ],
    );
    let mut controller = ReviewController::new(mock.services());
    controller.run(&reviewer(), &mut ui).await.unwrap();

    // Invalid on the first render, valid after the correction
    assert_eq!(ui.editor_validity, [false, true]);
    let events = mock.received_event_bodies().await;
    assert_eq!(events.len(), 1);
    // The corrected end date flowed into the all-day payload
    assert_eq!(events[0]["end"]["date"], "2025-08-26");
}
