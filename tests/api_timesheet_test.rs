//! Integration tests for the timesheet API endpoints

mod test_utils;

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::util::ServiceExt;

    use crate::test_utils::{body_to_json, multipart_request, test_app, week_calendar};

    const V2: &str = "/api/generate-timesheet-v2";
    const LEGACY: &str = "/api/generate-timesheet";

    const EMPTY_CALENDAR: &[u8] = b"BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//test//EN\r\nEND:VCALENDAR\r\n";

    /// Tests an empty calendar yields blank days and no candidates
    #[tokio::test]
    async fn it_returns_blank_days_for_an_empty_calendar() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[("week_sunday", "2025-01-05")],
                Some(EMPTY_CALENDAR),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(
            body,
            json!({
                "week_range": "2025-01-06 to 2025-01-10",
                "timesheet_summary": {
                    "Monday": "",
                    "Tuesday": "",
                    "Wednesday": "",
                    "Thursday": "",
                    "Friday": ""
                },
                "recurring_candidates": []
            })
        );
    }

    /// Tests explicit meetings are listed and covered series are dropped
    #[tokio::test]
    async fn it_summarizes_the_week() {
        let app = test_app();
        let calendar = week_calendar();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[("week_sunday", "2025-01-05")],
                Some(&calendar),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(
            body["timesheet_summary"],
            json!({
                "Monday": "Attended Standup, Sprint planning",
                "Tuesday": "Attended Standup",
                "Wednesday": "Attended Standup",
                "Thursday": "Attended Standup",
                "Friday": "Attended Standup"
            })
        );
        assert_eq!(
            body["recurring_candidates"],
            json!([
                {
                    "uid": "design-sync",
                    "summary": "Design sync",
                    "recurrence_text": "Occurs every Monday, Wednesday, Friday",
                    "byday": ["MO", "WE", "FR"]
                },
                {
                    "uid": "townhall",
                    "summary": "Town hall",
                    "recurrence_text": "Recurring meeting",
                    "byday": ["1TH"]
                }
            ])
        );
    }

    /// Tests applying a recurring meeting skips its exception dates
    #[tokio::test]
    async fn it_applies_selected_recurring_meetings() {
        let app = test_app();
        let calendar = week_calendar();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[
                    ("week_sunday", "2025-01-05"),
                    ("include_recurring_uids", "design-sync||not-a-uid"),
                    ("finalize", "TRUE"),
                ],
                Some(&calendar),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        let summary = &body["timesheet_summary"];
        assert_eq!(summary["Monday"], "Attended Standup, Sprint planning");
        assert_eq!(summary["Wednesday"], "Attended Standup, Design sync");
        assert_eq!(summary["Friday"], "Attended Standup, Design sync");
        assert_eq!(summary["Thursday"], "Attended Standup");
        // Finalized responses leave out the candidates
        assert!(body.get("recurring_candidates").is_none());
    }

    /// Tests the path without the /api prefix is served
    #[tokio::test]
    async fn it_serves_the_root_path() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                "/generate-timesheet-v2",
                &[("week_sunday", "2025-01-05"), ("finalize", "false")],
                Some(EMPTY_CALENDAR),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["recurring_candidates"], json!([]));
    }

    /// Tests a request without a file or link is rejected
    #[tokio::test]
    async fn it_returns_400_without_a_calendar() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(V2, &[("week_sunday", "2025-01-05")], None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Provide ICS file or ICS link");
    }

    /// Tests a malformed week anchor is rejected
    #[tokio::test]
    async fn it_returns_400_for_a_bad_week_sunday() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[("week_sunday", "01/05/2025")],
                Some(EMPTY_CALENDAR),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests an anchor whose week can't be represented is rejected
    #[tokio::test]
    async fn it_returns_400_for_an_out_of_range_week_sunday() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[("week_sunday", "+262142-12-30")],
                Some(EMPTY_CALENDAR),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests a missing week anchor is rejected
    #[tokio::test]
    async fn it_returns_400_for_a_missing_week_sunday() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(V2, &[], Some(EMPTY_CALENDAR)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests links that are not https are rejected before fetching
    #[tokio::test]
    async fn it_returns_400_for_insecure_links() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[
                    ("week_sunday", "2025-01-05"),
                    ("ics_url", "http://outlook.office365.com/owa/calendar/cal.ics"),
                ],
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Only HTTPS ICS links allowed");
    }

    /// Tests links to hosts off the allow-list are rejected
    #[tokio::test]
    async fn it_returns_400_for_unknown_hosts() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[
                    ("week_sunday", "2025-01-05"),
                    ("ics_url", "https://calendar.example.com/cal.ics"),
                ],
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests links that are not .ics files are rejected
    #[tokio::test]
    async fn it_returns_400_for_non_ics_links() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[
                    ("week_sunday", "2025-01-05"),
                    ("ics_url", "https://outlook.office365.com/owa/calendar"),
                ],
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body["detail"], "Only .ics calendar links are supported");
    }

    /// Tests an upload that is not a calendar is rejected
    #[tokio::test]
    async fn it_returns_400_for_garbage_uploads() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                V2,
                &[("week_sunday", "2025-01-05")],
                Some(b"just some text"),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests a non multipart body is rejected
    #[tokio::test]
    async fn it_rejects_non_multipart_requests() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(V2)
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(response.status().is_client_error());
    }

    /// Tests the legacy endpoint tracks recurring meetings by summary
    #[tokio::test]
    async fn it_keeps_legacy_behaviour() {
        let app = test_app();
        let calendar = week_calendar();

        let response = app
            .oneshot(multipart_request(
                LEGACY,
                &[
                    ("week_sunday", "2025-01-05"),
                    ("include_recurring", "Design sync"),
                ],
                Some(&calendar),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        // Exception dates are not honoured on the legacy endpoint
        assert_eq!(
            body["timesheet_summary"]["Monday"],
            "Attended Standup, Sprint planning, Design sync"
        );
        assert_eq!(
            body["recurring_candidates"],
            json!([{ "summary": "Design sync" }, { "summary": "Town hall" }])
        );
    }

    /// Tests the legacy endpoint only accepts uploads
    #[tokio::test]
    async fn it_requires_a_file_on_the_legacy_endpoint() {
        let app = test_app();

        let response = app
            .oneshot(multipart_request(
                LEGACY,
                &[
                    ("week_sunday", "2025-01-05"),
                    ("ics_url", "https://outlook.office365.com/cal.ics"),
                ],
                None,
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    /// Tests the health check
    #[tokio::test]
    async fn it_reports_health() {
        let app = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_to_json(response.into_body()).await;
        assert_eq!(body, json!({ "status": "ok" }));
    }
}
