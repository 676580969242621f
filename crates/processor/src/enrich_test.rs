#[cfg(test)]
mod tests {
    use crate::enrich::*;
    use crate::test_support::{alerts, at, make_check, make_pull_request, make_review};
    use common::models::{
        AlertType, CheckConclusion, CheckStatus, Repository, ReviewState, ReviewStatus,
    };

    #[test]
    fn test_enrich_computes_metrics_against_now() {
        let repo = Repository::new("acme", "app");
        let pr = make_pull_request();
        let reviews = vec![
            make_review("bob", ReviewState::Commented, at(2026, 2, 1, 12, 0)),
            make_review("bob", ReviewState::Approved, at(2026, 2, 2, 10, 0)),
        ];

        let enriched = enrich_pr(&repo, pr, reviews, Vec::new(), at(2026, 2, 3, 16, 0));

        assert_eq!(enriched.repository, "app");
        assert_eq!(enriched.owner, "acme");
        assert_eq!(enriched.age_in_days, 2);
        assert_eq!(enriched.age_in_hours, 54);
        assert_eq!(enriched.time_in_review_hours, Some(24));
        assert_eq!(enriched.first_review_at, Some(at(2026, 2, 2, 10, 0)));
        assert_eq!(enriched.review_status, ReviewStatus::Approved);
        assert_eq!(enriched.reviews.len(), 2);
        assert!(enriched.alerts.is_empty());
    }

    #[test]
    fn test_enrich_tags_alerts() {
        let repo = Repository::new("acme", "app");
        let mut pr = make_pull_request();
        pr.requested_reviewers.clear();
        pr.updated_at = at(2026, 2, 1, 12, 0);
        let reviews = vec![make_review(
            "bob",
            ReviewState::ChangesRequested,
            at(2026, 2, 2, 9, 0),
        )];
        let checks = vec![make_check(
            CheckStatus::Completed,
            Some(CheckConclusion::Failure),
        )];

        let enriched = enrich_pr(&repo, pr, reviews, checks, at(2026, 2, 9, 10, 0));

        assert_eq!(enriched.age_in_days, 8);
        assert_eq!(enriched.review_status, ReviewStatus::ChangesRequested);
        assert_eq!(
            enriched.alerts,
            alerts(&[
                AlertType::Stale,
                AlertType::NoReviewers,
                AlertType::FailingCi,
                AlertType::ChangesRequested,
            ])
        );
    }

    #[test]
    fn test_enriched_pr_wire_format() {
        let repo = Repository::new("acme", "app");
        let enriched = enrich_pr(
            &repo,
            make_pull_request(),
            Vec::new(),
            Vec::new(),
            at(2026, 2, 1, 12, 0),
        );
        let json = serde_json::to_value(&enriched).unwrap();

        assert_eq!(json["number"], 42);
        assert_eq!(json["html_url"], "https://github.com/acme/app/pull/42");
        assert_eq!(json["head"]["ref"], "fix-login");
        assert_eq!(json["ageInHours"], 2);
        assert_eq!(json["reviewStatus"], "no_reviews");
        assert!(json["timeInReviewHours"].is_null());
        assert!(json["firstReviewAt"].is_null());
        assert_eq!(json["alerts"], serde_json::json!([]));
    }
}
