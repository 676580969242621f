#[cfg(test)]
mod tests {
    use crate::stats::*;
    use crate::test_support::{alerts, at, make_pr, user};
    use common::models::{AgingDistribution, AlertType, EnrichedPr};

    #[test]
    fn test_empty_stats_are_zeroed() {
        let stats = calculate_stats(&[], &[], 30, at(2026, 2, 10, 12, 0));

        assert_eq!(stats.total_open_prs, 0);
        assert_eq!(stats.total_alerts, 0);
        assert_eq!(stats.average_review_time_hours, 0.0);
        assert_eq!(stats.pr_aging_distribution, AgingDistribution::default());
        assert!(stats.average_review_time_by_repo.is_empty());
        assert!(stats.review_load_by_member.is_empty());
        assert_eq!(stats.approval_trends.len(), 30);
        assert_eq!(stats.alerts_by_type.len(), 4);
        assert!(stats.alerts_by_type.values().all(|count| *count == 0));
    }

    #[test]
    fn test_totals() {
        let mut first = make_pr();
        first.age_in_days = 0;
        first.time_in_review_hours = Some(10);
        first.alerts = alerts(&[AlertType::NoReviewers]);

        let mut second = make_pr();
        second.age_in_days = 2;
        second.time_in_review_hours = Some(20);

        let mut third = make_pr();
        third.age_in_days = 5;
        third.time_in_review_hours = None;
        third.alerts = alerts(&[AlertType::Stale, AlertType::FailingCi]);

        let stats = calculate_stats(&[first, second, third], &[], 30, at(2026, 2, 10, 12, 0));

        assert_eq!(stats.total_open_prs, 3);
        assert_eq!(stats.total_alerts, 3, "a PR with two tags counts twice");
        assert_eq!(stats.average_review_time_hours, 15.0);
        assert_eq!(stats.alerts_by_type[&AlertType::Stale], 1);
        assert_eq!(stats.alerts_by_type[&AlertType::NoReviewers], 1);
        assert_eq!(stats.alerts_by_type[&AlertType::FailingCi], 1);
        assert_eq!(stats.alerts_by_type[&AlertType::ChangesRequested], 0);
        assert_eq!(stats.pr_aging_distribution.total(), 3);
    }

    #[test]
    fn test_reviewer_load_and_repo_averages() {
        let mut frontend = make_pr();
        frontend.repository = "frontend".to_string();
        frontend.pr.requested_reviewers = vec![user("bob"), user("carol")];
        frontend.time_in_review_hours = Some(8);

        let mut backend = make_pr();
        backend.repository = "backend".to_string();
        backend.pr.requested_reviewers = vec![user("bob")];
        backend.time_in_review_hours = Some(4);

        let stats = calculate_stats(&[frontend, backend], &[], 7, at(2026, 2, 10, 12, 0));

        assert_eq!(stats.review_load_by_member["bob"], 2);
        assert_eq!(stats.review_load_by_member["carol"], 1);
        assert_eq!(stats.average_review_time_by_repo["frontend"], 8.0);
        assert_eq!(stats.average_review_time_by_repo["backend"], 4.0);
        assert_eq!(stats.average_review_time_hours, 6.0);
        assert_eq!(stats.approval_trends.len(), 7);
    }

    #[test]
    fn test_count_alerts_has_every_tag() {
        let prs: Vec<EnrichedPr> = Vec::new();
        let counts = count_alerts(&prs);
        assert_eq!(counts.keys().copied().collect::<Vec<_>>(), AlertType::ALL.to_vec());
    }

    #[test]
    fn test_stats_wire_format() {
        let stats = calculate_stats(&[make_pr()], &[], 1, at(2026, 2, 10, 12, 0));
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(json["totalOpenPRs"], 1);
        assert_eq!(json["prAgingDistribution"]["threeToSevenDays"], 1);
        assert_eq!(json["alertsByType"]["no_reviewers"], 0);
        assert_eq!(json["approvalTrends"][0]["date"], "2026-02-10");
        assert_eq!(json["approvalTrends"][0]["totalApproved"], 0);
    }
}
