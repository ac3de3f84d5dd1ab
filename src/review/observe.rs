use metrics::counter;

/// Business-event counters. Fire-and-forget: implementations must never fail
/// the operation that emits them.
pub trait EventSink: Send + Sync {
    fn team_created(&self);
    fn user_activated(&self);
    fn user_deactivated(&self);
    fn pull_request_created(&self);
    fn pull_request_merged(&self);
    fn reviewer_reassigned(&self);
}

/// Production sink feeding the process-wide metrics recorder; the Prometheus
/// exporter installed at startup renders these on `/metrics`.
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsSink;

impl EventSink for MetricsSink {
    fn team_created(&self) {
        counter!("pr_manager_teams_created_total").increment(1);
    }

    fn user_activated(&self) {
        counter!("pr_manager_users_activated_total").increment(1);
    }

    fn user_deactivated(&self) {
        counter!("pr_manager_users_deactivated_total").increment(1);
    }

    fn pull_request_created(&self) {
        counter!("pr_manager_pull_requests_created_total").increment(1);
    }

    fn pull_request_merged(&self) {
        counter!("pr_manager_pull_requests_merged_total").increment(1);
    }

    fn reviewer_reassigned(&self) {
        counter!("pr_manager_reviewers_reassigned_total").increment(1);
    }
}
