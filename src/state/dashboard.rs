//! Dashboard State
//!
//! Record types for the three store tables, the reactive signal bundle
//! shared by all components, and the controller operations that keep it in
//! sync with the store.

use chrono::NaiveDate;
use leptos::*;

use crate::api::{self, StoreClient};

/// Precomputed aggregate metrics for the top cards.
///
/// Produced entirely by the `dashboard_quick_stats` view; the client never
/// derives these values itself. Every field defaults to 0 so an absent
/// metric renders as "0", never blank.
#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct QuickStats {
    #[serde(default)]
    pub total_mentees: u64,
    #[serde(default)]
    pub mentees_registered: u64,
    #[serde(default)]
    pub total_mentors: u64,
    #[serde(default)]
    pub mentors_selected: u64,
    #[serde(default)]
    pub total_projects: u64,
    #[serde(default)]
    pub total_prs: u64,
    #[serde(default)]
    pub referrals_approved: u64,
    #[serde(default)]
    pub open_queries: u64,
}

/// One day's mentee registration count.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct TrendPoint {
    #[serde(default)]
    pub day: String,
    #[serde(default)]
    pub total: u64,
}

impl TrendPoint {
    /// The day as a calendar date, if it parses as one.
    pub fn parsed_day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.day, "%Y-%m-%d").ok()
    }

    /// Boundary validation: a trend row without a real calendar date is
    /// unusable for charting and gets dropped.
    pub fn is_valid(&self) -> bool {
        self.parsed_day().is_some()
    }
}

/// A support message submitted by an end user.
///
/// Created externally; the only mutation this system performs is the
/// one-way `iscleared` false→true transition.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct UserQuery {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub createdat: String,
    #[serde(default)]
    pub iscleared: bool,
}

impl UserQuery {
    /// Boundary validation: a query row without an id cannot be cleared and
    /// gets dropped.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty()
    }

    /// The creation time as a UTC-normalized timestamp, if it parses.
    pub fn parsed_createdat(&self) -> Option<chrono::NaiveDateTime> {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&self.createdat) {
            return Some(dt.naive_utc());
        }
        // timestamps without a zone come back bare from some store columns
        chrono::NaiveDateTime::parse_from_str(&self.createdat, "%Y-%m-%dT%H:%M:%S%.f").ok()
    }
}

/// Maximum user query rows held locally, matching the fetch limit.
pub const QUERY_LIST_CAP: usize = 100;

/// Sort a trend sequence by ascending day (stable).
pub fn sort_trend_by_day(points: &mut [TrendPoint]) {
    points.sort_by(|a, b| a.parsed_day().cmp(&b.parsed_day()));
}

/// Drop malformed trend rows and enforce ascending day order, so rendering
/// never depends on the store honoring the `order` parameter.
pub fn sanitize_trend(mut points: Vec<TrendPoint>) -> Vec<TrendPoint> {
    points.retain(TrendPoint::is_valid);
    sort_trend_by_day(&mut points);
    points
}

/// Sort queries newest first (stable; unparseable timestamps sink to the
/// end in store order).
pub fn sort_queries_newest_first(queries: &mut [UserQuery]) {
    queries.sort_by(|a, b| b.parsed_createdat().cmp(&a.parsed_createdat()));
}

/// Drop malformed query rows and enforce newest-first order and the row cap
/// client-side, so truncation never cuts the newest rows on a store that
/// ignores the `order` parameter.
pub fn sanitize_queries(mut queries: Vec<UserQuery>) -> Vec<UserQuery> {
    queries.retain(UserQuery::is_valid);
    sort_queries_newest_first(&mut queries);
    queries.truncate(QUERY_LIST_CAP);
    queries
}

/// Flip `iscleared` on the single matching record. Returns true when a
/// record actually changed; patching an already-cleared or absent id is a
/// no-op.
pub fn patch_cleared(queries: &mut [UserQuery], id: &str) -> bool {
    for query in queries.iter_mut() {
        if query.id == id {
            if query.iscleared {
                return false;
            }
            query.iscleared = true;
            return true;
        }
    }
    false
}

/// Reactive dashboard state provided to all components.
#[derive(Clone, Copy)]
pub struct DashboardState {
    /// Aggregate metrics for the stat cards
    pub stats: RwSignal<Option<QuickStats>>,
    /// Last stats fetch failure, shown inline
    pub stats_error: RwSignal<Option<String>>,
    /// True once the initial stats fetch has settled (gates the page)
    pub stats_settled: RwSignal<bool>,
    /// Daily registration series, ascending by day
    pub trend: RwSignal<Vec<TrendPoint>>,
    /// Last trend fetch failure, shown inline
    pub trend_error: RwSignal<Option<String>>,
    /// User query inbox, newest first
    pub queries: RwSignal<Vec<UserQuery>>,
    /// Query list fetch in progress
    pub loading_queries: RwSignal<bool>,
    /// Last query fetch failure, shown inline
    pub queries_error: RwSignal<Option<String>>,
    /// Error message for the toast (action feedback)
    pub error: RwSignal<Option<String>>,
    /// Refresh guard: responses from superseded fetches are discarded
    queries_generation: RwSignal<u64>,
}

/// Provide dashboard state to the component tree
pub fn provide_dashboard_state() {
    let state = DashboardState {
        stats: create_rw_signal(None),
        stats_error: create_rw_signal(None),
        stats_settled: create_rw_signal(false),
        trend: create_rw_signal(Vec::new()),
        trend_error: create_rw_signal(None),
        queries: create_rw_signal(Vec::new()),
        loading_queries: create_rw_signal(false),
        queries_error: create_rw_signal(None),
        error: create_rw_signal(None),
        queries_generation: create_rw_signal(0),
    };

    provide_context(state);
}

impl DashboardState {
    /// Fetch the quick-stats row and replace local stats state.
    ///
    /// On failure (or a store with no stats row) the previous value stays on
    /// screen and the section error is set.
    pub async fn load_stats(&self, store: &StoreClient) {
        match api::fetch_quick_stats(store).await {
            Ok(Some(stats)) => {
                self.stats.set(Some(stats));
                self.stats_error.set(None);
            }
            Ok(None) => {
                self.stats_error.set(Some("Stats view returned no rows".to_string()));
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch stats: {}", e).into());
                self.stats_error.set(Some(e));
            }
        }
        self.stats_settled.set(true);
    }

    /// Fetch the registration trend and replace the local sequence. An empty
    /// result is an empty series, not an error.
    pub async fn load_trend(&self, store: &StoreClient) {
        match api::fetch_registration_trend(store).await {
            Ok(points) => {
                self.trend.set(points);
                self.trend_error.set(None);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch trend: {}", e).into());
                self.trend_error.set(Some(e));
            }
        }
    }

    /// Fetch the query inbox and replace the local list.
    ///
    /// Each call bumps a generation counter; if a newer call was issued
    /// while this one was in flight, the stale response is discarded so the
    /// list always reflects the most recent refresh. On error the stale list
    /// is retained.
    pub async fn load_queries(&self, store: &StoreClient) {
        let generation = self.queries_generation.get_untracked().wrapping_add(1);
        self.queries_generation.set(generation);
        self.loading_queries.set(true);

        let result = api::fetch_user_queries(store).await;

        if self.queries_generation.get_untracked() != generation {
            // Superseded by a newer refresh; it owns the loading flag now.
            return;
        }

        match result {
            Ok(queries) => {
                self.queries.set(queries);
                self.queries_error.set(None);
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to fetch queries: {}", e).into());
                self.queries_error.set(Some(e));
            }
        }
        self.loading_queries.set(false);
    }

    /// Mark one query cleared: persist the update, patch the matching local
    /// record in place (no list re-fetch), then re-fetch stats so the Open
    /// Queries card reconciles.
    pub async fn mark_cleared(&self, store: &StoreClient, id: &str) {
        // Racing clicks on an already-cleared record need no request.
        let already_cleared = self
            .queries
            .get_untracked()
            .iter()
            .any(|q| q.id == id && q.iscleared);
        if already_cleared {
            return;
        }

        match api::clear_user_query(store, id).await {
            Ok(()) => {
                let id = id.to_string();
                self.queries.update(|queries| {
                    patch_cleared(queries, &id);
                });
                self.load_stats(store).await;
            }
            Err(e) => {
                web_sys::console::error_1(&format!("Failed to clear query: {}", e).into());
                self.show_error(&e);
            }
        }
    }

    /// Show an error toast
    pub fn show_error(&self, message: &str) {
        self.error.set(Some(message.to_string()));
    }

    /// Clear the error toast
    pub fn clear_error(&self) {
        self.error.set(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(id: &str, cleared: bool) -> UserQuery {
        UserQuery {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            subject: format!("subject {}", id),
            message: "hello".to_string(),
            createdat: "2024-03-01T10:00:00+00:00".to_string(),
            iscleared: cleared,
        }
    }

    #[test]
    fn test_quick_stats_absent_fields_default_to_zero() {
        let stats: QuickStats = serde_json::from_str("{}").unwrap();
        assert_eq!(stats, QuickStats::default());
        assert_eq!(stats.open_queries, 0);

        let stats: QuickStats =
            serde_json::from_str(r#"{"total_mentees": 120, "open_queries": 3}"#).unwrap();
        assert_eq!(stats.total_mentees, 120);
        assert_eq!(stats.open_queries, 3);
        assert_eq!(stats.total_prs, 0);
    }

    #[test]
    fn test_sanitize_trend_sorts_ascending() {
        let points = vec![
            TrendPoint { day: "2024-01-02".to_string(), total: 5 },
            TrendPoint { day: "2024-01-01".to_string(), total: 3 },
        ];
        let sorted = sanitize_trend(points);
        assert_eq!(sorted[0].day, "2024-01-01");
        assert_eq!(sorted[0].total, 3);
        assert_eq!(sorted[1].day, "2024-01-02");
        assert_eq!(sorted[1].total, 5);
    }

    #[test]
    fn test_sanitize_trend_rejects_malformed_days() {
        let points = vec![
            TrendPoint { day: "not-a-date".to_string(), total: 7 },
            TrendPoint { day: String::new(), total: 2 },
            TrendPoint { day: "2024-02-29".to_string(), total: 4 },
        ];
        let sanitized = sanitize_trend(points);
        assert_eq!(sanitized.len(), 1);
        assert_eq!(sanitized[0].day, "2024-02-29");
    }

    #[test]
    fn test_sanitize_trend_empty_is_empty() {
        assert!(sanitize_trend(Vec::new()).is_empty());
    }

    #[test]
    fn test_sanitize_queries_enforces_cap_and_ids() {
        let mut rows: Vec<UserQuery> = (0..150).map(|i| query(&format!("q{}", i), false)).collect();
        rows.insert(0, query("", false)); // no id, rejected

        let sanitized = sanitize_queries(rows);
        assert_eq!(sanitized.len(), QUERY_LIST_CAP);
        assert!(sanitized.iter().all(|q| !q.id.is_empty()));
        assert_eq!(sanitized[0].id, "q0");
    }

    #[test]
    fn test_sanitize_queries_sorts_newest_first() {
        let mut older = query("old", false);
        older.createdat = "2024-03-01T08:00:00+00:00".to_string();
        let mut newest = query("new", false);
        newest.createdat = "2024-03-02T09:00:00+00:00".to_string();
        let mut bare = query("bare", false);
        bare.createdat = "2024-03-01T12:00:00".to_string();
        let mut garbled = query("garbled", false);
        garbled.createdat = "last tuesday".to_string();

        let sorted = sanitize_queries(vec![older, garbled, bare, newest]);
        let ids: Vec<&str> = sorted.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "bare", "old", "garbled"]);
    }

    #[test]
    fn test_sanitize_queries_cap_keeps_newest_rows() {
        // A store ignoring the order parameter: oldest rows first
        let rows: Vec<UserQuery> = (0..120)
            .map(|i| {
                let mut q = query(&format!("q{}", i), false);
                q.createdat = format!("2024-01-01T{:02}:{:02}:00+00:00", i / 60, i % 60);
                q
            })
            .collect();

        let sanitized = sanitize_queries(rows);
        assert_eq!(sanitized.len(), QUERY_LIST_CAP);
        assert_eq!(sanitized[0].id, "q119");
        assert_eq!(sanitized[QUERY_LIST_CAP - 1].id, "q20");
    }

    #[test]
    fn test_patch_cleared_changes_exactly_one_record() {
        let mut queries = vec![query("a", false), query("b", false), query("c", true)];
        assert!(patch_cleared(&mut queries, "b"));

        assert!(!queries[0].iscleared);
        assert!(queries[1].iscleared);
        assert!(queries[2].iscleared);
        // Untouched fields survive the patch
        assert_eq!(queries[1].subject, "subject b");
        assert_eq!(queries[1].email, "b@example.com");
    }

    #[test]
    fn test_patch_cleared_is_idempotent() {
        let mut queries = vec![query("a", false)];
        assert!(patch_cleared(&mut queries, "a"));
        let snapshot = queries.clone();

        assert!(!patch_cleared(&mut queries, "a"));
        assert_eq!(queries, snapshot);
    }

    #[test]
    fn test_patch_cleared_unknown_id_is_noop() {
        let mut queries = vec![query("a", false)];
        assert!(!patch_cleared(&mut queries, "zzz"));
        assert!(!queries[0].iscleared);
    }

    #[test]
    fn test_trend_point_parses_iso_days_only() {
        let point = TrendPoint { day: "2024-01-31".to_string(), total: 1 };
        assert!(point.is_valid());

        let point = TrendPoint { day: "2024-01-32".to_string(), total: 1 };
        assert!(!point.is_valid());

        let point = TrendPoint { day: "01/31/2024".to_string(), total: 1 };
        assert!(!point.is_valid());
    }
}
