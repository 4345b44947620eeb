//! Search controller transitions.
//!
//! Every change to the criteria (query, field, sort) goes through
//! [`AppState::criteria_changed`]: an empty query clears immediately, anything
//! else restarts the debounce. Fetches are issued as [`Action::Fetch`] with a
//! fresh request token, and [`AppState::apply_response`] drops any response
//! whose token is not the latest.
//!
//! Page lifecycle:
//!
//! ```text
//! criteria change ─debounce─▶ fetch(1, replace) ─▶ results = docs
//! manual search ────────────▶ fetch(1, replace) ─▶ results = docs
//! load more ────────────────▶ fetch(n+1, append) ─▶ results += docs
//! ```

use super::state::{AppState, FETCH_ERROR_MESSAGE};
use super::Action;
use crate::catalog::{decode_page, search_url, RequestTag, SearchRequest};

impl AppState {
    /// Replaces the query text and reacts to the change.
    #[must_use]
    pub fn set_query(&mut self, query: String) -> Vec<Action> {
        self.query = query;
        self.criteria_changed()
    }

    /// Advances the search field selector.
    #[must_use]
    pub fn cycle_field(&mut self) -> Vec<Action> {
        self.field = self.field.next();
        tracing::debug!(field = ?self.field, "search field changed");
        self.criteria_changed()
    }

    /// Advances the sort selector.
    ///
    /// Loaded results are re-sorted in place right away; the refetch under the
    /// new order follows after the debounce.
    #[must_use]
    pub fn cycle_sort(&mut self) -> Vec<Action> {
        self.sort = self.sort.next();
        self.sort.apply(&mut self.results);
        tracing::debug!(sort = ?self.sort, "sort order changed");
        self.criteria_changed()
    }

    /// Clears immediately on an empty query, otherwise restarts the debounce.
    ///
    /// # Returns
    ///
    /// One [`Action::ScheduleDebounce`] for a non-blank query; an empty list
    /// after clearing.
    #[must_use]
    pub fn criteria_changed(&mut self) -> Vec<Action> {
        if self.query.trim().is_empty() {
            self.clear_search();
            return vec![];
        }
        vec![self.debouncer.schedule()]
    }

    /// Resets results to the idle state without touching the network.
    ///
    /// Any pending debounce is cancelled and any in-flight request is
    /// invalidated, so nothing repopulates the list afterwards.
    pub fn clear_search(&mut self) {
        tracing::debug!("query empty, clearing results");
        self.debouncer.cancel();
        self.latest_token += 1;
        self.loading = false;
        self.results.clear();
        self.has_more = false;
        self.error = None;
        self.page = 1;
        self.loaded_page = 1;
        self.selected_index = 0;
        self.detail_open = false;
    }

    /// Handles a debounce timer elapsing.
    #[must_use]
    pub fn debounce_elapsed(&mut self) -> Vec<Action> {
        if !self.debouncer.elapsed() {
            return vec![];
        }
        if self.query.trim().is_empty() {
            return vec![];
        }
        vec![Action::Fetch(self.begin_fetch(1, true))]
    }

    /// Searches right away with the current criteria.
    ///
    /// Cancels the pending debounce so no duplicate fetch follows.
    ///
    /// # Returns
    ///
    /// A replacing [`Action::Fetch`] for page 1, or nothing for a blank
    /// query, which clears the results instead.
    #[must_use]
    pub fn search_now(&mut self) -> Vec<Action> {
        self.debouncer.cancel();
        if self.query.trim().is_empty() {
            self.clear_search();
            return vec![];
        }
        vec![Action::Fetch(self.begin_fetch(1, true))]
    }

    /// Requests the next page of the loaded query.
    ///
    /// # Returns
    ///
    /// A single append [`Action::Fetch`] for page `n + 1`, or nothing when
    /// there is no next page, a fetch is in flight, or the criteria changed
    /// and the replacing search has not fired yet. The loaded results belong
    /// to the old criteria in that last case, so appending the new query's
    /// page 2 would mix two result sets.
    #[must_use]
    pub fn load_more(&mut self) -> Vec<Action> {
        let pending = self.debouncer.is_pending();
        if !self.has_more || self.loading || pending {
            tracing::debug!(
                has_more = self.has_more,
                loading = self.loading,
                debounce_pending = pending,
                "load more ignored"
            );
            return vec![];
        }
        let next = self.page + 1;
        vec![Action::Fetch(self.begin_fetch(next, false))]
    }

    /// Marks a fetch as in flight and builds its request.
    fn begin_fetch(&mut self, page: u32, replace: bool) -> SearchRequest {
        self.latest_token += 1;
        self.page = page;
        self.loading = true;

        let request = SearchRequest {
            url: search_url(&self.catalog_url, self.field, &self.query, page),
            token: self.latest_token,
            page,
            replace,
        };
        tracing::debug!(
            url = %request.url,
            token = request.token,
            page,
            replace,
            "issuing search"
        );
        request
    }

    /// Applies a catalog response to the search state.
    ///
    /// Only the page itself is sorted under the current order before it
    /// replaces or extends the results; earlier pages keep their positions.
    ///
    /// # Parameters
    ///
    /// * `tag` - Request metadata recovered from the `web_request` context
    /// * `status` - HTTP status; transport failures arrive as non-2xx
    /// * `body` - Raw response body
    ///
    /// # Returns
    ///
    /// `true` if state changed and should be re-rendered. `false` for a
    /// response whose token is not the latest, which is dropped untouched.
    ///
    /// # Failure
    ///
    /// A non-2xx status or an undecodable body keeps the loaded results,
    /// rolls `page` back to the last loaded page and sets
    /// [`FETCH_ERROR_MESSAGE`]. The cause is logged at `error`.
    pub fn apply_response(&mut self, tag: RequestTag, status: u16, body: &[u8]) -> bool {
        let _span = tracing::debug_span!("apply_response", token = tag.token, status).entered();

        if tag.token != self.latest_token {
            tracing::debug!(latest = self.latest_token, "discarding stale response");
            return false;
        }

        self.loading = false;

        match decode_page(status, body) {
            Ok(mut page) => {
                self.has_more = page.has_more();
                self.sort.apply(&mut page.docs);
                tracing::debug!(
                    docs = page.docs.len(),
                    num_found = page.num_found,
                    has_more = self.has_more,
                    "search page received"
                );

                if tag.replace {
                    self.results = page.docs;
                    self.selected_index = 0;
                    self.detail_open = false;
                } else {
                    self.results.extend(page.docs);
                }
                self.page = tag.page;
                self.loaded_page = tag.page;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, page = tag.page, "search request failed");
                self.page = self.loaded_page;
                self.error = Some(FETCH_ERROR_MESSAGE.to_string());
            }
        }

        self.clamp_selection();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::ViewMode;
    use crate::domain::{Book, SearchField, SortOrder};
    use crate::favorites::FavoritesStore;
    use crate::storage::MemoryStorage;
    use crate::ui::Theme;

    fn state() -> AppState {
        AppState::new(
            FavoritesStore::load(Box::new(MemoryStorage::new())),
            Theme::default(),
        )
    }

    fn fetch_of(actions: &[Action]) -> SearchRequest {
        match actions {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("expected a single fetch, got {other:?}"),
        }
    }

    fn tag(request: &SearchRequest) -> RequestTag {
        RequestTag {
            token: request.token,
            page: request.page,
            replace: request.replace,
        }
    }

    fn body(titles: &[&str], start: u64, num_found: u64) -> Vec<u8> {
        let docs: Vec<_> = titles
            .iter()
            .map(|t| serde_json::json!({ "title": t, "key": format!("/works/{t}") }))
            .collect();
        serde_json::to_vec(&serde_json::json!({
            "docs": docs,
            "start": start,
            "numFound": num_found,
        }))
        .unwrap()
    }

    /// Types `query`, lets the debounce fire, and returns the issued request.
    fn debounced_search(s: &mut AppState, query: &str) -> SearchRequest {
        let scheduled = s.set_query(query.to_string());
        assert!(matches!(scheduled.as_slice(), [Action::ScheduleDebounce { .. }]));
        fetch_of(&s.debounce_elapsed())
    }

    #[test]
    fn rapid_edits_issue_one_fetch() {
        let mut s = state();
        let mut timers = 0;
        for q in ["d", "du", "dun", "dune"] {
            timers += s.set_query(q.to_string()).len();
        }
        assert_eq!(timers, 4);

        let mut fetches = Vec::new();
        for _ in 0..timers {
            fetches.extend(s.debounce_elapsed());
        }
        let request = fetch_of(&fetches);
        assert!(request.url.contains("title=dune&page=1&limit=20"));
        assert!(request.replace);
        assert!(s.loading);
    }

    #[test]
    fn clearing_query_resets_without_network() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        s.apply_response(tag(&request), 200, &body(&["A", "B"], 0, 45));
        let _ = s.set_query("dun".to_string());

        let actions = s.set_query("   ".to_string());
        assert!(actions.is_empty());
        assert!(s.results.is_empty());
        assert!(!s.has_more);
        assert!(s.error.is_none());
        assert_eq!(s.page, 1);

        // the earlier debounce timer elapses without fetching
        assert!(s.debounce_elapsed().is_empty());
    }

    #[test]
    fn clearing_invalidates_in_flight_request() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        let _ = s.set_query(String::new());
        assert!(!s.loading);

        assert!(!s.apply_response(tag(&request), 200, &body(&["A"], 0, 1)));
        assert!(s.results.is_empty());
    }

    #[test]
    fn has_more_follows_offsets() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        let titles: Vec<String> = (0..20).map(|i| format!("t{i}")).collect();
        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();

        s.apply_response(tag(&request), 200, &body(&refs, 0, 45));
        assert!(s.has_more);

        let more = fetch_of(&s.load_more());
        assert_eq!(more.page, 2);
        assert!(!more.replace);
        s.apply_response(tag(&more), 200, &body(&refs[..5], 40, 45));
        assert!(!s.has_more);
        assert_eq!(s.results.len(), 25);
        assert_eq!(s.page, 2);
    }

    #[test]
    fn load_more_guarded_by_loading_and_has_more() {
        let mut s = state();
        assert!(s.load_more().is_empty());

        let request = debounced_search(&mut s, "dune");
        s.has_more = true;
        assert!(s.load_more().is_empty(), "still loading");

        s.apply_response(tag(&request), 200, &body(&["A"], 0, 1));
        assert!(s.load_more().is_empty(), "nothing left");
    }

    #[test]
    fn load_more_waits_for_pending_criteria_change() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        s.apply_response(tag(&request), 200, &body(&["A"], 0, 45));
        assert!(s.has_more);

        let _ = s.set_query("emma".to_string());
        assert!(s.load_more().is_empty());
        assert_eq!(s.page, 1);
        assert!(!s.loading);

        let replacing = fetch_of(&s.debounce_elapsed());
        assert!(replacing.replace);
        assert!(replacing.url.contains("title=emma&page=1&"));
    }

    #[test]
    fn load_more_sorts_only_the_appended_page() {
        let mut s = state();
        s.sort = SortOrder::YearAscending;
        let page = |docs: serde_json::Value, start: u64| {
            serde_json::to_vec(&serde_json::json!({
                "docs": docs,
                "start": start,
                "numFound": 4,
            }))
            .unwrap()
        };

        let first = debounced_search(&mut s, "fox");
        s.apply_response(
            tag(&first),
            200,
            &page(
                serde_json::json!([
                    { "title": "a", "first_publish_year": 2000 },
                    { "title": "b", "first_publish_year": 1990 },
                ]),
                0,
            ),
        );

        let more = fetch_of(&s.load_more());
        s.apply_response(
            tag(&more),
            200,
            &page(
                serde_json::json!([
                    { "title": "c", "first_publish_year": 1800 },
                    { "title": "d", "first_publish_year": 1700 },
                ]),
                2,
            ),
        );

        let years: Vec<_> = s.results.iter().filter_map(|b| b.first_publish_year).collect();
        assert_eq!(years, vec![1990, 2000, 1700, 1800]);
    }

    #[test]
    fn ascending_sort_puts_missing_years_first() {
        let mut s = state();
        s.sort = SortOrder::YearAscending;
        let request = debounced_search(&mut s, "fox");
        let payload = serde_json::json!({
            "docs": [
                { "title": "a", "first_publish_year": 1995 },
                { "title": "b" },
                { "title": "c", "first_publish_year": 1980 },
            ],
            "numFound": 3,
        });
        s.apply_response(tag(&request), 200, &serde_json::to_vec(&payload).unwrap());

        let years: Vec<_> = s.results.iter().map(|b| b.first_publish_year).collect();
        assert_eq!(years, vec![None, Some(1980), Some(1995)]);
    }

    #[test]
    fn sort_change_resorts_loaded_results_and_refetches() {
        let mut s = state();
        s.query = "fox".to_string();
        s.results = vec![
            Book { first_publish_year: Some(2001), ..Book::titled("a") },
            Book { first_publish_year: Some(1970), ..Book::titled("b") },
        ];

        let actions = s.cycle_sort();
        assert_eq!(s.sort, SortOrder::YearAscending);
        assert_eq!(s.results[0].title, "b");
        assert!(matches!(actions.as_slice(), [Action::ScheduleDebounce { .. }]));
    }

    #[test]
    fn field_change_uses_new_parameter() {
        let mut s = state();
        s.query = "le guin".to_string();
        let _ = s.cycle_field();
        assert_eq!(s.field, SearchField::Author);
        let request = fetch_of(&s.debounce_elapsed());
        assert!(request.url.contains("?author=le%20guin&"));
    }

    #[test]
    fn failed_fetch_keeps_results_and_sets_error() {
        let mut s = state();
        let first = debounced_search(&mut s, "dune");
        s.apply_response(tag(&first), 200, &body(&["A", "B"], 0, 45));

        let second = fetch_of(&s.search_now());
        assert!(s.apply_response(tag(&second), 503, b"oops"));
        assert_eq!(s.results.len(), 2);
        assert_eq!(s.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert!(!s.loading);
    }

    #[test]
    fn malformed_body_is_a_fetch_failure() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        s.apply_response(tag(&request), 200, b"<html>");
        assert_eq!(s.error.as_deref(), Some(FETCH_ERROR_MESSAGE));
        assert!(!s.loading);
    }

    #[test]
    fn failed_load_more_rolls_page_back() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        s.apply_response(tag(&request), 200, &body(&["A"], 0, 45));

        let more = fetch_of(&s.load_more());
        assert_eq!(s.page, 2);
        s.apply_response(tag(&more), 500, b"");
        assert_eq!(s.page, 1);
        assert!(s.has_more);
    }

    #[test]
    fn success_clears_previous_error() {
        let mut s = state();
        let request = debounced_search(&mut s, "dune");
        s.apply_response(tag(&request), 500, b"");
        assert!(s.error.is_some());

        let retry = fetch_of(&s.search_now());
        s.apply_response(tag(&retry), 200, &body(&["A"], 0, 1));
        assert!(s.error.is_none());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut s = state();
        let old = debounced_search(&mut s, "dun");
        let new = debounced_search(&mut s, "dune");

        assert!(s.apply_response(tag(&new), 200, &body(&["New"], 0, 1)));
        assert!(!s.apply_response(tag(&old), 200, &body(&["Old"], 0, 1)));
        assert_eq!(s.results[0].title, "New");
    }

    #[test]
    fn manual_search_cancels_pending_debounce() {
        let mut s = state();
        let _ = s.set_query("dune".to_string());
        let request = fetch_of(&s.search_now());
        assert_eq!(request.page, 1);

        assert!(s.debounce_elapsed().is_empty());
    }

    #[test]
    fn manual_search_on_empty_query_clears() {
        let mut s = state();
        s.results = vec![Book::titled("x")];
        assert!(s.search_now().is_empty());
        assert!(s.results.is_empty());
    }

    #[test]
    fn replace_resets_selection() {
        let mut s = state();
        s.view_mode = ViewMode::Results;
        let first = debounced_search(&mut s, "dune");
        s.apply_response(tag(&first), 200, &body(&["A", "B", "C"], 0, 3));
        s.selected_index = 2;

        let second = fetch_of(&s.search_now());
        s.apply_response(tag(&second), 200, &body(&["D"], 0, 1));
        assert_eq!(s.selected_index, 0);
    }
}
