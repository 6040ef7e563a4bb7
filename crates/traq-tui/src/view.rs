//! Task list view-model.
//!
//! Owns the task list, the draft form, the search buffer, and the
//! time-tracking state. Each operation issues at most one HTTP call and
//! applies the response to in-memory state; on failure it logs one warning
//! and leaves state as it was. Nothing is retried.

use tracing::warn;

use traq_api::ApiClient;
use traq_core::{format_hms, Task, TaskDraft};

/// Time-tracking state: at most one task is tracked at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tracking {
    /// No clock running.
    #[default]
    Idle,
    /// Clock running against the given task id.
    Active {
        /// Id of the tracked task.
        task_id: i64,
    },
}

/// State behind the task list screen.
///
/// The list is a transient mirror of the backend: mutations refetch rather
/// than merging locally, so the displayed list is always exactly the last
/// successful fetch or search response.
#[derive(Debug)]
pub struct TaskListView {
    api: ApiClient,
    /// Tasks as the backend last returned them.
    pub tasks: Vec<Task>,
    /// Form buffer for create/update.
    pub draft: TaskDraft,
    /// Task being edited, if the draft targets an existing task.
    pub editing: Option<Task>,
    /// Title search buffer.
    pub search_title: String,
    /// Index of the selected task in `tasks`.
    pub selected: usize,
    /// Current tracking state.
    pub tracking: Tracking,
    /// Seconds counted locally since tracking started.
    pub elapsed_secs: u64,
    /// Server-computed total from the last clock-out.
    pub time_spent_secs: u64,
    /// Last operation failure, shown in the footer until the next success.
    pub last_error: Option<String>,
}

impl TaskListView {
    /// Create an empty view backed by the given client.
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            tasks: Vec::new(),
            draft: TaskDraft::default(),
            editing: None,
            search_title: String::new(),
            selected: 0,
            tracking: Tracking::default(),
            elapsed_secs: 0,
            time_spent_secs: 0,
            last_error: None,
        }
    }

    /// Whether a clock is currently running.
    pub fn is_tracking(&self) -> bool {
        matches!(self.tracking, Tracking::Active { .. })
    }

    /// The tracked task id, if any.
    pub fn tracking_task_id(&self) -> Option<i64> {
        match self.tracking {
            Tracking::Active { task_id } => Some(task_id),
            Tracking::Idle => None,
        }
    }

    /// The currently selected task, if the list is non-empty.
    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.get(self.selected)
    }

    /// Move the selection down, clamped to the list.
    pub fn select_next(&mut self) {
        if self.selected + 1 < self.tasks.len() {
            self.selected += 1;
        }
    }

    /// Move the selection up.
    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Elapsed time since the clock started, rendered `h:m:s`.
    pub fn elapsed_display(&self) -> String {
        format_hms(self.elapsed_secs)
    }

    /// Server-reported total from the last clock-out, rendered `h:m:s`.
    pub fn time_spent_display(&self) -> String {
        format_hms(self.time_spent_secs)
    }

    /// One second of wall-clock time has passed while tracking.
    pub fn tick(&mut self) {
        if self.is_tracking() {
            self.elapsed_secs += 1;
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.tasks.len() {
            self.selected = self.tasks.len().saturating_sub(1);
        }
    }

    // ── Operations ──────────────────────────────────────────────────────────

    /// Replace the list with `GET /task`.
    pub async fn fetch_tasks(&mut self) {
        match self.api.list_tasks().await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.clamp_selection();
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch tasks");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Replace the list with the title-search results.
    ///
    /// The search buffer is sent verbatim, empty or not; what an empty
    /// query matches is the backend's call.
    pub async fn search_tasks(&mut self) {
        match self.api.search_tasks(&self.search_title).await {
            Ok(tasks) => {
                self.tasks = tasks;
                self.clamp_selection();
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, title = %self.search_title, "task search failed");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Create a task from the draft, then refetch.
    ///
    /// On failure the draft stays populated so nothing typed is lost.
    pub async fn create_task(&mut self) {
        match self.api.create_task(&self.draft).await {
            Ok(()) => {
                self.draft.reset_for_create();
                self.last_error = None;
                self.fetch_tasks().await;
            }
            Err(e) => {
                warn!(error = %e, title = %self.draft.title, "failed to create task");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Load a task into the draft for editing. Purely local.
    pub fn edit_task(&mut self, task: Task) {
        self.draft = TaskDraft::from_task(&task);
        self.editing = Some(task);
    }

    /// Push the draft to the task being edited, then refetch.
    ///
    /// No-op when nothing is being edited. On success the draft is cleared
    /// the way the form always cleared it, status included.
    pub async fn update_task(&mut self) {
        let Some(editing) = self.editing.as_ref() else {
            return;
        };
        match self.api.update_task(editing.id, &self.draft).await {
            Ok(()) => {
                self.editing = None;
                self.draft.reset_after_update();
                self.last_error = None;
                self.fetch_tasks().await;
            }
            Err(e) => {
                warn!(error = %e, task_id = editing.id, "failed to update task");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Abandon the in-progress edit and reset the draft for creation.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
        self.draft.reset_for_create();
    }

    /// Submit the draft: update when editing, create otherwise.
    pub async fn submit_draft(&mut self) {
        if self.editing.is_some() {
            self.update_task().await;
        } else {
            self.create_task().await;
        }
    }

    /// Delete a task, then refetch.
    pub async fn delete_task(&mut self, id: i64) {
        match self.api.delete_task(id).await {
            Ok(()) => {
                self.last_error = None;
                self.fetch_tasks().await;
            }
            Err(e) => {
                warn!(error = %e, task_id = id, "failed to delete task");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Clock in on a task and start the local counter.
    ///
    /// The previous time-spent readout is zeroed before the call; tracking
    /// only begins once the backend has accepted the clock-in.
    pub async fn start_tracking(&mut self, id: i64) {
        self.time_spent_secs = 0;
        match self.api.clock_in(id).await {
            Ok(()) => {
                self.tracking = Tracking::Active { task_id: id };
                self.elapsed_secs = 0;
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, task_id = id, "failed to clock in");
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Clock out and adopt the server-computed total.
    ///
    /// On failure the clock keeps running; stopping is retried by the user,
    /// not by us.
    pub async fn stop_tracking(&mut self, id: i64) {
        match self.api.clock_out(id).await {
            Ok(response) => {
                self.time_spent_secs = response.time_spent;
                self.tracking = Tracking::Idle;
                self.elapsed_secs = 0;
                self.last_error = None;
            }
            Err(e) => {
                warn!(error = %e, task_id = id, "failed to clock out");
                self.last_error = Some(e.to_string());
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn view_for(server: &MockServer) -> TaskListView {
        TaskListView::new(ApiClient::new(server.uri(), 5000).with_access_token("tok-1"))
    }

    fn two_tasks() -> serde_json::Value {
        serde_json::json!([
            {"id": 1, "title": "Groceries", "status": "Uncompleted"},
            {"id": 2, "title": "Taxes", "status": "Completed"}
        ])
    }

    async fn mount_list(server: &MockServer, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/task"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    // ── fetch / search ──────────────────────────────────────────────

    #[tokio::test]
    async fn fetch_replaces_list_with_response() {
        let server = MockServer::start().await;
        mount_list(&server, two_tasks()).await;

        let mut view = view_for(&server);
        view.fetch_tasks().await;
        assert_eq!(view.tasks.len(), 2);
        assert_eq!(view.tasks[0].title, "Groceries");
        assert!(view.last_error.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_keeps_previous_list() {
        let server = MockServer::start().await;
        mount_list(&server, two_tasks()).await;

        let mut view = view_for(&server);
        view.fetch_tasks().await;

        server.reset().await;
        Mock::given(method("GET"))
            .and(path("/task"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        view.fetch_tasks().await;
        assert_eq!(view.tasks.len(), 2);
        assert!(view.last_error.is_some());
    }

    #[tokio::test]
    async fn search_issues_one_request_and_replaces_list() {
        let server = MockServer::start().await;
        mount_list(&server, two_tasks()).await;
        Mock::given(method("GET"))
            .and(path("/task/search"))
            .and(query_param("title", "Groceries"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"id": 1, "title": "Groceries", "status": "Uncompleted"}
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut view = view_for(&server);
        view.fetch_tasks().await;
        view.search_title = "Groceries".to_string();
        view.search_tasks().await;
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].title, "Groceries");
    }

    // ── create / edit / update / delete ─────────────────────────────

    #[tokio::test]
    async fn create_resets_draft_and_refetches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/task"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        mount_list(&server, two_tasks()).await;

        let mut view = view_for(&server);
        view.draft.title = "Water plants".to_string();
        view.submit_draft().await;

        assert_eq!(view.draft.title, "");
        assert_eq!(view.draft.status, "Uncompleted");
        assert_eq!(view.tasks.len(), 2);
    }

    #[tokio::test]
    async fn failed_create_leaves_draft_and_list_alone() {
        let server = MockServer::start().await;
        mount_list(&server, two_tasks()).await;

        let mut view = view_for(&server);
        view.fetch_tasks().await;

        server.reset().await;
        Mock::given(method("POST"))
            .and(path("/task"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        view.draft.title = "Water plants".to_string();
        view.submit_draft().await;

        assert_eq!(view.draft.title, "Water plants");
        assert_eq!(view.tasks.len(), 2);
        assert!(view.last_error.is_some());
    }

    #[tokio::test]
    async fn failed_create_emits_exactly_one_warning() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;
        use tracing::instrument::WithSubscriber;
        use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

        #[derive(Clone, Default)]
        struct WarnCounter(Arc<AtomicUsize>);

        impl<S: tracing::Subscriber> Layer<S> for WarnCounter {
            fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
                let meta = event.metadata();
                if *meta.level() == tracing::Level::WARN && meta.target().starts_with("traq") {
                    let _ = self.0.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/task"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(warnings.clone()));

        let mut view = view_for(&server);
        view.draft.title = "Water plants".to_string();
        view.create_task().with_subscriber(subscriber).await;

        assert_eq!(warnings.load(Ordering::Relaxed), 1);
        assert_eq!(view.draft.title, "Water plants");
    }

    #[tokio::test]
    async fn edit_task_fills_draft_without_http() {
        // No mocks mounted: any request would fail the test via last_error.
        let server = MockServer::start().await;
        let mut view = view_for(&server);

        let task = Task {
            id: 7,
            title: "Taxes".to_string(),
            status: traq_core::TaskStatus::Completed,
        };
        view.edit_task(task);

        assert_eq!(view.draft.title, "Taxes");
        assert_eq!(view.draft.status, "Completed");
        assert_eq!(view.editing.as_ref().map(|t| t.id), Some(7));
        assert!(view.last_error.is_none());
    }

    #[tokio::test]
    async fn update_clears_editing_and_empties_draft_status() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/task/7"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        mount_list(&server, two_tasks()).await;

        let mut view = view_for(&server);
        view.edit_task(Task {
            id: 7,
            title: "Taxes".to_string(),
            status: traq_core::TaskStatus::Uncompleted,
        });
        view.draft.title = "Taxes 2025".to_string();
        view.submit_draft().await;

        assert!(view.editing.is_none());
        assert_eq!(view.draft.title, "");
        // The form has always come back with an empty status here.
        assert_eq!(view.draft.status, "");
    }

    #[tokio::test]
    async fn update_without_editing_is_a_noop() {
        let server = MockServer::start().await;
        let mut view = view_for(&server);
        view.update_task().await;
        assert!(view.last_error.is_none());
    }

    #[tokio::test]
    async fn delete_refetches_updated_collection() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/task/1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        mount_list(
            &server,
            serde_json::json!([{"id": 2, "title": "Taxes", "status": "Completed"}]),
        )
        .await;

        let mut view = view_for(&server);
        view.delete_task(1).await;
        assert_eq!(view.tasks.len(), 1);
        assert_eq!(view.tasks[0].id, 2);
    }

    #[tokio::test]
    async fn delete_clamps_selection_to_shrunk_list() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/task/2"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;
        mount_list(
            &server,
            serde_json::json!([{"id": 1, "title": "Groceries", "status": "Uncompleted"}]),
        )
        .await;

        let mut view = view_for(&server);
        view.selected = 1;
        view.delete_task(2).await;
        assert_eq!(view.selected, 0);
    }

    // ── tracking ────────────────────────────────────────────────────

    #[tokio::test]
    async fn tracking_counts_ticks_and_adopts_server_total() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/task/5/clock-in"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/task/5/clock-out"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"timeSpent": 42})),
            )
            .mount(&server)
            .await;

        let mut view = view_for(&server);
        view.start_tracking(5).await;
        assert_eq!(view.tracking, Tracking::Active { task_id: 5 });

        for _ in 0..5 {
            view.tick();
        }
        assert_eq!(view.elapsed_display(), "0:0:5");

        view.stop_tracking(5).await;
        assert_eq!(view.tracking, Tracking::Idle);
        assert_eq!(view.elapsed_secs, 0);
        assert_eq!(view.time_spent_display(), "0:0:42");
    }

    #[tokio::test]
    async fn failed_clock_in_stays_idle() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/task/5/clock-in"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut view = view_for(&server);
        view.time_spent_secs = 42;
        view.start_tracking(5).await;

        assert_eq!(view.tracking, Tracking::Idle);
        // The readout is still zeroed before the call goes out.
        assert_eq!(view.time_spent_secs, 0);
        assert!(view.last_error.is_some());
    }

    #[tokio::test]
    async fn failed_clock_out_keeps_the_clock_running() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/task/5/clock-in"))
            .respond_with(ResponseTemplate::new(201))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/task/5/clock-out"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut view = view_for(&server);
        view.start_tracking(5).await;
        view.tick();
        view.stop_tracking(5).await;

        assert!(view.is_tracking());
        assert_eq!(view.elapsed_secs, 1);
    }

    #[tokio::test]
    async fn tick_is_inert_while_idle() {
        let server = MockServer::start().await;
        let mut view = view_for(&server);
        view.tick();
        assert_eq!(view.elapsed_secs, 0);
    }

    // ── selection ───────────────────────────────────────────────────

    #[tokio::test]
    async fn selection_moves_within_bounds() {
        let server = MockServer::start().await;
        mount_list(&server, two_tasks()).await;

        let mut view = view_for(&server);
        view.fetch_tasks().await;

        view.select_next();
        assert_eq!(view.selected, 1);
        view.select_next();
        assert_eq!(view.selected, 1);
        view.select_previous();
        assert_eq!(view.selected, 0);
        view.select_previous();
        assert_eq!(view.selected, 0);
    }
}
