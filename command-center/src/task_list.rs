use std::{cmp::Ordering, collections::BTreeSet, ops::Range};

use crossterm::event::{KeyCode, KeyEvent};
use log::{debug, info};
use taskdeck_models::Task;

use crate::{
    form::{FormEvent, TaskForm},
    history::{ExecutionHistoryView, HistoryEvent},
    notify::Notification,
    worker::{Msg, Request},
};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Server,
    NameAsc,
    NameDesc,
    OwnerAsc,
    OwnerDesc,
}

impl SortOrder {
    pub fn next(self) -> Self {
        match self {
            SortOrder::Server => SortOrder::NameAsc,
            SortOrder::NameAsc => SortOrder::NameDesc,
            SortOrder::NameDesc => SortOrder::OwnerAsc,
            SortOrder::OwnerAsc => SortOrder::OwnerDesc,
            SortOrder::OwnerDesc => SortOrder::Server,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Server => "unsorted",
            SortOrder::NameAsc => "name ↑",
            SortOrder::NameDesc => "name ↓",
            SortOrder::OwnerAsc => "owner ↑",
            SortOrder::OwnerDesc => "owner ↓",
        }
    }

    fn compare(self, a: &Task, b: &Task) -> Ordering {
        match self {
            SortOrder::Server => Ordering::Equal,
            SortOrder::NameAsc => lexical(&a.name, &b.name),
            SortOrder::NameDesc => lexical(&b.name, &a.name),
            SortOrder::OwnerAsc => lexical(&a.owner, &b.owner),
            SortOrder::OwnerDesc => lexical(&b.owner, &a.owner),
        }
    }
}

fn lexical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// At most one modal is open at a time.
#[derive(Debug, Default)]
pub enum Overlay {
    #[default]
    None,
    Form(TaskForm),
    History(ExecutionHistoryView),
    ConfirmDelete { id: String, name: String },
}

#[derive(Debug, Default)]
pub struct SearchBox {
    pub editing: bool,
    pub input: String,
}

/// Everything a key press or API result asks of the enclosing shell.
#[derive(Debug, Default)]
pub struct Outcome {
    pub requests: Vec<Request>,
    pub notifications: Vec<Notification>,
    /// Task returned by a successful execution.
    pub executed: Option<Task>,
    pub clipboard: Option<String>,
    pub quit: bool,
}

impl Outcome {
    fn request(request: Request) -> Self {
        Self {
            requests: vec![request],
            ..Self::default()
        }
    }

    fn notify(notification: Notification) -> Self {
        Self {
            notifications: vec![notification],
            ..Self::default()
        }
    }
}

/// Owns the fetched task collection and composes the form and history views.
///
/// The displayed collection is only ever replaced wholesale by the latest
/// listing response; mutations trigger a refetch instead of local edits.
#[derive(Debug)]
pub struct TaskList {
    tasks: Vec<Task>,
    loading: bool,
    search_term: Option<String>,
    search: SearchBox,
    overlay: Overlay,
    executing: BTreeSet<String>,
    selected: usize,
    sort: SortOrder,
    page_size: usize,
    listing_seq: u64,
    form_seq: u64,
}

impl TaskList {
    pub fn new(page_size: usize) -> Self {
        Self {
            tasks: Vec::new(),
            loading: false,
            search_term: None,
            search: SearchBox::default(),
            overlay: Overlay::None,
            executing: BTreeSet::new(),
            selected: 0,
            sort: SortOrder::default(),
            page_size: page_size.max(1),
            listing_seq: 0,
            form_seq: 0,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    pub fn search_box(&self) -> &SearchBox {
        &self.search
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    pub fn sort(&self) -> SortOrder {
        self.sort
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn is_executing(&self, task: &Task) -> bool {
        task.id
            .as_ref()
            .is_some_and(|id| self.executing.contains(id))
    }

    /// Whether the row's execute action is available right now.
    pub fn can_execute(&self, task: &Task) -> bool {
        task.can_execute() && !self.is_executing(task)
    }

    /// True while keys should go to a modal or the search input.
    pub fn captures_input(&self) -> bool {
        self.search.editing || !matches!(self.overlay, Overlay::None)
    }

    /// Tasks in display order.
    pub fn rows(&self) -> Vec<&Task> {
        let mut rows: Vec<&Task> = self.tasks.iter().collect();
        if self.sort != SortOrder::Server {
            rows.sort_by(|a, b| self.sort.compare(a, b));
        }
        rows
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.rows().get(self.selected).copied()
    }

    /// Row indices shown on the current page.
    pub fn page_range(&self) -> Range<usize> {
        let total = self.tasks.len();
        let start = (self.selected / self.page_size) * self.page_size;
        start.min(total)..(start + self.page_size).min(total)
    }

    pub fn total(&self) -> usize {
        self.tasks.len()
    }

    pub fn mount(&mut self) -> Outcome {
        Outcome::request(self.refresh())
    }

    /// Issues a full listing, superseding any listing still in flight.
    pub fn refresh(&mut self) -> Request {
        self.listing_seq += 1;
        self.loading = true;
        Request::List {
            seq: self.listing_seq,
        }
    }

    /// A blank term means "no filter" and is never sent to the backend.
    pub fn search(&mut self, term: &str) -> Outcome {
        let term = term.trim();
        if term.is_empty() {
            return self.clear_search();
        }
        self.listing_seq += 1;
        self.loading = true;
        Outcome::request(Request::Search {
            seq: self.listing_seq,
            term: term.to_string(),
        })
    }

    pub fn clear_search(&mut self) -> Outcome {
        self.search_term = None;
        self.search.input.clear();
        self.search.editing = false;
        self.mount()
    }

    pub fn open_create(&mut self) {
        self.form_seq += 1;
        self.overlay = Overlay::Form(TaskForm::create());
    }

    pub fn open_edit(&mut self) -> Outcome {
        match self.selected_task().cloned() {
            Some(task) => {
                self.form_seq += 1;
                self.overlay = Overlay::Form(TaskForm::edit(task));
                Outcome::default()
            }
            None => Outcome::notify(Notification::warning("No task selected")),
        }
    }

    /// Deletion always goes through a confirmation step.
    pub fn request_delete(&mut self) -> Outcome {
        let Some(task) = self.selected_task() else {
            return Outcome::notify(Notification::warning("No task selected"));
        };
        match task.id.clone() {
            Some(id) => {
                self.overlay = Overlay::ConfirmDelete {
                    id,
                    name: task.name.clone(),
                };
                Outcome::default()
            }
            None => Outcome::notify(Notification::warning("Task has not been saved yet")),
        }
    }

    /// Runs the selected task's command. Rows without an id or command are
    /// never sent, and a row already running is ignored.
    pub fn execute_selected(&mut self) -> Outcome {
        let Some(task) = self.selected_task() else {
            return Outcome::default();
        };
        if !task.can_execute() {
            return Outcome::notify(Notification::warning(
                "Task must have an ID and command to execute",
            ));
        }
        if self.is_executing(task) {
            return Outcome::default();
        }
        let Some(id) = task.id.clone() else {
            return Outcome::default();
        };
        info!("Executing task {id}");
        self.executing.insert(id.clone());
        Outcome::request(Request::Execute { id })
    }

    /// Opens the history of the selected row from already-fetched data.
    pub fn view_history(&mut self) -> Outcome {
        let Some(task) = self.selected_task().cloned() else {
            return Outcome::default();
        };
        if task.executions.is_empty() {
            return Outcome::notify(Notification::info(format!(
                "No executions yet for '{}'",
                task.name
            )));
        }
        self.overlay = Overlay::History(ExecutionHistoryView::new(task));
        Outcome::default()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Outcome {
        match &mut self.overlay {
            Overlay::Form(form) => {
                return match form.handle_key(key) {
                    FormEvent::None => Outcome::default(),
                    FormEvent::Cancelled => {
                        self.overlay = Overlay::None;
                        Outcome::default()
                    }
                    FormEvent::Submitted(submission) => {
                        form.set_saving(true);
                        Outcome::request(Request::Save {
                            form: self.form_seq,
                            submission,
                        })
                    }
                };
            }
            Overlay::History(view) => {
                return match view.handle_key(key) {
                    HistoryEvent::None => Outcome::default(),
                    HistoryEvent::Close => {
                        self.overlay = Overlay::None;
                        Outcome::default()
                    }
                    HistoryEvent::Copy(output) => Outcome {
                        clipboard: Some(output),
                        notifications: vec![Notification::success("Output copied to clipboard")],
                        ..Outcome::default()
                    },
                };
            }
            Overlay::ConfirmDelete { id, .. } => {
                return match key.code {
                    KeyCode::Char('y') | KeyCode::Enter => {
                        let id = id.clone();
                        self.overlay = Overlay::None;
                        Outcome::request(Request::Delete { id })
                    }
                    KeyCode::Char('n') | KeyCode::Esc => {
                        self.overlay = Overlay::None;
                        Outcome::default()
                    }
                    _ => Outcome::default(),
                };
            }
            Overlay::None => {}
        }

        if self.search.editing {
            return self.handle_search_key(key);
        }
        self.handle_list_key(key)
    }

    fn handle_search_key(&mut self, key: KeyEvent) -> Outcome {
        match key.code {
            KeyCode::Enter => {
                self.search.editing = false;
                let term = self.search.input.clone();
                self.search(&term)
            }
            KeyCode::Esc if self.search.input.is_empty() && self.search_term.is_some() => {
                self.clear_search()
            }
            KeyCode::Esc => {
                self.search.editing = false;
                Outcome::default()
            }
            KeyCode::Backspace => {
                self.search.input.pop();
                if self.search.input.is_empty() && self.search_term.is_some() {
                    self.clear_search()
                } else {
                    Outcome::default()
                }
            }
            KeyCode::Char(c) => {
                self.search.input.push(c);
                Outcome::default()
            }
            _ => Outcome::default(),
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Outcome {
        let last = self.tasks.len().saturating_sub(1);
        match key.code {
            KeyCode::Char('q') => Outcome {
                quit: true,
                ..Outcome::default()
            },
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
                Outcome::default()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.selected = (self.selected + 1).min(last);
                Outcome::default()
            }
            KeyCode::PageUp => {
                self.selected = self.selected.saturating_sub(self.page_size);
                Outcome::default()
            }
            KeyCode::PageDown => {
                self.selected = (self.selected + self.page_size).min(last);
                Outcome::default()
            }
            KeyCode::Home => {
                self.selected = 0;
                Outcome::default()
            }
            KeyCode::End => {
                self.selected = last;
                Outcome::default()
            }
            KeyCode::Char('/') => {
                self.search.editing = true;
                Outcome::default()
            }
            KeyCode::Char('c') | KeyCode::Esc if self.search_term.is_some() => {
                self.clear_search()
            }
            KeyCode::Char('s') => {
                self.sort = self.sort.next();
                self.selected = 0;
                Outcome::default()
            }
            KeyCode::Char('r') => Outcome::request(self.refresh()),
            KeyCode::Char('n') => {
                self.open_create();
                Outcome::default()
            }
            KeyCode::Char('e') => self.open_edit(),
            KeyCode::Char('d') => self.request_delete(),
            KeyCode::Char('x') => self.execute_selected(),
            KeyCode::Char('h') => self.view_history(),
            _ => Outcome::default(),
        }
    }

    /// Folds an API result into local state.
    pub fn apply(&mut self, msg: Msg) -> Outcome {
        match msg {
            Msg::Listed { seq, term, result } => self.apply_listing(seq, term, result),
            Msg::Saved {
                form,
                update,
                result,
            } => {
                let own_form = form == self.form_seq;
                if let Overlay::Form(open) = &mut self.overlay {
                    if own_form {
                        open.set_saving(false);
                    }
                }
                match result {
                    Ok(_) => {
                        if own_form && matches!(self.overlay, Overlay::Form(_)) {
                            self.overlay = Overlay::None;
                        }
                        let message = if update {
                            "Task updated successfully"
                        } else {
                            "Task created successfully"
                        };
                        Outcome {
                            requests: vec![self.refresh()],
                            notifications: vec![Notification::success(message)],
                            ..Outcome::default()
                        }
                    }
                    Err(err) => Outcome::notify(Notification::error(err.to_string())),
                }
            }
            Msg::Deleted { id, result } => {
                let notification = match result {
                    Ok(()) => {
                        info!("Task {id} deleted");
                        Notification::success("Task deleted successfully")
                    }
                    Err(err) => Notification::error(err.to_string()),
                };
                Outcome {
                    requests: vec![self.refresh()],
                    notifications: vec![notification],
                    ..Outcome::default()
                }
            }
            Msg::Executed { id, result } => {
                self.executing.remove(&id);
                match result {
                    Ok(task) => {
                        if matches!(self.overlay, Overlay::None | Overlay::History(_)) {
                            self.overlay = Overlay::History(ExecutionHistoryView::new(task.clone()));
                        }
                        Outcome {
                            requests: vec![self.refresh()],
                            notifications: vec![Notification::success(
                                "Task executed successfully",
                            )],
                            executed: Some(task),
                            ..Outcome::default()
                        }
                    }
                    Err(err) => Outcome::notify(Notification::error(err.to_string())),
                }
            }
            Msg::Health(_) => Outcome::default(),
        }
    }

    fn apply_listing(
        &mut self,
        seq: u64,
        term: Option<String>,
        result: taskdeck_api::ClientResult<Vec<Task>>,
    ) -> Outcome {
        if seq != self.listing_seq {
            debug!("Discarding stale listing #{seq}; latest is #{}", self.listing_seq);
            return Outcome::default();
        }
        self.loading = false;
        match result {
            Ok(tasks) => {
                debug!("Loaded {} task(s)", tasks.len());
                self.tasks = tasks;
                if !self.search.editing {
                    self.search.input = term.clone().unwrap_or_default();
                }
                self.search_term = term;
                self.selected = self.selected.min(self.tasks.len().saturating_sub(1));
                Outcome::default()
            }
            Err(err) if term.is_some() => Outcome {
                requests: vec![self.refresh()],
                notifications: vec![Notification::error(err.to_string())],
                ..Outcome::default()
            },
            Err(err) => Outcome::notify(Notification::error(err.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{testing::FakeService, worker::run_request};
    use crossterm::event::KeyModifiers;
    use pretty_assertions::assert_eq;
    use std::collections::VecDeque;
    use taskdeck_api::TaskService;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    /// Runs requests to completion, feeding every result back in.
    fn drive(list: &mut TaskList, api: &FakeService, outcome: Outcome) -> Vec<Notification> {
        let mut notifications = outcome.notifications;
        let mut pending: VecDeque<Request> = outcome.requests.into();
        while let Some(request) = pending.pop_front() {
            let next = list.apply(run_request(api, request));
            notifications.extend(next.notifications);
            pending.extend(next.requests);
        }
        notifications
    }

    fn names(list: &TaskList) -> Vec<String> {
        list.rows().iter().map(|t| t.name.clone()).collect()
    }

    fn seeded() -> FakeService {
        FakeService::with_tasks(vec![
            FakeService::task("1", "Print date", "date"),
            FakeService::task("2", "Build docs", "make docs"),
            FakeService::task("3", "Archive logs", ""),
        ])
    }

    fn mounted(api: &FakeService) -> TaskList {
        let mut list = TaskList::new(DEFAULT_PAGE_SIZE);
        let outcome = list.mount();
        drive(&mut list, api, outcome);
        list
    }

    fn select(list: &mut TaskList, name: &str) {
        list.selected = list
            .rows()
            .iter()
            .position(|t| t.name == name)
            .expect("task present");
    }

    #[test]
    fn mount_fetches_full_list() {
        let api = seeded();
        let list = mounted(&api);
        assert_eq!(names(&list), vec!["Print date", "Build docs", "Archive logs"]);
        assert!(!list.is_loading());
        assert_eq!(api.calls().list, 1);
    }

    #[test]
    fn search_replaces_rows_and_clear_restores() {
        let api = seeded();
        let mut list = mounted(&api);

        let outcome = list.search("build");
        drive(&mut list, &api, outcome);
        assert_eq!(names(&list), vec!["Build docs"]);
        assert_eq!(list.search_term(), Some("build"));

        let outcome = list.handle_key(key(KeyCode::Char('c')));
        drive(&mut list, &api, outcome);
        assert_eq!(list.search_term(), None);
        assert_eq!(list.total(), 3);
    }

    #[test]
    fn blank_search_is_not_sent() {
        let api = seeded();
        let mut list = mounted(&api);
        let outcome = list.search("   ");
        assert!(matches!(outcome.requests.as_slice(), [Request::List { .. }]));
        drive(&mut list, &api, outcome);
        assert_eq!(api.calls().search, 0);
    }

    #[test]
    fn empty_search_result_is_not_an_error() {
        let api = FakeService::with_tasks(Vec::new());
        let mut list = mounted(&api);
        let outcome = list.search("build");
        let notifications = drive(&mut list, &api, outcome);
        assert!(notifications.is_empty());
        assert!(list.rows().is_empty());
        assert_eq!(list.search_term(), Some("build"));
    }

    #[test]
    fn failed_search_notifies_and_falls_back_to_full_list() {
        let api = seeded();
        let mut list = mounted(&api);
        api.set_offline(true);
        let outcome = list.search("build");
        let mut pending: VecDeque<Request> = outcome.requests.into();
        let search = pending.pop_front().unwrap();
        let next = list.apply(run_request(&api, search));
        assert_eq!(next.notifications.len(), 1);
        assert!(matches!(next.requests.as_slice(), [Request::List { .. }]));
        assert_eq!(list.search_term(), None);
    }

    #[test]
    fn stale_listing_responses_are_discarded() {
        let api = seeded();
        let mut list = mounted(&api);

        let first = list.search("print").requests.remove(0);
        let second = list.search("build").requests.remove(0);

        list.apply(run_request(&api, second));
        list.apply(run_request(&api, first));

        assert_eq!(names(&list), vec!["Build docs"]);
        assert_eq!(list.search_term(), Some("build"));
    }

    #[test]
    fn create_upserts_then_refetches() {
        let api = seeded();
        let mut list = mounted(&api);
        list.handle_key(key(KeyCode::Char('n')));
        assert!(matches!(list.overlay(), Overlay::Form(_)));
        for c in "Rotate keys".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        list.handle_key(key(KeyCode::Tab));
        for c in "sec".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        list.handle_key(key(KeyCode::Tab));
        for c in "rotate.sh".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        let outcome = list.handle_key(key(KeyCode::Enter));
        let notifications = drive(&mut list, &api, outcome);

        assert_eq!(notifications, vec![Notification::success("Task created successfully")]);
        assert!(matches!(list.overlay(), Overlay::None));
        assert_eq!(list.total(), 4);
        assert_eq!(api.calls().list, 2);
    }

    #[test]
    fn failed_save_keeps_form_open() {
        let api = seeded();
        let mut list = mounted(&api);
        api.fail_upsert();
        let outcome = list.open_edit();
        drive(&mut list, &api, outcome);
        let outcome = list.handle_key(key(KeyCode::Enter));
        let notifications = drive(&mut list, &api, outcome);

        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, crate::notify::Level::Error);
        match list.overlay() {
            Overlay::Form(form) => assert!(!form.is_saving()),
            other => panic!("form closed: {other:?}"),
        }
    }

    #[test]
    fn late_save_leaves_newer_form_open() {
        let api = seeded();
        let mut list = mounted(&api);
        list.open_edit();
        let pending = list.handle_key(key(KeyCode::Enter)).requests.remove(0);
        assert!(matches!(pending, Request::Save { .. }));

        list.handle_key(key(KeyCode::Esc));
        list.handle_key(key(KeyCode::Char('n')));
        for c in "Half typed".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }

        let outcome = list.apply(run_request(&api, pending));
        assert_eq!(
            outcome.notifications,
            vec![Notification::success("Task updated successfully")]
        );
        match list.overlay() {
            Overlay::Form(form) => {
                assert!(!form.is_edit());
                assert_eq!(form.draft().name, "Half typed");
            }
            other => panic!("newer form was closed: {other:?}"),
        }
    }

    #[test]
    fn delete_requires_confirmation_and_refetches() {
        let api = seeded();
        let mut list = mounted(&api);
        select(&mut list, "Build docs");

        let outcome = list.handle_key(key(KeyCode::Char('d')));
        assert!(outcome.requests.is_empty());
        assert!(matches!(list.overlay(), Overlay::ConfirmDelete { .. }));

        let outcome = list.handle_key(key(KeyCode::Char('n')));
        assert!(outcome.requests.is_empty());
        assert_eq!(api.calls().remove, 0);

        list.handle_key(key(KeyCode::Char('d')));
        let outcome = list.handle_key(key(KeyCode::Char('y')));
        drive(&mut list, &api, outcome);
        assert_eq!(names(&list), vec!["Print date", "Archive logs"]);
    }

    #[test]
    fn failed_delete_still_refetches() {
        let api = seeded();
        let mut list = mounted(&api);
        let outcome = list.apply(Msg::Deleted {
            id: "404".into(),
            result: api.remove("404"),
        });
        assert!(matches!(outcome.requests.as_slice(), [Request::List { .. }]));
        assert_eq!(outcome.notifications[0].level, crate::notify::Level::Error);
    }

    #[test]
    fn execute_without_command_issues_no_request() {
        let api = seeded();
        let mut list = mounted(&api);
        select(&mut list, "Archive logs");
        let before = api.calls().network_total();

        let outcome = list.handle_key(key(KeyCode::Char('x')));
        assert!(outcome.requests.is_empty());
        drive(&mut list, &api, outcome);
        assert_eq!(api.calls().network_total(), before);
        assert_eq!(api.calls().execute, 0);
    }

    #[test]
    fn execute_opens_history_and_reports_task() {
        let api = seeded();
        let mut list = mounted(&api);
        select(&mut list, "Print date");

        let outcome = list.handle_key(key(KeyCode::Char('x')));
        assert!(list.is_executing(list.selected_task().unwrap()));
        let request = outcome.requests[0].clone();

        let outcome = list.apply(run_request(&api, request));
        assert_eq!(outcome.executed.as_ref().unwrap().execution_count(), 1);
        assert!(matches!(outcome.requests.as_slice(), [Request::List { .. }]));
        match list.overlay() {
            Overlay::History(view) => assert_eq!(view.executions().len(), 1),
            other => panic!("expected history, got {other:?}"),
        }
        assert!(!list.is_executing(list.selected_task().unwrap()));
    }

    #[test]
    fn concurrent_executions_are_tracked_per_row() {
        let api = seeded();
        let mut list = mounted(&api);
        select(&mut list, "Print date");
        let first = list.execute_selected().requests.remove(0);
        select(&mut list, "Build docs");
        let second = list.execute_selected().requests.remove(0);

        assert!(list.execute_selected().requests.is_empty());
        list.apply(run_request(&api, first));

        let build = list.rows().into_iter().find(|t| t.name == "Build docs").unwrap().clone();
        assert!(list.is_executing(&build));
        list.apply(run_request(&api, second));
        assert!(!list.is_executing(&build));
    }

    #[test]
    fn failed_execution_leaves_state_alone() {
        let api = seeded();
        let mut list = mounted(&api);
        api.fail_execute();
        let request = list.execute_selected().requests.remove(0);
        let outcome = list.apply(run_request(&api, request));
        assert!(outcome.requests.is_empty());
        assert!(outcome.executed.is_none());
        assert!(matches!(list.overlay(), Overlay::None));
    }

    #[test]
    fn history_needs_executions_and_no_network() {
        let api = seeded();
        let mut list = mounted(&api);
        let before = api.calls().network_total();

        let outcome = list.handle_key(key(KeyCode::Char('h')));
        assert!(matches!(list.overlay(), Overlay::None));
        assert_eq!(outcome.notifications.len(), 1);

        let request = list.execute_selected().requests.remove(0);
        let outcome = list.apply(run_request(&api, request));
        drive(&mut list, &api, outcome);
        list.handle_key(key(KeyCode::Esc));

        let calls = api.calls().network_total();
        list.handle_key(key(KeyCode::Char('h')));
        assert!(matches!(list.overlay(), Overlay::History(_)));
        assert_eq!(api.calls().network_total(), calls);
        assert!(calls > before);
    }

    #[test]
    fn sorting_cycles_by_name_then_owner() {
        let api = FakeService::with_tasks(vec![
            Task { owner: "zed".into(), ..FakeService::task("1", "beta", "b") },
            Task { owner: "amy".into(), ..FakeService::task("2", "Alpha", "a") },
            Task { owner: "kim".into(), ..FakeService::task("3", "gamma", "g") },
        ]);
        let mut list = mounted(&api);

        list.handle_key(key(KeyCode::Char('s')));
        assert_eq!(names(&list), vec!["Alpha", "beta", "gamma"]);
        list.handle_key(key(KeyCode::Char('s')));
        assert_eq!(names(&list), vec!["gamma", "beta", "Alpha"]);
        list.handle_key(key(KeyCode::Char('s')));
        assert_eq!(names(&list), vec!["Alpha", "gamma", "beta"]);
    }

    #[test]
    fn pages_follow_selection() {
        let tasks = (0..25)
            .map(|i| FakeService::task(&i.to_string(), &format!("task {i:02}"), "true"))
            .collect();
        let api = FakeService::with_tasks(tasks);
        let mut list = mounted(&api);
        assert_eq!(list.page_range(), 0..10);
        list.handle_key(key(KeyCode::PageDown));
        assert_eq!(list.page_range(), 10..20);
        list.handle_key(key(KeyCode::End));
        assert_eq!(list.page_range(), 20..25);
    }

    #[test]
    fn clearing_search_input_reverts_filter() {
        let api = seeded();
        let mut list = mounted(&api);
        list.handle_key(key(KeyCode::Char('/')));
        for c in "date".chars() {
            list.handle_key(key(KeyCode::Char(c)));
        }
        let outcome = list.handle_key(key(KeyCode::Enter));
        drive(&mut list, &api, outcome);
        assert_eq!(list.total(), 1);

        list.handle_key(key(KeyCode::Char('/')));
        let mut outcome = Outcome::default();
        for _ in 0..4 {
            outcome = list.handle_key(key(KeyCode::Backspace));
        }
        drive(&mut list, &api, outcome);
        assert_eq!(list.search_term(), None);
        assert_eq!(list.total(), 3);
    }
}
