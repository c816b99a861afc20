use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use taskdeck_models::{
    draft::{COMMAND_MAX_CHARS, NAME_MAX_CHARS, OWNER_MAX_CHARS},
    Field, FieldError, Task, TaskDraft, TaskSubmission,
};

/// What the form asks of its owner after a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    None,
    Submitted(TaskSubmission),
    Cancelled,
}

/// Create/edit form for the three user-editable task fields.
///
/// Holding an original task puts the form in edit mode; the original's id is
/// carried into the submission.
#[derive(Debug, Clone)]
pub struct TaskForm {
    original: Option<Task>,
    draft: TaskDraft,
    focus: Field,
    errors: Vec<FieldError>,
    saving: bool,
}

impl TaskForm {
    pub fn create() -> Self {
        Self::with_original(None)
    }

    pub fn edit(task: Task) -> Self {
        Self::with_original(Some(task))
    }

    fn with_original(original: Option<Task>) -> Self {
        let draft = original.as_ref().map(Task::draft).unwrap_or_default();
        Self {
            original,
            draft,
            focus: Field::Name,
            errors: Vec::new(),
            saving: false,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.original.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_edit() {
            "Edit Task Details"
        } else {
            "Create New Task"
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_edit() {
            "Update Task"
        } else {
            "Create Task"
        }
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn focus(&self) -> Field {
        self.focus
    }

    pub fn error_for(&self, field: Field) -> Option<&str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message.as_str())
    }

    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Called by the owner once the submission it forwarded has settled.
    pub fn set_saving(&mut self, saving: bool) {
        self.saving = saving;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormEvent {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => FormEvent::Cancelled,
            KeyCode::Enter => self.submit(),
            KeyCode::Char('s') if ctrl => self.submit(),
            KeyCode::Char('r') if ctrl => {
                self.reset();
                FormEvent::None
            }
            KeyCode::Tab | KeyCode::Down => {
                self.move_focus(next_field(self.focus));
                FormEvent::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.move_focus(previous_field(self.focus));
                FormEvent::None
            }
            KeyCode::Backspace => {
                self.draft.value_mut(self.focus).pop();
                self.revalidate_focus();
                FormEvent::None
            }
            KeyCode::Char(c) if !ctrl => {
                self.insert_char(c);
                FormEvent::None
            }
            _ => FormEvent::None,
        }
    }

    /// Validates every field; only a clean draft is handed out.
    pub fn submit(&mut self) -> FormEvent {
        if self.saving {
            return FormEvent::None;
        }
        match self.draft.validate() {
            Ok(()) => {
                self.errors.clear();
                FormEvent::Submitted(TaskSubmission::for_original(
                    self.original.as_ref(),
                    self.draft.clone(),
                ))
            }
            Err(err) => {
                if let Some(first) = err.errors.first() {
                    self.focus = first.field;
                }
                self.errors = err.errors;
                FormEvent::None
            }
        }
    }

    /// Back to the initial values: the original task's in edit mode, blank otherwise.
    pub fn reset(&mut self) {
        self.draft = self
            .original
            .as_ref()
            .map(Task::draft)
            .unwrap_or_default();
        self.errors.clear();
        self.focus = Field::Name;
    }

    pub fn insert_char(&mut self, c: char) {
        let limit = input_limit(self.focus);
        let value = self.draft.value_mut(self.focus);
        if value.chars().count() < limit {
            value.push(c);
        }
        self.revalidate_focus();
    }

    /// Leaving a field checks it.
    fn move_focus(&mut self, to: Field) {
        let left = self.focus;
        self.errors.retain(|error| error.field != left);
        if let Some(error) = self.draft.check(left) {
            self.errors.push(error);
        }
        self.focus = to;
    }

    fn revalidate_focus(&mut self) {
        let focus = self.focus;
        if self.error_for(focus).is_none() {
            return;
        }
        self.errors.retain(|error| error.field != focus);
        if let Some(error) = self.draft.check(focus) {
            self.errors.push(error);
        }
    }
}

/// Hard cap on typed characters per field.
pub fn input_limit(field: Field) -> usize {
    match field {
        Field::Name => NAME_MAX_CHARS,
        Field::Owner => OWNER_MAX_CHARS,
        Field::Command => COMMAND_MAX_CHARS,
    }
}

fn next_field(field: Field) -> Field {
    match field {
        Field::Name => Field::Owner,
        Field::Owner => Field::Command,
        Field::Command => Field::Name,
    }
}

fn previous_field(field: Field) -> Field {
    match field {
        Field::Name => Field::Command,
        Field::Owner => Field::Name,
        Field::Command => Field::Owner,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeService;
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(form: &mut TaskForm, text: &str) {
        for c in text.chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn fill(form: &mut TaskForm, name: &str, owner: &str, command: &str) {
        type_text(form, name);
        form.handle_key(key(KeyCode::Tab));
        type_text(form, owner);
        form.handle_key(key(KeyCode::Tab));
        type_text(form, command);
    }

    #[test]
    fn create_submits_exact_values_without_id() {
        let mut form = TaskForm::create();
        fill(&mut form, "Nightly build", "ci", "make all");

        let event = form.handle_key(key(KeyCode::Enter));
        assert_eq!(
            event,
            FormEvent::Submitted(TaskSubmission::Create(TaskDraft::new(
                "Nightly build",
                "ci",
                "make all"
            )))
        );
    }

    #[test]
    fn edit_preserves_original_id() {
        let mut form = TaskForm::edit(FakeService::task("42", "Print date", "date"));
        assert_eq!(form.title(), "Edit Task Details");
        form.handle_key(key(KeyCode::Tab));
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, " -u");

        match form.submit() {
            FormEvent::Submitted(TaskSubmission::Update { id, draft }) => {
                assert_eq!(id, "42");
                assert_eq!(draft.command, "date -u");
                assert_eq!(draft.name, "Print date");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn invalid_field_blocks_submission_and_reports_message() {
        let mut form = TaskForm::create();
        fill(&mut form, "ab", "ci", "make");

        assert_eq!(form.submit(), FormEvent::None);
        assert_eq!(
            form.error_for(Field::Name),
            Some("Name must be at least 3 characters")
        );
        assert!(form.error_for(Field::Owner).is_none());
        assert_eq!(form.focus(), Field::Name);
    }

    #[test]
    fn empty_form_reports_every_field() {
        let mut form = TaskForm::create();
        assert_eq!(form.submit(), FormEvent::None);
        for field in Field::ALL {
            assert!(form.error_for(field).is_some(), "{field}");
        }
    }

    #[test]
    fn leaving_a_field_checks_it() {
        let mut form = TaskForm::create();
        type_text(&mut form, "ab");
        assert!(form.error_for(Field::Name).is_none());

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), Field::Owner);
        assert_eq!(
            form.error_for(Field::Name),
            Some("Name must be at least 3 characters")
        );
        assert!(form.error_for(Field::Owner).is_none());

        form.handle_key(key(KeyCode::BackTab));
        type_text(&mut form, "c");
        form.handle_key(key(KeyCode::Tab));
        assert!(form.error_for(Field::Name).is_none());
    }

    #[test]
    fn fixing_a_field_clears_its_error() {
        let mut form = TaskForm::create();
        fill(&mut form, "ab", "ci", "make");
        form.submit();
        type_text(&mut form, "c");
        assert!(form.error_for(Field::Name).is_none());
    }

    #[test]
    fn reset_restores_initial_values_and_stays_open() {
        let original = FakeService::task("7", "Disk usage", "df -h");
        let mut form = TaskForm::edit(original.clone());
        type_text(&mut form, " (old)");
        form.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL));
        assert_eq!(form.draft(), &original.draft());

        let mut blank = TaskForm::create();
        type_text(&mut blank, "temp");
        blank.reset();
        assert_eq!(blank.draft(), &TaskDraft::default());
    }

    #[test]
    fn cancel_skips_validation() {
        let mut form = TaskForm::create();
        assert_eq!(form.handle_key(key(KeyCode::Esc)), FormEvent::Cancelled);
        assert!(form.error_for(Field::Name).is_none());
    }

    #[test]
    fn typing_stops_at_input_limit() {
        let mut form = TaskForm::create();
        form.handle_key(key(KeyCode::Tab));
        type_text(&mut form, &"o".repeat(60));
        assert_eq!(form.draft().owner.chars().count(), OWNER_MAX_CHARS);
    }

    #[test]
    fn saving_form_ignores_repeat_submit() {
        let mut form = TaskForm::create();
        fill(&mut form, "Nightly build", "ci", "make");
        form.set_saving(true);
        assert_eq!(form.submit(), FormEvent::None);
    }
}
