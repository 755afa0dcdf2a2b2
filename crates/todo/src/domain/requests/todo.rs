use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Which slice of the list to show. Anything unrecognised shows everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TodoFilter {
    #[default]
    All,
    Complete,
    Incomplete,
}

impl TodoFilter {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("complete") => TodoFilter::Complete,
            Some("incomplete") => TodoFilter::Incomplete,
            _ => TodoFilter::All,
        }
    }

    /// The `is_completed` value selected by this filter, if any.
    pub fn completion(&self) -> Option<bool> {
        match self {
            TodoFilter::All => None,
            TodoFilter::Complete => Some(true),
            TodoFilter::Incomplete => Some(false),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TodoFilter::All => "all",
            TodoFilter::Complete => "complete",
            TodoFilter::Incomplete => "incomplete",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FindAllTodos {
    /// `complete` or `incomplete`; omit for every todo.
    pub filter: Option<String>,
}

impl FindAllTodos {
    pub fn filter(&self) -> TodoFilter {
        TodoFilter::parse(self.filter.as_deref())
    }
}

/// Create/edit form. The checkbox only counts as ticked when it sends `on`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct TodoForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,

    pub is_completed: Option<String>,
}

impl TodoForm {
    pub fn is_checked(&self) -> bool {
        self.is_completed.as_deref() == Some("on")
    }
}

#[derive(Debug, Clone)]
pub struct CreateTodoRequest {
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl From<TodoForm> for CreateTodoRequest {
    fn from(form: TodoForm) -> Self {
        let is_completed = form.is_checked();

        Self {
            title: form.title,
            description: form.description,
            is_completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpdateTodoRequest {
    pub todo_id: i32,
    pub title: String,
    pub description: String,
    pub is_completed: bool,
}

impl UpdateTodoRequest {
    pub fn from_form(todo_id: i32, form: TodoForm) -> Self {
        let is_completed = form.is_checked();

        Self {
            todo_id,
            title: form.title,
            description: form.description,
            is_completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        assert_eq!(TodoFilter::parse(Some("complete")), TodoFilter::Complete);
        assert_eq!(TodoFilter::parse(Some("incomplete")), TodoFilter::Incomplete);
        assert_eq!(TodoFilter::parse(Some("Complete")), TodoFilter::All);
        assert_eq!(TodoFilter::parse(Some("")), TodoFilter::All);
        assert_eq!(TodoFilter::parse(None), TodoFilter::All);
    }

    #[test]
    fn test_checkbox_counts_only_when_on() {
        let mut form = TodoForm {
            title: "Buy milk".into(),
            description: "2 litres".into(),
            is_completed: Some("on".into()),
        };
        assert!(CreateTodoRequest::from(form.clone()).is_completed);

        form.is_completed = Some("true".into());
        assert!(!CreateTodoRequest::from(form.clone()).is_completed);

        form.is_completed = None;
        assert!(!UpdateTodoRequest::from_form(3, form).is_completed);
    }

    #[test]
    fn test_title_and_description_are_required() {
        let form = TodoForm::default();
        let errors = form.validate().unwrap_err();

        assert_eq!(
            shared::utils::validation_messages(&errors),
            vec!["Description is required", "Title is required"]
        );
    }
}
