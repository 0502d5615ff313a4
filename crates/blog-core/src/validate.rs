//! Payload validation. Runs before any storage access; a failure produces a
//! structured per-field message list and the operation never touches a store.

use serde::{Deserialize, Serialize};

use crate::domain::{AuthorPatch, NewAuthor, NewBlogPost, NewComment, PostPatch};

/// A single validation failure tied to a request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

fn collect(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// Syntactic email check. Uniqueness is deliberately not enforced.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

pub fn validate_new_author(input: &NewAuthor) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if input.name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is a mandatory field!"));
    }
    if input.surname.trim().is_empty() {
        errors.push(FieldError::new("surname", "Surname is a mandatory field!"));
    }
    if !is_valid_email(&input.email) {
        errors.push(FieldError::new("email", "Must be a valid email!"));
    }
    if input.birth_date.trim().is_empty() {
        errors.push(FieldError::new(
            "birthDate",
            "Birth Date is a mandatory field!",
        ));
    }
    collect(errors)
}

/// Validates only the fields present in the patch; merge semantics leave the
/// rest untouched.
pub fn validate_author_patch(patch: &AuthorPatch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if matches!(&patch.name, Some(name) if name.trim().is_empty()) {
        errors.push(FieldError::new("name", "Name is a mandatory field!"));
    }
    if matches!(&patch.surname, Some(surname) if surname.trim().is_empty()) {
        errors.push(FieldError::new("surname", "Surname is a mandatory field!"));
    }
    if matches!(&patch.email, Some(email) if !is_valid_email(email)) {
        errors.push(FieldError::new("email", "Must be a valid email!"));
    }
    if matches!(&patch.birth_date, Some(date) if date.trim().is_empty()) {
        errors.push(FieldError::new(
            "birthDate",
            "Birth Date is a mandatory field!",
        ));
    }
    collect(errors)
}

pub fn validate_new_post(input: &NewBlogPost) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if input.category.trim().is_empty() {
        errors.push(FieldError::new("category", "Category is a mandatory field!"));
    }
    if input.title.trim().is_empty() {
        errors.push(FieldError::new("title", "Title is a mandatory field!"));
    }
    if input.content.trim().is_empty() {
        errors.push(FieldError::new("content", "Content is a mandatory field!"));
    }
    collect(errors)
}

pub fn validate_post_patch(patch: &PostPatch) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if matches!(&patch.category, Some(category) if category.trim().is_empty()) {
        errors.push(FieldError::new("category", "Category is a mandatory field!"));
    }
    if matches!(&patch.title, Some(title) if title.trim().is_empty()) {
        errors.push(FieldError::new("title", "Title is a mandatory field!"));
    }
    if matches!(&patch.content, Some(content) if content.trim().is_empty()) {
        errors.push(FieldError::new("content", "Content is a mandatory field!"));
    }
    collect(errors)
}

pub fn validate_new_comment(input: &NewComment) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    if input.text.trim().is_empty() {
        errors.push(FieldError::new(
            "text",
            "You have to write something in the comment",
        ));
    }
    if matches!(input.rating, Some(rating) if !(1..=5).contains(&rating)) {
        errors.push(FieldError::new(
            "rating",
            "Rating must be between 1 and 5",
        ));
    }
    collect(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn author_input() -> NewAuthor {
        NewAuthor {
            name: "A".to_string(),
            surname: "B".to_string(),
            email: "a@b.com".to_string(),
            birth_date: "2000-01-01".to_string(),
            avatar: None,
            is_admin: None,
        }
    }

    #[test]
    fn valid_author_passes() {
        assert!(validate_new_author(&author_input()).is_ok());
    }

    #[test]
    fn missing_fields_are_reported_individually() {
        let input = NewAuthor {
            name: String::new(),
            surname: String::new(),
            email: "not-an-email".to_string(),
            birth_date: String::new(),
            avatar: None,
            is_admin: None,
        };
        let errors = validate_new_author(&input).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].field, "name");
        assert_eq!(errors[0].message, "Name is a mandatory field!");
    }

    #[test]
    fn email_syntax_check() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("a@.com"));
    }

    #[test]
    fn patch_validates_only_present_fields() {
        let patch = AuthorPatch {
            avatar: Some("/media/authors/x.jpg".to_string()),
            ..Default::default()
        };
        assert!(validate_author_patch(&patch).is_ok());

        let patch = AuthorPatch {
            email: Some("broken".to_string()),
            ..Default::default()
        };
        assert_eq!(validate_author_patch(&patch).unwrap_err().len(), 1);
    }

    #[test]
    fn comment_needs_text_and_sane_rating() {
        let errors = validate_new_comment(&NewComment {
            text: "  ".to_string(),
            author: None,
            rating: Some(9),
        })
        .unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
