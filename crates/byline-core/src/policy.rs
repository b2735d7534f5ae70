//! The access policy — a stateless predicate evaluated per request.
//!
//! Denial is the caller's concern: handlers translate a `false` here into a
//! soft redirect, never a hard fault.

use crate::{content::Article, user::{Role, User}};

/// An action an authenticated user may attempt. Mutations on an article
/// carry the article so ownership can be checked.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
  CreateArticle,
  ApproveArticle,
  UpdateArticle(&'a Article),
  DeleteArticle(&'a Article),
  CreateNewsletter,
  ApproveNewsletter,
  ManagePublishers,
  Subscribe,
  Unsubscribe,
}

/// Whether `actor` may perform `action`.
///
/// Article update/delete authority is shared: the owning journalist or any
/// editor. Everything else is a straight role check.
pub fn can_perform(actor: &User, action: Action<'_>) -> bool {
  match action {
    Action::CreateArticle | Action::CreateNewsletter => {
      actor.role == Role::Journalist
    }
    Action::ApproveArticle
    | Action::ApproveNewsletter
    | Action::ManagePublishers => actor.role == Role::Editor,
    Action::UpdateArticle(article) | Action::DeleteArticle(article) => {
      match actor.role {
        Role::Editor => true,
        Role::Journalist => article.created_by == actor.user_id,
        Role::Reader => false,
      }
    }
    Action::Subscribe | Action::Unsubscribe => actor.role == Role::Reader,
  }
}
