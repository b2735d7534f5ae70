//! Notification fan-out — one record (or email) per matching subscriber.
//!
//! Article creation materialises in-store notifications, best-effort per
//! recipient. Newsletter approval dispatches a single email batch through
//! the [`Mailer`], and a transport failure there aborts the batch and
//! surfaces to the caller.

use byline_core::{
  content::{Article, Newsletter, Publisher},
  mail::Mailer,
  store::NewsStore,
  user::User,
};

use crate::error::Error;

/// Fan out notifications for a freshly-created article.
///
/// Enumerates the author's followers, then (if the article is published
/// under a publisher) that publisher's followers. A reader subscribed to
/// both receives two notifications; the sets are not merged. A failed
/// insert for one recipient is logged and skipped so it cannot block the
/// rest; returns the number of notifications actually written.
pub async fn notify_on_new_article<S>(
  store: &S,
  author: &User,
  publisher: Option<&Publisher>,
  article: &Article,
) -> Result<usize, S::Error>
where
  S: NewsStore,
{
  let mut delivered = 0;

  for edge in store.journalist_followers(author.user_id).await? {
    let message =
      format!("{} uploaded a new article: {}", author.username, article.title);
    match store.create_notification(edge.reader_id, message).await {
      Ok(_) => delivered += 1,
      Err(e) => tracing::warn!(
        recipient = %edge.reader_id,
        error = %e,
        "skipping undeliverable notification"
      ),
    }
  }

  if let Some(publisher) = publisher {
    for edge in store.publisher_followers(publisher.publisher_id).await? {
      let message =
        format!("New article under {}: {}", publisher.name, article.title);
      match store.create_notification(edge.reader_id, message).await {
        Ok(_) => delivered += 1,
        Err(e) => tracing::warn!(
          recipient = %edge.reader_id,
          error = %e,
          "skipping undeliverable notification"
        ),
      }
    }
  }

  tracing::info!(article = %article.article_id, delivered, "article fan-out complete");
  Ok(delivered)
}

/// Email every subscriber of the newsletter's publisher.
///
/// One batch send with the newsletter title and content verbatim. Unlike the
/// article path, a transport failure propagates — nothing is swallowed.
/// Returns the number of addressed recipients (0 when no mailer is
/// configured or nobody subscribes).
pub async fn notify_on_newsletter_approval<S, M>(
  store: &S,
  mailer: Option<&M>,
  from: &str,
  newsletter: &Newsletter,
) -> Result<usize, Error>
where
  S: NewsStore,
  M: Mailer,
{
  let emails = store
    .publisher_subscriber_emails(newsletter.publisher_id)
    .await
    .map_err(Error::store)?;

  if emails.is_empty() {
    return Ok(0);
  }

  let Some(mailer) = mailer else {
    tracing::warn!(
      newsletter = %newsletter.newsletter_id,
      "no mail transport configured; skipping newsletter dispatch"
    );
    return Ok(0);
  };

  let subject = format!("New Newsletter: {}", newsletter.title);
  mailer
    .send(&subject, &newsletter.content, from, &emails)
    .await
    .map_err(|e| Error::Mail(Box::new(e)))?;

  tracing::info!(
    newsletter = %newsletter.newsletter_id,
    recipients = emails.len(),
    "newsletter dispatched"
  );
  Ok(emails.len())
}
