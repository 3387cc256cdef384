//! Notification feed helpers.

use crate::backend::Backend;
use crate::error::StoreError;
use crate::model::Record;
use crate::query::Criteria;
use crate::store::Collection;

use super::models::{Notification, NotificationPatch};

impl<'a, B: Backend> Collection<'a, B, Notification> {
    /// Add an unread notification to the feed.
    pub fn push(&self, notification: Notification) -> Result<Record<Notification>, StoreError> {
        self.create(Notification {
            read: false,
            ..notification
        })
    }

    /// The feed as displayed: most recent first.
    pub fn newest_first(&self) -> Vec<Record<Notification>> {
        let mut feed = self.get_all();
        feed.reverse();
        feed
    }

    pub fn unread_count(&self) -> usize {
        self.find(&NotificationPatch::default().read(false)).len()
    }

    /// Returns whether a notification with `id` exists.
    pub fn mark_read(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.update(id, &NotificationPatch::default().read(true))?.is_some())
    }

    /// Returns how many notifications were unread.
    pub fn mark_all_read(&self) -> Result<usize, StoreError> {
        self.update_by(
            &Criteria::matching(&NotificationPatch::default().read(false)),
            &NotificationPatch::default().read(true),
        )
    }

    pub fn remove(&self, id: &str) -> Result<bool, StoreError> {
        self.delete(id)
    }
}
