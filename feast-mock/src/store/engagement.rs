use chrono::Utc;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Notification, Review, ReviewCreate};
use shared::util::prefixed_id;

use super::{MockStore, newest_first};

impl MockStore {
    // ==================== Favorites ====================

    /// Favorite restaurant ids, in the order they were added
    pub fn favorites(&self, user_id: &str) -> Vec<String> {
        self.favorites
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Add a favorite; adding one twice is a no-op
    pub fn add_favorite(&self, user_id: &str, restaurant_id: &str) -> Vec<String> {
        let mut favorites = self.favorites.write();
        let list = favorites.entry(user_id.to_string()).or_default();
        if !list.iter().any(|id| id == restaurant_id) {
            list.push(restaurant_id.to_string());
        }
        list.clone()
    }

    pub fn remove_favorite(&self, user_id: &str, restaurant_id: &str) -> Vec<String> {
        let mut favorites = self.favorites.write();
        match favorites.get_mut(user_id) {
            Some(list) => {
                list.retain(|id| id != restaurant_id);
                list.clone()
            }
            None => Vec::new(),
        }
    }

    // ==================== Notifications ====================

    /// A user's notifications, newest first
    pub fn notifications_for_user(&self, user_id: &str) -> Vec<Notification> {
        let rows = self
            .notifications
            .read()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        newest_first(rows, |n: &Notification| n.created_at)
    }

    pub fn notification(&self, id: &str) -> AppResult<Notification> {
        self.notifications
            .read()
            .iter()
            .find(|n| n.id == id)
            .cloned()
            .ok_or_else(|| notification_not_found(id))
    }

    pub fn mark_notification_read(&self, id: &str) -> AppResult<Notification> {
        let mut notifications = self.notifications.write();
        let notification = notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| notification_not_found(id))?;
        notification.is_read = true;
        Ok(notification.clone())
    }

    /// Mark every notification of a user read; returns how many changed
    pub fn mark_all_notifications_read(&self, user_id: &str) -> usize {
        let mut changed = 0;
        for n in self
            .notifications
            .write()
            .iter_mut()
            .filter(|n| n.user_id == user_id && !n.is_read)
        {
            n.is_read = true;
            changed += 1;
        }
        changed
    }

    // ==================== Reviews ====================

    /// A restaurant's reviews, newest first
    pub fn reviews_for_restaurant(&self, restaurant_id: &str) -> Vec<Review> {
        let rows = self
            .reviews
            .read()
            .iter()
            .filter(|r| r.restaurant_id == restaurant_id)
            .cloned()
            .collect();
        newest_first(rows, |r: &Review| r.created_at)
    }

    pub fn reviews_for_user(&self, user_id: &str) -> Vec<Review> {
        let rows = self
            .reviews
            .read()
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        newest_first(rows, |r: &Review| r.created_at)
    }

    /// Store a review
    ///
    /// The display name falls back to the stored user's name, then to
    /// "Anonymous".
    pub fn create_review(&self, payload: ReviewCreate) -> Review {
        let user_name = payload
            .user_name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.user(&payload.user_id).ok().map(|u| u.name))
            .unwrap_or_else(|| "Anonymous".to_string());

        let review = Review {
            id: prefixed_id("REV"),
            user_id: payload.user_id,
            user_name,
            restaurant_id: payload.restaurant_id,
            order_id: payload.order_id,
            rating: payload.rating,
            comment: payload.comment,
            food_rating: payload.food_rating,
            delivery_rating: payload.delivery_rating,
            created_at: Utc::now(),
        };
        self.reviews.write().push(review.clone());
        review
    }
}

fn notification_not_found(id: &str) -> AppError {
    AppError::with_message(
        ErrorCode::NotificationNotFound,
        format!("Notification {id} not found"),
    )
    .with_detail("notification_id", id)
}
