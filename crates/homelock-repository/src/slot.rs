//! Observable response slots.
//!
//! A [`ResponseSlot`] holds the latest decoded response of one operation
//! kind. Publishing overwrites the held value and wakes every subscriber;
//! nothing is queued, so a subscriber that falls behind only ever sees the
//! most recent response.

use homelock_network::ApiResponse;
use tokio::sync::watch;

/// Single-value, push-based container for one operation's latest response.
///
/// Starts out holding [`ApiResponse::empty`].
///
/// # Examples
///
/// ```
/// use homelock_network::{ApiResponse, MemberId};
/// use homelock_repository::ResponseSlot;
///
/// let slot = ResponseSlot::<MemberId>::new();
/// let mut observer = slot.subscribe();
/// assert!(observer.borrow().is_empty());
///
/// slot.publish(ApiResponse::success(12));
/// assert!(observer.has_changed().unwrap());
/// assert_eq!(observer.borrow_and_update().value(), Some(&12));
/// ```
#[derive(Debug)]
pub struct ResponseSlot<T> {
    tx: watch::Sender<ApiResponse<T>>,
}

impl<T> ResponseSlot<T> {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ApiResponse::empty());
        Self { tx }
    }

    /// Replace the held response and notify subscribers.
    ///
    /// Succeeds whether or not anyone is subscribed.
    pub fn publish(&self, response: ApiResponse<T>) {
        self.tx.send_replace(response);
    }

    /// Receiver that observes every later publish.
    pub fn subscribe(&self) -> watch::Receiver<ApiResponse<T>> {
        self.tx.subscribe()
    }

    /// Copy of the held response.
    pub fn current(&self) -> ApiResponse<T>
    where
        T: Clone,
    {
        self.tx.borrow().clone()
    }
}

impl<T> Default for ResponseSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
