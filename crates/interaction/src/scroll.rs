//! Scroll-detecting swipes.

use uidrive_event_model::event::Coordinate;
use uidrive_event_model::notification::{Notification, NotificationKind};

use crate::controller::InteractionController;
use crate::predicate::WaitMode;

/// Whether the scrolled view can keep moving after `notification`.
///
/// Index-based payloads are at a boundary when the first or last item is
/// visible. Offset-based payloads are at a boundary when the offset on the
/// swipe's axis is 0 or at its maximum; the axis is vertical when the swipe
/// keeps `x` fixed and horizontal when it keeps `y` fixed. Any other
/// payload (diagonal swipe, or neither shape present) reports `true`.
pub fn has_more_to_scroll(notification: &Notification, down: Coordinate, up: Coordinate) -> bool {
    let scroll = &notification.scroll;

    if let Some((from_index, to_index, item_count)) = scroll.index_range() {
        let found_end = from_index == 0 || item_count.checked_sub(1) == Some(to_index);
        tracing::debug!(from_index, to_index, item_count, found_end, "Indexed scroll");
        return !found_end;
    }

    if let Some((scroll_x, scroll_y)) = scroll.scroll_offsets() {
        if down.x == up.x {
            let found_end = scroll_y == 0 || Some(scroll_y) == scroll.max_scroll_y;
            tracing::debug!(scroll_y, found_end, "Vertical scroll");
            return !found_end;
        } else if down.y == up.y {
            let found_end = scroll_x == 0 || Some(scroll_x) == scroll.max_scroll_x;
            tracing::debug!(scroll_x, found_end, "Horizontal scroll");
            return !found_end;
        }
    }

    true
}

impl InteractionController {
    /// Swipe and wait briefly for the view to report a scroll.
    ///
    /// Returns `true` if a scroll notification arrived and the view is not
    /// at the beginning or end of its content; `false` if it is at a
    /// boundary or nothing scrolled in time.
    pub async fn scroll_swipe(
        &self,
        down_x: i32,
        down_y: i32,
        up_x: i32,
        up_y: i32,
        steps: u32,
    ) -> bool {
        tracing::debug!(down_x, down_y, up_x, up_y, steps, "scroll_swipe");

        let action = self.swipe(down_x, down_y, up_x, up_y, steps);
        let outcome = self
            .run_and_wait(
                action,
                self.config.scroll_event_timeout(),
                WaitMode::Any,
                NotificationKind::ViewScrolled.into(),
            )
            .await;

        match outcome {
            Ok(Some(notification)) => has_more_to_scroll(
                &notification,
                Coordinate::new(down_x, down_y),
                Coordinate::new(up_x, up_y),
            ),
            Ok(None) => false,
            Err(e) => {
                tracing::error!(error = %e, "scroll_swipe wait rejected");
                false
            }
        }
    }
}
