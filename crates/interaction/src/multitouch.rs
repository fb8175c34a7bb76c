//! Multi-pointer gestures.

use uidrive_common::error::{UidriveError, UidriveResult};
use uidrive_event_model::event::Coordinate;

use crate::controller::InteractionController;
use crate::path;

impl InteractionController {
    /// Perform a gesture with one path per finger (pinch, rotate, ...).
    ///
    /// Needs at least two non-empty paths. Paths may differ in length; a
    /// finger whose path runs out holds its last position while the others
    /// keep moving. The first finger is the first down and the last up.
    ///
    /// Individual injection results are not checked: the gesture always
    /// runs to the end and reports `true`. Nothing is correlated here;
    /// wrap the call in [`InteractionController::run_and_wait`] to wait for
    /// notifications.
    pub async fn generate_multi_pointer_gesture<P>(&self, touches: &[P]) -> UidriveResult<bool>
    where
        P: AsRef<[Coordinate]>,
    {
        if touches.len() < 2 {
            return Err(UidriveError::invalid_argument(
                "Must provide coordinates for at least 2 pointers",
            ));
        }
        if let Some(idx) = touches.iter().position(|t| t.as_ref().is_empty()) {
            return Err(UidriveError::invalid_argument(format!(
                "Pointer {idx} has an empty path"
            )));
        }

        let max_steps = path::max_steps(touches);
        tracing::debug!(pointers = touches.len(), max_steps, "multi-pointer gesture");

        let session = self.builder.multi_touch(touches.len());
        let mut coords: Vec<Coordinate> = touches.iter().map(|t| t.as_ref()[0]).collect();

        self.injector
            .inject(&self.builder.primary_down(&session, &coords));
        for index in 1..touches.len() {
            self.injector
                .inject(&self.builder.pointer_down(&session, index, &coords));
        }

        for step in 1..max_steps.saturating_sub(1) {
            for (slot, touch) in coords.iter_mut().zip(touches) {
                if let Some(point) = path::position_at(touch.as_ref(), step) {
                    *slot = point;
                }
            }
            self.injector
                .inject(&self.builder.multi_move(&session, &coords));
            tokio::time::sleep(self.pacer.delay()).await;
        }

        for (slot, touch) in coords.iter_mut().zip(touches) {
            if let Some(last) = touch.as_ref().last() {
                *slot = *last;
            }
        }

        for index in 1..touches.len() {
            self.injector
                .inject(&self.builder.pointer_up(&session, index, &coords));
        }
        tracing::debug!(x = coords[0].x, y = coords[0].y, "primary pointer up");
        self.injector
            .inject(&self.builder.primary_up(session, &coords));

        Ok(true)
    }
}
