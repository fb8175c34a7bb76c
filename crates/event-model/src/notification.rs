//! Asynchronous UI-change notifications.
//!
//! A notification has a single kind drawn from a fixed set of UI-change
//! categories. Waiters describe what they want as a [`NotificationKinds`]
//! bitmask over those categories.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Value used by notification producers to mark a payload field as absent.
pub const FIELD_NOT_APPLICABLE: i32 = -1;

/// Category of a UI-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    ViewClicked,
    ViewLongClicked,
    ViewSelected,
    ViewFocused,
    ViewTextChanged,
    WindowStateChanged,
    NotificationStateChanged,
    ViewHoverEnter,
    ViewHoverExit,
    WindowContentChanged,
    ViewScrolled,
    ViewTextSelectionChanged,
    Announcement,
}

impl NotificationKind {
    pub const ALL: [NotificationKind; 13] = [
        NotificationKind::ViewClicked,
        NotificationKind::ViewLongClicked,
        NotificationKind::ViewSelected,
        NotificationKind::ViewFocused,
        NotificationKind::ViewTextChanged,
        NotificationKind::WindowStateChanged,
        NotificationKind::NotificationStateChanged,
        NotificationKind::ViewHoverEnter,
        NotificationKind::ViewHoverExit,
        NotificationKind::WindowContentChanged,
        NotificationKind::ViewScrolled,
        NotificationKind::ViewTextSelectionChanged,
        NotificationKind::Announcement,
    ];
}

bitflags! {
    /// A set of notification kinds stored as a bitmask.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct NotificationKinds: u32 {
        const VIEW_CLICKED = 0x0001;
        const VIEW_LONG_CLICKED = 0x0002;
        const VIEW_SELECTED = 0x0004;
        const VIEW_FOCUSED = 0x0008;
        const VIEW_TEXT_CHANGED = 0x0010;
        const WINDOW_STATE_CHANGED = 0x0020;
        const NOTIFICATION_STATE_CHANGED = 0x0040;
        const VIEW_HOVER_ENTER = 0x0080;
        const VIEW_HOVER_EXIT = 0x0100;
        const WINDOW_CONTENT_CHANGED = 0x0800;
        const VIEW_SCROLLED = 0x1000;
        const VIEW_TEXT_SELECTION_CHANGED = 0x2000;
        const ANNOUNCEMENT = 0x4000;
    }
}

impl NotificationKinds {
    /// Whether `kind` is in the set.
    pub fn has(self, kind: NotificationKind) -> bool {
        self.contains(kind.into())
    }

    pub fn len(self) -> usize {
        self.bits().count_ones() as usize
    }

    /// The kinds in the set, in declaration order.
    pub fn kinds(self) -> impl Iterator<Item = NotificationKind> {
        NotificationKind::ALL
            .into_iter()
            .filter(move |kind| self.has(*kind))
    }
}

impl Default for NotificationKinds {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<NotificationKind> for NotificationKinds {
    fn from(kind: NotificationKind) -> Self {
        match kind {
            NotificationKind::ViewClicked => Self::VIEW_CLICKED,
            NotificationKind::ViewLongClicked => Self::VIEW_LONG_CLICKED,
            NotificationKind::ViewSelected => Self::VIEW_SELECTED,
            NotificationKind::ViewFocused => Self::VIEW_FOCUSED,
            NotificationKind::ViewTextChanged => Self::VIEW_TEXT_CHANGED,
            NotificationKind::WindowStateChanged => Self::WINDOW_STATE_CHANGED,
            NotificationKind::NotificationStateChanged => Self::NOTIFICATION_STATE_CHANGED,
            NotificationKind::ViewHoverEnter => Self::VIEW_HOVER_ENTER,
            NotificationKind::ViewHoverExit => Self::VIEW_HOVER_EXIT,
            NotificationKind::WindowContentChanged => Self::WINDOW_CONTENT_CHANGED,
            NotificationKind::ViewScrolled => Self::VIEW_SCROLLED,
            NotificationKind::ViewTextSelectionChanged => Self::VIEW_TEXT_SELECTION_CHANGED,
            NotificationKind::Announcement => Self::ANNOUNCEMENT,
        }
    }
}

impl FromIterator<NotificationKind> for NotificationKinds {
    fn from_iter<I: IntoIterator<Item = NotificationKind>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, kind| set | Self::from(kind))
    }
}

impl BitOr for NotificationKind {
    type Output = NotificationKinds;

    fn bitor(self, rhs: NotificationKind) -> NotificationKinds {
        NotificationKinds::from(self) | NotificationKinds::from(rhs)
    }
}

impl BitOr<NotificationKind> for NotificationKinds {
    type Output = NotificationKinds;

    fn bitor(self, rhs: NotificationKind) -> NotificationKinds {
        self.union(rhs.into())
    }
}

impl BitOrAssign<NotificationKind> for NotificationKinds {
    fn bitor_assign(&mut self, rhs: NotificationKind) {
        self.insert(rhs.into());
    }
}

impl fmt::Display for NotificationKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.kinds().map(|k| format!("{k:?}")).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Position reported by a scroll notification.
///
/// Adapter-style views report item indices; pixel-scrolled views report
/// offsets. Either group may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScrollPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_index: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item_count: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scroll_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_scroll_y: Option<i32>,
}

impl ScrollPayload {
    /// Build a payload from raw producer values, mapping the
    /// [`FIELD_NOT_APPLICABLE`] sentinel to `None`.
    #[allow(clippy::too_many_arguments)]
    pub fn from_raw(
        from_index: i32,
        to_index: i32,
        item_count: i32,
        scroll_x: i32,
        scroll_y: i32,
        max_scroll_x: i32,
        max_scroll_y: i32,
    ) -> Self {
        let field = |v: i32| (v != FIELD_NOT_APPLICABLE).then_some(v);
        Self {
            from_index: field(from_index),
            to_index: field(to_index),
            item_count: field(item_count),
            scroll_x: field(scroll_x),
            scroll_y: field(scroll_y),
            max_scroll_x: field(max_scroll_x),
            max_scroll_y: field(max_scroll_y),
        }
    }

    /// Index-based payload.
    pub fn indexed(from_index: i32, to_index: i32, item_count: i32) -> Self {
        Self {
            from_index: Some(from_index),
            to_index: Some(to_index),
            item_count: Some(item_count),
            ..Self::default()
        }
    }

    /// Pixel-offset payload.
    pub fn offsets(scroll_x: i32, scroll_y: i32, max_scroll_x: i32, max_scroll_y: i32) -> Self {
        Self {
            scroll_x: Some(scroll_x),
            scroll_y: Some(scroll_y),
            max_scroll_x: Some(max_scroll_x),
            max_scroll_y: Some(max_scroll_y),
            ..Self::default()
        }
    }

    /// `(from_index, to_index, item_count)` when all three are present.
    pub fn index_range(&self) -> Option<(i32, i32, i32)> {
        Some((self.from_index?, self.to_index?, self.item_count?))
    }

    /// `(scroll_x, scroll_y)` when both offsets are present.
    pub fn scroll_offsets(&self) -> Option<(i32, i32)> {
        Some((self.scroll_x?, self.scroll_y?))
    }
}

/// A UI-change notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,

    /// Uptime (ms) at which the producer emitted the notification.
    #[serde(default)]
    pub event_time: u64,

    #[serde(default)]
    pub scroll: ScrollPayload,
}

impl Notification {
    pub fn new(kind: NotificationKind) -> Self {
        Self {
            kind,
            event_time: 0,
            scroll: ScrollPayload::default(),
        }
    }

    /// A scroll notification with the given payload.
    pub fn scrolled(scroll: ScrollPayload) -> Self {
        Self {
            kind: NotificationKind::ViewScrolled,
            event_time: 0,
            scroll,
        }
    }

    pub fn with_event_time(mut self, event_time: u64) -> Self {
        self.event_time = event_time;
        self
    }
}
