use crate::effect::Position;

/// Platform-agnostic pointer events in viewport pixel coordinates.
///
/// These are fed into
/// [`EffectManager::handle_event`](crate::effect::EffectManager::handle_event).
///
/// # Example
///
/// ```
/// use pointer_fx::input::PointerEvent;
///
/// let click = PointerEvent::click(120.0, 48.0);
/// assert_eq!(click.position().x, 120.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button click.
    Click {
        /// Where the click landed.
        at: Position,
    },
    /// Cursor moved.
    Move {
        /// New cursor position.
        at: Position,
    },
}

impl PointerEvent {
    /// Click at `(x, y)`.
    #[must_use]
    pub fn click(x: f64, y: f64) -> Self {
        Self::Click {
            at: Position::new(x, y),
        }
    }

    /// Pointer move to `(x, y)`.
    #[must_use]
    pub fn moved(x: f64, y: f64) -> Self {
        Self::Move {
            at: Position::new(x, y),
        }
    }

    /// Viewport position carried by the event.
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::Click { at } | Self::Move { at } => *at,
        }
    }
}

#[cfg(feature = "web")]
impl From<&web_sys::MouseEvent> for Position {
    fn from(evt: &web_sys::MouseEvent) -> Self {
        Self::new(f64::from(evt.client_x()), f64::from(evt.client_y()))
    }
}
