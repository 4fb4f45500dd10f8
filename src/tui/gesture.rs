use crate::model::SuggestionId;
use crate::ops::queue::Decision;

/// Horizontal drag distance (columns) that commits a swipe on release
pub const SWIPE_THRESHOLD: i32 = 10;
/// Animation ticks a card spends sliding off screen before the decision lands
pub const EXIT_TICKS: u8 = 4;
/// Columns the card travels per exit tick
const EXIT_STEP: i32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Left dismisses, right favourites
    pub fn decision(self) -> Decision {
        match self {
            SwipeDirection::Left => Decision::Dismiss,
            SwipeDirection::Right => Decision::Favourite,
        }
    }

    fn sign(self) -> i32 {
        match self {
            SwipeDirection::Left => -1,
            SwipeDirection::Right => 1,
        }
    }
}

/// Pointer and animation state of the top card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CardGesture {
    #[default]
    Idle,
    /// Mouse held down on the card
    Dragging { origin: u16, offset: i32 },
    /// Card is animating off screen; the decision is applied when it finishes
    Exiting {
        id: SuggestionId,
        direction: SwipeDirection,
        ticks: u8,
    },
}

impl CardGesture {
    /// Mouse down on the card. Ignored while a card is exiting.
    pub fn begin(&mut self, column: u16) {
        if matches!(self, CardGesture::Idle) {
            *self = CardGesture::Dragging {
                origin: column,
                offset: 0,
            };
        }
    }

    pub fn drag_to(&mut self, column: u16) {
        if let CardGesture::Dragging { origin, offset } = self {
            *offset = column as i32 - *origin as i32;
        }
    }

    /// Mouse up. Past the threshold the card starts exiting; otherwise it snaps back.
    pub fn release(&mut self, id: SuggestionId) {
        let CardGesture::Dragging { offset, .. } = *self else {
            return;
        };
        *self = if offset <= -SWIPE_THRESHOLD {
            CardGesture::exiting(id, SwipeDirection::Left)
        } else if offset >= SWIPE_THRESHOLD {
            CardGesture::exiting(id, SwipeDirection::Right)
        } else {
            CardGesture::Idle
        };
    }

    /// Keyboard swipe: go straight to the exit animation
    pub fn fling(&mut self, id: SuggestionId, direction: SwipeDirection) {
        if !self.is_exiting() {
            *self = CardGesture::exiting(id, direction);
        }
    }

    fn exiting(id: SuggestionId, direction: SwipeDirection) -> CardGesture {
        CardGesture::Exiting {
            id,
            direction,
            ticks: 0,
        }
    }

    /// Advance the exit animation. Returns the finished swipe once the
    /// card is fully off screen, leaving the gesture idle.
    pub fn tick(&mut self) -> Option<(SuggestionId, SwipeDirection)> {
        let CardGesture::Exiting {
            id,
            direction,
            ticks,
        } = self
        else {
            return None;
        };
        *ticks += 1;
        if *ticks < EXIT_TICKS {
            return None;
        }
        let done = (*id, *direction);
        *self = CardGesture::Idle;
        Some(done)
    }

    pub fn cancel(&mut self) {
        *self = CardGesture::Idle;
    }

    pub fn is_exiting(&self) -> bool {
        matches!(self, CardGesture::Exiting { .. })
    }

    /// How far the card is displaced horizontally
    pub fn offset(&self) -> i32 {
        match *self {
            CardGesture::Idle => 0,
            CardGesture::Dragging { offset, .. } => offset,
            CardGesture::Exiting {
                direction, ticks, ..
            } => direction.sign() * EXIT_STEP * (ticks as i32 + 1),
        }
    }

    /// Direction the card currently leans, for border coloring
    pub fn lean(&self) -> Option<SwipeDirection> {
        match *self {
            CardGesture::Exiting { direction, .. } => Some(direction),
            _ => match self.offset() {
                o if o <= -SWIPE_THRESHOLD / 2 => Some(SwipeDirection::Left),
                o if o >= SWIPE_THRESHOLD / 2 => Some(SwipeDirection::Right),
                _ => None,
            },
        }
    }
}
