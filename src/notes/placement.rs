//! Note Placement Module
//!
//! Computes where each new note lands on screen.
//!
//! # Stacking Rules (DO NOT CHANGE WITHOUT UPDATING COMMENTS)
//!
//! 1. **Anchor**: the first note sits at the configured anchor, or - when no
//!    anchor is configured - at the top-right corner inset by `STACK_MARGIN`
//! 2. **Stacking**: each following note sits below the previous one, offset
//!    by the previous note's height plus `STACK_GAP`
//! 3. **Column wrap**: when a note would extend past the bottom of the
//!    screen, the stack returns to the anchor's vertical origin and shifts
//!    one column to the left (note width plus gap)
//!
//! Dragging a note does not feed back into allocation: the allocator only
//! tracks what it handed out, so sequentially created notes never fully
//! overlap, but a manually moved note can be covered by a later one.

use super::types::{Point, Size, STACK_GAP, STACK_MARGIN};

/// Hands out a screen position for each new note.
#[derive(Debug, Clone)]
pub struct PositionAllocator {
    /// Configured anchor override. None computes the top-right anchor from
    /// the screen size at allocation time.
    anchor: Option<Point>,
    /// Position and size of the most recently placed note.
    last: Option<(Point, Size)>,
}

impl PositionAllocator {
    pub fn new(anchor: Option<Point>) -> Self {
        Self { anchor, last: None }
    }

    /// Replace the anchor. Takes effect at the next column start; the
    /// current stack keeps its column.
    pub fn set_anchor(&mut self, anchor: Option<Point>) {
        self.anchor = anchor;
    }

    fn anchor_for(&self, screen: Size, surface: Size) -> Point {
        self.anchor.unwrap_or_else(|| {
            Point::new(
                screen.width as i32 - surface.width as i32 - STACK_MARGIN,
                STACK_MARGIN,
            )
        })
    }

    /// Allocate the position for the next note.
    pub fn next_position(&mut self, screen: Size, surface: Size) -> Point {
        let anchor = self.anchor_for(screen, surface);

        let position = match self.last {
            None => anchor,
            Some((prev, prev_size)) => {
                let y = prev.y + prev_size.height as i32 + STACK_GAP;
                if y + surface.height as i32 > screen.height as i32 {
                    // Column is full: wrap to the anchor's vertical origin,
                    // one column to the left.
                    Point::new(prev.x - (surface.width as i32 + STACK_GAP), anchor.y)
                } else {
                    Point::new(prev.x, y)
                }
            }
        };

        self.last = Some((position, surface));
        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Size = Size {
        width: 1920,
        height: 1080,
    };
    const NOTE: Size = Size {
        width: 200,
        height: 50,
    };

    #[test]
    fn first_note_at_top_right_anchor() {
        let mut alloc = PositionAllocator::new(None);
        let p = alloc.next_position(SCREEN, NOTE);
        assert_eq!(p, Point::new(1920 - 200 - STACK_MARGIN, STACK_MARGIN));
    }

    #[test]
    fn configured_anchor_wins() {
        let mut alloc = PositionAllocator::new(Some(Point::new(100, 100)));
        let p = alloc.next_position(SCREEN, NOTE);
        assert_eq!(p, Point::new(100, 100));
    }

    #[test]
    fn stack_spacing_is_height_plus_gap() {
        let mut alloc = PositionAllocator::new(None);
        let mut previous = alloc.next_position(SCREEN, NOTE);
        for _ in 0..5 {
            let next = alloc.next_position(SCREEN, NOTE);
            assert_eq!(next.x, previous.x);
            assert_eq!(next.y, previous.y + NOTE.height as i32 + STACK_GAP);
            previous = next;
        }
    }

    #[test]
    fn strictly_increasing_before_wrap() {
        let mut alloc = PositionAllocator::new(None);
        let mut last_y = i32::MIN;
        // 17 notes of height 50 + gap 10 fit above y=1080 from y=20.
        for _ in 0..17 {
            let p = alloc.next_position(SCREEN, NOTE);
            assert!(p.y > last_y);
            last_y = p.y;
        }
    }

    #[test]
    fn wraps_into_new_column() {
        let mut alloc = PositionAllocator::new(None);
        let first = alloc.next_position(SCREEN, NOTE);

        let mut wrapped = None;
        for _ in 0..30 {
            let p = alloc.next_position(SCREEN, NOTE);
            if p.y == first.y && p.x != first.x {
                wrapped = Some(p);
                break;
            }
        }

        let wrapped = wrapped.expect("stack never wrapped");
        assert_eq!(wrapped.x, first.x - (NOTE.width as i32 + STACK_GAP));
        assert_eq!(wrapped.y, first.y);
    }

    #[test]
    fn wrap_never_exceeds_screen_bottom() {
        let mut alloc = PositionAllocator::new(None);
        for _ in 0..60 {
            let p = alloc.next_position(SCREEN, NOTE);
            assert!(p.y + NOTE.height as i32 <= SCREEN.height as i32);
        }
    }

    #[test]
    fn mixed_sizes_use_previous_height() {
        let tall = Size::new(200, 120);
        let mut alloc = PositionAllocator::new(None);
        let first = alloc.next_position(SCREEN, tall);
        let second = alloc.next_position(SCREEN, NOTE);
        assert_eq!(second.y, first.y + tall.height as i32 + STACK_GAP);
    }
}
