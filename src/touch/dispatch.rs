//! Button regions and touch-to-action resolution.
//!
//! The screen has two buttons in the bottom bar. What a region does depends on the
//! power mode:
//!
//! | Region | Active | Suspended |
//! |--------|--------|-----------|
//! | `SYSTEM` | toggle `system enabled` | unreachable |
//! | `SLEEP` | request sleep | request wake |
//!
//! Hit-testing uses [`Rectangle::contains`]: the top-left edge is inside, the
//! bottom-right edge is outside.

use embedded_graphics::primitives::{ContainsPoint, Rectangle};

use super::TouchSample;
use crate::config::{SLEEP_BUTTON, SYSTEM_BUTTON};
use crate::power::PowerMode;

/// On-screen buttons, in layout order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ButtonId {
    System,
    Sleep,
}

impl ButtonId {
    /// Number of buttons.
    pub const COUNT: usize = 2;

    /// All buttons in layout order.
    pub const ALL: [Self; Self::COUNT] = [Self::System, Self::Sleep];

    /// Position in [`ButtonId::ALL`] and [`BUTTONS`].
    #[inline]
    pub const fn index(self) -> usize { self as usize }

    /// Region definition for this button.
    #[inline]
    pub fn region(self) -> &'static ButtonRegion { &BUTTONS[self.index()] }
}

/// Application flags that a button can flip.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ToggleId {
    /// Master enable for the relay outputs.
    System,
}

/// What a recognized touch asks the controller to do.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(target_arch = "arm", derive(defmt::Format))]
pub enum ButtonAction {
    Toggle(ToggleId),
    Sleep,
    Wake,
}

/// A touchable rectangle with its per-mode action bindings.
#[derive(Clone, Copy, Debug)]
pub struct ButtonRegion {
    pub id: ButtonId,
    pub rect: Rectangle,
    pub label: &'static str,
    /// Action while [`PowerMode::Active`].
    pub when_active: Option<ButtonAction>,
    /// Action while [`PowerMode::Suspended`].
    pub when_suspended: Option<ButtonAction>,
}

impl ButtonRegion {
    /// Action bound to this region in `mode`, if the region is reachable at all.
    #[inline]
    pub const fn action(
        &self,
        mode: PowerMode,
    ) -> Option<ButtonAction> {
        match mode {
            PowerMode::Active => self.when_active,
            PowerMode::Suspended => self.when_suspended,
        }
    }
}

/// Button table, indexed by [`ButtonId::index`].
pub static BUTTONS: [ButtonRegion; ButtonId::COUNT] = [
    ButtonRegion {
        id: ButtonId::System,
        rect: SYSTEM_BUTTON,
        label: "SYSTEM",
        when_active: Some(ButtonAction::Toggle(ToggleId::System)),
        when_suspended: None,
    },
    ButtonRegion {
        id: ButtonId::Sleep,
        rect: SLEEP_BUTTON,
        label: "SLEEP",
        when_active: Some(ButtonAction::Sleep),
        when_suspended: Some(ButtonAction::Wake),
    },
];

/// Map a touch to the button it hit and the action bound to it in `mode`.
///
/// Returns `None` for touches outside every region and for regions that are not
/// reachable in the current mode.
pub fn resolve(
    sample: &TouchSample,
    mode: PowerMode,
) -> Option<(ButtonId, ButtonAction)> {
    let point = sample.point();
    BUTTONS
        .iter()
        .filter(|region| region.rect.contains(point))
        .find_map(|region| region.action(mode).map(|action| (region.id, action)))
}

#[cfg(test)]
mod tests {
    use embedded_graphics::prelude::*;

    use super::*;

    fn touch(
        x: i32,
        y: i32,
    ) -> TouchSample {
        TouchSample::new(x, y, 1000)
    }

    #[test]
    fn test_table_order_matches_ids() {
        for id in ButtonId::ALL {
            assert_eq!(id.region().id, id);
        }
    }

    #[test]
    fn test_active_system_toggle() {
        assert_eq!(
            resolve(&touch(50, 275), PowerMode::Active),
            Some((ButtonId::System, ButtonAction::Toggle(ToggleId::System)))
        );
    }

    #[test]
    fn test_active_sleep() {
        assert_eq!(
            resolve(&touch(150, 275), PowerMode::Active),
            Some((ButtonId::Sleep, ButtonAction::Sleep))
        );
    }

    #[test]
    fn test_suspended_wake_uses_sleep_region() {
        assert_eq!(
            resolve(&touch(150, 275), PowerMode::Suspended),
            Some((ButtonId::Sleep, ButtonAction::Wake))
        );
    }

    #[test]
    fn test_suspended_system_unreachable() {
        assert_eq!(resolve(&touch(50, 275), PowerMode::Suspended), None);
    }

    #[test]
    fn test_outside_all_regions() {
        for (x, y) in [(0, 0), (120, 290), (239, 319), (50, 100), (-5, 275)] {
            assert_eq!(resolve(&touch(x, y), PowerMode::Active), None);
            assert_eq!(resolve(&touch(x, y), PowerMode::Suspended), None);
        }
    }

    #[test]
    fn test_edges_top_left_inclusive_bottom_right_exclusive() {
        let rect = SYSTEM_BUTTON;
        let top_left = rect.top_left;
        let past_end = top_left + Point::new(rect.size.width as i32, rect.size.height as i32);

        assert!(resolve(&touch(top_left.x, top_left.y), PowerMode::Active).is_some());
        assert!(resolve(&touch(past_end.x - 1, past_end.y - 1), PowerMode::Active).is_some());
        assert!(resolve(&touch(past_end.x, top_left.y), PowerMode::Active).is_none());
        assert!(resolve(&touch(top_left.x, past_end.y), PowerMode::Active).is_none());
    }
}
