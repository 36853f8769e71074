//! embedded-graphics implementation of [`PanelDisplay`].
//!
//! [`GraphicsPanel`] wraps any `DrawTarget<Color = Rgb565>` and draws the panel's
//! single screen with the [`widgets`](crate::widgets). If the wrapped target also
//! speaks the panel sleep/wake commands, so does the wrapper, which lets the power
//! controller and the drawing code share one display value.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};

use crate::{
    colors::BLACK,
    power::PanelCommands,
    refresh::{PanelDisplay, PanelView, StatusSlot},
    touch::ButtonId,
    widgets,
};

/// Panel drawing on top of an embedded-graphics target.
pub struct GraphicsPanel<D> {
    target: D,
}

impl<D> GraphicsPanel<D> {
    pub const fn new(target: D) -> Self { Self { target } }

    /// Borrow the wrapped target (e.g. to hand a simulator framebuffer to a window).
    #[inline]
    pub const fn target(&self) -> &D { &self.target }

    #[inline]
    pub fn target_mut(&mut self) -> &mut D { &mut self.target }

    pub fn into_inner(self) -> D { self.target }
}

impl<D: DrawTarget<Color = Rgb565>> PanelDisplay for GraphicsPanel<D> {
    fn draw_full_layout(
        &mut self,
        view: &PanelView,
    ) {
        self.target.clear(BLACK).ok();

        widgets::draw_header(&mut self.target, &view.status_text(StatusSlot::System));
        widgets::draw_temp_card(&mut self.target, 0, &view.status_text(StatusSlot::Sensor0));
        widgets::draw_temp_card(&mut self.target, 1, &view.status_text(StatusSlot::Sensor1));
        widgets::draw_relay_line(&mut self.target, &view.status_text(StatusSlot::Relays));

        for button in ButtonId::ALL {
            widgets::draw_button(&mut self.target, button, view.button_on(button));
        }
    }

    fn draw_button(
        &mut self,
        button: ButtonId,
        on: bool,
    ) {
        widgets::draw_button(&mut self.target, button, on);
    }

    fn draw_status_text(
        &mut self,
        slot: StatusSlot,
        text: &str,
    ) {
        match slot {
            StatusSlot::System => widgets::draw_header_status(&mut self.target, text),
            StatusSlot::Sensor0 => widgets::draw_temp_value(&mut self.target, 0, text),
            StatusSlot::Sensor1 => widgets::draw_temp_value(&mut self.target, 1, text),
            StatusSlot::Relays => widgets::draw_relay_text(&mut self.target, text),
        }
    }
}

impl<D: PanelCommands> PanelCommands for GraphicsPanel<D> {
    fn sleep_panel(&mut self) { self.target.sleep_panel(); }

    fn wake_panel(&mut self) { self.target.wake_panel(); }
}

#[cfg(test)]
mod tests {
    use embedded_graphics_simulator::SimulatorDisplay;

    use super::*;
    use crate::colors::{GREEN, NAVY, RED};
    use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH, SYSTEM_BUTTON, TEMP_CARDS};
    use crate::sensors::DISCONNECTED_C;
    use crate::widgets::cards::value_area;

    fn panel() -> GraphicsPanel<SimulatorDisplay<Rgb565>> {
        GraphicsPanel::new(SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)))
    }

    /// Point inside a button's fill, clear of the outline and the label.
    fn button_fill_point() -> Point { SYSTEM_BUTTON.top_left + Point::new(6, SYSTEM_BUTTON.size.height as i32 / 2) }

    fn count_color(
        display: &SimulatorDisplay<Rgb565>,
        area: &embedded_graphics::primitives::Rectangle,
        color: Rgb565,
    ) -> usize {
        area.points().filter(|&p| display.get_pixel(p) == color).count()
    }

    #[test]
    fn test_full_layout_draws_header() {
        let mut panel = panel();
        panel.draw_full_layout(&PanelView::default());
        assert_eq!(panel.target().get_pixel(Point::new(1, 1)), NAVY);
    }

    #[test]
    fn test_button_fill_follows_state() {
        let mut panel = panel();
        panel.draw_button(ButtonId::System, true);
        assert_eq!(panel.target().get_pixel(button_fill_point()), GREEN);

        panel.draw_button(ButtonId::System, false);
        assert_eq!(panel.target().get_pixel(button_fill_point()), BLACK);
    }

    #[test]
    fn test_full_layout_shows_system_on() {
        let mut panel = panel();
        let view = PanelView {
            system_enabled: true,
            ..PanelView::default()
        };
        panel.draw_full_layout(&view);
        assert_eq!(panel.target().get_pixel(button_fill_point()), GREEN);
    }

    #[test]
    fn test_disconnected_reading_drawn_red() {
        let mut panel = panel();
        let view = PanelView {
            readings: [21.0, DISCONNECTED_C],
            ..PanelView::default()
        };
        panel.draw_full_layout(&view);

        assert_eq!(count_color(panel.target(), &value_area(0), RED), 0);
        assert!(count_color(panel.target(), &value_area(1), RED) > 0);
    }

    #[test]
    fn test_status_text_stays_inside_card() {
        let mut panel = panel();
        panel.draw_status_text(StatusSlot::Sensor0, "-10.5 C");

        // Nothing outside the first card was touched
        let outside = TEMP_CARDS[1];
        assert_eq!(count_color(panel.target(), &outside, BLACK), outside.size.width as usize * outside.size.height as usize);
    }
}
