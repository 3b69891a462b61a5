/// Star rating row
use iced::widget::{mouse_area, text, Row};
use iced::{Color, Element};

use crate::form::rating::Rating;
use crate::Message;

const ACTIVE: Color = Color::from_rgb(0.98, 0.75, 0.15);
const HOVER: Color = Color::from_rgb(1.0, 0.85, 0.45);
const IDLE: Color = Color::from_rgb(0.45, 0.45, 0.5);

/// Five stars; clicking commits, hovering previews, leaving the row restores
pub fn view<'a>(rating: &Rating) -> Element<'a, Message> {
    let stars = rating.stars().enumerate().map(|(i, star)| -> Element<'a, Message> {
        let index = i as u8 + 1;
        let color = if star.hover {
            HOVER
        } else if star.active {
            ACTIVE
        } else {
            IDLE
        };

        mouse_area(text("★").size(32).color(color))
            .on_press(Message::StarClicked(index))
            .on_enter(Message::StarEntered(index))
            .into()
    });

    mouse_area(Row::with_children(stars).spacing(4))
        .on_exit(Message::StarsLeft)
        .into()
}
