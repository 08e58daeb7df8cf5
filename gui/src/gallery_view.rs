use engine::GeneratedImage;
use iced::{
    Element, Length,
    alignment::Vertical,
    widget::{self, button, column, container, row, space, text},
};

use crate::{
    context::Context,
    message::{GalleryAction, Message},
};

const COLUMNS: usize = 2;

pub fn grid<'a>(images: &'a [GeneratedImage], ctx: &'a Context) -> Element<'a, Message> {
    column(images.chunks(COLUMNS).map(|chunk| {
        let mut cards: Vec<Element<'a, Message>> =
            chunk.iter().map(|image| card(image, ctx)).collect();
        // keep a lone last card at half width
        cards.extend((chunk.len()..COLUMNS).map(|_| space().width(Length::FillPortion(1)).into()));
        row(cards).spacing(20).into()
    }))
    .spacing(20)
    .into()
}

fn card<'a>(image: &'a GeneratedImage, ctx: &'a Context) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match ctx.handle(image.id) {
        Some(handle) => widget::image(handle).width(Length::Fill).into(),
        None => container(text("Loading image..."))
            .center_x(Length::Fill)
            .height(200)
            .into(),
    };

    container(
        column![
            picture,
            text(&image.prompt),
            row![
                text(image.aspect_ratio.as_str()).size(12),
                space::horizontal(),
                button("Delete").on_press(Message::from(GalleryAction::Delete(image.id))),
                button("Download").on_press(Message::from(GalleryAction::Download(image.id))),
            ]
            .spacing(10)
            .align_y(Vertical::Center),
        ]
        .spacing(10),
    )
    .padding(10)
    .width(Length::FillPortion(1))
    .style(container::rounded_box)
    .into()
}
