/// Photo upload area with its preview grid
use iced::widget::{button, column, container, image, text, Column};
use iced::{Alignment, Border, Element, Length, Theme};
use iced_aw::Wrap;

use crate::form::upload::SelectedFile;
use crate::Message;

const MIB: u64 = 1024 * 1024;
const KIB: u64 = 1024;

/// Outcome of a thumbnail job
#[derive(Debug, Clone)]
pub enum Preview {
    Ready(image::Handle),
    /// The file could not be read or decoded
    Failed,
}

/// One rendered preview: position in the selection, the file, its thumbnail state
/// (`None` while still loading)
pub type PreviewEntry<'a> = (usize, &'a SelectedFile, Option<&'a Preview>);

/// Human-readable size cap for the upload hint
pub fn size_label(bytes: u64) -> String {
    if bytes >= MIB {
        format!("{} MB", bytes / MIB)
    } else if bytes >= KIB {
        format!("{} KB", bytes / KIB)
    } else {
        format!("{} bytes", bytes)
    }
}

fn placeholder<'a>(marker: &'a str, edge: Length) -> Element<'a, Message> {
    container(text(marker).size(24))
        .width(edge)
        .height(edge)
        .center_x(edge)
        .center_y(edge)
        .into()
}

/// Upload wrapper; highlighted while it holds files
pub fn view<'a>(
    entries: Vec<PreviewEntry<'a>>,
    has_files: bool,
    max_file_size: u64,
    size: u32,
) -> Element<'a, Message> {
    let edge = Length::Fixed(size as f32);

    let cards: Vec<Element<'a, Message>> = entries
        .into_iter()
        .map(|(index, file, preview)| {
            let picture: Element<'a, Message> = match preview {
                Some(Preview::Ready(handle)) => image(handle.clone()).width(edge).height(edge).into(),
                Some(Preview::Failed) => placeholder("!", edge),
                None => placeholder("…", edge),
            };

            column![
                picture,
                text(&file.info.name).size(12),
                button(text("×")).on_press(Message::RemoveFile(index)).padding([2, 8]),
            ]
            .spacing(4)
            .align_x(Alignment::Center)
            .into()
        })
        .collect();

    let content: Column<Message> = column![
        button("Add photos").on_press(Message::PickFiles).padding(8),
        text(format!("JPEG or PNG, up to {} each", size_label(max_file_size))).size(12),
        Wrap::with_elements(cards).spacing(8.0).line_spacing(8.0),
    ]
    .spacing(8);

    container(content)
        .padding(12)
        .width(Length::Fill)
        .style(move |theme: &Theme| {
            let palette = theme.extended_palette();
            let color = if has_files {
                palette.primary.strong.color
            } else {
                palette.background.strong.color
            };
            container::Style {
                border: Border {
                    color,
                    width: 1.0,
                    radius: 6.0.into(),
                },
                ..container::Style::default()
            }
        })
        .into()
}
