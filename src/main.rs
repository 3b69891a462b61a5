use iced::widget::{button, column, container, image, row, text, text_input, Column};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageButtons, MessageDialog, MessageLevel};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod form;
mod media;
mod ui;

use config::Settings;
use form::upload::Rejection;
use form::{Field, FileInfo, FormController};
use media::thumbnail::{self, ThumbnailResult};
use ui::previews::Preview;

/// Main application state
struct FeedbackApp {
    /// `None` when the settings describe no form
    form: Option<FormController>,
    /// Finished thumbnail jobs keyed by selection entry id
    thumbnails: HashMap<u64, Preview>,
    /// Edge length of previews
    thumbnail_size: u32,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User typed into a text field
    Input(Field, String),
    /// Star clicked (1-indexed)
    StarClicked(u8),
    /// Pointer entered a star (1-indexed)
    StarEntered(u8),
    /// Pointer left the star row
    StarsLeft,
    /// User clicked "Add photos"
    PickFiles,
    /// Metadata of the picked files is ready
    FilesPicked(Vec<FileInfo>),
    /// A background thumbnail job finished
    ThumbnailLoaded(ThumbnailResult),
    /// Remove control of the preview at this index
    RemoveFile(usize),
    /// Submit button or Enter in a text field
    Submit,
}

impl FeedbackApp {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::load().unwrap_or_else(|e| {
            tracing::warn!("⚠️  {}; using default settings", e);
            Settings::default()
        });

        (Self::with_settings(settings), Task::none())
    }

    fn with_settings(settings: Settings) -> Self {
        let limits = settings.upload_limits();
        let form = FormController::attach(settings.form, limits);

        let status = if form.is_some() {
            String::new()
        } else {
            tracing::info!("No form configured, nothing to do");
            "There is no feedback form here.".to_string()
        };

        FeedbackApp {
            form,
            thumbnails: HashMap::new(),
            thumbnail_size: settings.thumbnail_size,
            status,
        }
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let Some(form) = self.form.as_mut() else {
            return Task::none();
        };

        match message {
            Message::Input(field, value) => {
                form.on_input(field, &value);
                Task::none()
            }
            Message::StarClicked(n) => {
                form.set_rating(n);
                Task::none()
            }
            Message::StarEntered(n) => {
                form.highlight_stars(n);
                Task::none()
            }
            Message::StarsLeft => {
                form.reset_highlight();
                Task::none()
            }
            Message::PickFiles => {
                // Filters mirror the input's accept list; validation enforces it
                let mut dialog = FileDialog::new()
                    .set_title("Select photos")
                    .add_filter("Images", &["jpg", "jpeg", "png"])
                    .add_filter("All files", &["*"]);
                if let Some(dir) = last_pick_dir(form) {
                    dialog = dialog.set_directory(dir);
                }
                let picked = dialog.pick_files();

                match picked {
                    Some(paths) if !paths.is_empty() => {
                        Task::perform(media::inspect::inspect_files(paths), Message::FilesPicked)
                    }
                    _ => Task::none(),
                }
            }
            Message::FilesPicked(files) => {
                let (added, rejected) = form.on_files_selected(files);

                for rejection in &rejected {
                    alert_rejected(rejection);
                }

                let size = self.thumbnail_size;
                Task::batch(added.into_iter().map(|file| {
                    Task::perform(
                        thumbnail::load_thumbnail(file.id, file.info.path, size),
                        Message::ThumbnailLoaded,
                    )
                }))
            }
            Message::ThumbnailLoaded(result) => {
                self.on_thumbnail(result);
                Task::none()
            }
            Message::RemoveFile(index) => {
                if let Some(removed) = form.remove_file_preview(index) {
                    self.thumbnails.remove(&removed.id);
                }
                Task::none()
            }
            Message::Submit => {
                if let Some(submission) = form.submit() {
                    match submission.to_json() {
                        Ok(json) => tracing::info!("✅ Feedback submitted: {}", json),
                        Err(e) => tracing::warn!("⚠️  Could not serialize submission: {}", e),
                    }
                    self.thumbnails.clear();
                    self.status.clear();
                } else {
                    self.status = "Please fix the highlighted fields.".to_string();
                }
                Task::none()
            }
        }
    }

    /// Store a finished thumbnail unless its file has since been removed
    fn on_thumbnail(&mut self, result: ThumbnailResult) {
        let Some(form) = self.form.as_ref() else {
            return;
        };

        if !form.files().contains(result.id) {
            tracing::debug!(id = result.id, "discarding thumbnail for removed file");
            return;
        }

        let preview = match result.thumbnail {
            Ok(thumb) => {
                Preview::Ready(image::Handle::from_rgba(thumb.width, thumb.height, thumb.pixels))
            }
            Err(e) => {
                tracing::warn!("⚠️  No preview for file {}: {}", result.id, e);
                Preview::Failed
            }
        };
        self.thumbnails.insert(result.id, preview);
    }

    /// Previews in selection order, one per selected file
    fn preview_entries(&self) -> Vec<ui::previews::PreviewEntry<'_>> {
        let Some(form) = self.form.as_ref() else {
            return Vec::new();
        };

        form.files()
            .files()
            .iter()
            .enumerate()
            .map(|(index, file)| (index, file, self.thumbnails.get(&file.id)))
            .collect()
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let body: Element<Message> = match &self.form {
            None => text(&self.status).size(16).into(),
            Some(form) if form.form_visible() => self.form_view(form),
            Some(_) => column![
                text("Thank you!").size(40),
                text("Your feedback has been sent.").size(16),
            ]
            .spacing(12)
            .align_x(Alignment::Center)
            .into(),
        };

        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    fn form_view<'a>(&'a self, form: &'a FormController) -> Element<'a, Message> {
        let layout = form.layout();
        let mut content: Column<Message> = column![text("Leave feedback").size(32)]
            .spacing(16)
            .padding(40)
            .max_width(560);

        for field in layout.text_fields() {
            let invalid = form.is_invalid(field);
            let input = text_input(field.placeholder(), form.value(field))
                .on_input(move |value| Message::Input(field, value))
                .on_submit(Message::Submit)
                .padding(8)
                .style(move |theme: &Theme, status| {
                    let mut style = text_input::default(theme, status);
                    if invalid {
                        style.border.color = theme.palette().danger;
                    }
                    style
                });

            content = content.push(labelled(form, field, input.into()));
        }

        if layout.rating {
            content = content.push(labelled(form, Field::Rating, ui::stars::view(form.rating())));
        }

        if layout.upload {
            let previews = ui::previews::view(
                self.preview_entries(),
                form.files().has_files(),
                form.limits().max_file_size,
                self.thumbnail_size,
            );
            content = content.push(labelled(form, Field::File, previews));
        }

        content = content.push(
            row![
                button("Send").on_press(Message::Submit).padding(10),
                text(&self.status).size(14),
            ]
            .spacing(16)
            .align_y(Alignment::Center),
        );

        content.into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Label, widget and the error line of a field
fn labelled<'a>(
    form: &FormController,
    field: Field,
    widget: Element<'a, Message>,
) -> Element<'a, Message> {
    let label = if form.layout().is_required(field) {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    };

    let mut block = column![text(label).size(14), widget].spacing(6);
    if let Some(reason) = form.error(field) {
        block = block.push(
            text(reason.message())
                .size(12)
                .style(|theme: &Theme| text::Style {
                    color: Some(theme.palette().danger),
                }),
        );
    }
    block.into()
}

/// Folder of the file the picker last reported; gone once the selection empties
fn last_pick_dir(form: &FormController) -> Option<PathBuf> {
    form.files()
        .retained_input()
        .first()
        .and_then(|path| path.parent())
        .map(Path::to_path_buf)
}

/// Blocking alert naming a rejected file
fn alert_rejected(rejection: &Rejection) {
    MessageDialog::new()
        .set_level(MessageLevel::Warning)
        .set_title("File rejected")
        .set_description(rejection.message())
        .set_buttons(MessageButtons::Ok)
        .show();
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feedback_form=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application("Feedback", FeedbackApp::update, FeedbackApp::view)
        .theme(FeedbackApp::theme)
        .centered()
        .run_with(FeedbackApp::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use media::thumbnail::Thumbnail;

    fn photo(name: &str) -> FileInfo {
        FileInfo {
            name: name.to_string(),
            path: PathBuf::from("/photos").join(name),
            media_type: "image/jpeg".to_string(),
            size: 2 * 1024 * 1024,
        }
    }

    fn loaded(id: u64) -> Message {
        Message::ThumbnailLoaded(ThumbnailResult {
            id,
            thumbnail: Ok(Thumbnail {
                width: 1,
                height: 1,
                pixels: vec![0, 0, 0, 255],
            }),
        })
    }

    fn failed(id: u64) -> Message {
        Message::ThumbnailLoaded(ThumbnailResult {
            id,
            thumbnail: Err("failed to decode /photos/a.jpg".to_string()),
        })
    }

    fn app() -> FeedbackApp {
        FeedbackApp::with_settings(Settings::default())
    }

    fn entry_names(app: &FeedbackApp) -> Vec<String> {
        app.preview_entries()
            .iter()
            .map(|(_, file, _)| file.info.name.clone())
            .collect()
    }

    #[test]
    fn test_no_form_configured() {
        let mut app = FeedbackApp::with_settings(Settings {
            form: None,
            ..Settings::default()
        });
        assert!(app.form.is_none());
        let _ = app.update(Message::Submit);
        assert!(app.preview_entries().is_empty());
    }

    #[test]
    fn test_previews_follow_selection() {
        let mut app = app();
        let _ = app.update(Message::FilesPicked(vec![photo("a.jpg"), photo("b.jpg"), photo("c.jpg")]));
        assert_eq!(entry_names(&app), vec!["a.jpg", "b.jpg", "c.jpg"]);

        // Completions arrive out of order; previews stay in selection order
        let _ = app.update(loaded(2));
        let _ = app.update(loaded(0));
        let entries = app.preview_entries();
        assert!(entries[0].2.is_some());
        assert!(entries[1].2.is_none());
        assert!(entries[2].2.is_some());

        let _ = app.update(Message::RemoveFile(1));
        assert_eq!(entry_names(&app), vec!["a.jpg", "c.jpg"]);
        let indices: Vec<usize> = app.preview_entries().iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 1]);
    }

    #[test]
    fn test_failed_thumbnail_differs_from_loading() {
        let mut app = app();
        let _ = app.update(Message::FilesPicked(vec![photo("a.jpg"), photo("b.jpg")]));
        let _ = app.update(failed(0));

        let entries = app.preview_entries();
        assert!(matches!(entries[0].2, Some(Preview::Failed)));
        assert!(entries[1].2.is_none());
    }

    #[test]
    fn test_picker_reopens_in_last_folder_until_cleared() {
        let mut app = app();
        let _ = app.update(Message::FilesPicked(vec![photo("a.jpg"), photo("b.jpg")]));
        assert_eq!(
            last_pick_dir(app.form.as_ref().unwrap()),
            Some(PathBuf::from("/photos"))
        );

        let _ = app.update(Message::RemoveFile(0));
        assert!(last_pick_dir(app.form.as_ref().unwrap()).is_some());

        let _ = app.update(Message::RemoveFile(0));
        assert!(last_pick_dir(app.form.as_ref().unwrap()).is_none());
    }

    #[test]
    fn test_stale_thumbnail_is_discarded() {
        let mut app = app();
        let _ = app.update(Message::FilesPicked(vec![photo("a.jpg")]));
        let _ = app.update(Message::RemoveFile(0));
        let _ = app.update(loaded(0));

        assert!(app.thumbnails.is_empty());
        assert!(app.preview_entries().is_empty());
        assert!(!app.form.as_ref().unwrap().files().has_files());
    }

    #[test]
    fn test_submit_flow() {
        let mut app = app();
        let _ = app.update(Message::Submit);
        assert!(!app.status.is_empty());
        assert!(!app.form.as_ref().unwrap().thank_you_visible());

        let _ = app.update(Message::Input(Field::Name, "Ivanov".to_string()));
        let _ = app.update(Message::Input(Field::Phone, "89123456789".to_string()));
        let _ = app.update(Message::StarEntered(5));
        let _ = app.update(Message::StarClicked(4));
        let _ = app.update(Message::StarsLeft);
        let _ = app.update(Message::FilesPicked(vec![photo("a.jpg")]));
        let _ = app.update(loaded(0));
        let _ = app.update(Message::Submit);

        let form = app.form.as_ref().unwrap();
        assert!(form.thank_you_visible());
        assert!(!form.form_visible());
        assert!(!form.rating().is_set());
        assert!(app.thumbnails.is_empty());
        assert!(app.status.is_empty());
    }
}
