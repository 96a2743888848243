use iced::widget::image::Image;
use iced::widget::{button, column, container, horizontal_space, row, scrollable, text, Column};
use iced::{window, Alignment, Element, Length, Size, Subscription, Task, Theme};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod photo;
mod reminder;
mod state;

use config::AppConfig;
use photo::capture;
use photo::display::{decode_for_viewport, DisplayImage};
use reminder::Reminder;
use state::session::Session;
use state::store::ListStore;

const WINDOW_WIDTH: f32 = 480.0;
const WINDOW_HEIGHT: f32 = 800.0;

/// The photo currently shown full-screen
#[derive(Debug)]
struct Viewer {
    /// Position of the record in the session list
    index: usize,
    timestamp: String,
    image: Option<DisplayImage>,
    error: Option<String>,
}

/// Main application state
struct DailySelfie {
    /// The selfie list for this run
    session: Session,
    config: AppConfig,
    reminder: Reminder,
    /// Some while a photo is open full-screen
    viewer: Option<Viewer>,
    /// Last known window size, used to scale photos for the viewer
    viewport: Size,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked "Take Selfie"
    TakeSelfie,
    /// User clicked a row in the list
    SelectSelfie(usize),
    /// Background decode for the viewer finished
    PhotoDecoded(usize, Result<DisplayImage, String>),
    /// Leave the viewer
    BackToList,
    /// The reminder timer went off
    ReminderFired,
    DismissReminder,
    WindowResized(Size),
    /// The window is about to close: save and exit
    CloseRequested,
}

impl DailySelfie {
    /// Create a new instance of the application and load saved selfies
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();

        let store = ListStore::new(
            &config.data_dir,
            &config.list_file_name,
            config.thumbnail_size,
        );
        let mut session = Session::new(store);
        session.start();

        let reminder = Reminder::new(config.reminder_interval());

        info!("🤳 Daily Selfie initialized with {} selfies", session.len());
        let status = format!("{} selfies.", session.len());

        (
            DailySelfie {
                session,
                config,
                reminder,
                viewer: None,
                viewport: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
                status,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::TakeSelfie => {
                let Some(source) = capture::pick_photo() else {
                    info!("Capture cancelled");
                    self.status = "No selfie taken.".to_string();
                    return Task::none();
                };

                match capture::import_photo(&source, &self.config.pictures_dir) {
                    Ok(path) => {
                        self.reminder.dismiss();
                        let record = self.session.record_capture(&path);
                        self.status = format!("✅ Selfie taken at {}.", record.timestamp());
                    }
                    Err(e) => {
                        error!("Capture failed: {}", e);
                        self.status = format!("Could not take selfie: {}", e);
                    }
                }

                Task::none()
            }
            Message::SelectSelfie(index) => {
                let Some(record) = self.session.get(index) else {
                    return Task::none();
                };

                info!("Showing selfie {}", record.file_path());
                let path = PathBuf::from(record.file_path());
                self.viewer = Some(Viewer {
                    index,
                    timestamp: record.timestamp().to_string(),
                    image: None,
                    error: None,
                });

                Task::perform(
                    decode_for_viewport(
                        path,
                        self.viewport.width as u32,
                        self.viewport.height as u32,
                    ),
                    move |result| Message::PhotoDecoded(index, result),
                )
            }
            Message::PhotoDecoded(index, result) => {
                // Ignore decodes for a photo the user already left
                if let Some(viewer) = self.viewer.as_mut().filter(|v| v.index == index) {
                    match result {
                        Ok(image) => viewer.image = Some(image),
                        Err(e) => {
                            error!("{}", e);
                            viewer.error = Some(e);
                        }
                    }
                }
                Task::none()
            }
            Message::BackToList => {
                // Drops the decoded photo
                self.viewer = None;
                Task::none()
            }
            Message::ReminderFired => {
                self.reminder.fire();
                Task::none()
            }
            Message::DismissReminder => {
                self.reminder.dismiss();
                Task::none()
            }
            Message::WindowResized(size) => {
                self.viewport = size;
                Task::none()
            }
            Message::CloseRequested => {
                self.session.end();
                iced::exit()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        match &self.viewer {
            Some(viewer) => self.view_photo(viewer),
            None => self.view_list(),
        }
    }

    fn view_list(&self) -> Element<Message> {
        let header = row![
            text("Daily Selfie").size(32),
            horizontal_space(),
            button("Take Selfie")
                .on_press(Message::TakeSelfie)
                .padding(10),
        ]
        .spacing(20)
        .align_y(Alignment::Center);

        let banner = self.reminder.is_pending().then(|| {
            row![
                text(format!("⏰ Time for a new selfie! (#{})", self.reminder.fired())).size(16),
                horizontal_space(),
                button("Dismiss").on_press(Message::DismissReminder),
            ]
            .spacing(10)
            .align_y(Alignment::Center)
        });

        let size = Length::Fixed(self.config.thumbnail_size as f32);
        let rows = self
            .session
            .records()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let preview: Element<Message> = match record.thumbnail() {
                    Some(thumbnail) => Image::new(thumbnail.handle.clone())
                        .width(size)
                        .height(size)
                        .into(),
                    None => container(text("no photo").size(12))
                        .width(size)
                        .height(size)
                        .center_x(size)
                        .center_y(size)
                        .into(),
                };

                let item: Element<Message> = button(
                    row![preview, text(record.timestamp()).size(18)]
                        .spacing(16)
                        .align_y(Alignment::Center),
                )
                .on_press(Message::SelectSelfie(index))
                .width(Length::Fill)
                .style(button::secondary)
                .into();
                item
            });

        let list = scrollable(Column::with_children(rows).spacing(8)).height(Length::Fill);

        Column::new()
            .push(header)
            .push_maybe(banner)
            .push(list)
            .push(text(&self.status).size(14))
            .spacing(16)
            .padding(20)
            .into()
    }

    fn view_photo<'a>(&'a self, viewer: &'a Viewer) -> Element<'a, Message> {
        let body: Element<Message> = match (&viewer.image, &viewer.error) {
            (Some(shown), _) => Image::new(shown.handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .into(),
            (None, Some(e)) => text(e).size(16).into(),
            (None, None) => text("Loading...").size(16).into(),
        };

        column![
            row![
                button("Back").on_press(Message::BackToList).padding(10),
                text(&viewer.timestamp).size(18),
                horizontal_space(),
                text(viewer.image.as_ref().map_or_else(String::new, |shown| format!(
                    "{}x{} (1/{})",
                    shown.width, shown.height, shown.scale_factor
                )))
                .size(12),
            ]
            .spacing(20)
            .align_y(Alignment::Center),
            container(body)
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill),
        ]
        .spacing(12)
        .padding(20)
        .into()
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            self.reminder.subscription().map(|_| Message::ReminderFired),
            window::close_requests().map(|_| Message::CloseRequested),
            window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    // RUST_LOG overrides the default level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    iced::application("Daily Selfie", DailySelfie::update, DailySelfie::view)
        .subscription(DailySelfie::subscription)
        .theme(DailySelfie::theme)
        .window_size(Size::new(WINDOW_WIDTH, WINDOW_HEIGHT))
        .exit_on_close_request(false)
        .centered()
        .run_with(DailySelfie::new)
}
