use std::path::PathBuf;

use color_eyre::{Result, eyre::eyre};
use engine::{APP_NAME, Studio, config::Config, generation::save_image};
use iced::{
    Element, Font, Length, Task, Theme,
    alignment::Horizontal,
    font, keyboard, padding,
    widget::{
        self, button, column, container, radio, row, scrollable, space, text,
        text_editor::{self, Binding, KeyPress},
    },
};
use log::{error, info};
use strum::IntoEnumIterator;

use crate::{
    cli::Cli,
    context::Context,
    message::{Controls, GalleryAction, Message},
};

pub mod cli;
pub mod context;
pub mod gallery_view;
pub mod message;

const PROMPT_PLACEHOLDER: &str =
    "A futuristic city floating in the clouds, cyberpunk style, cinematic lighting...";

pub struct Gui {
    studio: Studio,
    ctx: Context,
    prompt_content: text_editor::Content,
    notice: Option<Notice>,
}

/// One-line feedback about things outside the generation flow, like downloads.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Notice {
    Info(String),
    Error(String),
}

impl Gui {
    pub fn new(config: Config) -> Self {
        Gui {
            studio: Studio::new(),
            ctx: Context::from_config(config),
            prompt_content: text_editor::Content::new(),
            notice: None,
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match self.try_update(message) {
            Ok(task) => task,
            Err(e) => {
                error!("{e:?}");
                self.notice = Some(Notice::Error(e.to_string()));
                Task::none()
            }
        }
    }

    fn try_update(&mut self, message: Message) -> Result<Task<Message>> {
        match message {
            Message::Controls(controls) => Ok(self.update_controls(controls)),
            Message::Gallery(GalleryAction::Delete(id)) => {
                self.studio.delete(id);
                self.ctx.forget(id);
                Ok(Task::none())
            }
            Message::Gallery(GalleryAction::Download(id)) => {
                let image = self
                    .studio
                    .gallery()
                    .get(id)
                    .ok_or(eyre!("No image with id {id}"))?;
                let path = save_image(image, &download_dir())?;
                self.notice = Some(Notice::Info(format!("Saved to {}", path.display())));
                Ok(Task::none())
            }
            Message::GenerationFinished(result) => {
                // stray results never reach the gallery
                if self.studio.is_in_flight() {
                    if let Ok(image) = &result {
                        self.ctx.cache_handle(image);
                    }
                }
                self.studio.finish(result);
                Ok(Task::none())
            }
        }
    }

    fn update_controls(&mut self, controls: Controls) -> Task<Message> {
        match controls {
            Controls::EditPrompt(action) => {
                self.prompt_content.perform(action);
                self.studio.set_prompt(self.prompt_content.text());
                Task::none()
            }
            Controls::SelectRatio(ratio) => {
                self.studio.set_aspect_ratio(ratio);
                Task::none()
            }
            Controls::Submit => {
                let Some(request) = self.studio.begin_submit() else {
                    return Task::none();
                };
                info!("Submitting {:?} ({})", request.prompt, request.aspect_ratio);
                self.notice = None;
                let client = self.ctx.client.clone();
                Task::perform(
                    async move { client.run(request).await },
                    Message::GenerationFinished,
                )
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let in_flight = self.studio.is_in_flight();

        let mut editor = widget::text_editor(&self.prompt_content)
            .placeholder(PROMPT_PLACEHOLDER)
            .height(80)
            .key_binding(submit_on_enter);
        if !in_flight {
            editor = editor.on_action(|a| Controls::EditPrompt(a).into());
        }

        let ratios = row(engine::AspectRatio::iter().map(|ratio| {
            radio(
                ratio.label(),
                ratio,
                Some(self.studio.aspect_ratio()),
                |r| Controls::SelectRatio(r).into(),
            )
            .into()
        }))
        .spacing(15);

        let generate = button(if in_flight { "Dreaming..." } else { "Generate" })
            .on_press_maybe(
                self.studio
                    .can_submit()
                    .then(|| Message::from(Controls::Submit)),
            );

        let mut items: Vec<Element<Message>> = vec![
            bold_text(APP_NAME).size(32).width(Length::Fill).center().into(),
            text!(
                "Powered by {}. Describe what you want to see, pick a shape, and watch the magic happen.",
                self.ctx.config.model
            )
            .width(Length::Fill)
            .center()
            .into(),
            space().height(20).into(),
            editor.into(),
            row![ratios, space::horizontal(), generate]
                .spacing(10)
                .into(),
        ];

        if let Some(err) = self.studio.error() {
            items.push(text(err).style(text::danger).into());
        }
        match &self.notice {
            Some(Notice::Info(msg)) => items.push(italic_text(msg).into()),
            Some(Notice::Error(msg)) => items.push(text(msg).style(text::danger).into()),
            None => {}
        }

        let gallery = self.studio.gallery();
        if gallery.is_empty() && !in_flight && self.studio.error().is_none() {
            items.push(space().height(40).into());
            items.push(
                text("No images generated yet. Start dreaming above!")
                    .width(Length::Fill)
                    .align_x(Horizontal::Center)
                    .into(),
            );
        } else {
            items.push(space().height(20).into());
            items.push(gallery_view::grid(gallery.list(), &self.ctx));
        }

        top_level_container(column(items).spacing(12).width(Length::Fill)).into()
    }

    pub fn theme(&self) -> Theme {
        Theme::TokyoNight
    }
}

/// Enter submits, Shift+Enter keeps inserting a newline.
fn submit_on_enter(key_press: KeyPress) -> Option<Binding<Message>> {
    match key_press.key {
        keyboard::Key::Named(keyboard::key::Named::Enter) if !key_press.modifiers.shift() => {
            Some(Binding::Custom(Controls::Submit.into()))
        }
        _ => Binding::from_key_press(key_press),
    }
}

/// Config file, then environment, then command line.
pub fn load_config(cli: Cli) -> Result<Config> {
    let mut cfg = Config::load()?.with_credential(cli.api_key);
    if let Some(model) = cli.model {
        cfg.model = model;
    }
    Ok(cfg)
}

pub fn download_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn italic_text(t: &str) -> iced::widget::Text<'_> {
    iced::widget::text(t).font(Font {
        style: font::Style::Italic,
        ..Font::DEFAULT
    })
}

fn bold_text<'a>(t: impl text::IntoFragment<'a>) -> iced::widget::Text<'a> {
    iced::widget::text(t).font(Font {
        weight: font::Weight::Bold,
        ..Font::DEFAULT
    })
}

fn top_level_container<'a, T: Send + 'static>(
    elem: impl Into<Element<'a, T>>,
) -> container::Container<'a, T> {
    container(
        container(scrollable(
            container(elem).padding(padding::all(10).right(20)),
        ))
        .padding(20)
        .max_width(900),
    )
    .center(Length::Fill)
}
