use iced::widget::{
    button, column, container, progress_bar, row, scrollable, text, text_input, Column, Row,
};
use iced::{theme, Element, Length, Subscription, Theme};
use moodscope_core::view::{CommentRow, FilterOption};
use moodscope_core::{CoreError, DashboardView, NoticeKind, Section, Selector, UserAction};
use scrape_runner::RuntimeHandle;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum Message {
    Action(UserAction),
    ViewUpdated(DashboardView),
}

/// Thin iced front end: forwards actions to the runtime and draws the last
/// view it published.
pub struct App {
    handle: RuntimeHandle,
    view: DashboardView,
}

impl App {
    pub fn new(handle: RuntimeHandle) -> Self {
        let view = handle.view();
        Self { handle, view }
    }

    pub fn current_view(&self) -> &DashboardView {
        &self.view
    }

    pub fn handle(&self) -> &RuntimeHandle {
        &self.handle
    }

    pub fn update(&mut self, message: Message) -> Result<(), CoreError> {
        match message {
            Message::Action(action) => self.handle.send(action),
            Message::ViewUpdated(view) => {
                self.view = view;
                Ok(())
            }
        }
    }

    /// Yields a message for every view the runtime publishes.
    pub fn subscription(&self) -> Subscription<Message> {
        struct ViewUpdates;

        iced::subscription::unfold(
            std::any::TypeId::of::<ViewUpdates>(),
            self.handle.subscribe(),
            |mut views| async move {
                if views.changed().await.is_err() {
                    debug!("View channel closed");
                    std::future::pending::<()>().await;
                }
                let view = views.borrow_and_update().clone();
                (Message::ViewUpdated(view), views)
            },
        )
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let sidebar = Section::ALL.iter().fold(
            Column::new()
                .spacing(8)
                .push(text("Moodscope").size(24)),
            |sidebar, section| {
                let active = self
                    .view
                    .sections
                    .iter()
                    .any(|(s, active)| s == section && *active);
                sidebar.push(
                    button(text(section.label()))
                        .width(Length::Fill)
                        .style(button_style(active))
                        .on_press(Message::Action(UserAction::SelectSection(*section))),
                )
            },
        );

        let mut main = Column::new().spacing(16);
        if let Some(notice) = &self.view.notice {
            main = main.push(self.notice_banner(notice.kind, &notice.message));
        }
        main = main
            .push(self.scrape_controls())
            .push(self.filters())
            .push(self.table());

        let layout: Element<Message, Theme> = row![
            container(sidebar).width(Length::Fixed(200.0)).padding(10),
            container(main).width(Length::Fill).padding(10)
        ]
        .spacing(20)
        .into();

        container(layout)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }

    fn notice_banner<'a>(&self, kind: NoticeKind, message: &'a str) -> Element<'a, Message, Theme> {
        let title = match kind {
            NoticeKind::Validation => "Missing input",
            NoticeKind::ScrapeFailed => "Scrape failed",
        };
        row![
            column![text(title).size(16), text(message).size(14)].width(Length::Fill),
            button("Dismiss").on_press(Message::Action(UserAction::DismissNotice))
        ]
        .spacing(10)
        .padding(10)
        .into()
    }

    fn scrape_controls(&self) -> Element<Message, Theme> {
        let view = &self.view;

        let inputs = row![
            text_input("Subreddits (comma separated)", &view.subreddits_input)
                .on_input(|value| Message::Action(UserAction::SubredditsInput(value)))
                .width(Length::FillPortion(3)),
            text_input("Number of posts", &view.posts_input)
                .on_input(|value| Message::Action(UserAction::PostsInput(value)))
                .width(Length::FillPortion(1)),
        ]
        .spacing(10);

        let mut run = button(text(view.run_button.label)).style(theme::Button::Primary);
        if view.run_button.enabled {
            run = run.on_press(Message::Action(UserAction::Run));
        }
        let actions = row![
            run,
            button("Clear")
                .style(theme::Button::Secondary)
                .on_press(Message::Action(UserAction::Clear)),
            button(text(view.previous_data_label))
                .style(theme::Button::Secondary)
                .on_press(Message::Action(UserAction::UsePreviousData)),
            text(&view.estimated_time).size(14),
        ]
        .spacing(10);

        let mut controls = column![inputs, actions].spacing(10);
        if let Some(percent) = view.progress {
            controls = controls
                .push(progress_bar(0.0..=100.0, percent as f32).height(Length::Fixed(12.0)));
        }
        controls.into()
    }

    fn filters(&self) -> Element<Message, Theme> {
        let view = &self.view;
        let enabled = view.filters_enabled;

        column![
            filter_group(
                "Subreddit",
                &view.subreddit_options,
                enabled,
                UserAction::SelectSubreddit
            ),
            filter_group(
                "Emotion",
                &view.emotion_options,
                enabled,
                UserAction::SelectEmotion
            ),
            filter_group("Niche", &view.niche_options, enabled, UserAction::SelectNiche),
        ]
        .spacing(8)
        .into()
    }

    fn table(&self) -> Element<Message, Theme> {
        let view = &self.view;
        let summary = text(format!(
            "Showing {} of {} comments",
            view.visible_count, view.total_count
        ))
        .size(14);

        let body: Element<Message, Theme> = match view.empty_message {
            Some(message) => text(message).size(16).into(),
            None => view
                .rows
                .iter()
                .fold(Column::new().spacing(6), |table, comment| {
                    table.push(comment_row(comment))
                })
                .into(),
        };

        column![summary, scrollable(body).height(Length::Fill)]
            .spacing(10)
            .into()
    }
}

fn button_style(active: bool) -> theme::Button {
    if active {
        theme::Button::Primary
    } else {
        theme::Button::Secondary
    }
}

fn filter_group<'a>(
    title: &'a str,
    options: &'a [FilterOption],
    enabled: bool,
    select: fn(Selector) -> UserAction,
) -> Element<'a, Message, Theme> {
    let buttons = options.iter().fold(Row::new().spacing(6), |group, option| {
        let mut choice = button(text(&option.label).size(13)).style(button_style(option.active));
        if enabled {
            choice = choice.on_press(Message::Action(select(option.selector.clone())));
        }
        group.push(choice)
    });

    let buttons = scrollable(buttons).direction(scrollable::Direction::Horizontal(
        scrollable::Properties::default(),
    ));

    row![text(title).size(14).width(Length::Fixed(90.0)), buttons]
        .spacing(10)
        .into()
}

fn comment_row(comment: &CommentRow) -> Element<Message, Theme> {
    container(
        column![
            row![
                text(&comment.author).size(13).width(Length::FillPortion(2)),
                text(&comment.subreddit).size(13).width(Length::FillPortion(2)),
                text(format!("▲ {}", comment.votes)).size(13).width(Length::FillPortion(1)),
                text(&comment.emotion).size(13).width(Length::FillPortion(2)),
                text(&comment.timestamp).size(12).width(Length::FillPortion(3)),
            ]
            .spacing(8),
            text(&comment.comment).size(15),
        ]
        .spacing(4),
    )
    .padding(10)
    .into()
}
