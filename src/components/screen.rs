use artbox::{
    fonts, integrations::ratatui::ArtBox, Alignment as ArtAlignment, Color as ArtColor, Fill,
    LinearGradient, Renderer,
};
use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tui_dispatch::EventKind;
use tui_dispatch_components::{
    StatusBar, StatusBarHint, StatusBarProps, StatusBarSection, StatusBarStyle,
};

use super::{Component, SearchBar, SearchBarProps, WeatherCard, WeatherCardProps};
use crate::action::Action;
use crate::state::AppState;

/// Root component: title, search bar, status line, weather card, key hints.
/// Mirrors the page column of the app this replaces.
pub struct WeatherScreen {
    search: SearchBar,
    card: WeatherCard,
}

/// Props for WeatherScreen - read-only view of state
pub struct WeatherScreenProps<'a> {
    pub state: &'a AppState,
    pub is_focused: bool,
}

impl Default for WeatherScreen {
    fn default() -> Self {
        Self {
            search: SearchBar::new(),
            card: WeatherCard,
        }
    }
}

impl WeatherScreen {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Title gradient follows the current temperature, gray before the first
/// reading arrives.
fn title_gradient(temperature: Option<f64>) -> Fill {
    let (start, end) = match temperature {
        Some(t) if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        Some(t) if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        Some(t) if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        Some(t) if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        Some(_) => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
        None => (ArtColor::rgb(180, 180, 180), ArtColor::rgb(220, 220, 220)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

fn status_line(state: &AppState) -> Option<Line<'static>> {
    if state.loading {
        return Some(
            Line::from(vec![
                Span::styled(state.spinner_frame(), Style::default().fg(Color::Cyan)),
                Span::styled(" Cargando...", Style::default().fg(Color::Cyan)),
            ])
            .centered(),
        );
    }
    state.error.as_ref().map(|message| {
        Line::from(Span::styled(
            message.clone(),
            Style::default().fg(Color::Red),
        ))
        .centered()
    })
}

impl Component<Action> for WeatherScreen {
    type Props<'a> = WeatherScreenProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        if !props.is_focused {
            return Vec::new();
        }

        if let EventKind::Key(key) = event {
            if key.code == KeyCode::Esc {
                return vec![Action::Quit];
            }
        }

        // Everything else belongs to the search bar.
        let search_props = SearchBarProps {
            query: &props.state.query,
            is_focused: true,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        };
        self.search
            .handle_event(event, search_props)
            .into_iter()
            .collect()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let state = props.state;
        let chunks = Layout::vertical([
            Constraint::Length(5), // title (FIGlet)
            Constraint::Length(3), // search bar
            Constraint::Length(1), // status line: spinner or error
            Constraint::Min(5),    // weather card
            Constraint::Length(1), // key hints
        ])
        .split(area);

        let temperature = state.reading.as_ref().map(|r| r.temperature_c);
        let renderer = Renderer::new(fonts::stack(&["terminus", "miniwi"]))
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(title_gradient(temperature));
        frame.render_widget(ArtBox::new(&renderer, &state.title), chunks[0]);

        let search_props = SearchBarProps {
            query: &state.query,
            is_focused: props.is_focused,
            on_change: Action::SearchQueryChange,
            on_submit: Action::SearchSubmit,
        };
        self.search.render(frame, chunks[1], search_props);

        if let Some(line) = status_line(state) {
            frame.render_widget(Paragraph::new(line), chunks[2]);
        }

        self.card.render(
            frame,
            chunks[3],
            WeatherCardProps {
                reading: state.reading.as_ref(),
            },
        );

        let mut status_bar = StatusBar::new();
        <StatusBar as Component<Action>>::render(
            &mut status_bar,
            frame,
            chunks[4],
            StatusBarProps {
                left: StatusBarSection::empty(),
                center: StatusBarSection::hints(&[
                    StatusBarHint::new("Enter", "buscar"),
                    StatusBarHint::new("Esc", "salir"),
                ]),
                right: StatusBarSection::empty(),
                style: StatusBarStyle::default(),
                is_focused: false,
            },
        );
    }
}
