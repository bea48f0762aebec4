use artbox::{
    fonts, integrations::ratatui::ArtBox, Alignment as ArtAlignment, Color as ArtColor, Fill,
    LinearGradient, Renderer,
};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::state::WeatherReading;

/// Passive view over the current reading; renders whatever is set.
#[derive(Default)]
pub struct WeatherCard;

pub struct WeatherCardProps<'a> {
    pub reading: Option<&'a WeatherReading>,
}

/// Emoji stand-in for the condition text the provider sends. Matches both the
/// Spanish descriptions (`lang=es`) and the English fallbacks.
pub fn condition_emoji(condition: &str) -> &'static str {
    let c = condition.to_lowercase();
    if c.contains("torment") || c.contains("thunder") {
        "⛈"
    } else if c.contains("nieve") || c.contains("snow") {
        "❄"
    } else if c.contains("lluvia") || c.contains("llovizna") || c.contains("rain") || c.contains("drizzle") {
        "🌧"
    } else if c.contains("niebla") || c.contains("bruma") || c.contains("fog") || c.contains("mist") {
        "🌫"
    } else if c.contains("nube") || c.contains("cloud") {
        "☁"
    } else if c.contains("despejado") || c.contains("clear") {
        "☀"
    } else {
        "🌡"
    }
}

fn font_stack() -> Vec<artbox::Font> {
    fonts::stack(&["terminus", "miniwi"])
}

fn temperature_gradient(celsius: f64) -> Fill {
    let (start, end) = match celsius {
        t if t < 0.0 => (ArtColor::rgb(150, 200, 255), ArtColor::rgb(200, 230, 255)),
        t if t < 15.0 => (ArtColor::rgb(100, 180, 255), ArtColor::rgb(150, 220, 200)),
        t if t < 25.0 => (ArtColor::rgb(100, 200, 150), ArtColor::rgb(255, 220, 100)),
        t if t < 35.0 => (ArtColor::rgb(255, 180, 80), ArtColor::rgb(255, 120, 80)),
        _ => (ArtColor::rgb(255, 100, 80), ArtColor::rgb(255, 60, 60)),
    };
    Fill::Linear(LinearGradient::horizontal(start, end))
}

fn details_line(reading: &WeatherReading) -> Option<Line<'static>> {
    let mut parts = Vec::new();
    if let Some(h) = reading.humidity_pct {
        parts.push(format!("Humedad {h}%"));
    }
    if let Some(w) = reading.wind_speed_mps {
        parts.push(format!("Viento {w:.1} m/s"));
    }
    if let Some(f) = reading.feels_like_c {
        parts.push(format!("Sensación {f:.1}°C"));
    }
    if parts.is_empty() {
        return None;
    }
    Some(
        Line::from(Span::styled(
            parts.join("  ·  "),
            Style::default().fg(Color::DarkGray),
        ))
        .centered(),
    )
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let Some(reading) = props.reading else {
            let hint = Line::from(Span::styled(
                "Busca una ciudad para ver el clima",
                Style::default().fg(Color::DarkGray),
            ))
            .centered();
            let chunks = Layout::vertical([Constraint::Length(1)])
                .flex(Flex::Center)
                .split(area);
            frame.render_widget(Paragraph::new(hint), chunks[0]);
            return;
        };

        let chunks = Layout::vertical([
            Constraint::Length(1), // city
            Constraint::Length(1), // spacer
            Constraint::Max(6),    // temperature, FIGlet when it fits
            Constraint::Length(1), // condition
            Constraint::Length(1), // details
        ])
        .flex(Flex::Center)
        .split(area);

        let city = Line::from(Span::styled(
            reading.city.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .centered();
        frame.render_widget(Paragraph::new(city), chunks[0]);

        let temp_text = format!("{:.1}°C", reading.temperature_c);
        let renderer = Renderer::new(font_stack())
            .with_plain_fallback()
            .with_alignment(ArtAlignment::Center)
            .with_fill(temperature_gradient(reading.temperature_c));
        frame.render_widget(ArtBox::new(&renderer, &temp_text), chunks[2]);

        let condition = Line::from(vec![
            Span::raw(condition_emoji(&reading.condition)),
            Span::raw("  "),
            Span::styled(reading.condition.clone(), Style::default().fg(Color::Gray)),
        ]);
        frame.render_widget(
            Paragraph::new(condition).alignment(Alignment::Center),
            chunks[3],
        );

        if let Some(details) = details_line(reading) {
            frame.render_widget(Paragraph::new(details), chunks[4]);
        }
    }
}
