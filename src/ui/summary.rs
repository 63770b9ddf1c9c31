use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::Score;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let score = app.session.score();
    let grade_color = get_grade_color(score.percent);

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(7),
        Constraint::Fill(1),
        Constraint::Length(2),
    ])
    .margin(1)
    .split(area);

    render_score_summary(frame, chunks[1], score, grade_color);
    render_incorrect_review(frame, chunks[2], app);
    render_controls(frame, chunks[3]);
}

fn get_grade_color(percent: u32) -> Color {
    match percent {
        90..=100 => Color::Green,
        70..=89 => Color::Cyan,
        50..=69 => Color::Yellow,
        _ => Color::Red,
    }
}

fn render_score_summary(frame: &mut Frame, area: Rect, score: Score, grade_color: Color) {
    let content = vec![
        Line::from(""),
        Line::from(Span::styled(
            "QUIZ COMPLETED",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", score.percent),
            Style::default().fg(grade_color).bold(),
        )),
        Line::from(Span::styled(
            format!(
                "You answered {} out of {} questions correctly",
                score.correct, score.total
            ),
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    let widget = Paragraph::new(content).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Color::DarkGray),
    );
    frame.render_widget(widget, area);
}

fn render_incorrect_review(frame: &mut Frame, area: Rect, app: &App) {
    let review = app.session.incorrect_review();
    let questions = app.session.questions();

    let mut lines: Vec<Line> = Vec::new();

    if review.is_empty() {
        lines.push(Line::from(Span::styled(
            "Perfect score, nothing to review.",
            Style::default().fg(Color::Green),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            "Review your incorrect answers",
            Style::default().fg(Color::White).bold(),
        )));
        lines.push(Line::from(""));

        for entry in &review {
            let question = &questions[entry.index];

            lines.push(Line::from(Span::styled(
                format!("Question {}", entry.index + 1),
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(Span::styled(
                question.text.as_str(),
                Style::default().fg(Color::White),
            )));

            let your_answer = match entry.selected {
                Some(picked) => question.options[picked].text.as_str(),
                None => "Not answered",
            };
            lines.push(Line::from(vec![
                Span::styled(" x ", Style::default().fg(Color::Red)),
                Span::styled("Your answer: ", Style::default().fg(Color::Red)),
                Span::styled(your_answer, Style::default().fg(Color::Gray)),
            ]));
            lines.push(Line::from(vec![
                Span::styled(" + ", Style::default().fg(Color::Green)),
                Span::styled("Correct answer: ", Style::default().fg(Color::Green)),
                Span::styled(
                    question.options[question.correct_answer_index].text.as_str(),
                    Style::default().fg(Color::Gray),
                ),
            ]));
            lines.push(Line::from(""));
        }
    }

    let widget = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().padding(Padding::horizontal(1)))
        .scroll((app.summary_scroll() as u16, 0));
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect) {
    let widget = Paragraph::new("j/k scroll  ·  r restart  ·  q quit")
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
