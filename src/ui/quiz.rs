use ratatui::{
    prelude::*,
    widgets::{Paragraph, Wrap},
};

use crate::app::App;
use crate::models::QuizQuestion;

const OPTION_LABELS: [char; 4] = ['A', 'B', 'C', 'D'];

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let Some(question) = app.session.current_question() else {
        return;
    };
    let answer = app.session.current_answer();

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(2)
    .split(area);

    render_progress(frame, chunks[0], app);
    render_question_text(frame, chunks[1], &question.text);
    render_options(frame, chunks[2], question, answer, app.selected_option());
    render_controls(
        frame,
        chunks[3],
        answer.is_some(),
        app.session.is_last_question(),
    );
}

fn render_progress(frame: &mut Frame, area: Rect, app: &App) {
    let progress = format!(
        "Question {} of {}",
        app.session.question_number(),
        app.session.total_questions()
    );
    let widget = Paragraph::new(progress)
        .alignment(Alignment::Right)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

fn render_question_text(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(widget, area);
}

/// Open questions highlight the cursor. Once answered, the correct option
/// turns green, a wrong pick turns red, the rest dim out, and the correct
/// and picked options reveal their explanations.
fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &QuizQuestion,
    answer: Option<usize>,
    selected: usize,
) {
    let mut lines: Vec<Line> = Vec::with_capacity(question.options.len() * 2);

    for (index, option) in question.options.iter().enumerate() {
        match answer {
            None => {
                let is_selected = index == selected;
                let style = if is_selected {
                    Style::default().fg(Color::Cyan).bold()
                } else {
                    Style::default().fg(Color::Gray)
                };
                let marker = if is_selected { ">" } else { " " };

                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", marker), style),
                    Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
                    Span::styled(option.text.as_str(), style),
                ]));
            }
            Some(picked) => {
                let is_correct = index == question.correct_answer_index;
                let is_picked = index == picked;
                let (marker, style) = if is_correct {
                    ("+", Style::default().fg(Color::Green))
                } else if is_picked {
                    ("x", Style::default().fg(Color::Red))
                } else {
                    (" ", Style::default().fg(Color::DarkGray))
                };

                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", marker), style),
                    Span::styled(format!("{}. ", OPTION_LABELS[index]), style),
                    Span::styled(option.text.as_str(), style),
                ]));

                if is_correct || is_picked {
                    lines.push(Line::from(vec![
                        Span::raw("      "),
                        Span::styled(
                            option.explanation.as_str(),
                            Style::default().fg(Color::Gray),
                        ),
                    ]));
                }
            }
        }
        lines.push(Line::from(""));
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(widget, area);
}

fn render_controls(frame: &mut Frame, area: Rect, answered: bool, last: bool) {
    let next_label = if last { "finish" } else { "next" };
    let text = if answered {
        format!("b back  ·  n {}  ·  q quit", next_label)
    } else {
        format!(
            "j/k navigate  ·  enter answer  ·  b back  ·  n {}  ·  q quit",
            next_label
        )
    };
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}
