mod generating;
mod idle;
mod quiz;
mod summary;

use ratatui::{prelude::*, widgets::Block};

use crate::app::App;
use crate::session::SessionPhase;

/// Render the screen for the session's current lifecycle phase.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.session.phase() {
        SessionPhase::Idle => idle::render(frame, area, app),
        SessionPhase::Generating => generating::render(frame, area, app),
        SessionPhase::InProgress => quiz::render(frame, area, app),
        SessionPhase::Completed => summary::render(frame, area, app),
    }
}
