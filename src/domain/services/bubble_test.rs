use ratatui::text::Line;

use super::Bubble;
use super::BubbleAlignment;
use crate::domain::models::Author;
use crate::domain::models::Message;
use crate::domain::models::MessageType;

fn line_to_string(line: &Line) -> String {
    return line
        .spans
        .iter()
        .map(|span| {
            return span.content.to_string();
        })
        .collect::<Vec<String>>()
        .join("");
}

#[test]
fn it_frames_caddie_messages_with_the_author_name() {
    let message = Message::new(Author::Caddie, "Fore");
    let lines = Bubble::new(&message, BubbleAlignment::Left, 50).as_lines();

    assert_eq!(lines.len(), 3);
    assert!(line_to_string(&lines[0]).starts_with("╭Caddie"));
    assert!(line_to_string(&lines[1]).contains("Fore"));
    assert!(line_to_string(&lines[2]).trim_end().ends_with('╯'));
}

#[test]
fn it_right_aligns_user_bubbles() {
    let message = Message::new(Author::User, "hello");
    let lines = Bubble::new(&message, BubbleAlignment::Right, 50).as_lines();

    for line in lines {
        assert!(line_to_string(&line).starts_with(' '));
    }
}

#[test]
fn it_wraps_text_that_exceeds_the_window_width() {
    let message = Message::new(
        Author::Caddie,
        "Keep your head down, swing easy, and let the club do the work",
    );
    let lines = Bubble::new(&message, BubbleAlignment::Left, 30).as_lines();

    // Top bar, at least three wrapped content lines, bottom bar.
    assert!(lines.len() > 4);
}

#[test]
fn it_paints_error_bubbles_red() {
    let message = Message::new_with_type(Author::Caddie, MessageType::Error, "Error: server down");
    let lines = Bubble::new(&message, BubbleAlignment::Left, 50).as_lines();

    let top_bar = &lines[0];
    assert!(top_bar.spans[0].style.fg == Some(ratatui::style::Color::Red));
}
