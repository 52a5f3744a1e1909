use super::BubbleList;
use crate::domain::models::Author;
use crate::domain::models::Message;

#[test]
fn it_counts_rendered_lines_across_messages() {
    let mut bubble_list = BubbleList::new();
    let messages = vec![
        Message::new(Author::Caddie, "Fore"),
        Message::new(Author::User, "hello"),
    ];

    bubble_list.set_messages(&messages, 50);

    // Each single-line message renders as top bar, content, bottom bar.
    assert_eq!(bubble_list.len(), 6);
}

#[test]
fn it_rebuilds_the_tail_message_as_it_streams() {
    let mut bubble_list = BubbleList::new();
    let mut messages = vec![Message::new(Author::Caddie, "Fore")];
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.len(), 3);

    messages.last_mut().unwrap().append("!");
    bubble_list.set_messages(&messages, 50);

    assert_eq!(bubble_list.len(), 3);
}

#[test]
fn it_invalidates_the_cache_when_the_width_changes() {
    let mut bubble_list = BubbleList::new();
    let messages = vec![Message::new(
        Author::Caddie,
        "Keep your head down, swing easy, and let the club do the work",
    )];

    bubble_list.set_messages(&messages, 80);
    let wide_len = bubble_list.len();

    bubble_list.set_messages(&messages, 30);
    let narrow_len = bubble_list.len();

    assert!(narrow_len > wide_len);
}
