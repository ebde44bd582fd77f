use crate::domain::Message;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use uuid::Uuid;

/// One counterpart's slice of the viewer's message history, before profile
/// resolution.
#[derive(Debug, Clone)]
pub struct ConversationSeed {
    pub counterpart_id: Uuid,
    pub unread_count: u32,
    pub last_message: Message,
}

/// Groups a viewer's messages by counterpart. Input order does not matter:
/// the last message is picked by timestamp comparison, not arrival order,
/// and the result is sorted newest first.
///
/// Unread counts only messages addressed to the viewer; what the viewer sent
/// never counts against them.
pub fn group_by_counterpart(viewer_id: Uuid, messages: Vec<Message>) -> Vec<ConversationSeed> {
    let mut threads: HashMap<Uuid, ConversationSeed> = HashMap::new();

    for message in messages {
        let counterpart_id = if message.sender_id == viewer_id {
            message.receiver_id
        } else {
            message.sender_id
        };
        let unread = u32::from(message.receiver_id == viewer_id && !message.read);

        match threads.entry(counterpart_id) {
            Entry::Occupied(mut entry) => {
                let thread = entry.get_mut();
                thread.unread_count += unread;
                if message.created_at > thread.last_message.created_at {
                    thread.last_message = message;
                }
            }
            Entry::Vacant(entry) => {
                entry.insert(ConversationSeed {
                    counterpart_id,
                    unread_count: unread,
                    last_message: message,
                });
            }
        }
    }

    let mut seeds: Vec<ConversationSeed> = threads.into_values().collect();
    seeds.sort_by(|a, b| b.last_message.created_at.cmp(&a.last_message.created_at));
    seeds
}
