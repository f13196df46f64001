use uuid::Uuid;

/// source of unique, creation-time-sortable identifiers
pub trait IdGenerator: Send + Sync {
    fn new_id(&self) -> String;
}

/// uuidv7 identifiers: unique across the system and lexicographically
/// sortable by creation time
#[derive(Debug, Clone, Copy, Default)]
pub struct SortableIdGenerator;

impl IdGenerator for SortableIdGenerator {
    fn new_id(&self) -> String {
        Uuid::now_v7().to_string()
    }
}
