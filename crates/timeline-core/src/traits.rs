use crate::id::ItemId;

/// Anything that can live in a timeline: it must expose its sortable id.
pub trait Identified {
    fn id(&self) -> ItemId;
}

impl Identified for ItemId {
    fn id(&self) -> ItemId {
        *self
    }
}
