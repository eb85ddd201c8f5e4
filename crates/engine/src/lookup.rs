use std::borrow::Cow;

use api_types::{game::Game, member::Member};

/// A cached record that can be referenced by id and shown by name.
pub trait Named {
    fn id(&self) -> i64;
    fn label(&self) -> &str;
}

impl Named for Member {
    fn id(&self) -> i64 {
        self.member_id
    }

    fn label(&self) -> &str {
        &self.name
    }
}

impl Named for Game {
    fn id(&self) -> i64 {
        self.game_id
    }

    fn label(&self) -> &str {
        &self.game_name
    }
}

/// Returns the name of the first entry with `id`, or the id itself.
pub fn resolve<T: Named>(items: &[T], id: i64) -> Cow<'_, str> {
    items
        .iter()
        .find(|item| item.id() == id)
        .map(|item| Cow::Borrowed(item.label()))
        .unwrap_or_else(|| Cow::Owned(id.to_string()))
}

/// Select option label, e.g. `Ann (ID:3)`.
pub fn option_label<T: Named>(item: &T) -> String {
    format!("{} (ID:{})", item.label(), item.id())
}
