//! Script navigation - intents and the cursor over script blocks

mod cursor;
mod intent;

pub use cursor::Cursor;
pub use intent::{advance_from, NavigationIntent};
