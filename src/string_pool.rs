//! Interning pool for value strings.
//!
//! Every decoded string value, file path and style span tag is interned
//! here. Entries are deduplicated by text; the first interner's
//! configuration sticks, while the priority is upgraded to the highest any
//! interner asked for.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use hashbrown::HashMap;

use crate::config::ConfigDescriptor;

/// Relative ordering weight for pool serialization.
///
/// File paths are interned high so they sort to the front of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    #[default]
    Normal,
    High,
}

#[derive(Debug)]
struct PoolEntry {
    text: String,
    config: ConfigDescriptor,
    priority: Cell<Priority>,
}

/// Cheap handle to an interned string. Clones share the entry; equality is
/// by text content.
#[derive(Clone)]
pub struct StringRef {
    entry: Rc<PoolEntry>,
}

impl StringRef {
    pub fn text(&self) -> &str {
        &self.entry.text
    }

    pub fn priority(&self) -> Priority {
        self.entry.priority.get()
    }

    pub fn config(&self) -> &ConfigDescriptor {
        &self.entry.config
    }
}

impl PartialEq for StringRef {
    fn eq(&self, other: &Self) -> bool {
        self.entry.text == other.entry.text
    }
}

impl Eq for StringRef {}

impl fmt::Debug for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringRef({:?})", self.entry.text)
    }
}

impl fmt::Display for StringRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.entry.text)
    }
}

/// One span of markup over a styled string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRef {
    pub name: StringRef,
    pub first_char: u32,
    pub last_char: u32,
}

/// Styled text: the flattened string plus its markup spans, all interned in
/// the same pool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRef {
    pub text: StringRef,
    pub spans: Vec<SpanRef>,
}

#[derive(Default)]
pub struct StringPool {
    entries: Vec<Rc<PoolEntry>>,
    index: HashMap<String, Rc<PoolEntry>>,
}

impl StringPool {
    pub fn new() -> Self {
        StringPool::default()
    }

    /// Interns `text`, reusing an existing entry with the same content.
    ///
    /// On reuse the entry's priority is raised to `priority` if that is
    /// higher; its configuration is left as the first interner set it.
    pub fn intern(&mut self, text: &str, priority: Priority, config: &ConfigDescriptor) -> StringRef {
        if let Some(entry) = self.index.get(text) {
            if priority > entry.priority.get() {
                entry.priority.set(priority);
            }
            return StringRef {
                entry: Rc::clone(entry),
            };
        }

        let entry = Rc::new(PoolEntry {
            text: text.to_owned(),
            config: *config,
            priority: Cell::new(priority),
        });
        self.entries.push(Rc::clone(&entry));
        self.index.insert(text.to_owned(), Rc::clone(&entry));
        StringRef { entry }
    }

    /// Interns styled text. Span tag names go through the same pool with
    /// default context.
    pub fn intern_styled<'a>(
        &mut self,
        text: &str,
        spans: impl IntoIterator<Item = (&'a str, u32, u32)>,
        priority: Priority,
        config: &ConfigDescriptor,
    ) -> StyledRef {
        let text = self.intern(text, priority, config);
        let spans = spans
            .into_iter()
            .map(|(tag, first_char, last_char)| SpanRef {
                name: self.intern(tag, Priority::Normal, &ConfigDescriptor::default()),
                first_char,
                last_char,
            })
            .collect();
        StyledRef { text, spans }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Interned texts in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.text.as_str())
    }
}

impl fmt::Debug for StringPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StringPool({} strings)", self.entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deduplicates_by_text() {
        let mut pool = StringPool::new();
        let a = pool.intern("hello", Priority::Normal, &ConfigDescriptor::default());
        let b = pool.intern("hello", Priority::Normal, &ConfigDescriptor::default());
        let c = pool.intern("world", Priority::Normal, &ConfigDescriptor::default());

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(pool.len(), 2);
    }

    #[test]
    fn priority_upgrades_to_highest() {
        let mut pool = StringPool::new();
        let config = ConfigDescriptor::default();

        let a = pool.intern("res/layout/main.xml", Priority::Normal, &config);
        assert_eq!(a.priority(), Priority::Normal);

        pool.intern("res/layout/main.xml", Priority::High, &config);
        assert_eq!(a.priority(), Priority::High);

        // A later normal-priority intern does not downgrade.
        pool.intern("res/layout/main.xml", Priority::Normal, &config);
        assert_eq!(a.priority(), Priority::High);
    }

    #[test]
    fn first_config_wins() {
        let mut pool = StringPool::new();
        let mut land = ConfigDescriptor::default();
        land.orientation = ConfigDescriptor::ORIENTATION_LAND;

        let a = pool.intern("shared", Priority::Normal, &land);
        let b = pool.intern("shared", Priority::Normal, &ConfigDescriptor::default());

        assert_eq!(a.config().orientation, ConfigDescriptor::ORIENTATION_LAND);
        assert_eq!(b.config().orientation, ConfigDescriptor::ORIENTATION_LAND);
    }

    #[test]
    fn styled_text_shares_the_pool() {
        let mut pool = StringPool::new();
        let config = ConfigDescriptor::default();

        let styled = pool.intern_styled("bold text", [("b", 0, 3)], Priority::Normal, &config);
        assert_eq!(styled.text.text(), "bold text");
        assert_eq!(styled.spans.len(), 1);
        assert_eq!(styled.spans[0].name.text(), "b");

        // The tag is a plain pool entry, shared with later interns.
        let tag = pool.intern("b", Priority::Normal, &config);
        assert_eq!(tag, styled.spans[0].name);
        assert_eq!(pool.len(), 2);
    }
}
