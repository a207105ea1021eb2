use std::fmt::Write as _;
use std::io::Write;

use bookmarks_store::Observer;

use crate::state::{BookmarksState, NodeId, ROOT_NODE_ID};

/// Renders the page as text whenever the visible output changes
pub struct DisplayObserver {
    out: Box<dyn Write + Send>,
    show_urls: bool,
    last_rendered: Option<String>,
}

impl DisplayObserver {
    pub fn new(out: Box<dyn Write + Send>, show_urls: bool) -> Self {
        Self {
            out,
            show_urls,
            last_rendered: None,
        }
    }

    pub fn stdout(show_urls: bool) -> Self {
        Self::new(Box::new(std::io::stdout()), show_urls)
    }
}

impl Observer<BookmarksState> for DisplayObserver {
    fn on_state_changed(&mut self, state: &BookmarksState) {
        let rendered = render(state, self.show_urls);
        if self.last_rendered.as_ref() == Some(&rendered) {
            return;
        }

        let result = self
            .out
            .write_all(rendered.as_bytes())
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            log::error!("Failed to render bookmarks: {}", e);
        }
        self.last_rendered = Some(rendered);
    }
}

/// Text rendering of the folder sidebar followed by the displayed list
///
/// ```text
/// Folders
///   - Bookmarks bar *
///     + Work
///   - Other bookmarks
///
/// Bookmarks bar
///   [ ] 3  Work/
///   [x] 4  Rust <https://www.rust-lang.org>
/// ```
pub fn render(state: &BookmarksState, show_urls: bool) -> String {
    let mut out = String::new();

    out.push_str("Folders\n");
    if let Some(root) = state.nodes.get(ROOT_NODE_ID) {
        for id in root.child_ids() {
            render_folder(state, id, 1, &mut out);
        }
    }
    out.push('\n');

    if state.is_showing_search() {
        let _ = writeln!(out, "Search results for {:?}", state.search.term);
    } else if state.search.in_progress {
        let _ = writeln!(out, "Searching for {:?}...", state.search.term);
    } else {
        let title = state
            .nodes
            .get(&state.selected_folder)
            .map(|folder| folder.title.as_str())
            .unwrap_or_default();
        let _ = writeln!(out, "{}", title);
    }

    let displayed = state.displayed_list();
    if displayed.is_empty() {
        out.push_str("  (empty)\n");
    }
    for id in displayed {
        let Some(node) = state.nodes.get(id) else {
            continue;
        };
        let mark = if state.selection.contains(id) { "x" } else { " " };
        let _ = write!(out, "  [{}] {:<3}{}", mark, node.id, node.title);
        match &node.url {
            None => out.push('/'),
            Some(url) if show_urls => {
                let _ = write!(out, " <{}>", url);
            }
            Some(_) => {}
        }
        out.push('\n');
    }

    out
}

fn render_folder(state: &BookmarksState, id: &NodeId, level: usize, out: &mut String) {
    let Some(folder) = state.nodes.get(id).filter(|node| node.is_folder()) else {
        return;
    };
    let open = state.is_folder_open(id);
    let marker = if open { '-' } else { '+' };
    let selected = if *id == state.selected_folder && !state.is_showing_search() {
        " *"
    } else {
        ""
    };
    let _ = writeln!(out, "{}{} {}{}", "  ".repeat(level), marker, folder.title, selected);

    if open {
        for child in folder.child_ids() {
            render_folder(state, child, level + 1, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::fixtures::sample_nodes;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_render_folder_view() {
        let mut state = BookmarksState::with_nodes(sample_nodes());
        state.selection.items.insert("4".into());

        let expected = "\
Folders
  - Bookmarks bar *
    + Work
  - Other bookmarks

Bookmarks bar
  [ ] 3  Work/
  [x] 4  Rust <https://www.rust-lang.org>
";
        assert_eq!(render(&state, true), expected);
    }

    #[test]
    fn test_render_search_without_urls() {
        let mut state = BookmarksState::with_nodes(sample_nodes());
        state.search.term = "news".into();
        state.search.results = Some(vec!["7".into()]);

        let rendered = render(&state, false);
        assert!(rendered.contains("Search results for \"news\""));
        assert!(rendered.contains("  [ ] 7  News\n"));
        assert!(!rendered.contains(" *"));
    }

    #[test]
    fn test_render_empty_folder() {
        let mut state = BookmarksState::with_nodes(sample_nodes());
        state.selected_folder = "6".into();
        assert!(render(&state, true).ends_with("Archive\n  (empty)\n"));
    }

    #[test]
    fn test_observer_skips_unchanged_output() {
        let buffer = SharedBuffer::default();
        let mut observer = DisplayObserver::new(Box::new(buffer.clone()), true);
        let state = BookmarksState::with_nodes(sample_nodes());

        observer.on_state_changed(&state);
        let first = buffer.contents();
        observer.on_state_changed(&state);

        assert_eq!(buffer.contents(), first);
        assert_eq!(first, render(&state, true));
    }
}
