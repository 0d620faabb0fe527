//! Line-oriented display for the console binary.
//!
//! Every action is written as one JSON object per line, and resolved photos
//! follow as their own line once the fetch completes.  The same actions are
//! applied to a [`SharedDisplay`] so the full display model stays available.

use std::io::Write;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::router::Action;

use super::photo::{resolve_photo, PhotoFetcher, PhotoTile};
use super::state::SharedDisplay;
use super::DisplaySink;

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

pub struct ConsoleDisplay {
    state: SharedDisplay,
    fetcher: Arc<dyn PhotoFetcher>,
    out: SharedWriter,
}

impl ConsoleDisplay {
    pub fn new(state: SharedDisplay, fetcher: Arc<dyn PhotoFetcher>, out: Box<dyn Write + Send>) -> Self {
        Self {
            state,
            fetcher,
            out: Arc::new(Mutex::new(out)),
        }
    }

    pub fn state(&self) -> SharedDisplay {
        Arc::clone(&self.state)
    }

    fn show_photo(&self, query: &str) {
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            log::warn!("display: no async runtime, cannot fetch photo for {query:?}");
            place_photo(&self.state, &self.out, PhotoTile::not_found(query));
            return;
        };

        let state = Arc::clone(&self.state);
        let out = Arc::clone(&self.out);
        let fetcher = Arc::clone(&self.fetcher);
        let query = query.to_string();
        runtime.spawn(async move {
            let tile = resolve_photo(fetcher.as_ref(), &query).await;
            place_photo(&state, &out, tile);
        });
    }
}

impl DisplaySink for ConsoleDisplay {
    fn apply(&self, action: &Action) {
        write_line(&self.out, action);

        match self.state.lock() {
            Ok(mut st) => st.apply(action),
            Err(_) => log::warn!("display: state lock poisoned, dropping {action:?}"),
        }

        if let Action::ShowPhoto { query } = action {
            self.show_photo(query);
        }
    }
}

fn place_photo(state: &SharedDisplay, out: &SharedWriter, tile: PhotoTile) {
    write_line(out, &tile);
    match state.lock() {
        Ok(mut st) => st.push_photo(tile),
        Err(_) => log::warn!("display: state lock poisoned, dropping photo tile"),
    }
}

fn write_line<T: Serialize>(out: &SharedWriter, value: &T) {
    let line = match serde_json::to_string(value) {
        Ok(line) => line,
        Err(e) => {
            log::warn!("display: could not serialise output: {e}");
            return;
        }
    };
    let Ok(mut out) = out.lock() else {
        log::warn!("display: output lock poisoned, dropping line {line}");
        return;
    };
    if let Err(e) = writeln!(out, "{line}").and_then(|_| out.flush()) {
        log::warn!("display: write failed: {e}");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;
    use crate::display::photo::PhotoError;
    use crate::display::state::new_shared_display;
    use async_trait::async_trait;
    use std::time::Duration;

    /// `Write` into a buffer the test can still read.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn lines(&self) -> Vec<serde_json::Value> {
            let bytes = self.0.lock().unwrap().clone();
            String::from_utf8(bytes)
                .unwrap()
                .lines()
                .map(|l| serde_json::from_str(l).unwrap())
                .collect()
        }
    }

    struct FixedPhoto;

    #[async_trait]
    impl PhotoFetcher for FixedPhoto {
        async fn fetch(&self, query: &str) -> Result<String, PhotoError> {
            Ok(format!("https://img.example/{query}.jpg"))
        }
    }

    fn make_display() -> (ConsoleDisplay, Captured) {
        let captured = Captured::default();
        let display = ConsoleDisplay::new(
            new_shared_display(&DisplayConfig::default(), "jarvis"),
            Arc::new(FixedPhoto),
            Box::new(captured.clone()),
        );
        (display, captured)
    }

    #[test]
    fn writes_each_action_as_json_line() {
        let (display, captured) = make_display();
        display.apply(&Action::ShowText {
            content: "hallo".into(),
        });
        display.apply(&Action::log("Tekst getoond en uitgesproken."));

        let lines = captured.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["action"], "show_text");
        assert_eq!(lines[0]["content"], "hallo");
        assert_eq!(lines[1]["speaker"], "assistant");

        let state = display.state();
        let st = state.lock().unwrap();
        assert_eq!(st.text.as_deref(), Some("hallo"));
        assert_eq!(st.log.len(), 1);
    }

    #[test]
    fn photo_without_runtime_shows_placeholder() {
        let (display, captured) = make_display();
        display.apply(&Action::ShowPhoto {
            query: "katten".into(),
        });

        let lines = captured.lines();
        assert_eq!(lines[1]["tile"], "placeholder");
        assert_eq!(display.state().lock().unwrap().photos.len(), 1);
    }

    #[tokio::test]
    async fn photo_is_fetched_and_added_to_grid() {
        let (display, captured) = make_display();
        display.apply(&Action::ShowPhoto {
            query: "katten".into(),
        });

        let state = display.state();
        for _ in 0..100 {
            if !state.lock().unwrap().photos.is_empty() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        let st = state.lock().unwrap();
        assert_eq!(
            st.photos.front(),
            Some(&PhotoTile::Image {
                url: "https://img.example/katten.jpg".into(),
                alt: "Foto van katten".into(),
            })
        );
        let lines = captured.lines();
        assert_eq!(lines[0]["action"], "show_photo");
        assert_eq!(lines[1]["tile"], "image");
    }

    #[test]
    fn poisoned_state_lock_still_writes_output() {
        let (display, captured) = make_display();
        let state = display.state();
        let _ = std::thread::spawn(move || {
            let _guard = state.lock().unwrap();
            panic!("poison the display state");
        })
        .join();
        assert!(display.state().is_poisoned());

        display.apply(&Action::ShowText {
            content: "hallo".into(),
        });

        let lines = captured.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["content"], "hallo");
    }

    #[test]
    fn poisoned_output_lock_keeps_state_updates() {
        let (display, captured) = make_display();
        let out = Arc::clone(&display.out);
        let _ = std::thread::spawn(move || {
            let _guard = out.lock().unwrap();
            panic!("poison the output writer");
        })
        .join();

        display.apply(&Action::ShowText {
            content: "hallo".into(),
        });

        assert!(captured.lines().is_empty());
        let state = display.state();
        assert_eq!(state.lock().unwrap().text.as_deref(), Some("hallo"));
    }
}
