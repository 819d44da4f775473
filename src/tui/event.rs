use crossterm::event::{KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc;

#[derive(Debug, Clone)]
pub enum Event {
    Key(KeyEvent),
    Resize,
    Tick,
}

pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut reader = crossterm::event::EventStream::new();
            let mut tick_interval =
                tokio::time::interval(std::time::Duration::from_millis(tick_rate_ms));

            loop {
                tokio::select! {
                    maybe_event = reader.next() => {
                        let event = match maybe_event {
                            Some(Ok(crossterm::event::Event::Key(key)))
                                // Filter for Press only (Windows compatibility)
                                if key.kind == KeyEventKind::Press => Event::Key(key),
                            Some(Ok(crossterm::event::Event::Resize(_, _))) => Event::Resize,
                            Some(Ok(_)) | Some(Err(_)) => continue,
                            None => break,
                        };
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    _ = tick_interval.tick() => {
                        if tx.send(Event::Tick).is_err() {
                            break;
                        }
                    }
                }
            }
        });

        EventHandler { rx }
    }

    /// Next event, or None once the terminal input stream has closed.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
