use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent};

pub enum Event {
    Key(KeyEvent),
    FocusLost,
    Tick,
}

/// Polls the terminal on its own thread and forwards everything over a
/// channel, so all game state is only ever touched by the receiving loop.
pub struct EventHandler {
    rx: mpsc::Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || loop {
            let sent = if event::poll(tick_rate).unwrap_or(false) {
                match event::read() {
                    // Press, repeat and release all matter for held keys
                    Ok(crossterm::event::Event::Key(key)) => tx.send(Event::Key(key)),
                    Ok(crossterm::event::Event::FocusLost) => tx.send(Event::FocusLost),
                    Ok(_) => Ok(()),
                    Err(err) => {
                        tracing::warn!("terminal read failed: {err}");
                        Ok(())
                    }
                }
            } else {
                tx.send(Event::Tick)
            };
            if sent.is_err() {
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
